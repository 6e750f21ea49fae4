//! Enquiry lifecycle
//!
//! A sponsorship enquiry is created exactly once by a sponsor and then
//! moves through `pending`, `under_review`, `accepted` and `rejected` by
//! organizer action. Transition validation is configurable:
//!
//! - **permissive** (the default): any status may move to any
//!   non-`pending` status, including re-opening `rejected -> accepted`.
//!   This mirrors how operators actually use the workflow today, where a
//!   rejection is correctable.
//! - **strict**: an enforced edge set. `pending` may move anywhere,
//!   `under_review` may settle to `accepted`/`rejected`, and the settled
//!   statuses are terminal.
//!
//! Re-applying the current status is allowed in both modes and only
//! advances the update timestamp.

use std::sync::Arc;

use chrono::Utc;
use futures::future::join_all;
use serde_json::json;
use uuid::Uuid;
use validator::Validate;

use sponsorhub_shared::client::{BulkFailure, BulkTransitionReport, EnquiryCreateRequest};
use sponsorhub_shared::message::SyncAction;
use sponsorhub_shared::models::{EnquiryStatus, Event, SponsorshipEnquiry, SponsorshipPackage};

use crate::auth::CurrentUser;
use crate::services::SyncBus;
use crate::store::{DocumentStore, collections};
use crate::utils::{AppError, AppResult};

/// Governs which status transitions are accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TransitionPolicy {
    /// Observed behavior: no enforced edge set.
    #[default]
    Permissive,
    /// Settled enquiries are terminal.
    Strict,
}

impl TransitionPolicy {
    /// Whether `from -> to` is an accepted transition. Re-applying the
    /// current status is always accepted.
    pub fn allows(&self, from: EnquiryStatus, to: EnquiryStatus) -> bool {
        if !to.is_transition_target() {
            return false;
        }
        if from == to {
            return true;
        }
        match self {
            TransitionPolicy::Permissive => true,
            TransitionPolicy::Strict => matches!(
                (from, to),
                (
                    EnquiryStatus::Pending,
                    EnquiryStatus::Accepted | EnquiryStatus::Rejected | EnquiryStatus::UnderReview
                ) | (
                    EnquiryStatus::UnderReview,
                    EnquiryStatus::Accepted | EnquiryStatus::Rejected
                )
            ),
        }
    }
}

/// Enquiry workflow service over the document store and sync bus.
#[derive(Clone)]
pub struct EnquiryService {
    store: Arc<dyn DocumentStore>,
    bus: SyncBus,
    policy: TransitionPolicy,
}

impl EnquiryService {
    pub fn new(store: Arc<dyn DocumentStore>, bus: SyncBus, policy: TransitionPolicy) -> Self {
        Self { store, bus, policy }
    }

    /// Submit a new enquiry on behalf of an authenticated sponsor.
    ///
    /// Display fields are denormalized from the referenced event and
    /// package at this point, so the enquiry record is self-contained.
    /// The record lands with `status = pending` and both timestamps set.
    pub async fn submit(
        &self,
        sponsor: Option<&CurrentUser>,
        req: EnquiryCreateRequest,
    ) -> AppResult<SponsorshipEnquiry> {
        let sponsor = sponsor.ok_or(AppError::Unauthorized)?;
        req.validate()?;

        let event: Event = self
            .store
            .get(collections::EVENTS, &req.event_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Event {}", req.event_id)))?
            .decode()?;

        let package: SponsorshipPackage = self
            .store
            .get(collections::PACKAGES, &req.package_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Package {}", req.package_id)))?
            .decode()?;

        if package.event_id != event.id {
            return Err(AppError::business_rule(format!(
                "Package {} does not belong to event {}",
                package.id, event.id
            )));
        }

        let now = Utc::now();
        let enquiry = SponsorshipEnquiry {
            id: Uuid::new_v4().to_string(),
            event_id: event.id.clone(),
            sponsor_id: sponsor.id.clone(),
            package_id: package.id.clone(),
            event_title: event.title.clone(),
            package_name: package.name.clone(),
            company_name: req.company_name,
            contact_email: req.contact_email,
            contact_number: req.contact_number,
            message: req.message,
            status: EnquiryStatus::Pending,
            submitted_at: now,
            updated_at: now,
            organizer_response: None,
            response_date: None,
        };

        let doc = self
            .store
            .set(
                collections::ENQUIRIES,
                &enquiry.id,
                serde_json::to_value(&enquiry)
                    .map_err(|e| AppError::internal(e.to_string()))?,
            )
            .await?;
        let stored: SponsorshipEnquiry = doc.decode()?;

        self.bus.publish(
            collections::ENQUIRIES,
            SyncAction::Created,
            &stored.id,
            Some(&stored),
        );

        tracing::info!(
            enquiry_id = %stored.id,
            sponsor_id = %sponsor.id,
            event_id = %stored.event_id,
            "Enquiry submitted"
        );

        Ok(stored)
    }

    /// Apply a status transition to one enquiry.
    ///
    /// The update timestamp always advances; an organizer response, when
    /// given, is recorded together with its response date.
    pub async fn transition(
        &self,
        id: &str,
        target: EnquiryStatus,
        response: Option<String>,
    ) -> AppResult<SponsorshipEnquiry> {
        if !target.is_transition_target() {
            return Err(AppError::invalid(format!(
                "{target} is not a valid transition target"
            )));
        }

        let current: SponsorshipEnquiry = self
            .store
            .get(collections::ENQUIRIES, id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Enquiry {id}")))?
            .decode()?;

        if !self.policy.allows(current.status, target) {
            return Err(AppError::business_rule(format!(
                "Transition {} -> {} is not allowed",
                current.status, target
            )));
        }

        let mut partial = json!({ "status": target });
        if let Some(text) = &response {
            crate::utils::validation::validate_optional_text(
                &response,
                "organizer_response",
                crate::utils::validation::MAX_TEXT_LEN,
            )?;
            partial["organizer_response"] = json!(text);
            partial["response_date"] = json!(Utc::now());
        }

        let doc = self
            .store
            .update(collections::ENQUIRIES, id, partial)
            .await?;
        let updated: SponsorshipEnquiry = doc.decode()?;

        self.bus.publish(
            collections::ENQUIRIES,
            SyncAction::Updated,
            id,
            Some(&updated),
        );

        tracing::info!(
            enquiry_id = %id,
            from = %current.status,
            to = %target,
            "Enquiry status transitioned"
        );

        Ok(updated)
    }

    /// Apply the same transition to many enquiries.
    ///
    /// Items are fired as independent concurrent writes with no atomicity
    /// and no rollback: a failed item leaves the rest transitioned, and
    /// the report says which is which.
    pub async fn bulk_transition(
        &self,
        ids: &[String],
        target: EnquiryStatus,
        response: Option<String>,
    ) -> AppResult<BulkTransitionReport> {
        let outcomes = join_all(
            ids.iter()
                .map(|id| async { (id.clone(), self.transition(id, target, response.clone()).await) }),
        )
        .await;

        let mut report = BulkTransitionReport {
            requested: ids.len(),
            succeeded: Vec::new(),
            failed: Vec::new(),
        };
        for (id, outcome) in outcomes {
            match outcome {
                Ok(_) => report.succeeded.push(id),
                Err(e) => report.failed.push(BulkFailure {
                    id,
                    error: e.to_string(),
                }),
            }
        }

        if !report.all_succeeded() {
            tracing::warn!(
                requested = report.requested,
                failed = report.failed.len(),
                "Bulk transition completed with failures"
            );
        }

        Ok(report)
    }

    /// All enquiries, newest first.
    pub async fn list(&self) -> AppResult<Vec<SponsorshipEnquiry>> {
        let docs = self.store.list(collections::ENQUIRIES).await?;
        let mut out = Vec::with_capacity(docs.len());
        for doc in docs {
            out.push(doc.decode()?);
        }
        Ok(out)
    }

    pub async fn get(&self, id: &str) -> AppResult<SponsorshipEnquiry> {
        self.store
            .get(collections::ENQUIRIES, id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Enquiry {id}")))?
            .decode()
            .map_err(Into::into)
    }
}

/// Pure, synchronous filter over an already-fetched set. Mirrors what
/// subscribed views do client-side; no server query involved.
pub fn filter_enquiries(
    enquiries: &[SponsorshipEnquiry],
    event_id: Option<&str>,
    status: Option<EnquiryStatus>,
) -> Vec<SponsorshipEnquiry> {
    enquiries
        .iter()
        .filter(|e| event_id.map_or(true, |id| e.event_id == id))
        .filter(|e| status.map_or(true, |s| e.status == s))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use sponsorhub_shared::models::Role;

    fn sponsor() -> CurrentUser {
        CurrentUser {
            id: "s1".to_string(),
            email: "sponsor@example.com".to_string(),
            role: Role::Sponsor,
            grants: vec![],
        }
    }

    fn request() -> EnquiryCreateRequest {
        EnquiryCreateRequest {
            event_id: "e1".to_string(),
            package_id: "p1".to_string(),
            company_name: "Acme Corp".to_string(),
            contact_email: "contact@acme.example".to_string(),
            contact_number: Some("+351 912 345 678".to_string()),
            message: Some("Interested in exposure".to_string()),
        }
    }

    async fn service_with_refs(policy: TransitionPolicy) -> EnquiryService {
        let store = Arc::new(MemoryStore::new());
        let now = Utc::now();
        store
            .set(
                collections::EVENTS,
                "e1",
                serde_json::to_value(Event {
                    id: "e1".to_string(),
                    organizer_id: "o1".to_string(),
                    title: "Tech Expo".to_string(),
                    description: None,
                    venue: None,
                    starts_at: None,
                    ends_at: None,
                    is_published: true,
                    created_at: now,
                    updated_at: now,
                })
                .unwrap(),
            )
            .await
            .unwrap();
        store
            .set(
                collections::PACKAGES,
                "p1",
                serde_json::to_value(SponsorshipPackage {
                    id: "p1".to_string(),
                    event_id: "e1".to_string(),
                    name: "Gold".to_string(),
                    description: None,
                    price: Some(5000.0),
                    benefits: vec!["logo placement".to_string()],
                    created_at: now,
                    updated_at: now,
                })
                .unwrap(),
            )
            .await
            .unwrap();
        EnquiryService::new(store, SyncBus::new(), policy)
    }

    #[tokio::test]
    async fn submit_creates_pending_enquiry_with_denormalized_fields() {
        let service = service_with_refs(TransitionPolicy::Permissive).await;
        let before = Utc::now();
        let enquiry = service.submit(Some(&sponsor()), request()).await.unwrap();

        assert_eq!(enquiry.status, EnquiryStatus::Pending);
        assert_eq!(enquiry.event_id, "e1");
        assert_eq!(enquiry.package_id, "p1");
        assert_eq!(enquiry.sponsor_id, "s1");
        assert_eq!(enquiry.event_title, "Tech Expo");
        assert_eq!(enquiry.package_name, "Gold");
        assert_eq!(enquiry.message.as_deref(), Some("Interested in exposure"));
        assert!(enquiry.submitted_at >= before);
        assert!(enquiry.submitted_at <= Utc::now());

        // Immediately visible in the fetched set, exactly once
        let all = service.list().await.unwrap();
        let pending: Vec<_> = all
            .iter()
            .filter(|e| e.status == EnquiryStatus::Pending)
            .collect();
        assert_eq!(pending.len(), 1);
    }

    #[tokio::test]
    async fn submit_without_identity_is_an_auth_error() {
        let service = service_with_refs(TransitionPolicy::Permissive).await;
        let err = service.submit(None, request()).await.unwrap_err();
        assert!(matches!(err, AppError::Unauthorized));
    }

    #[tokio::test]
    async fn submit_rejects_package_from_another_event() {
        let service = service_with_refs(TransitionPolicy::Permissive).await;
        let now = Utc::now();
        service
            .store
            .set(
                collections::PACKAGES,
                "p2",
                serde_json::to_value(SponsorshipPackage {
                    id: "p2".to_string(),
                    event_id: "other-event".to_string(),
                    name: "Silver".to_string(),
                    description: None,
                    price: None,
                    benefits: vec![],
                    created_at: now,
                    updated_at: now,
                })
                .unwrap(),
            )
            .await
            .unwrap();

        let mut req = request();
        req.package_id = "p2".to_string();
        let err = service.submit(Some(&sponsor()), req).await.unwrap_err();
        assert!(matches!(err, AppError::BusinessRule(_)));
    }

    #[tokio::test]
    async fn transition_records_response_and_advances_timestamp() {
        let service = service_with_refs(TransitionPolicy::Permissive).await;
        let enquiry = service.submit(Some(&sponsor()), request()).await.unwrap();

        let updated = service
            .transition(
                &enquiry.id,
                EnquiryStatus::Accepted,
                Some("Welcome aboard".to_string()),
            )
            .await
            .unwrap();

        assert_eq!(updated.status, EnquiryStatus::Accepted);
        assert_eq!(updated.organizer_response.as_deref(), Some("Welcome aboard"));
        assert!(updated.response_date.is_some());
        assert!(updated.updated_at > enquiry.updated_at);
    }

    #[tokio::test]
    async fn same_status_reapplication_is_idempotent() {
        let service = service_with_refs(TransitionPolicy::Strict).await;
        let enquiry = service.submit(Some(&sponsor()), request()).await.unwrap();

        let first = service
            .transition(&enquiry.id, EnquiryStatus::Accepted, None)
            .await
            .unwrap();
        let second = service
            .transition(&enquiry.id, EnquiryStatus::Accepted, None)
            .await
            .unwrap();

        assert_eq!(second.status, EnquiryStatus::Accepted);
        assert!(second.updated_at >= first.updated_at);
    }

    #[tokio::test]
    async fn permissive_mode_reopens_rejected_enquiries() {
        let service = service_with_refs(TransitionPolicy::Permissive).await;
        let enquiry = service.submit(Some(&sponsor()), request()).await.unwrap();

        service
            .transition(&enquiry.id, EnquiryStatus::Rejected, None)
            .await
            .unwrap();
        let reopened = service
            .transition(&enquiry.id, EnquiryStatus::Accepted, None)
            .await
            .unwrap();
        assert_eq!(reopened.status, EnquiryStatus::Accepted);
    }

    #[tokio::test]
    async fn strict_mode_locks_settled_enquiries() {
        let service = service_with_refs(TransitionPolicy::Strict).await;
        let enquiry = service.submit(Some(&sponsor()), request()).await.unwrap();

        service
            .transition(&enquiry.id, EnquiryStatus::Rejected, None)
            .await
            .unwrap();
        let err = service
            .transition(&enquiry.id, EnquiryStatus::Accepted, None)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::BusinessRule(_)));
    }

    #[tokio::test]
    async fn pending_is_never_a_transition_target() {
        let service = service_with_refs(TransitionPolicy::Permissive).await;
        let enquiry = service.submit(Some(&sponsor()), request()).await.unwrap();
        let err = service
            .transition(&enquiry.id, EnquiryStatus::Pending, None)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Invalid(_)));
    }

    #[tokio::test]
    async fn bulk_transition_with_one_failure_leaves_the_rest_transitioned() {
        let service = service_with_refs(TransitionPolicy::Permissive).await;
        let a = service.submit(Some(&sponsor()), request()).await.unwrap();
        let b = service.submit(Some(&sponsor()), request()).await.unwrap();

        let ids = vec![a.id.clone(), "missing".to_string(), b.id.clone()];
        let report = service
            .bulk_transition(&ids, EnquiryStatus::UnderReview, None)
            .await
            .unwrap();

        assert_eq!(report.requested, 3);
        assert_eq!(report.succeeded.len(), 2);
        assert_eq!(report.failed.len(), 1);
        assert_eq!(report.failed[0].id, "missing");
        assert!(!report.all_succeeded());

        // The two real enquiries transitioned, nothing rolled back
        assert_eq!(
            service.get(&a.id).await.unwrap().status,
            EnquiryStatus::UnderReview
        );
        assert_eq!(
            service.get(&b.id).await.unwrap().status,
            EnquiryStatus::UnderReview
        );
    }

    #[tokio::test]
    async fn subscribers_see_new_enquiries_without_refresh() {
        let service = service_with_refs(TransitionPolicy::Permissive).await;
        let mut sub = service.store.subscribe(collections::ENQUIRIES);

        let enquiry = service.submit(Some(&sponsor()), request()).await.unwrap();
        let snapshot = sub.recv().await.unwrap();
        assert_eq!(snapshot.documents.len(), 1);
        assert_eq!(snapshot.documents[0]["id"], serde_json::json!(enquiry.id));
        assert_eq!(snapshot.documents[0]["status"], serde_json::json!("pending"));
    }

    #[test]
    fn filters_are_pure_and_composable() {
        let now = Utc::now();
        let make = |id: &str, event: &str, status: EnquiryStatus| SponsorshipEnquiry {
            id: id.to_string(),
            event_id: event.to_string(),
            sponsor_id: "s1".to_string(),
            package_id: "p1".to_string(),
            event_title: "E".to_string(),
            package_name: "P".to_string(),
            company_name: "C".to_string(),
            contact_email: "c@example.com".to_string(),
            contact_number: None,
            message: None,
            status,
            submitted_at: now,
            updated_at: now,
            organizer_response: None,
            response_date: None,
        };
        let set = vec![
            make("1", "e1", EnquiryStatus::Pending),
            make("2", "e1", EnquiryStatus::Accepted),
            make("3", "e2", EnquiryStatus::Pending),
        ];

        assert_eq!(filter_enquiries(&set, Some("e1"), None).len(), 2);
        assert_eq!(
            filter_enquiries(&set, None, Some(EnquiryStatus::Pending)).len(),
            2
        );
        assert_eq!(
            filter_enquiries(&set, Some("e1"), Some(EnquiryStatus::Pending)).len(),
            1
        );
        assert_eq!(filter_enquiries(&set, None, None).len(), 3);
    }
}
