//! Sponsorship enquiry handlers

use axum::{
    Json,
    extract::{Extension, Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use validator::Validate;

use sponsorhub_shared::client::{
    BulkStatusChangeRequest, BulkTransitionReport, EnquiryCreateRequest, StatusChangeRequest,
};
use sponsorhub_shared::models::{EnquiryStatus, Permission, Role, SponsorshipEnquiry};

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::enquiries::filter_enquiries;
use crate::utils::{AppError, AppResponse, AppResult, ok, ok_with_message};

#[derive(Debug, Deserialize)]
pub struct EnquiryListQuery {
    pub event_id: Option<String>,
    pub status: Option<EnquiryStatus>,
}

/// POST /api/enquiries - submit an enquiry as a sponsor
pub async fn create(
    State(state): State<ServerState>,
    Extension(current_user): Extension<CurrentUser>,
    Json(payload): Json<EnquiryCreateRequest>,
) -> AppResult<Json<AppResponse<SponsorshipEnquiry>>> {
    let enquiry = state
        .enquiries()
        .submit(Some(&current_user), payload)
        .await?;
    Ok(ok_with_message(enquiry, "Enquiry submitted"))
}

/// GET /api/enquiries - list enquiries, newest first
///
/// Sponsors are scoped to their own submissions. Every other caller
/// needs the service-request view capability and sees the full set,
/// optionally narrowed by `event_id` and `status`.
pub async fn list(
    State(state): State<ServerState>,
    Extension(current_user): Extension<CurrentUser>,
    Query(query): Query<EnquiryListQuery>,
) -> AppResult<Json<AppResponse<Vec<SponsorshipEnquiry>>>> {
    let all = state.enquiries().list().await?;

    let visible: Vec<SponsorshipEnquiry> = if current_user.role == Role::Sponsor {
        all.into_iter()
            .filter(|e| e.sponsor_id == current_user.id)
            .collect()
    } else {
        if !current_user.has_permission(state.role_table(), Permission::ViewServiceRequests) {
            return Err(AppError::forbidden(format!(
                "Permission denied: {}",
                Permission::ViewServiceRequests
            )));
        }
        all
    };

    let filtered = filter_enquiries(&visible, query.event_id.as_deref(), query.status);
    Ok(ok(filtered))
}

/// GET /api/enquiries/:id
pub async fn get_by_id(
    State(state): State<ServerState>,
    Extension(current_user): Extension<CurrentUser>,
    Path(id): Path<String>,
) -> AppResult<Json<AppResponse<SponsorshipEnquiry>>> {
    let enquiry = state.enquiries().get(&id).await?;

    if current_user.role == Role::Sponsor && enquiry.sponsor_id != current_user.id {
        // Report absence, not existence, to a foreign sponsor
        return Err(AppError::not_found(format!("Enquiry {}", id)));
    }
    if current_user.role != Role::Sponsor
        && !current_user.has_permission(state.role_table(), Permission::ViewServiceRequests)
    {
        return Err(AppError::forbidden(format!(
            "Permission denied: {}",
            Permission::ViewServiceRequests
        )));
    }

    Ok(ok(enquiry))
}

/// PUT /api/enquiries/:id/status - transition one enquiry
pub async fn change_status(
    State(state): State<ServerState>,
    Extension(current_user): Extension<CurrentUser>,
    Path(id): Path<String>,
    Json(payload): Json<StatusChangeRequest>,
) -> AppResult<Json<AppResponse<SponsorshipEnquiry>>> {
    payload.validate()?;

    let updated = state
        .enquiries()
        .transition(&id, payload.status, payload.organizer_response)
        .await?;

    tracing::info!(
        enquiry_id = %id,
        operator_id = %current_user.id,
        status = %updated.status,
        "Enquiry status changed"
    );

    Ok(ok(updated))
}

/// PUT /api/enquiries/bulk/status - transition many enquiries
///
/// Items are independent writes. A partial failure returns 207 with the
/// per-item report; nothing is rolled back.
pub async fn bulk_change_status(
    State(state): State<ServerState>,
    Extension(current_user): Extension<CurrentUser>,
    Json(payload): Json<BulkStatusChangeRequest>,
) -> AppResult<Response> {
    payload.validate()?;

    let report: BulkTransitionReport = state
        .enquiries()
        .bulk_transition(&payload.ids, payload.status, payload.organizer_response)
        .await?;

    tracing::info!(
        operator_id = %current_user.id,
        requested = report.requested,
        failed = report.failed.len(),
        "Bulk enquiry status change"
    );

    if report.all_succeeded() {
        Ok(ok_with_message(report, "All transitions applied").into_response())
    } else {
        let body = Json(AppResponse {
            code: "E0005".to_string(),
            message: "Some transitions failed".to_string(),
            data: Some(report),
        });
        Ok((StatusCode::MULTI_STATUS, body).into_response())
    }
}
