//! Sponsorship Enquiry Model
//!
//! An enquiry is created once by a sponsor and from then on only its
//! status and organizer-response fields change. Enquiries are historical
//! records: accepted and rejected ones persist, nothing deletes them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Workflow status of a sponsorship enquiry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EnquiryStatus {
    Pending,
    Accepted,
    Rejected,
    UnderReview,
}

impl EnquiryStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            EnquiryStatus::Pending => "pending",
            EnquiryStatus::Accepted => "accepted",
            EnquiryStatus::Rejected => "rejected",
            EnquiryStatus::UnderReview => "under_review",
        }
    }

    /// Statuses a transition may target. `Pending` is reserved for
    /// freshly submitted enquiries and is never a transition target.
    pub fn is_transition_target(&self) -> bool {
        !matches!(self, EnquiryStatus::Pending)
    }
}

impl fmt::Display for EnquiryStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown enquiry status: {0}")]
pub struct UnknownStatus(pub String);

impl FromStr for EnquiryStatus {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "pending" => Ok(EnquiryStatus::Pending),
            "accepted" => Ok(EnquiryStatus::Accepted),
            "rejected" => Ok(EnquiryStatus::Rejected),
            "under_review" => Ok(EnquiryStatus::UnderReview),
            _ => Err(UnknownStatus(s.to_string())),
        }
    }
}

/// A sponsor's expression of interest in an event's sponsorship package.
///
/// Display fields (`event_title`, `package_name`, `company_name`) are
/// denormalized at submission time so list views need no joins.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SponsorshipEnquiry {
    pub id: String,
    pub event_id: String,
    pub sponsor_id: String,
    pub package_id: String,
    pub event_title: String,
    pub package_name: String,
    pub company_name: String,
    pub contact_email: String,
    #[serde(default)]
    pub contact_number: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    pub status: EnquiryStatus,
    pub submitted_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default)]
    pub organizer_response: Option<String>,
    #[serde(default)]
    pub response_date: Option<DateTime<Utc>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_parses_wire_names() {
        assert_eq!(
            "under_review".parse::<EnquiryStatus>().unwrap(),
            EnquiryStatus::UnderReview
        );
        assert!("approved".parse::<EnquiryStatus>().is_err());
    }

    #[test]
    fn pending_is_not_a_transition_target() {
        assert!(!EnquiryStatus::Pending.is_transition_target());
        assert!(EnquiryStatus::Accepted.is_transition_target());
        assert!(EnquiryStatus::Rejected.is_transition_target());
        assert!(EnquiryStatus::UnderReview.is_transition_target());
    }
}
