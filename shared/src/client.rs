//! API request/response DTOs
//!
//! Shared so server handlers and API clients agree on the wire shapes.
//! Request DTOs carry their validation rules; the server runs them before
//! touching the store.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::{EnquiryStatus, Permission, Role};
use crate::validation;

/// Sign-up payload. `user_type` is restricted server-side to the
/// self-assignable roles (organizer, sponsor).
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SignupRequest {
    #[validate(email, length(max = 254))]
    pub email: String,
    #[validate(length(min = 8, max = 128))]
    pub password: String,
    #[validate(length(min = 1, max = 200))]
    pub first_name: String,
    #[validate(length(min = 1, max = 200))]
    pub last_name: String,
    #[validate(length(max = 200))]
    pub company: Option<String>,
    #[validate(custom(function = validation::validate_phone))]
    pub contact_number: Option<String>,
    pub user_type: Role,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Public view of an account. Never carries the password hash.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserInfo {
    pub id: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub company: Option<String>,
    pub contact_number: Option<String>,
    pub user_type: Role,
    pub permissions: Vec<Permission>,
    pub is_active: bool,
    pub is_verified: bool,
    pub created_at: DateTime<Utc>,
}

impl From<crate::models::UserProfile> for UserInfo {
    fn from(profile: crate::models::UserProfile) -> Self {
        Self {
            id: profile.id,
            email: profile.email,
            first_name: profile.first_name,
            last_name: profile.last_name,
            company: profile.company,
            contact_number: profile.contact_number,
            user_type: profile.user_type,
            permissions: profile.permissions,
            is_active: profile.is_active,
            is_verified: profile.is_verified,
            created_at: profile.created_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: UserInfo,
}

/// Sponsor-side enquiry submission.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct EnquiryCreateRequest {
    #[validate(length(min = 1))]
    pub event_id: String,
    #[validate(length(min = 1))]
    pub package_id: String,
    #[validate(length(min = 1, max = 200))]
    pub company_name: String,
    #[validate(email, length(max = 254))]
    pub contact_email: String,
    #[validate(custom(function = validation::validate_phone))]
    pub contact_number: Option<String>,
    #[validate(length(max = 2000))]
    pub message: Option<String>,
}

/// Organizer-side status transition.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct StatusChangeRequest {
    pub status: EnquiryStatus,
    #[validate(length(max = 2000))]
    pub organizer_response: Option<String>,
}

/// Same transition applied to many enquiries at once. Items are
/// independent writes; there is no atomicity across them.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct BulkStatusChangeRequest {
    #[validate(length(min = 1))]
    pub ids: Vec<String>,
    pub status: EnquiryStatus,
    #[validate(length(max = 2000))]
    pub organizer_response: Option<String>,
}

/// One failed item of a bulk transition.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BulkFailure {
    pub id: String,
    pub error: String,
}

/// Outcome of a bulk transition: which items landed, which did not.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BulkTransitionReport {
    pub requested: usize,
    pub succeeded: Vec<String>,
    pub failed: Vec<BulkFailure>,
}

impl BulkTransitionReport {
    pub fn all_succeeded(&self) -> bool {
        self.failed.is_empty()
    }
}
