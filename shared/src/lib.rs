//! Shared types for the SponsorHub marketplace
//!
//! Common types used by the server and by API clients: domain models,
//! request/response DTOs, sync-bus payloads, and the validation rules
//! that are enforced on every write path regardless of where the write
//! originates.

pub mod client;
pub mod message;
pub mod models;
pub mod validation;

// Re-exports
pub use serde::{Deserialize, Serialize};

pub use message::{CollectionSnapshot, SyncAction, SyncPayload};
pub use models::{
    CareerPosting, EnquiryStatus, Event, Permission, Role, SponsorshipEnquiry, SponsorshipPackage,
    UserProfile,
};
