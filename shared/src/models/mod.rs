//! Domain models shared between server and clients.

pub mod career;
pub mod enquiry;
pub mod event;
pub mod role;
pub mod user;

pub use career::{CareerCreate, CareerPosting, CareerUpdate};
pub use enquiry::{EnquiryStatus, SponsorshipEnquiry, UnknownStatus};
pub use event::{Event, SponsorshipPackage};
pub use role::{Permission, Role, UnknownPermission, UnknownRole};
pub use user::{UserProfile, UserUpdate};
