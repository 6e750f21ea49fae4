//! Server services

pub mod sync;

pub use sync::{ResourceVersions, SyncBus};
