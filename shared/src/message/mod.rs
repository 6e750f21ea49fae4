//! Sync-bus message types
//!
//! Shared between the server and subscribed clients. Two shapes travel on
//! the bus:
//!
//! - [`SyncPayload`]: a per-document change notification (resource,
//!   action, id, payload), versioned per resource so clients can discard
//!   stale messages.
//! - [`CollectionSnapshot`]: the full current set of a collection,
//!   sorted newest-first. Subscribers always receive whole snapshots,
//!   never incremental diffs.

use serde::{Deserialize, Serialize};
use std::fmt;

/// What happened to a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SyncAction {
    Created,
    Updated,
    Deleted,
}

impl fmt::Display for SyncAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SyncAction::Created => write!(f, "created"),
            SyncAction::Updated => write!(f, "updated"),
            SyncAction::Deleted => write!(f, "deleted"),
        }
    }
}

/// Per-document change notification broadcast to all connected clients.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SyncPayload {
    /// Resource type, e.g. "enquiries", "users".
    pub resource: String,
    /// Monotonic version per resource; clients drop anything older than
    /// the last version they applied.
    pub version: u64,
    pub action: SyncAction,
    pub id: String,
    /// Document body; `None` for deletions.
    pub data: Option<serde_json::Value>,
}

/// Full current state of one collection, delivered on every change.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CollectionSnapshot {
    pub collection: String,
    pub version: u64,
    /// Documents sorted by creation time, newest first.
    pub documents: Vec<serde_json::Value>,
}
