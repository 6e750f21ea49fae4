//! Sync bus service
//!
//! Broadcasts per-document change notifications to connected clients.
//! Each resource type carries its own monotonically increasing version
//! number so receivers can tell stale messages from fresh ones.

use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::broadcast;

use sponsorhub_shared::message::{SyncAction, SyncPayload};

/// Resource version manager.
///
/// Lock-free per-resource counters backed by DashMap. Used when
/// broadcasting sync messages so clients can order them.
#[derive(Debug)]
pub struct ResourceVersions {
    versions: DashMap<String, u64>,
}

impl ResourceVersions {
    pub fn new() -> Self {
        Self {
            versions: DashMap::new(),
        }
    }

    /// Increment the version of a resource and return the new value.
    /// Unknown resources start from 0, so the first call returns 1.
    pub fn increment(&self, resource: &str) -> u64 {
        let mut entry = self.versions.entry(resource.to_string()).or_insert(0);
        *entry += 1;
        *entry
    }

    /// Current version of a resource, 0 if never bumped.
    pub fn get(&self, resource: &str) -> u64 {
        self.versions.get(resource).map(|v| *v).unwrap_or(0)
    }
}

impl Default for ResourceVersions {
    fn default() -> Self {
        Self::new()
    }
}

const SYNC_CHANNEL_CAPACITY: usize = 1024;

/// Sync bus: one broadcast channel for all resource change events.
#[derive(Debug, Clone)]
pub struct SyncBus {
    tx: broadcast::Sender<SyncPayload>,
    versions: Arc<ResourceVersions>,
}

impl SyncBus {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(SYNC_CHANNEL_CAPACITY);
        Self {
            tx,
            versions: Arc::new(ResourceVersions::new()),
        }
    }

    /// Broadcast a resource change to all connected clients. The version
    /// number is assigned here.
    pub fn publish<T: serde::Serialize>(
        &self,
        resource: &str,
        action: SyncAction,
        id: &str,
        data: Option<&T>,
    ) {
        let payload = SyncPayload {
            resource: resource.to_string(),
            version: self.versions.increment(resource),
            action,
            id: id.to_string(),
            data: data.and_then(|d| serde_json::to_value(d).ok()),
        };
        // No subscribers is not an error
        let _ = self.tx.send(payload);
    }

    /// Register a new receiver for change events.
    pub fn subscribe(&self) -> broadcast::Receiver<SyncPayload> {
        self.tx.subscribe()
    }

    pub fn versions(&self) -> &ResourceVersions {
        &self.versions
    }
}

impl Default for SyncBus {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn versions_increment_per_resource() {
        let versions = ResourceVersions::new();
        assert_eq!(versions.get("enquiries"), 0);
        assert_eq!(versions.increment("enquiries"), 1);
        assert_eq!(versions.increment("enquiries"), 2);
        assert_eq!(versions.increment("users"), 1);
        assert_eq!(versions.get("enquiries"), 2);
    }

    #[tokio::test]
    async fn publish_reaches_subscribers_with_versions() {
        let bus = SyncBus::new();
        let mut rx = bus.subscribe();

        bus.publish("enquiries", SyncAction::Created, "e1", Some(&json!({"x": 1})));
        bus.publish::<serde_json::Value>("enquiries", SyncAction::Deleted, "e1", None);

        let first = rx.recv().await.unwrap();
        assert_eq!(first.version, 1);
        assert_eq!(first.action, SyncAction::Created);
        assert!(first.data.is_some());

        let second = rx.recv().await.unwrap();
        assert_eq!(second.version, 2);
        assert_eq!(second.action, SyncAction::Deleted);
        assert!(second.data.is_none());
    }
}
