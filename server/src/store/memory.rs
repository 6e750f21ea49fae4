//! In-memory document store engine
//!
//! DashMap-backed, one shard per collection. Every mutation rebuilds the
//! collection snapshot and pushes it to all subscribers over a broadcast
//! channel. Last-write-wins per document; no cross-document coordination.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use chrono::Utc;
use dashmap::DashMap;
use serde_json::Value;
use tokio::sync::broadcast;
use uuid::Uuid;

use sponsorhub_shared::message::CollectionSnapshot;

use super::{Document, DocumentStore, StoreError, StoreResult, Subscription};

/// Broadcast buffer per collection. Subscribers that fall further behind
/// than this skip to the freshest snapshot.
const SNAPSHOT_CHANNEL_CAPACITY: usize = 64;

struct Shard {
    docs: DashMap<String, Document>,
    tx: broadcast::Sender<CollectionSnapshot>,
    version: AtomicU64,
}

impl Shard {
    fn new() -> Self {
        let (tx, _) = broadcast::channel(SNAPSHOT_CHANNEL_CAPACITY);
        Self {
            docs: DashMap::new(),
            tx,
            version: AtomicU64::new(0),
        }
    }

    /// Full current set, newest first. Ties break on id so the order is
    /// deterministic.
    fn sorted_documents(&self) -> Vec<Document> {
        let mut docs: Vec<Document> = self.docs.iter().map(|e| e.value().clone()).collect();
        docs.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| b.id.cmp(&a.id))
        });
        docs
    }

    fn publish(&self, collection: &str) {
        let version = self.version.fetch_add(1, Ordering::SeqCst) + 1;
        let documents = self
            .sorted_documents()
            .into_iter()
            .map(|d| d.data)
            .collect();
        // Nobody listening is fine
        let _ = self.tx.send(CollectionSnapshot {
            collection: collection.to_string(),
            version,
            documents,
        });
    }
}

/// In-process [`DocumentStore`] engine.
#[derive(Clone)]
pub struct MemoryStore {
    shards: Arc<DashMap<String, Arc<Shard>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            shards: Arc::new(DashMap::new()),
        }
    }

    fn shard(&self, collection: &str) -> Arc<Shard> {
        self.shards
            .entry(collection.to_string())
            .or_insert_with(|| Arc::new(Shard::new()))
            .clone()
    }

    /// Stamp server-maintained fields into the body so decoded models
    /// carry them.
    fn stamp(data: &mut Value, doc: &Document) {
        if let Value::Object(map) = data {
            map.insert("id".to_string(), Value::String(doc.id.clone()));
            map.insert(
                "created_at".to_string(),
                serde_json::to_value(doc.created_at).unwrap_or(Value::Null),
            );
            map.insert(
                "updated_at".to_string(),
                serde_json::to_value(doc.updated_at).unwrap_or(Value::Null),
            );
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn create(&self, collection: &str, mut data: Value) -> StoreResult<Document> {
        let shard = self.shard(collection);
        let now = Utc::now();
        let mut doc = Document {
            id: Uuid::new_v4().to_string(),
            created_at: now,
            updated_at: now,
            data: Value::Null,
        };
        Self::stamp(&mut data, &doc);
        doc.data = data;
        shard.docs.insert(doc.id.clone(), doc.clone());
        shard.publish(collection);
        Ok(doc)
    }

    async fn set(&self, collection: &str, id: &str, mut data: Value) -> StoreResult<Document> {
        let shard = self.shard(collection);
        let now = Utc::now();
        // Overwrites keep the original creation time
        let created_at = shard
            .docs
            .get(id)
            .map(|existing| existing.created_at)
            .unwrap_or(now);
        let mut doc = Document {
            id: id.to_string(),
            created_at,
            updated_at: now,
            data: Value::Null,
        };
        Self::stamp(&mut data, &doc);
        doc.data = data;
        shard.docs.insert(doc.id.clone(), doc.clone());
        shard.publish(collection);
        Ok(doc)
    }

    async fn get(&self, collection: &str, id: &str) -> StoreResult<Option<Document>> {
        let shard = self.shard(collection);
        Ok(shard.docs.get(id).map(|d| d.clone()))
    }

    async fn update(&self, collection: &str, id: &str, partial: Value) -> StoreResult<Document> {
        let shard = self.shard(collection);
        let updated = {
            let mut entry = shard.docs.get_mut(id).ok_or_else(|| {
                StoreError::NotFound(format!("{collection}/{id}"))
            })?;
            let doc = entry.value_mut();
            doc.updated_at = Utc::now();
            match (&mut doc.data, partial) {
                (Value::Object(existing), Value::Object(incoming)) => {
                    for (k, v) in incoming {
                        existing.insert(k, v);
                    }
                }
                (slot, other) => *slot = other,
            }
            let updated_at = doc.updated_at;
            if let Value::Object(map) = &mut doc.data {
                map.insert(
                    "updated_at".to_string(),
                    serde_json::to_value(updated_at).unwrap_or(Value::Null),
                );
            }
            doc.clone()
        };
        shard.publish(collection);
        Ok(updated)
    }

    async fn delete(&self, collection: &str, id: &str) -> StoreResult<bool> {
        let shard = self.shard(collection);
        let removed = shard.docs.remove(id).is_some();
        if removed {
            shard.publish(collection);
        }
        Ok(removed)
    }

    async fn list(&self, collection: &str) -> StoreResult<Vec<Document>> {
        let shard = self.shard(collection);
        Ok(shard.sorted_documents())
    }

    fn subscribe(&self, collection: &str) -> Subscription {
        let shard = self.shard(collection);
        Subscription::new(shard.tx.subscribe())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn create_assigns_id_and_stamps_body() {
        let store = MemoryStore::new();
        let doc = store
            .create("things", json!({"name": "widget"}))
            .await
            .unwrap();

        assert!(!doc.id.is_empty());
        assert_eq!(doc.data["id"], json!(doc.id));
        assert_eq!(doc.data["name"], json!("widget"));
        assert!(doc.data.get("created_at").is_some());

        let fetched = store.get("things", &doc.id).await.unwrap().unwrap();
        assert_eq!(fetched.data, doc.data);
    }

    #[tokio::test]
    async fn set_preserves_creation_time_on_overwrite() {
        let store = MemoryStore::new();
        let first = store.set("things", "t1", json!({"a": 1})).await.unwrap();
        let second = store.set("things", "t1", json!({"b": 2})).await.unwrap();

        assert_eq!(second.created_at, first.created_at);
        // Full overwrite: old fields are gone
        assert!(second.data.get("a").is_none());
        assert_eq!(second.data["b"], json!(2));
    }

    #[tokio::test]
    async fn update_merges_top_level_fields() {
        let store = MemoryStore::new();
        let doc = store
            .create("things", json!({"a": 1, "b": 1}))
            .await
            .unwrap();
        let updated = store
            .update("things", &doc.id, json!({"b": 2}))
            .await
            .unwrap();

        assert_eq!(updated.data["a"], json!(1));
        assert_eq!(updated.data["b"], json!(2));
        assert!(updated.updated_at >= doc.updated_at);
    }

    #[tokio::test]
    async fn update_missing_document_is_an_error() {
        let store = MemoryStore::new();
        let err = store
            .update("things", "nope", json!({"a": 1}))
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::NotFound(_)));
    }

    #[tokio::test]
    async fn subscription_delivers_full_sorted_set_on_every_change() {
        let store = MemoryStore::new();
        let mut sub = store.subscribe("things");

        store.create("things", json!({"n": 1})).await.unwrap();
        let snap = sub.recv().await.unwrap();
        assert_eq!(snap.documents.len(), 1);

        store.create("things", json!({"n": 2})).await.unwrap();
        let snap = sub.recv().await.unwrap();
        // Full set, not a delta; newest first
        assert_eq!(snap.documents.len(), 2);
        assert_eq!(snap.documents[0]["n"], json!(2));
        assert!(snap.version > 1);
    }

    #[tokio::test]
    async fn delete_removes_and_notifies() {
        let store = MemoryStore::new();
        let doc = store.create("things", json!({"n": 1})).await.unwrap();
        let mut sub = store.subscribe("things");

        assert!(store.delete("things", &doc.id).await.unwrap());
        let snap = sub.recv().await.unwrap();
        assert!(snap.documents.is_empty());

        // Second delete is a no-op, not an error
        assert!(!store.delete("things", &doc.id).await.unwrap());
    }
}
