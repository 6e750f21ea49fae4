//! Document Store
//!
//! The platform persists everything in a hosted document database reached
//! through a deliberately narrow surface: create / set / get / update /
//! delete by collection name and document id, plus a live subscription
//! per collection. [`DocumentStore`] is that surface. [`MemoryStore`] is
//! the in-process engine used by the server and the test suite; a hosted
//! backend adapter implements the same trait without touching any caller.
//!
//! Consistency is what a hosted document store gives natively: last-write-
//! wins per document, no transactions across documents or collections, no
//! optimistic-concurrency check on update.

pub mod memory;

pub use memory::MemoryStore;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use tokio::sync::broadcast;

use sponsorhub_shared::message::CollectionSnapshot;

/// Collection names used by the platform.
pub mod collections {
    pub const USERS: &str = "users";
    pub const ENQUIRIES: &str = "enquiries";
    pub const EVENTS: &str = "events";
    pub const PACKAGES: &str = "packages";
    pub const CAREERS: &str = "careers";
}

/// Store error types
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("document not found: {0}")]
    NotFound(String),

    #[error("serialization error: {0}")]
    Serialization(String),

    #[error("subscription closed")]
    Closed,
}

impl From<serde_json::Error> for StoreError {
    fn from(e: serde_json::Error) -> Self {
        StoreError::Serialization(e.to_string())
    }
}

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// A stored document: a JSON body plus server-maintained metadata.
///
/// The store stamps `id`, `created_at` and `updated_at` into the body as
/// well, so a decoded model always carries them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    pub id: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub data: Value,
}

impl Document {
    /// Decode the body into a typed model.
    pub fn decode<T: DeserializeOwned>(&self) -> StoreResult<T> {
        Ok(serde_json::from_value(self.data.clone())?)
    }
}

/// Live feed of one collection.
///
/// Every change to the collection delivers the **full current set**,
/// sorted by creation time descending; consumers must not assume
/// incremental updates. Dropping the handle unsubscribes.
pub struct Subscription {
    rx: broadcast::Receiver<CollectionSnapshot>,
}

impl Subscription {
    pub(crate) fn new(rx: broadcast::Receiver<CollectionSnapshot>) -> Self {
        Self { rx }
    }

    /// Wait for the next snapshot. A lagged receiver skips straight to
    /// the freshest snapshot instead of erroring: intermediate snapshots
    /// are obsolete by definition.
    pub async fn recv(&mut self) -> StoreResult<CollectionSnapshot> {
        loop {
            match self.rx.recv().await {
                Ok(snapshot) => return Ok(snapshot),
                Err(broadcast::error::RecvError::Lagged(_)) => continue,
                Err(broadcast::error::RecvError::Closed) => return Err(StoreError::Closed),
            }
        }
    }
}

/// The narrow persistence surface the platform is written against.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Insert a new document with a store-assigned id. Server timestamps
    /// are stamped into the body.
    async fn create(&self, collection: &str, data: Value) -> StoreResult<Document>;

    /// Upsert: full overwrite of the body plus server timestamps. The
    /// original creation time survives an overwrite.
    async fn set(&self, collection: &str, id: &str, data: Value) -> StoreResult<Document>;

    /// Fetch one document, `None` if absent.
    async fn get(&self, collection: &str, id: &str) -> StoreResult<Option<Document>>;

    /// Partial merge of top-level fields plus an updated-at stamp.
    /// Fails with [`StoreError::NotFound`] for a missing document.
    async fn update(&self, collection: &str, id: &str, partial: Value) -> StoreResult<Document>;

    /// Remove a document. Returns whether anything was removed.
    async fn delete(&self, collection: &str, id: &str) -> StoreResult<bool>;

    /// All documents of a collection, sorted by creation time descending.
    async fn list(&self, collection: &str) -> StoreResult<Vec<Document>>;

    /// Register for live snapshots of a collection. Non-blocking; the
    /// returned handle is the only cancellation primitive.
    fn subscribe(&self, collection: &str) -> Subscription;
}
