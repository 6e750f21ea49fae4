//! Server State
//!
//! One shared handle holding every long-lived service: the document
//! store, JWT service, role table, sync bus and enquiry workflow. The
//! handle is cheap to clone and is the axum state for every route.

use std::sync::Arc;

use crate::auth::{JwtService, RoleTable};
use crate::core::Config;
use crate::enquiries::{EnquiryService, TransitionPolicy};
use crate::services::SyncBus;
use crate::store::{DocumentStore, MemoryStore};

#[derive(Clone)]
pub struct ServerState {
    pub config: Arc<Config>,
    store: Arc<dyn DocumentStore>,
    jwt_service: Arc<JwtService>,
    role_table: Arc<RoleTable>,
    sync: SyncBus,
    enquiries: EnquiryService,
}

impl ServerState {
    /// Build the full service graph from configuration, backed by the
    /// in-process store.
    pub async fn initialize(config: &Config) -> Self {
        Self::with_store(config, Arc::new(MemoryStore::new()))
    }

    /// Build the service graph over a caller-supplied store backend.
    pub fn with_store(config: &Config, store: Arc<dyn DocumentStore>) -> Self {
        let policy = if config.strict_transitions {
            TransitionPolicy::Strict
        } else {
            TransitionPolicy::Permissive
        };
        let sync = SyncBus::new();
        let enquiries = EnquiryService::new(store.clone(), sync.clone(), policy);

        Self {
            config: Arc::new(config.clone()),
            store,
            jwt_service: Arc::new(JwtService::with_config(config.jwt.clone())),
            role_table: Arc::new(RoleTable::platform_default()),
            sync,
            enquiries,
        }
    }

    pub fn get_jwt_service(&self) -> Arc<JwtService> {
        self.jwt_service.clone()
    }

    pub fn role_table(&self) -> &RoleTable {
        &self.role_table
    }

    pub fn store(&self) -> &Arc<dyn DocumentStore> {
        &self.store
    }

    pub fn sync(&self) -> &SyncBus {
        &self.sync
    }

    pub fn enquiries(&self) -> &EnquiryService {
        &self.enquiries
    }

    /// Directory where uploaded assets land.
    pub fn upload_dir(&self) -> std::path::PathBuf {
        std::path::Path::new(&self.config.work_dir).join("uploads")
    }
}
