//! SponsorHub Server - event sponsorship marketplace backend
//!
//! # Structure
//!
//! ```text
//! server/src/
//! ├── core/       # configuration, state, startup
//! ├── auth/       # JWT, password hashing, role/permission gates
//! ├── store/      # document store surface + in-process engine
//! ├── enquiries/  # sponsorship enquiry workflow
//! ├── services/   # collection sync bus
//! ├── api/        # HTTP routes and handlers
//! └── utils/      # errors, logging, validation
//! ```

pub mod api;
pub mod auth;
pub mod core;
pub mod enquiries;
pub mod seed;
pub mod services;
pub mod store;
pub mod utils;

pub use auth::{CurrentUser, JwtService};
pub use core::{Config, Server, ServerState};
pub use enquiries::{EnquiryService, TransitionPolicy};
pub use store::{DocumentStore, MemoryStore};
pub use utils::{AppError, AppResponse, AppResult};

pub use utils::logger::init_logger;

// Security logging macro - routes to the "security" tracing target
#[macro_export]
macro_rules! security_log {
    ($level:expr, $event:expr, $($key:ident = $value:expr),*) => {
        tracing::info!(
            target: "security",
            level = $level,
            event = $event,
            $($key = $value),*
        );
    };
}

/// Load `.env`, read configuration and initialize logging. Called once
/// at startup.
pub fn setup_environment() -> anyhow::Result<Config> {
    dotenv::dotenv().ok();

    let config = Config::from_env();
    init_logger(&config);

    Ok(config)
}
