//! API routing
//!
//! # Structure
//!
//! - [`health`] - liveness probe
//! - [`auth`] - signup, login, session introspection
//! - [`users`] - account administration
//! - [`enquiries`] - sponsorship enquiry workflow
//! - [`events`] - events and sponsorship packages (read-only)
//! - [`careers`] - career postings
//! - [`assets`] - administrative file uploads
//! - [`sync`] - server-sent change notification stream
//!
//! Entity routers take the server state so permission gates can be
//! attached with `from_fn_with_state` at build time. The JWT
//! authentication middleware wraps the whole router and skips the
//! public routes itself.

pub mod assets;
pub mod auth;
pub mod careers;
pub mod enquiries;
pub mod events;
pub mod health;
pub mod sync;
pub mod users;

use axum::Router;
use axum::middleware as axum_middleware;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::auth::require_auth;
use crate::core::ServerState;

// Re-export common types for handlers
pub use crate::utils::{AppResponse, AppResult};

/// Build a router with all routes registered (no middleware).
pub fn build_router(state: &ServerState) -> Router<ServerState> {
    Router::new()
        .merge(health::router())
        .merge(auth::router())
        .merge(users::router(state))
        .merge(enquiries::router(state))
        .merge(events::router(state))
        .merge(careers::router(state))
        .merge(assets::router())
        .merge(sync::router())
}

/// Build the fully configured application: routes, auth middleware and
/// tower-http layers, bound to the given state.
pub fn create_router(state: ServerState) -> Router {
    build_router(&state)
        .layer(axum_middleware::from_fn_with_state(
            state.clone(),
            require_auth,
        ))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
