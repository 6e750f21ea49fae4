//! Authentication routes
//!
//! - /api/auth/signup, /api/auth/login: public
//! - /api/auth/me, /api/auth/logout: require authentication (handled by
//!   the router-level middleware)

mod handler;

use axum::{Router, routing::get, routing::post};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/api/auth/signup", post(handler::signup))
        .route("/api/auth/login", post(handler::login))
        .route("/api/auth/me", get(handler::me))
        .route("/api/auth/logout", post(handler::logout))
}
