//! Event and sponsorship package routes (read-only)

mod handler;

use axum::{Router, middleware, routing::get};

use sponsorhub_shared::models::Permission;

use crate::auth::require_permission;
use crate::core::ServerState;

pub fn router(state: &ServerState) -> Router<ServerState> {
    let routes = Router::new()
        .route("/", get(handler::list))
        .route("/{id}", get(handler::get_by_id))
        .route("/{id}/packages", get(handler::list_packages))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            require_permission(Permission::ViewEvents),
        ));

    Router::new().nest("/api/events", routes)
}
