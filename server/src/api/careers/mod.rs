//! Career posting routes

mod handler;

use axum::{Router, middleware, routing::get, routing::post, routing::put};

use sponsorhub_shared::models::Permission;

use crate::auth::require_permission;
use crate::core::ServerState;

pub fn router(state: &ServerState) -> Router<ServerState> {
    // Reading is open to any authenticated account
    let read_routes = Router::new()
        .route("/", get(handler::list))
        .route("/{id}", get(handler::get_by_id));

    let write_routes = Router::new()
        .route("/", post(handler::create))
        .route("/{id}", put(handler::update))
        .route("/{id}", axum::routing::delete(handler::delete))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            require_permission(Permission::ManageCareers),
        ));

    Router::new().nest("/api/careers", read_routes.merge(write_routes))
}
