//! User administration routes

mod handler;

use axum::{Router, middleware, routing::get, routing::put};

use sponsorhub_shared::models::Permission;

use crate::auth::require_permission;
use crate::core::ServerState;

pub fn router(state: &ServerState) -> Router<ServerState> {
    let read_routes = Router::new()
        .route("/", get(handler::list))
        .route("/{id}", get(handler::get_by_id))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            require_permission(Permission::ViewUsers),
        ));

    let write_routes = Router::new()
        .route("/{id}", put(handler::update))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            require_permission(Permission::ManageUsers),
        ));

    Router::new().nest("/api/users", read_routes.merge(write_routes))
}
