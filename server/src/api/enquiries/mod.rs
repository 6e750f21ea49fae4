//! Sponsorship enquiry routes

mod handler;

use axum::{Router, middleware, routing::get, routing::post, routing::put};

use sponsorhub_shared::models::Permission;

use crate::auth::require_permission;
use crate::core::ServerState;

pub fn router(state: &ServerState) -> Router<ServerState> {
    let submit_routes = Router::new()
        .route("/", post(handler::create))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            require_permission(Permission::SubmitEnquiries),
        ));

    // Listing is gated in the handler: sponsors see their own enquiries,
    // everyone else needs the service-request view capability.
    let read_routes = Router::new()
        .route("/", get(handler::list))
        .route("/{id}", get(handler::get_by_id));

    let respond_routes = Router::new()
        .route("/{id}/status", put(handler::change_status))
        .route("/bulk/status", put(handler::bulk_change_status))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            require_permission(Permission::RespondEnquiries),
        ));

    Router::new().nest(
        "/api/enquiries",
        submit_routes.merge(read_routes).merge(respond_routes),
    )
}
