//! Asset upload routes
//!
//! Uploaded files (event brochures, sponsor logos, site content) land in
//! the working directory. Writes are restricted to the administrative
//! roles; serving is public so stored URLs work in any client.

mod handler;

use axum::{Router, body::Bytes, extract::{Path, State}, middleware, response::IntoResponse, routing::post};
use http::header;

use sponsorhub_shared::models::Role;

use crate::auth::require_role;
use crate::core::ServerState;

const ADMIN_ROLES: &[Role] = &[Role::Admin, Role::SuperAdmin];

enum ServeFileResponse {
    Ok(Bytes),
    NotFound,
    BadRequest(&'static str),
}

impl IntoResponse for ServeFileResponse {
    fn into_response(self) -> axum::response::Response {
        match self {
            ServeFileResponse::Ok(content) => (
                http::StatusCode::OK,
                [(header::CONTENT_TYPE, "application/octet-stream")],
                content,
            )
                .into_response(),
            ServeFileResponse::NotFound => {
                (http::StatusCode::NOT_FOUND, "File not found").into_response()
            }
            ServeFileResponse::BadRequest(msg) => {
                (http::StatusCode::BAD_REQUEST, msg).into_response()
            }
        }
    }
}

async fn serve_asset(
    State(state): State<ServerState>,
    Path(filename): Path<String>,
) -> ServeFileResponse {
    // Prevent path traversal
    if filename.is_empty()
        || filename.contains("..")
        || filename.contains('/')
        || filename.contains('\\')
    {
        return ServeFileResponse::BadRequest("Invalid filename");
    }

    let file_path = state.upload_dir().join(&filename);
    match tokio::fs::read(&file_path).await {
        Ok(content) => ServeFileResponse::Ok(content.into()),
        Err(_) => ServeFileResponse::NotFound,
    }
}

pub fn router() -> Router<ServerState> {
    let admin_routes = Router::new()
        .route("/api/assets/upload", post(handler::upload))
        .route(
            "/api/assets/{filename}",
            axum::routing::delete(handler::delete),
        )
        .layer(middleware::from_fn(require_role(ADMIN_ROLES)));

    Router::new()
        .merge(admin_routes)
        // Serving stored assets is public
        .route(
            "/api/assets/files/{filename}",
            axum::routing::get(serve_asset),
        )
}
