//! CurrentUser extractor
//!
//! Lets protected handlers take `CurrentUser` as an argument. Behind
//! [`require_auth`](super::middleware::require_auth) this is a plain
//! extension lookup; routes mounted without that layer fall back to
//! validating the bearer token themselves.

use axum::{extract::FromRequestParts, http::request::Parts};

use crate::auth::CurrentUser;
use crate::auth::middleware::authenticate;
use crate::core::ServerState;
use crate::utils::AppError;

impl FromRequestParts<ServerState> for CurrentUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &ServerState,
    ) -> Result<Self, Self::Rejection> {
        if let Some(user) = parts.extensions.get::<CurrentUser>() {
            return Ok(user.clone());
        }

        let auth_header = parts
            .headers
            .get(http::header::AUTHORIZATION)
            .and_then(|h| h.to_str().ok());

        let user = authenticate(&state.get_jwt_service(), auth_header, &parts.uri)?;

        // Cache for any later extraction in the same request
        parts.extensions.insert(user.clone());

        Ok(user)
    }
}
