//! Authentication handlers
//!
//! Signup, login, logout and session introspection.

use std::time::Duration;

use axum::{Extension, Json, extract::State};
use chrono::Utc;
use uuid::Uuid;
use validator::Validate;

use sponsorhub_shared::client::{LoginRequest, LoginResponse, SignupRequest, UserInfo};
use sponsorhub_shared::message::SyncAction;
use sponsorhub_shared::models::UserProfile;

use crate::auth::{CurrentUser, hash_password, verify_password};
use crate::core::ServerState;
use crate::security_log;
use crate::store::collections;
use crate::utils::{AppError, AppResponse, AppResult, ok, ok_with_message};

/// Fixed delay for authentication to prevent timing attacks
const AUTH_FIXED_DELAY_MS: u64 = 500;

/// POST /api/auth/signup - register an account
///
/// Only the self-assignable roles (organizer, sponsor) are accepted;
/// administrative tiers are provisioned by an admin through the user
/// management API.
pub async fn signup(
    State(state): State<ServerState>,
    Json(req): Json<SignupRequest>,
) -> AppResult<Json<AppResponse<LoginResponse>>> {
    req.validate()?;

    if !req.user_type.self_assignable() {
        return Err(AppError::validation(format!(
            "Role {} cannot be self-assigned",
            req.user_type
        )));
    }

    let email = req.email.trim().to_lowercase();
    if find_by_email(&state, &email).await?.is_some() {
        return Err(AppError::conflict(format!(
            "An account with email {} already exists",
            email
        )));
    }

    let password_hash = hash_password(&req.password)
        .map_err(|e| AppError::internal(format!("Password hashing failed: {}", e)))?;

    let now = Utc::now();
    let profile = UserProfile {
        id: Uuid::new_v4().to_string(),
        email,
        first_name: req.first_name,
        last_name: req.last_name,
        company: req.company,
        contact_number: req.contact_number,
        user_type: req.user_type,
        permissions: vec![],
        password_hash: Some(password_hash),
        is_active: true,
        is_verified: false,
        created_at: now,
        updated_at: now,
    };

    let doc = state
        .store()
        .set(
            collections::USERS,
            &profile.id,
            serde_json::to_value(&profile)
                .map_err(|e| AppError::internal(e.to_string()))?,
        )
        .await?;
    let stored: UserProfile = doc.decode()?;

    let info = UserInfo::from(stored.clone());
    state
        .sync()
        .publish(collections::USERS, SyncAction::Created, &stored.id, Some(&info));

    let token = state
        .get_jwt_service()
        .generate_token(&stored.id, &stored.email, stored.user_type, &stored.permissions)
        .map_err(|e| AppError::internal(format!("Failed to generate token: {}", e)))?;

    tracing::info!(
        user_id = %stored.id,
        email = %stored.email,
        role = %stored.user_type,
        "Account created"
    );

    Ok(ok_with_message(
        LoginResponse { token, user: info },
        "Account created",
    ))
}

/// POST /api/auth/login - authenticate and issue a token
pub async fn login(
    State(state): State<ServerState>,
    Json(req): Json<LoginRequest>,
) -> AppResult<Json<AppResponse<LoginResponse>>> {
    let email = req.email.trim().to_lowercase();
    let profile = find_by_email(&state, &email).await?;

    // Fixed delay to prevent timing attacks (before checking result)
    tokio::time::sleep(Duration::from_millis(AUTH_FIXED_DELAY_MS)).await;

    // Unified error message to prevent account enumeration
    let profile = match profile {
        Some(p) => p,
        None => {
            security_log!("WARN", "login_failed", email = email.clone());
            return Err(AppError::invalid_credentials());
        }
    };

    if !profile.is_active {
        return Err(AppError::forbidden("Account has been disabled"));
    }

    let hash = profile
        .password_hash
        .as_deref()
        .ok_or_else(|| AppError::internal("Account has no password hash"))?;
    let password_valid = verify_password(&req.password, hash)
        .map_err(|e| AppError::internal(format!("Password verification failed: {}", e)))?;

    if !password_valid {
        security_log!("WARN", "login_failed", email = email.clone());
        return Err(AppError::invalid_credentials());
    }

    let token = state
        .get_jwt_service()
        .generate_token(
            &profile.id,
            &profile.email,
            profile.user_type,
            &profile.permissions,
        )
        .map_err(|e| AppError::internal(format!("Failed to generate token: {}", e)))?;

    tracing::info!(
        user_id = %profile.id,
        email = %profile.email,
        role = %profile.user_type,
        "User logged in"
    );

    Ok(ok(LoginResponse {
        token,
        user: UserInfo::from(profile),
    }))
}

/// GET /api/auth/me - current account profile
///
/// Takes [`CurrentUser`] through the extractor, so the route also works
/// when called outside the middleware stack.
pub async fn me(
    State(state): State<ServerState>,
    current_user: CurrentUser,
) -> AppResult<Json<AppResponse<UserInfo>>> {
    let profile: UserProfile = state
        .store()
        .get(collections::USERS, &current_user.id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("User {}", current_user.id)))?
        .decode()?;

    Ok(ok(UserInfo::from(profile)))
}

/// POST /api/auth/logout
///
/// Tokens are stateless; logout is a client-side discard. The endpoint
/// exists so clients have a uniform call and the event is logged.
pub async fn logout(
    Extension(current_user): Extension<CurrentUser>,
) -> AppResult<Json<AppResponse<()>>> {
    tracing::info!(user_id = %current_user.id, "User logged out");
    Ok(ok_with_message((), "Logged out"))
}

/// Linear scan of the users collection. The store surface has no
/// secondary indexes; account volume is small enough that this is fine.
pub(crate) async fn find_by_email(
    state: &ServerState,
    email: &str,
) -> AppResult<Option<UserProfile>> {
    let docs = state.store().list(collections::USERS).await?;
    for doc in docs {
        let profile: UserProfile = doc.decode()?;
        if profile.email.eq_ignore_ascii_case(email) {
            return Ok(Some(profile));
        }
    }
    Ok(None)
}
