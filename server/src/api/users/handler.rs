//! User administration handlers
//!
//! Accounts are never hard-deleted: deactivation flips `is_active` via
//! the update endpoint and the record stays as history.

use axum::{
    Json,
    extract::{Extension, Path, State},
};

use sponsorhub_shared::client::UserInfo;
use sponsorhub_shared::message::SyncAction;
use sponsorhub_shared::models::{UserProfile, UserUpdate};

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::store::collections;
use crate::utils::{AppError, AppResponse, AppResult, ok};

/// GET /api/users - all accounts, newest first
pub async fn list(
    State(state): State<ServerState>,
) -> AppResult<Json<AppResponse<Vec<UserInfo>>>> {
    let docs = state.store().list(collections::USERS).await?;
    let mut users = Vec::with_capacity(docs.len());
    for doc in docs {
        let profile: UserProfile = doc.decode()?;
        users.push(UserInfo::from(profile));
    }
    Ok(ok(users))
}

/// GET /api/users/:id
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<AppResponse<UserInfo>>> {
    let profile: UserProfile = state
        .store()
        .get(collections::USERS, &id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("User {}", id)))?
        .decode()?;
    Ok(ok(UserInfo::from(profile)))
}

/// PUT /api/users/:id - partial update of an account
///
/// Deactivating or demoting your own account is rejected, so an admin
/// cannot lock themselves out.
pub async fn update(
    State(state): State<ServerState>,
    Extension(current_user): Extension<CurrentUser>,
    Path(id): Path<String>,
    Json(payload): Json<UserUpdate>,
) -> AppResult<Json<AppResponse<UserInfo>>> {
    if let Some(first_name) = &payload.first_name {
        crate::utils::validation::validate_required_text(
            first_name,
            "first_name",
            crate::utils::validation::MAX_NAME_LEN,
        )?;
    }
    if let Some(last_name) = &payload.last_name {
        crate::utils::validation::validate_required_text(
            last_name,
            "last_name",
            crate::utils::validation::MAX_NAME_LEN,
        )?;
    }
    crate::utils::validation::validate_optional_phone(&payload.contact_number, "contact_number")?;

    if id == current_user.id {
        if payload.is_active == Some(false) {
            return Err(AppError::business_rule(
                "Cannot deactivate your own account",
            ));
        }
        if payload.user_type.is_some_and(|r| r != current_user.role) {
            return Err(AppError::business_rule(
                "Cannot change your own role",
            ));
        }
    }

    let partial = serde_json::to_value(&payload)
        .map_err(|e| AppError::internal(e.to_string()))?;
    let doc = state
        .store()
        .update(collections::USERS, &id, partial)
        .await?;
    let updated: UserProfile = doc.decode()?;

    let info = UserInfo::from(updated);
    state
        .sync()
        .publish(collections::USERS, SyncAction::Updated, &id, Some(&info));

    tracing::info!(
        user_id = %id,
        operator_id = %current_user.id,
        "User updated"
    );

    Ok(ok(info))
}
