//! Career posting handlers

use axum::{
    Json,
    extract::{Extension, Path, State},
};

use sponsorhub_shared::message::SyncAction;
use sponsorhub_shared::models::{CareerCreate, CareerPosting, CareerUpdate};

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::store::collections;
use crate::utils::validation::{MAX_NAME_LEN, MAX_TEXT_LEN, validate_required_text};
use crate::utils::{AppError, AppResponse, AppResult, ok, ok_with_message};

/// GET /api/careers - all postings, newest first
pub async fn list(
    State(state): State<ServerState>,
) -> AppResult<Json<AppResponse<Vec<CareerPosting>>>> {
    let docs = state.store().list(collections::CAREERS).await?;
    let mut postings = Vec::with_capacity(docs.len());
    for doc in docs {
        postings.push(doc.decode()?);
    }
    Ok(ok(postings))
}

/// GET /api/careers/:id
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<AppResponse<CareerPosting>>> {
    let posting: CareerPosting = state
        .store()
        .get(collections::CAREERS, &id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Career posting {}", id)))?
        .decode()?;
    Ok(ok(posting))
}

/// POST /api/careers - create a posting
pub async fn create(
    State(state): State<ServerState>,
    Extension(current_user): Extension<CurrentUser>,
    Json(payload): Json<CareerCreate>,
) -> AppResult<Json<AppResponse<CareerPosting>>> {
    validate_required_text(&payload.title, "title", MAX_NAME_LEN)?;
    validate_required_text(&payload.description, "description", MAX_TEXT_LEN)?;

    // The store assigns the id and both timestamps
    let doc = state
        .store()
        .create(
            collections::CAREERS,
            serde_json::to_value(&payload)
                .map_err(|e| AppError::internal(e.to_string()))?,
        )
        .await?;
    let stored: CareerPosting = doc.decode()?;

    state.sync().publish(
        collections::CAREERS,
        SyncAction::Created,
        &stored.id,
        Some(&stored),
    );

    tracing::info!(
        career_id = %stored.id,
        operator_id = %current_user.id,
        "Career posting created"
    );

    Ok(ok_with_message(stored, "Career posting created"))
}

/// PUT /api/careers/:id - partial update
pub async fn update(
    State(state): State<ServerState>,
    Extension(current_user): Extension<CurrentUser>,
    Path(id): Path<String>,
    Json(payload): Json<CareerUpdate>,
) -> AppResult<Json<AppResponse<CareerPosting>>> {
    if let Some(title) = &payload.title {
        validate_required_text(title, "title", MAX_NAME_LEN)?;
    }
    if let Some(description) = &payload.description {
        validate_required_text(description, "description", MAX_TEXT_LEN)?;
    }

    let partial = serde_json::to_value(&payload)
        .map_err(|e| AppError::internal(e.to_string()))?;
    let doc = state
        .store()
        .update(collections::CAREERS, &id, partial)
        .await?;
    let updated: CareerPosting = doc.decode()?;

    state.sync().publish(
        collections::CAREERS,
        SyncAction::Updated,
        &id,
        Some(&updated),
    );

    tracing::info!(
        career_id = %id,
        operator_id = %current_user.id,
        "Career posting updated"
    );

    Ok(ok(updated))
}

/// DELETE /api/careers/:id
pub async fn delete(
    State(state): State<ServerState>,
    Extension(current_user): Extension<CurrentUser>,
    Path(id): Path<String>,
) -> AppResult<Json<AppResponse<()>>> {
    let removed = state.store().delete(collections::CAREERS, &id).await?;
    if !removed {
        return Err(AppError::not_found(format!("Career posting {}", id)));
    }

    state
        .sync()
        .publish::<()>(collections::CAREERS, SyncAction::Deleted, &id, None);

    tracing::info!(
        career_id = %id,
        operator_id = %current_user.id,
        "Career posting deleted"
    );

    Ok(ok_with_message((), "Career posting deleted"))
}
