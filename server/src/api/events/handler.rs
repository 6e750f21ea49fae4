//! Event handlers
//!
//! Read-only: the organizer-management subsystem owns event and package
//! records, this server only serves them to the enquiry workflow.

use axum::{
    Json,
    extract::{Path, State},
};

use sponsorhub_shared::models::{Event, SponsorshipPackage};

use crate::core::ServerState;
use crate::store::collections;
use crate::utils::{AppError, AppResponse, AppResult, ok};

/// GET /api/events - published events, newest first
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<AppResponse<Vec<Event>>>> {
    let docs = state.store().list(collections::EVENTS).await?;
    let mut events = Vec::with_capacity(docs.len());
    for doc in docs {
        let event: Event = doc.decode()?;
        if event.is_published {
            events.push(event);
        }
    }
    Ok(ok(events))
}

/// GET /api/events/:id
///
/// Unpublished events read as absent, same as the list scope.
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<AppResponse<Event>>> {
    let event = published_event(&state, &id).await?;
    Ok(ok(event))
}

/// GET /api/events/:id/packages - sponsorship packages for one event
pub async fn list_packages(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<AppResponse<Vec<SponsorshipPackage>>>> {
    published_event(&state, &id).await?;

    let docs = state.store().list(collections::PACKAGES).await?;
    let mut packages = Vec::new();
    for doc in docs {
        let package: SponsorshipPackage = doc.decode()?;
        if package.event_id == id {
            packages.push(package);
        }
    }
    Ok(ok(packages))
}

async fn published_event(state: &ServerState, id: &str) -> Result<Event, AppError> {
    let event: Event = state
        .store()
        .get(collections::EVENTS, id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Event {}", id)))?
        .decode()?;
    if !event.is_published {
        return Err(AppError::not_found(format!("Event {}", id)));
    }
    Ok(event)
}
