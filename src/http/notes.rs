//! Note handlers
//!
//! CRUD, toggles, trash lifecycle and the browse read.

use super::MutationOutcome;
use crate::app::AppState;
use crate::database::{NoteDraft, NoteWithRelations};
use crate::error::Result;
use crate::views::NotesPage;
use axum::extract::{Path, Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};

/// Query parameters of the list view
#[derive(Debug, Deserialize)]
pub struct BrowseParams {
    pub filter: Option<String>,
    pub tag: Option<String>,
    /// Free-text search applied after the filter, in memory
    pub q: Option<String>,
}

/// Envelope for mutations that return the affected note
#[derive(Debug, Serialize)]
pub struct NoteOutcome {
    pub success: bool,
    pub note: NoteWithRelations,
}

/// Browse notes for one view: filter, ordering, counts, search
pub async fn browse(
    State(state): State<AppState>,
    Query(params): Query<BrowseParams>,
) -> Result<Json<NotesPage>> {
    let page = state
        .notes
        .browse(
            params.filter.as_deref(),
            params.tag.as_deref(),
            params.q.as_deref(),
        )
        .await?;

    Ok(Json(page))
}

/// Get one note with its relations
pub async fn get_note(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<NoteWithRelations>> {
    Ok(Json(state.notes.get_note(&id).await?))
}

/// Create a note
pub async fn create_note(
    State(state): State<AppState>,
    Json(draft): Json<NoteDraft>,
) -> Result<Json<NoteOutcome>> {
    let note = state.notes.create_note(draft).await?;
    Ok(Json(NoteOutcome {
        success: true,
        note,
    }))
}

/// Replace a note wholesale
pub async fn update_note(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(draft): Json<NoteDraft>,
) -> Result<Json<NoteOutcome>> {
    let note = state.notes.update_note(&id, draft).await?;
    Ok(Json(NoteOutcome {
        success: true,
        note,
    }))
}

/// Toggle a note's pin
pub async fn toggle_pin(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<MutationOutcome>> {
    Ok(Json(MutationOutcome::of(state.notes.toggle_pin(&id).await?)))
}

/// Toggle a note's archived flag
pub async fn toggle_archive(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<MutationOutcome>> {
    Ok(Json(MutationOutcome::of(
        state.notes.toggle_archive(&id).await?,
    )))
}

/// Toggle a checklist item's done state
pub async fn toggle_check_item(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<MutationOutcome>> {
    Ok(Json(MutationOutcome::of(
        state.notes.toggle_check_item(&id).await?,
    )))
}

/// Move a note to the trash
pub async fn trash_note(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<MutationOutcome>> {
    Ok(Json(MutationOutcome::of(state.notes.trash_note(&id).await?)))
}

/// Restore a note from the trash
pub async fn restore_note(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<MutationOutcome>> {
    Ok(Json(MutationOutcome::of(
        state.notes.restore_note(&id).await?,
    )))
}

/// Duplicate a note
pub async fn duplicate_note(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<MutationOutcome>> {
    let copy = state.notes.duplicate_note(&id).await?;
    Ok(Json(MutationOutcome::of(copy.is_some())))
}

/// Permanently delete a note
pub async fn delete_note(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<MutationOutcome>> {
    Ok(Json(MutationOutcome::of(
        state.notes.delete_note(&id).await?,
    )))
}

/// Permanently delete every trashed note
pub async fn empty_trash(State(state): State<AppState>) -> Result<Json<MutationOutcome>> {
    state.notes.empty_trash().await?;
    Ok(Json(MutationOutcome::of(true)))
}
