//! Tag handlers

use super::MutationOutcome;
use crate::app::AppState;
use crate::database::{CreateTagRequest, Tag};
use crate::error::Result;
use axum::extract::{Path, State};
use axum::Json;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct TagOutcome {
    pub success: bool,
    pub tag: Tag,
}

/// All tags, ordered by name
pub async fn list_tags(State(state): State<AppState>) -> Result<Json<Vec<Tag>>> {
    Ok(Json(state.tags.list_tags().await?))
}

/// Create a tag (name trimmed + lowercased)
pub async fn create_tag(
    State(state): State<AppState>,
    Json(req): Json<CreateTagRequest>,
) -> Result<Json<TagOutcome>> {
    let tag = state.tags.create_tag(&req.name, &req.color).await?;
    Ok(Json(TagOutcome { success: true, tag }))
}

/// Hard-delete a tag; note links cascade away
pub async fn delete_tag(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<MutationOutcome>> {
    Ok(Json(MutationOutcome::of(state.tags.delete_tag(&id).await?)))
}
