//! HTTP invocation boundary
//!
//! One route per mutation/query procedure. Handlers stay thin: decode,
//! delegate to a service, wrap the result in the success envelope.
//! - `notes`: note CRUD, toggles, trash lifecycle, browse
//! - `tags`: tag CRUD
//! - `events`: SSE refresh feed

pub mod events;
pub mod notes;
pub mod tags;

use crate::app::AppState;
use axum::routing::{delete, get, post};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Build the API router
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/notes", get(notes::browse).post(notes::create_note))
        .route(
            "/api/notes/:id",
            get(notes::get_note)
                .put(notes::update_note)
                .delete(notes::delete_note),
        )
        .route("/api/notes/:id/pin", post(notes::toggle_pin))
        .route("/api/notes/:id/archive", post(notes::toggle_archive))
        .route("/api/notes/:id/trash", post(notes::trash_note))
        .route("/api/notes/:id/restore", post(notes::restore_note))
        .route("/api/notes/:id/duplicate", post(notes::duplicate_note))
        .route("/api/trash", delete(notes::empty_trash))
        .route("/api/check-items/:id/toggle", post(notes::toggle_check_item))
        .route("/api/tags", get(tags::list_tags).post(tags::create_tag))
        .route("/api/tags/:id", delete(tags::delete_tag))
        .route("/api/events", get(events::subscribe))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Envelope for flag-style mutation results
#[derive(Debug, serde::Serialize)]
pub struct MutationOutcome {
    pub success: bool,
}

impl MutationOutcome {
    pub fn of(success: bool) -> Self {
        Self { success }
    }
}
