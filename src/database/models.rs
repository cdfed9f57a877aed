//! Database models
//!
//! Rust structs representing database entities, plus the draft/request
//! types the mutation layer accepts. All models use serde for
//! serialization across the API boundary.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A note with free text and an optional checklist
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Note {
    pub id: String,
    pub title: String,
    pub content: String,
    /// Display theme token, free-form and not validated
    pub color: String,
    pub is_pinned: bool,
    pub is_archived: bool,
    pub is_trashed: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// One line of a note's checklist
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct CheckItem {
    pub id: String,
    pub note_id: String,
    pub text: String,
    pub is_done: bool,
    /// Display order, reassigned densely whenever a checklist is rewritten
    pub position: i64,
}

/// A user-defined label attachable to multiple notes
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Tag {
    pub id: String,
    /// Normalized to trimmed lowercase at creation
    pub name: String,
    pub color: String,
}

/// An image attached to a note. Read-only: no exposed operation creates
/// or mutates these rows.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct NoteImage {
    pub id: String,
    pub note_id: String,
    pub url: String,
    pub alt: String,
}

/// A note together with its child collections, as returned by every
/// read path
#[derive(Debug, Clone, Serialize)]
pub struct NoteWithRelations {
    #[serde(flatten)]
    pub note: Note,
    pub check_items: Vec<CheckItem>,
    pub tags: Vec<Tag>,
    pub images: Vec<NoteImage>,
}

/// Checklist line submitted by the editor
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckItemDraft {
    pub text: String,
    #[serde(default)]
    pub is_done: bool,
}

/// Editor payload for creating or fully replacing a note.
/// Empty title and content are accepted as-is.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NoteDraft {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: String,
    #[serde(default = "default_color")]
    pub color: String,
    #[serde(default)]
    pub is_pinned: bool,
    #[serde(default)]
    pub check_items: Vec<CheckItemDraft>,
    #[serde(default)]
    pub tag_ids: Vec<String>,
}

fn default_color() -> String {
    "default".to_string()
}

/// Create tag request
#[derive(Debug, Clone, Deserialize)]
pub struct CreateTagRequest {
    pub name: String,
    pub color: String,
}

/// Navigation badge counts, computed on every browse regardless of the
/// active filter
#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct NoteCounts {
    /// Not archived and not trashed
    pub all: i64,
    /// Pinned, not archived, not trashed
    pub pinned: i64,
    /// Archived and not trashed
    pub archived: i64,
    /// Trashed, regardless of other flags
    pub trashed: i64,
}
