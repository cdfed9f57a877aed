//! Query/view-model layer
//!
//! Resolves the navigation filter, assembles the note list with its
//! badge counts, and narrows an already-fetched list with free-text
//! search. The search runs in memory on purpose: it refines the current
//! view without another round trip.

use crate::database::{NoteCounts, NoteWithRelations};
use serde::Serialize;

/// Which slice of the notes the list view shows.
///
/// Precedence when both `filter` and `tag` parameters arrive: an
/// explicit filter token wins; the tag only applies without one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NoteFilter {
    /// Not archived, not trashed (the default view)
    Active,
    /// Pinned, not archived, not trashed
    Pinned,
    /// Archived, not trashed
    Archived,
    /// Trashed, regardless of other flags
    Trashed,
    /// Not trashed and linked to this tag
    Tag(String),
}

impl NoteFilter {
    /// Resolve the raw query parameters. Unrecognized filter tokens
    /// fall through to the tag, then to the default view.
    pub fn from_params(filter: Option<&str>, tag: Option<&str>) -> Self {
        match filter {
            Some("pinned") => NoteFilter::Pinned,
            Some("archived") => NoteFilter::Archived,
            Some("trashed") => NoteFilter::Trashed,
            _ => match tag {
                Some(id) => NoteFilter::Tag(id.to_string()),
                None => NoteFilter::Active,
            },
        }
    }
}

/// Everything the list view needs for one render
#[derive(Debug, Clone, Serialize)]
pub struct NotesPage {
    pub notes: Vec<NoteWithRelations>,
    pub counts: NoteCounts,
}

/// Case-insensitive substring match against a note's title, content,
/// checklist text and tag names
pub fn matches_search(note: &NoteWithRelations, query: &str) -> bool {
    let q = query.to_lowercase();

    note.note.title.to_lowercase().contains(&q)
        || note.note.content.to_lowercase().contains(&q)
        || note
            .check_items
            .iter()
            .any(|item| item.text.to_lowercase().contains(&q))
        || note.tags.iter().any(|tag| tag.name.to_lowercase().contains(&q))
}

/// Narrow an already-fetched note list. A blank query keeps everything.
pub fn apply_search(notes: Vec<NoteWithRelations>, query: &str) -> Vec<NoteWithRelations> {
    if query.trim().is_empty() {
        return notes;
    }

    notes
        .into_iter()
        .filter(|note| matches_search(note, query))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::{CheckItem, Note, Tag};
    use chrono::Utc;

    fn note(title: &str, content: &str) -> NoteWithRelations {
        let now = Utc::now();
        NoteWithRelations {
            note: Note {
                id: "n".to_string(),
                title: title.to_string(),
                content: content.to_string(),
                color: "default".to_string(),
                is_pinned: false,
                is_archived: false,
                is_trashed: false,
                created_at: now,
                updated_at: now,
            },
            check_items: vec![],
            tags: vec![],
            images: vec![],
        }
    }

    #[test]
    fn test_filter_precedence() {
        assert_eq!(
            NoteFilter::from_params(Some("trashed"), Some("t1")),
            NoteFilter::Trashed
        );
        assert_eq!(
            NoteFilter::from_params(Some("pinned"), None),
            NoteFilter::Pinned
        );
        assert_eq!(
            NoteFilter::from_params(None, Some("t1")),
            NoteFilter::Tag("t1".to_string())
        );
        assert_eq!(NoteFilter::from_params(None, None), NoteFilter::Active);
    }

    #[test]
    fn test_unknown_filter_token_falls_through() {
        assert_eq!(
            NoteFilter::from_params(Some("starred"), Some("t1")),
            NoteFilter::Tag("t1".to_string())
        );
        assert_eq!(
            NoteFilter::from_params(Some("starred"), None),
            NoteFilter::Active
        );
    }

    #[test]
    fn test_search_matches_title_and_content() {
        let n = note("Shopping List", "buy milk");
        assert!(matches_search(&n, "SHOP"));
        assert!(matches_search(&n, "Milk"));
        assert!(!matches_search(&n, "bread"));
    }

    #[test]
    fn test_search_matches_check_items_and_tags() {
        let mut n = note("", "");
        n.check_items.push(CheckItem {
            id: "c".to_string(),
            note_id: "n".to_string(),
            text: "Fix the bug".to_string(),
            is_done: false,
            position: 0,
        });
        n.tags.push(Tag {
            id: "t".to_string(),
            name: "urgente".to_string(),
            color: "#f472b6".to_string(),
        });

        assert!(matches_search(&n, "bug"));
        assert!(matches_search(&n, "urgent"));
        assert!(!matches_search(&n, "holiday"));
    }

    #[test]
    fn test_blank_query_keeps_everything() {
        let notes = vec![note("a", ""), note("b", "")];
        assert_eq!(apply_search(notes, "   ").len(), 2);
    }

    #[test]
    fn test_apply_search_filters() {
        let notes = vec![note("Apple", ""), note("Banana", ""), note("Cherry", "")];
        let found = apply_search(notes, "an");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].note.title, "Banana");
    }
}
