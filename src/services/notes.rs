//! Notes service
//!
//! High-level business logic for note operations: the full mutation set
//! plus the browse read. Every successful mutation emits a refresh
//! event so the presentation layer re-fetches; failed lookups do not.

use crate::database::{NoteDraft, NoteWithRelations, Repository};
use crate::error::Result;
use crate::events::RefreshBus;
use crate::views::{apply_search, NoteFilter, NotesPage};

/// All mutations invalidate the root listing
const ROOT_PATH: &str = "/";

/// Service for managing notes
#[derive(Clone)]
pub struct NotesService {
    repo: Repository,
    refresh: RefreshBus,
}

impl NotesService {
    pub fn new(repo: Repository, refresh: RefreshBus) -> Self {
        Self { repo, refresh }
    }

    /// Create a new note with its checklist and tags
    pub async fn create_note(&self, draft: NoteDraft) -> Result<NoteWithRelations> {
        tracing::info!("Creating new note: {:?}", draft.title);

        let note = self.repo.create_note(draft).await?;
        self.refresh.emit(ROOT_PATH);

        tracing::info!("Note created successfully: {}", note.note.id);
        Ok(note)
    }

    /// Get a note by ID
    pub async fn get_note(&self, id: &str) -> Result<NoteWithRelations> {
        self.repo.get_note(id).await
    }

    /// Replace a note wholesale (scalar fields, checklist, tag set)
    pub async fn update_note(&self, id: &str, draft: NoteDraft) -> Result<NoteWithRelations> {
        tracing::debug!("Updating note: {}", id);

        let note = self.repo.update_note(id, draft).await?;
        self.refresh.emit(ROOT_PATH);

        Ok(note)
    }

    /// Flip a note's pin; `false` when the note is missing or trashed
    pub async fn toggle_pin(&self, id: &str) -> Result<bool> {
        let changed = self.repo.toggle_pin(id).await?;
        if changed {
            self.refresh.emit(ROOT_PATH);
        }
        Ok(changed)
    }

    /// Flip a checklist item's done state; `false` when missing
    pub async fn toggle_check_item(&self, id: &str) -> Result<bool> {
        let changed = self.repo.toggle_check_item(id).await?;
        if changed {
            self.refresh.emit(ROOT_PATH);
        }
        Ok(changed)
    }

    /// Flip a note's archived flag; `false` when missing
    pub async fn toggle_archive(&self, id: &str) -> Result<bool> {
        let changed = self.repo.toggle_archive(id).await?;
        if changed {
            self.refresh.emit(ROOT_PATH);
        }
        Ok(changed)
    }

    /// Move a note to the trash, unpinning it
    pub async fn trash_note(&self, id: &str) -> Result<bool> {
        tracing::info!("Trashing note: {}", id);

        let changed = self.repo.trash_note(id).await?;
        if changed {
            self.refresh.emit(ROOT_PATH);
        }
        Ok(changed)
    }

    /// Bring a note back from the trash
    pub async fn restore_note(&self, id: &str) -> Result<bool> {
        let changed = self.repo.restore_note(id).await?;
        if changed {
            self.refresh.emit(ROOT_PATH);
        }
        Ok(changed)
    }

    /// Permanently delete a note and everything it owns
    pub async fn delete_note(&self, id: &str) -> Result<bool> {
        tracing::info!("Deleting note: {}", id);

        let changed = self.repo.delete_note(id).await?;
        if changed {
            self.refresh.emit(ROOT_PATH);
        }
        Ok(changed)
    }

    /// Permanently delete every trashed note
    pub async fn empty_trash(&self) -> Result<u64> {
        tracing::info!("Emptying trash");

        let removed = self.repo.empty_trash().await?;
        if removed > 0 {
            self.refresh.emit(ROOT_PATH);
        }
        Ok(removed)
    }

    /// Copy a note; `None` when the source does not exist
    pub async fn duplicate_note(&self, id: &str) -> Result<Option<NoteWithRelations>> {
        tracing::info!("Duplicating note: {}", id);

        let copy = self.repo.duplicate_note(id).await?;
        if copy.is_some() {
            self.refresh.emit(ROOT_PATH);
        }
        Ok(copy)
    }

    /// Assemble one list view: filtered notes, pinned first then most
    /// recently updated, with the four badge counts. An optional search
    /// query narrows the fetched list in memory.
    pub async fn browse(
        &self,
        filter: Option<&str>,
        tag: Option<&str>,
        query: Option<&str>,
    ) -> Result<NotesPage> {
        let filter = NoteFilter::from_params(filter, tag);

        let mut notes = self.repo.list_notes(&filter).await?;
        if let Some(q) = query {
            notes = apply_search(notes, q);
        }

        let counts = self.repo.count_notes().await?;

        Ok(NotesPage { notes, counts })
    }
}
