//! Repository layer for database operations
//!
//! This module provides CRUD operations for all entities. Whole-set
//! replacement of a note's children (checklist, tag links) always runs
//! inside a single transaction, so a concurrent reader never observes
//! a half-rewritten note.

use super::models::*;
use crate::error::{AppError, Result};
use crate::views::NoteFilter;
use chrono::Utc;
use sqlx::{Sqlite, SqlitePool, Transaction};
use uuid::Uuid;

/// Repository for database operations
#[derive(Clone)]
pub struct Repository {
    pool: SqlitePool,
}

impl Repository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    // ===== Notes =====

    /// Create a new note with its checklist and tag links
    pub async fn create_note(&self, draft: NoteDraft) -> Result<NoteWithRelations> {
        let id = Uuid::new_v4().to_string();
        let now = Utc::now();

        let mut tx = self.pool.begin().await?;

        sqlx::query(
            r#"
            INSERT INTO notes (id, title, content, color, is_pinned, is_archived, is_trashed, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, 0, 0, ?, ?)
            "#,
        )
        .bind(&id)
        .bind(&draft.title)
        .bind(&draft.content)
        .bind(&draft.color)
        .bind(draft.is_pinned)
        .bind(now)
        .bind(now)
        .execute(&mut *tx)
        .await?;

        insert_children(&mut tx, &id, &draft).await?;

        tx.commit().await?;

        tracing::debug!("Created note: {}", id);
        self.get_note(&id).await
    }

    /// Get a note with its relations by ID
    pub async fn get_note(&self, id: &str) -> Result<NoteWithRelations> {
        let note = self
            .find_note(id)
            .await?
            .ok_or_else(|| AppError::NoteNotFound(id.to_string()))?;

        self.load_relations(note).await
    }

    /// Look up a bare note row, `None` when missing
    pub async fn find_note(&self, id: &str) -> Result<Option<Note>> {
        let note = sqlx::query_as::<_, Note>("SELECT * FROM notes WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(note)
    }

    /// Replace a note wholesale: scalar fields plus the entire checklist
    /// and tag set, in one transaction. Checklist positions are
    /// reassigned densely from the submitted order.
    pub async fn update_note(&self, id: &str, draft: NoteDraft) -> Result<NoteWithRelations> {
        let now = Utc::now();

        let mut tx = self.pool.begin().await?;

        // A trashed note can never come out of an edit pinned
        let rows = sqlx::query(
            r#"
            UPDATE notes
            SET title = ?,
                content = ?,
                color = ?,
                is_pinned = CASE WHEN is_trashed = 1 THEN 0 ELSE ? END,
                updated_at = ?
            WHERE id = ?
            "#,
        )
        .bind(&draft.title)
        .bind(&draft.content)
        .bind(&draft.color)
        .bind(draft.is_pinned)
        .bind(now)
        .bind(id)
        .execute(&mut *tx)
        .await?
        .rows_affected();

        if rows == 0 {
            return Err(AppError::NoteNotFound(id.to_string()));
        }

        sqlx::query("DELETE FROM check_items WHERE note_id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        sqlx::query("DELETE FROM note_tags WHERE note_id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        insert_children(&mut tx, id, &draft).await?;

        tx.commit().await?;

        tracing::debug!("Updated note: {}", id);
        self.get_note(id).await
    }

    /// Flip a note's pin. Trashed notes are skipped, so this reports
    /// `false` for them just as it does for unknown ids.
    pub async fn toggle_pin(&self, id: &str) -> Result<bool> {
        let rows = sqlx::query(
            "UPDATE notes SET is_pinned = NOT is_pinned, updated_at = ? WHERE id = ? AND is_trashed = 0",
        )
        .bind(Utc::now())
        .bind(id)
        .execute(&self.pool)
        .await?
        .rows_affected();

        Ok(rows > 0)
    }

    /// Flip a checklist item's done state
    pub async fn toggle_check_item(&self, id: &str) -> Result<bool> {
        let rows = sqlx::query("UPDATE check_items SET is_done = NOT is_done WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?
            .rows_affected();

        Ok(rows > 0)
    }

    /// Flip a note's archived flag
    pub async fn toggle_archive(&self, id: &str) -> Result<bool> {
        let rows = sqlx::query(
            "UPDATE notes SET is_archived = NOT is_archived, updated_at = ? WHERE id = ?",
        )
        .bind(Utc::now())
        .bind(id)
        .execute(&self.pool)
        .await?
        .rows_affected();

        Ok(rows > 0)
    }

    /// Soft-delete a note. Unpins unconditionally.
    pub async fn trash_note(&self, id: &str) -> Result<bool> {
        let rows = sqlx::query(
            "UPDATE notes SET is_trashed = 1, is_pinned = 0, updated_at = ? WHERE id = ?",
        )
        .bind(Utc::now())
        .bind(id)
        .execute(&self.pool)
        .await?
        .rows_affected();

        if rows > 0 {
            tracing::debug!("Trashed note: {}", id);
        }
        Ok(rows > 0)
    }

    /// Bring a note back from the trash
    pub async fn restore_note(&self, id: &str) -> Result<bool> {
        let rows = sqlx::query("UPDATE notes SET is_trashed = 0, updated_at = ? WHERE id = ?")
            .bind(Utc::now())
            .bind(id)
            .execute(&self.pool)
            .await?
            .rows_affected();

        Ok(rows > 0)
    }

    /// Permanently delete a note. Checklist items, tag links and images
    /// go with it via cascade.
    pub async fn delete_note(&self, id: &str) -> Result<bool> {
        let rows = sqlx::query("DELETE FROM notes WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?
            .rows_affected();

        if rows > 0 {
            tracing::debug!("Hard deleted note: {}", id);
        }
        Ok(rows > 0)
    }

    /// Permanently delete every trashed note, returning how many went
    pub async fn empty_trash(&self) -> Result<u64> {
        let rows = sqlx::query("DELETE FROM notes WHERE is_trashed = 1")
            .execute(&self.pool)
            .await?
            .rows_affected();

        tracing::debug!("Emptied trash: {} notes removed", rows);
        Ok(rows)
    }

    /// Copy a note: content, color, checklist and tag set. The copy
    /// starts unpinned, unarchived and untrashed; a non-empty title
    /// gets the " (copia)" suffix. `None` when the source is missing.
    pub async fn duplicate_note(&self, id: &str) -> Result<Option<NoteWithRelations>> {
        let Some(source) = self.find_note(id).await? else {
            return Ok(None);
        };
        let source = self.load_relations(source).await?;

        let title = if source.note.title.is_empty() {
            String::new()
        } else {
            format!("{} (copia)", source.note.title)
        };

        let draft = NoteDraft {
            title,
            content: source.note.content.clone(),
            color: source.note.color.clone(),
            is_pinned: false,
            check_items: source
                .check_items
                .iter()
                .map(|item| CheckItemDraft {
                    text: item.text.clone(),
                    is_done: item.is_done,
                })
                .collect(),
            tag_ids: source.tags.iter().map(|tag| tag.id.clone()).collect(),
        };

        let copy = self.create_note(draft).await?;
        Ok(Some(copy))
    }

    /// List notes for one view, pinned first then most recently updated
    pub async fn list_notes(&self, filter: &NoteFilter) -> Result<Vec<NoteWithRelations>> {
        const ORDER: &str = "ORDER BY is_pinned DESC, updated_at DESC";

        let notes: Vec<Note> = match filter {
            NoteFilter::Tag(tag_id) => {
                sqlx::query_as::<_, Note>(&format!(
                    r#"
                    SELECT * FROM notes
                    WHERE is_trashed = 0
                      AND EXISTS (
                          SELECT 1 FROM note_tags
                          WHERE note_tags.note_id = notes.id AND note_tags.tag_id = ?
                      )
                    {ORDER}
                    "#
                ))
                .bind(tag_id)
                .fetch_all(&self.pool)
                .await?
            }
            other => {
                let where_clause = match other {
                    NoteFilter::Pinned => "is_pinned = 1 AND is_archived = 0 AND is_trashed = 0",
                    NoteFilter::Archived => "is_archived = 1 AND is_trashed = 0",
                    NoteFilter::Trashed => "is_trashed = 1",
                    _ => "is_archived = 0 AND is_trashed = 0",
                };
                sqlx::query_as::<_, Note>(&format!(
                    "SELECT * FROM notes WHERE {where_clause} {ORDER}"
                ))
                .fetch_all(&self.pool)
                .await?
            }
        };

        let mut result = Vec::with_capacity(notes.len());
        for note in notes {
            result.push(self.load_relations(note).await?);
        }

        Ok(result)
    }

    /// Navigation badge counts, independent of the active filter
    pub async fn count_notes(&self) -> Result<NoteCounts> {
        let all: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM notes WHERE is_archived = 0 AND is_trashed = 0",
        )
        .fetch_one(&self.pool)
        .await?;

        let pinned: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM notes WHERE is_pinned = 1 AND is_archived = 0 AND is_trashed = 0",
        )
        .fetch_one(&self.pool)
        .await?;

        let archived: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM notes WHERE is_archived = 1 AND is_trashed = 0",
        )
        .fetch_one(&self.pool)
        .await?;

        let trashed: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM notes WHERE is_trashed = 1")
            .fetch_one(&self.pool)
            .await?;

        Ok(NoteCounts {
            all,
            pinned,
            archived,
            trashed,
        })
    }

    // ===== Tags =====

    /// Create a tag. The name is trimmed and lowercased before insert.
    pub async fn create_tag(&self, name: &str, color: &str) -> Result<Tag> {
        let id = Uuid::new_v4().to_string();
        let normalized = name.trim().to_lowercase();

        let tag = sqlx::query_as::<_, Tag>(
            "INSERT INTO tags (id, name, color) VALUES (?, ?, ?) RETURNING *",
        )
        .bind(&id)
        .bind(&normalized)
        .bind(color)
        .fetch_one(&self.pool)
        .await?;

        tracing::debug!("Created tag: {} ({})", tag.name, tag.id);
        Ok(tag)
    }

    /// Hard-delete a tag; its note links cascade away
    pub async fn delete_tag(&self, id: &str) -> Result<bool> {
        let rows = sqlx::query("DELETE FROM tags WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?
            .rows_affected();

        Ok(rows > 0)
    }

    /// All tags, ordered by name ascending
    pub async fn list_tags(&self) -> Result<Vec<Tag>> {
        let tags = sqlx::query_as::<_, Tag>("SELECT * FROM tags ORDER BY name ASC")
            .fetch_all(&self.pool)
            .await?;

        Ok(tags)
    }

    // ===== Relations =====

    /// Attach checklist, tags and images to a note row
    pub async fn load_relations(&self, note: Note) -> Result<NoteWithRelations> {
        let check_items = sqlx::query_as::<_, CheckItem>(
            "SELECT * FROM check_items WHERE note_id = ? ORDER BY position ASC",
        )
        .bind(&note.id)
        .fetch_all(&self.pool)
        .await?;

        let tags = sqlx::query_as::<_, Tag>(
            r#"
            SELECT tags.* FROM tags
            INNER JOIN note_tags ON note_tags.tag_id = tags.id
            WHERE note_tags.note_id = ?
            ORDER BY tags.name ASC
            "#,
        )
        .bind(&note.id)
        .fetch_all(&self.pool)
        .await?;

        let images = sqlx::query_as::<_, NoteImage>("SELECT * FROM note_images WHERE note_id = ?")
            .bind(&note.id)
            .fetch_all(&self.pool)
            .await?;

        Ok(NoteWithRelations {
            note,
            check_items,
            tags,
            images,
        })
    }
}

/// Insert the checklist and tag links a draft carries. Positions come
/// from the submitted sequence, 0..n-1.
async fn insert_children(
    tx: &mut Transaction<'_, Sqlite>,
    note_id: &str,
    draft: &NoteDraft,
) -> Result<()> {
    for (idx, item) in draft.check_items.iter().enumerate() {
        sqlx::query(
            "INSERT INTO check_items (id, note_id, text, is_done, position) VALUES (?, ?, ?, ?, ?)",
        )
        .bind(Uuid::new_v4().to_string())
        .bind(note_id)
        .bind(&item.text)
        .bind(item.is_done)
        .bind(idx as i64)
        .execute(&mut **tx)
        .await?;
    }

    for tag_id in &draft.tag_ids {
        sqlx::query("INSERT INTO note_tags (note_id, tag_id) VALUES (?, ?)")
            .bind(note_id)
            .bind(tag_id)
            .execute(&mut **tx)
            .await?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::schema::initialize_database;
    use sqlx::sqlite::SqlitePoolOptions;

    async fn create_test_repo() -> Repository {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .unwrap();

        initialize_database(&pool).await.unwrap();

        Repository::new(pool)
    }

    fn draft(title: &str) -> NoteDraft {
        NoteDraft {
            title: title.to_string(),
            content: String::new(),
            color: "default".to_string(),
            is_pinned: false,
            check_items: vec![],
            tag_ids: vec![],
        }
    }

    #[tokio::test]
    async fn test_create_and_get_note_with_relations() {
        let repo = create_test_repo().await;

        let tag = repo.create_tag("work", "#7c6af7").await.unwrap();

        let note = repo
            .create_note(NoteDraft {
                title: "Groceries".to_string(),
                content: "weekly run".to_string(),
                color: "sage".to_string(),
                is_pinned: true,
                check_items: vec![
                    CheckItemDraft {
                        text: "Milk".to_string(),
                        is_done: true,
                    },
                    CheckItemDraft {
                        text: "Bread".to_string(),
                        is_done: false,
                    },
                ],
                tag_ids: vec![tag.id.clone()],
            })
            .await
            .unwrap();

        let fetched = repo.get_note(&note.note.id).await.unwrap();
        assert_eq!(fetched.note.title, "Groceries");
        assert_eq!(fetched.note.color, "sage");
        assert!(fetched.note.is_pinned);
        assert_eq!(fetched.check_items.len(), 2);
        assert_eq!(fetched.check_items[0].text, "Milk");
        assert_eq!(fetched.check_items[0].position, 0);
        assert_eq!(fetched.check_items[1].position, 1);
        assert_eq!(fetched.tags.len(), 1);
        assert_eq!(fetched.tags[0].id, tag.id);
        assert!(fetched.images.is_empty());
    }

    #[tokio::test]
    async fn test_update_note_replaces_children() {
        let repo = create_test_repo().await;

        let note = repo
            .create_note(NoteDraft {
                check_items: vec![
                    CheckItemDraft {
                        text: "one".to_string(),
                        is_done: false,
                    },
                    CheckItemDraft {
                        text: "two".to_string(),
                        is_done: false,
                    },
                    CheckItemDraft {
                        text: "three".to_string(),
                        is_done: false,
                    },
                ],
                ..draft("List")
            })
            .await
            .unwrap();

        let updated = repo
            .update_note(
                &note.note.id,
                NoteDraft {
                    check_items: vec![CheckItemDraft {
                        text: "only".to_string(),
                        is_done: true,
                    }],
                    ..draft("List")
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.check_items.len(), 1);
        assert_eq!(updated.check_items[0].text, "only");
        assert_eq!(updated.check_items[0].position, 0);

        // No stale rows survive the rewrite
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM check_items")
            .fetch_one(&repo.pool)
            .await
            .unwrap();
        assert_eq!(total, 1);
    }

    #[tokio::test]
    async fn test_update_missing_note_is_not_found() {
        let repo = create_test_repo().await;

        let result = repo.update_note("nope", draft("x")).await;
        assert!(matches!(result, Err(AppError::NoteNotFound(_))));
    }

    #[tokio::test]
    async fn test_toggle_pin_roundtrip_and_missing() {
        let repo = create_test_repo().await;

        let note = repo.create_note(draft("Pin me")).await.unwrap();

        assert!(repo.toggle_pin(&note.note.id).await.unwrap());
        assert!(repo.find_note(&note.note.id).await.unwrap().unwrap().is_pinned);

        assert!(repo.toggle_pin(&note.note.id).await.unwrap());
        assert!(!repo.find_note(&note.note.id).await.unwrap().unwrap().is_pinned);

        assert!(!repo.toggle_pin("missing").await.unwrap());
    }

    #[tokio::test]
    async fn test_toggle_pin_skips_trashed_notes() {
        let repo = create_test_repo().await;

        let note = repo.create_note(draft("Trashed")).await.unwrap();
        assert!(repo.trash_note(&note.note.id).await.unwrap());

        assert!(!repo.toggle_pin(&note.note.id).await.unwrap());
        assert!(!repo.find_note(&note.note.id).await.unwrap().unwrap().is_pinned);
    }

    #[tokio::test]
    async fn test_trash_forces_unpin() {
        let repo = create_test_repo().await;

        let note = repo
            .create_note(NoteDraft {
                is_pinned: true,
                ..draft("Pinned")
            })
            .await
            .unwrap();

        assert!(repo.trash_note(&note.note.id).await.unwrap());

        let trashed = repo.find_note(&note.note.id).await.unwrap().unwrap();
        assert!(trashed.is_trashed);
        assert!(!trashed.is_pinned);
    }

    #[tokio::test]
    async fn test_restore_note() {
        let repo = create_test_repo().await;

        let note = repo.create_note(draft("Back soon")).await.unwrap();
        repo.trash_note(&note.note.id).await.unwrap();
        assert!(repo.restore_note(&note.note.id).await.unwrap());

        let restored = repo.find_note(&note.note.id).await.unwrap().unwrap();
        assert!(!restored.is_trashed);
    }

    #[tokio::test]
    async fn test_delete_note_cascades_children() {
        let repo = create_test_repo().await;

        let tag = repo.create_tag("t", "#fff").await.unwrap();
        let note = repo
            .create_note(NoteDraft {
                check_items: vec![CheckItemDraft {
                    text: "item".to_string(),
                    is_done: false,
                }],
                tag_ids: vec![tag.id.clone()],
                ..draft("Doomed")
            })
            .await
            .unwrap();

        assert!(repo.delete_note(&note.note.id).await.unwrap());
        assert!(!repo.delete_note(&note.note.id).await.unwrap());

        let items: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM check_items")
            .fetch_one(&repo.pool)
            .await
            .unwrap();
        let links: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM note_tags")
            .fetch_one(&repo.pool)
            .await
            .unwrap();
        assert_eq!(items, 0);
        assert_eq!(links, 0);

        // The tag itself survives
        assert_eq!(repo.list_tags().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_empty_trash_removes_only_trashed() {
        let repo = create_test_repo().await;

        let keep = repo.create_note(draft("Keep")).await.unwrap();
        let toss1 = repo.create_note(draft("Toss 1")).await.unwrap();
        let toss2 = repo.create_note(draft("Toss 2")).await.unwrap();
        repo.trash_note(&toss1.note.id).await.unwrap();
        repo.trash_note(&toss2.note.id).await.unwrap();

        let removed = repo.empty_trash().await.unwrap();
        assert_eq!(removed, 2);

        assert!(repo.find_note(&keep.note.id).await.unwrap().is_some());
        assert!(repo.find_note(&toss1.note.id).await.unwrap().is_none());
        assert!(repo.find_note(&toss2.note.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_duplicate_note() {
        let repo = create_test_repo().await;

        let tag = repo.create_tag("ideas", "#4ade80").await.unwrap();
        let original = repo
            .create_note(NoteDraft {
                title: "Plan".to_string(),
                content: "draft the plan".to_string(),
                color: "ocean".to_string(),
                is_pinned: true,
                check_items: vec![CheckItemDraft {
                    text: "step 1".to_string(),
                    is_done: true,
                }],
                tag_ids: vec![tag.id.clone()],
            })
            .await
            .unwrap();
        repo.toggle_archive(&original.note.id).await.unwrap();

        let copy = repo
            .duplicate_note(&original.note.id)
            .await
            .unwrap()
            .expect("source exists");

        assert_eq!(copy.note.title, "Plan (copia)");
        assert_eq!(copy.note.content, "draft the plan");
        assert_eq!(copy.note.color, "ocean");
        assert!(!copy.note.is_pinned);
        assert!(!copy.note.is_archived);
        assert!(!copy.note.is_trashed);
        assert_eq!(copy.check_items.len(), 1);
        assert_eq!(copy.check_items[0].text, "step 1");
        assert!(copy.check_items[0].is_done);
        assert_eq!(copy.tags.len(), 1);
        assert_eq!(copy.tags[0].id, tag.id);
    }

    #[tokio::test]
    async fn test_duplicate_keeps_empty_title_empty() {
        let repo = create_test_repo().await;

        let original = repo.create_note(draft("")).await.unwrap();
        let copy = repo
            .duplicate_note(&original.note.id)
            .await
            .unwrap()
            .unwrap();

        assert_eq!(copy.note.title, "");
    }

    #[tokio::test]
    async fn test_duplicate_missing_note_is_none() {
        let repo = create_test_repo().await;

        assert!(repo.duplicate_note("ghost").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_tag_name_is_normalized() {
        let repo = create_test_repo().await;

        let tag = repo.create_tag("  Work  ", "#7c6af7").await.unwrap();
        assert_eq!(tag.name, "work");
    }

    #[tokio::test]
    async fn test_list_tags_sorted_by_name() {
        let repo = create_test_repo().await;

        repo.create_tag("zeta", "#111").await.unwrap();
        repo.create_tag("alpha", "#222").await.unwrap();

        let tags = repo.list_tags().await.unwrap();
        let names: Vec<&str> = tags.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["alpha", "zeta"]);
    }

    #[tokio::test]
    async fn test_delete_tag_cascades_links_only() {
        let repo = create_test_repo().await;

        let tag = repo.create_tag("gone", "#333").await.unwrap();
        let note = repo
            .create_note(NoteDraft {
                tag_ids: vec![tag.id.clone()],
                ..draft("Tagged")
            })
            .await
            .unwrap();

        assert!(repo.delete_tag(&tag.id).await.unwrap());
        assert!(!repo.delete_tag(&tag.id).await.unwrap());

        let refreshed = repo.get_note(&note.note.id).await.unwrap();
        assert!(refreshed.tags.is_empty());
    }

    #[tokio::test]
    async fn test_counts() {
        let repo = create_test_repo().await;

        repo.create_note(NoteDraft {
            is_pinned: true,
            ..draft("Pinned")
        })
        .await
        .unwrap();
        let archived = repo.create_note(draft("Archived")).await.unwrap();
        repo.toggle_archive(&archived.note.id).await.unwrap();
        let trashed = repo.create_note(draft("Trashed")).await.unwrap();
        repo.trash_note(&trashed.note.id).await.unwrap();
        repo.create_note(draft("Plain")).await.unwrap();

        let counts = repo.count_notes().await.unwrap();
        assert_eq!(counts.all, 2); // pinned + plain
        assert_eq!(counts.pinned, 1);
        assert_eq!(counts.archived, 1);
        assert_eq!(counts.trashed, 1);
    }
}
