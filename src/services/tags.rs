//! Tags service
//!
//! Tag lifecycle is immediate: no soft delete, removal cascades the
//! note links at the persistence layer.

use crate::database::{Repository, Tag};
use crate::error::Result;
use crate::events::RefreshBus;

const ROOT_PATH: &str = "/";

/// Service for managing tags
#[derive(Clone)]
pub struct TagsService {
    repo: Repository,
    refresh: RefreshBus,
}

impl TagsService {
    pub fn new(repo: Repository, refresh: RefreshBus) -> Self {
        Self { repo, refresh }
    }

    /// Create a tag; the name is trimmed and lowercased
    pub async fn create_tag(&self, name: &str, color: &str) -> Result<Tag> {
        let tag = self.repo.create_tag(name, color).await?;
        self.refresh.emit(ROOT_PATH);

        tracing::info!("Tag created: {}", tag.name);
        Ok(tag)
    }

    /// Hard-delete a tag; `false` when missing
    pub async fn delete_tag(&self, id: &str) -> Result<bool> {
        let changed = self.repo.delete_tag(id).await?;
        if changed {
            self.refresh.emit(ROOT_PATH);
        }
        Ok(changed)
    }

    /// All tags, ordered by name ascending
    pub async fn list_tags(&self) -> Result<Vec<Tag>> {
        self.repo.list_tags().await
    }
}
