//! Application state and initialization
//!
//! All services are constructed here from an initialized pool and made
//! available to the handlers through AppState. The pool is built once
//! per process and injected; nothing reaches for ambient globals.

use crate::database::Repository;
use crate::events::RefreshBus;
use crate::services::{NotesService, TagsService};
use sqlx::SqlitePool;

/// Central application state holding all services
#[derive(Clone)]
pub struct AppState {
    pub notes: NotesService,
    pub tags: TagsService,
    pub refresh: RefreshBus,
}

impl AppState {
    pub fn new(pool: SqlitePool) -> Self {
        let repo = Repository::new(pool);
        let refresh = RefreshBus::default();

        Self {
            notes: NotesService::new(repo.clone(), refresh.clone()),
            tags: TagsService::new(repo, refresh.clone()),
            refresh,
        }
    }
}
