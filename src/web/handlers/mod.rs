//! API handlers for Web API.

pub mod file;

pub use file::*;

use std::sync::Arc;

use crate::file::{FileService, PageLimits, SqliteFileStore};
use crate::Database;

/// Shared application state for handlers.
#[derive(Debug, Clone)]
pub struct AppState {
    /// File service.
    pub files: FileService,
    /// Page size bounds for listings.
    pub limits: PageLimits,
}

impl AppState {
    /// Create a new application state.
    pub fn new(files: FileService, limits: PageLimits) -> Self {
        Self { files, limits }
    }

    /// Create application state backed by the SQLite store.
    pub fn from_database(db: &Database, limits: PageLimits) -> Self {
        let store = SqliteFileStore::new(db.pool().clone());
        Self::new(FileService::new(Arc::new(store)), limits)
    }
}
