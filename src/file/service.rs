//! File service for filetree.
//!
//! Thin orchestration over a [`FileStore`]: lifecycle operations plus the
//! folder listing, which pairs a parent's metadata with a page of its
//! children.

use std::sync::Arc;

use tracing::{debug, info};

use super::entry::{FileEntry, FilePatch, NewFile};
use super::query::{FileFilter, FilePage, QueryOptions};
use super::repository::FileStore;
use super::HOME_PARENT_ID;
use crate::Result;

/// Metadata of the node a listing was requested for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParentInfo {
    /// The implicit root (`"home"`), which has no stored metadata.
    Root,
    /// A stored entry.
    Entry(FileEntry),
    /// No entry with the requested ID (or no parent requested at all).
    Missing,
}

/// A folder listing: the parent's metadata plus one page of children.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileListing {
    /// The listed node itself.
    pub file_info: ParentInfo,
    /// The requested page of matching entries.
    pub page: FilePage,
}

/// File service holding an injected store.
#[derive(Clone)]
pub struct FileService {
    store: Arc<dyn FileStore>,
}

impl FileService {
    /// Create a new FileService.
    pub fn new(store: Arc<dyn FileStore>) -> Self {
        Self { store }
    }

    /// Create an entry.
    pub async fn create_file(&self, new_file: &NewFile) -> Result<FileEntry> {
        let entry = self.store.create(new_file).await?;
        info!(
            file_id = %entry.id,
            parent_id = %entry.parent_id,
            "File created: {}",
            entry.name
        );
        Ok(entry)
    }

    /// List entries matching `filter` together with the parent's metadata.
    ///
    /// The parent is resolved from `filter.parent_id`: `"home"` yields
    /// [`ParentInfo::Root`] without touching storage, an unknown ID yields
    /// [`ParentInfo::Missing`] rather than an error.
    pub async fn query_files(
        &self,
        filter: &FileFilter,
        options: &QueryOptions,
    ) -> Result<FileListing> {
        let file_info = match filter.parent_id.as_deref() {
            Some(HOME_PARENT_ID) => ParentInfo::Root,
            Some(parent_id) => match self.store.find_by_id(parent_id).await? {
                Some(entry) => ParentInfo::Entry(entry),
                None => {
                    debug!(parent_id, "Listing children of a missing parent");
                    ParentInfo::Missing
                }
            },
            None => ParentInfo::Missing,
        };

        let page = self.store.paginate(filter, options).await?;

        Ok(FileListing { file_info, page })
    }

    /// Get an entry by ID.
    pub async fn get_file_by_id(&self, id: &str) -> Result<Option<FileEntry>> {
        self.store.find_by_id(id).await
    }

    /// Apply a partial update to an entry.
    pub async fn update_file_by_id(&self, id: &str, patch: &FilePatch) -> Result<FileEntry> {
        let entry = self.store.update_by_id(id, patch).await?;
        info!(file_id = %entry.id, "File updated");
        Ok(entry)
    }

    /// Delete an entry, returning what was removed.
    ///
    /// Children are left in place.
    pub async fn delete_file_by_id(&self, id: &str) -> Result<FileEntry> {
        let entry = self.store.delete_by_id(id).await?;
        info!(file_id = %entry.id, "File deleted: {}", entry.name);
        Ok(entry)
    }
}

impl std::fmt::Debug for FileService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileService").finish()
    }
}
