//! Response DTOs for Web API.

use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

use crate::file::{FileEntry, FileListing, ParentInfo};

/// File record response.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FileResponse {
    /// File ID (UUID).
    pub id: String,
    /// Display name.
    pub name: String,
    /// Parent file ID, or `home`.
    pub parent_id: String,
    /// Client-maintained path.
    pub path: String,
    /// Type tag.
    pub file_type: String,
    /// Creation time.
    pub created_at: DateTime<Utc>,
    /// Last modification time.
    pub updated_at: DateTime<Utc>,
}

impl From<FileEntry> for FileResponse {
    fn from(entry: FileEntry) -> Self {
        Self {
            id: entry.id,
            name: entry.name,
            parent_id: entry.parent_id,
            path: entry.path,
            file_type: entry.file_type,
            created_at: entry.created_at,
            updated_at: entry.updated_at,
        }
    }
}

/// Metadata of the implicit root. Serializes as `{}`.
#[derive(Debug, Clone, Serialize)]
pub struct RootInfo {}

/// The `fileInfo` member of a listing.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum FileInfoResponse {
    Entry(FileResponse),
    Root(RootInfo),
}

/// Folder listing response.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FileListResponse {
    /// The listed parent: `{}` for `home`, a file record, or `null`.
    #[schema(value_type = Option<Object>)]
    pub file_info: Option<FileInfoResponse>,
    /// Entries on this page.
    pub results: Vec<FileResponse>,
    /// Current page (1-indexed).
    pub page: u32,
    /// Page size.
    pub limit: u32,
    /// Number of pages.
    pub total_pages: u64,
    /// Number of matching entries across all pages.
    pub total_results: u64,
}

impl From<FileListing> for FileListResponse {
    fn from(listing: FileListing) -> Self {
        let file_info = match listing.file_info {
            ParentInfo::Root => Some(FileInfoResponse::Root(RootInfo {})),
            ParentInfo::Entry(entry) => Some(FileInfoResponse::Entry(entry.into())),
            ParentInfo::Missing => None,
        };

        Self {
            file_info,
            results: listing.page.results.into_iter().map(Into::into).collect(),
            page: listing.page.page,
            limit: listing.page.limit,
            total_pages: listing.page.total_pages,
            total_results: listing.page.total_results,
        }
    }
}
