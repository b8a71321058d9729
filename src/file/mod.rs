//! File metadata module for filetree.
//!
//! This module provides the file tree domain:
//! - File entries linked into a tree by `parent_id`
//! - Exact-match filters, sorting and offset pagination
//! - A storage trait with a SQLite implementation
//! - The service layer, including the folder listing

mod entry;
mod query;
mod repository;
mod service;

pub use entry::{apply_patch, FileEntry, FilePatch, NewFile};
pub use query::{
    parse_sort_by, total_pages, FileFilter, FilePage, PageLimits, QueryOptions, SortDirection,
    SortField, SortKey,
};
pub use repository::{file_not_found, FileStore, SqliteFileStore};
pub use service::{FileListing, FileService, ParentInfo};

/// Parent ID of top-level entries; the implicit root is never stored.
pub const HOME_PARENT_ID: &str = "home";

/// Default page size for listings.
pub const DEFAULT_PAGE_LIMIT: u32 = 10;

/// Default upper bound for the page size.
pub const MAX_PAGE_LIMIT: u32 = 100;

/// First page number (pages are 1-indexed).
pub const DEFAULT_PAGE: u32 = 1;
