//! filetree - file metadata tree service
//!
//! Stores file and folder metadata linked into a tree by parent ID and
//! exposes it over a REST API with paginated folder listings.

pub mod config;
pub mod db;
pub mod error;
pub mod file;
pub mod logging;
pub mod web;

pub use config::Config;
pub use db::Database;
pub use error::{FileTreeError, Result};
pub use file::{
    FileEntry, FileFilter, FileListing, FilePatch, FileService, FileStore, NewFile, ParentInfo,
    QueryOptions, SqliteFileStore, HOME_PARENT_ID,
};
pub use web::WebServer;
