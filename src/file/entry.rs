//! File entry types and the partial-update merge.

use chrono::{DateTime, Utc};

use crate::{FileTreeError, Result};

/// A file metadata entry.
///
/// Entries form a tree through `parent_id`, which holds either another
/// entry's `id` or [`HOME_PARENT_ID`](super::HOME_PARENT_ID).
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct FileEntry {
    /// Unique entry ID (UUID v4, hyphenated).
    pub id: String,
    /// Display name.
    pub name: String,
    /// ID of the parent entry, or `"home"` for top-level entries.
    pub parent_id: String,
    /// Materialized path string.
    pub path: String,
    /// Free-form type tag ("folder", "pdf", ...).
    pub file_type: String,
    /// When the entry was created.
    pub created_at: DateTime<Utc>,
    /// When the entry was last saved.
    pub updated_at: DateTime<Utc>,
}

/// Validated data for creating a new entry.
///
/// Every field is trimmed and guaranteed non-empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewFile {
    name: String,
    parent_id: String,
    path: String,
    file_type: String,
}

impl NewFile {
    /// Create a NewFile, trimming every field.
    ///
    /// Fails with a validation error naming the first missing field.
    pub fn new(
        name: impl AsRef<str>,
        parent_id: impl AsRef<str>,
        path: impl AsRef<str>,
        file_type: impl AsRef<str>,
    ) -> Result<Self> {
        Ok(Self {
            name: required_field("name", name.as_ref())?,
            parent_id: required_field("parentId", parent_id.as_ref())?,
            path: required_field("path", path.as_ref())?,
            file_type: required_field("fileType", file_type.as_ref())?,
        })
    }

    /// Create a NewFile from optional parts, as received from a client.
    pub fn from_parts(
        name: Option<&str>,
        parent_id: Option<&str>,
        path: Option<&str>,
        file_type: Option<&str>,
    ) -> Result<Self> {
        Self::new(
            name.unwrap_or_default(),
            parent_id.unwrap_or_default(),
            path.unwrap_or_default(),
            file_type.unwrap_or_default(),
        )
    }

    /// Display name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Parent entry ID or `"home"`.
    pub fn parent_id(&self) -> &str {
        &self.parent_id
    }

    /// Materialized path.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Type tag.
    pub fn file_type(&self) -> &str {
        &self.file_type
    }
}

/// Partial update for an entry. Only `Some` fields are applied.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilePatch {
    /// New display name.
    pub name: Option<String>,
    /// New parent entry ID.
    pub parent_id: Option<String>,
    /// New materialized path.
    pub path: Option<String>,
    /// New type tag.
    pub file_type: Option<String>,
}

impl FilePatch {
    /// Create an empty patch.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the name.
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Set the parent ID.
    pub fn parent_id(mut self, parent_id: impl Into<String>) -> Self {
        self.parent_id = Some(parent_id.into());
        self
    }

    /// Set the path.
    pub fn path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Set the type tag.
    pub fn file_type(mut self, file_type: impl Into<String>) -> Self {
        self.file_type = Some(file_type.into());
        self
    }

    /// Check if any fields are set.
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.parent_id.is_none()
            && self.path.is_none()
            && self.file_type.is_none()
    }
}

/// Merge a patch onto a loaded entry.
///
/// Supplied fields are trimmed and must stay non-empty; everything else,
/// including `id` and the timestamps, is carried over unchanged.
pub fn apply_patch(mut entry: FileEntry, patch: &FilePatch) -> Result<FileEntry> {
    if let Some(ref name) = patch.name {
        entry.name = required_field("name", name)?;
    }
    if let Some(ref parent_id) = patch.parent_id {
        entry.parent_id = required_field("parentId", parent_id)?;
    }
    if let Some(ref path) = patch.path {
        entry.path = required_field("path", path)?;
    }
    if let Some(ref file_type) = patch.file_type {
        entry.file_type = required_field("fileType", file_type)?;
    }
    Ok(entry)
}

fn required_field(field: &str, value: &str) -> Result<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(FileTreeError::Validation(format!("\"{field}\" is required")));
    }
    Ok(trimmed.to_string())
}
