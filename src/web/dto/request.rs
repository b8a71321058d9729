//! Request DTOs for Web API.

use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use super::validation::not_empty_trimmed;
use crate::file::{FileFilter, FilePatch, NewFile, PageLimits, QueryOptions};
use crate::Result;

/// Create file request.
///
/// Missing fields deserialize as empty strings so they surface as
/// field-level validation errors instead of a JSON rejection.
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateFileRequest {
    /// Display name.
    #[serde(default)]
    #[validate(custom(function = "not_empty_trimmed"))]
    pub name: String,
    /// Parent file ID, or `home` for a top-level entry.
    #[serde(default)]
    #[validate(custom(function = "not_empty_trimmed"))]
    pub parent_id: String,
    /// Client-maintained path string.
    #[serde(default)]
    #[validate(custom(function = "not_empty_trimmed"))]
    pub path: String,
    /// Free-form type tag (e.g. `folder`, `file`).
    #[serde(default)]
    #[validate(custom(function = "not_empty_trimmed"))]
    pub file_type: String,
}

impl CreateFileRequest {
    /// Convert into a domain [`NewFile`].
    pub fn into_new_file(self) -> Result<NewFile> {
        NewFile::new(self.name, self.parent_id, self.path, self.file_type)
    }
}

/// Partial update request. Absent fields keep their stored value.
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateFileRequest {
    /// New display name.
    #[validate(custom(function = "not_empty_trimmed"))]
    pub name: Option<String>,
    /// New parent ID.
    #[validate(custom(function = "not_empty_trimmed"))]
    pub parent_id: Option<String>,
    /// New path.
    #[validate(custom(function = "not_empty_trimmed"))]
    pub path: Option<String>,
    /// New type tag.
    #[validate(custom(function = "not_empty_trimmed"))]
    pub file_type: Option<String>,
}

impl UpdateFileRequest {
    /// Convert into a domain [`FilePatch`].
    pub fn into_patch(self) -> FilePatch {
        FilePatch {
            name: self.name,
            parent_id: self.parent_id,
            path: self.path,
            file_type: self.file_type,
        }
    }
}

/// Query parameters for `GET /files`.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct ListFilesQuery {
    /// Exact name match.
    pub name: Option<String>,
    /// Parent to list; `home` for the root.
    pub parent_id: Option<String>,
    /// Sort criteria, e.g. `name:desc,createdAt`.
    pub sort_by: Option<String>,
    /// Page size.
    pub limit: Option<i64>,
    /// 1-indexed page number.
    pub page: Option<i64>,
}

impl ListFilesQuery {
    /// Build the exact-match filter.
    pub fn filter(&self) -> FileFilter {
        FileFilter {
            name: self.name.clone(),
            parent_id: self.parent_id.clone(),
        }
    }

    /// Build sort and pagination options, rejecting invalid values.
    pub fn options(&self, limits: &PageLimits) -> Result<QueryOptions> {
        QueryOptions::parse(self.sort_by.as_deref(), self.limit, self.page, limits)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::FileTreeError;

    #[test]
    fn test_create_request_missing_fields_fail_validation() {
        let req: CreateFileRequest =
            serde_json::from_str(r#"{"name":"Docs","parentId":"home"}"#).unwrap();

        let errors = req.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("path"));
        assert!(fields.contains_key("file_type"));
        assert!(!fields.contains_key("name"));
    }

    #[test]
    fn test_create_request_into_new_file_trims() {
        let req: CreateFileRequest = serde_json::from_str(
            r#"{"name":" Docs ","parentId":"home","path":"home/Docs","fileType":"folder"}"#,
        )
        .unwrap();
        assert!(req.validate().is_ok());

        let new_file = req.into_new_file().unwrap();
        assert_eq!(new_file.name(), "Docs");
        assert_eq!(new_file.parent_id(), "home");
    }

    #[test]
    fn test_update_request_rejects_blank_values() {
        let req: UpdateFileRequest = serde_json::from_str(r#"{"name":"  "}"#).unwrap();
        assert!(req.validate().is_err());

        let req: UpdateFileRequest = serde_json::from_str(r#"{"fileType":"archive"}"#).unwrap();
        assert!(req.validate().is_ok());
        let patch = req.into_patch();
        assert_eq!(patch.file_type.as_deref(), Some("archive"));
        assert!(patch.name.is_none());
    }

    #[test]
    fn test_list_query_defaults() {
        let query = ListFilesQuery::default();
        let options = query.options(&PageLimits::default()).unwrap();

        assert_eq!(options.limit, 10);
        assert_eq!(options.page, 1);
        assert!(query.filter().parent_id.is_none());
    }

    #[test]
    fn test_list_query_invalid_limit() {
        let query = ListFilesQuery {
            limit: Some(0),
            ..Default::default()
        };
        let result = query.options(&PageLimits::default());
        assert!(matches!(result, Err(FileTreeError::Validation(_))));
    }
}
