//! Filter, sort and pagination options for file listings.

use std::fmt;
use std::str::FromStr;

use super::entry::FileEntry;
use super::{DEFAULT_PAGE, DEFAULT_PAGE_LIMIT, MAX_PAGE_LIMIT};
use crate::config::ListingConfig;
use crate::{FileTreeError, Result};

/// Exact-match filter for listings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileFilter {
    /// Match entries with exactly this name.
    pub name: Option<String>,
    /// Match entries with exactly this parent ID.
    pub parent_id: Option<String>,
}

impl FileFilter {
    /// Create an empty filter (matches everything).
    pub fn new() -> Self {
        Self::default()
    }

    /// Filter for the direct children of `parent_id`.
    pub fn children_of(parent_id: impl Into<String>) -> Self {
        Self::new().with_parent(parent_id)
    }

    /// Set the name to match.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Set the parent ID to match.
    pub fn with_parent(mut self, parent_id: impl Into<String>) -> Self {
        self.parent_id = Some(parent_id.into());
        self
    }
}

/// A sortable entry field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortField {
    Id,
    Name,
    ParentId,
    Path,
    FileType,
    CreatedAt,
    UpdatedAt,
}

impl SortField {
    /// Column backing this field.
    pub fn column(&self) -> &'static str {
        match self {
            SortField::Id => "id",
            SortField::Name => "name",
            SortField::ParentId => "parent_id",
            SortField::Path => "path",
            SortField::FileType => "file_type",
            SortField::CreatedAt => "created_at",
            SortField::UpdatedAt => "updated_at",
        }
    }

    /// Name of the field as exposed in the API.
    pub fn as_str(&self) -> &'static str {
        match self {
            SortField::Id => "id",
            SortField::Name => "name",
            SortField::ParentId => "parentId",
            SortField::Path => "path",
            SortField::FileType => "fileType",
            SortField::CreatedAt => "createdAt",
            SortField::UpdatedAt => "updatedAt",
        }
    }
}

impl FromStr for SortField {
    type Err = FileTreeError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "id" | "_id" => Ok(SortField::Id),
            "name" => Ok(SortField::Name),
            "parentId" => Ok(SortField::ParentId),
            "path" => Ok(SortField::Path),
            "fileType" => Ok(SortField::FileType),
            "createdAt" => Ok(SortField::CreatedAt),
            "updatedAt" => Ok(SortField::UpdatedAt),
            _ => Err(FileTreeError::Validation(format!(
                "cannot sort by unknown field \"{s}\""
            ))),
        }
    }
}

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    /// SQL keyword for this direction.
    pub fn as_sql(&self) -> &'static str {
        match self {
            SortDirection::Asc => "ASC",
            SortDirection::Desc => "DESC",
        }
    }
}

impl FromStr for SortDirection {
    type Err = FileTreeError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "" | "asc" => Ok(SortDirection::Asc),
            "desc" => Ok(SortDirection::Desc),
            _ => Err(FileTreeError::Validation(format!(
                "sort direction must be \"asc\" or \"desc\", got \"{s}\""
            ))),
        }
    }
}

/// One `field:direction` sort criterion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortKey {
    pub field: SortField,
    pub direction: SortDirection,
}

impl SortKey {
    /// Create a sort key.
    pub fn new(field: SortField, direction: SortDirection) -> Self {
        Self { field, direction }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let direction = match self.direction {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        };
        write!(f, "{}:{}", self.field.as_str(), direction)
    }
}

/// Parse a `sortBy` value such as `name:asc` or `fileType:desc,name`.
///
/// Empty criteria are skipped; an empty result means the default order.
pub fn parse_sort_by(sort_by: &str) -> Result<Vec<SortKey>> {
    sort_by
        .split(',')
        .map(str::trim)
        .filter(|criterion| !criterion.is_empty())
        .map(|criterion| {
            let (field, direction) = criterion.split_once(':').unwrap_or((criterion, ""));
            Ok(SortKey::new(field.trim().parse()?, direction.trim().parse()?))
        })
        .collect()
}

/// Page size bounds applied to client-supplied options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageLimits {
    /// Page size used when none is requested.
    pub default_limit: u32,
    /// Largest accepted page size.
    pub max_limit: u32,
}

impl Default for PageLimits {
    fn default() -> Self {
        Self {
            default_limit: DEFAULT_PAGE_LIMIT,
            max_limit: MAX_PAGE_LIMIT,
        }
    }
}

impl From<&ListingConfig> for PageLimits {
    fn from(config: &ListingConfig) -> Self {
        Self {
            default_limit: config.default_limit,
            max_limit: config.max_limit,
        }
    }
}

/// Sort and pagination options for a listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryOptions {
    /// Sort criteria, most significant first. Empty means `createdAt` ascending.
    pub sort: Vec<SortKey>,
    /// Page size (at least 1).
    pub limit: u32,
    /// 1-indexed page number.
    pub page: u32,
}

impl Default for QueryOptions {
    fn default() -> Self {
        Self {
            sort: Vec::new(),
            limit: DEFAULT_PAGE_LIMIT,
            page: DEFAULT_PAGE,
        }
    }
}

impl QueryOptions {
    /// Build options from raw client values.
    ///
    /// Missing values take their defaults. A `limit` or `page` below 1, a
    /// `limit` above `limits.max_limit` and malformed `sort_by` criteria
    /// are rejected.
    pub fn parse(
        sort_by: Option<&str>,
        limit: Option<i64>,
        page: Option<i64>,
        limits: &PageLimits,
    ) -> Result<Self> {
        let sort = match sort_by {
            Some(sort_by) => parse_sort_by(sort_by)?,
            None => Vec::new(),
        };

        let limit = match limit {
            None => limits.default_limit,
            Some(limit) if limit < 1 => {
                return Err(FileTreeError::Validation(
                    "limit must be at least 1".to_string(),
                ))
            }
            Some(limit) if limit > i64::from(limits.max_limit) => {
                return Err(FileTreeError::Validation(format!(
                    "limit must not exceed {}",
                    limits.max_limit
                )))
            }
            Some(limit) => limit as u32,
        };

        let page = match page {
            None => DEFAULT_PAGE,
            Some(page) if page < 1 => {
                return Err(FileTreeError::Validation(
                    "page must be at least 1".to_string(),
                ))
            }
            Some(page) => u32::try_from(page).map_err(|_| {
                FileTreeError::Validation(format!("page must not exceed {}", u32::MAX))
            })?,
        };

        Ok(Self { sort, limit, page })
    }

    /// Set the sort criteria.
    pub fn with_sort(mut self, sort: Vec<SortKey>) -> Self {
        self.sort = sort;
        self
    }

    /// Set the page size.
    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = limit.max(1);
        self
    }

    /// Set the page number.
    pub fn with_page(mut self, page: u32) -> Self {
        self.page = page.max(1);
        self
    }

    /// Number of rows to skip.
    pub fn offset(&self) -> i64 {
        (i64::from(self.page) - 1) * i64::from(self.limit)
    }

    /// `ORDER BY` body for these options.
    ///
    /// Columns come from [`SortField::column`], never from client input.
    /// Insertion order (`rowid`) is always the final tiebreaker.
    pub fn order_by_sql(&self) -> String {
        let mut terms: Vec<String> = if self.sort.is_empty() {
            vec!["created_at ASC".to_string()]
        } else {
            self.sort
                .iter()
                .map(|key| format!("{} {}", key.field.column(), key.direction.as_sql()))
                .collect()
        };
        terms.push("rowid ASC".to_string());
        terms.join(", ")
    }
}

/// One page of a listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilePage {
    /// Entries on this page.
    pub results: Vec<FileEntry>,
    /// Requested page number.
    pub page: u32,
    /// Requested page size.
    pub limit: u32,
    /// Number of pages needed for all matching entries.
    pub total_pages: u64,
    /// Number of matching entries across all pages.
    pub total_results: u64,
}

impl FilePage {
    /// Assemble a page from its results and the unpaginated match count.
    pub fn new(results: Vec<FileEntry>, options: &QueryOptions, total_results: u64) -> Self {
        Self {
            results,
            page: options.page,
            limit: options.limit,
            total_pages: total_pages(total_results, options.limit),
            total_results,
        }
    }
}

/// `ceil(total_results / limit)`.
pub fn total_pages(total_results: u64, limit: u32) -> u64 {
    let limit = u64::from(limit.max(1));
    total_results.div_ceil(limit)
}
