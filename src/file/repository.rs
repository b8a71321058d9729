//! Storage access for file entries.

use axum::async_trait;
use chrono::{DateTime, SecondsFormat, Utc};
use sqlx::{QueryBuilder, Sqlite, SqlitePool};
use tracing::debug;
use uuid::Uuid;

use super::entry::{apply_patch, FileEntry, FilePatch, NewFile};
use super::query::{FileFilter, FilePage, QueryOptions};
use crate::{FileTreeError, Result};

const FILE_COLUMNS: &str = "id, name, parent_id, path, file_type, created_at, updated_at";

/// Storage operations for file entries.
///
/// Implementations give single-record atomicity only; nothing here spans
/// more than one record.
#[async_trait]
pub trait FileStore: Send + Sync {
    /// Persist a new entry, assigning its ID and timestamps.
    async fn create(&self, new_file: &NewFile) -> Result<FileEntry>;

    /// Get an entry by ID.
    ///
    /// An ID that is not a well-formed identifier is reported as absent.
    async fn find_by_id(&self, id: &str) -> Result<Option<FileEntry>>;

    /// Persist a modified entry and bump its `updated_at`.
    async fn save(&self, entry: &FileEntry) -> Result<FileEntry>;

    /// Delete an entry by ID. Returns true if a row was removed.
    async fn delete(&self, id: &str) -> Result<bool>;

    /// List entries matching `filter`, one page at a time.
    async fn paginate(&self, filter: &FileFilter, options: &QueryOptions) -> Result<FilePage>;

    /// Load an entry, merge `patch` onto it and save it.
    ///
    /// An empty patch writes nothing and returns the entry unchanged.
    async fn update_by_id(&self, id: &str, patch: &FilePatch) -> Result<FileEntry> {
        let entry = self.find_by_id(id).await?.ok_or_else(file_not_found)?;
        if patch.is_empty() {
            return Ok(entry);
        }
        let entry = apply_patch(entry, patch)?;
        self.save(&entry).await
    }

    /// Load an entry and delete it, returning the pre-delete snapshot.
    async fn delete_by_id(&self, id: &str) -> Result<FileEntry> {
        let entry = self.find_by_id(id).await?.ok_or_else(file_not_found)?;
        if !self.delete(&entry.id).await? {
            return Err(file_not_found());
        }
        Ok(entry)
    }
}

/// The error reported when an entry does not exist.
pub fn file_not_found() -> FileTreeError {
    FileTreeError::NotFound("File".to_string())
}

/// SQLite-backed [`FileStore`].
#[derive(Debug, Clone)]
pub struct SqliteFileStore {
    pool: SqlitePool,
}

impl SqliteFileStore {
    /// Create a store on top of the given pool.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Normalize a client-supplied ID to its stored form.
    fn normalize_id(id: &str) -> Option<String> {
        Uuid::parse_str(id.trim()).ok().map(|uuid| uuid.to_string())
    }

    fn push_filter<'a>(query: &mut QueryBuilder<'a, Sqlite>, filter: &'a FileFilter) {
        let mut separator = " WHERE ";
        if let Some(ref name) = filter.name {
            query.push(separator).push("name = ").push_bind(name.as_str());
            separator = " AND ";
        }
        if let Some(ref parent_id) = filter.parent_id {
            query
                .push(separator)
                .push("parent_id = ")
                .push_bind(parent_ref(parent_id));
        }
    }
}

/// Stored form of a parent reference.
///
/// References that parse as IDs are stored the way IDs are, so a parent
/// written in any letter case matches the entry `find_by_id` resolves.
/// Anything else (`home`, dangling free text) is kept as given.
fn parent_ref(parent_id: &str) -> String {
    SqliteFileStore::normalize_id(parent_id).unwrap_or_else(|| parent_id.to_string())
}

/// Stored timestamp form: fixed-width RFC3339 so text order is time order.
fn timestamp(dt: &DateTime<Utc>) -> String {
    dt.to_rfc3339_opts(SecondsFormat::Micros, true)
}

#[async_trait]
impl FileStore for SqliteFileStore {
    async fn create(&self, new_file: &NewFile) -> Result<FileEntry> {
        let id = Uuid::new_v4().to_string();
        let now = timestamp(&Utc::now());

        let entry = sqlx::query_as::<_, FileEntry>(&format!(
            "INSERT INTO files (id, name, parent_id, path, file_type, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?, ?, ?)
             RETURNING {FILE_COLUMNS}"
        ))
        .bind(&id)
        .bind(new_file.name())
        .bind(parent_ref(new_file.parent_id()))
        .bind(new_file.path())
        .bind(new_file.file_type())
        .bind(&now)
        .bind(&now)
        .fetch_one(&self.pool)
        .await?;

        Ok(entry)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<FileEntry>> {
        let Some(id) = Self::normalize_id(id) else {
            debug!(id, "Malformed file id, treating as absent");
            return Ok(None);
        };

        let entry = sqlx::query_as::<_, FileEntry>(&format!(
            "SELECT {FILE_COLUMNS} FROM files WHERE id = ?"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(entry)
    }

    async fn save(&self, entry: &FileEntry) -> Result<FileEntry> {
        let now = timestamp(&Utc::now());

        sqlx::query_as::<_, FileEntry>(&format!(
            "UPDATE files SET name = ?, parent_id = ?, path = ?, file_type = ?, updated_at = ?
             WHERE id = ?
             RETURNING {FILE_COLUMNS}"
        ))
        .bind(&entry.name)
        .bind(parent_ref(&entry.parent_id))
        .bind(&entry.path)
        .bind(&entry.file_type)
        .bind(&now)
        .bind(&entry.id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(file_not_found)
    }

    async fn delete(&self, id: &str) -> Result<bool> {
        let Some(id) = Self::normalize_id(id) else {
            return Ok(false);
        };

        let result = sqlx::query("DELETE FROM files WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn paginate(&self, filter: &FileFilter, options: &QueryOptions) -> Result<FilePage> {
        let mut count_query: QueryBuilder<Sqlite> = QueryBuilder::new("SELECT COUNT(*) FROM files");
        Self::push_filter(&mut count_query, filter);
        let (total,): (i64,) = count_query.build_query_as().fetch_one(&self.pool).await?;

        let mut query: QueryBuilder<Sqlite> =
            QueryBuilder::new(format!("SELECT {FILE_COLUMNS} FROM files"));
        Self::push_filter(&mut query, filter);
        query.push(" ORDER BY ");
        query.push(options.order_by_sql());
        query.push(" LIMIT ");
        query.push_bind(i64::from(options.limit));
        query.push(" OFFSET ");
        query.push_bind(options.offset());

        let results = query
            .build_query_as::<FileEntry>()
            .fetch_all(&self.pool)
            .await?;

        debug!(
            total,
            returned = results.len(),
            page = options.page,
            limit = options.limit,
            "Paginated file query"
        );

        Ok(FilePage::new(results, options, total.max(0) as u64))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::file::query::parse_sort_by;
    use crate::Database;

    async fn setup_store() -> (Database, SqliteFileStore) {
        let db = Database::open_in_memory().await.unwrap();
        let store = SqliteFileStore::new(db.pool().clone());
        (db, store)
    }

    fn new_file(name: &str, parent_id: &str) -> NewFile {
        NewFile::new(name, parent_id, format!("home/{name}"), "folder").unwrap()
    }

    #[tokio::test]
    async fn test_create_assigns_id_and_timestamps() {
        let (_db, store) = setup_store().await;

        let entry = store.create(&new_file("Reports", "home")).await.unwrap();

        assert!(Uuid::parse_str(&entry.id).is_ok());
        assert_eq!(entry.name, "Reports");
        assert_eq!(entry.parent_id, "home");
        assert_eq!(entry.path, "home/Reports");
        assert_eq!(entry.file_type, "folder");
        assert_eq!(entry.created_at, entry.updated_at);
    }

    #[tokio::test]
    async fn test_create_then_find_round_trips() {
        let (_db, store) = setup_store().await;

        let created = store.create(&new_file("Reports", "home")).await.unwrap();
        let found = store.find_by_id(&created.id).await.unwrap();

        assert_eq!(found, Some(created));
    }

    #[tokio::test]
    async fn test_find_by_id_not_found() {
        let (_db, store) = setup_store().await;

        let found = store.find_by_id(&Uuid::new_v4().to_string()).await.unwrap();
        assert!(found.is_none());
    }

    #[tokio::test]
    async fn test_find_by_id_malformed() {
        let (_db, store) = setup_store().await;

        assert!(store.find_by_id("not-an-id").await.unwrap().is_none());
        assert!(store.find_by_id("").await.unwrap().is_none());
        assert!(store.find_by_id("home").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_find_by_id_accepts_uppercase() {
        let (_db, store) = setup_store().await;

        let created = store.create(&new_file("Reports", "home")).await.unwrap();
        let found = store
            .find_by_id(&created.id.to_uppercase())
            .await
            .unwrap();

        assert_eq!(found.map(|e| e.id), Some(created.id));
    }

    #[tokio::test]
    async fn test_update_by_id_changes_only_patched_fields() {
        let (_db, store) = setup_store().await;

        let created = store.create(&new_file("Reports", "home")).await.unwrap();
        let updated = store
            .update_by_id(&created.id, &FilePatch::new().name("X"))
            .await
            .unwrap();

        assert_eq!(updated.id, created.id);
        assert_eq!(updated.name, "X");
        assert_eq!(updated.parent_id, created.parent_id);
        assert_eq!(updated.path, created.path);
        assert_eq!(updated.file_type, created.file_type);
        assert_eq!(updated.created_at, created.created_at);
        assert!(updated.updated_at >= created.updated_at);

        let reloaded = store.find_by_id(&created.id).await.unwrap().unwrap();
        assert_eq!(reloaded, updated);
    }

    #[tokio::test]
    async fn test_update_by_id_empty_patch_keeps_timestamps() {
        let (_db, store) = setup_store().await;

        let created = store.create(&new_file("Reports", "home")).await.unwrap();
        let unchanged = store
            .update_by_id(&created.id, &FilePatch::new())
            .await
            .unwrap();
        assert_eq!(unchanged, created);

        let result = store
            .update_by_id(&Uuid::new_v4().to_string(), &FilePatch::new())
            .await;
        assert!(matches!(result, Err(FileTreeError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_update_by_id_not_found() {
        let (_db, store) = setup_store().await;

        let result = store
            .update_by_id(&Uuid::new_v4().to_string(), &FilePatch::new().name("X"))
            .await;
        assert!(matches!(result, Err(FileTreeError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_update_by_id_blank_value_leaves_record() {
        let (_db, store) = setup_store().await;

        let created = store.create(&new_file("Reports", "home")).await.unwrap();
        let result = store
            .update_by_id(&created.id, &FilePatch::new().name("  "))
            .await;

        assert!(matches!(result, Err(FileTreeError::Validation(_))));
        let reloaded = store.find_by_id(&created.id).await.unwrap().unwrap();
        assert_eq!(reloaded.name, "Reports");
    }

    #[tokio::test]
    async fn test_save_missing_entry() {
        let (_db, store) = setup_store().await;

        let created = store.create(&new_file("Reports", "home")).await.unwrap();
        assert!(store.delete(&created.id).await.unwrap());

        let result = store.save(&created).await;
        assert!(matches!(result, Err(FileTreeError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_delete_by_id_returns_snapshot() {
        let (_db, store) = setup_store().await;

        let created = store.create(&new_file("Reports", "home")).await.unwrap();
        let deleted = store.delete_by_id(&created.id).await.unwrap();

        assert_eq!(deleted, created);
        assert!(store.find_by_id(&created.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_delete_by_id_twice() {
        let (_db, store) = setup_store().await;

        let created = store.create(&new_file("Reports", "home")).await.unwrap();
        store.delete_by_id(&created.id).await.unwrap();

        let result = store.delete_by_id(&created.id).await;
        assert!(matches!(result, Err(FileTreeError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_delete_unknown_and_malformed() {
        let (_db, store) = setup_store().await;

        assert!(!store.delete(&Uuid::new_v4().to_string()).await.unwrap());
        assert!(!store.delete("garbage").await.unwrap());
        assert!(matches!(
            store.delete_by_id("garbage").await,
            Err(FileTreeError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_delete_does_not_cascade() {
        let (_db, store) = setup_store().await;

        let parent = store.create(&new_file("Parent", "home")).await.unwrap();
        let child = store.create(&new_file("Child", &parent.id)).await.unwrap();

        store.delete_by_id(&parent.id).await.unwrap();

        let orphan = store.find_by_id(&child.id).await.unwrap().unwrap();
        assert_eq!(orphan.parent_id, parent.id);
    }

    #[tokio::test]
    async fn test_paginate_two_pages() {
        let (_db, store) = setup_store().await;

        for i in 0..15 {
            store
                .create(&new_file(&format!("file-{i:02}"), "home"))
                .await
                .unwrap();
        }

        let filter = FileFilter::children_of("home");

        let first = store
            .paginate(&filter, &QueryOptions::default())
            .await
            .unwrap();
        assert_eq!(first.results.len(), 10);
        assert_eq!(first.page, 1);
        assert_eq!(first.limit, 10);
        assert_eq!(first.total_pages, 2);
        assert_eq!(first.total_results, 15);

        let second = store
            .paginate(&filter, &QueryOptions::default().with_page(2))
            .await
            .unwrap();
        assert_eq!(second.results.len(), 5);
        assert_eq!(second.total_pages, 2);

        // Insertion order by default, no overlap between pages
        let names: Vec<_> = first
            .results
            .iter()
            .chain(second.results.iter())
            .map(|e| e.name.clone())
            .collect();
        let expected: Vec<_> = (0..15).map(|i| format!("file-{i:02}")).collect();
        assert_eq!(names, expected);
    }

    #[tokio::test]
    async fn test_paginate_page_past_end() {
        let (_db, store) = setup_store().await;

        for i in 0..3 {
            store.create(&new_file(&format!("f{i}"), "home")).await.unwrap();
        }

        let page = store
            .paginate(
                &FileFilter::children_of("home"),
                &QueryOptions::default().with_page(5),
            )
            .await
            .unwrap();

        assert!(page.results.is_empty());
        assert_eq!(page.page, 5);
        assert_eq!(page.total_pages, 1);
        assert_eq!(page.total_results, 3);
    }

    #[tokio::test]
    async fn test_paginate_filters_exact_match() {
        let (_db, store) = setup_store().await;

        let docs = store.create(&new_file("Docs", "home")).await.unwrap();
        store.create(&new_file("a.txt", &docs.id)).await.unwrap();
        store.create(&new_file("b.txt", &docs.id)).await.unwrap();
        store.create(&new_file("a.txt", "home")).await.unwrap();

        let children = store
            .paginate(&FileFilter::children_of(docs.id.clone()), &QueryOptions::default())
            .await
            .unwrap();
        assert_eq!(children.total_results, 2);
        assert!(children.results.iter().all(|e| e.parent_id == docs.id));

        let named = store
            .paginate(&FileFilter::new().with_name("a.txt"), &QueryOptions::default())
            .await
            .unwrap();
        assert_eq!(named.total_results, 2);

        let both = store
            .paginate(
                &FileFilter::children_of("home").with_name("a.txt"),
                &QueryOptions::default(),
            )
            .await
            .unwrap();
        assert_eq!(both.total_results, 1);

        let all = store
            .paginate(&FileFilter::new(), &QueryOptions::default())
            .await
            .unwrap();
        assert_eq!(all.total_results, 4);
    }

    #[tokio::test]
    async fn test_paginate_parent_id_in_any_case() {
        let (_db, store) = setup_store().await;

        let docs = store.create(&new_file("Docs", "home")).await.unwrap();
        store.create(&new_file("a.txt", &docs.id)).await.unwrap();
        store
            .create(&new_file("b.txt", &docs.id.to_uppercase()))
            .await
            .unwrap();

        let upper = docs.id.to_uppercase();
        assert_eq!(
            store.find_by_id(&upper).await.unwrap().map(|e| e.id),
            Some(docs.id.clone())
        );

        let children = store
            .paginate(&FileFilter::children_of(upper), &QueryOptions::default())
            .await
            .unwrap();
        assert_eq!(children.total_results, 2);
        assert!(children.results.iter().all(|e| e.parent_id == docs.id));
    }

    #[tokio::test]
    async fn test_save_stores_parent_id_canonically() {
        let (_db, store) = setup_store().await;

        let docs = store.create(&new_file("Docs", "home")).await.unwrap();
        let file = store.create(&new_file("a.txt", "home")).await.unwrap();

        let moved = store
            .update_by_id(&file.id, &FilePatch::new().parent_id(docs.id.to_uppercase()))
            .await
            .unwrap();
        assert_eq!(moved.parent_id, docs.id);

        let children = store
            .paginate(&FileFilter::children_of(docs.id.clone()), &QueryOptions::default())
            .await
            .unwrap();
        assert_eq!(children.total_results, 1);
    }

    #[tokio::test]
    async fn test_paginate_sorted() {
        let (_db, store) = setup_store().await;

        for name in ["beta", "alpha", "gamma"] {
            store.create(&new_file(name, "home")).await.unwrap();
        }

        let options = QueryOptions::default().with_sort(parse_sort_by("name:desc").unwrap());
        let page = store
            .paginate(&FileFilter::children_of("home"), &options)
            .await
            .unwrap();

        let names: Vec<_> = page.results.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["gamma", "beta", "alpha"]);
    }

    #[tokio::test]
    async fn test_paginate_empty() {
        let (_db, store) = setup_store().await;

        let page = store
            .paginate(&FileFilter::children_of("home"), &QueryOptions::default())
            .await
            .unwrap();

        assert!(page.results.is_empty());
        assert_eq!(page.total_pages, 0);
        assert_eq!(page.total_results, 0);
    }
}
