//! Database schema and migrations for filetree.
//!
//! Migrations are applied sequentially when the database is first opened
//! or upgraded.

/// Database migrations.
///
/// Each migration is a SQL script that will be executed in order.
/// The schema_version table tracks which migrations have been applied.
pub const MIGRATIONS: &[&str] = &[
    // v1: Initial schema - file metadata entries
    r#"
-- File metadata entries, organized as a tree via parent_id.
-- parent_id is either another entry's id or the sentinel 'home'; it is
-- intentionally not a foreign key (dangling parents are allowed).
CREATE TABLE files (
    id          TEXT PRIMARY KEY NOT NULL,   -- UUID v4, hyphenated
    name        TEXT NOT NULL,
    parent_id   TEXT NOT NULL,
    path        TEXT NOT NULL,
    file_type   TEXT NOT NULL,
    created_at  TEXT NOT NULL,               -- RFC3339, UTC, microseconds
    updated_at  TEXT NOT NULL
);

CREATE INDEX idx_files_parent_id ON files(parent_id);
CREATE INDEX idx_files_name ON files(name);
"#,
    // v2: Listing order index for children-of-node queries
    r#"
CREATE INDEX idx_files_parent_created ON files(parent_id, created_at);
"#,
];
