//! Test helpers for Web API integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use axum_test::TestServer;
use filetree::file::PageLimits;
use filetree::web::handlers::AppState;
use filetree::web::router::create_router;
use filetree::Database;
use serde_json::{json, Value};

/// Create a test server with an in-memory database.
pub async fn create_test_server() -> (TestServer, Database) {
    create_test_server_with_limits(PageLimits::default()).await
}

/// Create a test server with custom listing limits.
pub async fn create_test_server_with_limits(limits: PageLimits) -> (TestServer, Database) {
    let db = Database::open_in_memory()
        .await
        .expect("Failed to create test database");

    let app_state = Arc::new(AppState::from_database(&db, limits));
    let router = create_router(app_state, &[]);

    let server = TestServer::new(router).expect("Failed to create test server");

    (server, db)
}

/// Create a file through the API and return the response body.
pub async fn create_file(server: &TestServer, name: &str, parent_id: &str, file_type: &str) -> Value {
    let response = server
        .post("/files")
        .json(&json!({
            "name": name,
            "parentId": parent_id,
            "path": format!("home/{}", name),
            "fileType": file_type
        }))
        .await;

    response.assert_status(axum::http::StatusCode::CREATED);
    response.json::<Value>()
}

/// Get the ID from a file record.
pub fn file_id(file: &Value) -> String {
    file["id"].as_str().unwrap().to_string()
}
