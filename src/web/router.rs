//! Router configuration for Web API.

use axum::{routing::get, Router};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use super::dto::{CreateFileRequest, FileListResponse, FileResponse, UpdateFileRequest};
use super::error::{ErrorBody, ErrorCode, ErrorDetail};
use super::handlers::{self, AppState};
use super::middleware::create_cors_layer;

/// OpenAPI document for the file API.
#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::file::create_file,
        handlers::file::list_files,
        handlers::file::get_file,
        handlers::file::update_file,
        handlers::file::delete_file
    ),
    components(schemas(
        CreateFileRequest,
        UpdateFileRequest,
        FileResponse,
        FileListResponse,
        ErrorBody,
        ErrorDetail,
        ErrorCode
    )),
    tags(
        (name = "files", description = "File metadata tree")
    )
)]
pub struct ApiDoc;

/// Create the main API router.
pub fn create_router(app_state: Arc<AppState>, cors_origins: &[String]) -> Router {
    let file_routes = Router::new()
        .route(
            "/files",
            get(handlers::list_files).post(handlers::create_file),
        )
        .route(
            "/files/:file_id",
            get(handlers::get_file)
                .patch(handlers::update_file)
                .delete(handlers::delete_file),
        );

    file_routes
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(create_cors_layer(cors_origins)),
        )
        .with_state(app_state)
}

/// Create a health check router.
pub fn create_health_router() -> Router {
    Router::new().route("/health", get(health_check))
}

/// Create the Swagger UI router serving the OpenAPI document.
pub fn create_swagger_router() -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}

/// Health check handler.
async fn health_check() -> &'static str {
    "OK"
}
