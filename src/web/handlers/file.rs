//! File handlers for Web API.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;

use crate::file::file_not_found;
use crate::web::dto::{
    ApiQuery, CreateFileRequest, FileListResponse, FileResponse, ListFilesQuery, UpdateFileRequest,
    ValidatedJson,
};
use crate::web::error::{ApiError, ErrorBody};
use crate::web::handlers::AppState;

/// POST /files - Create a file entry.
#[utoipa::path(
    post,
    path = "/files",
    tag = "files",
    request_body = CreateFileRequest,
    responses(
        (status = 201, description = "File created", body = FileResponse),
        (status = 400, description = "Missing or empty fields", body = ErrorBody)
    )
)]
pub async fn create_file(
    State(state): State<Arc<AppState>>,
    ValidatedJson(req): ValidatedJson<CreateFileRequest>,
) -> Result<(StatusCode, Json<FileResponse>), ApiError> {
    let new_file = req.into_new_file()?;
    let entry = state.files.create_file(&new_file).await?;

    Ok((StatusCode::CREATED, Json(entry.into())))
}

/// GET /files - List entries with the parent's metadata.
#[utoipa::path(
    get,
    path = "/files",
    tag = "files",
    params(ListFilesQuery),
    responses(
        (status = 200, description = "Folder listing", body = FileListResponse),
        (status = 400, description = "Invalid sort or pagination options", body = ErrorBody)
    )
)]
pub async fn list_files(
    State(state): State<Arc<AppState>>,
    ApiQuery(query): ApiQuery<ListFilesQuery>,
) -> Result<Json<FileListResponse>, ApiError> {
    let options = query.options(&state.limits)?;
    let listing = state.files.query_files(&query.filter(), &options).await?;

    Ok(Json(listing.into()))
}

/// GET /files/:file_id - Get a single entry.
#[utoipa::path(
    get,
    path = "/files/{file_id}",
    tag = "files",
    params(
        ("file_id" = String, Path, description = "File ID")
    ),
    responses(
        (status = 200, description = "File details", body = FileResponse),
        (status = 404, description = "File not found", body = ErrorBody)
    )
)]
pub async fn get_file(
    State(state): State<Arc<AppState>>,
    Path(file_id): Path<String>,
) -> Result<Json<FileResponse>, ApiError> {
    let entry = state
        .files
        .get_file_by_id(&file_id)
        .await?
        .ok_or_else(file_not_found)?;

    Ok(Json(entry.into()))
}

/// PATCH /files/:file_id - Partially update an entry.
#[utoipa::path(
    patch,
    path = "/files/{file_id}",
    tag = "files",
    params(
        ("file_id" = String, Path, description = "File ID")
    ),
    request_body = UpdateFileRequest,
    responses(
        (status = 200, description = "File updated", body = FileResponse),
        (status = 400, description = "Empty field values", body = ErrorBody),
        (status = 404, description = "File not found", body = ErrorBody)
    )
)]
pub async fn update_file(
    State(state): State<Arc<AppState>>,
    Path(file_id): Path<String>,
    ValidatedJson(req): ValidatedJson<UpdateFileRequest>,
) -> Result<Json<FileResponse>, ApiError> {
    let entry = state
        .files
        .update_file_by_id(&file_id, &req.into_patch())
        .await?;

    Ok(Json(entry.into()))
}

/// DELETE /files/:file_id - Delete an entry. Children are kept.
#[utoipa::path(
    delete,
    path = "/files/{file_id}",
    tag = "files",
    params(
        ("file_id" = String, Path, description = "File ID")
    ),
    responses(
        (status = 204, description = "File deleted"),
        (status = 404, description = "File not found", body = ErrorBody)
    )
)]
pub async fn delete_file(
    State(state): State<Arc<AppState>>,
    Path(file_id): Path<String>,
) -> Result<StatusCode, ApiError> {
    state.files.delete_file_by_id(&file_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
