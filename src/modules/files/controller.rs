use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use tracing::instrument;
use uuid::Uuid;

use tuitionhub_core::{AppError, ValidatedJson};
use tuitionhub_models::files::{ContentFile, CreateFileDto, FileFilterParams, UpdateFileDto};

use super::service::FileService;
use crate::middleware::auth::AuthUser;
use crate::middleware::role::RequireAdmin;
use crate::modules::auth::controller::ErrorResponse;
use crate::state::AppState;

#[utoipa::path(
    get,
    path = "/api/files",
    params(FileFilterParams),
    responses(
        (status = 200, description = "Files, newest first", body = Vec<ContentFile>),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    tag = "Files",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn get_files(
    State(state): State<AppState>,
    _auth_user: AuthUser,
    Query(filters): Query<FileFilterParams>,
) -> Result<Json<Vec<ContentFile>>, AppError> {
    Ok(Json(FileService::get_files(&state.db, filters).await?))
}

#[utoipa::path(
    get,
    path = "/api/files/{id}",
    params(("id" = Uuid, Path, description = "File ID")),
    responses(
        (status = 200, description = "File details", body = ContentFile),
        (status = 404, description = "File not found", body = ErrorResponse)
    ),
    tag = "Files",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn get_file(
    State(state): State<AppState>,
    _auth_user: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ContentFile>, AppError> {
    Ok(Json(FileService::get_file(&state.db, id).await?))
}

#[utoipa::path(
    post,
    path = "/api/files",
    request_body = CreateFileDto,
    responses(
        (status = 201, description = "File created", body = ContentFile),
        (status = 400, description = "Duplicate name or unknown file type", body = ErrorResponse),
        (status = 403, description = "Admin only", body = ErrorResponse),
        (status = 404, description = "Chapter not found", body = ErrorResponse),
        (status = 422, description = "Invalid URL", body = ErrorResponse)
    ),
    tag = "Files",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn create_file(
    State(state): State<AppState>,
    _admin: RequireAdmin,
    ValidatedJson(dto): ValidatedJson<CreateFileDto>,
) -> Result<(StatusCode, Json<ContentFile>), AppError> {
    let file = FileService::create_file(&state.db, dto).await?;
    Ok((StatusCode::CREATED, Json(file)))
}

#[utoipa::path(
    put,
    path = "/api/files/{id}",
    params(("id" = Uuid, Path, description = "File ID")),
    request_body = UpdateFileDto,
    responses(
        (status = 200, description = "File updated", body = ContentFile),
        (status = 404, description = "File not found", body = ErrorResponse)
    ),
    tag = "Files",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn update_file(
    State(state): State<AppState>,
    _admin: RequireAdmin,
    Path(id): Path<Uuid>,
    ValidatedJson(dto): ValidatedJson<UpdateFileDto>,
) -> Result<Json<ContentFile>, AppError> {
    Ok(Json(FileService::update_file(&state.db, id, dto).await?))
}

#[utoipa::path(
    delete,
    path = "/api/files/{id}",
    params(("id" = Uuid, Path, description = "File ID")),
    responses(
        (status = 204, description = "File deleted"),
        (status = 404, description = "File not found", body = ErrorResponse)
    ),
    tag = "Files",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn delete_file(
    State(state): State<AppState>,
    _admin: RequireAdmin,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    FileService::delete_file(&state.db, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
