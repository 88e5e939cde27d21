use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use tracing::instrument;
use uuid::Uuid;

use tuitionhub_core::{AppError, ValidatedJson};
use tuitionhub_models::chapters::{
    Chapter, ChapterFilterParams, ChapterWithContext, CreateChapterDto, UpdateChapterDto,
};
use tuitionhub_models::files::ContentFile;

use super::service::ChapterService;
use crate::middleware::auth::AuthUser;
use crate::middleware::role::RequireAdmin;
use crate::modules::auth::controller::ErrorResponse;
use crate::modules::files::service::FileService;
use crate::state::AppState;

#[utoipa::path(
    get,
    path = "/api/chapters",
    params(ChapterFilterParams),
    responses(
        (status = 200, description = "Chapters with subject and class", body = Vec<ChapterWithContext>),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    tag = "Chapters",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn get_chapters(
    State(state): State<AppState>,
    _auth_user: AuthUser,
    Query(filters): Query<ChapterFilterParams>,
) -> Result<Json<Vec<ChapterWithContext>>, AppError> {
    Ok(Json(ChapterService::get_chapters(&state.db, filters).await?))
}

#[utoipa::path(
    get,
    path = "/api/chapters/{id}",
    params(("id" = Uuid, Path, description = "Chapter ID")),
    responses(
        (status = 200, description = "Chapter with subject and class", body = ChapterWithContext),
        (status = 404, description = "Chapter not found", body = ErrorResponse)
    ),
    tag = "Chapters",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn get_chapter(
    State(state): State<AppState>,
    _auth_user: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ChapterWithContext>, AppError> {
    Ok(Json(ChapterService::get_chapter(&state.db, id).await?))
}

#[utoipa::path(
    get,
    path = "/api/chapters/{id}/files",
    params(("id" = Uuid, Path, description = "Chapter ID")),
    responses(
        (status = 200, description = "Files of the chapter", body = Vec<ContentFile>),
        (status = 404, description = "Chapter not found", body = ErrorResponse)
    ),
    tag = "Chapters",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn get_chapter_files(
    State(state): State<AppState>,
    _auth_user: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<ContentFile>>, AppError> {
    Ok(Json(FileService::get_files_of_chapter(&state.db, id).await?))
}

#[utoipa::path(
    post,
    path = "/api/chapters",
    request_body = CreateChapterDto,
    responses(
        (status = 201, description = "Chapter created", body = Chapter),
        (status = 400, description = "Duplicate name in subject", body = ErrorResponse),
        (status = 403, description = "Admin only", body = ErrorResponse),
        (status = 404, description = "Subject not found", body = ErrorResponse)
    ),
    tag = "Chapters",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn create_chapter(
    State(state): State<AppState>,
    _admin: RequireAdmin,
    ValidatedJson(dto): ValidatedJson<CreateChapterDto>,
) -> Result<(StatusCode, Json<Chapter>), AppError> {
    let chapter = ChapterService::create_chapter(&state.db, dto).await?;
    Ok((StatusCode::CREATED, Json(chapter)))
}

#[utoipa::path(
    put,
    path = "/api/chapters/{id}",
    params(("id" = Uuid, Path, description = "Chapter ID")),
    request_body = UpdateChapterDto,
    responses(
        (status = 200, description = "Chapter updated", body = Chapter),
        (status = 404, description = "Chapter not found", body = ErrorResponse)
    ),
    tag = "Chapters",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn update_chapter(
    State(state): State<AppState>,
    _admin: RequireAdmin,
    Path(id): Path<Uuid>,
    ValidatedJson(dto): ValidatedJson<UpdateChapterDto>,
) -> Result<Json<Chapter>, AppError> {
    Ok(Json(ChapterService::update_chapter(&state.db, id, dto).await?))
}

#[utoipa::path(
    delete,
    path = "/api/chapters/{id}",
    params(("id" = Uuid, Path, description = "Chapter ID")),
    responses(
        (status = 204, description = "Chapter deleted"),
        (status = 404, description = "Chapter not found", body = ErrorResponse)
    ),
    tag = "Chapters",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn delete_chapter(
    State(state): State<AppState>,
    _admin: RequireAdmin,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    ChapterService::delete_chapter(&state.db, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
