use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use tracing::instrument;
use uuid::Uuid;

use tuitionhub_core::{AppError, ValidatedJson};
use tuitionhub_models::quizzes::{
    CreateQuizDto, Quiz, QuizFilterParams, QuizWithContext, UpdateQuizDto,
};

use super::service::QuizService;
use crate::middleware::auth::AuthUser;
use crate::middleware::role::RequireAdmin;
use crate::modules::auth::controller::ErrorResponse;
use crate::state::AppState;

#[utoipa::path(
    get,
    path = "/api/quizzes",
    params(QuizFilterParams),
    responses(
        (status = 200, description = "Quizzes with chapter and subject names, newest first", body = Vec<QuizWithContext>),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    tag = "Quizzes",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn get_quizzes(
    State(state): State<AppState>,
    _auth_user: AuthUser,
    Query(filters): Query<QuizFilterParams>,
) -> Result<Json<Vec<QuizWithContext>>, AppError> {
    Ok(Json(QuizService::get_quizzes(&state.db, filters).await?))
}

#[utoipa::path(
    get,
    path = "/api/quizzes/{id}",
    params(("id" = Uuid, Path, description = "Quiz ID")),
    responses(
        (status = 200, description = "Quiz details", body = QuizWithContext),
        (status = 404, description = "Quiz not found", body = ErrorResponse)
    ),
    tag = "Quizzes",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn get_quiz(
    State(state): State<AppState>,
    _auth_user: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<QuizWithContext>, AppError> {
    Ok(Json(QuizService::get_quiz(&state.db, id).await?))
}

#[utoipa::path(
    post,
    path = "/api/quizzes",
    request_body = CreateQuizDto,
    responses(
        (status = 201, description = "Quiz created", body = Quiz),
        (status = 400, description = "Duplicate title", body = ErrorResponse),
        (status = 403, description = "Admin only", body = ErrorResponse),
        (status = 404, description = "Chapter not found", body = ErrorResponse),
        (status = 422, description = "Invalid duration or marks", body = ErrorResponse)
    ),
    tag = "Quizzes",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn create_quiz(
    State(state): State<AppState>,
    _admin: RequireAdmin,
    ValidatedJson(dto): ValidatedJson<CreateQuizDto>,
) -> Result<(StatusCode, Json<Quiz>), AppError> {
    let quiz = QuizService::create_quiz(&state.db, dto).await?;
    Ok((StatusCode::CREATED, Json(quiz)))
}

#[utoipa::path(
    put,
    path = "/api/quizzes/{id}",
    params(("id" = Uuid, Path, description = "Quiz ID")),
    request_body = UpdateQuizDto,
    responses(
        (status = 200, description = "Quiz updated", body = Quiz),
        (status = 400, description = "Duplicate title or passing marks above total", body = ErrorResponse),
        (status = 404, description = "Quiz not found", body = ErrorResponse)
    ),
    tag = "Quizzes",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn update_quiz(
    State(state): State<AppState>,
    _admin: RequireAdmin,
    Path(id): Path<Uuid>,
    ValidatedJson(dto): ValidatedJson<UpdateQuizDto>,
) -> Result<Json<Quiz>, AppError> {
    Ok(Json(QuizService::update_quiz(&state.db, id, dto).await?))
}

#[utoipa::path(
    delete,
    path = "/api/quizzes/{id}",
    params(("id" = Uuid, Path, description = "Quiz ID")),
    responses(
        (status = 204, description = "Quiz deleted"),
        (status = 404, description = "Quiz not found", body = ErrorResponse)
    ),
    tag = "Quizzes",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn delete_quiz(
    State(state): State<AppState>,
    _admin: RequireAdmin,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    QuizService::delete_quiz(&state.db, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
