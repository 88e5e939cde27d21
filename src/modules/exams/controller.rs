use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use tracing::instrument;
use uuid::Uuid;

use tuitionhub_core::{AppError, ValidatedJson};
use tuitionhub_models::exams::{CreateExamDto, Exam, ExamFilterParams, UpdateExamDto};
use tuitionhub_models::marks::{SaveMarksDto, SaveMarksResponse, StudentMark};

use super::service::ExamService;
use crate::modules::auth::controller::ErrorResponse;
use crate::state::AppState;

#[utoipa::path(
    get,
    path = "/api/exams",
    params(ExamFilterParams),
    responses(
        (status = 200, description = "Exams newest first with their subjects", body = Vec<Exam>),
        (status = 403, description = "Admin only", body = ErrorResponse)
    ),
    tag = "Exams",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn get_exams(
    State(state): State<AppState>,
    Query(filters): Query<ExamFilterParams>,
) -> Result<Json<Vec<Exam>>, AppError> {
    Ok(Json(ExamService::get_exams(&state.db, filters).await?))
}

#[utoipa::path(
    get,
    path = "/api/exams/{id}",
    params(("id" = Uuid, Path, description = "Exam ID")),
    responses(
        (status = 200, description = "Exam with its subjects", body = Exam),
        (status = 404, description = "Exam not found", body = ErrorResponse)
    ),
    tag = "Exams",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn get_exam(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Exam>, AppError> {
    Ok(Json(ExamService::get_exam(&state.db, id).await?))
}

#[utoipa::path(
    post,
    path = "/api/exams",
    request_body = CreateExamDto,
    responses(
        (status = 201, description = "Exam created with blank marks for the class", body = Exam),
        (status = 400, description = "A subject is not part of the class", body = ErrorResponse),
        (status = 404, description = "Class not found", body = ErrorResponse),
        (status = 422, description = "Validation error", body = ErrorResponse)
    ),
    tag = "Exams",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, dto))]
pub async fn create_exam(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<CreateExamDto>,
) -> Result<(StatusCode, Json<Exam>), AppError> {
    let exam = ExamService::create_exam(&state.db, dto).await?;
    Ok((StatusCode::CREATED, Json(exam)))
}

#[utoipa::path(
    put,
    path = "/api/exams/{id}",
    params(("id" = Uuid, Path, description = "Exam ID")),
    request_body = UpdateExamDto,
    responses(
        (status = 200, description = "Exam replaced", body = Exam),
        (status = 400, description = "Subject outside the class or ceiling below entered marks", body = ErrorResponse),
        (status = 404, description = "Exam or class not found", body = ErrorResponse)
    ),
    tag = "Exams",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, dto))]
pub async fn update_exam(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    ValidatedJson(dto): ValidatedJson<UpdateExamDto>,
) -> Result<Json<Exam>, AppError> {
    Ok(Json(ExamService::update_exam(&state.db, id, dto).await?))
}

#[utoipa::path(
    delete,
    path = "/api/exams/{id}",
    params(("id" = Uuid, Path, description = "Exam ID")),
    responses(
        (status = 204, description = "Exam, its subjects and marks deleted"),
        (status = 404, description = "Exam not found", body = ErrorResponse)
    ),
    tag = "Exams",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn delete_exam(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    ExamService::delete_exam(&state.db, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    get,
    path = "/api/exams/{id}/subjects/{exam_subject_id}/marks",
    params(
        ("id" = Uuid, Path, description = "Exam ID"),
        ("exam_subject_id" = Uuid, Path, description = "Exam subject ID")
    ),
    responses(
        (status = 200, description = "Marks ordered by student name", body = Vec<StudentMark>),
        (status = 404, description = "Exam subject not found", body = ErrorResponse)
    ),
    tag = "Exams",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn get_subject_marks(
    State(state): State<AppState>,
    Path((id, exam_subject_id)): Path<(Uuid, Uuid)>,
) -> Result<Json<Vec<StudentMark>>, AppError> {
    let marks = ExamService::get_subject_marks(&state.db, id, exam_subject_id).await?;
    Ok(Json(marks))
}

#[utoipa::path(
    put,
    path = "/api/exams/{id}/subjects/{exam_subject_id}/marks",
    params(
        ("id" = Uuid, Path, description = "Exam ID"),
        ("exam_subject_id" = Uuid, Path, description = "Exam subject ID")
    ),
    request_body = SaveMarksDto,
    responses(
        (status = 200, description = "All marks saved", body = SaveMarksResponse),
        (status = 400, description = "A value is outside 0..=max_marks or an id is foreign; nothing saved", body = ErrorResponse),
        (status = 404, description = "Exam subject not found", body = ErrorResponse)
    ),
    tag = "Exams",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, dto))]
pub async fn save_subject_marks(
    State(state): State<AppState>,
    Path((id, exam_subject_id)): Path<(Uuid, Uuid)>,
    ValidatedJson(dto): ValidatedJson<SaveMarksDto>,
) -> Result<Json<SaveMarksResponse>, AppError> {
    let response = ExamService::save_subject_marks(&state.db, id, exam_subject_id, dto).await?;
    Ok(Json(response))
}
