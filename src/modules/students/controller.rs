use axum::{
    Json,
    extract::{Path, Query, State},
};
use tracing::instrument;
use uuid::Uuid;

use tuitionhub_core::{AppError, PaginationParams, ValidatedJson};
use tuitionhub_models::UserProfile;
use tuitionhub_models::students::{
    MarksReportResponse, PaginatedStudentsResponse, StudentAttendanceResponse,
    StudentFilterParams, UpdateStudentDto,
};

use super::service::StudentService;
use crate::modules::auth::controller::ErrorResponse;
use crate::state::AppState;

#[utoipa::path(
    get,
    path = "/api/students",
    params(StudentFilterParams, PaginationParams),
    responses(
        (status = 200, description = "Students ordered by name", body = PaginatedStudentsResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Admin only", body = ErrorResponse)
    ),
    tag = "Students",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn get_students(
    State(state): State<AppState>,
    Query(filters): Query<StudentFilterParams>,
    Query(pagination): Query<PaginationParams>,
) -> Result<Json<PaginatedStudentsResponse>, AppError> {
    let students = StudentService::get_students(&state.db, filters, pagination).await?;
    Ok(Json(students))
}

#[utoipa::path(
    get,
    path = "/api/students/{id}",
    params(("id" = Uuid, Path, description = "Student ID")),
    responses(
        (status = 200, description = "Student profile with class name", body = UserProfile),
        (status = 403, description = "Admin only", body = ErrorResponse),
        (status = 404, description = "Student not found", body = ErrorResponse)
    ),
    tag = "Students",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn get_student(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<UserProfile>, AppError> {
    Ok(Json(StudentService::get_student(&state.db, id).await?))
}

#[utoipa::path(
    put,
    path = "/api/students/{id}",
    params(("id" = Uuid, Path, description = "Student ID")),
    request_body = UpdateStudentDto,
    responses(
        (status = 200, description = "Student updated", body = UserProfile),
        (status = 403, description = "Admin only", body = ErrorResponse),
        (status = 404, description = "Student or class not found", body = ErrorResponse),
        (status = 422, description = "Validation error", body = ErrorResponse)
    ),
    tag = "Students",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn update_student(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    ValidatedJson(dto): ValidatedJson<UpdateStudentDto>,
) -> Result<Json<UserProfile>, AppError> {
    Ok(Json(StudentService::update_student(&state.db, id, dto).await?))
}

#[utoipa::path(
    get,
    path = "/api/students/{id}/attendance",
    params(("id" = Uuid, Path, description = "Student ID")),
    responses(
        (status = 200, description = "Attendance history with summary", body = StudentAttendanceResponse),
        (status = 404, description = "Student not found", body = ErrorResponse)
    ),
    tag = "Students",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn get_student_attendance(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<StudentAttendanceResponse>, AppError> {
    let response = StudentService::get_student_attendance(
        &state.db,
        id,
        state.performance_config.late_policy,
    )
    .await?;

    Ok(Json(response))
}

#[utoipa::path(
    get,
    path = "/api/students/{id}/performance",
    params(("id" = Uuid, Path, description = "Student ID")),
    responses(
        (status = 200, description = "Marks report, or has_data=false", body = MarksReportResponse),
        (status = 404, description = "Student not found", body = ErrorResponse)
    ),
    tag = "Students",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn get_student_performance(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<MarksReportResponse>, AppError> {
    Ok(Json(StudentService::get_student_performance(&state.db, id).await?))
}
