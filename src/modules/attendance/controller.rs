use axum::{
    Json,
    extract::{Query, State},
};
use tracing::instrument;

use tuitionhub_core::{AppError, ValidatedJson};
use tuitionhub_models::attendance::{
    MyAttendanceResponse, RosterParams, RosterResponse, SaveAttendanceDto, SaveAttendanceResponse,
};

use super::service::AttendanceService;
use crate::middleware::auth::AuthUser;
use crate::middleware::role::RequireAdmin;
use crate::modules::auth::controller::ErrorResponse;
use crate::state::AppState;

/// Class roster for one day
#[utoipa::path(
    get,
    path = "/api/attendance/roster",
    params(RosterParams),
    responses(
        (status = 200, description = "Students of the class with the day's status", body = RosterResponse),
        (status = 400, description = "Missing or malformed class_id/date", body = ErrorResponse),
        (status = 403, description = "Admin only", body = ErrorResponse),
        (status = 404, description = "Class not found", body = ErrorResponse)
    ),
    tag = "Attendance",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn get_roster(
    State(state): State<AppState>,
    _admin: RequireAdmin,
    Query(params): Query<RosterParams>,
) -> Result<Json<RosterResponse>, AppError> {
    let roster = AttendanceService::get_roster(
        &state.db,
        params.class_id,
        params.date,
        state.performance_config.late_policy,
    )
    .await?;

    Ok(Json(roster))
}

/// Replace a class's attendance for one day
#[utoipa::path(
    put,
    path = "/api/attendance",
    request_body = SaveAttendanceDto,
    responses(
        (status = 200, description = "Attendance saved", body = SaveAttendanceResponse),
        (status = 400, description = "A record is not a student of the class", body = ErrorResponse),
        (status = 403, description = "Admin only", body = ErrorResponse),
        (status = 404, description = "Class not found", body = ErrorResponse)
    ),
    tag = "Attendance",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, dto))]
pub async fn save_attendance(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    ValidatedJson(dto): ValidatedJson<SaveAttendanceDto>,
) -> Result<Json<SaveAttendanceResponse>, AppError> {
    let response = AttendanceService::save_attendance(
        &state.db,
        dto,
        admin.user_id()?,
        state.performance_config.late_policy,
    )
    .await?;

    Ok(Json(response))
}

/// Caller's own attendance history
#[utoipa::path(
    get,
    path = "/api/attendance/me",
    responses(
        (status = 200, description = "Records newest first with a summary", body = MyAttendanceResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    tag = "Attendance",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn get_my_attendance(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> Result<Json<MyAttendanceResponse>, AppError> {
    let response = AttendanceService::get_my_attendance(
        &state.db,
        auth_user.user_id()?,
        state.performance_config.late_policy,
    )
    .await?;

    Ok(Json(response))
}
