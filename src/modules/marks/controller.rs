use axum::{Json, extract::State};
use tracing::instrument;

use tuitionhub_core::AppError;
use tuitionhub_models::students::MarksReportResponse;

use super::service::MarksService;
use crate::middleware::auth::AuthUser;
use crate::modules::auth::controller::ErrorResponse;
use crate::state::AppState;

/// Caller's marks report: per-exam totals, subject averages and overall grade
#[utoipa::path(
    get,
    path = "/api/marks/me",
    responses(
        (status = 200, description = "Report, or has_data=false before any marks are graded", body = MarksReportResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    tag = "Marks",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn get_my_marks(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> Result<Json<MarksReportResponse>, AppError> {
    let report = MarksService::get_report(&state.db, auth_user.user_id()?).await?;
    Ok(Json(report))
}
