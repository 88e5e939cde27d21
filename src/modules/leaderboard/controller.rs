use axum::{
    Json,
    extract::{Path, Query, State},
};
use tracing::instrument;
use uuid::Uuid;

use tuitionhub_core::{AppError, ValidatedJson};
use tuitionhub_models::leaderboard::{
    AwardPointsDto, LeaderboardParams, LeaderboardResponse, UserPoints,
};

use super::service::LeaderboardService;
use crate::middleware::auth::AuthUser;
use crate::middleware::role::RequireAdmin;
use crate::modules::auth::controller::ErrorResponse;
use crate::state::AppState;

#[utoipa::path(
    get,
    path = "/api/leaderboard",
    params(LeaderboardParams),
    responses(
        (status = 200, description = "Ranked entries and the caller's rank", body = LeaderboardResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    tag = "Leaderboard",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn get_leaderboard(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Query(params): Query<LeaderboardParams>,
) -> Result<Json<LeaderboardResponse>, AppError> {
    let response =
        LeaderboardService::get_leaderboard(&state.db, auth_user.user_id()?, params.limit())
            .await?;

    Ok(Json(response))
}

#[utoipa::path(
    post,
    path = "/api/leaderboard/{user_id}/points",
    params(("user_id" = Uuid, Path, description = "Student ID")),
    request_body = AwardPointsDto,
    responses(
        (status = 200, description = "Updated points, level and badges", body = UserPoints),
        (status = 403, description = "Admin only", body = ErrorResponse),
        (status = 404, description = "Student not found", body = ErrorResponse),
        (status = 422, description = "Points must be positive", body = ErrorResponse)
    ),
    tag = "Leaderboard",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn award_points(
    State(state): State<AppState>,
    _admin: RequireAdmin,
    Path(user_id): Path<Uuid>,
    ValidatedJson(dto): ValidatedJson<AwardPointsDto>,
) -> Result<Json<UserPoints>, AppError> {
    Ok(Json(LeaderboardService::award_points(&state.db, user_id, dto).await?))
}
