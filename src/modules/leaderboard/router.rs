use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

use super::controller::{award_points, get_leaderboard};

pub fn init_leaderboard_router() -> Router<AppState> {
    Router::new()
        .route("/", get(get_leaderboard))
        .route("/{user_id}/points", post(award_points))
}
