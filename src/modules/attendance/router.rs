use axum::{
    Router,
    routing::{get, put},
};

use crate::state::AppState;

use super::controller::{get_my_attendance, get_roster, save_attendance};

pub fn init_attendance_router() -> Router<AppState> {
    Router::new()
        .route("/", put(save_attendance))
        .route("/roster", get(get_roster))
        .route("/me", get(get_my_attendance))
}
