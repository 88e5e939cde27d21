use axum::{Router, routing::get};

use crate::state::AppState;

use super::controller::get_my_marks;

pub fn init_marks_router() -> Router<AppState> {
    Router::new().route("/me", get(get_my_marks))
}
