use axum::{Router, routing::get};

use crate::state::AppState;

use super::controller::{
    get_student, get_student_attendance, get_student_performance, get_students, update_student,
};

/// Mounted behind `require_admin`.
pub fn init_students_router() -> Router<AppState> {
    Router::new()
        .route("/", get(get_students))
        .route("/{id}", get(get_student).put(update_student))
        .route("/{id}/attendance", get(get_student_attendance))
        .route("/{id}/performance", get(get_student_performance))
}
