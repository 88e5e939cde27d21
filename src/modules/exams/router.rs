use axum::{Router, routing::get};

use crate::state::AppState;

use super::controller::{
    create_exam, delete_exam, get_exam, get_exams, get_subject_marks, save_subject_marks,
    update_exam,
};

/// Mounted behind `require_admin`.
pub fn init_exams_router() -> Router<AppState> {
    Router::new()
        .route("/", get(get_exams).post(create_exam))
        .route("/{id}", get(get_exam).put(update_exam).delete(delete_exam))
        .route(
            "/{id}/subjects/{exam_subject_id}/marks",
            get(get_subject_marks).put(save_subject_marks),
        )
}
