use axum::{Router, routing::get};

use crate::state::AppState;

use super::controller::{
    create_class, delete_class, get_class, get_class_subjects, get_classes, update_class,
};

pub fn init_classes_router() -> Router<AppState> {
    Router::new()
        .route("/", get(get_classes).post(create_class))
        .route(
            "/{id}",
            get(get_class).put(update_class).delete(delete_class),
        )
        .route("/{id}/subjects", get(get_class_subjects))
}
