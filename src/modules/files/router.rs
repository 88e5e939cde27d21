use axum::{Router, routing::get};

use crate::state::AppState;

use super::controller::{create_file, delete_file, get_file, get_files, update_file};

pub fn init_files_router() -> Router<AppState> {
    Router::new()
        .route("/", get(get_files).post(create_file))
        .route("/{id}", get(get_file).put(update_file).delete(delete_file))
}
