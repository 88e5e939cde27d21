use axum::{Router, routing::get};

use crate::state::AppState;

use super::controller::{
    create_chapter, delete_chapter, get_chapter, get_chapter_files, get_chapters,
    update_chapter,
};

pub fn init_chapters_router() -> Router<AppState> {
    Router::new()
        .route("/", get(get_chapters).post(create_chapter))
        .route(
            "/{id}",
            get(get_chapter).put(update_chapter).delete(delete_chapter),
        )
        .route("/{id}/files", get(get_chapter_files))
}
