pub mod attendance;
pub mod auth;
pub mod chapters;
pub mod classes;
pub mod exams;
pub mod files;
pub mod leaderboard;
pub mod marks;
pub mod quizzes;
pub mod students;
pub mod subjects;

use tuitionhub_core::AppError;

/// Turns a unique-constraint violation into a 400 carrying `message`.
/// Any other database error stays a 500.
pub(crate) fn unique_violation(message: &'static str) -> impl FnOnce(sqlx::Error) -> AppError {
    move |e| {
        if let sqlx::Error::Database(db_err) = &e
            && db_err.is_unique_violation()
        {
            return AppError::bad_request(anyhow::anyhow!(message));
        }
        AppError::from(e)
    }
}

/// Fails with 404 `"{what} not found"` unless `SELECT EXISTS(...)` on `table` finds `id`.
pub(crate) async fn ensure_exists(
    db: &sqlx::PgPool,
    table: &'static str,
    what: &'static str,
    id: uuid::Uuid,
) -> Result<(), AppError> {
    let query = format!("SELECT EXISTS(SELECT 1 FROM {table} WHERE id = $1)");
    let exists = sqlx::query_scalar::<_, bool>(&query)
        .bind(id)
        .fetch_one(db)
        .await?;

    if exists {
        Ok(())
    } else {
        Err(AppError::not_found(anyhow::anyhow!("{} not found", what)))
    }
}
