use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use tuitionhub_core::AppError;
use tuitionhub_models::quizzes::{
    CreateQuizDto, Quiz, QuizFilterParams, QuizWithContext, UpdateQuizDto,
};

use crate::modules::ensure_exists;

const DUPLICATE_QUIZ: &str = "A quiz with this title already exists in this chapter";
const PASSING_ABOVE_TOTAL: &str = "Passing marks cannot exceed total marks";

const QUIZ_COLUMNS: &str = "id, chapter_id, title, description, duration_minutes, total_marks, \
                            passing_marks, created_at, updated_at";

const QUIZ_WITH_CONTEXT: &str = "SELECT q.id, q.chapter_id, ch.name AS chapter_name, \
                                        ch.subject_id, s.name AS subject_name, q.title, \
                                        q.description, q.duration_minutes, q.total_marks, \
                                        q.passing_marks, q.created_at, q.updated_at \
                                 FROM quizzes q \
                                 JOIN chapters ch ON ch.id = q.chapter_id \
                                 JOIN subjects s ON s.id = ch.subject_id";

/// Maps the title uniqueness and the passing-marks check to 400s.
fn quiz_constraint(e: sqlx::Error) -> AppError {
    if let sqlx::Error::Database(db_err) = &e {
        if db_err.is_unique_violation() {
            return AppError::bad_request(anyhow::anyhow!(DUPLICATE_QUIZ));
        }
        if db_err.is_check_violation() {
            return AppError::bad_request(anyhow::anyhow!(PASSING_ABOVE_TOTAL));
        }
    }
    AppError::from(e)
}

pub struct QuizService;

impl QuizService {
    /// Quizzes newest first, optionally narrowed to a chapter or a subject.
    #[instrument(skip(db))]
    pub async fn get_quizzes(
        db: &PgPool,
        filters: QuizFilterParams,
    ) -> Result<Vec<QuizWithContext>, AppError> {
        let query = format!(
            "{QUIZ_WITH_CONTEXT} \
             WHERE ($1::uuid IS NULL OR q.chapter_id = $1) \
               AND ($2::uuid IS NULL OR ch.subject_id = $2) \
             ORDER BY q.created_at DESC, q.id"
        );

        let quizzes = sqlx::query_as::<_, QuizWithContext>(&query)
            .bind(filters.chapter_id)
            .bind(filters.subject_id)
            .fetch_all(db)
            .await?;

        Ok(quizzes)
    }

    #[instrument(skip(db))]
    pub async fn get_quiz(db: &PgPool, id: Uuid) -> Result<QuizWithContext, AppError> {
        let query = format!("{QUIZ_WITH_CONTEXT} WHERE q.id = $1");

        sqlx::query_as::<_, QuizWithContext>(&query)
            .bind(id)
            .fetch_optional(db)
            .await?
            .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Quiz not found")))
    }

    #[instrument(skip(db))]
    pub async fn create_quiz(db: &PgPool, dto: CreateQuizDto) -> Result<Quiz, AppError> {
        ensure_exists(db, "chapters", "Chapter", dto.chapter_id).await?;

        let query = format!(
            "INSERT INTO quizzes \
                 (chapter_id, title, description, duration_minutes, total_marks, passing_marks) \
             VALUES ($1, $2, $3, $4, $5, $6) RETURNING {QUIZ_COLUMNS}"
        );
        let quiz = sqlx::query_as::<_, Quiz>(&query)
            .bind(dto.chapter_id)
            .bind(dto.title.trim())
            .bind(&dto.description)
            .bind(dto.duration_minutes)
            .bind(dto.total_marks)
            .bind(dto.passing_marks)
            .fetch_one(db)
            .await
            .map_err(quiz_constraint)?;

        Ok(quiz)
    }

    #[instrument(skip(db))]
    pub async fn update_quiz(db: &PgPool, id: Uuid, dto: UpdateQuizDto) -> Result<Quiz, AppError> {
        let query = format!(
            "UPDATE quizzes \
             SET title = COALESCE($2, title), \
                 description = COALESCE($3, description), \
                 duration_minutes = COALESCE($4, duration_minutes), \
                 total_marks = COALESCE($5, total_marks), \
                 passing_marks = COALESCE($6, passing_marks), \
                 updated_at = NOW() \
             WHERE id = $1 RETURNING {QUIZ_COLUMNS}"
        );

        sqlx::query_as::<_, Quiz>(&query)
            .bind(id)
            .bind(dto.title.as_deref().map(str::trim))
            .bind(&dto.description)
            .bind(dto.duration_minutes)
            .bind(dto.total_marks)
            .bind(dto.passing_marks)
            .fetch_optional(db)
            .await
            .map_err(quiz_constraint)?
            .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Quiz not found")))
    }

    #[instrument(skip(db))]
    pub async fn delete_quiz(db: &PgPool, id: Uuid) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM quizzes WHERE id = $1")
            .bind(id)
            .execute(db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(anyhow::anyhow!("Quiz not found")));
        }

        Ok(())
    }
}
