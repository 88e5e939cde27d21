use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use tuitionhub_core::AppError;
use tuitionhub_models::chapters::{
    Chapter, ChapterFilterParams, ChapterWithContext, CreateChapterDto, UpdateChapterDto,
};

use crate::modules::{ensure_exists, unique_violation};

const DUPLICATE_CHAPTER: &str = "A chapter with this name already exists in this subject";

const CHAPTER_WITH_CONTEXT: &str = r#"SELECT ch.id, ch.subject_id, s.name AS subject_name,
       s.class_id, c.name AS class_name, ch.name, ch.description,
       ch.created_at, ch.updated_at
FROM chapters ch
JOIN subjects s ON s.id = ch.subject_id
JOIN classes c ON c.id = s.class_id"#;

pub struct ChapterService;

impl ChapterService {
    #[instrument(skip(db))]
    pub async fn get_chapters(
        db: &PgPool,
        filters: ChapterFilterParams,
    ) -> Result<Vec<ChapterWithContext>, AppError> {
        let query = format!(
            "{CHAPTER_WITH_CONTEXT} WHERE ($1::uuid IS NULL OR ch.subject_id = $1) \
             ORDER BY c.name, s.name, ch.name"
        );

        let chapters = sqlx::query_as::<_, ChapterWithContext>(&query)
            .bind(filters.subject_id)
            .fetch_all(db)
            .await?;

        Ok(chapters)
    }

    #[instrument(skip(db))]
    pub async fn get_chapter(db: &PgPool, id: Uuid) -> Result<ChapterWithContext, AppError> {
        let query = format!("{CHAPTER_WITH_CONTEXT} WHERE ch.id = $1");

        sqlx::query_as::<_, ChapterWithContext>(&query)
            .bind(id)
            .fetch_optional(db)
            .await?
            .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Chapter not found")))
    }

    #[instrument(skip(db))]
    pub async fn get_chapters_of_subject(
        db: &PgPool,
        subject_id: Uuid,
    ) -> Result<Vec<Chapter>, AppError> {
        ensure_exists(db, "subjects", "Subject", subject_id).await?;

        let chapters = sqlx::query_as::<_, Chapter>(
            r#"SELECT id, subject_id, name, description, created_at, updated_at
               FROM chapters WHERE subject_id = $1 ORDER BY name"#,
        )
        .bind(subject_id)
        .fetch_all(db)
        .await?;

        Ok(chapters)
    }

    #[instrument(skip(db))]
    pub async fn create_chapter(db: &PgPool, dto: CreateChapterDto) -> Result<Chapter, AppError> {
        ensure_exists(db, "subjects", "Subject", dto.subject_id).await?;

        let chapter = sqlx::query_as::<_, Chapter>(
            r#"INSERT INTO chapters (subject_id, name, description)
               VALUES ($1, $2, $3)
               RETURNING id, subject_id, name, description, created_at, updated_at"#,
        )
        .bind(dto.subject_id)
        .bind(dto.name.trim())
        .bind(&dto.description)
        .fetch_one(db)
        .await
        .map_err(unique_violation(DUPLICATE_CHAPTER))?;

        Ok(chapter)
    }

    #[instrument(skip(db))]
    pub async fn update_chapter(
        db: &PgPool,
        id: Uuid,
        dto: UpdateChapterDto,
    ) -> Result<Chapter, AppError> {
        sqlx::query_as::<_, Chapter>(
            r#"UPDATE chapters
               SET name = COALESCE($2, name),
                   description = COALESCE($3, description),
                   updated_at = NOW()
               WHERE id = $1
               RETURNING id, subject_id, name, description, created_at, updated_at"#,
        )
        .bind(id)
        .bind(dto.name.as_deref().map(str::trim))
        .bind(&dto.description)
        .fetch_optional(db)
        .await
        .map_err(unique_violation(DUPLICATE_CHAPTER))?
        .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Chapter not found")))
    }

    #[instrument(skip(db))]
    pub async fn delete_chapter(db: &PgPool, id: Uuid) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM chapters WHERE id = $1")
            .bind(id)
            .execute(db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(anyhow::anyhow!("Chapter not found")));
        }

        Ok(())
    }
}
