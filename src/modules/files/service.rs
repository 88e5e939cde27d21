use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use tuitionhub_core::AppError;
use tuitionhub_models::files::{ContentFile, CreateFileDto, FileFilterParams, UpdateFileDto};

use crate::modules::{ensure_exists, unique_violation};

const DUPLICATE_FILE: &str = "A file with this name already exists in this chapter";

const FILE_COLUMNS: &str =
    "id, chapter_id, name, description, file_type, file_url, created_at, updated_at";

pub struct FileService;

impl FileService {
    #[instrument(skip(db))]
    pub async fn get_files(
        db: &PgPool,
        filters: FileFilterParams,
    ) -> Result<Vec<ContentFile>, AppError> {
        let query = format!(
            "SELECT {FILE_COLUMNS} FROM files \
             WHERE ($1::uuid IS NULL OR chapter_id = $1) ORDER BY created_at DESC"
        );

        let files = sqlx::query_as::<_, ContentFile>(&query)
            .bind(filters.chapter_id)
            .fetch_all(db)
            .await?;

        Ok(files)
    }

    #[instrument(skip(db))]
    pub async fn get_file(db: &PgPool, id: Uuid) -> Result<ContentFile, AppError> {
        let query = format!("SELECT {FILE_COLUMNS} FROM files WHERE id = $1");

        sqlx::query_as::<_, ContentFile>(&query)
            .bind(id)
            .fetch_optional(db)
            .await?
            .ok_or_else(|| AppError::not_found(anyhow::anyhow!("File not found")))
    }

    #[instrument(skip(db))]
    pub async fn get_files_of_chapter(
        db: &PgPool,
        chapter_id: Uuid,
    ) -> Result<Vec<ContentFile>, AppError> {
        ensure_exists(db, "chapters", "Chapter", chapter_id).await?;

        let query = format!(
            "SELECT {FILE_COLUMNS} FROM files WHERE chapter_id = $1 ORDER BY created_at DESC"
        );
        let files = sqlx::query_as::<_, ContentFile>(&query)
            .bind(chapter_id)
            .fetch_all(db)
            .await?;

        Ok(files)
    }

    #[instrument(skip(db))]
    pub async fn create_file(db: &PgPool, dto: CreateFileDto) -> Result<ContentFile, AppError> {
        ensure_exists(db, "chapters", "Chapter", dto.chapter_id).await?;

        let query = format!(
            "INSERT INTO files (chapter_id, name, description, file_type, file_url) \
             VALUES ($1, $2, $3, $4, $5) RETURNING {FILE_COLUMNS}"
        );
        let file = sqlx::query_as::<_, ContentFile>(&query)
            .bind(dto.chapter_id)
            .bind(dto.name.trim())
            .bind(&dto.description)
            .bind(dto.file_type)
            .bind(&dto.file_url)
            .fetch_one(db)
            .await
            .map_err(unique_violation(DUPLICATE_FILE))?;

        Ok(file)
    }

    #[instrument(skip(db))]
    pub async fn update_file(
        db: &PgPool,
        id: Uuid,
        dto: UpdateFileDto,
    ) -> Result<ContentFile, AppError> {
        let query = format!(
            "UPDATE files \
             SET name = COALESCE($2, name), \
                 description = COALESCE($3, description), \
                 file_type = COALESCE($4, file_type), \
                 file_url = COALESCE($5, file_url), \
                 updated_at = NOW() \
             WHERE id = $1 RETURNING {FILE_COLUMNS}"
        );

        sqlx::query_as::<_, ContentFile>(&query)
            .bind(id)
            .bind(dto.name.as_deref().map(str::trim))
            .bind(&dto.description)
            .bind(dto.file_type)
            .bind(&dto.file_url)
            .fetch_optional(db)
            .await
            .map_err(unique_violation(DUPLICATE_FILE))?
            .ok_or_else(|| AppError::not_found(anyhow::anyhow!("File not found")))
    }

    #[instrument(skip(db))]
    pub async fn delete_file(db: &PgPool, id: Uuid) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM files WHERE id = $1")
            .bind(id)
            .execute(db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(anyhow::anyhow!("File not found")));
        }

        Ok(())
    }
}
