use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use tuitionhub_core::AppError;
use tuitionhub_models::classes::{Class, CreateClassDto, UpdateClassDto};

use crate::modules::unique_violation;

const DUPLICATE_CLASS: &str = "A class with this name already exists";

pub struct ClassService;

impl ClassService {
    #[instrument(skip(db))]
    pub async fn get_classes(db: &PgPool) -> Result<Vec<Class>, AppError> {
        let classes = sqlx::query_as::<_, Class>(
            "SELECT id, name, description, created_at, updated_at FROM classes ORDER BY name",
        )
        .fetch_all(db)
        .await?;

        Ok(classes)
    }

    #[instrument(skip(db))]
    pub async fn get_class(db: &PgPool, id: Uuid) -> Result<Class, AppError> {
        sqlx::query_as::<_, Class>(
            "SELECT id, name, description, created_at, updated_at FROM classes WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(db)
        .await?
        .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Class not found")))
    }

    #[instrument(skip(db))]
    pub async fn create_class(db: &PgPool, dto: CreateClassDto) -> Result<Class, AppError> {
        let class = sqlx::query_as::<_, Class>(
            r#"INSERT INTO classes (name, description)
               VALUES ($1, $2)
               RETURNING id, name, description, created_at, updated_at"#,
        )
        .bind(dto.name.trim())
        .bind(&dto.description)
        .fetch_one(db)
        .await
        .map_err(unique_violation(DUPLICATE_CLASS))?;

        Ok(class)
    }

    #[instrument(skip(db))]
    pub async fn update_class(
        db: &PgPool,
        id: Uuid,
        dto: UpdateClassDto,
    ) -> Result<Class, AppError> {
        sqlx::query_as::<_, Class>(
            r#"UPDATE classes
               SET name = COALESCE($2, name),
                   description = COALESCE($3, description),
                   updated_at = NOW()
               WHERE id = $1
               RETURNING id, name, description, created_at, updated_at"#,
        )
        .bind(id)
        .bind(dto.name.as_deref().map(str::trim))
        .bind(&dto.description)
        .fetch_optional(db)
        .await
        .map_err(unique_violation(DUPLICATE_CLASS))?
        .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Class not found")))
    }

    /// Cascades to subjects, chapters, files and exams. Students are unassigned.
    #[instrument(skip(db))]
    pub async fn delete_class(db: &PgPool, id: Uuid) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM classes WHERE id = $1")
            .bind(id)
            .execute(db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(anyhow::anyhow!("Class not found")));
        }

        Ok(())
    }
}
