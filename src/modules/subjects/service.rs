use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use tuitionhub_core::AppError;
use tuitionhub_models::subjects::{
    CreateSubjectDto, Subject, SubjectFilterParams, SubjectWithClass, UpdateSubjectDto,
};

use crate::modules::{ensure_exists, unique_violation};

const DUPLICATE_SUBJECT: &str = "A subject with this name already exists in this class";

const SUBJECT_WITH_CLASS: &str = r#"SELECT s.id, s.class_id, c.name AS class_name, s.name,
       s.description, s.created_at, s.updated_at
FROM subjects s
JOIN classes c ON c.id = s.class_id"#;

pub struct SubjectService;

impl SubjectService {
    #[instrument(skip(db))]
    pub async fn get_subjects(
        db: &PgPool,
        filters: SubjectFilterParams,
    ) -> Result<Vec<SubjectWithClass>, AppError> {
        let query = format!(
            "{SUBJECT_WITH_CLASS} WHERE ($1::uuid IS NULL OR s.class_id = $1) ORDER BY c.name, s.name"
        );

        let subjects = sqlx::query_as::<_, SubjectWithClass>(&query)
            .bind(filters.class_id)
            .fetch_all(db)
            .await?;

        Ok(subjects)
    }

    #[instrument(skip(db))]
    pub async fn get_subject(db: &PgPool, id: Uuid) -> Result<SubjectWithClass, AppError> {
        let query = format!("{SUBJECT_WITH_CLASS} WHERE s.id = $1");

        sqlx::query_as::<_, SubjectWithClass>(&query)
            .bind(id)
            .fetch_optional(db)
            .await?
            .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Subject not found")))
    }

    #[instrument(skip(db))]
    pub async fn get_subjects_of_class(
        db: &PgPool,
        class_id: Uuid,
    ) -> Result<Vec<Subject>, AppError> {
        ensure_exists(db, "classes", "Class", class_id).await?;

        let subjects = sqlx::query_as::<_, Subject>(
            r#"SELECT id, class_id, name, description, created_at, updated_at
               FROM subjects WHERE class_id = $1 ORDER BY name"#,
        )
        .bind(class_id)
        .fetch_all(db)
        .await?;

        Ok(subjects)
    }

    #[instrument(skip(db))]
    pub async fn create_subject(db: &PgPool, dto: CreateSubjectDto) -> Result<Subject, AppError> {
        ensure_exists(db, "classes", "Class", dto.class_id).await?;

        let subject = sqlx::query_as::<_, Subject>(
            r#"INSERT INTO subjects (class_id, name, description)
               VALUES ($1, $2, $3)
               RETURNING id, class_id, name, description, created_at, updated_at"#,
        )
        .bind(dto.class_id)
        .bind(dto.name.trim())
        .bind(&dto.description)
        .fetch_one(db)
        .await
        .map_err(unique_violation(DUPLICATE_SUBJECT))?;

        Ok(subject)
    }

    #[instrument(skip(db))]
    pub async fn update_subject(
        db: &PgPool,
        id: Uuid,
        dto: UpdateSubjectDto,
    ) -> Result<Subject, AppError> {
        sqlx::query_as::<_, Subject>(
            r#"UPDATE subjects
               SET name = COALESCE($2, name),
                   description = COALESCE($3, description),
                   updated_at = NOW()
               WHERE id = $1
               RETURNING id, class_id, name, description, created_at, updated_at"#,
        )
        .bind(id)
        .bind(dto.name.as_deref().map(str::trim))
        .bind(&dto.description)
        .fetch_optional(db)
        .await
        .map_err(unique_violation(DUPLICATE_SUBJECT))?
        .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Subject not found")))
    }

    #[instrument(skip(db))]
    pub async fn delete_subject(db: &PgPool, id: Uuid) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM subjects WHERE id = $1")
            .bind(id)
            .execute(db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(anyhow::anyhow!("Subject not found")));
        }

        Ok(())
    }
}
