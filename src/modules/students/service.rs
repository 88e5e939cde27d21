use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use tuitionhub_core::{AppError, PaginationMeta, PaginationParams};
use tuitionhub_models::UserProfile;
use tuitionhub_models::students::{
    MarksReportResponse, PaginatedStudentsResponse, StudentAttendanceResponse,
    StudentFilterParams, UpdateStudentDto,
};
use tuitionhub_models::users::PROFILE_COLUMNS;
use tuitionhub_performance::LatePolicy;

use crate::modules::attendance::service::AttendanceService;
use crate::modules::ensure_exists;
use crate::modules::marks::service::MarksService;

const STUDENT_FILTER: &str = r#"FROM users u
LEFT JOIN classes c ON c.id = u.class_id
WHERE u.role = 'student'
  AND ($1::uuid IS NULL OR u.class_id = $1)
  AND ($2::text IS NULL
       OR u.full_name ILIKE $2
       OR u.email ILIKE $2
       OR u.roll_number ILIKE $2)"#;

pub struct StudentService;

impl StudentService {
    #[instrument(skip(db))]
    pub async fn get_students(
        db: &PgPool,
        filters: StudentFilterParams,
        pagination: PaginationParams,
    ) -> Result<PaginatedStudentsResponse, AppError> {
        let pattern = filters.search_term().map(|term| format!("%{}%", term));

        let total = sqlx::query_scalar::<_, i64>(&format!("SELECT COUNT(*) {STUDENT_FILTER}"))
            .bind(filters.class_id)
            .bind(&pattern)
            .fetch_one(db)
            .await?;

        let query = format!(
            "SELECT {PROFILE_COLUMNS} {STUDENT_FILTER} \
             ORDER BY u.full_name, u.id LIMIT $3 OFFSET $4"
        );
        let students = sqlx::query_as::<_, UserProfile>(&query)
            .bind(filters.class_id)
            .bind(&pattern)
            .bind(pagination.limit())
            .bind(pagination.offset())
            .fetch_all(db)
            .await?;

        Ok(PaginatedStudentsResponse {
            data: students,
            meta: PaginationMeta::new(total, &pagination),
        })
    }

    #[instrument(skip(db))]
    pub async fn get_student(db: &PgPool, id: Uuid) -> Result<UserProfile, AppError> {
        let query = format!(
            "SELECT {PROFILE_COLUMNS} FROM users u LEFT JOIN classes c ON c.id = u.class_id \
             WHERE u.id = $1 AND u.role = 'student'"
        );

        sqlx::query_as::<_, UserProfile>(&query)
            .bind(id)
            .fetch_optional(db)
            .await?
            .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Student not found")))
    }

    #[instrument(skip(db))]
    pub async fn update_student(
        db: &PgPool,
        id: Uuid,
        dto: UpdateStudentDto,
    ) -> Result<UserProfile, AppError> {
        if let Some(Some(class_id)) = dto.class_id {
            ensure_exists(db, "classes", "Class", class_id).await?;
        }

        let result = sqlx::query(
            r#"UPDATE users
               SET full_name = COALESCE($2, full_name),
                   class_id = CASE WHEN $3 THEN $4 ELSE class_id END,
                   phone = COALESCE($5, phone),
                   parent_phone = COALESCE($6, parent_phone),
                   roll_number = COALESCE($7, roll_number),
                   updated_at = NOW()
               WHERE id = $1 AND role = 'student'"#,
        )
        .bind(id)
        .bind(dto.full_name.as_deref().map(str::trim))
        .bind(dto.class_id.is_some())
        .bind(dto.class_id.flatten())
        .bind(&dto.phone)
        .bind(&dto.parent_phone)
        .bind(&dto.roll_number)
        .execute(db)
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(anyhow::anyhow!("Student not found")));
        }

        Self::get_student(db, id).await
    }

    /// Profile and attendance are fetched concurrently.
    #[instrument(skip(db))]
    pub async fn get_student_attendance(
        db: &PgPool,
        id: Uuid,
        policy: LatePolicy,
    ) -> Result<StudentAttendanceResponse, AppError> {
        let (student, records) = tokio::try_join!(
            Self::get_student(db, id),
            AttendanceService::get_user_records(db, id)
        )?;
        let summary = AttendanceService::summarize(&records, policy);

        Ok(StudentAttendanceResponse {
            student,
            records,
            summary,
        })
    }

    #[instrument(skip(db))]
    pub async fn get_student_performance(
        db: &PgPool,
        id: Uuid,
    ) -> Result<MarksReportResponse, AppError> {
        let (_, report) = tokio::try_join!(
            Self::get_student(db, id),
            MarksService::get_report(db, id)
        )?;

        Ok(report)
    }
}
