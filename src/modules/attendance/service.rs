use std::collections::HashSet;

use chrono::NaiveDate;
use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use tuitionhub_core::AppError;
use tuitionhub_models::attendance::{
    AttendanceRecord, AttendanceSummary, MyAttendanceResponse, RosterEntry, RosterResponse,
    SaveAttendanceDto, SaveAttendanceResponse,
};
use tuitionhub_performance::{LatePolicy, summarize_attendance};

use crate::metrics::track_attendance_saved;
use crate::modules::ensure_exists;

pub struct AttendanceService;

impl AttendanceService {
    /// Students of the class ordered by name, each with the status marked for
    /// `date` if any. The summary only counts students already marked.
    #[instrument(skip(db))]
    pub async fn get_roster(
        db: &PgPool,
        class_id: Uuid,
        date: NaiveDate,
        policy: LatePolicy,
    ) -> Result<RosterResponse, AppError> {
        ensure_exists(db, "classes", "Class", class_id).await?;

        let students = sqlx::query_as::<_, RosterEntry>(
            r#"SELECT u.id AS user_id, u.full_name, u.roll_number, a.status, a.notes
               FROM users u
               LEFT JOIN attendance a
                 ON a.user_id = u.id AND a.class_id = $1 AND a.date = $2
               WHERE u.role = 'student' AND u.class_id = $1
               ORDER BY u.full_name, u.id"#,
        )
        .bind(class_id)
        .bind(date)
        .fetch_all(db)
        .await?;

        let summary = summarize_attendance(
            students
                .iter()
                .filter_map(|s| s.status.map(|status| status.as_str())),
            policy,
        );

        Ok(RosterResponse {
            class_id,
            date,
            students,
            summary,
        })
    }

    /// Replaces the class's records for the day in one transaction.
    #[instrument(skip(db, dto), fields(class_id = %dto.class_id, date = %dto.date, records = dto.records.len()))]
    pub async fn save_attendance(
        db: &PgPool,
        dto: SaveAttendanceDto,
        marked_by: Uuid,
        policy: LatePolicy,
    ) -> Result<SaveAttendanceResponse, AppError> {
        ensure_exists(db, "classes", "Class", dto.class_id).await?;

        let mut seen = HashSet::new();
        if !dto.records.iter().all(|r| seen.insert(r.user_id)) {
            return Err(AppError::bad_request(anyhow::anyhow!(
                "Each student can only be marked once per day"
            )));
        }

        let user_ids: Vec<Uuid> = dto.records.iter().map(|r| r.user_id).collect();

        let mut tx = db.begin().await?;

        let enrolled = sqlx::query_scalar::<_, i64>(
            r#"SELECT COUNT(*) FROM users
               WHERE role = 'student' AND class_id = $1 AND id = ANY($2)"#,
        )
        .bind(dto.class_id)
        .bind(&user_ids)
        .fetch_one(&mut *tx)
        .await?;

        if enrolled != user_ids.len() as i64 {
            return Err(AppError::bad_request(anyhow::anyhow!(
                "Every record must belong to a student of this class"
            )));
        }

        sqlx::query("DELETE FROM attendance WHERE class_id = $1 AND date = $2")
            .bind(dto.class_id)
            .bind(dto.date)
            .execute(&mut *tx)
            .await?;

        for record in &dto.records {
            sqlx::query(
                r#"INSERT INTO attendance (user_id, class_id, date, status, marked_by, notes)
                   VALUES ($1, $2, $3, $4, $5, $6)"#,
            )
            .bind(record.user_id)
            .bind(dto.class_id)
            .bind(dto.date)
            .bind(record.status)
            .bind(marked_by)
            .bind(&record.notes)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        let summary =
            summarize_attendance(dto.records.iter().map(|r| r.status.as_str()), policy);
        track_attendance_saved(summary.present, summary.absent, summary.late);

        Ok(SaveAttendanceResponse {
            class_id: dto.class_id,
            date: dto.date,
            saved: dto.records.len(),
            summary,
        })
    }

    /// Every record of the user, newest first.
    #[instrument(skip(db))]
    pub async fn get_user_records(
        db: &PgPool,
        user_id: Uuid,
    ) -> Result<Vec<AttendanceRecord>, AppError> {
        let records = sqlx::query_as::<_, AttendanceRecord>(
            r#"SELECT a.id, a.user_id, a.class_id, c.name AS class_name, a.date, a.status,
                      a.marked_by, a.notes, a.created_at
               FROM attendance a
               JOIN classes c ON c.id = a.class_id
               WHERE a.user_id = $1
               ORDER BY a.date DESC, c.name"#,
        )
        .bind(user_id)
        .fetch_all(db)
        .await?;

        Ok(records)
    }

    pub fn summarize(records: &[AttendanceRecord], policy: LatePolicy) -> AttendanceSummary {
        summarize_attendance(records.iter().map(|r| r.status.as_str()), policy)
    }

    #[instrument(skip(db))]
    pub async fn get_my_attendance(
        db: &PgPool,
        user_id: Uuid,
        policy: LatePolicy,
    ) -> Result<MyAttendanceResponse, AppError> {
        let records = Self::get_user_records(db, user_id).await?;
        let summary = Self::summarize(&records, policy);

        Ok(MyAttendanceResponse { records, summary })
    }
}
