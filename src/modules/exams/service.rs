use std::collections::HashMap;

use sqlx::{PgConnection, PgPool};
use tracing::instrument;
use uuid::Uuid;

use tuitionhub_core::AppError;
use tuitionhub_models::exams::{
    Exam, ExamDto, ExamFilterParams, ExamRow, ExamSubjectDto, ExamSubjectInfo,
};
use tuitionhub_models::marks::{SaveMarksDto, SaveMarksResponse, StudentMark};

use crate::metrics::{track_exam_created, track_marks_saved};
use crate::modules::ensure_exists;

const EXAM_ROW: &str = r#"SELECT e.id, e.class_id, c.name AS class_name, e.name, e.exam_date,
       e.description, e.created_at, e.updated_at
FROM exams e
JOIN classes c ON c.id = e.class_id"#;

const EXAM_SUBJECTS: &str = r#"SELECT es.id, es.exam_id, es.subject_id, s.name AS subject_name,
       es.max_marks
FROM exam_subjects es
JOIN subjects s ON s.id = es.subject_id
WHERE es.exam_id = ANY($1)
ORDER BY s.name"#;

pub struct ExamService;

impl ExamService {
    /// Newest first, each with its subjects.
    #[instrument(skip(db))]
    pub async fn get_exams(
        db: &PgPool,
        filters: ExamFilterParams,
    ) -> Result<Vec<Exam>, AppError> {
        let query = format!(
            "{EXAM_ROW} WHERE ($1::uuid IS NULL OR e.class_id = $1) \
             ORDER BY e.exam_date DESC, e.created_at DESC"
        );
        let rows = sqlx::query_as::<_, ExamRow>(&query)
            .bind(filters.class_id)
            .fetch_all(db)
            .await?;

        let ids: Vec<Uuid> = rows.iter().map(|r| r.id).collect();
        let mut subjects: HashMap<Uuid, Vec<ExamSubjectInfo>> = HashMap::new();
        for subject in sqlx::query_as::<_, ExamSubjectInfo>(EXAM_SUBJECTS)
            .bind(&ids)
            .fetch_all(db)
            .await?
        {
            subjects.entry(subject.exam_id).or_default().push(subject);
        }

        Ok(rows
            .into_iter()
            .map(|row| {
                let exam_subjects = subjects.remove(&row.id).unwrap_or_default();
                Exam::from_row(row, exam_subjects)
            })
            .collect())
    }

    #[instrument(skip(db))]
    pub async fn get_exam(db: &PgPool, id: Uuid) -> Result<Exam, AppError> {
        let query = format!("{EXAM_ROW} WHERE e.id = $1");
        let row = sqlx::query_as::<_, ExamRow>(&query)
            .bind(id)
            .fetch_optional(db)
            .await?
            .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Exam not found")))?;

        let subjects = sqlx::query_as::<_, ExamSubjectInfo>(EXAM_SUBJECTS)
            .bind(vec![id])
            .fetch_all(db)
            .await?;

        Ok(Exam::from_row(row, subjects))
    }

    /// Creates the exam, its subjects and a blank mark for every student of
    /// the class, all in one transaction.
    #[instrument(skip(db, dto), fields(class_id = %dto.class_id, subjects = dto.subjects.len()))]
    pub async fn create_exam(db: &PgPool, dto: ExamDto) -> Result<Exam, AppError> {
        ensure_exists(db, "classes", "Class", dto.class_id).await?;

        let mut tx = db.begin().await?;
        ensure_subjects_in_class(&mut *tx, dto.class_id, &dto.subjects).await?;

        let exam_id = sqlx::query_scalar::<_, Uuid>(
            r#"INSERT INTO exams (class_id, name, exam_date, description)
               VALUES ($1, $2, $3, $4)
               RETURNING id"#,
        )
        .bind(dto.class_id)
        .bind(dto.name.trim())
        .bind(dto.exam_date)
        .bind(&dto.description)
        .fetch_one(&mut *tx)
        .await?;

        for subject in &dto.subjects {
            sqlx::query(
                "INSERT INTO exam_subjects (exam_id, subject_id, max_marks) VALUES ($1, $2, $3)",
            )
            .bind(exam_id)
            .bind(subject.subject_id)
            .bind(subject.max_marks)
            .execute(&mut *tx)
            .await?;
        }

        create_blank_marks(&mut *tx, exam_id, dto.class_id).await?;
        tx.commit().await?;

        track_exam_created(dto.subjects.len());
        Self::get_exam(db, exam_id).await
    }

    /// Replaces the exam and its subject set. Subjects kept across the update
    /// keep their marks and take the new ceiling; dropped subjects lose theirs.
    /// Entered marks of students who have since left the class are kept.
    #[instrument(skip(db, dto), fields(class_id = %dto.class_id, subjects = dto.subjects.len()))]
    pub async fn update_exam(db: &PgPool, id: Uuid, dto: ExamDto) -> Result<Exam, AppError> {
        ensure_exists(db, "classes", "Class", dto.class_id).await?;

        let mut tx = db.begin().await?;

        let updated = sqlx::query(
            r#"UPDATE exams
               SET class_id = $2, name = $3, exam_date = $4, description = $5,
                   updated_at = NOW()
               WHERE id = $1"#,
        )
        .bind(id)
        .bind(dto.class_id)
        .bind(dto.name.trim())
        .bind(dto.exam_date)
        .bind(&dto.description)
        .execute(&mut *tx)
        .await?;

        if updated.rows_affected() == 0 {
            return Err(AppError::not_found(anyhow::anyhow!("Exam not found")));
        }

        ensure_subjects_in_class(&mut *tx, dto.class_id, &dto.subjects).await?;

        let subject_ids: Vec<Uuid> = dto.subjects.iter().map(|s| s.subject_id).collect();
        sqlx::query("DELETE FROM exam_subjects WHERE exam_id = $1 AND subject_id <> ALL($2)")
            .bind(id)
            .bind(&subject_ids)
            .execute(&mut *tx)
            .await?;

        for subject in &dto.subjects {
            let exceeded = sqlx::query_scalar::<_, bool>(
                r#"SELECT EXISTS(
                       SELECT 1 FROM student_marks sm
                       JOIN exam_subjects es ON es.id = sm.exam_subject_id
                       WHERE es.exam_id = $1 AND es.subject_id = $2
                         AND sm.marks_obtained > $3)"#,
            )
            .bind(id)
            .bind(subject.subject_id)
            .bind(subject.max_marks)
            .fetch_one(&mut *tx)
            .await?;

            if exceeded {
                return Err(AppError::bad_request(anyhow::anyhow!(
                    "Max marks cannot be lower than marks already entered"
                )));
            }

            sqlx::query(
                r#"INSERT INTO exam_subjects (exam_id, subject_id, max_marks)
                   VALUES ($1, $2, $3)
                   ON CONFLICT (exam_id, subject_id) DO UPDATE SET max_marks = EXCLUDED.max_marks"#,
            )
            .bind(id)
            .bind(subject.subject_id)
            .bind(subject.max_marks)
            .execute(&mut *tx)
            .await?;
        }

        // Blank rows of students no longer in the class are dropped; entered
        // marks stay with the student.
        sqlx::query(
            r#"DELETE FROM student_marks sm
               USING exam_subjects es, users u
               WHERE sm.exam_subject_id = es.id AND sm.user_id = u.id
                 AND es.exam_id = $1
                 AND sm.marks_obtained IS NULL
                 AND (u.class_id IS DISTINCT FROM $2 OR u.role <> 'student')"#,
        )
        .bind(id)
        .bind(dto.class_id)
        .execute(&mut *tx)
        .await?;

        create_blank_marks(&mut *tx, id, dto.class_id).await?;
        tx.commit().await?;

        Self::get_exam(db, id).await
    }

    #[instrument(skip(db))]
    pub async fn delete_exam(db: &PgPool, id: Uuid) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM exams WHERE id = $1")
            .bind(id)
            .execute(db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(anyhow::anyhow!("Exam not found")));
        }

        Ok(())
    }

    /// Marks sheet for one exam subject, ordered by student name.
    #[instrument(skip(db))]
    pub async fn get_subject_marks(
        db: &PgPool,
        exam_id: Uuid,
        exam_subject_id: Uuid,
    ) -> Result<Vec<StudentMark>, AppError> {
        exam_subject_max_marks(db, exam_id, exam_subject_id).await?;
        fetch_marks(db, exam_subject_id).await
    }

    /// Saves every entry or none. Each value must lie within `0..=max_marks`
    /// and each id must be a mark of this exam subject.
    #[instrument(skip(db, dto), fields(entries = dto.marks.len()))]
    pub async fn save_subject_marks(
        db: &PgPool,
        exam_id: Uuid,
        exam_subject_id: Uuid,
        dto: SaveMarksDto,
    ) -> Result<SaveMarksResponse, AppError> {
        let max_marks = exam_subject_max_marks(db, exam_id, exam_subject_id).await?;

        if let Some(value) = dto
            .marks
            .iter()
            .filter_map(|m| m.marks_obtained)
            .find(|v| !mark_in_range(*v, max_marks))
        {
            return Err(AppError::bad_request(anyhow::anyhow!(
                "Marks must be between 0 and {}, got {}",
                max_marks,
                value
            )));
        }

        let mut tx = db.begin().await?;
        for entry in &dto.marks {
            let result = sqlx::query(
                r#"UPDATE student_marks
                   SET marks_obtained = $3, remarks = $4, updated_at = NOW()
                   WHERE id = $1 AND exam_subject_id = $2"#,
            )
            .bind(entry.id)
            .bind(exam_subject_id)
            .bind(entry.marks_obtained)
            .bind(&entry.remarks)
            .execute(&mut *tx)
            .await?;

            if result.rows_affected() == 0 {
                return Err(AppError::bad_request(anyhow::anyhow!(
                    "Mark {} does not belong to this exam subject",
                    entry.id
                )));
            }
        }
        tx.commit().await?;

        track_marks_saved(dto.marks.len());

        Ok(SaveMarksResponse {
            updated: dto.marks.len(),
            marks: fetch_marks(db, exam_subject_id).await?,
        })
    }
}

pub(crate) fn mark_in_range(value: f64, max_marks: f64) -> bool {
    value.is_finite() && (0.0..=max_marks).contains(&value)
}

async fn ensure_subjects_in_class(
    conn: &mut PgConnection,
    class_id: Uuid,
    subjects: &[ExamSubjectDto],
) -> Result<(), AppError> {
    let ids: Vec<Uuid> = subjects.iter().map(|s| s.subject_id).collect();

    let found = sqlx::query_scalar::<_, i64>(
        "SELECT COUNT(*) FROM subjects WHERE class_id = $1 AND id = ANY($2)",
    )
    .bind(class_id)
    .bind(&ids)
    .fetch_one(conn)
    .await?;

    if found != ids.len() as i64 {
        return Err(AppError::bad_request(anyhow::anyhow!(
            "Every subject must belong to the exam's class"
        )));
    }

    Ok(())
}

/// One blank mark per (student of the class, exam subject) pair that has none.
async fn create_blank_marks(
    conn: &mut PgConnection,
    exam_id: Uuid,
    class_id: Uuid,
) -> Result<u64, AppError> {
    let result = sqlx::query(
        r#"INSERT INTO student_marks (user_id, exam_subject_id)
           SELECT u.id, es.id
           FROM users u
           JOIN exam_subjects es ON es.exam_id = $1
           WHERE u.role = 'student' AND u.class_id = $2
           ON CONFLICT (user_id, exam_subject_id) DO NOTHING"#,
    )
    .bind(exam_id)
    .bind(class_id)
    .execute(conn)
    .await?;

    Ok(result.rows_affected())
}

async fn exam_subject_max_marks(
    db: &PgPool,
    exam_id: Uuid,
    exam_subject_id: Uuid,
) -> Result<f64, AppError> {
    sqlx::query_scalar::<_, f64>(
        "SELECT max_marks FROM exam_subjects WHERE id = $1 AND exam_id = $2",
    )
    .bind(exam_subject_id)
    .bind(exam_id)
    .fetch_optional(db)
    .await?
    .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Exam subject not found")))
}

async fn fetch_marks(db: &PgPool, exam_subject_id: Uuid) -> Result<Vec<StudentMark>, AppError> {
    let marks = sqlx::query_as::<_, StudentMark>(
        r#"SELECT sm.id, sm.user_id, u.full_name, u.roll_number, sm.exam_subject_id,
                  sm.marks_obtained, es.max_marks, sm.remarks
           FROM student_marks sm
           JOIN users u ON u.id = sm.user_id
           JOIN exam_subjects es ON es.id = sm.exam_subject_id
           WHERE sm.exam_subject_id = $1
           ORDER BY u.full_name, u.id"#,
    )
    .bind(exam_subject_id)
    .fetch_all(db)
    .await?;

    Ok(marks)
}
