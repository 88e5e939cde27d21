use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use tuitionhub_core::AppError;
use tuitionhub_models::marks::ExamMarkRow;
use tuitionhub_models::students::MarksReportResponse;
use tuitionhub_performance::{ExamMark, PerformanceError, summarize_marks};

pub struct MarksService;

impl MarksService {
    /// Graded marks of the user, newest exam first. Blank marks are skipped.
    #[instrument(skip(db))]
    pub async fn get_graded_marks(db: &PgPool, user_id: Uuid) -> Result<Vec<ExamMark>, AppError> {
        let rows = sqlx::query_as::<_, ExamMarkRow>(
            r#"SELECT e.id AS exam_id, e.name AS exam_name, e.exam_date,
                      s.name AS subject_name, sm.marks_obtained, es.max_marks
               FROM student_marks sm
               JOIN exam_subjects es ON es.id = sm.exam_subject_id
               JOIN exams e ON e.id = es.exam_id
               JOIN subjects s ON s.id = es.subject_id
               WHERE sm.user_id = $1 AND sm.marks_obtained IS NOT NULL
               ORDER BY e.exam_date DESC, e.created_at DESC, s.name"#,
        )
        .bind(user_id)
        .fetch_all(db)
        .await?;

        Ok(rows.into_iter().map(ExamMark::from).collect())
    }

    #[instrument(skip(db))]
    pub async fn get_report(db: &PgPool, user_id: Uuid) -> Result<MarksReportResponse, AppError> {
        let marks = Self::get_graded_marks(db, user_id).await?;
        report_from(&marks)
    }
}

pub(crate) fn report_from(marks: &[ExamMark]) -> Result<MarksReportResponse, AppError> {
    match summarize_marks(marks) {
        Ok(report) => Ok(MarksReportResponse::with_report(report)),
        Err(PerformanceError::NoData) => Ok(MarksReportResponse::no_data()),
        Err(e @ PerformanceError::UndefinedPercentage(_)) => Err(AppError::internal(e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_no_marks_is_explicit_no_data() {
        let response = report_from(&[]).unwrap();
        assert!(!response.has_data);
        assert!(response.report.is_none());
    }

    #[test]
    fn test_graded_marks_produce_report() {
        let mark = ExamMark {
            exam_id: Uuid::from_u128(7),
            exam_name: "Unit Test".to_string(),
            exam_date: NaiveDate::from_ymd_opt(2024, 9, 2).unwrap(),
            subject_name: "Physics".to_string(),
            marks_obtained: 45.0,
            max_marks: 50.0,
        };

        let response = report_from(&[mark]).unwrap();
        assert!(response.has_data);
        assert_eq!(response.report.unwrap().overall.percentage, 90.0);
    }

    #[test]
    fn test_zero_max_marks_is_server_error() {
        let mark = ExamMark {
            exam_id: Uuid::from_u128(7),
            exam_name: "Broken".to_string(),
            exam_date: NaiveDate::from_ymd_opt(2024, 9, 2).unwrap(),
            subject_name: "Physics".to_string(),
            marks_obtained: 0.0,
            max_marks: 0.0,
        };

        let err = report_from(&[mark]).unwrap_err();
        assert_eq!(err.status.as_u16(), 500);
    }
}
