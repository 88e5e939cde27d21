use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use tuitionhub_performance::ExamMark;

/// One student's mark for one exam subject, as shown on the entry sheet.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct StudentMark {
    pub id: Uuid,
    pub user_id: Uuid,
    pub full_name: String,
    pub roll_number: Option<String>,
    pub exam_subject_id: Uuid,
    pub marks_obtained: Option<f64>,
    pub max_marks: f64,
    pub remarks: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct MarkEntryDto {
    /// Student mark id
    pub id: Uuid,
    #[validate(range(min = 0.0, message = "Marks cannot be negative"))]
    pub marks_obtained: Option<f64>,
    #[validate(length(max = 500, message = "Remarks must be at most 500 characters"))]
    pub remarks: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct SaveMarksDto {
    #[validate(nested)]
    pub marks: Vec<MarkEntryDto>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SaveMarksResponse {
    pub updated: usize,
    pub marks: Vec<StudentMark>,
}

/// A graded mark joined with exam and subject, fed to the marks aggregator.
#[derive(Debug, Clone, FromRow)]
pub struct ExamMarkRow {
    pub exam_id: Uuid,
    pub exam_name: String,
    pub exam_date: NaiveDate,
    pub subject_name: String,
    pub marks_obtained: f64,
    pub max_marks: f64,
}

impl From<ExamMarkRow> for ExamMark {
    fn from(row: ExamMarkRow) -> Self {
        ExamMark {
            exam_id: row.exam_id,
            exam_name: row.exam_name,
            exam_date: row.exam_date,
            subject_name: row.subject_name,
            marks_obtained: row.marks_obtained,
            max_marks: row.max_marks,
        }
    }
}
