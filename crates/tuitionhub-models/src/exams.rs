use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::collections::HashSet;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::{Validate, ValidationError};

use tuitionhub_core::serde::deserialize_uuid_filter;

#[derive(Debug, Clone, FromRow)]
pub struct ExamRow {
    pub id: Uuid,
    pub class_id: Uuid,
    pub class_name: String,
    pub name: String,
    pub exam_date: NaiveDate,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// One subject covered by an exam, with its marks ceiling.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct ExamSubjectInfo {
    /// Exam subject id, used when entering marks
    pub id: Uuid,
    pub exam_id: Uuid,
    pub subject_id: Uuid,
    pub subject_name: String,
    pub max_marks: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Exam {
    pub id: Uuid,
    pub class_id: Uuid,
    pub class_name: String,
    pub name: String,
    pub exam_date: NaiveDate,
    pub description: Option<String>,
    pub subjects: Vec<ExamSubjectInfo>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Exam {
    pub fn from_row(row: ExamRow, subjects: Vec<ExamSubjectInfo>) -> Self {
        Self {
            id: row.id,
            class_id: row.class_id,
            class_name: row.class_name,
            name: row.name,
            exam_date: row.exam_date,
            description: row.description,
            subjects,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct ExamSubjectDto {
    pub subject_id: Uuid,
    #[validate(range(exclusive_min = 0.0, message = "Max marks must be greater than 0"))]
    #[schema(example = 100.0)]
    pub max_marks: f64,
}

/// Body for both creating and replacing an exam.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct ExamDto {
    #[validate(length(min = 1, max = 100, message = "Name must be 1-100 characters"))]
    #[schema(example = "Mid-term Examination")]
    pub name: String,
    pub exam_date: NaiveDate,
    pub class_id: Uuid,
    #[validate(length(max = 1000))]
    pub description: Option<String>,
    #[validate(
        length(min = 1, message = "Add at least one subject"),
        custom(function = "validate_distinct_subjects"),
        nested
    )]
    pub subjects: Vec<ExamSubjectDto>,
}

pub type CreateExamDto = ExamDto;
pub type UpdateExamDto = ExamDto;

fn validate_distinct_subjects(subjects: &[ExamSubjectDto]) -> Result<(), ValidationError> {
    let mut seen = HashSet::new();
    if subjects.iter().all(|s| seen.insert(s.subject_id)) {
        Ok(())
    } else {
        Err(ValidationError::new("duplicate_subject")
            .with_message("Each subject can only appear once in an exam".into()))
    }
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ExamFilterParams {
    #[serde(default, deserialize_with = "deserialize_uuid_filter")]
    #[param(value_type = Option<String>)]
    pub class_id: Option<Uuid>,
}
