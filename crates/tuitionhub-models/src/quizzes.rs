use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::{Validate, ValidationError};

use tuitionhub_core::serde::deserialize_uuid_filter;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Quiz {
    pub id: Uuid,
    pub chapter_id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub duration_minutes: i32,
    pub total_marks: i32,
    pub passing_marks: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A quiz together with the chapter and subject it belongs to.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct QuizWithContext {
    pub id: Uuid,
    pub chapter_id: Uuid,
    pub chapter_name: String,
    pub subject_id: Uuid,
    pub subject_name: String,
    pub title: String,
    pub description: Option<String>,
    pub duration_minutes: i32,
    pub total_marks: i32,
    pub passing_marks: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[validate(schema(function = "validate_passing_marks"))]
pub struct CreateQuizDto {
    pub chapter_id: Uuid,
    #[validate(length(min = 1, max = 100, message = "Title must be 1-100 characters"))]
    #[schema(example = "Quadratic Equations: Quick Check")]
    pub title: String,
    #[validate(length(max = 1000))]
    pub description: Option<String>,
    #[validate(range(min = 1, max = 600, message = "Duration must be 1-600 minutes"))]
    #[schema(example = 30)]
    pub duration_minutes: i32,
    #[validate(range(min = 1, message = "Total marks must be at least 1"))]
    #[schema(example = 20)]
    pub total_marks: i32,
    #[validate(range(min = 0, message = "Passing marks cannot be negative"))]
    #[schema(example = 8)]
    pub passing_marks: i32,
}

fn validate_passing_marks(dto: &CreateQuizDto) -> Result<(), ValidationError> {
    if dto.passing_marks <= dto.total_marks {
        Ok(())
    } else {
        Err(ValidationError::new("passing_above_total")
            .with_message("Passing marks cannot exceed total marks".into()))
    }
}

/// Omitted fields keep their value. A resulting `passing_marks` above
/// `total_marks` is rejected by the database check.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateQuizDto {
    #[validate(length(min = 1, max = 100, message = "Title must be 1-100 characters"))]
    pub title: Option<String>,
    #[validate(length(max = 1000))]
    pub description: Option<String>,
    #[validate(range(min = 1, max = 600, message = "Duration must be 1-600 minutes"))]
    pub duration_minutes: Option<i32>,
    #[validate(range(min = 1, message = "Total marks must be at least 1"))]
    pub total_marks: Option<i32>,
    #[validate(range(min = 0, message = "Passing marks cannot be negative"))]
    pub passing_marks: Option<i32>,
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct QuizFilterParams {
    #[serde(default, deserialize_with = "deserialize_uuid_filter")]
    #[param(value_type = Option<String>)]
    pub chapter_id: Option<Uuid>,
    #[serde(default, deserialize_with = "deserialize_uuid_filter")]
    #[param(value_type = Option<String>)]
    pub subject_id: Option<Uuid>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quiz(total_marks: i32, passing_marks: i32) -> CreateQuizDto {
        CreateQuizDto {
            chapter_id: Uuid::new_v4(),
            title: "Chapter check".to_string(),
            description: None,
            duration_minutes: 20,
            total_marks,
            passing_marks,
        }
    }

    #[test]
    fn test_passing_marks_within_total() {
        assert!(quiz(20, 8).validate().is_ok());
        assert!(quiz(20, 20).validate().is_ok());
        assert!(quiz(20, 21).validate().is_err());
    }

    #[test]
    fn test_duration_and_marks_bounds() {
        let dto = CreateQuizDto {
            duration_minutes: 0,
            ..quiz(20, 8)
        };
        assert!(dto.validate().is_err());
        assert!(quiz(0, 0).validate().is_err());
    }
}
