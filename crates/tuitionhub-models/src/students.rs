//! Admin-side student management.

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use tuitionhub_core::PaginationMeta;
use tuitionhub_core::serde::{deserialize_double_option, deserialize_uuid_filter};
use tuitionhub_performance::{AttendanceSummary, MarksReport};

use crate::attendance::AttendanceRecord;
use crate::users::UserProfile;

/// Search and class filter for the student list. Pagination is read from the
/// same query string through `PaginationParams`.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct StudentFilterParams {
    /// Case-insensitive match on full name, email or roll number
    pub search: Option<String>,
    /// Class id; empty or `all` for every class
    #[serde(default, deserialize_with = "deserialize_uuid_filter")]
    #[param(value_type = Option<String>)]
    pub class_id: Option<Uuid>,
}

impl StudentFilterParams {
    /// Trimmed search term, `None` when blank.
    pub fn search_term(&self) -> Option<&str> {
        self.search
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct PaginatedStudentsResponse {
    pub data: Vec<UserProfile>,
    pub meta: PaginationMeta,
}

/// Only provided fields change. `class_id: null` unassigns the class.
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateStudentDto {
    #[validate(length(min = 1, max = 100, message = "Full name must be 1-100 characters"))]
    pub full_name: Option<String>,
    #[serde(default, deserialize_with = "deserialize_double_option")]
    #[schema(value_type = Option<Uuid>)]
    pub class_id: Option<Option<Uuid>>,
    #[validate(length(max = 20, message = "Phone must be at most 20 characters"))]
    pub phone: Option<String>,
    #[validate(length(max = 20, message = "Parent phone must be at most 20 characters"))]
    pub parent_phone: Option<String>,
    #[validate(length(max = 50, message = "Roll number must be at most 50 characters"))]
    pub roll_number: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct StudentAttendanceResponse {
    pub student: UserProfile,
    pub records: Vec<AttendanceRecord>,
    pub summary: AttendanceSummary,
}

/// `report` is absent when the student has no graded marks yet.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct MarksReportResponse {
    pub has_data: bool,
    pub report: Option<MarksReport>,
}

impl MarksReportResponse {
    pub fn no_data() -> Self {
        Self {
            has_data: false,
            report: None,
        }
    }

    pub fn with_report(report: MarksReport) -> Self {
        Self {
            has_data: true,
            report: Some(report),
        }
    }
}
