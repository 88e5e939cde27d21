use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

pub use tuitionhub_performance::{AttendanceStatus, AttendanceSummary};

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct AttendanceRecord {
    pub id: Uuid,
    pub user_id: Uuid,
    pub class_id: Uuid,
    pub class_name: String,
    pub date: NaiveDate,
    pub status: AttendanceStatus,
    pub marked_by: Option<Uuid>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct RosterParams {
    pub class_id: Uuid,
    /// Day to mark, `YYYY-MM-DD`
    pub date: NaiveDate,
}

/// A student of the class and their status for the requested day, if marked.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct RosterEntry {
    pub user_id: Uuid,
    pub full_name: String,
    pub roll_number: Option<String>,
    pub status: Option<AttendanceStatus>,
    pub notes: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct RosterResponse {
    pub class_id: Uuid,
    pub date: NaiveDate,
    pub students: Vec<RosterEntry>,
    /// Tally over the students already marked for the day
    pub summary: AttendanceSummary,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct AttendanceEntryDto {
    pub user_id: Uuid,
    pub status: AttendanceStatus,
    #[validate(length(max = 500, message = "Notes must be at most 500 characters"))]
    pub notes: Option<String>,
}

/// Replaces every record of `class_id` on `date` with `records`.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct SaveAttendanceDto {
    pub class_id: Uuid,
    pub date: NaiveDate,
    #[validate(nested)]
    pub records: Vec<AttendanceEntryDto>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SaveAttendanceResponse {
    pub class_id: Uuid,
    pub date: NaiveDate,
    pub saved: usize,
    pub summary: AttendanceSummary,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct MyAttendanceResponse {
    pub records: Vec<AttendanceRecord>,
    pub summary: AttendanceSummary,
}
