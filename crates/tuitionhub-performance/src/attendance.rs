//! Attendance aggregation.
//!
//! Statuses arrive as raw strings so that a row carrying a value outside the
//! known set is still counted in `total` while being left out of every
//! per-status count.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use utoipa::ToSchema;

/// Attendance status recorded per student, per class, per date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(
    feature = "sqlx",
    derive(sqlx::Type),
    sqlx(type_name = "attendance_status", rename_all = "lowercase")
)]
pub enum AttendanceStatus {
    Present,
    Absent,
    Late,
}

impl AttendanceStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Present => "present",
            Self::Absent => "absent",
            Self::Late => "late",
        }
    }
}

impl fmt::Display for AttendanceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AttendanceStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "present" => Ok(Self::Present),
            "absent" => Ok(Self::Absent),
            "late" => Ok(Self::Late),
            other => Err(format!("Unknown attendance status: {}", other)),
        }
    }
}

/// How a late arrival contributes to the attendance percentage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum LatePolicy {
    /// A late mark counts as half a present day.
    #[default]
    HalfPresent,
    /// A late mark counts as a full present day.
    FullPresent,
}

impl LatePolicy {
    pub fn late_weight(&self) -> f64 {
        match self {
            Self::HalfPresent => 0.5,
            Self::FullPresent => 1.0,
        }
    }
}

impl FromStr for LatePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "half" | "half_present" => Ok(Self::HalfPresent),
            "full" | "full_present" => Ok(Self::FullPresent),
            other => Err(format!("Unknown late policy: {}", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize, ToSchema)]
pub struct AttendanceSummary {
    pub present: usize,
    pub absent: usize,
    pub late: usize,
    pub total: usize,
    /// Zero when there are no records.
    pub percentage: f64,
}

/// Counts statuses and derives the attendance percentage.
///
/// `percentage = (present + late * weight) * 100 / total`, or `0` for an
/// empty sequence. Unrecognised statuses only contribute to `total`.
pub fn summarize_attendance<I, S>(statuses: I, policy: LatePolicy) -> AttendanceSummary
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut summary = AttendanceSummary::default();

    for status in statuses {
        summary.total += 1;
        match status.as_ref().parse::<AttendanceStatus>() {
            Ok(AttendanceStatus::Present) => summary.present += 1,
            Ok(AttendanceStatus::Absent) => summary.absent += 1,
            Ok(AttendanceStatus::Late) => summary.late += 1,
            Err(_) => {}
        }
    }

    if summary.total > 0 {
        let attended = summary.present as f64 + summary.late as f64 * policy.late_weight();
        summary.percentage = attended * 100.0 / summary.total as f64;
    }

    summary
}
