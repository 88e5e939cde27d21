//! # TuitionHub Performance
//!
//! Pure aggregation over records already fetched from the database. Nothing in
//! this crate performs I/O; every function takes a snapshot of rows and derives
//! a read-only summary from it.
//!
//! - [`attendance`]: counts and percentage over attendance statuses
//! - [`marks`]: per-exam totals, per-subject averages and an overall score
//! - [`grade`]: the percentage → letter grade step function
//! - [`leaderboard`]: deterministic ranking by total points
//!
//! # Example
//!
//! ```
//! use tuitionhub_performance::{LatePolicy, summarize_attendance};
//!
//! let summary = summarize_attendance(["present", "late", "absent", "present"], LatePolicy::HalfPresent);
//! assert_eq!(summary.present, 2);
//! assert_eq!(summary.percentage, 62.5);
//! ```

pub mod attendance;
pub mod error;
pub mod grade;
pub mod leaderboard;
pub mod marks;

pub use attendance::{AttendanceStatus, AttendanceSummary, LatePolicy, summarize_attendance};
pub use error::PerformanceError;
pub use grade::Grade;
pub use leaderboard::{LeaderboardEntry, Rank, RankedEntry, rank_entries, rank_of};
pub use marks::{ExamMark, ExamResult, MarksReport, Score, SubjectAverage, summarize_marks};
