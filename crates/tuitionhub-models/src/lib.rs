//! # TuitionHub Models
//!
//! Database rows and request/response DTOs for the TuitionHub API. Rows
//! derive `sqlx::FromRow`; request bodies derive `validator::Validate`; every
//! public shape derives `utoipa::ToSchema` for the OpenAPI document.
//!
//! # Modules
//!
//! - [`users`]: accounts, roles and profiles
//! - [`auth`]: register/login/refresh payloads
//! - [`classes`], [`subjects`], [`chapters`], [`files`]: the content hierarchy
//! - [`students`]: admin-side student management
//! - [`exams`], [`marks`]: exams, their subjects and student marks
//! - [`attendance`]: daily attendance rosters and records
//! - [`leaderboard`]: points, levels and badges
//! - [`quizzes`]: chapter quizzes listed for students

pub mod attendance;
pub mod auth;
pub mod chapters;
pub mod classes;
pub mod exams;
pub mod files;
pub mod leaderboard;
pub mod marks;
pub mod quizzes;
pub mod students;
pub mod subjects;
pub mod users;

pub use auth::{LoginRequest, LoginResponse, RefreshTokenRequest, RegisterRequest};
pub use users::{User, UserProfile, UserRole};
