use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::fmt;
use utoipa::ToSchema;
use uuid::Uuid;

/// Account role. Admins manage everything; students read their own data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "user_role", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Admin,
    Student,
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UserRole::Admin => write!(f, "admin"),
            UserRole::Student => write!(f, "student"),
        }
    }
}

/// Full `users` row, password hash included. Never serialized.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: Uuid,
    pub full_name: String,
    pub email: String,
    pub password: String,
    pub role: UserRole,
    pub class_id: Option<Uuid>,
    pub phone: Option<String>,
    pub parent_phone: Option<String>,
    pub roll_number: Option<String>,
    pub avatar_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Public view of a user joined with their class name.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct UserProfile {
    pub id: Uuid,
    pub full_name: String,
    pub email: String,
    pub role: UserRole,
    pub class_id: Option<Uuid>,
    pub class_name: Option<String>,
    pub phone: Option<String>,
    pub parent_phone: Option<String>,
    pub roll_number: Option<String>,
    pub avatar_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Column list for `UserProfile` queries, expects `users u LEFT JOIN classes c`.
pub const PROFILE_COLUMNS: &str = "u.id, u.full_name, u.email, u.role, u.class_id, \
     c.name AS class_name, u.phone, u.parent_phone, u.roll_number, u.avatar_url, \
     u.created_at, u.updated_at";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&UserRole::Admin).unwrap(), r#""admin""#);
        let role: UserRole = serde_json::from_str(r#""student""#).unwrap();
        assert_eq!(role, UserRole::Student);
        assert_eq!(role.to_string(), "student");
    }
}
