use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use tuitionhub_core::AppError;
use tuitionhub_models::UserRole;

/// Access token claims.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Claims {
    /// User ID
    pub sub: String,
    pub email: String,
    pub role: UserRole,
    /// Expiration (Unix timestamp)
    pub exp: usize,
    /// Issued at (Unix timestamp)
    pub iat: usize,
}

impl Claims {
    pub fn user_id(&self) -> Result<Uuid, AppError> {
        Uuid::parse_str(&self.sub)
            .map_err(|_| AppError::unauthorized("Invalid user ID in token".to_string()))
    }

    pub fn is_admin(&self) -> bool {
        self.role == UserRole::Admin
    }
}

/// Refresh token claims. `jti` makes every issued token unique.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefreshTokenClaims {
    pub sub: String,
    pub email: String,
    pub exp: usize,
    pub iat: usize,
    pub jti: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn claims(sub: &str, role: UserRole) -> Claims {
        Claims {
            sub: sub.to_string(),
            email: "tutor@example.com".to_string(),
            role,
            exp: 1_900_000_000,
            iat: 1_800_000_000,
        }
    }

    #[test]
    fn test_user_id_parses_subject() {
        let id = Uuid::new_v4();
        assert_eq!(claims(&id.to_string(), UserRole::Student).user_id().unwrap(), id);
    }

    #[test]
    fn test_user_id_rejects_garbage() {
        let err = claims("not-a-uuid", UserRole::Student).user_id().unwrap_err();
        assert_eq!(err.status.as_u16(), 401);
    }

    #[test]
    fn test_role_is_serialized() {
        let json = serde_json::to_string(&claims("x", UserRole::Admin)).unwrap();
        assert!(json.contains(r#""role":"admin""#));
        assert!(claims("x", UserRole::Admin).is_admin());
        assert!(!claims("x", UserRole::Student).is_admin());
    }
}
