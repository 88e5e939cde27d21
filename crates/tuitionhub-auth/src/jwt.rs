//! Token creation and verification (HS256).
//!
//! Two token kinds are issued at login:
//!
//! - **Access tokens** carry the user id, email and role, and authenticate
//!   every `/api` request.
//! - **Refresh tokens** carry only the user id, email and a random `jti`, and
//!   can be exchanged at `/api/auth/refresh` for a new pair.
//!
//! A refresh token has no `role` claim, so it never decodes as an access token.
//!
//! # Example
//!
//! ```ignore
//! use tuitionhub_auth::{create_access_token, verify_token};
//! use tuitionhub_config::JwtConfig;
//! use tuitionhub_models::UserRole;
//!
//! let config = JwtConfig::from_env();
//! let token = create_access_token(user_id, "asha@example.com", UserRole::Student, &config)?;
//! let claims = verify_token(&token, &config)?;
//! assert_eq!(claims.role, UserRole::Student);
//! ```

use chrono::Utc;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use uuid::Uuid;

use tuitionhub_config::JwtConfig;
use tuitionhub_core::AppError;
use tuitionhub_models::UserRole;

use crate::claims::{Claims, RefreshTokenClaims};

/// Creates a short-lived access token for an authenticated user.
///
/// # Arguments
///
/// * `user_id` - The user's UUID, stored as `sub`
/// * `email` - The user's email address
/// * `role` - Admin or student; checked by `RequireAdmin`
/// * `jwt_config` - Secret and `access_token_expiry` in seconds
///
/// # Errors
///
/// Returns a 500 [`AppError`] if encoding fails.
pub fn create_access_token(
    user_id: Uuid,
    email: &str,
    role: UserRole,
    jwt_config: &JwtConfig,
) -> Result<String, AppError> {
    let now = Utc::now().timestamp() as usize;

    let claims = Claims {
        sub: user_id.to_string(),
        email: email.to_string(),
        role,
        exp: now + jwt_config.access_token_expiry as usize,
        iat: now,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(jwt_config.secret.as_bytes()),
    )
    .map_err(|e| AppError::internal_error(format!("Failed to create token: {}", e)))
}

/// Decodes an access token, checking its signature and expiry.
///
/// # Errors
///
/// Returns a 401 [`AppError`] for a bad signature, an expired token or a
/// refresh token presented in its place.
pub fn verify_token(token: &str, jwt_config: &JwtConfig) -> Result<Claims, AppError> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(jwt_config.secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(|_| AppError::unauthorized("Invalid or expired token".to_string()))
}

/// Creates a long-lived refresh token with a fresh `jti`.
///
/// # Errors
///
/// Returns a 500 [`AppError`] if encoding fails.
pub fn create_refresh_token(
    user_id: Uuid,
    email: &str,
    jwt_config: &JwtConfig,
) -> Result<String, AppError> {
    let now = Utc::now().timestamp() as usize;

    let claims = RefreshTokenClaims {
        sub: user_id.to_string(),
        email: email.to_string(),
        exp: now + jwt_config.refresh_token_expiry as usize,
        iat: now,
        jti: Uuid::new_v4().to_string(),
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(jwt_config.secret.as_bytes()),
    )
    .map_err(|e| AppError::internal_error(format!("Failed to create refresh token: {}", e)))
}

/// Decodes a refresh token.
///
/// # Errors
///
/// Returns a 401 [`AppError`] if the token is invalid or expired.
pub fn verify_refresh_token(
    token: &str,
    jwt_config: &JwtConfig,
) -> Result<RefreshTokenClaims, AppError> {
    decode::<RefreshTokenClaims>(
        token,
        &DecodingKey::from_secret(jwt_config.secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(|_| AppError::unauthorized("Invalid or expired refresh token".to_string()))
}
