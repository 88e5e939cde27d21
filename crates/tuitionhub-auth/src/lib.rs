//! # TuitionHub Auth
//!
//! JWT claims and token helpers.
//!
//! - **Access token** ([`Claims`]): short-lived, carries the user's role so
//!   admin checks need no database round trip
//! - **Refresh token** ([`RefreshTokenClaims`]): long-lived, exchanged for a
//!   fresh token pair
//!
//! # Example
//!
//! ```ignore
//! use tuitionhub_auth::{create_access_token, verify_token};
//! use tuitionhub_config::JwtConfig;
//! use tuitionhub_models::UserRole;
//!
//! let config = JwtConfig::from_env();
//! let token = create_access_token(user_id, "admin@example.com", UserRole::Admin, &config)?;
//! let claims = verify_token(&token, &config)?;
//! ```

pub mod claims;
pub mod jwt;

pub use claims::{Claims, RefreshTokenClaims};
pub use jwt::{create_access_token, create_refresh_token, verify_refresh_token, verify_token};
