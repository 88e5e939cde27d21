//! bcrypt password hashing.
//!
//! Hashes embed their own salt and cost, so [`verify_password`] works for
//! hashes made at any cost, including the cheap ones written by the seeder.

use bcrypt::{DEFAULT_COST, hash, verify};

use crate::errors::AppError;

/// Hashes a password at bcrypt's default cost.
///
/// # Arguments
///
/// * `password` - The plaintext password
///
/// # Errors
///
/// Returns a 500 [`AppError`] if bcrypt fails.
pub fn hash_password(password: &str) -> Result<String, AppError> {
    hash(password, DEFAULT_COST)
        .map_err(|e| AppError::internal_error(format!("Failed to hash password: {}", e)))
}

/// Hashes with a caller-chosen cost. The seeder uses the minimum cost to
/// keep bulk generation fast.
pub fn hash_password_with_cost(password: &str, cost: u32) -> Result<String, AppError> {
    hash(password, cost)
        .map_err(|e| AppError::internal_error(format!("Failed to hash password: {}", e)))
}

/// Checks `password` against a stored bcrypt `hash`.
///
/// # Returns
///
/// `Ok(true)` on a match and `Ok(false)` on a mismatch.
///
/// # Errors
///
/// Returns a 500 [`AppError`] when `hash` is not a valid bcrypt string.
pub fn verify_password(password: &str, hash: &str) -> Result<bool, AppError> {
    verify(password, hash)
        .map_err(|e| AppError::internal_error(format!("Failed to verify password: {}", e)))
}
