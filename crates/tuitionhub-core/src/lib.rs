//! # TuitionHub Core
//!
//! Foundational types shared by every TuitionHub crate:
//!
//! - [`errors`]: `AppError`, the HTTP-aware error type returned by handlers
//! - [`pagination`]: limit/offset/page query parameters and response metadata
//! - [`password`]: bcrypt hashing and verification
//! - [`serde`]: lenient deserializers for query strings
//! - [`validation`]: the `ValidatedJson` extractor
//!
//! # Example
//!
//! ```ignore
//! use tuitionhub_core::errors::AppError;
//! use tuitionhub_core::password::{hash_password, verify_password};
//!
//! let error = AppError::not_found(anyhow::anyhow!("Class not found"));
//! let hash = hash_password("secure_password")?;
//! ```

pub mod errors;
pub mod pagination;
pub mod password;
pub mod serde;
pub mod validation;

pub use errors::AppError;
pub use pagination::{PaginationMeta, PaginationParams};
pub use password::{hash_password, verify_password};
pub use validation::ValidatedJson;
