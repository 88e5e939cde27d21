//! # TuitionHub Config
//!
//! Configuration structures loaded from environment variables. Each one has a
//! `from_env()` constructor that falls back to development defaults.
//!
//! - [`jwt`]: token signing secret and lifetimes
//! - [`cors`]: allowed browser origins
//! - [`server`]: bind address and ports
//! - [`performance`]: aggregation policy (late attendance weighting)
//!
//! # Example
//!
//! ```ignore
//! use tuitionhub_config::{CorsConfig, JwtConfig, PerformanceConfig, ServerConfig};
//!
//! let jwt_config = JwtConfig::from_env();
//! let server = ServerConfig::from_env();
//! let performance = PerformanceConfig::from_env();
//! ```

pub mod cors;
pub mod jwt;
pub mod performance;
pub mod server;

pub use cors::CorsConfig;
pub use jwt::JwtConfig;
pub use performance::PerformanceConfig;
pub use server::ServerConfig;

/// Reads `key` and parses it, falling back to `default` when unset or invalid.
pub(crate) fn env_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(default)
}
