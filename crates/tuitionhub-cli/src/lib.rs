//! # TuitionHub CLI
//!
//! Database seeding utilities for local development and demos.
//!
//! The binary wraps these functions; the library is kept separate so the
//! seeder can be driven from scripts as well.
//!
//! ## Usage
//!
//! ```ignore
//! use tuitionhub_cli::seeder::{seed_all, SeedConfig};
//!
//! let config = SeedConfig::new(4); // 4 classes with defaults
//! seed_all(&pool, config).await?;
//! ```

pub mod seeder;
