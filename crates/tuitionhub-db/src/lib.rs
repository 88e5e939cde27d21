//! # TuitionHub DB
//!
//! PostgreSQL pool initialization and the embedded schema migrations.
//!
//! # Example
//!
//! ```ignore
//! use tuitionhub_db::{init_db_pool, run_migrations};
//!
//! #[tokio::main]
//! async fn main() {
//!     let pool = init_db_pool().await;
//!     run_migrations(&pool).await.expect("migrations failed");
//! }
//! ```

use sqlx::migrate::{MigrateError, Migrator};
use sqlx::postgres::PgPoolOptions;
use std::env;
use std::time::Duration;

pub use sqlx::PgPool;

/// Schema migrations from the workspace `migrations/` directory.
pub static MIGRATOR: Migrator = sqlx::migrate!("../../migrations");

/// Connects to `DATABASE_URL` with up to `DATABASE_MAX_CONNECTIONS` (default 10).
///
/// # Panics
///
/// Panics if `DATABASE_URL` is not set or the database is unreachable. This
/// runs once at startup, before the server binds.
pub async fn init_db_pool() -> PgPool {
    let database_url = env::var("DATABASE_URL").expect("DATABASE_URL must be set");
    let max_connections = env::var("DATABASE_MAX_CONNECTIONS")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(10);

    let pool = PgPoolOptions::new()
        .max_connections(max_connections)
        .acquire_timeout(Duration::from_secs(5))
        .connect(&database_url)
        .await
        .expect("Failed to connect to database");

    tracing::info!(max_connections, "Database pool initialized");
    pool
}

pub async fn run_migrations(pool: &PgPool) -> Result<(), MigrateError> {
    MIGRATOR.run(pool).await?;
    tracing::info!("Database migrations applied");
    Ok(())
}
