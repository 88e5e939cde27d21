//! Fake data generation for classes, their content tree and students.
//!
//! Rows are generated in parallel with rayon and written with multi-row
//! `INSERT` statements inside a transaction per stage.

mod classes;
mod content;
pub mod models;
mod users;

use sqlx::PgPool;
use std::time::Instant;

pub use classes::{clear_classes, generate_classes, seed_classes};
pub use content::{generate_chapters, generate_files, generate_subjects, seed_content};
pub use models::{ContentPerClass, SEED_MARKER, SeedConfig};
pub use users::{SEED_PASSWORD, clear_students, generate_students, seed_students};

/// `($1, $2), ($3, $4), ...` for `rows` tuples of `cols` parameters.
pub(crate) fn placeholders(rows: usize, cols: usize) -> String {
    (0..rows)
        .map(|row| {
            let params: Vec<String> = (1..=cols).map(|c| format!("${}", row * cols + c)).collect();
            format!("({})", params.join(", "))
        })
        .collect::<Vec<_>>()
        .join(", ")
}

pub async fn seed_all(db: &PgPool, config: SeedConfig) -> Result<(), Box<dyn std::error::Error>> {
    let start_time = Instant::now();
    println!("🌱 Starting database seeding...");
    println!(
        "   {} classes, up to {} files, {} students\n",
        config.num_classes,
        config.total_files(),
        config.total_students()
    );

    let class_ids = seed_classes(db, config.num_classes).await?;
    if class_ids.is_empty() {
        println!("⚠️  No new classes were created (names already taken). Run `clear-seed` first.");
        return Ok(());
    }

    seed_content(db, &class_ids, &config.content).await?;
    seed_students(db, &class_ids, config.students_per_class).await?;

    println!("\n✅ Seeding completed in {:?}", start_time.elapsed());
    println!("   Seeded students log in with password: {}", SEED_PASSWORD);

    Ok(())
}

/// Removes seeded students and seeded classes. Admin accounts and classes
/// created through the API are kept.
pub async fn clear_all(db: &PgPool) -> Result<(), Box<dyn std::error::Error>> {
    let start_time = Instant::now();
    println!("🧹 Clearing seeded data...");

    clear_students(db).await?;
    clear_classes(db).await?;

    println!("\n✅ Cleared seeded data in {:?}", start_time.elapsed());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_placeholders() {
        assert_eq!(placeholders(1, 2), "($1, $2)");
        assert_eq!(placeholders(2, 3), "($1, $2, $3), ($4, $5, $6)");
        assert_eq!(placeholders(0, 3), "");
    }
}
