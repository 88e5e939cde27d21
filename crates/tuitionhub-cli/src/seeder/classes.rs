//! Class seeding.

use fake::Fake;
use fake::faker::lorem::en::Sentence;
use rayon::prelude::*;
use sqlx::{PgPool, Postgres, Transaction};
use std::time::Instant;
use uuid::Uuid;

use super::models::{ClassSeed, SEED_MARKER};
use super::placeholders;

const CLASS_TRACKS: &[&str] = &["Foundation", "Standard", "Advanced", "Olympiad"];

pub fn generate_classes(count: usize) -> Vec<ClassSeed> {
    (0..count)
        .into_par_iter()
        .map(|idx| {
            let track = CLASS_TRACKS[idx % CLASS_TRACKS.len()];
            let grade = 6 + idx / CLASS_TRACKS.len();
            let blurb: String = Sentence(4..9).fake();

            ClassSeed {
                name: format!("Grade {} {}", grade, track),
                description: format!("{} {}", SEED_MARKER, blurb),
            }
        })
        .collect()
}

/// Seeds classes. Names that already exist are skipped, so the returned
/// ids can be fewer than `count`.
pub async fn seed_classes(
    db: &PgPool,
    count: usize,
) -> Result<Vec<Uuid>, Box<dyn std::error::Error>> {
    let start_time = Instant::now();
    println!("🏫 Seeding {} classes...", count);

    let classes = generate_classes(count);
    let mut tx = db.begin().await?;
    let mut class_ids = Vec::with_capacity(classes.len());

    const BATCH_SIZE: usize = 500;
    for chunk in classes.chunks(BATCH_SIZE) {
        class_ids.extend(insert_classes_chunk(&mut tx, chunk).await?);
    }

    tx.commit().await?;

    println!(
        "   ✓ Inserted {} classes in {:?}",
        class_ids.len(),
        start_time.elapsed()
    );

    Ok(class_ids)
}

async fn insert_classes_chunk(
    tx: &mut Transaction<'_, Postgres>,
    classes: &[ClassSeed],
) -> Result<Vec<Uuid>, Box<dyn std::error::Error>> {
    if classes.is_empty() {
        return Ok(Vec::new());
    }

    let query = format!(
        "INSERT INTO classes (name, description) VALUES {} ON CONFLICT (name) DO NOTHING RETURNING id",
        placeholders(classes.len(), 2)
    );

    let mut q = sqlx::query_scalar(&query);
    for class in classes {
        q = q.bind(&class.name).bind(&class.description);
    }

    let ids: Vec<Uuid> = q.fetch_all(&mut **tx).await?;
    Ok(ids)
}

/// Deletes seeded classes. Subjects, chapters, files, exams and attendance
/// go with them through `ON DELETE CASCADE`.
pub async fn clear_classes(db: &PgPool) -> Result<u64, Box<dyn std::error::Error>> {
    let start_time = Instant::now();
    println!("🗑️  Clearing seeded classes...");

    let result = sqlx::query("DELETE FROM classes WHERE description LIKE $1")
        .bind(format!("{}%", SEED_MARKER))
        .execute(db)
        .await?
        .rows_affected();

    println!(
        "   ✓ Deleted {} classes in {:?}",
        result,
        start_time.elapsed()
    );

    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_class_names_are_unique() {
        let classes = generate_classes(12);
        let mut names: Vec<_> = classes.iter().map(|c| c.name.clone()).collect();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), 12);
        assert!(classes.iter().all(|c| c.description.starts_with(SEED_MARKER)));
    }
}
