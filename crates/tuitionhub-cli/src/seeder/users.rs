//! Student seeding, including a starting points balance so the
//! leaderboard has something to show.

use fake::Fake;
use fake::faker::name::en::*;
use rand::Rng;
use rayon::prelude::*;
use sqlx::{PgPool, Postgres, Transaction};
use std::time::Instant;
use uuid::Uuid;

use tuitionhub_models::leaderboard::level_for;

use super::models::StudentSeed;
use super::placeholders;

pub const SEED_PASSWORD: &str = "password123";

pub fn generate_students(
    class_ids: &[Uuid],
    students_per_class: usize,
    password_hash: &str,
) -> Vec<StudentSeed> {
    class_ids
        .par_iter()
        .enumerate()
        .flat_map(|(class_idx, &class_id)| {
            (0..students_per_class)
                .map(|student_idx| generate_student(class_id, class_idx, student_idx, password_hash))
                .collect::<Vec<_>>()
        })
        .collect()
}

fn generate_student(
    class_id: Uuid,
    class_idx: usize,
    student_idx: usize,
    password_hash: &str,
) -> StudentSeed {
    let first_name: String = FirstName().fake();
    let last_name: String = LastName().fake();
    let serial = class_idx * 1000 + student_idx;
    let mut rng = rand::thread_rng();

    StudentSeed {
        email: format!(
            "{}.{}+student{}@example.com",
            first_name.to_lowercase(),
            last_name.to_lowercase(),
            serial
        ),
        full_name: format!("{} {}", first_name, last_name),
        password_hash: password_hash.to_string(),
        class_id,
        phone: format!("+1555{:07}", serial),
        parent_phone: format!("+1556{:07}", serial),
        roll_number: format!("R{:02}-{:03}", class_idx + 1, student_idx + 1),
        points: rng.gen_range(0..600),
    }
}

/// Seeds students into `class_ids`. Every seeded account shares
/// [`SEED_PASSWORD`].
pub async fn seed_students(
    db: &PgPool,
    class_ids: &[Uuid],
    students_per_class: usize,
) -> Result<usize, Box<dyn std::error::Error>> {
    let start_time = Instant::now();
    println!(
        "👥 Seeding {} students...",
        class_ids.len() * students_per_class
    );

    // Hashed once; cost 4 keeps bulk seeding fast.
    let password_hash = bcrypt::hash(SEED_PASSWORD, 4)?;
    let students = generate_students(class_ids, students_per_class, &password_hash);

    let mut tx = db.begin().await?;
    let mut inserted = 0;

    const BATCH_SIZE: usize = 800;
    for chunk in students.chunks(BATCH_SIZE) {
        inserted += insert_students_chunk(&mut tx, chunk).await?;
    }

    tx.commit().await?;

    println!(
        "   ✓ Inserted {} students in {:?}",
        inserted,
        start_time.elapsed()
    );

    Ok(inserted)
}

async fn insert_students_chunk(
    tx: &mut Transaction<'_, Postgres>,
    students: &[StudentSeed],
) -> Result<usize, Box<dyn std::error::Error>> {
    if students.is_empty() {
        return Ok(0);
    }

    let query = format!(
        "INSERT INTO users (full_name, email, password, class_id, phone, parent_phone, roll_number) \
         VALUES {} ON CONFLICT (email) DO NOTHING RETURNING id, email",
        placeholders(students.len(), 7)
    );

    let mut q = sqlx::query_as::<_, (Uuid, String)>(&query);
    for student in students {
        q = q
            .bind(&student.full_name)
            .bind(&student.email)
            .bind(&student.password_hash)
            .bind(student.class_id)
            .bind(&student.phone)
            .bind(&student.parent_phone)
            .bind(&student.roll_number);
    }
    let rows = q.fetch_all(&mut **tx).await?;

    let points: Vec<(Uuid, i32)> = rows
        .iter()
        .filter_map(|(id, email)| {
            students
                .iter()
                .find(|s| &s.email == email)
                .map(|s| (*id, s.points))
        })
        .collect();
    insert_points_chunk(tx, &points).await?;

    Ok(rows.len())
}

async fn insert_points_chunk(
    tx: &mut Transaction<'_, Postgres>,
    points: &[(Uuid, i32)],
) -> Result<(), Box<dyn std::error::Error>> {
    if points.is_empty() {
        return Ok(());
    }

    let query = format!(
        "INSERT INTO user_points (user_id, total_points, level) VALUES {} \
         ON CONFLICT (user_id) DO NOTHING",
        placeholders(points.len(), 3)
    );

    let mut q = sqlx::query(&query);
    for &(user_id, total) in points {
        q = q.bind(user_id).bind(total).bind(level_for(total));
    }

    q.execute(&mut **tx).await?;
    Ok(())
}

/// Clears seeded accounts. Admins are never touched.
pub async fn clear_students(db: &PgPool) -> Result<u64, Box<dyn std::error::Error>> {
    let start_time = Instant::now();
    println!("🗑️  Clearing seeded students...");

    let result = sqlx::query(
        "DELETE FROM users WHERE email LIKE '%@example.com' AND role <> 'admin'",
    )
    .execute(db)
    .await?
    .rows_affected();

    println!(
        "   ✓ Deleted {} students in {:?}",
        result,
        start_time.elapsed()
    );

    Ok(result)
}
