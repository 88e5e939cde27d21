//! Subjects, chapters and files for seeded classes.

use fake::Fake;
use fake::faker::lorem::en::{Sentence, Words};
use rayon::prelude::*;
use sqlx::{PgPool, Postgres, Transaction};
use std::time::Instant;
use uuid::Uuid;

use tuitionhub_models::files::FileType;

use super::models::{ChapterSeed, ContentPerClass, FileSeed, SubjectSeed};
use super::placeholders;

const SUBJECT_NAMES: &[&str] = &[
    "Mathematics",
    "Physics",
    "Chemistry",
    "Biology",
    "English",
    "History",
    "Geography",
    "Computer Science",
    "Economics",
    "Literature",
];

const FILE_TYPES: &[FileType] = &[FileType::Pdf, FileType::Video, FileType::Link, FileType::Note];

const BATCH_SIZE: usize = 1000;

fn title(words: std::ops::Range<usize>) -> String {
    let words: Vec<String> = Words(words).fake();
    words
        .iter()
        .map(|w| {
            let mut chars = w.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// At most one subject per name in [`SUBJECT_NAMES`], since names are unique
/// within a class.
pub fn generate_subjects(class_ids: &[Uuid], per_class: usize) -> Vec<SubjectSeed> {
    let per_class = per_class.min(SUBJECT_NAMES.len());

    class_ids
        .par_iter()
        .enumerate()
        .flat_map(|(class_idx, &class_id)| {
            (0..per_class)
                .map(|i| SubjectSeed {
                    class_id,
                    name: SUBJECT_NAMES[(class_idx + i) % SUBJECT_NAMES.len()].to_string(),
                    description: Some(Sentence(5..12).fake()),
                })
                .collect::<Vec<_>>()
        })
        .collect()
}

pub fn generate_chapters(subject_ids: &[Uuid], per_subject: usize) -> Vec<ChapterSeed> {
    subject_ids
        .par_iter()
        .flat_map(|&subject_id| {
            (0..per_subject)
                .map(|i| ChapterSeed {
                    subject_id,
                    name: format!("Chapter {}: {}", i + 1, title(2..4)),
                    description: Some(Sentence(6..14).fake()),
                })
                .collect::<Vec<_>>()
        })
        .collect()
}

pub fn generate_files(chapter_ids: &[Uuid], per_chapter: usize) -> Vec<FileSeed> {
    chapter_ids
        .par_iter()
        .flat_map(|&chapter_id| {
            (0..per_chapter)
                .map(|i| {
                    let file_type = FILE_TYPES[i % FILE_TYPES.len()];
                    let slug = Uuid::new_v4();
                    let file_url = match file_type {
                        FileType::Pdf => format!("https://cdn.tuitionhub.local/notes/{}.pdf", slug),
                        FileType::Video => format!("https://videos.tuitionhub.local/{}", slug),
                        FileType::Link => format!("https://example.com/resources/{}", slug),
                        FileType::Note => format!("https://cdn.tuitionhub.local/notes/{}.md", slug),
                    };

                    FileSeed {
                        chapter_id,
                        name: format!("{}. {}", i + 1, title(2..5)),
                        file_type,
                        file_url,
                    }
                })
                .collect::<Vec<_>>()
        })
        .collect()
}

/// Seeds the whole content tree under `class_ids` in one transaction.
/// Returns the number of files created.
pub async fn seed_content(
    db: &PgPool,
    class_ids: &[Uuid],
    shape: &ContentPerClass,
) -> Result<usize, Box<dyn std::error::Error>> {
    let start_time = Instant::now();
    println!("📖 Seeding content for {} classes...", class_ids.len());

    let mut tx = db.begin().await?;

    let subjects = generate_subjects(class_ids, shape.subjects);
    let mut subject_ids = Vec::with_capacity(subjects.len());
    for chunk in subjects.chunks(BATCH_SIZE) {
        subject_ids.extend(insert_subjects_chunk(&mut tx, chunk).await?);
    }
    println!("   ✓ {} subjects", subject_ids.len());

    let chapters = generate_chapters(&subject_ids, shape.chapters_per_subject);
    let mut chapter_ids = Vec::with_capacity(chapters.len());
    for chunk in chapters.chunks(BATCH_SIZE) {
        chapter_ids.extend(insert_chapters_chunk(&mut tx, chunk).await?);
    }
    println!("   ✓ {} chapters", chapter_ids.len());

    let files = generate_files(&chapter_ids, shape.files_per_chapter);
    for chunk in files.chunks(BATCH_SIZE) {
        insert_files_chunk(&mut tx, chunk).await?;
    }
    println!("   ✓ {} files", files.len());

    tx.commit().await?;
    println!("   ✓ Content seeded in {:?}", start_time.elapsed());

    Ok(files.len())
}

async fn insert_subjects_chunk(
    tx: &mut Transaction<'_, Postgres>,
    subjects: &[SubjectSeed],
) -> Result<Vec<Uuid>, Box<dyn std::error::Error>> {
    if subjects.is_empty() {
        return Ok(Vec::new());
    }

    let query = format!(
        "INSERT INTO subjects (class_id, name, description) VALUES {} \
         ON CONFLICT (class_id, name) DO NOTHING RETURNING id",
        placeholders(subjects.len(), 3)
    );

    let mut q = sqlx::query_scalar(&query);
    for subject in subjects {
        q = q
            .bind(subject.class_id)
            .bind(&subject.name)
            .bind(&subject.description);
    }

    let ids: Vec<Uuid> = q.fetch_all(&mut **tx).await?;
    Ok(ids)
}

async fn insert_chapters_chunk(
    tx: &mut Transaction<'_, Postgres>,
    chapters: &[ChapterSeed],
) -> Result<Vec<Uuid>, Box<dyn std::error::Error>> {
    if chapters.is_empty() {
        return Ok(Vec::new());
    }

    let query = format!(
        "INSERT INTO chapters (subject_id, name, description) VALUES {} \
         ON CONFLICT (subject_id, name) DO NOTHING RETURNING id",
        placeholders(chapters.len(), 3)
    );

    let mut q = sqlx::query_scalar(&query);
    for chapter in chapters {
        q = q
            .bind(chapter.subject_id)
            .bind(&chapter.name)
            .bind(&chapter.description);
    }

    let ids: Vec<Uuid> = q.fetch_all(&mut **tx).await?;
    Ok(ids)
}

async fn insert_files_chunk(
    tx: &mut Transaction<'_, Postgres>,
    files: &[FileSeed],
) -> Result<(), Box<dyn std::error::Error>> {
    if files.is_empty() {
        return Ok(());
    }

    let query = format!(
        "INSERT INTO files (chapter_id, name, file_type, file_url) VALUES {} \
         ON CONFLICT (chapter_id, name) DO NOTHING",
        placeholders(files.len(), 4)
    );

    let mut q = sqlx::query(&query);
    for file in files {
        q = q
            .bind(file.chapter_id)
            .bind(&file.name)
            .bind(file.file_type)
            .bind(&file.file_url);
    }

    q.execute(&mut **tx).await?;
    Ok(())
}
