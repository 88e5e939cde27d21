//! Seed rows and the knobs that control how many of each are generated.

use tuitionhub_models::files::FileType;
use uuid::Uuid;

/// Prefix on every seeded class description. `clear-seed` only removes
/// classes carrying it.
pub const SEED_MARKER: &str = "Seeded:";

pub struct ClassSeed {
    pub name: String,
    pub description: String,
}

pub struct SubjectSeed {
    pub class_id: Uuid,
    pub name: String,
    pub description: Option<String>,
}

pub struct ChapterSeed {
    pub subject_id: Uuid,
    pub name: String,
    pub description: Option<String>,
}

pub struct FileSeed {
    pub chapter_id: Uuid,
    pub name: String,
    pub file_type: FileType,
    pub file_url: String,
}

pub struct StudentSeed {
    pub full_name: String,
    pub email: String,
    pub password_hash: String,
    pub class_id: Uuid,
    pub phone: String,
    pub parent_phone: String,
    pub roll_number: String,
    pub points: i32,
}

/// Per-class content shape.
#[derive(Clone)]
pub struct ContentPerClass {
    pub subjects: usize,
    pub chapters_per_subject: usize,
    pub files_per_chapter: usize,
}

impl Default for ContentPerClass {
    fn default() -> Self {
        Self {
            subjects: 5,
            chapters_per_subject: 4,
            files_per_chapter: 3,
        }
    }
}

/// Complete configuration for database seeding.
#[derive(Clone)]
pub struct SeedConfig {
    pub num_classes: usize,
    pub content: ContentPerClass,
    pub students_per_class: usize,
}

impl Default for SeedConfig {
    fn default() -> Self {
        Self {
            num_classes: 4,
            content: ContentPerClass::default(),
            students_per_class: 30,
        }
    }
}

impl SeedConfig {
    pub fn new(num_classes: usize) -> Self {
        Self {
            num_classes,
            ..Default::default()
        }
    }

    pub fn with_content(mut self, content: ContentPerClass) -> Self {
        self.content = content;
        self
    }

    pub fn with_students(mut self, students_per_class: usize) -> Self {
        self.students_per_class = students_per_class;
        self
    }

    pub fn total_files(&self) -> usize {
        self.num_classes
            * self.content.subjects
            * self.content.chapters_per_subject
            * self.content.files_per_chapter
    }

    pub fn total_students(&self) -> usize {
        self.num_classes * self.students_per_class
    }
}
