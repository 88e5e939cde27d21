use clap::{Parser, Subcommand};
use dialoguer::{Input, Password};
use dotenvy::dotenv;
use sqlx::postgres::PgPool;
use tuitionhub_cli::seeder::{self, ContentPerClass, SeedConfig};

#[derive(Parser)]
#[command(name = "tuitionhub-cli")]
#[command(about = "TuitionHub CLI - Administrative tools for TuitionHub", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create an admin account (registration through the API only creates students)
    CreateAdmin {
        /// Full name of the admin
        #[arg(short = 'n', long)]
        full_name: Option<String>,

        /// Email address
        #[arg(short = 'e', long)]
        email: Option<String>,

        /// Password (will be prompted securely if not provided)
        #[arg(short = 'p', long)]
        password: Option<String>,
    },
    /// Seed the database with fake classes, content and students
    Seed {
        /// Number of classes to create
        #[arg(short = 'c', long, default_value = "4")]
        classes: usize,

        /// Number of subjects per class
        #[arg(long, default_value = "5")]
        subjects: usize,

        /// Number of chapters per subject
        #[arg(long, default_value = "4")]
        chapters: usize,

        /// Number of files per chapter
        #[arg(long, default_value = "3")]
        files: usize,

        /// Number of students per class
        #[arg(short = 's', long, default_value = "30")]
        students: usize,
    },
    /// Clear all seeded data (keeps admins and classes created through the API)
    ClearSeed,
}

#[tokio::main]
async fn main() {
    dotenv().ok();

    let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");

    let pool = sqlx::postgres::PgPoolOptions::new()
        .max_connections(5)
        .connect(&database_url)
        .await
        .expect("Failed to connect to database");

    let cli = Cli::parse();

    match cli.command {
        Commands::CreateAdmin {
            full_name,
            email,
            password,
        } => handle_create_admin(&pool, full_name, email, password).await,
        Commands::Seed {
            classes,
            subjects,
            chapters,
            files,
            students,
        } => {
            let config = SeedConfig::new(classes)
                .with_content(ContentPerClass {
                    subjects,
                    chapters_per_subject: chapters,
                    files_per_chapter: files,
                })
                .with_students(students);
            handle_seed(&pool, config).await
        }
        Commands::ClearSeed => handle_clear_seed(&pool).await,
    }
}

async fn handle_create_admin(
    pool: &PgPool,
    full_name: Option<String>,
    email: Option<String>,
    password: Option<String>,
) {
    let full_name = full_name.unwrap_or_else(|| {
        Input::new()
            .with_prompt("Full name")
            .interact_text()
            .expect("Failed to read full name")
    });

    let email = email.unwrap_or_else(|| {
        Input::new()
            .with_prompt("Email address")
            .interact_text()
            .expect("Failed to read email")
    });

    let password = password.unwrap_or_else(|| {
        Password::new()
            .with_prompt("Password")
            .with_confirmation("Confirm password", "Passwords don't match")
            .interact()
            .expect("Failed to read password")
    });

    match create_admin(pool, &full_name, &email, &password).await {
        Ok(_) => {
            println!("\n✅ Admin created successfully!");
            println!("   Email: {}", email.trim().to_lowercase());
            println!("   Name: {}", full_name);
        }
        Err(e) => {
            eprintln!("\n❌ Error creating admin: {}", e);
            std::process::exit(1);
        }
    }
}

async fn handle_seed(pool: &PgPool, config: SeedConfig) {
    if let Err(e) = seeder::seed_all(pool, config).await {
        eprintln!("\n❌ Error seeding database: {}", e);
        std::process::exit(1);
    }
}

async fn handle_clear_seed(pool: &PgPool) {
    if let Err(e) = seeder::clear_all(pool).await {
        eprintln!("\n❌ Error clearing seeded data: {}", e);
        std::process::exit(1);
    }
}

async fn create_admin(
    db: &PgPool,
    full_name: &str,
    email: &str,
    password: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    if password.len() < 8 {
        return Err("Password must be at least 8 characters".into());
    }

    let hashed_password = tuitionhub_core::hash_password(password)
        .map_err(|e| format!("Failed to hash password: {}", e.error))?;

    let created = sqlx::query_scalar::<_, uuid::Uuid>(
        "INSERT INTO users (full_name, email, password, role)
         VALUES ($1, $2, $3, 'admin')
         ON CONFLICT (email) DO NOTHING
         RETURNING id",
    )
    .bind(full_name.trim())
    .bind(email.trim().to_lowercase())
    .bind(&hashed_password)
    .fetch_optional(db)
    .await?;

    match created {
        Some(_) => Ok(()),
        None => Err("User with this email already exists".into()),
    }
}
