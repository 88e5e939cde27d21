#![allow(dead_code)]

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use serde_json::Value;
use sqlx::PgPool;
use tower::ServiceExt;
use uuid::Uuid;

use tuitionhub::router::init_router;
use tuitionhub::state::AppState;
use tuitionhub_auth::create_access_token;
use tuitionhub_config::{CorsConfig, JwtConfig, PerformanceConfig, ServerConfig};
use tuitionhub_core::password::hash_password_with_cost;
use tuitionhub_models::UserRole;

pub const TEST_PASSWORD: &str = "testpass123";

pub struct TestUser {
    pub id: Uuid,
    pub email: String,
    pub token: String,
}

pub fn test_jwt_config() -> JwtConfig {
    JwtConfig {
        secret: "integration-test-secret-at-least-32-characters".to_string(),
        access_token_expiry: 3600,
        refresh_token_expiry: 604800,
    }
}

pub fn setup_test_app(pool: PgPool) -> Router {
    let state = AppState {
        db: pool,
        jwt_config: test_jwt_config(),
        cors_config: CorsConfig {
            allowed_origins: vec!["http://localhost:3000".to_string()],
        },
        server_config: ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
            metrics_port: 0,
        },
        performance_config: PerformanceConfig::default(),
    };
    init_router(state)
}

pub fn generate_unique_email() -> String {
    format!("test-{}@test.com", Uuid::new_v4())
}

pub fn generate_unique_name(prefix: &str) -> String {
    format!("{} {}", prefix, Uuid::new_v4())
}

async fn insert_user(
    pool: &PgPool,
    full_name: &str,
    role: UserRole,
    class_id: Option<Uuid>,
) -> TestUser {
    let email = generate_unique_email();
    let hashed = hash_password_with_cost(TEST_PASSWORD, 4).unwrap();

    let id: Uuid = sqlx::query_scalar(
        "INSERT INTO users (full_name, email, password, role, class_id)
         VALUES ($1, $2, $3, $4, $5)
         RETURNING id",
    )
    .bind(full_name)
    .bind(&email)
    .bind(&hashed)
    .bind(role)
    .bind(class_id)
    .fetch_one(pool)
    .await
    .unwrap();

    let token = create_access_token(id, &email, role, &test_jwt_config()).unwrap();

    TestUser { id, email, token }
}

pub async fn create_test_admin(pool: &PgPool) -> TestUser {
    insert_user(pool, "Test Admin", UserRole::Admin, None).await
}

pub async fn create_test_student(pool: &PgPool, full_name: &str, class_id: Option<Uuid>) -> TestUser {
    insert_user(pool, full_name, UserRole::Student, class_id).await
}

pub async fn create_test_class(pool: &PgPool) -> Uuid {
    sqlx::query_scalar("INSERT INTO classes (name) VALUES ($1) RETURNING id")
        .bind(generate_unique_name("Class"))
        .fetch_one(pool)
        .await
        .unwrap()
}

pub async fn create_test_subject(pool: &PgPool, class_id: Uuid, name: &str) -> Uuid {
    sqlx::query_scalar("INSERT INTO subjects (class_id, name) VALUES ($1, $2) RETURNING id")
        .bind(class_id)
        .bind(name)
        .fetch_one(pool)
        .await
        .unwrap()
}

/// Sends a request and returns the status with the parsed JSON body
/// (`Value::Null` for empty bodies).
pub async fn send(
    app: &Router,
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {}", token));
    }

    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_string(&json).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };

    (status, body)
}
