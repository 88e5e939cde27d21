mod common;

use axum::http::StatusCode;
use common::{create_test_admin, create_test_student, generate_unique_name, send, setup_test_app};
use serde_json::json;
use sqlx::PgPool;

#[sqlx::test(migrations = "./migrations")]
async fn test_admin_builds_content_tree(pool: PgPool) {
    let admin = create_test_admin(&pool).await;
    let app = setup_test_app(pool);
    let token = Some(admin.token.as_str());

    let (status, class) = send(
        &app,
        "POST",
        "/api/classes",
        token,
        Some(json!({ "name": "Grade 10", "description": "Board batch" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let class_id = class["id"].as_str().unwrap().to_string();

    let (status, subject) = send(
        &app,
        "POST",
        "/api/subjects",
        token,
        Some(json!({ "class_id": class_id, "name": "Mathematics" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let subject_id = subject["id"].as_str().unwrap().to_string();

    let (status, chapter) = send(
        &app,
        "POST",
        "/api/chapters",
        token,
        Some(json!({ "subject_id": subject_id, "name": "Quadratic Equations" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let chapter_id = chapter["id"].as_str().unwrap().to_string();

    let (status, file) = send(
        &app,
        "POST",
        "/api/files",
        token,
        Some(json!({
            "chapter_id": chapter_id,
            "name": "Worksheet 1",
            "file_type": "pdf",
            "file_url": "https://cdn.example.com/worksheet-1.pdf"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(file["file_type"], "pdf");

    let (status, subjects) = send(&app, "GET", &format!("/api/classes/{}/subjects", class_id), token, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(subjects.as_array().unwrap().len(), 1);
    assert_eq!(subjects[0]["name"], "Mathematics");

    let (status, chapters) = send(&app, "GET", &format!("/api/subjects/{}/chapters", subject_id), token, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(chapters[0]["name"], "Quadratic Equations");

    let (status, files) = send(&app, "GET", &format!("/api/chapters/{}/files", chapter_id), token, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(files.as_array().unwrap().len(), 1);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_student_reads_but_cannot_write(pool: PgPool) {
    let student = create_test_student(&pool, "Ravi Kumar", None).await;
    let app = setup_test_app(pool);
    let token = Some(student.token.as_str());

    let (status, _) = send(&app, "GET", "/api/classes", token, None).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = send(
        &app,
        "POST",
        "/api/classes",
        token,
        Some(json!({ "name": "Sneaky Class" })),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_content_requires_authentication(pool: PgPool) {
    let app = setup_test_app(pool);

    let (status, _) = send(&app, "GET", "/api/classes", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_duplicate_class_name(pool: PgPool) {
    let admin = create_test_admin(&pool).await;
    let app = setup_test_app(pool);
    let name = generate_unique_name("Class");

    let (status, _) = send(&app, "POST", "/api/classes", Some(&admin.token), Some(json!({ "name": name }))).await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, _) = send(&app, "POST", "/api/classes", Some(&admin.token), Some(json!({ "name": name }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_subject_for_missing_class(pool: PgPool) {
    let admin = create_test_admin(&pool).await;
    let app = setup_test_app(pool);

    let (status, _) = send(
        &app,
        "POST",
        "/api/subjects",
        Some(&admin.token),
        Some(json!({ "class_id": uuid::Uuid::new_v4(), "name": "Physics" })),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_update_and_delete_class(pool: PgPool) {
    let admin = create_test_admin(&pool).await;
    let app = setup_test_app(pool);
    let token = Some(admin.token.as_str());

    let (_, class) = send(&app, "POST", "/api/classes", token, Some(json!({ "name": "Grade 9" }))).await;
    let uri = format!("/api/classes/{}", class["id"].as_str().unwrap());

    let (status, updated) = send(&app, "PUT", &uri, token, Some(json!({ "description": "Evening batch" }))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["name"], "Grade 9");
    assert_eq!(updated["description"], "Evening batch");

    let (status, _) = send(&app, "DELETE", &uri, token, None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = send(&app, "GET", &uri, token, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&app, "DELETE", &uri, token, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_file_url_is_validated(pool: PgPool) {
    let admin = create_test_admin(&pool).await;
    let app = setup_test_app(pool);

    let (status, _) = send(
        &app,
        "POST",
        "/api/files",
        Some(&admin.token),
        Some(json!({
            "chapter_id": uuid::Uuid::new_v4(),
            "name": "Broken",
            "file_type": "link",
            "file_url": "not a url"
        })),
    )
    .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}
