mod common;

use axum::http::StatusCode;
use common::{create_test_admin, create_test_class, create_test_student, send, setup_test_app};
use serde_json::json;
use sqlx::PgPool;

#[sqlx::test(migrations = "./migrations")]
async fn test_list_students_with_filters(pool: PgPool) {
    let admin = create_test_admin(&pool).await;
    let class_id = create_test_class(&pool).await;
    create_test_student(&pool, "Asha Rao", Some(class_id)).await;
    create_test_student(&pool, "Ravi Kumar", Some(class_id)).await;
    create_test_student(&pool, "Meera Iyer", None).await;
    let app = setup_test_app(pool);
    let token = Some(admin.token.as_str());

    let (status, body) = send(&app, "GET", "/api/students", token, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["meta"]["total"], 3);
    assert!(body["data"].as_array().unwrap().iter().all(|s| s["role"] == "student"));

    let (_, body) = send(&app, "GET", &format!("/api/students?class_id={}", class_id), token, None).await;
    assert_eq!(body["meta"]["total"], 2);

    let (_, body) = send(&app, "GET", "/api/students?search=meera", token, None).await;
    assert_eq!(body["meta"]["total"], 1);
    assert_eq!(body["data"][0]["full_name"], "Meera Iyer");

    let (_, body) = send(&app, "GET", "/api/students?limit=2&page=1", token, None).await;
    assert_eq!(body["data"].as_array().unwrap().len(), 2);
    assert_eq!(body["meta"]["has_more"], true);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_get_student_excludes_admins(pool: PgPool) {
    let admin = create_test_admin(&pool).await;
    let app = setup_test_app(pool);

    let (status, _) = send(
        &app,
        "GET",
        &format!("/api/students/{}", admin.id),
        Some(&admin.token),
        None,
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_update_student_class_and_details(pool: PgPool) {
    let admin = create_test_admin(&pool).await;
    let class_id = create_test_class(&pool).await;
    let asha = create_test_student(&pool, "Asha Rao", None).await;
    let app = setup_test_app(pool);
    let uri = format!("/api/students/{}", asha.id);

    let (status, body) = send(
        &app,
        "PUT",
        &uri,
        Some(&admin.token),
        Some(json!({ "class_id": class_id, "roll_number": "R10-001" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["class_id"], class_id.to_string());
    assert_eq!(body["roll_number"], "R10-001");
    assert!(body["class_name"].as_str().is_some());

    // Omitting class_id keeps it; null clears it.
    let (_, body) = send(&app, "PUT", &uri, Some(&admin.token), Some(json!({ "phone": "+15550001" }))).await;
    assert_eq!(body["class_id"], class_id.to_string());

    let (_, body) = send(&app, "PUT", &uri, Some(&admin.token), Some(json!({ "class_id": null }))).await;
    assert!(body["class_id"].is_null());
    assert_eq!(body["roll_number"], "R10-001");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_update_student_unknown_class(pool: PgPool) {
    let admin = create_test_admin(&pool).await;
    let asha = create_test_student(&pool, "Asha Rao", None).await;
    let app = setup_test_app(pool);

    let (status, _) = send(
        &app,
        "PUT",
        &format!("/api/students/{}", asha.id),
        Some(&admin.token),
        Some(json!({ "class_id": uuid::Uuid::new_v4() })),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_student_attendance_and_performance(pool: PgPool) {
    let admin = create_test_admin(&pool).await;
    let class_id = create_test_class(&pool).await;
    let asha = create_test_student(&pool, "Asha Rao", Some(class_id)).await;
    let app = setup_test_app(pool);

    send(
        &app,
        "PUT",
        "/api/attendance",
        Some(&admin.token),
        Some(json!({
            "class_id": class_id,
            "date": "2024-09-02",
            "records": [{ "user_id": asha.id, "status": "late" }]
        })),
    )
    .await;

    let (status, body) = send(
        &app,
        "GET",
        &format!("/api/students/{}/attendance", asha.id),
        Some(&admin.token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["student"]["id"], asha.id.to_string());
    assert_eq!(body["records"].as_array().unwrap().len(), 1);
    assert_eq!(body["summary"]["percentage"], 50.0);

    let (status, body) = send(
        &app,
        "GET",
        &format!("/api/students/{}/performance", asha.id),
        Some(&admin.token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["has_data"], false);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_students_routes_are_admin_only(pool: PgPool) {
    let asha = create_test_student(&pool, "Asha Rao", None).await;
    let app = setup_test_app(pool);

    let (status, _) = send(&app, "GET", "/api/students", Some(&asha.token), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = send(
        &app,
        "GET",
        &format!("/api/students/{}/performance", asha.id),
        Some(&asha.token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}
