mod common;

use axum::http::StatusCode;
use common::{create_test_admin, create_test_class, create_test_student, send, setup_test_app};
use serde_json::json;
use sqlx::PgPool;

#[sqlx::test(migrations = "./migrations")]
async fn test_roster_before_marking(pool: PgPool) {
    let admin = create_test_admin(&pool).await;
    let class_id = create_test_class(&pool).await;
    create_test_student(&pool, "Ravi Kumar", Some(class_id)).await;
    create_test_student(&pool, "Asha Rao", Some(class_id)).await;
    create_test_student(&pool, "Outside Student", None).await;
    let app = setup_test_app(pool);

    let uri = format!("/api/attendance/roster?class_id={}&date=2024-09-02", class_id);
    let (status, roster) = send(&app, "GET", &uri, Some(&admin.token), None).await;

    assert_eq!(status, StatusCode::OK);
    let students = roster["students"].as_array().unwrap();
    assert_eq!(students.len(), 2);
    assert_eq!(students[0]["full_name"], "Asha Rao");
    assert!(students.iter().all(|s| s["status"].is_null()));
    assert_eq!(roster["summary"]["total"], 0);
    assert_eq!(roster["summary"]["percentage"], 0.0);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_save_and_resave_attendance(pool: PgPool) {
    let admin = create_test_admin(&pool).await;
    let class_id = create_test_class(&pool).await;
    let asha = create_test_student(&pool, "Asha Rao", Some(class_id)).await;
    let ravi = create_test_student(&pool, "Ravi Kumar", Some(class_id)).await;
    let meera = create_test_student(&pool, "Meera Iyer", Some(class_id)).await;
    let app = setup_test_app(pool);

    let (status, saved) = send(
        &app,
        "PUT",
        "/api/attendance",
        Some(&admin.token),
        Some(json!({
            "class_id": class_id,
            "date": "2024-09-02",
            "records": [
                { "user_id": asha.id, "status": "present" },
                { "user_id": ravi.id, "status": "late", "notes": "Bus delay" },
                { "user_id": meera.id, "status": "absent" }
            ]
        })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(saved["saved"], 3);
    assert_eq!(saved["summary"]["present"], 1);
    assert_eq!(saved["summary"]["late"], 1);
    assert_eq!(saved["summary"]["absent"], 1);
    assert_eq!(saved["summary"]["percentage"], 50.0);

    // Saving the same day again replaces the earlier sheet.
    let (status, saved) = send(
        &app,
        "PUT",
        "/api/attendance",
        Some(&admin.token),
        Some(json!({
            "class_id": class_id,
            "date": "2024-09-02",
            "records": [{ "user_id": asha.id, "status": "absent" }]
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(saved["saved"], 1);

    let uri = format!("/api/attendance/roster?class_id={}&date=2024-09-02", class_id);
    let (_, roster) = send(&app, "GET", &uri, Some(&admin.token), None).await;
    assert_eq!(roster["summary"]["total"], 1);
    assert_eq!(roster["summary"]["absent"], 1);

    let marked: Vec<_> = roster["students"]
        .as_array()
        .unwrap()
        .iter()
        .filter(|s| !s["status"].is_null())
        .collect();
    assert_eq!(marked.len(), 1);
    assert_eq!(marked[0]["user_id"], asha.id.to_string());
}

#[sqlx::test(migrations = "./migrations")]
async fn test_save_rejects_student_from_other_class(pool: PgPool) {
    let admin = create_test_admin(&pool).await;
    let class_id = create_test_class(&pool).await;
    let other_class = create_test_class(&pool).await;
    let outsider = create_test_student(&pool, "Outside Student", Some(other_class)).await;
    let app = setup_test_app(pool);

    let (status, _) = send(
        &app,
        "PUT",
        "/api/attendance",
        Some(&admin.token),
        Some(json!({
            "class_id": class_id,
            "date": "2024-09-02",
            "records": [{ "user_id": outsider.id, "status": "present" }]
        })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_save_rejects_duplicate_student(pool: PgPool) {
    let admin = create_test_admin(&pool).await;
    let class_id = create_test_class(&pool).await;
    let asha = create_test_student(&pool, "Asha Rao", Some(class_id)).await;
    let app = setup_test_app(pool);

    let (status, _) = send(
        &app,
        "PUT",
        "/api/attendance",
        Some(&admin.token),
        Some(json!({
            "class_id": class_id,
            "date": "2024-09-02",
            "records": [
                { "user_id": asha.id, "status": "present" },
                { "user_id": asha.id, "status": "absent" }
            ]
        })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_student_sees_own_attendance(pool: PgPool) {
    let admin = create_test_admin(&pool).await;
    let class_id = create_test_class(&pool).await;
    let asha = create_test_student(&pool, "Asha Rao", Some(class_id)).await;
    let app = setup_test_app(pool);

    for (date, status) in [("2024-09-02", "present"), ("2024-09-03", "late"), ("2024-09-04", "present"), ("2024-09-05", "absent")] {
        let (code, _) = send(
            &app,
            "PUT",
            "/api/attendance",
            Some(&admin.token),
            Some(json!({
                "class_id": class_id,
                "date": date,
                "records": [{ "user_id": asha.id, "status": status }]
            })),
        )
        .await;
        assert_eq!(code, StatusCode::OK);
    }

    let (status, body) = send(&app, "GET", "/api/attendance/me", Some(&asha.token), None).await;

    assert_eq!(status, StatusCode::OK);
    let records = body["records"].as_array().unwrap();
    assert_eq!(records.len(), 4);
    assert_eq!(records[0]["date"], "2024-09-05");
    assert_eq!(body["summary"]["total"], 4);
    assert_eq!(body["summary"]["percentage"], 62.5);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_student_without_records(pool: PgPool) {
    let asha = create_test_student(&pool, "Asha Rao", None).await;
    let app = setup_test_app(pool);

    let (status, body) = send(&app, "GET", "/api/attendance/me", Some(&asha.token), None).await;

    assert_eq!(status, StatusCode::OK);
    assert!(body["records"].as_array().unwrap().is_empty());
    assert_eq!(body["summary"]["percentage"], 0.0);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_students_cannot_mark_attendance(pool: PgPool) {
    let class_id = create_test_class(&pool).await;
    let asha = create_test_student(&pool, "Asha Rao", Some(class_id)).await;
    let app = setup_test_app(pool);

    let (status, _) = send(
        &app,
        "PUT",
        "/api/attendance",
        Some(&asha.token),
        Some(json!({
            "class_id": class_id,
            "date": "2024-09-02",
            "records": [{ "user_id": asha.id, "status": "present" }]
        })),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let uri = format!("/api/attendance/roster?class_id={}&date=2024-09-02", class_id);
    let (status, _) = send(&app, "GET", &uri, Some(&asha.token), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}
