mod common;

use axum::http::StatusCode;
use common::{create_test_admin, create_test_student, send, setup_test_app};
use serde_json::json;
use sqlx::PgPool;

#[sqlx::test(migrations = "./migrations")]
async fn test_award_points_levels_and_badges(pool: PgPool) {
    let admin = create_test_admin(&pool).await;
    let asha = create_test_student(&pool, "Asha Rao", None).await;
    let app = setup_test_app(pool);
    let uri = format!("/api/leaderboard/{}/points", asha.id);

    let (status, points) = send(
        &app,
        "POST",
        &uri,
        Some(&admin.token),
        Some(json!({ "points": 80, "badge": "Early Bird" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(points["total_points"], 80);
    assert_eq!(points["level"], 1);
    assert_eq!(points["badges"], json!(["Early Bird"]));

    let (_, points) = send(
        &app,
        "POST",
        &uri,
        Some(&admin.token),
        Some(json!({ "points": 45, "badge": "Early Bird" })),
    )
    .await;
    assert_eq!(points["total_points"], 125);
    assert_eq!(points["level"], 2);
    assert_eq!(points["badges"], json!(["Early Bird"]));
}

#[sqlx::test(migrations = "./migrations")]
async fn test_award_rejects_non_positive_points(pool: PgPool) {
    let admin = create_test_admin(&pool).await;
    let asha = create_test_student(&pool, "Asha Rao", None).await;
    let app = setup_test_app(pool);

    let (status, _) = send(
        &app,
        "POST",
        &format!("/api/leaderboard/{}/points", asha.id),
        Some(&admin.token),
        Some(json!({ "points": 0 })),
    )
    .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_award_to_admin_or_unknown_user(pool: PgPool) {
    let admin = create_test_admin(&pool).await;
    let app = setup_test_app(pool);

    let (status, _) = send(
        &app,
        "POST",
        &format!("/api/leaderboard/{}/points", admin.id),
        Some(&admin.token),
        Some(json!({ "points": 10 })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(
        &app,
        "POST",
        &format!("/api/leaderboard/{}/points", uuid::Uuid::new_v4()),
        Some(&admin.token),
        Some(json!({ "points": 10 })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_students_cannot_award_points(pool: PgPool) {
    let asha = create_test_student(&pool, "Asha Rao", None).await;
    let app = setup_test_app(pool);

    let (status, _) = send(
        &app,
        "POST",
        &format!("/api/leaderboard/{}/points", asha.id),
        Some(&asha.token),
        Some(json!({ "points": 500 })),
    )
    .await;

    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_leaderboard_ranking(pool: PgPool) {
    let admin = create_test_admin(&pool).await;
    let asha = create_test_student(&pool, "Asha Rao", None).await;
    let ravi = create_test_student(&pool, "Ravi Kumar", None).await;
    let meera = create_test_student(&pool, "Meera Iyer", None).await;
    let newcomer = create_test_student(&pool, "New Student", None).await;
    let app = setup_test_app(pool);

    for (student, points) in [(&asha, 150), (&ravi, 300), (&meera, 150)] {
        let (status, _) = send(
            &app,
            "POST",
            &format!("/api/leaderboard/{}/points", student.id),
            Some(&admin.token),
            Some(json!({ "points": points })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
    }

    let (status, body) = send(&app, "GET", "/api/leaderboard", Some(&asha.token), None).await;
    assert_eq!(status, StatusCode::OK);

    let entries = body["entries"].as_array().unwrap();
    assert_eq!(entries.len(), 3);
    assert_eq!(entries[0]["user_id"], ravi.id.to_string());
    assert_eq!(entries[0]["rank"], 1);
    assert_eq!(entries[0]["full_name"], "Ravi Kumar");

    // Equal points are ordered by user id.
    let (first_tie, second_tie) = if asha.id < meera.id {
        (&asha, &meera)
    } else {
        (&meera, &asha)
    };
    assert_eq!(entries[1]["user_id"], first_tie.id.to_string());
    assert_eq!(entries[2]["user_id"], second_tie.id.to_string());

    let asha_rank = if asha.id < meera.id { 2 } else { 3 };
    assert_eq!(body["my_rank"], json!({ "status": "ranked", "position": asha_rank }));

    let (_, body) = send(&app, "GET", "/api/leaderboard", Some(&newcomer.token), None).await;
    assert_eq!(body["my_rank"], json!({ "status": "unranked" }));
}

#[sqlx::test(migrations = "./migrations")]
async fn test_leaderboard_limit_keeps_caller_rank(pool: PgPool) {
    let admin = create_test_admin(&pool).await;
    let asha = create_test_student(&pool, "Asha Rao", None).await;
    let ravi = create_test_student(&pool, "Ravi Kumar", None).await;
    let app = setup_test_app(pool);

    for (student, points) in [(&asha, 10), (&ravi, 90)] {
        send(
            &app,
            "POST",
            &format!("/api/leaderboard/{}/points", student.id),
            Some(&admin.token),
            Some(json!({ "points": points })),
        )
        .await;
    }

    let (status, body) = send(&app, "GET", "/api/leaderboard?limit=1", Some(&asha.token), None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["entries"].as_array().unwrap().len(), 1);
    assert_eq!(body["entries"][0]["user_id"], ravi.id.to_string());
    assert_eq!(body["my_rank"], json!({ "status": "ranked", "position": 2 }));
}

#[sqlx::test(migrations = "./migrations")]
async fn test_empty_leaderboard(pool: PgPool) {
    let asha = create_test_student(&pool, "Asha Rao", None).await;
    let app = setup_test_app(pool);

    let (status, body) = send(&app, "GET", "/api/leaderboard", Some(&asha.token), None).await;

    assert_eq!(status, StatusCode::OK);
    assert!(body["entries"].as_array().unwrap().is_empty());
    assert_eq!(body["my_rank"]["status"], "unranked");
}
