use axum::{body::Body, http::StatusCode};
use chrono::{DateTime, Duration, Utc};
use sea_orm::DatabaseConnection;
use serial_test::serial;

use db::models::{assignment::Model as Assignment, user::Role};

use crate::helpers::{authed_request, make_test_app, seed_user, send};

async fn seed_assignment(
    db: &DatabaseConnection,
    teacher_id: i64,
    title: &str,
    deadline: DateTime<Utc>,
) -> Assignment {
    Assignment::create(db, title, "d", "Math", deadline, 100, None, teacher_id)
        .await
        .expect("Failed to seed assignment")
}

#[tokio::test]
#[serial]
async fn countdown_for_a_distant_deadline() {
    let (app, db) = make_test_app().await;
    let (teacher, token) = seed_user(&db, "Teach", "t@school.test", Role::Teacher).await;
    let assignment =
        seed_assignment(&db, teacher.id, "Essay 1", Utc::now() + Duration::days(3)).await;

    let (status, json) = send(
        &app,
        authed_request(
            "GET",
            &format!("/api/deadline/{}", assignment.id),
            &token,
            Body::empty(),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data"]["assignment_id"], assignment.id);
    assert_eq!(json["data"]["title"], "Essay 1");
    assert_eq!(json["data"]["is_expired"], false);
    // Three days out is not inside the 24h warning window.
    assert_eq!(json["data"]["is_approaching"], false);
    // Hours are uncapped, so this reads 71 or 72 depending on timing.
    assert!(json["data"]["hours"].as_i64().unwrap() >= 71);
}

#[tokio::test]
#[serial]
async fn imminent_deadline_is_flagged_approaching() {
    let (app, db) = make_test_app().await;
    let (teacher, token) = seed_user(&db, "Teach", "t@school.test", Role::Teacher).await;
    let assignment =
        seed_assignment(&db, teacher.id, "Essay 1", Utc::now() + Duration::hours(2)).await;

    let (_, json) = send(
        &app,
        authed_request(
            "GET",
            &format!("/api/deadline/{}", assignment.id),
            &token,
            Body::empty(),
        ),
    )
    .await;

    assert_eq!(json["data"]["is_approaching"], true);
    assert_eq!(json["data"]["is_expired"], false);
    assert!(json["data"]["total_seconds"].as_i64().unwrap() > 0);
}

#[tokio::test]
#[serial]
async fn elapsed_deadline_shows_expired_sentinel() {
    let (app, db) = make_test_app().await;
    let (teacher, token) = seed_user(&db, "Teach", "t@school.test", Role::Teacher).await;
    let assignment =
        seed_assignment(&db, teacher.id, "Essay 1", Utc::now() - Duration::hours(1)).await;

    let (_, json) = send(
        &app,
        authed_request(
            "GET",
            &format!("/api/deadline/{}", assignment.id),
            &token,
            Body::empty(),
        ),
    )
    .await;

    assert_eq!(json["data"]["is_expired"], true);
    assert_eq!(json["data"]["is_approaching"], false);
    assert_eq!(json["data"]["formatted_time"], "Expired");
    assert_eq!(json["data"]["total_seconds"], 0);
}

#[tokio::test]
#[serial]
async fn unknown_or_inactive_assignment_is_404() {
    let (app, db) = make_test_app().await;
    let (teacher, token) = seed_user(&db, "Teach", "t@school.test", Role::Teacher).await;

    let (status, _) = send(
        &app,
        authed_request("GET", "/api/deadline/999", &token, Body::empty()),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let assignment =
        seed_assignment(&db, teacher.id, "Essay 1", Utc::now() + Duration::days(1)).await;
    Assignment::deactivate(&db, assignment.id).await.unwrap();

    let (status, _) = send(
        &app,
        authed_request(
            "GET",
            &format!("/api/deadline/{}", assignment.id),
            &token,
            Body::empty(),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
#[serial]
async fn all_deadlines_lists_active_assignments_soonest_first() {
    let (app, db) = make_test_app().await;
    let (teacher, token) = seed_user(&db, "Teach", "t@school.test", Role::Teacher).await;

    seed_assignment(&db, teacher.id, "Later", Utc::now() + Duration::days(5)).await;
    seed_assignment(&db, teacher.id, "Sooner", Utc::now() + Duration::hours(3)).await;
    let inactive =
        seed_assignment(&db, teacher.id, "Hidden", Utc::now() + Duration::days(1)).await;
    Assignment::deactivate(&db, inactive.id).await.unwrap();

    let (status, json) = send(
        &app,
        authed_request("GET", "/api/deadline/all/deadlines", &token, Body::empty()),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data"]["count"], 2);
    assert_eq!(json["data"]["assignments"][0]["title"], "Sooner");
    assert_eq!(json["data"]["assignments"][0]["is_approaching"], true);
    assert_eq!(json["data"]["assignments"][1]["title"], "Later");
    assert_eq!(json["data"]["assignments"][1]["is_approaching"], false);
}
