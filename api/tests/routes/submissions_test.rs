use axum::{body::Body, http::StatusCode};
use chrono::{DateTime, Duration, Utc};
use sea_orm::DatabaseConnection;
use serde_json::json;
use serial_test::serial;

use db::models::{assignment::Model as Assignment, user::Role};

use crate::helpers::{authed_request, json_body, make_test_app, multipart_upload_request, seed_user, send};

async fn seed_assignment(
    db: &DatabaseConnection,
    teacher_id: i64,
    deadline: DateTime<Utc>,
) -> Assignment {
    Assignment::create(
        db,
        "Essay 1",
        "Write an essay",
        "English",
        deadline,
        100,
        None,
        teacher_id,
    )
    .await
    .expect("Failed to seed assignment")
}

#[tokio::test]
#[serial]
async fn upload_before_deadline_is_submitted() {
    let (app, db) = make_test_app().await;
    let (teacher, _) = seed_user(&db, "Teach", "t@school.test", Role::Teacher).await;
    let (student, token) = seed_user(&db, "Stu", "s@school.test", Role::Student).await;
    let assignment = seed_assignment(&db, teacher.id, Utc::now() + Duration::days(1)).await;

    let (status, json) = send(
        &app,
        multipart_upload_request(&token, assignment.id, "essay.txt", "my essay"),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(json["data"]["status"], "submitted");
    assert_eq!(json["data"]["is_late"], false);
    assert_eq!(json["data"]["student_id"], student.id);
    assert_eq!(json["data"]["file_name"], "essay.txt");
    assert_eq!(
        json["data"]["file_url"],
        format!("assignment_{}/user_{}/essay.txt", assignment.id, student.id)
    );
}

#[tokio::test]
#[serial]
async fn upload_after_deadline_is_late() {
    let (app, db) = make_test_app().await;
    let (teacher, _) = seed_user(&db, "Teach", "t@school.test", Role::Teacher).await;
    let (_, token) = seed_user(&db, "Stu", "s@school.test", Role::Student).await;
    let assignment = seed_assignment(&db, teacher.id, Utc::now() - Duration::hours(1)).await;

    let (status, json) = send(
        &app,
        multipart_upload_request(&token, assignment.id, "essay.txt", "my essay"),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(json["data"]["status"], "late");
    assert_eq!(json["data"]["is_late"], true);
}

#[tokio::test]
#[serial]
async fn reupload_overwrites_the_same_record() {
    let (app, db) = make_test_app().await;
    let (teacher, _) = seed_user(&db, "Teach", "t@school.test", Role::Teacher).await;
    let (_, token) = seed_user(&db, "Stu", "s@school.test", Role::Student).await;
    let assignment = seed_assignment(&db, teacher.id, Utc::now() + Duration::days(1)).await;

    let (_, first) = send(
        &app,
        multipart_upload_request(&token, assignment.id, "v1.txt", "draft"),
    )
    .await;
    let (status, second) = send(
        &app,
        multipart_upload_request(&token, assignment.id, "v2.txt", "final"),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(second["data"]["id"], first["data"]["id"]);
    assert_eq!(second["data"]["file_name"], "v2.txt");
}

#[tokio::test]
#[serial]
async fn upload_requires_student_role() {
    let (app, db) = make_test_app().await;
    let (teacher, teacher_token) = seed_user(&db, "Teach", "t@school.test", Role::Teacher).await;
    let assignment = seed_assignment(&db, teacher.id, Utc::now() + Duration::days(1)).await;

    let (status, _) = send(
        &app,
        multipart_upload_request(&teacher_token, assignment.id, "essay.txt", "text"),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
#[serial]
async fn upload_to_unknown_assignment_is_404() {
    let (app, db) = make_test_app().await;
    let (_, token) = seed_user(&db, "Stu", "s@school.test", Role::Student).await;

    let (status, json) = send(&app, multipart_upload_request(&token, 999, "essay.txt", "x")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["message"], "Assignment not found");
}

#[tokio::test]
#[serial]
async fn grading_then_reupload_is_blocked() {
    let (app, db) = make_test_app().await;
    let (teacher, teacher_token) = seed_user(&db, "Teach", "t@school.test", Role::Teacher).await;
    let (_, student_token) = seed_user(&db, "Stu", "s@school.test", Role::Student).await;
    let assignment = seed_assignment(&db, teacher.id, Utc::now() + Duration::days(1)).await;

    let (_, uploaded) = send(
        &app,
        multipart_upload_request(&student_token, assignment.id, "essay.txt", "text"),
    )
    .await;
    let submission_id = uploaded["data"]["id"].as_i64().unwrap();

    let (status, graded) = send(
        &app,
        authed_request(
            "PUT",
            &format!("/api/submissions/{submission_id}/grade"),
            &teacher_token,
            json_body(json!({ "marks": 85, "feedback": "Good work" })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(graded["data"]["status"], "graded");
    assert_eq!(graded["data"]["marks"], 85);
    assert_eq!(graded["data"]["feedback"], "Good work");
    assert_eq!(graded["data"]["graded_by"], teacher.id);

    let (status, json) = send(
        &app,
        multipart_upload_request(&student_token, assignment.id, "late.txt", "too late"),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(json["message"], "Submission has already been graded");
}

#[tokio::test]
#[serial]
async fn rejected_reupload_leaves_graded_file_untouched() {
    let (app, db) = make_test_app().await;
    let (teacher, teacher_token) = seed_user(&db, "Teach", "t@school.test", Role::Teacher).await;
    let (student, student_token) = seed_user(&db, "Stu", "s@school.test", Role::Student).await;
    let assignment = seed_assignment(&db, teacher.id, Utc::now() + Duration::days(1)).await;

    let (_, uploaded) = send(
        &app,
        multipart_upload_request(&student_token, assignment.id, "essay.txt", "final draft"),
    )
    .await;
    let submission_id = uploaded["data"]["id"].as_i64().unwrap();

    let (status, _) = send(
        &app,
        authed_request(
            "PUT",
            &format!("/api/submissions/{submission_id}/grade"),
            &teacher_token,
            json_body(json!({ "marks": 90 })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = send(
        &app,
        multipart_upload_request(&student_token, assignment.id, "essay.txt", "tampered"),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);

    // The graded record's artifact is byte-for-byte what was graded.
    let path = util::paths::submission_file_path(assignment.id, student.id, "essay.txt");
    let on_disk = std::fs::read_to_string(&path).unwrap();
    assert_eq!(on_disk, "final draft");
    assert!(!path.with_file_name("essay.txt.part").exists());
}

#[tokio::test]
#[serial]
async fn grading_validates_marks() {
    let (app, db) = make_test_app().await;
    let (teacher, teacher_token) = seed_user(&db, "Teach", "t@school.test", Role::Teacher).await;
    let (_, student_token) = seed_user(&db, "Stu", "s@school.test", Role::Student).await;
    let assignment = seed_assignment(&db, teacher.id, Utc::now() + Duration::days(1)).await;

    let (_, uploaded) = send(
        &app,
        multipart_upload_request(&student_token, assignment.id, "essay.txt", "text"),
    )
    .await;
    let submission_id = uploaded["data"]["id"].as_i64().unwrap();
    let uri = format!("/api/submissions/{submission_id}/grade");

    // Missing marks.
    let (status, _) = send(
        &app,
        authed_request("PUT", &uri, &teacher_token, json_body(json!({ "feedback": "?" }))),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // Out of range.
    for bad in [-1, 101] {
        let (status, json) = send(
            &app,
            authed_request("PUT", &uri, &teacher_token, json_body(json!({ "marks": bad }))),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["message"], "Marks must be between 0 and 100");
    }

    // Students cannot grade at all.
    let (status, _) = send(
        &app,
        authed_request("PUT", &uri, &student_token, json_body(json!({ "marks": 50 }))),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
#[serial]
async fn grading_unknown_submission_is_404() {
    let (app, db) = make_test_app().await;
    let (_, teacher_token) = seed_user(&db, "Teach", "t@school.test", Role::Teacher).await;

    let (status, _) = send(
        &app,
        authed_request(
            "PUT",
            "/api/submissions/999/grade",
            &teacher_token,
            json_body(json!({ "marks": 50 })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
#[serial]
async fn students_only_see_their_own_submissions() {
    let (app, db) = make_test_app().await;
    let (teacher, teacher_token) = seed_user(&db, "Teach", "t@school.test", Role::Teacher).await;
    let (alice, alice_token) = seed_user(&db, "Alice", "a@school.test", Role::Student).await;
    let (bob, bob_token) = seed_user(&db, "Bob", "b@school.test", Role::Student).await;
    let assignment = seed_assignment(&db, teacher.id, Utc::now() + Duration::days(1)).await;

    let (_, uploaded) = send(
        &app,
        multipart_upload_request(&alice_token, assignment.id, "alice.txt", "text"),
    )
    .await;
    let alice_submission_id = uploaded["data"]["id"].as_i64().unwrap();

    // Bob cannot fetch Alice's submission.
    let (status, _) = send(
        &app,
        authed_request(
            "GET",
            &format!("/api/submissions/single/{alice_submission_id}"),
            &bob_token,
            Body::empty(),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    // Alice can, with full context.
    let (status, json) = send(
        &app,
        authed_request(
            "GET",
            &format!("/api/submissions/single/{alice_submission_id}"),
            &alice_token,
            Body::empty(),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data"]["student"]["id"], alice.id);
    assert_eq!(json["data"]["assignment"]["id"], assignment.id);

    // Bob cannot list Alice's submission history.
    let (status, _) = send(
        &app,
        authed_request(
            "GET",
            &format!("/api/submissions/student/{}", alice.id),
            &bob_token,
            Body::empty(),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    // Bob can list his own (empty) history.
    let (status, json) = send(
        &app,
        authed_request(
            "GET",
            &format!("/api/submissions/student/{}", bob.id),
            &bob_token,
            Body::empty(),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data"]["count"], 0);

    // Students cannot see the whole assignment roster; teachers can.
    let (status, _) = send(
        &app,
        authed_request(
            "GET",
            &format!("/api/submissions/{}", assignment.id),
            &alice_token,
            Body::empty(),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, json) = send(
        &app,
        authed_request(
            "GET",
            &format!("/api/submissions/{}", assignment.id),
            &teacher_token,
            Body::empty(),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data"]["count"], 1);
    assert_eq!(json["data"]["submissions"][0]["student"]["name"], "Alice");
}

#[tokio::test]
#[serial]
async fn student_history_includes_assignment_context() {
    let (app, db) = make_test_app().await;
    let (teacher, _) = seed_user(&db, "Teach", "t@school.test", Role::Teacher).await;
    let (student, token) = seed_user(&db, "Stu", "s@school.test", Role::Student).await;
    let assignment = seed_assignment(&db, teacher.id, Utc::now() + Duration::days(1)).await;

    send(
        &app,
        multipart_upload_request(&token, assignment.id, "essay.txt", "text"),
    )
    .await;

    let (status, json) = send(
        &app,
        authed_request(
            "GET",
            &format!("/api/submissions/student/{}", student.id),
            &token,
            Body::empty(),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data"]["count"], 1);
    assert_eq!(json["data"]["submissions"][0]["assignment"]["title"], "Essay 1");
    assert_eq!(json["data"]["submissions"][0]["assignment"]["max_marks"], 100);
}
