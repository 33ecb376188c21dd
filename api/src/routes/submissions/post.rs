//! Submission upload route.

use axum::{
    Json,
    extract::{Extension, Multipart, State},
    http::StatusCode,
    response::IntoResponse,
};
use chrono::Utc;

use db::models::{
    assignment::Model as Assignment,
    submission::{Model as Submission, SubmissionError, SubmissionStatus},
};
use util::state::AppState;

use crate::auth::AuthUser;
use crate::response::ApiResponse;
use crate::routes::submissions::common::SubmissionResponse;

/// POST /api/submissions/upload
///
/// Upload (or re-upload) the caller's work for an assignment. The request is
/// `multipart/form-data` with an `assignment_id` field and a `file` part.
///
/// A re-upload overwrites the previous submission in place and the lateness of
/// the record is re-evaluated at the new upload instant. Once the submission
/// has been graded, further uploads are rejected.
///
/// ### Responses
/// - `201 Created` with the submission
/// - `400 Bad Request` (missing field or file)
/// - `403 Forbidden` (not a student)
/// - `404 Not Found` (unknown or inactive assignment)
/// - `409 Conflict` (already graded)
pub async fn upload(
    State(app_state): State<AppState>,
    Extension(AuthUser(claims)): Extension<AuthUser>,
    mut multipart: Multipart,
) -> impl IntoResponse {
    let mut assignment_id: Option<i64> = None;
    let mut file_name: Option<String> = None;
    let mut file_bytes: Option<Vec<u8>> = None;

    while let Ok(Some(field)) = multipart.next_field().await {
        match field.name() {
            Some("assignment_id") => {
                let Ok(text) = field.text().await else {
                    continue;
                };
                assignment_id = text.trim().parse::<i64>().ok();
            }
            Some("file") => {
                file_name = field.file_name().map(sanitize_filename);
                file_bytes = field.bytes().await.ok().map(|b| b.to_vec());
            }
            _ => {}
        }
    }

    let Some(assignment_id) = assignment_id else {
        return (
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::<SubmissionResponse>::error(
                "assignment_id is required",
            )),
        )
            .into_response();
    };

    let (Some(file_name), Some(file_bytes)) = (file_name, file_bytes) else {
        return (
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::<SubmissionResponse>::error("A file is required")),
        )
            .into_response();
    };

    if file_name.is_empty() || file_bytes.is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::<SubmissionResponse>::error(
                "The uploaded file is empty",
            )),
        )
            .into_response();
    }

    let db = app_state.db();

    let assignment = match Assignment::get_by_id(db, assignment_id).await {
        Ok(Some(assignment)) if assignment.is_active => assignment,
        Ok(_) => {
            return (
                StatusCode::NOT_FOUND,
                Json(ApiResponse::<SubmissionResponse>::error("Assignment not found")),
            )
                .into_response();
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to fetch assignment");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<SubmissionResponse>::error(
                    "Failed to upload submission",
                )),
            )
                .into_response();
        }
    };

    // A graded submission is terminal; refuse before touching the stored
    // artifact. The upsert's conflict guard still backs this up if a grade
    // lands in between.
    match Submission::find_by_assignment_and_student(db, assignment.id, claims.sub).await {
        Ok(Some(existing)) if existing.status == SubmissionStatus::Graded => {
            return (
                StatusCode::CONFLICT,
                Json(ApiResponse::<SubmissionResponse>::error(
                    "Submission has already been graded",
                )),
            )
                .into_response();
        }
        Ok(_) => {}
        Err(e) => {
            tracing::error!(error = %e, "Failed to fetch existing submission");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<SubmissionResponse>::error(
                    "Failed to upload submission",
                )),
            )
                .into_response();
        }
    }

    // Stage the upload next to its final location and only move it into place
    // once the row is written. A rejected upload never reaches the path a
    // graded record's file_url points at.
    let path = util::paths::submission_file_path(assignment.id, claims.sub, &file_name);
    let staged = path.with_file_name(format!("{file_name}.part"));
    if let Err(e) = util::paths::ensure_parent_dir(&staged) {
        tracing::error!(error = %e, path = %staged.display(), "Failed to create submission directory");
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiResponse::<SubmissionResponse>::error(
                "Failed to store submission file",
            )),
        )
            .into_response();
    }
    if let Err(e) = tokio::fs::write(&staged, &file_bytes).await {
        tracing::error!(error = %e, path = %staged.display(), "Failed to write submission file");
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiResponse::<SubmissionResponse>::error(
                "Failed to store submission file",
            )),
        )
            .into_response();
    }

    let file_url = util::paths::submission_file_url(assignment.id, claims.sub, &file_name);
    let now = Utc::now();

    match Submission::upsert(db, &assignment, claims.sub, &file_url, &file_name, now).await {
        Ok(submission) => {
            if let Err(e) = tokio::fs::rename(&staged, &path).await {
                tracing::error!(
                    error = %e,
                    staged = %staged.display(),
                    path = %path.display(),
                    "Failed to move submission file into place; record references a missing file"
                );
                return (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(ApiResponse::<SubmissionResponse>::error(
                        "Failed to store submission file",
                    )),
                )
                    .into_response();
            }
            (
                StatusCode::CREATED,
                Json(ApiResponse::success(
                    SubmissionResponse::from(submission),
                    "Submission uploaded successfully",
                )),
            )
                .into_response()
        }
        Err(SubmissionError::AlreadyGraded) => {
            let _ = tokio::fs::remove_file(&staged).await;
            (
                StatusCode::CONFLICT,
                Json(ApiResponse::<SubmissionResponse>::error(
                    "Submission has already been graded",
                )),
            )
                .into_response()
        }
        Err(e) => {
            let _ = tokio::fs::remove_file(&staged).await;
            tracing::error!(error = %e, "Failed to record submission");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<SubmissionResponse>::error(
                    "Failed to upload submission",
                )),
            )
                .into_response()
        }
    }
}

/// Strip path separators so an uploaded name cannot escape the student's
/// submission directory.
fn sanitize_filename(name: &str) -> String {
    name.chars()
        .map(|c| match c {
            '/' | '\\' | '\0' => '_',
            c => c,
        })
        .collect::<String>()
        .trim_start_matches('.')
        .to_string()
}
