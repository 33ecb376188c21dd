//! Submission grading route.

use axum::{
    Json,
    extract::{Extension, Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use chrono::Utc;
use serde::Deserialize;

use db::models::submission::{Model as Submission, SubmissionError};
use util::state::AppState;

use crate::auth::AuthUser;
use crate::response::ApiResponse;
use crate::routes::submissions::common::SubmissionResponse;

#[derive(Debug, Deserialize)]
pub struct GradeRequest {
    pub marks: Option<i64>,
    pub feedback: Option<String>,
}

/// PUT /api/submissions/{submission_id}/grade
///
/// Record marks and optional feedback for a submission, moving it to
/// `graded`. Marks must lie within `0..=max_marks` of the assignment.
///
/// ### Request Body
/// ```json
/// { "marks": 85, "feedback": "Good work" }
/// ```
///
/// ### Responses
/// - `200 OK` with the graded submission
/// - `400 Bad Request` (missing or out-of-range marks)
/// - `403 Forbidden` (not a teacher)
/// - `404 Not Found`
pub async fn grade(
    State(app_state): State<AppState>,
    Path(submission_id): Path<i64>,
    Extension(AuthUser(claims)): Extension<AuthUser>,
    Json(req): Json<GradeRequest>,
) -> impl IntoResponse {
    let Some(marks) = req.marks else {
        return (
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::<SubmissionResponse>::error("Marks are required")),
        )
            .into_response();
    };

    match Submission::grade(
        app_state.db(),
        submission_id,
        marks,
        req.feedback,
        claims.sub,
        Utc::now(),
    )
    .await
    {
        Ok(submission) => (
            StatusCode::OK,
            Json(ApiResponse::success(
                SubmissionResponse::from(submission),
                "Submission graded successfully",
            )),
        )
            .into_response(),
        Err(SubmissionError::SubmissionNotFound) => (
            StatusCode::NOT_FOUND,
            Json(ApiResponse::<SubmissionResponse>::error("Submission not found")),
        )
            .into_response(),
        Err(SubmissionError::AssignmentNotFound) => (
            StatusCode::NOT_FOUND,
            Json(ApiResponse::<SubmissionResponse>::error("Assignment not found")),
        )
            .into_response(),
        Err(SubmissionError::MarksOutOfRange { max }) => (
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::<SubmissionResponse>::error(format!(
                "Marks must be between 0 and {max}"
            ))),
        )
            .into_response(),
        Err(e) => {
            tracing::error!(error = %e, "Failed to grade submission");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<SubmissionResponse>::error(
                    "Failed to grade submission",
                )),
            )
                .into_response()
        }
    }
}
