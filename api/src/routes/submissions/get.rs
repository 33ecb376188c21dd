//! Submission read routes.
//!
//! Students only ever see their own submissions; teachers see everything.

use axum::{
    Json,
    extract::{Extension, Path, State},
    http::StatusCode,
    response::IntoResponse,
};

use db::models::{
    submission::Model as Submission,
    user::{Model as User, Role},
};
use util::state::AppState;

use crate::auth::AuthUser;
use crate::response::ApiResponse;
use crate::routes::submissions::common::{
    AssignmentInfo, SubmissionDetailResponse, SubmissionListResponse, SubmissionResponse, UserInfo,
};

/// GET /api/submissions/single/{submission_id}
///
/// One submission with its student, assignment and grader resolved.
/// Students may only fetch their own submission.
///
/// ### Responses
/// - `200 OK`
/// - `403 Forbidden` (student fetching someone else's submission)
/// - `404 Not Found`
pub async fn get_submission(
    State(app_state): State<AppState>,
    Path(submission_id): Path<i64>,
    Extension(AuthUser(claims)): Extension<AuthUser>,
) -> impl IntoResponse {
    match Submission::get_with_context(app_state.db(), submission_id).await {
        Ok(Some(ctx)) => {
            if claims.role == Role::Student && ctx.submission.student_id != claims.sub {
                return (
                    StatusCode::FORBIDDEN,
                    Json(ApiResponse::<SubmissionDetailResponse>::error(
                        "You may only view your own submissions",
                    )),
                )
                    .into_response();
            }

            (
                StatusCode::OK,
                Json(ApiResponse::success(
                    SubmissionDetailResponse::from(ctx),
                    "Submission fetched successfully",
                )),
            )
                .into_response()
        }
        Ok(None) => (
            StatusCode::NOT_FOUND,
            Json(ApiResponse::<SubmissionDetailResponse>::error(
                "Submission not found",
            )),
        )
            .into_response(),
        Err(e) => {
            tracing::error!(error = %e, "Failed to fetch submission");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<SubmissionDetailResponse>::error(
                    "Failed to fetch submission",
                )),
            )
                .into_response()
        }
    }
}

/// GET /api/submissions/student/{student_id}
///
/// All of one student's submissions, newest first, each with its assignment.
/// Students may only list their own.
///
/// ### Responses
/// - `200 OK` with `{ count, submissions }`
/// - `403 Forbidden` (student listing someone else's submissions)
pub async fn get_student_submissions(
    State(app_state): State<AppState>,
    Path(student_id): Path<i64>,
    Extension(AuthUser(claims)): Extension<AuthUser>,
) -> impl IntoResponse {
    if claims.role == Role::Student && student_id != claims.sub {
        return (
            StatusCode::FORBIDDEN,
            Json(ApiResponse::<SubmissionListResponse>::error(
                "You may only view your own submissions",
            )),
        )
            .into_response();
    }

    let db = app_state.db();
    let student = match User::get_by_id(db, student_id).await {
        Ok(student) => student,
        Err(e) => {
            tracing::error!(error = %e, "Failed to fetch student");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<SubmissionListResponse>::error(
                    "Failed to fetch submissions",
                )),
            )
                .into_response();
        }
    };

    match Submission::list_for_student(db, student_id).await {
        Ok(rows) => {
            let submissions: Vec<SubmissionDetailResponse> = rows
                .into_iter()
                .map(|(submission, assignment)| SubmissionDetailResponse {
                    submission: SubmissionResponse::from(submission),
                    student: student.clone().map(UserInfo::from),
                    assignment: assignment.map(AssignmentInfo::from),
                    graded_by_user: None,
                })
                .collect();

            let data = SubmissionListResponse {
                count: submissions.len(),
                submissions,
            };
            (
                StatusCode::OK,
                Json(ApiResponse::success(data, "Submissions fetched successfully")),
            )
                .into_response()
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to list student submissions");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<SubmissionListResponse>::error(
                    "Failed to fetch submissions",
                )),
            )
                .into_response()
        }
    }
}

/// GET /api/submissions/{assignment_id}
///
/// Every submission for one assignment, oldest upload first, with submitter
/// and grader identities. Teacher-only view.
///
/// ### Responses
/// - `200 OK` with `{ count, submissions }`
/// - `403 Forbidden` (caller is a student)
pub async fn get_assignment_submissions(
    State(app_state): State<AppState>,
    Path(assignment_id): Path<i64>,
    Extension(AuthUser(claims)): Extension<AuthUser>,
) -> impl IntoResponse {
    if claims.role == Role::Student {
        return (
            StatusCode::FORBIDDEN,
            Json(ApiResponse::<SubmissionListResponse>::error(
                "Only teachers can list an assignment's submissions",
            )),
        )
            .into_response();
    }

    match Submission::list_for_assignment(app_state.db(), assignment_id).await {
        Ok(rows) => {
            let submissions: Vec<SubmissionDetailResponse> = rows
                .into_iter()
                .map(|(submission, student, grader)| SubmissionDetailResponse {
                    submission: SubmissionResponse::from(submission),
                    student: student.map(UserInfo::from),
                    assignment: None,
                    graded_by_user: grader.map(UserInfo::from),
                })
                .collect();

            let data = SubmissionListResponse {
                count: submissions.len(),
                submissions,
            };
            (
                StatusCode::OK,
                Json(ApiResponse::success(data, "Submissions fetched successfully")),
            )
                .into_response()
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to list assignment submissions");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<SubmissionListResponse>::error(
                    "Failed to fetch submissions",
                )),
            )
                .into_response()
        }
    }
}
