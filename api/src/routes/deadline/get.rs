//! Deadline countdown routes.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use chrono::{Duration, Utc};

use db::models::assignment::Model as Assignment;
use util::{config, deadline, state::AppState};

use crate::response::ApiResponse;
use crate::routes::deadline::common::{DeadlineListResponse, DeadlineResponse};

fn warning_window() -> Duration {
    Duration::hours(config::deadline_warning_hours())
}

/// GET /api/deadline/{assignment_id}
///
/// Countdown for one assignment. `is_approaching` is set when the deadline is
/// in the future but within the configured warning window (24h by default).
///
/// ### Responses
/// - `200 OK`
/// - `404 Not Found` (unknown or inactive assignment)
pub async fn get_deadline(
    State(app_state): State<AppState>,
    Path(assignment_id): Path<i64>,
) -> impl IntoResponse {
    match Assignment::get_by_id(app_state.db(), assignment_id).await {
        Ok(Some(assignment)) if assignment.is_active => {
            let now = Utc::now();
            let data = DeadlineResponse {
                assignment_id: assignment.id,
                title: assignment.title,
                subject: assignment.subject,
                deadline: assignment.deadline.to_rfc3339(),
                max_marks: assignment.max_marks,
                is_approaching: deadline::is_approaching(
                    assignment.deadline,
                    now,
                    warning_window(),
                ),
                time_remaining: deadline::time_remaining(assignment.deadline, now),
            };
            (
                StatusCode::OK,
                Json(ApiResponse::success(data, "Deadline fetched successfully")),
            )
                .into_response()
        }
        Ok(_) => (
            StatusCode::NOT_FOUND,
            Json(ApiResponse::<DeadlineResponse>::error("Assignment not found")),
        )
            .into_response(),
        Err(e) => {
            tracing::error!(error = %e, "Failed to fetch assignment deadline");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<DeadlineResponse>::error(
                    "Failed to fetch deadline",
                )),
            )
                .into_response()
        }
    }
}

/// GET /api/deadline/all/deadlines
///
/// Countdown for every active assignment, soonest deadline first. One `now`
/// is captured for the whole listing so the rows are mutually consistent.
///
/// ### Responses
/// - `200 OK` with `{ count, assignments }`
pub async fn get_all_deadlines(State(app_state): State<AppState>) -> impl IntoResponse {
    match Assignment::find_active(app_state.db()).await {
        Ok(rows) => {
            let now = Utc::now();
            let window = warning_window();
            let assignments: Vec<DeadlineResponse> = rows
                .into_iter()
                .map(|(assignment, _)| DeadlineResponse {
                    assignment_id: assignment.id,
                    title: assignment.title,
                    subject: assignment.subject,
                    deadline: assignment.deadline.to_rfc3339(),
                    max_marks: assignment.max_marks,
                    is_approaching: deadline::is_approaching(assignment.deadline, now, window),
                    time_remaining: deadline::time_remaining(assignment.deadline, now),
                })
                .collect();

            let data = DeadlineListResponse {
                count: assignments.len(),
                assignments,
            };
            (
                StatusCode::OK,
                Json(ApiResponse::success(data, "Deadlines fetched successfully")),
            )
                .into_response()
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to list deadlines");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<DeadlineListResponse>::error(
                    "Failed to fetch deadlines",
                )),
            )
                .into_response()
        }
    }
}
