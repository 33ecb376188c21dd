//! Assignment read routes.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use sea_orm::ModelTrait;

use db::models::{assignment::Model as Assignment, user};
use util::state::AppState;

use crate::response::ApiResponse;
use crate::routes::assignments::common::{
    AssignmentDetailResponse, AssignmentListResponse, AssignmentResponse, CreatorInfo,
};

/// GET /api/assignments
///
/// All active assignments, each with its creator, soonest deadline first.
///
/// ### Responses
/// - `200 OK` with `{ count, assignments }`
pub async fn get_assignments(State(app_state): State<AppState>) -> impl IntoResponse {
    match Assignment::find_active(app_state.db()).await {
        Ok(rows) => {
            let assignments: Vec<AssignmentDetailResponse> = rows
                .into_iter()
                .map(|(assignment, creator)| AssignmentDetailResponse {
                    assignment: AssignmentResponse::from(assignment),
                    created_by_user: creator.map(CreatorInfo::from),
                })
                .collect();

            let data = AssignmentListResponse {
                count: assignments.len(),
                assignments,
            };
            (
                StatusCode::OK,
                Json(ApiResponse::success(data, "Assignments fetched successfully")),
            )
                .into_response()
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to list assignments");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<AssignmentListResponse>::error(
                    "Failed to fetch assignments",
                )),
            )
                .into_response()
        }
    }
}

/// GET /api/assignments/{assignment_id}
///
/// A single assignment with its creator.
///
/// ### Responses
/// - `200 OK`
/// - `404 Not Found`
pub async fn get_assignment(
    State(app_state): State<AppState>,
    Path(assignment_id): Path<i64>,
) -> impl IntoResponse {
    let db = app_state.db();

    match Assignment::get_by_id(db, assignment_id).await {
        Ok(Some(assignment)) => {
            let creator = match assignment.find_related(user::Entity).one(db).await {
                Ok(creator) => creator,
                Err(e) => {
                    tracing::error!(error = %e, "Failed to resolve assignment creator");
                    None
                }
            };

            let data = AssignmentDetailResponse {
                assignment: AssignmentResponse::from(assignment),
                created_by_user: creator.map(CreatorInfo::from),
            };
            (
                StatusCode::OK,
                Json(ApiResponse::success(data, "Assignment fetched successfully")),
            )
                .into_response()
        }
        Ok(None) => (
            StatusCode::NOT_FOUND,
            Json(ApiResponse::<AssignmentDetailResponse>::error(
                "Assignment not found",
            )),
        )
            .into_response(),
        Err(e) => {
            tracing::error!(error = %e, "Failed to fetch assignment");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<AssignmentDetailResponse>::error(
                    "Failed to fetch assignment",
                )),
            )
                .into_response()
        }
    }
}
