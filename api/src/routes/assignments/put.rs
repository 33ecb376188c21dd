//! Assignment update route.

use axum::{
    Json,
    extract::{Extension, Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use validator::Validate;

use db::models::assignment::Model as Assignment;
use util::state::AppState;

use crate::auth::AuthUser;
use crate::response::ApiResponse;
use crate::routes::assignments::common::{AssignmentRequest, AssignmentResponse};

/// PUT /api/assignments/{assignment_id}
///
/// Replace an assignment's details. Only the teacher who created the
/// assignment may update it.
///
/// ### Responses
/// - `200 OK` with the updated assignment
/// - `400 Bad Request` (validation failure)
/// - `403 Forbidden` (not the creator)
/// - `404 Not Found`
pub async fn update(
    State(app_state): State<AppState>,
    Path(assignment_id): Path<i64>,
    Extension(AuthUser(claims)): Extension<AuthUser>,
    Json(req): Json<AssignmentRequest>,
) -> impl IntoResponse {
    if let Err(validation_errors) = req.validate() {
        let error_message = common::format_validation_errors(&validation_errors);
        return (
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::<AssignmentResponse>::error(error_message)),
        )
            .into_response();
    }

    let db = app_state.db();

    let existing = match Assignment::get_by_id(db, assignment_id).await {
        Ok(Some(assignment)) => assignment,
        Ok(None) => {
            return (
                StatusCode::NOT_FOUND,
                Json(ApiResponse::<AssignmentResponse>::error("Assignment not found")),
            )
                .into_response();
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to fetch assignment");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<AssignmentResponse>::error(
                    "Failed to update assignment",
                )),
            )
                .into_response();
        }
    };

    if existing.created_by != claims.sub {
        return (
            StatusCode::FORBIDDEN,
            Json(ApiResponse::<AssignmentResponse>::error(
                "Only the assignment's creator can update it",
            )),
        )
            .into_response();
    }

    match Assignment::edit(
        db,
        assignment_id,
        &req.title,
        &req.description,
        &req.subject,
        req.deadline,
        req.max_marks,
        req.instructions.as_deref(),
        req.is_active,
    )
    .await
    {
        Ok(assignment) => (
            StatusCode::OK,
            Json(ApiResponse::success(
                AssignmentResponse::from(assignment),
                "Assignment updated successfully",
            )),
        )
            .into_response(),
        Err(e) => {
            tracing::error!(error = %e, "Failed to update assignment");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<AssignmentResponse>::error(
                    "Failed to update assignment",
                )),
            )
                .into_response()
        }
    }
}
