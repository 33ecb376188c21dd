//! Assignment creation route.

use axum::{
    Json,
    extract::{Extension, State},
    http::StatusCode,
    response::IntoResponse,
};
use validator::Validate;

use db::models::assignment::Model as Assignment;
use util::state::AppState;

use crate::auth::AuthUser;
use crate::response::ApiResponse;
use crate::routes::assignments::common::{AssignmentRequest, AssignmentResponse};

/// POST /api/assignments
///
/// Create a new assignment owned by the calling teacher.
///
/// ### Request Body
/// ```json
/// {
///   "title": "Essay 1",
///   "description": "Write an essay on ownership",
///   "subject": "English",
///   "deadline": "2026-02-01T23:59:00Z",
///   "max_marks": 100,
///   "instructions": "PDF only"
/// }
/// ```
///
/// ### Responses
/// - `201 Created` with the assignment
/// - `400 Bad Request` (validation failure)
/// - `403 Forbidden` (not a teacher)
pub async fn create(
    State(app_state): State<AppState>,
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

    match Assignment::create(
        app_state.db(),
        &req.title,
        &req.description,
        &req.subject,
        req.deadline,
        req.max_marks,
        req.instructions.as_deref(),
        claims.sub,
    )
    .await
    {
        Ok(assignment) => (
            StatusCode::CREATED,
            Json(ApiResponse::success(
                AssignmentResponse::from(assignment),
                "Assignment created successfully",
            )),
        )
            .into_response(),
        Err(e) => {
            tracing::error!(error = %e, "Failed to create assignment");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<AssignmentResponse>::error(
                    "Failed to create assignment",
                )),
            )
                .into_response()
        }
    }
}
