//! Assignment removal route.

use axum::{
    Json,
    extract::{Extension, Path, State},
    http::StatusCode,
    response::IntoResponse,
};

use db::models::assignment::Model as Assignment;
use util::state::AppState;

use crate::auth::AuthUser;
use crate::response::ApiResponse;

/// DELETE /api/assignments/{assignment_id}
///
/// Deactivate an assignment. The row and its submissions are kept; the
/// assignment simply stops appearing in listings and deadline views.
/// Only the teacher who created the assignment may remove it.
///
/// ### Responses
/// - `200 OK`
/// - `403 Forbidden` (not the creator)
/// - `404 Not Found`
pub async fn remove(
    State(app_state): State<AppState>,
    Path(assignment_id): Path<i64>,
    Extension(AuthUser(claims)): Extension<AuthUser>,
) -> impl IntoResponse {
    let db = app_state.db();

    let existing = match Assignment::get_by_id(db, assignment_id).await {
        Ok(Some(assignment)) => assignment,
        Ok(None) => {
            return (
                StatusCode::NOT_FOUND,
                Json(ApiResponse::<()>::error("Assignment not found")),
            )
                .into_response();
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to fetch assignment");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<()>::error("Failed to remove assignment")),
            )
                .into_response();
        }
    };

    if existing.created_by != claims.sub {
        return (
            StatusCode::FORBIDDEN,
            Json(ApiResponse::<()>::error(
                "Only the assignment's creator can remove it",
            )),
        )
            .into_response();
    }

    match Assignment::deactivate(db, assignment_id).await {
        Ok(_) => (
            StatusCode::OK,
            Json(ApiResponse::success((), "Assignment removed successfully")),
        )
            .into_response(),
        Err(e) => {
            tracing::error!(error = %e, "Failed to remove assignment");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<()>::error("Failed to remove assignment")),
            )
                .into_response()
        }
    }
}
