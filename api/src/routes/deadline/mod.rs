use axum::{Router, routing::get};
use util::state::AppState;

pub mod common;
pub mod get;

/// Builds the `/deadline` route group: countdown views over active assignments.
pub fn deadline_routes() -> Router<AppState> {
    Router::new()
        .route("/all/deadlines", get(get::get_all_deadlines))
        .route("/{assignment_id}", get(get::get_deadline))
}
