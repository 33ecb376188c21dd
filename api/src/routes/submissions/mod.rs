use crate::auth::guards::{allow_student, allow_teacher};
use axum::{
    Router,
    middleware::from_fn,
    routing::{get, post, put},
};
use util::state::AppState;

pub mod common;
pub mod get;
pub mod post;
pub mod put;

/// Builds the `/submissions` route group.
///
/// Uploading is student-only and grading is teacher-only; reads are shared but
/// students are scoped to their own records inside the handlers.
pub fn submission_routes() -> Router<AppState> {
    let student_only = Router::new()
        .route("/upload", post(post::upload))
        .route_layer(from_fn(allow_student));

    let teacher_only = Router::new()
        .route("/{submission_id}/grade", put(put::grade))
        .route_layer(from_fn(allow_teacher));

    let reads = Router::new()
        .route("/single/{submission_id}", get(get::get_submission))
        .route("/student/{student_id}", get(get::get_student_submissions))
        .route("/{assignment_id}", get(get::get_assignment_submissions));

    student_only.merge(teacher_only).merge(reads)
}
