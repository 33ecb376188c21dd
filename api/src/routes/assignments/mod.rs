use crate::auth::guards::allow_teacher;
use axum::{
    Router,
    middleware::from_fn,
    routing::{delete, get, post, put},
};
use util::state::AppState;

pub mod common;
pub mod delete;
pub mod get;
pub mod post;
pub mod put;

/// Builds the `/assignments` route group.
///
/// Reads are open to any authenticated user; creation, update and removal are
/// teacher-only (update/removal additionally check ownership in the handler).
pub fn assignment_routes() -> Router<AppState> {
    let read = Router::new()
        .route("/", get(get::get_assignments))
        .route("/{assignment_id}", get(get::get_assignment));

    let write = Router::new()
        .route("/", post(post::create))
        .route("/{assignment_id}", put(put::update))
        .route("/{assignment_id}", delete(delete::remove))
        .route_layer(from_fn(allow_teacher));

    read.merge(write)
}
