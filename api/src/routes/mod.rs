//! HTTP route entry point for `/api/...`.
//!
//! Route groups include:
//! - `/health` → Health check endpoint (public)
//! - `/auth` → Registration and login (public)
//! - `/assignments` → Assignment CRUD (authenticated; mutation is teacher-only)
//! - `/submissions` → Upload, grading and submission queries (authenticated)
//! - `/deadline` → Countdown info for assignments (authenticated)

use crate::auth::guards::allow_authenticated;
use crate::routes::{
    assignments::assignment_routes, auth::auth_routes, deadline::deadline_routes,
    health::health_routes, submissions::submission_routes,
};
use axum::{Router, middleware::from_fn};
use util::state::AppState;

pub mod assignments;
pub mod auth;
pub mod deadline;
pub mod health;
pub mod submissions;

/// Builds the complete application router for all HTTP endpoints.
///
/// `/health` and `/auth` are public; everything else requires a valid bearer
/// token. Finer-grained role checks (teacher/student, creator-only) are
/// layered onto the individual route groups.
pub fn routes(app_state: AppState) -> Router {
    Router::new()
        .nest("/health", health_routes())
        .nest("/auth", auth_routes())
        .nest(
            "/assignments",
            assignment_routes().route_layer(from_fn(allow_authenticated)),
        )
        .nest(
            "/submissions",
            submission_routes().route_layer(from_fn(allow_authenticated)),
        )
        .nest(
            "/deadline",
            deadline_routes().route_layer(from_fn(allow_authenticated)),
        )
        .with_state(app_state)
}
