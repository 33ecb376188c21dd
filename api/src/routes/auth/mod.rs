use axum::{Router, routing::post};
use util::state::AppState;

pub mod post;

/// Builds the `/auth` route group: registration and login.
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(post::register))
        .route("/login", post(post::login))
}
