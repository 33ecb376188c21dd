//! Registration and login routes issuing JWTs.

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use util::state::AppState;
use validator::Validate;

use db::models::user::{Model as User, Role};

use crate::auth::generate_jwt;
use crate::response::ApiResponse;

#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
    #[validate(email(message = "Email must be a valid email address"))]
    pub email: String,
    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub password: String,
    pub role: Role,
}

#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email(message = "Email must be a valid email address"))]
    pub email: String,
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

#[derive(Debug, Serialize, Default)]
pub struct UserResponse {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub role: Option<Role>,
    pub created_at: String,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
            role: Some(user.role),
            created_at: user.created_at.to_rfc3339(),
        }
    }
}

#[derive(Debug, Serialize, Default)]
pub struct AuthResponse {
    pub token: String,
    pub expires_at: String,
    pub user: UserResponse,
}

/// POST /api/auth/register
///
/// Create a new teacher or student account.
///
/// ### Request Body
/// ```json
/// { "name": "Alice", "email": "alice@school.test", "password": "secret123", "role": "student" }
/// ```
///
/// ### Responses
/// - `201 Created` with the new user
/// - `400 Bad Request` (validation failure)
/// - `409 Conflict` (email already registered)
pub async fn register(
    State(app_state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> impl IntoResponse {
    if let Err(validation_errors) = req.validate() {
        let error_message = common::format_validation_errors(&validation_errors);
        return (
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::<UserResponse>::error(error_message)),
        )
            .into_response();
    }

    match User::create(app_state.db(), &req.name, &req.email, &req.password, req.role).await {
        Ok(user) => (
            StatusCode::CREATED,
            Json(ApiResponse::success(
                UserResponse::from(user),
                "User registered successfully",
            )),
        )
            .into_response(),
        Err(e) => {
            if e.to_string().contains("UNIQUE constraint failed") {
                return (
                    StatusCode::CONFLICT,
                    Json(ApiResponse::<UserResponse>::error(
                        "An account with this email already exists",
                    )),
                )
                    .into_response();
            }

            tracing::error!(error = %e, "Failed to register user");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<UserResponse>::error("Failed to register user")),
            )
                .into_response()
        }
    }
}

/// POST /api/auth/login
///
/// Verify credentials and issue a bearer token.
///
/// ### Responses
/// - `200 OK` with `{ token, expires_at, user }`
/// - `401 Unauthorized` (unknown email or wrong password)
pub async fn login(
    State(app_state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> impl IntoResponse {
    if let Err(validation_errors) = req.validate() {
        let error_message = common::format_validation_errors(&validation_errors);
        return (
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::<AuthResponse>::error(error_message)),
        )
            .into_response();
    }

    match User::verify_credentials(app_state.db(), &req.email, &req.password).await {
        Ok(Some(user)) => {
            let (token, expires_at) = generate_jwt(user.id, user.role);
            tracing::info!(user = user.id, at = %Utc::now(), "User logged in");
            (
                StatusCode::OK,
                Json(ApiResponse::success(
                    AuthResponse {
                        token,
                        expires_at,
                        user: UserResponse::from(user),
                    },
                    "Login successful",
                )),
            )
                .into_response()
        }
        Ok(None) => (
            StatusCode::UNAUTHORIZED,
            Json(ApiResponse::<AuthResponse>::error("Invalid email or password")),
        )
            .into_response(),
        Err(e) => {
            tracing::error!(error = %e, "Login failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<AuthResponse>::error("Login failed")),
            )
                .into_response()
        }
    }
}
