use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use db::models::{assignment::Model as Assignment, user::Model as User};

fn default_max_marks() -> i64 {
    100
}

fn default_is_active() -> bool {
    true
}

/// Request body for creating or updating an assignment.
#[derive(Debug, Deserialize, Validate)]
pub struct AssignmentRequest {
    #[validate(length(min = 1, message = "Title is required"))]
    pub title: String,
    #[validate(length(min = 1, message = "Description is required"))]
    pub description: String,
    #[validate(length(min = 1, message = "Subject is required"))]
    pub subject: String,
    pub deadline: DateTime<Utc>,
    #[validate(range(min = 1, message = "Max marks must be a positive number"))]
    #[serde(default = "default_max_marks")]
    pub max_marks: i64,
    pub instructions: Option<String>,
    #[serde(default = "default_is_active")]
    pub is_active: bool,
}

#[derive(Debug, Serialize, Default)]
pub struct AssignmentResponse {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub subject: String,
    pub deadline: String,
    pub max_marks: i64,
    pub instructions: Option<String>,
    pub created_by: i64,
    pub is_active: bool,
    pub created_at: String,
    pub updated_at: String,
}

impl From<Assignment> for AssignmentResponse {
    fn from(a: Assignment) -> Self {
        Self {
            id: a.id,
            title: a.title,
            description: a.description,
            subject: a.subject,
            deadline: a.deadline.to_rfc3339(),
            max_marks: a.max_marks,
            instructions: a.instructions,
            created_by: a.created_by,
            is_active: a.is_active,
            created_at: a.created_at.to_rfc3339(),
            updated_at: a.updated_at.to_rfc3339(),
        }
    }
}

/// Creator identity attached to assignment reads.
#[derive(Debug, Serialize)]
pub struct CreatorInfo {
    pub id: i64,
    pub name: String,
    pub email: String,
}

impl From<User> for CreatorInfo {
    fn from(u: User) -> Self {
        Self {
            id: u.id,
            name: u.name,
            email: u.email,
        }
    }
}

#[derive(Debug, Serialize, Default)]
pub struct AssignmentDetailResponse {
    #[serde(flatten)]
    pub assignment: AssignmentResponse,
    pub created_by_user: Option<CreatorInfo>,
}

#[derive(Debug, Serialize, Default)]
pub struct AssignmentListResponse {
    pub count: usize,
    pub assignments: Vec<AssignmentDetailResponse>,
}
