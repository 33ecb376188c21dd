use serde::Serialize;

use db::models::{
    assignment::Model as Assignment,
    submission::{Model as Submission, SubmissionContext},
    user::Model as User,
};

#[derive(Debug, Serialize, Default)]
pub struct SubmissionResponse {
    pub id: i64,
    pub assignment_id: i64,
    pub student_id: i64,
    pub file_url: String,
    pub file_name: String,
    pub submitted_at: String,
    pub is_late: bool,
    pub status: String,
    pub marks: Option<i64>,
    pub feedback: Option<String>,
    pub graded_at: Option<String>,
    pub graded_by: Option<i64>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<Submission> for SubmissionResponse {
    fn from(s: Submission) -> Self {
        Self {
            id: s.id,
            assignment_id: s.assignment_id,
            student_id: s.student_id,
            file_url: s.file_url,
            file_name: s.file_name,
            submitted_at: s.submitted_at.to_rfc3339(),
            is_late: s.is_late,
            status: s.status.to_string(),
            marks: s.marks,
            feedback: s.feedback,
            graded_at: s.graded_at.map(|t| t.to_rfc3339()),
            graded_by: s.graded_by,
            created_at: s.created_at.to_rfc3339(),
            updated_at: s.updated_at.to_rfc3339(),
        }
    }
}

/// User identity attached to submission reads.
#[derive(Debug, Serialize)]
pub struct UserInfo {
    pub id: i64,
    pub name: String,
    pub email: String,
}

impl From<User> for UserInfo {
    fn from(u: User) -> Self {
        Self {
            id: u.id,
            name: u.name,
            email: u.email,
        }
    }
}

/// The slice of an assignment relevant when reading a submission.
#[derive(Debug, Serialize)]
pub struct AssignmentInfo {
    pub id: i64,
    pub title: String,
    pub subject: String,
    pub deadline: String,
    pub max_marks: i64,
}

impl From<Assignment> for AssignmentInfo {
    fn from(a: Assignment) -> Self {
        Self {
            id: a.id,
            title: a.title,
            subject: a.subject,
            deadline: a.deadline.to_rfc3339(),
            max_marks: a.max_marks,
        }
    }
}

#[derive(Debug, Serialize, Default)]
pub struct SubmissionDetailResponse {
    #[serde(flatten)]
    pub submission: SubmissionResponse,
    pub student: Option<UserInfo>,
    pub assignment: Option<AssignmentInfo>,
    pub graded_by_user: Option<UserInfo>,
}

impl From<SubmissionContext> for SubmissionDetailResponse {
    fn from(ctx: SubmissionContext) -> Self {
        Self {
            submission: SubmissionResponse::from(ctx.submission),
            student: ctx.student.map(UserInfo::from),
            assignment: ctx.assignment.map(AssignmentInfo::from),
            graded_by_user: ctx.grader.map(UserInfo::from),
        }
    }
}

#[derive(Debug, Serialize, Default)]
pub struct SubmissionListResponse {
    pub count: usize,
    pub submissions: Vec<SubmissionDetailResponse>,
}
