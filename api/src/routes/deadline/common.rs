use serde::Serialize;

use util::deadline::TimeRemaining;

/// One assignment's deadline with its live countdown.
#[derive(Debug, Serialize, Default)]
pub struct DeadlineResponse {
    pub assignment_id: i64,
    pub title: String,
    pub subject: String,
    pub deadline: String,
    pub max_marks: i64,
    pub is_approaching: bool,
    #[serde(flatten)]
    pub time_remaining: TimeRemaining,
}

#[derive(Debug, Serialize, Default)]
pub struct DeadlineListResponse {
    pub count: usize,
    pub assignments: Vec<DeadlineResponse>,
}
