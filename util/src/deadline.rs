//! Deadline countdown and lateness calculations.
//!
//! Pure functions of a deadline and an injected reference instant. Nothing here
//! reads the system clock; callers capture `Utc::now()` once per request and
//! pass it down, which keeps every branch testable with fixed timestamps.

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;

/// Countdown snapshot for a single deadline.
///
/// `hours` is the total number of whole hours remaining and is not capped at 24,
/// so a deadline three days out reports 72 hours. `formatted_time` is the same
/// decomposition rendered as zero-padded `HH:MM:SS`, or `"Expired"`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TimeRemaining {
    pub is_expired: bool,
    pub hours: i64,
    pub minutes: i64,
    pub seconds: i64,
    pub total_seconds: i64,
    pub formatted_time: String,
}

impl TimeRemaining {
    fn expired() -> Self {
        Self {
            is_expired: true,
            hours: 0,
            minutes: 0,
            seconds: 0,
            total_seconds: 0,
            formatted_time: "Expired".to_string(),
        }
    }
}

/// Computes the countdown from `now` to `deadline`.
///
/// An elapsed or exactly-reached deadline yields the expired sentinel with all
/// counters at zero. Otherwise the difference is floored to whole seconds
/// (sub-second remainder discarded) and decomposed into hours/minutes/seconds.
pub fn time_remaining(deadline: DateTime<Utc>, now: DateTime<Utc>) -> TimeRemaining {
    let diff = deadline - now;
    if diff <= Duration::zero() {
        return TimeRemaining::expired();
    }

    let total_seconds = diff.num_seconds();
    let hours = total_seconds / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let seconds = total_seconds % 60;

    TimeRemaining {
        is_expired: false,
        hours,
        minutes,
        seconds,
        total_seconds,
        formatted_time: format!("{:02}:{:02}:{:02}", hours, minutes, seconds),
    }
}

/// True iff the deadline is in the future but within `warning_window` of `now`.
///
/// Exactly at the window edge counts as approaching; an elapsed deadline does not.
pub fn is_approaching(
    deadline: DateTime<Utc>,
    now: DateTime<Utc>,
    warning_window: Duration,
) -> bool {
    let diff = deadline - now;
    diff > Duration::zero() && diff <= warning_window
}

/// True iff the submission instant is strictly after the deadline.
/// Submitting exactly on the deadline is on time.
pub fn is_late(submitted_at: DateTime<Utc>, deadline: DateTime<Utc>) -> bool {
    submitted_at > deadline
}
