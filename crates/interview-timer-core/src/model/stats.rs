use crate::SessionLog;

use chrono::{DateTime, Local, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Aggregate counters derived from the session log list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppStats {
    /// Number of saved session logs.
    pub total_sessions: usize,
    /// Number of logs started on the current local date.
    pub today_sessions: usize,
    /// Start time of the most recently appended log.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_session_date: Option<DateTime<Utc>>,
}

impl AppStats {
    /// Recompute stats from the full log list. `today` is a local date.
    pub fn compute(logs: &[SessionLog], today: NaiveDate) -> Self {
        let today_sessions = logs
            .iter()
            .filter(|log| log.started_at.with_timezone(&Local).date_naive() == today)
            .count();

        Self {
            total_sessions: logs.len(),
            today_sessions,
            last_session_date: logs.last().map(|log| log.started_at),
        }
    }
}

/// Answer history of one question, used to rank weak spots.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionStats {
    /// Question id.
    pub question_id: String,
    /// Question text from the earliest record.
    pub text: String,
    /// How often the answer ran over time.
    pub overtime_count: usize,
    /// How often the question was answered.
    pub total_count: usize,
}
