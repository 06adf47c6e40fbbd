use crate::PracticeMode;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Persisted record of one answered question.
///
/// Deck and question are snapshotted by id and text so the record survives
/// later edits or deletion of the deck.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionLog {
    /// Unique record id.
    pub id: String,
    /// Groups every record written by one practice run.
    pub session_id: String,
    /// Deck the question came from.
    pub deck_id: String,
    /// Deck name at the time of the answer.
    pub deck_name: String,
    /// Question id.
    pub question_id: String,
    /// Question text at the time of the answer.
    pub question_text: String,
    /// Practice mode of the run.
    pub mode: PracticeMode,
    /// When the question's phase timer started.
    pub started_at: DateTime<Utc>,
    /// When the record was saved.
    pub ended_at: DateTime<Utc>,
    /// Answer duration.
    pub elapsed_seconds: u32,
    /// Target duration used for the overtime check.
    pub recommended_seconds: u32,
    /// `elapsed_seconds > recommended_seconds`.
    pub is_overtime: bool,
    /// Reflection note, absent when left blank.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub memo: Option<String>,
    /// Whether `recording_data` holds audio.
    pub has_recording: bool,
    /// Encoded recording (data URL).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recording_data: Option<String>,
    /// Pinned to the memo list.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pinned: Option<bool>,
}

impl SessionLog {
    /// Whether the record is pinned. Absent counts as unpinned.
    pub fn is_pinned(&self) -> bool {
        self.pinned.unwrap_or(false)
    }

    /// Drop the embedded recording, keeping the record itself.
    pub(crate) fn evict_recording(&mut self) {
        self.recording_data = None;
        self.has_recording = false;
    }
}
