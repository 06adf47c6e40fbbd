use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A single practice question owned by a [`Deck`](crate::Deck).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    /// Unique id within its deck.
    pub id: String,
    /// Question text shown to the user.
    pub text: String,
    /// Target answer length. Zero falls back to the settings default.
    pub recommended_seconds: u32,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl Question {
    /// Create a question with a freshly generated id.
    pub fn new(text: impl Into<String>, recommended_seconds: u32) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            text: text.into(),
            recommended_seconds,
            created_at: Utc::now(),
        }
    }

    /// Recommended answer length, falling back to `default_seconds` when unset.
    pub fn recommended_or(&self, default_seconds: u32) -> u32 {
        if self.recommended_seconds > 0 {
            self.recommended_seconds
        } else {
            default_seconds
        }
    }
}
