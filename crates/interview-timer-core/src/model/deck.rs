use crate::{Question, StoreError, error::StoreResult};

use std::panic::Location;

use chrono::{DateTime, Utc};
use error_location::ErrorLocation;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Id of the seeded deck that can never be deleted.
pub const DEFAULT_DECK_ID: &str = "default";

/// An ordered collection of questions.
///
/// Question order is significant: it is the order used by `Real` mode when
/// `RealModeOrder::Fixed` is configured.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Deck {
    /// Unique deck id.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Questions in practice order.
    pub questions: Vec<Question>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last modification timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Deck {
    /// Create an empty deck with a freshly generated id.
    pub fn new(name: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            name: name.into(),
            questions: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Whether this is the protected default deck.
    pub fn is_default(&self) -> bool {
        self.id == DEFAULT_DECK_ID
    }

    /// Look up a question by id.
    pub fn question(&self, question_id: &str) -> Option<&Question> {
        self.questions.iter().find(|q| q.id == question_id)
    }

    /// Append a new question and return its id.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` if the trimmed text is empty.
    #[track_caller]
    pub fn add_question(&mut self, text: &str, recommended_seconds: u32) -> StoreResult<String> {
        let text = validated_text(text)?;
        let question = Question::new(text, recommended_seconds);
        let id = question.id.clone();
        self.questions.push(question);
        Ok(id)
    }

    /// Replace the text and recommended duration of an existing question.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` for empty text, `QuestionNotFound` for an
    /// unknown id.
    #[track_caller]
    pub fn update_question(
        &mut self,
        question_id: &str,
        text: &str,
        recommended_seconds: u32,
    ) -> StoreResult<()> {
        let text = validated_text(text)?;
        let question = self
            .questions
            .iter_mut()
            .find(|q| q.id == question_id)
            .ok_or_else(|| StoreError::QuestionNotFound {
                question_id: question_id.to_string(),
                location: ErrorLocation::from(Location::caller()),
            })?;

        question.text = text;
        question.recommended_seconds = recommended_seconds;
        Ok(())
    }

    /// Remove a question, returning it.
    ///
    /// # Errors
    ///
    /// Returns `QuestionNotFound` for an unknown id.
    #[track_caller]
    pub fn remove_question(&mut self, question_id: &str) -> StoreResult<Question> {
        let index = self
            .questions
            .iter()
            .position(|q| q.id == question_id)
            .ok_or_else(|| StoreError::QuestionNotFound {
                question_id: question_id.to_string(),
                location: ErrorLocation::from(Location::caller()),
            })?;

        Ok(self.questions.remove(index))
    }
}

#[track_caller]
fn validated_text(text: &str) -> StoreResult<String> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(StoreError::InvalidInput {
            reason: "question text is empty".to_string(),
            location: ErrorLocation::from(Location::caller()),
        });
    }
    Ok(trimmed.to_string())
}
