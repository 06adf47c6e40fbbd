use std::fmt;

use serde::{Deserialize, Serialize};

/// How questions are drawn for a practice run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PracticeMode {
    /// Full shuffle of the deck, then the first N questions.
    Random,
    /// Deck walkthrough in fixed order, or shuffled per settings.
    Real,
}

impl fmt::Display for PracticeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PracticeMode::Random => f.write_str("random"),
            PracticeMode::Real => f.write_str("real"),
        }
    }
}
