use std::panic::Location;

use error_location::ErrorLocation;
use thiserror::Error;

/// Audio capture errors with source location tracking.
///
/// These never abort a practice run. The state machine downgrades the run to
/// no-recording when one is raised.
#[derive(Error, Debug)]
pub enum CaptureError {
    /// No audio input device found.
    #[error("No microphone found {location}")]
    NoMicrophoneFound {
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// Audio device operation failed (permission denied, stream error).
    #[error("Audio device error: {reason} {location}")]
    DeviceError {
        /// Description of the device error.
        reason: String,
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// Captured samples could not be encoded into an audio artifact.
    #[error("Audio encoding failed: {reason} {location}")]
    EncodingFailed {
        /// Description of the encoding error.
        reason: String,
        /// Source location where error occurred.
        location: ErrorLocation,
    },
}

/// Persistence and repository errors.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Reading or writing the backing medium failed.
    #[error("Storage IO error: {source} {location}")]
    Io {
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// A stored record could not be (de)serialized.
    #[error("Failed to (de)serialize {key}: {source} {location}")]
    Serialization {
        /// Storage key of the record.
        key: String,
        /// The underlying serde error.
        #[source]
        source: serde_json::Error,
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// The distinguished default deck cannot be deleted.
    #[error("The default deck cannot be deleted {location}")]
    DefaultDeckProtected {
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// No deck with the given id exists.
    #[error("Deck not found: {deck_id} {location}")]
    DeckNotFound {
        /// Requested deck id.
        deck_id: String,
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// No question with the given id exists in the deck.
    #[error("Question not found: {question_id} {location}")]
    QuestionNotFound {
        /// Requested question id.
        question_id: String,
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// No session log with the given id exists.
    #[error("Session log not found: {log_id} {location}")]
    SessionNotFound {
        /// Requested log id.
        log_id: String,
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// A question or deck field failed validation.
    #[error("Invalid input: {reason} {location}")]
    InvalidInput {
        /// Why the input was rejected.
        reason: String,
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// CSV import or export failed.
    #[error("CSV error: {source} {location}")]
    Csv {
        /// The underlying csv error.
        #[source]
        source: csv::Error,
        /// Source location where error occurred.
        location: ErrorLocation,
    },
}

impl From<csv::Error> for StoreError {
    #[track_caller]
    fn from(source: csv::Error) -> Self {
        StoreError::Csv {
            source,
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

impl From<std::io::Error> for StoreError {
    #[track_caller]
    fn from(source: std::io::Error) -> Self {
        StoreError::Io {
            source,
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

/// Practice session state machine errors.
#[derive(Error, Debug)]
pub enum PracticeError {
    /// The selected deck has no questions to practice.
    #[error("Deck {deck_id} has no questions {location}")]
    EmptyDeck {
        /// Id of the empty deck.
        deck_id: String,
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// The action is not valid in the machine's current state.
    #[error("Cannot {action} while {state} {location}")]
    InvalidTransition {
        /// Name of the current state.
        state: &'static str,
        /// Name of the rejected action.
        action: &'static str,
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// A collaborator store failed.
    #[error("Store error: {source} {location}")]
    Store {
        /// The underlying store error.
        #[source]
        source: StoreError,
        /// Source location where error occurred.
        location: ErrorLocation,
    },
}

// Manual From<StoreError> with location tracking.
// Cannot use #[from] because it does not support extra fields.
impl From<StoreError> for PracticeError {
    #[track_caller]
    fn from(source: StoreError) -> Self {
        PracticeError::Store {
            source,
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

/// Result type alias using [`PracticeError`].
pub type Result<T> = std::result::Result<T, PracticeError>;

/// Result type alias using [`StoreError`].
pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// Result type alias using [`CaptureError`].
pub type CaptureResult<T> = std::result::Result<T, CaptureError>;
