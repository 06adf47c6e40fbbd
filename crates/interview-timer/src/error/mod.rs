use interview_timer_core::{PracticeError, StoreError};

use std::{panic::Location, result::Result as StdResult};

use error_location::ErrorLocation;
use thiserror::Error;

/// Application-level errors for the interview-timer binary.
///
/// All variants include `ErrorLocation` for call-site tracking.
#[derive(Error, Debug)]
pub enum AppError {
    /// Practice state machine error from interview-timer-core.
    #[error("Practice error: {source} {location}")]
    Practice {
        /// The underlying practice error.
        #[source]
        source: PracticeError,
        /// Location where this error was created.
        location: ErrorLocation,
    },

    /// Storage error from interview-timer-core.
    #[error("Storage error: {source} {location}")]
    Store {
        /// The underlying storage error.
        #[source]
        source: StoreError,
        /// Location where this error was created.
        location: ErrorLocation,
    },

    /// Configuration loading or saving error.
    #[error("Configuration error: {reason} {location}")]
    ConfigError {
        /// Human-readable reason for failure.
        reason: String,
        /// Location where this error was created.
        location: ErrorLocation,
    },

    /// IO error from the terminal or filesystem.
    #[error("IO error: {source} {location}")]
    IoError {
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
        /// Location where this error was created.
        location: ErrorLocation,
    },

    /// A terminal line that is not a valid command.
    #[error("Invalid command '{input}': {reason} {location}")]
    InvalidCommand {
        /// The offending input.
        input: String,
        /// What was wrong with it.
        reason: String,
        /// Location where this error was created.
        location: ErrorLocation,
    },
}

// Manual From impls with location tracking.
// Cannot use #[from] because it does not support extra fields.
impl From<PracticeError> for AppError {
    #[track_caller]
    fn from(source: PracticeError) -> Self {
        AppError::Practice {
            source,
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

impl From<StoreError> for AppError {
    #[track_caller]
    fn from(source: StoreError) -> Self {
        AppError::Store {
            source,
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

impl From<std::io::Error> for AppError {
    #[track_caller]
    fn from(source: std::io::Error) -> Self {
        AppError::IoError {
            source,
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

/// Convenience type alias for Results using `AppError`.
pub type Result<T> = StdResult<T, AppError>;
