//! Interview Timer Core Library
//!
//! Practice session state machine for timed interview answers, with deck,
//! settings and session-log stores behind a key-value storage port and an
//! optional run-wide microphone recording.
//!
//! # Example
//!
//! ```no_run
//! use interview_timer_core::{
//!     CoreResult, DEFAULT_DECK_ID, MemoryStore, NullRecorder, PracticeEvent, PracticeMode,
//!     PracticeSession, RunRequest, UserAction,
//! };
//!
//! fn main() -> CoreResult<()> {
//!     let mut session = PracticeSession::new(MemoryStore::new(), NullRecorder);
//!
//!     session.handle(UserAction::Start(RunRequest {
//!         deck_id: DEFAULT_DECK_ID.to_string(),
//!         mode: PracticeMode::Random,
//!         count: 3,
//!         record: false,
//!     }).into())?;
//!
//!     for _ in 0..42 {
//!         session.handle(PracticeEvent::Tick)?;
//!     }
//!     session.handle(UserAction::End.into())?;
//!     session.handle(UserAction::Save.into())?;
//!     Ok(())
//! }
//! ```

mod audio;
mod error;
mod model;
mod practice;
mod store;

pub use {
    audio::{EncodedAudio, MicrophoneRecorder, NullRecorder, Recorder, encode_wav},
    error::{
        CaptureError, CaptureResult, PracticeError, Result as CoreResult, StoreError, StoreResult,
    },
    model::{
        AppSettings, AppStats, DEFAULT_DECK_ID, Deck, PracticeMode, Question, QuestionStats,
        RealModeOrder, SessionLog,
    },
    practice::{
        Countdown, PracticeEvent, PracticeRun, PracticeSession, PracticeState, RunRequest, Step,
        Stopwatch, UserAction, clamp_count, select_questions, shuffle,
    },
    store::{
        DeckRepository, HistoryFilter, JsonFileStore, KeyValueStore, MemoryStore, PracticeDays,
        RecordKey, RunHistory, RunRecord, SessionLogStore, SettingsStore, Storage,
        consecutive_days, default_deck, export_questions, group_by_local_date, parse_questions,
    },
};

#[cfg(test)]
mod tests;
