use crate::error::StoreResult;

use std::fmt;

/// Logical record types persisted through a [`KeyValueStore`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordKey {
    /// Deck list.
    Decks,
    /// Session log list.
    Sessions,
    /// Settings singleton.
    Settings,
    /// Derived stats snapshot.
    Stats,
    /// Dates (`YYYY-MM-DD`) the user practiced on.
    PracticeDays,
    /// One entry per started practice run.
    PracticeRuns,
}

impl RecordKey {
    /// Stable storage name of the key.
    pub fn as_str(&self) -> &'static str {
        match self {
            RecordKey::Decks => "interview_decks",
            RecordKey::Sessions => "interview_sessions",
            RecordKey::Settings => "interview_settings",
            RecordKey::Stats => "interview_stats",
            RecordKey::PracticeDays => "practice_days",
            RecordKey::PracticeRuns => "practice_runs",
        }
    }
}

impl fmt::Display for RecordKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Storage port: opaque string values keyed by record type.
///
/// Stores never see domain types. The typed stores in this module serialize
/// to JSON on top of this trait, so any medium that can hold a string per key
/// can back the application.
pub trait KeyValueStore {
    /// Read the value stored under `key`, if any.
    fn get(&self, key: RecordKey) -> StoreResult<Option<String>>;

    /// Replace the value stored under `key`.
    ///
    /// Implementations must not leave a partially written value behind.
    fn put(&mut self, key: RecordKey, value: &str) -> StoreResult<()>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for Box<S> {
    fn get(&self, key: RecordKey) -> StoreResult<Option<String>> {
        (**self).get(key)
    }

    fn put(&mut self, key: RecordKey, value: &str) -> StoreResult<()> {
        (**self).put(key, value)
    }
}
