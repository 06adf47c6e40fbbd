mod question_csv;
mod deck_repository;
mod default_deck;
mod json_file_store;
mod key_value;
mod memory_store;
mod practice_days;
mod run_history;
mod session_log_store;
mod settings_store;

#[cfg(test)]
pub(crate) use session_log_store::apply_retention;

pub use {
    question_csv::{export_questions, parse_questions},
    deck_repository::DeckRepository,
    default_deck::default_deck,
    json_file_store::JsonFileStore,
    key_value::{KeyValueStore, RecordKey},
    memory_store::MemoryStore,
    practice_days::{PracticeDays, consecutive_days},
    run_history::{RunHistory, RunRecord},
    session_log_store::{HistoryFilter, SessionLogStore, group_by_local_date},
    settings_store::SettingsStore,
};

use crate::{StoreError, error::StoreResult};

use std::panic::Location;

use error_location::ErrorLocation;
use serde::{Serialize, de::DeserializeOwned};

/// Owns the storage port and hands out typed views over it.
///
/// Views borrow the port mutably for their lifetime, which keeps every
/// read-modify-write of a record in a single place.
#[derive(Debug)]
pub struct Storage<S> {
    kv: S,
}

impl<S: KeyValueStore> Storage<S> {
    /// Wrap a storage port.
    pub fn new(kv: S) -> Self {
        Self { kv }
    }

    /// Deck and question CRUD.
    pub fn decks(&mut self) -> DeckRepository<'_, S> {
        DeckRepository::new(&mut self.kv)
    }

    /// Settings singleton.
    pub fn settings(&mut self) -> SettingsStore<'_, S> {
        SettingsStore::new(&mut self.kv)
    }

    /// Append-only session log list.
    pub fn sessions(&mut self) -> SessionLogStore<'_, S> {
        SessionLogStore::new(&mut self.kv)
    }

    /// Practice-day stamps for the streak counter.
    pub fn practice_days(&mut self) -> PracticeDays<'_, S> {
        PracticeDays::new(&mut self.kv)
    }

    /// Log of started practice runs.
    pub fn runs(&mut self) -> RunHistory<'_, S> {
        RunHistory::new(&mut self.kv)
    }

    /// Unwrap the storage port.
    pub fn into_inner(self) -> S {
        self.kv
    }
}

#[track_caller]
pub(crate) fn read_json<S, T>(kv: &S, key: RecordKey) -> StoreResult<Option<T>>
where
    S: KeyValueStore + ?Sized,
    T: DeserializeOwned,
{
    match kv.get(key)? {
        Some(raw) => serde_json::from_str(&raw)
            .map(Some)
            .map_err(|source| StoreError::Serialization {
                key: key.to_string(),
                source,
                location: ErrorLocation::from(Location::caller()),
            }),
        None => Ok(None),
    }
}

#[track_caller]
pub(crate) fn write_json<S, T>(kv: &mut S, key: RecordKey, value: &T) -> StoreResult<()>
where
    S: KeyValueStore + ?Sized,
    T: Serialize + ?Sized,
{
    let raw = serde_json::to_string(value).map_err(|source| StoreError::Serialization {
        key: key.to_string(),
        source,
        location: ErrorLocation::from(Location::caller()),
    })?;

    kv.put(key, &raw)
}
