use crate::{
    PracticeMode,
    error::StoreResult,
    store::{KeyValueStore, RecordKey, read_json, write_json},
};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One started practice run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunRecord {
    /// Run id, equal to the `session_id` of its logs.
    pub session_id: String,
    /// Practice mode.
    pub mode: PracticeMode,
    /// Deck practiced.
    pub deck_id: String,
    /// Number of questions selected.
    pub question_count: usize,
    /// When the run started.
    pub start_time: DateTime<Utc>,
}

/// Append-only log of started runs, including abandoned ones.
pub struct RunHistory<'a, S: ?Sized> {
    kv: &'a mut S,
}

impl<'a, S: KeyValueStore + ?Sized> RunHistory<'a, S> {
    /// Create a view over `kv`.
    pub fn new(kv: &'a mut S) -> Self {
        Self { kv }
    }

    /// All recorded runs, oldest first.
    #[track_caller]
    pub fn list(&self) -> StoreResult<Vec<RunRecord>> {
        Ok(read_json(&*self.kv, RecordKey::PracticeRuns)?.unwrap_or_default())
    }

    /// Record a run start.
    #[track_caller]
    pub fn append(&mut self, record: RunRecord) -> StoreResult<()> {
        let mut runs = self.list()?;
        runs.push(record);
        write_json(&mut *self.kv, RecordKey::PracticeRuns, &runs)
    }
}
