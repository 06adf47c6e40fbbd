use crate::{
    AppStats, PracticeMode, QuestionStats, SessionLog, StoreError,
    error::StoreResult,
    store::{KeyValueStore, RecordKey, SettingsStore, read_json, write_json},
};

use std::{collections::HashMap, panic::Location};

use chrono::{Local, NaiveDate};
use error_location::ErrorLocation;
use tracing::{debug, info, instrument, warn};

/// Narrowing applied by [`SessionLogStore::history`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HistoryFilter {
    /// Keep only logs of this mode.
    pub mode: Option<PracticeMode>,
    /// Keep only logs of this deck.
    pub deck_id: Option<String>,
}

impl HistoryFilter {
    fn matches(&self, log: &SessionLog) -> bool {
        self.mode.is_none_or(|m| m == log.mode)
            && self.deck_id.as_deref().is_none_or(|d| d == log.deck_id)
    }
}

/// Append-only session log list over the storage port.
pub struct SessionLogStore<'a, S: ?Sized> {
    kv: &'a mut S,
}

impl<'a, S: KeyValueStore + ?Sized> SessionLogStore<'a, S> {
    /// Create a view over `kv`.
    pub fn new(kv: &'a mut S) -> Self {
        Self { kv }
    }

    /// All logs in insertion (chronological) order.
    #[track_caller]
    pub fn list(&self) -> StoreResult<Vec<SessionLog>> {
        Ok(read_json(&*self.kv, RecordKey::Sessions)?.unwrap_or_default())
    }

    /// Append a record, enforce recording retention, and refresh stats.
    /// Returns the stats computed from the new list even when caching them
    /// fails.
    ///
    /// Retention and the append are applied to one in-memory list that is
    /// then written in a single `put`, so storage never holds the new record
    /// with stale eviction or vice versa.
    #[track_caller]
    #[instrument(skip(self, record), fields(log_id = %record.id, session_id = %record.session_id))]
    pub fn append(&mut self, record: SessionLog) -> StoreResult<AppStats> {
        let recording_limit = SettingsStore::new(&mut *self.kv).get()?.recording_limit;

        let mut logs = self.list()?;
        logs.push(record);
        let evicted = apply_retention(&mut logs, recording_limit);

        write_json(&mut *self.kv, RecordKey::Sessions, &logs)?;

        if evicted > 0 {
            debug!(evicted, recording_limit, "Evicted old recordings");
        }

        // The log is stored at this point. Failing here would make a retried
        // save append it twice, so the cached stats are refreshed best-effort.
        let stats = AppStats::compute(&logs, Local::now().date_naive());
        if let Err(e) = write_json(&mut *self.kv, RecordKey::Stats, &stats) {
            warn!(error = %e, "Failed to refresh cached stats");
        }

        info!(total_sessions = stats.total_sessions, "Session log saved");

        Ok(stats)
    }

    /// Set the pinned flag of one record.
    ///
    /// # Errors
    ///
    /// Returns `SessionNotFound` for an unknown id.
    #[track_caller]
    #[instrument(skip(self))]
    pub fn update_pinned(&mut self, log_id: &str, pinned: bool) -> StoreResult<()> {
        let location = ErrorLocation::from(Location::caller());
        let mut logs = self.list()?;

        let log = logs
            .iter_mut()
            .find(|l| l.id == log_id)
            .ok_or_else(|| StoreError::SessionNotFound {
                log_id: log_id.to_string(),
                location,
            })?;
        log.pinned = Some(pinned);

        write_json(&mut *self.kv, RecordKey::Sessions, &logs)
    }

    /// Flip the pinned flag of one record and return the new value.
    #[track_caller]
    pub fn toggle_pin(&mut self, log_id: &str) -> StoreResult<bool> {
        let location = ErrorLocation::from(Location::caller());
        let current = self
            .list()?
            .iter()
            .find(|l| l.id == log_id)
            .map(SessionLog::is_pinned)
            .ok_or_else(|| StoreError::SessionNotFound {
                log_id: log_id.to_string(),
                location,
            })?;

        self.update_pinned(log_id, !current)?;
        Ok(!current)
    }

    /// Logs written by one practice run, in order.
    #[track_caller]
    pub fn by_session(&self, session_id: &str) -> StoreResult<Vec<SessionLog>> {
        Ok(self
            .list()?
            .into_iter()
            .filter(|l| l.session_id == session_id)
            .collect())
    }

    /// Filtered history, newest first.
    #[track_caller]
    pub fn history(&self, filter: &HistoryFilter) -> StoreResult<Vec<SessionLog>> {
        Ok(self
            .list()?
            .into_iter()
            .rev()
            .filter(|l| filter.matches(l))
            .collect())
    }

    /// Pinned logs with a non-blank memo, newest first.
    #[track_caller]
    pub fn pinned_memos(&self) -> StoreResult<Vec<SessionLog>> {
        Ok(self
            .list()?
            .into_iter()
            .rev()
            .filter(|l| l.is_pinned() && l.memo.as_deref().is_some_and(|m| !m.trim().is_empty()))
            .collect())
    }

    /// Questions most often answered over time.
    #[track_caller]
    pub fn weak_questions(&self, limit: usize) -> StoreResult<Vec<QuestionStats>> {
        Ok(rank_weak_questions(&self.list()?, limit))
    }

    /// Last persisted stats, or zeroed stats before the first save.
    #[track_caller]
    pub fn stats(&self) -> StoreResult<AppStats> {
        Ok(read_json(&*self.kv, RecordKey::Stats)?.unwrap_or_default())
    }

    /// Stats recomputed for an arbitrary local date.
    #[track_caller]
    pub fn stats_for(&self, today: NaiveDate) -> StoreResult<AppStats> {
        Ok(AppStats::compute(&self.list()?, today))
    }
}

/// Group logs by the local date they started on, preserving input order
/// both across and within groups.
pub fn group_by_local_date(logs: &[SessionLog]) -> Vec<(NaiveDate, Vec<SessionLog>)> {
    let mut groups: Vec<(NaiveDate, Vec<SessionLog>)> = Vec::new();

    for log in logs {
        let date = log.started_at.with_timezone(&Local).date_naive();
        match groups.last_mut() {
            Some((current, entries)) if *current == date => entries.push(log.clone()),
            _ => groups.push((date, vec![log.clone()])),
        }
    }

    groups
}

/// Keep audio on only the newest `limit` recorded logs. Returns how many
/// recordings were evicted. Log entries themselves are never removed.
pub(crate) fn apply_retention(logs: &mut [SessionLog], limit: usize) -> usize {
    let recorded = logs.iter().filter(|l| l.has_recording).count();
    let excess = recorded.saturating_sub(limit);

    logs.iter_mut()
        .filter(|l| l.has_recording)
        .take(excess)
        .for_each(SessionLog::evict_recording);

    excess
}

fn rank_weak_questions(logs: &[SessionLog], limit: usize) -> Vec<QuestionStats> {
    let mut order: Vec<String> = Vec::new();
    let mut by_id: HashMap<&str, QuestionStats> = HashMap::new();

    for log in logs {
        let entry = by_id.entry(log.question_id.as_str()).or_insert_with(|| {
            order.push(log.question_id.clone());
            QuestionStats {
                question_id: log.question_id.clone(),
                text: log.question_text.clone(),
                overtime_count: 0,
                total_count: 0,
            }
        });
        entry.total_count += 1;
        if log.is_overtime {
            entry.overtime_count += 1;
        }
    }

    let mut ranked: Vec<QuestionStats> = order
        .iter()
        .filter_map(|id| by_id.remove(id.as_str()))
        .collect();
    // Stable sort keeps first-seen order among ties.
    ranked.sort_by(|a, b| b.overtime_count.cmp(&a.overtime_count));
    ranked.truncate(limit);

    ranked
}
