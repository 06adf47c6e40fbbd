use crate::{
    error::StoreResult,
    store::{KeyValueStore, RecordKey, read_json, write_json},
};

use chrono::{Days, NaiveDate};
use tracing::{debug, instrument};

/// Practice-day stamps backing the streak counter.
///
/// Stamps are `NaiveDate`s serialized as `YYYY-MM-DD`.
pub struct PracticeDays<'a, S: ?Sized> {
    kv: &'a mut S,
}

impl<'a, S: KeyValueStore + ?Sized> PracticeDays<'a, S> {
    /// Create a view over `kv`.
    pub fn new(kv: &'a mut S) -> Self {
        Self { kv }
    }

    /// Stored stamps in insertion order.
    #[track_caller]
    pub fn stamps(&self) -> StoreResult<Vec<NaiveDate>> {
        Ok(read_json(&*self.kv, RecordKey::PracticeDays)?.unwrap_or_default())
    }

    /// Stamp `today` and return the current streak length.
    ///
    /// When stamps exist but `yesterday` is missing the streak is broken and
    /// the stamp list restarts at `today`. Stamping twice on one day is a
    /// no-op.
    #[track_caller]
    #[instrument(skip(self))]
    pub fn check_in(&mut self, today: NaiveDate) -> StoreResult<usize> {
        let mut stamps = self.stamps()?;

        if stamps.contains(&today) {
            return Ok(consecutive_days(&stamps));
        }

        let yesterday = today.checked_sub_days(Days::new(1));
        let continues = yesterday.is_some_and(|y| stamps.contains(&y));

        if !stamps.is_empty() && !continues {
            debug!("Streak broken, restarting");
            stamps.clear();
        }

        stamps.push(today);
        write_json(&mut *self.kv, RecordKey::PracticeDays, &stamps)?;

        Ok(consecutive_days(&stamps))
    }
}

/// Length of the run of consecutive days ending at the latest stamp.
pub fn consecutive_days(stamps: &[NaiveDate]) -> usize {
    let mut sorted = stamps.to_vec();
    sorted.sort_unstable_by(|a, b| b.cmp(a));
    sorted.dedup();

    let Some(first) = sorted.first() else {
        return 0;
    };

    let mut count = 1;
    let mut current = *first;
    for day in &sorted[1..] {
        if current.signed_duration_since(*day).num_days() != 1 {
            break;
        }
        count += 1;
        current = *day;
    }

    count
}
