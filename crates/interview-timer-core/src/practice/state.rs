use crate::practice::{Countdown, Stopwatch};

use std::fmt;

/// Phase of the practice state machine.
///
/// Timers live inside the phase that owns them, so leaving a phase always
/// drops its timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PracticeState {
    /// No run active; waiting for a deck and count.
    SelectingCount,
    /// Counting down before the answer starts.
    Preparation(Countdown),
    /// Answer stopwatch running (or paused).
    Answering(Stopwatch),
    /// Answer ended; memo may be edited before saving.
    Finished {
        /// Final answer duration.
        elapsed_seconds: u32,
    },
    /// Every question of the run has been saved.
    AllComplete,
}

impl PracticeState {
    /// Short lowercase name used in logs and errors.
    pub fn name(&self) -> &'static str {
        match self {
            PracticeState::SelectingCount => "selecting count",
            PracticeState::Preparation(_) => "preparing",
            PracticeState::Answering(_) => "answering",
            PracticeState::Finished { .. } => "finished",
            PracticeState::AllComplete => "all complete",
        }
    }
}

impl fmt::Display for PracticeState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
