//! One-second phase timers driven by external ticks.
//!
//! Neither timer reads a clock. Each `tick` stands for one elapsed second, so
//! the state machine stays deterministic under test.

/// Preparation countdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Countdown {
    remaining: u32,
}

impl Countdown {
    /// Start a countdown of `seconds`.
    pub fn new(seconds: u32) -> Self {
        Self { remaining: seconds }
    }

    /// Seconds left.
    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    /// Advance by one second. Returns `true` once the countdown hits zero.
    pub fn tick(&mut self) -> bool {
        self.remaining = self.remaining.saturating_sub(1);
        self.is_done()
    }

    /// Whether the countdown has reached zero.
    pub fn is_done(&self) -> bool {
        self.remaining == 0
    }
}

/// Answer stopwatch with pause support.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Stopwatch {
    elapsed: u32,
    paused: bool,
}

impl Stopwatch {
    /// A running stopwatch at zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Seconds counted so far.
    pub fn elapsed(&self) -> u32 {
        self.elapsed
    }

    /// Whether ticks are currently ignored.
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Count one second unless paused. Returns whether time accrued.
    pub fn tick(&mut self) -> bool {
        if self.paused {
            return false;
        }
        self.elapsed = self.elapsed.saturating_add(1);
        true
    }

    /// Freeze the elapsed value. Returns `false` if already paused.
    pub fn pause(&mut self) -> bool {
        !std::mem::replace(&mut self.paused, true)
    }

    /// Continue from the frozen value. Returns `false` if not paused.
    pub fn resume(&mut self) -> bool {
        std::mem::replace(&mut self.paused, false)
    }
}
