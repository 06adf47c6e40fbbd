mod event;
mod machine;
mod run;
mod selection;
mod state;
mod timer;

pub use {
    event::{PracticeEvent, RunRequest, UserAction},
    machine::{PracticeSession, Step},
    run::PracticeRun,
    selection::{clamp_count, select_questions, shuffle},
    state::PracticeState,
    timer::{Countdown, Stopwatch},
};
