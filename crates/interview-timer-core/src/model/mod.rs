mod deck;
mod practice_mode;
mod question;
mod session_log;
mod settings;
mod stats;

pub use {
    deck::{DEFAULT_DECK_ID, Deck},
    practice_mode::PracticeMode,
    question::Question,
    session_log::SessionLog,
    settings::{AppSettings, RealModeOrder},
    stats::{AppStats, QuestionStats},
};
