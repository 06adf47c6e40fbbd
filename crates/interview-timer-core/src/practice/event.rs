use crate::PracticeMode;

/// Parameters chosen on the selection screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunRequest {
    /// Deck to practice.
    pub deck_id: String,
    /// Question drawing mode.
    pub mode: PracticeMode,
    /// Requested number of questions, clamped to the deck size.
    pub count: usize,
    /// Record audio for the whole run.
    pub record: bool,
}

/// User-initiated transitions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserAction {
    /// Begin a run from the selection screen.
    Start(RunRequest),
    /// Freeze the answer stopwatch.
    Pause,
    /// Continue the answer stopwatch.
    Resume,
    /// Stop answering the current question.
    End,
    /// Replace the reflection memo of the finished question.
    SetMemo(String),
    /// Persist the finished question and advance.
    Save,
    /// Flip the pinned flag of a session log.
    TogglePin(String),
    /// Practice again with a fresh ordering and session id.
    Retry,
    /// Leave the run, discarding anything unsaved.
    Exit,
}

impl UserAction {
    pub(crate) fn name(&self) -> &'static str {
        match self {
            UserAction::Start(_) => "start",
            UserAction::Pause => "pause",
            UserAction::Resume => "resume",
            UserAction::End => "end",
            UserAction::SetMemo(_) => "set memo",
            UserAction::Save => "save",
            UserAction::TogglePin(_) => "toggle pin",
            UserAction::Retry => "retry",
            UserAction::Exit => "exit",
        }
    }
}

/// Input to [`PracticeSession::handle`](crate::PracticeSession::handle).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PracticeEvent {
    /// One second passed.
    Tick,
    /// The user did something.
    Action(UserAction),
}

impl From<UserAction> for PracticeEvent {
    fn from(action: UserAction) -> Self {
        PracticeEvent::Action(action)
    }
}
