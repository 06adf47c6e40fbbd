use crate::{AppSettings, Deck, EncodedAudio, PracticeMode, Question};

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Transient state of one practice run.
///
/// Never persisted. Dropped on exit, regenerated on retry.
#[derive(Debug, Clone)]
pub struct PracticeRun {
    pub(crate) mode: PracticeMode,
    pub(crate) deck: Deck,
    pub(crate) settings: AppSettings,
    pub(crate) requested_count: usize,
    pub(crate) questions: Vec<Question>,
    pub(crate) current_index: usize,
    pub(crate) session_id: String,
    pub(crate) recording_requested: bool,
    pub(crate) recording_enabled: bool,
    pub(crate) run_started_at: DateTime<Utc>,
    pub(crate) question_started_at: DateTime<Utc>,
    pub(crate) memo: String,
    pub(crate) pending_audio: Option<EncodedAudio>,
}

impl PracticeRun {
    pub(crate) fn new(
        mode: PracticeMode,
        deck: Deck,
        settings: AppSettings,
        requested_count: usize,
        questions: Vec<Question>,
        recording_requested: bool,
    ) -> Self {
        let now = Utc::now();
        Self {
            mode,
            deck,
            settings,
            requested_count,
            questions,
            current_index: 0,
            session_id: new_session_id(),
            recording_requested,
            recording_enabled: recording_requested,
            run_started_at: now,
            question_started_at: now,
            memo: String::new(),
            pending_audio: None,
        }
    }

    /// Practice mode.
    pub fn mode(&self) -> PracticeMode {
        self.mode
    }

    /// Snapshot of the deck taken at run start.
    pub fn deck(&self) -> &Deck {
        &self.deck
    }

    /// Settings snapshot used for the whole run.
    pub fn settings(&self) -> &AppSettings {
        &self.settings
    }

    /// Questions of this run, in practice order.
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    /// Zero-based index of the current question.
    pub fn current_index(&self) -> usize {
        self.current_index
    }

    /// The question being practiced.
    pub fn current_question(&self) -> Option<&Question> {
        self.questions.get(self.current_index)
    }

    /// Whether the current question is the run's last.
    pub fn is_last_question(&self) -> bool {
        self.current_index + 1 >= self.questions.len()
    }

    /// Id shared by every log this run writes.
    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    /// Whether audio is still being recorded for this run.
    ///
    /// Starts equal to what the user asked for and drops to `false` after a
    /// capture failure.
    pub fn recording_enabled(&self) -> bool {
        self.recording_enabled
    }

    /// When the run began.
    pub fn run_started_at(&self) -> DateTime<Utc> {
        self.run_started_at
    }

    /// Whole seconds since the run began, as of `now`.
    pub fn run_elapsed_seconds(&self, now: DateTime<Utc>) -> u32 {
        let secs = now.signed_duration_since(self.run_started_at).num_seconds();
        u32::try_from(secs.max(0)).unwrap_or(u32::MAX)
    }

    /// Memo typed for the current question.
    pub fn memo(&self) -> &str {
        &self.memo
    }

    /// Target duration of the current question.
    pub fn recommended_seconds(&self) -> u32 {
        self.current_question()
            .map(|q| q.recommended_or(self.settings.default_seconds))
            .unwrap_or(self.settings.default_seconds)
    }

    /// Reset per-question state and move to the next question.
    pub(crate) fn advance(&mut self) {
        self.current_index += 1;
        self.reset_question_state();
    }

    pub(crate) fn reset_question_state(&mut self) {
        self.memo.clear();
        self.pending_audio = None;
        self.question_started_at = Utc::now();
    }

    /// Start over with new questions and a fresh session id.
    pub(crate) fn restart(&mut self, questions: Vec<Question>) {
        let now = Utc::now();
        self.questions = questions;
        self.current_index = 0;
        self.session_id = new_session_id();
        self.recording_enabled = self.recording_requested;
        self.run_started_at = now;
        self.reset_question_state();
    }
}

fn new_session_id() -> String {
    Uuid::new_v4().to_string()
}
