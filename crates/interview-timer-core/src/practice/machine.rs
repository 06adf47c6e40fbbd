//! Practice session state machine.
//!
//! Drives one run of N questions: selection, preparation countdown, answer
//! stopwatch, run-wide recording and per-question log emission. All input
//! arrives as [`PracticeEvent`]s handled synchronously one at a time.

use crate::{
    AppStats, CoreResult, PracticeError, SessionLog,
    audio::Recorder,
    practice::{
        Countdown, PracticeEvent, PracticeRun, PracticeState, RunRequest, Stopwatch, UserAction,
        select_questions,
    },
    store::{KeyValueStore, RunRecord, Storage},
};

use std::panic::Location;

use chrono::Utc;
use error_location::ErrorLocation;
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

/// What a handled event did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    /// Nothing to do in the current state (e.g. a tick with no timer).
    Idle,
    /// A timer advanced without changing phase.
    Ticked,
    /// The machine moved to another phase or updated run data.
    Changed,
    /// A session log was persisted.
    Saved {
        /// Stats recomputed after the write.
        stats: AppStats,
        /// `true` if that was the run's last question.
        run_complete: bool,
    },
    /// The run was abandoned or closed.
    Exited,
}

/// The practice session state machine.
///
/// Owns its storage and recorder. The recorder is only ever active between
/// run start and the last question's `End`, and any recording still active
/// when the run is left (or the machine dropped) is discarded.
pub struct PracticeSession<S: KeyValueStore, R: Recorder> {
    storage: Storage<S>,
    recorder: R,
    state: PracticeState,
    run: Option<PracticeRun>,
}

impl<S: KeyValueStore, R: Recorder> PracticeSession<S, R> {
    /// Create an idle machine over a storage port and a recorder.
    pub fn new(kv: S, recorder: R) -> Self {
        Self {
            storage: Storage::new(kv),
            recorder,
            state: PracticeState::SelectingCount,
            run: None,
        }
    }

    /// Current phase.
    pub fn state(&self) -> &PracticeState {
        &self.state
    }

    /// Active run, if any.
    pub fn run(&self) -> Option<&PracticeRun> {
        self.run.as_ref()
    }

    /// Storage used for deck/settings/history access between events.
    pub fn storage_mut(&mut self) -> &mut Storage<S> {
        &mut self.storage
    }

    /// Answer seconds on the current question (0 outside of answering).
    pub fn elapsed_seconds(&self) -> u32 {
        match self.state {
            PracticeState::Answering(stopwatch) => stopwatch.elapsed(),
            PracticeState::Finished { elapsed_seconds } => elapsed_seconds,
            _ => 0,
        }
    }

    /// Whether the current answer has run past its recommended duration.
    pub fn is_overtime(&self) -> bool {
        self.run
            .as_ref()
            .is_some_and(|run| self.elapsed_seconds() > run.recommended_seconds())
    }

    /// Logs saved by the current run, in order.
    #[track_caller]
    pub fn run_logs(&mut self) -> CoreResult<Vec<SessionLog>> {
        let Some(session_id) = self.run.as_ref().map(|r| r.session_id.clone()) else {
            return Ok(Vec::new());
        };
        Ok(self.storage.sessions().by_session(&session_id)?)
    }

    /// Process one event against the current state.
    ///
    /// # Errors
    ///
    /// `InvalidTransition` for actions the current phase does not accept
    /// (state is left untouched), `EmptyDeck` on start, and `Store` when
    /// persistence fails. A failed save leaves the machine in `Finished` so
    /// it can be retried.
    #[track_caller]
    #[instrument(skip(self), fields(state = %self.state))]
    pub fn handle(&mut self, event: PracticeEvent) -> CoreResult<Step> {
        match event {
            PracticeEvent::Tick => Ok(self.tick()),
            PracticeEvent::Action(action) => self.apply(action),
        }
    }

    /// Abandon the run: stop timers, discard an active recording, forget
    /// unsaved progress. Already saved logs stay.
    #[instrument(skip(self))]
    pub fn exit(&mut self) -> Step {
        self.release_recording();

        if let Some(run) = self.run.take() {
            info!(session_id = %run.session_id, "Practice run closed");
        }
        self.state = PracticeState::SelectingCount;

        Step::Exited
    }

    fn tick(&mut self) -> Step {
        match &mut self.state {
            PracticeState::Preparation(countdown) => {
                if countdown.tick() {
                    debug!("Preparation over, answering");
                    self.state = PracticeState::Answering(Stopwatch::new());
                    Step::Changed
                } else {
                    Step::Ticked
                }
            }
            PracticeState::Answering(stopwatch) => {
                if stopwatch.tick() {
                    Step::Ticked
                } else {
                    Step::Idle
                }
            }
            _ => Step::Idle,
        }
    }

    #[track_caller]
    fn apply(&mut self, action: UserAction) -> CoreResult<Step> {
        match (self.state, action) {
            (PracticeState::SelectingCount, UserAction::Start(request)) => self.start(request),

            (PracticeState::Answering(mut stopwatch), UserAction::Pause) => {
                let changed = stopwatch.pause();
                self.state = PracticeState::Answering(stopwatch);
                Ok(if changed { Step::Changed } else { Step::Idle })
            }

            (PracticeState::Answering(mut stopwatch), UserAction::Resume) => {
                let changed = stopwatch.resume();
                self.state = PracticeState::Answering(stopwatch);
                Ok(if changed { Step::Changed } else { Step::Idle })
            }

            (PracticeState::Answering(stopwatch), UserAction::End) => Ok(self.end(stopwatch)),

            (PracticeState::Finished { .. }, UserAction::SetMemo(memo)) => {
                if let Some(run) = self.run.as_mut() {
                    run.memo = memo;
                }
                Ok(Step::Changed)
            }

            (PracticeState::Finished { elapsed_seconds }, UserAction::Save) => {
                self.save(elapsed_seconds)
            }

            (PracticeState::AllComplete, UserAction::TogglePin(log_id)) => {
                let pinned = self.storage.sessions().toggle_pin(&log_id)?;
                debug!(log_id = %log_id, pinned, "Pin toggled");
                Ok(Step::Changed)
            }

            (PracticeState::AllComplete, UserAction::Retry) => self.retry(),

            (_, UserAction::Exit) => Ok(self.exit()),

            (state, action) => Err(PracticeError::InvalidTransition {
                state: state.name(),
                action: action.name(),
                location: ErrorLocation::from(Location::caller()),
            }),
        }
    }

    #[track_caller]
    fn start(&mut self, request: RunRequest) -> CoreResult<Step> {
        let deck = self.storage.decks().get(&request.deck_id)?;

        if deck.questions.is_empty() {
            return Err(PracticeError::EmptyDeck {
                deck_id: deck.id,
                location: ErrorLocation::from(Location::caller()),
            });
        }

        let settings = self.storage.settings().get()?;
        let questions = select_questions(
            &deck,
            request.mode,
            settings.real_mode_order,
            request.count,
            &mut rand::rng(),
        );

        let run = PracticeRun::new(
            request.mode,
            deck,
            settings,
            request.count,
            questions,
            request.record,
        );
        self.run = Some(run);
        self.begin_run()?;

        Ok(Step::Changed)
    }

    #[track_caller]
    fn retry(&mut self) -> CoreResult<Step> {
        let Some(run) = self.run.as_mut() else {
            return Err(self.invalid("retry"));
        };

        let questions = select_questions(
            &run.deck,
            run.mode,
            run.settings.real_mode_order,
            run.requested_count,
            &mut rand::rng(),
        );
        let previous = std::mem::take(&mut run.session_id);
        run.restart(questions);
        info!(previous_session_id = %previous, "Retrying practice run");

        self.begin_run()?;

        Ok(Step::Changed)
    }

    /// Log the run, start the run-wide recording and enter the first question.
    #[track_caller]
    fn begin_run(&mut self) -> CoreResult<()> {
        let Some(run) = self.run.as_mut() else {
            return Err(self.invalid("start"));
        };

        if run.recording_requested {
            match self.recorder.start() {
                Ok(()) => debug!("Run-wide recording started"),
                Err(e) => {
                    warn!(error = %e, "Recording unavailable, continuing without audio");
                    run.recording_enabled = false;
                }
            }
        }

        let record = RunRecord {
            session_id: run.session_id.clone(),
            mode: run.mode,
            deck_id: run.deck.id.clone(),
            question_count: run.questions.len(),
            start_time: run.run_started_at,
        };

        info!(
            session_id = %record.session_id,
            mode = %record.mode,
            deck_id = %record.deck_id,
            question_count = record.question_count,
            recording = run.recording_enabled,
            "Practice run started"
        );

        if let Err(e) = self.storage.runs().append(record) {
            self.release_recording();
            self.run = None;
            self.state = PracticeState::SelectingCount;
            return Err(e.into());
        }

        self.enter_question();
        Ok(())
    }

    /// Enter the current question's first phase.
    fn enter_question(&mut self) {
        let Some(run) = self.run.as_mut() else {
            return;
        };
        run.question_started_at = Utc::now();

        let settings = &run.settings;
        self.state = if settings.preparation_time_enabled && settings.preparation_seconds > 0 {
            PracticeState::Preparation(Countdown::new(settings.preparation_seconds))
        } else {
            PracticeState::Answering(Stopwatch::new())
        };

        debug!(
            index = run.current_index,
            phase = %self.state,
            "Question entered"
        );
    }

    fn end(&mut self, stopwatch: Stopwatch) -> Step {
        let elapsed_seconds = stopwatch.elapsed();

        if let Some(run) = self.run.as_mut()
            && run.is_last_question()
            && run.recording_enabled
        {
            match self.recorder.stop() {
                Ok(audio) => run.pending_audio = audio,
                Err(e) => {
                    warn!(error = %e, "Failed to finalize recording, saving without audio");
                    run.recording_enabled = false;
                }
            }
        }

        self.state = PracticeState::Finished { elapsed_seconds };
        debug!(elapsed_seconds, "Answer ended");

        Step::Changed
    }

    #[track_caller]
    fn save(&mut self, elapsed_seconds: u32) -> CoreResult<Step> {
        let Some(run) = self.run.as_ref() else {
            return Err(self.invalid("save"));
        };
        let Some(question) = run.current_question() else {
            return Err(self.invalid("save"));
        };

        let is_last = run.is_last_question();
        let recommended_seconds = run.recommended_seconds();
        let memo = run.memo.trim();
        let recording_data = if is_last {
            run.pending_audio.as_ref().map(|a| a.as_data_url().to_string())
        } else {
            None
        };

        let log = SessionLog {
            id: Uuid::new_v4().to_string(),
            session_id: run.session_id.clone(),
            deck_id: run.deck.id.clone(),
            deck_name: run.deck.name.clone(),
            question_id: question.id.clone(),
            question_text: question.text.clone(),
            mode: run.mode,
            started_at: run.question_started_at,
            ended_at: Utc::now(),
            elapsed_seconds,
            recommended_seconds,
            is_overtime: elapsed_seconds > recommended_seconds,
            memo: (!memo.is_empty()).then(|| memo.to_string()),
            has_recording: recording_data.is_some(),
            recording_data,
            pinned: None,
        };

        let stats = self.storage.sessions().append(log)?;

        let Some(run) = self.run.as_mut() else {
            return Err(self.invalid("save"));
        };

        if is_last {
            run.pending_audio = None;
            self.state = PracticeState::AllComplete;
            info!(
                session_id = %run.session_id,
                run_seconds = run.run_elapsed_seconds(Utc::now()),
                "Practice run complete"
            );
        } else {
            run.advance();
            self.enter_question();
        }

        Ok(Step::Saved {
            stats,
            run_complete: is_last,
        })
    }

    fn release_recording(&mut self) {
        if self.recorder.is_recording() {
            self.recorder.discard();
            debug!("Active recording discarded");
        }
    }

    #[track_caller]
    fn invalid(&self, action: &'static str) -> PracticeError {
        PracticeError::InvalidTransition {
            state: self.state.name(),
            action,
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

impl<S: KeyValueStore, R: Recorder> Drop for PracticeSession<S, R> {
    fn drop(&mut self) {
        self.release_recording();
    }
}
