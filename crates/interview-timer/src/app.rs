use crate::{
    AppCommand, AppError, AppResult, DeckCommand, DeckRef, SettingChange, app_command::USAGE,
    view,
};

use interview_timer_core::{
    Deck, HistoryFilter, KeyValueStore, PracticeEvent, PracticeMode, PracticeSession,
    PracticeState, Recorder, RunRequest, SessionLog, Step, UserAction, consecutive_days,
    group_by_local_date,
};

use std::{
    fs,
    io::{BufRead, Write},
    panic::Location,
    path::Path,
    time::Duration,
};

use chrono::{Local, Utc};
use error_location::ErrorLocation;
use tokio::{
    sync::mpsc,
    time::{self, MissedTickBehavior},
};
use tracing::{debug, error, info, instrument, warn};

const WEAK_QUESTION_LIMIT: usize = 5;

/// Whether the input loop keeps going after a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Terminal front-end around the practice state machine.
///
/// Runs entirely on the thread that calls [`App::run`]: the recorder may hold
/// a `!Send` audio stream, so the machine never moves to another task. Input
/// arrives over a channel fed by a blocking stdin reader and is interleaved
/// with a 1 Hz tick by `select!`.
pub struct App<S: KeyValueStore, R: Recorder, W: Write> {
    pub(crate) session: PracticeSession<S, R>,
    pub(crate) out: W,
    pub(crate) audio_enabled: bool,
    /// Logs of the finished run, in the order `pin <n>` refers to.
    pub(crate) completed: Vec<SessionLog>,
}

impl<S: KeyValueStore, R: Recorder, W: Write> App<S, R, W> {
    /// Build the app over a storage port, a recorder and an output sink.
    pub fn new(kv: S, recorder: R, out: W, audio_enabled: bool) -> Self {
        Self {
            session: PracticeSession::new(kv, recorder),
            out,
            audio_enabled,
            completed: Vec::new(),
        }
    }

    /// Run until `quit` or end of input, reading commands from stdin.
    #[instrument(skip(self))]
    pub(crate) async fn run(mut self) -> AppResult<()> {
        info!("Interview Timer starting");

        // Stdin forwarding via a single blocking task.
        //
        // Shutdown: once line_rx is dropped, the next blocking_send fails and
        // the loop ends. A read already blocked on stdin is left to the
        // runtime's shutdown timeout.
        let (line_tx, line_rx) = mpsc::channel(32);
        let stdin_handle = tokio::task::spawn_blocking(move || {
            for line in std::io::stdin().lock().lines() {
                let Ok(line) = line else {
                    break;
                };
                if line_tx.blocking_send(line).is_err() {
                    break;
                }
            }
        });

        let result = self.run_with(line_rx).await;

        if stdin_handle.is_finished() {
            debug!("Stdin forwarder stopped cleanly");
        }

        info!("Interview Timer shut down");

        result
    }

    /// Drive the machine from `lines` and a 1 Hz tick until `quit` or until
    /// the sender side closes.
    pub(crate) async fn run_with(&mut self, mut lines: mpsc::Receiver<String>) -> AppResult<()> {
        self.greet()?;

        let mut ticker = time::interval(Duration::from_secs(1));
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // First tick completes immediately.
        ticker.tick().await;

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    if let Err(e) = self.on_tick() {
                        error!(error = ?e, "Failed to handle tick");
                    }
                }

                line = lines.recv() => {
                    let Some(line) = line else {
                        info!("Input closed, shutting down");
                        break;
                    };
                    match self.handle_line(&line) {
                        Ok(Flow::Continue) => {}
                        Ok(Flow::Quit) => {
                            info!("Quit requested");
                            break;
                        }
                        Err(e) => self.report(&e)?,
                    }
                }
            }
        }

        self.session.exit();
        self.out.flush()?;

        Ok(())
    }

    /// Stamp today's practice day and print the banner.
    #[instrument(skip(self))]
    pub(crate) fn greet(&mut self) -> AppResult<()> {
        let streak = self
            .session
            .storage_mut()
            .practice_days()
            .check_in(Local::now().date_naive())?;

        writeln!(
            self.out,
            "Interview Timer. Practice streak: {} day{}. Type `help` for commands.",
            streak,
            if streak == 1 { "" } else { "s" }
        )?;
        self.out.flush()?;

        Ok(())
    }

    /// Advance the running timer by one second.
    pub(crate) fn on_tick(&mut self) -> AppResult<()> {
        match self.session.handle(PracticeEvent::Tick)? {
            Step::Ticked => {
                if let Some(run) = self.session.run()
                    && let Some(line) = view::tick(
                        self.session.state(),
                        run,
                        run.run_elapsed_seconds(Utc::now()),
                    )
                {
                    writeln!(self.out, "{}", line)?;
                }
            }
            Step::Changed => self.show_phase()?,
            _ => return Ok(()),
        }

        self.out.flush()?;
        Ok(())
    }

    /// Parse and execute one line of input.
    pub(crate) fn handle_line(&mut self, line: &str) -> AppResult<Flow> {
        let Some(command) = AppCommand::parse(line)? else {
            return Ok(Flow::Continue);
        };
        debug!(?command, "Command received");

        match command {
            AppCommand::Help => writeln!(self.out, "{}", USAGE)?,
            AppCommand::Decks => {
                let decks = self.session.storage_mut().decks().list()?;
                writeln!(self.out, "{}", view::deck_list(&decks))?;
            }
            AppCommand::Deck(deck_command) => self.deck_command(deck_command)?,
            AppCommand::Settings(change) => self.settings_command(change)?,
            AppCommand::Practice {
                mode,
                deck,
                count,
                record,
            } => self.start_practice(mode, &deck, count, record)?,
            AppCommand::Pause => self.act(UserAction::Pause)?,
            AppCommand::Resume => self.act(UserAction::Resume)?,
            AppCommand::End => self.act(UserAction::End)?,
            AppCommand::Memo(text) => {
                self.session.handle(UserAction::SetMemo(text).into())?;
                writeln!(self.out, "  Memo noted.")?;
            }
            AppCommand::Save => self.act(UserAction::Save)?,
            AppCommand::Pin(position) => self.pin(position)?,
            AppCommand::Retry => {
                self.completed.clear();
                self.act(UserAction::Retry)?;
            }
            AppCommand::Exit => {
                self.completed.clear();
                self.act(UserAction::Exit)?;
            }
            AppCommand::History { mode, deck } => self.history(mode, deck.as_ref())?,
            AppCommand::Weak => {
                let ranked = self
                    .session
                    .storage_mut()
                    .sessions()
                    .weak_questions(WEAK_QUESTION_LIMIT)?;
                writeln!(self.out, "{}", view::weak_questions(&ranked))?;
            }
            AppCommand::Memos => {
                let memos = self.session.storage_mut().sessions().pinned_memos()?;
                writeln!(self.out, "{}", view::memos(&memos))?;
            }
            AppCommand::Stats => self.stats()?,
            AppCommand::Quit => return Ok(Flow::Quit),
        }

        self.out.flush()?;
        Ok(Flow::Continue)
    }

    /// Print an error for the user and keep going.
    pub(crate) fn report(&mut self, error: &AppError) -> AppResult<()> {
        warn!(error = %error, "Command failed");
        writeln!(self.out, "! {}", view::error(error))?;
        self.out.flush()?;
        Ok(())
    }

    #[instrument(skip(self))]
    fn start_practice(
        &mut self,
        mode: PracticeMode,
        deck: &DeckRef,
        count: usize,
        record: bool,
    ) -> AppResult<()> {
        let deck = self.resolve_deck(deck)?;

        let record = if record && !self.audio_enabled {
            writeln!(self.out, "  Audio is disabled in the config; practicing without recording.")?;
            false
        } else {
            record
        };

        self.completed.clear();
        self.session.handle(
            UserAction::Start(RunRequest {
                deck_id: deck.id,
                mode,
                count,
                record,
            })
            .into(),
        )?;

        if let Some(run) = self.session.run() {
            let selected = run.questions().len();
            if selected < count {
                writeln!(self.out, "  The deck has {} questions; practicing all of them.", selected)?;
            }
            if record && !run.recording_enabled() {
                writeln!(self.out, "  Microphone unavailable; continuing without recording.")?;
            }
            writeln!(
                self.out,
                "Practice: {} mode, {} from \"{}\"{}.",
                run.mode(),
                selected,
                run.deck().name,
                if run.recording_enabled() { ", recording" } else { "" }
            )?;
        }

        self.show_phase()
    }

    /// Send an action to the machine and show what changed.
    fn act(&mut self, action: UserAction) -> AppResult<()> {
        match self.session.handle(action.into())? {
            Step::Saved {
                stats,
                run_complete: true,
            } => {
                debug!(total_sessions = stats.total_sessions, "Run saved");
                self.completed = self.session.run_logs()?;
                let run_seconds = self
                    .session
                    .run()
                    .map(|run| run.run_elapsed_seconds(Utc::now()))
                    .unwrap_or_default();
                if let Some(run) = self.session.run() {
                    writeln!(
                        self.out,
                        "{}",
                        view::completion(run, &self.completed, run_seconds)
                    )?;
                }
            }
            Step::Saved { stats, .. } => {
                writeln!(
                    self.out,
                    "  Saved. {} answers today.",
                    stats.today_sessions
                )?;
                self.show_phase()?;
            }
            Step::Changed => self.show_phase()?,
            Step::Exited => writeln!(self.out, "Run closed.")?,
            Step::Idle | Step::Ticked => {}
        }

        Ok(())
    }

    fn show_phase(&mut self) -> AppResult<()> {
        let state = *self.session.state();
        if matches!(state, PracticeState::AllComplete) {
            return Ok(());
        }
        if let Some(run) = self.session.run() {
            writeln!(self.out, "{}", view::phase(&state, run))?;
        }
        Ok(())
    }

    #[track_caller]
    fn pin(&mut self, position: usize) -> AppResult<()> {
        let log_id = position
            .checked_sub(1)
            .and_then(|i| self.completed.get(i))
            .map(|log| log.id.clone())
            .ok_or_else(|| AppError::InvalidCommand {
                input: format!("pin {}", position),
                reason: format!("No answer {} in the finished run.", position),
                location: ErrorLocation::from(Location::caller()),
            })?;

        self.session
            .handle(UserAction::TogglePin(log_id.clone()).into())?;
        self.completed = self.session.run_logs()?;

        let pinned = self
            .completed
            .iter()
            .find(|log| log.id == log_id)
            .is_some_and(SessionLog::is_pinned);
        writeln!(
            self.out,
            "  Answer {} {}.",
            position,
            if pinned { "pinned" } else { "unpinned" }
        )?;

        Ok(())
    }

    fn history(&mut self, mode: Option<PracticeMode>, deck: Option<&DeckRef>) -> AppResult<()> {
        let deck_id = match deck {
            Some(deck) => Some(self.resolve_deck(deck)?.id),
            None => None,
        };
        let filter = HistoryFilter { mode, deck_id };

        let logs = self.session.storage_mut().sessions().history(&filter)?;
        writeln!(self.out, "{}", view::history(&group_by_local_date(&logs)))?;

        Ok(())
    }

    fn stats(&mut self) -> AppResult<()> {
        let storage = self.session.storage_mut();
        let stats = storage.sessions().stats_for(Local::now().date_naive())?;
        let streak = consecutive_days(&storage.practice_days().stamps()?);
        let runs = storage.runs().list()?.len();

        writeln!(self.out, "{}", view::stats(&stats, streak, runs))?;
        Ok(())
    }

    #[instrument(skip(self))]
    fn settings_command(&mut self, change: Option<SettingChange>) -> AppResult<()> {
        let mut settings = self.session.storage_mut().settings().get()?;

        if let Some(change) = change {
            match change {
                SettingChange::Preparation(on) => settings.preparation_time_enabled = on,
                SettingChange::PreparationSeconds(secs) => settings.preparation_seconds = secs,
                SettingChange::Order(order) => settings.real_mode_order = order,
                SettingChange::DefaultSeconds(secs) => settings.default_seconds = secs,
                SettingChange::RecordingLimit(limit) => settings.recording_limit = limit,
            }
            self.session.storage_mut().settings().put(&settings)?;
            if self.session.run().is_some() {
                writeln!(self.out, "  Applies from the next run.")?;
            }
        }

        writeln!(self.out, "{}", view::settings(&settings))?;
        Ok(())
    }

    #[instrument(skip(self))]
    fn deck_command(&mut self, command: DeckCommand) -> AppResult<()> {
        match command {
            DeckCommand::New { name } => {
                let deck = self.session.storage_mut().decks().create(&name)?;
                writeln!(self.out, "Created deck \"{}\" [{}].", deck.name, deck.id)?;
            }
            DeckCommand::Show { deck } => {
                let deck = self.resolve_deck(&deck)?;
                writeln!(self.out, "{}", view::deck_detail(&deck))?;
            }
            DeckCommand::Rename { deck, name } => {
                let mut deck = self.resolve_deck(&deck)?;
                deck.name = name;
                self.save_deck(deck)?;
            }
            DeckCommand::Delete { deck } => {
                let deck = self.resolve_deck(&deck)?;
                self.session.storage_mut().decks().delete(&deck.id)?;
                writeln!(self.out, "Deleted deck \"{}\".", deck.name)?;
            }
            DeckCommand::Add {
                deck,
                seconds,
                text,
            } => {
                let mut deck = self.resolve_deck(&deck)?;
                deck.add_question(&text, seconds)?;
                self.save_deck(deck)?;
            }
            DeckCommand::Edit {
                deck,
                position,
                seconds,
                text,
            } => {
                let mut deck = self.resolve_deck(&deck)?;
                let question_id = question_at(&deck, position)?;
                deck.update_question(&question_id, &text, seconds)?;
                self.save_deck(deck)?;
            }
            DeckCommand::Remove { deck, position } => {
                let mut deck = self.resolve_deck(&deck)?;
                let question_id = question_at(&deck, position)?;
                deck.remove_question(&question_id)?;
                self.save_deck(deck)?;
            }
            DeckCommand::Import { deck, path } => {
                let deck = self.resolve_deck(&deck)?;
                let csv = fs::read_to_string(&path)?;
                let added = self.session.storage_mut().decks().import_csv(&deck.id, &csv)?;
                writeln!(
                    self.out,
                    "Imported {} questions into \"{}\".",
                    added, deck.name
                )?;
            }
            DeckCommand::Export { deck, path } => {
                let deck = self.resolve_deck(&deck)?;
                let csv = self.session.storage_mut().decks().export_csv(&deck.id)?;
                write_file(&path, &csv)?;
                writeln!(
                    self.out,
                    "Exported {} questions to {}.",
                    deck.questions.len(),
                    path.display()
                )?;
            }
        }

        Ok(())
    }

    fn save_deck(&mut self, deck: Deck) -> AppResult<()> {
        let detail = view::deck_detail(&deck);
        self.session.storage_mut().decks().save(deck)?;
        writeln!(self.out, "{}", detail)?;
        Ok(())
    }

    #[track_caller]
    fn resolve_deck(&mut self, deck: &DeckRef) -> AppResult<Deck> {
        let mut decks = self.session.storage_mut().decks();

        match deck {
            DeckRef::Id(id) => Ok(decks.get(id)?),
            DeckRef::Position(position) => {
                let list = decks.list()?;
                position
                    .checked_sub(1)
                    .and_then(|i| list.into_iter().nth(i))
                    .ok_or_else(|| AppError::InvalidCommand {
                        input: position.to_string(),
                        reason: format!("No deck at position {}; see `decks`.", position),
                        location: ErrorLocation::from(Location::caller()),
                    })
            }
        }
    }
}

#[track_caller]
fn question_at(deck: &Deck, position: usize) -> AppResult<String> {
    position
        .checked_sub(1)
        .and_then(|i| deck.questions.get(i))
        .map(|q| q.id.clone())
        .ok_or_else(|| AppError::InvalidCommand {
            input: position.to_string(),
            reason: format!("No question {} in \"{}\".", position, deck.name),
            location: ErrorLocation::from(Location::caller()),
        })
}

fn write_file(path: &Path, contents: &str) -> AppResult<()> {
    let mut file = fs::File::create(path)?;
    file.write_all(contents.as_bytes())?;
    file.sync_all()?;
    Ok(())
}
