//! Plain-text rendering for the terminal front-end.
//!
//! Every function returns a `String` without a trailing newline so the app
//! decides where it goes.

use crate::AppError;

use interview_timer_core::{
    AppSettings, AppStats, Deck, PracticeError, PracticeRun, PracticeState, QuestionStats,
    SessionLog, StoreError,
};

use std::fmt::Write;

use chrono::{Local, NaiveDate};

/// `mm:ss`, or `h:mm:ss` from one hour on.
pub(crate) fn clock(seconds: u32) -> String {
    let (h, m, s) = (seconds / 3600, seconds / 60 % 60, seconds % 60);
    if h > 0 {
        format!("{}:{:02}:{:02}", h, m, s)
    } else {
        format!("{:02}:{:02}", m, s)
    }
}

pub(crate) fn deck_list(decks: &[Deck]) -> String {
    let mut out = String::from("Decks:");
    for (i, deck) in decks.iter().enumerate() {
        let _ = write!(
            out,
            "\n  {}. {} ({} questions) [{}]",
            i + 1,
            deck.name,
            deck.questions.len(),
            deck.id
        );
    }
    out
}

pub(crate) fn deck_detail(deck: &Deck) -> String {
    let mut out = format!("{} [{}]", deck.name, deck.id);
    if deck.questions.is_empty() {
        out.push_str("\n  (no questions)");
    }
    for (i, question) in deck.questions.iter().enumerate() {
        let _ = write!(
            out,
            "\n  {:>2}. [{}] {}",
            i + 1,
            clock(question.recommended_seconds),
            question.text
        );
    }
    out
}

pub(crate) fn settings(settings: &AppSettings) -> String {
    format!(
        "Settings:\n  prep             {}\n  prep-seconds     {}\n  order            {:?}\n  default-seconds  {}\n  recording-limit  {}",
        if settings.preparation_time_enabled { "on" } else { "off" },
        settings.preparation_seconds,
        settings.real_mode_order,
        settings.default_seconds,
        settings.recording_limit,
    )
}

/// Heading shown when a question's phase changes.
pub(crate) fn phase(state: &PracticeState, run: &PracticeRun) -> String {
    let position = format!("[{}/{}]", run.current_index() + 1, run.questions().len());
    let text = run.current_question().map(|q| q.text.as_str()).unwrap_or_default();
    let target = clock(run.recommended_seconds());

    match state {
        PracticeState::SelectingCount => "No practice run active.".to_string(),
        PracticeState::Preparation(countdown) => format!(
            "{} {}\n  Prepare: {}s. Target {}.",
            position,
            text,
            countdown.remaining(),
            target
        ),
        PracticeState::Answering(stopwatch) if stopwatch.is_paused() => {
            format!("  Paused at {}. `resume` to continue.", clock(stopwatch.elapsed()))
        }
        PracticeState::Answering(stopwatch) if stopwatch.elapsed() > 0 => {
            format!("  Resumed at {}.", clock(stopwatch.elapsed()))
        }
        PracticeState::Answering(_) => format!(
            "{} {}\n  Answer now. Target {}. `pause`, `end`.",
            position, text, target
        ),
        PracticeState::Finished { elapsed_seconds } => {
            let verdict = if *elapsed_seconds > run.recommended_seconds() {
                " OVERTIME"
            } else {
                ""
            };
            format!(
                "  Answered in {} / {}{}. `memo <text>` then `save`.",
                clock(*elapsed_seconds),
                target,
                verdict
            )
        }
        PracticeState::AllComplete => "All questions answered.".to_string(),
    }
}

/// Once-a-second status line, `None` when nothing is counting. While
/// answering it also shows the whole run's time so far.
pub(crate) fn tick(state: &PracticeState, run: &PracticeRun, run_seconds: u32) -> Option<String> {
    match state {
        PracticeState::Preparation(countdown) => Some(format!("  prep {}s", countdown.remaining())),
        PracticeState::Answering(stopwatch) if !stopwatch.is_paused() => {
            let elapsed = stopwatch.elapsed();
            let over = if elapsed > run.recommended_seconds() {
                "  OVERTIME"
            } else {
                ""
            };
            Some(format!(
                "  {} / {}{}  (run {})",
                clock(elapsed),
                clock(run.recommended_seconds()),
                over,
                clock(run_seconds)
            ))
        }
        _ => None,
    }
}

pub(crate) fn log_line(position: usize, log: &SessionLog) -> String {
    let mut line = format!(
        "{:>3}. [{} / {}]{} {}",
        position,
        clock(log.elapsed_seconds),
        clock(log.recommended_seconds),
        if log.is_overtime { " OVERTIME" } else { "" },
        log.question_text
    );
    if log.has_recording {
        line.push_str(" (recorded)");
    }
    if log.is_pinned() {
        line.push_str(" *");
    }
    if let Some(memo) = &log.memo {
        let _ = write!(line, "\n       memo: {}", memo);
    }
    line
}

/// Summary of a finished run.
pub(crate) fn completion(run: &PracticeRun, logs: &[SessionLog], run_seconds: u32) -> String {
    let overtime = logs.iter().filter(|l| l.is_overtime).count();
    let mut out = format!(
        "Run complete: {} answers, {} overtime, total time {}.",
        logs.len(),
        overtime,
        clock(run_seconds)
    );
    if run.recording_enabled() && !logs.iter().any(|l| l.has_recording) {
        out.push_str("\n  No audio was captured.");
    }
    for (i, log) in logs.iter().enumerate() {
        let _ = write!(out, "\n{}", log_line(i + 1, log));
    }
    out.push_str("\n`pin <n>` to keep a memo, `retry` for a new set, `exit` to leave.");
    out
}

/// History grouped under one heading per local date.
pub(crate) fn history(groups: &[(NaiveDate, Vec<SessionLog>)]) -> String {
    if groups.is_empty() {
        return "No answers yet.".to_string();
    }

    let mut out = String::new();
    let mut position = 0;
    for (date, logs) in groups {
        if !out.is_empty() {
            out.push('\n');
        }
        let _ = write!(out, "{}", date.format("%Y-%m-%d (%a)"));
        for log in logs {
            position += 1;
            let _ = write!(out, "\n{}", log_line(position, log));
        }
    }
    out
}

pub(crate) fn weak_questions(ranked: &[QuestionStats]) -> String {
    if ranked.iter().all(|q| q.overtime_count == 0) {
        return "No overtime answers yet.".to_string();
    }

    let mut out = String::from("Most often over time:");
    for (i, q) in ranked.iter().filter(|q| q.overtime_count > 0).enumerate() {
        let _ = write!(
            out,
            "\n  {}. {} ({} of {})",
            i + 1,
            q.text,
            q.overtime_count,
            q.total_count
        );
    }
    out
}

pub(crate) fn memos(logs: &[SessionLog]) -> String {
    if logs.is_empty() {
        return "No pinned memos.".to_string();
    }

    let mut out = String::from("Pinned memos:");
    for log in logs {
        let _ = write!(
            out,
            "\n  {} {}\n     {}",
            log.started_at.with_timezone(&Local).format("%Y-%m-%d"),
            log.question_text,
            log.memo.as_deref().unwrap_or_default()
        );
    }
    out
}

pub(crate) fn stats(stats: &AppStats, streak: usize, runs: usize) -> String {
    let last = stats
        .last_session_date
        .map(|d| d.with_timezone(&Local).format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| "never".to_string());

    format!(
        "Answers: {} total, {} today\nRuns started: {}\nLast answer: {}\nStreak: {} day{}",
        stats.total_sessions,
        stats.today_sessions,
        runs,
        last,
        streak,
        if streak == 1 { "" } else { "s" }
    )
}

/// One-line message for an error shown to the user.
pub(crate) fn error(error: &AppError) -> String {
    match error {
        AppError::InvalidCommand { reason, .. } => reason.clone(),
        AppError::Practice {
            source: PracticeError::InvalidTransition { state, action, .. },
            ..
        } => format!("Can't {} while {}.", action, state),
        AppError::Practice {
            source: PracticeError::EmptyDeck { .. },
            ..
        } => "That deck has no questions.".to_string(),
        AppError::Store {
            source: StoreError::DefaultDeckProtected { .. },
            ..
        } => "The default deck can't be deleted.".to_string(),
        AppError::Store {
            source: StoreError::InvalidInput { reason, .. },
            ..
        } => reason.clone(),
        other => other.to_string(),
    }
}
