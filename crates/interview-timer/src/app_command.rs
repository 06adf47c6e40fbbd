use crate::{AppError, AppResult};

use interview_timer_core::{PracticeMode, RealModeOrder};

use std::{panic::Location, path::PathBuf, str::FromStr};

use error_location::ErrorLocation;

/// Help text printed by `help`.
pub(crate) const USAGE: &str = "\
Decks
  decks                                  list decks
  deck new <name>                        create a deck
  deck show <deck>                       list a deck's questions
  deck rename <deck> <name>              rename a deck
  deck delete <deck>                     delete a deck and its questions
  deck add <deck> <seconds> <text>       append a question
  deck edit <deck> <n> <seconds> <text>  replace question n
  deck remove <deck> <n>                 remove question n
  deck import <deck> <file.csv>          append questions from CSV
  deck export <deck> <file.csv>          write questions to CSV
Settings
  settings                               show settings
  settings prep <on|off>                 preparation countdown
  settings prep-seconds <n>
  settings order <fixed|shuffle>         question order in real mode
  settings default-seconds <n>           target for questions without one
  settings recording-limit <n>           recordings kept in history
Practice
  practice <random|real> <deck> <count> [rec]
  pause | resume | end                   while answering
  memo <text> | save                     after an answer
  pin <n> | retry                        after the last answer
  exit                                   leave the run
History
  history [random|real] [deck]           answers, newest first
  weak                                   questions most often over time
  memos                                  pinned memos
  stats                                  totals and practice streak
  quit
<deck> is a position from `decks` or a deck id.";

/// A deck named on the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeckRef {
    /// One-based position in the `decks` listing.
    Position(usize),
    /// Deck id.
    Id(String),
}

impl DeckRef {
    fn parse(token: &str) -> Self {
        match token.parse::<usize>() {
            Ok(position) => DeckRef::Position(position),
            Err(_) => DeckRef::Id(token.to_string()),
        }
    }
}

/// Deck and question management.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeckCommand {
    New { name: String },
    Show { deck: DeckRef },
    Rename { deck: DeckRef, name: String },
    Delete { deck: DeckRef },
    Add { deck: DeckRef, seconds: u32, text: String },
    Edit { deck: DeckRef, position: usize, seconds: u32, text: String },
    Remove { deck: DeckRef, position: usize },
    Import { deck: DeckRef, path: PathBuf },
    Export { deck: DeckRef, path: PathBuf },
}

/// One settings field and its new value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingChange {
    Preparation(bool),
    PreparationSeconds(u32),
    Order(RealModeOrder),
    DefaultSeconds(u32),
    RecordingLimit(usize),
}

/// Commands typed at the terminal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppCommand {
    Help,
    Decks,
    Deck(DeckCommand),
    /// `None` shows the current settings.
    Settings(Option<SettingChange>),
    Practice {
        mode: PracticeMode,
        deck: DeckRef,
        count: usize,
        record: bool,
    },
    Pause,
    Resume,
    End,
    Memo(String),
    Save,
    /// One-based position in the completion list.
    Pin(usize),
    Retry,
    Exit,
    History {
        mode: Option<PracticeMode>,
        deck: Option<DeckRef>,
    },
    Weak,
    Memos,
    Stats,
    Quit,
}

impl AppCommand {
    /// Parse one terminal line. Blank lines yield `None`.
    ///
    /// # Errors
    ///
    /// `InvalidCommand` for unknown verbs or malformed arguments.
    #[track_caller]
    pub fn parse(line: &str) -> AppResult<Option<Self>> {
        let Some((verb, rest)) = next_token(line) else {
            return Ok(None);
        };

        let command = match verb.to_ascii_lowercase().as_str() {
            "help" | "?" => AppCommand::Help,
            "decks" => AppCommand::Decks,
            "deck" => AppCommand::Deck(parse_deck(line, rest)?),
            "settings" => AppCommand::Settings(parse_setting(line, rest)?),
            "practice" => parse_practice(line, rest)?,
            "pause" => AppCommand::Pause,
            "resume" => AppCommand::Resume,
            "end" => AppCommand::End,
            "memo" => AppCommand::Memo(rest.trim().to_string()),
            "save" => AppCommand::Save,
            "pin" => AppCommand::Pin(take_number(line, rest, "pin <n>")?.0),
            "retry" => AppCommand::Retry,
            "exit" => AppCommand::Exit,
            "history" => parse_history(line, rest)?,
            "weak" => AppCommand::Weak,
            "memos" => AppCommand::Memos,
            "stats" => AppCommand::Stats,
            "quit" | "q" => AppCommand::Quit,
            _ => return Err(invalid(line, "unknown command, type `help`")),
        };

        Ok(Some(command))
    }
}

#[track_caller]
fn parse_deck(line: &str, rest: &str) -> AppResult<DeckCommand> {
    let (sub, rest) = take(line, rest, "deck <new|show|rename|delete|add|edit|remove|import|export> ...")?;

    let command = match sub {
        "new" => DeckCommand::New {
            name: take_text(line, rest, "deck new <name>")?,
        },
        "show" => DeckCommand::Show {
            deck: take_deck(line, rest, "deck show <deck>")?.0,
        },
        "rename" => {
            let usage = "deck rename <deck> <name>";
            let (deck, rest) = take_deck(line, rest, usage)?;
            DeckCommand::Rename {
                deck,
                name: take_text(line, rest, usage)?,
            }
        }
        "delete" => DeckCommand::Delete {
            deck: take_deck(line, rest, "deck delete <deck>")?.0,
        },
        "add" => {
            let usage = "deck add <deck> <seconds> <text>";
            let (deck, rest) = take_deck(line, rest, usage)?;
            let (seconds, rest) = take_number(line, rest, usage)?;
            DeckCommand::Add {
                deck,
                seconds,
                text: take_text(line, rest, usage)?,
            }
        }
        "edit" => {
            let usage = "deck edit <deck> <n> <seconds> <text>";
            let (deck, rest) = take_deck(line, rest, usage)?;
            let (position, rest) = take_number(line, rest, usage)?;
            let (seconds, rest) = take_number(line, rest, usage)?;
            DeckCommand::Edit {
                deck,
                position,
                seconds,
                text: take_text(line, rest, usage)?,
            }
        }
        "remove" => {
            let usage = "deck remove <deck> <n>";
            let (deck, rest) = take_deck(line, rest, usage)?;
            DeckCommand::Remove {
                deck,
                position: take_number(line, rest, usage)?.0,
            }
        }
        "import" => {
            let usage = "deck import <deck> <file.csv>";
            let (deck, rest) = take_deck(line, rest, usage)?;
            DeckCommand::Import {
                deck,
                path: PathBuf::from(take_text(line, rest, usage)?),
            }
        }
        "export" => {
            let usage = "deck export <deck> <file.csv>";
            let (deck, rest) = take_deck(line, rest, usage)?;
            DeckCommand::Export {
                deck,
                path: PathBuf::from(take_text(line, rest, usage)?),
            }
        }
        _ => return Err(invalid(line, "unknown deck command, type `help`")),
    };

    Ok(command)
}

#[track_caller]
fn parse_setting(line: &str, rest: &str) -> AppResult<Option<SettingChange>> {
    let Some((key, rest)) = next_token(rest) else {
        return Ok(None);
    };

    let change = match key {
        "prep" => match take(line, rest, "settings prep <on|off>")?.0 {
            "on" => SettingChange::Preparation(true),
            "off" => SettingChange::Preparation(false),
            _ => return Err(invalid(line, "usage: settings prep <on|off>")),
        },
        "prep-seconds" => SettingChange::PreparationSeconds(
            take_number(line, rest, "settings prep-seconds <n>")?.0,
        ),
        "order" => match take(line, rest, "settings order <fixed|shuffle>")?.0 {
            "fixed" => SettingChange::Order(RealModeOrder::Fixed),
            "shuffle" => SettingChange::Order(RealModeOrder::Shuffle),
            _ => return Err(invalid(line, "usage: settings order <fixed|shuffle>")),
        },
        "default-seconds" => SettingChange::DefaultSeconds(
            take_number(line, rest, "settings default-seconds <n>")?.0,
        ),
        "recording-limit" => SettingChange::RecordingLimit(
            take_number(line, rest, "settings recording-limit <n>")?.0,
        ),
        _ => return Err(invalid(line, "unknown setting, type `help`")),
    };

    Ok(Some(change))
}

#[track_caller]
fn parse_practice(line: &str, rest: &str) -> AppResult<AppCommand> {
    let usage = "practice <random|real> <deck> <count> [rec]";
    let (mode, rest) = take(line, rest, usage)?;
    let mode = parse_mode(mode).ok_or_else(|| invalid(line, format!("usage: {}", usage)))?;
    let (deck, rest) = take_deck(line, rest, usage)?;
    let (count, rest) = take_number(line, rest, usage)?;

    let record = match next_token(rest) {
        None => false,
        Some(("rec", "")) => true,
        Some(_) => return Err(invalid(line, format!("usage: {}", usage))),
    };

    Ok(AppCommand::Practice {
        mode,
        deck,
        count,
        record,
    })
}

#[track_caller]
fn parse_history(line: &str, rest: &str) -> AppResult<AppCommand> {
    let mut mode = None;
    let mut deck = None;
    let mut rest = rest;

    while let Some((token, tail)) = next_token(rest) {
        match parse_mode(token) {
            Some(m) if mode.is_none() => mode = Some(m),
            None if deck.is_none() => deck = Some(DeckRef::parse(token)),
            _ => return Err(invalid(line, "usage: history [random|real] [deck]")),
        }
        rest = tail;
    }

    Ok(AppCommand::History { mode, deck })
}

fn parse_mode(token: &str) -> Option<PracticeMode> {
    match token {
        "random" => Some(PracticeMode::Random),
        "real" => Some(PracticeMode::Real),
        _ => None,
    }
}

/// Split off the first whitespace-separated token.
fn next_token(input: &str) -> Option<(&str, &str)> {
    let input = input.trim_start();
    if input.is_empty() {
        return None;
    }

    Some(match input.split_once(char::is_whitespace) {
        Some((head, tail)) => (head, tail.trim_start()),
        None => (input, ""),
    })
}

#[track_caller]
fn take<'a>(line: &str, rest: &'a str, usage: &str) -> AppResult<(&'a str, &'a str)> {
    next_token(rest).ok_or_else(|| invalid(line, format!("usage: {}", usage)))
}

#[track_caller]
fn take_deck<'a>(line: &str, rest: &'a str, usage: &str) -> AppResult<(DeckRef, &'a str)> {
    let (token, rest) = take(line, rest, usage)?;
    Ok((DeckRef::parse(token), rest))
}

#[track_caller]
fn take_number<'a, T: FromStr>(line: &str, rest: &'a str, usage: &str) -> AppResult<(T, &'a str)> {
    let (token, rest) = take(line, rest, usage)?;
    let value = token
        .parse::<T>()
        .map_err(|_| invalid(line, format!("'{}' is not a number; usage: {}", token, usage)))?;
    Ok((value, rest))
}

/// The rest of the line as free text. Must not be blank.
#[track_caller]
fn take_text(line: &str, rest: &str, usage: &str) -> AppResult<String> {
    let text = rest.trim();
    if text.is_empty() {
        return Err(invalid(line, format!("usage: {}", usage)));
    }
    Ok(text.to_string())
}

#[track_caller]
fn invalid(line: &str, reason: impl Into<String>) -> AppError {
    AppError::InvalidCommand {
        input: line.trim().to_string(),
        reason: reason.into(),
        location: ErrorLocation::from(Location::caller()),
    }
}
