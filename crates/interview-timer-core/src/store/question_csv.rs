//! CSV import and export of deck questions.
//!
//! Format: a `question,seconds` header followed by one row per question.
//! Columns are read by position so spreadsheets with their own header names
//! still import. Rows with a missing or unparsable duration fall back to
//! 60 seconds.

use crate::{Question, StoreError, StoreResult};

use std::panic::Location;

use csv::{ReaderBuilder, Trim, WriterBuilder};
use error_location::ErrorLocation;
use serde::Serialize;

const CSV_HEADER: [&str; 2] = ["question", "seconds"];
const FALLBACK_SECONDS: u32 = 60;

#[derive(Debug, Serialize)]
struct QuestionRow<'a> {
    question: &'a str,
    seconds: u32,
}

/// Render questions as CSV, header included.
///
/// # Errors
///
/// `Csv` if a row cannot be written.
#[track_caller]
pub fn export_questions(questions: &[Question]) -> StoreResult<String> {
    // Header written by hand so an empty deck still exports one.
    let mut writer = WriterBuilder::new()
        .has_headers(false)
        .from_writer(Vec::new());
    writer.write_record(CSV_HEADER)?;

    for question in questions {
        writer.serialize(QuestionRow {
            question: &question.text,
            seconds: question.recommended_seconds,
        })?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| StoreError::from(e.into_error()))?;

    String::from_utf8(bytes).map_err(|e| StoreError::InvalidInput {
        reason: format!("exported CSV is not UTF-8: {}", e),
        location: ErrorLocation::from(Location::caller()),
    })
}

/// Parse CSV produced by [`export_questions`] (or a spreadsheet) into new
/// questions. The first row is treated as a header and skipped. Blank lines
/// and rows with empty text are ignored; quoted fields may span lines.
///
/// # Errors
///
/// `Csv` if the input is not readable as CSV.
#[track_caller]
pub fn parse_questions(input: &str) -> StoreResult<Vec<Question>> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(input.trim_start_matches('\u{feff}').as_bytes());

    let mut questions = Vec::new();
    for record in reader.records() {
        let record = record?;

        let text = record.get(0).map(str::trim).unwrap_or_default();
        if text.is_empty() {
            continue;
        }

        let seconds = record
            .get(1)
            .and_then(|s| s.trim().parse::<u32>().ok())
            .unwrap_or(FALLBACK_SECONDS);

        questions.push(Question::new(text, seconds));
    }

    Ok(questions)
}
