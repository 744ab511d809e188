// src/exam/ingest.rs

use std::collections::HashSet;
use std::io::Read;

use rand::Rng;
use rand::seq::SliceRandom;
use serde::Deserialize;

use crate::{
    error::AppError,
    exam::classifier::classify,
    models::question::{Question, QuestionBank, Subject},
};

/// Explanation stored when the source row has none.
pub const MISSING_EXPLANATION: &str = "Explanation not available.";

/// Textual marker some datasets use for an empty cell.
const NAN_MARKER: &str = "nan";

/// One row of the raw tabular source.
///
/// Every column is optional: empty cells and unparseable rows both end up
/// as `None` and are rejected by the validity check.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawRecord {
    pub question: Option<String>,
    pub correct_answer: Option<String>,
    pub support: Option<String>,
    pub distractor1: Option<String>,
    pub distractor2: Option<String>,
    pub distractor3: Option<String>,
}

/// Trimmed cell value, or `None` for missing, blank and `nan` cells.
fn cell(value: &Option<String>) -> Option<String> {
    let trimmed = value.as_deref()?.trim();
    if trimmed.is_empty() || trimmed.eq_ignore_ascii_case(NAN_MARKER) {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Reads CSV records with a header row.
///
/// The returned vector has one entry per data row so that row indices stay
/// aligned with the source; malformed rows become an empty record.
pub fn read_records<R: Read>(reader: R) -> Result<Vec<RawRecord>, AppError> {
    let mut rdr = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(reader);

    // Fail early on a source that has no usable header at all.
    rdr.headers()?;

    let records = rdr
        .deserialize::<RawRecord>()
        .enumerate()
        .map(|(index, row)| match row {
            Ok(record) => record,
            Err(e) => {
                tracing::warn!("Skipping malformed source row {}: {}", index, e);
                RawRecord::default()
            }
        })
        .collect();

    Ok(records)
}

/// Turns one raw row into a question, or `None` if the row is invalid.
fn build_question<R: Rng + ?Sized>(index: usize, row: &RawRecord, rng: &mut R) -> Option<Question> {
    let text = cell(&row.question)?;
    let answer = cell(&row.correct_answer)?;
    let explanation = cell(&row.support).unwrap_or_else(|| MISSING_EXPLANATION.to_string());

    let mut options: Vec<String> = [&row.distractor1, &row.distractor2, &row.distractor3]
        .into_iter()
        .filter_map(cell)
        .collect();
    options.push(answer.clone());

    let distinct: HashSet<&str> = options.iter().map(String::as_str).collect();
    if options.len() != 4 || distinct.len() != 4 {
        return None;
    }

    let subject = classify(&format!("{} {}", text, answer));
    options.shuffle(rng);

    Some(Question {
        id: format!("{}{}", subject.initial(), index),
        text,
        options,
        answer,
        explanation,
        subject,
    })
}

/// Builds a classified bank from raw rows.
///
/// Row `i` of `rows` yields id `<initial><i>`; dropped rows leave gaps.
pub fn ingest<R: Rng + ?Sized>(rows: &[RawRecord], rng: &mut R) -> QuestionBank {
    let mut bank = QuestionBank::default();

    for (index, row) in rows.iter().enumerate() {
        match build_question(index, row, rng) {
            Some(question) => bank.push(question),
            None => tracing::debug!("Dropped invalid source row {}", index),
        }
    }

    tracing::info!(
        total = rows.len(),
        kept = bank.len(),
        dropped = rows.len() - bank.len(),
        physics = bank.pool(Subject::Physics).len(),
        chemistry = bank.pool(Subject::Chemistry).len(),
        biology = bank.pool(Subject::Biology).len(),
        "Question bank ingested"
    );

    bank
}
