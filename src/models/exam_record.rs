// src/models/exam_record.rs

use std::collections::HashMap;

use serde::{Deserialize, Deserializer, Serialize};
use validator::Validate;

use crate::models::question::Question;

/// Query string for `GET /api/get_exam`.
///
/// `count` is kept raw so that a non-numeric value falls back to the default
/// instead of being rejected by the extractor.
#[derive(Debug, Default, Deserialize)]
pub struct ExamQuery {
    pub count: Option<String>,
}

/// DTO for submitting an exam attempt.
#[derive(Debug, Deserialize, Validate)]
pub struct SubmitExamRequest {
    /// User's answers map.
    /// Key: Question ID
    /// Value: selected option text (`null` means the selection was cleared)
    #[serde(default, deserialize_with = "drop_null_answers")]
    pub answers: HashMap<String, String>,

    /// The paper exactly as it was served.
    #[serde(default)]
    pub paper: Vec<Question>,

    /// Elapsed time in seconds.
    #[serde(default)]
    #[validate(range(min = 0.0, message = "time_taken must not be negative."))]
    pub time_taken: f64,
}

/// Cleared selections arrive as `null`; they are dropped so the question counts as skipped.
fn drop_null_answers<'de, D>(deserializer: D) -> Result<HashMap<String, String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: HashMap<String, Option<String>> = HashMap::deserialize(deserializer)?;
    Ok(raw
        .into_iter()
        .filter_map(|(id, answer)| answer.map(|a| (id, a)))
        .collect())
}

/// Grading outcome of a single question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AnswerStatus {
    Correct,
    Wrong,
    Skipped,
}

/// Badge awarded for a submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Badge {
    Sniper,
    Speedster,
    Topper,
    Student,
}

impl Badge {
    pub fn feedback(self) -> &'static str {
        match self {
            Badge::Sniper => "🎯 Precision Sniper!",
            Badge::Speedster => "⚠️ You're rushing!",
            Badge::Topper => "🏆 Topper Material!",
            Badge::Student => "Keep practicing!",
        }
    }
}

/// Per-question line of the score report.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisEntry {
    pub id: String,
    pub question: String,
    /// The selected option, or `"Skipped"`.
    pub user_answer: String,
    pub correct_answer: String,
    pub status: AnswerStatus,
    pub explanation: String,
}

/// Result of grading one submission. Never persisted.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreReport {
    pub score: i64,
    pub max_marks: i64,
    pub correct: usize,
    pub wrong: usize,
    pub skipped: usize,
    pub accuracy: f64,
    pub precision: f64,
    pub avg_speed: f64,
    pub feedback: String,
    pub badge: Badge,
    pub analysis: Vec<AnalysisEntry>,
}
