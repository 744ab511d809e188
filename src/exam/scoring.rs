// src/exam/scoring.rs

use std::collections::HashMap;

use crate::models::{
    exam_record::{AnalysisEntry, AnswerStatus, Badge, ScoreReport},
    question::Question,
};

pub const MARKS_PER_CORRECT: i64 = 4;
pub const PENALTY_PER_WRONG: i64 = 1;

const SKIPPED: &str = "Skipped";

/// `num / den * 100`, or 0 when `den` is 0.
fn percentage(num: usize, den: usize) -> f64 {
    if den == 0 {
        return 0.0;
    }
    num as f64 / den as f64 * 100.0
}

/// One decimal place, halves to even (3.25 -> 3.2, 3.75 -> 3.8).
fn round1(value: f64) -> f64 {
    (value * 10.0).round_ties_even() / 10.0
}

/// Priority chain: the first matching rule wins.
fn classify_badge(precision: f64, accuracy: f64, avg_speed: f64, attempted: usize) -> Badge {
    if precision > 90.0 && attempted > 0 {
        Badge::Sniper
    } else if avg_speed < 15.0 && precision < 60.0 {
        Badge::Speedster
    } else if accuracy > 80.0 {
        Badge::Topper
    } else {
        Badge::Student
    }
}

/// Grades a submitted paper.
///
/// * +4 per correct answer, -1 per wrong answer, 0 for skipped.
/// * An absent or empty answer counts as skipped.
/// * Ratios with a zero denominator are 0.
pub fn score(paper: &[Question], answers: &HashMap<String, String>, time_taken: f64) -> ScoreReport {
    let mut total_score = 0;
    let mut correct = 0;
    let mut wrong = 0;
    let mut skipped = 0;
    let mut analysis = Vec::with_capacity(paper.len());

    for q in paper {
        let selected = answers
            .get(&q.id)
            .map(String::as_str)
            .filter(|a| !a.is_empty());

        let status = match selected {
            None => AnswerStatus::Skipped,
            Some(a) if a == q.answer => AnswerStatus::Correct,
            Some(_) => AnswerStatus::Wrong,
        };

        match status {
            AnswerStatus::Correct => {
                total_score += MARKS_PER_CORRECT;
                correct += 1;
            }
            AnswerStatus::Wrong => {
                total_score -= PENALTY_PER_WRONG;
                wrong += 1;
            }
            AnswerStatus::Skipped => skipped += 1,
        }

        analysis.push(AnalysisEntry {
            id: q.id.clone(),
            question: q.text.clone(),
            user_answer: selected.unwrap_or(SKIPPED).to_string(),
            correct_answer: q.answer.clone(),
            status,
            explanation: q.explanation.clone(),
        });
    }

    let total = paper.len();
    let attempted = correct + wrong;
    let accuracy = percentage(correct, total);
    let precision = percentage(correct, attempted);
    let avg_speed = if attempted > 0 {
        time_taken / attempted as f64
    } else {
        0.0
    };

    let badge = classify_badge(precision, accuracy, avg_speed, attempted);

    ScoreReport {
        score: total_score,
        max_marks: total as i64 * MARKS_PER_CORRECT,
        correct,
        wrong,
        skipped,
        accuracy: round1(accuracy),
        precision: round1(precision),
        avg_speed: round1(avg_speed),
        feedback: badge.feedback().to_string(),
        badge,
        analysis,
    }
}
