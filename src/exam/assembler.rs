// src/exam/assembler.rs

use std::collections::HashSet;
use std::num::IntErrorKind;

use rand::Rng;
use rand::seq::SliceRandom;

use crate::{
    config::DEFAULT_EXAM_COUNT,
    models::question::{Question, QuestionBank, Subject},
};

/// Parses the requested paper size.
///
/// Missing or non-integer input yields the default. Negative integers clamp
/// to zero and integers too large to represent saturate to `usize::MAX`.
pub fn parse_count(raw: Option<&str>) -> usize {
    match raw.map(|s| s.trim().parse::<i64>()) {
        Some(Ok(n)) => usize::try_from(n).unwrap_or(if n < 0 { 0 } else { usize::MAX }),
        Some(Err(e)) => match e.kind() {
            IntErrorKind::PosOverflow => usize::MAX,
            IntErrorKind::NegOverflow => 0,
            _ => DEFAULT_EXAM_COUNT,
        },
        None => DEFAULT_EXAM_COUNT,
    }
}

/// Assembles a paper of at most `count` distinct questions.
///
/// Draws `count / 3` from each subject in fixed order, tops up from the
/// questions not yet chosen, then shuffles. A bank smaller than `count`
/// yields a short paper.
pub fn assemble<R: Rng + ?Sized>(bank: &QuestionBank, count: usize, rng: &mut R) -> Vec<Question> {
    let per_subject = count / 3;
    let mut paper: Vec<Question> = Vec::with_capacity(count.min(bank.len()));

    for subject in Subject::ALL {
        let pool = bank.pool(subject);
        let k = per_subject.min(pool.len());
        paper.extend(pool.choose_multiple(rng, k).cloned());
    }

    if paper.len() < count {
        let needed = count - paper.len();
        let top_up: Vec<Question> = {
            let chosen: HashSet<&str> = paper.iter().map(|q| q.id.as_str()).collect();
            let remaining: Vec<&Question> = bank
                .iter()
                .filter(|q| !chosen.contains(q.id.as_str()))
                .collect();

            remaining
                .choose_multiple(rng, needed.min(remaining.len()))
                .map(|q| (*q).clone())
                .collect()
        };

        tracing::debug!(needed, drawn = top_up.len(), "Topped up exam paper");
        paper.extend(top_up);
    }

    paper.shuffle(rng);
    paper
}
