// src/handlers/quiz.rs

use std::sync::Arc;

use axum::{
    Json,
    extract::{Query, State, rejection::JsonRejection},
    response::IntoResponse,
};
use validator::Validate;

use crate::{
    error::AppError,
    exam::{
        assembler::{assemble, parse_count},
        scoring::score,
        store::BankStore,
    },
    models::exam_record::{ExamQuery, SubmitExamRequest},
};

/// Generates a randomized exam paper.
///
/// `count` defaults to 10 when missing or not an integer. A bank smaller
/// than `count` yields a short paper rather than an error.
pub async fn get_exam(
    State(store): State<Arc<BankStore>>,
    Query(query): Query<ExamQuery>,
) -> Result<impl IntoResponse, AppError> {
    let count = parse_count(query.count.as_deref());
    let bank = store.bank();

    let paper = assemble(&bank, count, &mut rand::thread_rng());

    tracing::info!(requested = count, served = paper.len(), "Exam paper generated");
    Ok(Json(paper))
}

/// Grades a submitted paper and returns the score report.
///
/// * +4 per correct answer, -1 per wrong answer.
/// * Nothing is stored; the report is recomputed on every call.
pub async fn submit_exam(
    payload: Result<Json<SubmitExamRequest>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Json(req) = payload?;
    req.validate()?;

    let report = score(&req.paper, &req.answers, req.time_taken);

    tracing::info!(
        score = report.score,
        max_marks = report.max_marks,
        badge = ?report.badge,
        "Exam submitted"
    );
    Ok(Json(report))
}
