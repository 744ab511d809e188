// src/handlers/chat.rs

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    response::IntoResponse,
};
use validator::Validate;

use crate::{
    assistant::Assistant,
    error::AppError,
    models::chat::{ChatRequest, ChatResponse},
};

/// Forwards a question to the study assistant.
/// Generation failures still return 200 with a fallback reply.
pub async fn chat_ai(
    State(assistant): State<Assistant>,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Json(req) = payload?;
    req.validate()?;

    let reply = assistant.reply(&req).await;
    Ok(Json(ChatResponse { reply }))
}
