// src/models/chat.rs

use serde::{Deserialize, Serialize};
use validator::Validate;

/// DTO for asking the study assistant a question.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct ChatRequest {
    #[serde(default)]
    #[validate(length(max = 2000, message = "Query must be at most 2000 characters."))]
    pub query: String,

    /// Exam text the assistant may use when explaining answers.
    #[serde(default)]
    #[validate(length(max = 20000))]
    pub context: String,

    #[serde(default)]
    pub is_exam_finished: bool,
}

#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub reply: String,
}
