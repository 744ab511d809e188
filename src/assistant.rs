// src/assistant.rs

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::{error::AppError, models::chat::ChatRequest};

pub const NOT_CONFIGURED_REPLY: &str =
    "❌ Server Error: API Key not configured. Tell the developer to check .env file!";
pub const FALLBACK_REPLY: &str = "My AI brain is having a hiccup. Check the server logs!";

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";
const REQUEST_TIMEOUT_SECS: u64 = 30;

const EXAM_ONGOING_RULES: &str = "\
You are a supportive study companion. The student is currently taking a timed mock exam.
RULES:
1. DO NOT give the answer key or reveal which option is correct.
2. If asked for an answer, refuse playfully and encourage the student to try first.
3. If asked for a conceptual hint, explain the concept briefly (2 sentences max) without revealing the answer.";

const EXAM_FINISHED_RULES: &str = "\
You are a supportive study companion. The student has finished the exam.
1. You can now explain answers freely.
2. Use the provided context to explain why the correct answer is right.
3. Be encouraging.";

/// Text-generation backend: prompt in, reply out.
#[async_trait]
pub trait ReplyGenerator: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String, AppError>;
}

/// Google Generative Language (Gemini) REST client.
pub struct GeminiClient {
    api_key: String,
    model: String,
    base_url: String,
    client: reqwest::Client,
}

impl GeminiClient {
    pub fn new(api_key: &str, model: &str, base_url: Option<String>) -> Result<Self, AppError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;

        Ok(Self {
            api_key: api_key.to_string(),
            model: model.to_string(),
            base_url: base_url.unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            client,
        })
    }
}

#[derive(Serialize)]
struct GeminiRequest<'a> {
    contents: Vec<GeminiContent<'a>>,
}

#[derive(Serialize)]
struct GeminiContent<'a> {
    parts: Vec<GeminiPart<'a>>,
}

#[derive(Serialize)]
struct GeminiPart<'a> {
    text: &'a str,
}

#[derive(Deserialize)]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<GeminiCandidate>,
}

#[derive(Deserialize)]
struct GeminiCandidate {
    content: Option<GeminiCandidateContent>,
}

#[derive(Deserialize)]
struct GeminiCandidateContent {
    #[serde(default)]
    parts: Vec<GeminiResponsePart>,
}

#[derive(Deserialize)]
struct GeminiResponsePart {
    #[serde(default)]
    text: String,
}

#[async_trait]
impl ReplyGenerator for GeminiClient {
    async fn generate(&self, prompt: &str) -> Result<String, AppError> {
        let body = GeminiRequest {
            contents: vec![GeminiContent {
                parts: vec![GeminiPart { text: prompt }],
            }],
        };

        let response = self
            .client
            .post(format!(
                "{}/v1beta/models/{}:generateContent",
                self.base_url, self.model
            ))
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::Upstream(format!("{}: {}", status, body)));
        }

        let parsed: GeminiResponse = response.json().await?;
        let text: String = parsed
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content)
            .map(|c| c.parts.into_iter().map(|p| p.text).collect())
            .unwrap_or_default();

        if text.trim().is_empty() {
            return Err(AppError::Upstream("empty completion".to_string()));
        }
        Ok(text)
    }
}

/// Study assistant. Never used for grading; every failure becomes a fixed reply.
#[derive(Clone)]
pub struct Assistant {
    generator: Option<Arc<dyn ReplyGenerator>>,
}

impl Assistant {
    pub fn new(generator: Option<Arc<dyn ReplyGenerator>>) -> Self {
        Self { generator }
    }

    /// Assistant with no backend; always answers with the "not configured" reply.
    pub fn disabled() -> Self {
        Self { generator: None }
    }

    pub fn build_prompt(request: &ChatRequest) -> String {
        let instructions = if request.is_exam_finished {
            format!(
                "{}\nContext from Exam Paper: {}",
                EXAM_FINISHED_RULES, request.context
            )
        } else {
            EXAM_ONGOING_RULES.to_string()
        };

        format!(
            "{}\n\nStudent's message: {}\nContext provided: {}",
            instructions, request.query, request.context
        )
    }

    pub async fn reply(&self, request: &ChatRequest) -> String {
        let Some(generator) = &self.generator else {
            return NOT_CONFIGURED_REPLY.to_string();
        };

        let prompt = Self::build_prompt(request);
        match generator.generate(&prompt).await {
            Ok(reply) => reply,
            Err(e) => {
                tracing::error!("Assistant generation failed: {}", e);
                FALLBACK_REPLY.to_string()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Echo;

    #[async_trait]
    impl ReplyGenerator for Echo {
        async fn generate(&self, prompt: &str) -> Result<String, AppError> {
            Ok(prompt.to_string())
        }
    }

    struct Broken;

    #[async_trait]
    impl ReplyGenerator for Broken {
        async fn generate(&self, _prompt: &str) -> Result<String, AppError> {
            Err(AppError::Upstream("boom".to_string()))
        }
    }

    fn request(finished: bool) -> ChatRequest {
        ChatRequest {
            query: "What is inertia?".to_string(),
            context: "Q1: Newton's first law".to_string(),
            is_exam_finished: finished,
        }
    }

    #[test]
    fn test_prompt_modes() {
        let ongoing = Assistant::build_prompt(&request(false));
        assert!(ongoing.contains("DO NOT give the answer key"));
        assert!(ongoing.contains("What is inertia?"));

        let finished = Assistant::build_prompt(&request(true));
        assert!(finished.contains("explain answers freely"));
        assert!(finished.contains("Context from Exam Paper: Q1: Newton's first law"));
    }

    #[tokio::test]
    async fn test_reply_passes_through() {
        let assistant = Assistant::new(Some(Arc::new(Echo)));
        let reply = assistant.reply(&request(false)).await;
        assert!(reply.contains("What is inertia?"));
    }

    #[tokio::test]
    async fn test_failure_maps_to_fallback() {
        let assistant = Assistant::new(Some(Arc::new(Broken)));
        assert_eq!(assistant.reply(&request(true)).await, FALLBACK_REPLY);
    }

    #[tokio::test]
    async fn test_disabled_reply() {
        assert_eq!(Assistant::disabled().reply(&request(true)).await, NOT_CONFIGURED_REPLY);
    }
}
