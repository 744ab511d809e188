// src/config.rs

use std::env;
use std::path::PathBuf;
use dotenvy::dotenv;

/// Paper size used when `count` is missing or not an integer.
pub const DEFAULT_EXAM_COUNT: usize = 10;

#[derive(Debug, Clone)]
pub struct Config {
    /// Durable JSON copy of the question bank.
    pub bank_path: PathBuf,
    /// Raw CSV source ingested when the bank file is absent.
    pub source_path: PathBuf,
    pub bind_addr: String,
    pub rust_log: String,
    pub google_api_key: Option<String>,
    pub gemini_model: String,
}

impl Config {
    pub fn from_env() -> Self {
        dotenv().ok();

        let bank_path: PathBuf = env::var("BANK_PATH")
            .unwrap_or_else(|_| "questions.json".to_string())
            .into();

        let source_path: PathBuf = env::var("SOURCE_PATH")
            .unwrap_or_else(|_| "train.csv".to_string())
            .into();

        let bind_addr = env::var("BIND_ADDR")
            .unwrap_or_else(|_| "0.0.0.0:5001".to_string());

        let rust_log = env::var("RUST_LOG")
            .unwrap_or_else(|_| "info".to_string());

        let google_api_key = env::var("GOOGLE_API_KEY")
            .ok()
            .filter(|k| !k.trim().is_empty());

        let gemini_model = env::var("GEMINI_MODEL")
            .unwrap_or_else(|_| "gemini-2.5-flash".to_string());

        Self {
            bank_path,
            source_path,
            bind_addr,
            rust_log,
            google_api_key,
            gemini_model,
        }
    }
}
