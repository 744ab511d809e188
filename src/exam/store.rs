// src/exam/store.rs

use std::fs::{self, File};
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::sync::{Arc, OnceLock};

use crate::{
    error::AppError,
    exam::ingest::{ingest, read_records},
    models::question::QuestionBank,
};

/// Process-wide holder of the question bank.
///
/// The bank is built at most once, on the first call to [`BankStore::bank`],
/// and never mutated afterwards:
///
/// 1. If the durable JSON file exists it is loaded (stale banks are not refreshed);
///    malformed entries in it are dropped.
/// 2. Otherwise the CSV source is ingested and the result written to the JSON file.
/// 3. If neither exists the bank is empty.
#[derive(Debug)]
pub struct BankStore {
    bank_path: PathBuf,
    source_path: PathBuf,
    bank: OnceLock<Arc<QuestionBank>>,
}

impl BankStore {
    pub fn new(bank_path: impl Into<PathBuf>, source_path: impl Into<PathBuf>) -> Self {
        Self {
            bank_path: bank_path.into(),
            source_path: source_path.into(),
            bank: OnceLock::new(),
        }
    }

    /// A store that serves an already-built bank and never touches the filesystem.
    pub fn preloaded(bank: QuestionBank) -> Self {
        let store = Self::new(PathBuf::new(), PathBuf::new());
        let _ = store.bank.set(Arc::new(bank));
        store
    }

    /// Returns the bank, building it on first use.
    pub fn bank(&self) -> Arc<QuestionBank> {
        self.bank
            .get_or_init(|| Arc::new(self.load_or_build()))
            .clone()
    }

    fn load_or_build(&self) -> QuestionBank {
        if self.bank_path.exists() {
            return match load_bank(&self.bank_path) {
                Ok(bank) => {
                    tracing::info!("Loaded {} questions from {}", bank.len(), self.bank_path.display());
                    bank
                }
                Err(e) => {
                    tracing::error!("Failed to load question bank {}: {}", self.bank_path.display(), e);
                    QuestionBank::default()
                }
            };
        }

        if !self.source_path.exists() {
            tracing::warn!(
                "Neither {} nor {} found, serving an empty question bank",
                self.bank_path.display(),
                self.source_path.display()
            );
            return QuestionBank::default();
        }

        tracing::info!("Converting {} into {}...", self.source_path.display(), self.bank_path.display());
        let bank = match build_bank(&self.source_path) {
            Ok(bank) => bank,
            Err(e) => {
                tracing::error!("Failed to ingest {}: {}", self.source_path.display(), e);
                return QuestionBank::default();
            }
        };

        if let Err(e) = save_bank(&self.bank_path, &bank) {
            tracing::error!("Failed to persist question bank: {}", e);
        }

        bank
    }
}

fn load_bank(path: &Path) -> Result<QuestionBank, AppError> {
    let reader = BufReader::new(File::open(path)?);
    let mut bank: QuestionBank = serde_json::from_reader(reader)?;

    let removed = bank.retain_well_formed();
    if removed > 0 {
        tracing::warn!("Dropped {} malformed questions from {}", removed, path.display());
    }
    Ok(bank)
}

fn build_bank(source: &Path) -> Result<QuestionBank, AppError> {
    let rows = read_records(BufReader::new(File::open(source)?))?;
    Ok(ingest(&rows, &mut rand::thread_rng()))
}

fn save_bank(path: &Path, bank: &QuestionBank) -> Result<(), AppError> {
    let json = serde_json::to_string_pretty(bank)?;
    fs::write(path, json)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const CSV: &str = "\
question,distractor3,distractor1,distractor2,correct_answer,support
What carries oxygen in blood?,plasma,platelets,water,red blood cell,Haemoglobin binds oxygen.
What is the unit of force?,joule,watt,volt,newton,
Which particle has a negative charge?,proton,neutron,nan,electron,
";

    #[test]
    fn test_builds_from_source_and_persists() {
        let dir = tempfile::tempdir().unwrap();
        let bank_path = dir.path().join("questions.json");
        let source_path = dir.path().join("train.csv");
        fs::write(&source_path, CSV).unwrap();

        let store = BankStore::new(&bank_path, &source_path);
        let bank = store.bank();

        assert_eq!(bank.len(), 2);
        assert!(bank_path.exists());

        let on_disk: QuestionBank =
            serde_json::from_str(&fs::read_to_string(&bank_path).unwrap()).unwrap();
        assert_eq!(&on_disk, bank.as_ref());
    }

    #[test]
    fn test_existing_bank_file_skips_ingestion() {
        let dir = tempfile::tempdir().unwrap();
        let bank_path = dir.path().join("questions.json");
        let source_path = dir.path().join("train.csv");
        fs::write(&source_path, CSV).unwrap();
        fs::write(&bank_path, r#"{"physics": [], "chemistry": [], "biology": []}"#).unwrap();

        let bank = BankStore::new(&bank_path, &source_path).bank();
        assert!(bank.is_empty());
    }

    #[test]
    fn test_missing_everything_gives_empty_bank() {
        let dir = tempfile::tempdir().unwrap();
        let store = BankStore::new(dir.path().join("a.json"), dir.path().join("b.csv"));
        assert!(store.bank().is_empty());
        assert!(!dir.path().join("a.json").exists());
    }

    #[test]
    fn test_bank_is_built_once() {
        let dir = tempfile::tempdir().unwrap();
        let bank_path = dir.path().join("questions.json");
        let source_path = dir.path().join("train.csv");
        fs::write(&source_path, CSV).unwrap();

        let store = BankStore::new(&bank_path, &source_path);
        let first = store.bank();
        fs::remove_file(&bank_path).unwrap();
        let second = store.bank();

        assert!(Arc::ptr_eq(&first, &second));
    }

    #[test]
    fn test_malformed_cached_questions_are_dropped() {
        let dir = tempfile::tempdir().unwrap();
        let bank_path = dir.path().join("questions.json");
        let cached = serde_json::json!({
            "physics": [
                {"id": "p0", "question": "Unit of force?", "options": ["newton", "watt", "volt", "joule"],
                 "answer": "newton", "explanation": "", "subject": "Physics"},
                {"id": "p1", "question": "Three options", "options": ["a", "b", "c"],
                 "answer": "a", "explanation": "", "subject": "Physics"},
                {"id": "p2", "question": "Answer missing", "options": ["a", "b", "c", "d"],
                 "answer": "e", "explanation": "", "subject": "Physics"}
            ],
            "biology": [
                {"id": "b3", "question": "Repeated", "options": ["a", "b", "b", "d"],
                 "answer": "a", "explanation": "", "subject": "Biology"}
            ]
        });
        fs::write(&bank_path, cached.to_string()).unwrap();

        let bank = BankStore::new(&bank_path, dir.path().join("train.csv")).bank();

        assert_eq!(bank.len(), 1);
        assert_eq!(bank.physics[0].id, "p0");
    }

    #[test]
    fn test_corrupt_bank_file_gives_empty_bank() {
        let dir = tempfile::tempdir().unwrap();
        let bank_path = dir.path().join("questions.json");
        fs::write(&bank_path, "not json").unwrap();

        let bank = BankStore::new(&bank_path, dir.path().join("train.csv")).bank();
        assert!(bank.is_empty());
    }
}
