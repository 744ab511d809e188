// src/models/question.rs

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

/// Placeholder used when a paper comes back from the client without an explanation.
pub const NO_EXPLANATION: &str = "No explanation available.";

/// The three fixed subjects a question can be classified into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Subject {
    Physics,
    Chemistry,
    Biology,
}

impl Subject {
    /// Fixed order used for stratified sampling.
    pub const ALL: [Subject; 3] = [Subject::Physics, Subject::Chemistry, Subject::Biology];

    /// Lower-case initial used as the id prefix.
    pub fn initial(self) -> char {
        match self {
            Subject::Physics => 'p',
            Subject::Chemistry => 'c',
            Subject::Biology => 'b',
        }
    }
}

/// A single multiple-choice question.
///
/// Serialized with the field names the exam client expects
/// (`question` rather than `text`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Question {
    /// `<subject initial><source row index>`, e.g. `p42`.
    pub id: String,

    /// The question text.
    #[serde(rename = "question")]
    pub text: String,

    /// Exactly four distinct options, one of which is `answer`.
    pub options: Vec<String>,

    pub answer: String,

    #[serde(default = "default_explanation")]
    pub explanation: String,

    pub subject: Subject,
}

impl Question {
    /// Non-empty text, exactly four distinct options, answer among them.
    pub fn is_well_formed(&self) -> bool {
        let mut distinct: Vec<&str> = self.options.iter().map(String::as_str).collect();
        distinct.sort_unstable();
        distinct.dedup();

        !self.text.trim().is_empty()
            && self.options.len() == 4
            && distinct.len() == 4
            && self.options.contains(&self.answer)
    }
}

fn default_explanation() -> String {
    NO_EXPLANATION.to_string()
}

/// Classified question bank, partitioned by subject.
///
/// Mirrors the durable JSON document: `{"physics": [..], "chemistry": [..], "biology": [..]}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QuestionBank {
    #[serde(default)]
    pub physics: Vec<Question>,
    #[serde(default)]
    pub chemistry: Vec<Question>,
    #[serde(default)]
    pub biology: Vec<Question>,
}

impl QuestionBank {
    /// Questions classified under `subject`, in ingestion order.
    pub fn pool(&self, subject: Subject) -> &[Question] {
        match subject {
            Subject::Physics => &self.physics,
            Subject::Chemistry => &self.chemistry,
            Subject::Biology => &self.biology,
        }
    }

    pub(crate) fn push(&mut self, question: Question) {
        match question.subject {
            Subject::Physics => self.physics.push(question),
            Subject::Chemistry => self.chemistry.push(question),
            Subject::Biology => self.biology.push(question),
        }
    }

    /// Every question across all subjects, in subject order.
    pub fn iter(&self) -> impl Iterator<Item = &Question> {
        Subject::ALL.into_iter().flat_map(|s| self.pool(s).iter())
    }

    /// Drops questions that are malformed, filed under the wrong subject, or
    /// repeat an earlier id. Returns how many were removed.
    pub(crate) fn retain_well_formed(&mut self) -> usize {
        let before = self.len();
        let mut seen = HashSet::new();

        for subject in Subject::ALL {
            let pool = match subject {
                Subject::Physics => &mut self.physics,
                Subject::Chemistry => &mut self.chemistry,
                Subject::Biology => &mut self.biology,
            };
            pool.retain(|q| q.subject == subject && q.is_well_formed() && seen.insert(q.id.clone()));
        }

        before - self.len()
    }

    pub fn len(&self) -> usize {
        self.physics.len() + self.chemistry.len() + self.biology.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_question_serializes_with_client_field_names() {
        let q = Question {
            id: "p3".to_string(),
            text: "What is force?".to_string(),
            options: vec!["a".into(), "b".into(), "c".into(), "d".into()],
            answer: "a".to_string(),
            explanation: "Newton".to_string(),
            subject: Subject::Physics,
        };

        let value = serde_json::to_value(&q).unwrap();
        assert_eq!(value["question"], "What is force?");
        assert_eq!(value["subject"], "Physics");
        assert!(value.get("text").is_none());
    }

    #[test]
    fn test_missing_explanation_uses_placeholder() {
        let q: Question = serde_json::from_value(serde_json::json!({
            "id": "b1",
            "question": "Q",
            "options": ["a", "b", "c", "d"],
            "answer": "a",
            "subject": "Biology"
        }))
        .unwrap();

        assert_eq!(q.explanation, NO_EXPLANATION);
    }

    fn question(id: &str, subject: Subject, options: &[&str], answer: &str) -> Question {
        Question {
            id: id.to_string(),
            text: "Q".to_string(),
            options: options.iter().map(|o| o.to_string()).collect(),
            answer: answer.to_string(),
            explanation: String::new(),
            subject,
        }
    }

    #[test]
    fn test_is_well_formed() {
        assert!(question("p1", Subject::Physics, &["a", "b", "c", "d"], "a").is_well_formed());
        assert!(!question("p1", Subject::Physics, &["a", "b", "c"], "a").is_well_formed());
        assert!(!question("p1", Subject::Physics, &["a", "a", "c", "d"], "a").is_well_formed());
        assert!(!question("p1", Subject::Physics, &["a", "b", "c", "d"], "e").is_well_formed());
    }

    #[test]
    fn test_retain_well_formed() {
        let mut bank = QuestionBank {
            physics: vec![
                question("p1", Subject::Physics, &["a", "b", "c", "d"], "a"),
                question("p2", Subject::Physics, &["a", "b", "c", "d"], "z"),
                question("b3", Subject::Biology, &["a", "b", "c", "d"], "a"),
            ],
            chemistry: vec![question("p1", Subject::Chemistry, &["a", "b", "c", "d"], "b")],
            biology: vec![question("b4", Subject::Biology, &["a", "b", "c", "d"], "d")],
        };

        assert_eq!(bank.retain_well_formed(), 3);
        let ids: Vec<&str> = bank.iter().map(|q| q.id.as_str()).collect();
        assert_eq!(ids, vec!["p1", "b4"]);
    }

    #[test]
    fn test_bank_missing_keys_are_empty() {
        let bank: QuestionBank = serde_json::from_str(r#"{"physics": []}"#).unwrap();
        assert!(bank.is_empty());
        assert_eq!(bank.pool(Subject::Chemistry).len(), 0);
    }
}
