// src/exam/classifier.rs

use crate::models::question::Subject;

const BIOLOGY_KEYWORDS: &[&str] = &[
    "cell", "organism", "blood", "plant", "animal", "dna", "protein", "leaf", "root",
];

const PHYSICS_KEYWORDS: &[&str] = &[
    "velocity", "force", "energy", "gravity", "volt", "motion", "light", "speed",
];

const CHEMISTRY_KEYWORDS: &[&str] = &[
    "acid", "atom", "molecule", "reaction", "element", "bond", "organic",
];

/// Number of keywords that appear at least once in `text`.
fn hits(text: &str, keywords: &[&str]) -> usize {
    keywords.iter().filter(|k| text.contains(*k)).count()
}

/// Classifies free text into a subject by keyword counts.
///
/// Ties resolve in a fixed order: Biology, then Physics, then Chemistry.
/// Text with no keyword hits is therefore Biology.
pub fn classify(text: &str) -> Subject {
    let text = text.to_lowercase();

    let b = hits(&text, BIOLOGY_KEYWORDS);
    let p = hits(&text, PHYSICS_KEYWORDS);
    let c = hits(&text, CHEMISTRY_KEYWORDS);

    if b >= p && b >= c {
        Subject::Biology
    } else if p >= b && p >= c {
        Subject::Physics
    } else {
        Subject::Chemistry
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_physics_keywords() {
        assert_eq!(classify("force and velocity and energy"), Subject::Physics);
    }

    #[test]
    fn test_empty_text_is_biology() {
        assert_eq!(classify(""), Subject::Biology);
        assert_eq!(classify("What is the capital of France?"), Subject::Biology);
    }

    #[test]
    fn test_case_insensitive() {
        assert_eq!(classify("An ACID reacts with a BASE"), Subject::Chemistry);
    }

    #[test]
    fn test_keyword_counted_once() {
        // "acid acid acid" is one chemistry hit; "force" + "speed" are two physics hits.
        assert_eq!(classify("acid acid acid force speed"), Subject::Physics);
    }

    #[test]
    fn test_biology_wins_ties() {
        assert_eq!(classify("cell force"), Subject::Biology);
        assert_eq!(classify("cell atom"), Subject::Biology);
    }

    #[test]
    fn test_physics_beats_chemistry_on_tie() {
        assert_eq!(classify("force atom"), Subject::Physics);
    }

    #[test]
    fn test_substring_match() {
        // "voltage" contains "volt", "bonding" contains "bond".
        assert_eq!(classify("voltage"), Subject::Physics);
        assert_eq!(classify("covalent bonding"), Subject::Chemistry);
    }
}
