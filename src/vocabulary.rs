//! Symptom vocabulary
//!
//! The ordered list of symptom names shared by both prediction pipelines.
//! Its order is the feature order of the structured classifier; its entries
//! are the dictionary for free-text extraction.

use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// Presence indicator per symptom name (0 absent, 1 present)
pub type SymptomPresence = HashMap<String, u8>;

/// Ordered, duplicate-free symptom names
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct SymptomVocabulary {
    names: Vec<String>,
}

impl SymptomVocabulary {
    /// Build a vocabulary, keeping the first occurrence of repeated names
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut seen = HashSet::new();
        let names = names
            .into_iter()
            .map(Into::into)
            .filter(|name: &String| seen.insert(name.clone()))
            .collect();
        Self { names }
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.iter().any(|n| n == name)
    }

    /// Feature row in vocabulary order. Absent names default to 0 and keys
    /// outside the vocabulary are ignored.
    pub fn presence_vector(&self, presence: &SymptomPresence) -> Vec<f64> {
        self.names
            .iter()
            .map(|name| presence.get(name).copied().unwrap_or(0) as f64)
            .collect()
    }

    /// Symptoms occurring as substrings of the lowercased text, in
    /// vocabulary order
    pub fn extract(&self, text: &str) -> Vec<String> {
        let lowered = text.to_lowercase();
        self.names
            .iter()
            .filter(|name| lowered.contains(name.as_str()))
            .cloned()
            .collect()
    }

    /// Sorted, space-joined form of the extracted symptoms, or `None` when
    /// nothing in the text matched
    pub fn canonicalize(&self, text: &str) -> Option<String> {
        let mut extracted = self.extract(text);
        if extracted.is_empty() {
            return None;
        }
        extracted.sort();
        Some(extracted.join(" "))
    }
}

impl From<Vec<String>> for SymptomVocabulary {
    fn from(names: Vec<String>) -> Self {
        Self::new(names)
    }
}

impl From<SymptomVocabulary> for Vec<String> {
    fn from(vocabulary: SymptomVocabulary) -> Self {
        vocabulary.names
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quickcheck_macros::quickcheck;

    fn vocabulary() -> SymptomVocabulary {
        SymptomVocabulary::new(["fever", "cough", "headache", "sore throat", "dizziness"])
    }

    #[test]
    fn test_presence_vector_defaults_missing_keys() {
        let vocab = SymptomVocabulary::new(["fever", "cough", "headache"]);
        let mut presence = SymptomPresence::new();
        presence.insert("fever".to_string(), 1);
        assert_eq!(vocab.presence_vector(&presence), vec![1.0, 0.0, 0.0]);
    }

    #[test]
    fn test_presence_vector_ignores_unknown_keys() {
        let vocab = SymptomVocabulary::new(["fever", "cough"]);
        let mut presence = SymptomPresence::new();
        presence.insert("rash".to_string(), 1);
        presence.insert("cough".to_string(), 1);
        assert_eq!(vocab.presence_vector(&presence), vec![0.0, 1.0]);
    }

    #[test]
    fn test_duplicates_keep_first_position() {
        let vocab = SymptomVocabulary::new(["fever", "cough", "fever"]);
        assert_eq!(vocab.names(), &["fever".to_string(), "cough".to_string()]);
    }

    #[test]
    fn test_extract_is_case_insensitive() {
        let found = vocabulary().extract("I have a FEVER and a Sore Throat");
        assert_eq!(found, vec!["fever".to_string(), "sore throat".to_string()]);
    }

    #[test]
    fn test_extract_follows_vocabulary_order() {
        let found = vocabulary().extract("dizziness then cough then fever");
        assert_eq!(found, vec!["fever", "cough", "dizziness"]);
    }

    #[test]
    fn test_canonicalize_order_invariant() {
        let vocab = vocabulary();
        assert_eq!(vocab.canonicalize("fever and cough").as_deref(), Some("cough fever"));
        assert_eq!(vocab.canonicalize("cough and fever").as_deref(), Some("cough fever"));
    }

    #[test]
    fn test_canonicalize_without_match() {
        assert!(vocabulary().canonicalize("my knee hurts").is_none());
    }

    #[test]
    fn test_serde_as_plain_list() {
        let vocab: SymptomVocabulary =
            serde_json::from_str(r#"["fever","cough","fever"]"#).unwrap();
        assert_eq!(vocab.len(), 2);
        assert_eq!(serde_json::to_string(&vocab).unwrap(), r#"["fever","cough"]"#);
    }

    #[quickcheck]
    fn prop_canonicalization_is_idempotent(picks: Vec<u8>, noise: String) -> bool {
        let vocab = vocabulary();
        let mut text = noise;
        for pick in picks {
            text.push(' ');
            text.push_str(&vocab.names()[pick as usize % vocab.len()]);
        }
        match vocab.canonicalize(&text) {
            Some(canonical) => vocab.canonicalize(&canonical).as_deref() == Some(canonical.as_str()),
            None => true,
        }
    }
}
