//! Fitted TF-IDF vectorizer
//!
//! Reproduces the transform step of a fitted word-level TF-IDF vectorizer:
//! lowercase, tokenize on `\b\w\w+\b`, build word n-grams, count the terms
//! known to the fitted vocabulary, weight by idf and L2-normalize.

use crate::errors::{DiagnosisError, Result};
use crate::models::traits::TextVectorizer;
use crate::models::types::FeatureRow;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

const TOKEN_PATTERN: &str = r"\b\w\w+\b";

/// Row normalization applied after weighting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Norm {
    L2,
}

/// Fitted attributes as exported
#[derive(Debug, Clone, Serialize, Deserialize)]
struct TfidfData {
    vocabulary: HashMap<String, usize>,
    idf: Vec<f64>,
    #[serde(default = "default_ngram_range")]
    ngram_range: (usize, usize),
    #[serde(default = "default_true")]
    lowercase: bool,
    #[serde(default)]
    sublinear_tf: bool,
    #[serde(default = "default_norm")]
    norm: Option<Norm>,
}

fn default_ngram_range() -> (usize, usize) {
    (1, 1)
}

fn default_true() -> bool {
    true
}

fn default_norm() -> Option<Norm> {
    Some(Norm::L2)
}

/// Fitted TF-IDF vectorizer
#[derive(Debug, Clone)]
pub struct TfidfVectorizer {
    data: TfidfData,
    token_pattern: Regex,
}

impl TfidfVectorizer {
    /// Parse a JSON export
    pub fn from_json(json: &str) -> Result<Self> {
        let data: TfidfData = serde_json::from_str(json)?;
        Self::from_data(data)
    }

    fn from_data(data: TfidfData) -> Result<Self> {
        let (min_n, max_n) = data.ngram_range;
        if min_n == 0 || min_n > max_n {
            return Err(DiagnosisError::Vectorizer(format!(
                "invalid ngram_range ({}, {})",
                min_n, max_n
            )));
        }

        if let Some((term, &col)) = data.vocabulary.iter().find(|&(_, &col)| col >= data.idf.len()) {
            return Err(DiagnosisError::Vectorizer(format!(
                "term '{}' maps to column {} but idf has {} entries",
                term,
                col,
                data.idf.len()
            )));
        }

        let token_pattern = Regex::new(TOKEN_PATTERN)
            .map_err(|e| DiagnosisError::Vectorizer(format!("bad token pattern: {}", e)))?;

        Ok(Self {
            data,
            token_pattern,
        })
    }

    /// Number of output columns
    pub fn n_features(&self) -> usize {
        self.data.idf.len()
    }

    /// Word n-grams of the text, in order of appearance
    fn analyze(&self, text: &str) -> Vec<String> {
        let text = if self.data.lowercase {
            text.to_lowercase()
        } else {
            text.to_string()
        };
        let tokens: Vec<&str> = self
            .token_pattern
            .find_iter(&text)
            .map(|m| m.as_str())
            .collect();

        let (min_n, max_n) = self.data.ngram_range;
        let mut terms = Vec::new();
        for n in min_n..=max_n {
            if n > tokens.len() {
                break;
            }
            terms.extend(tokens.windows(n).map(|w| w.join(" ")));
        }
        terms
    }

    fn transform_one(&self, text: &str) -> FeatureRow {
        let mut row: FeatureRow = vec![0.0; self.n_features()];
        for term in self.analyze(text) {
            if let Some(&col) = self.data.vocabulary.get(&term) {
                row[col] += 1.0;
            }
        }

        for (col, value) in row.iter_mut().enumerate() {
            if *value == 0.0 {
                continue;
            }
            if self.data.sublinear_tf {
                *value = 1.0 + value.ln();
            }
            *value *= self.data.idf[col];
        }

        if self.data.norm == Some(Norm::L2) {
            let norm = row.iter().map(|v| v * v).sum::<f64>().sqrt();
            if norm > 0.0 {
                row.iter_mut().for_each(|v| *v /= norm);
            }
        }

        row
    }
}

impl TextVectorizer for TfidfVectorizer {
    fn transform(&self, texts: &[String]) -> Result<Vec<FeatureRow>> {
        Ok(texts.iter().map(|text| self.transform_one(text)).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vectorizer(extra: &str) -> TfidfVectorizer {
        let json = format!(
            r#"{{
                "vocabulary": {{"cough": 0, "fever": 1, "sore": 2, "throat": 3, "sore throat": 4}},
                "idf": [1.0, 2.0, 1.0, 1.0, 3.0]{}
            }}"#,
            extra
        );
        TfidfVectorizer::from_json(&json).unwrap()
    }

    fn close(a: &[f64], b: &[f64]) -> bool {
        a.len() == b.len() && a.iter().zip(b).all(|(x, y)| (x - y).abs() < 1e-9)
    }

    #[test]
    fn test_unigrams_unnormalized() {
        let v = vectorizer(r#", "norm": null"#);
        let rows = v.transform(&["Cough fever fever".to_string()]).unwrap();
        assert!(close(&rows[0], &[1.0, 4.0, 0.0, 0.0, 0.0]));
    }

    #[test]
    fn test_l2_normalized_by_default() {
        let v = vectorizer("");
        let rows = v.transform(&["cough".to_string(), "fever".to_string()]).unwrap();
        assert!(close(&rows[0], &[1.0, 0.0, 0.0, 0.0, 0.0]));
        assert!(close(&rows[1], &[0.0, 1.0, 0.0, 0.0, 0.0]));
    }

    #[test]
    fn test_bigrams() {
        let v = vectorizer(r#", "ngram_range": [1, 2], "norm": null"#);
        let rows = v.transform(&["sore throat".to_string()]).unwrap();
        assert!(close(&rows[0], &[0.0, 0.0, 1.0, 1.0, 3.0]));
    }

    #[test]
    fn test_unknown_text_is_zero_row() {
        let v = vectorizer("");
        let rows = v.transform(&["a b knee".to_string()]).unwrap();
        assert!(rows[0].iter().all(|&x| x == 0.0));
    }

    #[test]
    fn test_sublinear_tf() {
        let v = vectorizer(r#", "sublinear_tf": true, "norm": null"#);
        let rows = v.transform(&["cough cough".to_string()]).unwrap();
        assert!((rows[0][0] - (1.0 + 2f64.ln())).abs() < 1e-9);
    }

    #[test]
    fn test_sublinear_tf_then_l2() {
        let v = vectorizer(r#", "sublinear_tf": true"#);
        let rows = v.transform(&["fever fever fever cough".to_string()]).unwrap();
        let fever = (1.0 + 3f64.ln()) * 2.0;
        let norm = (1.0 + fever * fever).sqrt();
        assert!(close(&rows[0], &[1.0 / norm, fever / norm, 0.0, 0.0, 0.0]));
    }

    #[test]
    fn test_column_out_of_range_rejected() {
        let result = TfidfVectorizer::from_json(r#"{"vocabulary": {"fever": 3}, "idf": [1.0]}"#);
        assert!(matches!(result, Err(DiagnosisError::Vectorizer(_))));
    }

    #[test]
    fn test_invalid_ngram_range_rejected() {
        let result = TfidfVectorizer::from_json(
            r#"{"vocabulary": {}, "idf": [], "ngram_range": [2, 1]}"#,
        );
        assert!(result.is_err());
    }
}
