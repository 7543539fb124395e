//! Linear one-vs-rest classifier inference
//!
//! Inference only. Fitting happens elsewhere; the fitted coefficients are
//! read from a JSON export with `classes`, `coefficients` and `intercepts`.
//!
//! - Multiclass: score_k(x) = w_k·x + b_k, predict arg-max k
//! - Binary (single coefficient row): predict classes[1] when w·x + b > 0

use crate::errors::{DiagnosisError, Result};
use crate::models::traits::{StructuredClassifier, TextClassifier};
use crate::models::types::{DiseaseLabel, FeatureRow};
use serde::{Deserialize, Serialize};

/// Fitted linear classifier
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinearClassifier {
    classes: Vec<DiseaseLabel>,
    coefficients: Vec<Vec<f64>>,
    intercepts: Vec<f64>,
}

impl LinearClassifier {
    /// Build a classifier from fitted parameters, checking their shapes
    pub fn new(
        classes: Vec<DiseaseLabel>,
        coefficients: Vec<Vec<f64>>,
        intercepts: Vec<f64>,
    ) -> Result<Self> {
        let model = Self {
            classes,
            coefficients,
            intercepts,
        };
        model.validate()?;
        Ok(model)
    }

    /// Parse a JSON export
    pub fn from_json(json: &str) -> Result<Self> {
        let model: LinearClassifier = serde_json::from_str(json)?;
        model.validate()?;
        Ok(model)
    }

    pub fn classes(&self) -> &[DiseaseLabel] {
        &self.classes
    }

    /// Number of features each row must have
    pub fn n_features(&self) -> usize {
        self.coefficients.first().map(Vec::len).unwrap_or(0)
    }

    fn is_binary(&self) -> bool {
        self.classes.len() == 2 && self.coefficients.len() == 1
    }

    fn validate(&self) -> Result<()> {
        if self.classes.is_empty() {
            return Err(DiagnosisError::Classifier("model has no classes".to_string()));
        }

        let expected_rows = if self.is_binary() { 1 } else { self.classes.len() };
        if self.coefficients.len() != expected_rows {
            return Err(DiagnosisError::Classifier(format!(
                "expected {} coefficient rows for {} classes, found {}",
                expected_rows,
                self.classes.len(),
                self.coefficients.len()
            )));
        }

        if self.intercepts.len() != self.coefficients.len() {
            return Err(DiagnosisError::Classifier(format!(
                "{} intercepts for {} coefficient rows",
                self.intercepts.len(),
                self.coefficients.len()
            )));
        }

        let width = self.n_features();
        if self.coefficients.iter().any(|row| row.len() != width) {
            return Err(DiagnosisError::Classifier(
                "coefficient rows have different widths".to_string(),
            ));
        }

        Ok(())
    }

    /// Decision value of one coefficient row
    #[inline]
    fn decision(&self, k: usize, x: &[f64]) -> f64 {
        self.coefficients[k]
            .iter()
            .zip(x)
            .map(|(w, v)| w * v)
            .sum::<f64>()
            + self.intercepts[k]
    }

    fn predict_row(&self, x: &[f64]) -> Result<DiseaseLabel> {
        if x.len() != self.n_features() {
            return Err(DiagnosisError::Classifier(format!(
                "feature row has {} values, model expects {}",
                x.len(),
                self.n_features()
            )));
        }

        if self.is_binary() {
            let idx = if self.decision(0, x) > 0.0 { 1 } else { 0 };
            return Ok(self.classes[idx].clone());
        }

        // First maximum wins on ties
        let mut best = 0;
        let mut best_score = f64::NEG_INFINITY;
        for k in 0..self.coefficients.len() {
            let score = self.decision(k, x);
            if score > best_score {
                best = k;
                best_score = score;
            }
        }
        Ok(self.classes[best].clone())
    }

    fn predict_rows(&self, rows: &[FeatureRow]) -> Result<Vec<DiseaseLabel>> {
        rows.iter().map(|row| self.predict_row(row)).collect()
    }
}

impl StructuredClassifier for LinearClassifier {
    fn predict(&self, rows: &[FeatureRow]) -> Result<Vec<DiseaseLabel>> {
        self.predict_rows(rows)
    }
}

impl TextClassifier for LinearClassifier {
    fn predict(&self, rows: &[FeatureRow]) -> Result<Vec<DiseaseLabel>> {
        self.predict_rows(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn three_class() -> LinearClassifier {
        LinearClassifier::from_json(
            r#"{
                "classes": ["Flu", "Migraine", "Common Cold"],
                "coefficients": [[2.0, 0.5, 0.0], [0.0, 0.0, 3.0], [0.5, 2.0, 0.0]],
                "intercepts": [0.0, -0.5, 0.1]
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn test_multiclass_argmax() {
        let model = three_class();
        let labels = StructuredClassifier::predict(
            &model,
            &[vec![1.0, 0.0, 0.0], vec![0.0, 0.0, 1.0], vec![0.0, 1.0, 0.0]],
        )
        .unwrap();
        assert_eq!(labels, vec!["Flu", "Migraine", "Common Cold"]);
    }

    #[test]
    fn test_binary_single_row() {
        let model = LinearClassifier::new(
            vec!["Healthy".to_string(), "Dengue".to_string()],
            vec![vec![1.0, 1.0]],
            vec![-1.5],
        )
        .unwrap();
        let labels = TextClassifier::predict(&model, &[vec![1.0, 1.0], vec![1.0, 0.0]]).unwrap();
        assert_eq!(labels, vec!["Dengue", "Healthy"]);
    }

    #[test]
    fn test_wrong_width_is_error() {
        let model = three_class();
        let result = StructuredClassifier::predict(&model, &[vec![1.0, 0.0]]);
        assert!(matches!(result, Err(DiagnosisError::Classifier(_))));
    }

    #[test]
    fn test_repeated_prediction_is_deterministic() {
        let model = three_class();
        let row = vec![vec![1.0, 1.0, 1.0]];
        let first = StructuredClassifier::predict(&model, &row).unwrap();
        let second = StructuredClassifier::predict(&model, &row).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_shape_validation() {
        let result = LinearClassifier::new(
            vec!["A".to_string(), "B".to_string(), "C".to_string()],
            vec![vec![1.0], vec![1.0]],
            vec![0.0, 0.0],
        );
        assert!(result.is_err());

        let result = LinearClassifier::new(vec!["A".to_string()], vec![vec![1.0]], vec![]);
        assert!(result.is_err());

        let result = LinearClassifier::from_json(r#"{"classes": [], "coefficients": [], "intercepts": []}"#);
        assert!(result.is_err());
    }
}
