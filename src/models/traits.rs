//! Capability traits for the fitted artifacts
//!
//! Batches go in and batches come out, matching how the fitted models are
//! called. All implementations must be shareable across threads.

use crate::errors::Result;
use crate::models::types::{DiseaseLabel, FeatureRow, HospitalRecord, RecommendationQuery};

/// Predicts a disease from fixed-order symptom presence rows
pub trait StructuredClassifier: Send + Sync {
    fn predict(&self, rows: &[FeatureRow]) -> Result<Vec<DiseaseLabel>>;
}

/// Turns raw text into the feature rows the text classifier expects
pub trait TextVectorizer: Send + Sync {
    fn transform(&self, texts: &[String]) -> Result<Vec<FeatureRow>>;
}

/// Predicts a disease from vectorized text
pub trait TextClassifier: Send + Sync {
    fn predict(&self, rows: &[FeatureRow]) -> Result<Vec<DiseaseLabel>>;
}

/// Ranks and filters hospitals
pub trait HospitalRecommender: Send + Sync {
    fn recommend(&self, query: &RecommendationQuery) -> Result<Vec<HospitalRecord>>;
}
