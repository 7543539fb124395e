//! Prediction and recommendation models
//!
//! This module provides the capabilities the dispatch layer delegates to:
//! - Structured classification over symptom presence vectors
//! - Text vectorization and classification
//! - Hospital recommendation
//!
//! Each capability is a narrow trait so tests can substitute stubs. The
//! artifact-backed implementations read JSON exports of fitted models.

pub mod linear;
pub mod recommender;
pub mod tfidf;
pub mod traits;
pub mod types;

// Re-export key types for convenience
pub use linear::LinearClassifier;
pub use recommender::HospitalTable;
pub use tfidf::TfidfVectorizer;
pub use traits::{HospitalRecommender, StructuredClassifier, TextClassifier, TextVectorizer};
pub use types::{DiseaseLabel, FeatureRow, HospitalRecord, RecommendationQuery, DEFAULT_TOP_N};
