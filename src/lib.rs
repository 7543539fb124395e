//! symptomcheck - Symptom extraction and dispatch
//!
//! Routes symptom input to pre-trained predictors and hospital queries to a
//! recommender.
//!
//! # Architecture
//!
//! - **engine**: the [`DiagnosisEngine`] context object and its three operations
//! - **vocabulary**: symptom vocabulary, presence vectors, text extraction
//! - **models**: capability traits plus JSON-backed fitted models
//! - **translate**: translators for non-English input
//! - **artifacts**: locating and loading the fitted artifacts

pub mod errors;
pub mod vocabulary;
pub mod localization;
pub mod models;
pub mod translate;
pub mod artifacts;
pub mod engine;

// Re-export commonly used types
pub use errors::{DiagnosisError, Result};
pub use engine::{DiagnosisEngine, PreparedText};
pub use translate::{Language, Translator};
pub use vocabulary::{SymptomPresence, SymptomVocabulary};

// Command-line surface and session telemetry
pub mod cli;
pub mod telemetry;
