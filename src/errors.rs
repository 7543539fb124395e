//! Error types for symptomcheck
//!
//! Every failure of an artifact, the translator or a model surfaces to the
//! caller unchanged. Nothing in the crate retries or falls back.

use thiserror::Error;

/// Main error type for symptom extraction and dispatch
#[derive(Error, Debug)]
pub enum DiagnosisError {
    /// Artifact missing or not deserializable
    #[error("Artifact '{name}' unavailable: {reason}")]
    Artifact { name: String, reason: String },

    /// Translation service errors
    #[error("Translation failed: {0}")]
    Translation(String),

    /// Language pair the translator cannot handle
    #[error("Unsupported translation from '{source_lang}' to '{target_lang}'")]
    UnsupportedTranslation {
        source_lang: String,
        target_lang: String,
    },

    /// Vectorizer errors
    #[error("Vectorizer error: {0}")]
    Vectorizer(String),

    /// Classifier errors (feature width mismatch, empty model)
    #[error("Classifier error: {0}")]
    Classifier(String),

    /// Recommender errors
    #[error("Recommender error: {0}")]
    Recommender(String),

    /// Classifier returned no label for a single-row batch
    #[error("Classifier returned an empty prediction batch")]
    EmptyPrediction,

    /// Configuration errors
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// HTTP client errors
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    /// Serialization errors
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    /// I/O errors
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Generic errors with context
    #[error("Error: {0}")]
    Generic(String),
}

/// Result type alias for diagnosis operations
pub type Result<T> = std::result::Result<T, DiagnosisError>;

/// Convert anyhow errors to DiagnosisError
impl From<anyhow::Error> for DiagnosisError {
    fn from(err: anyhow::Error) -> Self {
        DiagnosisError::Generic(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_artifact_error_display() {
        let err = DiagnosisError::Artifact {
            name: "symptom_columns.json".to_string(),
            reason: "file not found".to_string(),
        };
        assert!(err.to_string().contains("symptom_columns.json"));
        assert!(err.to_string().contains("file not found"));
    }

    #[test]
    fn test_unsupported_translation_display() {
        let err = DiagnosisError::UnsupportedTranslation {
            source_lang: "en".to_string(),
            target_lang: "ml".to_string(),
        };
        assert!(err.to_string().contains("'en'"));
        assert!(err.to_string().contains("'ml'"));
    }

    #[test]
    fn test_from_anyhow() {
        let err: DiagnosisError = anyhow::anyhow!("boom").into();
        assert!(matches!(err, DiagnosisError::Generic(ref m) if m == "boom"));
    }
}
