//! Artifact store for symptomcheck
//!
//! Locates the five fitted artifacts in one directory, reports which are
//! missing, and loads them into an [`ArtifactSet`]. Nothing is downloaded.

use crate::cli::config::{ArtifactsConfig, Config};
use crate::errors::{DiagnosisError, Result};
use crate::models::{
    HospitalRecommender, HospitalTable, LinearClassifier, StructuredClassifier, TextClassifier,
    TextVectorizer, TfidfVectorizer,
};
use crate::vocabulary::SymptomVocabulary;
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// The five artifacts a diagnosis engine needs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArtifactKind {
    StructuredModel,
    Vocabulary,
    TextModel,
    TextVectorizer,
    Recommender,
}

impl ArtifactKind {
    pub const ALL: [ArtifactKind; 5] = [
        ArtifactKind::StructuredModel,
        ArtifactKind::Vocabulary,
        ArtifactKind::TextModel,
        ArtifactKind::TextVectorizer,
        ArtifactKind::Recommender,
    ];

    pub fn description(&self) -> &'static str {
        match self {
            ArtifactKind::StructuredModel => "structured symptom classifier",
            ArtifactKind::Vocabulary => "symptom vocabulary",
            ArtifactKind::TextModel => "text disease classifier",
            ArtifactKind::TextVectorizer => "text vectorizer",
            ArtifactKind::Recommender => "hospital recommender",
        }
    }
}

impl fmt::Display for ArtifactKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.description())
    }
}

/// Artifact check result
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArtifactStatus {
    Ready,
    Missing(Vec<String>),
}

impl ArtifactStatus {
    pub fn is_ready(&self) -> bool {
        matches!(self, ArtifactStatus::Ready)
    }
}

/// Loaded, read-only artifacts
pub struct ArtifactSet {
    pub vocabulary: SymptomVocabulary,
    pub structured_classifier: Box<dyn StructuredClassifier>,
    pub text_vectorizer: Box<dyn TextVectorizer>,
    pub text_classifier: Box<dyn TextClassifier>,
    pub recommender: Box<dyn HospitalRecommender>,
}

impl fmt::Debug for ArtifactSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ArtifactSet")
            .field("vocabulary", &self.vocabulary.len())
            .finish_non_exhaustive()
    }
}

/// Artifact directory plus configured file names
#[derive(Debug, Clone)]
pub struct ArtifactStore {
    dir: PathBuf,
    files: ArtifactsConfig,
}

impl ArtifactStore {
    pub fn new(dir: impl Into<PathBuf>, files: ArtifactsConfig) -> Self {
        Self {
            dir: dir.into(),
            files,
        }
    }

    /// Store for the configured directory and file names
    pub fn from_config(config: &Config) -> Self {
        Self::new(config.artifacts_dir(), config.artifacts.clone())
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn file_name(&self, kind: ArtifactKind) -> &str {
        match kind {
            ArtifactKind::StructuredModel => &self.files.structured_model,
            ArtifactKind::Vocabulary => &self.files.vocabulary,
            ArtifactKind::TextModel => &self.files.text_model,
            ArtifactKind::TextVectorizer => &self.files.text_vectorizer,
            ArtifactKind::Recommender => &self.files.recommender,
        }
    }

    pub fn path(&self, kind: ArtifactKind) -> PathBuf {
        self.dir.join(self.file_name(kind))
    }

    /// Report which artifact files are absent
    pub fn check(&self) -> ArtifactStatus {
        let missing: Vec<String> = ArtifactKind::ALL
            .iter()
            .filter(|kind| !self.path(**kind).is_file())
            .map(|kind| self.file_name(*kind).to_string())
            .collect();

        if missing.is_empty() {
            ArtifactStatus::Ready
        } else {
            ArtifactStatus::Missing(missing)
        }
    }

    fn read(&self, kind: ArtifactKind) -> Result<String> {
        std::fs::read_to_string(self.path(kind)).map_err(|e| DiagnosisError::Artifact {
            name: self.file_name(kind).to_string(),
            reason: e.to_string(),
        })
    }

    fn parse<T>(&self, kind: ArtifactKind, parse: impl FnOnce(&str) -> Result<T>) -> Result<T> {
        let contents = self.read(kind)?;
        parse(&contents).map_err(|e| DiagnosisError::Artifact {
            name: self.file_name(kind).to_string(),
            reason: e.to_string(),
        })
    }

    /// Load all five artifacts; the first failure is fatal
    pub fn load(&self) -> Result<ArtifactSet> {
        if let ArtifactStatus::Missing(missing) = self.check() {
            warn!(dir = %self.dir.display(), missing = ?missing, "Artifacts missing");
            return Err(DiagnosisError::Artifact {
                name: missing.join(", "),
                reason: format!("not found in {}", self.dir.display()),
            });
        }

        let structured = self.parse(ArtifactKind::StructuredModel, LinearClassifier::from_json)?;
        let vocabulary: SymptomVocabulary = self.parse(ArtifactKind::Vocabulary, |s| {
            Ok(serde_json::from_str(s)?)
        })?;
        let text_model = self.parse(ArtifactKind::TextModel, LinearClassifier::from_json)?;
        let vectorizer = self.parse(ArtifactKind::TextVectorizer, TfidfVectorizer::from_json)?;
        let recommender = self.parse(ArtifactKind::Recommender, HospitalTable::from_json)?;

        if structured.n_features() != vocabulary.len() {
            return Err(DiagnosisError::Artifact {
                name: self.file_name(ArtifactKind::StructuredModel).to_string(),
                reason: format!(
                    "model expects {} features but the vocabulary has {} symptoms",
                    structured.n_features(),
                    vocabulary.len()
                ),
            });
        }

        info!(
            dir = %self.dir.display(),
            symptoms = vocabulary.len(),
            hospitals = recommender.len(),
            "Artifacts loaded"
        );

        Ok(ArtifactSet {
            vocabulary,
            structured_classifier: Box::new(structured),
            text_vectorizer: Box::new(vectorizer),
            text_classifier: Box::new(text_model),
            recommender: Box::new(recommender),
        })
    }

    /// Display instructions for providing missing artifacts
    pub fn show_missing_instructions(&self, missing: &[String]) {
        eprintln!("\n❌ Missing artifacts in {}:", self.dir.display());
        for name in missing {
            eprintln!("   • {}", name);
        }
        eprintln!("\nExport the fitted models as JSON into that directory, or point to");
        eprintln!("another location with:");
        eprintln!("   symptomcheck --artifacts-dir <DIR> <COMMAND>");
        eprintln!();
    }
}

/// Exit code for missing artifacts
pub const EXIT_CODE_SETUP_NEEDED: i32 = 2;

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn write_artifacts(dir: &Path) {
        fs::write(dir.join("symptom_columns.json"), r#"["fever","cough","headache"]"#).unwrap();
        fs::write(
            dir.join("symptom_model.json"),
            r#"{"classes":["Flu","Migraine"],"coefficients":[[-1.0,-1.0,2.0]],"intercepts":[0.0]}"#,
        )
        .unwrap();
        fs::write(
            dir.join("nlp_vectorizer.json"),
            r#"{"vocabulary":{"cough":0,"fever":1,"headache":2},"idf":[1.0,1.0,1.0]}"#,
        )
        .unwrap();
        fs::write(
            dir.join("nlp_disease_model.json"),
            r#"{"classes":["Flu","Migraine"],"coefficients":[[-1.0,-1.0,2.0]],"intercepts":[0.0]}"#,
        )
        .unwrap();
        fs::write(
            dir.join("hospital_recommender.json"),
            r#"[{"name":"A","specialty":"Neurology","district":"Kollam","cost":"Free/Government"}]"#,
        )
        .unwrap();
    }

    #[test]
    fn test_check_reports_missing() {
        let dir = tempfile::tempdir().unwrap();
        let store = ArtifactStore::new(dir.path(), ArtifactsConfig::default());
        match store.check() {
            ArtifactStatus::Missing(missing) => assert_eq!(missing.len(), 5),
            ArtifactStatus::Ready => panic!("empty directory reported ready"),
        }
    }

    #[test]
    fn test_check_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        write_artifacts(dir.path());
        let store = ArtifactStore::new(dir.path(), ArtifactsConfig::default());
        assert_eq!(store.check(), ArtifactStatus::Ready);
        assert_eq!(store.check(), ArtifactStatus::Ready);
    }

    #[test]
    fn test_load_all() {
        let dir = tempfile::tempdir().unwrap();
        write_artifacts(dir.path());
        let store = ArtifactStore::new(dir.path(), ArtifactsConfig::default());
        let set = store.load().unwrap();
        assert_eq!(set.vocabulary.names(), &["fever", "cough", "headache"]);
        let labels = set.structured_classifier.predict(&[vec![0.0, 0.0, 1.0]]).unwrap();
        assert_eq!(labels, vec!["Migraine"]);
    }

    #[test]
    fn test_load_reports_corrupt_file() {
        let dir = tempfile::tempdir().unwrap();
        write_artifacts(dir.path());
        fs::write(dir.path().join("nlp_vectorizer.json"), "not json").unwrap();
        let store = ArtifactStore::new(dir.path(), ArtifactsConfig::default());
        match store.load() {
            Err(DiagnosisError::Artifact { name, .. }) => assert_eq!(name, "nlp_vectorizer.json"),
            other => panic!("expected artifact error, got {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn test_load_rejects_width_mismatch() {
        let dir = tempfile::tempdir().unwrap();
        write_artifacts(dir.path());
        fs::write(dir.path().join("symptom_columns.json"), r#"["fever","cough"]"#).unwrap();
        let store = ArtifactStore::new(dir.path(), ArtifactsConfig::default());
        assert!(matches!(store.load(), Err(DiagnosisError::Artifact { .. })));
    }

    #[test]
    fn test_custom_file_names() {
        let files = ArtifactsConfig {
            vocabulary: "columns.json".to_string(),
            ..ArtifactsConfig::default()
        };
        let store = ArtifactStore::new("/tmp/models", files);
        assert_eq!(store.path(ArtifactKind::Vocabulary), PathBuf::from("/tmp/models/columns.json"));
    }

    #[test]
    fn test_exit_code_constant() {
        assert_eq!(EXIT_CODE_SETUP_NEEDED, 2);
    }
}
