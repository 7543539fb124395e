//! Configuration management for symptomcheck
//!
//! Provides TOML-based configuration with defaults and validation.
//! Location: ~/.symptomcheck/config.toml

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use crate::errors::{DiagnosisError, Result};
use crate::models::DEFAULT_TOP_N;
use crate::translate::google::DEFAULT_TRANSLATE_URL;

/// Complete configuration for symptomcheck
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub artifacts: ArtifactsConfig,
    #[serde(default)]
    pub translator: TranslatorConfig,
    #[serde(default)]
    pub recommender: RecommenderConfig,
    #[serde(default)]
    pub telemetry: TelemetryConfig,
}

/// Artifact directory and file names
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArtifactsConfig {
    pub dir: String,
    pub structured_model: String,
    pub vocabulary: String,
    pub text_model: String,
    pub text_vectorizer: String,
    pub recommender: String,
}

/// Translation service configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TranslatorConfig {
    pub base_url: String,
    pub timeout_sec: u64,
    /// Use the built-in phrase table instead of the remote service
    pub offline: bool,
}

/// Recommendation defaults
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecommenderConfig {
    pub default_top_n: usize,
}

/// Telemetry display configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TelemetryConfig {
    pub default_verbosity: String,
    pub color_output: bool,
}

impl Default for ArtifactsConfig {
    fn default() -> Self {
        Self {
            dir: "~/.symptomcheck/artifacts".to_string(),
            structured_model: "symptom_model.json".to_string(),
            vocabulary: "symptom_columns.json".to_string(),
            text_model: "nlp_disease_model.json".to_string(),
            text_vectorizer: "nlp_vectorizer.json".to_string(),
            recommender: "hospital_recommender.json".to_string(),
        }
    }
}

impl Default for TranslatorConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_TRANSLATE_URL.to_string(),
            timeout_sec: 10,
            offline: false,
        }
    }
}

impl Default for RecommenderConfig {
    fn default() -> Self {
        Self {
            default_top_n: DEFAULT_TOP_N,
        }
    }
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            default_verbosity: "normal".to_string(),
            color_output: true,
        }
    }
}

impl ArtifactsConfig {
    /// File names in load order
    pub fn file_names(&self) -> [&str; 5] {
        [
            self.structured_model.as_str(),
            self.vocabulary.as_str(),
            self.text_model.as_str(),
            self.text_vectorizer.as_str(),
            self.recommender.as_str(),
        ]
    }
}

impl Config {
    /// Load configuration from file or use defaults
    pub fn load(path: Option<PathBuf>) -> Result<Self> {
        if let Some(config_path) = path {
            Self::load_from_file(&config_path)
        } else {
            Self::load_default()
        }
    }

    /// Load configuration from specific file
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| DiagnosisError::ConfigError(format!("Failed to read config: {}", e)))?;

        let config: Config = toml::from_str(&contents)
            .map_err(|e| DiagnosisError::ConfigError(format!("Failed to parse config: {}", e)))?;

        config.validate()?;
        Ok(config)
    }

    /// Load default configuration from standard location or use built-in defaults
    pub fn load_default() -> Result<Self> {
        if let Some(config_path) = Self::default_path() {
            if config_path.exists() {
                return Self::load_from_file(&config_path);
            }
        }

        Ok(Config::default())
    }

    /// Standard configuration file location
    pub fn default_path() -> Option<PathBuf> {
        dirs::home_dir().map(|home| home.join(".symptomcheck").join("config.toml"))
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if self.translator.timeout_sec == 0 {
            return Err(DiagnosisError::ConfigError(
                "timeout_sec must be greater than 0".to_string()
            ));
        }

        if self.recommender.default_top_n == 0 {
            return Err(DiagnosisError::ConfigError(
                "default_top_n must be greater than 0".to_string()
            ));
        }

        if self.artifacts.file_names().iter().any(|name| name.trim().is_empty()) {
            return Err(DiagnosisError::ConfigError(
                "artifact file names must not be empty".to_string()
            ));
        }

        match self.telemetry.default_verbosity.as_str() {
            "quiet" | "normal" | "verbose" | "very_verbose" => {}
            _ => return Err(DiagnosisError::ConfigError(
                format!("Invalid verbosity level: {}", self.telemetry.default_verbosity)
            )),
        }

        Ok(())
    }

    /// Save configuration to file
    pub fn save(&self, path: &Path) -> Result<()> {
        let contents = toml::to_string_pretty(self)
            .map_err(|e| DiagnosisError::ConfigError(format!("Failed to serialize config: {}", e)))?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| DiagnosisError::ConfigError(format!("Failed to create config dir: {}", e)))?;
        }

        std::fs::write(path, contents)
            .map_err(|e| DiagnosisError::ConfigError(format!("Failed to write config: {}", e)))?;

        Ok(())
    }

    /// Expand tilde in paths
    pub fn expand_path(path: &str) -> PathBuf {
        if let Some(rest) = path.strip_prefix("~/") {
            if let Some(home) = dirs::home_dir() {
                return home.join(rest);
            }
        }
        PathBuf::from(path)
    }

    /// Get artifact directory path
    pub fn artifacts_dir(&self) -> PathBuf {
        Self::expand_path(&self.artifacts.dir)
    }
}
