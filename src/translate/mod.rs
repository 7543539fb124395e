//! Translation collaborators
//!
//! Free-text prediction runs on English. Input in the other supported
//! language goes through a [`Translator`] first.

pub mod google;
pub mod phrase_table;

pub use google::GoogleTranslator;
pub use phrase_table::PhraseTableTranslator;

use crate::cli::config::TranslatorConfig;
use crate::errors::{DiagnosisError, Result};
use crate::localization::LocalizationTable;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

/// Supported input languages
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum,
)]
pub enum Language {
    #[default]
    #[serde(rename = "en")]
    #[value(name = "en")]
    English,
    #[serde(rename = "ml")]
    #[value(name = "ml")]
    Malayalam,
}

impl Language {
    /// ISO 639-1 tag
    pub fn code(&self) -> &'static str {
        match self {
            Language::English => "en",
            Language::Malayalam => "ml",
        }
    }

    pub fn is_english(&self) -> bool {
        matches!(self, Language::English)
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Language {
    type Err = DiagnosisError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "en" | "english" => Ok(Language::English),
            "ml" | "malayalam" => Ok(Language::Malayalam),
            other => Err(DiagnosisError::ConfigError(format!(
                "Unsupported language tag: {}",
                other
            ))),
        }
    }
}

/// Translates text between two languages
#[async_trait]
pub trait Translator: Send + Sync {
    async fn translate(&self, text: &str, source: Language, target: Language) -> Result<String>;
}

/// Build the configured translator: the phrase table when offline,
/// otherwise the remote service
pub fn from_config(config: &TranslatorConfig) -> Result<Box<dyn Translator>> {
    if config.offline {
        return Ok(Box::new(PhraseTableTranslator::new(LocalizationTable::default())));
    }

    let translator =
        GoogleTranslator::with_config(&config.base_url, Duration::from_secs(config.timeout_sec))?;
    Ok(Box::new(translator))
}
