//! Offline translator over the localization table

use crate::errors::{DiagnosisError, Result};
use crate::localization::LocalizationTable;
use crate::translate::{Language, Translator};
use async_trait::async_trait;

/// Substitutes known Malayalam symptom phrases with their English names.
/// Words outside the table are left as they are.
#[derive(Debug, Clone)]
pub struct PhraseTableTranslator {
    table: LocalizationTable,
}

impl PhraseTableTranslator {
    pub fn new(table: LocalizationTable) -> Self {
        Self { table }
    }
}

#[async_trait]
impl Translator for PhraseTableTranslator {
    async fn translate(&self, text: &str, source: Language, target: Language) -> Result<String> {
        match (source, target) {
            (Language::Malayalam, Language::English) => Ok(self.table.substitute(text)),
            (s, t) if s == t => Ok(text.to_string()),
            (s, t) => Err(DiagnosisError::UnsupportedTranslation {
                source_lang: s.code().to_string(),
                target_lang: t.code().to_string(),
            }),
        }
    }
}
