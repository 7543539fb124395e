//! Symptom extraction and dispatch
//!
//! [`DiagnosisEngine`] holds the loaded artifacts and the translator and
//! routes each request to the matching predictor:
//! - Structured presence maps become a vocabulary-ordered feature row
//! - Free text is translated if needed, reduced to its known symptoms and
//!   classified
//! - Recommendation queries go to the recommender untouched

use crate::artifacts::ArtifactSet;
use crate::errors::{DiagnosisError, Result};
use crate::models::{
    DiseaseLabel, HospitalRecommender, HospitalRecord, RecommendationQuery, StructuredClassifier,
    TextClassifier, TextVectorizer,
};
use crate::translate::{Language, Translator};
use crate::vocabulary::{SymptomPresence, SymptomVocabulary};
use tracing::debug;

/// Text ready for vectorization, with what was found on the way
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreparedText {
    /// Input after translation to English
    pub english: String,
    /// Known symptoms in vocabulary order
    pub symptoms: Vec<String>,
    /// What the vectorizer receives: sorted symptoms joined by spaces, or
    /// `english` unchanged when no symptom matched
    pub canonical: String,
}

impl PreparedText {
    pub fn has_symptoms(&self) -> bool {
        !self.symptoms.is_empty()
    }
}

/// Read-only prediction context
pub struct DiagnosisEngine {
    vocabulary: SymptomVocabulary,
    structured_classifier: Box<dyn StructuredClassifier>,
    text_vectorizer: Box<dyn TextVectorizer>,
    text_classifier: Box<dyn TextClassifier>,
    recommender: Box<dyn HospitalRecommender>,
    translator: Box<dyn Translator>,
}

impl DiagnosisEngine {
    pub fn new(artifacts: ArtifactSet, translator: Box<dyn Translator>) -> Self {
        Self {
            vocabulary: artifacts.vocabulary,
            structured_classifier: artifacts.structured_classifier,
            text_vectorizer: artifacts.text_vectorizer,
            text_classifier: artifacts.text_classifier,
            recommender: artifacts.recommender,
            translator,
        }
    }

    pub fn vocabulary(&self) -> &SymptomVocabulary {
        &self.vocabulary
    }

    /// Predict a disease from symptom presence flags
    pub fn predict_from_structured_input(&self, presence: &SymptomPresence) -> Result<DiseaseLabel> {
        let ignored = self.unknown_symptoms(presence);
        if !ignored.is_empty() {
            debug!(ignored = ?ignored, "Symptoms outside the vocabulary are ignored");
        }

        let row = self.vocabulary.presence_vector(presence);
        let labels = self.structured_classifier.predict(&[row])?;
        first_label(labels)
    }

    /// Presence keys the vocabulary does not know, sorted
    pub fn unknown_symptoms<'a>(&self, presence: &'a SymptomPresence) -> Vec<&'a str> {
        let mut unknown: Vec<&str> = presence
            .keys()
            .map(String::as_str)
            .filter(|name| !self.vocabulary.contains(name))
            .collect();
        unknown.sort_unstable();
        unknown
    }

    /// Translate (if needed), extract symptoms and canonicalize
    pub async fn prepare_text(&self, text: &str, language: Language) -> Result<PreparedText> {
        let english = if language.is_english() {
            text.to_string()
        } else {
            debug!(source = %language, "Translating input to English");
            self.translator
                .translate(text, language, Language::English)
                .await?
        };

        let symptoms = self.vocabulary.extract(&english);
        debug!(count = symptoms.len(), "Extracted known symptoms");

        let canonical = self
            .vocabulary
            .canonicalize(&english)
            .unwrap_or_else(|| english.clone());

        Ok(PreparedText {
            english,
            symptoms,
            canonical,
        })
    }

    /// Predict a disease from free text in English or Malayalam
    pub async fn predict_from_text(&self, text: &str, language: Language) -> Result<DiseaseLabel> {
        let prepared = self.prepare_text(text, language).await?;
        self.classify_prepared(&prepared)
    }

    /// Vectorize and classify text produced by [`Self::prepare_text`]
    pub fn classify_prepared(&self, prepared: &PreparedText) -> Result<DiseaseLabel> {
        let features = self
            .text_vectorizer
            .transform(std::slice::from_ref(&prepared.canonical))?;
        let labels = self.text_classifier.predict(&features)?;
        first_label(labels)
    }

    /// Forward a query to the hospital recommender
    pub fn recommend(&self, query: &RecommendationQuery) -> Result<Vec<HospitalRecord>> {
        self.recommender.recommend(query)
    }
}

fn first_label(labels: Vec<DiseaseLabel>) -> Result<DiseaseLabel> {
    labels.into_iter().next().ok_or(DiagnosisError::EmptyPrediction)
}
