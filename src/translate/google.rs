//! Google Translate client
//!
//! Uses the public `translate_a/single` endpoint:
//! - Endpoint: GET {base_url}/translate_a/single
//! - Query: client=gtx, sl, tl, dt=t, q
//! - Response: nested arrays, translated segments at `[0][i][0]`

use crate::errors::{DiagnosisError, Result};
use crate::translate::{Language, Translator};
use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

/// Default translation host
pub const DEFAULT_TRANSLATE_URL: &str = "https://translate.googleapis.com";

/// Request timeout (10 seconds)
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// HTTP translator backed by Google Translate
#[derive(Debug, Clone)]
pub struct GoogleTranslator {
    client: Client,
    base_url: String,
}

impl GoogleTranslator {
    /// Create a translator with default settings
    pub fn new() -> Result<Self> {
        Self::with_config(DEFAULT_TRANSLATE_URL, REQUEST_TIMEOUT)
    }

    /// Create a translator with a custom host and timeout
    pub fn with_config(base_url: &str, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(DiagnosisError::HttpError)?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Get base URL
    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

/// Concatenate the translated segments of a response body
pub(crate) fn parse_response(body: &Value) -> Result<String> {
    let segments = body
        .get(0)
        .and_then(Value::as_array)
        .ok_or_else(|| DiagnosisError::Translation("response has no segment list".to_string()))?;

    let mut translated = String::new();
    for segment in segments {
        if let Some(text) = segment.get(0).and_then(Value::as_str) {
            translated.push_str(text);
        }
    }

    if translated.is_empty() {
        return Err(DiagnosisError::Translation(
            "response contained no translated text".to_string(),
        ));
    }

    Ok(translated)
}

#[async_trait]
impl Translator for GoogleTranslator {
    async fn translate(&self, text: &str, source: Language, target: Language) -> Result<String> {
        let url = format!("{}/translate_a/single", self.base_url);
        debug!(source = %source, target = %target, chars = text.chars().count(), "Requesting translation");

        let response = self
            .client
            .get(&url)
            .query(&[
                ("client", "gtx"),
                ("sl", source.code()),
                ("tl", target.code()),
                ("dt", "t"),
                ("q", text),
            ])
            .send()
            .await
            .map_err(|e| DiagnosisError::Translation(format!("Failed to send request: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(DiagnosisError::Translation(format!(
                "HTTP {}: {}",
                status, error_text
            )));
        }

        let body: Value = response
            .json()
            .await
            .map_err(|e| DiagnosisError::Translation(format!("Failed to parse response: {}", e)))?;

        parse_response(&body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_translator_creation() {
        let translator = GoogleTranslator::new().unwrap();
        assert_eq!(translator.base_url(), DEFAULT_TRANSLATE_URL);
    }

    #[test]
    fn test_trailing_slash_trimmed() {
        let translator =
            GoogleTranslator::with_config("http://localhost:8080/", Duration::from_secs(1)).unwrap();
        assert_eq!(translator.base_url(), "http://localhost:8080");
    }

    #[test]
    fn test_parse_multi_segment_response() {
        let body = json!([
            [
                ["I have a fever ", "എനിക്ക് പനി ", null, null, 10],
                ["and a cough", "കൂടാതെ ചുമയുണ്ട്", null, null, 10]
            ],
            null,
            "ml"
        ]);
        assert_eq!(parse_response(&body).unwrap(), "I have a fever and a cough");
    }

    #[test]
    fn test_parse_malformed_response() {
        assert!(parse_response(&json!({"error": "quota"})).is_err());
        assert!(parse_response(&json!([[]])).is_err());
    }

    #[tokio::test]
    async fn test_unreachable_host_is_translation_error() {
        let translator =
            GoogleTranslator::with_config("http://127.0.0.1:9", Duration::from_millis(500)).unwrap();
        let result = translator
            .translate("പനി", Language::Malayalam, Language::English)
            .await;
        assert!(matches!(result, Err(DiagnosisError::Translation(_))));
    }

    #[tokio::test]
    #[ignore] // Requires network access
    async fn test_translate_integration() {
        let translator = GoogleTranslator::new().unwrap();
        let text = translator
            .translate("പനി", Language::Malayalam, Language::English)
            .await
            .unwrap();
        assert!(text.to_lowercase().contains("fever"));
    }
}
