//! Google Translate public endpoint

use async_trait::async_trait;
use serde_json::Value;

use super::TranslationProvider;
use crate::context::Language;
use crate::{Error, Result};

const TRANSLATE_URL: &str = "https://translate.googleapis.com/translate_a/single";

/// Translation client for the keyless Google Translate endpoint
pub struct GoogleTranslate {
    client: reqwest::Client,
}

impl Default for GoogleTranslate {
    fn default() -> Self {
        Self::new()
    }
}

impl GoogleTranslate {
    /// Create a new client
    #[must_use]
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }
}

/// Join the translated segments of a `translate_a/single` response
///
/// The body is a nested array whose first element lists
/// `[translated, original, ...]` segments.
fn parse_translation(body: &Value) -> Result<String> {
    let segments = body
        .get(0)
        .and_then(Value::as_array)
        .ok_or_else(|| Error::Translation("unexpected response shape".to_string()))?;

    let text: String = segments
        .iter()
        .filter_map(|segment| segment.get(0).and_then(Value::as_str))
        .collect();

    if text.is_empty() {
        return Err(Error::Translation("empty translation".to_string()));
    }

    Ok(text)
}

#[async_trait(?Send)]
impl TranslationProvider for GoogleTranslate {
    async fn translate(&self, text: &str, source: Language, dest: Language) -> Result<String> {
        tracing::debug!(text, source = %source, dest = %dest, "translating");

        let response = self
            .client
            .get(TRANSLATE_URL)
            .query(&[
                ("client", "gtx"),
                ("sl", source.code()),
                ("tl", dest.code()),
                ("dt", "t"),
                ("q", text),
            ])
            .send()
            .await?;

        let response = response
            .error_for_status()
            .map_err(|e| Error::Translation(e.to_string()))?;

        let body: Value = response.json().await?;
        parse_translation(&body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_joins_segments() {
        let body = serde_json::json!([
            [["Hello. ", "Привет. ", null, null, 10], ["How are you?", "Как дела?", null, null, 10]],
            null,
            "ru"
        ]);
        assert_eq!(parse_translation(&body).unwrap(), "Hello. How are you?");
    }

    #[test]
    fn test_parse_rejects_unexpected_shape() {
        let body = serde_json::json!({"error": "bad request"});
        assert!(matches!(parse_translation(&body), Err(Error::Translation(_))));
    }
}
