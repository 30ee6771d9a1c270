//! Response Normalizer — turns raw completion text into `GeneratedContent`.
//!
//! The model is not schema-constrained for every content type, so the JSON
//! object is cut out of whatever surrounds it, and missing fields default to
//! empty strings. A human reviews the output before use; partial content is
//! more useful to them than an error.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

use crate::errors::AppError;
use crate::generation::content_type::ContentType;

/// Characters of raw completion text kept in a `MalformedResponse` preview.
pub const PREVIEW_CHARS: usize = 200;

/// Validated model output for one request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedContent {
    pub headline: String,
    pub body: String,
    /// Always empty for content types without an Instagram caption.
    #[serde(default)]
    pub instagram_caption: String,
    #[serde(default)]
    pub source: String,
    /// Caller's breaking flag for posts. Never taken from the model.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_breaking: Option<bool>,
}

/// Parses `raw_text` and keeps the fields `content_type` uses.
///
/// `is_breaking` is the caller's toggle; for posts it replaces whatever the
/// model put in `isBreaking`.
pub fn normalize_response(
    raw_text: &str,
    content_type: ContentType,
    is_breaking: bool,
) -> Result<GeneratedContent, AppError> {
    let json_text = extract_json_object(raw_text).ok_or_else(|| AppError::MalformedResponse {
        message: "Completion did not contain a JSON object".to_string(),
        preview: preview(raw_text),
    })?;

    let value: Value = serde_json::from_str(json_text).map_err(|e| AppError::MalformedResponse {
        message: format!("Completion JSON could not be parsed: {e}"),
        preview: preview(raw_text),
    })?;

    let profile = content_type.profile();

    Ok(GeneratedContent {
        headline: field_text(&value, "headline"),
        body: field_text(&value, "body"),
        instagram_caption: if profile.includes_instagram {
            field_text(&value, "instagramCaption")
        } else {
            String::new()
        },
        source: field_text(&value, "source"),
        is_breaking: profile.records_breaking.then_some(is_breaking),
    })
}

/// Slices from the first `{` to the last `}`, inclusive.
pub fn extract_json_object(raw_text: &str) -> Option<&str> {
    let start = raw_text.find('{')?;
    let end = raw_text.rfind('}')?;
    (start < end).then(|| &raw_text[start..=end])
}

/// Reads a field as text. Missing and null become empty; scalars are stringified.
fn field_text(value: &Value, key: &str) -> String {
    match value.get(key) {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(v @ (Value::Number(_) | Value::Bool(_))) => v.to_string(),
        Some(other) => {
            warn!("Ignoring non-text value for field '{key}': {other}");
            String::new()
        }
    }
}

fn preview(raw_text: &str) -> String {
    let mut preview: String = raw_text.chars().take(PREVIEW_CHARS).collect();
    if raw_text.chars().count() > PREVIEW_CHARS {
        preview.push('…');
    }
    preview
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extracts_object_embedded_in_chatter() {
        let raw = r#"Sure! {"headline":"A","body":"B"} Thanks"#;
        let content = normalize_response(raw, ContentType::Story, false).unwrap();
        assert_eq!(content.headline, "A");
        assert_eq!(content.body, "B");
    }

    #[test]
    fn test_extracts_object_from_code_fence() {
        let raw = "```json\n{\"headline\": \"A\", \"body\": \"B\", \"instagramCaption\": \"C\"}\n```";
        let content = normalize_response(raw, ContentType::MarketRecap, false).unwrap();
        assert_eq!(content.instagram_caption, "C");
    }

    #[test]
    fn test_missing_source_defaults_to_empty() {
        let raw = r#"{"headline": "Fed Cuts Rates", "body": "...", "instagramCaption": "..."}"#;
        let content = normalize_response(raw, ContentType::Post, false).unwrap();
        assert_eq!(content.source, "");
    }

    #[test]
    fn test_missing_everything_still_succeeds() {
        let content = normalize_response("{}", ContentType::Post, false).unwrap();
        assert_eq!(content.headline, "");
        assert_eq!(content.body, "");
        assert_eq!(content.instagram_caption, "");
    }

    #[test]
    fn test_post_breaking_flag_overrides_model() {
        let raw = r#"{"isBreaking": false, "headline": "Fed Cuts Rates", "body": "...", "instagramCaption": "..."}"#;
        let content = normalize_response(raw, ContentType::Post, true).unwrap();
        assert_eq!(content.is_breaking, Some(true));
    }

    #[test]
    fn test_story_drops_instagram_caption() {
        let raw = r#"{"headline": "H", "body": "B", "instagramCaption": "x", "source": "Reuters"}"#;
        let content = normalize_response(raw, ContentType::Story, true).unwrap();
        assert_eq!(content.instagram_caption, "");
        assert_eq!(content.source, "Reuters");
        assert_eq!(content.is_breaking, None);
    }

    #[test]
    fn test_market_recap_has_no_breaking_flag() {
        let raw = r#"{"isBreaking": true, "headline": "H", "body": "B", "instagramCaption": "C"}"#;
        let content = normalize_response(raw, ContentType::MarketRecap, true).unwrap();
        assert_eq!(content.is_breaking, None);
    }

    #[test]
    fn test_no_braces_is_malformed_with_preview() {
        let raw = "I'm sorry, I can't help with that.";
        match normalize_response(raw, ContentType::Post, false) {
            Err(AppError::MalformedResponse { preview, .. }) => assert_eq!(preview, raw),
            other => panic!("expected MalformedResponse, got {other:?}"),
        }
    }

    #[test]
    fn test_reversed_braces_is_malformed() {
        let err = normalize_response("} oops {", ContentType::Post, false).unwrap_err();
        assert!(matches!(err, AppError::MalformedResponse { .. }));
    }

    #[test]
    fn test_invalid_json_reports_parser_message() {
        let raw = r#"{"headline": "A", "body": }"#;
        match normalize_response(raw, ContentType::Post, false) {
            Err(AppError::MalformedResponse { message, .. }) => {
                assert!(message.contains("could not be parsed"));
            }
            other => panic!("expected MalformedResponse, got {other:?}"),
        }
    }

    #[test]
    fn test_preview_is_truncated() {
        let raw = "x".repeat(PREVIEW_CHARS * 2);
        match normalize_response(&raw, ContentType::Post, false) {
            Err(AppError::MalformedResponse { preview, .. }) => {
                assert_eq!(preview.chars().count(), PREVIEW_CHARS + 1);
                assert!(preview.ends_with('…'));
            }
            other => panic!("expected MalformedResponse, got {other:?}"),
        }
    }

    #[test]
    fn test_non_string_scalars_are_stringified() {
        let raw = r#"{"headline": 42, "body": null, "source": ["a"]}"#;
        let content = normalize_response(raw, ContentType::Story, false).unwrap();
        assert_eq!(content.headline, "42");
        assert_eq!(content.body, "");
        assert_eq!(content.source, "");
    }
}
