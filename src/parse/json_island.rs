use serde_json::{Value, json};
use thiserror::Error;

pub const NO_JSON_FOUND: &str = "no JSON object found";
pub const INVALID_JSON: &str = "invalid JSON";

/// A reply the extractor could not turn into a JSON object.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{reason}")]
pub struct Unparsed {
    pub reason: &'static str,
    pub raw_text: String,
}

impl Unparsed {
    fn new(reason: &'static str, text: &str) -> Self {
        Self {
            reason,
            raw_text: text.to_string(),
        }
    }

    /// `{"error": reason, "raw_text": text}`
    pub fn into_value(self) -> Value {
        json!({
            "error": self.reason,
            "raw_text": self.raw_text,
        })
    }
}

/// Parse the span from the first `{` to the last `}` as JSON.
///
/// Best effort: whatever sits outside the braces is ignored, and nothing
/// inside is validated beyond being JSON.
pub fn extract_json_island(text: &str) -> Result<Value, Unparsed> {
    let (Some(start), Some(end)) = (text.find('{'), text.rfind('}')) else {
        return Err(Unparsed::new(NO_JSON_FOUND, text));
    };
    if end < start {
        return Err(Unparsed::new(NO_JSON_FOUND, text));
    }

    serde_json::from_str(&text[start..=end]).map_err(|e| {
        tracing::debug!(error = %e, "model reply holds malformed JSON");
        Unparsed::new(INVALID_JSON, text)
    })
}

/// Like [`extract_json_island`], but failures come back as an error-tagged object.
pub fn extract_json_object(text: &str) -> Value {
    extract_json_island(text).unwrap_or_else(Unparsed::into_value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_object() {
        let value = extract_json_object(r#"{"is_dog": true, "disease": "healthy"}"#);
        assert_eq!(value, json!({"is_dog": true, "disease": "healthy"}));
    }

    #[test]
    fn object_wrapped_in_prose_and_fences() {
        let text = "Here is the analysis:\n```json\n{\"is_dog\": false, \"message\": \"no dog\"}\n```\nHope it helps.";
        let value = extract_json_object(text);
        assert_eq!(value, json!({"is_dog": false, "message": "no dog"}));
    }

    #[test]
    fn nested_object_keeps_all_keys() {
        let original = json!({
            "is_dog": true,
            "disease": "dermatitis",
            "info": {
                "symptoms": ["redness", "hair loss"],
                "recommendations": "keep the area clean",
                "vet_visit_required": true,
                "severity": "medium"
            }
        });
        let text = format!("Result follows. {} End of result.", original);
        assert_eq!(extract_json_object(&text), original);
    }

    #[test]
    fn no_braces_is_error_tagged_with_verbatim_text() {
        let text = "I could not analyse this image.";
        let value = extract_json_object(text);
        assert_eq!(value["error"], NO_JSON_FOUND);
        assert_eq!(value["raw_text"], text);
    }

    #[test]
    fn reversed_braces_is_error_tagged() {
        let text = "} nothing here {";
        let err = extract_json_island(text).unwrap_err();
        assert_eq!(err.reason, NO_JSON_FOUND);
        assert_eq!(err.raw_text, text);
    }

    #[test]
    fn malformed_json_is_error_tagged() {
        let text = "{\"is_dog\": true, \"disease\": }";
        let value = extract_json_object(text);
        assert_eq!(value["error"], INVALID_JSON);
        assert_eq!(value["raw_text"], text);
    }

    #[test]
    fn two_objects_span_is_invalid() {
        // First `{` to last `}` covers both objects, which is not one JSON value.
        let text = "{\"a\": 1} and {\"b\": 2}";
        assert_eq!(extract_json_island(text).unwrap_err().reason, INVALID_JSON);
    }

    #[test]
    fn braces_inside_strings_are_fine() {
        let value = extract_json_object(r#"note: {"message": "use {curly} braces"}"#);
        assert_eq!(value["message"], "use {curly} braces");
    }

    #[test]
    fn multibyte_text_around_object() {
        let value = extract_json_object("결과: {\"disease\": \"건강함\"} 끝");
        assert_eq!(value["disease"], "건강함");
    }
}
