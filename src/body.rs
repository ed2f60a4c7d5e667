//! JSON body validation and formatting

use serde_json::Value;

use crate::error::ValidationError;

/// Result of checking the body text
#[derive(Clone, Debug, PartialEq)]
pub enum BodyStatus {
    /// Empty or whitespace-only; no body
    Empty,
    Valid(Value),
    /// Parser diagnostic, verbatim
    Invalid(String),
}

impl BodyStatus {
    pub fn into_value(self) -> Option<Value> {
        match self {
            BodyStatus::Valid(value) => Some(value),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<ValidationError> {
        match self {
            BodyStatus::Invalid(message) => Some(ValidationError::BodyParse(message.clone())),
            _ => None,
        }
    }
}

pub fn validate(text: &str) -> BodyStatus {
    if text.trim().is_empty() {
        return BodyStatus::Empty;
    }
    match serde_json::from_str::<Value>(text) {
        Ok(value) => BodyStatus::Valid(value),
        Err(e) => BodyStatus::Invalid(e.to_string()),
    }
}

/// Pretty-printed (two-space) re-serialization of a valid body.
///
/// Returns `None` when the text is empty or invalid, in which case the
/// caller must leave the text untouched.
pub fn format(text: &str) -> Option<String> {
    let value = validate(text).into_value()?;
    serde_json::to_string_pretty(&value).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_whitespace_is_empty() {
        assert_eq!(validate(""), BodyStatus::Empty);
        assert_eq!(validate("  \n\t "), BodyStatus::Empty);
    }

    #[test]
    fn test_valid_json() {
        assert_eq!(validate(r#"{"a":1}"#), BodyStatus::Valid(json!({"a": 1})));
        assert_eq!(validate("[1, 2]"), BodyStatus::Valid(json!([1, 2])));
    }

    #[test]
    fn test_invalid_json_keeps_parser_message() {
        let status = validate("{bad json");
        let expected = serde_json::from_str::<Value>("{bad json").unwrap_err().to_string();
        assert_eq!(status, BodyStatus::Invalid(expected));
        assert!(matches!(status.error(), Some(ValidationError::BodyParse(_))));
    }

    #[test]
    fn test_format_round_trips() {
        let original = r#"{"name":"John","tags":["a","b"],"nested":{"x":null}}"#;
        let formatted = format(original).unwrap();
        assert!(formatted.contains("\n  \"name\": \"John\""));
        assert_eq!(
            serde_json::from_str::<Value>(&formatted).unwrap(),
            serde_json::from_str::<Value>(original).unwrap()
        );
    }

    #[test]
    fn test_format_preserves_key_order() {
        let formatted = format(r#"{"z":1,"a":2}"#).unwrap();
        assert!(formatted.find("\"z\"").unwrap() < formatted.find("\"a\"").unwrap());
    }

    #[test]
    fn test_format_is_disabled_unless_valid() {
        assert_eq!(format(""), None);
        assert_eq!(format("{oops"), None);
    }
}
