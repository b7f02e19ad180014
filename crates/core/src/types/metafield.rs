//! Product metafield values.

use core::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Errors that can occur when decoding a [`MetafieldValue::Wrapped`] payload.
///
/// These never reach callers of the facet engine: a failed decode falls back
/// to [`MetafieldValue::Raw`].
#[derive(thiserror::Error, Debug)]
pub enum MetafieldDecodeError {
    /// The raw string is not valid JSON.
    #[error("metafield value is not JSON: {0}")]
    Json(#[from] serde_json::Error),
    /// The JSON is valid but not an object.
    #[error("metafield JSON is not an object")]
    NotAnObject,
    /// The JSON object has no `value` member.
    #[error("metafield JSON object has no `value` member")]
    MissingValue,
}

/// A metafield value as stored upstream.
///
/// Shopify hands metafield values back as strings. Some of them (measurements,
/// ratings) are JSON objects of the form `{"value": ..., "unit": ...}`; the
/// display value is then the nested `value`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MetafieldValue {
    /// Plain string value.
    Raw(String),
    /// JSON object carrying a nested `value` member.
    Wrapped {
        /// String form of the nested `value`.
        value: String,
    },
}

impl MetafieldValue {
    /// Decode a raw metafield string, falling back to [`Self::Raw`] when the
    /// string is not a JSON object with a `value` member.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        Self::decode_wrapped(raw).unwrap_or_else(|_| Self::Raw(raw.to_owned()))
    }

    /// Strictly decode a JSON-wrapped metafield value.
    ///
    /// # Errors
    ///
    /// Returns an error if the input is not JSON, is not an object, or has
    /// no `value` member.
    pub fn decode_wrapped(raw: &str) -> Result<Self, MetafieldDecodeError> {
        let parsed: Value = serde_json::from_str(raw)?;
        let Value::Object(mut map) = parsed else {
            return Err(MetafieldDecodeError::NotAnObject);
        };
        let inner = map
            .remove("value")
            .ok_or(MetafieldDecodeError::MissingValue)?;

        let value = match inner {
            Value::String(s) => s,
            other => other.to_string(),
        };

        Ok(Self::Wrapped { value })
    }

    /// The value used for facet display and filter matching.
    #[must_use]
    pub fn display(&self) -> &str {
        match self {
            Self::Raw(s) | Self::Wrapped { value: s } => s,
        }
    }
}

impl fmt::Display for MetafieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display())
    }
}

/// A key/value annotation attached to a product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Metafield {
    /// Metafield key, used directly as the facet key.
    pub key: String,
    /// Decoded value.
    pub value: MetafieldValue,
}

impl Metafield {
    /// Build a metafield from its key and the raw upstream string.
    #[must_use]
    pub fn new(key: impl Into<String>, raw_value: &str) -> Self {
        Self {
            key: key.into(),
            value: MetafieldValue::parse(raw_value),
        }
    }

    /// Shorthand for `self.value.display()`.
    #[must_use]
    pub fn display_value(&self) -> &str {
        self.value.display()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_string_is_raw() {
        let value = MetafieldValue::parse("2RS");
        assert_eq!(value, MetafieldValue::Raw("2RS".to_string()));
        assert_eq!(value.display(), "2RS");
    }

    #[test]
    fn test_wrapped_string_value() {
        let value = MetafieldValue::parse(r#"{"value":"25","unit":"MILLIMETERS"}"#);
        assert_eq!(
            value,
            MetafieldValue::Wrapped {
                value: "25".to_string()
            }
        );
        assert_eq!(value.display(), "25");
    }

    #[test]
    fn test_wrapped_numeric_value_uses_string_form() {
        let value = MetafieldValue::parse(r#"{"value":12.5,"unit":"MILLIMETERS"}"#);
        assert_eq!(value.display(), "12.5");
    }

    #[test]
    fn test_malformed_json_falls_back_to_raw() {
        let value = MetafieldValue::parse(r#"{"value": "#);
        assert_eq!(value.display(), r#"{"value": "#);
        assert!(matches!(value, MetafieldValue::Raw(_)));
    }

    #[test]
    fn test_json_scalar_is_raw() {
        // Valid JSON, but not an object.
        let value = MetafieldValue::parse("42");
        assert_eq!(value, MetafieldValue::Raw("42".to_string()));
    }

    #[test]
    fn test_object_without_value_is_raw() {
        let raw = r#"{"unit":"MILLIMETERS"}"#;
        assert!(matches!(
            MetafieldValue::decode_wrapped(raw),
            Err(MetafieldDecodeError::MissingValue)
        ));
        assert_eq!(MetafieldValue::parse(raw).display(), raw);
    }

    #[test]
    fn test_decode_wrapped_rejects_array() {
        assert!(matches!(
            MetafieldValue::decode_wrapped("[1,2]"),
            Err(MetafieldDecodeError::NotAnObject)
        ));
    }
}
