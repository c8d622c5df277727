//! Global identifier codec
//!
//! A global identifier addresses one row of one row type. On the wire it is
//! an opaque token:
//!
//! ```text
//! base64( json([type_tag, key_0, key_1, ...]) )
//! ```
//!
//! e.g. `["Widget",42]` encodes to `WyJXaWRnZXQiLDQyXQ==`.
//!
//! The codec knows nothing about the schema: resolving the tag and checking
//! the key arity happen in the resolver. Decoding only ever yields a flat
//! list of [`Value`]s.

use crate::value::Value;
use base64::alphabet;
use base64::engine::general_purpose::{GeneralPurpose, GeneralPurposeConfig, STANDARD};
use base64::engine::DecodePaddingMode;
use base64::Engine;
use std::fmt;

/// Standard alphabet, accepting tokens with or without trailing padding.
const LENIENT: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// URL-safe alphabet (`-`, `_`), same padding rules.
const LENIENT_URL_SAFE: GeneralPurpose = GeneralPurpose::new(
    &alphabet::URL_SAFE,
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// Codec errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IdentifierError {
    /// Token could not be decoded into `[tag, ...keys]`
    #[error("malformed identifier: {reason}")]
    Malformed {
        /// Human-readable description of the failure
        reason: String,
    },

    /// Key value cannot survive the JSON round-trip
    #[error("key value {index} is not a finite number")]
    NonFiniteKey {
        /// Position of the offending key value
        index: usize,
    },
}

impl IdentifierError {
    /// Create a malformed identifier error
    pub fn malformed(reason: impl Into<String>) -> Self {
        IdentifierError::Malformed {
            reason: reason.into(),
        }
    }
}

/// A decoded identifier: type tag plus ordered key values
#[derive(Debug, Clone, PartialEq)]
pub struct GlobalIdentifier {
    type_tag: String,
    key_values: Vec<Value>,
}

impl GlobalIdentifier {
    /// Create an identifier from its parts
    pub fn new(type_tag: impl Into<String>, key_values: Vec<Value>) -> Self {
        Self {
            type_tag: type_tag.into(),
            key_values,
        }
    }

    /// Type tag naming the row type
    pub fn type_tag(&self) -> &str {
        &self.type_tag
    }

    /// Key values in primary key order
    pub fn key_values(&self) -> &[Value] {
        &self.key_values
    }

    /// Split into `(type_tag, key_values)`
    pub fn into_parts(self) -> (String, Vec<Value>) {
        (self.type_tag, self.key_values)
    }

    /// Encode into the opaque wire token
    pub fn encode(&self) -> Result<String, IdentifierError> {
        encode(&self.type_tag, &self.key_values)
    }
}

impl fmt::Display for GlobalIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(", self.type_tag)?;
        for (i, v) in self.key_values.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            match v.to_text() {
                Some(text) => write!(f, "{}", text)?,
                None => write!(f, "null")?,
            }
        }
        write!(f, ")")
    }
}

/// Encode a type tag and key tuple into an opaque token.
///
/// Deterministic: the same inputs always produce the same token (object keys
/// are serialized in sorted order).
///
/// # Errors
///
/// Returns [`IdentifierError::NonFiniteKey`] if a key value contains a NaN or
/// infinite float.
pub fn encode(type_tag: &str, key_values: &[Value]) -> Result<String, IdentifierError> {
    let mut items = Vec::with_capacity(key_values.len() + 1);
    items.push(serde_json::Value::String(type_tag.to_string()));
    for (index, value) in key_values.iter().enumerate() {
        if value.has_non_finite() {
            return Err(IdentifierError::NonFiniteKey { index });
        }
        items.push(serde_json::Value::from(value.clone()));
    }
    let payload = serde_json::Value::Array(items).to_string();
    Ok(STANDARD.encode(payload.as_bytes()))
}

/// Decode an opaque token into a [`GlobalIdentifier`].
///
/// Tokens in the URL-safe alphabet are accepted as well.
///
/// # Errors
///
/// Returns [`IdentifierError::Malformed`] when the token is not base64, the
/// payload is not a JSON array, the array is empty, or its first element is
/// not a string.
pub fn decode(token: &str) -> Result<GlobalIdentifier, IdentifierError> {
    let token = token.trim();
    let bytes = LENIENT
        .decode(token)
        .or_else(|e| LENIENT_URL_SAFE.decode(token).map_err(|_| e))
        .map_err(|e| IdentifierError::malformed(format!("invalid base64: {}", e)))?;
    let payload: serde_json::Value = serde_json::from_slice(&bytes)
        .map_err(|e| IdentifierError::malformed(format!("invalid payload: {}", e)))?;

    let items = match payload {
        serde_json::Value::Array(items) => items,
        other => {
            return Err(IdentifierError::malformed(format!(
                "expected an array, got {}",
                json_kind(&other)
            )))
        }
    };

    let mut items = items.into_iter();
    let type_tag = match items.next() {
        Some(serde_json::Value::String(tag)) => tag,
        Some(other) => {
            return Err(IdentifierError::malformed(format!(
                "type tag must be a string, got {}",
                json_kind(&other)
            )))
        }
        None => return Err(IdentifierError::malformed("missing type tag")),
    };

    Ok(GlobalIdentifier {
        type_tag,
        key_values: items.map(Value::from).collect(),
    })
}

fn json_kind(v: &serde_json::Value) -> &'static str {
    match v {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}
