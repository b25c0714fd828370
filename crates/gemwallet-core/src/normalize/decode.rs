//! Outer decode layer and the shared fallback combinator.

use serde::de::DeserializeOwned;
use serde_json::Value;

/// How a raw field arrived.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Raw<'a> {
    /// Missing, `null`, or an empty string.
    Absent,
    /// A native JSON value (object, array, number, bool).
    Structured(&'a Value),
    /// A string that may hold JSON.
    Encoded(&'a str),
}

pub fn classify(input: Option<&Value>) -> Raw<'_> {
    match input {
        None | Some(Value::Null) => Raw::Absent,
        Some(Value::String(s)) if s.trim().is_empty() => Raw::Absent,
        Some(Value::String(s)) => Raw::Encoded(s),
        Some(v) => Raw::Structured(v),
    }
}

/// Run `validate` on the structured value, or on the parse of the encoded
/// string. When parsing or validation of an encoded string fails, defer to
/// `fallback` with the raw text.
pub fn decode_or<T>(
    input: Option<&Value>,
    validate: impl Fn(&Value) -> Option<T>,
    fallback: impl FnOnce(&str) -> Option<T>,
) -> Option<T> {
    match classify(input) {
        Raw::Absent => None,
        Raw::Structured(v) => validate(v),
        Raw::Encoded(s) => match serde_json::from_str::<Value>(s) {
            Ok(parsed) => validate(&parsed).or_else(|| fallback(s)),
            Err(_) => fallback(s),
        },
    }
}

/// [`decode_or`] with "absent" as the fallback.
pub fn decode<T>(input: Option<&Value>, validate: impl Fn(&Value) -> Option<T>) -> Option<T> {
    decode_or(input, validate, |_| None)
}

/// Structural check via serde: `None` when `v` does not fit `T`.
pub(crate) fn typed<T: DeserializeOwned>(v: &Value) -> Option<T> {
    T::deserialize(v).ok()
}
