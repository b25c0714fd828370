//! Response payloads.
//!
//! Current responses carry `{ result?, error? }`. Deprecated responses are
//! flat: result fields sit at the top level next to an optional `error`,
//! and a few fields use older names. Both shapes converge on [`Reply`].

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{Result, WalletError};
use crate::protocol::catalogue::{ResponseKind, Version};

/// (legacy name, current name)
const LEGACY_ALIASES: &[(&str, &str)] = &[("publicAddress", "address"), ("nfts", "account_nfts")];

/// Canonical response: a result value or an error message.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Reply {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl Reply {
    pub fn ok(result: Value) -> Self {
        Self {
            result: Some(result),
            error: None,
        }
    }

    pub fn err(msg: impl Into<String>) -> Self {
        Self {
            result: None,
            error: Some(msg.into()),
        }
    }

    /// Normalize a response payload of either generation.
    pub fn from_payload(kind: ResponseKind, payload: Option<&Value>) -> Self {
        let Some(Value::Object(obj)) = payload else {
            return Self::default();
        };
        let error = obj.get("error").and_then(error_message);

        let result = match kind.version {
            Version::Current => obj.get("result").filter(|v| !v.is_null()).cloned(),
            Version::Deprecated => {
                let mut flat = Map::new();
                for (k, v) in obj.iter().filter(|(k, _)| k.as_str() != "error") {
                    flat.insert(rename(k, true).to_string(), v.clone());
                }
                if flat.values().all(Value::is_null) {
                    None
                } else {
                    Some(Value::Object(flat))
                }
            }
        };

        Self { result, error }
    }

    /// Encode in the wire shape of `kind`'s generation.
    pub fn to_payload(&self, kind: ResponseKind) -> Value {
        match kind.version {
            Version::Current => serde_json::to_value(self).unwrap_or(Value::Null),
            Version::Deprecated => {
                let mut flat = Map::new();
                if let Some(Value::Object(result)) = &self.result {
                    for (k, v) in result {
                        flat.insert(rename(k, false).to_string(), v.clone());
                    }
                }
                if let Some(e) = &self.error {
                    flat.insert("error".into(), Value::String(e.clone()));
                }
                Value::Object(flat)
            }
        }
    }

    /// Error wins over result; neither is `EmptyResponse`.
    pub fn into_result(self) -> Result<Value> {
        if let Some(e) = self.error {
            return Err(WalletError::Capability(e));
        }
        self.result.ok_or(WalletError::EmptyResponse)
    }
}

fn error_message(v: &Value) -> Option<String> {
    match v {
        Value::Null => None,
        Value::String(s) if s.is_empty() => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

fn rename(key: &str, to_current: bool) -> &str {
    LEGACY_ALIASES
        .iter()
        .find_map(|&(legacy, current)| match to_current {
            true if key == legacy => Some(current),
            false if key == current => Some(legacy),
            _ => None,
        })
        .unwrap_or(key)
}
