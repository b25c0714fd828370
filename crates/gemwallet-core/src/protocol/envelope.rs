//! Cross-context envelope (JSON).
//!
//! `payload` is kept as a `serde_json::Value`: deprecated callers encode
//! fields as JSON strings, so typing happens later in the normalizer.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Identity tag of the extension.
pub const APP: &str = "gem-wallet";
/// Discriminator for page -> extension traffic.
pub const REQUEST_SOURCE: &str = "GEM_WALLET_MSG_REQUEST";
/// Discriminator for extension -> page traffic.
pub const RESPONSE_SOURCE: &str = "GEM_WALLET_MSG_RESPONSE";

/// One message on the bridge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Envelope {
    /// Extension identity tag.
    pub app: String,
    /// Request/response kind (field name is `type` in JSON).
    #[serde(rename = "type")]
    pub msg_type: String,
    /// Protocol discriminator.
    pub source: String,
    /// Correlation id shared by a request and its response.
    pub message_id: u64,
    /// Capability-specific payload.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payload: Option<Value>,
}

impl Envelope {
    pub fn new(
        app: impl Into<String>,
        source: impl Into<String>,
        msg_type: impl Into<String>,
        message_id: u64,
        payload: Option<Value>,
    ) -> Self {
        Self {
            app: app.into(),
            msg_type: msg_type.into(),
            source: source.into(),
            message_id,
            payload,
        }
    }

    /// `true` when both discriminators match.
    pub fn is_from(&self, app: &str, source: &str) -> bool {
        self.app == app && self.source == source
    }
}
