use serde::Deserialize;

use gemwallet_core::error::{Result, WalletError};
use gemwallet_core::protocol::{APP, REQUEST_SOURCE, RESPONSE_SOURCE};

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BridgeConfig {
    pub version: u32,

    #[serde(default)]
    pub bridge: BridgeSection,

    #[serde(default)]
    pub log: LogSection,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            version: 1,
            bridge: BridgeSection::default(),
            log: LogSection::default(),
        }
    }
}

impl BridgeConfig {
    pub fn validate(&self) -> Result<()> {
        if self.version != 1 {
            return Err(WalletError::UnsupportedVersion);
        }
        self.bridge.validate()
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BridgeSection {
    /// Extension identity tag stamped on every envelope.
    #[serde(default = "default_app")]
    pub app: String,

    #[serde(default = "default_request_source")]
    pub request_source: String,

    #[serde(default = "default_response_source")]
    pub response_source: String,

    /// Page-side wait for a response; 0 waits forever.
    #[serde(default = "default_request_timeout_ms")]
    pub request_timeout_ms: u64,

    /// Frames buffered per direction of a context pair.
    #[serde(default = "default_channel_capacity")]
    pub channel_capacity: usize,

    /// Route deprecated (pre-V3) request kinds.
    #[serde(default = "default_accept_deprecated")]
    pub accept_deprecated: bool,
}

impl Default for BridgeSection {
    fn default() -> Self {
        Self {
            app: default_app(),
            request_source: default_request_source(),
            response_source: default_response_source(),
            request_timeout_ms: default_request_timeout_ms(),
            channel_capacity: default_channel_capacity(),
            accept_deprecated: default_accept_deprecated(),
        }
    }
}

impl BridgeSection {
    pub fn validate(&self) -> Result<()> {
        if self.app.is_empty() {
            return Err(WalletError::BadRequest("bridge.app must not be empty".into()));
        }
        if self.request_source.is_empty() || self.response_source.is_empty() {
            return Err(WalletError::BadRequest(
                "bridge.request_source and bridge.response_source must not be empty".into(),
            ));
        }
        if self.request_source == self.response_source {
            return Err(WalletError::BadRequest(
                "bridge.request_source must differ from bridge.response_source".into(),
            ));
        }
        if !(1..=65536).contains(&self.channel_capacity) {
            return Err(WalletError::BadRequest(
                "bridge.channel_capacity must be between 1 and 65536".into(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LogSection {
    #[serde(default = "default_log_filter")]
    pub filter: String,
}

impl Default for LogSection {
    fn default() -> Self {
        Self {
            filter: default_log_filter(),
        }
    }
}

fn default_app() -> String {
    APP.into()
}
fn default_request_source() -> String {
    REQUEST_SOURCE.into()
}
fn default_response_source() -> String {
    RESPONSE_SOURCE.into()
}
fn default_request_timeout_ms() -> u64 {
    300_000
}
fn default_channel_capacity() -> usize {
    256
}
fn default_accept_deprecated() -> bool {
    true
}
fn default_log_filter() -> String {
    "info".into()
}
