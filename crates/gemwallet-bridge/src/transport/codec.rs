//! Envelope codec for the transport layer.

use gemwallet_core::error::{Result, WalletError};
use gemwallet_core::protocol::Envelope;

pub fn encode(env: &Envelope) -> Result<String> {
    serde_json::to_string(env)
        .map_err(|e| WalletError::Internal(format!("envelope encode failed: {e}")))
}

/// Decode one text frame. Frames that are not envelopes are `BadRequest`;
/// the receiver decides whether that is worth more than a trace.
pub fn decode(frame: &str) -> Result<Envelope> {
    serde_json::from_str(frame)
        .map_err(|e| WalletError::BadRequest(format!("invalid envelope json: {e}")))
}
