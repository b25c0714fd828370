//! Shared error type across GemWallet crates.

use thiserror::Error;

/// Caller-facing error codes (stable API).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClientCode {
    /// Invalid input / malformed message.
    BadRequest,
    /// Failure reported by the signing/UI collaborator.
    Capability,
    /// Response carried neither a result nor an error.
    EmptyResponse,
    /// No response arrived in time.
    Timeout,
    /// The cross-context channel went away.
    TransportClosed,
    /// Unsupported config version.
    UnsupportedVersion,
    /// Internal failure.
    Internal,
}

impl ClientCode {
    /// String representation used in logs and error payloads.
    pub fn as_str(self) -> &'static str {
        match self {
            ClientCode::BadRequest => "BAD_REQUEST",
            ClientCode::Capability => "CAPABILITY",
            ClientCode::EmptyResponse => "EMPTY_RESPONSE",
            ClientCode::Timeout => "TIMEOUT",
            ClientCode::TransportClosed => "TRANSPORT_CLOSED",
            ClientCode::UnsupportedVersion => "UNSUPPORTED_VERSION",
            ClientCode::Internal => "INTERNAL",
        }
    }
}

/// Shared result type.
pub type Result<T> = std::result::Result<T, WalletError>;

/// Unified error type used by core and bridge.
#[derive(Debug, Error)]
pub enum WalletError {
    #[error("bad request: {0}")]
    BadRequest(String),
    /// Carried verbatim from the response envelope's `error` field.
    #[error("{0}")]
    Capability(String),
    #[error("response carried neither result nor error")]
    EmptyResponse,
    #[error("no response after {0} ms")]
    Timeout(u64),
    #[error("transport closed")]
    TransportClosed,
    #[error("unsupported config version")]
    UnsupportedVersion,
    #[error("internal: {0}")]
    Internal(String),
}

impl WalletError {
    /// Map internal error to a stable client-facing code.
    pub fn client_code(&self) -> ClientCode {
        match self {
            WalletError::BadRequest(_) => ClientCode::BadRequest,
            WalletError::Capability(_) => ClientCode::Capability,
            WalletError::EmptyResponse => ClientCode::EmptyResponse,
            WalletError::Timeout(_) => ClientCode::Timeout,
            WalletError::TransportClosed => ClientCode::TransportClosed,
            WalletError::UnsupportedVersion => ClientCode::UnsupportedVersion,
            WalletError::Internal(_) => ClientCode::Internal,
        }
    }

    /// Shorthand for a required field that normalized to nothing.
    pub fn missing(field: &str) -> Self {
        WalletError::BadRequest(format!("missing or invalid field: {field}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn capability_error_displays_message_verbatim() {
        let e = WalletError::Capability("User rejected".into());
        assert_eq!(e.to_string(), "User rejected");
        assert_eq!(e.client_code().as_str(), "CAPABILITY");
    }

    #[test]
    fn every_variant_has_a_distinct_wire_code() {
        let errors = [
            WalletError::BadRequest("x".into()),
            WalletError::Capability("x".into()),
            WalletError::EmptyResponse,
            WalletError::Timeout(1),
            WalletError::TransportClosed,
            WalletError::UnsupportedVersion,
            WalletError::Internal("x".into()),
        ];
        let codes: Vec<&str> = errors.iter().map(|e| e.client_code().as_str()).collect();
        assert_eq!(
            codes,
            [
                "BAD_REQUEST",
                "CAPABILITY",
                "EMPTY_RESPONSE",
                "TIMEOUT",
                "TRANSPORT_CLOSED",
                "UNSUPPORTED_VERSION",
                "INTERNAL"
            ]
        );
    }
}
