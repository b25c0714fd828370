//! Tracing subscriber setup.

use tracing_subscriber::{fmt, EnvFilter};

use gemwallet_core::error::{Result, WalletError};

/// Install a `fmt` subscriber filtered by `filter` (e.g. `"info"`,
/// `"gemwallet_bridge=debug"`). An empty filter defers to `RUST_LOG`.
/// Calling this again after a subscriber is installed is a no-op.
pub fn init_tracing(filter: &str) -> Result<()> {
    let env_filter = if filter.trim().is_empty() {
        EnvFilter::from_default_env()
    } else {
        EnvFilter::try_new(filter)
            .map_err(|e| WalletError::BadRequest(format!("invalid log filter: {e}")))?
    };

    if fmt().with_env_filter(env_filter).try_init().is_err() {
        tracing::debug!("global tracing subscriber already installed");
    }
    Ok(())
}
