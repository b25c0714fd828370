//! Top-level facade crate for GemWallet.
//!
//! Re-exports the protocol primitives and the bridge runtime so users can depend on a single crate.

pub mod core {
    pub use gemwallet_core::*;
}

pub mod bridge {
    pub use gemwallet_bridge::*;
}
