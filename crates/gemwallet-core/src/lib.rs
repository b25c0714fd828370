//! GemWallet core: transport-agnostic protocol primitives, the canonical
//! request model, and the legacy payload normalizer.
//!
//! This crate defines the wire-level contracts shared by the page-side API
//! and the privileged extension context. It carries no runtime dependencies
//! so it can be reused on either side of the bridge.
//!
//! # Defensive guarantees
//! Panics, `unwrap`, and `expect` are compile-denied here
//! (`#![deny(clippy::panic, clippy::unwrap_used, clippy::expect_used)]`).
//! Malformed legacy fields degrade to "absent" inside the normalizer; only
//! request assembly surfaces a `WalletError`.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]
#![cfg_attr(test, allow(clippy::panic))]

pub mod error;
pub mod model;
pub mod normalize;
pub mod protocol;

/// Shared result type.
pub use error::{Result, WalletError};
