//! GemWallet bridge library entry.
//!
//! This crate wires the cross-context transport, listener registry,
//! capability router, and page-side request API into one stack. The page
//! context owns a [`client::WalletClient`]; the privileged context owns a
//! [`context::ExtensionContext`]. Each context constructs its own
//! [`dispatch::ListenerRegistry`]; nothing here is process-global.

pub mod client;
pub mod config;
pub mod context;
pub mod dispatch;
pub mod pending;
pub mod telemetry;
pub mod transport;
