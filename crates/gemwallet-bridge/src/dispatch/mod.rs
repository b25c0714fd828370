//! Listener registry and capability routing.
//!
//! Re-exports the registry, listener trait, and capability handler trait so
//! downstream consumers can depend on this module directly.

pub mod registry;
pub mod router;

pub use registry::{FnListener, Listener, ListenerId, ListenerRegistry};
pub use router::{CapabilityHandler, CapabilityListener, HandlerCtx, NO_WALLET_SELECTED};
