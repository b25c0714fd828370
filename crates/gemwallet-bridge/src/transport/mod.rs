//! Cross-context transport.
//!
//! - `codec`: envelope <-> text frame.
//! - `channel`: an in-process pair of ports, one per execution context.
//!
//! The channel carries raw text so that unrelated traffic sharing the same
//! medium reaches the receiver too; filtering is the registry's job.

pub mod channel;
pub mod codec;

pub use channel::{pair, ContextPort, Outbound};
