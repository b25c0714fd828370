//! Protocol modules (envelope + type catalogue + replies).
//!
//! - `envelope`: the tagged JSON message exchanged across context boundaries.
//! - `catalogue`: the closed set of request/response kinds and how each
//!   deprecated wire name upgrades to its current counterpart.
//! - `reply`: the response payload, normalized across both wire shapes.
//!
//! Parsing here never panics: unknown `type` strings resolve to `None` so
//! callers can drop unrelated traffic.

pub mod catalogue;
pub mod envelope;
pub mod reply;

pub use catalogue::{Capability, RequestKind, ResponseKind, Version};
pub use envelope::{Envelope, APP, REQUEST_SOURCE, RESPONSE_SOURCE};
pub use reply::Reply;
