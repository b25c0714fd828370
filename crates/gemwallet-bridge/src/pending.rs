//! Page-side pending-call table.
//!
//! Each in-flight call owns one entry keyed by its `messageId`, holding the
//! single completion channel for that call. Completing removes the entry,
//! so a call resolves at most once no matter how often its response is
//! delivered.

use std::sync::atomic::{AtomicU64, Ordering};

use dashmap::DashMap;
use tokio::sync::oneshot;
use tracing::debug;

use gemwallet_core::protocol::{Capability, Reply};

struct Pending {
    capability: Capability,
    tx: oneshot::Sender<Reply>,
}

pub struct PendingCalls {
    calls: DashMap<u64, Pending>,
    next_id: AtomicU64,
}

impl Default for PendingCalls {
    fn default() -> Self {
        Self::new()
    }
}

impl PendingCalls {
    pub fn new() -> Self {
        Self {
            calls: DashMap::new(),
            next_id: AtomicU64::new(1),
        }
    }

    /// Allocate a fresh `messageId` and its completion channel.
    pub fn register(&self, capability: Capability) -> (u64, oneshot::Receiver<Reply>) {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let (tx, rx) = oneshot::channel();
        self.calls.insert(id, Pending { capability, tx });
        (id, rx)
    }

    /// Resolve call `id` if it is still pending for `capability`.
    ///
    /// Returns `false` for unknown ids (duplicates, late responses after a
    /// timeout) and for responses of the wrong capability; those leave the
    /// table untouched.
    pub fn complete(&self, id: u64, capability: Capability, reply: Reply) -> bool {
        let Some((_, pending)) = self.calls.remove_if(&id, |_, p| p.capability == capability)
        else {
            debug!(
                message_id = id,
                capability = capability.as_str(),
                "no pending call for response"
            );
            return false;
        };
        // The caller may have given up already; that is not an error here.
        let _ = pending.tx.send(reply);
        true
    }

    /// Forget call `id` without resolving it.
    pub fn cancel(&self, id: u64) -> bool {
        self.calls.remove(&id).is_some()
    }

    /// Drop every pending call. Their receivers observe a closed channel.
    pub fn close(&self) {
        self.calls.clear();
    }

    pub fn len(&self) -> usize {
        self.calls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.calls.is_empty()
    }
}
