use std::panic::AssertUnwindSafe;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use dashmap::DashMap;
use futures_util::FutureExt;
use tracing::{debug, trace, warn};

use gemwallet_core::protocol::Envelope;

pub type ListenerId = u64;

/// "Run this when an envelope matching the predicate arrives."
///
/// A listener may answer with an envelope of its own; the owning context
/// decides where replies go.
#[async_trait]
pub trait Listener: Send + Sync {
    fn matches(&self, env: &Envelope) -> bool;
    async fn on_envelope(&self, env: &Envelope) -> Option<Envelope>;
}

/// Closure-backed listener for synchronous handlers.
pub struct FnListener<P, H> {
    predicate: P,
    handler: H,
}

impl<P, H> FnListener<P, H>
where
    P: Fn(&Envelope) -> bool + Send + Sync,
    H: Fn(&Envelope) -> Option<Envelope> + Send + Sync,
{
    pub fn new(predicate: P, handler: H) -> Self {
        Self { predicate, handler }
    }
}

#[async_trait]
impl<P, H> Listener for FnListener<P, H>
where
    P: Fn(&Envelope) -> bool + Send + Sync,
    H: Fn(&Envelope) -> Option<Envelope> + Send + Sync,
{
    fn matches(&self, env: &Envelope) -> bool {
        (self.predicate)(env)
    }

    async fn on_envelope(&self, env: &Envelope) -> Option<Envelope> {
        (self.handler)(env)
    }
}

#[derive(Clone)]
struct Entry {
    listener: Arc<dyn Listener>,
    once: bool,
}

/// Per-context listener registry.
///
/// Registration and removal are safe while dispatches are in flight. Each
/// dispatch works on a snapshot taken when the envelope arrived.
#[derive(Default)]
pub struct ListenerRegistry {
    entries: DashMap<ListenerId, Entry>,
    next_id: AtomicU64,
}

impl ListenerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&self, listener: Arc<dyn Listener>) -> ListenerId {
        self.insert(listener, false)
    }

    /// Register a listener that removes itself after its first match.
    pub fn register_once(&self, listener: Arc<dyn Listener>) -> ListenerId {
        self.insert(listener, true)
    }

    /// Returns `false` when the id was already gone.
    pub fn unregister(&self, id: ListenerId) -> bool {
        self.entries.remove(&id).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Teardown: drop every listener.
    pub fn clear(&self) {
        self.entries.clear();
    }

    fn insert(&self, listener: Arc<dyn Listener>, once: bool) -> ListenerId {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed) + 1;
        self.entries.insert(id, Entry { listener, once });
        id
    }

    /// Offer `env` to every matching listener, in registration order.
    ///
    /// Envelopes nobody matches are dropped. A panicking listener is logged
    /// and skipped; the remaining listeners still run.
    pub async fn dispatch(&self, env: &Envelope) -> Vec<Envelope> {
        let mut matched: Vec<(ListenerId, Entry)> = self
            .entries
            .iter()
            .filter(|e| predicate_holds(e.value().listener.as_ref(), env))
            .map(|e| (*e.key(), e.value().clone()))
            .collect();

        if matched.is_empty() {
            trace!(msg_type = %env.msg_type, message_id = env.message_id, "no listener matched");
            return Vec::new();
        }
        matched.sort_by_key(|(id, _)| *id);

        let mut replies = Vec::new();
        for (id, entry) in matched {
            // A concurrent delivery may already have consumed it.
            if entry.once && self.entries.remove(&id).is_none() {
                debug!(
                    listener_id = id,
                    message_id = env.message_id,
                    "once-listener already fired"
                );
                continue;
            }
            match AssertUnwindSafe(entry.listener.on_envelope(env))
                .catch_unwind()
                .await
            {
                Ok(Some(reply)) => replies.push(reply),
                Ok(None) => {}
                Err(_) => warn!(
                    listener_id = id,
                    msg_type = %env.msg_type,
                    message_id = env.message_id,
                    "listener panicked"
                ),
            }
        }
        replies
    }
}

fn predicate_holds(listener: &dyn Listener, env: &Envelope) -> bool {
    std::panic::catch_unwind(AssertUnwindSafe(|| listener.matches(env))).unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use gemwallet_core::protocol::{APP, REQUEST_SOURCE};
    use std::sync::atomic::AtomicUsize;

    fn env(msg_type: &str, id: u64) -> Envelope {
        Envelope::new(APP, REQUEST_SOURCE, msg_type, id, None)
    }

    fn counting(msg_type: &'static str, hits: Arc<AtomicUsize>) -> Arc<dyn Listener> {
        Arc::new(FnListener::new(
            move |e: &Envelope| e.msg_type == msg_type,
            move |_: &Envelope| {
                hits.fetch_add(1, Ordering::SeqCst);
                None
            },
        ))
    }

    #[tokio::test]
    async fn unmatched_envelopes_are_ignored() {
        let reg = ListenerRegistry::new();
        let hits = Arc::new(AtomicUsize::new(0));
        reg.register(counting("A", hits.clone()));

        assert!(reg.dispatch(&env("B", 1)).await.is_empty());
        assert_eq!(hits.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn persistent_listener_fires_per_envelope() {
        let reg = ListenerRegistry::new();
        let hits = Arc::new(AtomicUsize::new(0));
        reg.register(counting("A", hits.clone()));

        reg.dispatch(&env("A", 1)).await;
        reg.dispatch(&env("A", 2)).await;
        assert_eq!(hits.load(Ordering::SeqCst), 2);
        assert_eq!(reg.len(), 1);
    }

    #[tokio::test]
    async fn once_listener_fires_once_and_self_removes() {
        let reg = ListenerRegistry::new();
        let hits = Arc::new(AtomicUsize::new(0));
        reg.register_once(counting("A", hits.clone()));

        reg.dispatch(&env("A", 1)).await;
        reg.dispatch(&env("A", 1)).await;
        assert_eq!(hits.load(Ordering::SeqCst), 1);
        assert!(reg.is_empty());
    }

    #[tokio::test]
    async fn panicking_listener_does_not_stop_the_others() {
        let reg = ListenerRegistry::new();
        reg.register(Arc::new(FnListener::new(
            |_: &Envelope| true,
            |_: &Envelope| -> Option<Envelope> { panic!("boom") },
        )));
        reg.register(Arc::new(FnListener::new(
            |_: &Envelope| true,
            |e: &Envelope| Some(e.clone()),
        )));

        let replies = reg.dispatch(&env("A", 9)).await;
        assert_eq!(replies.len(), 1);
        assert_eq!(replies[0].message_id, 9);
    }

    #[tokio::test]
    async fn unregister_and_clear() {
        let reg = ListenerRegistry::new();
        let hits = Arc::new(AtomicUsize::new(0));
        let a = reg.register(counting("A", hits.clone()));
        reg.register(counting("B", hits.clone()));

        assert!(reg.unregister(a));
        assert!(!reg.unregister(a));
        reg.dispatch(&env("A", 1)).await;
        assert_eq!(hits.load(Ordering::SeqCst), 0);

        reg.clear();
        assert!(reg.is_empty());
    }
}
