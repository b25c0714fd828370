//! Privileged-side memory of request ids already taken.
//!
//! The transport may deliver a request more than once. Only the first
//! delivery reaches a handler: a repeat that arrives while the first is
//! still running is dropped, and a later one gets the stored responses.

use std::sync::atomic::{AtomicU64, Ordering};

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;

use gemwallet_core::protocol::Envelope;

/// `(app, source, messageId)`
type RequestKey = (String, String, u64);

struct Slot {
    seq: u64,
    replies: Option<Vec<Envelope>>,
}

/// What to do with an inbound request.
#[derive(Debug, PartialEq)]
pub enum Admission {
    /// First delivery: dispatch it, then [`RequestLedger::settle`].
    Run,
    /// Same request is being handled right now.
    InFlight,
    /// Already answered with these responses.
    Replay(Vec<Envelope>),
}

/// Bounded table of seen requests. Once it holds more than `capacity`
/// entries, the older half is forgotten.
pub struct RequestLedger {
    slots: DashMap<RequestKey, Slot>,
    next_seq: AtomicU64,
    capacity: usize,
}

impl RequestLedger {
    pub fn new(capacity: usize) -> Self {
        Self {
            slots: DashMap::new(),
            next_seq: AtomicU64::new(0),
            capacity: capacity.max(1),
        }
    }

    pub fn admit(&self, env: &Envelope) -> Admission {
        let seq = match self.slots.entry(key(env)) {
            Entry::Occupied(e) => {
                return match &e.get().replies {
                    Some(replies) => Admission::Replay(replies.clone()),
                    None => Admission::InFlight,
                };
            }
            Entry::Vacant(v) => {
                let seq = self.next_seq.fetch_add(1, Ordering::Relaxed);
                v.insert(Slot { seq, replies: None });
                seq
            }
        };
        self.evict(seq);
        Admission::Run
    }

    /// Store the responses produced for an admitted request.
    pub fn settle(&self, env: &Envelope, replies: &[Envelope]) {
        if let Some(mut slot) = self.slots.get_mut(&key(env)) {
            slot.replies = Some(replies.to_vec());
        }
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    fn evict(&self, newest: u64) {
        if self.slots.len() <= self.capacity {
            return;
        }
        let floor = newest.saturating_sub((self.capacity / 2) as u64);
        self.slots.retain(|_, slot| slot.seq >= floor);
    }
}

fn key(env: &Envelope) -> RequestKey {
    (env.app.clone(), env.source.clone(), env.message_id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use gemwallet_core::protocol::{APP, REQUEST_SOURCE, RESPONSE_SOURCE};
    use serde_json::json;

    fn request(id: u64) -> Envelope {
        Envelope::new(APP, REQUEST_SOURCE, "REQUEST_SEND_PAYMENT/V3", id, None)
    }

    fn answer(id: u64) -> Envelope {
        Envelope::new(
            APP,
            RESPONSE_SOURCE,
            "RECEIVE_SEND_PAYMENT/V3",
            id,
            Some(json!({"result": {"hash": "H"}})),
        )
    }

    #[test]
    fn repeat_is_in_flight_then_replayed() {
        let ledger = RequestLedger::new(8);
        assert_eq!(ledger.admit(&request(7)), Admission::Run);
        assert_eq!(ledger.admit(&request(7)), Admission::InFlight);

        ledger.settle(&request(7), &[answer(7)]);
        assert_eq!(ledger.admit(&request(7)), Admission::Replay(vec![answer(7)]));
        assert_eq!(ledger.len(), 1);
    }

    #[test]
    fn key_includes_app_and_source() {
        let ledger = RequestLedger::new(8);
        assert_eq!(ledger.admit(&request(1)), Admission::Run);

        let mut other_app = request(1);
        other_app.app = "other-extension".into();
        assert_eq!(ledger.admit(&other_app), Admission::Run);

        let mut other_source = request(1);
        other_source.source = "OTHER_SOURCE".into();
        assert_eq!(ledger.admit(&other_source), Admission::Run);
    }

    #[test]
    fn oldest_ids_are_forgotten_past_capacity() {
        let ledger = RequestLedger::new(4);
        for id in 0..5 {
            assert_eq!(ledger.admit(&request(id)), Admission::Run);
            ledger.settle(&request(id), &[]);
        }
        assert!(ledger.len() <= 4);
        assert_eq!(ledger.admit(&request(0)), Admission::Run);
        assert_eq!(ledger.admit(&request(4)), Admission::Replay(Vec::new()));
    }
}
