use std::sync::Arc;

use tokio::task::JoinHandle;
use tracing::{debug, info, trace};

use gemwallet_core::protocol::Envelope;

use crate::config::schema::BridgeSection;
use crate::context::ledger::{Admission, RequestLedger};
use crate::context::wallet::WalletContext;
use crate::dispatch::{CapabilityHandler, CapabilityListener, ListenerId, ListenerRegistry};
use crate::transport::{codec, ContextPort};

/// Request ids remembered per ledger.
pub const REMEMBERED_REQUESTS: usize = 1024;

/// Privileged-side context: routes request envelopes to capability
/// handlers and sends their responses back.
///
/// A request is handled at most once per ledger. [`handle_envelope`] uses
/// one ledger for the context's lifetime; [`serve`] opens a fresh one per
/// port, since every page numbers its calls from 1.
///
/// [`handle_envelope`]: ExtensionContext::handle_envelope
/// [`serve`]: ExtensionContext::serve
pub struct ExtensionContext {
    cfg: Arc<BridgeSection>,
    wallets: Arc<dyn WalletContext>,
    registry: Arc<ListenerRegistry>,
    requests: RequestLedger,
}

impl ExtensionContext {
    pub fn new(cfg: BridgeSection, wallets: Arc<dyn WalletContext>) -> Self {
        Self {
            cfg: Arc::new(cfg),
            wallets,
            registry: Arc::new(ListenerRegistry::new()),
            requests: RequestLedger::new(REMEMBERED_REQUESTS),
        }
    }

    /// Route both wire generations of `handler.capability()` to `handler`.
    pub fn register_handler(&self, handler: Arc<dyn CapabilityHandler>) -> ListenerId {
        let capability = handler.capability();
        let id = self.registry.register(Arc::new(CapabilityListener::new(
            self.cfg.clone(),
            self.wallets.clone(),
            handler,
        )));
        debug!(
            capability = capability.as_str(),
            listener_id = id,
            "capability handler registered"
        );
        id
    }

    pub fn registry(&self) -> &Arc<ListenerRegistry> {
        &self.registry
    }

    /// Run one inbound envelope through the registry and collect responses.
    pub async fn handle_envelope(&self, env: &Envelope) -> Vec<Envelope> {
        self.handle_with(&self.requests, env).await
    }

    async fn handle_with(&self, ledger: &RequestLedger, env: &Envelope) -> Vec<Envelope> {
        if !env.is_from(&self.cfg.app, &self.cfg.request_source) {
            return self.registry.dispatch(env).await;
        }
        match ledger.admit(env) {
            Admission::Run => {}
            Admission::InFlight => {
                debug!(
                    message_id = env.message_id,
                    msg_type = %env.msg_type,
                    "duplicate request dropped"
                );
                return Vec::new();
            }
            Admission::Replay(replies) => {
                debug!(
                    message_id = env.message_id,
                    msg_type = %env.msg_type,
                    "duplicate request replayed"
                );
                return replies;
            }
        }
        let replies = self.registry.dispatch(env).await;
        ledger.settle(env, &replies);
        replies
    }

    /// Serve requests arriving on `port` until the peer goes away.
    ///
    /// Each envelope is handled on its own task, so a slow handler (a
    /// pending user confirmation) does not hold up the others.
    pub fn serve(self: Arc<Self>, port: ContextPort) -> JoinHandle<()> {
        let ContextPort {
            outbound,
            mut inbound,
        } = port;
        let ledger = Arc::new(RequestLedger::new(REMEMBERED_REQUESTS));
        info!(app = %self.cfg.app, listeners = self.registry.len(), "extension context serving");

        tokio::spawn(async move {
            while let Some(frame) = inbound.recv().await {
                let env = match codec::decode(&frame) {
                    Ok(env) => env,
                    Err(e) => {
                        trace!(error = %e, "ignoring non-envelope frame");
                        continue;
                    }
                };
                let ctx = self.clone();
                let ledger = ledger.clone();
                let outbound = outbound.clone();
                tokio::spawn(async move {
                    for reply in ctx.handle_with(&ledger, &env).await {
                        if let Err(e) = outbound.send(&reply).await {
                            debug!(
                                message_id = reply.message_id,
                                error = %e,
                                "response not delivered"
                            );
                        }
                    }
                });
            }
            info!(app = %self.cfg.app, "extension context stopped");
        })
    }
}
