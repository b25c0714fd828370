//! Privileged-side capability routing.
//!
//! One [`CapabilityListener`] per capability answers both wire generations
//! of its request kind. The payload is normalized before the handler sees
//! it, and every outcome (including handler failure) becomes a response
//! envelope with the request's `messageId`.

use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use async_trait::async_trait;
use futures_util::FutureExt;
use serde_json::Value;
use tracing::{debug, warn};

use gemwallet_core::error::Result;
use gemwallet_core::model::WalletRequest;
use gemwallet_core::normalize::normalize_request;
use gemwallet_core::protocol::{Capability, Envelope, Reply, RequestKind};

use crate::config::schema::BridgeSection;
use crate::context::wallet::{WalletContext, WalletIdentity};
use crate::dispatch::registry::Listener;

pub const NO_WALLET_SELECTED: &str = "No wallet is selected";

/// What a handler knows about the request besides its payload.
#[derive(Debug, Clone)]
pub struct HandlerCtx {
    pub message_id: u64,
    /// Wire kind the request arrived as (before upgrade).
    pub kind: RequestKind,
    /// `None` only for capabilities that do not need a wallet.
    pub wallet: Option<WalletIdentity>,
}

/// The UI/signing collaborator for one capability.
///
/// `Err` results reach the page as the response's `error` string, so a
/// rejection should be `WalletError::Capability("User rejected")`.
#[async_trait]
pub trait CapabilityHandler: Send + Sync {
    fn capability(&self) -> Capability;
    async fn handle(&self, ctx: HandlerCtx, req: WalletRequest) -> Result<Value>;
}

pub struct CapabilityListener {
    cfg: Arc<BridgeSection>,
    wallets: Arc<dyn WalletContext>,
    handler: Arc<dyn CapabilityHandler>,
}

impl CapabilityListener {
    pub fn new(
        cfg: Arc<BridgeSection>,
        wallets: Arc<dyn WalletContext>,
        handler: Arc<dyn CapabilityHandler>,
    ) -> Self {
        Self {
            cfg,
            wallets,
            handler,
        }
    }

    fn kind_of(&self, env: &Envelope) -> Option<RequestKind> {
        RequestKind::from_wire(&env.msg_type).filter(|k| {
            k.capability == self.handler.capability()
                && (!k.is_deprecated() || self.cfg.accept_deprecated)
        })
    }

    async fn run(&self, kind: RequestKind, env: &Envelope) -> Reply {
        let capability = kind.capability;
        let req = match normalize_request(kind, env.payload.as_ref()) {
            Ok(r) => r,
            Err(e) => {
                debug!(
                    capability = capability.as_str(),
                    message_id = env.message_id,
                    error = %e,
                    "request rejected"
                );
                return Reply::err(e.to_string());
            }
        };

        let wallet = self.wallets.current_wallet();
        if capability.requires_wallet() && wallet.is_none() {
            return Reply::err(NO_WALLET_SELECTED);
        }

        let ctx = HandlerCtx {
            message_id: env.message_id,
            kind,
            wallet,
        };
        match AssertUnwindSafe(self.handler.handle(ctx, req))
            .catch_unwind()
            .await
        {
            Ok(Ok(result)) => Reply::ok(result),
            Ok(Err(e)) => {
                debug!(
                    capability = capability.as_str(),
                    message_id = env.message_id,
                    error = %e,
                    "handler failed"
                );
                Reply::err(e.to_string())
            }
            Err(_) => {
                warn!(
                    capability = capability.as_str(),
                    message_id = env.message_id,
                    "handler panicked"
                );
                Reply::err("internal error")
            }
        }
    }
}

#[async_trait]
impl Listener for CapabilityListener {
    fn matches(&self, env: &Envelope) -> bool {
        env.is_from(&self.cfg.app, &self.cfg.request_source) && self.kind_of(env).is_some()
    }

    async fn on_envelope(&self, env: &Envelope) -> Option<Envelope> {
        let kind = self.kind_of(env)?;
        let reply = self.run(kind, env).await;
        let response = kind.response();
        Some(Envelope::new(
            self.cfg.app.clone(),
            self.cfg.response_source.clone(),
            response.as_wire(),
            env.message_id,
            Some(reply.to_payload(response)),
        ))
    }
}
