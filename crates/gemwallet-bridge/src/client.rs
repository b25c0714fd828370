//! Page-side request API.
//!
//! [`WalletClient`] turns each call into a request envelope, parks it in the
//! pending-call table, and waits for the response listener to complete it.
//! Calls may be issued concurrently; responses are matched by `messageId`,
//! not by arrival order.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tokio::task::JoinHandle;
use tracing::{debug, info, trace, warn};

use gemwallet_core::error::{Result, WalletError};
use gemwallet_core::model::*;
use gemwallet_core::protocol::{Capability, Envelope, Reply, RequestKind, ResponseKind};

use crate::config::schema::BridgeSection;
use crate::dispatch::{Listener, ListenerRegistry};
use crate::pending::PendingCalls;
use crate::transport::{codec, ContextPort, Outbound};

/// Resolves pending calls from response envelopes.
struct ResponseListener {
    cfg: Arc<BridgeSection>,
    pending: Arc<PendingCalls>,
}

#[async_trait]
impl Listener for ResponseListener {
    fn matches(&self, env: &Envelope) -> bool {
        env.is_from(&self.cfg.app, &self.cfg.response_source)
            && ResponseKind::from_wire(&env.msg_type).is_some()
    }

    async fn on_envelope(&self, env: &Envelope) -> Option<Envelope> {
        let kind = ResponseKind::from_wire(&env.msg_type)?;
        let reply = Reply::from_payload(kind, env.payload.as_ref());
        self.pending.complete(env.message_id, kind.capability, reply);
        None
    }
}

/// Removes the pending entry when a call ends for any reason.
struct CallGuard<'a> {
    pending: &'a PendingCalls,
    id: u64,
}

impl Drop for CallGuard<'_> {
    fn drop(&mut self) {
        self.pending.cancel(self.id);
    }
}

pub struct WalletClient {
    cfg: Arc<BridgeSection>,
    outbound: Outbound,
    pending: Arc<PendingCalls>,
    registry: Arc<ListenerRegistry>,
    pump: JoinHandle<()>,
}

impl WalletClient {
    /// Attach to the page end of a transport pair. Must be called inside a
    /// tokio runtime.
    pub fn connect(cfg: BridgeSection, port: ContextPort) -> Self {
        let cfg = Arc::new(cfg);
        let pending = Arc::new(PendingCalls::new());
        let registry = Arc::new(ListenerRegistry::new());
        registry.register(Arc::new(ResponseListener {
            cfg: cfg.clone(),
            pending: pending.clone(),
        }));

        let ContextPort { outbound, mut inbound } = port;
        let pump = {
            let registry = registry.clone();
            let pending = pending.clone();
            tokio::spawn(async move {
                while let Some(frame) = inbound.recv().await {
                    match codec::decode(&frame) {
                        Ok(env) => {
                            registry.dispatch(&env).await;
                        }
                        Err(e) => trace!(error = %e, "ignoring non-envelope frame"),
                    }
                }
                debug!(pending = pending.len(), "page transport closed");
                pending.close();
            })
        };

        info!(app = %cfg.app, "wallet client connected");
        Self {
            cfg,
            outbound,
            pending,
            registry,
            pump,
        }
    }

    /// Page-side listeners. Holds the response listener plus anything the
    /// embedder registers.
    pub fn registry(&self) -> &Arc<ListenerRegistry> {
        &self.registry
    }

    pub fn pending_calls(&self) -> usize {
        self.pending.len()
    }

    /// Send a canonical request as its current-version kind.
    pub async fn call(&self, req: WalletRequest) -> Result<Value> {
        let kind = RequestKind::current(req.capability());
        self.call_kind(kind, req.to_payload()).await
    }

    /// Send `payload` verbatim as `kind`. This is how deprecated callers
    /// reach the extension.
    pub async fn call_kind(&self, kind: RequestKind, payload: Option<Value>) -> Result<Value> {
        let (id, rx) = self.pending.register(kind.capability);
        let _guard = CallGuard {
            pending: &self.pending,
            id,
        };

        let env = Envelope::new(
            self.cfg.app.clone(),
            self.cfg.request_source.clone(),
            kind.as_wire(),
            id,
            payload,
        );
        self.outbound.send(&env).await?;
        trace!(message_id = id, msg_type = kind.as_wire(), "request sent");

        let ms = self.cfg.request_timeout_ms;
        let reply = if ms == 0 {
            rx.await
        } else {
            match tokio::time::timeout(Duration::from_millis(ms), rx).await {
                Ok(r) => r,
                Err(_) => {
                    warn!(
                        message_id = id,
                        capability = kind.capability.as_str(),
                        timeout_ms = ms,
                        "request timed out"
                    );
                    return Err(WalletError::Timeout(ms));
                }
            }
        };
        reply.map_err(|_| WalletError::TransportClosed)?.into_result()
    }

    async fn typed<T: DeserializeOwned>(&self, req: WalletRequest) -> Result<T> {
        let capability = req.capability();
        let value = self.call(req).await?;
        decode_result(capability, value)
    }

    async fn hash(&self, req: WalletRequest) -> Result<String> {
        self.typed::<TransactionHashResult>(req).await.map(|r| r.hash)
    }

    pub async fn get_network(&self) -> Result<NetworkResult> {
        self.typed(WalletRequest::GetNetwork).await
    }

    pub async fn get_address(&self) -> Result<String> {
        self.typed::<AddressResult>(WalletRequest::GetAddress)
            .await
            .map(|r| r.address)
    }

    pub async fn get_public_key(&self) -> Result<PublicKeyResult> {
        self.typed(WalletRequest::GetPublicKey).await
    }

    pub async fn get_nft(&self, req: GetNftRequest) -> Result<NftResult> {
        self.typed(WalletRequest::GetNft(req)).await
    }

    /// Returns the signed message.
    pub async fn sign_message(&self, req: SignMessageRequest) -> Result<String> {
        self.typed::<SignedMessageResult>(WalletRequest::SignMessage(req))
            .await
            .map(|r| r.signed_message)
    }

    /// Returns the transaction hash.
    pub async fn send_payment(&self, req: SendPaymentRequest) -> Result<String> {
        self.hash(WalletRequest::SendPayment(req)).await
    }

    pub async fn set_trustline(&self, req: SetTrustlineRequest) -> Result<String> {
        self.hash(WalletRequest::SetTrustline(req)).await
    }

    pub async fn mint_nft(&self, req: MintNftRequest) -> Result<MintNftResult> {
        self.typed(WalletRequest::MintNft(req)).await
    }

    pub async fn create_nft_offer(&self, req: CreateNftOfferRequest) -> Result<String> {
        self.hash(WalletRequest::CreateNftOffer(req)).await
    }

    pub async fn cancel_nft_offer(&self, req: CancelNftOfferRequest) -> Result<String> {
        self.hash(WalletRequest::CancelNftOffer(req)).await
    }

    pub async fn accept_nft_offer(&self, req: AcceptNftOfferRequest) -> Result<String> {
        self.hash(WalletRequest::AcceptNftOffer(req)).await
    }

    pub async fn burn_nft(&self, req: BurnNftRequest) -> Result<String> {
        self.hash(WalletRequest::BurnNft(req)).await
    }

    pub async fn set_account(&self, req: SetAccountRequest) -> Result<String> {
        self.hash(WalletRequest::SetAccount(req)).await
    }

    pub async fn create_offer(&self, req: CreateOfferRequest) -> Result<String> {
        self.hash(WalletRequest::CreateOffer(req)).await
    }

    /// Sign without submitting. Returns the signed blob.
    pub async fn sign_transaction(&self, req: TransactionRequest) -> Result<String> {
        self.typed::<SignedTransactionResult>(WalletRequest::SignTransaction(req))
            .await
            .map(|r| r.signature)
    }

    pub async fn submit_transaction(&self, req: TransactionRequest) -> Result<String> {
        self.hash(WalletRequest::SubmitTransaction(req)).await
    }
}

impl Drop for WalletClient {
    fn drop(&mut self) {
        self.pump.abort();
        self.pending.close();
        self.registry.clear();
    }
}

fn decode_result<T: DeserializeOwned>(capability: Capability, value: Value) -> Result<T> {
    serde_json::from_value(value).map_err(|e| {
        WalletError::BadRequest(format!("unexpected {} result: {e}", capability.as_str()))
    })
}
