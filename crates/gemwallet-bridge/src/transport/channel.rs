use tokio::sync::mpsc;

use gemwallet_core::error::{Result, WalletError};
use gemwallet_core::protocol::Envelope;

use crate::transport::codec;

/// Sending half of a port. Cheap to clone.
#[derive(Clone)]
pub struct Outbound {
    tx: mpsc::Sender<String>,
}

impl Outbound {
    pub async fn send(&self, env: &Envelope) -> Result<()> {
        let frame = codec::encode(env)?;
        self.send_raw(frame).await
    }

    /// Deliver an arbitrary frame verbatim.
    pub async fn send_raw(&self, frame: String) -> Result<()> {
        self.tx
            .send(frame)
            .await
            .map_err(|_| WalletError::TransportClosed)
    }

    pub fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }
}

/// One context's end of the bridge.
pub struct ContextPort {
    pub outbound: Outbound,
    pub inbound: mpsc::Receiver<String>,
}

/// Connect two contexts. Frames sent on one port arrive on the other in
/// send order.
pub fn pair(capacity: usize) -> (ContextPort, ContextPort) {
    let (a_tx, b_rx) = mpsc::channel(capacity);
    let (b_tx, a_rx) = mpsc::channel(capacity);
    (
        ContextPort {
            outbound: Outbound { tx: a_tx },
            inbound: a_rx,
        },
        ContextPort {
            outbound: Outbound { tx: b_tx },
            inbound: b_rx,
        },
    )
}
