//! Page-side correlation against a hand-driven extension port.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use serde_json::{json, Value};

use gemwallet_bridge::client::WalletClient;
use gemwallet_bridge::config::schema::BridgeSection;
use gemwallet_bridge::dispatch::FnListener;
use gemwallet_bridge::transport::{self, codec, ContextPort};
use gemwallet_core::protocol::{Capability, Envelope, RequestKind, APP, RESPONSE_SOURCE};

async fn next_request(ext: &mut ContextPort) -> Envelope {
    let frame = ext.inbound.recv().await.expect("request frame");
    codec::decode(&frame).unwrap()
}

fn response(req: &Envelope, msg_type: &str, payload: Value) -> Envelope {
    Envelope::new(APP, RESPONSE_SOURCE, msg_type, req.message_id, Some(payload))
}

#[tokio::test]
async fn foreign_traffic_never_resolves_a_call() {
    let (page, mut ext) = transport::pair(16);
    let client = WalletClient::connect(BridgeSection::default(), page);

    let responder = async {
        let req = next_request(&mut ext).await;
        assert_eq!(req.msg_type, "REQUEST_GET_NETWORK/V3");

        let wrong = json!({"result": {"network": "WRONG"}});
        let mut wrong_app = response(&req, "RECEIVE_GET_NETWORK/V3", wrong);
        wrong_app.app = "other-extension".into();
        let mut wrong_source = wrong_app.clone();
        wrong_source.app = APP.into();
        wrong_source.source = "GEM_WALLET_MSG_REQUEST".into();

        ext.outbound.send(&wrong_app).await.unwrap();
        ext.outbound.send(&wrong_source).await.unwrap();
        ext.outbound.send_raw("not json at all".into()).await.unwrap();
        ext.outbound.send_raw(r#"{"type":"page-analytics"}"#.into()).await.unwrap();
        let right = json!({"result": {"network": "Mainnet"}});
        ext.outbound
            .send(&response(&req, "RECEIVE_GET_NETWORK/V3", right))
            .await
            .unwrap();
    };

    let (result, ()) = tokio::join!(client.get_network(), responder);
    assert_eq!(result.unwrap().network, "Mainnet");
}

#[tokio::test]
async fn response_of_another_capability_is_ignored() {
    let (page, mut ext) = transport::pair(16);
    let client = WalletClient::connect(BridgeSection::default(), page);

    let responder = async {
        let req = next_request(&mut ext).await;
        let key = json!({"result": {"address": "x", "publicKey": "y"}});
        let address = json!({"result": {"address": "rRight"}});
        ext.outbound
            .send(&response(&req, "RECEIVE_GET_PUBLIC_KEY/V3", key))
            .await
            .unwrap();
        ext.outbound
            .send(&response(&req, "RECEIVE_GET_ADDRESS/V3", address))
            .await
            .unwrap();
    };

    let (result, ()) = tokio::join!(client.get_address(), responder);
    assert_eq!(result.unwrap(), "rRight");
}

#[tokio::test]
async fn duplicate_delivery_resolves_once() {
    let (page, mut ext) = transport::pair(16);
    let client = WalletClient::connect(BridgeSection::default(), page);

    let responder = async {
        let req = next_request(&mut ext).await;
        let kind = "RECEIVE_SEND_PAYMENT/V3";
        let first = response(&req, kind, json!({"result": {"hash": "FIRST"}}));
        let second = response(&req, kind, json!({"result": {"hash": "SECOND"}}));
        ext.outbound.send(&first).await.unwrap();
        ext.outbound.send(&second).await.unwrap();
    };

    let call = client.call_kind(
        RequestKind::current(Capability::SendPayment),
        Some(json!({"amount": "1", "destination": "rD"})),
    );
    let (result, ()) = tokio::join!(call, responder);
    assert_eq!(result.unwrap(), json!({"hash": "FIRST"}));

    // Give the pump time to swallow the duplicate.
    tokio::task::yield_now().await;
    assert_eq!(client.pending_calls(), 0);
}

#[tokio::test]
async fn response_without_result_or_error_is_empty() {
    let (page, mut ext) = transport::pair(16);
    let client = WalletClient::connect(BridgeSection::default(), page);

    let responder = async {
        let req = next_request(&mut ext).await;
        ext.outbound
            .send(&response(&req, "RECEIVE_GET_NETWORK/V3", json!({})))
            .await
            .unwrap();
    };

    let (result, ()) = tokio::join!(client.get_network(), responder);
    assert_eq!(result.unwrap_err().client_code().as_str(), "EMPTY_RESPONSE");
}

#[tokio::test]
async fn closed_transport_fails_pending_calls() {
    let (page, mut ext) = transport::pair(16);
    let client = WalletClient::connect(BridgeSection::default(), page);

    let closer = async move {
        let _req = next_request(&mut ext).await;
        drop(ext);
    };

    let (result, ()) = tokio::join!(client.get_network(), closer);
    assert_eq!(result.unwrap_err().client_code().as_str(), "TRANSPORT_CLOSED");

    let err = client.get_network().await.unwrap_err();
    assert_eq!(err.client_code().as_str(), "TRANSPORT_CLOSED");
}

#[tokio::test]
async fn page_side_once_listener_sees_one_delivery() {
    let (page, ext) = transport::pair(16);
    let client = WalletClient::connect(BridgeSection::default(), page);

    let hits = Arc::new(AtomicUsize::new(0));
    let counted = hits.clone();
    client.registry().register_once(Arc::new(FnListener::new(
        |e: &Envelope| e.msg_type == "WALLET_LOCKED",
        move |_: &Envelope| {
            counted.fetch_add(1, Ordering::SeqCst);
            None
        },
    )));

    let event = Envelope::new(APP, RESPONSE_SOURCE, "WALLET_LOCKED", 0, None);
    ext.outbound.send(&event).await.unwrap();
    ext.outbound.send(&event).await.unwrap();

    // Round-trip a request so both events have been pumped.
    let mut ext = ext;
    let responder = async {
        let req = next_request(&mut ext).await;
        let network = json!({"result": {"network": "Mainnet"}});
        ext.outbound
            .send(&response(&req, "RECEIVE_GET_NETWORK/V3", network))
            .await
            .unwrap();
    };
    let (result, ()) = tokio::join!(client.get_network(), responder);
    result.unwrap();

    assert_eq!(hits.load(Ordering::SeqCst), 1);
    // Only the built-in response listener remains.
    assert_eq!(client.registry().len(), 1);
}
