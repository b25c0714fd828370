//! Page client <-> extension context over an in-process transport pair.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]


use std::sync::Arc;

use serde_json::json;

use gemwallet_bridge::config::schema::BridgeSection;
use gemwallet_bridge::context::StaticWalletContext;
use gemwallet_bridge::dispatch::{CapabilityHandler, NO_WALLET_SELECTED};
use gemwallet_core::model::*;
use gemwallet_core::protocol::{Capability, RequestKind};

use harness::{start, wallets, Script, Scripted};

fn payment(drops: &str) -> SendPaymentRequest {
    SendPaymentRequest {
        common: TransactionCommon::default(),
        amount: Amount::Drops(drops.into()),
        destination: "rDestination".into(),
        destination_tag: None,
        flags: None,
    }
}

#[tokio::test]
async fn current_payment_round_trip() {
    let handler = Scripted::new(
        Capability::SendPayment,
        Script::Reply(json!({"hash": "ABCD1234"})),
    );
    let (client, _server) = start(
        BridgeSection::default(),
        wallets(),
        vec![handler.clone() as Arc<dyn CapabilityHandler>],
    );

    let hash = client.send_payment(payment("1000000")).await.unwrap();
    assert_eq!(hash, "ABCD1234");
    assert_eq!(handler.seen(), vec![WalletRequest::SendPayment(payment("1000000"))]);
    assert_eq!(client.pending_calls(), 0);
}

#[tokio::test]
async fn deprecated_payment_is_normalized_before_the_handler() {
    let handler = Scripted::new(
        Capability::SendPayment,
        Script::Reply(json!({"hash": "ABCD1234"})),
    );
    let (client, _server) = start(
        BridgeSection::default(),
        wallets(),
        vec![handler.clone() as Arc<dyn CapabilityHandler>],
    );

    let kind = RequestKind::deprecated(Capability::SendPayment).unwrap();
    let result = client
        .call_kind(
            kind,
            Some(json!({"amount": "\"1000000\"", "destination": "rDestination"})),
        )
        .await
        .unwrap();

    // Deprecated responses are flat; the reply still converges on `result`.
    assert_eq!(result, json!({"hash": "ABCD1234"}));
    assert_eq!(handler.seen(), vec![WalletRequest::SendPayment(payment("1000000"))]);
}

#[tokio::test]
async fn deprecated_address_reply_is_renamed_back() {
    let handler = Scripted::new(
        Capability::GetAddress,
        Script::Reply(json!({"address": "rMainWallet"})),
    );
    let (client, _server) = start(
        BridgeSection::default(),
        wallets(),
        vec![handler as Arc<dyn CapabilityHandler>],
    );

    let legacy = client
        .call_kind(RequestKind::deprecated(Capability::GetAddress).unwrap(), None)
        .await
        .unwrap();
    assert_eq!(legacy, json!({"address": "rMainWallet"}));
    assert_eq!(client.get_address().await.unwrap(), "rMainWallet");
}

#[tokio::test]
async fn capability_failure_surfaces_verbatim() {
    let handler = Scripted::new(
        Capability::SignMessage,
        Script::Reject("User rejected".into()),
    );
    let (client, _server) = start(
        BridgeSection::default(),
        wallets(),
        vec![handler as Arc<dyn CapabilityHandler>],
    );

    let err = client
        .sign_message(SignMessageRequest {
            message: "hello".into(),
            is_hex: None,
        })
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "User rejected");
    assert_eq!(err.client_code().as_str(), "CAPABILITY");
}

#[tokio::test]
async fn responses_correlate_by_message_id_not_arrival_order() {
    let handler = Scripted::new(Capability::SignMessage, Script::EchoAfterDelay);
    let (client, _server) = start(
        BridgeSection::default(),
        wallets(),
        vec![handler as Arc<dyn CapabilityHandler>],
    );

    let sign = |m: &str| SignMessageRequest {
        message: m.into(),
        is_hex: None,
    };
    let slow = "s".repeat(150);
    // The slow call is sent first and answered last.
    let (a, b) = tokio::join!(client.sign_message(sign(&slow)), client.sign_message(sign("f")));
    assert_eq!(a.unwrap(), slow);
    assert_eq!(b.unwrap(), "f");
}

#[tokio::test]
async fn no_wallet_selected() {
    let network = Scripted::new(
        Capability::GetNetwork,
        Script::Reply(json!({"network": "Testnet", "websocket": "wss://s.altnet.rippletest.net"})),
    );
    let address = Scripted::new(
        Capability::GetAddress,
        Script::Reply(json!({"address": "unreachable"})),
    );
    let (client, _server) = start(
        BridgeSection::default(),
        Arc::new(StaticWalletContext::empty()),
        vec![
            network as Arc<dyn CapabilityHandler>,
            address.clone() as Arc<dyn CapabilityHandler>,
        ],
    );

    assert_eq!(client.get_network().await.unwrap().network, "Testnet");
    let err = client.get_address().await.unwrap_err();
    assert_eq!(err.to_string(), NO_WALLET_SELECTED);
    assert!(address.seen().is_empty());
}

#[tokio::test]
async fn handler_panic_becomes_error_response() {
    let bad = Scripted::new(Capability::BurnNft, Script::Panic);
    let good = Scripted::new(Capability::GetNetwork, Script::Reply(json!({"network": "Mainnet"})));
    let (client, _server) = start(
        BridgeSection::default(),
        wallets(),
        vec![bad as Arc<dyn CapabilityHandler>, good as Arc<dyn CapabilityHandler>],
    );

    let err = client
        .burn_nft(BurnNftRequest {
            common: TransactionCommon::default(),
            nftoken_id: "000B0000".into(),
            owner: None,
        })
        .await
        .unwrap_err();
    assert_eq!(err.client_code().as_str(), "CAPABILITY");

    // The context keeps serving.
    assert_eq!(client.get_network().await.unwrap().network, "Mainnet");
}

#[tokio::test]
async fn timeout_removes_the_pending_call() {
    let cfg = BridgeSection {
        request_timeout_ms: 50,
        ..BridgeSection::default()
    };
    let handler = Scripted::new(Capability::GetPublicKey, Script::Hang);
    let (client, _server) = start(cfg, wallets(), vec![handler as Arc<dyn CapabilityHandler>]);

    let err = client.get_public_key().await.unwrap_err();
    assert_eq!(err.client_code().as_str(), "TIMEOUT");
    assert_eq!(client.pending_calls(), 0);
}

#[tokio::test]
async fn deprecated_kinds_can_be_switched_off() {
    let cfg = BridgeSection {
        request_timeout_ms: 100,
        accept_deprecated: false,
        ..BridgeSection::default()
    };
    let handler = Scripted::new(
        Capability::GetNetwork,
        Script::Reply(json!({"network": "Mainnet"})),
    );
    let (client, _server) = start(
        cfg,
        wallets(),
        vec![handler.clone() as Arc<dyn CapabilityHandler>],
    );

    let err = client
        .call_kind(RequestKind::deprecated(Capability::GetNetwork).unwrap(), None)
        .await
        .unwrap_err();
    assert_eq!(err.client_code().as_str(), "TIMEOUT");
    assert!(handler.seen().is_empty());

    assert_eq!(client.get_network().await.unwrap().network, "Mainnet");
}

#[tokio::test]
async fn unrouted_capability_times_out() {
    let cfg = BridgeSection {
        request_timeout_ms: 50,
        ..BridgeSection::default()
    };
    let (client, _server) = start(cfg, wallets(), Vec::new());
    let err = client.get_network().await.unwrap_err();
    assert_eq!(err.client_code().as_str(), "TIMEOUT");
}
