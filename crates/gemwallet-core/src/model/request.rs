//! Canonical request payloads, one per capability.
//!
//! These serialize to the current (V3) wire shape, which is also what the
//! page-side API sends.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::model::amount::{Amount, IssuedCurrencyAmount};
use crate::model::common::TransactionCommon;
use crate::model::flags::{
    CreateNftOfferFlags, CreateOfferFlags, Flags, MintNftFlags, PaymentFlags, SetAccountFlags,
    TrustSetFlags,
};
use crate::protocol::catalogue::Capability;

/// A ledger transaction kept as an opaque JSON object.
pub type Transaction = Map<String, Value>;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GetNftRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub marker: Option<Value>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignMessageRequest {
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_hex: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendPaymentRequest {
    #[serde(flatten)]
    pub common: TransactionCommon,
    pub amount: Amount,
    pub destination: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub destination_tag: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flags: Option<Flags<PaymentFlags>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetTrustlineRequest {
    #[serde(flatten)]
    pub common: TransactionCommon,
    pub limit_amount: IssuedCurrencyAmount,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flags: Option<Flags<TrustSetFlags>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MintNftRequest {
    #[serde(flatten)]
    pub common: TransactionCommon,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flags: Option<Flags<MintNftFlags>>,
    #[serde(rename = "NFTokenTaxon")]
    pub nftoken_taxon: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub issuer: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transfer_fee: Option<u32>,
    #[serde(rename = "URI", default, skip_serializing_if = "Option::is_none")]
    pub uri: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateNftOfferRequest {
    #[serde(flatten)]
    pub common: TransactionCommon,
    #[serde(rename = "NFTokenID")]
    pub nftoken_id: String,
    pub amount: Amount,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expiration: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub destination: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flags: Option<Flags<CreateNftOfferFlags>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CancelNftOfferRequest {
    #[serde(flatten)]
    pub common: TransactionCommon,
    #[serde(rename = "NFTokenOffers")]
    pub nftoken_offers: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AcceptNftOfferRequest {
    #[serde(flatten)]
    pub common: TransactionCommon,
    #[serde(rename = "NFTokenSellOffer", default, skip_serializing_if = "Option::is_none")]
    pub nftoken_sell_offer: Option<String>,
    #[serde(rename = "NFTokenBuyOffer", default, skip_serializing_if = "Option::is_none")]
    pub nftoken_buy_offer: Option<String>,
    #[serde(rename = "NFTokenBrokerFee", default, skip_serializing_if = "Option::is_none")]
    pub nftoken_broker_fee: Option<Amount>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BurnNftRequest {
    #[serde(flatten)]
    pub common: TransactionCommon,
    #[serde(rename = "NFTokenID")]
    pub nftoken_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetAccountRequest {
    #[serde(flatten)]
    pub common: TransactionCommon,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flags: Option<Flags<SetAccountFlags>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub clear_flag: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub domain: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email_hash: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message_key: Option<String>,
    #[serde(rename = "NFTokenMinter", default, skip_serializing_if = "Option::is_none")]
    pub nftoken_minter: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub set_flag: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transfer_rate: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tick_size: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateOfferRequest {
    #[serde(flatten)]
    pub common: TransactionCommon,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flags: Option<Flags<CreateOfferFlags>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expiration: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub offer_sequence: Option<u32>,
    pub taker_gets: Amount,
    pub taker_pays: Amount,
}

/// Payload of the sign-transaction and submit-transaction capabilities.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionRequest {
    pub transaction: Transaction,
}

/// A request after normalization, independent of its wire generation.
#[derive(Debug, Clone, PartialEq)]
pub enum WalletRequest {
    GetNetwork,
    GetAddress,
    GetPublicKey,
    GetNft(GetNftRequest),
    SignMessage(SignMessageRequest),
    SendPayment(SendPaymentRequest),
    SetTrustline(SetTrustlineRequest),
    MintNft(MintNftRequest),
    CreateNftOffer(CreateNftOfferRequest),
    CancelNftOffer(CancelNftOfferRequest),
    AcceptNftOffer(AcceptNftOfferRequest),
    BurnNft(BurnNftRequest),
    SetAccount(SetAccountRequest),
    CreateOffer(CreateOfferRequest),
    SignTransaction(TransactionRequest),
    SubmitTransaction(TransactionRequest),
}

impl WalletRequest {
    pub fn capability(&self) -> Capability {
        match self {
            WalletRequest::GetNetwork => Capability::GetNetwork,
            WalletRequest::GetAddress => Capability::GetAddress,
            WalletRequest::GetPublicKey => Capability::GetPublicKey,
            WalletRequest::GetNft(_) => Capability::GetNft,
            WalletRequest::SignMessage(_) => Capability::SignMessage,
            WalletRequest::SendPayment(_) => Capability::SendPayment,
            WalletRequest::SetTrustline(_) => Capability::SetTrustline,
            WalletRequest::MintNft(_) => Capability::MintNft,
            WalletRequest::CreateNftOffer(_) => Capability::CreateNftOffer,
            WalletRequest::CancelNftOffer(_) => Capability::CancelNftOffer,
            WalletRequest::AcceptNftOffer(_) => Capability::AcceptNftOffer,
            WalletRequest::BurnNft(_) => Capability::BurnNft,
            WalletRequest::SetAccount(_) => Capability::SetAccount,
            WalletRequest::CreateOffer(_) => Capability::CreateOffer,
            WalletRequest::SignTransaction(_) => Capability::SignTransaction,
            WalletRequest::SubmitTransaction(_) => Capability::SubmitTransaction,
        }
    }

    /// Current-version wire payload. `None` for payload-less capabilities.
    pub fn to_payload(&self) -> Option<Value> {
        let v = match self {
            WalletRequest::GetNetwork
            | WalletRequest::GetAddress
            | WalletRequest::GetPublicKey => return None,
            WalletRequest::GetNft(r) => serde_json::to_value(r),
            WalletRequest::SignMessage(r) => serde_json::to_value(r),
            WalletRequest::SendPayment(r) => serde_json::to_value(r),
            WalletRequest::SetTrustline(r) => serde_json::to_value(r),
            WalletRequest::MintNft(r) => serde_json::to_value(r),
            WalletRequest::CreateNftOffer(r) => serde_json::to_value(r),
            WalletRequest::CancelNftOffer(r) => serde_json::to_value(r),
            WalletRequest::AcceptNftOffer(r) => serde_json::to_value(r),
            WalletRequest::BurnNft(r) => serde_json::to_value(r),
            WalletRequest::SetAccount(r) => serde_json::to_value(r),
            WalletRequest::CreateOffer(r) => serde_json::to_value(r),
            WalletRequest::SignTransaction(r) | WalletRequest::SubmitTransaction(r) => {
                serde_json::to_value(r)
            }
        };
        v.ok()
    }
}
