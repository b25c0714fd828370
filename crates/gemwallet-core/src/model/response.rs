//! Typed results carried in `Reply::result`.

use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkResult {
    pub network: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub websocket: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddressResult {
    pub address: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicKeyResult {
    pub address: String,
    pub public_key: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NftResult {
    #[serde(default)]
    pub account_nfts: Vec<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub marker: Option<Value>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignedMessageResult {
    pub signed_message: String,
}

/// Result of every capability that submits a transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionHashResult {
    pub hash: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MintNftResult {
    pub hash: String,
    #[serde(rename = "NFTokenID", default, skip_serializing_if = "Option::is_none")]
    pub nftoken_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignedTransactionResult {
    pub signature: String,
}
