//! Array- and object-valued fields.

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::model::common::{Memo, Signer};
use crate::model::request::Transaction;
use crate::normalize::decode::{decode, typed};

fn list<T: DeserializeOwned>(input: Option<&Value>) -> Option<Vec<T>> {
    decode(input, |v| if v.is_array() { typed(v) } else { None })
}

/// A list of strings, e.g. NFT offer ids.
pub fn parse_array(input: Option<&Value>) -> Option<Vec<String>> {
    list(input)
}

pub fn parse_memos(input: Option<&Value>) -> Option<Vec<Memo>> {
    list(input)
}

pub fn parse_signers(input: Option<&Value>) -> Option<Vec<Signer>> {
    list(input)
}

/// Any JSON object; its ledger semantics are checked downstream.
pub fn parse_transaction(input: Option<&Value>) -> Option<Transaction> {
    decode(input, |v| v.as_object().cloned())
}
