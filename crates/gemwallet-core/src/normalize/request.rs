//! Request assembly: raw payload + catalogue kind -> canonical request.

use serde_json::{Map, Value};
use tracing::trace;

use crate::error::{Result, WalletError};
use crate::model::common::TransactionCommon;
use crate::model::request::*;
use crate::normalize::amount::{parse_amount, parse_limit_amount, AmountContext};
use crate::normalize::array::{parse_array, parse_memos, parse_signers, parse_transaction};
use crate::normalize::flags::{
    parse_create_nft_offer_flags, parse_create_offer_flags, parse_mint_nft_flags,
    parse_payment_flags, parse_set_account_flags, parse_trust_set_flags,
};
use crate::protocol::catalogue::{Capability, RequestKind};

/// Field accessor over a payload object that tolerates the deprecated
/// scalar encodings (numbers as strings, booleans as strings).
struct Fields(Map<String, Value>);

impl Fields {
    fn new(payload: Option<&Value>) -> Self {
        Self(parse_transaction(payload).unwrap_or_default())
    }

    fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    fn str(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(Value::as_str).filter(|s| !s.is_empty())
    }

    fn string(&self, key: &str) -> Option<String> {
        match self.get(key)? {
            Value::String(s) if !s.is_empty() => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        }
    }

    fn u32(&self, key: &str) -> Option<u32> {
        match self.get(key)? {
            Value::Number(n) => n.as_u64().and_then(|n| u32::try_from(n).ok()),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    fn bool(&self, key: &str) -> Option<bool> {
        match self.get(key)? {
            Value::Bool(b) => Some(*b),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    fn common(&self) -> TransactionCommon {
        TransactionCommon {
            fee: self.string("fee"),
            sequence: self.u32("sequence"),
            account_txn_id: self.string("accountTxnID"),
            last_ledger_sequence: self.u32("lastLedgerSequence"),
            memos: parse_memos(self.get("memos")),
            signers: parse_signers(self.get("signers")),
            source_tag: self.u32("sourceTag"),
            ticket_sequence: self.u32("ticketSequence"),
        }
    }
}

fn required<T>(value: Option<T>, field: &str) -> Result<T> {
    value.ok_or_else(|| WalletError::missing(field))
}

/// Normalize `payload` as a request of `kind`. Both generations of a
/// capability produce the same canonical request; a canonical payload
/// normalizes to itself.
pub fn normalize_request(kind: RequestKind, payload: Option<&Value>) -> Result<WalletRequest> {
    if kind.is_deprecated() {
        trace!(
            from = kind.as_wire(),
            to = kind.upgrade().as_wire(),
            "upgrading deprecated request"
        );
    }
    let f = Fields::new(payload);
    let amount_ctx = AmountContext::for_kind(kind);

    let req = match kind.capability {
        Capability::GetNetwork => WalletRequest::GetNetwork,
        Capability::GetAddress => WalletRequest::GetAddress,
        Capability::GetPublicKey => WalletRequest::GetPublicKey,
        Capability::GetNft => WalletRequest::GetNft(GetNftRequest {
            limit: f.u32("limit"),
            marker: f.get("marker").filter(|m| !m.is_null()).cloned(),
        }),
        Capability::SignMessage => WalletRequest::SignMessage(SignMessageRequest {
            message: required(f.string("message"), "message")?,
            is_hex: f.bool("isHex"),
        }),
        Capability::SendPayment => WalletRequest::SendPayment(SendPaymentRequest {
            common: f.common(),
            amount: required(
                parse_amount(f.get("amount"), f.str("currency"), f.str("issuer"), amount_ctx),
                "amount",
            )?,
            destination: required(f.string("destination"), "destination")?,
            destination_tag: f.u32("destinationTag"),
            flags: parse_payment_flags(f.get("flags")),
        }),
        Capability::SetTrustline => {
            let value = f.string("value");
            WalletRequest::SetTrustline(SetTrustlineRequest {
                common: f.common(),
                limit_amount: required(
                    parse_limit_amount(
                        f.get("limitAmount"),
                        value.as_deref(),
                        f.str("currency"),
                        f.str("issuer"),
                    ),
                    "limitAmount",
                )?,
                flags: parse_trust_set_flags(f.get("flags")),
            })
        }
        Capability::MintNft => WalletRequest::MintNft(MintNftRequest {
            common: f.common(),
            flags: parse_mint_nft_flags(f.get("flags")),
            nftoken_taxon: required(f.u32("NFTokenTaxon"), "NFTokenTaxon")?,
            issuer: f.string("issuer"),
            transfer_fee: f.u32("transferFee"),
            uri: f.string("URI"),
        }),
        Capability::CreateNftOffer => WalletRequest::CreateNftOffer(CreateNftOfferRequest {
            common: f.common(),
            nftoken_id: required(f.string("NFTokenID"), "NFTokenID")?,
            amount: required(parse_amount(f.get("amount"), None, None, amount_ctx), "amount")?,
            owner: f.string("owner"),
            expiration: f.u32("expiration"),
            destination: f.string("destination"),
            flags: parse_create_nft_offer_flags(f.get("flags")),
        }),
        Capability::CancelNftOffer => WalletRequest::CancelNftOffer(CancelNftOfferRequest {
            common: f.common(),
            nftoken_offers: required(parse_array(f.get("NFTokenOffers")), "NFTokenOffers")?,
        }),
        Capability::AcceptNftOffer => WalletRequest::AcceptNftOffer(AcceptNftOfferRequest {
            common: f.common(),
            nftoken_sell_offer: f.string("NFTokenSellOffer"),
            nftoken_buy_offer: f.string("NFTokenBuyOffer"),
            nftoken_broker_fee: parse_amount(f.get("NFTokenBrokerFee"), None, None, amount_ctx),
        }),
        Capability::BurnNft => WalletRequest::BurnNft(BurnNftRequest {
            common: f.common(),
            nftoken_id: required(f.string("NFTokenID"), "NFTokenID")?,
            owner: f.string("owner"),
        }),
        Capability::SetAccount => WalletRequest::SetAccount(SetAccountRequest {
            common: f.common(),
            flags: parse_set_account_flags(f.get("flags")),
            clear_flag: f.u32("clearFlag"),
            domain: f.string("domain"),
            email_hash: f.string("emailHash"),
            message_key: f.string("messageKey"),
            nftoken_minter: f.string("NFTokenMinter"),
            set_flag: f.u32("setFlag"),
            transfer_rate: f.u32("transferRate"),
            tick_size: f.u32("tickSize"),
        }),
        Capability::CreateOffer => WalletRequest::CreateOffer(CreateOfferRequest {
            common: f.common(),
            flags: parse_create_offer_flags(f.get("flags")),
            expiration: f.u32("expiration"),
            offer_sequence: f.u32("offerSequence"),
            taker_gets: required(
                parse_amount(f.get("takerGets"), None, None, amount_ctx),
                "takerGets",
            )?,
            taker_pays: required(
                parse_amount(f.get("takerPays"), None, None, amount_ctx),
                "takerPays",
            )?,
        }),
        Capability::SignTransaction => WalletRequest::SignTransaction(TransactionRequest {
            transaction: required(parse_transaction(f.get("transaction")), "transaction")?,
        }),
        Capability::SubmitTransaction => WalletRequest::SubmitTransaction(TransactionRequest {
            transaction: required(parse_transaction(f.get("transaction")), "transaction")?,
        }),
    };
    Ok(req)
}
