//! Amount normalization.
//!
//! A bare number is ambiguous between XRP and an issued-currency value.
//! Resolution order:
//! 1. a deprecated `currency` or `issuer` accompanies it: issued amount;
//! 2. the owning request is a payment: XRP, converted to drops;
//! 3. otherwise: the decimal string as-is.
//!
//! Step 2 applies to native JSON numbers for any payment. Numeric *strings*
//! only convert for the legacy payment kind, whose wire shape carried XRP
//! units as text; for current kinds a numeric string is already drops.

use serde_json::Value;

use crate::model::amount::{Amount, IssuedCurrencyAmount};
use crate::normalize::decode::{classify, decode, Raw};
use crate::protocol::catalogue::{Capability, RequestKind, Version};

const DROPS_PER_XRP_DIGITS: usize = 6;

/// Which disambiguation rule applies to bare numeric amounts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AmountContext {
    /// `SEND_PAYMENT`: numbers and numeric strings are XRP units.
    LegacyPayment,
    /// Current payment: native numbers are XRP units.
    Payment,
    Other,
}

impl AmountContext {
    pub fn for_kind(kind: RequestKind) -> Self {
        match (kind.capability, kind.version) {
            (Capability::SendPayment, Version::Deprecated) => AmountContext::LegacyPayment,
            (Capability::SendPayment, Version::Current) => AmountContext::Payment,
            _ => AmountContext::Other,
        }
    }
}

pub fn parse_amount(
    input: Option<&Value>,
    deprecated_currency: Option<&str>,
    deprecated_issuer: Option<&str>,
    ctx: AmountContext,
) -> Option<Amount> {
    let numeric = |text: &str, native: bool| {
        resolve_numeric(text, native, deprecated_currency, deprecated_issuer, ctx)
    };

    match classify(input) {
        Raw::Absent => None,
        Raw::Structured(Value::Number(n)) => numeric(&n.to_string(), true),
        Raw::Structured(v) => issued(v).map(Amount::Issued),
        Raw::Encoded(s) => match serde_json::from_str::<Value>(s) {
            Ok(Value::Number(_)) => numeric(s.trim(), false),
            Ok(Value::String(inner)) => Some(Amount::Drops(inner)),
            Ok(v @ Value::Object(_)) => issued(&v).map(Amount::Issued),
            Ok(_) => None,
            // A non-JSON string is passed through: it may still be a valid
            // amount for the ledger to judge.
            Err(_) => Some(Amount::Drops(s.to_string())),
        },
    }
}

/// Trustline limit. With no `input`, a complete set of deprecated
/// value/currency/issuer strings is synthesized into the limit.
pub fn parse_limit_amount(
    input: Option<&Value>,
    deprecated_value: Option<&str>,
    deprecated_currency: Option<&str>,
    deprecated_issuer: Option<&str>,
) -> Option<IssuedCurrencyAmount> {
    if matches!(classify(input), Raw::Absent) {
        return match (
            non_empty(deprecated_value),
            non_empty(deprecated_currency),
            non_empty(deprecated_issuer),
        ) {
            (Some(value), Some(currency), Some(issuer)) => Some(IssuedCurrencyAmount {
                currency: currency.to_string(),
                issuer: issuer.to_string(),
                value: value.to_string(),
            }),
            _ => None,
        };
    }
    decode(input, issued)
}

/// Exact decimal XRP -> drops conversion. `None` for signs, exponents, or
/// more than six significant fractional digits.
pub fn xrp_to_drops(xrp: &str) -> Option<String> {
    let xrp = xrp.trim();
    let (int, frac) = xrp.split_once('.').unwrap_or((xrp, ""));
    if int.is_empty() && frac.is_empty() {
        return None;
    }
    if !int.bytes().all(|b| b.is_ascii_digit()) || !frac.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let frac = frac.trim_end_matches('0');
    if frac.len() > DROPS_PER_XRP_DIGITS {
        return None;
    }
    let digits = format!("{int}{frac:0<width$}", width = DROPS_PER_XRP_DIGITS);
    let trimmed = digits.trim_start_matches('0');
    Some(if trimmed.is_empty() { "0".to_string() } else { trimmed.to_string() })
}

fn resolve_numeric(
    text: &str,
    native: bool,
    deprecated_currency: Option<&str>,
    deprecated_issuer: Option<&str>,
    ctx: AmountContext,
) -> Option<Amount> {
    let currency = non_empty(deprecated_currency);
    let issuer = non_empty(deprecated_issuer);
    if currency.is_some() || issuer.is_some() {
        return Some(Amount::issued(
            text,
            currency.unwrap_or_default(),
            issuer.unwrap_or_default(),
        ));
    }
    match ctx {
        AmountContext::LegacyPayment => xrp_to_drops(text).map(Amount::Drops),
        AmountContext::Payment if native => xrp_to_drops(text).map(Amount::Drops),
        _ => Some(Amount::Drops(text.to_string())),
    }
}

fn issued(v: &Value) -> Option<IssuedCurrencyAmount> {
    let obj = v.as_object()?;
    let field = |k: &str| obj.get(k).and_then(Value::as_str).map(str::to_string);
    Some(IssuedCurrencyAmount {
        currency: field("currency")?,
        issuer: field("issuer")?,
        value: field("value")?,
    })
}

fn non_empty(s: Option<&str>) -> Option<&str> {
    s.filter(|s| !s.is_empty())
}
