//! Flag normalization, uniform across every flag set.

use serde_json::Value;

use crate::model::flags::{
    CreateNftOfferFlags, CreateOfferFlags, FlagSet, Flags, MintNftFlags, PaymentFlags,
    SetAccountFlags, TrustSetFlags,
};
use crate::normalize::decode::{classify, typed, Raw};

/// Accepts a bitmask, a named-boolean object, a numeric string, or a
/// JSON-encoded object naming at least one flag of `S`.
pub fn parse_flags<S: FlagSet>(input: Option<&Value>) -> Option<Flags<S>> {
    match classify(input) {
        Raw::Absent => None,
        Raw::Structured(Value::Number(n)) => bitmask(n.as_u64()?),
        Raw::Structured(v @ Value::Object(_)) => typed::<S>(v).map(Flags::Named),
        Raw::Structured(_) => None,
        Raw::Encoded(s) => {
            if let Ok(n) = s.trim().parse::<u64>() {
                return bitmask(n);
            }
            let parsed = serde_json::from_str::<Value>(s).ok()?;
            let obj = parsed.as_object()?;
            if !S::FLAGS.iter().any(|(name, _)| obj.contains_key(*name)) {
                return None;
            }
            typed::<S>(&parsed).map(Flags::Named)
        }
    }
}

fn bitmask<S>(n: u64) -> Option<Flags<S>> {
    u32::try_from(n).ok().map(Flags::Bitmask)
}

pub fn parse_payment_flags(input: Option<&Value>) -> Option<Flags<PaymentFlags>> {
    parse_flags(input)
}

pub fn parse_trust_set_flags(input: Option<&Value>) -> Option<Flags<TrustSetFlags>> {
    parse_flags(input)
}

pub fn parse_set_account_flags(input: Option<&Value>) -> Option<Flags<SetAccountFlags>> {
    parse_flags(input)
}

pub fn parse_mint_nft_flags(input: Option<&Value>) -> Option<Flags<MintNftFlags>> {
    parse_flags(input)
}

pub fn parse_create_nft_offer_flags(input: Option<&Value>) -> Option<Flags<CreateNftOfferFlags>> {
    parse_flags(input)
}

pub fn parse_create_offer_flags(input: Option<&Value>) -> Option<Flags<CreateOfferFlags>> {
    parse_flags(input)
}

pub fn mint_nft_flags_to_number(flags: &MintNftFlags) -> u32 {
    flags.to_bitmask()
}

pub fn create_nft_offer_flags_to_number(flags: &CreateNftOfferFlags) -> u32 {
    flags.to_bitmask()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn numbers_and_numeric_strings() {
        assert_eq!(parse_payment_flags(Some(&json!(65536))), Some(Flags::Bitmask(65536)));
        assert_eq!(parse_payment_flags(Some(&json!("65536"))), Some(Flags::Bitmask(65536)));
        assert_eq!(parse_payment_flags(Some(&json!(0))), Some(Flags::Bitmask(0)));
        assert_eq!(parse_payment_flags(Some(&json!(-1))), None);
        assert_eq!(parse_payment_flags(Some(&json!(1u64 << 40))), None);
    }

    #[test]
    fn encoded_object_needs_a_recognized_key() {
        let ok = parse_mint_nft_flags(Some(&json!(r#"{"tfBurnable":true,"tfOnlyXRP":false}"#)));
        assert_eq!(ok.map(|f| f.to_bitmask()), Some(0x1));
        assert_eq!(parse_mint_nft_flags(Some(&json!(r#"{"tfSell":true}"#))), None);
        assert_eq!(parse_mint_nft_flags(Some(&json!("[1]"))), None);
        assert_eq!(parse_mint_nft_flags(Some(&json!("garbage"))), None);
    }

    #[test]
    fn native_object_is_accepted() {
        let f = parse_trust_set_flags(Some(&json!({"tfSetFreeze": true})));
        assert_eq!(f.map(|f| f.to_bitmask()), Some(0x0010_0000));
    }

    #[test]
    fn mistyped_named_flag_is_rejected() {
        assert_eq!(parse_create_offer_flags(Some(&json!(r#"{"tfSell":"yes"}"#))), None);
        assert_eq!(parse_create_offer_flags(Some(&json!(true))), None);
    }

    #[test]
    fn companion_bitmask_helpers() {
        let mint = MintNftFlags {
            burnable: Some(true),
            transferable: Some(true),
            ..Default::default()
        };
        assert_eq!(mint_nft_flags_to_number(&mint), 0x9);
        let offer = CreateNftOfferFlags {
            sell_nftoken: Some(true),
        };
        assert_eq!(create_nft_offer_flags_to_number(&offer), 0x1);
        assert_eq!(create_nft_offer_flags_to_number(&CreateNftOfferFlags::default()), 0);
    }
}
