//! Legacy payload normalizer.
//!
//! Every function here takes one raw field as it arrived on the wire and
//! returns its canonical type, or `None` when the field should be treated
//! as unset. Nothing in this module returns an error: a malformed legacy
//! field never fails the whole request. Only `request::normalize_request`
//! reports `BadRequest`, and only for required fields that came out empty.
//!
//! Decoding is two-layered (see `decode`): first decide whether the input
//! is absent, already structured, or a string to JSON-parse; then validate
//! the structure for the field kind.

pub mod amount;
pub mod array;
pub mod decode;
pub mod flags;
pub mod request;

pub use amount::{parse_amount, parse_limit_amount, xrp_to_drops, AmountContext};
pub use array::{parse_array, parse_memos, parse_signers, parse_transaction};
pub use decode::{classify, decode, decode_or, Raw};
pub use flags::{
    create_nft_offer_flags_to_number, mint_nft_flags_to_number, parse_create_nft_offer_flags,
    parse_create_offer_flags, parse_flags, parse_mint_nft_flags, parse_payment_flags,
    parse_set_account_flags, parse_trust_set_flags,
};
pub use request::normalize_request;
