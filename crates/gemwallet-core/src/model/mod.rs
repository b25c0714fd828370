//! Canonical in-memory model.
//!
//! Whatever wire generation produced a request, handlers only ever see the
//! types in this module.

pub mod amount;
pub mod common;
pub mod flags;
pub mod request;
pub mod response;

pub use amount::{Amount, IssuedCurrencyAmount};
pub use common::{Memo, MemoFields, Signer, SignerFields, TransactionCommon};
pub use flags::{
    CreateNftOfferFlags, CreateOfferFlags, FlagSet, Flags, MintNftFlags, PaymentFlags,
    SetAccountFlags, TrustSetFlags,
};
pub use request::*;
pub use response::*;
