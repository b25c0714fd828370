//! Execution-context types.
//!
//! The privileged side is an [`ExtensionContext`]: it owns its listener
//! registry, the wallet selection its handlers read, and a ledger of
//! request ids it has already taken.

pub mod extension;
pub mod ledger;
pub mod wallet;

pub use extension::{ExtensionContext, REMEMBERED_REQUESTS};
pub use ledger::{Admission, RequestLedger};
pub use wallet::{StaticWalletContext, WalletContext, WalletIdentity};
