//! Transaction flag sets.
//!
//! Callers may send flags either as a numeric bitmask or as an object of
//! named booleans (`{"tfPartialPayment": true}`). Signing wants one integer,
//! so every named set knows how to fold itself into its bitmask.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// A family of named transaction flags.
pub trait FlagSet: Clone + Default + PartialEq + Serialize + DeserializeOwned {
    /// Recognized wire names and their bit values.
    const FLAGS: &'static [(&'static str, u32)];

    /// OR of the bits whose named flag is `true`.
    fn to_bitmask(&self) -> u32;

    /// OR of every bit in the set.
    fn full_mask() -> u32 {
        Self::FLAGS.iter().fold(0, |acc, (_, bit)| acc | bit)
    }
}

/// Flags as accepted on the wire: bitmask or named booleans.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Flags<S> {
    Bitmask(u32),
    Named(S),
}

impl<S: FlagSet> Flags<S> {
    pub fn to_bitmask(&self) -> u32 {
        match self {
            Flags::Bitmask(bits) => *bits,
            Flags::Named(named) => named.to_bitmask(),
        }
    }
}

macro_rules! flag_set {
    ($(#[$meta:meta])* $name:ident { $($field:ident => $wire:literal = $bit:expr),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
        pub struct $name {
            $(
                #[serde(rename = $wire, default, skip_serializing_if = "Option::is_none")]
                pub $field: Option<bool>,
            )+
        }

        impl FlagSet for $name {
            const FLAGS: &'static [(&'static str, u32)] = &[$(($wire, $bit)),+];

            fn to_bitmask(&self) -> u32 {
                let mut bits = 0;
                $(
                    if self.$field == Some(true) {
                        bits |= $bit;
                    }
                )+
                bits
            }
        }
    };
}

flag_set! {
    /// Payment transaction flags.
    PaymentFlags {
        no_ripple_direct => "tfNoRippleDirect" = 0x0001_0000,
        partial_payment => "tfPartialPayment" = 0x0002_0000,
        limit_quality => "tfLimitQuality" = 0x0004_0000,
    }
}

flag_set! {
    /// TrustSet transaction flags.
    TrustSetFlags {
        setf_auth => "tfSetfAuth" = 0x0001_0000,
        set_no_ripple => "tfSetNoRipple" = 0x0002_0000,
        clear_no_ripple => "tfClearNoRipple" = 0x0004_0000,
        set_freeze => "tfSetFreeze" = 0x0010_0000,
        clear_freeze => "tfClearFreeze" = 0x0020_0000,
    }
}

flag_set! {
    /// AccountSet transaction flags.
    SetAccountFlags {
        require_dest_tag => "tfRequireDestTag" = 0x0001_0000,
        optional_dest_tag => "tfOptionalDestTag" = 0x0002_0000,
        require_auth => "tfRequireAuth" = 0x0004_0000,
        optional_auth => "tfOptionalAuth" = 0x0008_0000,
        disallow_xrp => "tfDisallowXRP" = 0x0010_0000,
        allow_xrp => "tfAllowXRP" = 0x0020_0000,
    }
}

flag_set! {
    /// NFTokenMint transaction flags.
    MintNftFlags {
        burnable => "tfBurnable" = 0x0000_0001,
        only_xrp => "tfOnlyXRP" = 0x0000_0002,
        trust_line => "tfTrustLine" = 0x0000_0004,
        transferable => "tfTransferable" = 0x0000_0008,
    }
}

flag_set! {
    /// NFTokenCreateOffer transaction flags.
    CreateNftOfferFlags {
        sell_nftoken => "tfSellNFToken" = 0x0000_0001,
    }
}

flag_set! {
    /// OfferCreate transaction flags.
    CreateOfferFlags {
        passive => "tfPassive" = 0x0001_0000,
        immediate_or_cancel => "tfImmediateOrCancel" = 0x0002_0000,
        fill_or_kill => "tfFillOrKill" = 0x0004_0000,
        sell => "tfSell" = 0x0008_0000,
    }
}
