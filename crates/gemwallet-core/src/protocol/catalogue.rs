//! Closed catalogue of request/response kinds.
//!
//! Every capability has exactly one current (`/V3`) request and response
//! name. Capabilities older than V3 also carry exactly one deprecated name
//! per direction. Current and deprecated names never collide, so routing is
//! decided by `type` alone; the payload shape is the normalizer's concern.

/// One wallet operation exposed across the bridge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Capability {
    GetNetwork,
    GetAddress,
    GetPublicKey,
    GetNft,
    SignMessage,
    SendPayment,
    SetTrustline,
    MintNft,
    CreateNftOffer,
    CancelNftOffer,
    AcceptNftOffer,
    BurnNft,
    SetAccount,
    CreateOffer,
    SignTransaction,
    SubmitTransaction,
}

/// Wire generation of a message kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Version {
    Current,
    Deprecated,
}

struct Entry {
    request: &'static str,
    deprecated_request: Option<&'static str>,
    response: &'static str,
    deprecated_response: Option<&'static str>,
}

const fn current_only(request: &'static str, response: &'static str) -> Entry {
    Entry {
        request,
        deprecated_request: None,
        response,
        deprecated_response: None,
    }
}

const fn with_legacy(
    request: &'static str,
    deprecated_request: &'static str,
    response: &'static str,
    deprecated_response: &'static str,
) -> Entry {
    Entry {
        request,
        deprecated_request: Some(deprecated_request),
        response,
        deprecated_response: Some(deprecated_response),
    }
}

impl Capability {
    pub const ALL: [Capability; 16] = [
        Capability::GetNetwork,
        Capability::GetAddress,
        Capability::GetPublicKey,
        Capability::GetNft,
        Capability::SignMessage,
        Capability::SendPayment,
        Capability::SetTrustline,
        Capability::MintNft,
        Capability::CreateNftOffer,
        Capability::CancelNftOffer,
        Capability::AcceptNftOffer,
        Capability::BurnNft,
        Capability::SetAccount,
        Capability::CreateOffer,
        Capability::SignTransaction,
        Capability::SubmitTransaction,
    ];

    fn entry(self) -> Entry {
        match self {
            Capability::GetNetwork => with_legacy(
                "REQUEST_GET_NETWORK/V3",
                "REQUEST_NETWORK",
                "RECEIVE_GET_NETWORK/V3",
                "RECEIVE_NETWORK",
            ),
            Capability::GetAddress => with_legacy(
                "REQUEST_GET_ADDRESS/V3",
                "REQUEST_ADDRESS",
                "RECEIVE_GET_ADDRESS/V3",
                "RECEIVE_ADDRESS",
            ),
            Capability::GetPublicKey => with_legacy(
                "REQUEST_GET_PUBLIC_KEY/V3",
                "REQUEST_PUBLIC_KEY",
                "RECEIVE_GET_PUBLIC_KEY/V3",
                "RECEIVE_PUBLIC_KEY",
            ),
            Capability::GetNft => with_legacy(
                "REQUEST_GET_NFT/V3",
                "REQUEST_NFT",
                "RECEIVE_GET_NFT/V3",
                "RECEIVE_NFT",
            ),
            Capability::SignMessage => with_legacy(
                "REQUEST_SIGN_MESSAGE/V3",
                "REQUEST_SIGN_MESSAGE",
                "RECEIVE_SIGN_MESSAGE/V3",
                "RECEIVE_SIGN_MESSAGE",
            ),
            Capability::SendPayment => with_legacy(
                "REQUEST_SEND_PAYMENT/V3",
                "SEND_PAYMENT",
                "RECEIVE_SEND_PAYMENT/V3",
                "RECEIVE_PAYMENT_HASH",
            ),
            Capability::SetTrustline => with_legacy(
                "REQUEST_SET_TRUSTLINE/V3",
                "REQUEST_ADD_TRUSTLINE",
                "RECEIVE_SET_TRUSTLINE/V3",
                "RECEIVE_TRUSTLINE_HASH",
            ),
            Capability::MintNft => current_only("REQUEST_MINT_NFT/V3", "RECEIVE_MINT_NFT/V3"),
            Capability::CreateNftOffer => {
                current_only("REQUEST_CREATE_NFT_OFFER/V3", "RECEIVE_CREATE_NFT_OFFER/V3")
            }
            Capability::CancelNftOffer => {
                current_only("REQUEST_CANCEL_NFT_OFFER/V3", "RECEIVE_CANCEL_NFT_OFFER/V3")
            }
            Capability::AcceptNftOffer => {
                current_only("REQUEST_ACCEPT_NFT_OFFER/V3", "RECEIVE_ACCEPT_NFT_OFFER/V3")
            }
            Capability::BurnNft => current_only("REQUEST_BURN_NFT/V3", "RECEIVE_BURN_NFT/V3"),
            Capability::SetAccount => {
                current_only("REQUEST_SET_ACCOUNT/V3", "RECEIVE_SET_ACCOUNT/V3")
            }
            Capability::CreateOffer => {
                current_only("REQUEST_CREATE_OFFER/V3", "RECEIVE_CREATE_OFFER/V3")
            }
            Capability::SignTransaction => {
                current_only("REQUEST_SIGN_TRANSACTION/V3", "RECEIVE_SIGN_TRANSACTION/V3")
            }
            Capability::SubmitTransaction => current_only(
                "REQUEST_SUBMIT_TRANSACTION/V3",
                "RECEIVE_SUBMIT_TRANSACTION/V3",
            ),
        }
    }

    /// Stable snake_case name used in logs.
    pub fn as_str(self) -> &'static str {
        match self {
            Capability::GetNetwork => "get_network",
            Capability::GetAddress => "get_address",
            Capability::GetPublicKey => "get_public_key",
            Capability::GetNft => "get_nft",
            Capability::SignMessage => "sign_message",
            Capability::SendPayment => "send_payment",
            Capability::SetTrustline => "set_trustline",
            Capability::MintNft => "mint_nft",
            Capability::CreateNftOffer => "create_nft_offer",
            Capability::CancelNftOffer => "cancel_nft_offer",
            Capability::AcceptNftOffer => "accept_nft_offer",
            Capability::BurnNft => "burn_nft",
            Capability::SetAccount => "set_account",
            Capability::CreateOffer => "create_offer",
            Capability::SignTransaction => "sign_transaction",
            Capability::SubmitTransaction => "submit_transaction",
        }
    }

    /// Whether the handler needs a selected wallet before it can run.
    pub fn requires_wallet(self) -> bool {
        !matches!(self, Capability::GetNetwork)
    }

    pub fn request_type(self) -> &'static str {
        self.entry().request
    }

    pub fn deprecated_request_type(self) -> Option<&'static str> {
        self.entry().deprecated_request
    }

    pub fn response_type(self) -> &'static str {
        self.entry().response
    }

    pub fn deprecated_response_type(self) -> Option<&'static str> {
        self.entry().deprecated_response
    }
}

/// A request `type` resolved against the catalogue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RequestKind {
    pub capability: Capability,
    pub version: Version,
}

impl RequestKind {
    pub fn current(capability: Capability) -> Self {
        Self {
            capability,
            version: Version::Current,
        }
    }

    /// `None` for capabilities introduced with V3.
    pub fn deprecated(capability: Capability) -> Option<Self> {
        capability.deprecated_request_type().map(|_| Self {
            capability,
            version: Version::Deprecated,
        })
    }

    /// Resolve a wire `type`. Unknown strings (unrelated traffic, response
    /// kinds) resolve to `None`.
    pub fn from_wire(msg_type: &str) -> Option<Self> {
        Capability::ALL.iter().find_map(|&c| {
            if c.request_type() == msg_type {
                Some(Self::current(c))
            } else if c.deprecated_request_type() == Some(msg_type) {
                Self::deprecated(c)
            } else {
                None
            }
        })
    }

    pub fn as_wire(self) -> &'static str {
        match self.version {
            Version::Current => self.capability.request_type(),
            Version::Deprecated => self
                .capability
                .deprecated_request_type()
                .unwrap_or_else(|| self.capability.request_type()),
        }
    }

    pub fn is_deprecated(self) -> bool {
        self.version == Version::Deprecated
    }

    /// The current-version kind this request converges to.
    pub fn upgrade(self) -> Self {
        Self::current(self.capability)
    }

    /// Response kind of the same wire generation.
    pub fn response(self) -> ResponseKind {
        ResponseKind {
            capability: self.capability,
            version: self.version,
        }
    }
}

/// A response `type` resolved against the catalogue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ResponseKind {
    pub capability: Capability,
    pub version: Version,
}

impl ResponseKind {
    pub fn from_wire(msg_type: &str) -> Option<Self> {
        Capability::ALL.iter().find_map(|&c| {
            let version = if c.response_type() == msg_type {
                Version::Current
            } else if c.deprecated_response_type() == Some(msg_type) {
                Version::Deprecated
            } else {
                return None;
            };
            Some(Self {
                capability: c,
                version,
            })
        })
    }

    pub fn as_wire(self) -> &'static str {
        match self.version {
            Version::Current => self.capability.response_type(),
            Version::Deprecated => self
                .capability
                .deprecated_response_type()
                .unwrap_or_else(|| self.capability.response_type()),
        }
    }
}
