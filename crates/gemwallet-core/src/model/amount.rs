use serde::{Deserialize, Serialize};

/// Amount in an issued (non-XRP) currency.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssuedCurrencyAmount {
    pub currency: String,
    pub issuer: String,
    pub value: String,
}

/// XRP as a drops string, or an issued-currency amount.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Amount {
    Drops(String),
    Issued(IssuedCurrencyAmount),
}

impl Amount {
    pub fn issued(
        value: impl Into<String>,
        currency: impl Into<String>,
        issuer: impl Into<String>,
    ) -> Self {
        Amount::Issued(IssuedCurrencyAmount {
            currency: currency.into(),
            issuer: issuer.into(),
            value: value.into(),
        })
    }

    pub fn drops(&self) -> Option<&str> {
        match self {
            Amount::Drops(d) => Some(d),
            Amount::Issued(_) => None,
        }
    }
}
