//! Wallet selection as seen by capability handlers.

use std::sync::RwLock;

/// A wallet the user has imported.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WalletIdentity {
    pub name: String,
    pub public_address: String,
    pub public_key: Option<String>,
}

impl WalletIdentity {
    pub fn new(name: impl Into<String>, public_address: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            public_address: public_address.into(),
            public_key: None,
        }
    }

    pub fn with_public_key(mut self, key: impl Into<String>) -> Self {
        self.public_key = Some(key.into());
        self
    }
}

/// Source of the currently selected wallet. Key custody lives behind this
/// trait and never crosses the bridge.
pub trait WalletContext: Send + Sync {
    fn wallets(&self) -> Vec<WalletIdentity>;
    fn selected_wallet(&self) -> usize;

    fn current_wallet(&self) -> Option<WalletIdentity> {
        self.wallets().into_iter().nth(self.selected_wallet())
    }
}

/// In-memory wallet list.
#[derive(Debug, Default)]
pub struct StaticWalletContext {
    inner: RwLock<(Vec<WalletIdentity>, usize)>,
}

impl StaticWalletContext {
    pub fn new(wallets: Vec<WalletIdentity>) -> Self {
        Self {
            inner: RwLock::new((wallets, 0)),
        }
    }

    /// Nothing imported, so nothing selected.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn select(&self, index: usize) {
        if let Ok(mut g) = self.inner.write() {
            g.1 = index;
        }
    }

    pub fn push(&self, wallet: WalletIdentity) {
        if let Ok(mut g) = self.inner.write() {
            g.0.push(wallet);
        }
    }
}

impl WalletContext for StaticWalletContext {
    fn wallets(&self) -> Vec<WalletIdentity> {
        self.inner.read().map(|g| g.0.clone()).unwrap_or_default()
    }

    fn selected_wallet(&self) -> usize {
        self.inner.read().map(|g| g.1).unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn current_wallet_follows_selection() {
        let ctx = StaticWalletContext::new(vec![
            WalletIdentity::new("main", "rMain"),
            WalletIdentity::new("cold", "rCold").with_public_key("ED01"),
        ]);
        assert_eq!(ctx.current_wallet().unwrap().public_address, "rMain");

        ctx.select(1);
        let w = ctx.current_wallet().unwrap();
        assert_eq!(w.name, "cold");
        assert_eq!(w.public_key.as_deref(), Some("ED01"));

        ctx.select(5);
        assert!(ctx.current_wallet().is_none());
    }

    #[test]
    fn empty_context_has_no_current_wallet() {
        let ctx = StaticWalletContext::empty();
        assert!(ctx.current_wallet().is_none());
        ctx.push(WalletIdentity::new("late", "rLate"));
        assert_eq!(ctx.current_wallet().unwrap().name, "late");
    }
}
