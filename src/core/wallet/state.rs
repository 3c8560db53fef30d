// In-memory account collection the import flow registers into.

use async_trait::async_trait;
use parking_lot::RwLock;
use std::collections::BTreeMap;
use tracing::info;

use crate::core::domain::{AccountAddress, AccountIdentity, AccountRecord};
use crate::core::errors::WalletStateError;

/// Append target for successfully imported accounts.
#[async_trait]
pub trait WalletState: Send + Sync {
    async fn add_account(&self, record: AccountRecord) -> Result<(), WalletStateError>;
}

#[derive(Default)]
struct Inner {
    accounts: BTreeMap<AccountAddress, AccountRecord>,
    active: Option<AccountAddress>,
}

/// Wallet state kept in process memory. Registrations are serialized by
/// the internal lock; a second registration of the same address is rejected.
#[derive(Default)]
pub struct InMemoryWalletState {
    inner: RwLock<Inner>,
}

impl InMemoryWalletState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn accounts(&self) -> Vec<AccountIdentity> {
        self.inner.read().accounts.values().map(|r| r.identity.clone()).collect()
    }

    pub fn get(&self, address: &AccountAddress) -> Option<AccountRecord> {
        self.inner.read().accounts.get(address).cloned()
    }

    pub fn active_account(&self) -> Option<AccountRecord> {
        let inner = self.inner.read();
        inner.active.and_then(|a| inner.accounts.get(&a).cloned())
    }

    /// Remove an account (logout). If it was active, the next remaining
    /// account becomes active.
    pub fn remove(&self, address: &AccountAddress) -> Option<AccountRecord> {
        let mut inner = self.inner.write();
        let removed = inner.accounts.remove(address)?;
        if inner.active == Some(*address) {
            inner.active = inner.accounts.keys().next().copied();
        }
        info!(address = %address, "Removed account from wallet");
        Some(removed)
    }

    pub fn len(&self) -> usize {
        self.inner.read().accounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.read().accounts.is_empty()
    }
}

#[async_trait]
impl WalletState for InMemoryWalletState {
    async fn add_account(&self, record: AccountRecord) -> Result<(), WalletStateError> {
        let address = record.address();
        let mut inner = self.inner.write();
        if inner.accounts.contains_key(&address) {
            return Err(WalletStateError::DuplicateAccount(address));
        }
        inner.accounts.insert(address, record);
        inner.active = Some(address);
        info!(address = %address, total = inner.accounts.len(), "Added account to wallet");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::derivation::derive_account;
    use crate::core::domain::PrivateKey;

    fn record(byte: u8) -> AccountRecord {
        let key = PrivateKey::from_bytes([byte; 32]);
        let identity = derive_account(&key).unwrap();
        AccountRecord::new(identity, key, "http://localhost:8080/v1")
    }

    #[tokio::test]
    async fn test_add_sets_active() {
        let state = InMemoryWalletState::new();
        let first = record(1);
        let second = record(2);
        state.add_account(first.clone()).await.unwrap();
        state.add_account(second.clone()).await.unwrap();
        assert_eq!(state.len(), 2);
        assert_eq!(state.active_account().unwrap().address(), second.address());
    }

    #[tokio::test]
    async fn test_duplicate_rejected() {
        let state = InMemoryWalletState::new();
        state.add_account(record(3)).await.unwrap();
        let err = state.add_account(record(3)).await.unwrap_err();
        assert_eq!(err, WalletStateError::DuplicateAccount(record(3).address()));
        assert_eq!(state.len(), 1);
    }

    #[tokio::test]
    async fn test_remove_active_promotes_next() {
        let state = InMemoryWalletState::new();
        let a = record(4);
        let b = record(5);
        state.add_account(a.clone()).await.unwrap();
        state.add_account(b.clone()).await.unwrap();
        assert!(state.remove(&b.address()).is_some());
        assert_eq!(state.active_account().unwrap().address(), a.address());
        assert!(state.remove(&a.address()).is_some());
        assert!(state.active_account().is_none());
        assert!(state.is_empty());
        assert!(state.remove(&a.address()).is_none());
    }

    #[tokio::test]
    async fn test_get_returns_key_material() {
        let state = InMemoryWalletState::new();
        let r = record(6);
        state.add_account(r.clone()).await.unwrap();
        let stored = state.get(&r.address()).unwrap();
        assert_eq!(stored.private_key, r.private_key);
        assert_eq!(state.accounts(), vec![r.identity]);
    }
}
