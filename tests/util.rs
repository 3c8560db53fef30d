//! Shared helpers for integration tests.
#![allow(dead_code)]

use aptos_hot_wallet::core::domain::AccountRecord;
use aptos_hot_wallet::core::errors::WalletStateError;
use aptos_hot_wallet::core::wallet::WalletState;
use aptos_hot_wallet::monitoring::{ImportEvent, ImportObserver};
use async_trait::async_trait;
use parking_lot::Mutex;
use serde_json::{json, Value};

/// Scenario A key: 32 bytes of 0x11.
pub fn key_0x11() -> String {
    format!("0x{}", "11".repeat(32))
}

/// A typical resources response for an initialised account.
pub fn account_resources_body() -> Value {
    json!([
        {
            "type": "0x1::account::Account",
            "data": {
                "authentication_key": "0x00",
                "sequence_number": "0"
            }
        },
        {
            "type": "0x1::coin::CoinStore<0x1::aptos_coin::AptosCoin>",
            "data": { "coin": { "value": "100000000" } }
        }
    ])
}

/// The node's answer for an address with no account.
pub fn account_not_found_body() -> Value {
    json!({
        "message": "Account not found by Address(0x0) and Ledger version(1)",
        "error_code": "account_not_found",
        "vm_error_code": null
    })
}

/// Wallet state spy that records every registration attempt.
#[derive(Default)]
pub struct RecordingWalletState {
    pub calls: Mutex<Vec<AccountRecord>>,
    pub reject: Option<WalletStateError>,
}

impl RecordingWalletState {
    pub fn rejecting(err: WalletStateError) -> Self {
        Self { calls: Mutex::new(Vec::new()), reject: Some(err) }
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().len()
    }
}

#[async_trait]
impl WalletState for RecordingWalletState {
    async fn add_account(&self, record: AccountRecord) -> Result<(), WalletStateError> {
        self.calls.lock().push(record);
        match &self.reject {
            Some(err) => Err(err.clone()),
            None => Ok(()),
        }
    }
}

/// Observer that keeps every event it sees.
#[derive(Default)]
pub struct RecordingObserver {
    pub events: Mutex<Vec<ImportEvent>>,
}

impl RecordingObserver {
    pub fn events(&self) -> Vec<ImportEvent> {
        self.events.lock().clone()
    }
}

impl ImportObserver for RecordingObserver {
    fn on_event(&self, event: &ImportEvent) {
        self.events.lock().push(event.clone());
    }
}
