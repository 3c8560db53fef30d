// filepath: src/core/wallet/import.rs
//! Import of an existing account by raw private key.
//!
//! The pipeline is linear: decode, derive, verify on the ledger, register.
//! Registration is the only side effect and happens only after the ledger
//! confirmed the account exists.

use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

use crate::blockchain::existence::{AccountExistenceChecker, VerificationResult};
use crate::blockchain::traits::{AccountResource, LedgerClient};
use crate::blockchain::AptosRestClient;
use crate::core::config::LedgerConfig;
use crate::core::derivation::derive_account;
use crate::core::domain::{AccountAddress, AccountRecord};
use crate::core::errors::{ConfigError, ImportError, VerificationFailure};
use crate::core::validation::decode_private_key;
use crate::core::wallet::state::WalletState;
use crate::monitoring::{ImportEvent, ImportObserver};
use crate::security::redaction::{redact_hex_bytes, redact_key_input};

/// How many ledger round trips one import may spend on transient failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub backoff: Duration,
}

impl RetryPolicy {
    /// One round trip, no retries.
    pub fn single_attempt() -> Self {
        Self { max_attempts: 1, backoff: Duration::ZERO }
    }

    pub fn new(max_attempts: u32, backoff: Duration) -> Self {
        Self { max_attempts: max_attempts.max(1), backoff }
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::single_attempt()
    }
}

/// Orchestrates decoding, derivation, ledger verification and registration.
pub struct ImportCoordinator {
    checker: AccountExistenceChecker,
    wallet_state: Arc<dyn WalletState>,
    observers: Vec<Arc<dyn ImportObserver>>,
    retry: RetryPolicy,
}

impl ImportCoordinator {
    pub fn new(ledger: Arc<dyn LedgerClient>, wallet_state: Arc<dyn WalletState>) -> Self {
        Self {
            checker: AccountExistenceChecker::new(ledger),
            wallet_state,
            observers: Vec::new(),
            retry: RetryPolicy::default(),
        }
    }

    /// Coordinator backed by the Aptos REST client, using the configured
    /// timeout and attempt budget.
    pub fn from_config(
        config: &LedgerConfig,
        wallet_state: Arc<dyn WalletState>,
    ) -> Result<Self, ConfigError> {
        let client = AptosRestClient::new()?;
        Ok(Self::new(Arc::new(client), wallet_state)
            .with_timeout(config.request_timeout())
            .with_retry_policy(RetryPolicy::new(
                config.verification_attempts,
                config.retry_backoff(),
            )))
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.checker = self.checker.with_timeout(timeout);
        self
    }

    pub fn with_retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    pub fn with_observer(mut self, observer: Arc<dyn ImportObserver>) -> Self {
        self.observers.push(observer);
        self
    }

    /// Import the account controlled by `raw_input` after confirming it
    /// exists on the ledger at `ledger_endpoint`.
    pub async fn import_by_private_key(
        &self,
        raw_input: &str,
        ledger_endpoint: &str,
    ) -> Result<AccountRecord, ImportError> {
        self.import_by_private_key_with_cancel(raw_input, ledger_endpoint, &CancellationToken::new())
            .await
    }

    /// Same as [`Self::import_by_private_key`], aborting the ledger query
    /// when `cancel` fires. A cancelled import registers nothing.
    #[instrument(
        name = "import_by_private_key",
        skip_all,
        fields(import_id = %Uuid::new_v4(), endpoint = %ledger_endpoint)
    )]
    pub async fn import_by_private_key_with_cancel(
        &self,
        raw_input: &str,
        ledger_endpoint: &str,
        cancel: &CancellationToken,
    ) -> Result<AccountRecord, ImportError> {
        self.emit(ImportEvent::Started { network: ledger_endpoint.to_string() });

        let result = self.run(raw_input, ledger_endpoint, cancel).await;

        match &result {
            Ok(record) => {
                info!(address = %record.address(), public_key = %record.identity.public_key, "Account imported");
                self.emit(ImportEvent::Succeeded {
                    address: record.address(),
                    network: ledger_endpoint.to_string(),
                });
            }
            Err(err) => {
                warn!(kind = %err.kind(), error = %err, "Account import failed");
                self.emit(ImportEvent::Failed {
                    kind: err.kind(),
                    address: err.address(),
                    network: ledger_endpoint.to_string(),
                });
            }
        }
        result
    }

    async fn run(
        &self,
        raw_input: &str,
        ledger_endpoint: &str,
        cancel: &CancellationToken,
    ) -> Result<AccountRecord, ImportError> {
        debug!(input = %redact_key_input(raw_input), "Decoding private key");
        let private_key = decode_private_key(raw_input).map_err(ImportError::InvalidFormat)?;
        debug!(key = %redact_hex_bytes(private_key.as_bytes()), "Decoded private key");

        let identity = derive_account(&private_key).map_err(ImportError::InvalidKey)?;

        let resources = self.verify(&identity.address, ledger_endpoint, cancel).await?;
        debug!(address = %identity.address, resources = resources.len(), "Account verified on ledger");

        let record = AccountRecord::new(identity, private_key, ledger_endpoint);
        self.wallet_state
            .add_account(record.clone())
            .await
            .map_err(ImportError::RegistrationFailed)?;
        Ok(record)
    }

    async fn verify(
        &self,
        address: &AccountAddress,
        ledger_endpoint: &str,
        cancel: &CancellationToken,
    ) -> Result<Vec<AccountResource>, ImportError> {
        let mut attempt = 1;
        loop {
            match self.checker.check_exists(address, ledger_endpoint, cancel).await {
                VerificationResult::Found(resources) => return Ok(resources),
                VerificationResult::NotFound => {
                    return Err(ImportError::AccountNotFound { address: *address })
                }
                VerificationResult::TransientError(cause) => {
                    if cause.is_cancelled() || attempt >= self.retry.max_attempts {
                        return Err(ImportError::VerificationFailed(cause));
                    }
                    warn!(
                        attempt,
                        max_attempts = self.retry.max_attempts,
                        cause = %cause,
                        "Ledger verification failed, retrying"
                    );
                    tokio::select! {
                        _ = cancel.cancelled() => {
                            return Err(ImportError::VerificationFailed(VerificationFailure::Cancelled));
                        }
                        _ = tokio::time::sleep(self.retry.backoff) => {}
                    }
                    attempt += 1;
                }
            }
        }
    }

    fn emit(&self, event: ImportEvent) {
        for observer in &self.observers {
            observer.on_event(&event);
        }
    }
}
