use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use super::traits::{AccountResource, LedgerClient, ResourceResponse};
use crate::core::domain::AccountAddress;
use crate::core::errors::VerificationFailure;

pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Outcome of an existence check.
#[derive(Debug, Clone, PartialEq)]
pub enum VerificationResult {
    Found(Vec<AccountResource>),
    NotFound,
    TransientError(VerificationFailure),
}

/// Single request/response probe for whether an account exists on the ledger.
/// Retries are the caller's concern.
#[derive(Clone)]
pub struct AccountExistenceChecker {
    client: Arc<dyn LedgerClient>,
    timeout: Duration,
}

impl AccountExistenceChecker {
    pub fn new(client: Arc<dyn LedgerClient>) -> Self {
        Self { client, timeout: DEFAULT_REQUEST_TIMEOUT }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub async fn check_exists(
        &self,
        address: &AccountAddress,
        endpoint: &str,
        cancel: &CancellationToken,
    ) -> VerificationResult {
        if cancel.is_cancelled() {
            return VerificationResult::TransientError(VerificationFailure::Cancelled);
        }

        let query = tokio::time::timeout(
            self.timeout,
            self.client.get_account_resources(address, endpoint),
        );
        let outcome = tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                debug!(address = %address, "existence check cancelled");
                return VerificationResult::TransientError(VerificationFailure::Cancelled);
            }
            outcome = query => outcome,
        };

        match outcome {
            Err(_elapsed) => {
                warn!(address = %address, timeout_ms = self.timeout.as_millis() as u64, "existence check timed out");
                VerificationResult::TransientError(VerificationFailure::Timeout)
            }
            Ok(Ok(ResourceResponse::NotFound)) => VerificationResult::NotFound,
            Ok(Ok(ResourceResponse::Resources(resources))) if resources.is_empty() => {
                VerificationResult::NotFound
            }
            Ok(Ok(ResourceResponse::Resources(resources))) => VerificationResult::Found(resources),
            Ok(Err(cause)) => VerificationResult::TransientError(cause),
        }
    }
}
