use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::core::domain::AccountAddress;
use crate::core::errors::VerificationFailure;

/// One on-chain resource held by an account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccountResource {
    #[serde(rename = "type")]
    pub resource_type: String,
    #[serde(default)]
    pub data: serde_json::Value,
}

/// Raw answer of a resources query, before existence classification.
#[derive(Debug, Clone, PartialEq)]
pub enum ResourceResponse {
    Resources(Vec<AccountResource>),
    NotFound,
}

/// Read access to a ledger's account resources.
#[async_trait]
pub trait LedgerClient: Send + Sync {
    /// Fetch the resources stored under `address` from the node at `endpoint`.
    async fn get_account_resources(
        &self,
        address: &AccountAddress,
        endpoint: &str,
    ) -> Result<ResourceResponse, VerificationFailure>;
}
