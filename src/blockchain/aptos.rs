//! Aptos full node REST client
//!
//! Only the account resources endpoint is used:
//! `GET {node_url}/accounts/{address}/resources`.

use async_trait::async_trait;
use reqwest::{header::ACCEPT, Client as HttpClient, Response, StatusCode, Url};
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, warn};

use super::traits::{AccountResource, LedgerClient, ResourceResponse};
use crate::core::domain::AccountAddress;
use crate::core::errors::{ConfigError, VerificationFailure};
use crate::core::validation::validate_node_url;

const CONNECT_TIMEOUT: Duration = Duration::from_secs(5);

/// Largest response body accepted from a node.
pub const MAX_RESPONSE_BYTES: usize = 1024 * 1024;

/// `error_code` the node reports for an address with no account.
const ACCOUNT_NOT_FOUND: &str = "account_not_found";

/// Error body returned by the Aptos node API.
#[derive(Debug, Deserialize)]
struct NodeError {
    #[serde(default)]
    error_code: Option<String>,
}

/// Aptos REST client
#[derive(Clone)]
pub struct AptosRestClient {
    http_client: HttpClient,
}

impl AptosRestClient {
    pub fn new() -> Result<Self, ConfigError> {
        let http_client = HttpClient::builder()
            .connect_timeout(CONNECT_TIMEOUT)
            .user_agent(concat!("aptos-hot-wallet/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| ConfigError::HttpClient(e.to_string()))?;
        Ok(Self { http_client })
    }

    fn resources_url(endpoint: &str, address: &AccountAddress) -> Result<Url, VerificationFailure> {
        validate_node_url(endpoint)
            .map_err(|e| VerificationFailure::InvalidEndpoint(e.to_string()))?;
        let url = format!("{}/accounts/{}/resources", endpoint.trim().trim_end_matches('/'), address);
        Url::parse(&url).map_err(|e| VerificationFailure::InvalidEndpoint(e.to_string()))
    }
}

fn classify_transport_error(err: reqwest::Error) -> VerificationFailure {
    if err.is_timeout() {
        VerificationFailure::Timeout
    } else {
        VerificationFailure::Transport(err.to_string())
    }
}

fn oversized_body() -> VerificationFailure {
    VerificationFailure::MalformedResponse(format!(
        "response body exceeds {} bytes",
        MAX_RESPONSE_BYTES
    ))
}

/// Read the body, giving up once it grows past [`MAX_RESPONSE_BYTES`].
async fn read_body(mut response: Response) -> Result<Vec<u8>, VerificationFailure> {
    if response.content_length().is_some_and(|len| len > MAX_RESPONSE_BYTES as u64) {
        return Err(oversized_body());
    }
    let mut body = Vec::new();
    while let Some(chunk) = response.chunk().await.map_err(classify_transport_error)? {
        if body.len() + chunk.len() > MAX_RESPONSE_BYTES {
            return Err(oversized_body());
        }
        body.extend_from_slice(&chunk);
    }
    Ok(body)
}

/// A 404 means "no such account" only when the node says so. Any other 404
/// comes from a wrong route, usually a node URL missing its `/v1` suffix.
fn is_account_not_found(body: &[u8]) -> bool {
    matches!(
        serde_json::from_slice::<NodeError>(body),
        Ok(NodeError { error_code: Some(code) }) if code == ACCOUNT_NOT_FOUND
    )
}

#[async_trait]
impl LedgerClient for AptosRestClient {
    async fn get_account_resources(
        &self,
        address: &AccountAddress,
        endpoint: &str,
    ) -> Result<ResourceResponse, VerificationFailure> {
        let url = Self::resources_url(endpoint, address)?;
        debug!(url = %url, "querying account resources");

        let response = self
            .http_client
            .get(url)
            .header(ACCEPT, "application/json")
            .send()
            .await
            .map_err(classify_transport_error)?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            let body = read_body(response).await?;
            if is_account_not_found(&body) {
                debug!(address = %address, "ledger reports account not found");
                return Ok(ResourceResponse::NotFound);
            }
            warn!(address = %address, endpoint, "404 without account_not_found, check the node url");
            return Err(VerificationFailure::UnexpectedStatus(status.as_u16()));
        }
        if !status.is_success() {
            warn!(address = %address, status = status.as_u16(), "unexpected ledger status");
            return Err(VerificationFailure::UnexpectedStatus(status.as_u16()));
        }

        let body = read_body(response).await?;
        let resources: Vec<AccountResource> = serde_json::from_slice(&body)
            .map_err(|e| VerificationFailure::MalformedResponse(e.to_string()))?;
        debug!(address = %address, count = resources.len(), "received account resources");
        Ok(ResourceResponse::Resources(resources))
    }
}
