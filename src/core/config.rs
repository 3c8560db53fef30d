use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use std::time::Duration;
use tracing::{info, warn};

use crate::core::errors::ConfigError;
use crate::core::validation::validate_node_url;

pub const ENV_CONFIG_PATH: &str = "CONFIG_PATH";
pub const ENV_NETWORK: &str = "WALLET_NETWORK";
pub const ENV_NODE_URL: &str = "WALLET_NODE_URL";
pub const ENV_REQUEST_TIMEOUT: &str = "WALLET_REQUEST_TIMEOUT_SECS";

/// A named ledger network.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkConfig {
    pub name: String,
    pub node_url: String,
}

/// Settings for talking to the ledger during import.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LedgerConfig {
    /// Key into [`WalletConfig::networks`]
    #[serde(default = "LedgerConfig::default_network")]
    pub network: String,

    /// Explicit node URL; takes precedence over `network`
    #[serde(default)]
    pub node_url: Option<String>,

    /// Per-request timeout (seconds)
    #[serde(default = "LedgerConfig::default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    /// Ledger round trips allowed per import
    #[serde(default = "LedgerConfig::default_verification_attempts")]
    pub verification_attempts: u32,

    /// Delay between verification attempts (milliseconds)
    #[serde(default = "LedgerConfig::default_retry_backoff_ms")]
    pub retry_backoff_ms: u64,
}

impl LedgerConfig {
    fn default_network() -> String { "devnet".to_string() }
    fn default_request_timeout_secs() -> u64 { 10 }
    fn default_verification_attempts() -> u32 { 1 }
    fn default_retry_backoff_ms() -> u64 { 500 }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn retry_backoff(&self) -> Duration {
        Duration::from_millis(self.retry_backoff_ms)
    }
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            network: Self::default_network(),
            node_url: None,
            request_timeout_secs: Self::default_request_timeout_secs(),
            verification_attempts: Self::default_verification_attempts(),
            retry_backoff_ms: Self::default_retry_backoff_ms(),
        }
    }
}

/// Wallet configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WalletConfig {
    #[serde(default)]
    pub ledger: LedgerConfig,

    #[serde(default = "WalletConfig::default_networks")]
    pub networks: BTreeMap<String, NetworkConfig>,
}

impl Default for WalletConfig {
    fn default() -> Self {
        Self { ledger: LedgerConfig::default(), networks: Self::default_networks() }
    }
}

impl WalletConfig {
    /// Aptos full node presets.
    pub fn default_networks() -> BTreeMap<String, NetworkConfig> {
        let mut networks = BTreeMap::new();
        networks.insert("devnet".to_string(), NetworkConfig {
            name: "Aptos Devnet".to_string(),
            node_url: "https://fullnode.devnet.aptoslabs.com/v1".to_string(),
        });
        networks.insert("testnet".to_string(), NetworkConfig {
            name: "Aptos Testnet".to_string(),
            node_url: "https://fullnode.testnet.aptoslabs.com/v1".to_string(),
        });
        networks.insert("mainnet".to_string(), NetworkConfig {
            name: "Aptos Mainnet".to_string(),
            node_url: "https://fullnode.mainnet.aptoslabs.com/v1".to_string(),
        });
        networks.insert("local".to_string(), NetworkConfig {
            name: "Local Node".to_string(),
            node_url: "http://127.0.0.1:8080/v1".to_string(),
        });
        networks
    }

    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let config = Self::from_toml_str(&content)?;
        info!(path = %path.display(), networks = config.networks.len(), "Loaded wallet config");
        Ok(config)
    }

    /// Load from `CONFIG_PATH` (default `config.toml`), then apply environment
    /// overrides. A missing file falls back to the built-in presets.
    pub fn from_env() -> Result<Self, ConfigError> {
        let path = std::env::var(ENV_CONFIG_PATH).unwrap_or_else(|_| "config.toml".to_string());
        let path = Path::new(&path);
        let mut config = if path.exists() {
            Self::load(path)?
        } else {
            warn!(path = %path.display(), "Config file not found. Using default configuration");
            Self::default()
        };
        config.apply_overrides(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    /// Apply `WALLET_*` overrides using the given lookup.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(network) = lookup(ENV_NETWORK) {
            self.ledger.network = network;
        }
        if let Some(url) = lookup(ENV_NODE_URL) {
            self.ledger.node_url = Some(url);
        }
        if let Some(raw) = lookup(ENV_REQUEST_TIMEOUT) {
            self.ledger.request_timeout_secs = raw.trim().parse().map_err(|_| {
                ConfigError::InvalidValue { key: ENV_REQUEST_TIMEOUT.to_string(), value: raw.clone() }
            })?;
        }
        Ok(())
    }

    /// The ledger endpoint imports should verify against.
    pub fn resolve_endpoint(&self) -> Result<String, ConfigError> {
        let url = match &self.ledger.node_url {
            Some(url) => url.clone(),
            None => self
                .networks
                .get(&self.ledger.network)
                .map(|n| n.node_url.clone())
                .ok_or_else(|| ConfigError::UnknownNetwork(self.ledger.network.clone()))?,
        };
        validate_node_url(&url)?;
        Ok(url)
    }
}
