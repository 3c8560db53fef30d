use std::fmt;

use thiserror::Error;

use crate::core::domain::AccountAddress;

/// Failure to turn user input into raw key bytes.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// Input is empty, has odd length, or contains non-hex characters.
    #[error("malformed hex private key")]
    MalformedHex,
    /// Input is valid hex but decodes to the wrong number of bytes.
    #[error("wrong private key length: expected {expected} bytes, got {actual}")]
    WrongLength { expected: usize, actual: usize },
}

/// Failure of the signature scheme to accept decoded key bytes.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DeriveError {
    #[error("invalid private key: {0}")]
    InvalidKey(String),
}

/// Cause of an inconclusive ledger query.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VerificationFailure {
    #[error("ledger request timed out")]
    Timeout,
    #[error("ledger request cancelled")]
    Cancelled,
    #[error("ledger transport error: {0}")]
    Transport(String),
    #[error("unexpected ledger status: {0}")]
    UnexpectedStatus(u16),
    #[error("malformed ledger response: {0}")]
    MalformedResponse(String),
    #[error("invalid ledger endpoint: {0}")]
    InvalidEndpoint(String),
}

impl VerificationFailure {
    pub fn is_cancelled(&self) -> bool {
        matches!(self, VerificationFailure::Cancelled)
    }
}

/// Rejection reported by the wallet-state collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WalletStateError {
    #[error("account {0} is already registered")]
    DuplicateAccount(AccountAddress),
    #[error("wallet state unavailable: {0}")]
    Unavailable(String),
}

/// Configuration loading and resolution errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("unknown network: {0}")]
    UnknownNetwork(String),
    #[error("invalid node url '{url}': {reason}")]
    InvalidNodeUrl { url: String, reason: String },
    #[error("invalid value for {key}: {value}")]
    InvalidValue { key: String, value: String },
    #[error("failed to build HTTP client: {0}")]
    HttpClient(String),
}

/// Terminal outcome of a failed private-key import.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ImportError {
    #[error("invalid private key format: {0}")]
    InvalidFormat(#[source] DecodeError),
    #[error(transparent)]
    InvalidKey(DeriveError),
    #[error("account {address} not found on ledger")]
    AccountNotFound { address: AccountAddress },
    #[error("account verification failed: {0}")]
    VerificationFailed(#[source] VerificationFailure),
    #[error("account registration failed: {0}")]
    RegistrationFailed(#[source] WalletStateError),
}

/// Flat discriminant of [`ImportError`], used as a telemetry label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ImportErrorKind {
    InvalidFormat,
    InvalidKey,
    AccountNotFound,
    VerificationFailed,
    RegistrationFailed,
}

impl ImportErrorKind {
    pub const ALL: [ImportErrorKind; 5] = [
        ImportErrorKind::InvalidFormat,
        ImportErrorKind::InvalidKey,
        ImportErrorKind::AccountNotFound,
        ImportErrorKind::VerificationFailed,
        ImportErrorKind::RegistrationFailed,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ImportErrorKind::InvalidFormat => "invalid_format",
            ImportErrorKind::InvalidKey => "invalid_key",
            ImportErrorKind::AccountNotFound => "account_not_found",
            ImportErrorKind::VerificationFailed => "verification_failed",
            ImportErrorKind::RegistrationFailed => "registration_failed",
        }
    }
}

impl fmt::Display for ImportErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl ImportError {
    pub fn kind(&self) -> ImportErrorKind {
        match self {
            ImportError::InvalidFormat(_) => ImportErrorKind::InvalidFormat,
            ImportError::InvalidKey(_) => ImportErrorKind::InvalidKey,
            ImportError::AccountNotFound { .. } => ImportErrorKind::AccountNotFound,
            ImportError::VerificationFailed(_) => ImportErrorKind::VerificationFailed,
            ImportError::RegistrationFailed(_) => ImportErrorKind::RegistrationFailed,
        }
    }

    /// Whether re-invoking the whole import may succeed without user action.
    pub fn is_retryable(&self) -> bool {
        match self {
            ImportError::VerificationFailed(_) => true,
            ImportError::RegistrationFailed(WalletStateError::Unavailable(_)) => true,
            _ => false,
        }
    }

    /// The derived address, when the pipeline got far enough to know it.
    pub fn address(&self) -> Option<AccountAddress> {
        match self {
            ImportError::AccountNotFound { address } => Some(*address),
            ImportError::RegistrationFailed(WalletStateError::DuplicateAccount(address)) => {
                Some(*address)
            }
            _ => None,
        }
    }

    /// Message shown to the user. Malformed and rejected keys share one
    /// message so the form does not reveal which check failed.
    pub fn user_message(&self) -> &'static str {
        match self {
            ImportError::InvalidFormat(_) | ImportError::InvalidKey(_) => "Invalid private key",
            ImportError::AccountNotFound { .. } => "Account not found",
            ImportError::VerificationFailed(VerificationFailure::Cancelled) => {
                "Import cancelled"
            }
            ImportError::VerificationFailed(_) => {
                "Unable to reach the network, please try again"
            }
            ImportError::RegistrationFailed(WalletStateError::DuplicateAccount(_)) => {
                "Account already added"
            }
            ImportError::RegistrationFailed(_) => "Unable to add account",
        }
    }
}
