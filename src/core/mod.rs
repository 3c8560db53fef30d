pub mod config;
pub mod derivation;
pub mod domain;
pub mod errors;
pub mod validation;
pub mod wallet;

pub use domain::{AccountAddress, AccountIdentity, AccountRecord, PrivateKey, PublicKey};
pub use errors::{ImportError, ImportErrorKind};
pub use wallet::{ImportCoordinator, InMemoryWalletState, WalletState};
