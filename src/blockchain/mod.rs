pub mod aptos;
pub mod existence;
pub mod traits;

pub use aptos::AptosRestClient;
pub use existence::{AccountExistenceChecker, VerificationResult};
pub use traits::{AccountResource, LedgerClient, ResourceResponse};
