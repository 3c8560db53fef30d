// filepath: src/core/wallet/mod.rs
pub mod import;
pub mod state;

pub use import::{ImportCoordinator, RetryPolicy};
pub use state::{InMemoryWalletState, WalletState};
