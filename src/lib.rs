#![allow(clippy::needless_return)]
// src/lib.rs

pub mod blockchain;
pub mod cli;
pub mod core;
pub mod monitoring;
pub mod security;

pub use crate::core::wallet::{ImportCoordinator, InMemoryWalletState, RetryPolicy, WalletState};
