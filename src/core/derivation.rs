//! Account derivation from a raw private key.
//!
//! Aptos single-key accounts use Ed25519. The account address of a fresh
//! account equals its authentication key:
//! `SHA3-256(public_key || 0x00)`, where `0x00` identifies the Ed25519 scheme.

use ed25519_dalek::SigningKey;
use sha3::{Digest, Sha3_256};
use tracing::debug;

use crate::core::domain::{AccountAddress, AccountIdentity, PrivateKey, PublicKey};
use crate::core::errors::DeriveError;

/// Authentication key scheme byte for single Ed25519 keys.
pub const ED25519_SCHEME: u8 = 0x00;

/// Derive the account identity for a private key. Pure and deterministic.
pub fn derive_account(private_key: &PrivateKey) -> Result<AccountIdentity, DeriveError> {
    let signing_key = SigningKey::from_bytes(private_key.as_bytes());
    let verifying_key = signing_key.verifying_key();
    if verifying_key.is_weak() {
        return Err(DeriveError::InvalidKey("public key has small order".to_string()));
    }

    let public_key = PublicKey::from_bytes(verifying_key.to_bytes());
    let address = authentication_key(&public_key);
    debug!(address = %address, "derived account identity");

    Ok(AccountIdentity { address, public_key })
}

/// Compute the authentication key (and initial address) for a public key.
pub fn authentication_key(public_key: &PublicKey) -> AccountAddress {
    let mut hasher = Sha3_256::new();
    hasher.update(public_key.as_bytes());
    hasher.update([ED25519_SCHEME]);
    let digest: [u8; 32] = hasher.finalize().into();
    AccountAddress::new(digest)
}
