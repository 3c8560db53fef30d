use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Serialize, Serializer};
use subtle::ConstantTimeEq;
use zeroize::Zeroizing;

use crate::core::errors::DecodeError;

/// Ed25519 seed length used by Aptos accounts.
pub const PRIVATE_KEY_LENGTH: usize = 32;
/// Ed25519 verifying key length.
pub const PUBLIC_KEY_LENGTH: usize = 32;
/// Aptos account addresses are full 32-byte authentication keys.
pub const ADDRESS_LENGTH: usize = 32;

/// Raw private key bytes. Zeroized on drop, never printed.
#[derive(Clone)]
pub struct PrivateKey(Zeroizing<[u8; PRIVATE_KEY_LENGTH]>);

impl PrivateKey {
    pub fn from_bytes(bytes: [u8; PRIVATE_KEY_LENGTH]) -> Self {
        Self(Zeroizing::new(bytes))
    }

    /// Copy key material out of a slice, rejecting any other length.
    pub fn try_from_slice(bytes: &[u8]) -> Result<Self, DecodeError> {
        if bytes.len() != PRIVATE_KEY_LENGTH {
            return Err(DecodeError::WrongLength {
                expected: PRIVATE_KEY_LENGTH,
                actual: bytes.len(),
            });
        }
        let mut key = Zeroizing::new([0u8; PRIVATE_KEY_LENGTH]);
        key.copy_from_slice(bytes);
        Ok(Self(key))
    }

    pub fn as_bytes(&self) -> &[u8; PRIVATE_KEY_LENGTH] {
        &self.0
    }
}

impl PartialEq for PrivateKey {
    fn eq(&self, other: &Self) -> bool {
        self.0.as_slice().ct_eq(other.0.as_slice()).into()
    }
}

impl Eq for PrivateKey {}

impl fmt::Debug for PrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PrivateKey(<redacted>)")
    }
}

/// Ed25519 verifying key bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PublicKey([u8; PUBLIC_KEY_LENGTH]);

impl PublicKey {
    pub fn from_bytes(bytes: [u8; PUBLIC_KEY_LENGTH]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; PUBLIC_KEY_LENGTH] {
        &self.0
    }

    pub fn to_hex(&self) -> String {
        format!("0x{}", hex::encode(self.0))
    }
}

impl fmt::Display for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

/// Canonical account address, rendered as `0x` followed by 64 lowercase hex digits.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AccountAddress([u8; ADDRESS_LENGTH]);

impl AccountAddress {
    pub fn new(bytes: [u8; ADDRESS_LENGTH]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; ADDRESS_LENGTH] {
        &self.0
    }

    pub fn to_hex(&self) -> String {
        format!("0x{}", hex::encode(self.0))
    }
}

impl fmt::Display for AccountAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl fmt::Debug for AccountAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AccountAddress({})", self.to_hex())
    }
}

impl Serialize for AccountAddress {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

/// Public identity derived from a private key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountIdentity {
    pub address: AccountAddress,
    pub public_key: PublicKey,
}

/// Account handed to wallet state after a successful import.
#[derive(Debug, Clone)]
pub struct AccountRecord {
    pub identity: AccountIdentity,
    pub private_key: PrivateKey,
    /// Ledger endpoint the account was verified against.
    pub network: String,
    pub imported_at: DateTime<Utc>,
}

impl AccountRecord {
    pub fn new(identity: AccountIdentity, private_key: PrivateKey, network: &str) -> Self {
        Self { identity, private_key, network: network.to_string(), imported_at: Utc::now() }
    }

    pub fn address(&self) -> AccountAddress {
        self.identity.address
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_private_key_debug_is_redacted() {
        let key = PrivateKey::from_bytes([0xab; PRIVATE_KEY_LENGTH]);
        let printed = format!("{:?}", key);
        assert!(!printed.contains("ab"));
        assert_eq!(printed, "PrivateKey(<redacted>)");
    }

    #[test]
    fn test_private_key_try_from_slice_wrong_length() {
        let err = PrivateKey::try_from_slice(&[1u8; 31]).unwrap_err();
        assert_eq!(err, DecodeError::WrongLength { expected: 32, actual: 31 });
    }

    #[test]
    fn test_private_key_equality() {
        let a = PrivateKey::from_bytes([1u8; 32]);
        let b = PrivateKey::try_from_slice(&[1u8; 32]).unwrap();
        let c = PrivateKey::from_bytes([2u8; 32]);
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_address_rendering() {
        let mut bytes = [0u8; ADDRESS_LENGTH];
        bytes[31] = 0xAB;
        let address = AccountAddress::new(bytes);
        let rendered = address.to_string();
        assert_eq!(rendered.len(), 66);
        assert!(rendered.starts_with("0x"));
        assert!(rendered.ends_with("ab"));
        assert_eq!(serde_json::to_string(&address).unwrap(), format!("\"{}\"", rendered));
    }
}
