use reqwest::Url;
use zeroize::Zeroizing;

use crate::core::domain::{PrivateKey, PRIVATE_KEY_LENGTH};
use crate::core::errors::{ConfigError, DecodeError};

/// Strip an optional `0x`/`0X` prefix. Only the first two bytes are inspected.
fn strip_hex_prefix(input: &str) -> &str {
    match input.as_bytes() {
        [b'0', b'x' | b'X', ..] => &input[2..],
        _ => input,
    }
}

/// Decode a user-supplied hex private key.
///
/// The input is untrusted: every malformed string is reported as a
/// [`DecodeError`], never a panic, and the error never echoes the input.
pub fn decode_private_key(input: &str) -> Result<PrivateKey, DecodeError> {
    let body = strip_hex_prefix(input);
    if body.is_empty() || body.len() % 2 != 0 || !body.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(DecodeError::MalformedHex);
    }
    let bytes = Zeroizing::new(hex::decode(body).map_err(|_| DecodeError::MalformedHex)?);
    if bytes.len() != PRIVATE_KEY_LENGTH {
        return Err(DecodeError::WrongLength { expected: PRIVATE_KEY_LENGTH, actual: bytes.len() });
    }
    PrivateKey::try_from_slice(&bytes)
}

/// Render a private key as `0x`-prefixed lowercase hex.
pub fn encode_private_key(key: &PrivateKey) -> String {
    format!("0x{}", hex::encode(key.as_bytes()))
}

/// Validates a ledger node URL (http or https with a host).
pub fn validate_node_url(url: &str) -> Result<Url, ConfigError> {
    let invalid = |reason: &str| ConfigError::InvalidNodeUrl {
        url: url.to_string(),
        reason: reason.to_string(),
    };
    let parsed = Url::parse(url.trim()).map_err(|e| invalid(&e.to_string()))?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(invalid("scheme must be http or https"));
    }
    if parsed.host_str().is_none() {
        return Err(invalid("missing host"));
    }
    Ok(parsed)
}
