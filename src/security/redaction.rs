// Helpers to keep key material out of logs.

/// Placeholder for untrusted key input: only its length is kept.
pub fn redact_key_input(s: &str) -> String {
    format!("<redacted len={}>", s.len())
}

/// Redact hex-serializable secret bytes.
pub fn redact_hex_bytes(bytes: &[u8]) -> String {
    format!("<redacted hex len={}>", bytes.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_redact_key_input_hides_content() {
        let key = "0x1111111111111111111111111111111111111111111111111111111111111111";
        let redacted = redact_key_input(key);
        assert_eq!(redacted, "<redacted len=66>");
        assert!(!redacted.contains("1111"));
    }

    #[test]
    fn test_redact_hex_bytes() {
        assert_eq!(redact_hex_bytes(&[0xde, 0xad]), "<redacted hex len=2>");
    }
}
