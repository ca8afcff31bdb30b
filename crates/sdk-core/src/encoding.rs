//! Encoding utilities for hex and base64.
//!
//! Shared by the incident encoder, input parsing and the chain crates.

use anyhow::{anyhow, Result};
use base64::Engine;

// =============================================================================
// Hex
// =============================================================================

/// Strip a leading `0x` or `0X`, if present.
pub fn strip_hex_prefix(input: &str) -> &str {
    input
        .strip_prefix("0x")
        .or_else(|| input.strip_prefix("0X"))
        .unwrap_or(input)
}

/// Parse a hex string to raw bytes.
///
/// # Arguments
/// * `hex_str` - Hex string (with or without 0x prefix)
/// * `context` - Description for error messages (e.g., "address", "topic")
pub fn parse_hex_bytes(hex_str: &str, context: &str) -> Result<Vec<u8>> {
    let digits = strip_hex_prefix(hex_str);
    hex::decode(digits).map_err(|e| anyhow!("Invalid {} hex '{}': {}", context, hex_str, e))
}

/// Lowercase hex with a `0x` prefix.
pub fn hex_encode_prefixed(bytes: &[u8]) -> String {
    format!("0x{}", hex::encode(bytes))
}

// =============================================================================
// Base64
// =============================================================================

/// Encode bytes to a standard, padded base64 string.
pub fn base64_encode(bytes: &[u8]) -> String {
    base64::engine::general_purpose::STANDARD.encode(bytes)
}

/// Decode a base64 string with a context-aware error message.
pub fn base64_decode(b64: &str, context: &str) -> Result<Vec<u8>> {
    base64::engine::general_purpose::STANDARD
        .decode(b64)
        .map_err(|e| anyhow!("Failed to decode {} from base64: {}", context, e))
}
