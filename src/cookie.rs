//! Text encoding of sealed tokens for cookie values.
//!
//! Tokens are written as standard base64 (with padding). Reads also accept
//! the URL-safe unpadded alphabet so tokens copied from URLs still open.

use base64::Engine;

const STANDARD: base64::engine::GeneralPurpose = base64::engine::general_purpose::STANDARD;
const URL_SAFE: base64::engine::GeneralPurpose = base64::engine::general_purpose::URL_SAFE_NO_PAD;

/// Render a sealed token as a cookie value.
#[must_use]
pub fn encode_token(token: &[u8]) -> String {
    STANDARD.encode(token)
}

/// Decode a cookie value back into token bytes.
/// Returns `None` when the value is not valid base64 in either alphabet.
pub fn decode_token(value: &str) -> Option<Vec<u8>> {
    let value = value.trim();
    if let Ok(bytes) = STANDARD.decode(value) {
        return Some(bytes);
    }
    if let Ok(bytes) = URL_SAFE.decode(value) {
        return Some(bytes);
    }
    tracing::debug!(value_len = value.len(), "cookie value is not base64");
    None
}
