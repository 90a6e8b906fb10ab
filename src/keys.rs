//! Session secret handling.
//!
//! Key files are either raw bytes or hex text (with `hex = true`), the
//! same two layouts the CLI accepts through `--key` / `--hex-key`.

use std::fmt;
use std::path::Path;

use rand::RngCore;
use zeroize::Zeroizing;

use crate::error::SessionError;

/// Default length for generated secrets: one SHA-512 block's worth of key.
pub const DEFAULT_SECRET_LEN: usize = 64;

/// Key material for the session codec.
/// The bytes are wrapped in `Zeroizing` so they are wiped from memory
/// when dropped.
#[derive(Clone, PartialEq, Eq)]
pub struct Secret(Zeroizing<Vec<u8>>);

impl Secret {
    /// Wrap key bytes, rejecting an empty secret.
    pub fn new(bytes: Vec<u8>) -> Result<Self, SessionError> {
        if bytes.is_empty() {
            return Err(SessionError::EmptySecret);
        }
        Ok(Secret(Zeroizing::new(bytes)))
    }

    /// Parse a hex-encoded secret. Surrounding whitespace is ignored.
    pub fn from_hex(text: &str) -> Result<Self, SessionError> {
        let bytes = hex::decode(text.trim())
            .map_err(|e| SessionError::InvalidSecret(format!("bad hex: {e}")))?;
        Secret::new(bytes)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn to_hex(&self) -> Zeroizing<String> {
        Zeroizing::new(hex::encode(self.as_bytes()))
    }
}

impl fmt::Debug for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Secret")
            .field("len", &self.0.len())
            .finish_non_exhaustive()
    }
}

impl AsRef<[u8]> for Secret {
    fn as_ref(&self) -> &[u8] {
        self.as_bytes()
    }
}

/// Generate a fresh random secret of `len` bytes from the OS RNG.
pub fn generate_secret(len: usize) -> Result<Secret, SessionError> {
    let mut bytes = vec![0u8; len];
    rand::rngs::OsRng
        .try_fill_bytes(&mut bytes)
        .map_err(|e| SessionError::InvalidSecret(format!("OS RNG failed: {e}")))?;
    Secret::new(bytes)
}

/// Read a secret from a file, optionally hex-decoding its contents.
pub fn read_secret_file(path: &Path, hex_encoded: bool) -> Result<Secret, SessionError> {
    let raw = Zeroizing::new(std::fs::read(path)?);
    if hex_encoded {
        let text = std::str::from_utf8(&raw)
            .map_err(|_| SessionError::InvalidSecret("hex key file is not valid UTF-8".into()))?;
        Secret::from_hex(text)
    } else {
        Secret::new(raw.to_vec())
    }
}
