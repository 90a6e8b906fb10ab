//! Session sealing and opening.
//!
//! A sealed token is `payload || tag`, where `tag` is the keyed hash of
//! `payload` under the session secret. The tag has a fixed length per
//! configuration, so the split point is always `len - tag_len`.

use std::fmt;

use hmac::{Hmac, Mac};
use sha2::{Sha256, Sha384, Sha512};

use crate::error::SessionError;
use crate::types::*;

/// Keyed hash state with the secret already absorbed.
/// Cloned per call so `seal`/`open` never touch the key schedule again.
#[derive(Clone)]
enum KeyedHash {
    Sha256(Hmac<Sha256>),
    Sha384(Hmac<Sha384>),
    Sha512(Hmac<Sha512>),
}

impl KeyedHash {
    fn new(algorithm: Algorithm, secret: &[u8]) -> Result<Self, SessionError> {
        let invalid = |e: hmac::digest::InvalidLength| {
            SessionError::InvalidSecret(format!("invalid HMAC key: {e}"))
        };
        Ok(match algorithm {
            Algorithm::HmacSha256 => {
                KeyedHash::Sha256(<Hmac<Sha256> as Mac>::new_from_slice(secret).map_err(invalid)?)
            }
            Algorithm::HmacSha384 => {
                KeyedHash::Sha384(<Hmac<Sha384> as Mac>::new_from_slice(secret).map_err(invalid)?)
            }
            Algorithm::HmacSha512 => {
                KeyedHash::Sha512(<Hmac<Sha512> as Mac>::new_from_slice(secret).map_err(invalid)?)
            }
        })
    }

    fn digest(&self, payload: &[u8]) -> Vec<u8> {
        match self {
            KeyedHash::Sha256(mac) => finish(mac.clone(), payload),
            KeyedHash::Sha384(mac) => finish(mac.clone(), payload),
            KeyedHash::Sha512(mac) => finish(mac.clone(), payload),
        }
    }

    /// Constant-time check of a raw digest against `payload`.
    fn verify(&self, payload: &[u8], tag: &[u8]) -> bool {
        match self {
            KeyedHash::Sha256(mac) => check(mac.clone(), payload, tag),
            KeyedHash::Sha384(mac) => check(mac.clone(), payload, tag),
            KeyedHash::Sha512(mac) => check(mac.clone(), payload, tag),
        }
    }
}

fn finish<M: Mac>(mut mac: M, payload: &[u8]) -> Vec<u8> {
    mac.update(payload);
    mac.finalize().into_bytes().to_vec()
}

fn check<M: Mac>(mut mac: M, payload: &[u8], tag: &[u8]) -> bool {
    mac.update(payload);
    mac.verify_slice(tag).is_ok()
}

fn is_lower_hex(bytes: &[u8]) -> bool {
    bytes
        .iter()
        .all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'f'))
}

/// Seals and opens client-held session tokens.
///
/// Configuration is immutable after construction, so a single codec can
/// be shared across threads without locking.
#[derive(Clone)]
pub struct SessionCodec {
    keyed: KeyedHash,
    config: CodecConfig,
    tag_len: usize,
}

impl SessionCodec {
    /// Build a codec, rejecting an empty secret or a tag length that does
    /// not match the algorithm's output.
    pub fn new(secret: &[u8], config: &CodecConfig) -> Result<Self, SessionError> {
        if secret.is_empty() {
            return Err(SessionError::EmptySecret);
        }
        let tag_len = config.validate()?;
        let keyed = KeyedHash::new(config.algorithm, secret)?;
        Ok(SessionCodec {
            keyed,
            config: CodecConfig {
                tag_len: Some(tag_len),
                ..*config
            },
            tag_len,
        })
    }

    /// Codec with the default configuration (HMAC-SHA512, raw tag).
    pub fn with_defaults(secret: &[u8]) -> Result<Self, SessionError> {
        SessionCodec::new(secret, &CodecConfig::default())
    }

    pub fn config(&self) -> &CodecConfig {
        &self.config
    }

    pub fn algorithm(&self) -> Algorithm {
        self.config.algorithm
    }

    /// Length of the tag appended by `seal`.
    pub fn tag_len(&self) -> usize {
        self.tag_len
    }

    /// Compute the tag for `payload` in the configured encoding.
    #[must_use]
    pub fn tag(&self, payload: &[u8]) -> Vec<u8> {
        let digest = self.keyed.digest(payload);
        match self.config.tag_encoding {
            TagEncoding::Raw => digest,
            TagEncoding::Hex => hex::encode(digest).into_bytes(),
        }
    }

    /// Append the tag to `payload`, producing a token.
    #[must_use]
    pub fn seal(&self, payload: &[u8]) -> Vec<u8> {
        let tag = self.tag(payload);
        let mut token = Vec::with_capacity(payload.len() + tag.len());
        token.extend_from_slice(payload);
        token.extend_from_slice(&tag);
        tracing::trace!(payload_len = payload.len(), "sealed session payload");
        token
    }

    /// Split a token into `(payload, tag)` without verifying anything.
    /// Returns `None` when the token is shorter than the tag.
    pub fn split_token<'a>(&self, token: &'a [u8]) -> Option<(&'a [u8], &'a [u8])> {
        let split = token.len().checked_sub(self.tag_len)?;
        Some(token.split_at(split))
    }

    /// Verify a token and return its payload.
    ///
    /// Every failure (short token, malformed tag, wrong tag) yields `None`;
    /// callers must treat that exactly like "no session".
    #[must_use]
    pub fn open(&self, token: &[u8]) -> Option<Vec<u8>> {
        let Some((payload, tag)) = self.split_token(token) else {
            tracing::debug!(token_len = token.len(), "rejected session token: too short");
            return None;
        };

        let verified = match self.config.tag_encoding {
            TagEncoding::Raw => self.keyed.verify(payload, tag),
            TagEncoding::Hex => {
                if is_lower_hex(tag) {
                    hex::decode(tag)
                        .map(|raw| self.keyed.verify(payload, &raw))
                        .unwrap_or(false)
                } else {
                    false
                }
            }
        };

        if !verified {
            tracing::debug!(token_len = token.len(), "rejected session token: bad tag");
            return None;
        }
        Some(payload.to_vec())
    }
}

impl fmt::Debug for SessionCodec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionCodec")
            .field("algorithm", &self.config.algorithm)
            .field("tag_encoding", &self.config.tag_encoding)
            .field("tag_len", &self.tag_len)
            .finish_non_exhaustive()
    }
}
