use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::SessionError;

/// Keyed-hash algorithm used to tag session payloads.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Algorithm {
    #[serde(rename = "sha256")]
    HmacSha256,
    #[serde(rename = "sha384")]
    HmacSha384,
    #[default]
    #[serde(rename = "sha512")]
    HmacSha512,
}

impl Algorithm {
    /// Returns the raw digest length in bytes for this algorithm.
    pub fn digest_len(self) -> usize {
        match self {
            Algorithm::HmacSha256 => HMAC_SHA256_TAG_LEN,
            Algorithm::HmacSha384 => HMAC_SHA384_TAG_LEN,
            Algorithm::HmacSha512 => HMAC_SHA512_TAG_LEN,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Algorithm::HmacSha256 => "sha256",
            Algorithm::HmacSha384 => "sha384",
            Algorithm::HmacSha512 => "sha512",
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Algorithm {
    type Err = SessionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sha256" | "hmac-sha256" => Ok(Algorithm::HmacSha256),
            "sha384" | "hmac-sha384" => Ok(Algorithm::HmacSha384),
            "sha512" | "hmac-sha512" => Ok(Algorithm::HmacSha512),
            _ => Err(SessionError::UnknownAlgorithm(s.to_string())),
        }
    }
}

/// How the tag is laid out after the payload.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TagEncoding {
    /// Raw digest bytes.
    #[default]
    Raw,
    /// Lowercase hexadecimal text of the digest (twice the digest length).
    Hex,
}

impl TagEncoding {
    pub fn name(self) -> &'static str {
        match self {
            TagEncoding::Raw => "raw",
            TagEncoding::Hex => "hex",
        }
    }
}

impl fmt::Display for TagEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for TagEncoding {
    type Err = SessionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "raw" => Ok(TagEncoding::Raw),
            "hex" => Ok(TagEncoding::Hex),
            _ => Err(SessionError::UnknownTagEncoding(s.to_string())),
        }
    }
}

/// Codec settings, fixed at construction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CodecConfig {
    pub algorithm: Algorithm,
    pub tag_encoding: TagEncoding,
    /// Explicit tag length. `None` derives it from the algorithm and encoding;
    /// `Some` must agree with that derived length.
    pub tag_len: Option<usize>,
}

impl CodecConfig {
    pub fn new(algorithm: Algorithm) -> Self {
        CodecConfig {
            algorithm,
            ..Default::default()
        }
    }

    #[must_use]
    pub fn with_tag_encoding(mut self, tag_encoding: TagEncoding) -> Self {
        self.tag_encoding = tag_encoding;
        self
    }

    #[must_use]
    pub fn with_tag_len(mut self, tag_len: usize) -> Self {
        self.tag_len = Some(tag_len);
        self
    }

    /// Number of trailing token bytes that hold the tag.
    pub fn expected_tag_len(&self) -> usize {
        let digest_len = self.algorithm.digest_len();
        match self.tag_encoding {
            TagEncoding::Raw => digest_len,
            TagEncoding::Hex => digest_len * 2,
        }
    }

    /// Check the configured tag length against the algorithm's actual output.
    pub fn validate(&self) -> Result<usize, SessionError> {
        let expected = self.expected_tag_len();
        match self.tag_len {
            Some(configured) if configured != expected => Err(SessionError::TagLengthMismatch {
                algorithm: self.algorithm,
                expected,
                configured,
            }),
            _ => Ok(expected),
        }
    }
}

/// Constant: HMAC-SHA256 tag length.
pub const HMAC_SHA256_TAG_LEN: usize = 32;

/// Constant: HMAC-SHA384 tag length.
pub const HMAC_SHA384_TAG_LEN: usize = 48;

/// Constant: HMAC-SHA512 tag length.
pub const HMAC_SHA512_TAG_LEN: usize = 64;

/// Constant: default cookie lifetime in seconds.
pub const DEFAULT_COOKIE_TTL_SECS: u64 = 3600;

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn test_algorithm_names_roundtrip() {
        for alg in [
            Algorithm::HmacSha256,
            Algorithm::HmacSha384,
            Algorithm::HmacSha512,
        ] {
            assert_eq!(alg.name().parse::<Algorithm>().unwrap(), alg);
        }
        assert_eq!("SHA512".parse::<Algorithm>().unwrap(), Algorithm::HmacSha512);
        assert!(matches!(
            "md5".parse::<Algorithm>(),
            Err(SessionError::UnknownAlgorithm(_))
        ));
    }

    #[test]
    fn test_default_is_sha512_raw() {
        let config = CodecConfig::default();
        assert_eq!(config.algorithm, Algorithm::HmacSha512);
        assert_eq!(config.validate().unwrap(), 64);
    }

    #[test]
    fn test_hex_doubles_tag_len() {
        let config = CodecConfig::default().with_tag_encoding(TagEncoding::Hex);
        assert_eq!(config.expected_tag_len(), 128);
        assert_eq!(config.with_tag_len(128).validate().unwrap(), 128);
    }

    #[test]
    fn test_mismatched_tag_len_rejected() {
        let config = CodecConfig::default().with_tag_len(128);
        match config.validate() {
            Err(SessionError::TagLengthMismatch {
                algorithm,
                expected,
                configured,
            }) => {
                assert_eq!(algorithm, Algorithm::HmacSha512);
                assert_eq!(expected, 64);
                assert_eq!(configured, 128);
            }
            other => panic!("expected TagLengthMismatch, got {other:?}"),
        }
    }

    #[test]
    fn test_serde_names() {
        let alg: Algorithm = serde_json::from_str("\"sha384\"").unwrap();
        assert_eq!(alg, Algorithm::HmacSha384);
        let enc: TagEncoding = serde_json::from_str("\"hex\"").unwrap();
        assert_eq!(enc, TagEncoding::Hex);
    }
}
