use thiserror::Error;

use crate::types::Algorithm;

/// Configuration-class failures.
///
/// Token-level failures (missing, short, or forged tokens) are never
/// reported through this type; `SessionCodec::open` collapses them all
/// into `None`.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("session secret must not be empty")]
    EmptySecret,

    #[error("unknown algorithm: {0}")]
    UnknownAlgorithm(String),

    #[error("unknown tag encoding: {0}")]
    UnknownTagEncoding(String),

    #[error(
        "tag length mismatch for {algorithm}: expected {expected} bytes, configured {configured}"
    )]
    TagLengthMismatch {
        algorithm: Algorithm,
        expected: usize,
        configured: usize,
    },

    #[error("invalid secret: {0}")]
    InvalidSecret(String),

    #[error("invalid config: {0}")]
    InvalidConfig(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
