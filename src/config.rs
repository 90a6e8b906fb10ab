//! TOML configuration for hosts and the CLI.
//!
//! ```toml
//! algorithm = "sha512"
//! tag_encoding = "raw"
//! cookie_ttl_secs = 3600
//! secret_file = "/etc/session-seal/secret.hex"
//! secret_hex = true
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

use crate::codec::SessionCodec;
use crate::error::SessionError;
use crate::keys::{read_secret_file, Secret};
use crate::types::*;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SessionConfig {
    pub algorithm: Algorithm,
    pub tag_encoding: TagEncoding,
    pub tag_length: Option<usize>,
    pub cookie_ttl_secs: u64,
    pub secret_file: Option<PathBuf>,
    pub secret_hex: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        SessionConfig {
            algorithm: Algorithm::default(),
            tag_encoding: TagEncoding::default(),
            tag_length: None,
            cookie_ttl_secs: DEFAULT_COOKIE_TTL_SECS,
            secret_file: None,
            secret_hex: false,
        }
    }
}

impl SessionConfig {
    pub fn from_toml_str(text: &str) -> Result<Self, SessionError> {
        toml::from_str(text).map_err(|e| SessionError::InvalidConfig(e.to_string()))
    }

    /// Load a config file. Relative `secret_file` paths are resolved
    /// against the config file's directory.
    pub fn load(path: &Path) -> Result<Self, SessionError> {
        let text = std::fs::read_to_string(path)?;
        let mut config = Self::from_toml_str(&text)?;
        if let (Some(secret_file), Some(dir)) = (&config.secret_file, path.parent()) {
            if secret_file.is_relative() {
                config.secret_file = Some(dir.join(secret_file));
            }
        }
        tracing::debug!(path = %path.display(), algorithm = %config.algorithm, "loaded session config");
        Ok(config)
    }

    pub fn codec_config(&self) -> CodecConfig {
        CodecConfig {
            algorithm: self.algorithm,
            tag_encoding: self.tag_encoding,
            tag_len: self.tag_length,
        }
    }

    pub fn cookie_ttl(&self) -> Duration {
        Duration::from_secs(self.cookie_ttl_secs)
    }

    pub fn load_secret(&self) -> Result<Secret, SessionError> {
        let path = self
            .secret_file
            .as_deref()
            .ok_or_else(|| SessionError::InvalidConfig("secret_file is not set".into()))?;
        read_secret_file(path, self.secret_hex)
    }

    /// Read the secret and build a codec in one step.
    pub fn build_codec(&self) -> Result<SessionCodec, SessionError> {
        let secret = self.load_secret()?;
        SessionCodec::new(secret.as_bytes(), &self.codec_config())
    }
}
