//! Host session lifecycle contract and the cookie-backed handler.

use std::time::Duration;

use crate::codec::SessionCodec;
use crate::cookie::{decode_token, encode_token};
use crate::transport::Transport;
use crate::types::DEFAULT_COOKIE_TTL_SECS;

/// Hooks a hosting session runtime calls around each request.
pub trait SessionHandler {
    /// Start of a session-handling cycle.
    fn open(&self, save_path: &str, name: &str);

    /// End of a session-handling cycle.
    fn close(&self);

    /// Load the session payload for `id`. An empty result means "no session".
    fn read(&self, id: &str) -> Vec<u8>;

    /// Persist the session payload for `id`.
    fn write(&self, id: &str, data: &[u8]);

    /// Drop whatever is stored for `id`.
    fn destroy(&self, id: &str);

    /// Remove sessions older than `max_lifetime`.
    fn gc(&self, max_lifetime: Duration);
}

/// Stores the whole session in the client's cookie, sealed by a
/// `SessionCodec`. No server-side state is kept.
#[derive(Debug)]
pub struct CookieSessionHandler<T> {
    codec: SessionCodec,
    transport: T,
    cookie_ttl: Duration,
}

impl<T: Transport> CookieSessionHandler<T> {
    pub fn new(codec: SessionCodec, transport: T) -> Self {
        CookieSessionHandler {
            codec,
            transport,
            cookie_ttl: Duration::from_secs(DEFAULT_COOKIE_TTL_SECS),
        }
    }

    #[must_use]
    pub fn with_cookie_ttl(mut self, cookie_ttl: Duration) -> Self {
        self.cookie_ttl = cookie_ttl;
        self
    }

    pub fn codec(&self) -> &SessionCodec {
        &self.codec
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn cookie_ttl(&self) -> Duration {
        self.cookie_ttl
    }
}

impl<T: Transport> SessionHandler for CookieSessionHandler<T> {
    // Nothing to initialize or tear down: all state is in the client token.
    fn open(&self, _save_path: &str, _name: &str) {}

    fn close(&self) {}

    fn read(&self, id: &str) -> Vec<u8> {
        let Some(value) = self.transport.get(id) else {
            return Vec::new();
        };
        decode_token(&value)
            .and_then(|token| self.codec.open(&token))
            .unwrap_or_default()
    }

    fn write(&self, id: &str, data: &[u8]) {
        let token = self.codec.seal(data);
        self.transport.set(id, encode_token(&token), self.cookie_ttl);
    }

    fn destroy(&self, id: &str) {
        self.transport.delete(id);
    }

    fn gc(&self, _max_lifetime: Duration) {}
}
