//! Session-seal: client-side session storage.
//!
//! The whole session payload lives in a cookie as `payload || HMAC tag`
//! (HMAC-SHA256/384/512). The client can read the payload but cannot
//! alter it without the server secret. Payloads are not encrypted and
//! must never hold secrets.

pub mod codec;
pub mod config;
pub mod cookie;
pub mod error;
pub mod handler;
pub mod keys;
pub mod transport;
pub mod types;

pub use codec::SessionCodec;
pub use error::SessionError;
pub use handler::{CookieSessionHandler, SessionHandler};
pub use transport::{MemoryTransport, Transport};
pub use zeroize::Zeroizing;
