//! Key-value storage that carries encoded tokens between requests.
//!
//! In a web host this is the cookie jar; `MemoryTransport` stands in for
//! it in tests and the CLI.

use std::collections::HashMap;
use std::sync::RwLock;
use std::time::{Duration, Instant};

/// Storage slot keyed by session identifier.
pub trait Transport: Send + Sync {
    /// Fetch the value stored under `id`, if any.
    fn get(&self, id: &str) -> Option<String>;

    /// Store `value` under `id` for `ttl`. A zero `ttl` expires the slot.
    fn set(&self, id: &str, value: String, ttl: Duration);

    /// Remove whatever is stored under `id`.
    fn delete(&self, id: &str);
}

#[derive(Debug)]
struct Entry {
    value: String,
    expires_at: Instant,
}

/// In-process transport with per-entry expiry.
#[derive(Debug, Default)]
pub struct MemoryTransport {
    entries: RwLock<HashMap<String, Entry>>,
}

impl MemoryTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored entries, expired ones included.
    pub fn len(&self) -> usize {
        self.entries.read().unwrap_or_else(|p| p.into_inner()).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Transport for MemoryTransport {
    fn get(&self, id: &str) -> Option<String> {
        let entries = self.entries.read().unwrap_or_else(|p| p.into_inner());
        let entry = entries.get(id)?;
        if Instant::now() >= entry.expires_at {
            return None;
        }
        Some(entry.value.clone())
    }

    fn set(&self, id: &str, value: String, ttl: Duration) {
        let mut entries = self.entries.write().unwrap_or_else(|p| p.into_inner());
        if ttl.is_zero() {
            entries.remove(id);
            return;
        }
        let Some(expires_at) = Instant::now().checked_add(ttl) else {
            tracing::warn!(id, ?ttl, "session ttl overflows the clock; not stored");
            return;
        };
        entries.insert(id.to_string(), Entry { value, expires_at });
    }

    fn delete(&self, id: &str) {
        let mut entries = self.entries.write().unwrap_or_else(|p| p.into_inner());
        entries.remove(id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HOUR: Duration = Duration::from_secs(3600);

    #[test]
    fn test_set_get_delete() {
        let t = MemoryTransport::new();
        assert!(t.is_empty());
        t.set("sid", "value".into(), HOUR);
        assert_eq!(t.get("sid").as_deref(), Some("value"));
        assert_eq!(t.len(), 1);
        t.delete("sid");
        assert_eq!(t.get("sid"), None);
        assert!(t.is_empty());
    }

    #[test]
    fn test_missing_slot() {
        assert_eq!(MemoryTransport::new().get("nope"), None);
    }

    #[test]
    fn test_zero_ttl_expires() {
        let t = MemoryTransport::new();
        t.set("sid", "value".into(), HOUR);
        t.set("sid", String::new(), Duration::ZERO);
        assert_eq!(t.get("sid"), None);
        assert!(t.is_empty());
    }

    #[test]
    fn test_expired_entry_reads_absent() {
        let t = MemoryTransport::new();
        t.set("sid", "value".into(), Duration::from_millis(1));
        std::thread::sleep(Duration::from_millis(20));
        assert_eq!(t.get("sid"), None);
    }

    #[test]
    fn test_overwrite() {
        let t = MemoryTransport::new();
        t.set("sid", "a".into(), HOUR);
        t.set("sid", "b".into(), HOUR);
        assert_eq!(t.get("sid").as_deref(), Some("b"));
        assert_eq!(t.len(), 1);
    }

    #[test]
    fn test_huge_ttl_not_stored() {
        let t = MemoryTransport::new();
        t.set("sid", "a".into(), Duration::MAX);
        assert_eq!(t.get("sid"), None);
    }
}
