//! URL-keyed TTL cache for provider responses.
//!
//! Both upstream APIs meter requests, and the CLI frequently asks the same
//! question twice in one run (snapshots for display, then again for storage).
//! Every endpoint call goes through the cache.

use serde_json::Value;
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};

/// A small in-memory cache of JSON responses keyed by full URL.
#[derive(Debug)]
pub struct ResponseCache {
    ttl: Duration,
    entries: Mutex<HashMap<String, (Instant, Value)>>,
}

impl ResponseCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: Mutex::new(HashMap::new()),
        }
    }

    /// Fresh cached response for the URL, if any.
    pub fn get(&self, url: &str) -> Option<Value> {
        let entries = self.entries.lock().unwrap();
        let (stored_at, value) = entries.get(url)?;
        if stored_at.elapsed() < self.ttl {
            Some(value.clone())
        } else {
            None
        }
    }

    /// Store a response. Expired entries are dropped opportunistically.
    pub fn put(&self, url: &str, value: Value) {
        let mut entries = self.entries.lock().unwrap();
        entries.retain(|_, (stored_at, _)| stored_at.elapsed() < self.ttl);
        entries.insert(url.to_string(), (Instant::now(), value));
    }

    /// Number of live entries.
    pub fn len(&self) -> usize {
        let entries = self.entries.lock().unwrap();
        entries
            .values()
            .filter(|(stored_at, _)| stored_at.elapsed() < self.ttl)
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
