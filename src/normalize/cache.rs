use std::collections::HashMap;

use crate::types::identifiers::NormalizedKey;

/// Memo table from raw category strings to their canonical keys.
///
/// Append-only between resets: once a raw string has been seen, every later
/// lookup returns the key computed the first time. The cache is owned by the
/// caller and passed where it is needed. Clearing it changes how much work
/// `normalize` does, never what it returns.
#[derive(Debug, Default)]
pub struct NormalizeCache {
    entries: HashMap<String, NormalizedKey>,
}

impl NormalizeCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Canonical key for `raw`.
    ///
    /// The empty string maps to the empty key without touching the cache.
    pub fn normalize(&mut self, raw: &str) -> NormalizedKey {
        if raw.is_empty() {
            return NormalizedKey::empty();
        }

        if let Some(key) = self.entries.get(raw) {
            return key.clone();
        }

        let key = NormalizedKey::from_raw(raw);
        self.entries.insert(raw.to_string(), key.clone());
        key
    }

    /// Like [`NormalizeCache::normalize`], treating `None` as the empty string.
    pub fn normalize_opt(&mut self, raw: Option<&str>) -> NormalizedKey {
        match raw {
            Some(s) => self.normalize(s),
            None => NormalizedKey::empty(),
        }
    }

    /// Number of raw strings memoized so far.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drop every memoized entry. Later lookups recompute from scratch.
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
