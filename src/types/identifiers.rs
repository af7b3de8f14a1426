use serde::{Deserialize, Serialize};

/// Canonical join key for a category name.
///
/// Two raw strings that produce the same key are the same category, no matter
/// how they were spelled at the source.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NormalizedKey(String);

impl NormalizedKey {
    /// Compute the key for a raw category string.
    ///
    /// Lowercases, then keeps only ASCII lowercase letters and digits.
    /// Whitespace, slashes, hyphens and any other punctuation all collapse
    /// away, so `"Back-End / Dev Ops"` and `"backend devops"` meet at the
    /// same key.
    pub fn from_raw(raw: &str) -> Self {
        let lowered = raw.to_lowercase();
        let key = lowered
            .chars()
            .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit())
            .collect();

        NormalizedKey(key)
    }

    /// The key of the empty category string.
    pub fn empty() -> Self {
        NormalizedKey(String::new())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Opaque identifier of a job record, assigned by the listings provider.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JobId(String);

impl JobId {
    pub fn new(id: impl Into<String>) -> Self {
        JobId(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}
