//! Cache key derivation.

/// Entity kind segment used for post keys.
pub const POST_KIND: &str = "post";

/// Builds keys of the form `<prefix>:<kind>:<id>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheKeys {
    prefix: String,
    kind: String,
}

impl CacheKeys {
    pub fn new(prefix: impl Into<String>, kind: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            kind: kind.into(),
        }
    }

    /// Key namespace for posts under `prefix`.
    pub fn posts(prefix: impl Into<String>) -> Self {
        Self::new(prefix, POST_KIND)
    }

    pub fn key(&self, id: &str) -> String {
        format!("{}:{}:{}", self.prefix, self.kind, id)
    }
}
