//! Versioned cache naming.
//!
//! Every asset cache is named `<prefix>-<version>`. Activation treats the
//! current generation as a migration checkpoint: any stored cache whose name
//! is not exactly the current one belongs to an older generation (or to
//! nothing we know) and is purged.

use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheGeneration {
    prefix: String,
    version: String,
}

impl CacheGeneration {
    pub fn new(prefix: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            version: version.into(),
        }
    }

    pub fn cache_name(&self) -> String {
        format!("{}-{}", self.prefix, self.version)
    }

    pub fn is_current(&self, cache_name: &str) -> bool {
        cache_name == self.cache_name()
    }

    /// Names in `existing` that must be deleted on activation.
    pub fn stale<'a, I>(&self, existing: I) -> Vec<&'a str>
    where
        I: IntoIterator<Item = &'a str>,
    {
        existing
            .into_iter()
            .filter(|name| !self.is_current(name))
            .collect()
    }
}

impl fmt::Display for CacheGeneration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.cache_name())
    }
}
