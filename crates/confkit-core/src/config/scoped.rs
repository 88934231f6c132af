//! Prefix-scoped provider

use std::sync::Arc;

use super::traits::{ChangeCallback, ConfigProvider, SharedProvider};
use super::value::ConfigValue;

/// A provider that prefixes every lookup key of another provider
///
/// With prefix `"db"`, `get_value("host")` reads `"db.host"` from the inner
/// provider. An empty prefix leaves keys untouched. Scoping a scoped provider
/// wraps it again, so prefixes accumulate in nesting order:
/// `db` then `creds` resolves `user` to `db.creds.user`.
///
/// Only lookups are prefixed. Name and change-callback calls are forwarded
/// as-is, so callback keys always refer to the inner provider's key space.
///
/// Thread safety follows the inner provider.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use confkit_core::config::{ConfigProvider, MemoryConfigProvider, ScopedProvider};
///
/// let memory = Arc::new(MemoryConfigProvider::new());
/// memory.set("db.host", "localhost");
///
/// let db = ScopedProvider::new("db", memory);
/// assert_eq!(db.get_value("host").as_str().unwrap(), "localhost");
/// assert_eq!(db.get_value("host").key(), "db.host");
/// ```
pub struct ScopedProvider {
    inner: SharedProvider,
    prefix: String,
}

impl ScopedProvider {
    /// Create a child provider given a prefix
    pub fn new(prefix: impl Into<String>, provider: SharedProvider) -> Self {
        Self {
            inner: provider,
            prefix: prefix.into(),
        }
    }

    /// The prefix this layer adds
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// The wrapped provider
    pub fn inner(&self) -> &SharedProvider {
        &self.inner
    }

    fn scoped_key(&self, key: &str) -> String {
        if self.prefix.is_empty() {
            key.to_string()
        } else {
            format!("{}.{}", self.prefix, key)
        }
    }
}

impl ConfigProvider for ScopedProvider {
    fn name(&self) -> &str {
        self.inner.name()
    }

    fn get_value(&self, key: &str) -> ConfigValue {
        self.inner.get_value(&self.scoped_key(key))
    }

    fn scope(self: Arc<Self>, prefix: &str) -> SharedProvider {
        Arc::new(ScopedProvider::new(prefix, self))
    }

    fn register_change_callback(&self, key: &str, callback: ChangeCallback) -> String {
        self.inner.register_change_callback(key, callback)
    }

    fn unregister_change_callback(&self, token: &str) -> bool {
        self.inner.unregister_change_callback(token)
    }
}

impl std::fmt::Debug for ScopedProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScopedProvider")
            .field("prefix", &self.prefix)
            .field("inner", &self.inner.name())
            .finish()
    }
}
