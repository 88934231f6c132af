//! In-memory configuration provider

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use parking_lot::RwLock;

use crate::logging::{Logger, NoOpLogger, SharedLogger};

use super::callbacks::CallbackRegistry;
use super::scoped::ScopedProvider;
use super::traits::{ChangeCallback, ConfigProvider, SharedProvider};
use super::value::{ConfigValue, Value};

/// In-memory configuration provider with change notification
///
/// Keys are flat dotted strings (`"db.creds.user"`). `set` and `remove`
/// notify callbacks registered for that exact key.
///
/// # Thread Safety
///
/// Values and callbacks sit behind `RwLock`s; the provider is safe to share
/// across threads. Callbacks run on the thread that called `set`/`remove`,
/// after the value lock is released.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use confkit_core::config::{ConfigProvider, MemoryConfigProvider};
///
/// let config = MemoryConfigProvider::new();
/// let token = config.register_change_callback(
///     "feature.enabled",
///     Arc::new(|key: &str, provider: &str, value: &confkit_core::config::Value| {
///         println!("{} changed in {}: {}", key, provider, value);
///     }),
/// );
///
/// config.set("feature.enabled", true);
/// assert!(config.unregister_change_callback(&token));
/// ```
pub struct MemoryConfigProvider {
    name: String,
    values: RwLock<HashMap<String, Value>>,
    callbacks: CallbackRegistry,
    logger: SharedLogger,
}

impl Default for MemoryConfigProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryConfigProvider {
    /// Create a new empty provider named "memory"
    pub fn new() -> Self {
        Self::with_name("memory")
    }

    /// Create an empty provider with a custom name
    pub fn with_name(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            callbacks: CallbackRegistry::new(name.clone()),
            name,
            values: RwLock::new(HashMap::new()),
            logger: Arc::new(NoOpLogger::new()),
        }
    }

    /// Create a provider seeded from a nested value
    ///
    /// Maps are flattened into dotted keys; any other value is stored as-is
    /// under the empty key.
    pub fn with_values(values: Value) -> Self {
        let provider = Self::new();
        {
            let mut guard = provider.values.write();
            flatten_into("", values, &mut guard);
        }
        provider
    }

    /// Use `logger` for dispatch diagnostics
    pub fn with_logger(mut self, logger: SharedLogger) -> Self {
        self.logger = logger;
        self
    }

    /// Store a value and notify callbacks for `key`
    ///
    /// Returns the previous value, if any.
    pub fn set(&self, key: &str, value: impl Into<Value>) -> Option<Value> {
        let value = value.into();
        let previous = self.values.write().insert(key.to_string(), value.clone());

        let notified = self.callbacks.notify(key, &self.name, &value);
        if notified > 0 {
            self.logger
                .debug(&format!("{}: '{}' changed, notified {} callback(s)", self.name, key, notified));
        }
        previous
    }

    /// Remove a value and notify callbacks for `key` with `Value::Null`
    pub fn remove(&self, key: &str) -> Option<Value> {
        let previous = self.values.write().remove(key);
        if previous.is_some() {
            let notified = self.callbacks.notify(key, &self.name, &Value::Null);
            if notified > 0 {
                self.logger
                    .debug(&format!("{}: '{}' removed, notified {} callback(s)", self.name, key, notified));
            }
        }
        previous
    }

    /// Get the number of stored keys
    pub fn len(&self) -> usize {
        self.values.read().len()
    }

    /// Check if the provider holds no values
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Remove all values without notifying callbacks
    pub fn clear(&self) {
        self.values.write().clear();
    }

    /// Number of registered change callbacks
    pub fn callback_count(&self) -> usize {
        self.callbacks.len()
    }

    /// All stored keys, sorted
    pub fn keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self.values.read().keys().cloned().collect();
        keys.sort();
        keys
    }
}

fn flatten_into(prefix: &str, value: Value, out: &mut HashMap<String, Value>) {
    match value {
        Value::Map(map) if !map.is_empty() => {
            for (k, v) in map {
                let key = if prefix.is_empty() { k } else { format!("{}.{}", prefix, k) };
                flatten_into(&key, v, out);
            }
        }
        other => {
            out.insert(prefix.to_string(), other);
        }
    }
}

impl From<BTreeMap<String, Value>> for MemoryConfigProvider {
    fn from(map: BTreeMap<String, Value>) -> Self {
        Self::with_values(Value::Map(map))
    }
}

impl ConfigProvider for MemoryConfigProvider {
    fn name(&self) -> &str {
        &self.name
    }

    fn get_value(&self, key: &str) -> ConfigValue {
        match self.values.read().get(key) {
            Some(value) => ConfigValue::found(key, self.name.as_str(), value.clone()),
            None => ConfigValue::not_found(key, self.name.as_str()),
        }
    }

    fn scope(self: Arc<Self>, prefix: &str) -> SharedProvider {
        Arc::new(ScopedProvider::new(prefix, self))
    }

    fn register_change_callback(&self, key: &str, callback: ChangeCallback) -> String {
        self.callbacks.register(key, callback)
    }

    fn unregister_change_callback(&self, token: &str) -> bool {
        self.callbacks.unregister(token)
    }
}

impl std::fmt::Debug for MemoryConfigProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemoryConfigProvider")
            .field("name", &self.name)
            .field("keys", &self.len())
            .field("callbacks", &self.callbacks.len())
            .finish()
    }
}
