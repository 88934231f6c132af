//! Chained configuration provider with fallback behavior

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::Mutex;

use super::callbacks::next_token_id;
use super::scoped::ScopedProvider;
use super::traits::{ChangeCallback, ConfigProvider, SharedProvider};
use super::value::ConfigValue;

/// A provider that chains multiple providers together with fallback behavior
///
/// Lookups try each provider in order and return the first result that has
/// a value. Change callbacks are registered on every provider in the chain;
/// the returned chain token unregisters all of them at once.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use confkit_core::config::{ChainConfigProvider, ConfigProvider, EnvConfigProvider, MemoryConfigProvider};
///
/// let overrides = Arc::new(MemoryConfigProvider::new());
/// let defaults = Arc::new(MemoryConfigProvider::with_name("defaults"));
/// defaults.set("log.level", "info");
///
/// // Try overrides first, then the environment, then defaults
/// let chain = ChainConfigProvider::new(vec![
///     overrides.clone(),
///     Arc::new(EnvConfigProvider::with_prefix("MYAPP")),
///     defaults,
/// ]);
/// assert_eq!(chain.get_value("log.level").source(), "defaults");
/// ```
pub struct ChainConfigProvider {
    providers: Vec<SharedProvider>,
    tokens: Mutex<HashMap<String, Vec<(usize, String)>>>,
}

impl ChainConfigProvider {
    /// Create a new chain provider
    ///
    /// Providers are tried in order for lookups.
    pub fn new(providers: Vec<SharedProvider>) -> Self {
        if providers.is_empty() {
            panic!("ChainConfigProvider requires at least one provider");
        }
        Self {
            providers,
            tokens: Mutex::new(HashMap::new()),
        }
    }

    /// Get the providers in this chain
    pub fn providers(&self) -> &[SharedProvider] {
        &self.providers
    }

    /// Find which provider has a key
    pub fn find_provider(&self, key: &str) -> Option<&SharedProvider> {
        self.providers.iter().find(|p| p.get_value(key).has_value())
    }
}

impl ConfigProvider for ChainConfigProvider {
    fn name(&self) -> &str {
        "chain"
    }

    fn get_value(&self, key: &str) -> ConfigValue {
        for provider in &self.providers {
            let value = provider.get_value(key);
            if value.has_value() {
                return value;
            }
        }
        ConfigValue::not_found(key, self.name())
    }

    fn scope(self: Arc<Self>, prefix: &str) -> SharedProvider {
        Arc::new(ScopedProvider::new(prefix, self))
    }

    fn register_change_callback(&self, key: &str, callback: ChangeCallback) -> String {
        let registered: Vec<(usize, String)> = self
            .providers
            .iter()
            .enumerate()
            .map(|(i, p)| (i, p.register_change_callback(key, callback.clone())))
            .filter(|(_, token)| !token.is_empty())
            .collect();

        // None of the providers support dynamic updates
        if registered.is_empty() {
            return String::new();
        }

        let token = format!("chain-{}", next_token_id());
        self.tokens.lock().insert(token.clone(), registered);
        token
    }

    fn unregister_change_callback(&self, token: &str) -> bool {
        let Some(registered) = self.tokens.lock().remove(token) else {
            return false;
        };

        let mut removed_any = false;
        for (index, child_token) in registered {
            if self.providers[index].unregister_change_callback(&child_token) {
                removed_any = true;
            }
        }
        removed_any
    }
}

// Implement Debug manually since Arc<dyn ConfigProvider> doesn't implement Debug
impl std::fmt::Debug for ChainConfigProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let names: Vec<&str> = self.providers.iter().map(|p| p.name()).collect();
        f.debug_struct("ChainConfigProvider")
            .field("providers", &names)
            .field("registrations", &self.tokens.lock().len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{EnvConfigProvider, MemoryConfigProvider, Value};

    fn memory(name: &str, entries: &[(&str, &str)]) -> Arc<MemoryConfigProvider> {
        let provider = MemoryConfigProvider::with_name(name);
        for (k, v) in entries {
            provider.set(k, *v);
        }
        Arc::new(provider)
    }

    #[test]
    fn test_chain_provider_name() {
        let chain = ChainConfigProvider::new(vec![memory("a", &[])]);
        assert_eq!(chain.name(), "chain");
    }

    #[test]
    fn test_chain_provider_fallback() {
        let first = memory("first", &[]);
        let second = memory("second", &[("key", "from_second")]);
        let chain = ChainConfigProvider::new(vec![first, second]);

        let value = chain.get_value("key");
        assert_eq!(value.as_str().unwrap(), "from_second");
        assert_eq!(value.source(), "second");
    }

    #[test]
    fn test_chain_provider_priority() {
        let first = memory("first", &[("key", "from_first")]);
        let second = memory("second", &[("key", "from_second")]);
        let chain = ChainConfigProvider::new(vec![first, second]);

        assert_eq!(chain.get_value("key").as_str().unwrap(), "from_first");
    }

    #[test]
    fn test_chain_provider_not_found() {
        let chain = ChainConfigProvider::new(vec![memory("a", &[]), memory("b", &[])]);
        let value = chain.get_value("db.host");
        assert_eq!(value.source(), "chain");
        assert_eq!(
            value.require().unwrap_err().to_string(),
            "couldn't find key \"db.host\""
        );
    }

    #[test]
    fn test_chain_provider_find_provider() {
        let chain = ChainConfigProvider::new(vec![memory("a", &[]), memory("b", &[("key", "v")])]);
        assert_eq!(chain.find_provider("key").map(|p| p.name()), Some("b"));
        assert!(chain.find_provider("missing").is_none());
    }

    #[test]
    fn test_chain_provider_scoped() {
        let chain: SharedProvider = Arc::new(ChainConfigProvider::new(vec![
            memory("a", &[]),
            memory("b", &[("db.creds.user", "admin")]),
        ]));
        let creds = chain.scope("db").scope("creds");
        assert_eq!(creds.get_value("user").as_str().unwrap(), "admin");
    }

    #[test]
    fn test_chain_provider_callbacks() {
        let first = memory("first", &[]);
        let second = memory("second", &[]);
        let chain = ChainConfigProvider::new(vec![
            first.clone(),
            Arc::new(EnvConfigProvider::new()),
            second.clone(),
        ]);

        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = seen.clone();
        let token = chain.register_change_callback(
            "k",
            Arc::new(move |key: &str, provider: &str, value: &Value| {
                sink.lock().push((key.to_string(), provider.to_string(), value.clone()));
            }),
        );
        assert!(token.starts_with("chain-"));

        first.set("k", 1i64);
        second.set("k", 2i64);
        assert_eq!(
            *seen.lock(),
            vec![
                ("k".to_string(), "first".to_string(), Value::Int(1)),
                ("k".to_string(), "second".to_string(), Value::Int(2)),
            ]
        );

        assert!(chain.unregister_change_callback(&token));
        assert!(!chain.unregister_change_callback(&token));

        first.set("k", 3i64);
        assert_eq!(seen.lock().len(), 2);
    }

    #[test]
    fn test_chain_tokens_are_not_shared_between_chains() {
        let a = ChainConfigProvider::new(vec![memory("a", &[])]);
        let b = ChainConfigProvider::new(vec![memory("b", &[])]);
        let token_a = a.register_change_callback("k", Arc::new(|_, _, _| {}));
        let token_b = b.register_change_callback("k", Arc::new(|_, _, _| {}));
        assert_ne!(token_a, token_b);

        assert!(!b.unregister_change_callback(&token_a));
        assert!(b.unregister_change_callback(&token_b));
        assert!(a.unregister_change_callback(&token_a));
    }

    #[test]
    fn test_chain_provider_static_children() {
        let chain = ChainConfigProvider::new(vec![Arc::new(EnvConfigProvider::new())]);
        let token = chain.register_change_callback("k", Arc::new(|_, _, _| {}));
        assert!(token.is_empty());
        assert!(!chain.unregister_change_callback(&token));
        assert!(!chain.unregister_change_callback("garbage"));
    }

    #[test]
    #[should_panic(expected = "requires at least one provider")]
    fn test_chain_provider_empty_panics() {
        ChainConfigProvider::new(vec![]);
    }
}
