//! Provider registry for discovering and creating providers by name

use std::collections::HashMap;
use std::sync::Arc;

use once_cell::sync::Lazy;
use parking_lot::RwLock;

use crate::logging::file_logger as log;

use super::env::EnvConfigProvider;
use super::memory::MemoryConfigProvider;
use super::traits::SharedProvider;

/// Factory function type for creating providers
pub type ProviderFactory = Box<dyn Fn() -> SharedProvider + Send + Sync>;

/// Definition of a registered provider
pub struct ProviderDefinition {
    /// Unique name for this provider type
    pub name: String,
    /// Human-readable description
    pub description: String,
    /// Factory function to create instances
    pub factory: ProviderFactory,
}

impl std::fmt::Debug for ProviderDefinition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderDefinition")
            .field("name", &self.name)
            .field("description", &self.description)
            .finish()
    }
}

/// Global registry of provider types
static REGISTRY: Lazy<RwLock<HashMap<String, ProviderDefinition>>> = Lazy::new(|| {
    let mut map = HashMap::new();

    map.insert(
        "memory".to_string(),
        ProviderDefinition {
            name: "memory".to_string(),
            description: "In-memory values with change callbacks".to_string(),
            factory: Box::new(|| Arc::new(MemoryConfigProvider::new())),
        },
    );

    map.insert(
        "env".to_string(),
        ProviderDefinition {
            name: "env".to_string(),
            description: "Read values from environment variables".to_string(),
            factory: Box::new(|| Arc::new(EnvConfigProvider::new())),
        },
    );

    RwLock::new(map)
});

/// Register a new provider type
///
/// Replaces any existing registration with the same name.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use confkit_core::config::{register_config_provider, create_config_provider, EnvConfigProvider};
///
/// register_config_provider(
///     "myapp-env",
///     "Environment variables prefixed with MYAPP_",
///     Box::new(|| Arc::new(EnvConfigProvider::with_prefix("MYAPP"))),
/// );
///
/// assert!(create_config_provider("myapp-env").is_some());
/// ```
pub fn register_config_provider(name: &str, description: &str, factory: ProviderFactory) {
    log::debug("registry", &format!("registering config provider '{}'", name));
    REGISTRY.write().insert(
        name.to_string(),
        ProviderDefinition {
            name: name.to_string(),
            description: description.to_string(),
            factory,
        },
    );
}

/// Create a provider by name
///
/// Returns `None` if the name is not registered.
pub fn create_config_provider(name: &str) -> Option<SharedProvider> {
    let registry = REGISTRY.read();
    let provider = registry.get(name).map(|def| (def.factory)());
    if provider.is_none() {
        log::warn("registry", &format!("unknown config provider '{}'", name));
    }
    provider
}

/// List all registered provider types as (name, description) pairs, sorted by name
pub fn list_config_providers() -> Vec<(String, String)> {
    let registry = REGISTRY.read();
    let mut list: Vec<(String, String)> = registry
        .values()
        .map(|def| (def.name.clone(), def.description.clone()))
        .collect();
    list.sort();
    list
}

/// Check if a provider type is registered
pub fn has_config_provider(name: &str) -> bool {
    REGISTRY.read().contains_key(name)
}

/// Unregister a provider type (mainly for testing)
pub fn unregister_config_provider(name: &str) -> bool {
    REGISTRY.write().remove(name).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_providers_registered() {
        assert!(has_config_provider("memory"));
        assert!(has_config_provider("env"));
    }

    #[test]
    fn test_create_builtin_providers() {
        assert_eq!(create_config_provider("memory").unwrap().name(), "memory");
        assert_eq!(create_config_provider("env").unwrap().name(), "env");
    }

    #[test]
    fn test_create_unknown_provider() {
        assert!(create_config_provider("nonexistent_xyz").is_none());
    }

    #[test]
    fn test_list_providers() {
        let providers = list_config_providers();
        let names: Vec<_> = providers.iter().map(|(n, _)| n.as_str()).collect();
        assert!(names.contains(&"memory"));
        assert!(names.contains(&"env"));
    }

    #[test]
    fn test_register_custom_provider() {
        register_config_provider(
            "test_custom_provider",
            "A test provider",
            Box::new(|| Arc::new(MemoryConfigProvider::with_name("custom"))),
        );

        assert!(has_config_provider("test_custom_provider"));
        let provider = create_config_provider("test_custom_provider").unwrap();
        assert_eq!(provider.name(), "custom");

        let scoped = provider.scope("svc");
        assert!(!scoped.get_value("key").has_value());

        assert!(unregister_config_provider("test_custom_provider"));
        assert!(!unregister_config_provider("test_custom_provider"));
        assert!(!has_config_provider("test_custom_provider"));
    }
}
