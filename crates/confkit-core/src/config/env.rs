//! Environment variable configuration provider

use std::env;
use std::sync::Arc;

use super::scoped::ScopedProvider;
use super::traits::{ConfigProvider, SharedProvider};
use super::value::ConfigValue;

/// Configuration provider that reads from environment variables
///
/// This provider is read-only and static: change callbacks are no-ops.
///
/// # Key Mapping
///
/// Dotted keys map to upper-case variable names, with `.` and `-` replaced
/// by `_`:
/// - `db.host` → `DB_HOST`
/// - `db.host` with prefix `APP` → `APP_DB_HOST`
/// - `http.read-timeout` → `HTTP_READ_TIMEOUT`
///
/// Empty variables are treated as unset.
///
/// # Example
///
/// ```
/// use confkit_core::config::EnvConfigProvider;
///
/// let env = EnvConfigProvider::with_prefix("MYAPP");
/// assert_eq!(env.variable_name("db.host"), "MYAPP_DB_HOST");
/// ```
#[derive(Debug, Clone, Default)]
pub struct EnvConfigProvider {
    prefix: Option<String>,
}

impl EnvConfigProvider {
    /// Create a provider without a variable prefix
    pub fn new() -> Self {
        Self { prefix: None }
    }

    /// Create a provider that prepends `PREFIX_` to every variable name
    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        let prefix = prefix.into();
        Self {
            prefix: if prefix.is_empty() { None } else { Some(prefix) },
        }
    }

    /// Get the environment variable name for a config key
    pub fn variable_name(&self, key: &str) -> String {
        let normalized = normalize(key);
        match &self.prefix {
            Some(prefix) => format!("{}_{}", normalize(prefix), normalized),
            None => normalized,
        }
    }
}

fn normalize(raw: &str) -> String {
    raw.chars()
        .map(|c| match c {
            '.' | '-' => '_',
            c => c.to_ascii_uppercase(),
        })
        .collect()
}

impl ConfigProvider for EnvConfigProvider {
    fn name(&self) -> &str {
        "env"
    }

    fn get_value(&self, key: &str) -> ConfigValue {
        match env::var(self.variable_name(key)) {
            Ok(value) if !value.is_empty() => ConfigValue::found(key, self.name(), value),
            _ => ConfigValue::not_found(key, self.name()),
        }
    }

    fn scope(self: Arc<Self>, prefix: &str) -> SharedProvider {
        Arc::new(ScopedProvider::new(prefix, self))
    }
}
