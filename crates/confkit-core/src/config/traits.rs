//! Configuration provider trait

use std::sync::Arc;

use thiserror::Error;

use super::value::{ConfigValue, Value};

/// Callback invoked when a watched key changes
///
/// Arguments are the key, the name of the provider that observed the change,
/// and the new value.
pub type ChangeCallback = Arc<dyn Fn(&str, &str, &Value) + Send + Sync>;

/// Type alias for an Arc-wrapped provider
pub type SharedProvider = Arc<dyn ConfigProvider>;

/// Configuration provider abstraction
///
/// Implementations:
/// - `MemoryConfigProvider`: In-memory, supports change callbacks
/// - `EnvConfigProvider`: Environment variables, read-only
/// - `ChainConfigProvider`: First-match fallback over several providers
/// - `ScopedProvider`: Prefixes every lookup key of another provider
///
/// Providers are shared behind `Arc`, so `scope` takes `self: Arc<Self>`.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use confkit_core::config::{ConfigProvider, MemoryConfigProvider, SharedProvider};
///
/// let memory = MemoryConfigProvider::new();
/// memory.set("db.creds.user", "admin");
///
/// let provider: SharedProvider = Arc::new(memory);
/// let creds = provider.scope("db").scope("creds");
/// assert_eq!(creds.get_value("user").as_str().unwrap(), "admin");
/// ```
pub trait ConfigProvider: Send + Sync {
    /// Name of the backend (memory, env, etc)
    fn name(&self) -> &str;

    /// Look up a value
    ///
    /// A missing key is reported through the returned value, never by
    /// panicking.
    fn get_value(&self, key: &str) -> ConfigValue;

    /// Create a provider whose lookup keys are all prefixed with `prefix`
    fn scope(self: Arc<Self>, prefix: &str) -> SharedProvider;

    /// Register interest in changes to `key`
    ///
    /// Backends without dynamic updates return an empty token.
    fn register_change_callback(&self, _key: &str, _callback: ChangeCallback) -> String {
        String::new()
    }

    /// Remove a previously registered callback
    ///
    /// Returns `false` for unknown tokens and on backends without dynamic
    /// updates.
    fn unregister_change_callback(&self, _token: &str) -> bool {
        false
    }
}

/// Errors that can occur when reading configuration values
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("couldn't find key {}", quote(.0))]
    KeyNotFound(String),

    #[error("value for key {} is {actual}, expected {expected}", quote(.key))]
    TypeMismatch {
        key: String,
        expected: &'static str,
        actual: &'static str,
    },

    #[error("failed to deserialize key {}: {source}", quote(.key))]
    Deserialize {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Configuration error: {0}")]
    Other(String),
}

impl ConfigError {
    /// Error for a lookup miss
    pub fn key_not_found(key: impl Into<String>) -> Self {
        ConfigError::KeyNotFound(key.into())
    }
}

pub type ConfigResult<T> = Result<T, ConfigError>;

/// Double-quote `s` with Go-style escapes
///
/// Control bytes below 0x20 and DEL use `\xNN`; other unprintable
/// characters use `\uNNNN` or `\UNNNNNNNN`.
fn quote(s: &str) -> String {
    use std::fmt::Write;

    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\u{07}' => out.push_str("\\a"),
            '\u{08}' => out.push_str("\\b"),
            '\u{0c}' => out.push_str("\\f"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\u{0b}' => out.push_str("\\v"),
            c if (c as u32) < 0x20 || c == '\u{7f}' => {
                let _ = write!(out, "\\x{:02x}", c as u32);
            }
            c if is_printable(c) => out.push(c),
            c if (c as u32) < 0x10000 => {
                let _ = write!(out, "\\u{:04x}", c as u32);
            }
            c => {
                let _ = write!(out, "\\U{:08x}", c as u32);
            }
        }
    }
    out.push('"');
    out
}

// Space is the only printable separator; format characters are not printable
fn is_printable(c: char) -> bool {
    if c == ' ' {
        return true;
    }
    !(c.is_control()
        || c.is_whitespace()
        || matches!(
            c,
            '\u{ad}'
                | '\u{200b}'..='\u{200f}'
                | '\u{202a}'..='\u{202e}'
                | '\u{2060}'..='\u{2064}'
                | '\u{feff}'
                | '\u{e0001}'..='\u{e007f}'
        ))
}
