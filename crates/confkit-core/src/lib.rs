//! confkit core
//!
//! Hierarchical configuration behind a pluggable provider trait.
//! Backends implement [`config::ConfigProvider`]; callers narrow them with
//! `scope` and can register for change notification on backends that support
//! dynamic updates.
//!
//! ```rust
//! use std::sync::Arc;
//! use confkit_core::{ChainConfigProvider, ConfigProvider, EnvConfigProvider, MemoryConfigProvider, SharedProvider};
//!
//! let defaults = Arc::new(MemoryConfigProvider::new());
//! defaults.set("db.creds.user", "admin");
//! defaults.set("db.port", 5432i64);
//!
//! let root: SharedProvider = Arc::new(ChainConfigProvider::new(vec![
//!     Arc::new(EnvConfigProvider::with_prefix("MYAPP")),
//!     defaults,
//! ]));
//!
//! let db = root.scope("db");
//! assert_eq!(db.get_value("port").as_i64().unwrap(), 5432);
//! assert_eq!(db.clone().scope("creds").get_value("user").as_str().unwrap(), "admin");
//!
//! let missing = db.get_value("host");
//! assert_eq!(missing.require().unwrap_err().to_string(), "couldn't find key \"db.host\"");
//! ```

pub mod config;
pub mod logging;

// Re-export commonly used types
pub use config::{
    ConfigProvider, ChangeCallback, SharedProvider, ConfigError, ConfigResult,
    ConfigValue, Value,
    ScopedProvider, MemoryConfigProvider, EnvConfigProvider, ChainConfigProvider,
    CallbackRegistry, Subscription, ConfigChange,
    register_config_provider, create_config_provider, list_config_providers,
};

pub use logging::{Logger, NoOpLogger, ConsoleLogger, SharedLogger};
