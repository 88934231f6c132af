//! Configuration provider abstractions
//!
//! Supports multiple configuration sources behind one trait:
//! - `MemoryConfigProvider`: In-memory, with change callbacks
//! - `EnvConfigProvider`: Environment variables (read-only)
//! - `ChainConfigProvider`: First-match fallback over other providers
//! - `ScopedProvider`: Prefixes lookup keys of another provider
//!
//! Any provider can be narrowed with `scope`:
//!
//! ```
//! use std::sync::Arc;
//! use confkit_core::config::{ConfigProvider, MemoryConfigProvider, SharedProvider};
//!
//! let memory = Arc::new(MemoryConfigProvider::new());
//! memory.set("db.creds.user", "admin");
//!
//! let root: SharedProvider = memory;
//! let creds = root.scope("db").scope("creds");
//! assert_eq!(creds.get_value("user").key(), "db.creds.user");
//! ```

mod traits;
mod value;
mod scoped;
mod callbacks;
mod memory;
mod env;
mod chain;
mod registry;
mod subscription;

pub use traits::{ConfigProvider, ChangeCallback, SharedProvider, ConfigError, ConfigResult};
pub use value::{ConfigValue, Value};
pub use scoped::ScopedProvider;
pub use callbacks::CallbackRegistry;
pub use memory::MemoryConfigProvider;
pub use env::EnvConfigProvider;
pub use chain::ChainConfigProvider;
pub use registry::{
    register_config_provider, create_config_provider, list_config_providers,
    has_config_provider, unregister_config_provider, ProviderDefinition, ProviderFactory,
};
pub use subscription::{Subscription, ConfigChange};
