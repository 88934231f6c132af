//! Async change subscriptions
//!
//! Bridges change callbacks into a tokio channel so async code can await
//! configuration changes. Dropping a `Subscription` unregisters its callback.

use std::sync::Arc;

use tokio::sync::mpsc;

use super::traits::{ConfigProvider, SharedProvider};
use super::value::Value;

/// A change delivered to a subscription
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigChange {
    /// The key as registered
    pub key: String,
    /// Name of the provider that reported the change
    pub provider: String,
    /// The new value (`Value::Null` when the key was removed)
    pub value: Value,
}

/// Live registration of a change callback that feeds a channel
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use confkit_core::config::{MemoryConfigProvider, SharedProvider, Subscription};
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// let memory = Arc::new(MemoryConfigProvider::new());
/// let provider: SharedProvider = memory.clone();
///
/// let mut changes = Subscription::new(provider, "log.level");
/// memory.set("log.level", "debug");
///
/// let change = changes.recv().await.unwrap();
/// assert_eq!(change.value.to_string(), "debug");
/// # }
/// ```
pub struct Subscription {
    provider: SharedProvider,
    token: String,
    receiver: mpsc::UnboundedReceiver<ConfigChange>,
}

impl Subscription {
    /// Subscribe to changes of `key` on `provider`
    ///
    /// On a provider without dynamic updates the subscription is inactive and
    /// `recv` returns `None` right away.
    pub fn new(provider: SharedProvider, key: &str) -> Self {
        let (sender, receiver) = mpsc::unbounded_channel();
        let token = provider.register_change_callback(
            key,
            Arc::new(move |key: &str, name: &str, value: &Value| {
                // Receiver gone means the subscription is being dropped
                let _ = sender.send(ConfigChange {
                    key: key.to_string(),
                    provider: name.to_string(),
                    value: value.clone(),
                });
            }),
        );

        Self {
            provider,
            token,
            receiver,
        }
    }

    /// The registration token, empty when the provider is static
    pub fn token(&self) -> &str {
        &self.token
    }

    /// Whether a callback is registered with the provider
    pub fn is_active(&self) -> bool {
        !self.token.is_empty()
    }

    /// Wait for the next change
    ///
    /// Returns `None` once the provider has dropped the callback.
    pub async fn recv(&mut self) -> Option<ConfigChange> {
        self.receiver.recv().await
    }

    /// Take a pending change without waiting
    pub fn try_recv(&mut self) -> Option<ConfigChange> {
        self.receiver.try_recv().ok()
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if self.is_active() {
            self.provider.unregister_change_callback(&self.token);
        }
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription")
            .field("provider", &self.provider.name())
            .field("token", &self.token)
            .finish()
    }
}
