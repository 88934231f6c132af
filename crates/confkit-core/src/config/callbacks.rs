//! Token-keyed change callback table for dynamic providers

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::RwLock;

use super::traits::ChangeCallback;
use super::value::Value;

static NEXT_TOKEN_ID: AtomicU64 = AtomicU64::new(1);

/// Next id for a callback token, unique across every provider in the process
pub(crate) fn next_token_id() -> u64 {
    NEXT_TOKEN_ID.fetch_add(1, Ordering::Relaxed)
}

struct Registration {
    token: String,
    key: String,
    callback: ChangeCallback,
}

/// Change callbacks registered against a provider
///
/// Tokens are `"<owner>-<n>"` with `n` drawn from a process-wide counter, so
/// a token is never valid on more than one registry. Callbacks for the same
/// key fire in registration order, on the thread calling `notify`, after the
/// table lock has been released; a callback may register or unregister freely.
pub struct CallbackRegistry {
    owner: String,
    entries: RwLock<BTreeMap<u64, Registration>>,
}

impl CallbackRegistry {
    /// Create an empty registry; `owner` prefixes the minted tokens
    pub fn new(owner: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            entries: RwLock::new(BTreeMap::new()),
        }
    }

    /// Register `callback` for `key` and return its token
    pub fn register(&self, key: &str, callback: ChangeCallback) -> String {
        let id = next_token_id();
        let token = format!("{}-{}", self.owner, id);
        self.entries.write().insert(
            id,
            Registration {
                token: token.clone(),
                key: key.to_string(),
                callback,
            },
        );
        token
    }

    /// Remove the registration for `token`
    ///
    /// Returns false for tokens this registry did not mint.
    pub fn unregister(&self, token: &str) -> bool {
        let Some(id) = token
            .rsplit_once('-')
            .and_then(|(_, id)| id.parse::<u64>().ok())
        else {
            return false;
        };

        let mut entries = self.entries.write();
        let minted_here = entries.get(&id).map_or(false, |r| r.token == token);
        if minted_here {
            entries.remove(&id);
        }
        minted_here
    }

    /// Invoke every callback registered for exactly `key`, oldest first
    ///
    /// Returns the number of callbacks invoked.
    pub fn notify(&self, key: &str, provider: &str, value: &Value) -> usize {
        let callbacks: Vec<ChangeCallback> = self
            .entries
            .read()
            .values()
            .filter(|r| r.key == key)
            .map(|r| r.callback.clone())
            .collect();

        for callback in &callbacks {
            callback(key, provider, value);
        }
        callbacks.len()
    }

    /// Number of live registrations
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drop every registration
    pub fn clear(&self) {
        self.entries.write().clear();
    }
}

impl std::fmt::Debug for CallbackRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CallbackRegistry")
            .field("owner", &self.owner)
            .field("registrations", &self.len())
            .finish()
    }
}
