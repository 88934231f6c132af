//! Configuration values
//!
//! `Value` is the payload stored by backends and passed to change callbacks.
//! `ConfigValue` is what a lookup returns: the value (if any) together with the
//! key that was queried and the provider that answered.

use std::collections::BTreeMap;
use std::fmt;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use super::traits::{ConfigError, ConfigResult};

/// A configuration value of any supported shape
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(untagged)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
    List(Vec<Value>),
    Map(BTreeMap<String, Value>),
}

impl Value {
    /// Short name of the variant, used in error messages
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::String(_) => "string",
            Value::List(_) => "list",
            Value::Map(_) => "map",
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Convert to a `serde_json::Value`
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            Value::Null => serde_json::Value::Null,
            Value::Bool(b) => serde_json::Value::Bool(*b),
            Value::Int(i) => serde_json::Value::from(*i),
            Value::Float(f) => serde_json::Number::from_f64(*f)
                .map(serde_json::Value::Number)
                .unwrap_or(serde_json::Value::Null),
            Value::String(s) => serde_json::Value::String(s.clone()),
            Value::List(items) => serde_json::Value::Array(items.iter().map(Value::to_json).collect()),
            Value::Map(map) => serde_json::Value::Object(
                map.iter().map(|(k, v)| (k.clone(), v.to_json())).collect(),
            ),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::String(s) => write!(f, "{}", s),
            other => write!(f, "{}", other.to_json()),
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Int(i)
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Value::Int(i64::from(i))
    }
}

impl From<u16> for Value {
    fn from(i: u16) -> Self {
        Value::Int(i64::from(i))
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Float(f)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Self {
        Value::List(items.into_iter().map(Into::into).collect())
    }
}

impl From<BTreeMap<String, Value>> for Value {
    fn from(map: BTreeMap<String, Value>) -> Self {
        Value::Map(map)
    }
}

impl From<serde_json::Value> for Value {
    fn from(json: serde_json::Value) -> Self {
        match json {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => match n.as_i64() {
                Some(i) => Value::Int(i),
                None => Value::Float(n.as_f64().unwrap_or_default()),
            },
            serde_json::Value::String(s) => Value::String(s),
            serde_json::Value::Array(items) => Value::List(items.into_iter().map(Value::from).collect()),
            serde_json::Value::Object(map) => {
                Value::Map(map.into_iter().map(|(k, v)| (k, Value::from(v))).collect())
            }
        }
    }
}

/// Result of a configuration lookup
///
/// Absence is a normal outcome: `has_value()` is false and the typed
/// accessors return `ConfigError::KeyNotFound`.
///
/// # Example
///
/// ```
/// use confkit_core::config::ConfigValue;
///
/// let port = ConfigValue::found("server.port", "memory", "8080");
/// assert_eq!(port.as_i64().unwrap(), 8080);
///
/// let missing = ConfigValue::not_found("server.host", "memory");
/// assert_eq!(
///     missing.as_str().unwrap_err().to_string(),
///     "couldn't find key \"server.host\""
/// );
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigValue {
    key: String,
    source: String,
    value: Option<Value>,
}

impl ConfigValue {
    /// A value that was found
    pub fn found(key: impl Into<String>, source: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            key: key.into(),
            source: source.into(),
            value: Some(value.into()),
        }
    }

    /// A lookup miss
    pub fn not_found(key: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            source: source.into(),
            value: None,
        }
    }

    /// The key that was queried, as seen by the backend
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Name of the provider that answered
    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn has_value(&self) -> bool {
        self.value.is_some()
    }

    pub fn value(&self) -> Option<&Value> {
        self.value.as_ref()
    }

    pub fn into_value(self) -> Option<Value> {
        self.value
    }

    /// The value, or `KeyNotFound` if the lookup missed
    pub fn require(&self) -> ConfigResult<&Value> {
        self.value
            .as_ref()
            .ok_or_else(|| ConfigError::key_not_found(self.key.clone()))
    }

    /// Use `default` when the lookup missed
    pub fn with_default(self, default: impl Into<Value>) -> Self {
        if self.value.is_some() {
            return self;
        }
        Self {
            value: Some(default.into()),
            ..self
        }
    }

    pub fn as_str(&self) -> ConfigResult<&str> {
        match self.require()? {
            Value::String(s) => Ok(s),
            other => Err(self.mismatch("string", other)),
        }
    }

    /// Integer value; numeric strings are parsed
    pub fn as_i64(&self) -> ConfigResult<i64> {
        match self.require()? {
            Value::Int(i) => Ok(*i),
            Value::String(s) => s.trim().parse().map_err(|_| self.mismatch("int", &Value::String(s.clone()))),
            other => Err(self.mismatch("int", other)),
        }
    }

    /// Float value; ints widen and numeric strings are parsed
    pub fn as_f64(&self) -> ConfigResult<f64> {
        match self.require()? {
            Value::Float(f) => Ok(*f),
            Value::Int(i) => Ok(*i as f64),
            Value::String(s) => s.trim().parse().map_err(|_| self.mismatch("float", &Value::String(s.clone()))),
            other => Err(self.mismatch("float", other)),
        }
    }

    /// Boolean value; accepts "true"/"false"/"1"/"0" strings
    pub fn as_bool(&self) -> ConfigResult<bool> {
        match self.require()? {
            Value::Bool(b) => Ok(*b),
            Value::String(s) => match s.trim().to_lowercase().as_str() {
                "true" | "1" => Ok(true),
                "false" | "0" => Ok(false),
                _ => Err(self.mismatch("bool", &Value::String(s.clone()))),
            },
            other => Err(self.mismatch("bool", other)),
        }
    }

    /// Deserialize the value into `T`
    ///
    /// ```
    /// use std::collections::BTreeMap;
    /// use confkit_core::config::{ConfigValue, Value};
    ///
    /// #[derive(serde::Deserialize)]
    /// struct Creds {
    ///     user: String,
    /// }
    ///
    /// let mut map = BTreeMap::new();
    /// map.insert("user".to_string(), Value::from("admin"));
    /// let creds: Creds = ConfigValue::found("db.creds", "memory", map).populate().unwrap();
    /// assert_eq!(creds.user, "admin");
    /// ```
    pub fn populate<T: DeserializeOwned>(&self) -> ConfigResult<T> {
        let value = self.require()?;
        serde_json::from_value(value.to_json()).map_err(|source| ConfigError::Deserialize {
            key: self.key.clone(),
            source,
        })
    }

    fn mismatch(&self, expected: &'static str, actual: &Value) -> ConfigError {
        ConfigError::TypeMismatch {
            key: self.key.clone(),
            expected,
            actual: actual.type_name(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[test]
    fn test_found_and_not_found() {
        let found = ConfigValue::found("a.b", "memory", 3i64);
        assert!(found.has_value());
        assert_eq!(found.key(), "a.b");
        assert_eq!(found.source(), "memory");
        assert_eq!(found.value(), Some(&Value::Int(3)));

        let missing = ConfigValue::not_found("a.c", "memory");
        assert!(!missing.has_value());
        assert!(missing.value().is_none());
        assert!(matches!(missing.require(), Err(ConfigError::KeyNotFound(k)) if k == "a.c"));
    }

    #[test]
    fn test_missing_key_error_message() {
        let missing = ConfigValue::not_found("db.creds.user", "env");
        assert_eq!(
            missing.as_bool().unwrap_err().to_string(),
            "couldn't find key \"db.creds.user\""
        );
    }

    #[test]
    fn test_string_coercion() {
        assert_eq!(ConfigValue::found("k", "env", "42").as_i64().unwrap(), 42);
        assert_eq!(ConfigValue::found("k", "env", " 1.5 ").as_f64().unwrap(), 1.5);
        assert!(ConfigValue::found("k", "env", "TRUE").as_bool().unwrap());
        assert!(!ConfigValue::found("k", "env", "0").as_bool().unwrap());
        assert_eq!(ConfigValue::found("k", "m", 2i64).as_f64().unwrap(), 2.0);
    }

    #[test]
    fn test_type_mismatch() {
        let value = ConfigValue::found("port", "memory", true);
        match value.as_i64() {
            Err(ConfigError::TypeMismatch { key, expected, actual }) => {
                assert_eq!(key, "port");
                assert_eq!(expected, "int");
                assert_eq!(actual, "bool");
            }
            other => panic!("unexpected result: {:?}", other),
        }

        assert!(matches!(
            ConfigValue::found("k", "env", "yes please").as_bool(),
            Err(ConfigError::TypeMismatch { .. })
        ));
        assert!(matches!(
            ConfigValue::found("k", "m", 7i64).as_str(),
            Err(ConfigError::TypeMismatch { actual: "int", .. })
        ));
    }

    #[test]
    fn test_with_default() {
        let missing = ConfigValue::not_found("timeout", "memory").with_default(30i64);
        assert_eq!(missing.as_i64().unwrap(), 30);
        assert_eq!(missing.key(), "timeout");
        assert_eq!(missing.source(), "memory");

        let present = ConfigValue::found("timeout", "memory", 5i64).with_default(30i64);
        assert_eq!(present.as_i64().unwrap(), 5);
    }

    #[derive(Debug, Deserialize, PartialEq)]
    struct Server {
        host: String,
        port: u16,
        #[serde(default)]
        tags: Vec<String>,
    }

    #[test]
    fn test_populate_struct() {
        let mut map = BTreeMap::new();
        map.insert("host".to_string(), Value::from("localhost"));
        map.insert("port".to_string(), Value::from(8080i64));
        map.insert("tags".to_string(), Value::from(vec!["a", "b"]));

        let server: Server = ConfigValue::found("server", "memory", map).populate().unwrap();
        assert_eq!(
            server,
            Server {
                host: "localhost".to_string(),
                port: 8080,
                tags: vec!["a".to_string(), "b".to_string()],
            }
        );
    }

    #[test]
    fn test_populate_errors() {
        let missing = ConfigValue::not_found("server", "memory");
        assert!(matches!(missing.populate::<Server>(), Err(ConfigError::KeyNotFound(_))));

        let wrong = ConfigValue::found("server", "memory", "not a map");
        assert!(matches!(
            wrong.populate::<Server>(),
            Err(ConfigError::Deserialize { ref key, .. }) if key == "server"
        ));
    }

    #[test]
    fn test_from_json() {
        let json = serde_json::json!({"a": [1, 2.5, "x", null, true]});
        let value = Value::from(json.clone());
        match &value {
            Value::Map(map) => {
                assert_eq!(
                    map["a"],
                    Value::List(vec![
                        Value::Int(1),
                        Value::Float(2.5),
                        Value::from("x"),
                        Value::Null,
                        Value::Bool(true),
                    ])
                );
            }
            other => panic!("expected map, got {:?}", other),
        }
        assert_eq!(value.to_json(), json);
    }

    #[test]
    fn test_display() {
        assert_eq!(Value::from("plain").to_string(), "plain");
        assert_eq!(Value::from(3i64).to_string(), "3");
        assert_eq!(Value::Null.to_string(), "null");
    }
}
