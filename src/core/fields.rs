//! Structured key-value fields attached to events and logger nodes
//!
//! This module provides:
//! - `FieldValue`: the value type carried in event fields and directives
//! - `Fields`: a string-keyed field map with overlay-merge semantics used
//!   for context inheritance across derived loggers

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Value type for structured fields
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    String(String),
    Int(i64),
    Float(f64),
    Bool(bool),
    Null,
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::String(s) => write!(f, "{}", s),
            FieldValue::Int(i) => write!(f, "{}", i),
            FieldValue::Float(fl) => write!(f, "{}", fl),
            FieldValue::Bool(b) => write!(f, "{}", b),
            FieldValue::Null => write!(f, "null"),
        }
    }
}

impl FieldValue {
    /// Convert to serde_json::Value for JSON serialization
    #[must_use]
    pub fn to_json_value(&self) -> serde_json::Value {
        match self {
            FieldValue::String(s) => serde_json::Value::String(s.clone()),
            FieldValue::Int(i) => serde_json::Value::Number((*i).into()),
            FieldValue::Float(f) => serde_json::Number::from_f64(*f)
                .map(serde_json::Value::Number)
                .unwrap_or(serde_json::Value::Null),
            FieldValue::Bool(b) => serde_json::Value::Bool(*b),
            FieldValue::Null => serde_json::Value::Null,
        }
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        FieldValue::String(s)
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        FieldValue::String(s.to_string())
    }
}

impl From<i64> for FieldValue {
    fn from(i: i64) -> Self {
        FieldValue::Int(i)
    }
}

impl From<i32> for FieldValue {
    fn from(i: i32) -> Self {
        FieldValue::Int(i as i64)
    }
}

impl From<f64> for FieldValue {
    fn from(f: f64) -> Self {
        FieldValue::Float(f)
    }
}

impl From<bool> for FieldValue {
    fn from(b: bool) -> Self {
        FieldValue::Bool(b)
    }
}

impl From<serde_json::Value> for FieldValue {
    fn from(v: serde_json::Value) -> Self {
        match v {
            serde_json::Value::String(s) => FieldValue::String(s),
            serde_json::Value::Bool(b) => FieldValue::Bool(b),
            serde_json::Value::Null => FieldValue::Null,
            serde_json::Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    FieldValue::Int(i)
                } else {
                    FieldValue::Float(n.as_f64().unwrap_or(0.0))
                }
            }
            // Nested structures stringify to their JSON representation
            other => FieldValue::String(other.to_string()),
        }
    }
}

/// String-keyed field map carried on events, directives, and logger context
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Fields {
    inner: HashMap<String, FieldValue>,
}

impl Fields {
    /// Create a new empty field map
    pub fn new() -> Self {
        Self {
            inner: HashMap::new(),
        }
    }

    /// Add a field, builder style
    #[must_use]
    pub fn with_field<K, V>(mut self, key: K, value: V) -> Self
    where
        K: Into<String>,
        V: Into<FieldValue>,
    {
        self.inner.insert(key.into(), value.into());
        self
    }

    /// Insert a field, replacing any existing value for the key
    pub fn insert<K, V>(&mut self, key: K, value: V)
    where
        K: Into<String>,
        V: Into<FieldValue>,
    {
        self.inner.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&FieldValue> {
        self.inner.get(key)
    }

    pub fn remove(&mut self, key: &str) -> Option<FieldValue> {
        self.inner.remove(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.inner.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &FieldValue)> {
        self.inner.iter()
    }

    /// Produce a new map with `overrides` layered on top of `self`
    ///
    /// Keys in `overrides` win. This is the root-to-node merge used for
    /// context inheritance: the receiver is the less specific layer.
    #[must_use]
    pub fn merged_with(&self, overrides: &Fields) -> Fields {
        let mut merged = self.clone();
        for (key, value) in overrides.inner.iter() {
            merged.inner.insert(key.clone(), value.clone());
        }
        merged
    }

    /// Format fields as key=value pairs
    pub fn format_fields(&self) -> String {
        self.inner
            .iter()
            .map(|(k, v)| format!("{}={}", k, v))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl fmt::Display for Fields {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_fields())
    }
}

impl FromIterator<(String, FieldValue)> for Fields {
    fn from_iter<T: IntoIterator<Item = (String, FieldValue)>>(iter: T) -> Self {
        Self {
            inner: iter.into_iter().collect(),
        }
    }
}
