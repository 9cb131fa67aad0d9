//! Flat, string-keyed request configuration.
//!
//! A `Configuration` is the per-request hints map: plain keys such as
//! `weighting` or `edge_based`, plus namespaced soft-modifier keys of the form
//! `weighting_#<modifier>_<param>`.  Insertion order is preserved so that
//! anything iterating the keys (e.g. modifier discovery) is reproducible.
//!
//! Values are scalars.  The typed getters coerce leniently, the way query
//! parameters arrive: `"TRUE"` is a bool, `"2.5"` is a number.

use std::borrow::Cow;
use std::fmt;

use indexmap::IndexMap;
use rustc_hash::FxBuildHasher;
use serde::{Deserialize, Serialize};

use crate::{CoreError, CoreResult};

type FxIndexMap<K, V> = IndexMap<K, V, FxBuildHasher>;

// ── ConfigValue ───────────────────────────────────────────────────────────────

/// A scalar configuration value.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ConfigValue {
    Bool(bool),
    Number(f64),
    Text(String),
}

impl ConfigValue {
    /// Bool view.  Text must read `true`/`false` (any case); numbers are
    /// `true` when non-zero.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            ConfigValue::Bool(b) => Some(*b),
            ConfigValue::Number(n) => Some(*n != 0.0),
            ConfigValue::Text(s) => {
                let s = s.trim();
                if s.eq_ignore_ascii_case("true") {
                    Some(true)
                } else if s.eq_ignore_ascii_case("false") {
                    Some(false)
                } else {
                    None
                }
            }
        }
    }

    /// Numeric view.  Text is parsed; bools have no numeric meaning.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            ConfigValue::Number(n) => Some(*n),
            ConfigValue::Text(s) => s.trim().parse().ok(),
            ConfigValue::Bool(_) => None,
        }
    }

    pub fn as_text(&self) -> Cow<'_, str> {
        match self {
            ConfigValue::Text(s) => Cow::Borrowed(s.as_str()),
            other => Cow::Owned(other.to_string()),
        }
    }
}

impl fmt::Display for ConfigValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigValue::Bool(b) => write!(f, "{b}"),
            ConfigValue::Number(n) => write!(f, "{n}"),
            ConfigValue::Text(s) => f.write_str(s),
        }
    }
}

impl From<bool> for ConfigValue {
    fn from(b: bool) -> Self {
        ConfigValue::Bool(b)
    }
}

impl From<f64> for ConfigValue {
    fn from(n: f64) -> Self {
        ConfigValue::Number(n)
    }
}

impl From<i32> for ConfigValue {
    fn from(n: i32) -> Self {
        ConfigValue::Number(n as f64)
    }
}

impl From<&str> for ConfigValue {
    fn from(s: &str) -> Self {
        ConfigValue::Text(s.to_owned())
    }
}

impl From<String> for ConfigValue {
    fn from(s: String) -> Self {
        ConfigValue::Text(s)
    }
}

// ── Configuration ─────────────────────────────────────────────────────────────

/// Immutable-by-convention flat hints map supplied once per request.
///
/// # Example
///
/// ```
/// use wt_core::Configuration;
///
/// let config = Configuration::new()
///     .with("weighting", "fastest")
///     .with("custom_weightings", true)
///     .with("weighting_#green_factor", 0.8);
/// assert!(config.get_bool("custom_weightings", false));
/// assert_eq!(config.get_string("weighting", ""), "fastest");
/// ```
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Configuration {
    entries: FxIndexMap<String, ConfigValue>,
}

impl Configuration {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<ConfigValue>) -> Self {
        self.insert(key, value);
        self
    }

    /// Insert or replace `key`.  A replaced key keeps its original position.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<ConfigValue>) -> Option<ConfigValue> {
        self.entries.insert(key.into(), value.into())
    }

    pub fn get(&self, key: &str) -> Option<&ConfigValue> {
        self.entries.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ConfigValue)> + '_ {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Keys in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &str> + '_ {
        self.entries.keys().map(String::as_str)
    }

    // ── Typed getters ─────────────────────────────────────────────────────

    /// `default` when the key is absent or not interpretable as a bool.
    pub fn get_bool(&self, key: &str, default: bool) -> bool {
        self.get(key).and_then(ConfigValue::as_bool).unwrap_or(default)
    }

    /// `default` when the key is absent or not numeric.
    pub fn get_f64(&self, key: &str, default: f64) -> f64 {
        self.get(key).and_then(ConfigValue::as_f64).unwrap_or(default)
    }

    /// Text form of the value; `default` when the key is absent.
    pub fn get_string(&self, key: &str, default: &str) -> String {
        self.get(key)
            .map(|v| v.as_text().into_owned())
            .unwrap_or_else(|| default.to_owned())
    }

    // ── Constructors from request data ────────────────────────────────────

    /// Parse a flat JSON object, e.g. `{"weighting": "fastest", "edge_based": true}`.
    ///
    /// Nested objects, arrays and `null` are rejected.
    pub fn from_json_str(json: &str) -> CoreResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Parse a URL query string (`a=b&c=d`).  Keys and values are
    /// percent-decoded, so `weighting_%23green_factor` becomes
    /// `weighting_#green_factor`.  Every value is stored as text.
    pub fn from_query(query: &str) -> CoreResult<Self> {
        // Depth 0: brackets are part of the key, the map stays flat.
        let qs = serde_qs::Config::new(0, false);
        let entries: FxIndexMap<String, String> = qs.deserialize_str(query.trim_start_matches('?'))?;
        if entries.keys().any(String::is_empty) {
            return Err(CoreError::Parse(format!("query {query:?} has an empty key")));
        }
        Ok(entries.into_iter().collect())
    }
}

impl<K: Into<String>, V: Into<ConfigValue>> FromIterator<(K, V)> for Configuration {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut config = Self::new();
        config.extend(iter);
        config
    }
}

impl<K: Into<String>, V: Into<ConfigValue>> Extend<(K, V)> for Configuration {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (k, v) in iter {
            self.insert(k, v);
        }
    }
}
