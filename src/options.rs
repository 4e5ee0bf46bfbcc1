//! Manager options: an immutable default set with user overrides laid on top.
//!
//! Every assignment is merged over the defaults, never over the previous
//! value, so two assignments in a row do not accumulate.
//!
//! | Key              | Default  | Consumer                  |
//! |------------------|----------|---------------------------|
//! | `source_open`    | `"[%"`   | directive rewriter        |
//! | `source_close`   | `"%]"`   | directive rewriter        |
//! | `js_compressor`  | `"none"` | environment (if supported)|
//! | `css_compressor` | `"none"` | environment (if supported)|

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

/// A single option value. TOML values cover everything a config file can hold.
pub type OptionValue = toml::Value;

pub const SOURCE_OPEN: &str = "source_open";
pub const SOURCE_CLOSE: &str = "source_close";

pub const DEFAULT_SOURCE_OPEN: &str = "[%";
pub const DEFAULT_SOURCE_CLOSE: &str = "%]";

/// Keys read by the manager itself rather than forwarded to the environment.
pub const MANAGER_KEYS: &[&str] = &[SOURCE_OPEN, SOURCE_CLOSE];

/// Option name → value mapping.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Options(FxHashMap<String, OptionValue>);

impl Options {
    /// Empty mapping (no defaults applied).
    pub fn new() -> Self {
        Self::default()
    }

    /// The default option set.
    pub fn defaults() -> Self {
        Self::from_iter([
            (SOURCE_OPEN, OptionValue::from(DEFAULT_SOURCE_OPEN)),
            (SOURCE_CLOSE, OptionValue::from(DEFAULT_SOURCE_CLOSE)),
            ("js_compressor", OptionValue::from("none")),
            ("css_compressor", OptionValue::from("none")),
        ])
    }

    /// Defaults with `overrides` merged on top (shallow, last write wins).
    pub fn merged(overrides: Options) -> Self {
        let mut options = Self::defaults();
        options.0.extend(overrides.0);
        options
    }

    pub fn get(&self, key: &str) -> Option<&OptionValue> {
        self.0.get(key)
    }

    /// String value of `key`, `None` if absent or not a string.
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(OptionValue::as_str)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<OptionValue>) {
        self.0.insert(key.into(), value.into());
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &OptionValue)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Opening directive delimiter, falling back to the default.
    pub fn source_open(&self) -> &str {
        self.get_str(SOURCE_OPEN).unwrap_or(DEFAULT_SOURCE_OPEN)
    }

    /// Closing directive delimiter, falling back to the default.
    pub fn source_close(&self) -> &str {
        self.get_str(SOURCE_CLOSE).unwrap_or(DEFAULT_SOURCE_CLOSE)
    }
}

impl<K: Into<String>, V: Into<OptionValue>> FromIterator<(K, V)> for Options {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_have_delimiters() {
        let defaults = Options::defaults();
        assert_eq!(defaults.get_str(SOURCE_OPEN), Some("[%"));
        assert_eq!(defaults.get_str(SOURCE_CLOSE), Some("%]"));
        assert!(defaults.contains_key("js_compressor"));
    }

    #[test]
    fn test_merged_overrides_win() {
        let user = Options::from_iter([("source_open", "{{"), ("custom", "x")]);
        let merged = Options::merged(user);

        assert_eq!(merged.source_open(), "{{");
        assert_eq!(merged.source_close(), "%]");
        assert_eq!(merged.get_str("custom"), Some("x"));
        assert_eq!(merged.len(), Options::defaults().len() + 1);
    }

    #[test]
    fn test_merged_empty_is_defaults() {
        assert_eq!(Options::merged(Options::new()), Options::defaults());
    }

    #[test]
    fn test_get_str_ignores_non_strings() {
        let mut options = Options::new();
        options.insert("gzip", true);
        assert_eq!(options.get_str("gzip"), None);
        assert_eq!(options.get("gzip").and_then(OptionValue::as_bool), Some(true));
    }

    #[test]
    fn test_delimiter_fallback() {
        let mut options = Options::new();
        options.insert(SOURCE_OPEN, 42);
        assert_eq!(options.source_open(), DEFAULT_SOURCE_OPEN);
        assert_eq!(options.source_close(), DEFAULT_SOURCE_CLOSE);
    }
}
