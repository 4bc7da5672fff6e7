//! Loosely typed component properties.
//!
//! Props come from a dynamically typed editor, so lookups follow the editor's
//! truthiness rules: `null`, `false`, `0` and `""` behave like a missing key
//! and the caller's default applies.

use std::borrow::Cow;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Open mapping of component properties.
///
/// Iteration order matches the source document.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Props(Map<String, Value>);

impl Props {
    /// Create an empty property map.
    #[must_use]
    pub fn new() -> Self {
        Self(Map::new())
    }

    /// Set a property, returning the updated map.
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.0.insert(key.into(), value.into());
        self
    }

    /// Raw value for `key`, if present and truthy.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key).filter(|v| is_truthy(v))
    }

    /// Display text for `key`, if present and truthy.
    pub fn text(&self, key: &str) -> Option<Cow<'_, str>> {
        self.get(key).map(display_value)
    }

    /// Display text for `key`, or `default` when missing or falsy.
    pub fn text_or<'a>(&'a self, key: &str, default: &'a str) -> Cow<'a, str> {
        self.text(key).unwrap_or(Cow::Borrowed(default))
    }

    /// Truthiness of `key`; missing keys are false.
    pub fn flag(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Truthiness of `key`, or `default` when the key is missing or `null`.
    pub fn flag_or(&self, key: &str, default: bool) -> bool {
        match self.0.get(key) {
            None | Some(Value::Null) => default,
            Some(value) => is_truthy(value),
        }
    }

    /// Numeric value of `key`, accepting numbers and numeric strings.
    pub fn number(&self, key: &str) -> Option<f64> {
        match self.get(key)? {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    /// Array value of `key`; anything else yields an empty slice.
    pub fn list(&self, key: &str) -> &[Value] {
        match self.0.get(key) {
            Some(Value::Array(items)) => items,
            _ => &[],
        }
    }

    /// Whether the map has no entries.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate entries in source order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }
}

impl From<Map<String, Value>> for Props {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

impl<K: Into<String>> FromIterator<(K, Value)> for Props {
    fn from_iter<I: IntoIterator<Item = (K, Value)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}

/// Whether a value counts as present under the editor's truthiness rules.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Text form of a value as the editor would interpolate it.
///
/// Strings are borrowed verbatim, whole numbers print without a fraction,
/// arrays join their items with commas.
pub fn display_value(value: &Value) -> Cow<'_, str> {
    match value {
        Value::String(s) => Cow::Borrowed(s),
        Value::Null => Cow::Borrowed("null"),
        Value::Bool(true) => Cow::Borrowed("true"),
        Value::Bool(false) => Cow::Borrowed("false"),
        Value::Number(n) => Cow::Owned(display_number(n)),
        Value::Array(items) => Cow::Owned(
            items
                .iter()
                .map(|item| match item {
                    Value::Null => Cow::Borrowed(""),
                    other => display_value(other),
                })
                .collect::<Vec<_>>()
                .join(","),
        ),
        Value::Object(_) => Cow::Borrowed("[object Object]"),
    }
}

#[allow(clippy::cast_possible_truncation)]
fn display_number(n: &serde_json::Number) -> String {
    if n.is_i64() || n.is_u64() {
        return n.to_string();
    }
    match n.as_f64() {
        Some(f) if f.fract() == 0.0 && f.abs() < 1e15 => (f as i64).to_string(),
        Some(f) => f.to_string(),
        None => n.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn props(value: Value) -> Props {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_text_or_uses_default_for_missing_key() {
        let p = Props::new();
        assert_eq!(p.text_or("content", "fallback"), "fallback");
    }

    #[test]
    fn test_text_or_treats_falsy_as_missing() {
        let p = props(json!({"a": "", "b": null, "c": false, "d": 0}));
        for key in ["a", "b", "c", "d"] {
            assert_eq!(p.text_or(key, "x"), "x", "key {key}");
        }
    }

    #[test]
    fn test_text_displays_numbers_and_bools() {
        let p = props(json!({"level": 2, "ratio": 2.5, "whole": 3.0, "on": true}));
        assert_eq!(p.text("level").unwrap(), "2");
        assert_eq!(p.text("ratio").unwrap(), "2.5");
        assert_eq!(p.text("whole").unwrap(), "3");
        assert_eq!(p.text("on").unwrap(), "true");
    }

    #[test]
    fn test_display_array_joins_with_commas() {
        assert_eq!(display_value(&json!(["a", 1, null])), "a,1,");
        assert_eq!(display_value(&json!({"k": 1})), "[object Object]");
    }

    #[test]
    fn test_flag_or_respects_explicit_false() {
        let p = props(json!({"controls": false, "muted": null}));
        assert!(!p.flag_or("controls", true));
        assert!(p.flag_or("muted", true));
        assert!(p.flag_or("missing", true));
    }

    #[test]
    fn test_number_accepts_numeric_strings() {
        let p = props(json!({"level": "3", "zoom": 12, "bad": "x"}));
        assert_eq!(p.number("level"), Some(3.0));
        assert_eq!(p.number("zoom"), Some(12.0));
        assert_eq!(p.number("bad"), None);
        assert_eq!(p.number("missing"), None);
    }

    #[test]
    fn test_list_non_array_is_empty() {
        let p = props(json!({"items": "nope", "images": ["a.png"]}));
        assert!(p.list("items").is_empty());
        assert_eq!(p.list("images").len(), 1);
        assert!(p.list("missing").is_empty());
    }

    #[test]
    fn test_iteration_keeps_source_order() {
        let p = Props::new().with("z", 1).with("a", 2).with("m", 3);
        let keys: Vec<&str> = p.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(keys, ["z", "a", "m"]);
    }
}
