// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Auxiliary metadata stored next to an item's value.
pub type Extra = Map<String, Value>;

/// An item as it is held by a stash.
///
/// Two items are equal when their keys, values and extras are all deeply equal.
///
/// # Examples
///
/// ```
/// use stashling::{Extra, StashItem};
///
/// let item = StashItem::new("key", 42, Extra::new());
/// assert_eq!(item.key(), "key");
/// assert_eq!(item.value(), &serde_json::json!(42));
/// assert!(item.extra().is_empty());
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StashItem {
    key: String,
    value: Value,
    extra: Extra,
}

impl StashItem {
    /// Creates a new item.
    pub fn new(key: impl Into<String>, value: impl Into<Value>, extra: Extra) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
            extra,
        }
    }

    /// Returns the key the item is stored under.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Returns the stored value.
    #[must_use]
    pub fn value(&self) -> &Value {
        &self.value
    }

    /// Returns the extra metadata.
    #[must_use]
    pub fn extra(&self) -> &Extra {
        &self.extra
    }

    /// Replaces the extra metadata.
    pub fn set_extra(&mut self, extra: Extra) {
        self.extra = extra;
    }

    /// Consumes the item and returns its key, value and extra.
    #[must_use]
    pub fn into_parts(self) -> (String, Value, Extra) {
        (self.key, self.value, self.extra)
    }
}

/// Merges `addition` into a copy of `base`.
///
/// The merge is shallow: top-level entries of `addition` overwrite entries of
/// `base` with the same name, everything else is kept.
///
/// # Examples
///
/// ```
/// use serde_json::json;
/// use stashling::{Extra, merge_extra};
///
/// let mut base = Extra::new();
/// base.insert("a".into(), json!(1));
/// base.insert("b".into(), json!(2));
///
/// let mut addition = Extra::new();
/// addition.insert("b".into(), json!(3));
///
/// let merged = merge_extra(&base, &addition);
/// assert_eq!(merged.get("a"), Some(&json!(1)));
/// assert_eq!(merged.get("b"), Some(&json!(3)));
/// ```
#[must_use]
pub fn merge_extra(base: &Extra, addition: &Extra) -> Extra {
    let mut merged = base.clone();
    merged.extend(addition.iter().map(|(name, value)| (name.clone(), value.clone())));
    merged
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn extra(entries: &[(&str, Value)]) -> Extra {
        entries.iter().map(|(name, value)| ((*name).to_string(), value.clone())).collect()
    }

    #[test]
    fn items_with_different_extra_are_not_equal() {
        let a = StashItem::new("key", "value", extra(&[("x", json!(1))]));
        let b = StashItem::new("key", "value", extra(&[("x", json!(2))]));
        assert_ne!(a, b);
    }

    #[test]
    fn nested_values_compare_deeply() {
        let a = StashItem::new("key", json!({"list": [1, 2, {"deep": true}]}), Extra::new());
        let b = StashItem::new("key", json!({"list": [1, 2, {"deep": true}]}), Extra::new());
        assert_eq!(a, b);
    }

    #[test]
    fn merge_keeps_base_when_addition_is_empty() {
        let base = extra(&[("a", json!("x"))]);
        assert_eq!(merge_extra(&base, &Extra::new()), base);
    }

    #[test]
    fn merge_does_not_merge_nested_objects() {
        let base = extra(&[("nested", json!({"a": 1}))]);
        let addition = extra(&[("nested", json!({"b": 2}))]);
        let merged = merge_extra(&base, &addition);
        assert_eq!(merged.get("nested"), Some(&json!({"b": 2})));
    }

    #[test]
    fn into_parts_returns_all_fields() {
        let item = StashItem::new("key", 7, extra(&[("tag", json!("t"))]));
        let (key, value, extra) = item.into_parts();
        assert_eq!(key, "key");
        assert_eq!(value, json!(7));
        assert_eq!(extra.get("tag"), Some(&json!("t")));
    }

    #[test]
    fn serializes_with_field_names() {
        let item = StashItem::new("key", "value", Extra::new());
        let json = serde_json::to_value(&item).unwrap();
        assert_eq!(json, json!({"key": "key", "value": "value", "extra": {}}));
    }
}
