// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! In-memory stash implementation.

use std::{collections::HashMap, sync::Arc};

use parking_lot::RwLock;
use serde_json::Value;

use crate::{Error, Extra, StashInstance, StashItem, merge_extra};

/// An in-memory stash.
///
/// This is an identity store: `get_item` returns exactly what `set_item`
/// stored, and `set_item` reports the item exactly as it was stored. Clones
/// share the same storage.
///
/// # Examples
///
/// ```
/// use stashling::{Extra, InMemoryStash, StashInstance};
/// # futures::executor::block_on(async {
///
/// let stash = InMemoryStash::new();
/// let stored = stash.set_item("key", 42.into(), Extra::new()).await?;
/// let fetched = stash.get_item("key").await?;
/// assert_eq!(stored, fetched);
/// # Ok::<(), stashling::Error>(())
/// # });
/// ```
#[derive(Debug, Clone, Default)]
pub struct InMemoryStash {
    items: Arc<RwLock<HashMap<String, StashItem>>>,
}

impl InMemoryStash {
    /// Creates a new empty stash.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a stash pre-populated with `items`, keyed by their own keys.
    #[must_use]
    pub fn with_items(items: impl IntoIterator<Item = StashItem>) -> Self {
        let items = items.into_iter().map(|item| (item.key().to_string(), item)).collect();
        Self {
            items: Arc::new(RwLock::new(items)),
        }
    }

    /// Returns the number of stored items.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.read().len()
    }

    /// Returns `true` if nothing is stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.read().is_empty()
    }

    /// Returns `true` if an item is stored under `key`.
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.items.read().contains_key(key)
    }

    fn update_extra(&self, key: &str, update: impl FnOnce(&Extra) -> Extra) -> Option<Extra> {
        let mut items = self.items.write();
        let item = items.get_mut(key)?;
        let extra = update(item.extra());
        item.set_extra(extra.clone());
        Some(extra)
    }
}

impl StashInstance for InMemoryStash {
    async fn has_item(&self, key: &str) -> Result<bool, Error> {
        Ok(self.contains_key(key))
    }

    async fn set_item(&self, key: &str, value: Value, extra: Extra) -> Result<Option<StashItem>, Error> {
        let item = StashItem::new(key, value, extra);
        self.items.write().insert(key.to_string(), item.clone());
        Ok(Some(item))
    }

    async fn get_item(&self, key: &str) -> Result<Option<StashItem>, Error> {
        Ok(self.items.read().get(key).cloned())
    }

    async fn get_extra(&self, key: &str) -> Result<Option<Extra>, Error> {
        Ok(self.items.read().get(key).map(|item| item.extra().clone()))
    }

    async fn add_extra(&self, key: &str, extra: Extra) -> Result<Option<Extra>, Error> {
        Ok(self.update_extra(key, |current| merge_extra(current, &extra)))
    }

    async fn set_extra(&self, key: &str, extra: Extra) -> Result<Option<Extra>, Error> {
        Ok(self.update_extra(key, |_| extra))
    }

    async fn remove_item(&self, key: &str) -> Result<bool, Error> {
        Ok(self.items.write().remove(key).is_some())
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn block_on<F: Future>(f: F) -> F::Output {
        futures::executor::block_on(f)
    }

    #[test]
    fn extra_updates_on_missing_item_return_none() {
        let stash = InMemoryStash::new();
        assert_eq!(block_on(stash.add_extra("missing", Extra::new())).unwrap(), None);
        assert_eq!(block_on(stash.set_extra("missing", Extra::new())).unwrap(), None);
        assert!(stash.is_empty());
    }

    #[test]
    fn clones_share_storage() {
        let stash = InMemoryStash::new();
        let clone = stash.clone();
        block_on(stash.set_item("key", json!(1), Extra::new())).unwrap();
        assert!(clone.contains_key("key"));
        assert_eq!(clone.len(), 1);
    }

    #[test]
    fn with_items_keys_by_item_key() {
        let stash = InMemoryStash::with_items([StashItem::new("a", 1, Extra::new()), StashItem::new("b", 2, Extra::new())]);
        assert!(stash.contains_key("a"));
        assert!(stash.contains_key("b"));
        assert_eq!(stash.len(), 2);
    }
}
