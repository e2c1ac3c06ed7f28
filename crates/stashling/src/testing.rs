// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Mock stash implementation for testing.
//!
//! This module provides `MockStash`, an in-memory stash that records every
//! operation and supports two kinds of injected misbehavior: hard failures
//! (`Err`) and "falsy" results (`None` or `false`).

use std::{collections::HashMap, sync::Arc};

use parking_lot::Mutex;
use serde_json::Value;

use crate::{Error, Extra, StashInstance, StashItem, merge_extra};

/// Recorded stash operation with full context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StashOp {
    /// A `has_item` call for the given key.
    HasItem(String),
    /// A `set_item` call.
    SetItem {
        /// The key that was set.
        key: String,
        /// The value that was set.
        value: Value,
        /// The extra that was set.
        extra: Extra,
    },
    /// A `get_item` call for the given key.
    GetItem(String),
    /// A `get_extra` call for the given key.
    GetExtra(String),
    /// An `add_extra` call.
    AddExtra {
        /// The key whose extra was extended.
        key: String,
        /// The extra that was merged in.
        extra: Extra,
    },
    /// A `set_extra` call.
    SetExtra {
        /// The key whose extra was replaced.
        key: String,
        /// The replacement extra.
        extra: Extra,
    },
    /// A `remove_item` call for the given key.
    RemoveItem(String),
}

impl StashOp {
    /// Returns the key the operation targeted.
    #[must_use]
    pub fn key(&self) -> &str {
        match self {
            Self::HasItem(key) | Self::GetItem(key) | Self::GetExtra(key) | Self::RemoveItem(key) => key,
            Self::SetItem { key, .. } | Self::AddExtra { key, .. } | Self::SetExtra { key, .. } => key,
        }
    }
}

type OpPredicate = Box<dyn Fn(&StashOp) -> bool + Send + Sync>;

/// A configurable mock stash for testing.
///
/// The stash behaves like an identity store until told otherwise. All
/// operations are recorded for later verification, including the ones that
/// were made to fail.
///
/// # Examples
///
/// ```
/// use stashling::{Extra, StashInstance, testing::{MockStash, StashOp}};
/// # futures::executor::block_on(async {
///
/// let stash = MockStash::new();
/// stash.set_item("key", 1.into(), Extra::new()).await.unwrap();
/// assert!(stash.has_item("key").await.unwrap());
///
/// assert_eq!(stash.operations(), vec![
///     StashOp::SetItem { key: "key".into(), value: 1.into(), extra: Extra::new() },
///     StashOp::HasItem("key".into()),
/// ]);
/// # });
/// ```
///
/// # Misbehavior Injection
///
/// ```
/// use stashling::{StashInstance, testing::{MockStash, StashOp}};
/// # futures::executor::block_on(async {
///
/// let stash = MockStash::new();
///
/// // Every removal reports that nothing was removed.
/// stash.reject_when(|op| matches!(op, StashOp::RemoveItem(_)));
/// assert!(!stash.remove_item("key").await.unwrap());
///
/// // Every lookup fails outright.
/// stash.fail_when(|op| matches!(op, StashOp::HasItem(_)));
/// assert!(stash.has_item("key").await.is_err());
/// # });
/// ```
pub struct MockStash {
    items: Arc<Mutex<HashMap<String, StashItem>>>,
    operations: Arc<Mutex<Vec<StashOp>>>,
    fail_when: Arc<Mutex<Option<OpPredicate>>>,
    reject_when: Arc<Mutex<Option<OpPredicate>>>,
}

impl std::fmt::Debug for MockStash {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MockStash")
            .field("items", &self.items)
            .field("operations", &self.operations)
            .field("fail_when", &self.fail_when.lock().is_some())
            .field("reject_when", &self.reject_when.lock().is_some())
            .finish()
    }
}

impl Clone for MockStash {
    fn clone(&self) -> Self {
        Self {
            items: Arc::clone(&self.items),
            operations: Arc::clone(&self.operations),
            fail_when: Arc::clone(&self.fail_when),
            reject_when: Arc::clone(&self.reject_when),
        }
    }
}

impl Default for MockStash {
    fn default() -> Self {
        Self::new()
    }
}

impl MockStash {
    /// Creates a new empty mock stash.
    #[must_use]
    pub fn new() -> Self {
        Self::with_items(Vec::new())
    }

    /// Creates a mock stash pre-populated with `items`.
    #[must_use]
    pub fn with_items(items: impl IntoIterator<Item = StashItem>) -> Self {
        let items = items.into_iter().map(|item| (item.key().to_string(), item)).collect();
        Self {
            items: Arc::new(Mutex::new(items)),
            operations: Arc::new(Mutex::new(Vec::new())),
            fail_when: Arc::new(Mutex::new(None)),
            reject_when: Arc::new(Mutex::new(None)),
        }
    }

    /// Returns the number of stored items.
    #[must_use]
    pub fn entry_count(&self) -> usize {
        self.items.lock().len()
    }

    /// Returns `true` if an item is stored under `key`.
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.items.lock().contains_key(key)
    }

    /// Sets a predicate that decides which operations fail with an error.
    ///
    /// Failed operations are recorded but leave the stored items untouched.
    pub fn fail_when<F>(&self, predicate: F)
    where
        F: Fn(&StashOp) -> bool + Send + Sync + 'static,
    {
        *self.fail_when.lock() = Some(Box::new(predicate));
    }

    /// Sets a predicate that decides which operations report a falsy result.
    ///
    /// Rejected operations return `None` or `false`, are recorded, and leave
    /// the stored items untouched. Failure predicates take precedence.
    pub fn reject_when<F>(&self, predicate: F)
    where
        F: Fn(&StashOp) -> bool + Send + Sync + 'static,
    {
        *self.reject_when.lock() = Some(Box::new(predicate));
    }

    /// Clears both predicates, letting every operation succeed.
    pub fn clear_failures(&self) {
        *self.fail_when.lock() = None;
        *self.reject_when.lock() = None;
    }

    /// Returns a clone of all recorded operations.
    #[must_use]
    pub fn operations(&self) -> Vec<StashOp> {
        self.operations.lock().clone()
    }

    /// Clears all recorded operations.
    pub fn clear_operations(&self) {
        self.operations.lock().clear();
    }

    /// Records `op` and decides how it should be answered.
    fn intercept(&self, op: StashOp) -> Result<Verdict, Error> {
        let failed = self.fail_when.lock().as_ref().is_some_and(|predicate| predicate(&op));
        let rejected = self.reject_when.lock().as_ref().is_some_and(|predicate| predicate(&op));
        let name = op_name(&op);
        self.operations.lock().push(op);

        if failed {
            return Err(Error::caused_by(format!("mock: {name} failed")));
        }

        Ok(if rejected { Verdict::Reject } else { Verdict::Proceed })
    }

    fn update_extra(&self, key: &str, update: impl FnOnce(&Extra) -> Extra) -> Option<Extra> {
        let mut items = self.items.lock();
        let item = items.get_mut(key)?;
        let extra = update(item.extra());
        item.set_extra(extra.clone());
        Some(extra)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Verdict {
    Proceed,
    Reject,
}

fn op_name(op: &StashOp) -> &'static str {
    match op {
        StashOp::HasItem(_) => "has_item",
        StashOp::SetItem { .. } => "set_item",
        StashOp::GetItem(_) => "get_item",
        StashOp::GetExtra(_) => "get_extra",
        StashOp::AddExtra { .. } => "add_extra",
        StashOp::SetExtra { .. } => "set_extra",
        StashOp::RemoveItem(_) => "remove_item",
    }
}

impl StashInstance for MockStash {
    async fn has_item(&self, key: &str) -> Result<bool, Error> {
        match self.intercept(StashOp::HasItem(key.to_string()))? {
            Verdict::Reject => Ok(false),
            Verdict::Proceed => Ok(self.contains_key(key)),
        }
    }

    async fn set_item(&self, key: &str, value: Value, extra: Extra) -> Result<Option<StashItem>, Error> {
        let op = StashOp::SetItem {
            key: key.to_string(),
            value: value.clone(),
            extra: extra.clone(),
        };
        if self.intercept(op)? == Verdict::Reject {
            return Ok(None);
        }

        let item = StashItem::new(key, value, extra);
        self.items.lock().insert(key.to_string(), item.clone());
        Ok(Some(item))
    }

    async fn get_item(&self, key: &str) -> Result<Option<StashItem>, Error> {
        match self.intercept(StashOp::GetItem(key.to_string()))? {
            Verdict::Reject => Ok(None),
            Verdict::Proceed => Ok(self.items.lock().get(key).cloned()),
        }
    }

    async fn get_extra(&self, key: &str) -> Result<Option<Extra>, Error> {
        match self.intercept(StashOp::GetExtra(key.to_string()))? {
            Verdict::Reject => Ok(None),
            Verdict::Proceed => Ok(self.items.lock().get(key).map(|item| item.extra().clone())),
        }
    }

    async fn add_extra(&self, key: &str, extra: Extra) -> Result<Option<Extra>, Error> {
        let op = StashOp::AddExtra {
            key: key.to_string(),
            extra: extra.clone(),
        };
        match self.intercept(op)? {
            Verdict::Reject => Ok(None),
            Verdict::Proceed => Ok(self.update_extra(key, |current| merge_extra(current, &extra))),
        }
    }

    async fn set_extra(&self, key: &str, extra: Extra) -> Result<Option<Extra>, Error> {
        let op = StashOp::SetExtra {
            key: key.to_string(),
            extra: extra.clone(),
        };
        match self.intercept(op)? {
            Verdict::Reject => Ok(None),
            Verdict::Proceed => Ok(self.update_extra(key, |_| extra)),
        }
    }

    async fn remove_item(&self, key: &str) -> Result<bool, Error> {
        match self.intercept(StashOp::RemoveItem(key.to_string()))? {
            Verdict::Reject => Ok(false),
            Verdict::Proceed => Ok(self.items.lock().remove(key).is_some()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn block_on<F: Future>(f: F) -> F::Output {
        futures::executor::block_on(f)
    }

    #[test]
    fn failed_operations_are_recorded() {
        let stash = MockStash::new();
        stash.fail_when(|_| true);

        let error = block_on(stash.get_item("key")).expect_err("get_item should fail");
        assert!(error.to_string().contains("mock: get_item failed"));
        assert_eq!(stash.operations(), vec![StashOp::GetItem("key".into())]);
    }

    #[test]
    fn rejected_set_item_does_not_store() {
        let stash = MockStash::new();
        stash.reject_when(|op| matches!(op, StashOp::SetItem { .. }));

        assert_eq!(block_on(stash.set_item("key", Value::Null, Extra::new())).unwrap(), None);
        assert!(!stash.contains_key("key"));
    }

    #[test]
    fn failure_takes_precedence_over_rejection() {
        let stash = MockStash::new();
        stash.reject_when(|_| true);
        stash.fail_when(|_| true);

        assert!(block_on(stash.remove_item("key")).is_err());
    }

    #[test]
    fn clear_failures_restores_identity_behavior() {
        let stash = MockStash::new();
        stash.fail_when(|_| true);
        stash.reject_when(|_| true);
        stash.clear_failures();

        let stored = block_on(stash.set_item("key", Value::Bool(true), Extra::new())).unwrap();
        assert_eq!(stored, block_on(stash.get_item("key")).unwrap());
    }

    #[test]
    fn op_key_returns_target_key() {
        let op = StashOp::AddExtra {
            key: "k".into(),
            extra: Extra::new(),
        };
        assert_eq!(op.key(), "k");
        assert_eq!(StashOp::HasItem("h".into()).key(), "h");
    }

    #[test]
    fn debug_reports_predicates_as_flags() {
        let stash = MockStash::new();
        stash.reject_when(|_| false);
        let debug = format!("{stash:?}");
        assert!(debug.contains("reject_when: true"));
        assert!(debug.contains("fail_when: false"));
    }
}
