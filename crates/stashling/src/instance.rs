// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! The capability set stash backends expose.

use std::sync::Arc;

use serde_json::Value;

use crate::{Error, Extra, StashItem};

/// Trait for stash implementations.
///
/// Every method is required. Operations that ran but had no effect report it
/// through their return value (`None` or `false`); `Err` is reserved for
/// operations that could not be carried out.
///
/// The trait is implemented for `&S` and `Arc<S>` so a single stash can be
/// shared between its owner and the plugins that drive it.
pub trait StashInstance: Send + Sync {
    /// Returns `true` if an item is stored under `key`.
    fn has_item(&self, key: &str) -> impl Future<Output = Result<bool, Error>> + Send;

    /// Stores `value` and `extra` under `key`, returning the item as stored.
    fn set_item(&self, key: &str, value: Value, extra: Extra) -> impl Future<Output = Result<Option<StashItem>, Error>> + Send;

    /// Returns the item stored under `key`.
    fn get_item(&self, key: &str) -> impl Future<Output = Result<Option<StashItem>, Error>> + Send;

    /// Returns the extra metadata of the item stored under `key`.
    fn get_extra(&self, key: &str) -> impl Future<Output = Result<Option<Extra>, Error>> + Send;

    /// Merges `extra` into the item's extra metadata and returns the merged result.
    fn add_extra(&self, key: &str, extra: Extra) -> impl Future<Output = Result<Option<Extra>, Error>> + Send;

    /// Replaces the item's extra metadata and returns what was stored.
    fn set_extra(&self, key: &str, extra: Extra) -> impl Future<Output = Result<Option<Extra>, Error>> + Send;

    /// Removes the item stored under `key`, returning `true` if it was removed.
    fn remove_item(&self, key: &str) -> impl Future<Output = Result<bool, Error>> + Send;
}

impl<S> StashInstance for &S
where
    S: StashInstance,
{
    fn has_item(&self, key: &str) -> impl Future<Output = Result<bool, Error>> + Send {
        (**self).has_item(key)
    }

    fn set_item(&self, key: &str, value: Value, extra: Extra) -> impl Future<Output = Result<Option<StashItem>, Error>> + Send {
        (**self).set_item(key, value, extra)
    }

    fn get_item(&self, key: &str) -> impl Future<Output = Result<Option<StashItem>, Error>> + Send {
        (**self).get_item(key)
    }

    fn get_extra(&self, key: &str) -> impl Future<Output = Result<Option<Extra>, Error>> + Send {
        (**self).get_extra(key)
    }

    fn add_extra(&self, key: &str, extra: Extra) -> impl Future<Output = Result<Option<Extra>, Error>> + Send {
        (**self).add_extra(key, extra)
    }

    fn set_extra(&self, key: &str, extra: Extra) -> impl Future<Output = Result<Option<Extra>, Error>> + Send {
        (**self).set_extra(key, extra)
    }

    fn remove_item(&self, key: &str) -> impl Future<Output = Result<bool, Error>> + Send {
        (**self).remove_item(key)
    }
}

impl<S> StashInstance for Arc<S>
where
    S: StashInstance,
{
    fn has_item(&self, key: &str) -> impl Future<Output = Result<bool, Error>> + Send {
        self.as_ref().has_item(key)
    }

    fn set_item(&self, key: &str, value: Value, extra: Extra) -> impl Future<Output = Result<Option<StashItem>, Error>> + Send {
        self.as_ref().set_item(key, value, extra)
    }

    fn get_item(&self, key: &str) -> impl Future<Output = Result<Option<StashItem>, Error>> + Send {
        self.as_ref().get_item(key)
    }

    fn get_extra(&self, key: &str) -> impl Future<Output = Result<Option<Extra>, Error>> + Send {
        self.as_ref().get_extra(key)
    }

    fn add_extra(&self, key: &str, extra: Extra) -> impl Future<Output = Result<Option<Extra>, Error>> + Send {
        self.as_ref().add_extra(key, extra)
    }

    fn set_extra(&self, key: &str, extra: Extra) -> impl Future<Output = Result<Option<Extra>, Error>> + Send {
        self.as_ref().set_extra(key, extra)
    }

    fn remove_item(&self, key: &str) -> impl Future<Output = Result<bool, Error>> + Send {
        self.as_ref().remove_item(key)
    }
}
