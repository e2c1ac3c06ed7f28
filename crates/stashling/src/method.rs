// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use std::fmt;

/// A stash operation that plugins can intercept with pre and post hooks.
///
/// [`as_str`](Self::as_str) returns the camel-cased operation name hooks are
/// derived from.
///
/// # Examples
///
/// ```
/// use stashling::PluggableMethod;
///
/// assert_eq!(PluggableMethod::GetItem.as_str(), "getItem");
/// assert_eq!(PluggableMethod::ALL.len(), 8);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PluggableMethod {
    /// Builds the storage key for a user key.
    BuildKey,
    /// Reads an item.
    GetItem,
    /// Reads the extra metadata of an item.
    GetExtra,
    /// Merges metadata into the extra of an item.
    AddExtra,
    /// Replaces the extra metadata of an item.
    SetExtra,
    /// Stores an item.
    SetItem,
    /// Checks whether an item exists.
    HasItem,
    /// Removes an item.
    RemoveItem,
}

impl PluggableMethod {
    /// Every pluggable method, in declaration order.
    pub const ALL: [Self; 8] = [
        Self::BuildKey,
        Self::GetItem,
        Self::GetExtra,
        Self::AddExtra,
        Self::SetExtra,
        Self::SetItem,
        Self::HasItem,
        Self::RemoveItem,
    ];

    /// Returns the operation name.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::BuildKey => "buildKey",
            Self::GetItem => "getItem",
            Self::GetExtra => "getExtra",
            Self::AddExtra => "addExtra",
            Self::SetExtra => "setExtra",
            Self::SetItem => "setItem",
            Self::HasItem => "hasItem",
            Self::RemoveItem => "removeItem",
        }
    }
}

impl AsRef<str> for PluggableMethod {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for PluggableMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn names_are_unique() {
        let names: HashSet<_> = PluggableMethod::ALL.iter().map(|m| m.as_str()).collect();
        assert_eq!(names.len(), PluggableMethod::ALL.len());
    }

    #[test]
    fn display_matches_as_str() {
        for method in PluggableMethod::ALL {
            assert_eq!(method.to_string(), method.as_str());
        }
    }
}
