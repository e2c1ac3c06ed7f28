// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
#![cfg_attr(docsrs, feature(doc_cfg))]

//! A pluggable key-value cache abstraction with per-item extra metadata.
//!
//! This crate defines the [`StashInstance`] trait that cache backends implement,
//! along with [`StashItem`] for stored items, [`Extra`] for the metadata attached
//! to them and [`PluggableMethod`] for the names of the operations that plugins
//! may intercept.
//!
//! # Overview
//!
//! A stash stores items under string keys. Every item holds a JSON value and an
//! `extra` map of auxiliary metadata that can be read, merged into or replaced
//! independently of the value. Operations report "nothing happened" through
//! `None` or `false` and reserve [`Error`] for backends that failed outright.
//!
//! # Examples
//!
//! ```
//! use stashling::{Extra, InMemoryStash, StashInstance};
//! # futures::executor::block_on(async {
//!
//! let stash = InMemoryStash::new();
//!
//! let stored = stash.set_item("key", "value".into(), Extra::new()).await?;
//! assert!(stored.is_some());
//! assert!(stash.has_item("key").await?);
//!
//! assert!(stash.remove_item("key").await?);
//! assert!(!stash.has_item("key").await?);
//! # Ok::<(), stashling::Error>(())
//! # });
//! ```
//!
//! # Implementing a Stash
//!
//! Implement every method of [`StashInstance`]; [`merge_extra`] gives the
//! merge semantics `add_extra` is expected to follow.

pub mod error;
mod instance;
mod item;
mod memory;
mod method;
#[cfg(any(feature = "test-util", test))]
pub mod testing;

#[doc(inline)]
pub use error::{Error, Result};
#[doc(inline)]
pub use instance::StashInstance;
#[doc(inline)]
pub use item::{Extra, StashItem, merge_extra};
#[doc(inline)]
pub use memory::InMemoryStash;
#[doc(inline)]
pub use method::PluggableMethod;
