// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
#![cfg_attr(docsrs, feature(doc_cfg))]

//! A debugging plugin for [`stashling`] caches.
//!
//! The plugin reports everything it observes to a single callback:
//! - **Hooks**: a `pre<Method>` and `post<Method>` hook for every pluggable
//!   method. Each forwards the arguments it sees as a [`DebugEvent::Hook`] and
//!   hands them back unchanged.
//! - **Diagnostics**: [`Extensions::run_diagnostics`] pushes one key through the
//!   whole item lifecycle against a live stash and reports numbered progress
//!   messages as [`DebugEvent::Message`], ending with [`FINISHED_SUCCESS`] or
//!   the failing step's message followed by [`FINISHED_FAILURE`].
//!
//! # Examples
//!
//! ```
//! use std::sync::{Arc, Mutex};
//!
//! use stashling::InMemoryStash;
//! use stashling_debug::{DebugPlugin, FINISHED_SUCCESS};
//! # futures::executor::block_on(async {
//!
//! let messages = Arc::new(Mutex::new(Vec::new()));
//! let sink = Arc::clone(&messages);
//! let plugin = DebugPlugin::new(move |event| {
//!     if let Some(message) = event.as_message() {
//!         sink.lock().unwrap().push(message);
//!     }
//! });
//!
//! let stash = InMemoryStash::new();
//! let outcome = plugin.create_extensions(&stash).run_diagnostics("probe", "value").await;
//!
//! assert!(outcome.is_success());
//! let messages = messages.lock().unwrap();
//! assert_eq!(messages.len(), 10);
//! assert_eq!(messages.last(), Some(&FINISHED_SUCCESS));
//! # });
//! ```
//!
//! # Features
//!
//! - `logs` (default): structured `tracing` events for hooks and diagnostic steps,
//!   enabled per plugin with [`DebugPluginBuilder::logs`].
//! - `metrics`: OpenTelemetry counters, enabled per plugin with
//!   [`DebugPluginBuilder::metrics`].

pub mod diagnostics;
mod event;
mod hooks;
mod plugin;
mod telemetry;

#[doc(inline)]
pub use diagnostics::{
    ADDITIONAL_EXTRA_NAME, ADDITIONAL_EXTRA_VALUE, DiagnosticStep, DiagnosticsError, DiagnosticsOutcome, Extensions, FINISHED_FAILURE,
    FINISHED_SUCCESS, additional_extra,
};
#[doc(inline)]
pub use event::DebugEvent;
#[doc(inline)]
pub use hooks::{CacheInstanceRef, Hook, HookArgs, HookHandler, HookPhase, HookRecord};
#[doc(inline)]
pub use plugin::{BuildError, DebugPlugin, DebugPluginBuilder};
