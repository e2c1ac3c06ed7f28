// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! The plugin factory.

#[cfg(any(feature = "metrics", test))]
use opentelemetry::metrics::MeterProvider;
use stashling::{PluggableMethod, StashInstance};

use crate::{
    diagnostics::Extensions,
    event::{Callback, DebugEvent},
    hooks::{Hook, create_hooks},
    telemetry::{DebugTelemetry, config::TelemetryConfig},
};

/// Returned by [`DebugPluginBuilder::build`] when no callback was supplied.
#[ohno::error]
#[display("callback must be a function")]
pub struct BuildError {}

/// A debugging plugin for stashes.
///
/// The plugin offers two things, both reporting through one callback:
/// - [`hooks`](Self::hooks): a `pre`/`post` hook pair for every pluggable method,
///   ready to be registered with a host.
/// - [`create_extensions`](Self::create_extensions): diagnostics bound to a stash.
///
/// # Examples
///
/// ```
/// use stashling_debug::{DebugPlugin, HookArgs};
///
/// let plugin = DebugPlugin::new(|event| println!("{event}"));
/// assert_eq!(plugin.hooks()[0].event(), "preBuildKey");
///
/// let args = HookArgs::new().with_field("key", "user:1");
/// assert_eq!(plugin.hooks()[0].handle(args.clone()), args);
/// ```
#[derive(Clone, Debug)]
pub struct DebugPlugin {
    hooks: Vec<Hook>,
    callback: Callback,
    telemetry: DebugTelemetry,
}

impl DebugPlugin {
    /// Creates a plugin with default settings.
    ///
    /// Hooks are generated for every [`PluggableMethod`] and strip the stash
    /// from the arguments they forward.
    pub fn new<F>(callback: F) -> Self
    where
        F: Fn(DebugEvent) + Send + Sync + 'static,
    {
        Self::from_parts(
            Callback::new(callback),
            false,
            &default_methods(),
            TelemetryConfig::new().build(),
        )
    }

    /// Creates a builder for a plugin with custom settings.
    #[must_use]
    pub fn builder() -> DebugPluginBuilder {
        DebugPluginBuilder::new()
    }

    fn from_parts(callback: Callback, with_cache_instance: bool, methods: &[String], telemetry: DebugTelemetry) -> Self {
        Self {
            hooks: create_hooks(methods, &callback, with_cache_instance, &telemetry),
            callback,
            telemetry,
        }
    }

    /// Returns the hooks, two per pluggable method, in method order.
    #[must_use]
    pub fn hooks(&self) -> &[Hook] {
        &self.hooks
    }

    /// Binds diagnostics to `cache_instance`.
    ///
    /// The plugin never owns the stash's lifecycle; pass a reference or an
    /// `Arc` to keep using the stash elsewhere.
    pub fn create_extensions<C>(&self, cache_instance: C) -> Extensions<C>
    where
        C: StashInstance,
    {
        Extensions::new(cache_instance, self.callback.clone(), self.telemetry.clone())
    }
}

fn default_methods() -> Vec<String> {
    PluggableMethod::ALL.iter().map(|method| method.as_str().to_string()).collect()
}

/// Builder for [`DebugPlugin`].
///
/// # Examples
///
/// ```
/// use stashling::PluggableMethod;
/// use stashling_debug::DebugPlugin;
///
/// let plugin = DebugPlugin::builder()
///     .callback(|event| println!("{event}"))
///     .with_cache_instance(true)
///     .methods([PluggableMethod::GetItem, PluggableMethod::SetItem])
///     .build()?;
///
/// assert_eq!(plugin.hooks().len(), 4);
/// # Ok::<(), stashling_debug::BuildError>(())
/// ```
#[derive(Debug)]
pub struct DebugPluginBuilder {
    callback: Option<Callback>,
    with_cache_instance: bool,
    methods: Vec<String>,
    telemetry: TelemetryConfig,
}

impl DebugPluginBuilder {
    fn new() -> Self {
        Self {
            callback: None,
            with_cache_instance: false,
            methods: default_methods(),
            telemetry: TelemetryConfig::new(),
        }
    }

    /// Sets the callback every event is reported to. Required.
    #[must_use]
    pub fn callback<F>(mut self, callback: F) -> Self
    where
        F: Fn(DebugEvent) + Send + Sync + 'static,
    {
        self.callback = Some(Callback::new(callback));
        self
    }

    /// Controls whether hooks forward the stash along with the other arguments.
    ///
    /// Defaults to `false`.
    #[must_use]
    pub fn with_cache_instance(mut self, enabled: bool) -> Self {
        self.with_cache_instance = enabled;
        self
    }

    /// Sets the methods hooks are generated for.
    ///
    /// Defaults to every [`PluggableMethod`]. Names are used as given, so
    /// hooks can also be generated for methods a host adds on its own.
    #[must_use]
    pub fn methods<I>(mut self, methods: I) -> Self
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        self.methods = methods.into_iter().map(|method| method.as_ref().to_string()).collect();
        self
    }

    /// Enables structured logging of hooks and diagnostics.
    #[cfg(any(feature = "logs", test))]
    #[must_use]
    pub fn logs(mut self) -> Self {
        self.telemetry = self.telemetry.with_logs();
        self
    }

    /// Enables metrics on a meter created from `provider`.
    #[cfg(any(feature = "metrics", test))]
    #[must_use]
    pub fn metrics(mut self, provider: &dyn MeterProvider) -> Self {
        self.telemetry = self.telemetry.with_metrics(provider);
        self
    }

    /// Builds the plugin.
    ///
    /// # Errors
    ///
    /// Returns [`BuildError`] if no callback was set.
    pub fn build(self) -> Result<DebugPlugin, BuildError> {
        let callback = self.callback.ok_or_else(BuildError::new)?;
        Ok(DebugPlugin::from_parts(
            callback,
            self.with_cache_instance,
            &self.methods,
            self.telemetry.build(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use parking_lot::Mutex;

    use super::*;
    use crate::hooks::HookArgs;

    #[test]
    fn build_without_callback_fails() {
        let error = DebugPlugin::builder().build().expect_err("callback is required");
        assert!(
            error.to_string().starts_with("callback must be a function"),
            "unexpected display: {error}"
        );
    }

    #[test]
    fn default_methods_cover_every_pluggable_method() {
        let plugin = DebugPlugin::new(|_| {});
        assert_eq!(plugin.hooks().len(), PluggableMethod::ALL.len() * 2);
    }

    #[test]
    fn builder_methods_accept_plain_names() {
        let plugin = DebugPlugin::builder()
            .callback(|_| {})
            .methods(["getItem", "customLookup"])
            .build()
            .unwrap();

        let events: Vec<_> = plugin.hooks().iter().map(Hook::event).collect();
        assert_eq!(events, ["preGetItem", "postGetItem", "preCustomLookup", "postCustomLookup"]);
    }

    #[test]
    fn logs_and_metrics_can_be_enabled_together() {
        let tester = crate::telemetry::testing::MetricTester::new();
        let plugin = DebugPlugin::builder()
            .callback(|_| {})
            .logs()
            .metrics(tester.meter_provider())
            .build()
            .unwrap();
        assert!(!plugin.hooks().is_empty());
    }

    #[test]
    fn clones_share_callback() {
        let seen = Arc::new(Mutex::new(0_usize));
        let counter = Arc::clone(&seen);
        let plugin = DebugPlugin::new(move |_| *counter.lock() += 1);
        let clone = plugin.clone();

        let _ = plugin.hooks()[0].handle(HookArgs::new());
        let _ = clone.hooks()[1].handle(HookArgs::new());

        assert_eq!(*seen.lock(), 2);
    }
}
