// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! The ordered checks a diagnostics run performs.

use serde_json::Value;
use stashling::{Extra, StashInstance, merge_extra};

use crate::{
    diagnostics::{DiagnosticStep, DiagnosticsError},
    event::Callback,
    telemetry::DebugTelemetry,
};

/// Name of the entry merged into the extra by the add-extra step.
pub const ADDITIONAL_EXTRA_NAME: &str = "___someAdditionalExtra___";

/// Value of the entry merged into the extra by the add-extra step.
pub const ADDITIONAL_EXTRA_VALUE: &str = "___someAdditionalValue___";

/// Returns the extra merged in by the add-extra step.
///
/// Its single entry is named so that it is unlikely to collide with real metadata.
#[must_use]
pub fn additional_extra() -> Extra {
    let mut extra = Extra::new();
    extra.insert(ADDITIONAL_EXTRA_NAME.to_string(), Value::from(ADDITIONAL_EXTRA_VALUE));
    extra
}

/// Everything one diagnostics run works with. Lives for a single run.
#[derive(Debug)]
pub(crate) struct Sequence<'a, C> {
    pub(crate) cache_instance: &'a C,
    pub(crate) callback: &'a Callback,
    pub(crate) telemetry: &'a DebugTelemetry,
    pub(crate) key: &'a str,
    pub(crate) value: Value,
    pub(crate) extra: Extra,
}

impl<C> Sequence<'_, C>
where
    C: StashInstance,
{
    /// Runs every step in order, stopping at the first one that fails.
    pub(crate) async fn run(self) -> Result<(), DiagnosticsError> {
        let key = self.key;
        let cache = self.cache_instance;

        let exists = cache.has_item(key).await;
        self.ensure(DiagnosticStep::PreliminaryCheck, exists.map(|exists| !exists))?;

        let stored = cache.set_item(key, self.value.clone(), self.extra.clone()).await;
        let stored = self.require(DiagnosticStep::SetItem, stored)?;

        let present = cache.has_item(key).await;
        self.ensure(DiagnosticStep::VerifyPresent, present)?;

        let fetched = cache.get_item(key).await;
        let fetched = self.require(DiagnosticStep::GetItem, fetched)?;

        self.ensure(DiagnosticStep::CompareItems, Ok(stored == fetched))?;

        let extra = cache.get_extra(key).await;
        self.require(DiagnosticStep::GetExtra, extra)?;

        let additional = additional_extra();
        let expected = merge_extra(&self.extra, &additional);
        let added = cache.add_extra(key, additional).await;
        self.ensure(DiagnosticStep::AddExtra, added.map(|added| added.as_ref() == Some(&expected)))?;

        let replaced = cache.set_extra(key, self.extra.clone()).await;
        self.ensure(DiagnosticStep::SetExtra, replaced.map(|replaced| replaced.as_ref() == Some(&self.extra)))?;

        let removed = cache.remove_item(key).await;
        self.ensure(DiagnosticStep::RemoveItem, removed)?;

        let still_present = cache.has_item(key).await;
        self.ensure(DiagnosticStep::VerifyAbsent, still_present.map(|present| !present))
    }

    /// Passes `step` if the stash produced a value.
    fn require<T>(&self, step: DiagnosticStep, outcome: stashling::Result<Option<T>>) -> Result<T, DiagnosticsError> {
        match outcome {
            Ok(Some(value)) => {
                self.passed(step);
                Ok(value)
            }
            Ok(None) => Err(DiagnosticsError::new(step)),
            Err(cause) => Err(DiagnosticsError::caused_by(step, cause)),
        }
    }

    /// Passes `step` if the check came out `true`.
    fn ensure(&self, step: DiagnosticStep, outcome: stashling::Result<bool>) -> Result<(), DiagnosticsError> {
        self.require(step, outcome.map(|passed| passed.then_some(())))
    }

    fn passed(&self, step: DiagnosticStep) {
        self.telemetry.record_passed(step);
        if let Some(message) = step.success_message() {
            self.callback.message(message);
        }
    }
}
