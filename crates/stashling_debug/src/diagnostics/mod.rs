// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! End-to-end diagnostics against a live stash.
//!
//! A run drives one key through the whole item lifecycle and reports every
//! step through the plugin callback:
//!
//! 1. the key must not exist yet (silent on success),
//! 2. set, verify present, get, and compare the item,
//! 3. get, add to, and replace its extra,
//! 4. remove it and verify it is gone.
//!
//! The first failing step ends the run. Its message is reported, followed by
//! [`FINISHED_FAILURE`]; a run in which every step passed ends with
//! [`FINISHED_SUCCESS`].

use serde_json::Value;
use stashling::{Extra, StashInstance};

use crate::{event::Callback, telemetry::DebugTelemetry};

mod error;
mod sequence;
mod step;

pub use error::DiagnosticsError;
pub use sequence::{ADDITIONAL_EXTRA_NAME, ADDITIONAL_EXTRA_VALUE, additional_extra};
pub use step::{DiagnosticStep, FINISHED_FAILURE, FINISHED_SUCCESS};

use sequence::Sequence;

/// How a diagnostics run ended.
///
/// The callback has already been told everything this value carries.
#[derive(Debug)]
pub enum DiagnosticsOutcome {
    /// Every step passed.
    Succeeded,
    /// A step failed and the remaining steps were skipped.
    Failed(DiagnosticsError),
}

impl DiagnosticsOutcome {
    /// Returns `true` if every step passed.
    #[must_use]
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Succeeded)
    }

    /// Returns the step that failed, if any.
    #[must_use]
    pub fn failed_step(&self) -> Option<DiagnosticStep> {
        match self {
            Self::Succeeded => None,
            Self::Failed(error) => Some(error.step()),
        }
    }

    /// Converts the outcome into a `Result`.
    ///
    /// # Errors
    ///
    /// Returns the [`DiagnosticsError`] of a failed run.
    pub fn into_result(self) -> Result<(), DiagnosticsError> {
        match self {
            Self::Succeeded => Ok(()),
            Self::Failed(error) => Err(error),
        }
    }
}

/// Extensions the debug plugin attaches to a stash.
///
/// Created by [`DebugPlugin::create_extensions`](crate::DebugPlugin::create_extensions).
///
/// # Examples
///
/// ```
/// use stashling::InMemoryStash;
/// use stashling_debug::DebugPlugin;
/// # futures::executor::block_on(async {
///
/// let plugin = DebugPlugin::new(|event| println!("{event}"));
/// let extensions = plugin.create_extensions(InMemoryStash::new());
///
/// let outcome = extensions.run_diagnostics("probe", "value").await;
/// assert!(outcome.is_success());
/// # });
/// ```
#[derive(Debug)]
pub struct Extensions<C> {
    cache_instance: C,
    callback: Callback,
    telemetry: DebugTelemetry,
}

impl<C> Extensions<C> {
    pub(crate) fn new(cache_instance: C, callback: Callback, telemetry: DebugTelemetry) -> Self {
        Self {
            cache_instance,
            callback,
            telemetry,
        }
    }

    /// Returns the stash the extensions operate on.
    #[must_use]
    pub fn cache_instance(&self) -> &C {
        &self.cache_instance
    }
}

impl<C> Extensions<C>
where
    C: StashInstance,
{
    /// Runs diagnostics for `key` with an empty extra.
    ///
    /// See [`run_diagnostics_with_extra`](Self::run_diagnostics_with_extra).
    pub async fn run_diagnostics(&self, key: &str, value: impl Into<Value>) -> DiagnosticsOutcome {
        self.run_diagnostics_with_extra(key, value, Extra::new()).await
    }

    /// Runs diagnostics for `key`, storing `value` and `extra` under it.
    ///
    /// `key` must not be in the stash yet. The returned future always
    /// completes; failures are reported through the callback and mirrored in
    /// the returned [`DiagnosticsOutcome`].
    pub async fn run_diagnostics_with_extra(&self, key: &str, value: impl Into<Value>, extra: Extra) -> DiagnosticsOutcome {
        let sequence = Sequence {
            cache_instance: &self.cache_instance,
            callback: &self.callback,
            telemetry: &self.telemetry,
            key,
            value: value.into(),
            extra,
        };

        match sequence.run().await {
            Ok(()) => {
                self.callback.message(FINISHED_SUCCESS);
                self.telemetry.record_finished(true);
                DiagnosticsOutcome::Succeeded
            }
            Err(error) => {
                self.telemetry.record_failed(&error);
                self.callback.message(error.message());
                self.callback.message(FINISHED_FAILURE);
                self.telemetry.record_finished(false);
                DiagnosticsOutcome::Failed(error)
            }
        }
    }

    /// Runs diagnostics on the calling thread, blocking until the run ends.
    ///
    /// Same as [`run_diagnostics_with_extra`](Self::run_diagnostics_with_extra).
    pub fn run_diagnostics_blocking(&self, key: &str, value: impl Into<Value>, extra: Extra) -> DiagnosticsOutcome {
        futures::executor::block_on(self.run_diagnostics_with_extra(key, value, extra))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn outcome_accessors() {
        let succeeded = DiagnosticsOutcome::Succeeded;
        assert!(succeeded.is_success());
        assert_eq!(succeeded.failed_step(), None);
        assert!(succeeded.into_result().is_ok());

        let failed = DiagnosticsOutcome::Failed(DiagnosticsError::new(DiagnosticStep::CompareItems));
        assert!(!failed.is_success());
        assert_eq!(failed.failed_step(), Some(DiagnosticStep::CompareItems));
        let error = failed.into_result().expect_err("failed outcome converts to an error");
        assert_eq!(error.step(), DiagnosticStep::CompareItems);
    }
}
