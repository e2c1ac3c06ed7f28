// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use crate::diagnostics::DiagnosticStep;

/// Why a diagnostics run stopped.
///
/// Carries the step that failed. When the stash returned an error rather than
/// a falsy result, that error is the [`source`](std::error::Error::source).
///
/// # Examples
///
/// ```
/// use stashling::{Extra, InMemoryStash, StashItem};
/// use stashling_debug::{DebugPlugin, DiagnosticStep};
/// # futures::executor::block_on(async {
///
/// let stash = InMemoryStash::with_items([StashItem::new("taken", "value", Extra::new())]);
/// let plugin = DebugPlugin::new(|_| {});
///
/// let outcome = plugin.create_extensions(&stash).run_diagnostics("taken", "other").await;
/// let error = outcome.into_result().unwrap_err();
///
/// assert_eq!(error.step(), DiagnosticStep::PreliminaryCheck);
/// assert_eq!(error.message(), "You can't run diagnostics on existing item. Use different key.");
/// # });
/// ```
#[ohno::error]
#[display("diagnostics failed at step {step}")]
pub struct DiagnosticsError {
    step: DiagnosticStep,
}

impl DiagnosticsError {
    /// Returns the step that failed.
    #[must_use]
    pub fn step(&self) -> DiagnosticStep {
        self.step
    }

    /// Returns the message reported to the callback for the failed step.
    #[must_use]
    pub fn message(&self) -> &'static str {
        self.step.failure_message()
    }
}

#[cfg(test)]
mod tests {
    use std::error::Error as _;

    use super::*;

    #[test]
    fn falsy_failure_has_no_source() {
        let error = DiagnosticsError::new(DiagnosticStep::GetItem);
        assert!(error.source().is_none());
        assert!(error.to_string().contains("3/9"));
    }

    #[test]
    fn message_is_the_failure_message_of_the_step() {
        let error = DiagnosticsError::new(DiagnosticStep::VerifyAbsent);
        assert_eq!(error.step(), DiagnosticStep::VerifyAbsent);
        assert_eq!(error.message(), "Error: Item still exists.");
    }

    #[test]
    fn stash_error_is_kept_as_cause() {
        let error = DiagnosticsError::caused_by(DiagnosticStep::SetItem, stashling::Error::from_message("quota exceeded"));
        assert_eq!(error.step(), DiagnosticStep::SetItem);
        assert!(error.to_string().contains("quota exceeded"));
    }
}
