// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Structured logs and metrics for hooks and diagnostics.
//!
//! Telemetry is a side channel: the callback stream stays the contract, this
//! module only mirrors it into `tracing` (feature `logs`) and OpenTelemetry
//! counters (feature `metrics`).

#[cfg(any(feature = "metrics", test))]
use opentelemetry::{KeyValue, metrics::Counter};

use crate::diagnostics::{DiagnosticStep, DiagnosticsError};

#[cfg(any(feature = "metrics", test))]
pub(crate) mod attributes;
pub(crate) mod config;
#[cfg(any(feature = "metrics", test))]
pub(crate) mod metrics;
#[cfg(test)]
pub(crate) mod testing;

/// Records what the plugin observes. Everything is off by default.
#[derive(Clone, Debug, Default)]
pub(crate) struct DebugTelemetry {
    #[cfg(any(feature = "logs", test))]
    logging_enabled: bool,
    #[cfg(any(feature = "metrics", test))]
    step_counter: Option<Counter<u64>>,
    #[cfg(any(feature = "metrics", test))]
    hook_counter: Option<Counter<u64>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum StepActivity {
    Passed,
    Failed,
}

impl StepActivity {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Passed => "diagnostics.passed",
            Self::Failed => "diagnostics.failed",
        }
    }
}

impl DebugTelemetry {
    // Field names in the `tracing` calls below must match the constants in
    // attributes.rs, see the attribute_names_match_tracing_fields test.
    pub(crate) fn record_hook(&self, event: &str) {
        #[cfg(any(feature = "metrics", test))]
        {
            if let Some(counter) = &self.hook_counter {
                counter.add(1, &[KeyValue::new(attributes::DEBUG_EVENT_NAME, event.to_string())]);
            }
        }

        #[cfg(any(feature = "logs", test))]
        {
            if self.logging_enabled {
                tracing::debug!(debug.event = event, "debug.hook");
            }
        }

        #[cfg(not(any(feature = "logs", feature = "metrics", test)))]
        {
            let _ = event;
        }
    }

    pub(crate) fn record_passed(&self, step: DiagnosticStep) {
        self.count_step(step, StepActivity::Passed);

        #[cfg(any(feature = "logs", test))]
        {
            if self.logging_enabled {
                tracing::debug!(
                    debug.step = step.as_str(),
                    debug.activity = StepActivity::Passed.as_str(),
                    "diagnostics.step"
                );
            }
        }
    }

    pub(crate) fn record_failed(&self, error: &DiagnosticsError) {
        self.count_step(error.step(), StepActivity::Failed);

        #[cfg(any(feature = "logs", test))]
        {
            if self.logging_enabled {
                tracing::warn!(
                    debug.step = error.step().as_str(),
                    debug.activity = StepActivity::Failed.as_str(),
                    debug.cause = %error,
                    "diagnostics.step"
                );
            }
        }
    }

    pub(crate) fn record_finished(&self, succeeded: bool) {
        #[cfg(any(feature = "logs", test))]
        {
            if self.logging_enabled {
                let outcome = if succeeded { "success" } else { "failure" };
                tracing::info!(debug.outcome = outcome, "diagnostics.finished");
            }
        }

        #[cfg(not(any(feature = "logs", test)))]
        {
            let _ = succeeded;
        }
    }

    fn count_step(&self, step: DiagnosticStep, activity: StepActivity) {
        #[cfg(any(feature = "metrics", test))]
        {
            if let Some(counter) = &self.step_counter {
                counter.add(
                    1,
                    &[
                        KeyValue::new(attributes::DEBUG_STEP_NAME, step.as_str()),
                        KeyValue::new(attributes::DEBUG_ACTIVITY_NAME, activity.as_str()),
                    ],
                );
            }
        }

        #[cfg(not(any(feature = "metrics", test)))]
        {
            let _ = (step, activity);
        }
    }
}
