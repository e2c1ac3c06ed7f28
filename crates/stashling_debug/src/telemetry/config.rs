// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Telemetry configuration for the debug plugin.

#[cfg(any(feature = "metrics", test))]
use opentelemetry::metrics::{Meter, MeterProvider};

use crate::telemetry::DebugTelemetry;

/// Which telemetry sinks the plugin feeds.
///
/// Filled in by the plugin builder, then turned into a [`DebugTelemetry`].
#[derive(Clone, Debug, Default)]
pub(crate) struct TelemetryConfig {
    #[cfg(any(feature = "logs", test))]
    logs_enabled: bool,
    #[cfg(any(feature = "metrics", test))]
    meter: Option<Meter>,
}

impl TelemetryConfig {
    /// Creates a configuration with everything disabled.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Enables structured logging through `tracing`.
    #[cfg(any(feature = "logs", test))]
    #[must_use]
    pub(crate) fn with_logs(self) -> Self {
        Self {
            logs_enabled: true,
            ..self
        }
    }

    /// Enables counters on a meter created from `provider`.
    #[cfg(any(feature = "metrics", test))]
    #[must_use]
    pub fn with_metrics(mut self, provider: &dyn MeterProvider) -> Self {
        use crate::telemetry::metrics;
        self.meter = Some(metrics::create_meter(provider));
        self
    }

    #[must_use]
    pub(crate) fn build(self) -> DebugTelemetry {
        #[cfg(any(feature = "metrics", test))]
        let (step_counter, hook_counter) = {
            use crate::telemetry::metrics::{create_hook_counter, create_step_counter};
            (self.meter.as_ref().map(create_step_counter), self.meter.as_ref().map(create_hook_counter))
        };

        DebugTelemetry {
            #[cfg(any(feature = "logs", test))]
            logging_enabled: self.logs_enabled,
            #[cfg(any(feature = "metrics", test))]
            step_counter,
            #[cfg(any(feature = "metrics", test))]
            hook_counter,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::telemetry::testing::MetricTester;

    #[test]
    fn default_config_builds_silent_telemetry() {
        let telemetry = TelemetryConfig::new().build();
        assert!(!telemetry.logging_enabled);
        assert!(telemetry.step_counter.is_none());
        assert!(telemetry.hook_counter.is_none());
    }

    #[test]
    fn with_logs_enables_logging_only() {
        let telemetry = TelemetryConfig::new().with_logs().build();
        assert!(telemetry.logging_enabled);
        assert!(telemetry.step_counter.is_none());
    }

    #[test]
    fn with_metrics_creates_both_counters() {
        let tester = MetricTester::new();
        let telemetry = TelemetryConfig::new().with_metrics(tester.meter_provider()).build();
        assert!(!telemetry.logging_enabled);
        assert!(telemetry.step_counter.is_some());
        assert!(telemetry.hook_counter.is_some());
    }
}
