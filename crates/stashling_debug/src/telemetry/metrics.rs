// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use opentelemetry::{
    InstrumentationScope,
    metrics::{Counter, Meter, MeterProvider},
};

const METER_NAME: &str = "stashling_debug";
const VERSION: &str = "v0.1.0";
const SCHEMA_URL: &str = "https://opentelemetry.io/schemas/1.47.0";
const DIAGNOSTICS_STEP_COUNT_NAME: &str = "stashling.diagnostics.step.count";
const HOOK_EVENT_COUNT_NAME: &str = "stashling.hook.event.count";

pub(crate) fn create_meter(meter_provider: &dyn MeterProvider) -> Meter {
    meter_provider.meter_with_scope(
        InstrumentationScope::builder(METER_NAME)
            .with_version(VERSION)
            .with_schema_url(SCHEMA_URL)
            .build(),
    )
}

pub(crate) fn create_step_counter(meter: &Meter) -> Counter<u64> {
    meter
        .u64_counter(DIAGNOSTICS_STEP_COUNT_NAME)
        .with_description("Diagnostic steps run, by step and activity")
        .with_unit("{step}")
        .build()
}

pub(crate) fn create_hook_counter(meter: &Meter) -> Counter<u64> {
    meter
        .u64_counter(HOOK_EVENT_COUNT_NAME)
        .with_description("Hook invocations, by event")
        .with_unit("{event}")
        .build()
}
