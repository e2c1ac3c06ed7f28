// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

#[cfg(any(feature = "metrics", test))]
pub(crate) const DEBUG_STEP_NAME: &str = "debug.step";

#[cfg(any(feature = "metrics", test))]
pub(crate) const DEBUG_ACTIVITY_NAME: &str = "debug.activity";

#[cfg(any(feature = "metrics", test))]
pub(crate) const DEBUG_EVENT_NAME: &str = "debug.event";

#[cfg(test)]
pub(crate) const DEBUG_OUTCOME_NAME: &str = "debug.outcome";

#[cfg(test)]
pub(crate) const DEBUG_CAUSE_NAME: &str = "debug.cause";
