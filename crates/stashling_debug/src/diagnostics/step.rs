// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use std::fmt;

/// Reported after every step passed.
pub const FINISHED_SUCCESS: &str = "Finished: SUCCESS.";

/// Reported after the message of the step that failed.
pub const FINISHED_FAILURE: &str = "Finished: FAILURE.";

/// A step of the diagnostic sequence, in execution order.
///
/// The preliminary check is unnumbered and silent on success; the remaining
/// nine steps report a numbered progress message.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DiagnosticStep {
    /// The key must not be in the stash yet.
    PreliminaryCheck,
    /// `set_item` must store the item.
    SetItem,
    /// `has_item` must find the item.
    VerifyPresent,
    /// `get_item` must return the item.
    GetItem,
    /// The item got must equal the item set.
    CompareItems,
    /// `get_extra` must return the item's extra.
    GetExtra,
    /// `add_extra` must return the merged extra.
    AddExtra,
    /// `set_extra` must return the replacement extra.
    SetExtra,
    /// `remove_item` must remove the item.
    RemoveItem,
    /// `has_item` must no longer find the item.
    VerifyAbsent,
}

impl DiagnosticStep {
    /// Every step, in execution order.
    pub const ALL: [Self; 10] = [
        Self::PreliminaryCheck,
        Self::SetItem,
        Self::VerifyPresent,
        Self::GetItem,
        Self::CompareItems,
        Self::GetExtra,
        Self::AddExtra,
        Self::SetExtra,
        Self::RemoveItem,
        Self::VerifyAbsent,
    ];

    /// Number of numbered steps.
    pub const TOTAL: u8 = 9;

    /// Returns the progress number, or `None` for the preliminary check.
    #[must_use]
    pub fn number(self) -> Option<u8> {
        match self {
            Self::PreliminaryCheck => None,
            Self::SetItem => Some(1),
            Self::VerifyPresent => Some(2),
            Self::GetItem => Some(3),
            Self::CompareItems => Some(4),
            Self::GetExtra => Some(5),
            Self::AddExtra => Some(6),
            Self::SetExtra => Some(7),
            Self::RemoveItem => Some(8),
            Self::VerifyAbsent => Some(9),
        }
    }

    /// Returns the message reported when the step passes.
    #[must_use]
    pub fn success_message(self) -> Option<&'static str> {
        match self {
            Self::PreliminaryCheck => None,
            Self::SetItem => Some("(1/9) Item set successfully."),
            Self::VerifyPresent => Some("(2/9) Item is present in cache."),
            Self::GetItem => Some("(3/9) Item got from cache successfully."),
            Self::CompareItems => Some("(4/9) Items are equal."),
            Self::GetExtra => Some("(5/9) Extra got from cache successfully."),
            Self::AddExtra => Some("(6/9) Extra added to cache successfully."),
            Self::SetExtra => Some("(7/9) Extra set in cache successfully."),
            Self::RemoveItem => Some("(8/9) Item removed successfully."),
            Self::VerifyAbsent => Some("(9/9) Item is not present in cache."),
        }
    }

    /// Returns the message reported when the step fails.
    #[must_use]
    pub fn failure_message(self) -> &'static str {
        match self {
            Self::PreliminaryCheck => "You can't run diagnostics on existing item. Use different key.",
            Self::SetItem => "Error: Could not set item in the cache.",
            Self::VerifyPresent => "Error: Could not find the item in cache.",
            Self::GetItem => "Error: Item could not be get from cache.",
            Self::CompareItems => concat!(
                "Error: Retrieved item is different than one created while setting it. If ",
                "there are any hooks added, they can alter any data being set / got from cache. If you ",
                "know that there are no hooks that might mutate the data in the process, it means that ",
                "something is wrong while retrieving data from storage."
            ),
            Self::GetExtra => "Error: Extra could not be get from cache.",
            Self::AddExtra => "Error: Extra could not be added to cache.",
            Self::SetExtra => "Error: Extra could not be set in cache.",
            Self::RemoveItem => "Error: Item could not be removed.",
            Self::VerifyAbsent => "Error: Item still exists.",
        }
    }

    /// Returns the telemetry name of the step.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::PreliminaryCheck => "diagnostics.preliminary_check",
            Self::SetItem => "diagnostics.set_item",
            Self::VerifyPresent => "diagnostics.verify_present",
            Self::GetItem => "diagnostics.get_item",
            Self::CompareItems => "diagnostics.compare_items",
            Self::GetExtra => "diagnostics.get_extra",
            Self::AddExtra => "diagnostics.add_extra",
            Self::SetExtra => "diagnostics.set_extra",
            Self::RemoveItem => "diagnostics.remove_item",
            Self::VerifyAbsent => "diagnostics.verify_absent",
        }
    }
}

impl fmt::Display for DiagnosticStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.number() {
            Some(number) => write!(f, "{number}/{} ({})", Self::TOTAL, self.as_str()),
            None => f.write_str(self.as_str()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numbers_follow_execution_order() {
        let numbers: Vec<_> = DiagnosticStep::ALL.iter().filter_map(|step| step.number()).collect();
        assert_eq!(numbers, (1..=DiagnosticStep::TOTAL).collect::<Vec<_>>());
    }

    #[test]
    fn success_messages_carry_step_number() {
        for step in DiagnosticStep::ALL {
            match (step.number(), step.success_message()) {
                (Some(number), Some(message)) => {
                    assert!(message.starts_with(&format!("({number}/9) ")), "{message}");
                }
                (None, None) => assert_eq!(step, DiagnosticStep::PreliminaryCheck),
                other => panic!("number and message disagree for {step:?}: {other:?}"),
            }
        }
    }

    #[test]
    fn compare_message_is_one_line() {
        let message = DiagnosticStep::CompareItems.failure_message();
        assert!(message.starts_with("Error: Retrieved item is different than one created while setting it. If there"));
        assert!(message.ends_with("something is wrong while retrieving data from storage."));
        assert!(!message.contains('\n'));
        assert!(!message.contains("  "));
    }

    #[test]
    fn display_includes_number_and_name() {
        assert_eq!(DiagnosticStep::AddExtra.to_string(), "6/9 (diagnostics.add_extra)");
        assert_eq!(DiagnosticStep::PreliminaryCheck.to_string(), "diagnostics.preliminary_check");
    }
}
