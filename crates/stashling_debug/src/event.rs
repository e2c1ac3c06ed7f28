// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! What the plugin reports to its callback.

use std::{fmt, sync::Arc};

use crate::hooks::HookRecord;

/// An event delivered to the plugin callback.
///
/// The callback sees exactly two shapes: a progress or error message from
/// diagnostics, or a record of a hook invocation.
#[derive(Clone, Debug, PartialEq)]
pub enum DebugEvent {
    /// A progress or error message produced by diagnostics.
    Message(&'static str),
    /// A hook fired around a pluggable method.
    Hook(HookRecord),
}

impl DebugEvent {
    /// Returns the message, if this is a diagnostics message.
    #[must_use]
    pub fn as_message(&self) -> Option<&'static str> {
        match self {
            Self::Message(message) => Some(message),
            Self::Hook(_) => None,
        }
    }

    /// Returns the hook record, if this is a hook invocation.
    #[must_use]
    pub fn as_hook(&self) -> Option<&HookRecord> {
        match self {
            Self::Message(_) => None,
            Self::Hook(record) => Some(record),
        }
    }
}

impl fmt::Display for DebugEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Message(message) => f.write_str(message),
            Self::Hook(record) => write!(f, "{}: {:?}", record.event(), record.args().fields()),
        }
    }
}

type CallbackFn = dyn Fn(DebugEvent) + Send + Sync;

/// Shared handle to the user-supplied callback.
#[derive(Clone)]
pub(crate) struct Callback(Arc<CallbackFn>);

impl Callback {
    pub(crate) fn new<F>(callback: F) -> Self
    where
        F: Fn(DebugEvent) + Send + Sync + 'static,
    {
        Self(Arc::new(callback))
    }

    pub(crate) fn notify(&self, event: DebugEvent) {
        (self.0)(event);
    }

    pub(crate) fn message(&self, message: &'static str) {
        self.notify(DebugEvent::Message(message));
    }
}

impl fmt::Debug for Callback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Callback").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use parking_lot::Mutex;

    use super::*;
    use crate::hooks::HookArgs;

    #[test]
    fn callback_forwards_events_in_order() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let callback = Callback::new(move |event| sink.lock().push(event));

        callback.message("first");
        callback.message("second");

        assert_eq!(*seen.lock(), vec![DebugEvent::Message("first"), DebugEvent::Message("second")]);
    }

    #[test]
    fn accessors_match_variant() {
        let message = DebugEvent::Message("hello");
        assert_eq!(message.as_message(), Some("hello"));
        assert!(message.as_hook().is_none());

        let hook = DebugEvent::Hook(HookRecord::new("preGetItem", HookArgs::new()));
        assert!(hook.as_message().is_none());
        assert_eq!(hook.as_hook().map(HookRecord::event), Some("preGetItem"));
    }

    #[test]
    fn display_shows_message_verbatim() {
        assert_eq!(DebugEvent::Message("(1/9) Item set successfully.").to_string(), "(1/9) Item set successfully.");
    }

    #[test]
    fn display_shows_hook_event_name() {
        let event = DebugEvent::Hook(HookRecord::new("postSetItem", HookArgs::new().with_field("key", "k")));
        assert!(event.to_string().starts_with("postSetItem: "));
    }
}
