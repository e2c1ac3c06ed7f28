// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Lifecycle hooks that forward pluggable method arguments to the callback.
//!
//! Every pluggable method gets a `pre<Method>` and a `post<Method>` hook. A hook
//! is an observation point: it reports a snapshot of the arguments it was given
//! and returns those arguments unchanged so the host's call chain is preserved.

use std::{any::Any, fmt, sync::Arc};

use serde_json::{Map, Value};

use crate::{
    event::{Callback, DebugEvent},
    telemetry::DebugTelemetry,
};

/// Which side of a pluggable method call a hook runs on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum HookPhase {
    /// Before the method runs.
    Pre,
    /// After the method ran.
    Post,
}

impl HookPhase {
    /// Both phases, `Pre` first.
    pub const ALL: [Self; 2] = [Self::Pre, Self::Post];

    /// Returns the event-name prefix of the phase.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pre => "pre",
            Self::Post => "post",
        }
    }

    /// Derives the event name for `method` in this phase.
    ///
    /// # Examples
    ///
    /// ```
    /// use stashling_debug::HookPhase;
    ///
    /// assert_eq!(HookPhase::Pre.event_name("getItem"), "preGetItem");
    /// assert_eq!(HookPhase::Post.event_name("removeItem"), "postRemoveItem");
    /// ```
    #[must_use]
    pub fn event_name(self, method: &str) -> String {
        format!("{}{}", self.as_str(), upper_first(method))
    }
}

fn upper_first(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Shared reference to the stash a pluggable method was called on.
///
/// Compared by identity: two references are equal when they point to the same
/// stash.
#[derive(Clone)]
pub struct CacheInstanceRef(Arc<dyn Any + Send + Sync>);

impl CacheInstanceRef {
    /// Wraps a shared stash.
    pub fn new<C>(instance: Arc<C>) -> Self
    where
        C: Any + Send + Sync,
    {
        Self(instance)
    }

    /// Returns the stash if it is a `C`.
    #[must_use]
    pub fn downcast_ref<C: Any>(&self) -> Option<&C> {
        self.0.downcast_ref()
    }
}

impl PartialEq for CacheInstanceRef {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for CacheInstanceRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CacheInstanceRef").finish_non_exhaustive()
    }
}

/// Arguments a host passes to a hook.
///
/// Named argument values are JSON; the stash the method was called on travels
/// separately as a [`CacheInstanceRef`] because it is not data.
///
/// # Examples
///
/// ```
/// use stashling_debug::HookArgs;
///
/// let args = HookArgs::new().with_field("key", "user:1").with_field("value", 42);
/// assert_eq!(args.get("key"), Some(&serde_json::json!("user:1")));
/// assert!(args.cache_instance().is_none());
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct HookArgs {
    cache_instance: Option<CacheInstanceRef>,
    fields: Map<String, Value>,
}

impl HookArgs {
    /// Creates empty arguments.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates arguments from named values.
    #[must_use]
    pub fn from_fields(fields: Map<String, Value>) -> Self {
        Self {
            cache_instance: None,
            fields,
        }
    }

    /// Adds a named value.
    #[must_use]
    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(name.into(), value.into());
        self
    }

    /// Attaches the stash the method was called on.
    #[must_use]
    pub fn with_cache_instance(mut self, instance: CacheInstanceRef) -> Self {
        self.cache_instance = Some(instance);
        self
    }

    /// Returns the stash the method was called on, if attached.
    #[must_use]
    pub fn cache_instance(&self) -> Option<&CacheInstanceRef> {
        self.cache_instance.as_ref()
    }

    /// Returns all named values.
    #[must_use]
    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }

    /// Returns the named value.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    fn snapshot(&self, with_cache_instance: bool) -> Self {
        if with_cache_instance {
            self.clone()
        } else {
            Self::from_fields(self.fields.clone())
        }
    }
}

/// A hook invocation as reported to the callback.
#[derive(Clone, Debug, PartialEq)]
pub struct HookRecord {
    event: String,
    args: HookArgs,
}

impl HookRecord {
    pub(crate) fn new(event: impl Into<String>, args: HookArgs) -> Self {
        Self { event: event.into(), args }
    }

    /// Returns the event name of the hook that fired.
    #[must_use]
    pub fn event(&self) -> &str {
        &self.event
    }

    /// Returns the arguments the hook saw, minus the stash unless it was
    /// configured to forward it.
    #[must_use]
    pub fn args(&self) -> &HookArgs {
        &self.args
    }
}

/// Something that observes the arguments of a pluggable method call.
///
/// Implementations must return the arguments they were given.
pub trait HookHandler: fmt::Debug + Send + Sync {
    /// Observes `args` and hands them back.
    fn handle(&self, args: HookArgs) -> HookArgs;
}

/// Forwards a snapshot of every invocation to the plugin callback.
#[derive(Debug)]
struct ForwardingHandler {
    event: String,
    callback: Callback,
    with_cache_instance: bool,
    telemetry: DebugTelemetry,
}

impl HookHandler for ForwardingHandler {
    fn handle(&self, args: HookArgs) -> HookArgs {
        self.telemetry.record_hook(&self.event);
        let record = HookRecord::new(self.event.clone(), args.snapshot(self.with_cache_instance));
        self.callback.notify(DebugEvent::Hook(record));
        args
    }
}

/// An event name paired with the handler a host invokes for it.
#[derive(Clone, Debug)]
pub struct Hook {
    event: String,
    handler: Arc<dyn HookHandler>,
}

impl Hook {
    /// Returns the event the hook listens to.
    #[must_use]
    pub fn event(&self) -> &str {
        &self.event
    }

    /// Returns the handler.
    #[must_use]
    pub fn handler(&self) -> &dyn HookHandler {
        self.handler.as_ref()
    }

    /// Invokes the handler.
    pub fn handle(&self, args: HookArgs) -> HookArgs {
        self.handler.handle(args)
    }
}

/// Builds a pre and a post hook for every method, in method order.
pub(crate) fn create_hooks<I>(methods: I, callback: &Callback, with_cache_instance: bool, telemetry: &DebugTelemetry) -> Vec<Hook>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    methods
        .into_iter()
        .flat_map(|method| HookPhase::ALL.map(|phase| phase.event_name(method.as_ref())))
        .map(|event| Hook {
            handler: Arc::new(ForwardingHandler {
                event: event.clone(),
                callback: callback.clone(),
                with_cache_instance,
                telemetry: telemetry.clone(),
            }),
            event,
        })
        .collect()
}
