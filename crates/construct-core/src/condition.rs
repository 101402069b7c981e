//! Condition: a named predicate a substrate must satisfy.
//!
//! A condition never mutates what it inspects. It is evaluated by a
//! [`Task`](crate::task::Task) before any state change, together with the
//! task's own input-state check.
//!
//! The predicate itself is a strategy object behind the [`StateCheck`]
//! trait. Any `Fn(&dyn Stateful, &[Value]) -> bool` closure is a
//! `StateCheck`, and the common checks ship as named structs
//! ([`Always`], [`HasProperty`], [`PropertyEquals`], [`StateIs`]).
//!
//! A predicate that panics is a bug in the predicate. Nothing here catches it.

use crate::substrate::Stateful;
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

/// Boolean evaluation over a stateful entity plus optional extra arguments.
pub trait StateCheck: Send + Sync {
    fn check(&self, entity: &dyn Stateful, args: &[Value]) -> bool;
}

impl<F> StateCheck for F
where
    F: Fn(&dyn Stateful, &[Value]) -> bool + Send + Sync,
{
    fn check(&self, entity: &dyn Stateful, args: &[Value]) -> bool {
        self(entity, args)
    }
}

/// Constant outcome, regardless of the entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Always(pub bool);

impl StateCheck for Always {
    fn check(&self, _entity: &dyn Stateful, _args: &[Value]) -> bool {
        self.0
    }
}

/// Holds when the entity carries a property under `key`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HasProperty(pub String);

impl StateCheck for HasProperty {
    fn check(&self, entity: &dyn Stateful, _args: &[Value]) -> bool {
        entity.get_property(&self.0).is_some()
    }
}

/// Holds when the property under `key` equals `value`.
#[derive(Debug, Clone, PartialEq)]
pub struct PropertyEquals {
    pub key: String,
    pub value: Value,
}

impl StateCheck for PropertyEquals {
    fn check(&self, entity: &dyn Stateful, _args: &[Value]) -> bool {
        entity.get_property(&self.key) == Some(&self.value)
    }
}

/// Holds when the entity is currently in the given state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StateIs(pub String);

impl StateCheck for StateIs {
    fn check(&self, entity: &dyn Stateful, _args: &[Value]) -> bool {
        entity.state() == self.0
    }
}

/// A named boolean predicate over a substrate.
#[derive(Clone)]
pub struct Condition {
    name: String,
    check: Arc<dyn StateCheck>,
}

impl Condition {
    /// Wrap a strategy object under a name.
    pub fn new(name: impl Into<String>, check: impl StateCheck + 'static) -> Self {
        Self {
            name: name.into(),
            check: Arc::new(check),
        }
    }

    /// Wrap a closure under a name.
    ///
    /// Exists so closure argument types are inferred at the call site.
    pub fn from_fn<F>(name: impl Into<String>, f: F) -> Self
    where
        F: Fn(&dyn Stateful, &[Value]) -> bool + Send + Sync + 'static,
    {
        Self::new(name, f)
    }

    pub fn always(name: impl Into<String>, outcome: bool) -> Self {
        Self::new(name, Always(outcome))
    }

    pub fn has_property(name: impl Into<String>, key: impl Into<String>) -> Self {
        Self::new(name, HasProperty(key.into()))
    }

    pub fn property_equals(
        name: impl Into<String>,
        key: impl Into<String>,
        value: impl Into<Value>,
    ) -> Self {
        Self::new(
            name,
            PropertyEquals {
                key: key.into(),
                value: value.into(),
            },
        )
    }

    pub fn state_is(name: impl Into<String>, state: impl Into<String>) -> Self {
        Self::new(name, StateIs(state.into()))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Evaluate against an entity with no extra arguments.
    pub fn check(&self, entity: &dyn Stateful) -> bool {
        self.check.check(entity, &[])
    }

    /// Evaluate against an entity, forwarding extra arguments to the predicate.
    pub fn check_with(&self, entity: &dyn Stateful, args: &[Value]) -> bool {
        self.check.check(entity, args)
    }
}

impl fmt::Debug for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Condition").field("name", &self.name).finish()
    }
}
