//! Principle: a law a task must satisfy to be admissible.
//!
//! Principles judge tasks, never substrates. Nothing in the core consults
//! them while performing tasks; a governance layer built on top decides
//! whether and where to enforce them.

use crate::task::Task;
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

/// Boolean evaluation over a task plus optional extra arguments.
pub trait TaskCheck: Send + Sync {
    fn check(&self, task: &Task, args: &[Value]) -> bool;
}

impl<F> TaskCheck for F
where
    F: Fn(&Task, &[Value]) -> bool + Send + Sync,
{
    fn check(&self, task: &Task, args: &[Value]) -> bool {
        self(task, args)
    }
}

/// Constant verdict, regardless of the task.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Always(pub bool);

impl TaskCheck for Always {
    fn check(&self, _task: &Task, _args: &[Value]) -> bool {
        self.0
    }
}

/// Forbids any task whose output is the given state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForbidsOutput(pub String);

impl TaskCheck for ForbidsOutput {
    fn check(&self, task: &Task, _args: &[Value]) -> bool {
        task.output_state() != self.0
    }
}

/// Only admits tasks with the given name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameIs(pub String);

impl TaskCheck for NameIs {
    fn check(&self, task: &Task, _args: &[Value]) -> bool {
        task.name() == self.0
    }
}

/// A named governing predicate over tasks.
#[derive(Clone)]
pub struct Principle {
    name: String,
    check: Arc<dyn TaskCheck>,
}

impl Principle {
    pub fn new(name: impl Into<String>, check: impl TaskCheck + 'static) -> Self {
        Self {
            name: name.into(),
            check: Arc::new(check),
        }
    }

    pub fn from_fn<F>(name: impl Into<String>, f: F) -> Self
    where
        F: Fn(&Task, &[Value]) -> bool + Send + Sync + 'static,
    {
        Self::new(name, f)
    }

    pub fn always(name: impl Into<String>, outcome: bool) -> Self {
        Self::new(name, Always(outcome))
    }

    pub fn forbids_output(name: impl Into<String>, state: impl Into<String>) -> Self {
        Self::new(name, ForbidsOutput(state.into()))
    }

    pub fn named(name: impl Into<String>, task_name: impl Into<String>) -> Self {
        Self::new(name, NameIs(task_name.into()))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_satisfied(&self, task: &Task) -> bool {
        self.check.check(task, &[])
    }

    /// Evaluate with extra arguments appended after the task.
    pub fn is_satisfied_with(&self, task: &Task, args: &[Value]) -> bool {
        self.check.check(task, args)
    }
}

impl fmt::Debug for Principle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Principle").field("name", &self.name).finish()
    }
}
