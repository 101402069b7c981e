//! Task: a named, gated state transition.
//!
//! A task moves a substrate from its `input_state` to its `output_state`,
//! provided every attached [`Condition`] holds. Tasks are immutable once
//! built and are compared by identity: clones are the same task, while two
//! separately built tasks with identical names are not.

use crate::condition::Condition;
use crate::substrate::Stateful;
use crate::types::TaskId;
use std::hash::{Hash, Hasher};
use tracing::{debug, trace};

/// An abstract description of a transformation on a substrate.
#[derive(Debug, Clone)]
pub struct Task {
    id: TaskId,
    name: String,
    input_state: String,
    output_state: String,
    conditions: Vec<Condition>,
}

impl Task {
    /// A task with no conditions.
    pub fn new(
        name: impl Into<String>,
        input_state: impl Into<String>,
        output_state: impl Into<String>,
    ) -> Self {
        Self {
            id: TaskId::new(),
            name: name.into(),
            input_state: input_state.into(),
            output_state: output_state.into(),
            conditions: Vec::new(),
        }
    }

    /// Append a condition. Conditions are evaluated in insertion order.
    pub fn with_condition(mut self, condition: Condition) -> Self {
        self.conditions.push(condition);
        self
    }

    pub fn with_conditions(mut self, conditions: impl IntoIterator<Item = Condition>) -> Self {
        self.conditions.extend(conditions);
        self
    }

    /// Rebuild a fixture task under a fixed id. Only the same task may
    /// reuse an id, otherwise unrelated tasks would compare equal.
    #[cfg(test)]
    pub(crate) fn with_id(mut self, id: TaskId) -> Self {
        self.id = id;
        self
    }

    pub fn id(&self) -> TaskId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn input_state(&self) -> &str {
        &self.input_state
    }

    pub fn output_state(&self) -> &str {
        &self.output_state
    }

    pub fn conditions(&self) -> &[Condition] {
        &self.conditions
    }

    /// Whether the entity is in the input state and every condition holds.
    ///
    /// Stops at the first failing condition.
    pub fn is_possible(&self, entity: &dyn Stateful) -> bool {
        if entity.state() != self.input_state {
            trace!(
                "{} needs state {}, {} is {}",
                self.name,
                self.input_state,
                entity.name(),
                entity.state()
            );
            return false;
        }

        match self.conditions.iter().find(|c| !c.check(entity)) {
            Some(blocking) => {
                trace!("{} blocked on {} by {}", self.name, entity.name(), blocking.name());
                false
            }
            None => true,
        }
    }

    /// Move the entity to the output state if the task is possible.
    ///
    /// On `false` the entity is left exactly as it was.
    pub fn execute(&self, entity: &mut dyn Stateful) -> bool {
        if !self.is_possible(&*entity) {
            return false;
        }
        debug!(
            "{} moved {} from {} to {}",
            self.name,
            entity.name(),
            self.input_state,
            self.output_state
        );
        entity.set_state(self.output_state.clone());
        true
    }
}

impl PartialEq for Task {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Task {}

impl Hash for Task {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::substrate::Substrate;
    use serde_json::Value;
    use std::cell::Cell;
    use std::collections::BTreeMap;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
    use std::sync::Arc;

    /// Minimal stateful stand-in that records every state write.
    struct Recorder {
        state: String,
        writes: Cell<usize>,
        properties: BTreeMap<String, Value>,
    }

    impl Recorder {
        fn new(state: &str) -> Self {
            Self {
                state: state.to_string(),
                writes: Cell::new(0),
                properties: BTreeMap::new(),
            }
        }
    }

    impl Stateful for Recorder {
        fn name(&self) -> &str {
            "recorder"
        }
        fn state(&self) -> &str {
            &self.state
        }
        fn set_state(&mut self, state: String) {
            self.writes.set(self.writes.get() + 1);
            self.state = state;
        }
        fn get_property(&self, key: &str) -> Option<&Value> {
            self.properties.get(key)
        }
        fn set_property(&mut self, key: &str, value: Value) {
            self.properties.insert(key.to_string(), value);
        }
    }

    fn switch(name: &str) -> (Condition, Arc<AtomicBool>) {
        let flag = Arc::new(AtomicBool::new(true));
        let inner = flag.clone();
        let condition = Condition::from_fn(name, move |_, _| inner.load(Ordering::SeqCst));
        (condition, flag)
    }

    #[test]
    fn is_possible_needs_input_state_and_all_conditions() {
        let (c1, _f1) = switch("c1");
        let (c2, f2) = switch("c2");
        let task = Task::new("Test Task", "input_state", "output_state").with_conditions([c1, c2]);
        let mut recorder = Recorder::new("input_state");

        assert!(task.is_possible(&recorder));

        f2.store(false, Ordering::SeqCst);
        assert!(!task.is_possible(&recorder));

        f2.store(true, Ordering::SeqCst);
        recorder.state = "wrong_state".into();
        assert!(!task.is_possible(&recorder));
    }

    #[test]
    fn execute_moves_state_only_when_possible() {
        let (c1, _f1) = switch("c1");
        let (c2, f2) = switch("c2");
        let task = Task::new("Test Task", "input_state", "output_state").with_conditions([c1, c2]);
        let mut recorder = Recorder::new("input_state");

        assert!(task.execute(&mut recorder));
        assert_eq!(recorder.state(), "output_state");
        assert_eq!(recorder.writes.get(), 1);

        recorder.state = "input_state".into();
        f2.store(false, Ordering::SeqCst);
        assert!(!task.execute(&mut recorder));
        assert_eq!(recorder.state(), "input_state");
        assert_eq!(recorder.writes.get(), 1);
    }

    #[test]
    fn conditions_short_circuit_in_order() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counted = calls.clone();
        let task = Task::new("Gated", "a", "b")
            .with_condition(Condition::always("closed", false))
            .with_condition(Condition::from_fn("counted", move |_, _| {
                counted.fetch_add(1, Ordering::SeqCst);
                true
            }));

        assert!(!task.is_possible(&Substrate::new("S", "a")));
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn conditions_are_not_consulted_in_wrong_state() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counted = calls.clone();
        let task = Task::new("Gated", "a", "b").with_condition(Condition::from_fn(
            "counted",
            move |_, _| {
                counted.fetch_add(1, Ordering::SeqCst);
                true
            },
        ));

        assert!(!task.is_possible(&Substrate::new("S", "z")));
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    #[should_panic(expected = "sensor offline")]
    fn panicking_condition_propagates_out_of_execute() {
        let task = Task::new("Read", "idle", "read").with_condition(Condition::from_fn(
            "Sensor",
            |_, _| panic!("sensor offline"),
        ));
        let mut recorder = Recorder::new("idle");
        task.execute(&mut recorder);
    }

    #[test]
    fn identity_not_name_decides_equality() {
        let heat = Task::new("Heat", "cold", "hot");
        let again = Task::new("Heat", "cold", "hot");
        assert_eq!(heat, heat.clone());
        assert_ne!(heat, again);

        let fixture = || Task::new("Heat", "cold", "hot").with_id(TaskId::from_seed(1));
        assert_eq!(fixture(), fixture());
        assert_eq!(fixture().id(), TaskId::from_seed(1));
        assert_ne!(fixture(), heat);
    }

    #[test]
    fn task_without_conditions_only_checks_state() {
        let heat = Task::new("Heat", "cold", "hot");
        let mut water = Substrate::new("Water", "cold");
        assert!(heat.execute(&mut water));
        assert_eq!(water.state(), "hot");
        assert!(!heat.execute(&mut water));
        assert_eq!(water.state(), "hot");
    }
}
