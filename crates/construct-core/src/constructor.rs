//! Constructor: an agent restricted to a fixed set of tasks.
//!
//! A constructor causes transformations without being changed by them:
//! performing a task never alters the constructor. Capability is checked
//! strictly before the task's own gate, so a task outside the capability
//! set is never evaluated at all.

use crate::performer::Performer;
use crate::substrate::Stateful;
use crate::task::Task;
use crate::types::{ConstructorId, TaskId};
use std::collections::HashSet;
use tracing::debug;

/// An entity that can perform the tasks in its capability set.
#[derive(Debug, Clone)]
pub struct Constructor {
    id: ConstructorId,
    name: String,
    capabilities: Vec<Task>,
    capability_ids: HashSet<TaskId>,
}

impl Constructor {
    pub fn new(name: impl Into<String>, capabilities: impl IntoIterator<Item = Task>) -> Self {
        let capabilities: Vec<Task> = capabilities.into_iter().collect();
        let capability_ids = capabilities.iter().map(Task::id).collect();
        Self {
            id: ConstructorId::new(),
            name: name.into(),
            capabilities,
            capability_ids,
        }
    }

    pub fn id(&self) -> ConstructorId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The tasks this constructor can perform, in declaration order.
    pub fn capabilities(&self) -> &[Task] {
        &self.capabilities
    }

    /// Exact membership by task identity.
    pub fn can_perform(&self, task: &Task) -> bool {
        self.capability_ids.contains(&task.id())
    }

    /// Perform the task if capable; otherwise return `false` without
    /// invoking it.
    pub fn perform(&self, task: &Task, substrate: &mut dyn Stateful) -> bool {
        if !self.can_perform(task) {
            debug!("{} is not capable of {}", self.name, task.name());
            return false;
        }
        task.execute(substrate)
    }
}

impl Performer for Constructor {
    fn name(&self) -> &str {
        Constructor::name(self)
    }

    fn can_perform(&self, task: &Task) -> bool {
        Constructor::can_perform(self, task)
    }

    fn perform(&self, task: &Task, substrate: &mut dyn Stateful) -> bool {
        Constructor::perform(self, task, substrate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::condition::Condition;
    use crate::substrate::Substrate;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[test]
    fn can_perform_is_identity_membership() {
        let task1 = Task::new("Task 1", "a", "b");
        let task2 = Task::new("Task 2", "b", "c");
        let constructor = Constructor::new("Test Constructor", [task1.clone(), task2.clone()]);

        assert!(constructor.can_perform(&task1));
        assert!(constructor.can_perform(&task2));
        assert!(!constructor.can_perform(&Task::new("Unknown Task", "a", "b")));
        assert!(!constructor.can_perform(&Task::new("Task 1", "a", "b")));

        let names: Vec<_> = constructor.capabilities().iter().map(Task::name).collect();
        assert_eq!(names, vec!["Task 1", "Task 2"]);
        assert_ne!(constructor.id(), Constructor::new("Test Constructor", [task1]).id());
    }

    #[test]
    fn perform_delegates_to_task() {
        let task1 = Task::new("Task 1", "a", "b");
        let task2 = Task::new("Task 2", "x", "y");
        let constructor = Constructor::new("Test Constructor", [task1.clone(), task2.clone()]);
        let mut substrate = Substrate::new("S", "a");

        assert!(constructor.perform(&task1, &mut substrate));
        assert_eq!(substrate.state(), "b");

        assert!(!constructor.perform(&task2, &mut substrate));
        assert_eq!(substrate.state(), "b");
    }

    #[test]
    fn incapable_constructor_never_evaluates_the_task() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counted = calls.clone();
        let unknown = Task::new("Unknown Task", "a", "b").with_condition(Condition::from_fn(
            "counted",
            move |_, _| {
                counted.fetch_add(1, Ordering::SeqCst);
                true
            },
        ));
        let constructor = Constructor::new("Test Constructor", Vec::<Task>::new());
        let mut substrate = Substrate::new("S", "a");

        assert!(!constructor.perform(&unknown, &mut substrate));
        assert_eq!(calls.load(Ordering::SeqCst), 0);
        assert_eq!(substrate.state(), "a");
    }

    #[test]
    fn builder_heats_water_once() {
        let heat = Task::new("Heat", "cold", "hot");
        let builder = Constructor::new("Builder", [heat.clone()]);
        let mut water = Substrate::new("Water", "cold");

        assert!(builder.perform(&heat, &mut water));
        assert_eq!(water.state(), "hot");

        assert!(!builder.perform(&heat, &mut water));
        assert_eq!(water.state(), "hot");
    }

    #[test]
    fn usable_through_the_performer_trait() {
        let heat = Task::new("Heat", "cold", "hot");
        let performer: Box<dyn Performer> = Box::new(Constructor::new("Builder", [heat.clone()]));
        let mut water = Substrate::new("Water", "cold");

        assert_eq!(performer.name(), "Builder");
        assert!(performer.can_perform(&heat));
        assert!(performer.perform(&heat, &mut water));
    }
}
