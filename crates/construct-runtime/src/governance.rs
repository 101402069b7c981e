//! Governance: enforcing principles on top of the core.
//!
//! The core never consults principles while performing tasks. A
//! [`Charter`] groups principles, and [`Governed`] wraps any performer so
//! that tasks the charter does not admit are refused before the wrapped
//! performer sees them. Using it is opt-in: a simulation built from plain
//! constructors is ungoverned.

use construct_core::performer::Performer;
use construct_core::principle::Principle;
use construct_core::substrate::Stateful;
use construct_core::task::Task;
use serde_json::Value;
use std::sync::Arc;
use tracing::warn;

/// A set of principles every admissible task must satisfy.
#[derive(Debug, Clone, Default)]
pub struct Charter {
    principles: Vec<Principle>,
}

impl Charter {
    pub fn new(principles: impl IntoIterator<Item = Principle>) -> Self {
        Self {
            principles: principles.into_iter().collect(),
        }
    }

    pub fn with(mut self, principle: Principle) -> Self {
        self.principles.push(principle);
        self
    }

    pub fn principles(&self) -> &[Principle] {
        &self.principles
    }

    pub fn is_empty(&self) -> bool {
        self.principles.is_empty()
    }

    /// Whether every principle is satisfied by the task.
    pub fn admits(&self, task: &Task) -> bool {
        self.admits_with(task, &[])
    }

    pub fn admits_with(&self, task: &Task, args: &[Value]) -> bool {
        self.principles.iter().all(|p| p.is_satisfied_with(task, args))
    }

    /// The principles the task violates, in charter order.
    pub fn violations(&self, task: &Task) -> Vec<&Principle> {
        self.principles
            .iter()
            .filter(|p| !p.is_satisfied(task))
            .collect()
    }
}

/// A performer that refuses tasks its charter does not admit.
pub struct Governed<P> {
    inner: P,
    charter: Arc<Charter>,
}

impl<P: Performer> Governed<P> {
    pub fn new(inner: P, charter: Arc<Charter>) -> Self {
        Self { inner, charter }
    }

    pub fn inner(&self) -> &P {
        &self.inner
    }

    pub fn charter(&self) -> &Charter {
        &self.charter
    }
}

impl<P: Performer> Performer for Governed<P> {
    fn name(&self) -> &str {
        self.inner.name()
    }

    fn can_perform(&self, task: &Task) -> bool {
        self.charter.admits(task) && self.inner.can_perform(task)
    }

    fn perform(&self, task: &Task, substrate: &mut dyn Stateful) -> bool {
        let violations = self.charter.violations(task);
        if !violations.is_empty() {
            let names: Vec<&str> = violations.iter().map(|p| p.name()).collect();
            warn!(
                "{} refused {}: violates {}",
                self.inner.name(),
                task.name(),
                names.join(", ")
            );
            return false;
        }
        self.inner.perform(task, substrate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use construct_core::constructor::Constructor;
    use construct_core::substrate::Substrate;
    use serde_json::json;

    fn conservation() -> Arc<Charter> {
        Arc::new(Charter::new([Principle::forbids_output(
            "Conservation",
            "perpetual",
        )]))
    }

    #[test]
    fn charter_lists_violations() {
        let charter = conservation().as_ref().clone().with(Principle::named("Only Spin", "Spin"));
        let cheat = Task::new("Cheat", "still", "perpetual");
        let spin = Task::new("Spin", "still", "moving");

        assert!(charter.admits(&spin));
        assert!(!charter.admits(&cheat));
        let names: Vec<_> = charter
            .violations(&cheat)
            .into_iter()
            .map(Principle::name)
            .collect();
        assert_eq!(names, vec!["Conservation", "Only Spin"]);
        assert_eq!(charter.principles().len(), 2);
    }

    #[test]
    fn empty_charter_admits_everything() {
        let charter = Charter::default();
        assert!(charter.is_empty());
        assert!(charter.admits(&Task::new("Anything", "a", "b")));
    }

    #[test]
    fn arguments_reach_principles() {
        let charter = Charter::new([Principle::from_fn("Budget", |_, args| {
            args.first().and_then(Value::as_f64).map(|b| b > 0.0).unwrap_or(false)
        })]);
        let task = Task::new("Spend", "rich", "poor");
        assert!(!charter.admits(&task));
        assert!(charter.admits_with(&task, &[json!(5.0)]));
    }

    #[test]
    fn governed_constructor_refuses_inadmissible_tasks() {
        let cheat = Task::new("Cheat", "still", "perpetual");
        let spin = Task::new("Spin", "still", "moving");
        let governed = Governed::new(
            Constructor::new("Builder", [cheat.clone(), spin.clone()]),
            conservation(),
        );
        let mut wheel = Substrate::new("Wheel", "still");

        assert!(!governed.can_perform(&cheat));
        assert!(!governed.perform(&cheat, &mut wheel));
        assert_eq!(wheel.state(), "still");

        assert!(governed.can_perform(&spin));
        assert!(governed.perform(&spin, &mut wheel));
        assert_eq!(wheel.state(), "moving");
        assert_eq!(governed.name(), "Builder");
        assert_eq!(governed.inner().capabilities().len(), 2);
        assert!(!governed.charter().is_empty());
    }

    #[test]
    fn governance_does_not_grant_capability() {
        let spin = Task::new("Spin", "still", "moving");
        let governed = Governed::new(Constructor::new("Idler", Vec::<Task>::new()), conservation());
        let mut wheel = Substrate::new("Wheel", "still");

        assert!(!governed.can_perform(&spin));
        assert!(!governed.perform(&spin, &mut wheel));
        assert_eq!(wheel.state(), "still");
    }
}
