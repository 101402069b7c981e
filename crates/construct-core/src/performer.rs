//! Performer: anything that attempts tasks on substrates.
//!
//! The simulation driver only knows performers through this trait.
//! [`Constructor`](crate::constructor::Constructor) is the reference
//! implementation; wrappers (e.g. governance) and test doubles implement it
//! too.

use crate::substrate::Stateful;
use crate::task::Task;

/// An agent that may attempt tasks on substrates.
pub trait Performer {
    /// The performer's name (for reporting).
    fn name(&self) -> &str;

    /// Whether the task is within this performer's capabilities.
    fn can_perform(&self, task: &Task) -> bool;

    /// Attempt the task on the substrate.
    ///
    /// Returns `false` without touching the substrate when the performer is
    /// incapable or the task is blocked.
    fn perform(&self, task: &Task, substrate: &mut dyn Stateful) -> bool;
}

impl<P: Performer + ?Sized> Performer for Box<P> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn can_perform(&self, task: &Task) -> bool {
        (**self).can_perform(task)
    }

    fn perform(&self, task: &Task, substrate: &mut dyn Stateful) -> bool {
        (**self).perform(task, substrate)
    }
}
