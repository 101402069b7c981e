//! # Construct
//!
//! Constructor-theoretic simulation. Physical processes are modelled as
//! tasks, gated transformations of a substrate from one named state to
//! another, and constructors are the agents able to perform them.
//!
//! ## Quick Start
//!
//! ```rust
//! use construct::prelude::*;
//!
//! let heat = Task::new("Heat", "cold", "hot");
//! let cool = Task::new("Cool", "hot", "cold");
//! let builder = Constructor::new("Builder", [heat.clone()]);
//!
//! let mut sim = Simulation::from_constructors(
//!     [builder],
//!     [Substrate::new("Water", "cold")],
//!     [heat, cool],
//! )
//! .with_echo(false);
//!
//! let report = sim.run();
//! assert_eq!(report.lines(), vec![
//!     "Builder successfully performed Heat on Water",
//!     "Builder could not perform Cool on Water",
//! ]);
//! ```
//!
//! ## Architecture
//!
//! - [`construct_core`] - The model: conditions, tasks, substrates, constructors, principles, systems
//! - [`construct_runtime`] - The simulation driver, reports, governance and TOML scenarios
//!
//! ## Key Concepts
//!
//! | Concept | What It Is |
//! |---------|------------|
//! | Condition | Named predicate over a substrate |
//! | Task | Input state, output state, conditions |
//! | Substrate | Named state plus properties, optionally bound to a transition graph |
//! | Constructor | Performs only the tasks it was built with |
//! | Principle | Law over tasks; enforced only when a performer is [`Governed`](prelude::Governed) |
//! | System | Substrates plus a total-energy counter |
//!
//! ### Graph-constrained substrates
//!
//! ```rust
//! use construct::prelude::*;
//!
//! let t1 = Task::new("Task1", "A", "B");
//! let t2 = Task::new("Task2", "B", "C");
//! let mut s = Substrate::complex(
//!     "Graph",
//!     "A",
//!     ["A", "B", "C"],
//!     [(("A", "B"), t1.clone()), (("B", "C"), t2.clone())],
//! )
//! .unwrap();
//!
//! assert!(!s.can_transition(&t2));
//! assert!(s.perform_transition(&t1));
//! assert!(s.perform_transition(&t2));
//! assert_eq!(s.current_state(), "C");
//! ```

// Re-export all subcrates
pub use construct_core as core;
pub use construct_runtime as runtime;

/// Prelude module for convenient imports.
///
/// ```rust
/// use construct::prelude::*;
/// ```
pub mod prelude {
    // Identity
    pub use construct_core::types::{ConstructorId, SubstrateId, TaskId};

    // Model
    pub use construct_core::condition::{Condition, StateCheck};
    pub use construct_core::constructor::Constructor;
    pub use construct_core::performer::Performer;
    pub use construct_core::principle::{Principle, TaskCheck};
    pub use construct_core::substrate::{
        Stateful, Substrate, SubstrateKind, SubstrateSnapshot, TransitionTable,
    };
    pub use construct_core::system::System;
    pub use construct_core::task::Task;

    // Error types
    pub use construct_core::error::{ConstructError, Result};

    // Runtime
    pub use construct_runtime::governance::{Charter, Governed};
    pub use construct_runtime::report::{
        MemorySink, Outcome, ReportSink, SilentSink, SimulationReport, SimulationStats,
        StdoutSink,
    };
    pub use construct_runtime::scenario::{ScenarioConfig, ScenarioError};
    pub use construct_runtime::simulation::Simulation;

    pub use construct_core::prelude::{json, Value};
}
