//! Construct Runtime Prelude — convenient imports for common usage.
//!
//! ```rust
//! use construct_runtime::prelude::*;
//! ```

pub use crate::governance::{Charter, Governed};
pub use crate::report::{
    ConstructorStats, MemorySink, Outcome, ReportSink, SilentSink, SimulationReport,
    SimulationStats, StdoutSink,
};
pub use crate::scenario::{ScenarioConfig, ScenarioError, ScenarioResult};
pub use crate::simulation::Simulation;
