//! # Construct Runtime
//!
//! Drives construct models. A [`Simulation`](simulation::Simulation)
//! attempts every (constructor, substrate, task) combination in a fixed
//! nested order and reports one line per attempt.
//!
//! Around the driver:
//!
//! - [`report`] - outcomes, report sinks and run statistics
//! - [`governance`] - opt-in enforcement of principles via [`Governed`](governance::Governed)
//! - [`scenario`] - declarative simulations loaded from TOML

pub mod governance;
pub mod report;
pub mod scenario;
pub mod simulation;

pub mod prelude;
