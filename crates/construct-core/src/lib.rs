//! # Construct Core
//!
//! Core types for constructor-theoretic simulation: transformations that
//! may or may not be possible.
//!
//! - **Condition** - a named predicate a substrate must satisfy
//! - **Task** - a gated transition from an input state to an output state
//! - **Substrate** - the stateful object tasks act upon, free or graph-constrained
//! - **Constructor** - an agent that performs only the tasks it is capable of
//! - **Principle** - a law over tasks, independent of any substrate
//! - **System** - an aggregate of substrates with an energy counter
//!
//! ## Quick Start
//!
//! ```rust
//! use construct_core::prelude::*;
//!
//! let heat = Task::new("Heat", "cold", "hot");
//! let builder = Constructor::new("Builder", [heat.clone()]);
//! let mut water = Substrate::new("Water", "cold");
//!
//! assert!(builder.perform(&heat, &mut water));
//! assert_eq!(water.state(), "hot");
//! assert!(!builder.perform(&heat, &mut water));
//! ```

pub mod types;
pub mod condition;
pub mod task;
pub mod substrate;
pub mod performer;
pub mod constructor;
pub mod principle;
pub mod system;
pub mod error;
pub mod prelude;
