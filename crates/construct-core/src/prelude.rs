//! Construct Core Prelude — convenient imports for common usage.
//!
//! ```rust
//! use construct_core::prelude::*;
//! ```

// Re-export identity types
pub use crate::types::{ConstructorId, SubstrateId, TaskId};

// Re-export the model
pub use crate::condition::{Condition, StateCheck};
pub use crate::constructor::Constructor;
pub use crate::principle::{Principle, TaskCheck};
pub use crate::substrate::{Stateful, Substrate, SubstrateKind, SubstrateSnapshot, TransitionTable};
pub use crate::system::System;
pub use crate::task::Task;

// Re-export the Performer trait
pub use crate::performer::Performer;

// Re-export error types
pub use crate::error::{ConstructError, Result};

// Dynamic property and argument values
pub use serde_json::{json, Value};
