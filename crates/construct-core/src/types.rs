//! Shared identity types.
//!
//! Tasks, substrates and constructors are compared by identity rather than
//! by name: two tasks built with the same name are still different tasks.
//! Every entity gets a random v4 id at construction; clones keep it.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Unique identifier for a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TaskId(pub Uuid);

impl TaskId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Deterministic id (for testing).
    pub fn from_seed(seed: u64) -> Self {
        Self(Uuid::from_u64_pair(0x7461_736b, seed))
    }
}

impl Default for TaskId {
    fn default() -> Self {
        Self::new()
    }
}

/// Unique identifier for a substrate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SubstrateId(pub Uuid);

impl SubstrateId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Deterministic id (for testing).
    pub fn from_seed(seed: u64) -> Self {
        Self(Uuid::from_u64_pair(0x7375_6273, seed))
    }
}

impl Default for SubstrateId {
    fn default() -> Self {
        Self::new()
    }
}

/// Unique identifier for a constructor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ConstructorId(pub Uuid);

impl ConstructorId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ConstructorId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "task:{}", self.0)
    }
}

impl fmt::Display for SubstrateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "substrate:{}", self.0)
    }
}

impl fmt::Display for ConstructorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "constructor:{}", self.0)
    }
}
