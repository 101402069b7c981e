//! Error types for construct operations.
//!
//! Blocked transitions and incapable constructors are not errors: they are
//! ordinary `false` results. Errors only arise when building malformed
//! substrates or assembling models from malformed descriptions.

use std::error::Error;
use std::fmt;

/// Result type for construct operations.
pub type Result<T> = std::result::Result<T, ConstructError>;

/// Errors that can occur while assembling a model.
#[derive(Debug, Clone, PartialEq)]
pub enum ConstructError {
    /// Substrate construction errors.
    Substrate(SubstrateError),
    /// Configuration errors.
    Config(ConfigError),
    /// Serialization errors.
    Serialization(String),
}

impl fmt::Display for ConstructError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConstructError::Substrate(e) => write!(f, "Substrate error: {}", e),
            ConstructError::Config(e) => write!(f, "Config error: {}", e),
            ConstructError::Serialization(msg) => write!(f, "Serialization error: {}", msg),
        }
    }
}

impl Error for ConstructError {}

impl From<serde_json::Error> for ConstructError {
    fn from(e: serde_json::Error) -> Self {
        ConstructError::Serialization(e.to_string())
    }
}

impl From<SubstrateError> for ConstructError {
    fn from(e: SubstrateError) -> Self {
        ConstructError::Substrate(e)
    }
}

impl From<ConfigError> for ConstructError {
    fn from(e: ConfigError) -> Self {
        ConstructError::Config(e)
    }
}

/// Errors raised while building a graph-constrained substrate.
#[derive(Debug, Clone, PartialEq)]
pub enum SubstrateError {
    /// The initial state is not among the valid states.
    InvalidInitialState(String),
    /// A transition edge names a state outside the valid set.
    UnknownState { from: String, to: String, state: String },
    /// The task mapped to an edge declares different input/output states.
    EdgeTaskMismatch {
        from: String,
        to: String,
        task: String,
    },
    /// Two tasks were mapped to the same edge.
    DuplicateEdge { from: String, to: String },
}

impl fmt::Display for SubstrateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SubstrateError::InvalidInitialState(state) => {
                write!(f, "Initial state is not a valid state: {}", state)
            }
            SubstrateError::UnknownState { from, to, state } => {
                write!(f, "Edge {} -> {} uses unknown state: {}", from, to, state)
            }
            SubstrateError::EdgeTaskMismatch { from, to, task } => {
                write!(
                    f,
                    "Task {} does not transform {} into {}",
                    task, from, to
                )
            }
            SubstrateError::DuplicateEdge { from, to } => {
                write!(f, "Edge {} -> {} is mapped to more than one task", from, to)
            }
        }
    }
}

/// Configuration errors.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Invalid value.
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },
    /// Missing required field.
    MissingField(String),
    /// A name was referenced but never declared.
    UnknownReference { kind: String, name: String },
    /// A name was declared twice.
    Duplicate { kind: String, name: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidValue {
                field,
                value,
                reason,
            } => {
                write!(f, "Invalid value for {}: {} ({})", field, value, reason)
            }
            ConfigError::MissingField(field) => write!(f, "Missing required field: {}", field),
            ConfigError::UnknownReference { kind, name } => {
                write!(f, "Unknown {}: {}", kind, name)
            }
            ConfigError::Duplicate { kind, name } => write!(f, "Duplicate {}: {}", kind, name),
        }
    }
}

// Convenience constructors
impl ConstructError {
    pub fn unknown_reference(kind: impl Into<String>, name: impl Into<String>) -> Self {
        ConstructError::Config(ConfigError::UnknownReference {
            kind: kind.into(),
            name: name.into(),
        })
    }

    pub fn duplicate(kind: impl Into<String>, name: impl Into<String>) -> Self {
        ConstructError::Config(ConfigError::Duplicate {
            kind: kind.into(),
            name: name.into(),
        })
    }

    pub fn invalid_config(
        field: impl Into<String>,
        value: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        ConstructError::Config(ConfigError::InvalidValue {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        })
    }
}
