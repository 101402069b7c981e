//! Scenario files: declarative simulations in TOML.
//!
//! A scenario declares tasks, substrates, constructors and (optionally)
//! principles by name, then [`ScenarioConfig::build`] resolves the names
//! into a ready-to-run [`Simulation`].
//!
//! ```toml
//! [report]
//! echo = true
//!
//! [[task]]
//! name = "Heat"
//! input = "cold"
//! output = "hot"
//!
//! [[task.condition]]
//! kind = "property_equals"
//! name = "Fuelled"
//! key = "fuel"
//! value = true
//!
//! [[substrate]]
//! name = "Water"
//! state = "cold"
//! properties = { fuel = true }
//!
//! [[constructor]]
//! name = "Builder"
//! capabilities = ["Heat"]
//! ```
//!
//! A substrate with `valid_states` and `transitions` is graph-constrained.
//! Constructors marked `governed = true` are wrapped in the charter built
//! from the `[[principle]]` entries.

use crate::governance::{Charter, Governed};
use crate::simulation::Simulation;
use construct_core::condition::Condition;
use construct_core::constructor::Constructor;
use construct_core::error::{ConfigError, ConstructError};
use construct_core::performer::Performer;
use construct_core::principle::Principle;
use construct_core::substrate::Substrate;
use construct_core::task::Task;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::{BTreeMap, HashMap, HashSet};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;
use tracing::debug;

/// Scenario loading errors.
#[derive(Debug, Error)]
pub enum ScenarioError {
    #[error("Failed to read scenario {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse scenario: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Failed to serialize scenario: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error(transparent)]
    Model(#[from] ConstructError),
}

/// Result type for scenario operations.
pub type ScenarioResult<T> = Result<T, ScenarioError>;

/// A complete scenario description.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScenarioConfig {
    #[serde(default)]
    pub report: ReportConfig,
    #[serde(default, rename = "task")]
    pub tasks: Vec<TaskSpec>,
    #[serde(default, rename = "substrate")]
    pub substrates: Vec<SubstrateSpec>,
    #[serde(default, rename = "constructor")]
    pub constructors: Vec<ConstructorSpec>,
    #[serde(default, rename = "principle")]
    pub principles: Vec<PrincipleSpec>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Print report lines to stdout when the simulation runs.
    #[serde(default = "default_echo")]
    pub echo: bool,
}

fn default_echo() -> bool {
    true
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            echo: default_echo(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskSpec {
    pub name: String,
    pub input: String,
    pub output: String,
    #[serde(default, rename = "condition")]
    pub conditions: Vec<ConditionSpec>,
}

/// Built-in condition strategies, selected by `kind`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ConditionSpec {
    Always { name: String, value: bool },
    HasProperty { name: String, key: String },
    PropertyEquals { name: String, key: String, value: toml::Value },
    StateIs { name: String, state: String },
}

/// Convert a TOML value into the property representation.
///
/// Datetimes become their RFC 3339 text.
pub fn json_value(value: &toml::Value) -> Value {
    match value {
        toml::Value::String(s) => Value::String(s.clone()),
        toml::Value::Integer(i) => Value::from(*i),
        toml::Value::Float(f) => Value::from(*f),
        toml::Value::Boolean(b) => Value::Bool(*b),
        toml::Value::Datetime(dt) => Value::String(dt.to_string()),
        toml::Value::Array(items) => Value::Array(items.iter().map(json_value).collect()),
        toml::Value::Table(table) => Value::Object(
            table
                .iter()
                .map(|(k, v)| (k.clone(), json_value(v)))
                .collect(),
        ),
    }
}

impl ConditionSpec {
    pub fn build(&self) -> Condition {
        match self {
            ConditionSpec::Always { name, value } => Condition::always(name.as_str(), *value),
            ConditionSpec::HasProperty { name, key } => {
                Condition::has_property(name.as_str(), key.as_str())
            }
            ConditionSpec::PropertyEquals { name, key, value } => {
                Condition::property_equals(name.as_str(), key.as_str(), json_value(value))
            }
            ConditionSpec::StateIs { name, state } => {
                Condition::state_is(name.as_str(), state.as_str())
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubstrateSpec {
    pub name: String,
    pub state: String,
    #[serde(default)]
    pub properties: BTreeMap<String, toml::Value>,
    #[serde(default)]
    pub valid_states: Vec<String>,
    #[serde(default)]
    pub transitions: Vec<TransitionSpec>,
}

/// One edge of a graph-constrained substrate, naming the task allowed on it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransitionSpec {
    pub from: String,
    pub to: String,
    pub task: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConstructorSpec {
    pub name: String,
    #[serde(default)]
    pub capabilities: Vec<String>,
    /// Refuse tasks the scenario's principles do not admit.
    #[serde(default)]
    pub governed: bool,
}

/// Built-in principle strategies, selected by `kind`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PrincipleSpec {
    Always { name: String, value: bool },
    ForbidsOutput { name: String, state: String },
    Named { name: String, task: String },
}

impl PrincipleSpec {
    pub fn build(&self) -> Principle {
        match self {
            PrincipleSpec::Always { name, value } => Principle::always(name.as_str(), *value),
            PrincipleSpec::ForbidsOutput { name, state } => {
                Principle::forbids_output(name.as_str(), state.as_str())
            }
            PrincipleSpec::Named { name, task } => Principle::named(name.as_str(), task.as_str()),
        }
    }
}

impl ScenarioConfig {
    pub fn from_toml_str(content: &str) -> ScenarioResult<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Read and parse a scenario file.
    pub fn load(path: &Path) -> ScenarioResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| ScenarioError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    pub fn to_toml_string(&self) -> ScenarioResult<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// The charter formed by all declared principles.
    pub fn charter(&self) -> Charter {
        Charter::new(self.principles.iter().map(PrincipleSpec::build))
    }

    /// Resolve names and assemble the simulation.
    pub fn build(&self) -> ScenarioResult<Simulation> {
        let tasks = self.build_tasks()?;
        let by_name: HashMap<&str, &Task> = tasks.iter().map(|t| (t.name(), t)).collect();
        let lookup = |name: &str| -> Result<Task, ConstructError> {
            by_name
                .get(name)
                .map(|t| (*t).clone())
                .ok_or_else(|| ConstructError::unknown_reference("task", name))
        };

        let mut substrates = Vec::with_capacity(self.substrates.len());
        for spec in &self.substrates {
            substrates.push(spec.build(&lookup)?);
        }

        let charter = Arc::new(self.charter());
        let mut constructors: Vec<Box<dyn Performer>> = Vec::with_capacity(self.constructors.len());
        for spec in &self.constructors {
            let capabilities = spec
                .capabilities
                .iter()
                .map(|name| lookup(name.as_str()))
                .collect::<Result<Vec<_>, _>>()?;
            let constructor = Constructor::new(spec.name.as_str(), capabilities);
            if spec.governed {
                constructors.push(Box::new(Governed::new(constructor, charter.clone())));
            } else {
                constructors.push(Box::new(constructor));
            }
        }

        debug!(
            "Scenario built: {} tasks, {} substrates, {} constructors",
            tasks.len(),
            substrates.len(),
            constructors.len()
        );
        Ok(Simulation::new(constructors, substrates, tasks).with_echo(self.report.echo))
    }

    fn build_tasks(&self) -> Result<Vec<Task>, ConstructError> {
        let mut seen = HashSet::new();
        let mut tasks = Vec::with_capacity(self.tasks.len());
        for spec in &self.tasks {
            if spec.name.is_empty() {
                return Err(ConfigError::MissingField("task.name".into()).into());
            }
            if !seen.insert(spec.name.as_str()) {
                return Err(ConstructError::duplicate("task", spec.name.as_str()));
            }
            let task = Task::new(spec.name.as_str(), spec.input.as_str(), spec.output.as_str())
                .with_conditions(spec.conditions.iter().map(ConditionSpec::build));
            tasks.push(task);
        }
        Ok(tasks)
    }
}

impl SubstrateSpec {
    fn build(
        &self,
        lookup: &dyn Fn(&str) -> Result<Task, ConstructError>,
    ) -> Result<Substrate, ConstructError> {
        if self.state.is_empty() {
            return Err(ConstructError::invalid_config(
                format!("substrate.{}.state", self.name),
                "",
                "a substrate needs an initial state",
            ));
        }
        let mut substrate = if self.valid_states.is_empty() {
            if !self.transitions.is_empty() {
                return Err(ConfigError::MissingField(format!(
                    "substrate.{}.valid_states",
                    self.name
                ))
                .into());
            }
            Substrate::new(self.name.as_str(), self.state.as_str())
        } else {
            let mut edges = Vec::with_capacity(self.transitions.len());
            for edge in &self.transitions {
                edges.push(((edge.from.as_str(), edge.to.as_str()), lookup(edge.task.as_str())?));
            }
            Substrate::complex(
                self.name.as_str(),
                self.state.as_str(),
                self.valid_states.iter().map(String::as_str),
                edges,
            )?
        };

        for (key, value) in &self.properties {
            substrate = substrate.with_property(key.as_str(), json_value(value));
        }
        Ok(substrate)
    }
}
