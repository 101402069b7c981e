//! Substrate: the stateful object a task acts upon.
//!
//! Every substrate exposes the [`Stateful`] interface: a name, a current
//! state label and an open property map. A substrate comes in one of two
//! kinds:
//!
//! - **Free** - any task whose input state matches may move it.
//! - **GraphConstrained** - additionally carries a [`TransitionTable`]
//!   listing the valid states and the single task permitted on each
//!   `(from, to)` edge. [`Substrate::perform_transition`] only follows
//!   edges in that table.
//!
//! State is written directly by [`Task::execute`](crate::task::Task::execute)
//! and [`System::update_state`](crate::system::System::update_state). The
//! substrate itself does not guard those writes.

use crate::error::{Result, SubstrateError};
use crate::task::Task;
use crate::types::SubstrateId;
use petgraph::graphmap::DiGraphMap;
use petgraph::visit::Bfs;
use serde::Serialize;
use serde_json::Value;
use std::collections::{BTreeMap, BTreeSet};
use tracing::debug;

/// A named entity with a state label and a property map.
pub trait Stateful {
    fn name(&self) -> &str;

    /// The current state label.
    fn state(&self) -> &str;

    /// Overwrite the state label. No validation is performed.
    fn set_state(&mut self, state: String);

    /// Look up a property. A missing key is `None`, not an error.
    fn get_property(&self, key: &str) -> Option<&Value>;

    /// Insert or overwrite a property.
    fn set_property(&mut self, key: &str, value: Value);
}

/// The valid states of a graph-constrained substrate and the task permitted
/// on each edge between them.
#[derive(Debug, Clone)]
pub struct TransitionTable {
    valid_states: BTreeSet<String>,
    edges: BTreeMap<(String, String), Task>,
}

impl TransitionTable {
    /// Build a table, checking that every edge stays inside the valid states
    /// and that each edge's task declares the edge's own endpoints.
    pub fn new<S, I, F, T>(valid_states: S, edges: I) -> Result<Self>
    where
        S: IntoIterator,
        S::Item: Into<String>,
        I: IntoIterator<Item = ((F, T), Task)>,
        F: Into<String>,
        T: Into<String>,
    {
        let valid_states: BTreeSet<String> = valid_states.into_iter().map(Into::into).collect();
        let mut table = BTreeMap::new();

        for ((from, to), task) in edges {
            let (from, to) = (from.into(), to.into());
            for state in [&from, &to] {
                if !valid_states.contains(state) {
                    return Err(SubstrateError::UnknownState {
                        from: from.clone(),
                        to: to.clone(),
                        state: state.clone(),
                    }
                    .into());
                }
            }
            if task.input_state() != from || task.output_state() != to {
                return Err(SubstrateError::EdgeTaskMismatch {
                    from,
                    to,
                    task: task.name().to_string(),
                }
                .into());
            }
            let edge = (from, to);
            if table.contains_key(&edge) {
                let (from, to) = edge;
                return Err(SubstrateError::DuplicateEdge { from, to }.into());
            }
            table.insert(edge, task);
        }

        Ok(Self {
            valid_states,
            edges: table,
        })
    }

    pub fn valid_states(&self) -> impl Iterator<Item = &str> {
        self.valid_states.iter().map(String::as_str)
    }

    pub fn is_valid_state(&self, state: &str) -> bool {
        self.valid_states.contains(state)
    }

    /// The task mapped to the `(from, to)` edge, if any.
    pub fn task_for(&self, from: &str, to: &str) -> Option<&Task> {
        self.edges.get(&(from.to_string(), to.to_string()))
    }

    /// All edges leaving `state`, as `(to, task)` pairs.
    pub fn edges_from<'a>(&'a self, state: &'a str) -> impl Iterator<Item = (&'a str, &'a Task)> {
        self.edges
            .iter()
            .filter(move |((from, _), _)| from == state)
            .map(|((_, to), task)| (to.as_str(), task))
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Whether `task` may fire from `state`: the task must start at `state`
    /// and the edge towards its output must map to exactly this task.
    pub fn permits(&self, state: &str, task: &Task) -> bool {
        task.input_state() == state && self.task_for(state, task.output_state()) == Some(task)
    }

    /// States reachable from `start` by following edges, `start` included.
    pub fn reachable_from(&self, start: &str) -> BTreeSet<String> {
        let mut graph: DiGraphMap<&str, ()> = DiGraphMap::new();
        for state in &self.valid_states {
            graph.add_node(state.as_str());
        }
        for (from, to) in self.edges.keys() {
            graph.add_edge(from.as_str(), to.as_str(), ());
        }

        if !graph.contains_node(start) {
            return BTreeSet::new();
        }

        let mut reached = BTreeSet::new();
        let mut bfs = Bfs::new(&graph, start);
        while let Some(state) = bfs.next(&graph) {
            reached.insert(state.to_string());
        }
        reached
    }

    /// Valid states that can never be reached from `start`.
    pub fn unreachable_from(&self, start: &str) -> BTreeSet<String> {
        let reached = self.reachable_from(start);
        self.valid_states
            .iter()
            .filter(|s| !reached.contains(*s))
            .cloned()
            .collect()
    }
}

/// Which transition discipline a substrate follows.
#[derive(Debug, Clone)]
pub enum SubstrateKind {
    /// Any task whose input state matches may move the substrate.
    Free,
    /// Transitions are restricted to the edges of a table.
    GraphConstrained(TransitionTable),
}

/// The object or system on which tasks are performed.
///
/// Equality is identity: two substrates are equal when they share an id,
/// whatever their current state.
#[derive(Debug, Clone)]
pub struct Substrate {
    id: SubstrateId,
    name: String,
    state: String,
    properties: BTreeMap<String, Value>,
    kind: SubstrateKind,
}

impl Substrate {
    /// A free substrate in the given initial state.
    pub fn new(name: impl Into<String>, state: impl Into<String>) -> Self {
        Self {
            id: SubstrateId::new(),
            name: name.into(),
            state: state.into(),
            properties: BTreeMap::new(),
            kind: SubstrateKind::Free,
        }
    }

    /// A graph-constrained substrate.
    ///
    /// Fails if `initial_state` is not a valid state or the transition
    /// table is malformed.
    pub fn complex<S, I, F, T>(
        name: impl Into<String>,
        initial_state: impl Into<String>,
        valid_states: S,
        transitions: I,
    ) -> Result<Self>
    where
        S: IntoIterator,
        S::Item: Into<String>,
        I: IntoIterator<Item = ((F, T), Task)>,
        F: Into<String>,
        T: Into<String>,
    {
        let table = TransitionTable::new(valid_states, transitions)?;
        let initial_state = initial_state.into();
        if !table.is_valid_state(&initial_state) {
            return Err(SubstrateError::InvalidInitialState(initial_state).into());
        }

        Ok(Self {
            id: SubstrateId::new(),
            name: name.into(),
            state: initial_state,
            properties: BTreeMap::new(),
            kind: SubstrateKind::GraphConstrained(table),
        })
    }

    pub fn with_property(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.properties.insert(key.into(), value.into());
        self
    }

    pub fn id(&self) -> SubstrateId {
        self.id
    }

    pub fn kind(&self) -> &SubstrateKind {
        &self.kind
    }

    pub fn properties(&self) -> &BTreeMap<String, Value> {
        &self.properties
    }

    /// The transition table, for graph-constrained substrates.
    pub fn transitions(&self) -> Option<&TransitionTable> {
        match &self.kind {
            SubstrateKind::Free => None,
            SubstrateKind::GraphConstrained(table) => Some(table),
        }
    }

    pub fn is_graph_constrained(&self) -> bool {
        matches!(self.kind, SubstrateKind::GraphConstrained(_))
    }

    pub fn current_state(&self) -> &str {
        &self.state
    }

    /// Whether the transition table has an edge from the current state to
    /// `task`'s output that maps to exactly `task`.
    ///
    /// Always `false` for a free substrate: it has no table to consult.
    pub fn can_transition(&self, task: &Task) -> bool {
        self.transitions()
            .map(|table| table.permits(&self.state, task))
            .unwrap_or(false)
    }

    /// Follow the edge for `task` if the table permits it and the task's own
    /// conditions hold. Leaves the substrate untouched otherwise.
    pub fn perform_transition(&mut self, task: &Task) -> bool {
        if !self.can_transition(task) {
            debug!(
                "No edge for {} from state {} on {}",
                task.name(),
                self.state,
                self.name
            );
            return false;
        }
        task.execute(self)
    }

    pub fn snapshot(&self) -> SubstrateSnapshot {
        SubstrateSnapshot {
            id: self.id,
            name: self.name.clone(),
            state: self.state.clone(),
            properties: self.properties.clone(),
            graph_constrained: self.is_graph_constrained(),
        }
    }
}

impl Stateful for Substrate {
    fn name(&self) -> &str {
        &self.name
    }

    fn state(&self) -> &str {
        &self.state
    }

    fn set_state(&mut self, state: String) {
        self.state = state;
    }

    fn get_property(&self, key: &str) -> Option<&Value> {
        self.properties.get(key)
    }

    fn set_property(&mut self, key: &str, value: Value) {
        self.properties.insert(key.to_string(), value);
    }
}

impl PartialEq for Substrate {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Substrate {}

/// A serializable view of a substrate at a point in time.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SubstrateSnapshot {
    pub id: SubstrateId,
    pub name: String,
    pub state: String,
    pub properties: BTreeMap<String, Value>,
    pub graph_constrained: bool,
}
