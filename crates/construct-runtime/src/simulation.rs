//! Simulation: the exhaustive driver.
//!
//! A simulation holds performers, substrates and tasks, and attempts every
//! combination exactly once per run:
//!
//! 1. For each performer, in list order
//! 2. For each substrate, in list order
//! 3. For each task, in list order: perform, then report the outcome
//!
//! Nothing is skipped after a failure. Substrates are mutated in place, so
//! an earlier success can change the outcome of later attempts on the same
//! substrate; the nesting order above is therefore part of the contract.

use crate::report::{Outcome, ReportSink, SilentSink, SimulationReport, StdoutSink};
use construct_core::constructor::Constructor;
use construct_core::performer::Performer;
use construct_core::substrate::{Stateful, Substrate};
use construct_core::task::Task;
use tracing::{debug, info};

/// Drives every (performer, substrate, task) combination.
pub struct Simulation {
    constructors: Vec<Box<dyn Performer>>,
    substrates: Vec<Substrate>,
    tasks: Vec<Task>,
    echo: bool,
}

impl Simulation {
    /// Create a simulation over boxed performers.
    pub fn new(
        constructors: Vec<Box<dyn Performer>>,
        substrates: Vec<Substrate>,
        tasks: Vec<Task>,
    ) -> Self {
        Self {
            constructors,
            substrates,
            tasks,
            echo: true,
        }
    }

    /// Create a simulation over plain constructors.
    pub fn from_constructors(
        constructors: impl IntoIterator<Item = Constructor>,
        substrates: impl IntoIterator<Item = Substrate>,
        tasks: impl IntoIterator<Item = Task>,
    ) -> Self {
        Self::new(
            constructors
                .into_iter()
                .map(|c| Box::new(c) as Box<dyn Performer>)
                .collect(),
            substrates.into_iter().collect(),
            tasks.into_iter().collect(),
        )
    }

    /// Whether [`run`](Self::run) prints report lines to stdout (default: true).
    pub fn with_echo(mut self, echo: bool) -> Self {
        self.echo = echo;
        self
    }

    pub fn echo(&self) -> bool {
        self.echo
    }

    pub fn constructors(&self) -> &[Box<dyn Performer>] {
        &self.constructors
    }

    /// The substrates, reflecting every mutation made by past runs.
    pub fn substrates(&self) -> &[Substrate] {
        &self.substrates
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn into_substrates(self) -> Vec<Substrate> {
        self.substrates
    }

    /// Number of attempts a single run makes.
    pub fn combinations(&self) -> usize {
        self.constructors.len() * self.substrates.len() * self.tasks.len()
    }

    /// Attempt every combination, printing one line per attempt unless echo
    /// is disabled.
    pub fn run(&mut self) -> SimulationReport {
        if self.echo {
            self.run_with(&mut StdoutSink)
        } else {
            self.run_with(&mut SilentSink)
        }
    }

    /// Attempt every combination, delivering outcomes to `sink`.
    pub fn run_with(&mut self, sink: &mut dyn ReportSink) -> SimulationReport {
        info!(
            "Simulation starting: {} constructors x {} substrates x {} tasks",
            self.constructors.len(),
            self.substrates.len(),
            self.tasks.len()
        );

        let mut report =
            SimulationReport::with_constructors(self.constructors.iter().map(|c| c.name()));

        for (index, constructor) in self.constructors.iter().enumerate() {
            for substrate in self.substrates.iter_mut() {
                for task in &self.tasks {
                    let success = constructor.perform(task, substrate);
                    debug!(
                        "{} / {} / {} -> {}",
                        constructor.name(),
                        substrate.name(),
                        task.name(),
                        success
                    );
                    let outcome = Outcome {
                        constructor: constructor.name().to_string(),
                        substrate: substrate.name().to_string(),
                        task: task.name().to_string(),
                        success,
                    };
                    sink.report(&outcome);
                    report.record(index, outcome);
                }
            }
        }

        info!(
            "Simulation finished: {} of {} attempts succeeded",
            report.stats.successes, report.stats.attempts
        );
        report
    }
}
