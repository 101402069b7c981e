//! Outcome reporting for simulation runs.
//!
//! Each attempted (constructor, substrate, task) triple produces one
//! [`Outcome`]. Its `Display` form is the report line:
//!
//! ```text
//! Builder successfully performed Heat on Water
//! Builder could not perform Heat on Water
//! ```
//!
//! Lines go to a [`ReportSink`]; the run also returns a
//! [`SimulationReport`] with every outcome and aggregate statistics.

use construct_core::error::Result;
use serde::Serialize;
use std::fmt;

/// The result of one attempted triple.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Outcome {
    pub constructor: String,
    pub substrate: String,
    pub task: String,
    pub success: bool,
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.success {
            write!(
                f,
                "{} successfully performed {} on {}",
                self.constructor, self.task, self.substrate
            )
        } else {
            write!(
                f,
                "{} could not perform {} on {}",
                self.constructor, self.task, self.substrate
            )
        }
    }
}

/// Receives outcomes as they are produced, in enumeration order.
pub trait ReportSink {
    fn report(&mut self, outcome: &Outcome);
}

/// Prints one line per outcome to standard output.
#[derive(Debug, Default, Clone, Copy)]
pub struct StdoutSink;

impl ReportSink for StdoutSink {
    fn report(&mut self, outcome: &Outcome) {
        println!("{}", outcome);
    }
}

/// Discards outcomes; the returned report still records them.
#[derive(Debug, Default, Clone, Copy)]
pub struct SilentSink;

impl ReportSink for SilentSink {
    fn report(&mut self, _outcome: &Outcome) {}
}

/// Collects report lines in memory.
#[derive(Debug, Default, Clone)]
pub struct MemorySink {
    lines: Vec<String>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn into_lines(self) -> Vec<String> {
        self.lines
    }
}

impl ReportSink for MemorySink {
    fn report(&mut self, outcome: &Outcome) {
        self.lines.push(outcome.to_string());
    }
}

/// Attempt counts for one constructor.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ConstructorStats {
    pub name: String,
    pub attempts: usize,
    pub successes: usize,
}

/// Aggregate counts over a run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SimulationStats {
    pub attempts: usize,
    pub successes: usize,
    pub failures: usize,
    /// One entry per constructor, in enumeration order.
    pub per_constructor: Vec<ConstructorStats>,
}

impl SimulationStats {
    /// Fraction of attempts that succeeded (0.0 for an empty run).
    pub fn success_rate(&self) -> f64 {
        if self.attempts == 0 {
            0.0
        } else {
            self.successes as f64 / self.attempts as f64
        }
    }
}

/// Everything a run produced.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SimulationReport {
    pub outcomes: Vec<Outcome>,
    pub stats: SimulationStats,
}

impl SimulationReport {
    pub(crate) fn with_constructors<'a>(names: impl IntoIterator<Item = &'a str>) -> Self {
        let per_constructor = names
            .into_iter()
            .map(|name| ConstructorStats {
                name: name.to_string(),
                ..ConstructorStats::default()
            })
            .collect();
        Self {
            outcomes: Vec::new(),
            stats: SimulationStats {
                per_constructor,
                ..SimulationStats::default()
            },
        }
    }

    pub(crate) fn record(&mut self, constructor_index: usize, outcome: Outcome) {
        self.stats.attempts += 1;
        if outcome.success {
            self.stats.successes += 1;
        } else {
            self.stats.failures += 1;
        }
        if let Some(entry) = self.stats.per_constructor.get_mut(constructor_index) {
            entry.attempts += 1;
            if outcome.success {
                entry.successes += 1;
            }
        }
        self.outcomes.push(outcome);
    }

    /// Report lines in enumeration order.
    pub fn lines(&self) -> Vec<String> {
        self.outcomes.iter().map(ToString::to_string).collect()
    }

    pub fn successes(&self) -> impl Iterator<Item = &Outcome> {
        self.outcomes.iter().filter(|o| o.success)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn outcome(success: bool) -> Outcome {
        Outcome {
            constructor: "Builder".into(),
            substrate: "Water".into(),
            task: "Heat".into(),
            success,
        }
    }

    #[test]
    fn report_line_formats() {
        assert_eq!(
            outcome(true).to_string(),
            "Builder successfully performed Heat on Water"
        );
        assert_eq!(
            outcome(false).to_string(),
            "Builder could not perform Heat on Water"
        );
    }

    #[test]
    fn record_updates_totals_and_per_constructor() {
        let mut report = SimulationReport::with_constructors(["Builder", "Idler"]);
        report.record(0, outcome(true));
        report.record(0, outcome(false));
        report.record(1, outcome(false));

        assert_eq!(report.stats.attempts, 3);
        assert_eq!(report.stats.successes, 1);
        assert_eq!(report.stats.failures, 2);
        assert_eq!(report.stats.per_constructor[0].attempts, 2);
        assert_eq!(report.stats.per_constructor[0].successes, 1);
        assert_eq!(report.stats.per_constructor[1].attempts, 1);
        assert!((report.stats.success_rate() - 1.0 / 3.0).abs() < 1e-12);
        assert_eq!(report.successes().count(), 1);
    }

    #[test]
    fn json_export_contains_outcomes() {
        let mut report = SimulationReport::with_constructors(["Builder"]);
        report.record(0, outcome(true));
        let json = report.to_json().unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed["stats"]["successes"], 1);
        assert_eq!(parsed["outcomes"][0]["task"], "Heat");
    }

    #[test]
    fn memory_sink_collects_lines() {
        let mut sink = MemorySink::new();
        sink.report(&outcome(false));
        assert_eq!(sink.lines().len(), 1);
        assert_eq!(sink.lines()[0], "Builder could not perform Heat on Water");
    }

    #[test]
    fn empty_run_has_zero_rate() {
        assert_eq!(SimulationStats::default().success_rate(), 0.0);
    }
}
