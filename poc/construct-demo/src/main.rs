//! Construct Proof of Concept: constructors performing tasks on substrates.
//!
//! Four runs, one after another:
//!
//! 1. Heating: a capable builder and an idle one over water and iron
//! 2. State graph: walking a graph-constrained substrate A → B → C
//! 3. Governance: a charter stops a constructor from breaking a law
//! 4. Scenario file: `scenarios/kitchen.toml`, or the path given as the first argument
//!
//! Report lines go to stdout; narration goes through `tracing` to stderr
//! (filter with `RUST_LOG`, default `info`).

use construct_core::prelude::*;
use construct_runtime::prelude::*;
use std::error::Error;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

const KITCHEN: &str = include_str!("../scenarios/kitchen.toml");

fn main() -> std::result::Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    heating();
    state_graph()?;
    governance();
    scenario_file(std::env::args().nth(1).map(PathBuf::from))?;

    Ok(())
}

fn heating() {
    info!("── Heating ──────────────────────────────────────────");

    let heat = Task::new("Heat", "cold", "hot")
        .with_condition(Condition::has_property("Has Fuel", "fuel"));
    let cool = Task::new("Cool", "hot", "cold");

    let builder = Constructor::new("Builder", [heat.clone(), cool.clone()]);
    let idler = Constructor::new("Idler", Vec::<Task>::new());

    let mut sim = Simulation::from_constructors(
        [builder, idler],
        [
            Substrate::new("Water", "cold").with_property("fuel", json!("gas")),
            Substrate::new("Iron", "cold"),
        ],
        [heat, cool],
    );
    let report = sim.run();

    for substrate in sim.substrates() {
        info!("{} ends {}", substrate.name(), substrate.state());
    }
    info!(
        "{}/{} attempts succeeded ({:.0}%)",
        report.stats.successes,
        report.stats.attempts,
        report.stats.success_rate() * 100.0
    );
}

fn state_graph() -> Result<()> {
    info!("── State Graph ──────────────────────────────────────");

    let task1 = Task::new("Task1", "A", "B");
    let task2 = Task::new("Task2", "B", "C");
    let mut graph = Substrate::complex(
        "Graph",
        "A",
        ["A", "B", "C", "D"],
        [(("A", "B"), task1.clone()), (("B", "C"), task2.clone())],
    )?;

    if let Some(table) = graph.transitions() {
        info!("From A, unreachable: {:?}", table.unreachable_from("A"));
    }

    for task in [&task2, &task1, &task2] {
        let moved = graph.perform_transition(task);
        info!(
            "{} on {}: {} (now {})",
            task.name(),
            graph.name(),
            if moved { "moved" } else { "blocked" },
            graph.current_state()
        );
    }

    let mut system = System::new([graph], 100.0);
    system.update_energy(-12.5);
    info!("System energy after the walk: {}", system.total_energy());
    Ok(())
}

fn governance() {
    info!("── Governance ───────────────────────────────────────");

    let spin = Task::new("Spin", "still", "moving");
    let perpetuate = Task::new("Perpetuate", "moving", "perpetual");
    let charter = Arc::new(Charter::new([Principle::forbids_output(
        "Conservation of Energy",
        "perpetual",
    )]));

    let inventor = Constructor::new("Inventor", [spin.clone(), perpetuate.clone()]);
    let performers: Vec<Box<dyn Performer>> = vec![Box::new(Governed::new(inventor, charter))];

    let mut sim = Simulation::new(
        performers,
        vec![Substrate::new("Wheel", "still")],
        vec![spin, perpetuate],
    );
    let report = sim.run();
    info!("{} refused or failed", report.stats.failures);
}

fn scenario_file(path: Option<PathBuf>) -> ScenarioResult<()> {
    info!("── Scenario File ────────────────────────────────────");

    let config = match path {
        Some(path) => {
            info!("Loading {}", path.display());
            ScenarioConfig::load(&path)?
        }
        None => ScenarioConfig::from_toml_str(KITCHEN)?,
    };
    let mut sim = config.build()?;
    let report = sim.run();

    for stats in &report.stats.per_constructor {
        info!(
            "{}: {}/{} succeeded",
            stats.name, stats.successes, stats.attempts
        );
    }
    Ok(())
}
