//! Whole runs: hand-built simulations, governed performers and scenario files.

use construct_core::prelude::*;
use construct_runtime::prelude::*;
use std::io::Write;
use std::sync::Arc;

#[test]
fn heating_example_reports_in_nested_order() {
    let heat = Task::new("Heat", "cold", "hot");
    let cool = Task::new("Cool", "hot", "cold");
    let builder = Constructor::new("Builder", [heat.clone()]);
    let idler = Constructor::new("Idler", Vec::<Task>::new());

    let mut sim = Simulation::from_constructors(
        [builder, idler],
        [Substrate::new("Water", "cold"), Substrate::new("Iron", "hot")],
        [heat, cool],
    );
    let mut sink = MemorySink::new();
    let report = sim.run_with(&mut sink);

    assert_eq!(
        sink.into_lines(),
        vec![
            "Builder successfully performed Heat on Water",
            "Builder could not perform Cool on Water",
            "Builder could not perform Heat on Iron",
            "Builder could not perform Cool on Iron",
            "Idler could not perform Heat on Water",
            "Idler could not perform Cool on Water",
            "Idler could not perform Heat on Iron",
            "Idler could not perform Cool on Iron",
        ]
    );
    assert_eq!(report.stats.attempts, 8);
    assert_eq!(report.stats.per_constructor[0].successes, 1);
    assert_eq!(report.stats.per_constructor[1].successes, 0);
    assert_eq!(sim.substrates()[0].state(), "hot");
}

#[test]
fn graph_constraints_apply_through_explicit_transitions_only() {
    let task1 = Task::new("Task1", "A", "B");
    let shortcut = Task::new("Shortcut", "A", "C");
    let gate = Substrate::complex("Gate", "A", ["A", "B", "C"], [(("A", "B"), task1.clone())])
        .unwrap();

    // The table rejects the shortcut...
    assert!(!gate.can_transition(&shortcut));

    // ...but a capable constructor goes through Task::execute, which does not
    // consult the table.
    let rogue = Constructor::new("Rogue", [shortcut.clone()]);
    let mut sim =
        Simulation::from_constructors([rogue], [gate], [shortcut]).with_echo(false);
    let report = sim.run();
    assert_eq!(report.stats.successes, 1);
    assert_eq!(sim.substrates()[0].current_state(), "C");
}

#[test]
fn governed_and_plain_performers_side_by_side() {
    let spin = Task::new("Spin", "still", "moving");
    let cheat = Task::new("Cheat", "still", "perpetual");
    let charter = Arc::new(Charter::new([Principle::forbids_output(
        "Conservation",
        "perpetual",
    )]));

    let performers: Vec<Box<dyn Performer>> = vec![
        Box::new(Governed::new(
            Constructor::new("Lawful", [cheat.clone(), spin.clone()]),
            charter,
        )),
        Box::new(Constructor::new("Lawless", [cheat.clone()])),
    ];
    let mut sim = Simulation::new(
        performers,
        vec![Substrate::new("Wheel", "still")],
        vec![cheat, spin],
    )
    .with_echo(false);

    let report = sim.run();
    assert_eq!(
        report.lines(),
        vec![
            "Lawful could not perform Cheat on Wheel",
            "Lawful successfully performed Spin on Wheel",
            "Lawless could not perform Cheat on Wheel",
            "Lawless could not perform Spin on Wheel",
        ]
    );
    assert_eq!(sim.substrates()[0].state(), "moving");
}

#[test]
fn scenario_file_loads_and_runs() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(
        file,
        r#"
[report]
echo = false

[[task]]
name = "Heat"
input = "cold"
output = "hot"

[[task.condition]]
kind = "has_property"
name = "Has Fuel"
key = "fuel"

[[substrate]]
name = "Water"
state = "cold"
properties = {{ fuel = 3 }}

[[constructor]]
name = "Builder"
capabilities = ["Heat"]
"#
    )
    .unwrap();

    let config = ScenarioConfig::load(file.path()).unwrap();
    let mut sim = config.build().unwrap();
    assert!(!sim.echo());

    let report = sim.run();
    assert_eq!(report.lines(), vec!["Builder successfully performed Heat on Water"]);

    let json: serde_json::Value = serde_json::from_str(&report.to_json().unwrap()).unwrap();
    assert_eq!(json["stats"]["successes"], 1);
    assert_eq!(json["outcomes"][0]["substrate"], "Water");
}

#[test]
fn malformed_graph_in_scenario_surfaces_substrate_error() {
    let content = r#"
        [[task]]
        name = "Task1"
        input = "A"
        output = "B"

        [[substrate]]
        name = "Gate"
        state = "Z"
        valid_states = ["A", "B"]
        transitions = [{ from = "A", to = "B", task = "Task1" }]
    "#;
    let err = ScenarioConfig::from_toml_str(content)
        .unwrap()
        .build()
        .err()
        .unwrap();
    assert!(matches!(
        err,
        ScenarioError::Model(ConstructError::Substrate(_))
    ));
}
