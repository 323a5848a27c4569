//! Staged build scheduling example
//!
//! Runs a small build graph one dependency layer at a time: every task in a
//! stage has all of its prerequisites finished in an earlier stage.

use anyhow::{bail, Context, Result};
use keyed_dag::KeyedDag;

struct Task {
    command: &'static str,
    cost: u32,
}

fn main() -> Result<()> {
    println!("Staged Build Example");
    println!("====================");

    let tasks = [
        ("fetch", "git fetch", 2),
        ("vendor", "cargo vendor", 5),
        ("codegen", "protoc --rust_out", 3),
        ("compile", "cargo build", 20),
        ("lint", "cargo clippy", 8),
        ("test", "cargo test", 15),
        ("package", "cargo package", 4),
    ];
    let mut dag = KeyedDag::with_capacity(tasks.len());
    for (name, command, cost) in tasks {
        dag.insert(name, Task { command, cost });
    }

    let deps = [
        ("fetch", "vendor"),
        ("fetch", "codegen"),
        ("vendor", "compile"),
        ("codegen", "compile"),
        ("codegen", "lint"),
        ("compile", "test"),
        ("lint", "package"),
        ("test", "package"),
    ];
    for (before, after) in deps {
        let attached = dag
            .try_attach(&before, &after)
            .with_context(|| format!("wiring {before} -> {after}"))?;
        if !attached {
            bail!("{before} -> {after} would create a dependency cycle");
        }
    }

    // A back edge is refused and the graph is left as it was.
    assert!(!dag.attach(&"package", &"fetch"));
    println!("Refused package -> fetch (cycle)");

    let mut total = 0;
    for (stage, batch) in dag.iter().batches().enumerate() {
        // Tasks within a stage run in parallel; the stage takes as long as its slowest task.
        let wall = batch.iter().map(|t| t.value().cost).max().unwrap_or(0);
        total += wall;
        println!("Stage {stage} ({wall}s):");
        for task in batch {
            println!("  {:<8} {}", task.to_string(), task.value().command);
        }
    }
    println!("Critical wall time: {total}s");

    let serial: u32 = dag.vertices().map(|t| t.value().cost).sum();
    println!("Serial wall time:   {serial}s");
    Ok(())
}
