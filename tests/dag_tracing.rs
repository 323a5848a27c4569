//! Runs every logged mutation with the `tracing` feature compiled in.
//!
//! No subscriber is installed: the events go to the no-op dispatcher, which is
//! enough to build and evaluate every field expression.

#![cfg(feature = "tracing")]

use keyed_dag::KeyedDag;

#[test]
fn dag_mutations_emit_events_without_subscriber() {
    let mut dag: KeyedDag<&str, u32> = KeyedDag::new();
    let (_, created) = dag.insert("fetch", 1);
    assert!(created);
    dag.insert("build", 2);
    dag.insert("test", 3);

    assert!(dag.attach(&"fetch", &"build"));
    assert!(dag.attach(&"build", &"test"));
    assert!(!dag.attach(&"test", &"fetch"), "cycle must be rejected");
    assert!(dag.detach(&"build", &"test"));

    let removed = dag.delete(&"build").expect("build exists");
    assert!(removed.is_detached());
    assert_eq!(dag.edge_count(), 0);
    assert!(dag.validate_invariants());
}
