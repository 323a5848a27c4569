//! `proptest` strategies for generating graphs.
//!
//! Available with the `proptest` feature. Generated graphs use keys
//! `0..vertices`. Edges are drawn between positions of a shuffled key order,
//! always from an earlier position to a later one, so every candidate edge list
//! is acyclic while key order and dependency order stay independent.

use proptest::collection::vec;
use proptest::prelude::*;

use crate::KeyedDag;

/// Generates a graph with `vertices` vertices and up to `max_edges` edge attempts.
///
/// Vertex payloads are the keys themselves.
pub fn arb_dag(vertices: u32, max_edges: usize) -> impl Strategy<Value = KeyedDag<u32, u32>> {
    let ranks = Just((0..vertices).collect::<Vec<u32>>()).prop_shuffle();
    let edges = if vertices < 2 {
        vec((Just(0u32), Just(0u32)), 0..=0).boxed()
    } else {
        vec(
            (0..vertices - 1).prop_flat_map(move |src| (Just(src), src + 1..vertices)),
            0..=max_edges,
        )
        .boxed()
    };

    (ranks, edges).prop_map(move |(ranks, edges)| {
        let mut dag: KeyedDag<u32, u32> = (0..vertices).map(|k| (k, k)).collect();
        for (src, dest) in edges {
            let (src, dest) = (ranks[src as usize], ranks[dest as usize]);
            let attached = dag.try_attach(&src, &dest);
            debug_assert_eq!(attached, Ok(true), "shuffled forward edges never close a cycle");
        }
        dag
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::strategy::ValueTree;
    use proptest::test_runner::TestRunner;

    #[test]
    fn arb_dag_generates_valid_graphs() {
        let mut runner = TestRunner::default();
        runner
            .run(&arb_dag(10, 30), |dag| {
                prop_assert_eq!(dag.len(), 10);
                prop_assert!(dag.validate_invariants());
                prop_assert_eq!(dag.iter().count(), 10);
                Ok(())
            })
            .unwrap();
    }

    #[test]
    fn arb_dag_orders_can_disagree_with_key_order() {
        let mut runner = TestRunner::deterministic();
        let strategy = arb_dag(6, 15);
        let found = (0..256).any(|_| {
            let dag = strategy.new_tree(&mut runner).unwrap().current();
            let disagrees = dag.vertices().any(|vex| vex.out_keys().any(|dest| dest < vex.key()));
            disagrees
        });
        assert!(found, "some generated edge should point at a smaller key");
    }
}
