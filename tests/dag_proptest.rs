use keyed_dag::{DagError, KeyedDag};
use petgraph::algo::{has_path_connecting, is_cyclic_directed};
use petgraph::graphmap::DiGraphMap;
use proptest::prelude::*;
use std::collections::HashMap;

const KEY_SPACE: u8 = 12;

#[derive(Debug, Clone)]
enum Operation {
    Insert(u8),
    Delete(u8),
    Attach(u8, u8),
    Detach(u8, u8),
}

fn operation() -> impl Strategy<Value = Operation> {
    let key = 0..KEY_SPACE;
    prop_oneof![
        1 => key.clone().prop_map(Operation::Insert),
        1 => key.clone().prop_map(Operation::Delete),
        6 => (key.clone(), key.clone()).prop_map(|(a, b)| Operation::Attach(a, b)),
        2 => (key.clone(), key).prop_map(|(a, b)| Operation::Detach(a, b)),
    ]
}

/// Rebuilds the edge relation as a petgraph map for independent checks.
fn to_graphmap(dag: &KeyedDag<u8, u32>) -> DiGraphMap<u8, ()> {
    let mut g = DiGraphMap::new();
    for vex in dag.vertices() {
        g.add_node(*vex.key());
    }
    for vex in dag.vertices() {
        for dest in vex.out_keys() {
            g.add_edge(*vex.key(), *dest, ());
        }
    }
    g
}

fn adjacency(dag: &KeyedDag<u8, u32>) -> Vec<(u8, Vec<u8>, Vec<u8>)> {
    dag.vertices()
        .map(|v| {
            (
                *v.key(),
                v.out_keys().copied().collect(),
                v.in_keys().copied().collect(),
            )
        })
        .collect()
}

fn assert_mirrored(dag: &KeyedDag<u8, u32>) {
    for a in dag.vertices() {
        for b in a.out_keys() {
            let b = dag.search(b).expect("out-edge must point at a live vertex");
            assert!(b.in_keys().any(|k| k == a.key()), "{} -> {} missing in-side", a, b);
        }
        for b in a.in_keys() {
            let b = dag.search(b).expect("in-edge must point at a live vertex");
            assert!(b.out_keys().any(|k| k == a.key()), "{} -> {} missing out-side", b, a);
        }
    }
}

/// Every vertex appears once, after all of its in-edge sources.
fn assert_topological(dag: &KeyedDag<u8, u32>, order: &[u8]) {
    assert_eq!(order.len(), dag.len(), "order must cover every vertex");
    let pos: HashMap<u8, usize> = order.iter().enumerate().map(|(i, &k)| (k, i)).collect();
    assert_eq!(pos.len(), order.len(), "order must not repeat vertices");
    for vex in dag.vertices() {
        for src in vex.in_keys() {
            assert!(pos[src] < pos[vex.key()], "{src} must precede {vex}");
        }
    }
}

fn apply(dag: &mut KeyedDag<u8, u32>, op: &Operation) {
    match *op {
        Operation::Insert(k) => {
            let existed = dag.contains(&k);
            let (vex, created) = dag.insert(k, u32::from(k) * 10);
            assert_eq!(created, !existed);
            assert_eq!(*vex.value(), u32::from(k) * 10);
        }
        Operation::Delete(k) => {
            let existed = dag.contains(&k);
            let removed = dag.delete(&k);
            assert_eq!(removed.is_some(), existed);
            if let Some(vex) = removed {
                assert!(vex.is_detached());
                assert_eq!(vex.out_degree() + vex.in_degree(), 0);
            }
            assert!(dag.search(&k).is_none());
            for vex in dag.vertices() {
                assert!(vex.out_keys().all(|&d| d != k));
                assert!(vex.in_keys().all(|&s| s != k));
            }
        }
        Operation::Attach(src, dest) => {
            let before = adjacency(dag);
            let oracle = to_graphmap(dag);
            match dag.try_attach(&src, &dest) {
                Err(DagError::SelfLoop(k)) => assert!(src == dest && k == src),
                Err(DagError::VertexNotFound { key, .. }) => {
                    assert!(!dag.contains(&key));
                    assert_eq!(adjacency(dag), before);
                }
                Ok(accepted) => {
                    let closes_cycle = has_path_connecting(&oracle, dest, src, None);
                    assert_eq!(accepted, !closes_cycle, "attach {src} -> {dest}");
                    if accepted {
                        assert!(dag.has_edge(&src, &dest));
                    } else {
                        assert_eq!(adjacency(dag), before);
                    }
                }
            }
        }
        Operation::Detach(src, dest) => {
            let had_edge = dag.has_edge(&src, &dest);
            match dag.try_detach(&src, &dest) {
                Ok(removed) => {
                    assert_eq!(removed, had_edge);
                    assert!(!dag.has_edge(&src, &dest));
                }
                Err(err) => assert!(src == dest || !dag.contains(err.key())),
            }
        }
    }
}

proptest! {
    #[test]
    fn dag_stays_acyclic_and_mirrored(ops in proptest::collection::vec(operation(), 1..200)) {
        let mut dag: KeyedDag<u8, u32> = (0..KEY_SPACE).map(|k| (k, u32::from(k) * 10)).collect();

        for op in &ops {
            apply(&mut dag, op);
            prop_assert!(!is_cyclic_directed(&to_graphmap(&dag)));
            assert_mirrored(&dag);
        }

        prop_assert!(dag.validate_invariants());
        let edges: usize = dag.vertices().map(|v| v.out_degree()).sum();
        prop_assert_eq!(dag.edge_count(), edges);
    }

    #[test]
    fn traversals_respect_dependencies(ops in proptest::collection::vec(operation(), 1..120)) {
        let mut dag: KeyedDag<u8, u32> = (0..KEY_SPACE).map(|k| (k, u32::from(k) * 10)).collect();
        for op in &ops {
            apply(&mut dag, op);
        }

        let mut eager = Vec::new();
        dag.topological(|v| {
            eager.push(*v.key());
            true
        });
        assert_topological(&dag, &eager);

        let stepped: Vec<u8> = dag.iter().map(|v| *v.key()).collect();
        prop_assert_eq!(&stepped, &eager);

        let batches: Vec<Vec<u8>> = dag
            .iter()
            .batches()
            .map(|batch| batch.iter().map(|v| *v.key()).collect())
            .collect();
        let flattened: Vec<u8> = batches.iter().flatten().copied().collect();
        assert_topological(&dag, &flattened);
        for batch in &batches {
            prop_assert!(!batch.is_empty());
            for a in batch {
                for b in batch {
                    prop_assert!(!dag.has_edge(a, b), "{} -> {} inside one generation", a, b);
                }
            }
        }

        let mut bfs = Vec::new();
        dag.bfs(|v| {
            bfs.push(*v.key());
            true
        });
        let mut dfs = Vec::new();
        dag.dfs(|v| {
            dfs.push(*v.key());
            true
        });
        let mut all: Vec<u8> = dag.keys().copied().collect();
        for mut order in [bfs, dfs] {
            order.sort_unstable();
            prop_assert_eq!(&order, &all);
        }
        all.dedup();
        prop_assert_eq!(all.len(), dag.len());
    }
}
