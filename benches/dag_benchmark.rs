use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use keyed_dag::KeyedDag;

/// Layered graph: `layers` rows of `width` vertices, each vertex wired to every
/// vertex in the next row.
fn layered(layers: u32, width: u32) -> KeyedDag<u32, u32> {
    let mut dag = KeyedDag::with_capacity((layers * width) as usize);
    for k in 0..layers * width {
        dag.insert(k, k);
    }
    for layer in 0..layers - 1 {
        for a in 0..width {
            for b in 0..width {
                dag.attach(&(layer * width + a), &((layer + 1) * width + b));
            }
        }
    }
    dag
}

/// Chain 0 -> 1 -> ... -> n-1, the worst case for the attach reachability check.
fn chain(n: u32) -> KeyedDag<u32, u32> {
    let mut dag = KeyedDag::with_capacity(n as usize);
    for k in 0..n {
        dag.insert(k, k);
    }
    for k in 1..n {
        dag.attach(&(k - 1), &k);
    }
    dag
}

fn bench_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("dag_build_layered");
    for &(layers, width) in &[(8u32, 8u32), (16, 16)] {
        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{layers}x{width}")),
            &(layers, width),
            |b, &(layers, width)| b.iter(|| black_box(layered(layers, width))),
        );
    }
    group.finish();
}

fn bench_attach_rejected(c: &mut Criterion) {
    let mut dag = chain(1_000);

    c.bench_function("dag_attach_rejected_chain_1000", |b| {
        b.iter(|| black_box(dag.attach(&999, &0)));
    });
}

fn bench_traversals(c: &mut Criterion) {
    let dag = layered(16, 16);

    c.bench_function("dag_bfs_16x16", |b| {
        b.iter(|| {
            let mut n = 0usize;
            dag.bfs(|v| {
                n += *v.value() as usize;
                true
            });
            black_box(n)
        });
    });

    c.bench_function("dag_dfs_16x16", |b| {
        b.iter(|| {
            let mut n = 0usize;
            dag.dfs(|v| {
                n += *v.value() as usize;
                true
            });
            black_box(n)
        });
    });

    c.bench_function("dag_topological_16x16", |b| {
        b.iter(|| {
            let mut n = 0usize;
            dag.topological(|v| {
                n += *v.value() as usize;
                true
            });
            black_box(n)
        });
    });
}

fn bench_iterator(c: &mut Criterion) {
    let dag = layered(16, 16);

    c.bench_function("dag_iter_next_16x16", |b| {
        b.iter(|| black_box(dag.iter().count()));
    });

    c.bench_function("dag_iter_batches_16x16", |b| {
        b.iter(|| black_box(dag.iter().batches().map(|batch| batch.len()).max()));
    });
}

criterion_group!(
    benches,
    bench_build,
    bench_attach_rejected,
    bench_traversals,
    bench_iterator
);
criterion_main!(benches);
