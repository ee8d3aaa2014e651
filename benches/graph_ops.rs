use abstract_graph::{apply_diff, diff_graphs, merge_arrays, merge_diffs, Graph, Identity, Value};
use criterion::{black_box, criterion_group, criterion_main, Criterion};

const NODES: u128 = 1_000;

fn scene(children_step: u128, size: f64) -> Graph {
    let mut graph = Graph::new();
    let root = Identity::from_u128(0);
    let children: Value = (1..NODES)
        .step_by(children_step as usize)
        .map(|n| Value::Identity(Identity::from_u128(n)))
        .collect();
    graph
        .add_node(root, "Scene", Some("root"))
        .unwrap()
        .add_property("Children", children);
    for n in 1..NODES {
        graph
            .add_node(Identity::from_u128(n), "Mesh", None)
            .unwrap()
            .add_property("Size", size)
            .add_property("Parent", root);
    }
    graph
}

fn bench_diff(c: &mut Criterion) {
    let base = scene(1, 1.0);
    let head = scene(2, 2.0);
    c.bench_function("diff_1k_nodes", |b| {
        b.iter(|| diff_graphs(black_box(&base), black_box(&head)))
    });
    let ops = diff_graphs(&base, &head);
    c.bench_function("apply_1k_nodes", |b| {
        b.iter(|| {
            let mut graph = base.clone();
            apply_diff(&mut graph, black_box(&ops)).unwrap();
            graph
        })
    });
}

fn bench_merge(c: &mut Criterion) {
    let base = scene(1, 1.0);
    let lhs = diff_graphs(&base, &scene(2, 2.0));
    let rhs = diff_graphs(&base, &scene(3, 3.0));
    c.bench_function("merge_1k_nodes", |b| {
        b.iter(|| merge_diffs(black_box(&base), black_box(&lhs), black_box(&rhs)))
    });

    let ids = |step: usize| -> Vec<Value> {
        (0..200u128)
            .step_by(step)
            .map(|n| Value::Identity(Identity::from_u128(n)))
            .collect()
    };
    let (set_base, set_lhs) = (ids(1), ids(2));
    let mut set_rhs = ids(1);
    set_rhs.reverse();
    c.bench_function("merge_ordered_set_200", |b| {
        b.iter(|| merge_arrays(black_box(&set_base), black_box(&set_lhs), black_box(&set_rhs)))
    });
}

criterion_group!(benches, bench_diff, bench_merge);
criterion_main!(benches);
