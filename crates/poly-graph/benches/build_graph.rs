use criterion::{black_box, criterion_group, criterion_main, Criterion};
use poly_graph::{BaseGraph, Edge, Node};

fn grid(side: usize) -> BaseGraph {
    let mut graph = BaseGraph::new("grid");
    let nodes: Vec<Vec<_>> = (0..side)
        .map(|row| {
            (0..side)
                .map(|col| graph.add_node(Node::new(format!("{row},{col}"))))
                .collect()
        })
        .collect();
    for row in 0..side {
        for col in 0..side {
            if col + 1 < side {
                graph.add_edge(Edge::between(nodes[row][col], nodes[row][col + 1]));
            }
            if row + 1 < side {
                graph.add_edge(Edge::between(nodes[row][col], nodes[row + 1][col]));
            }
        }
    }
    graph
}

fn build_bench(c: &mut Criterion) {
    c.bench_function("build_grid_40x40", |b| {
        b.iter(|| black_box(grid(40)));
    });

    c.bench_function("validate_grid_40x40", |b| {
        let graph = grid(40);
        b.iter(|| black_box(graph.validate()));
    });

    c.bench_function("snapshot_grid_40x40", |b| {
        let graph = grid(40);
        b.iter(|| black_box(graph.to_snapshot()));
    });
}

criterion_group!(benches, build_bench);
criterion_main!(benches);
