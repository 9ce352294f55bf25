use criterion::{black_box, criterion_group, criterion_main, Criterion};
use poly_core::RngHandle;
use poly_graph::{structural_hash, BaseGraph, Edge, Node};

fn random_graph(nodes: usize, edges: usize, seed: u64) -> BaseGraph {
    let mut rng = RngHandle::from_seed(seed);
    let mut graph = BaseGraph::new("random");
    let ids: Vec<_> = (0..nodes)
        .map(|i| graph.add_node(Node::new(i.to_string())))
        .collect();
    for _ in 0..edges {
        let source = ids[rng.next_index(ids.len())];
        let target = ids[rng.next_index(ids.len())];
        graph.add_edge(Edge::between(source, target));
    }
    graph
}

fn queries_bench(c: &mut Criterion) {
    let graph = random_graph(2_000, 8_000, 7);
    let nodes = graph.node_ids();

    c.bench_function("degree_queries", |b| {
        b.iter(|| {
            for node in &nodes {
                black_box(graph.in_degree(*node));
                black_box(graph.out_degree(*node));
            }
        });
    });

    c.bench_function("neighbour_queries", |b| {
        b.iter(|| {
            for node in nodes.iter().take(200) {
                black_box(graph.connected_nodes(*node));
            }
        });
    });

    c.bench_function("structural_hash", |b| {
        b.iter(|| black_box(structural_hash(&graph).unwrap()));
    });
}

criterion_group!(benches, queries_bench);
criterion_main!(benches);
