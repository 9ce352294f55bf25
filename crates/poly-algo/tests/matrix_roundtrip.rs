use poly_algo::{matrix, paths};
use poly_graph::{BaseGraph, Edge, Node};

#[test]
fn adjacency_matrix_uses_the_three_valued_encoding() {
    let mut graph = BaseGraph::new("mixed");
    let a = graph.add_node(Node::new("a"));
    let b = graph.add_node(Node::new("b"));
    let c = graph.add_node(Node::new("c"));
    graph.add_edge(Edge::between(a, b));
    graph.add_edge(Edge::undirected(b, c));
    let (nodes, cells) = matrix::adjacency_matrix(&graph);
    assert_eq!(nodes, vec![a, b, c]);
    assert_eq!(cells[0][1], 1);
    assert_eq!(cells[1][0], -1);
    assert_eq!(cells[1][2], 2);
    assert_eq!(cells[2][1], 2);
    assert_eq!(cells[0][2], 0);
}

#[test]
fn opposed_directed_edges_read_as_undirected() {
    let mut graph = BaseGraph::new("both");
    let a = graph.add_node(Node::new("a"));
    let b = graph.add_node(Node::new("b"));
    graph.add_edge(Edge::between(a, b));
    graph.add_edge(Edge::between(b, a));
    let (_, cells) = matrix::adjacency_matrix(&graph);
    assert_eq!(cells[0][1], 2);
    assert_eq!(cells[1][0], 2);
}

#[test]
fn adjacency_matrix_round_trips() {
    let cells = vec![vec![0, 1, 2], vec![0, 0, 0], vec![2, 0, 0]];
    let graph = matrix::from_adjacency_matrix("rebuilt", &cells).unwrap();
    assert_eq!(graph.node_count(), 3);
    assert_eq!(graph.edge_count(), 2);
    let (_, back) = matrix::adjacency_matrix(&graph);
    assert_eq!(back, vec![vec![0, 1, 2], vec![-1, 0, 0], vec![2, 0, 0]]);
}

#[test]
fn ragged_matrix_is_rejected() {
    let cells = vec![vec![0, 1], vec![0]];
    assert!(matrix::from_adjacency_matrix("bad", &cells).is_none());
}

#[test]
fn incidence_matrix_marks_sources_and_targets() {
    let mut graph = BaseGraph::new("pair");
    let a = graph.add_node(Node::new("a"));
    let b = graph.add_node(Node::new("b"));
    graph.add_edge(Edge::between(a, b));
    let (nodes, cells) = matrix::incidence_matrix(&graph);
    assert_eq!(nodes, vec![a, b]);
    assert_eq!(cells, vec![vec![1], vec![-1]]);
}

#[test]
fn bounded_path_enumeration() {
    let mut graph = BaseGraph::new("diamond");
    let a = graph.add_node(Node::new("a"));
    let b = graph.add_node(Node::new("b"));
    let c = graph.add_node(Node::new("c"));
    let d = graph.add_node(Node::new("d"));
    graph.add_edge(Edge::between(a, b));
    graph.add_edge(Edge::between(b, d));
    graph.add_edge(Edge::between(a, c));
    graph.add_edge(Edge::between(c, d));
    let found = paths::all_paths(&graph, a, d);
    assert_eq!(found.len(), 2);
    assert!(found.contains(&vec![a, b, d]));
    assert!(found.contains(&vec![a, c, d]));
    assert_eq!(paths::path_between(&graph, a, d).map(|p| p.len()), Some(3));
    assert!(paths::path_between(&graph, d, a).is_none());
}
