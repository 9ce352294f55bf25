use std::collections::BTreeMap;

use poly_algo::paths;
use poly_graph::{BaseGraph, Edge, Node};

fn diamond() -> (BaseGraph, Vec<poly_core::NodeId>, paths::WeightMap) {
    // a -> b -> d and a -> c -> d, with the b side cheaper.
    let mut graph = BaseGraph::new("diamond");
    let a = graph.add_node(Node::new("a"));
    let b = graph.add_node(Node::new("b"));
    let c = graph.add_node(Node::new("c"));
    let d = graph.add_node(Node::new("d"));
    let ab = graph.add_edge(Edge::between(a, b));
    let bd = graph.add_edge(Edge::between(b, d));
    let ac = graph.add_edge(Edge::between(a, c));
    let cd = graph.add_edge(Edge::between(c, d));
    let weights = BTreeMap::from([(ab, 1.0), (bd, 1.0), (ac, 2.0), (cd, 2.0)]);
    (graph, vec![a, b, c, d], weights)
}

#[test]
fn dijkstra_prefers_cheap_side() {
    let (graph, ids, weights) = diamond();
    let (path, cost) = paths::dijkstra_path(&graph, ids[0], ids[3], &weights).unwrap();
    assert_eq!(path, vec![ids[0], ids[1], ids[3]]);
    assert_eq!(cost, 2.0);
}

#[test]
fn dijkstra_distances_cover_reachable_nodes() {
    let (graph, ids, weights) = diamond();
    let distances = paths::dijkstra(&graph, ids[0], None, &weights);
    assert_eq!(distances[&ids[0]], 0.0);
    assert_eq!(distances[&ids[1]], 1.0);
    assert_eq!(distances[&ids[2]], 2.0);
    assert_eq!(distances[&ids[3]], 2.0);
}

#[test]
fn dijkstra_unreachable_goal_is_none() {
    let mut graph = BaseGraph::new("split");
    let a = graph.add_node(Node::new("a"));
    let b = graph.add_node(Node::new("b"));
    assert!(paths::dijkstra_path(&graph, a, b, &BTreeMap::new()).is_none());
}

#[test]
fn bellman_ford_accepts_negative_weights() {
    let mut graph = BaseGraph::new("neg");
    let a = graph.add_node(Node::new("a"));
    let b = graph.add_node(Node::new("b"));
    let c = graph.add_node(Node::new("c"));
    let ab = graph.add_edge(Edge::between(a, b));
    let bc = graph.add_edge(Edge::between(b, c));
    let weights = BTreeMap::from([(ab, 4.0), (bc, -2.0)]);
    let distances = paths::bellman_ford(&graph, a, &weights).unwrap();
    assert_eq!(distances[&c], 2.0);
}

#[test]
fn bellman_ford_reports_negative_cycle() {
    let mut graph = BaseGraph::new("negcycle");
    let a = graph.add_node(Node::new("a"));
    let b = graph.add_node(Node::new("b"));
    let ab = graph.add_edge(Edge::between(a, b));
    let ba = graph.add_edge(Edge::between(b, a));
    let weights = BTreeMap::from([(ab, 1.0), (ba, -3.0)]);
    assert!(paths::bellman_ford(&graph, a, &weights).is_none());
}

#[test]
fn a_star_matches_dijkstra_with_zero_heuristic() {
    let (graph, ids, weights) = diamond();
    let astar = paths::a_star(&graph, ids[0], ids[3], &weights, |_| 0.0).unwrap();
    let dijkstra = paths::dijkstra_path(&graph, ids[0], ids[3], &weights).unwrap();
    assert_eq!(astar, dijkstra);
}

#[test]
fn floyd_warshall_hop_counts() {
    let (graph, ids, _) = diamond();
    let hops = paths::floyd_warshall_hops(&graph);
    assert_eq!(hops[&(ids[0], ids[3])], 2.0);
    assert_eq!(hops[&(ids[3], ids[0])], f64::INFINITY);
}
