use poly_algo::{components, euler, hamilton, planar, properties, traversal};
use poly_algo::{Planarity, SearchBudget, SearchOutcome};
use poly_graph::{BaseGraph, Edge, Node};

#[test]
fn depth_first_visits_in_ascending_neighbour_order() {
    let mut graph = BaseGraph::new("fanout");
    let a = graph.add_node(Node::new("a"));
    let b = graph.add_node(Node::new("b"));
    let c = graph.add_node(Node::new("c"));
    let d = graph.add_node(Node::new("d"));
    graph.add_edge(Edge::between(a, c));
    graph.add_edge(Edge::between(a, b));
    graph.add_edge(Edge::between(b, d));
    let order = traversal::depth_first(&graph, a, |_| {});
    assert_eq!(order, vec![a, b, d, c]);
}

#[test]
fn breadth_first_visits_level_by_level() {
    let mut graph = BaseGraph::new("levels");
    let a = graph.add_node(Node::new("a"));
    let b = graph.add_node(Node::new("b"));
    let c = graph.add_node(Node::new("c"));
    let d = graph.add_node(Node::new("d"));
    graph.add_edge(Edge::between(a, b));
    graph.add_edge(Edge::between(a, c));
    graph.add_edge(Edge::between(b, d));
    let order = traversal::breadth_first(&graph, a, |_| {});
    assert_eq!(order, vec![a, b, c, d]);
}

#[test]
fn components_split_and_merge() {
    let mut graph = BaseGraph::new("parts");
    let a = graph.add_node(Node::new("a"));
    let b = graph.add_node(Node::new("b"));
    let c = graph.add_node(Node::new("c"));
    graph.add_edge(Edge::between(a, b));
    assert_eq!(components::connected_components(&graph).len(), 2);
    graph.add_edge(Edge::between(b, c));
    assert_eq!(components::connected_components(&graph).len(), 1);
}

#[test]
fn strongly_connected_needs_a_return_path() {
    let mut graph = BaseGraph::new("oneway");
    let a = graph.add_node(Node::new("a"));
    let b = graph.add_node(Node::new("b"));
    graph.add_edge(Edge::between(a, b));
    assert_eq!(components::strongly_connected_components(&graph).len(), 2);
    graph.add_edge(Edge::between(b, a));
    assert_eq!(components::strongly_connected_components(&graph).len(), 1);
}

#[test]
fn bridge_is_the_only_link_between_clusters() {
    let mut graph = BaseGraph::new("barbell");
    let a = graph.add_node(Node::new("a"));
    let b = graph.add_node(Node::new("b"));
    let c = graph.add_node(Node::new("c"));
    let d = graph.add_node(Node::new("d"));
    graph.add_edge(Edge::undirected(a, b));
    graph.add_edge(Edge::undirected(b, a));
    let bridge = graph.add_edge(Edge::undirected(b, c));
    graph.add_edge(Edge::undirected(c, d));
    graph.add_edge(Edge::undirected(d, c));
    assert!(components::bridges(&graph).contains(&bridge));
}

#[test]
fn four_cycle_is_enumerated() {
    let mut graph = BaseGraph::new("ring");
    let a = graph.add_node(Node::new("a"));
    let b = graph.add_node(Node::new("b"));
    let c = graph.add_node(Node::new("c"));
    let d = graph.add_node(Node::new("d"));
    graph.add_edge(Edge::between(a, b));
    graph.add_edge(Edge::between(b, c));
    graph.add_edge(Edge::between(c, d));
    graph.add_edge(Edge::between(d, a));
    let mut budget = SearchBudget::default();
    match components::simple_cycles(&graph, 10, &mut budget) {
        SearchOutcome::Found(cycles) => {
            assert_eq!(cycles, vec![vec![a, b, c, d]]);
        }
        other => panic!("expected a cycle, got {other:?}"),
    }
    assert!(properties::is_cyclic(&graph));
}

#[test]
fn acyclic_graph_reports_no_cycles() {
    let mut graph = BaseGraph::new("chain");
    let a = graph.add_node(Node::new("a"));
    let b = graph.add_node(Node::new("b"));
    graph.add_edge(Edge::between(a, b));
    let mut budget = SearchBudget::default();
    assert!(components::simple_cycles(&graph, 10, &mut budget).is_absent());
    assert!(!properties::is_cyclic(&graph));
}

#[test]
fn colouring_gives_neighbours_distinct_colours() {
    let mut graph = BaseGraph::new("triangle");
    let a = graph.add_node(Node::new("a"));
    let b = graph.add_node(Node::new("b"));
    let c = graph.add_node(Node::new("c"));
    graph.add_edge(Edge::undirected(a, b));
    graph.add_edge(Edge::undirected(b, c));
    graph.add_edge(Edge::undirected(c, a));
    let colours = components::greedy_colouring(&graph);
    assert_ne!(colours[&a], colours[&b]);
    assert_ne!(colours[&b], colours[&c]);
    assert_ne!(colours[&a], colours[&c]);
}

#[test]
fn euler_circuit_exists_on_even_degrees() {
    let mut graph = BaseGraph::new("square");
    let a = graph.add_node(Node::new("a"));
    let b = graph.add_node(Node::new("b"));
    let c = graph.add_node(Node::new("c"));
    let d = graph.add_node(Node::new("d"));
    graph.add_edge(Edge::undirected(a, b));
    graph.add_edge(Edge::undirected(b, c));
    graph.add_edge(Edge::undirected(c, d));
    graph.add_edge(Edge::undirected(d, a));
    assert!(euler::has_euler_circuit(&graph));
    let trail = euler::euler_trail(&graph).unwrap();
    assert_eq!(trail.len(), 5);
    assert_eq!(trail.first(), trail.last());
}

#[test]
fn euler_path_needs_two_odd_nodes() {
    let mut graph = BaseGraph::new("path");
    let a = graph.add_node(Node::new("a"));
    let b = graph.add_node(Node::new("b"));
    let c = graph.add_node(Node::new("c"));
    graph.add_edge(Edge::undirected(a, b));
    graph.add_edge(Edge::undirected(b, c));
    assert!(euler::has_euler_path(&graph));
    assert!(!euler::has_euler_circuit(&graph));
}

#[test]
fn hamilton_cycle_on_a_ring() {
    let mut graph = BaseGraph::new("ring");
    let a = graph.add_node(Node::new("a"));
    let b = graph.add_node(Node::new("b"));
    let c = graph.add_node(Node::new("c"));
    graph.add_edge(Edge::undirected(a, b));
    graph.add_edge(Edge::undirected(b, c));
    graph.add_edge(Edge::undirected(c, a));
    let mut budget = SearchBudget::default();
    let cycle = hamilton::hamilton_cycle(&graph, &mut budget).found().unwrap();
    assert_eq!(cycle.len(), 3);
}

#[test]
fn hamilton_path_absent_on_a_star_graph() {
    // Hub with three leaves has no Hamilton path.
    let mut graph = BaseGraph::new("star");
    let hub = graph.add_node(Node::new("hub"));
    for label in ["x", "y", "z"] {
        let leaf = graph.add_node(Node::new(label));
        graph.add_edge(Edge::undirected(hub, leaf));
    }
    let mut budget = SearchBudget::default();
    assert!(hamilton::hamilton_path(&graph, &mut budget).is_absent());
}

#[test]
fn tiny_budget_exhausts_before_deciding() {
    let mut graph = BaseGraph::new("ring");
    let mut ids = Vec::new();
    for label in ["a", "b", "c", "d", "e"] {
        ids.push(graph.add_node(Node::new(label)));
    }
    for pair in ids.windows(2) {
        graph.add_edge(Edge::undirected(pair[0], pair[1]));
    }
    graph.add_edge(Edge::undirected(ids[4], ids[0]));
    let mut budget = SearchBudget::steps(2);
    assert_eq!(
        hamilton::hamilton_cycle(&graph, &mut budget),
        SearchOutcome::Exhausted
    );
}

#[test]
fn k5_fails_the_planarity_screen() {
    let mut graph = BaseGraph::new("k5");
    let mut ids = Vec::new();
    for label in ["a", "b", "c", "d", "e"] {
        ids.push(graph.add_node(Node::new(label)));
    }
    for (i, a) in ids.iter().enumerate() {
        for b in &ids[i + 1..] {
            graph.add_edge(Edge::undirected(*a, *b));
        }
    }
    let mut budget = SearchBudget::default();
    assert_eq!(
        planar::planarity_screen(&graph, &mut budget),
        Planarity::NonPlanar
    );
}

#[test]
fn small_trees_pass_the_planarity_screen() {
    let mut graph = BaseGraph::new("tree");
    let root = graph.add_node(Node::new("root"));
    for label in ["a", "b", "c", "d", "e"] {
        let leaf = graph.add_node(Node::new(label));
        graph.add_edge(Edge::undirected(root, leaf));
    }
    let mut budget = SearchBudget::default();
    assert_eq!(
        planar::planarity_screen(&graph, &mut budget),
        Planarity::Planar
    );
}

#[test]
fn connectivity_report_lists_isolated_nodes() {
    let mut graph = BaseGraph::new("mixed");
    let a = graph.add_node(Node::new("a"));
    let b = graph.add_node(Node::new("b"));
    let lone = graph.add_node(Node::new("lone"));
    graph.add_edge(Edge::between(a, b));
    let report = properties::connectivity(&graph);
    assert!(!report.connected);
    assert_eq!(report.isolated, vec![lone]);
    assert_eq!(report.components.len(), 2);
}
