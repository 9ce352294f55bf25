use poly_core::{Endpoint, NodeId};
use poly_graph::{BaseGraph, Edge, EndpointSets, Node};

#[test]
fn add_and_look_up_nodes_and_edges() {
    let mut graph = BaseGraph::new("ops");
    let a = graph.add_node(Node::new("a"));
    let b = graph.add_node(Node::new("b"));
    let edge = graph.add_edge(Edge::between(a, b));
    assert_eq!(graph.node_count(), 2);
    assert_eq!(graph.edge_count(), 1);
    assert_eq!(graph.node(a).map(|n| n.label.as_str()), Some("a"));
    assert_eq!(graph.edge(edge).map(|e| e.source), Some(Endpoint::Node(a)));
    assert!(graph.node(NodeId::from_raw(99)).is_none());
}

#[test]
fn remove_node_cascades_to_incident_edges() {
    let mut graph = BaseGraph::new("ops");
    let a = graph.add_node(Node::new("a"));
    let b = graph.add_node(Node::new("b"));
    let c = graph.add_node(Node::new("c"));
    graph.add_edge(Edge::between(a, b));
    graph.add_edge(Edge::between(b, c));
    graph.add_edge(Edge::between(a, c));
    graph.remove_node(b).expect("node exists");
    assert_eq!(graph.node_count(), 2);
    assert_eq!(graph.edge_count(), 1);
    assert!(graph.validate().is_empty());
}

#[test]
fn remove_unknown_node_reports_the_id() {
    let mut graph = BaseGraph::new("ops");
    let err = graph.remove_node(NodeId::from_raw(7)).unwrap_err();
    assert_eq!(err.info().code, "unknown-node");
}

#[test]
fn restore_edge_reuses_the_old_identifier() {
    let mut graph = BaseGraph::new("ops");
    let a = graph.add_node(Node::new("a"));
    let b = graph.add_node(Node::new("b"));
    let edge = graph.add_edge(Edge::between(a, b));
    let record = graph.edge(edge).cloned().expect("edge exists");
    graph.remove_edge(edge).expect("edge exists");
    graph.restore_edge(record);
    assert_eq!(graph.edge_ids(), vec![edge]);
    let fresh = graph.add_edge(Edge::between(b, a));
    assert_ne!(fresh, edge);
}

#[test]
fn neighbour_queries_respect_direction() {
    let mut graph = BaseGraph::new("ops");
    let a = graph.add_node(Node::new("a"));
    let b = graph.add_node(Node::new("b"));
    let c = graph.add_node(Node::new("c"));
    graph.add_edge(Edge::between(a, b));
    graph.add_edge(Edge::undirected(a, c));
    assert_eq!(graph.connected_nodes(a), vec![b, c]);
    assert_eq!(graph.connected_nodes(b), Vec::<NodeId>::new());
    assert_eq!(graph.connected_nodes(c), vec![a]);
    assert_eq!(graph.neighbours(b), vec![a]);
    assert_eq!(graph.out_degree(a), 2);
    assert_eq!(graph.in_degree(b), 1);
    assert_eq!(graph.degree(a), 2);
}

#[test]
fn selection_toggles_and_clears() {
    let mut graph = BaseGraph::new("ops");
    let a = graph.add_node(Node::new("a"));
    let b = graph.add_node(Node::new("b"));
    let edge = graph.add_edge(Edge::between(a, b));
    assert!(graph.toggle_node_selection(a));
    assert!(graph.toggle_edge_selection(edge));
    assert!(!graph.toggle_node_selection(a));
    assert!(graph.selected_nodes().is_empty());
    graph.toggle_node_selection(b);
    graph.clear_selection();
    assert!(graph.selected_nodes().is_empty());
    assert!(graph.selected_edges().is_empty());
}

#[test]
fn validate_reports_dangling_endpoints() {
    let mut graph = BaseGraph::new("ops");
    let a = graph.add_node(Node::new("a"));
    graph.add_edge(Edge::between(a, NodeId::from_raw(42)));
    let violations = graph.validate();
    assert_eq!(violations.len(), 1);
    assert!(violations[0].contains("missing node 42"));
}

#[test]
fn validate_rejects_endpoint_sets_missing_the_primary_pair() {
    let mut graph = BaseGraph::new("ops");
    let a = graph.add_node(Node::new("a"));
    let b = graph.add_node(Node::new("b"));
    let c = graph.add_node(Node::new("c"));
    let mut edge = Edge::between(a, b);
    edge.endpoint_sets = Some(EndpointSets::seeded(Endpoint::Node(c), Endpoint::Node(b)));
    graph.add_edge(edge);
    let violations = graph.validate();
    assert_eq!(violations.len(), 1);
    assert!(violations[0].contains("omit the primary source"));
}

#[test]
fn validate_rejects_references_to_plain_edges() {
    let mut graph = BaseGraph::new("ops");
    let a = graph.add_node(Node::new("a"));
    let b = graph.add_node(Node::new("b"));
    let plain = graph.add_edge(Edge::between(a, b));
    graph.add_edge(Edge::from_endpoints(
        Endpoint::Node(a),
        Endpoint::Edge(plain),
        true,
    ));
    let violations = graph.validate();
    assert_eq!(violations.len(), 1);
    assert!(violations[0].contains("not node-capable"));
}
