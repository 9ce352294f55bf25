use poly_core::Endpoint;
use poly_graph::Node;
use poly_uber::Ubergraph;

fn sample() -> (Ubergraph, Vec<poly_core::NodeId>) {
    let mut uber = Ubergraph::new("sample");
    let ids: Vec<_> = ["a", "b", "c"]
        .into_iter()
        .map(|label| uber.add_node(Node::new(label)))
        .collect();
    (uber, ids)
}

#[test]
fn linking_to_a_plain_edge_is_rejected() {
    let (mut uber, ids) = sample();
    let plain = uber
        .link(Endpoint::Node(ids[0]), Endpoint::Node(ids[1]))
        .unwrap();
    let err = uber
        .link(Endpoint::Node(ids[2]), Endpoint::Edge(plain))
        .unwrap_err();
    assert_eq!(err.info().code, "edge-not-node-capable");
}

#[test]
fn promotion_allows_edges_as_endpoints() {
    let (mut uber, ids) = sample();
    let base = uber
        .link(Endpoint::Node(ids[0]), Endpoint::Node(ids[1]))
        .unwrap();
    uber.promote(base).unwrap();
    assert!(uber.is_edge_node(base));

    let attaching = uber
        .link(Endpoint::Node(ids[2]), Endpoint::Edge(base))
        .unwrap();
    assert!(uber.validate().is_empty());
    let referencing: Vec<_> = uber.edges_to_edge(base).iter().map(|e| e.id()).collect();
    assert_eq!(referencing, vec![attaching]);
}

#[test]
fn demotion_fails_while_referenced() {
    let (mut uber, ids) = sample();
    let base = uber
        .link(Endpoint::Node(ids[0]), Endpoint::Node(ids[1]))
        .unwrap();
    uber.promote(base).unwrap();
    let attaching = uber
        .link(Endpoint::Node(ids[2]), Endpoint::Edge(base))
        .unwrap();

    let err = uber.demote(base).unwrap_err();
    assert_eq!(err.info().code, "edge-still-referenced");

    uber.graph_mut().remove_edge(attaching).unwrap();
    uber.demote(base).unwrap();
    assert!(!uber.is_edge_node(base));
}

#[test]
fn unchecked_edits_surface_through_validation() {
    let (mut uber, ids) = sample();
    let plain = uber
        .link(Endpoint::Node(ids[0]), Endpoint::Node(ids[1]))
        .unwrap();
    uber.graph_mut().add_edge(poly_graph::Edge::from_endpoints(
        Endpoint::Node(ids[2]),
        Endpoint::Edge(plain),
        true,
    ));
    assert!(!uber.validate().is_empty());
}

#[test]
fn connection_points_follow_their_edges() {
    let (mut uber, ids) = sample();
    let base = uber
        .link(Endpoint::Node(ids[0]), Endpoint::Node(ids[1]))
        .unwrap();
    uber.promote(base).unwrap();
    let attaching = uber
        .link(Endpoint::Node(ids[2]), Endpoint::Edge(base))
        .unwrap();

    uber.add_connection_point(base, attaching, (0.5, 0.0)).unwrap();
    assert!(uber.validate().is_empty());

    // A stale anchor is a violation, not an error.
    uber.graph_mut().remove_edge(attaching).unwrap();
    assert_eq!(uber.validate().len(), 1);
    uber.remove_connection_point(base, attaching).unwrap();
    assert!(uber.validate().is_empty());
}

#[test]
fn connection_points_require_the_node_role() {
    let (mut uber, ids) = sample();
    let base = uber
        .link(Endpoint::Node(ids[0]), Endpoint::Node(ids[1]))
        .unwrap();
    let other = uber
        .link(Endpoint::Node(ids[1]), Endpoint::Node(ids[2]))
        .unwrap();
    let err = uber.add_connection_point(base, other, (0.0, 0.0)).unwrap_err();
    assert_eq!(err.info().code, "edge-not-node-capable");
}
