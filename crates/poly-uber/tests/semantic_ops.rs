use std::collections::BTreeMap;

use poly_core::Endpoint;
use poly_graph::Node;
use poly_uber::semantic::{self, EdgePattern, Inference, Rule};
use poly_uber::{ProvenanceLog, Ubergraph, SIMILARITY_THRESHOLD};

fn label_similarity(a: &Node, b: &Node) -> f64 {
    if a.label == b.label {
        1.0
    } else {
        0.0
    }
}

#[test]
fn semantic_match_pairs_similar_nodes() {
    let mut graph = Ubergraph::new("world");
    let ga = graph.add_node(Node::new("cat"));
    let gb = graph.add_node(Node::new("dog"));
    let mut pattern = Ubergraph::new("pattern");
    let pa = pattern.add_node(Node::new("dog"));

    let matches = semantic::semantic_match(&graph, &pattern, label_similarity, SIMILARITY_THRESHOLD);
    assert_eq!(matches, vec![BTreeMap::from([(pa, gb)])]);
    let _ = ga;
}

#[test]
fn semantic_match_returns_every_mapping() {
    let mut graph = Ubergraph::new("twins");
    let first = graph.add_node(Node::new("x"));
    let second = graph.add_node(Node::new("x"));
    let mut pattern = Ubergraph::new("pattern");
    let p = pattern.add_node(Node::new("x"));

    let matches = semantic::semantic_match(&graph, &pattern, label_similarity, 0.8);
    assert_eq!(matches.len(), 2);
    assert_eq!(matches[0][&p], first);
    assert_eq!(matches[1][&p], second);
}

#[test]
fn dissimilar_nodes_never_match() {
    let mut graph = Ubergraph::new("world");
    graph.add_node(Node::new("cat"));
    let mut pattern = Ubergraph::new("pattern");
    pattern.add_node(Node::new("dog"));
    assert!(semantic::semantic_match(&graph, &pattern, label_similarity, 0.8).is_empty());
}

#[test]
fn inference_rules_derive_expected_facts() {
    let mut graph = Ubergraph::new("facts");
    let a = graph.add_node(Node::new("a"));
    let b = graph.add_node(Node::new("b"));
    let c = graph.add_node(Node::new("c"));
    let first = graph.link(Endpoint::Node(a), Endpoint::Node(b)).unwrap();
    let second = graph.link(Endpoint::Node(b), Endpoint::Node(c)).unwrap();
    for id in [first, second] {
        if let Some(edge) = graph.graph_mut().edge_mut(id) {
            edge.metadata.insert("type".to_string(), "ancestor-of".to_string());
        }
    }

    let facts = semantic::infer(
        &graph,
        &[
            Rule::Subclass {
                class_a: "ancestor-of".to_string(),
                class_b: "related-to".to_string(),
            },
            Rule::Transitive {
                relation: "ancestor-of".to_string(),
            },
            Rule::Symmetric {
                relation: "ancestor-of".to_string(),
            },
        ],
    );

    let subclasses = facts
        .iter()
        .filter(|fact| matches!(fact, Inference::Subclass { .. }))
        .count();
    assert_eq!(subclasses, 2);
    assert!(facts.contains(&Inference::Transitive {
        first,
        second,
        source: Endpoint::Node(a),
        target: Endpoint::Node(c),
    }));
    assert!(facts.contains(&Inference::Symmetric {
        edge: first,
        source: Endpoint::Node(b),
        target: Endpoint::Node(a),
    }));
}

#[test]
fn provenance_log_orders_events_per_entity() {
    let mut graph = Ubergraph::new("history");
    let mut node = Node::new("tracked");
    node.metadata.insert("created-at".to_string(), "t0".to_string());
    node.metadata.insert("created-by".to_string(), "ada".to_string());
    let id = graph.add_node(node);

    let mut log = ProvenanceLog::seed_from_graph(&graph);
    log.record(
        Endpoint::Node(id),
        "modified",
        Some("t1".to_string()),
        Some("ada".to_string()),
    );

    let history = log.history(Endpoint::Node(id));
    assert_eq!(history.len(), 2);
    assert_eq!(history[0].operation, "created");
    assert_eq!(history[0].timestamp.as_deref(), Some("t0"));
    assert_eq!(history[1].operation, "modified");
    assert!(log.history(Endpoint::Node(poly_core::NodeId::from_raw(99))).is_empty());
}

#[test]
fn multigraph_traversal_visits_each_edge_once() {
    let mut graph = Ubergraph::new("multi");
    let a = graph.add_node(Node::new("a"));
    let b = graph.add_node(Node::new("b"));
    let fast = graph.link(Endpoint::Node(a), Endpoint::Node(b)).unwrap();
    let slow = graph.link(Endpoint::Node(a), Endpoint::Node(b)).unwrap();
    let back = graph.link(Endpoint::Node(b), Endpoint::Node(a)).unwrap();

    let hops = semantic::multigraph_traversal(&graph, a, |_| true);
    let edges: Vec<_> = hops.iter().map(|hop| hop.2).collect();
    assert_eq!(edges.len(), 3);
    assert!(edges.contains(&fast));
    assert!(edges.contains(&slow));
    assert!(edges.contains(&back));
}

#[test]
fn multigraph_traversal_honours_the_filter() {
    let mut graph = Ubergraph::new("filtered");
    let a = graph.add_node(Node::new("a"));
    let b = graph.add_node(Node::new("b"));
    let c = graph.add_node(Node::new("c"));
    let keep = graph.link(Endpoint::Node(a), Endpoint::Node(b)).unwrap();
    let skip = graph.link(Endpoint::Node(b), Endpoint::Node(c)).unwrap();

    let hops = semantic::multigraph_traversal(&graph, a, |edge| edge.id() != skip);
    assert_eq!(hops, vec![(a, b, keep)]);
}

#[test]
fn edge_patterns_match_nested_structure() {
    let mut graph = Ubergraph::new("nested");
    let a = graph.add_node(Node::new("a"));
    let b = graph.add_node(Node::new("b"));
    let c = graph.add_node(Node::new("c"));
    let base = graph.link(Endpoint::Node(a), Endpoint::Node(b)).unwrap();
    graph.promote(base).unwrap();
    graph.link(Endpoint::Node(c), Endpoint::Edge(base)).unwrap();

    let pattern = EdgePattern {
        node_capable: Some(true),
        nested: Some(vec![EdgePattern {
            directed: Some(true),
            ..EdgePattern::default()
        }]),
        ..EdgePattern::default()
    };
    assert_eq!(semantic::match_edges(&graph, &pattern), vec![base]);

    let two_deep = EdgePattern {
        nested: Some(vec![EdgePattern::default(), EdgePattern::default()]),
        ..EdgePattern::default()
    };
    assert!(semantic::match_edges(&graph, &two_deep).is_empty());
}
