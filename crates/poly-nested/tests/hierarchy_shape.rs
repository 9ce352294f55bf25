use poly_graph::{Edge, Node};
use poly_nested::NestedGraph;

#[test]
fn attach_and_detach_subgraphs() {
    let mut nested = NestedGraph::new("world");
    let root = nested.root();
    let city = nested.add_node(root, Node::new("city")).unwrap();
    let district = nested.attach_subgraph(root, city).unwrap();
    let block = nested.add_node(district, Node::new("block")).unwrap();
    let street = nested.attach_subgraph(district, block).unwrap();
    nested.add_node(street, Node::new("house")).unwrap();

    assert_eq!(nested.subgraph_of(root, city), Some(district));
    assert_eq!(nested.owner_of(street), Some((district, block)));
    assert!(nested.validate().is_empty());

    // A node owns at most one subgraph.
    assert!(nested.attach_subgraph(root, city).is_err());

    // Detaching drops the whole branch.
    nested.detach_subgraph(root, city).unwrap();
    assert!(nested.graph(district).is_none());
    assert!(nested.graph(street).is_none());
    assert!(nested.validate().is_empty());
}

#[test]
fn flatten_qualifies_labels_with_owner_paths() {
    let mut nested = NestedGraph::new("world");
    let root = nested.root();
    let a = nested.add_node(root, Node::new("a")).unwrap();
    let b = nested.add_node(root, Node::new("b")).unwrap();
    nested.add_edge(root, Edge::between(a, b)).unwrap();
    let inner = nested.attach_subgraph(root, a).unwrap();
    let x = nested.add_node(inner, Node::new("x")).unwrap();
    let y = nested.add_node(inner, Node::new("y")).unwrap();
    nested.add_edge(inner, Edge::between(x, y)).unwrap();

    let flat = nested.flatten();
    assert_eq!(flat.node_count(), 4);
    assert_eq!(flat.edge_count(), 2);
    let labels: Vec<String> = flat.nodes().map(|n| n.label.clone()).collect();
    assert!(labels.contains(&"a".to_string()));
    assert!(labels.contains(&"a > x".to_string()));
    assert!(labels.contains(&"a > y".to_string()));
}

#[test]
fn traverse_reports_nesting_levels() {
    let mut nested = NestedGraph::new("levels");
    let root = nested.root();
    let a = nested.add_node(root, Node::new("a")).unwrap();
    let inner = nested.attach_subgraph(root, a).unwrap();
    nested.add_node(inner, Node::new("x")).unwrap();
    nested.add_node(root, Node::new("b")).unwrap();

    let mut seen = Vec::new();
    nested.traverse(|_, node, level| seen.push((node, level)));
    let levels: Vec<usize> = seen.iter().map(|(_, level)| *level).collect();
    assert_eq!(levels, vec![0, 1, 0]);
}

#[test]
fn validation_reports_nested_violations_with_the_graph_name() {
    let mut nested = NestedGraph::new("broken");
    let root = nested.root();
    let a = nested.add_node(root, Node::new("a")).unwrap();
    let inner = nested.attach_subgraph(root, a).unwrap();
    let x = nested.add_node(inner, Node::new("x")).unwrap();
    // Dangling edge inside the child graph.
    nested
        .add_edge(inner, Edge::between(x, poly_core::NodeId::from_raw(999)))
        .unwrap();
    let violations = nested.validate();
    assert_eq!(violations.len(), 1);
    assert!(violations[0].starts_with("a: "));
}
