use std::collections::BTreeSet;

use poly_graph::{BaseGraph, Edge, Node};
use poly_nested::{ops, NestedGraph};

fn triangle() -> (BaseGraph, Vec<poly_core::NodeId>) {
    let mut graph = BaseGraph::new("triangle");
    let ids: Vec<_> = ["a", "b", "c"]
        .into_iter()
        .map(|label| graph.add_node(Node::new(label)))
        .collect();
    graph.add_edge(Edge::between(ids[0], ids[1]));
    graph.add_edge(Edge::between(ids[1], ids[2]));
    graph.add_edge(Edge::between(ids[2], ids[0]));
    (graph, ids)
}

#[test]
fn pattern_matches_a_directed_chain() {
    let (target, ids) = triangle();
    let mut pattern = BaseGraph::new("chain");
    let p = pattern.add_node(Node::new("p"));
    let q = pattern.add_node(Node::new("q"));
    pattern.add_edge(Edge::between(p, q));

    let mapping = ops::match_pattern(&pattern, &target).unwrap();
    assert_eq!(mapping.len(), 2);
    let from = mapping[&p];
    let to = mapping[&q];
    assert!(target.edges_from(from).iter().any(|e| e.target_nodes().contains(&to)));
    let _ = ids;
}

#[test]
fn pattern_larger_than_target_never_matches() {
    let mut target = BaseGraph::new("small");
    target.add_node(Node::new("only"));
    let (pattern, _) = triangle();
    assert!(ops::match_pattern(&pattern, &target).is_none());
}

#[test]
fn pattern_respects_edge_direction() {
    let mut target = BaseGraph::new("line");
    let a = target.add_node(Node::new("a"));
    let b = target.add_node(Node::new("b"));
    target.add_edge(Edge::between(a, b));

    let mut pattern = BaseGraph::new("back");
    let p = pattern.add_node(Node::new("p"));
    let q = pattern.add_node(Node::new("q"));
    pattern.add_edge(Edge::between(p, q));
    pattern.add_edge(Edge::between(q, p));
    assert!(ops::match_pattern(&pattern, &target).is_none());
}

#[test]
fn find_pattern_searches_member_graphs() {
    let mut nested = NestedGraph::new("search");
    let root = nested.root();
    let holder = nested.add_node(root, Node::new("holder")).unwrap();
    let inner = nested.attach_subgraph(root, holder).unwrap();
    let x = nested.add_node(inner, Node::new("x")).unwrap();
    let y = nested.add_node(inner, Node::new("y")).unwrap();
    nested.add_edge(inner, Edge::between(x, y)).unwrap();

    let mut pattern = BaseGraph::new("arrow");
    let p = pattern.add_node(Node::new("p"));
    let q = pattern.add_node(Node::new("q"));
    pattern.add_edge(Edge::between(p, q));

    let (found_in, mapping) = ops::find_pattern(&nested, &pattern).unwrap();
    assert_eq!(found_in, inner);
    assert_eq!(mapping[&p], x);
    assert_eq!(mapping[&q], y);
}

#[test]
fn clustering_groups_connected_regions() {
    let mut graph = BaseGraph::new("two-islands");
    let a = graph.add_node(Node::new("a"));
    let b = graph.add_node(Node::new("b"));
    let c = graph.add_node(Node::new("c"));
    let x = graph.add_node(Node::new("x"));
    let y = graph.add_node(Node::new("y"));
    graph.add_edge(Edge::undirected(a, b));
    graph.add_edge(Edge::undirected(b, c));
    graph.add_edge(Edge::undirected(x, y));

    let clusters = ops::cluster(&graph, 2);
    assert_eq!(clusters.len(), 2);
    let as_sets: Vec<BTreeSet<_>> = clusters;
    assert!(as_sets.contains(&BTreeSet::from([a, b, c])));
    assert!(as_sets.contains(&BTreeSet::from([x, y])));
}

fn city_world() -> (NestedGraph, Vec<(poly_core::GraphId, poly_core::NodeId)>) {
    let mut nested = NestedGraph::new("world");
    let root = nested.root();
    let city = nested.add_node(root, Node::new("city")).unwrap();
    let town = nested.add_node(root, Node::new("town")).unwrap();
    let city_graph = nested.attach_subgraph(root, city).unwrap();
    let park = nested.add_node(city_graph, Node::new("park")).unwrap();
    let mall = nested.add_node(city_graph, Node::new("mall")).unwrap();
    let town_graph = nested.attach_subgraph(root, town).unwrap();
    let square = nested.add_node(town_graph, Node::new("park")).unwrap();
    let hits = vec![
        (root, city),
        (root, town),
        (city_graph, park),
        (city_graph, mall),
        (town_graph, square),
    ];
    (nested, hits)
}

#[test]
fn query_matches_labels_level_by_level() {
    let (nested, hits) = city_world();
    assert_eq!(ops::query(&nested, "/city/park"), vec![hits[2]]);
    assert_eq!(ops::query(&nested, "/city/mall"), vec![hits[3]]);
    assert!(ops::query(&nested, "/city/harbour").is_empty());
}

#[test]
fn query_wildcard_spans_one_level() {
    let (nested, hits) = city_world();
    let parks = ops::query(&nested, "/*/park");
    assert_eq!(parks, vec![hits[2], hits[4]]);
}

#[test]
fn query_recursive_descent_spans_all_levels() {
    let (nested, hits) = city_world();
    let everything = ops::query(&nested, "/**");
    assert_eq!(everything.len(), hits.len());
}

#[test]
fn query_parent_steps_back_to_the_owner() {
    let (nested, hits) = city_world();
    let owner = ops::query(&nested, "/city/park/..");
    assert_eq!(owner, vec![hits[0]]);
}
