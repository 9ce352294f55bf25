use poly_dag::{ops, DagGraph};
use poly_graph::Node;
use proptest::prelude::*;

fn triangle() -> (DagGraph, Vec<poly_core::NodeId>) {
    let mut dag = DagGraph::new("triangle");
    let a = dag.add_node(Node::new("A"));
    let b = dag.add_node(Node::new("B"));
    let c = dag.add_node(Node::new("C"));
    dag.add_edge(a, b);
    dag.add_edge(b, c);
    dag.add_edge(a, c);
    (dag, vec![a, b, c])
}

#[test]
fn dependency_triangle_has_a_unique_order() {
    let (dag, ids) = triangle();
    assert_eq!(dag.topological_sort().unwrap(), ids);
    assert_eq!(dag.topological_sort_dfs().unwrap(), ids);
    let (path, length) = ops::critical_path(&dag).unwrap();
    assert_eq!(length, 2);
    assert_eq!(path, ids);
}

#[test]
fn four_node_ring_reports_the_cycle_in_edge_order() {
    let mut dag = DagGraph::new("ring");
    let a = dag.add_node(Node::new("A"));
    let b = dag.add_node(Node::new("B"));
    let c = dag.add_node(Node::new("C"));
    let d = dag.add_node(Node::new("D"));
    dag.add_edge(a, b);
    dag.add_edge(b, c);
    dag.add_edge(c, d);
    dag.add_edge(d, a);
    let cycle = dag.detect_cycle().unwrap();
    assert_eq!(cycle, vec![a, b, c, d]);
    assert!(dag.topological_sort().is_err());
    assert!(!dag.is_dag());
}

#[test]
fn sort_and_is_dag_agree() {
    let (mut dag, ids) = triangle();
    assert_eq!(dag.is_dag(), dag.topological_sort().is_ok());
    dag.add_edge(ids[2], ids[0]);
    assert!(!dag.is_dag());
    assert!(dag.topological_sort().is_err());
}

#[test]
fn add_edge_safe_rolls_back_on_cycle() {
    let (mut dag, ids) = triangle();
    let edges_before = dag.graph().edge_count();
    let result = dag.add_edge_safe(ids[2], ids[0]);
    assert!(result.is_err());
    assert_eq!(dag.graph().edge_count(), edges_before);
    assert!(dag.is_dag());
    assert!(dag.add_edge_safe(ids[0], ids[1]).is_ok());
}

#[test]
fn cycle_error_names_a_start_node() {
    let mut dag = DagGraph::new("loop");
    let a = dag.add_node(Node::new("A"));
    let b = dag.add_node(Node::new("B"));
    dag.add_edge(a, b);
    dag.add_edge(b, a);
    let err = dag.topological_sort().unwrap_err();
    assert_eq!(err.info().code, "cycle-detected");
    assert!(err.info().context.contains_key("start-node"));
}

#[test]
fn sources_sinks_and_reachability() {
    let (dag, ids) = triangle();
    assert_eq!(dag.sources(), vec![ids[0]]);
    assert_eq!(dag.sinks(), vec![ids[2]]);
    assert_eq!(dag.ancestors(ids[2]), vec![ids[0], ids[1]]);
    assert_eq!(dag.descendants(ids[0]), vec![ids[1], ids[2]]);
}

#[test]
fn layers_follow_longest_distance_from_sources() {
    let (dag, ids) = triangle();
    let layers = ops::layers(&dag).unwrap();
    assert_eq!(layers, vec![vec![ids[0]], vec![ids[1]], vec![ids[2]]]);
}

#[test]
fn shortest_path_skips_the_middle_node() {
    let (dag, ids) = triangle();
    let path = ops::shortest_path(&dag, ids[0], ids[2]).unwrap().unwrap();
    assert_eq!(path, vec![ids[0], ids[2]]);
    assert_eq!(ops::shortest_path(&dag, ids[2], ids[0]).unwrap(), None);
}

#[test]
fn transitive_closure_and_path_counts() {
    let (dag, ids) = triangle();
    let closure = ops::transitive_closure(&dag).unwrap();
    assert!(closure[&ids[0]].contains(&ids[2]));
    assert!(closure[&ids[2]].is_empty());
    assert_eq!(ops::count_paths(&dag, ids[0], ids[2]).unwrap(), 2);
    assert_eq!(ops::count_paths(&dag, ids[1], ids[0]).unwrap(), 0);
}

#[test]
fn minimum_height_picks_the_shallowest_source() {
    let mut dag = DagGraph::new("two-sources");
    let a = dag.add_node(Node::new("a"));
    let b = dag.add_node(Node::new("b"));
    let c = dag.add_node(Node::new("c"));
    let d = dag.add_node(Node::new("d"));
    dag.add_edge(a, b);
    dag.add_edge(b, c);
    dag.add_edge(d, c);
    assert_eq!(ops::minimum_height(&dag).unwrap(), 1);
}

#[test]
fn undirected_edge_is_a_violation() {
    let mut dag = DagGraph::new("mixed");
    let a = dag.add_node(Node::new("a"));
    let b = dag.add_node(Node::new("b"));
    dag.graph_mut()
        .add_edge(poly_graph::Edge::undirected(a, b));
    assert!(!dag.validate().is_empty());
}

proptest! {
    #[test]
    fn random_forward_edges_always_sort(n in 2usize..10, picks in proptest::collection::vec((0usize..10, 0usize..10), 0..20)) {
        let mut dag = DagGraph::new("forward");
        let mut ids = Vec::new();
        for i in 0..n {
            ids.push(dag.add_node(Node::new(format!("n{i}"))));
        }
        for (a, b) in picks {
            let (a, b) = (a % n, b % n);
            if a < b {
                dag.add_edge(ids[a], ids[b]);
            }
        }
        let order = dag.topological_sort();
        prop_assert!(order.is_ok());
        prop_assert_eq!(order.unwrap().len(), n);
        prop_assert!(dag.is_dag());
    }
}
