use poly_graph::{BaseGraph, Edge, Node, PropertyExpression, Requirement, Restriction};

fn path(n: usize) -> BaseGraph {
    let mut graph = BaseGraph::new("path");
    let nodes: Vec<_> = (0..n)
        .map(|i| graph.add_node(Node::new(i.to_string())))
        .collect();
    for pair in nodes.windows(2) {
        graph.add_edge(Edge::between(pair[0], pair[1]));
    }
    graph
}

fn cycle(n: usize) -> BaseGraph {
    let mut graph = path(n);
    let ids = graph.node_ids();
    if let (Some(first), Some(last)) = (ids.first(), ids.last()) {
        graph.add_edge(Edge::between(*last, *first));
    }
    graph
}

#[test]
fn self_loop_restriction() {
    let mut graph = BaseGraph::new("g");
    let a = graph.add_node(Node::new("a"));
    graph.add_edge(Edge::between(a, a));
    graph.constraints_mut().restrict(Restriction::NoSelfLoops);
    let violations = graph.validate();
    assert_eq!(violations.len(), 1);
    assert!(violations[0].contains("self loop"));
}

#[test]
fn parallel_edge_restriction_ignores_direction_for_undirected_pairs() {
    let mut graph = BaseGraph::new("g");
    let a = graph.add_node(Node::new("a"));
    let b = graph.add_node(Node::new("b"));
    graph.add_edge(Edge::undirected(a, b));
    graph.add_edge(Edge::undirected(b, a));
    graph.constraints_mut().restrict(Restriction::NoParallelEdges);
    assert_eq!(graph.validate().len(), 1);
}

#[test]
fn simple_restriction_reports_both_failures() {
    let mut graph = BaseGraph::new("g");
    let a = graph.add_node(Node::new("a"));
    let b = graph.add_node(Node::new("b"));
    graph.add_edge(Edge::between(a, a));
    graph.add_edge(Edge::between(a, b));
    graph.add_edge(Edge::between(a, b));
    graph.constraints_mut().restrict(Restriction::Simple);
    assert_eq!(graph.validate().len(), 2);
}

#[test]
fn direction_restrictions() {
    let mut graph = BaseGraph::new("g");
    let a = graph.add_node(Node::new("a"));
    let b = graph.add_node(Node::new("b"));
    graph.add_edge(Edge::undirected(a, b));
    graph.constraints_mut().restrict(Restriction::Directed);
    assert_eq!(graph.validate().len(), 1);
    graph.constraints_mut().restrictions.clear();
    graph.constraints_mut().restrict(Restriction::Undirected);
    assert!(graph.validate().is_empty());
}

#[test]
fn acyclic_restriction_finds_directed_cycles() {
    let mut graph = cycle(3);
    graph.constraints_mut().restrict(Restriction::Acyclic);
    assert_eq!(graph.validate().len(), 1);
    let mut dag = path(3);
    dag.constraints_mut().restrict(Restriction::Acyclic);
    assert!(dag.validate().is_empty());
}

#[test]
fn connectivity_restrictions() {
    let mut graph = path(3);
    graph.add_node(Node::new("island"));
    graph.constraints_mut().restrict(Restriction::Connected);
    assert_eq!(graph.validate().len(), 1);

    let mut ring = cycle(4);
    ring.constraints_mut().restrict(Restriction::StronglyConnected);
    assert!(ring.validate().is_empty());
    let mut line = path(4);
    line.constraints_mut().restrict(Restriction::StronglyConnected);
    assert_eq!(line.validate().len(), 1);
}

#[test]
fn degree_requirements() {
    let mut graph = path(3);
    graph.constraints_mut().require(Requirement::MinDegree(2));
    // Both endpoints of the path have degree 1.
    assert_eq!(graph.validate().len(), 2);
    graph.constraints_mut().requirements.clear();
    graph.constraints_mut().require(Requirement::MaxOutDegree(1));
    assert!(graph.validate().is_empty());
}

#[test]
fn euler_requirements() {
    let mut ring = cycle(4);
    ring.constraints_mut().require(Requirement::EulerCircuit);
    assert!(ring.validate().is_empty());

    let mut line = path(4);
    line.constraints_mut().require(Requirement::EulerPath);
    assert!(line.validate().is_empty());
    line.constraints_mut().requirements.clear();
    line.constraints_mut().require(Requirement::EulerCircuit);
    assert_eq!(line.validate().len(), 1);
}

#[test]
fn hamilton_requirements() {
    let mut ring = cycle(5);
    ring.constraints_mut().require(Requirement::HamiltonCycle);
    assert!(ring.validate().is_empty());

    let mut star = BaseGraph::new("star");
    let hub = star.add_node(Node::new("hub"));
    for i in 0..3 {
        let leaf = star.add_node(Node::new(i.to_string()));
        star.add_edge(Edge::undirected(hub, leaf));
    }
    star.constraints_mut().require(Requirement::HamiltonPath);
    assert_eq!(star.validate().len(), 1);
}

#[test]
fn binary_tree_requirements() {
    let mut tree = BaseGraph::new("tree");
    let root = tree.add_node(Node::new("root"));
    let left = tree.add_node(Node::new("left"));
    let right = tree.add_node(Node::new("right"));
    tree.add_edge(Edge::between(root, left));
    tree.add_edge(Edge::between(root, right));
    tree.constraints_mut().require(Requirement::PerfectBinaryTree);
    assert!(tree.validate().is_empty());

    let extra = tree.add_node(Node::new("extra"));
    tree.add_edge(Edge::between(left, extra));
    // One child under `left` breaks fullness, and leaves now sit at two depths.
    assert_eq!(tree.validate().len(), 2);
    tree.constraints_mut().requirements.clear();
    tree.constraints_mut().require(Requirement::CompleteBinaryTree);
    assert!(tree.validate().is_empty());
    tree.constraints_mut().requirements.clear();
    tree.constraints_mut().require(Requirement::FullBinaryTree);
    assert_eq!(tree.validate().len(), 1);
}

#[test]
fn balanced_tree_requirement() {
    let mut tree = BaseGraph::new("tree");
    let root = tree.add_node(Node::new("root"));
    let short = tree.add_node(Node::new("short"));
    let long = tree.add_node(Node::new("long"));
    let mid = tree.add_node(Node::new("mid"));
    let deep = tree.add_node(Node::new("deep"));
    tree.add_edge(Edge::between(root, short));
    tree.add_edge(Edge::between(root, long));
    tree.add_edge(Edge::between(long, mid));
    tree.add_edge(Edge::between(mid, deep));
    tree.constraints_mut().require(Requirement::BalancedTree);
    assert_eq!(tree.validate().len(), 1);
}

#[test]
fn flow_network_requirement() {
    let mut flow = path(3);
    flow.constraints_mut().require(Requirement::FlowNetwork);
    assert!(flow.validate().is_empty());

    let mut twin = path(3);
    let ids = twin.node_ids();
    twin.add_edge(Edge::between(ids[2], ids[1]));
    twin.constraints_mut().require(Requirement::FlowNetwork);
    assert!(!twin.validate().is_empty());
}

#[test]
fn regular_complete_and_tournament_requirements() {
    let mut ring = cycle(4);
    ring.constraints_mut().require(Requirement::Regular);
    assert!(ring.validate().is_empty());

    let mut triangle = cycle(3);
    triangle.constraints_mut().require(Requirement::Complete);
    assert!(triangle.validate().is_empty());
    triangle.constraints_mut().requirements.clear();
    triangle.constraints_mut().require(Requirement::Tournament);
    assert!(triangle.validate().is_empty());

    let mut both_ways = BaseGraph::new("g");
    let a = both_ways.add_node(Node::new("a"));
    let b = both_ways.add_node(Node::new("b"));
    both_ways.add_edge(Edge::between(a, b));
    both_ways.add_edge(Edge::between(b, a));
    both_ways.constraints_mut().require(Requirement::Tournament);
    assert_eq!(both_ways.validate().len(), 1);
}

#[test]
fn property_expressions_combine_constraints() {
    let graph = path(4);
    let connected = PropertyExpression::Restriction(Restriction::Connected);
    let acyclic = PropertyExpression::Restriction(Restriction::Acyclic);
    let complete = PropertyExpression::Requirement(Requirement::Complete);

    assert!(connected.evaluate(&graph));
    assert!(!complete.evaluate(&graph));
    assert!(PropertyExpression::All(vec![connected.clone(), acyclic]).evaluate(&graph));
    assert!(PropertyExpression::Any(vec![complete.clone(), connected]).evaluate(&graph));
    assert!(PropertyExpression::Not(Box::new(complete)).evaluate(&graph));
}

#[test]
fn implication_holds_vacuously_when_the_antecedent_fails() {
    let acyclic_means_complete = PropertyExpression::implies(
        PropertyExpression::Restriction(Restriction::Acyclic),
        PropertyExpression::Requirement(Requirement::Complete),
    );
    // A 4-cycle fails the antecedent, so the implication holds.
    assert!(acyclic_means_complete.evaluate(&cycle(4)));
    // A path is acyclic but not complete.
    assert!(!acyclic_means_complete.evaluate(&path(3)));
}
