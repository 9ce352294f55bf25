//! Declarative structural constraints and their evaluation engine.
//!
//! A graph declares a set of restrictions (shapes it must not have) and
//! requirements (properties it must have). [`ConstraintSet::evaluate`] checks
//! only the declared subset and returns one human-readable violation string
//! per failure, naming the offending node or edge where applicable.

use std::collections::{BTreeMap, BTreeSet, VecDeque};

use poly_core::NodeId;
use serde::{Deserialize, Serialize};

use crate::base::BaseGraph;

/// Backtracking step cap for the Hamilton existence requirements. The search
/// is exact up to this many expansions; beyond it the requirement reports an
/// inconclusive violation instead of running unbounded.
pub const HAMILTON_STEP_CAP: u64 = 1_000_000;

/// Shape prohibitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Restriction {
    /// No edge may connect a node to itself.
    NoSelfLoops,
    /// No two edges may share the same primary endpoint pair.
    NoParallelEdges,
    /// No self loops and no parallel edges.
    Simple,
    /// Every edge must be directed.
    Directed,
    /// Every edge must be undirected.
    Undirected,
    /// The directed edges must not form a cycle.
    Acyclic,
    /// The graph must be connected ignoring direction.
    Connected,
    /// Every node must reach every other node following direction.
    StronglyConnected,
}

/// Mandated properties.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Requirement {
    /// Every node's total degree is at least the bound.
    MinDegree(usize),
    /// Every node's total degree is at most the bound.
    MaxDegree(usize),
    /// Every node's inbound degree is at least the bound.
    MinInDegree(usize),
    /// Every node's inbound degree is at most the bound.
    MaxInDegree(usize),
    /// Every node's outbound degree is at least the bound.
    MinOutDegree(usize),
    /// Every node's outbound degree is at most the bound.
    MaxOutDegree(usize),
    /// An Euler path must exist (0 or 2 odd-degree nodes, connected).
    EulerPath,
    /// An Euler circuit must exist (all degrees even, connected).
    EulerCircuit,
    /// A Hamilton path must exist (exact search, bounded).
    HamiltonPath,
    /// A Hamilton cycle must exist (exact search, bounded).
    HamiltonCycle,
    /// Rooted shape with at most two children per node.
    BinaryTree,
    /// Binary tree where every node has zero or two children.
    FullBinaryTree,
    /// Full binary tree with all leaves at the same depth.
    PerfectBinaryTree,
    /// Binary tree filled level by level, left to right.
    CompleteBinaryTree,
    /// Tree whose subtree heights differ by at most one everywhere.
    BalancedTree,
    /// Directed shape with exactly one source and one sink.
    FlowNetwork,
    /// All nodes share the same total degree.
    Regular,
    /// Every unordered node pair is adjacent.
    Complete,
    /// Exactly one directed edge between every unordered node pair.
    Tournament,
}

/// The declared constraint set of a graph.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ConstraintSet {
    /// Declared restrictions.
    #[serde(default)]
    pub restrictions: BTreeSet<Restriction>,
    /// Declared requirements.
    #[serde(default)]
    pub requirements: BTreeSet<Requirement>,
}

impl ConstraintSet {
    /// Declares a restriction.
    pub fn restrict(&mut self, restriction: Restriction) -> &mut Self {
        self.restrictions.insert(restriction);
        self
    }

    /// Declares a requirement.
    pub fn require(&mut self, requirement: Requirement) -> &mut Self {
        self.requirements.insert(requirement);
        self
    }

    /// Evaluates the declared subset against the graph.
    pub fn evaluate(&self, graph: &BaseGraph) -> Vec<String> {
        let mut violations = Vec::new();
        for restriction in &self.restrictions {
            check_restriction(*restriction, graph, &mut violations);
        }
        for requirement in &self.requirements {
            check_requirement(*requirement, graph, &mut violations);
        }
        violations
    }
}

/// A boolean combination of restrictions and requirements, evaluated as a
/// whole against a graph. Leaves hold a single constraint and are satisfied
/// when that constraint alone produces no violations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PropertyExpression {
    /// A single shape prohibition.
    Restriction(Restriction),
    /// A single mandated property.
    Requirement(Requirement),
    /// Satisfied when the inner expression is not.
    Not(Box<PropertyExpression>),
    /// Satisfied when every inner expression is. Empty lists are satisfied.
    All(Vec<PropertyExpression>),
    /// Satisfied when at least one inner expression is.
    Any(Vec<PropertyExpression>),
}

impl PropertyExpression {
    /// `antecedent -> consequent`, desugared to `(not antecedent) or
    /// consequent`.
    pub fn implies(antecedent: PropertyExpression, consequent: PropertyExpression) -> Self {
        PropertyExpression::Any(vec![PropertyExpression::Not(Box::new(antecedent)), consequent])
    }

    /// Whether the graph satisfies the expression.
    pub fn evaluate(&self, graph: &BaseGraph) -> bool {
        match self {
            PropertyExpression::Restriction(restriction) => {
                let mut violations = Vec::new();
                check_restriction(*restriction, graph, &mut violations);
                violations.is_empty()
            }
            PropertyExpression::Requirement(requirement) => {
                let mut violations = Vec::new();
                check_requirement(*requirement, graph, &mut violations);
                violations.is_empty()
            }
            PropertyExpression::Not(inner) => !inner.evaluate(graph),
            PropertyExpression::All(terms) => terms.iter().all(|term| term.evaluate(graph)),
            PropertyExpression::Any(terms) => terms.iter().any(|term| term.evaluate(graph)),
        }
    }
}

fn check_restriction(restriction: Restriction, graph: &BaseGraph, out: &mut Vec<String>) {
    match restriction {
        Restriction::NoSelfLoops => check_no_self_loops(graph, out),
        Restriction::NoParallelEdges => check_no_parallel_edges(graph, out),
        Restriction::Simple => {
            check_no_self_loops(graph, out);
            check_no_parallel_edges(graph, out);
        }
        Restriction::Directed => {
            for edge in graph.edges() {
                if !edge.directed {
                    out.push(format!("edge {} is undirected", edge.id().as_raw()));
                }
            }
        }
        Restriction::Undirected => {
            for edge in graph.edges() {
                if edge.directed {
                    out.push(format!("edge {} is directed", edge.id().as_raw()));
                }
            }
        }
        Restriction::Acyclic => {
            if let Some(start) = find_directed_cycle(graph) {
                out.push(format!(
                    "graph contains a directed cycle reachable from node {}",
                    start.as_raw()
                ));
            }
        }
        Restriction::Connected => {
            if !is_connected(graph) {
                out.push("graph is not connected".to_string());
            }
        }
        Restriction::StronglyConnected => {
            if !is_strongly_connected(graph) {
                out.push("graph is not strongly connected".to_string());
            }
        }
    }
}

fn check_requirement(requirement: Requirement, graph: &BaseGraph, out: &mut Vec<String>) {
    match requirement {
        Requirement::MinDegree(bound) => {
            for node in graph.node_ids() {
                let degree = graph.degree(node);
                if degree < bound {
                    out.push(format!(
                        "node {} has degree {degree}, below the minimum {bound}",
                        node.as_raw()
                    ));
                }
            }
        }
        Requirement::MaxDegree(bound) => {
            for node in graph.node_ids() {
                let degree = graph.degree(node);
                if degree > bound {
                    out.push(format!(
                        "node {} has degree {degree}, above the maximum {bound}",
                        node.as_raw()
                    ));
                }
            }
        }
        Requirement::MinInDegree(bound) => {
            for node in graph.node_ids() {
                let degree = graph.in_degree(node);
                if degree < bound {
                    out.push(format!(
                        "node {} has in-degree {degree}, below the minimum {bound}",
                        node.as_raw()
                    ));
                }
            }
        }
        Requirement::MaxInDegree(bound) => {
            for node in graph.node_ids() {
                let degree = graph.in_degree(node);
                if degree > bound {
                    out.push(format!(
                        "node {} has in-degree {degree}, above the maximum {bound}",
                        node.as_raw()
                    ));
                }
            }
        }
        Requirement::MinOutDegree(bound) => {
            for node in graph.node_ids() {
                let degree = graph.out_degree(node);
                if degree < bound {
                    out.push(format!(
                        "node {} has out-degree {degree}, below the minimum {bound}",
                        node.as_raw()
                    ));
                }
            }
        }
        Requirement::MaxOutDegree(bound) => {
            for node in graph.node_ids() {
                let degree = graph.out_degree(node);
                if degree > bound {
                    out.push(format!(
                        "node {} has out-degree {degree}, above the maximum {bound}",
                        node.as_raw()
                    ));
                }
            }
        }
        Requirement::EulerPath => {
            let odd = odd_degree_count(graph);
            if !(odd == 0 || odd == 2) {
                out.push(format!("{odd} nodes have odd degree, no Euler path exists"));
            }
            if !is_connected_over_active(graph) {
                out.push("nodes with edges are not connected, no Euler path exists".into());
            }
        }
        Requirement::EulerCircuit => {
            let odd = odd_degree_count(graph);
            if odd != 0 {
                out.push(format!(
                    "{odd} nodes have odd degree, no Euler circuit exists"
                ));
            }
            if !is_connected_over_active(graph) {
                out.push("nodes with edges are not connected, no Euler circuit exists".into());
            }
        }
        Requirement::HamiltonPath => match hamilton_exists(graph, false) {
            Some(true) => {}
            Some(false) => out.push("no Hamilton path exists".to_string()),
            None => out.push("Hamilton path search exhausted its step budget".to_string()),
        },
        Requirement::HamiltonCycle => match hamilton_exists(graph, true) {
            Some(true) => {}
            Some(false) => out.push("no Hamilton cycle exists".to_string()),
            None => out.push("Hamilton cycle search exhausted its step budget".to_string()),
        },
        Requirement::BinaryTree => check_binary_shape(graph, BinaryShape::Any, out),
        Requirement::FullBinaryTree => check_binary_shape(graph, BinaryShape::Full, out),
        Requirement::PerfectBinaryTree => check_binary_shape(graph, BinaryShape::Perfect, out),
        Requirement::CompleteBinaryTree => check_binary_shape(graph, BinaryShape::Complete, out),
        Requirement::BalancedTree => check_balanced_tree(graph, out),
        Requirement::FlowNetwork => check_flow_network(graph, out),
        Requirement::Regular => {
            let mut degrees = graph.node_ids().into_iter().map(|n| graph.degree(n));
            if let Some(first) = degrees.next() {
                if degrees.any(|d| d != first) {
                    out.push("node degrees differ, graph is not regular".to_string());
                }
            }
        }
        Requirement::Complete => {
            let ids = graph.node_ids();
            for (i, a) in ids.iter().enumerate() {
                for b in ids.iter().skip(i + 1) {
                    if graph.edge_between(*a, *b).is_none() && graph.edge_between(*b, *a).is_none()
                    {
                        out.push(format!(
                            "nodes {} and {} are not adjacent, graph is not complete",
                            a.as_raw(),
                            b.as_raw()
                        ));
                    }
                }
            }
        }
        Requirement::Tournament => check_tournament(graph, out),
    }
}

fn check_no_self_loops(graph: &BaseGraph, out: &mut Vec<String>) {
    for edge in graph.edges() {
        if edge.source == edge.target {
            out.push(format!("edge {} is a self loop", edge.id().as_raw()));
        }
    }
}

fn check_no_parallel_edges(graph: &BaseGraph, out: &mut Vec<String>) {
    let mut seen: BTreeMap<(String, String), u64> = BTreeMap::new();
    for edge in graph.edges() {
        let mut a = edge.source.describe();
        let mut b = edge.target.describe();
        if !edge.directed && b < a {
            std::mem::swap(&mut a, &mut b);
        }
        if let Some(first) = seen.get(&(a.clone(), b.clone())) {
            out.push(format!(
                "edges {first} and {} are parallel",
                edge.id().as_raw()
            ));
        } else {
            seen.insert((a, b), edge.id().as_raw());
        }
    }
}

/// Directed adjacency over plain node endpoints. Undirected edges contribute
/// both orientations.
pub(crate) fn directed_adjacency(graph: &BaseGraph) -> BTreeMap<NodeId, BTreeSet<NodeId>> {
    let mut adjacency: BTreeMap<NodeId, BTreeSet<NodeId>> = BTreeMap::new();
    for node in graph.node_ids() {
        adjacency.entry(node).or_default();
    }
    for edge in graph.edges() {
        let sources = edge.source_nodes();
        let targets = edge.target_nodes();
        for source in &sources {
            adjacency
                .entry(*source)
                .or_default()
                .extend(targets.iter().copied());
        }
        if !edge.directed {
            for target in &targets {
                adjacency
                    .entry(*target)
                    .or_default()
                    .extend(sources.iter().copied());
            }
        }
    }
    adjacency
}

/// Undirected adjacency over plain node endpoints.
pub(crate) fn undirected_adjacency(graph: &BaseGraph) -> BTreeMap<NodeId, BTreeSet<NodeId>> {
    let mut adjacency: BTreeMap<NodeId, BTreeSet<NodeId>> = BTreeMap::new();
    for node in graph.node_ids() {
        adjacency.entry(node).or_default();
    }
    for edge in graph.edges() {
        let endpoints: Vec<NodeId> = edge
            .all_endpoints()
            .iter()
            .filter_map(poly_core::Endpoint::as_node)
            .collect();
        for a in &endpoints {
            for b in &endpoints {
                if a != b {
                    adjacency.entry(*a).or_default().insert(*b);
                }
            }
        }
    }
    adjacency
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum VisitState {
    NotVisited,
    Visiting,
    Visited,
}

/// Returns a node on a directed cycle, if one exists.
pub(crate) fn find_directed_cycle(graph: &BaseGraph) -> Option<NodeId> {
    let adjacency = directed_adjacency(graph);
    let mut states: BTreeMap<NodeId, VisitState> = adjacency
        .keys()
        .map(|node| (*node, VisitState::NotVisited))
        .collect();
    for node in adjacency.keys() {
        if states[node] == VisitState::NotVisited && cycle_dfs(*node, &adjacency, &mut states) {
            return Some(*node);
        }
    }
    None
}

fn cycle_dfs(
    node: NodeId,
    adjacency: &BTreeMap<NodeId, BTreeSet<NodeId>>,
    states: &mut BTreeMap<NodeId, VisitState>,
) -> bool {
    // Iterative coloring walk so deep graphs cannot exhaust the call stack.
    let mut stack = vec![(node, false)];
    while let Some((current, children_done)) = stack.pop() {
        if children_done {
            states.insert(current, VisitState::Visited);
            continue;
        }
        match states.get(&current).copied().unwrap_or(VisitState::NotVisited) {
            VisitState::Visiting => return true,
            VisitState::Visited => continue,
            VisitState::NotVisited => {}
        }
        states.insert(current, VisitState::Visiting);
        stack.push((current, true));
        if let Some(neighbours) = adjacency.get(&current) {
            for next in neighbours {
                match states.get(next).copied().unwrap_or(VisitState::NotVisited) {
                    VisitState::Visiting => return true,
                    VisitState::Visited => {}
                    VisitState::NotVisited => stack.push((*next, false)),
                }
            }
        }
    }
    false
}

pub(crate) fn is_connected(graph: &BaseGraph) -> bool {
    let adjacency = undirected_adjacency(graph);
    let mut nodes = adjacency.keys();
    let start = match nodes.next() {
        Some(start) => *start,
        None => return true,
    };
    reachable(start, &adjacency).len() == adjacency.len()
}

fn is_connected_over_active(graph: &BaseGraph) -> bool {
    let adjacency = undirected_adjacency(graph);
    let active: Vec<NodeId> = adjacency
        .iter()
        .filter(|(_, neighbours)| !neighbours.is_empty())
        .map(|(node, _)| *node)
        .collect();
    let start = match active.first() {
        Some(start) => *start,
        None => return true,
    };
    let seen = reachable(start, &adjacency);
    active.iter().all(|node| seen.contains(node))
}

fn is_strongly_connected(graph: &BaseGraph) -> bool {
    let forward = directed_adjacency(graph);
    if forward.is_empty() {
        return true;
    }
    let mut reverse: BTreeMap<NodeId, BTreeSet<NodeId>> = BTreeMap::new();
    for node in forward.keys() {
        reverse.entry(*node).or_default();
    }
    for (source, targets) in &forward {
        for target in targets {
            reverse.entry(*target).or_default().insert(*source);
        }
    }
    let start = *forward.keys().next().expect("non-empty adjacency");
    reachable(start, &forward).len() == forward.len()
        && reachable(start, &reverse).len() == reverse.len()
}

pub(crate) fn reachable(
    start: NodeId,
    adjacency: &BTreeMap<NodeId, BTreeSet<NodeId>>,
) -> BTreeSet<NodeId> {
    let mut seen = BTreeSet::new();
    let mut queue = VecDeque::from([start]);
    seen.insert(start);
    while let Some(node) = queue.pop_front() {
        if let Some(neighbours) = adjacency.get(&node) {
            for next in neighbours {
                if seen.insert(*next) {
                    queue.push_back(*next);
                }
            }
        }
    }
    seen
}

fn odd_degree_count(graph: &BaseGraph) -> usize {
    graph
        .node_ids()
        .iter()
        .filter(|node| graph.degree(**node) % 2 == 1)
        .count()
}

/// Exact Hamilton existence check. `Some(true)`/`Some(false)` when the search
/// completes, `None` when [`HAMILTON_STEP_CAP`] is exhausted.
fn hamilton_exists(graph: &BaseGraph, cycle: bool) -> Option<bool> {
    let adjacency = directed_adjacency(graph);
    let nodes: Vec<NodeId> = adjacency.keys().copied().collect();
    if nodes.is_empty() {
        return Some(true);
    }
    let mut steps: u64 = 0;
    for start in &nodes {
        // Explicit stack of (node, neighbour cursor) frames.
        let mut path = vec![*start];
        let mut on_path: BTreeSet<NodeId> = BTreeSet::from([*start]);
        let mut cursors: Vec<Vec<NodeId>> = vec![adjacency[start].iter().copied().collect()];
        while let Some(frontier) = cursors.last_mut() {
            steps += 1;
            if steps > HAMILTON_STEP_CAP {
                return None;
            }
            if path.len() == nodes.len() {
                let closed = adjacency[path.last().expect("non-empty path")].contains(start);
                if !cycle || closed {
                    return Some(true);
                }
                // Fall through to backtrack.
            }
            match frontier.pop() {
                Some(next) if path.len() < nodes.len() && !on_path.contains(&next) => {
                    path.push(next);
                    on_path.insert(next);
                    cursors.push(adjacency[&next].iter().copied().collect());
                }
                Some(_) => {}
                None => {
                    let done = path.pop().expect("stack in sync");
                    on_path.remove(&done);
                    cursors.pop();
                }
            }
        }
    }
    Some(false)
}

enum BinaryShape {
    Any,
    Full,
    Perfect,
    Complete,
}

fn tree_root(graph: &BaseGraph) -> Result<NodeId, String> {
    let roots: Vec<NodeId> = graph
        .node_ids()
        .into_iter()
        .filter(|node| graph.in_degree(*node) == 0)
        .collect();
    match roots.as_slice() {
        [root] => Ok(*root),
        [] => Err("no root node found".to_string()),
        many => Err(format!("{} root candidates found", many.len())),
    }
}

fn tree_children(graph: &BaseGraph, node: NodeId) -> Vec<NodeId> {
    let mut children = Vec::new();
    for edge in graph.edges_from(node) {
        for target in edge.target_nodes() {
            if target != node {
                children.push(target);
            }
        }
    }
    children.sort();
    children.dedup();
    children
}

fn check_binary_shape(graph: &BaseGraph, shape: BinaryShape, out: &mut Vec<String>) {
    if graph.node_count() == 0 {
        return;
    }
    let root = match tree_root(graph) {
        Ok(root) => root,
        Err(reason) => {
            out.push(format!("not a binary tree: {reason}"));
            return;
        }
    };
    let mut leaf_depths = Vec::new();
    let mut level_sizes: BTreeMap<usize, usize> = BTreeMap::new();
    let mut saw_underfull_internal = false;
    let mut queue = VecDeque::from([(root, 0usize)]);
    let mut seen = BTreeSet::from([root]);
    while let Some((node, depth)) = queue.pop_front() {
        *level_sizes.entry(depth).or_default() += 1;
        let children = tree_children(graph, node);
        if children.len() > 2 {
            out.push(format!(
                "node {} has {} children, more than a binary tree allows",
                node.as_raw(),
                children.len()
            ));
            return;
        }
        match children.len() {
            0 => leaf_depths.push(depth),
            1 => saw_underfull_internal = true,
            _ => {}
        }
        for child in children {
            if seen.insert(child) {
                queue.push_back((child, depth + 1));
            }
        }
    }
    if seen.len() != graph.node_count() {
        out.push("not a binary tree: some nodes are unreachable from the root".to_string());
        return;
    }
    match shape {
        BinaryShape::Any => {}
        BinaryShape::Full => {
            if saw_underfull_internal {
                out.push("an internal node has exactly one child, tree is not full".to_string());
            }
        }
        BinaryShape::Perfect => {
            if saw_underfull_internal {
                out.push("an internal node has exactly one child, tree is not perfect".to_string());
            }
            let depths: BTreeSet<usize> = leaf_depths.iter().copied().collect();
            if depths.len() > 1 {
                out.push("leaves sit at different depths, tree is not perfect".to_string());
            }
        }
        BinaryShape::Complete => {
            let max_depth = level_sizes.keys().copied().max().unwrap_or(0);
            for (depth, size) in &level_sizes {
                if *depth < max_depth && *size != (1usize << depth) {
                    out.push(format!(
                        "level {depth} holds {size} nodes, tree is not complete"
                    ));
                    return;
                }
            }
        }
    }
}

fn check_balanced_tree(graph: &BaseGraph, out: &mut Vec<String>) {
    if graph.node_count() == 0 {
        return;
    }
    let root = match tree_root(graph) {
        Ok(root) => root,
        Err(reason) => {
            out.push(format!("not a tree: {reason}"));
            return;
        }
    };
    if subtree_height_balanced(graph, root, &mut BTreeSet::new()).is_none() {
        out.push("subtree heights differ by more than one, tree is unbalanced".to_string());
    }
}

fn subtree_height_balanced(
    graph: &BaseGraph,
    node: NodeId,
    seen: &mut BTreeSet<NodeId>,
) -> Option<usize> {
    if !seen.insert(node) {
        return Some(0);
    }
    let mut heights: Vec<usize> = Vec::new();
    for child in tree_children(graph, node) {
        heights.push(subtree_height_balanced(graph, child, seen)?);
    }
    let max = heights.iter().copied().max().unwrap_or(0);
    let min = heights.iter().copied().min().unwrap_or(0);
    if heights.len() > 1 && max - min > 1 {
        return None;
    }
    Some(max + 1)
}

fn check_flow_network(graph: &BaseGraph, out: &mut Vec<String>) {
    for edge in graph.edges() {
        if !edge.directed {
            out.push(format!(
                "edge {} is undirected, not a flow network",
                edge.id().as_raw()
            ));
            return;
        }
    }
    let sources: Vec<NodeId> = graph
        .node_ids()
        .into_iter()
        .filter(|node| graph.in_degree(*node) == 0 && graph.out_degree(*node) > 0)
        .collect();
    let sinks: Vec<NodeId> = graph
        .node_ids()
        .into_iter()
        .filter(|node| graph.out_degree(*node) == 0 && graph.in_degree(*node) > 0)
        .collect();
    if sources.len() != 1 {
        out.push(format!(
            "{} source candidates found, flow networks need exactly one",
            sources.len()
        ));
    }
    if sinks.len() != 1 {
        out.push(format!(
            "{} sink candidates found, flow networks need exactly one",
            sinks.len()
        ));
    }
}

fn check_tournament(graph: &BaseGraph, out: &mut Vec<String>) {
    let ids = graph.node_ids();
    for (i, a) in ids.iter().enumerate() {
        for b in ids.iter().skip(i + 1) {
            let forward = graph
                .edges_from(*a)
                .iter()
                .any(|edge| edge.directed && edge.target_nodes().contains(b));
            let backward = graph
                .edges_from(*b)
                .iter()
                .any(|edge| edge.directed && edge.target_nodes().contains(a));
            if forward == backward {
                out.push(format!(
                    "nodes {} and {} need exactly one directed edge between them",
                    a.as_raw(),
                    b.as_raw()
                ));
            }
        }
    }
}
