//! Matching, clustering and path queries over nested hierarchies.

use std::collections::{BTreeMap, BTreeSet};

use poly_algo::paths;
use poly_core::{GraphId, NodeId};
use poly_graph::BaseGraph;

use crate::nested::NestedGraph;

/// Finds an injective mapping from the pattern's nodes to the target's nodes
/// that preserves every pattern edge (directed edges keep direction,
/// undirected edges match either orientation). Backtracking over candidates
/// in ascending id order, so the result is deterministic.
pub fn match_pattern(
    pattern: &BaseGraph,
    target: &BaseGraph,
) -> Option<BTreeMap<NodeId, NodeId>> {
    let pattern_nodes = pattern.node_ids();
    if pattern_nodes.len() > target.node_count() {
        return None;
    }
    let target_nodes = target.node_ids();
    let mut mapping: BTreeMap<NodeId, NodeId> = BTreeMap::new();
    let mut used: BTreeSet<NodeId> = BTreeSet::new();
    // cursors[i] is the next target candidate to try for pattern node i.
    let mut cursors = vec![0usize; pattern_nodes.len()];
    let mut depth = 0usize;
    loop {
        if depth == pattern_nodes.len() {
            return Some(mapping);
        }
        let pattern_node = pattern_nodes[depth];
        let mut advanced = false;
        while cursors[depth] < target_nodes.len() {
            let candidate = target_nodes[cursors[depth]];
            cursors[depth] += 1;
            if used.contains(&candidate) {
                continue;
            }
            if !edges_hold(pattern, target, &mapping, pattern_node, candidate) {
                continue;
            }
            mapping.insert(pattern_node, candidate);
            used.insert(candidate);
            depth += 1;
            advanced = true;
            break;
        }
        if !advanced {
            if depth == 0 {
                return None;
            }
            cursors[depth] = 0;
            depth -= 1;
            if let Some(taken) = mapping.remove(&pattern_nodes[depth]) {
                used.remove(&taken);
            }
        }
    }
}

/// Checks every pattern edge between `pattern_node` and an already-mapped
/// node against the target.
fn edges_hold(
    pattern: &BaseGraph,
    target: &BaseGraph,
    mapping: &BTreeMap<NodeId, NodeId>,
    pattern_node: NodeId,
    candidate: NodeId,
) -> bool {
    for edge in pattern.edges() {
        for source in edge.source_nodes() {
            for target_node in edge.target_nodes() {
                let (from, to) = if source == pattern_node {
                    match mapping.get(&target_node) {
                        Some(mapped) => (candidate, *mapped),
                        None => continue,
                    }
                } else if target_node == pattern_node {
                    match mapping.get(&source) {
                        Some(mapped) => (*mapped, candidate),
                        None => continue,
                    }
                } else {
                    continue;
                };
                let forward = target
                    .edges_from(from)
                    .iter()
                    .any(|e| e.target_nodes().contains(&to));
                if edge.directed {
                    if !forward {
                        return false;
                    }
                } else if !forward
                    && !target
                        .edges_from(to)
                        .iter()
                        .any(|e| e.target_nodes().contains(&from))
                {
                    return false;
                }
            }
        }
    }
    true
}

/// Searches every member graph for the pattern, root first, and returns the
/// first match together with the graph it was found in.
pub fn find_pattern(
    nested: &NestedGraph,
    pattern: &BaseGraph,
) -> Option<(GraphId, BTreeMap<NodeId, NodeId>)> {
    for id in nested.graph_ids() {
        if let Some(graph) = nested.graph(id) {
            if let Some(mapping) = match_pattern(pattern, graph) {
                return Some((id, mapping));
            }
        }
    }
    None
}

/// Agglomerative clustering with average linkage over hop distances. Starts
/// from singletons and merges the closest pair until `k` clusters remain.
/// Unreachable pairs count as one more than the node count, so connected
/// regions merge first.
pub fn cluster(graph: &BaseGraph, k: usize) -> Vec<BTreeSet<NodeId>> {
    let nodes = graph.node_ids();
    if nodes.is_empty() || k == 0 {
        return Vec::new();
    }
    let hops = paths::floyd_warshall_hops(graph);
    let unreachable = nodes.len() as f64 + 1.0;
    let distance = |a: NodeId, b: NodeId| -> f64 {
        hops.get(&(a, b))
            .or_else(|| hops.get(&(b, a)))
            .copied()
            .unwrap_or(unreachable)
    };
    let mut clusters: Vec<BTreeSet<NodeId>> =
        nodes.iter().map(|id| BTreeSet::from([*id])).collect();
    while clusters.len() > k {
        let mut best: Option<(usize, usize, f64)> = None;
        for i in 0..clusters.len() {
            for j in i + 1..clusters.len() {
                let mut total = 0.0;
                let mut pairs = 0usize;
                for a in &clusters[i] {
                    for b in &clusters[j] {
                        total += distance(*a, *b);
                        pairs += 1;
                    }
                }
                let linkage = total / pairs as f64;
                let better = match best {
                    None => true,
                    Some((_, _, current)) => linkage < current,
                };
                if better {
                    best = Some((i, j, linkage));
                }
            }
        }
        let Some((i, j, _)) = best else { break };
        let merged = clusters.remove(j);
        clusters[i].extend(merged);
    }
    clusters
}

/// A hit returned by [`query`]: the graph holding the node and the node.
pub type QueryHit = (GraphId, NodeId);

/// Evaluates a path expression against the hierarchy. Segments are separated
/// by `/`: a plain segment matches nodes by label in the current level, `*`
/// matches any node at the current level, `**` matches any node at any depth
/// below the current level, and `..` steps to the owning node. The
/// expression is rooted at the root graph.
pub fn query(nested: &NestedGraph, expression: &str) -> Vec<QueryHit> {
    let segments: Vec<&str> = expression
        .split('/')
        .filter(|segment| !segment.is_empty())
        .collect();
    // The frontier is `None` for the virtual position above the root graph,
    // or a node whose subgraph (if any) holds the next level.
    let mut frontier: Vec<Option<QueryHit>> = vec![None];
    for segment in segments {
        let mut next: Vec<Option<QueryHit>> = Vec::new();
        for position in &frontier {
            match segment {
                ".." => {
                    if let Some((graph, _)) = position {
                        if let Some(owner) = nested.owner_of(*graph) {
                            next.push(Some(owner));
                        }
                    }
                }
                "**" => {
                    for hit in descendants(nested, *position) {
                        next.push(Some(hit));
                    }
                }
                "*" => {
                    for hit in level_nodes(nested, *position) {
                        next.push(Some(hit));
                    }
                }
                label => {
                    for hit in level_nodes(nested, *position) {
                        let matches = nested
                            .graph(hit.0)
                            .and_then(|graph| graph.node(hit.1))
                            .is_some_and(|node| node.label == label);
                        if matches {
                            next.push(Some(hit));
                        }
                    }
                }
            }
        }
        next.sort();
        next.dedup();
        frontier = next;
        if frontier.is_empty() {
            break;
        }
    }
    frontier.into_iter().flatten().collect()
}

/// Nodes one level below a position: the root graph's nodes for the virtual
/// root, or the nodes of the position's subgraph.
fn level_nodes(nested: &NestedGraph, position: Option<QueryHit>) -> Vec<QueryHit> {
    let graph = match position {
        None => Some(nested.root()),
        Some((graph, node)) => nested.subgraph_of(graph, node),
    };
    let Some(graph) = graph else {
        return Vec::new();
    };
    match nested.graph(graph) {
        Some(member) => member.node_ids().into_iter().map(|n| (graph, n)).collect(),
        None => Vec::new(),
    }
}

/// Every node strictly below a position, any depth.
fn descendants(nested: &NestedGraph, position: Option<QueryHit>) -> Vec<QueryHit> {
    let mut found = Vec::new();
    let mut stack = level_nodes(nested, position);
    while let Some(hit) = stack.pop() {
        found.push(hit);
        stack.extend(level_nodes(nested, Some(hit)));
    }
    found.sort();
    found.dedup();
    found
}
