//! Whole-graph property reports.

use std::collections::BTreeSet;

use poly_core::NodeId;
use poly_graph::BaseGraph;

use crate::{adjacency, components};

/// Whether the directed view contains a cycle, by iterative three-colour DFS.
pub fn is_cyclic(graph: &BaseGraph) -> bool {
    let adjacency = adjacency::directed(graph);
    let mut visiting: BTreeSet<NodeId> = BTreeSet::new();
    let mut visited: BTreeSet<NodeId> = BTreeSet::new();
    for root in graph.node_ids() {
        if visited.contains(&root) {
            continue;
        }
        let mut stack: Vec<(NodeId, bool)> = vec![(root, false)];
        while let Some((node, expanded)) = stack.pop() {
            if expanded {
                visiting.remove(&node);
                visited.insert(node);
                continue;
            }
            if visited.contains(&node) {
                continue;
            }
            visiting.insert(node);
            stack.push((node, true));
            if let Some(outs) = adjacency.get(&node) {
                for next in outs {
                    if visiting.contains(next) {
                        return true;
                    }
                    if !visited.contains(next) {
                        stack.push((*next, false));
                    }
                }
            }
        }
    }
    false
}

/// Summary of the graph's connectivity structure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Connectivity {
    /// Whether the undirected view is a single component.
    pub connected: bool,
    /// Whether every ordered pair is mutually reachable in the directed view.
    pub strongly_connected: bool,
    /// Components of the undirected view.
    pub components: Vec<Vec<NodeId>>,
    /// Nodes with no incident edges.
    pub isolated: Vec<NodeId>,
}

/// Reports connectivity of both the undirected and directed views.
pub fn connectivity(graph: &BaseGraph) -> Connectivity {
    let parts = components::connected_components(graph);
    let strong = components::strongly_connected_components(graph);
    let isolated = graph
        .node_ids()
        .into_iter()
        .filter(|node| graph.degree(*node) == 0)
        .collect();
    Connectivity {
        connected: parts.len() <= 1,
        strongly_connected: strong.len() <= 1,
        components: parts,
        isolated,
    }
}

/// Graph density: edges over the maximum possible for a simple graph on the
/// same nodes. Empty and singleton graphs report 0.
pub fn density(graph: &BaseGraph) -> f64 {
    let n = graph.node_count();
    if n < 2 {
        return 0.0;
    }
    let possible = (n * (n - 1)) as f64 / 2.0;
    graph.edge_count() as f64 / possible
}
