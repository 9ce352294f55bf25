//! Euler paths and circuits over the undirected view.

use std::collections::{BTreeMap, BTreeSet};

use poly_core::{EdgeId, NodeId};
use poly_graph::BaseGraph;

fn undirected_incidence(graph: &BaseGraph) -> BTreeMap<NodeId, Vec<(NodeId, EdgeId)>> {
    let mut incidence: BTreeMap<NodeId, Vec<(NodeId, EdgeId)>> = BTreeMap::new();
    for node in graph.node_ids() {
        incidence.entry(node).or_default();
    }
    for edge in graph.edges() {
        let endpoints: Vec<NodeId> = edge
            .all_endpoints()
            .iter()
            .filter_map(poly_core::Endpoint::as_node)
            .collect();
        // Euler analysis only makes sense over binary edges.
        if let [a, b] = endpoints[..] {
            incidence.entry(a).or_default().push((b, edge.id()));
            if a != b {
                incidence.entry(b).or_default().push((a, edge.id()));
            }
        }
    }
    for list in incidence.values_mut() {
        list.sort();
    }
    incidence
}

fn active_nodes_connected(incidence: &BTreeMap<NodeId, Vec<(NodeId, EdgeId)>>) -> bool {
    let active: Vec<NodeId> = incidence
        .iter()
        .filter(|(_, list)| !list.is_empty())
        .map(|(node, _)| *node)
        .collect();
    let Some(start) = active.first() else {
        return true;
    };
    let mut seen = BTreeSet::from([*start]);
    let mut stack = vec![*start];
    while let Some(node) = stack.pop() {
        for (next, _) in &incidence[&node] {
            if seen.insert(*next) {
                stack.push(*next);
            }
        }
    }
    active.iter().all(|node| seen.contains(node))
}

fn odd_nodes(incidence: &BTreeMap<NodeId, Vec<(NodeId, EdgeId)>>) -> Vec<NodeId> {
    incidence
        .iter()
        .filter(|(_, list)| list.len() % 2 == 1)
        .map(|(node, _)| *node)
        .collect()
}

/// Whether the graph has an Euler path: connected over its active nodes with
/// zero or two odd-degree nodes.
pub fn has_euler_path(graph: &BaseGraph) -> bool {
    let incidence = undirected_incidence(graph);
    let odd = odd_nodes(&incidence).len();
    active_nodes_connected(&incidence) && (odd == 0 || odd == 2)
}

/// Whether the graph has an Euler circuit: connected over its active nodes
/// with every degree even.
pub fn has_euler_circuit(graph: &BaseGraph) -> bool {
    let incidence = undirected_incidence(graph);
    active_nodes_connected(&incidence) && odd_nodes(&incidence).is_empty()
}

/// An Euler path or circuit found by Hierholzer's algorithm, or `None` when
/// the degree parity or connectivity conditions fail. A circuit is returned
/// when every degree is even; otherwise the path starts at an odd node.
pub fn euler_trail(graph: &BaseGraph) -> Option<Vec<NodeId>> {
    let incidence = undirected_incidence(graph);
    if !active_nodes_connected(&incidence) {
        return None;
    }
    let odd = odd_nodes(&incidence);
    if !(odd.is_empty() || odd.len() == 2) {
        return None;
    }
    let edge_total: usize = graph
        .edges()
        .filter(|edge| edge.all_endpoints().len() == 2)
        .count();
    if edge_total == 0 {
        return graph.node_ids().first().map(|node| vec![*node]);
    }
    let start = odd.first().copied().or_else(|| {
        incidence
            .iter()
            .find(|(_, list)| !list.is_empty())
            .map(|(node, _)| *node)
    })?;

    let mut remaining = incidence;
    let mut used: BTreeSet<EdgeId> = BTreeSet::new();
    let mut stack = vec![start];
    let mut trail = Vec::new();
    while let Some(node) = stack.last().copied() {
        let next = remaining
            .get(&node)
            .and_then(|list| list.iter().find(|(_, edge)| !used.contains(edge)))
            .copied();
        match next {
            Some((neighbour, edge)) => {
                used.insert(edge);
                stack.push(neighbour);
            }
            None => {
                trail.push(node);
                stack.pop();
            }
        }
    }
    if used.len() != edge_total {
        return None;
    }
    trail.reverse();
    Some(trail)
}
