//! Budgeted planarity screening.

use std::collections::{BTreeMap, BTreeSet};

use poly_core::NodeId;
use poly_graph::BaseGraph;

use crate::adjacency;
use crate::budget::SearchBudget;

/// Verdict of the planarity screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Planarity {
    /// Within the edge bound and free of forbidden complete subgraphs.
    Planar,
    /// Over the edge bound, or contains a K5 or K3,3 subgraph.
    NonPlanar,
    /// The subgraph search ran out of budget before deciding.
    Unknown,
}

fn clique_among(adjacency: &BTreeMap<NodeId, BTreeSet<NodeId>>, members: &[NodeId]) -> bool {
    for (i, a) in members.iter().enumerate() {
        for b in &members[i + 1..] {
            if !adjacency.get(a).is_some_and(|n| n.contains(b)) {
                return false;
            }
        }
    }
    true
}

fn biclique(
    adjacency: &BTreeMap<NodeId, BTreeSet<NodeId>>,
    left: &[NodeId],
    right: &[NodeId],
) -> bool {
    for a in left {
        for b in right {
            if !adjacency.get(a).is_some_and(|n| n.contains(b)) {
                return false;
            }
        }
    }
    true
}

fn combinations(pool: &[NodeId], take: usize) -> Vec<Vec<NodeId>> {
    let mut out = Vec::new();
    let mut indices: Vec<usize> = (0..take).collect();
    if take > pool.len() {
        return out;
    }
    loop {
        out.push(indices.iter().map(|i| pool[*i]).collect());
        let mut cursor = take;
        loop {
            if cursor == 0 {
                return out;
            }
            cursor -= 1;
            if indices[cursor] != cursor + pool.len() - take {
                break;
            }
        }
        indices[cursor] += 1;
        for i in cursor + 1..take {
            indices[i] = indices[i - 1] + 1;
        }
    }
}

/// Screens the undirected view for planarity. Applies the `e <= 3n - 6` edge
/// bound, then searches for K5 and K3,3 subgraphs under the step budget. A
/// clean screen reports `Planar`; hidden subdivisions beyond plain subgraphs
/// are out of scope for this screen.
pub fn planarity_screen(graph: &BaseGraph, budget: &mut SearchBudget) -> Planarity {
    let nodes = graph.node_ids();
    if nodes.len() < 5 {
        return Planarity::Planar;
    }
    let adjacency = adjacency::undirected(graph);
    let distinct_pairs: BTreeSet<(NodeId, NodeId)> = adjacency
        .iter()
        .flat_map(|(a, outs)| outs.iter().filter(move |b| a < b).map(|b| (*a, *b)))
        .collect();
    if distinct_pairs.len() > 3 * nodes.len() - 6 {
        return Planarity::NonPlanar;
    }

    for five in combinations(&nodes, 5) {
        if !budget.spend() {
            return Planarity::Unknown;
        }
        if clique_among(&adjacency, &five) {
            return Planarity::NonPlanar;
        }
    }
    if nodes.len() >= 6 {
        for six in combinations(&nodes, 6) {
            for left in combinations(&six, 3) {
                if !budget.spend() {
                    return Planarity::Unknown;
                }
                let right: Vec<NodeId> =
                    six.iter().filter(|n| !left.contains(n)).copied().collect();
                if biclique(&adjacency, &left, &right) {
                    return Planarity::NonPlanar;
                }
            }
        }
    }
    Planarity::Planar
}
