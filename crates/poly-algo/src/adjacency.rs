//! Adjacency views over the BaseGraph query contract.
//!
//! Algorithms never read edge payloads directly; they work over these
//! deterministic adjacency maps plus caller-supplied weight maps.

use std::collections::{BTreeMap, BTreeSet};

use poly_core::{EdgeId, NodeId};
use poly_graph::BaseGraph;

/// Directed adjacency. Undirected edges contribute both orientations;
/// hyperedges contribute every source-to-target pair.
pub fn directed(graph: &BaseGraph) -> BTreeMap<NodeId, BTreeSet<NodeId>> {
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

/// Undirected adjacency: every pair of nodes sharing an edge is adjacent.
pub fn undirected(graph: &BaseGraph) -> BTreeMap<NodeId, BTreeSet<NodeId>> {
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

/// Directed neighbour pairs labelled with the edge that produced them, for
/// algorithms that consult per-edge weights.
pub fn weighted_neighbours(graph: &BaseGraph, node: NodeId) -> Vec<(NodeId, EdgeId)> {
    let mut out = Vec::new();
    for edge in graph.edges_from(node) {
        for target in edge.target_nodes() {
            if target != node {
                out.push((target, edge.id()));
            }
        }
        if !edge.directed {
            for source in edge.source_nodes() {
                if source != node {
                    out.push((source, edge.id()));
                }
            }
        }
    }
    out.sort();
    out.dedup();
    out
}
