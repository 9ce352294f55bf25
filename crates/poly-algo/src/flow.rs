//! Maximum flow via Edmonds-Karp.

use std::collections::{BTreeMap, VecDeque};

use poly_core::NodeId;
use poly_graph::BaseGraph;

use crate::paths::WeightMap;

/// Maximum flow from `source` to `sink`, with edge capacities taken from the
/// weight map (missing entries count as capacity 1). Parallel edges between a
/// node pair have their capacities summed. Returns 0 when the sink is
/// unreachable.
pub fn max_flow(graph: &BaseGraph, source: NodeId, sink: NodeId, capacities: &WeightMap) -> f64 {
    let mut residual: BTreeMap<NodeId, BTreeMap<NodeId, f64>> = BTreeMap::new();
    for node in graph.node_ids() {
        residual.entry(node).or_default();
    }
    for edge in graph.edges() {
        let capacity = capacities.get(&edge.id()).copied().unwrap_or(1.0);
        for from in edge.source_nodes() {
            for to in edge.target_nodes() {
                if from == to {
                    continue;
                }
                *residual.entry(from).or_default().entry(to).or_insert(0.0) += capacity;
                residual.entry(to).or_default().entry(from).or_insert(0.0);
                if !edge.directed {
                    *residual.entry(to).or_default().entry(from).or_insert(0.0) += capacity;
                }
            }
        }
    }

    let mut total = 0.0;
    loop {
        // Shortest augmenting path in the residual network.
        let mut predecessors: BTreeMap<NodeId, NodeId> = BTreeMap::new();
        let mut queue = VecDeque::from([source]);
        while let Some(node) = queue.pop_front() {
            if node == sink {
                break;
            }
            if let Some(neighbours) = residual.get(&node) {
                let open: Vec<NodeId> = neighbours
                    .iter()
                    .filter(|(next, capacity)| {
                        **capacity > 0.0 && **next != source && !predecessors.contains_key(next)
                    })
                    .map(|(next, _)| *next)
                    .collect();
                for next in open {
                    predecessors.insert(next, node);
                    queue.push_back(next);
                }
            }
        }
        if !predecessors.contains_key(&sink) {
            break;
        }

        let mut bottleneck = f64::INFINITY;
        let mut current = sink;
        while current != source {
            let previous = predecessors[&current];
            bottleneck = bottleneck.min(residual[&previous][&current]);
            current = previous;
        }

        let mut current = sink;
        while current != source {
            let previous = predecessors[&current];
            if let Some(forward) = residual.get_mut(&previous).and_then(|n| n.get_mut(&current)) {
                *forward -= bottleneck;
            }
            if let Some(backward) = residual.get_mut(&current).and_then(|n| n.get_mut(&previous)) {
                *backward += bottleneck;
            }
            current = previous;
        }
        total += bottleneck;
    }
    total
}
