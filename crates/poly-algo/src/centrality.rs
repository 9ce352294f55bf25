//! Centrality measures.

use std::collections::BTreeMap;

use poly_core::NodeId;
use poly_graph::BaseGraph;

use crate::{adjacency, paths};

const POWER_ITERATIONS: usize = 100;
const POWER_TOLERANCE: f64 = 1e-6;

/// Degree centrality: degree divided by `n - 1`. Singleton graphs score 0.
pub fn degree(graph: &BaseGraph) -> BTreeMap<NodeId, f64> {
    let nodes = graph.node_ids();
    let scale = if nodes.len() > 1 {
        (nodes.len() - 1) as f64
    } else {
        1.0
    };
    nodes
        .iter()
        .map(|node| (*node, graph.degree(*node) as f64 / scale))
        .collect()
}

/// Closeness centrality over unit hop counts. Unreachable pairs contribute
/// nothing; an isolated node scores 0.
pub fn closeness(graph: &BaseGraph) -> BTreeMap<NodeId, f64> {
    let nodes = graph.node_ids();
    let distances = paths::floyd_warshall_hops(graph);
    let mut scores = BTreeMap::new();
    for node in &nodes {
        let mut reachable = 0usize;
        let mut total = 0.0;
        for other in &nodes {
            if node == other {
                continue;
            }
            let distance = distances[&(*node, *other)];
            if distance.is_finite() {
                reachable += 1;
                total += distance;
            }
        }
        let score = if total > 0.0 {
            reachable as f64 / total
        } else {
            0.0
        };
        scores.insert(*node, score);
    }
    scores
}

/// Betweenness centrality by counting shortest paths through each node,
/// using Brandes' accumulation over unit-weight BFS.
pub fn betweenness(graph: &BaseGraph) -> BTreeMap<NodeId, f64> {
    let nodes = graph.node_ids();
    let adjacency = adjacency::directed(graph);
    let mut scores: BTreeMap<NodeId, f64> = nodes.iter().map(|n| (*n, 0.0)).collect();
    for source in &nodes {
        let mut stack: Vec<NodeId> = Vec::new();
        let mut parents: BTreeMap<NodeId, Vec<NodeId>> = BTreeMap::new();
        let mut path_counts: BTreeMap<NodeId, f64> = BTreeMap::from([(*source, 1.0)]);
        let mut distances: BTreeMap<NodeId, i64> = BTreeMap::from([(*source, 0)]);
        let mut queue = std::collections::VecDeque::from([*source]);
        while let Some(node) = queue.pop_front() {
            stack.push(node);
            let here = distances[&node];
            if let Some(neighbours) = adjacency.get(&node) {
                for next in neighbours {
                    if !distances.contains_key(next) {
                        distances.insert(*next, here + 1);
                        queue.push_back(*next);
                    }
                    if distances[next] == here + 1 {
                        let through = path_counts[&node];
                        *path_counts.entry(*next).or_insert(0.0) += through;
                        parents.entry(*next).or_default().push(node);
                    }
                }
            }
        }
        let mut dependency: BTreeMap<NodeId, f64> = BTreeMap::new();
        while let Some(node) = stack.pop() {
            let share =
                (1.0 + dependency.get(&node).copied().unwrap_or(0.0)) / path_counts[&node];
            if let Some(ancestors) = parents.get(&node) {
                for parent in ancestors {
                    *dependency.entry(*parent).or_insert(0.0) += path_counts[parent] * share;
                }
            }
            if node != *source {
                if let Some(score) = scores.get_mut(&node) {
                    *score += dependency.get(&node).copied().unwrap_or(0.0);
                }
            }
        }
    }
    scores
}

/// Eigenvector centrality by power iteration, normalised so the largest score
/// is 1. Converges within [`POWER_ITERATIONS`] rounds or stops early once the
/// update falls under tolerance.
pub fn eigenvector(graph: &BaseGraph) -> BTreeMap<NodeId, f64> {
    let nodes = graph.node_ids();
    if nodes.is_empty() {
        return BTreeMap::new();
    }
    let adjacency = adjacency::undirected(graph);
    let mut scores: BTreeMap<NodeId, f64> = nodes.iter().map(|n| (*n, 1.0)).collect();
    for _ in 0..POWER_ITERATIONS {
        let mut next: BTreeMap<NodeId, f64> = nodes.iter().map(|n| (*n, 0.0)).collect();
        for node in &nodes {
            if let Some(neighbours) = adjacency.get(node) {
                for neighbour in neighbours {
                    if let Some(slot) = next.get_mut(node) {
                        *slot += scores[neighbour];
                    }
                }
            }
        }
        let norm = next.values().map(|v| v * v).sum::<f64>().sqrt();
        if norm == 0.0 {
            return scores;
        }
        for value in next.values_mut() {
            *value /= norm;
        }
        let shift: f64 = nodes
            .iter()
            .map(|n| (next[n] - scores[n]).abs())
            .sum();
        scores = next;
        if shift < POWER_TOLERANCE {
            break;
        }
    }
    let peak = scores.values().copied().fold(0.0_f64, f64::max);
    if peak > 0.0 {
        for value in scores.values_mut() {
            *value /= peak;
        }
    }
    scores
}
