//! Shortest-path algorithms.
//!
//! Weights are supplied externally, keyed by edge id; a missing entry counts
//! as weight 1. The substrate stays weight-agnostic.

use std::cmp::Reverse;
use std::collections::{BTreeMap, BinaryHeap};

use poly_core::{EdgeId, NodeId};
use poly_graph::BaseGraph;

use crate::adjacency;

/// External edge-weight map.
pub type WeightMap = BTreeMap<EdgeId, f64>;

fn weight_of(weights: &WeightMap, edge: EdgeId) -> f64 {
    weights.get(&edge).copied().unwrap_or(1.0)
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct QueueEntry {
    cost: f64,
    node: NodeId,
}

impl Eq for QueueEntry {}

impl Ord for QueueEntry {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.cost
            .total_cmp(&other.cost)
            .then_with(|| self.node.cmp(&other.node))
    }
}

impl PartialOrd for QueueEntry {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

fn rebuild_path(
    predecessors: &BTreeMap<NodeId, NodeId>,
    start: NodeId,
    goal: NodeId,
) -> Vec<NodeId> {
    let mut path = vec![goal];
    let mut current = goal;
    while current != start {
        match predecessors.get(&current) {
            Some(previous) => {
                current = *previous;
                path.push(current);
            }
            None => return Vec::new(),
        }
    }
    path.reverse();
    path
}

/// Dijkstra distances from `start`, with optional early exit once `goal` is
/// settled. Precondition: non-negative weights; negative entries make the
/// result meaningless (use [`bellman_ford`] instead).
pub fn dijkstra(
    graph: &BaseGraph,
    start: NodeId,
    goal: Option<NodeId>,
    weights: &WeightMap,
) -> BTreeMap<NodeId, f64> {
    let mut distances: BTreeMap<NodeId, f64> = BTreeMap::new();
    let mut heap = BinaryHeap::new();
    distances.insert(start, 0.0);
    heap.push(Reverse(QueueEntry {
        cost: 0.0,
        node: start,
    }));
    while let Some(Reverse(entry)) = heap.pop() {
        if distances
            .get(&entry.node)
            .is_some_and(|best| entry.cost > *best)
        {
            continue;
        }
        if goal == Some(entry.node) {
            break;
        }
        for (next, edge) in adjacency::weighted_neighbours(graph, entry.node) {
            let candidate = entry.cost + weight_of(weights, edge);
            if distances.get(&next).map_or(true, |best| candidate < *best) {
                distances.insert(next, candidate);
                heap.push(Reverse(QueueEntry {
                    cost: candidate,
                    node: next,
                }));
            }
        }
    }
    distances
}

/// Dijkstra shortest path from `start` to `goal`, or `None` when unreachable.
pub fn dijkstra_path(
    graph: &BaseGraph,
    start: NodeId,
    goal: NodeId,
    weights: &WeightMap,
) -> Option<(Vec<NodeId>, f64)> {
    let mut distances: BTreeMap<NodeId, f64> = BTreeMap::new();
    let mut predecessors: BTreeMap<NodeId, NodeId> = BTreeMap::new();
    let mut heap = BinaryHeap::new();
    distances.insert(start, 0.0);
    heap.push(Reverse(QueueEntry {
        cost: 0.0,
        node: start,
    }));
    while let Some(Reverse(entry)) = heap.pop() {
        if distances
            .get(&entry.node)
            .is_some_and(|best| entry.cost > *best)
        {
            continue;
        }
        if entry.node == goal {
            return Some((rebuild_path(&predecessors, start, goal), entry.cost));
        }
        for (next, edge) in adjacency::weighted_neighbours(graph, entry.node) {
            let candidate = entry.cost + weight_of(weights, edge);
            if distances.get(&next).map_or(true, |best| candidate < *best) {
                distances.insert(next, candidate);
                predecessors.insert(next, entry.node);
                heap.push(Reverse(QueueEntry {
                    cost: candidate,
                    node: next,
                }));
            }
        }
    }
    None
}

/// Bellman-Ford distances from `start`. Handles negative weights; returns
/// `None` when a negative cycle is reachable.
pub fn bellman_ford(
    graph: &BaseGraph,
    start: NodeId,
    weights: &WeightMap,
) -> Option<BTreeMap<NodeId, f64>> {
    let nodes = graph.node_ids();
    let mut distances: BTreeMap<NodeId, f64> = BTreeMap::from([(start, 0.0)]);
    let mut relaxations: Vec<(NodeId, NodeId, f64)> = Vec::new();
    for node in &nodes {
        for (next, edge) in adjacency::weighted_neighbours(graph, *node) {
            relaxations.push((*node, next, weight_of(weights, edge)));
        }
    }
    for _ in 1..nodes.len() {
        let mut changed = false;
        for (from, to, weight) in &relaxations {
            if let Some(base) = distances.get(from).copied() {
                let candidate = base + weight;
                if distances.get(to).map_or(true, |best| candidate < *best) {
                    distances.insert(*to, candidate);
                    changed = true;
                }
            }
        }
        if !changed {
            break;
        }
    }
    for (from, to, weight) in &relaxations {
        if let Some(base) = distances.get(from).copied() {
            if distances.get(to).map_or(true, |best| base + weight < *best) {
                return None;
            }
        }
    }
    Some(distances)
}

/// A* search from `start` to `goal` with a caller-supplied heuristic. The
/// heuristic must be admissible for the result to be optimal.
pub fn a_star<H>(
    graph: &BaseGraph,
    start: NodeId,
    goal: NodeId,
    weights: &WeightMap,
    heuristic: H,
) -> Option<(Vec<NodeId>, f64)>
where
    H: Fn(NodeId) -> f64,
{
    let mut best_known: BTreeMap<NodeId, f64> = BTreeMap::from([(start, 0.0)]);
    let mut predecessors: BTreeMap<NodeId, NodeId> = BTreeMap::new();
    let mut open = BinaryHeap::new();
    open.push(Reverse(QueueEntry {
        cost: heuristic(start),
        node: start,
    }));
    while let Some(Reverse(entry)) = open.pop() {
        let through = best_known.get(&entry.node).copied()?;
        if entry.node == goal {
            return Some((rebuild_path(&predecessors, start, goal), through));
        }
        for (next, edge) in adjacency::weighted_neighbours(graph, entry.node) {
            let candidate = through + weight_of(weights, edge);
            if best_known.get(&next).map_or(true, |best| candidate < *best) {
                best_known.insert(next, candidate);
                predecessors.insert(next, entry.node);
                open.push(Reverse(QueueEntry {
                    cost: candidate + heuristic(next),
                    node: next,
                }));
            }
        }
    }
    None
}

/// One shortest path by hop count from `start` to `goal`, by BFS. `None`
/// when unreachable.
pub fn path_between(graph: &BaseGraph, start: NodeId, goal: NodeId) -> Option<Vec<NodeId>> {
    if start == goal {
        return Some(vec![start]);
    }
    let adjacency = adjacency::directed(graph);
    let mut predecessors: BTreeMap<NodeId, NodeId> = BTreeMap::new();
    let mut queue = std::collections::VecDeque::from([start]);
    while let Some(node) = queue.pop_front() {
        if let Some(neighbours) = adjacency.get(&node) {
            for next in neighbours {
                if *next != start && !predecessors.contains_key(next) {
                    predecessors.insert(*next, node);
                    if *next == goal {
                        return Some(rebuild_path(&predecessors, start, goal));
                    }
                    queue.push_back(*next);
                }
            }
        }
    }
    None
}

/// Cap on the number of paths [`all_paths`] enumerates.
pub const ALL_PATHS_CAP: usize = 10;

/// Up to [`ALL_PATHS_CAP`] simple paths from `start` to `goal` by depth-first
/// enumeration, in lexicographic neighbour order.
pub fn all_paths(graph: &BaseGraph, start: NodeId, goal: NodeId) -> Vec<Vec<NodeId>> {
    let adjacency = adjacency::directed(graph);
    let mut found = Vec::new();
    let mut path = vec![start];
    let mut cursors: Vec<Vec<NodeId>> = vec![adjacency
        .get(&start)
        .map(|n| n.iter().rev().copied().collect())
        .unwrap_or_default()];
    if start == goal {
        return vec![vec![start]];
    }
    while !path.is_empty() && found.len() < ALL_PATHS_CAP {
        let depth = path.len() - 1;
        match cursors[depth].pop() {
            Some(next) if next == goal => {
                let mut complete = path.clone();
                complete.push(goal);
                found.push(complete);
            }
            Some(next) if !path.contains(&next) => {
                path.push(next);
                cursors.push(
                    adjacency
                        .get(&next)
                        .map(|n| n.iter().rev().copied().collect())
                        .unwrap_or_default(),
                );
            }
            Some(_) => {}
            None => {
                path.pop();
                cursors.pop();
            }
        }
    }
    found
}

/// All-pairs shortest distances via Floyd-Warshall over unit hop counts.
/// Used by closeness centrality and the distance matrices of clustering.
pub fn floyd_warshall_hops(graph: &BaseGraph) -> BTreeMap<(NodeId, NodeId), f64> {
    let nodes = graph.node_ids();
    let adjacency = adjacency::directed(graph);
    let mut distances: BTreeMap<(NodeId, NodeId), f64> = BTreeMap::new();
    for a in &nodes {
        for b in &nodes {
            let distance = if a == b {
                0.0
            } else if adjacency.get(a).is_some_and(|n| n.contains(b)) {
                1.0
            } else {
                f64::INFINITY
            };
            distances.insert((*a, *b), distance);
        }
    }
    for k in &nodes {
        for i in &nodes {
            for j in &nodes {
                let through = distances[&(*i, *k)] + distances[&(*k, *j)];
                if through < distances[&(*i, *j)] {
                    distances.insert((*i, *j), through);
                }
            }
        }
    }
    distances
}
