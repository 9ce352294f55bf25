//! DAG algorithms driven by a topological order.

use std::collections::{BTreeMap, BTreeSet};

use poly_core::{NodeId, PolyError};

use crate::dag::DagGraph;

/// Longest path in edges anywhere in the DAG, as the node sequence. Empty
/// graphs yield an empty path. Fails on a cyclic graph.
pub fn longest_path(dag: &DagGraph) -> Result<Vec<NodeId>, PolyError> {
    let order = dag.topological_sort()?;
    let adjacency = poly_algo::adjacency::directed(dag.graph());
    let mut best_length: BTreeMap<NodeId, usize> = BTreeMap::new();
    let mut predecessor: BTreeMap<NodeId, NodeId> = BTreeMap::new();
    for node in &order {
        let here = best_length.get(node).copied().unwrap_or(0);
        if let Some(outs) = adjacency.get(node) {
            for next in outs {
                if here + 1 > best_length.get(next).copied().unwrap_or(0) {
                    best_length.insert(*next, here + 1);
                    predecessor.insert(*next, *node);
                }
            }
        }
    }
    let Some(end) = order
        .iter()
        .max_by_key(|node| (best_length.get(node).copied().unwrap_or(0), std::cmp::Reverse(**node)))
        .copied()
    else {
        return Ok(Vec::new());
    };
    let mut path = vec![end];
    let mut cursor = end;
    while let Some(previous) = predecessor.get(&cursor) {
        cursor = *previous;
        path.push(cursor);
    }
    path.reverse();
    Ok(path)
}

/// Critical path: the longest chain of dependencies, returned with its
/// length in edges.
pub fn critical_path(dag: &DagGraph) -> Result<(Vec<NodeId>, usize), PolyError> {
    let path = longest_path(dag)?;
    let length = path.len().saturating_sub(1);
    Ok((path, length))
}

/// Fewest-edge path from `start` to `goal` using the topological order, or
/// `None` when `goal` is unreachable.
pub fn shortest_path(
    dag: &DagGraph,
    start: NodeId,
    goal: NodeId,
) -> Result<Option<Vec<NodeId>>, PolyError> {
    let order = dag.topological_sort()?;
    let adjacency = poly_algo::adjacency::directed(dag.graph());
    let mut best: BTreeMap<NodeId, usize> = BTreeMap::from([(start, 0)]);
    let mut predecessor: BTreeMap<NodeId, NodeId> = BTreeMap::new();
    for node in &order {
        let Some(here) = best.get(node).copied() else {
            continue;
        };
        if let Some(outs) = adjacency.get(node) {
            for next in outs {
                if best.get(next).map_or(true, |known| here + 1 < *known) {
                    best.insert(*next, here + 1);
                    predecessor.insert(*next, *node);
                }
            }
        }
    }
    if !best.contains_key(&goal) {
        return Ok(None);
    }
    let mut path = vec![goal];
    let mut cursor = goal;
    while cursor != start {
        match predecessor.get(&cursor) {
            Some(previous) => {
                cursor = *previous;
                path.push(cursor);
            }
            None => return Ok(None),
        }
    }
    path.reverse();
    Ok(Some(path))
}

/// Layer assignment: each node's layer is the longest path from any source.
/// Returned as layers in ascending order.
pub fn layers(dag: &DagGraph) -> Result<Vec<Vec<NodeId>>, PolyError> {
    let order = dag.topological_sort()?;
    let adjacency = poly_algo::adjacency::directed(dag.graph());
    let mut level: BTreeMap<NodeId, usize> = BTreeMap::new();
    for node in &order {
        let here = level.get(node).copied().unwrap_or(0);
        if let Some(outs) = adjacency.get(node) {
            for next in outs {
                let candidate = here + 1;
                if candidate > level.get(next).copied().unwrap_or(0) {
                    level.insert(*next, candidate);
                }
            }
        }
    }
    let depth = order
        .iter()
        .map(|node| level.get(node).copied().unwrap_or(0))
        .max()
        .map(|d| d + 1)
        .unwrap_or(0);
    let mut out = vec![Vec::new(); depth];
    for node in order {
        out[level.get(&node).copied().unwrap_or(0)].push(node);
    }
    Ok(out)
}

/// Reachability closure: for every node, the set of nodes reachable from it.
pub fn transitive_closure(
    dag: &DagGraph,
) -> Result<BTreeMap<NodeId, BTreeSet<NodeId>>, PolyError> {
    let order = dag.topological_sort()?;
    let adjacency = poly_algo::adjacency::directed(dag.graph());
    let mut closure: BTreeMap<NodeId, BTreeSet<NodeId>> = BTreeMap::new();
    for node in order.iter().rev() {
        let mut reachable = BTreeSet::new();
        if let Some(outs) = adjacency.get(node) {
            for next in outs {
                reachable.insert(*next);
                if let Some(beyond) = closure.get(next) {
                    reachable.extend(beyond.iter().copied());
                }
            }
        }
        closure.insert(*node, reachable);
    }
    Ok(closure)
}

/// Smallest possible height over source choices: the minimum, over sources,
/// of the longest path length starting there. An empty DAG has height 0.
pub fn minimum_height(dag: &DagGraph) -> Result<usize, PolyError> {
    let adjacency = poly_algo::adjacency::directed(dag.graph());
    let order = dag.topological_sort()?;
    // Longest path length starting at each node, computed leaves first.
    let mut reach_depth: BTreeMap<NodeId, usize> = BTreeMap::new();
    for node in order.iter().rev() {
        let deepest = adjacency
            .get(node)
            .into_iter()
            .flatten()
            .map(|next| reach_depth.get(next).copied().unwrap_or(0) + 1)
            .max()
            .unwrap_or(0);
        reach_depth.insert(*node, deepest);
    }
    Ok(dag
        .sources()
        .into_iter()
        .map(|source| reach_depth.get(&source).copied().unwrap_or(0))
        .min()
        .unwrap_or(0))
}

/// Number of distinct paths from `start` to `goal`.
pub fn count_paths(dag: &DagGraph, start: NodeId, goal: NodeId) -> Result<u64, PolyError> {
    let order = dag.topological_sort()?;
    let adjacency = poly_algo::adjacency::directed(dag.graph());
    let mut counts: BTreeMap<NodeId, u64> = BTreeMap::from([(start, 1)]);
    for node in &order {
        let Some(here) = counts.get(node).copied() else {
            continue;
        };
        if here == 0 {
            continue;
        }
        if let Some(outs) = adjacency.get(node) {
            for next in outs {
                *counts.entry(*next).or_insert(0) += here;
            }
        }
    }
    Ok(counts.get(&goal).copied().unwrap_or(0))
}
