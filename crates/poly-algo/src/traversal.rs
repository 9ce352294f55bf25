//! Depth-first and breadth-first traversal.

use std::collections::{BTreeSet, VecDeque};

use poly_core::NodeId;
use poly_graph::BaseGraph;

use crate::adjacency;

/// Pre-order depth-first traversal from `start`, calling `visit` on each node
/// as it is first reached. Neighbour order is deterministic (ascending id).
pub fn depth_first<F>(graph: &BaseGraph, start: NodeId, mut visit: F) -> Vec<NodeId>
where
    F: FnMut(NodeId),
{
    let adjacency = adjacency::directed(graph);
    let mut order = Vec::new();
    let mut seen = BTreeSet::new();
    let mut stack = vec![start];
    while let Some(node) = stack.pop() {
        if !adjacency.contains_key(&node) || !seen.insert(node) {
            continue;
        }
        visit(node);
        order.push(node);
        if let Some(neighbours) = adjacency.get(&node) {
            // Reverse push so ascending ids pop first.
            for next in neighbours.iter().rev() {
                if !seen.contains(next) {
                    stack.push(*next);
                }
            }
        }
    }
    order
}

/// Level-order breadth-first traversal from `start`.
pub fn breadth_first<F>(graph: &BaseGraph, start: NodeId, mut visit: F) -> Vec<NodeId>
where
    F: FnMut(NodeId),
{
    let adjacency = adjacency::directed(graph);
    if !adjacency.contains_key(&start) {
        return Vec::new();
    }
    let mut order = Vec::new();
    let mut seen = BTreeSet::from([start]);
    let mut queue = VecDeque::from([start]);
    while let Some(node) = queue.pop_front() {
        visit(node);
        order.push(node);
        if let Some(neighbours) = adjacency.get(&node) {
            for next in neighbours {
                if seen.insert(*next) {
                    queue.push_back(*next);
                }
            }
        }
    }
    order
}
