//! Budgeted Hamilton path and cycle search.

use std::collections::{BTreeMap, BTreeSet};

use poly_core::NodeId;
use poly_graph::BaseGraph;

use crate::adjacency;
use crate::budget::{SearchBudget, SearchOutcome};

fn search(
    adjacency: &BTreeMap<NodeId, BTreeSet<NodeId>>,
    nodes: &[NodeId],
    start: NodeId,
    cycle: bool,
    budget: &mut SearchBudget,
) -> SearchOutcome<Vec<NodeId>> {
    let total = nodes.len();
    let mut path: Vec<NodeId> = vec![start];
    let mut on_path: BTreeSet<NodeId> = BTreeSet::from([start]);
    let mut cursors: Vec<Vec<NodeId>> = vec![adjacency
        .get(&start)
        .map(|n| n.iter().rev().copied().collect())
        .unwrap_or_default()];
    while !path.is_empty() {
        if !budget.spend() {
            return SearchOutcome::Exhausted;
        }
        if path.len() == total {
            let closes = adjacency
                .get(&path[total - 1])
                .is_some_and(|n| n.contains(&start));
            if !cycle || closes {
                return SearchOutcome::Found(path);
            }
            let done = path.pop();
            cursors.pop();
            if let Some(node) = done {
                on_path.remove(&node);
            }
            continue;
        }
        let depth = path.len() - 1;
        match cursors[depth].pop() {
            Some(next) if !on_path.contains(&next) => {
                path.push(next);
                on_path.insert(next);
                cursors.push(
                    adjacency
                        .get(&next)
                        .map(|n| n.iter().rev().copied().collect())
                        .unwrap_or_default(),
                );
            }
            Some(_) => {}
            None => {
                let done = path.pop();
                cursors.pop();
                if let Some(node) = done {
                    on_path.remove(&node);
                }
            }
        }
    }
    SearchOutcome::Absent
}

/// Finds a Hamilton path visiting every node once, trying each start node in
/// ascending order under a shared step budget.
pub fn hamilton_path(graph: &BaseGraph, budget: &mut SearchBudget) -> SearchOutcome<Vec<NodeId>> {
    let nodes = graph.node_ids();
    if nodes.is_empty() {
        return SearchOutcome::Absent;
    }
    if nodes.len() == 1 {
        return SearchOutcome::Found(nodes);
    }
    let adjacency = adjacency::directed(graph);
    let mut exhausted = false;
    for start in &nodes {
        match search(&adjacency, &nodes, *start, false, budget) {
            SearchOutcome::Found(path) => return SearchOutcome::Found(path),
            SearchOutcome::Exhausted => {
                exhausted = true;
                break;
            }
            SearchOutcome::Absent => {}
        }
    }
    if exhausted {
        SearchOutcome::Exhausted
    } else {
        SearchOutcome::Absent
    }
}

/// Finds a Hamilton cycle. The returned path lists each node once; the edge
/// back to the first node closes the cycle. Any start node works for a cycle,
/// so only the smallest id is tried.
pub fn hamilton_cycle(graph: &BaseGraph, budget: &mut SearchBudget) -> SearchOutcome<Vec<NodeId>> {
    let nodes = graph.node_ids();
    let Some(start) = nodes.first().copied() else {
        return SearchOutcome::Absent;
    };
    if nodes.len() == 1 {
        return SearchOutcome::Found(nodes);
    }
    let adjacency = adjacency::directed(graph);
    search(&adjacency, &nodes, start, true, budget)
}
