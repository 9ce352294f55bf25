//! Connectivity, cycle enumeration, and colouring.

use std::collections::{BTreeMap, BTreeSet, VecDeque};

use poly_core::NodeId;
use poly_graph::BaseGraph;

use crate::adjacency;
use crate::budget::{SearchBudget, SearchOutcome};

/// Connected components of the undirected view, each sorted by id, listed in
/// order of their smallest member.
pub fn connected_components(graph: &BaseGraph) -> Vec<Vec<NodeId>> {
    let adjacency = adjacency::undirected(graph);
    let mut seen: BTreeSet<NodeId> = BTreeSet::new();
    let mut components = Vec::new();
    for start in graph.node_ids() {
        if seen.contains(&start) {
            continue;
        }
        let mut component = Vec::new();
        let mut queue = VecDeque::from([start]);
        seen.insert(start);
        while let Some(node) = queue.pop_front() {
            component.push(node);
            if let Some(neighbours) = adjacency.get(&node) {
                for next in neighbours {
                    if seen.insert(*next) {
                        queue.push_back(*next);
                    }
                }
            }
        }
        component.sort();
        components.push(component);
    }
    components
}

/// Strongly connected components of the directed view (Kosaraju's two-pass
/// scheme), each sorted, listed in order of their smallest member.
pub fn strongly_connected_components(graph: &BaseGraph) -> Vec<Vec<NodeId>> {
    let forward = adjacency::directed(graph);
    let mut reverse: BTreeMap<NodeId, BTreeSet<NodeId>> = BTreeMap::new();
    for node in graph.node_ids() {
        reverse.entry(node).or_default();
    }
    for (from, outs) in &forward {
        for to in outs {
            reverse.entry(*to).or_default().insert(*from);
        }
    }

    // First pass: finish order over the forward graph.
    let mut finished: Vec<NodeId> = Vec::new();
    let mut seen: BTreeSet<NodeId> = BTreeSet::new();
    for start in graph.node_ids() {
        if seen.contains(&start) {
            continue;
        }
        let mut stack: Vec<(NodeId, bool)> = vec![(start, false)];
        while let Some((node, expanded)) = stack.pop() {
            if expanded {
                finished.push(node);
                continue;
            }
            if !seen.insert(node) {
                continue;
            }
            stack.push((node, true));
            if let Some(outs) = forward.get(&node) {
                for next in outs {
                    if !seen.contains(next) {
                        stack.push((*next, false));
                    }
                }
            }
        }
    }

    // Second pass: harvest components over the reverse graph.
    let mut assigned: BTreeSet<NodeId> = BTreeSet::new();
    let mut components = Vec::new();
    for start in finished.into_iter().rev() {
        if assigned.contains(&start) {
            continue;
        }
        let mut component = Vec::new();
        let mut stack = vec![start];
        assigned.insert(start);
        while let Some(node) = stack.pop() {
            component.push(node);
            if let Some(ins) = reverse.get(&node) {
                for next in ins {
                    if assigned.insert(*next) {
                        stack.push(*next);
                    }
                }
            }
        }
        component.sort();
        components.push(component);
    }
    components.sort_by(|a, b| a.first().cmp(&b.first()));
    components
}

/// Bridges of the undirected view, found by trial removal: an edge is a
/// bridge when deleting it grows the component count.
pub fn bridges(graph: &BaseGraph) -> Vec<poly_core::EdgeId> {
    let baseline = connected_components(graph).len();
    let mut out = Vec::new();
    let mut scratch = graph.clone();
    for edge_id in graph.edge_ids() {
        let Some(saved) = scratch.edge(edge_id).cloned() else {
            continue;
        };
        if scratch.remove_edge(edge_id).is_err() {
            continue;
        }
        if connected_components(&scratch).len() > baseline {
            out.push(edge_id);
        }
        scratch.restore_edge(saved);
    }
    out
}

/// Articulation points of the undirected view, found by trial removal: a
/// node is an articulation point when deleting it splits its component.
pub fn articulation_points(graph: &BaseGraph) -> Vec<NodeId> {
    let baseline = connected_components(graph)
        .iter()
        .filter(|c| c.len() > 1)
        .count();
    let singletons = connected_components(graph)
        .iter()
        .filter(|c| c.len() == 1)
        .count();
    let mut out = Vec::new();
    for node in graph.node_ids() {
        if graph.degree(node) == 0 {
            continue;
        }
        let mut scratch = graph.clone();
        if scratch.remove_node(node).is_err() {
            continue;
        }
        let parts = connected_components(&scratch);
        let multi = parts.iter().filter(|c| c.len() > 1).count();
        let lone = parts.iter().filter(|c| c.len() == 1).count();
        if multi + lone > baseline + singletons {
            out.push(node);
        }
    }
    out
}

/// Enumerates simple cycles in the directed view up to `limit` cycles, under
/// the step budget. Each cycle is rotated to start at its smallest node.
pub fn simple_cycles(
    graph: &BaseGraph,
    limit: usize,
    budget: &mut SearchBudget,
) -> SearchOutcome<Vec<Vec<NodeId>>> {
    let adjacency = adjacency::directed(graph);
    let mut cycles: BTreeSet<Vec<NodeId>> = BTreeSet::new();
    for root in graph.node_ids() {
        let mut path: Vec<NodeId> = vec![root];
        let mut on_path: BTreeSet<NodeId> = BTreeSet::from([root]);
        let mut cursors: Vec<Vec<NodeId>> = vec![adjacency
            .get(&root)
            .map(|n| n.iter().rev().copied().collect())
            .unwrap_or_default()];
        while !path.is_empty() {
            if !budget.spend() {
                return SearchOutcome::Exhausted;
            }
            let depth = path.len() - 1;
            match cursors[depth].pop() {
                Some(next) if next == root && path.len() > 1 => {
                    let mut cycle = path.clone();
                    let low = cycle
                        .iter()
                        .enumerate()
                        .min_by_key(|(_, n)| **n)
                        .map(|(i, _)| i)
                        .unwrap_or(0);
                    cycle.rotate_left(low);
                    cycles.insert(cycle);
                    if cycles.len() >= limit {
                        return SearchOutcome::Found(cycles.into_iter().collect());
                    }
                }
                // Only descend to nodes above the root; smaller roots already
                // covered rotations through them.
                Some(next) if next > root && !on_path.contains(&next) => {
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
    }
    if cycles.is_empty() {
        SearchOutcome::Absent
    } else {
        SearchOutcome::Found(cycles.into_iter().collect())
    }
}

/// Greedy colouring over ascending node ids; returns the colour per node.
/// Uses at most max-degree + 1 colours.
pub fn greedy_colouring(graph: &BaseGraph) -> BTreeMap<NodeId, usize> {
    let adjacency = adjacency::undirected(graph);
    let mut colours: BTreeMap<NodeId, usize> = BTreeMap::new();
    for node in graph.node_ids() {
        let taken: BTreeSet<usize> = adjacency
            .get(&node)
            .into_iter()
            .flatten()
            .filter_map(|n| colours.get(n).copied())
            .collect();
        let mut colour = 0;
        while taken.contains(&colour) {
            colour += 1;
        }
        colours.insert(node, colour);
    }
    colours
}
