//! Hypergraph analysis: traversal, cuts, clustering, transversals, covers.

use std::collections::{BTreeMap, BTreeSet, VecDeque};

use poly_core::{EdgeId, NodeId, RngHandle};
use poly_graph::BaseGraph;

use crate::hypergraph::Hypergraph;

const HILL_CLIMB_ROUNDS: usize = 64;
const POWER_ITERATIONS: usize = 100;
const KMEANS_ROUNDS: usize = 32;

fn node_neighbours(graph: &BaseGraph) -> BTreeMap<NodeId, BTreeSet<NodeId>> {
    let mut adjacency: BTreeMap<NodeId, BTreeSet<NodeId>> = BTreeMap::new();
    for node in graph.node_ids() {
        adjacency.entry(node).or_default();
    }
    for edge in graph.edges() {
        let members: BTreeSet<NodeId> = edge
            .all_endpoints()
            .iter()
            .filter_map(poly_core::Endpoint::as_node)
            .collect();
        for a in &members {
            for b in &members {
                if a != b {
                    adjacency.entry(*a).or_default().insert(*b);
                }
            }
        }
    }
    adjacency
}

/// Nodes reachable from `start` through shared-endpoint closure, in visit
/// order (breadth first, ascending ids per level).
pub fn traverse(hyper: &Hypergraph, start: NodeId) -> Vec<NodeId> {
    let adjacency = node_neighbours(hyper.graph());
    if !adjacency.contains_key(&start) {
        return Vec::new();
    }
    let mut order = Vec::new();
    let mut seen = BTreeSet::from([start]);
    let mut queue = VecDeque::from([start]);
    while let Some(node) = queue.pop_front() {
        order.push(node);
        if let Some(next_set) = adjacency.get(&node) {
            for next in next_set {
                if seen.insert(*next) {
                    queue.push_back(*next);
                }
            }
        }
    }
    order
}

/// Connected components under shared-endpoint closure.
pub fn components(hyper: &Hypergraph) -> Vec<Vec<NodeId>> {
    let mut seen: BTreeSet<NodeId> = BTreeSet::new();
    let mut out = Vec::new();
    for node in hyper.graph().node_ids() {
        if seen.contains(&node) {
            continue;
        }
        let component = traverse(hyper, node);
        seen.extend(component.iter().copied());
        let mut sorted = component;
        sorted.sort();
        out.push(sorted);
    }
    out
}

/// Whether `target` is reachable from `source` through hyperedges.
pub fn connected(hyper: &Hypergraph, source: NodeId, target: NodeId) -> bool {
    traverse(hyper, source).contains(&target)
}

/// Number of hyperedges with endpoints on both sides of the bisection.
fn cut_size(hyper: &Hypergraph, side_a: &BTreeSet<NodeId>) -> usize {
    hyper
        .graph()
        .edges()
        .filter(|edge| {
            let members: Vec<NodeId> = edge
                .all_endpoints()
                .iter()
                .filter_map(poly_core::Endpoint::as_node)
                .collect();
            let inside = members.iter().filter(|n| side_a.contains(n)).count();
            inside > 0 && inside < members.len()
        })
        .count()
}

/// Local-search minimum cut: a seeded random bisection refined by moving
/// boundary nodes while the cut shrinks. Deterministic for a given seed.
/// Returns the two sides and the final cut size.
pub fn min_cut(
    hyper: &Hypergraph,
    rng: &mut RngHandle,
) -> (BTreeSet<NodeId>, BTreeSet<NodeId>, usize) {
    let nodes = hyper.graph().node_ids();
    if nodes.len() < 2 {
        let side_a: BTreeSet<NodeId> = nodes.iter().copied().collect();
        return (side_a, BTreeSet::new(), 0);
    }
    let mut side_a: BTreeSet<NodeId> = BTreeSet::new();
    for node in &nodes {
        if rng.next_unit() < 0.5 {
            side_a.insert(*node);
        }
    }
    // Both sides must be populated for a bisection.
    if side_a.is_empty() {
        side_a.insert(nodes[0]);
    }
    if side_a.len() == nodes.len() {
        side_a.remove(&nodes[nodes.len() - 1]);
    }
    let mut best = cut_size(hyper, &side_a);
    for _ in 0..HILL_CLIMB_ROUNDS {
        let mut improved = false;
        for node in &nodes {
            let on_a = side_a.contains(node);
            if on_a && side_a.len() == 1 {
                continue;
            }
            if !on_a && side_a.len() == nodes.len() - 1 {
                continue;
            }
            if on_a {
                side_a.remove(node);
            } else {
                side_a.insert(*node);
            }
            let candidate = cut_size(hyper, &side_a);
            if candidate < best {
                best = candidate;
                improved = true;
            } else {
                // Revert the move.
                if on_a {
                    side_a.insert(*node);
                } else {
                    side_a.remove(node);
                }
            }
        }
        if !improved {
            break;
        }
    }
    let side_b: BTreeSet<NodeId> = nodes
        .into_iter()
        .filter(|n| !side_a.contains(n))
        .collect();
    (side_a, side_b, best)
}

/// Spectral clustering into `k` groups over the hyperedge-incidence
/// Laplacian. Eigenvectors come from shifted power iteration with
/// deflation; the final assignment is seeded k-means on the spectral rows.
pub fn spectral_clustering(
    hyper: &Hypergraph,
    k: usize,
    rng: &mut RngHandle,
) -> BTreeMap<NodeId, usize> {
    let nodes = hyper.graph().node_ids();
    let n = nodes.len();
    if n == 0 || k == 0 {
        return BTreeMap::new();
    }
    let k = k.min(n);
    let adjacency = node_neighbours(hyper.graph());
    // Laplacian L = D - A over the shared-endpoint adjacency.
    let mut laplacian = vec![vec![0.0f64; n]; n];
    for (i, a) in nodes.iter().enumerate() {
        let neighbours = adjacency.get(a).cloned().unwrap_or_default();
        laplacian[i][i] = neighbours.len() as f64;
        for (j, b) in nodes.iter().enumerate() {
            if neighbours.contains(b) {
                laplacian[i][j] = -1.0;
            }
        }
    }
    // Shift so the smallest eigenvectors of L become the largest of M.
    let shift = 2.0 * laplacian.iter().enumerate().map(|(i, row)| row[i]).fold(1.0, f64::max);
    let m: Vec<Vec<f64>> = (0..n)
        .map(|i| {
            (0..n)
                .map(|j| if i == j { shift - laplacian[i][j] } else { -laplacian[i][j] })
                .collect()
        })
        .collect();
    let mut basis: Vec<Vec<f64>> = Vec::new();
    for _ in 0..k {
        let mut vector: Vec<f64> = (0..n).map(|_| rng.next_unit() - 0.5).collect();
        for _ in 0..POWER_ITERATIONS {
            // Deflate against the basis found so far.
            for prior in &basis {
                let dot: f64 = vector.iter().zip(prior).map(|(x, y)| x * y).sum();
                for (value, p) in vector.iter_mut().zip(prior) {
                    *value -= dot * p;
                }
            }
            let mut next = vec![0.0; n];
            for (i, row) in m.iter().enumerate() {
                next[i] = row.iter().zip(&vector).map(|(a, b)| a * b).sum();
            }
            let norm = next.iter().map(|v| v * v).sum::<f64>().sqrt();
            if norm < 1e-12 {
                break;
            }
            for value in &mut next {
                *value /= norm;
            }
            vector = next;
        }
        basis.push(vector);
    }
    // Spectral embedding: one row per node across the k eigenvectors.
    let rows: Vec<Vec<f64>> = (0..n).map(|i| basis.iter().map(|v| v[i]).collect()).collect();
    kmeans(&nodes, &rows, k, rng)
}

fn kmeans(
    nodes: &[NodeId],
    rows: &[Vec<f64>],
    k: usize,
    rng: &mut RngHandle,
) -> BTreeMap<NodeId, usize> {
    let n = nodes.len();
    let mut centroids: Vec<Vec<f64>> = Vec::new();
    let mut picked = BTreeSet::new();
    while centroids.len() < k {
        let candidate = rng.next_index(n);
        if picked.insert(candidate) {
            centroids.push(rows[candidate].clone());
        }
    }
    let mut assignment = vec![0usize; n];
    for _ in 0..KMEANS_ROUNDS {
        let mut changed = false;
        for (i, row) in rows.iter().enumerate() {
            let nearest = centroids
                .iter()
                .enumerate()
                .min_by(|(_, a), (_, b)| {
                    distance(row, a).total_cmp(&distance(row, b))
                })
                .map(|(index, _)| index)
                .unwrap_or(0);
            if assignment[i] != nearest {
                assignment[i] = nearest;
                changed = true;
            }
        }
        for (cluster, centroid) in centroids.iter_mut().enumerate() {
            let members: Vec<&Vec<f64>> = rows
                .iter()
                .enumerate()
                .filter(|(i, _)| assignment[*i] == cluster)
                .map(|(_, row)| row)
                .collect();
            if members.is_empty() {
                continue;
            }
            for (d, slot) in centroid.iter_mut().enumerate() {
                *slot = members.iter().map(|row| row[d]).sum::<f64>() / members.len() as f64;
            }
        }
        if !changed {
            break;
        }
    }
    nodes
        .iter()
        .zip(assignment)
        .map(|(node, cluster)| (*node, cluster))
        .collect()
}

fn distance(a: &[f64], b: &[f64]) -> f64 {
    a.iter().zip(b).map(|(x, y)| (x - y) * (x - y)).sum()
}

/// Minimal transversals: inclusion-minimal node sets hitting every
/// hyperedge. Exhaustive over subsets in size order, exponential by nature;
/// `limit` caps how many transversals are returned.
pub fn minimal_transversals(hyper: &Hypergraph, limit: usize) -> Vec<BTreeSet<NodeId>> {
    let edge_members: Vec<BTreeSet<NodeId>> = hyper
        .graph()
        .edges()
        .map(|edge| {
            edge.all_endpoints()
                .iter()
                .filter_map(poly_core::Endpoint::as_node)
                .collect()
        })
        .collect();
    if edge_members.is_empty() {
        return vec![BTreeSet::new()];
    }
    let nodes = hyper.graph().node_ids();
    let mut found: Vec<BTreeSet<NodeId>> = Vec::new();
    // Ascending subset size guarantees minimality: any superset of an
    // earlier hit is skipped.
    for size in 1..=nodes.len() {
        for combination in combinations(&nodes, size) {
            let candidate: BTreeSet<NodeId> = combination.into_iter().collect();
            if found.iter().any(|prior| prior.is_subset(&candidate)) {
                continue;
            }
            if edge_members
                .iter()
                .all(|members| !members.is_disjoint(&candidate))
            {
                found.push(candidate);
                if found.len() >= limit {
                    return found;
                }
            }
        }
    }
    found
}

fn combinations(pool: &[NodeId], take: usize) -> Vec<Vec<NodeId>> {
    let mut out = Vec::new();
    if take > pool.len() {
        return out;
    }
    let mut indices: Vec<usize> = (0..take).collect();
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

/// Greedy set cover: repeatedly pick the hyperedge covering the most
/// uncovered nodes until every node incident to any edge is covered.
pub fn greedy_set_cover(hyper: &Hypergraph) -> Vec<EdgeId> {
    let edge_members: BTreeMap<EdgeId, BTreeSet<NodeId>> = hyper
        .graph()
        .edges()
        .map(|edge| {
            let members: BTreeSet<NodeId> = edge
                .all_endpoints()
                .iter()
                .filter_map(poly_core::Endpoint::as_node)
                .collect();
            (edge.id(), members)
        })
        .collect();
    let mut uncovered: BTreeSet<NodeId> = edge_members.values().flatten().copied().collect();
    let mut chosen = Vec::new();
    while !uncovered.is_empty() {
        let best = edge_members
            .iter()
            .filter(|(id, _)| !chosen.contains(*id))
            .max_by_key(|(id, members)| {
                (
                    members.intersection(&uncovered).count(),
                    std::cmp::Reverse(**id),
                )
            })
            .map(|(id, members)| (*id, members.clone()));
        match best {
            Some((id, members)) if members.intersection(&uncovered).count() > 0 => {
                chosen.push(id);
                for member in members {
                    uncovered.remove(&member);
                }
            }
            _ => break,
        }
    }
    chosen
}
