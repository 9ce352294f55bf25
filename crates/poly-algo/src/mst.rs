//! Minimum spanning trees over undirected views of the graph.

use std::collections::{BTreeMap, BTreeSet};

use poly_core::{EdgeId, NodeId};
use poly_graph::BaseGraph;

use crate::paths::WeightMap;

/// Disjoint-set forest with path compression and union by rank.
#[derive(Debug, Default)]
pub struct UnionFind {
    parents: BTreeMap<NodeId, NodeId>,
    ranks: BTreeMap<NodeId, u32>,
}

impl UnionFind {
    /// Builds a forest of singletons over the given nodes.
    pub fn new(nodes: &[NodeId]) -> Self {
        let mut forest = Self::default();
        for node in nodes {
            forest.parents.insert(*node, *node);
            forest.ranks.insert(*node, 0);
        }
        forest
    }

    /// Representative of the set containing `node`.
    pub fn find(&mut self, node: NodeId) -> NodeId {
        let mut root = node;
        while self.parents[&root] != root {
            root = self.parents[&root];
        }
        let mut current = node;
        while current != root {
            let parent = self.parents[&current];
            self.parents.insert(current, root);
            current = parent;
        }
        root
    }

    /// Merges the sets containing `a` and `b`; returns `false` if they were
    /// already joined.
    pub fn union(&mut self, a: NodeId, b: NodeId) -> bool {
        let root_a = self.find(a);
        let root_b = self.find(b);
        if root_a == root_b {
            return false;
        }
        let rank_a = self.ranks[&root_a];
        let rank_b = self.ranks[&root_b];
        if rank_a < rank_b {
            self.parents.insert(root_a, root_b);
        } else if rank_a > rank_b {
            self.parents.insert(root_b, root_a);
        } else {
            self.parents.insert(root_b, root_a);
            self.ranks.insert(root_a, rank_a + 1);
        }
        true
    }
}

fn candidate_edges(graph: &BaseGraph, weights: &WeightMap) -> Vec<(f64, EdgeId, NodeId, NodeId)> {
    let mut out = Vec::new();
    for edge in graph.edges() {
        let sources = edge.source_nodes();
        let targets = edge.target_nodes();
        let weight = weights.get(&edge.id()).copied().unwrap_or(1.0);
        for source in &sources {
            for target in &targets {
                if source != target {
                    out.push((weight, edge.id(), *source, *target));
                }
            }
        }
    }
    out.sort_by(|a, b| a.0.total_cmp(&b.0).then_with(|| a.1.cmp(&b.1)));
    out
}

/// Kruskal's minimum spanning forest. Returns the chosen edges and total
/// weight; on a disconnected graph the result spans each component.
pub fn kruskal(graph: &BaseGraph, weights: &WeightMap) -> (Vec<EdgeId>, f64) {
    let nodes = graph.node_ids();
    let mut forest = UnionFind::new(&nodes);
    let mut chosen = Vec::new();
    let mut total = 0.0;
    for (weight, edge, source, target) in candidate_edges(graph, weights) {
        if forest.union(source, target) {
            chosen.push(edge);
            total += weight;
        }
    }
    (chosen, total)
}

/// Prim's minimum spanning tree grown from `start`. Covers only the component
/// containing `start`.
pub fn prim(graph: &BaseGraph, start: NodeId, weights: &WeightMap) -> (Vec<EdgeId>, f64) {
    let mut in_tree = BTreeSet::from([start]);
    let mut chosen = Vec::new();
    let mut total = 0.0;
    loop {
        let mut best: Option<(f64, EdgeId, NodeId)> = None;
        for edge in graph.edges() {
            let endpoints: Vec<NodeId> = edge
                .all_endpoints()
                .iter()
                .filter_map(poly_core::Endpoint::as_node)
                .collect();
            let inside = endpoints.iter().any(|n| in_tree.contains(n));
            let outside = endpoints.iter().find(|n| !in_tree.contains(n));
            if let (true, Some(next)) = (inside, outside) {
                let weight = weights.get(&edge.id()).copied().unwrap_or(1.0);
                let candidate = (weight, edge.id(), *next);
                let better = best
                    .as_ref()
                    .map_or(true, |(w, e, _)| weight.total_cmp(w).then(edge.id().cmp(e)).is_lt());
                if better {
                    best = Some(candidate);
                }
            }
        }
        match best {
            Some((weight, edge, next)) => {
                in_tree.insert(next);
                chosen.push(edge);
                total += weight;
            }
            None => break,
        }
    }
    (chosen, total)
}
