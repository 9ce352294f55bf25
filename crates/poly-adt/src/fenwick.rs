//! Fenwick (binary indexed) tree.

use poly_core::NodeId;
use poly_graph::{BaseGraph, Edge, Node};

/// Binary indexed tree over 1-based indices. Each index `i` links to its
/// parent `i - lsb(i)`; the link structure is mirrored as directed edges in
/// the substrate graph.
#[derive(Debug, Clone)]
pub struct FenwickTree {
    graph: BaseGraph,
    nodes: Vec<NodeId>,
    values: Vec<i64>,
}

fn lsb(i: usize) -> usize {
    i & i.wrapping_neg()
}

impl FenwickTree {
    /// Creates a zeroed tree over `size` elements.
    pub fn new(name: impl Into<String>, size: usize) -> Self {
        let mut graph = BaseGraph::new(name);
        let mut nodes = Vec::with_capacity(size);
        for i in 1..=size {
            let id = graph.add_node(Node::new(i.to_string()));
            nodes.push(id);
            let parent = i - lsb(i);
            if parent > 0 {
                graph.add_edge(Edge::between(id, nodes[parent - 1]));
            }
        }
        Self {
            graph,
            nodes,
            values: vec![0; size],
        }
    }

    /// The substrate graph with one node per index.
    pub fn graph(&self) -> &BaseGraph {
        &self.graph
    }

    /// Number of elements.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the tree covers no elements.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// The substrate node for a 1-based index.
    pub fn node_at(&self, index: usize) -> Option<NodeId> {
        if index == 0 {
            return None;
        }
        self.nodes.get(index - 1).copied()
    }

    /// Adds `delta` at a 1-based index.
    pub fn update(&mut self, index: usize, delta: i64) -> bool {
        if index == 0 || index > self.values.len() {
            return false;
        }
        let mut i = index;
        while i <= self.values.len() {
            self.values[i - 1] += delta;
            i += lsb(i);
        }
        true
    }

    /// Sum of elements `1..=index`. Indices past the end clamp.
    pub fn prefix_sum(&self, index: usize) -> i64 {
        let mut i = index.min(self.values.len());
        let mut total = 0;
        while i > 0 {
            total += self.values[i - 1];
            i -= lsb(i);
        }
        total
    }

    /// Sum of elements `low..=high`, both 1-based.
    pub fn range_sum(&self, low: usize, high: usize) -> i64 {
        if low > high {
            return 0;
        }
        self.prefix_sum(high) - self.prefix_sum(low.saturating_sub(1))
    }
}
