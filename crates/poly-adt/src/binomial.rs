//! Binomial heap: a forest of binomial trees merged by degree.

use std::collections::BTreeMap;

use poly_core::NodeId;
use poly_graph::{BaseGraph, Node};

#[derive(Debug, Clone, Default)]
struct HeapNode {
    degree: usize,
    parent: Option<NodeId>,
    /// Children, most recently linked first.
    children: Vec<NodeId>,
}

/// Min-heap of binomial trees. The root list holds at most one tree per
/// degree; union links equal-degree trees with the smaller key on top, like
/// binary addition with carries.
#[derive(Debug, Clone)]
pub struct BinomialHeap {
    graph: BaseGraph,
    keys: BTreeMap<NodeId, i64>,
    nodes: BTreeMap<NodeId, HeapNode>,
    /// Root list in ascending degree order.
    roots: Vec<NodeId>,
}

impl BinomialHeap {
    /// Creates an empty heap.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            graph: BaseGraph::new(name),
            keys: BTreeMap::new(),
            nodes: BTreeMap::new(),
            roots: Vec::new(),
        }
    }

    /// The substrate graph holding one node per key.
    pub fn graph(&self) -> &BaseGraph {
        &self.graph
    }

    /// Number of stored keys.
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// Whether the heap is empty.
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Inserts a key as a degree-0 tree and merges carries.
    pub fn insert(&mut self, key: i64) -> NodeId {
        let id = self.graph.add_node(Node::new(key.to_string()));
        self.keys.insert(id, key);
        self.nodes.insert(id, HeapNode::default());
        self.merge_roots(vec![id]);
        id
    }

    /// Absorbs another heap.
    pub fn merge(&mut self, other: BinomialHeap) {
        let mut remap: BTreeMap<NodeId, NodeId> = BTreeMap::new();
        for node in other.keys.keys() {
            let key = other.keys[node];
            let id = self.graph.add_node(Node::new(key.to_string()));
            self.keys.insert(id, key);
            remap.insert(*node, id);
        }
        for (old, new) in &remap {
            let source = &other.nodes[old];
            self.nodes.insert(
                *new,
                HeapNode {
                    degree: source.degree,
                    parent: source.parent.map(|p| remap[&p]),
                    children: source.children.iter().map(|c| remap[c]).collect(),
                },
            );
        }
        let incoming: Vec<NodeId> = other.roots.iter().map(|r| remap[r]).collect();
        self.merge_roots(incoming);
    }

    fn merge_roots(&mut self, incoming: Vec<NodeId>) {
        let mut pending: Vec<NodeId> = std::mem::take(&mut self.roots);
        pending.extend(incoming);
        // One slot per degree; linking a collision produces a carry.
        let mut slots: BTreeMap<usize, NodeId> = BTreeMap::new();
        while let Some(mut tree) = pending.pop() {
            loop {
                let degree = self.nodes[&tree].degree;
                match slots.remove(&degree) {
                    None => {
                        slots.insert(degree, tree);
                        break;
                    }
                    Some(existing) => {
                        tree = self.link(existing, tree);
                    }
                }
            }
        }
        self.roots = slots.into_values().collect();
    }

    /// Links two trees of equal degree, smaller key on top.
    fn link(&mut self, a: NodeId, b: NodeId) -> NodeId {
        let (top, bottom) = if self.keys[&a] <= self.keys[&b] {
            (a, b)
        } else {
            (b, a)
        };
        if let Some(node) = self.nodes.get_mut(&bottom) {
            node.parent = Some(top);
        }
        if let Some(node) = self.nodes.get_mut(&top) {
            node.children.insert(0, bottom);
            node.degree += 1;
        }
        top
    }

    /// The node with the minimum key.
    pub fn find_min(&self) -> Option<NodeId> {
        self.roots
            .iter()
            .copied()
            .min_by_key(|root| (self.keys[root], *root))
    }

    /// The minimum key.
    pub fn peek(&self) -> Option<i64> {
        self.find_min().map(|node| self.keys[&node])
    }

    /// Removes and returns the minimum key; the removed tree's children
    /// rejoin the root list.
    pub fn pop_min(&mut self) -> Option<i64> {
        let min = self.find_min()?;
        self.roots.retain(|root| *root != min);
        let children = self.nodes[&min].children.clone();
        for child in &children {
            if let Some(node) = self.nodes.get_mut(child) {
                node.parent = None;
            }
        }
        self.merge_roots(children);
        let key = self.keys.remove(&min);
        self.nodes.remove(&min);
        let _ = self.graph.remove_node(min);
        key
    }

    /// Degrees of the root trees, ascending; at most one per degree.
    pub fn root_degrees(&self) -> Vec<usize> {
        self.roots.iter().map(|root| self.nodes[root].degree).collect()
    }
}
