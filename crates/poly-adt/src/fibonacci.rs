//! Fibonacci heap with lazy consolidation.

use std::collections::BTreeMap;

use poly_core::NodeId;
use poly_graph::{BaseGraph, Node};

#[derive(Debug, Clone, Default)]
struct FibNode {
    degree: usize,
    marked: bool,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

/// Min-heap with a circular doubly linked root list. Inserts and merges are
/// lazy; trees are consolidated by degree only when the minimum is removed.
#[derive(Debug, Clone)]
pub struct FibonacciHeap {
    graph: BaseGraph,
    keys: BTreeMap<NodeId, i64>,
    nodes: BTreeMap<NodeId, FibNode>,
    /// Circular root list links.
    left: BTreeMap<NodeId, NodeId>,
    right: BTreeMap<NodeId, NodeId>,
    min: Option<NodeId>,
}

impl FibonacciHeap {
    /// Creates an empty heap.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            graph: BaseGraph::new(name),
            keys: BTreeMap::new(),
            nodes: BTreeMap::new(),
            left: BTreeMap::new(),
            right: BTreeMap::new(),
            min: None,
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

    /// Inserts a key into the root list.
    pub fn insert(&mut self, key: i64) -> NodeId {
        let id = self.graph.add_node(Node::new(key.to_string()));
        self.keys.insert(id, key);
        self.nodes.insert(id, FibNode::default());
        self.splice_root(id);
        id
    }

    /// Absorbs another heap by concatenating root lists.
    pub fn merge(&mut self, other: FibonacciHeap) {
        let mut remap: BTreeMap<NodeId, NodeId> = BTreeMap::new();
        for (node, key) in &other.keys {
            let id = self.graph.add_node(Node::new(key.to_string()));
            self.keys.insert(id, *key);
            remap.insert(*node, id);
        }
        for (old, new) in &remap {
            let source = &other.nodes[old];
            self.nodes.insert(
                *new,
                FibNode {
                    degree: source.degree,
                    marked: source.marked,
                    parent: source.parent.map(|p| remap[&p]),
                    children: source.children.iter().map(|c| remap[c]).collect(),
                },
            );
        }
        for root in other.roots() {
            self.splice_root(remap[&root]);
        }
    }

    /// The node with the minimum key.
    pub fn find_min(&self) -> Option<NodeId> {
        self.min
    }

    /// The minimum key.
    pub fn peek(&self) -> Option<i64> {
        self.min.map(|node| self.keys[&node])
    }

    /// Removes and returns the minimum key, consolidating the root list.
    pub fn pop_min(&mut self) -> Option<i64> {
        let min = self.min?;
        let children = self.nodes[&min].children.clone();
        for child in &children {
            if let Some(node) = self.nodes.get_mut(child) {
                node.parent = None;
                node.marked = false;
            }
        }
        let mut roots: Vec<NodeId> = self
            .roots()
            .into_iter()
            .filter(|root| *root != min)
            .collect();
        roots.extend(children);
        let key = self.keys.remove(&min);
        self.nodes.remove(&min);
        self.left.remove(&min);
        self.right.remove(&min);
        let _ = self.graph.remove_node(min);
        self.consolidate(roots);
        key
    }

    /// Lowers a key. Returns false for unknown nodes or a larger key. A
    /// heap-order violation cuts the node to the root list, cascading
    /// through marked ancestors.
    pub fn decrease_key(&mut self, node: NodeId, key: i64) -> bool {
        let Some(current) = self.keys.get(&node).copied() else {
            return false;
        };
        if key > current {
            return false;
        }
        self.keys.insert(node, key);
        if let Some(parent) = self.nodes[&node].parent {
            if key < self.keys[&parent] {
                self.cut(node, parent);
                self.cascading_cut(parent);
            }
        }
        if let Some(min) = self.min {
            if key < self.keys[&min] {
                self.min = Some(node);
            }
        }
        true
    }

    /// Roots in root-list order starting at the minimum.
    fn roots(&self) -> Vec<NodeId> {
        let Some(start) = self.min else {
            return Vec::new();
        };
        let mut roots = vec![start];
        let mut cursor = self.right[&start];
        while cursor != start {
            roots.push(cursor);
            cursor = self.right[&cursor];
        }
        roots
    }

    fn splice_root(&mut self, id: NodeId) {
        match self.min {
            None => {
                self.left.insert(id, id);
                self.right.insert(id, id);
                self.min = Some(id);
            }
            Some(min) => {
                let after = self.right[&min];
                self.right.insert(min, id);
                self.left.insert(id, min);
                self.right.insert(id, after);
                self.left.insert(after, id);
                if self.keys[&id] < self.keys[&min] {
                    self.min = Some(id);
                }
            }
        }
    }

    /// Links equal-degree trees until every root has a distinct degree,
    /// then rebuilds the root list and the minimum pointer.
    fn consolidate(&mut self, roots: Vec<NodeId>) {
        let mut slots: BTreeMap<usize, NodeId> = BTreeMap::new();
        for root in roots {
            let mut tree = root;
            loop {
                let degree = self.nodes[&tree].degree;
                match slots.remove(&degree) {
                    None => {
                        slots.insert(degree, tree);
                        break;
                    }
                    Some(existing) => {
                        let (top, bottom) = if self.keys[&existing] <= self.keys[&tree] {
                            (existing, tree)
                        } else {
                            (tree, existing)
                        };
                        if let Some(node) = self.nodes.get_mut(&bottom) {
                            node.parent = Some(top);
                            node.marked = false;
                        }
                        if let Some(node) = self.nodes.get_mut(&top) {
                            node.children.push(bottom);
                            node.degree += 1;
                        }
                        tree = top;
                    }
                }
            }
        }
        self.left.clear();
        self.right.clear();
        self.min = None;
        for tree in slots.into_values() {
            self.splice_root(tree);
        }
    }

    fn cut(&mut self, child: NodeId, parent: NodeId) {
        if let Some(node) = self.nodes.get_mut(&parent) {
            node.children.retain(|c| *c != child);
            node.degree = node.degree.saturating_sub(1);
        }
        if let Some(node) = self.nodes.get_mut(&child) {
            node.parent = None;
            node.marked = false;
        }
        self.splice_root(child);
    }

    fn cascading_cut(&mut self, start: NodeId) {
        let mut node = start;
        while let Some(parent) = self.nodes[&node].parent {
            if !self.nodes[&node].marked {
                if let Some(entry) = self.nodes.get_mut(&node) {
                    entry.marked = true;
                }
                break;
            }
            self.cut(node, parent);
            node = parent;
        }
    }
}
