//! Splay tree: accessed nodes move to the root.

use std::collections::BTreeMap;

use poly_core::NodeId;
use poly_graph::{BaseGraph, Node};

/// Self-adjusting search tree. Every access splays the touched node to the
/// root through zig, zig-zig and zig-zag rotation steps.
#[derive(Debug, Clone)]
pub struct SplayTree {
    graph: BaseGraph,
    root: Option<NodeId>,
    keys: BTreeMap<NodeId, i64>,
    left: BTreeMap<NodeId, NodeId>,
    right: BTreeMap<NodeId, NodeId>,
    parents: BTreeMap<NodeId, NodeId>,
}

impl SplayTree {
    /// Creates an empty tree.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            graph: BaseGraph::new(name),
            root: None,
            keys: BTreeMap::new(),
            left: BTreeMap::new(),
            right: BTreeMap::new(),
            parents: BTreeMap::new(),
        }
    }

    /// The substrate graph holding one node per stored key.
    pub fn graph(&self) -> &BaseGraph {
        &self.graph
    }

    /// The current root, if any.
    pub fn root(&self) -> Option<NodeId> {
        self.root
    }

    /// Number of stored keys.
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// Whether the tree is empty.
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Inserts a key and splays it to the root. Duplicates go right.
    pub fn insert(&mut self, key: i64) -> NodeId {
        let id = self.graph.add_node(Node::new(key.to_string()));
        self.keys.insert(id, key);
        if let Some(root) = self.root {
            let mut current = root;
            loop {
                let side = if key < self.keys[&current] {
                    &mut self.left
                } else {
                    &mut self.right
                };
                match side.get(&current) {
                    Some(next) => current = *next,
                    None => {
                        side.insert(current, id);
                        self.parents.insert(id, current);
                        break;
                    }
                }
            }
        } else {
            self.root = Some(id);
        }
        self.splay(id);
        id
    }

    /// Finds a key, splaying the found node to the root.
    pub fn find(&mut self, key: i64) -> Option<NodeId> {
        let mut current = self.root;
        while let Some(node) = current {
            let stored = self.keys[&node];
            if key == stored {
                self.splay(node);
                return Some(node);
            }
            current = if key < stored {
                self.left.get(&node).copied()
            } else {
                self.right.get(&node).copied()
            };
        }
        None
    }

    /// Splays a node to the root.
    pub fn splay(&mut self, node: NodeId) {
        while let Some(parent) = self.parents.get(&node).copied() {
            let grand = self.parents.get(&parent).copied();
            let node_is_left = self.left.get(&parent) == Some(&node);
            match grand {
                None => {
                    // Zig.
                    if node_is_left {
                        self.rotate_right(parent);
                    } else {
                        self.rotate_left(parent);
                    }
                }
                Some(grand) => {
                    let parent_is_left = self.left.get(&grand) == Some(&parent);
                    match (parent_is_left, node_is_left) {
                        (true, true) => {
                            // Zig-zig.
                            self.rotate_right(grand);
                            self.rotate_right(parent);
                        }
                        (false, false) => {
                            self.rotate_left(grand);
                            self.rotate_left(parent);
                        }
                        (true, false) => {
                            // Zig-zag.
                            self.rotate_left(parent);
                            self.rotate_right(grand);
                        }
                        (false, true) => {
                            self.rotate_right(parent);
                            self.rotate_left(grand);
                        }
                    }
                }
            }
        }
    }

    /// Keys in ascending order.
    pub fn in_order(&self) -> Vec<i64> {
        let mut out = Vec::with_capacity(self.keys.len());
        let mut stack = Vec::new();
        let mut current = self.root;
        while current.is_some() || !stack.is_empty() {
            while let Some(node) = current {
                stack.push(node);
                current = self.left.get(&node).copied();
            }
            if let Some(node) = stack.pop() {
                out.push(self.keys[&node]);
                current = self.right.get(&node).copied();
            }
        }
        out
    }

    fn rotate_left(&mut self, node: NodeId) {
        let Some(pivot) = self.right.get(&node).copied() else {
            return;
        };
        match self.left.remove(&pivot) {
            Some(inner) => {
                self.right.insert(node, inner);
                self.parents.insert(inner, node);
            }
            None => {
                self.right.remove(&node);
            }
        }
        self.replace_in_parent(node, pivot);
        self.left.insert(pivot, node);
        self.parents.insert(node, pivot);
    }

    fn rotate_right(&mut self, node: NodeId) {
        let Some(pivot) = self.left.get(&node).copied() else {
            return;
        };
        match self.right.remove(&pivot) {
            Some(inner) => {
                self.left.insert(node, inner);
                self.parents.insert(inner, node);
            }
            None => {
                self.left.remove(&node);
            }
        }
        self.replace_in_parent(node, pivot);
        self.right.insert(pivot, node);
        self.parents.insert(node, pivot);
    }

    fn replace_in_parent(&mut self, node: NodeId, replacement: NodeId) {
        match self.parents.get(&node).copied() {
            Some(parent) => {
                if self.left.get(&parent) == Some(&node) {
                    self.left.insert(parent, replacement);
                } else {
                    self.right.insert(parent, replacement);
                }
                self.parents.insert(replacement, parent);
            }
            None => {
                self.root = Some(replacement);
                self.parents.remove(&replacement);
            }
        }
    }
}
