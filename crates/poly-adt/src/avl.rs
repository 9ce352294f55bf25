//! AVL tree with incremental height maintenance.

use std::collections::BTreeMap;

use poly_core::NodeId;
use poly_graph::{BaseGraph, Node};

/// Height-balanced search tree. Links and heights live in side tables; every
/// insert walks back up the path recomputing heights and applying one of the
/// four rotation cases where the balance factor leaves `[-1, 1]`.
#[derive(Debug, Clone)]
pub struct AvlTree {
    graph: BaseGraph,
    root: Option<NodeId>,
    keys: BTreeMap<NodeId, i64>,
    left: BTreeMap<NodeId, NodeId>,
    right: BTreeMap<NodeId, NodeId>,
    parents: BTreeMap<NodeId, NodeId>,
    heights: BTreeMap<NodeId, i64>,
}

impl AvlTree {
    /// Creates an empty tree.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            graph: BaseGraph::new(name),
            root: None,
            keys: BTreeMap::new(),
            left: BTreeMap::new(),
            right: BTreeMap::new(),
            parents: BTreeMap::new(),
            heights: BTreeMap::new(),
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

    /// Height of a node's subtree; absent nodes count -1.
    pub fn height(&self, node: Option<NodeId>) -> i64 {
        node.and_then(|id| self.heights.get(&id).copied()).unwrap_or(-1)
    }

    /// Left height minus right height.
    pub fn balance_factor(&self, node: NodeId) -> i64 {
        self.height(self.left.get(&node).copied()) - self.height(self.right.get(&node).copied())
    }

    /// Finds the node holding a key.
    pub fn find(&self, key: i64) -> Option<NodeId> {
        let mut current = self.root;
        while let Some(node) = current {
            let stored = self.keys[&node];
            if key == stored {
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

    /// Inserts a key and rebalances the insertion path. Duplicates go right.
    pub fn insert(&mut self, key: i64) -> NodeId {
        let id = self.graph.add_node(Node::new(key.to_string()));
        self.keys.insert(id, key);
        self.heights.insert(id, 0);

        let Some(root) = self.root else {
            self.root = Some(id);
            return id;
        };
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

        // Walk back to the root, fixing heights and the first imbalance.
        let mut cursor = Some(current);
        while let Some(node) = cursor {
            self.refresh_height(node);
            let balance = self.balance_factor(node);
            if balance > 1 {
                let child = self.left[&node];
                if self.balance_factor(child) < 0 {
                    self.rotate_left(child);
                }
                self.rotate_right(node);
            } else if balance < -1 {
                let child = self.right[&node];
                if self.balance_factor(child) > 0 {
                    self.rotate_right(child);
                }
                self.rotate_left(node);
            }
            cursor = self.parents.get(&node).copied();
        }
        id
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

    fn refresh_height(&mut self, node: NodeId) {
        let height = 1 + self
            .height(self.left.get(&node).copied())
            .max(self.height(self.right.get(&node).copied()));
        self.heights.insert(node, height);
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
        self.refresh_height(node);
        self.refresh_height(pivot);
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
        self.refresh_height(node);
        self.refresh_height(pivot);
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
