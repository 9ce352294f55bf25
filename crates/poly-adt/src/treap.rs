//! Treap: a binary search tree by key, a max-heap by random priority.

use std::collections::BTreeMap;

use poly_core::{NodeId, RngHandle};
use poly_graph::{BaseGraph, Node};

/// Search-tree links and per-node priorities live in side tables beside the
/// substrate graph; rotations only touch the tables.
#[derive(Debug, Clone)]
pub struct Treap {
    graph: BaseGraph,
    root: Option<NodeId>,
    keys: BTreeMap<NodeId, i64>,
    priorities: BTreeMap<NodeId, f64>,
    left: BTreeMap<NodeId, NodeId>,
    right: BTreeMap<NodeId, NodeId>,
    parents: BTreeMap<NodeId, NodeId>,
    rng: RngHandle,
}

impl Treap {
    /// Creates an empty treap drawing priorities from the seeded stream.
    pub fn new(name: impl Into<String>, rng: RngHandle) -> Self {
        Self {
            graph: BaseGraph::new(name),
            root: None,
            keys: BTreeMap::new(),
            priorities: BTreeMap::new(),
            left: BTreeMap::new(),
            right: BTreeMap::new(),
            parents: BTreeMap::new(),
            rng,
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

    /// Whether the treap is empty.
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// The key stored at a node.
    pub fn key(&self, node: NodeId) -> Option<i64> {
        self.keys.get(&node).copied()
    }

    /// The priority drawn for a node.
    pub fn priority(&self, node: NodeId) -> Option<f64> {
        self.priorities.get(&node).copied()
    }

    /// Inserts a key with a fresh random priority, then rotates the new node
    /// up while its priority beats its parent's. Duplicates go right.
    pub fn insert(&mut self, key: i64) -> NodeId {
        let priority = self.rng.next_unit();
        self.insert_with_priority(key, priority)
    }

    /// Inserts with an explicit priority.
    pub fn insert_with_priority(&mut self, key: i64, priority: f64) -> NodeId {
        let id = self.graph.add_node(Node::new(key.to_string()));
        self.keys.insert(id, key);
        self.priorities.insert(id, priority);

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

        self.bubble_up(id);
        id
    }

    fn bubble_up(&mut self, node: NodeId) {
        while let Some(parent) = self.parents.get(&node).copied() {
            if self.priorities[&node] <= self.priorities[&parent] {
                break;
            }
            if self.left.get(&parent) == Some(&node) {
                self.rotate_right(parent);
            } else {
                self.rotate_left(parent);
            }
        }
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

    /// Deletes a key by rotating its node down to a leaf and unlinking it.
    pub fn delete(&mut self, key: i64) -> bool {
        let Some(node) = self.find(key) else {
            return false;
        };
        loop {
            let left = self.left.get(&node).copied();
            let right = self.right.get(&node).copied();
            match (left, right) {
                (None, None) => break,
                (Some(_), None) => self.rotate_right(node),
                (None, Some(_)) => self.rotate_left(node),
                (Some(l), Some(r)) => {
                    if self.priorities[&l] > self.priorities[&r] {
                        self.rotate_right(node);
                    } else {
                        self.rotate_left(node);
                    }
                }
            }
        }
        match self.parents.remove(&node) {
            Some(parent) => {
                if self.left.get(&parent) == Some(&node) {
                    self.left.remove(&parent);
                } else {
                    self.right.remove(&parent);
                }
            }
            None => self.root = None,
        }
        self.keys.remove(&node);
        self.priorities.remove(&node);
        let _ = self.graph.remove_node(node);
        true
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

    /// Checks the heap property over priorities; used by tests and
    /// validation.
    pub fn heap_violations(&self) -> Vec<String> {
        let mut violations = Vec::new();
        for (child, parent) in &self.parents {
            if self.priorities[child] > self.priorities[parent] {
                violations.push(format!(
                    "node {} outranks its parent {}",
                    child.as_raw(),
                    parent.as_raw()
                ));
            }
        }
        violations
    }

    /// Splits off every key `>= at` into a new treap. Priorities move with
    /// their keys, so both halves keep their heap shape.
    pub fn split(&mut self, at: i64) -> Treap {
        let moved: Vec<(i64, f64)> = self
            .keys
            .iter()
            .filter(|(_, key)| **key >= at)
            .map(|(node, key)| (*key, self.priorities[node]))
            .collect();
        for (key, _) in &moved {
            self.delete(*key);
        }
        let mut high = Treap::new(
            format!("{}-split", self.graph.name),
            RngHandle::from_seed(0),
        );
        for (key, priority) in moved {
            high.insert_with_priority(key, priority);
        }
        high
    }

    /// Absorbs another treap, keeping its priorities.
    pub fn merge(&mut self, other: Treap) {
        let pairs: Vec<(i64, f64)> = other
            .keys
            .iter()
            .map(|(node, key)| (*key, other.priorities[node]))
            .collect();
        for (key, priority) in pairs {
            self.insert_with_priority(key, priority);
        }
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
