//! Red-black tree insertion with the classic fix-up cases.

use std::collections::BTreeMap;

use poly_core::NodeId;
use poly_graph::{BaseGraph, Node};

/// Node colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Colour {
    /// Red nodes may not have red children.
    Red,
    /// Every root-to-leaf path crosses the same number of black nodes.
    Black,
}

/// Search tree keeping the red-black invariants: the root is black, red
/// nodes have black children, and all root-to-leaf paths carry the same
/// black count. Insertion paints the new node red and repairs upward by
/// recolouring, the triangle rotation, then the line rotation.
#[derive(Debug, Clone)]
pub struct RbTree {
    graph: BaseGraph,
    root: Option<NodeId>,
    keys: BTreeMap<NodeId, i64>,
    left: BTreeMap<NodeId, NodeId>,
    right: BTreeMap<NodeId, NodeId>,
    parents: BTreeMap<NodeId, NodeId>,
    colours: BTreeMap<NodeId, Colour>,
}

impl RbTree {
    /// Creates an empty tree.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            graph: BaseGraph::new(name),
            root: None,
            keys: BTreeMap::new(),
            left: BTreeMap::new(),
            right: BTreeMap::new(),
            parents: BTreeMap::new(),
            colours: BTreeMap::new(),
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

    /// A node's colour.
    pub fn colour(&self, node: NodeId) -> Option<Colour> {
        self.colours.get(&node).copied()
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

    /// Inserts a key and repairs the colouring. Duplicates go right.
    pub fn insert(&mut self, key: i64) -> NodeId {
        let id = self.graph.add_node(Node::new(key.to_string()));
        self.keys.insert(id, key);
        self.colours.insert(id, Colour::Red);

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

        self.fix_insert(id);
        id
    }

    fn fix_insert(&mut self, inserted: NodeId) {
        let mut node = inserted;
        loop {
            let Some(parent) = self.parents.get(&node).copied() else {
                self.colours.insert(node, Colour::Black);
                return;
            };
            if self.colours[&parent] == Colour::Black {
                return;
            }
            // A red parent is never the root, so the grandparent exists.
            let Some(grand) = self.parents.get(&parent).copied() else {
                return;
            };
            let parent_is_left = self.left.get(&grand) == Some(&parent);
            let uncle = if parent_is_left {
                self.right.get(&grand).copied()
            } else {
                self.left.get(&grand).copied()
            };

            if let Some(uncle) = uncle {
                if self.colours[&uncle] == Colour::Red {
                    self.colours.insert(parent, Colour::Black);
                    self.colours.insert(uncle, Colour::Black);
                    self.colours.insert(grand, Colour::Red);
                    node = grand;
                    continue;
                }
            }

            let node_is_left = self.left.get(&parent) == Some(&node);
            let (pivot_parent, pivot_grand) = if parent_is_left && !node_is_left {
                // Triangle: rotate the parent first.
                self.rotate_left(parent);
                (node, grand)
            } else if !parent_is_left && node_is_left {
                self.rotate_right(parent);
                (node, grand)
            } else {
                (parent, grand)
            };

            self.colours.insert(pivot_parent, Colour::Black);
            self.colours.insert(pivot_grand, Colour::Red);
            if parent_is_left {
                self.rotate_right(pivot_grand);
            } else {
                self.rotate_left(pivot_grand);
            }
            return;
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

    /// Violations of the colouring invariants.
    pub fn colour_violations(&self) -> Vec<String> {
        let mut violations = Vec::new();
        if let Some(root) = self.root {
            if self.colours[&root] != Colour::Black {
                violations.push("root is red".to_string());
            }
        }
        for (child, parent) in &self.parents {
            if self.colours[child] == Colour::Red && self.colours[parent] == Colour::Red {
                violations.push(format!(
                    "red node {} has a red parent {}",
                    child.as_raw(),
                    parent.as_raw()
                ));
            }
        }
        if let Some(root) = self.root {
            if self.black_height(root).is_none() {
                violations.push("black heights diverge across paths".to_string());
            }
        }
        violations
    }

    fn black_height(&self, node: NodeId) -> Option<i64> {
        // Post-order over an explicit stack; None marks a mismatch.
        let mut heights: BTreeMap<NodeId, i64> = BTreeMap::new();
        let mut stack = vec![(node, false)];
        while let Some((current, expanded)) = stack.pop() {
            if expanded {
                let left = self.left.get(&current).map(|c| heights[c]).unwrap_or(0);
                let right = self.right.get(&current).map(|c| heights[c]).unwrap_or(0);
                if left != right {
                    return None;
                }
                let own = if self.colours[&current] == Colour::Black {
                    1
                } else {
                    0
                };
                heights.insert(current, left + own);
            } else {
                stack.push((current, true));
                if let Some(left) = self.left.get(&current) {
                    stack.push((*left, false));
                }
                if let Some(right) = self.right.get(&current) {
                    stack.push((*right, false));
                }
            }
        }
        heights.get(&node).copied()
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
