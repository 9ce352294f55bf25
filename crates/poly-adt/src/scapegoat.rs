//! Scapegoat tree: weight-ratio-triggered subtree rebuilds.

use std::collections::BTreeMap;

use poly_core::NodeId;
use poly_graph::{BaseGraph, Node};

/// Default weight ratio above which a subtree is rebuilt.
pub const DEFAULT_ALPHA: f64 = 0.7;

/// Search tree balanced without per-node height bookkeeping. After each
/// insert the path is walked upward; the deepest node whose child outweighs
/// `alpha` times its own subtree is rebuilt into a perfectly balanced
/// subtree from its sorted contents.
#[derive(Debug, Clone)]
pub struct ScapegoatTree {
    graph: BaseGraph,
    root: Option<NodeId>,
    keys: BTreeMap<NodeId, i64>,
    left: BTreeMap<NodeId, NodeId>,
    right: BTreeMap<NodeId, NodeId>,
    parents: BTreeMap<NodeId, NodeId>,
    alpha: f64,
}

impl ScapegoatTree {
    /// Creates an empty tree with [`DEFAULT_ALPHA`].
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_alpha(name, DEFAULT_ALPHA)
    }

    /// Creates an empty tree with an explicit ratio, clamped to
    /// `[0.5, 1.0)`.
    pub fn with_alpha(name: impl Into<String>, alpha: f64) -> Self {
        Self {
            graph: BaseGraph::new(name),
            root: None,
            keys: BTreeMap::new(),
            left: BTreeMap::new(),
            right: BTreeMap::new(),
            parents: BTreeMap::new(),
            alpha: alpha.clamp(0.5, 0.999),
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

    /// The configured weight ratio.
    pub fn alpha(&self) -> f64 {
        self.alpha
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

    /// Inserts a key; rebuilds the deepest overweight ancestor if the new
    /// node unbalances the path. Duplicates go right.
    pub fn insert(&mut self, key: i64) -> NodeId {
        let id = self.graph.add_node(Node::new(key.to_string()));
        self.keys.insert(id, key);
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

        // Find the deepest scapegoat on the insertion path.
        let mut child = id;
        let mut cursor = self.parents.get(&id).copied();
        while let Some(node) = cursor {
            let child_weight = self.subtree_size(child) as f64;
            let node_weight = self.subtree_size(node) as f64;
            if child_weight > self.alpha * node_weight {
                self.rebuild(node);
                break;
            }
            child = node;
            cursor = self.parents.get(&node).copied();
        }
        id
    }

    /// Number of nodes in a subtree.
    pub fn subtree_size(&self, node: NodeId) -> usize {
        let mut count = 0;
        let mut stack = vec![node];
        while let Some(current) = stack.pop() {
            count += 1;
            if let Some(left) = self.left.get(&current) {
                stack.push(*left);
            }
            if let Some(right) = self.right.get(&current) {
                stack.push(*right);
            }
        }
        count
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

    /// Height of the tree; empty is -1.
    pub fn height(&self) -> i64 {
        let Some(root) = self.root else {
            return -1;
        };
        let mut best = 0;
        let mut stack = vec![(root, 0i64)];
        while let Some((node, depth)) = stack.pop() {
            best = best.max(depth);
            if let Some(left) = self.left.get(&node) {
                stack.push((*left, depth + 1));
            }
            if let Some(right) = self.right.get(&node) {
                stack.push((*right, depth + 1));
            }
        }
        best
    }

    fn rebuild(&mut self, scapegoat: NodeId) {
        // Flatten the subtree in key order, then relink it as a perfectly
        // balanced tree from the sorted midpoints.
        let mut nodes = Vec::new();
        let mut stack = Vec::new();
        let mut current = Some(scapegoat);
        while current.is_some() || !stack.is_empty() {
            while let Some(node) = current {
                stack.push(node);
                current = self.left.get(&node).copied();
            }
            if let Some(node) = stack.pop() {
                nodes.push(node);
                current = self.right.get(&node).copied();
            }
        }

        let anchor = self.parents.get(&scapegoat).copied();
        let was_left = anchor.is_some_and(|parent| self.left.get(&parent) == Some(&scapegoat));
        for node in &nodes {
            self.left.remove(node);
            self.right.remove(node);
            self.parents.remove(node);
        }

        let new_root = self.relink(&nodes, 0, nodes.len());
        match (anchor, new_root) {
            (Some(parent), Some(root)) => {
                if was_left {
                    self.left.insert(parent, root);
                } else {
                    self.right.insert(parent, root);
                }
                self.parents.insert(root, parent);
            }
            (None, Some(root)) => self.root = Some(root),
            _ => {}
        }
    }

    /// Links `nodes[start..end]` into a balanced subtree; midpoint first,
    /// then halves, using an explicit worklist.
    fn relink(&mut self, nodes: &[NodeId], start: usize, end: usize) -> Option<NodeId> {
        if start >= end {
            return None;
        }
        let mid = (start + end) / 2;
        let root = nodes[mid];
        let mut work = vec![(root, start, mid, true), (root, mid + 1, end, false)];
        while let Some((parent, lo, hi, to_left)) = work.pop() {
            if lo >= hi {
                continue;
            }
            let centre = (lo + hi) / 2;
            let child = nodes[centre];
            if to_left {
                self.left.insert(parent, child);
            } else {
                self.right.insert(parent, child);
            }
            self.parents.insert(child, parent);
            work.push((child, lo, centre, true));
            work.push((child, centre + 1, hi, false));
        }
        Some(root)
    }
}
