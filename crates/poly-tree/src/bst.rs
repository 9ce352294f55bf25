//! Binary search tree operations, with AVL-style rotation rebalancing.
//!
//! The shape lives in explicit left/right child tables beside the substrate
//! graph; [`Bst::to_tree`] materializes the containment view for the generic
//! tree algorithms.

use std::collections::BTreeMap;

use poly_core::NodeId;
use poly_graph::{BaseGraph, Node};

use crate::tree::TreeGraph;

/// A keyed binary search tree over substrate nodes.
#[derive(Debug, Clone)]
pub struct Bst {
    graph: BaseGraph,
    root: Option<NodeId>,
    keys: BTreeMap<NodeId, i64>,
    left: BTreeMap<NodeId, NodeId>,
    right: BTreeMap<NodeId, NodeId>,
    parents: BTreeMap<NodeId, NodeId>,
}

impl Bst {
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

    /// The substrate graph holding the payload nodes.
    pub fn graph(&self) -> &BaseGraph {
        &self.graph
    }

    /// Root node, if any.
    pub fn root(&self) -> Option<NodeId> {
        self.root
    }

    /// Key of `node`.
    pub fn key(&self, node: NodeId) -> Option<i64> {
        self.keys.get(&node).copied()
    }

    /// Number of keys.
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// Whether the tree is empty.
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Inserts a key, returning the new node. Duplicate keys go right.
    pub fn insert(&mut self, key: i64) -> NodeId {
        let id = self.graph.add_node(Node::new(key.to_string()));
        self.keys.insert(id, key);
        let Some(mut cursor) = self.root else {
            self.root = Some(id);
            return id;
        };
        loop {
            let next = if key < self.keys[&cursor] {
                self.left.get(&cursor).copied()
            } else {
                self.right.get(&cursor).copied()
            };
            match next {
                Some(child) => cursor = child,
                None => {
                    if key < self.keys[&cursor] {
                        self.left.insert(cursor, id);
                    } else {
                        self.right.insert(cursor, id);
                    }
                    self.parents.insert(id, cursor);
                    return id;
                }
            }
        }
    }

    /// Finds the node holding `key`.
    pub fn find(&self, key: i64) -> Option<NodeId> {
        let mut cursor = self.root;
        while let Some(node) = cursor {
            match key.cmp(&self.keys[&node]) {
                std::cmp::Ordering::Equal => return Some(node),
                std::cmp::Ordering::Less => cursor = self.left.get(&node).copied(),
                std::cmp::Ordering::Greater => cursor = self.right.get(&node).copied(),
            }
        }
        None
    }

    fn replace_child(&mut self, parent: Option<NodeId>, old: NodeId, new: Option<NodeId>) {
        match parent {
            None => self.root = new,
            Some(parent) => {
                if self.left.get(&parent) == Some(&old) {
                    match new {
                        Some(new) => {
                            self.left.insert(parent, new);
                        }
                        None => {
                            self.left.remove(&parent);
                        }
                    }
                } else if self.right.get(&parent) == Some(&old) {
                    match new {
                        Some(new) => {
                            self.right.insert(parent, new);
                        }
                        None => {
                            self.right.remove(&parent);
                        }
                    }
                }
            }
        }
        if let Some(new) = new {
            match parent {
                Some(parent) => {
                    self.parents.insert(new, parent);
                }
                None => {
                    self.parents.remove(&new);
                }
            }
        }
    }

    /// Deletes `key`, returning whether it was present. The two-children
    /// case splices the in-order successor into the deleted node's place.
    pub fn delete(&mut self, key: i64) -> bool {
        let Some(node) = self.find(key) else {
            return false;
        };
        let target = match (self.left.get(&node), self.right.get(&node)) {
            (Some(_), Some(right)) => {
                // In-order successor: leftmost of the right subtree.
                let mut successor = *right;
                while let Some(next) = self.left.get(&successor) {
                    successor = *next;
                }
                let moved_key = self.keys[&successor];
                let moved_label = self
                    .graph
                    .node(successor)
                    .map(|n| n.label.clone())
                    .unwrap_or_default();
                self.keys.insert(node, moved_key);
                if let Some(payload) = self.graph.node_mut(node) {
                    payload.label = moved_label;
                }
                successor
            }
            _ => node,
        };
        // `target` has at most one child.
        let child = self
            .left
            .get(&target)
            .or(self.right.get(&target))
            .copied();
        let parent = self.parents.get(&target).copied();
        self.replace_child(parent, target, child);
        self.left.remove(&target);
        self.right.remove(&target);
        self.parents.remove(&target);
        self.keys.remove(&target);
        let _ = self.graph.remove_node(target);
        true
    }

    /// Keys in ascending order.
    pub fn in_order(&self) -> Vec<i64> {
        let mut out = Vec::new();
        let mut stack = Vec::new();
        let mut cursor = self.root;
        while cursor.is_some() || !stack.is_empty() {
            while let Some(node) = cursor {
                stack.push(node);
                cursor = self.left.get(&node).copied();
            }
            if let Some(node) = stack.pop() {
                out.push(self.keys[&node]);
                cursor = self.right.get(&node).copied();
            }
        }
        out
    }

    /// Height of the subtree at `node` in edges; a leaf is 0, absent is -1.
    pub fn height(&self, node: Option<NodeId>) -> i64 {
        let Some(node) = node else {
            return -1;
        };
        let mut best = 0i64;
        let mut stack = vec![(node, 0i64)];
        while let Some((current, level)) = stack.pop() {
            best = best.max(level);
            for child in [self.left.get(&current), self.right.get(&current)]
                .into_iter()
                .flatten()
            {
                stack.push((*child, level + 1));
            }
        }
        best
    }

    /// Balance factor: left height minus right height.
    pub fn balance_factor(&self, node: NodeId) -> i64 {
        self.height(self.left.get(&node).copied()) - self.height(self.right.get(&node).copied())
    }

    /// Left rotation at `node`; no-op without a right child.
    pub fn rotate_left(&mut self, node: NodeId) {
        let Some(pivot) = self.right.get(&node).copied() else {
            return;
        };
        let parent = self.parents.get(&node).copied();
        match self.left.get(&pivot).copied() {
            Some(inner) => {
                self.right.insert(node, inner);
                self.parents.insert(inner, node);
            }
            None => {
                self.right.remove(&node);
            }
        }
        self.left.insert(pivot, node);
        self.parents.insert(node, pivot);
        self.replace_child(parent, node, Some(pivot));
    }

    /// Right rotation at `node`; no-op without a left child.
    pub fn rotate_right(&mut self, node: NodeId) {
        let Some(pivot) = self.left.get(&node).copied() else {
            return;
        };
        let parent = self.parents.get(&node).copied();
        match self.right.get(&pivot).copied() {
            Some(inner) => {
                self.left.insert(node, inner);
                self.parents.insert(inner, node);
            }
            None => {
                self.left.remove(&node);
            }
        }
        self.right.insert(pivot, node);
        self.parents.insert(node, pivot);
        self.replace_child(parent, node, Some(pivot));
    }

    /// Rebalances the whole tree with AVL rotations until every balance
    /// factor is in {-1, 0, 1}.
    pub fn rebalance(&mut self) {
        let cap = self.keys.len().saturating_mul(self.keys.len()) + 8;
        for _ in 0..cap {
            let Some(node) = self.deepest_unbalanced() else {
                return;
            };
            let factor = self.balance_factor(node);
            if factor > 1 {
                let left = self.left.get(&node).copied();
                if left.is_some_and(|l| self.balance_factor(l) < 0) {
                    if let Some(left) = left {
                        self.rotate_left(left);
                    }
                }
                self.rotate_right(node);
            } else {
                let right = self.right.get(&node).copied();
                if right.is_some_and(|r| self.balance_factor(r) > 0) {
                    if let Some(right) = right {
                        self.rotate_right(right);
                    }
                }
                self.rotate_left(node);
            }
        }
    }

    fn deepest_unbalanced(&self) -> Option<NodeId> {
        let mut best: Option<(usize, NodeId)> = None;
        let mut stack: Vec<(NodeId, usize)> = self.root.map(|r| (r, 0)).into_iter().collect();
        while let Some((node, depth)) = stack.pop() {
            let factor = self.balance_factor(node);
            if factor.abs() > 1 && best.map_or(true, |(d, _)| depth > d) {
                best = Some((depth, node));
            }
            for child in [self.left.get(&node), self.right.get(&node)]
                .into_iter()
                .flatten()
            {
                stack.push((*child, depth + 1));
            }
        }
        best.map(|(_, node)| node)
    }

    /// Materializes the containment view as a [`TreeGraph`], left child
    /// before right.
    pub fn to_tree(&self) -> TreeGraph {
        let mut tree = TreeGraph::new(self.graph.name.clone());
        let Some(root) = self.root else {
            return tree;
        };
        let mut mapping = BTreeMap::new();
        let mut queue = std::collections::VecDeque::from([root]);
        while let Some(node) = queue.pop_front() {
            let label = self
                .graph
                .node(node)
                .map(|n| n.label.clone())
                .unwrap_or_default();
            let mapped = match self.parents.get(&node).and_then(|p| mapping.get(p)) {
                Some(parent) => tree.add_child(*parent, Node::new(label)),
                None => tree.add_root(Node::new(label)),
            };
            if let Ok(mapped) = mapped {
                mapping.insert(node, mapped);
            }
            for child in [self.left.get(&node), self.right.get(&node)]
                .into_iter()
                .flatten()
            {
                queue.push_back(*child);
            }
        }
        tree
    }
}
