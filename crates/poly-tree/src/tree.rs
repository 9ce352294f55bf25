//! Rooted-tree specialization of the substrate.

use std::collections::BTreeSet;

use poly_core::{ErrorInfo, NodeId, PolyError};
use poly_graph::{BaseGraph, Edge, Node};

fn tree_error(code: &str, message: impl Into<String>) -> PolyError {
    PolyError::Graph(ErrorInfo::new(code, message))
}

/// A rooted tree stored as a graph. Parent-to-child links exist twice, in
/// step: as directed edges (for the generic algorithms) and as the nodes'
/// containment fields (for ordered sibling access). Mutations through this
/// type keep the two in sync.
#[derive(Debug, Clone)]
pub struct TreeGraph {
    graph: BaseGraph,
}

impl TreeGraph {
    /// Creates an empty tree.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            graph: BaseGraph::new(name),
        }
    }

    /// Wraps an existing graph without checking its shape.
    pub fn from_graph(graph: BaseGraph) -> Self {
        Self { graph }
    }

    /// The underlying graph.
    pub fn graph(&self) -> &BaseGraph {
        &self.graph
    }

    /// Mutable access to the underlying graph.
    pub fn graph_mut(&mut self) -> &mut BaseGraph {
        &mut self.graph
    }

    /// Consumes the tree, returning the underlying graph.
    pub fn into_graph(self) -> BaseGraph {
        self.graph
    }

    /// Number of nodes.
    pub fn len(&self) -> usize {
        self.graph.node_count()
    }

    /// Whether the tree is empty.
    pub fn is_empty(&self) -> bool {
        self.graph.node_count() == 0
    }

    /// The root: the unique node without a parent. Ties (an invalid tree)
    /// resolve to the smallest id.
    pub fn root(&self) -> Option<NodeId> {
        self.graph
            .node_ids()
            .into_iter()
            .find(|id| self.parent(*id).is_none())
    }

    /// Parent of `node`, if any.
    pub fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.graph.node(node).and_then(|n| n.parent)
    }

    /// Children of `node` in insertion order.
    pub fn children(&self, node: NodeId) -> Vec<NodeId> {
        self.graph
            .node(node)
            .map(|n| n.children.clone())
            .unwrap_or_default()
    }

    /// Siblings of `node`: the parent's other children, in order.
    pub fn siblings(&self, node: NodeId) -> Vec<NodeId> {
        match self.parent(node) {
            Some(parent) => self
                .children(parent)
                .into_iter()
                .filter(|child| *child != node)
                .collect(),
            None => Vec::new(),
        }
    }

    /// Ancestors from the parent up to the root. Stops on a containment
    /// cycle.
    pub fn ancestors(&self, node: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut seen = BTreeSet::from([node]);
        let mut cursor = self.parent(node);
        while let Some(current) = cursor {
            if !seen.insert(current) {
                break;
            }
            out.push(current);
            cursor = self.parent(current);
        }
        out
    }

    /// Descendants of `node` in pre-order, excluding `node` itself.
    pub fn descendants(&self, node: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut seen = BTreeSet::from([node]);
        let mut stack: Vec<NodeId> = self.children(node).into_iter().rev().collect();
        while let Some(current) = stack.pop() {
            if !seen.insert(current) {
                continue;
            }
            out.push(current);
            for child in self.children(current).into_iter().rev() {
                stack.push(child);
            }
        }
        out
    }

    /// Depth of `node` below the root; the root is level 0.
    pub fn level(&self, node: NodeId) -> usize {
        self.ancestors(node).len()
    }

    /// Adds a root node to an empty tree.
    pub fn add_root(&mut self, node: Node) -> Result<NodeId, PolyError> {
        if self.root().is_some() {
            return Err(tree_error("root-exists", "tree already has a root"));
        }
        Ok(self.graph.add_node(node))
    }

    /// Adds a child under `parent`, linking both the containment fields and
    /// a directed edge.
    pub fn add_child(&mut self, parent: NodeId, node: Node) -> Result<NodeId, PolyError> {
        if self.graph.node(parent).is_none() {
            return Err(tree_error(
                "node-missing",
                format!("parent node {} is not in the tree", parent.as_raw()),
            ));
        }
        let id = self.graph.add_node(node);
        self.attach(parent, id);
        Ok(id)
    }

    fn attach(&mut self, parent: NodeId, child: NodeId) {
        if let Some(node) = self.graph.node_mut(child) {
            node.parent = Some(parent);
        }
        if let Some(node) = self.graph.node_mut(parent) {
            node.children.push(child);
        }
        self.graph.add_edge(Edge::between(parent, child));
    }

    fn detach(&mut self, child: NodeId) {
        let Some(parent) = self.parent(child) else {
            return;
        };
        if let Some(node) = self.graph.node_mut(child) {
            node.parent = None;
        }
        if let Some(node) = self.graph.node_mut(parent) {
            node.children.retain(|c| *c != child);
        }
        if let Some(edge) = self.graph.edge_between(parent, child).map(|e| e.id()) {
            let _ = self.graph.remove_edge(edge);
        }
    }

    /// Moves `node` (with its whole subtree) under `new_parent`. Rejects a
    /// move under the node itself or any of its descendants.
    pub fn move_subtree(&mut self, node: NodeId, new_parent: NodeId) -> Result<(), PolyError> {
        if self.graph.node(node).is_none() || self.graph.node(new_parent).is_none() {
            return Err(tree_error("node-missing", "both nodes must be in the tree"));
        }
        if node == new_parent || self.descendants(node).contains(&new_parent) {
            return Err(tree_error(
                "containment-cycle",
                "cannot move a subtree under its own descendant",
            ));
        }
        self.detach(node);
        self.attach(new_parent, node);
        Ok(())
    }

    /// Removes `node` and its whole subtree.
    pub fn remove_subtree(&mut self, node: NodeId) -> Result<(), PolyError> {
        let doomed = self.descendants(node);
        self.detach(node);
        for id in doomed.into_iter().rev() {
            self.graph.remove_node(id)?;
        }
        self.graph.remove_node(node)?;
        Ok(())
    }

    /// Induced copy of the subtree rooted at `node`, with fresh ids in the
    /// returned tree.
    pub fn subtree(&self, node: NodeId) -> Option<TreeGraph> {
        self.graph.node(node)?;
        let mut copy = TreeGraph::new(format!("{}-subtree", self.graph.name));
        let mut mapping = std::collections::BTreeMap::new();
        let mut stack = vec![node];
        while let Some(current) = stack.pop() {
            let original = self.graph.node(current)?;
            let mut fresh = original.clone();
            fresh.parent = None;
            fresh.children = Vec::new();
            let new_id = copy.graph.add_node(fresh);
            mapping.insert(current, new_id);
            if let Some(parent) = self.parent(current) {
                if let Some(mapped) = mapping.get(&parent) {
                    copy.attach(*mapped, new_id);
                }
            }
            for child in self.children(current).into_iter().rev() {
                stack.push(child);
            }
        }
        Some(copy)
    }

    /// Structural violations: base integrity plus the tree shape rules.
    pub fn validate(&self) -> Vec<String> {
        let mut violations = Vec::new();
        let nodes = self.graph.node_ids();
        let roots: Vec<NodeId> = nodes
            .iter()
            .filter(|id| self.parent(**id).is_none())
            .copied()
            .collect();
        if !nodes.is_empty() && roots.is_empty() {
            violations.push("tree has no root, containment is cyclic".into());
        }
        if roots.len() > 1 {
            violations.push(format!("tree has {} roots, expected one", roots.len()));
        }
        for node in &nodes {
            if self.graph.in_degree(*node) > 1 {
                violations.push(format!(
                    "node {} has more than one parent edge",
                    node.as_raw()
                ));
            }
        }
        // Reachability from the root must cover every node.
        if let Some(root) = roots.first() {
            let mut covered = BTreeSet::from([*root]);
            covered.extend(self.descendants(*root));
            for node in &nodes {
                if !covered.contains(node) {
                    violations.push(format!(
                        "node {} is not reachable from the root",
                        node.as_raw()
                    ));
                }
            }
        }
        violations.extend(self.graph.validate());
        violations
    }
}
