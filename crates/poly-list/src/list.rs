//! Linked-list specialization of the substrate.

use std::collections::BTreeSet;

use poly_core::{ErrorInfo, NodeId, PolyError};
use poly_graph::{BaseGraph, Edge, Node};

fn list_error(code: &str, message: impl Into<String>) -> PolyError {
    PolyError::Graph(ErrorInfo::new(code, message))
}

/// A singly linked list stored as a graph: each node has at most one outgoing
/// and one incoming directed edge, and exactly one head. Mutations keep the
/// chain spliced; [`ListGraph::validate`] reports any shape violations.
#[derive(Debug, Clone)]
pub struct ListGraph {
    graph: BaseGraph,
}

impl ListGraph {
    /// Creates an empty list.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            graph: BaseGraph::new(name),
        }
    }

    /// Wraps an existing graph without checking its shape; call
    /// [`ListGraph::validate`] to find out whether it is a list.
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

    /// Consumes the list, returning the underlying graph.
    pub fn into_graph(self) -> BaseGraph {
        self.graph
    }

    /// Number of nodes in the list.
    pub fn len(&self) -> usize {
        self.graph.node_count()
    }

    /// Whether the list is empty.
    pub fn is_empty(&self) -> bool {
        self.graph.node_count() == 0
    }

    /// First node: the unique node with no incoming edge. Ties (an invalid
    /// list) resolve to the smallest id.
    pub fn head(&self) -> Option<NodeId> {
        self.graph
            .node_ids()
            .into_iter()
            .find(|node| self.graph.in_degree(*node) == 0)
    }

    /// Last node: the unique node with no outgoing edge.
    pub fn tail(&self) -> Option<NodeId> {
        self.graph
            .node_ids()
            .into_iter()
            .find(|node| self.graph.out_degree(*node) == 0)
    }

    /// Successor of `node`, if any.
    pub fn next(&self, node: NodeId) -> Option<NodeId> {
        self.graph
            .edges_from(node)
            .first()
            .and_then(|edge| edge.target_nodes().first().copied())
    }

    /// Predecessor of `node`, if any.
    pub fn prev(&self, node: NodeId) -> Option<NodeId> {
        self.graph
            .edges_to(node)
            .first()
            .and_then(|edge| edge.source_nodes().first().copied())
    }

    /// Appends a node at the tail.
    pub fn append(&mut self, node: Node) -> NodeId {
        let tail = self.tail();
        let id = self.graph.add_node(node);
        if let Some(tail) = tail {
            self.graph.add_edge(Edge::between(tail, id));
        }
        id
    }

    /// Prepends a node before the head.
    pub fn prepend(&mut self, node: Node) -> NodeId {
        let head = self.head();
        let id = self.graph.add_node(node);
        if let Some(head) = head {
            self.graph.add_edge(Edge::between(id, head));
        }
        id
    }

    /// Inserts a node after `anchor`, splicing the chain.
    pub fn insert_after(&mut self, anchor: NodeId, node: Node) -> Result<NodeId, PolyError> {
        if self.graph.node(anchor).is_none() {
            return Err(list_error(
                "node-missing",
                format!("anchor node {} is not in the list", anchor.as_raw()),
            ));
        }
        let successor = self.next(anchor);
        if let Some(successor) = successor {
            if let Some(link) = self.graph.edge_between(anchor, successor).map(|e| e.id()) {
                self.graph.remove_edge(link)?;
            }
        }
        let id = self.graph.add_node(node);
        self.graph.add_edge(Edge::between(anchor, id));
        if let Some(successor) = successor {
            self.graph.add_edge(Edge::between(id, successor));
        }
        Ok(id)
    }

    /// Inserts a node before `anchor`, splicing the chain.
    pub fn insert_before(&mut self, anchor: NodeId, node: Node) -> Result<NodeId, PolyError> {
        if self.graph.node(anchor).is_none() {
            return Err(list_error(
                "node-missing",
                format!("anchor node {} is not in the list", anchor.as_raw()),
            ));
        }
        match self.prev(anchor) {
            Some(predecessor) => self.insert_after(predecessor, node),
            None => Ok(self.prepend(node)),
        }
    }

    /// Removes a node and splices its neighbours together.
    pub fn remove(&mut self, node: NodeId) -> Result<(), PolyError> {
        let predecessor = self.prev(node);
        let successor = self.next(node);
        self.graph.remove_node(node)?;
        if let (Some(predecessor), Some(successor)) = (predecessor, successor) {
            self.graph.add_edge(Edge::between(predecessor, successor));
        }
        Ok(())
    }

    /// Nodes in chain order from the head. Stops early on a cycle or fork, so
    /// the result has `len()` entries iff the list is valid.
    pub fn to_vec(&self) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut seen = BTreeSet::new();
        let mut cursor = self.head();
        while let Some(node) = cursor {
            if !seen.insert(node) {
                break;
            }
            out.push(node);
            cursor = self.next(node);
        }
        out
    }

    /// Structural violations: base-graph integrity plus the list shape rules.
    pub fn validate(&self) -> Vec<String> {
        let mut violations = Vec::new();
        let mut heads = 0usize;
        for node in self.graph.node_ids() {
            let out = self.graph.out_degree(node);
            let inward = self.graph.in_degree(node);
            if out > 1 {
                violations.push(format!(
                    "node {} has {out} outgoing edges, a list allows one",
                    node.as_raw()
                ));
            }
            if inward > 1 {
                violations.push(format!(
                    "node {} has {inward} incoming edges, a list allows one",
                    node.as_raw()
                ));
            }
            if inward == 0 {
                heads += 1;
            }
        }
        if !self.graph.node_ids().is_empty() {
            if heads == 0 {
                violations.push("list has no head, the chain is cyclic".into());
            } else if heads > 1 {
                violations.push(format!("list has {heads} heads, expected one"));
            }
        }
        for edge in self.graph.edges() {
            if !edge.directed {
                violations.push(format!(
                    "edge {} is undirected, list links must be directed",
                    edge.id().as_raw()
                ));
            }
        }
        if self.to_vec().len() != self.graph.node_count() {
            violations.push("chain walk from head does not cover every node".into());
        }
        violations.extend(self.graph.validate());
        violations
    }
}
