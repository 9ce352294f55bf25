//! The shared graph container every structural variant builds on.

use std::collections::{BTreeMap, BTreeSet};

use poly_core::{
    errors::{ErrorInfo, PolyError},
    EdgeId, Endpoint, NodeId,
};

use crate::constraints::ConstraintSet;
use crate::edge::Edge;
use crate::node::Node;

/// Identity-map graph container.
///
/// Owns all nodes and edges by identifier, two selection sets and a
/// declarative constraint set. Mutations never validate; callers invoke
/// [`BaseGraph::validate`] when they want the violation list. Iteration
/// orders are deterministic (ordered maps keyed by id).
#[derive(Debug, Clone, PartialEq)]
pub struct BaseGraph {
    /// Display name.
    pub name: String,
    /// Open user payload.
    pub metadata: BTreeMap<String, String>,
    pub(crate) nodes: BTreeMap<NodeId, Node>,
    pub(crate) edges: BTreeMap<EdgeId, Edge>,
    pub(crate) next_node_id: u64,
    pub(crate) next_edge_id: u64,
    pub(crate) selected_nodes: BTreeSet<NodeId>,
    pub(crate) selected_edges: BTreeSet<EdgeId>,
    pub(crate) constraints: ConstraintSet,
}

impl BaseGraph {
    /// Creates an empty graph with the given name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            metadata: BTreeMap::new(),
            nodes: BTreeMap::new(),
            edges: BTreeMap::new(),
            next_node_id: 0,
            next_edge_id: 0,
            selected_nodes: BTreeSet::new(),
            selected_edges: BTreeSet::new(),
            constraints: ConstraintSet::default(),
        }
    }

    // ------------------------------------------------------------------
    // CRUD
    // ------------------------------------------------------------------

    /// Adds a node, assigning and returning its identifier.
    pub fn add_node(&mut self, mut node: Node) -> NodeId {
        let id = NodeId::from_raw(self.next_node_id);
        self.next_node_id += 1;
        node.id = id;
        self.nodes.insert(id, node);
        id
    }

    /// Removes a node, cascading removal to every incident edge and
    /// detaching containment links.
    pub fn remove_node(&mut self, node: NodeId) -> Result<(), PolyError> {
        if !self.nodes.contains_key(&node) {
            return Err(graph_error("unknown-node", "node does not exist")
                .with_context("node", node.as_raw()));
        }
        let incident: Vec<EdgeId> = self
            .edges
            .values()
            .filter(|edge| edge.touches(Endpoint::Node(node)))
            .map(|edge| edge.id)
            .collect();
        for edge in incident {
            self.edges.remove(&edge);
            self.selected_edges.remove(&edge);
        }
        if let Some(removed) = self.nodes.remove(&node) {
            if let Some(parent) = removed.parent {
                if let Some(parent_node) = self.nodes.get_mut(&parent) {
                    parent_node.children.retain(|child| *child != node);
                }
            }
            for child in removed.children {
                if let Some(child_node) = self.nodes.get_mut(&child) {
                    child_node.parent = None;
                }
            }
        }
        self.selected_nodes.remove(&node);
        Ok(())
    }

    /// Adds an edge, assigning and returning its identifier. Endpoint
    /// integrity is a validation concern, not enforced here.
    pub fn add_edge(&mut self, mut edge: Edge) -> EdgeId {
        let id = EdgeId::from_raw(self.next_edge_id);
        self.next_edge_id += 1;
        edge.id = id;
        self.edges.insert(id, edge);
        id
    }

    /// Removes an edge.
    pub fn remove_edge(&mut self, edge: EdgeId) -> Result<(), PolyError> {
        if self.edges.remove(&edge).is_none() {
            return Err(graph_error("unknown-edge", "edge does not exist")
                .with_context("edge", edge.as_raw()));
        }
        self.selected_edges.remove(&edge);
        Ok(())
    }

    /// Re-inserts an edge under its previous identifier. Supports the
    /// speculative-insert/rollback pattern used by variant `add_edge_safe`
    /// operations.
    pub fn restore_edge(&mut self, edge: Edge) {
        self.next_edge_id = self.next_edge_id.max(edge.id.as_raw() + 1);
        self.edges.insert(edge.id, edge);
    }

    // ------------------------------------------------------------------
    // Queries
    // ------------------------------------------------------------------

    /// Looks up a node.
    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(&id)
    }

    /// Looks up a node for in-place mutation.
    pub fn node_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(&id)
    }

    /// Looks up an edge.
    pub fn edge(&self, id: EdgeId) -> Option<&Edge> {
        self.edges.get(&id)
    }

    /// Looks up an edge for in-place mutation.
    pub fn edge_mut(&mut self, id: EdgeId) -> Option<&mut Edge> {
        self.edges.get_mut(&id)
    }

    /// Iterates over all nodes in id order.
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.values()
    }

    /// Iterates over all edges in id order.
    pub fn edges(&self) -> impl Iterator<Item = &Edge> {
        self.edges.values()
    }

    /// All node identifiers in id order.
    pub fn node_ids(&self) -> Vec<NodeId> {
        self.nodes.keys().copied().collect()
    }

    /// All edge identifiers in id order.
    pub fn edge_ids(&self) -> Vec<EdgeId> {
        self.edges.keys().copied().collect()
    }

    /// Number of nodes.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of edges.
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Edges leaving the given endpoint. Undirected edges count on both
    /// sides.
    pub fn edges_from_endpoint(&self, endpoint: Endpoint) -> Vec<&Edge> {
        self.edges
            .values()
            .filter(|edge| {
                edge.all_sources().contains(&endpoint)
                    || (!edge.directed && edge.all_targets().contains(&endpoint))
            })
            .collect()
    }

    /// Edges arriving at the given endpoint. Undirected edges count on both
    /// sides.
    pub fn edges_to_endpoint(&self, endpoint: Endpoint) -> Vec<&Edge> {
        self.edges
            .values()
            .filter(|edge| {
                edge.all_targets().contains(&endpoint)
                    || (!edge.directed && edge.all_sources().contains(&endpoint))
            })
            .collect()
    }

    /// Edges leaving the given node.
    pub fn edges_from(&self, node: NodeId) -> Vec<&Edge> {
        self.edges_from_endpoint(Endpoint::Node(node))
    }

    /// Edges arriving at the given node.
    pub fn edges_to(&self, node: NodeId) -> Vec<&Edge> {
        self.edges_to_endpoint(Endpoint::Node(node))
    }

    /// All edges touching the given node on either side, regardless of
    /// direction.
    pub fn edges_touching(&self, node: NodeId) -> Vec<&Edge> {
        self.edges
            .values()
            .filter(|edge| edge.touches(Endpoint::Node(node)))
            .collect()
    }

    /// Nodes reachable from `node` by following one outgoing edge.
    pub fn connected_nodes(&self, node: NodeId) -> Vec<NodeId> {
        let mut out = BTreeSet::new();
        for edge in self.edges_from(node) {
            for target in edge.target_nodes() {
                if target != node {
                    out.insert(target);
                }
            }
            if !edge.directed {
                for source in edge.source_nodes() {
                    if source != node {
                        out.insert(source);
                    }
                }
            }
        }
        out.into_iter().collect()
    }

    /// Neighbours of `node` ignoring direction.
    pub fn neighbours(&self, node: NodeId) -> Vec<NodeId> {
        let mut out = BTreeSet::new();
        for edge in self.edges_touching(node) {
            for endpoint in edge.all_endpoints() {
                if let Some(other) = endpoint.as_node() {
                    if other != node {
                        out.insert(other);
                    }
                }
            }
        }
        out.into_iter().collect()
    }

    /// The first edge between two nodes in either primary role, if any.
    pub fn edge_between(&self, a: NodeId, b: NodeId) -> Option<&Edge> {
        self.edges.values().find(|edge| {
            let (src, dst) = (Endpoint::Node(a), Endpoint::Node(b));
            (edge.all_sources().contains(&src) && edge.all_targets().contains(&dst))
                || (!edge.directed
                    && edge.all_sources().contains(&dst)
                    && edge.all_targets().contains(&src))
        })
    }

    /// Outbound degree.
    pub fn out_degree(&self, node: NodeId) -> usize {
        self.edges_from(node).len()
    }

    /// Inbound degree.
    pub fn in_degree(&self, node: NodeId) -> usize {
        self.edges_to(node).len()
    }

    /// Total degree ignoring direction.
    pub fn degree(&self, node: NodeId) -> usize {
        self.edges_touching(node).len()
    }

    // ------------------------------------------------------------------
    // Selection
    // ------------------------------------------------------------------

    /// Toggles node selection, returning the new state.
    pub fn toggle_node_selection(&mut self, node: NodeId) -> bool {
        if self.selected_nodes.remove(&node) {
            false
        } else {
            self.selected_nodes.insert(node);
            true
        }
    }

    /// Toggles edge selection, returning the new state.
    pub fn toggle_edge_selection(&mut self, edge: EdgeId) -> bool {
        if self.selected_edges.remove(&edge) {
            false
        } else {
            self.selected_edges.insert(edge);
            true
        }
    }

    /// Currently selected nodes.
    pub fn selected_nodes(&self) -> &BTreeSet<NodeId> {
        &self.selected_nodes
    }

    /// Currently selected edges.
    pub fn selected_edges(&self) -> &BTreeSet<EdgeId> {
        &self.selected_edges
    }

    /// Clears both selection sets.
    pub fn clear_selection(&mut self) {
        self.selected_nodes.clear();
        self.selected_edges.clear();
    }

    // ------------------------------------------------------------------
    // Constraints & validation
    // ------------------------------------------------------------------

    /// The declared constraint set.
    pub fn constraints(&self) -> &ConstraintSet {
        &self.constraints
    }

    /// The declared constraint set, mutable.
    pub fn constraints_mut(&mut self) -> &mut ConstraintSet {
        &mut self.constraints
    }

    /// Validates the graph, returning one human-readable violation per
    /// failure. Never errors; an empty vector means the graph is valid.
    ///
    /// Structural integrity is checked first (dangling endpoints, endpoint
    /// sets missing their primary pair, spans out of order, edge endpoints
    /// referencing edges without node capability), then the declared
    /// constraint set is evaluated.
    pub fn validate(&self) -> Vec<String> {
        let mut violations = self.structural_violations();
        violations.extend(self.constraints.evaluate(self));
        violations
    }

    pub(crate) fn structural_violations(&self) -> Vec<String> {
        let mut violations = Vec::new();
        for edge in self.edges.values() {
            for endpoint in edge.all_endpoints() {
                match endpoint {
                    Endpoint::Node(node) => {
                        if !self.nodes.contains_key(&node) {
                            violations.push(format!(
                                "edge {} references missing node {}",
                                edge.id.as_raw(),
                                node.as_raw()
                            ));
                        }
                    }
                    Endpoint::Edge(other) => match self.edges.get(&other) {
                        None => violations.push(format!(
                            "edge {} references missing edge {}",
                            edge.id.as_raw(),
                            other.as_raw()
                        )),
                        Some(referenced) if !referenced.is_node_capable() => {
                            violations.push(format!(
                                "edge {} references edge {} which is not node-capable",
                                edge.id.as_raw(),
                                other.as_raw()
                            ));
                        }
                        Some(_) => {}
                    },
                }
            }
            if let Some(sets) = &edge.endpoint_sets {
                if !sets.sources.contains(&edge.source) {
                    violations.push(format!(
                        "edge {} endpoint sets omit the primary source",
                        edge.id.as_raw()
                    ));
                }
                if !sets.targets.contains(&edge.target) {
                    violations.push(format!(
                        "edge {} endpoint sets omit the primary target",
                        edge.id.as_raw()
                    ));
                }
                if sets.sources.is_empty() || sets.targets.is_empty() {
                    violations.push(format!(
                        "edge {} has an empty endpoint set",
                        edge.id.as_raw()
                    ));
                }
            }
            if !edge.span.is_ordered() {
                violations.push(format!(
                    "edge {} has an out-of-order connection span",
                    edge.id.as_raw()
                ));
            }
        }
        for node in self.nodes.values() {
            if let Some(parent) = node.parent {
                if !self.nodes.contains_key(&parent) {
                    violations.push(format!(
                        "node {} references missing parent {}",
                        node.id.as_raw(),
                        parent.as_raw()
                    ));
                }
            }
            for child in &node.children {
                if !self.nodes.contains_key(child) {
                    violations.push(format!(
                        "node {} references missing child {}",
                        node.id.as_raw(),
                        child.as_raw()
                    ));
                }
            }
        }
        violations
    }
}

pub(crate) fn graph_error(code: impl Into<String>, message: impl Into<String>) -> PolyError {
    PolyError::Graph(ErrorInfo::new(code, message))
}

pub(crate) trait ContextExt {
    fn with_context(self, key: impl Into<String>, value: impl ToString) -> PolyError;
}

impl ContextExt for PolyError {
    fn with_context(self, key: impl Into<String>, value: impl ToString) -> PolyError {
        match self {
            PolyError::Graph(info) => PolyError::Graph(info.with_context(key, value.to_string())),
            PolyError::Algo(info) => PolyError::Algo(info.with_context(key, value.to_string())),
            other => other,
        }
    }
}
