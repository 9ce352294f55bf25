//! Snapshot serialization for graphs.
//!
//! A snapshot is the self-describing structured record consumed by file I/O,
//! clipboard and undo/redo collaborators. Round-tripping a graph through its
//! snapshot reproduces an identical validation result.

use poly_core::{
    errors::{ErrorInfo, PolyError},
    EdgeId, NodeId, SchemaVersion,
};
use serde::{Deserialize, Serialize};

use crate::base::BaseGraph;
use crate::constraints::ConstraintSet;
use crate::edge::Edge;
use crate::node::Node;

/// Schema version written into every snapshot produced by this crate.
pub const SNAPSHOT_SCHEMA: SchemaVersion = SchemaVersion::new(1, 0, 0);

/// Serialized form of a [`BaseGraph`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphSnapshot {
    /// Schema version of the writer.
    pub schema: SchemaVersion,
    /// Graph display name.
    pub name: String,
    /// Graph metadata payload.
    pub metadata: std::collections::BTreeMap<String, String>,
    /// All nodes, in id order.
    pub nodes: Vec<Node>,
    /// All edges, in id order.
    pub edges: Vec<Edge>,
    /// Declared constraint set.
    pub constraints: ConstraintSet,
    /// Selected node ids.
    #[serde(default)]
    pub selected_nodes: Vec<NodeId>,
    /// Selected edge ids.
    #[serde(default)]
    pub selected_edges: Vec<EdgeId>,
    /// Next node id the graph would assign.
    pub next_node_id: u64,
    /// Next edge id the graph would assign.
    pub next_edge_id: u64,
}

impl BaseGraph {
    /// Captures the graph as a snapshot.
    pub fn to_snapshot(&self) -> GraphSnapshot {
        GraphSnapshot {
            schema: SNAPSHOT_SCHEMA,
            name: self.name.clone(),
            metadata: self.metadata.clone(),
            nodes: self.nodes.values().cloned().collect(),
            edges: self.edges.values().cloned().collect(),
            constraints: self.constraints.clone(),
            selected_nodes: self.selected_nodes.iter().copied().collect(),
            selected_edges: self.selected_edges.iter().copied().collect(),
            next_node_id: self.next_node_id,
            next_edge_id: self.next_edge_id,
        }
    }

    /// Rebuilds a graph from a snapshot, checking schema compatibility.
    pub fn from_snapshot(snapshot: GraphSnapshot) -> Result<Self, PolyError> {
        if !SNAPSHOT_SCHEMA.accepts(&snapshot.schema) {
            return Err(serde_error(
                "schema-mismatch",
                "snapshot was written by an incompatible schema",
            )
            .with_major(snapshot.schema.major));
        }
        let mut graph = BaseGraph::new(snapshot.name);
        graph.metadata = snapshot.metadata;
        for node in snapshot.nodes {
            graph.next_node_id = graph.next_node_id.max(node.id().as_raw() + 1);
            graph.nodes.insert(node.id(), node);
        }
        for edge in snapshot.edges {
            graph.next_edge_id = graph.next_edge_id.max(edge.id().as_raw() + 1);
            graph.edges.insert(edge.id(), edge);
        }
        graph.next_node_id = graph.next_node_id.max(snapshot.next_node_id);
        graph.next_edge_id = graph.next_edge_id.max(snapshot.next_edge_id);
        graph.constraints = snapshot.constraints;
        graph.selected_nodes = snapshot.selected_nodes.into_iter().collect();
        graph.selected_edges = snapshot.selected_edges.into_iter().collect();
        Ok(graph)
    }
}

/// Serializes a graph to pretty JSON.
pub fn graph_to_json(graph: &BaseGraph) -> Result<String, PolyError> {
    serde_json::to_string_pretty(&graph.to_snapshot())
        .map_err(|err| serde_error("json-encode", err.to_string()))
}

/// Deserializes a graph from JSON.
pub fn graph_from_json(json: &str) -> Result<BaseGraph, PolyError> {
    let snapshot: GraphSnapshot =
        serde_json::from_str(json).map_err(|err| serde_error("json-decode", err.to_string()))?;
    BaseGraph::from_snapshot(snapshot)
}

/// Serializes a graph to a compact binary payload.
pub fn graph_to_bytes(graph: &BaseGraph) -> Result<Vec<u8>, PolyError> {
    bincode::serialize(&graph.to_snapshot())
        .map_err(|err| serde_error("bincode-encode", err.to_string()))
}

/// Deserializes a graph from a binary payload.
pub fn graph_from_bytes(bytes: &[u8]) -> Result<BaseGraph, PolyError> {
    let snapshot: GraphSnapshot = bincode::deserialize(bytes)
        .map_err(|err| serde_error("bincode-decode", err.to_string()))?;
    BaseGraph::from_snapshot(snapshot)
}

fn serde_error(code: &str, message: impl Into<String>) -> PolyError {
    PolyError::Serde(ErrorInfo::new(code, message))
}

trait MajorExt {
    fn with_major(self, major: u32) -> PolyError;
}

impl MajorExt for PolyError {
    fn with_major(self, major: u32) -> PolyError {
        match self {
            PolyError::Serde(info) => {
                PolyError::Serde(info.with_context("major", major.to_string()))
            }
            other => other,
        }
    }
}
