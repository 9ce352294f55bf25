//! Ubergraphs: edges that double as nodes.

use poly_core::{EdgeId, Endpoint, ErrorInfo, NodeId, PolyError};
use poly_graph::{BaseGraph, Edge, Node, NodeRole};

fn uber_error(code: &str, message: impl Into<String>) -> PolyError {
    PolyError::Graph(ErrorInfo::new(code, message))
}

fn endpoint_error(code: &str, message: impl Into<String>, endpoint: Endpoint) -> PolyError {
    PolyError::Graph(ErrorInfo::new(code, message).with_context("endpoint", endpoint.describe()))
}

/// A graph in which an edge may be referenced as another edge's endpoint,
/// provided it carries the node-capability block. Promotion and demotion
/// toggle that block; the substrate validation rejects endpoint references
/// to edges without it.
#[derive(Debug, Clone, PartialEq)]
pub struct Ubergraph {
    graph: BaseGraph,
}

impl Ubergraph {
    /// Creates an empty ubergraph.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            graph: BaseGraph::new(name),
        }
    }

    /// Wraps an existing graph without checking it; call [`validate`] after.
    ///
    /// [`validate`]: Ubergraph::validate
    pub fn from_graph(graph: BaseGraph) -> Self {
        Self { graph }
    }

    /// Read access to the underlying graph.
    pub fn graph(&self) -> &BaseGraph {
        &self.graph
    }

    /// Write access to the underlying graph.
    pub fn graph_mut(&mut self) -> &mut BaseGraph {
        &mut self.graph
    }

    /// Consumes the wrapper and returns the underlying graph.
    pub fn into_graph(self) -> BaseGraph {
        self.graph
    }

    /// Adds a node.
    pub fn add_node(&mut self, node: Node) -> NodeId {
        self.graph.add_node(node)
    }

    /// Adds an edge between two endpoints after checking both exist and any
    /// edge endpoint is node-capable.
    pub fn link(&mut self, source: Endpoint, target: Endpoint) -> Result<EdgeId, PolyError> {
        self.check_endpoint(source)?;
        self.check_endpoint(target)?;
        Ok(self.graph.add_edge(Edge::from_endpoints(source, target, true)))
    }

    fn check_endpoint(&self, endpoint: Endpoint) -> Result<(), PolyError> {
        match endpoint {
            Endpoint::Node(node) => {
                if self.graph.node(node).is_none() {
                    return Err(endpoint_error(
                        "unknown-node",
                        "endpoint node does not exist",
                        endpoint,
                    ));
                }
            }
            Endpoint::Edge(edge) => match self.graph.edge(edge) {
                None => {
                    return Err(endpoint_error(
                        "unknown-edge",
                        "endpoint edge does not exist",
                        endpoint,
                    ))
                }
                Some(record) if !record.is_node_capable() => {
                    return Err(endpoint_error(
                        "edge-not-node-capable",
                        "endpoint edge does not carry the node-capability block",
                        endpoint,
                    ))
                }
                Some(_) => {}
            },
        }
        Ok(())
    }

    /// Grants an edge the node-capability block, letting other edges use it
    /// as an endpoint. Promoting twice is a no-op.
    pub fn promote(&mut self, edge: EdgeId) -> Result<(), PolyError> {
        let record = self
            .graph
            .edge_mut(edge)
            .ok_or_else(|| uber_error("unknown-edge", "edge does not exist"))?;
        if record.node_role.is_none() {
            record.node_role = Some(NodeRole::default());
        }
        Ok(())
    }

    /// Removes the node-capability block. Fails while other edges still
    /// reference the edge as an endpoint.
    pub fn demote(&mut self, edge: EdgeId) -> Result<(), PolyError> {
        let referencing = self.edges_to_edge(edge).len();
        if referencing > 0 {
            return Err(PolyError::Graph(
                ErrorInfo::new(
                    "edge-still-referenced",
                    "cannot demote while other edges use this edge as an endpoint",
                )
                .with_context("referencing-edges", referencing.to_string()),
            ));
        }
        let record = self
            .graph
            .edge_mut(edge)
            .ok_or_else(|| uber_error("unknown-edge", "edge does not exist"))?;
        record.node_role = None;
        Ok(())
    }

    /// Whether an edge currently carries the node-capability block.
    pub fn is_edge_node(&self, edge: EdgeId) -> bool {
        self.graph
            .edge(edge)
            .is_some_and(|record| record.is_node_capable())
    }

    /// All node-capable edges in id order.
    pub fn edge_nodes(&self) -> Vec<EdgeId> {
        self.graph
            .edges()
            .filter(|edge| edge.is_node_capable())
            .map(|edge| edge.id())
            .collect()
    }

    /// Edges that reference the given edge as an endpoint, in id order.
    pub fn edges_to_edge(&self, edge: EdgeId) -> Vec<&Edge> {
        self.graph
            .edges()
            .filter(|record| record.touches(Endpoint::Edge(edge)))
            .collect()
    }

    /// Records where an attaching edge anchors on an edge-as-node.
    pub fn add_connection_point(
        &mut self,
        host: EdgeId,
        attaching: EdgeId,
        position: (f64, f64),
    ) -> Result<(), PolyError> {
        if self.graph.edge(attaching).is_none() {
            return Err(uber_error("unknown-edge", "attaching edge does not exist"));
        }
        let record = self
            .graph
            .edge_mut(host)
            .ok_or_else(|| uber_error("unknown-edge", "host edge does not exist"))?;
        let role = record.node_role.as_mut().ok_or_else(|| {
            uber_error(
                "edge-not-node-capable",
                "connection points require the node-capability block",
            )
        })?;
        role.connection_points.insert(attaching, position);
        Ok(())
    }

    /// Drops the anchor recorded for an attaching edge, if present.
    pub fn remove_connection_point(
        &mut self,
        host: EdgeId,
        attaching: EdgeId,
    ) -> Result<(), PolyError> {
        let record = self
            .graph
            .edge_mut(host)
            .ok_or_else(|| uber_error("unknown-edge", "host edge does not exist"))?;
        if let Some(role) = record.node_role.as_mut() {
            role.connection_points.remove(&attaching);
        }
        Ok(())
    }

    /// Substrate violations plus stale connection-point references.
    pub fn validate(&self) -> Vec<String> {
        let mut violations = self.graph.validate();
        for edge in self.graph.edges() {
            if let Some(role) = &edge.node_role {
                for attaching in role.connection_points.keys() {
                    if self.graph.edge(*attaching).is_none() {
                        violations.push(format!(
                            "edge {} holds a connection point for missing edge {}",
                            edge.id().as_raw(),
                            attaching.as_raw()
                        ));
                    }
                }
            }
        }
        violations
    }
}
