//! Edge record with optional capability blocks.
//!
//! One flat record replaces the subtype chain of classic designs: an edge is
//! always a primary `(source, target)` pair, and gains hyperedge endpoint
//! sets, node capability, or type constraints by attaching the corresponding
//! block at construction time. Dispatch is on block presence, never on
//! runtime types.

use std::collections::{BTreeMap, BTreeSet};

use poly_core::{EdgeId, Endpoint, NodeId};
use serde::{Deserialize, Serialize};

/// Fractional anchor span along the edge's visual extent.
///
/// Both anchors are clamped to `[0, 1]` and ordered `from <= to`. The span
/// participates in structural queries, so it is validated data rather than
/// pure presentation state.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConnectionSpan {
    from: f64,
    to: f64,
}

impl ConnectionSpan {
    /// Creates a span, clamping both anchors to `[0, 1]` and swapping them if
    /// given out of order.
    pub fn new(from: f64, to: f64) -> Self {
        let from = from.clamp(0.0, 1.0);
        let to = to.clamp(0.0, 1.0);
        if from <= to {
            Self { from, to }
        } else {
            Self { from: to, to: from }
        }
    }

    /// Anchor where the edge leaves its source.
    pub fn from(&self) -> f64 {
        self.from
    }

    /// Anchor where the edge reaches its target.
    pub fn to(&self) -> f64 {
        self.to
    }

    /// Returns whether the stored anchors satisfy the span invariant. Used by
    /// validation after deserializing foreign snapshots.
    pub fn is_ordered(&self) -> bool {
        (0.0..=1.0).contains(&self.from) && (0.0..=1.0).contains(&self.to) && self.from <= self.to
    }
}

impl Default for ConnectionSpan {
    fn default() -> Self {
        Self {
            from: 0.25,
            to: 0.75,
        }
    }
}

/// Multi-endpoint capability block for hyperedges.
///
/// The primary `(source, target)` pair of the owning edge is always a member
/// of the corresponding set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EndpointSets {
    /// Source endpoints, in insertion order.
    pub sources: Vec<Endpoint>,
    /// Target endpoints, in insertion order.
    pub targets: Vec<Endpoint>,
}

impl EndpointSets {
    /// Creates the block seeded with the primary endpoints.
    pub fn seeded(source: Endpoint, target: Endpoint) -> Self {
        Self {
            sources: vec![source],
            targets: vec![target],
        }
    }
}

/// Shape drawn when an edge acts as a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EdgeShape {
    /// Rectangular outline.
    Rectangle,
    /// Elliptical outline.
    Ellipse,
    /// Diamond outline.
    Diamond,
}

/// Node-capability block: present iff the edge may be referenced as an
/// endpoint by other edges.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeRole {
    /// Horizontal position when rendered as a node.
    pub x: f64,
    /// Vertical position when rendered as a node.
    pub y: f64,
    /// Width when rendered as a node.
    pub width: f64,
    /// Height when rendered as a node.
    pub height: f64,
    /// Outline shape when rendered as a node.
    pub shape: EdgeShape,
    /// Attachment anchors for edges connecting to this edge-as-node, keyed by
    /// the attaching edge.
    pub connection_points: BTreeMap<EdgeId, (f64, f64)>,
}

impl Default for NodeRole {
    fn default() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            width: 100.0,
            height: 60.0,
            shape: EdgeShape::Rectangle,
            connection_points: BTreeMap::new(),
        }
    }
}

/// Type-constraint capability block for typed ubergraphs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeConstraints {
    /// Registered edge type name.
    pub edge_type: String,
    /// Allowed source type names; empty means unconstrained.
    pub allowed_sources: BTreeSet<String>,
    /// Allowed target type names; empty means unconstrained.
    pub allowed_targets: BTreeSet<String>,
}

impl TypeConstraints {
    /// Creates an unconstrained block for the given edge type.
    pub fn new(edge_type: impl Into<String>) -> Self {
        Self {
            edge_type: edge_type.into(),
            allowed_sources: BTreeSet::new(),
            allowed_targets: BTreeSet::new(),
        }
    }
}

/// An edge owned by a [`crate::BaseGraph`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    pub(crate) id: EdgeId,
    /// Primary source endpoint.
    pub source: Endpoint,
    /// Primary target endpoint.
    pub target: Endpoint,
    /// Whether the edge is directed.
    pub directed: bool,
    /// Fractional anchors along the edge.
    pub span: ConnectionSpan,
    /// Multi-endpoint block, present for hyperedges.
    pub endpoint_sets: Option<EndpointSets>,
    /// Node-capability block, present for edges usable as nodes.
    pub node_role: Option<NodeRole>,
    /// Type-constraint block, present in typed ubergraphs.
    pub typing: Option<TypeConstraints>,
    /// Open user payload.
    pub metadata: BTreeMap<String, String>,
}

impl Edge {
    /// Creates a directed edge between two nodes.
    pub fn between(source: NodeId, target: NodeId) -> Self {
        Self::from_endpoints(Endpoint::Node(source), Endpoint::Node(target), true)
    }

    /// Creates an undirected edge between two nodes.
    pub fn undirected(a: NodeId, b: NodeId) -> Self {
        Self::from_endpoints(Endpoint::Node(a), Endpoint::Node(b), false)
    }

    /// Creates an edge between arbitrary endpoints. Endpoints that reference
    /// edges are only legal in ubergraphs; validation reports misuse.
    pub fn from_endpoints(source: Endpoint, target: Endpoint, directed: bool) -> Self {
        Self {
            id: EdgeId::from_raw(0),
            source,
            target,
            directed,
            span: ConnectionSpan::default(),
            endpoint_sets: None,
            node_role: None,
            typing: None,
            metadata: BTreeMap::new(),
        }
    }

    /// Creates a directed hyperedge over the given node sets. The primary
    /// pair is the first element of each set.
    ///
    /// Returns `None` when either set is empty.
    pub fn hyper(sources: &[NodeId], targets: &[NodeId]) -> Option<Self> {
        let (&first_source, _) = sources.split_first()?;
        let (&first_target, _) = targets.split_first()?;
        let mut edge = Self::between(first_source, first_target);
        edge.endpoint_sets = Some(EndpointSets {
            sources: sources.iter().copied().map(Endpoint::Node).collect(),
            targets: targets.iter().copied().map(Endpoint::Node).collect(),
        });
        Some(edge)
    }

    /// Attaches the node-capability block, builder style.
    pub fn as_node_capable(mut self) -> Self {
        self.node_role = Some(NodeRole::default());
        self
    }

    /// Attaches a type-constraint block, builder style.
    pub fn typed(mut self, typing: TypeConstraints) -> Self {
        self.typing = Some(typing);
        self
    }

    /// Returns the identifier assigned by the owning graph.
    pub fn id(&self) -> EdgeId {
        self.id
    }

    /// Returns whether the edge carries the multi-endpoint block.
    pub fn is_hyperedge(&self) -> bool {
        self.endpoint_sets.is_some()
    }

    /// Returns whether the edge may be referenced as a node.
    pub fn is_node_capable(&self) -> bool {
        self.node_role.is_some()
    }

    /// All source endpoints: the endpoint set when present, otherwise the
    /// primary source alone.
    pub fn all_sources(&self) -> Vec<Endpoint> {
        match &self.endpoint_sets {
            Some(sets) => sets.sources.clone(),
            None => vec![self.source],
        }
    }

    /// All target endpoints: the endpoint set when present, otherwise the
    /// primary target alone.
    pub fn all_targets(&self) -> Vec<Endpoint> {
        match &self.endpoint_sets {
            Some(sets) => sets.targets.clone(),
            None => vec![self.target],
        }
    }

    /// All endpoints on either side.
    pub fn all_endpoints(&self) -> Vec<Endpoint> {
        let mut endpoints = self.all_sources();
        endpoints.extend(self.all_targets());
        endpoints
    }

    /// Source endpoints restricted to plain nodes.
    pub fn source_nodes(&self) -> Vec<NodeId> {
        self.all_sources().iter().filter_map(Endpoint::as_node).collect()
    }

    /// Target endpoints restricted to plain nodes.
    pub fn target_nodes(&self) -> Vec<NodeId> {
        self.all_targets().iter().filter_map(Endpoint::as_node).collect()
    }

    /// Returns whether the edge touches the given endpoint on either side.
    pub fn touches(&self, endpoint: Endpoint) -> bool {
        self.all_sources().contains(&endpoint) || self.all_targets().contains(&endpoint)
    }

    /// Returns whether two edges share at least one endpoint.
    pub fn shares_endpoint_with(&self, other: &Edge) -> bool {
        let mine: BTreeSet<Endpoint> = self.all_endpoints().into_iter().collect();
        other.all_endpoints().iter().any(|e| mine.contains(e))
    }
}
