#![deny(missing_docs)]
#![doc = "Core identifiers, errors and deterministic utilities for the polygraph substrate."]

use serde::{Deserialize, Serialize};

pub mod errors;
pub mod provenance;
pub mod rng;

pub use errors::{ErrorInfo, PolyError};
pub use provenance::SchemaVersion;
pub use rng::{derive_substream_seed, RngHandle};

/// Identifier for a node within a graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct NodeId(u64);

impl NodeId {
    /// Creates a new identifier from its raw integer representation.
    pub fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    /// Returns the raw integer representation of the identifier.
    pub fn as_raw(&self) -> u64 {
        self.0
    }
}

/// Identifier for an edge within a graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EdgeId(u64);

impl EdgeId {
    /// Creates a new identifier from its raw integer representation.
    pub fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    /// Returns the raw integer representation of the identifier.
    pub fn as_raw(&self) -> u64 {
        self.0
    }
}

/// Identifier for a graph inside a nested-graph arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct GraphId(u64);

impl GraphId {
    /// Creates a new identifier from its raw integer representation.
    pub fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    /// Returns the raw integer representation of the identifier.
    pub fn as_raw(&self) -> u64 {
        self.0
    }
}

/// An endpoint of an edge: either a node or, in ubergraphs, another edge
/// acting as a node. Externally tagged so the variant survives both the JSON
/// and the bincode snapshot codecs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Endpoint {
    /// An ordinary node endpoint.
    Node(NodeId),
    /// An edge acting as a node. Legal only when the referenced edge carries
    /// the node-capability block.
    Edge(EdgeId),
}

impl Endpoint {
    /// Returns the node identifier when the endpoint is a node.
    pub fn as_node(&self) -> Option<NodeId> {
        match self {
            Endpoint::Node(id) => Some(*id),
            Endpoint::Edge(_) => None,
        }
    }

    /// Returns the edge identifier when the endpoint is an edge-as-node.
    pub fn as_edge(&self) -> Option<EdgeId> {
        match self {
            Endpoint::Node(_) => None,
            Endpoint::Edge(id) => Some(*id),
        }
    }

    /// Short diagnostic rendering used in violation messages.
    pub fn describe(&self) -> String {
        match self {
            Endpoint::Node(id) => format!("node {}", id.as_raw()),
            Endpoint::Edge(id) => format!("edge {}", id.as_raw()),
        }
    }
}
