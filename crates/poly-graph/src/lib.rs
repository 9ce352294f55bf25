//! Polymorphic graph substrate: node/edge primitives with capability blocks,
//! the BaseGraph container, the declarative constraint engine and the
//! snapshot contract.

#![deny(missing_docs)]

pub mod base;
pub mod constraints;
pub mod edge;
pub mod hash;
pub mod node;
pub mod snapshot;

pub use base::BaseGraph;
pub use constraints::{ConstraintSet, PropertyExpression, Requirement, Restriction};
pub use edge::{ConnectionSpan, Edge, EdgeShape, EndpointSets, NodeRole, TypeConstraints};
pub use hash::structural_hash;
pub use node::Node;
pub use snapshot::{
    graph_from_bytes, graph_from_json, graph_to_bytes, graph_to_json, GraphSnapshot,
    SNAPSHOT_SCHEMA,
};
