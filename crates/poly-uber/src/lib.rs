//! Ubergraphs and typed ubergraphs on the graph substrate.
//!
//! An [`Ubergraph`] lets edges carry the node-capability block and stand in
//! as endpoints for other edges. [`TypedUbergraph`] layers a [`TypeSystem`]
//! registry with a subtype hierarchy and connection allow-lists on top.
//! [`semantic`] holds similarity-based matching, the forward-chaining rule
//! engine, provenance logs and multigraph traversal.

#![deny(missing_docs)]

pub mod semantic;
pub mod typed;
pub mod ubergraph;

pub use semantic::{EdgePattern, Inference, ProvenanceLog, Rule, SIMILARITY_THRESHOLD};
pub use typed::{TypeSystem, TypedUbergraph, DEFAULT_TYPE};
pub use ubergraph::Ubergraph;
