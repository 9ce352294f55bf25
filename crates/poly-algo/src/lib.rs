//! Generic graph algorithms over the polymorphic substrate.
//!
//! Every algorithm takes a `&BaseGraph` and reads it only through the query
//! contract, so the same code serves lists, trees, DAGs, and hypergraphs.
//! Weights and capacities live in caller-supplied maps keyed by edge id.
//! Results are deterministic: ties break on ascending ids.

#![deny(missing_docs)]

pub mod adjacency;
pub mod budget;
pub mod centrality;
pub mod components;
pub mod euler;
pub mod flow;
pub mod hamilton;
pub mod matrix;
pub mod mst;
pub mod paths;
pub mod planar;
pub mod properties;
pub mod traversal;

pub use budget::{SearchBudget, SearchOutcome};
pub use paths::WeightMap;
pub use planar::Planarity;
pub use properties::Connectivity;
