//! Hypergraphs on the graph substrate.
//!
//! A [`Hypergraph`] requires every edge to carry the multi-endpoint block,
//! and keeps the primary endpoint pair coherent with its sets through every
//! mutation. [`analysis`] supplies the derived-graph constructions and the
//! cut/cluster/transversal algorithms.

#![deny(missing_docs)]

pub mod analysis;
pub mod hypergraph;

pub use hypergraph::Hypergraph;
