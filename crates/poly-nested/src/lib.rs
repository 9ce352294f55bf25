//! Graph-in-graph hierarchies on the substrate.
//!
//! A [`NestedGraph`] holds member graphs in an arena keyed by graph id, with
//! nodes owning child graphs through containment links. [`ops`] adds
//! structural pattern matching, agglomerative clustering and `/`-separated
//! path queries over the hierarchy.

#![deny(missing_docs)]

pub mod nested;
pub mod ops;

pub use nested::NestedGraph;
