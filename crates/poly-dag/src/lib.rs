//! Directed acyclic graphs on the graph substrate.
//!
//! [`DagGraph`] enforces nothing on mutation; acyclicity is checked by
//! `validate`, by the speculative [`DagGraph::add_edge_safe`], and by every
//! order-dependent algorithm in [`ops`], which fail with a cycle-detected
//! error naming a node on the offending cycle.

#![deny(missing_docs)]

pub mod dag;
pub mod ops;

pub use dag::DagGraph;
