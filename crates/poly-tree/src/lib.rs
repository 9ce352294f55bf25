//! Rooted trees on the graph substrate.
//!
//! [`TreeGraph`] stores parent/child structure both as containment fields and
//! as directed edges, [`ops`] supplies the traversal and measurement
//! algorithms, and [`bst`] adds keyed binary-search-tree maintenance with
//! AVL rotation rebalancing.

#![deny(missing_docs)]

pub mod bst;
pub mod ops;
pub mod tree;

pub use bst::Bst;
pub use tree::TreeGraph;
