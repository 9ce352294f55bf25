//! Linked lists on the graph substrate.
//!
//! A [`ListGraph`] keeps its elements as graph nodes chained by directed
//! edges, so the generic graph machinery (validation, snapshots, algorithms)
//! applies unchanged. [`ops`] adds the classic sequence algorithms on top.

#![deny(missing_docs)]

pub mod list;
pub mod ops;

pub use list::ListGraph;
