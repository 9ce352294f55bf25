//! Classic data structures expressed over the graph substrate.
//!
//! Each structure keeps one substrate node per element so generic graph
//! tooling (validation, serialization, hashing) applies to it, with shape
//! and payload held in side tables. Rotation-heavy trees keep their links
//! purely in side tables; build-once structures also mirror their shape as
//! directed substrate edges.

#![deny(missing_docs)]

pub mod avl;
pub mod binomial;
pub mod bplus;
pub mod btree;
pub mod fenwick;
pub mod fibonacci;
pub mod merkle;
pub mod redblack;
pub mod scapegoat;
pub mod segment;
pub mod spatial;
pub mod splay;
pub mod treap;
pub mod trie;

pub use avl::AvlTree;
pub use binomial::BinomialHeap;
pub use bplus::BPlusTree;
pub use btree::BTree;
pub use fenwick::FenwickTree;
pub use fibonacci::FibonacciHeap;
pub use merkle::{MerkleTree, ProofStep, Side};
pub use redblack::{Colour, RbTree};
pub use scapegoat::{ScapegoatTree, DEFAULT_ALPHA};
pub use segment::{Aggregate, SegmentTree};
pub use spatial::{Cuboid, OctTree, QuadTree, Rect};
pub use splay::SplayTree;
pub use treap::Treap;
pub use trie::Trie;
