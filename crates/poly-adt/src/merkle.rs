//! Merkle hash tree with inclusion proofs.

use std::collections::BTreeMap;

use sha2::{Digest, Sha256};

use poly_core::NodeId;
use poly_graph::{BaseGraph, Edge, Node};

/// Which side a proof sibling sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    /// The sibling hash is prepended when folding.
    Left,
    /// The sibling hash is appended when folding.
    Right,
}

/// One step of an inclusion proof: the sibling digest and its side.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProofStep {
    /// The sibling's digest, hex encoded.
    pub hash: String,
    /// Side of the sibling relative to the running digest.
    pub side: Side,
}

fn digest(input: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(input.as_bytes());
    let out = hasher.finalize();
    let mut hex = String::with_capacity(out.len() * 2);
    for byte in out {
        hex.push_str(&format!("{byte:02x}"));
    }
    hex
}

/// Hash tree built by pairwise folding. Odd nodes at a level are paired with
/// themselves. The substrate graph mirrors the parent-child structure;
/// digests live in a side table.
#[derive(Debug, Clone)]
pub struct MerkleTree {
    graph: BaseGraph,
    root: Option<NodeId>,
    hashes: BTreeMap<NodeId, String>,
    /// Leaves in build order.
    leaves: Vec<NodeId>,
    /// Levels bottom-up, each a list of node ids left to right.
    levels: Vec<Vec<NodeId>>,
}

impl MerkleTree {
    /// Builds a tree over the data items. Empty input builds an empty tree.
    pub fn build(name: impl Into<String>, data: &[&str]) -> Self {
        let mut graph = BaseGraph::new(name);
        let mut hashes = BTreeMap::new();
        let mut leaves = Vec::with_capacity(data.len());
        for item in data {
            let id = graph.add_node(Node::new("leaf"));
            hashes.insert(id, digest(item));
            leaves.push(id);
        }
        let mut levels = vec![leaves.clone()];
        let mut current = leaves.clone();
        while current.len() > 1 {
            let mut next = Vec::with_capacity(current.len().div_ceil(2));
            for pair in current.chunks(2) {
                let left = pair[0];
                let right = pair.get(1).copied().unwrap_or(left);
                let parent = graph.add_node(Node::new("branch"));
                let combined = digest(&format!("{}{}", hashes[&left], hashes[&right]));
                hashes.insert(parent, combined);
                graph.add_edge(Edge::between(parent, left));
                if right != left {
                    graph.add_edge(Edge::between(parent, right));
                }
                next.push(parent);
            }
            levels.push(next.clone());
            current = next;
        }
        let root = current.first().copied();
        Self {
            graph,
            root,
            hashes,
            leaves,
            levels,
        }
    }

    /// The substrate graph mirroring the hash structure.
    pub fn graph(&self) -> &BaseGraph {
        &self.graph
    }

    /// The root digest, hex encoded.
    pub fn root_hash(&self) -> Option<&str> {
        self.root.map(|id| self.hashes[&id].as_str())
    }

    /// Number of data items.
    pub fn len(&self) -> usize {
        self.leaves.len()
    }

    /// Whether the tree holds no data.
    pub fn is_empty(&self) -> bool {
        self.leaves.is_empty()
    }

    /// Builds the inclusion proof for the leaf at `index`.
    pub fn proof(&self, index: usize) -> Option<Vec<ProofStep>> {
        if index >= self.leaves.len() {
            return None;
        }
        let mut steps = Vec::new();
        let mut position = index;
        for level in &self.levels[..self.levels.len().saturating_sub(1)] {
            let (sibling, side) = if position % 2 == 0 {
                // Odd tail pairs with itself.
                let sibling = level.get(position + 1).copied().unwrap_or(level[position]);
                (sibling, Side::Right)
            } else {
                (level[position - 1], Side::Left)
            };
            steps.push(ProofStep {
                hash: self.hashes[&sibling].clone(),
                side,
            });
            position /= 2;
        }
        Some(steps)
    }

    /// Replays a proof over the data and compares against the root digest.
    pub fn verify(&self, data: &str, proof: &[ProofStep]) -> bool {
        let Some(root) = self.root_hash() else {
            return false;
        };
        let mut current = digest(data);
        for step in proof {
            current = match step.side {
                Side::Left => digest(&format!("{}{current}", step.hash)),
                Side::Right => digest(&format!("{current}{}", step.hash)),
            };
        }
        current == root
    }
}
