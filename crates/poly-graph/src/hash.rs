//! Canonical structural hashing for change detection.

use poly_core::errors::{ErrorInfo, PolyError};
use sha2::{Digest, Sha256};

use crate::base::BaseGraph;

/// Computes a hex-encoded SHA-256 hash over the canonical JSON form of the
/// graph's structure. Selection state is excluded, so interactive selection
/// changes never alter the hash.
pub fn structural_hash(graph: &BaseGraph) -> Result<String, PolyError> {
    let mut snapshot = graph.to_snapshot();
    snapshot.selected_nodes.clear();
    snapshot.selected_edges.clear();
    let canonical = serde_json::to_vec(&snapshot)
        .map_err(|err| PolyError::Serde(ErrorInfo::new("hash-encode", err.to_string())))?;
    let mut hasher = Sha256::new();
    hasher.update(&canonical);
    Ok(hex_encode(&hasher.finalize()))
}

fn hex_encode(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len() * 2);
    for byte in bytes {
        out.push_str(&format!("{byte:02x}"));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::edge::Edge;
    use crate::node::Node;

    #[test]
    fn selection_does_not_change_hash() {
        let mut graph = BaseGraph::new("hash");
        let a = graph.add_node(Node::new("a"));
        let b = graph.add_node(Node::new("b"));
        graph.add_edge(Edge::between(a, b));
        let before = structural_hash(&graph).expect("hash");
        graph.toggle_node_selection(a);
        let after = structural_hash(&graph).expect("hash");
        assert_eq!(before, after);
    }

    #[test]
    fn structure_change_changes_hash() {
        let mut graph = BaseGraph::new("hash");
        let a = graph.add_node(Node::new("a"));
        let before = structural_hash(&graph).expect("hash");
        let b = graph.add_node(Node::new("b"));
        graph.add_edge(Edge::between(a, b));
        let after = structural_hash(&graph).expect("hash");
        assert_ne!(before, after);
    }
}
