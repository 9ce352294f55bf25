//! Semantic matching, rule inference, provenance and multigraph traversal.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use poly_core::{EdgeId, Endpoint, NodeId};
use poly_graph::{Edge, Node};

use crate::ubergraph::Ubergraph;

/// Default similarity cutoff for semantic matching.
pub const SIMILARITY_THRESHOLD: f64 = 0.8;

/// Depth cap for recursive edge-pattern matching.
pub const MATCH_DEPTH_LIMIT: usize = 100;

/// Finds every injective node mapping from `pattern` to `graph` in which
/// each pair scores at least `threshold` under the caller's similarity
/// function, and every pair of node-capable pattern edges can be mapped to
/// graph edges whose translated endpoint sets reach the same threshold under
/// Jaccard similarity. Candidates are tried in ascending id order.
pub fn semantic_match<S>(
    graph: &Ubergraph,
    pattern: &Ubergraph,
    similarity: S,
    threshold: f64,
) -> Vec<BTreeMap<NodeId, NodeId>>
where
    S: Fn(&Node, &Node) -> f64,
{
    let pattern_nodes = pattern.graph().node_ids();
    let graph_nodes = graph.graph().node_ids();
    if pattern_nodes.len() > graph_nodes.len() {
        return Vec::new();
    }
    let mut matches = Vec::new();
    let mut mapping: BTreeMap<NodeId, NodeId> = BTreeMap::new();
    let mut used: BTreeSet<NodeId> = BTreeSet::new();
    let mut cursors = vec![0usize; pattern_nodes.len()];
    let mut depth = 0usize;
    loop {
        if depth == pattern_nodes.len() {
            if edges_align(graph, pattern, &mapping, threshold) {
                matches.push(mapping.clone());
            }
            if depth == 0 {
                return matches;
            }
            depth -= 1;
            if let Some(taken) = mapping.remove(&pattern_nodes[depth]) {
                used.remove(&taken);
            }
            continue;
        }
        let pattern_node = pattern_nodes[depth];
        let mut advanced = false;
        while cursors[depth] < graph_nodes.len() {
            let candidate = graph_nodes[cursors[depth]];
            cursors[depth] += 1;
            if used.contains(&candidate) {
                continue;
            }
            let score = match (
                pattern.graph().node(pattern_node),
                graph.graph().node(candidate),
            ) {
                (Some(a), Some(b)) => similarity(a, b),
                _ => 0.0,
            };
            if score < threshold {
                continue;
            }
            mapping.insert(pattern_node, candidate);
            used.insert(candidate);
            depth += 1;
            advanced = true;
            break;
        }
        if !advanced {
            if depth == 0 {
                return matches;
            }
            cursors[depth] = 0;
            depth -= 1;
            if let Some(taken) = mapping.remove(&pattern_nodes[depth]) {
                used.remove(&taken);
            }
        }
    }
}

/// Greedily pairs each node-capable pattern edge with an unused graph edge
/// whose translated endpoint sets reach the threshold.
fn edges_align(
    graph: &Ubergraph,
    pattern: &Ubergraph,
    mapping: &BTreeMap<NodeId, NodeId>,
    threshold: f64,
) -> bool {
    let candidates: Vec<&Edge> = graph
        .graph()
        .edges()
        .filter(|edge| edge.is_node_capable())
        .collect();
    let mut used: BTreeSet<EdgeId> = BTreeSet::new();
    for pattern_edge in pattern.graph().edges() {
        if !pattern_edge.is_node_capable() {
            continue;
        }
        let mut matched = false;
        for candidate in &candidates {
            if used.contains(&candidate.id()) {
                continue;
            }
            if edge_similarity(pattern_edge, candidate, mapping) >= threshold {
                used.insert(candidate.id());
                matched = true;
                break;
            }
        }
        if !matched {
            return false;
        }
    }
    true
}

/// Jaccard similarity between the translated endpoint sets of two edges,
/// averaged over the source and target sides.
pub fn edge_similarity(
    pattern_edge: &Edge,
    graph_edge: &Edge,
    mapping: &BTreeMap<NodeId, NodeId>,
) -> f64 {
    let translate = |endpoints: Vec<NodeId>| -> BTreeSet<NodeId> {
        endpoints
            .into_iter()
            .filter_map(|node| mapping.get(&node).copied())
            .collect()
    };
    let jaccard = |a: &BTreeSet<NodeId>, b: &BTreeSet<NodeId>| -> f64 {
        let union = a.union(b).count();
        if union == 0 {
            return 1.0;
        }
        a.intersection(b).count() as f64 / union as f64
    };
    let pattern_sources = translate(pattern_edge.source_nodes());
    let pattern_targets = translate(pattern_edge.target_nodes());
    let graph_sources: BTreeSet<NodeId> = graph_edge.source_nodes().into_iter().collect();
    let graph_targets: BTreeSet<NodeId> = graph_edge.target_nodes().into_iter().collect();
    (jaccard(&pattern_sources, &graph_sources) + jaccard(&pattern_targets, &graph_targets)) / 2.0
}

/// A forward-chaining rule over edge types.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Rule {
    /// Every edge of `class_a` also belongs to `class_b`.
    Subclass {
        /// The narrower edge type.
        class_a: String,
        /// The broader edge type.
        class_b: String,
    },
    /// Chained edges of this relation imply a direct edge.
    Transitive {
        /// The relation's edge type.
        relation: String,
    },
    /// Every edge of this relation implies its reverse.
    Symmetric {
        /// The relation's edge type.
        relation: String,
    },
}

/// A fact derived by [`infer`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Inference {
    /// An edge also belongs to a broader type.
    Subclass {
        /// The reclassified edge.
        edge: EdgeId,
        /// The broader type it belongs to.
        inferred_class: String,
    },
    /// Two chained edges imply a direct connection.
    Transitive {
        /// The first edge in the chain.
        first: EdgeId,
        /// The second edge in the chain.
        second: EdgeId,
        /// Source of the implied connection.
        source: Endpoint,
        /// Target of the implied connection.
        target: Endpoint,
    },
    /// A directed edge implies its reverse.
    Symmetric {
        /// The edge being mirrored.
        edge: EdgeId,
        /// Source of the implied reverse connection.
        source: Endpoint,
        /// Target of the implied reverse connection.
        target: Endpoint,
    },
}

/// The edge type consulted by rules: the typing block's name when present,
/// otherwise the `"type"` metadata entry.
pub fn edge_type(edge: &Edge) -> Option<&str> {
    edge.typing
        .as_ref()
        .map(|typing| typing.edge_type.as_str())
        .or_else(|| edge.metadata.get("type").map(String::as_str))
}

/// Applies the rules once, in order, and returns every derived fact. Facts
/// are not fed back into the graph.
pub fn infer(graph: &Ubergraph, rules: &[Rule]) -> Vec<Inference> {
    let mut facts = Vec::new();
    for rule in rules {
        match rule {
            Rule::Subclass { class_a, class_b } => {
                for edge in graph.graph().edges() {
                    if edge_type(edge) == Some(class_a.as_str()) {
                        facts.push(Inference::Subclass {
                            edge: edge.id(),
                            inferred_class: class_b.clone(),
                        });
                    }
                }
            }
            Rule::Transitive { relation } => {
                for first in graph.graph().edges() {
                    if edge_type(first) != Some(relation.as_str()) {
                        continue;
                    }
                    for second in graph.graph().edges() {
                        if edge_type(second) != Some(relation.as_str()) {
                            continue;
                        }
                        if first.target == second.source && first.id() != second.id() {
                            facts.push(Inference::Transitive {
                                first: first.id(),
                                second: second.id(),
                                source: first.source,
                                target: second.target,
                            });
                        }
                    }
                }
            }
            Rule::Symmetric { relation } => {
                for edge in graph.graph().edges() {
                    if edge_type(edge) == Some(relation.as_str()) {
                        facts.push(Inference::Symmetric {
                            edge: edge.id(),
                            source: edge.target,
                            target: edge.source,
                        });
                    }
                }
            }
        }
    }
    facts
}

/// One entry in a provenance history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProvenanceEvent {
    /// What happened, e.g. `"created"` or `"source-changed"`.
    pub operation: String,
    /// When it happened, as recorded by the caller.
    pub timestamp: Option<String>,
    /// Who did it, as recorded by the caller.
    pub user: Option<String>,
}

/// Append-only event histories keyed by entity.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProvenanceLog {
    events: BTreeMap<Endpoint, Vec<ProvenanceEvent>>,
}

impl ProvenanceLog {
    /// Creates an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds creation events from `created-at`/`created-by` metadata on
    /// every node and edge.
    pub fn seed_from_graph(graph: &Ubergraph) -> Self {
        let mut log = Self::new();
        for node in graph.graph().nodes() {
            log.record(
                Endpoint::Node(node.id()),
                "created",
                node.metadata.get("created-at").cloned(),
                node.metadata.get("created-by").cloned(),
            );
        }
        for edge in graph.graph().edges() {
            log.record(
                Endpoint::Edge(edge.id()),
                "created",
                edge.metadata.get("created-at").cloned(),
                edge.metadata.get("created-by").cloned(),
            );
        }
        log
    }

    /// Appends an event to an entity's history.
    pub fn record(
        &mut self,
        entity: Endpoint,
        operation: impl Into<String>,
        timestamp: Option<String>,
        user: Option<String>,
    ) {
        self.events.entry(entity).or_default().push(ProvenanceEvent {
            operation: operation.into(),
            timestamp,
            user,
        });
    }

    /// An entity's history, oldest first.
    pub fn history(&self, entity: Endpoint) -> &[ProvenanceEvent] {
        self.events.get(&entity).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Entities with at least one event.
    pub fn entities(&self) -> Vec<Endpoint> {
        self.events.keys().copied().collect()
    }
}

/// Walks directed edges from `start`, visiting each edge at most once and
/// skipping edges the filter rejects. Returns the traversed hops in visit
/// order.
pub fn multigraph_traversal<F>(
    graph: &Ubergraph,
    start: NodeId,
    mut filter: F,
) -> Vec<(NodeId, NodeId, EdgeId)>
where
    F: FnMut(&Edge) -> bool,
{
    let mut visited_edges: BTreeSet<EdgeId> = BTreeSet::new();
    let mut hops = Vec::new();
    let mut stack = vec![start];
    while let Some(current) = stack.pop() {
        let mut next: Vec<(NodeId, NodeId, EdgeId)> = Vec::new();
        for edge in graph.graph().edges_from(current) {
            if visited_edges.contains(&edge.id()) || !filter(edge) {
                continue;
            }
            for target in edge.target_nodes() {
                next.push((current, target, edge.id()));
            }
            visited_edges.insert(edge.id());
        }
        // Reverse so smaller targets are explored first.
        for hop in next.iter().rev() {
            stack.push(hop.1);
        }
        hops.extend(next);
    }
    hops
}

/// A recursive pattern over edges. Unset fields match anything; `nested`
/// must be matched one-to-one by the edges attached to the edge-as-node.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EdgePattern {
    /// Required direction flag.
    pub directed: Option<bool>,
    /// Required edge type, per [`edge_type`].
    pub edge_type: Option<String>,
    /// Required node-capability state.
    pub node_capable: Option<bool>,
    /// Patterns for the edges referencing this edge as an endpoint.
    pub nested: Option<Vec<EdgePattern>>,
}

/// Edges matching the pattern, in id order. Nesting deeper than
/// [`MATCH_DEPTH_LIMIT`] never matches.
pub fn match_edges(graph: &Ubergraph, pattern: &EdgePattern) -> Vec<EdgeId> {
    graph
        .graph()
        .edges()
        .filter(|edge| edge_matches(graph, edge, pattern, 0))
        .map(|edge| edge.id())
        .collect()
}

fn edge_matches(graph: &Ubergraph, edge: &Edge, pattern: &EdgePattern, depth: usize) -> bool {
    if depth > MATCH_DEPTH_LIMIT {
        return false;
    }
    if let Some(directed) = pattern.directed {
        if edge.directed != directed {
            return false;
        }
    }
    if let Some(wanted) = &pattern.edge_type {
        if edge_type(edge) != Some(wanted.as_str()) {
            return false;
        }
    }
    if let Some(capable) = pattern.node_capable {
        if edge.is_node_capable() != capable {
            return false;
        }
    }
    let Some(nested_patterns) = &pattern.nested else {
        return true;
    };
    let attached = graph.edges_to_edge(edge.id());
    if attached.len() != nested_patterns.len() {
        return false;
    }
    let mut used: BTreeSet<EdgeId> = BTreeSet::new();
    for nested in nested_patterns {
        let mut matched = false;
        for candidate in &attached {
            if used.contains(&candidate.id()) {
                continue;
            }
            if edge_matches(graph, candidate, nested, depth + 1) {
                used.insert(candidate.id());
                matched = true;
                break;
            }
        }
        if !matched {
            return false;
        }
    }
    true
}
