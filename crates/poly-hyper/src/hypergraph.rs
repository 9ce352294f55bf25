//! Hypergraph specialization: edges over endpoint sets.

use poly_core::{EdgeId, Endpoint, ErrorInfo, NodeId, PolyError};
use poly_graph::{BaseGraph, Edge, Node};

fn hyper_error(code: &str, message: impl Into<String>) -> PolyError {
    PolyError::Graph(ErrorInfo::new(code, message))
}

/// A hypergraph: every edge carries the multi-endpoint block, so each side
/// of an edge is a set of nodes. The primary `(source, target)` pair stays a
/// member of its set through every mutation here.
#[derive(Debug, Clone)]
pub struct Hypergraph {
    graph: BaseGraph,
}

impl Hypergraph {
    /// Creates an empty hypergraph.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            graph: BaseGraph::new(name),
        }
    }

    /// Wraps an existing graph without checking its shape.
    pub fn from_graph(graph: BaseGraph) -> Self {
        Self { graph }
    }

    /// The underlying graph.
    pub fn graph(&self) -> &BaseGraph {
        &self.graph
    }

    /// Mutable access to the underlying graph.
    pub fn graph_mut(&mut self) -> &mut BaseGraph {
        &mut self.graph
    }

    /// Consumes the hypergraph, returning the underlying graph.
    pub fn into_graph(self) -> BaseGraph {
        self.graph
    }

    /// Adds a node.
    pub fn add_node(&mut self, node: Node) -> NodeId {
        self.graph.add_node(node)
    }

    /// Adds a directed hyperedge over the given sets. Fails when either side
    /// is empty.
    pub fn add_hyperedge(
        &mut self,
        sources: &[NodeId],
        targets: &[NodeId],
    ) -> Result<EdgeId, PolyError> {
        let edge = Edge::hyper(sources, targets).ok_or_else(|| {
            hyper_error("empty-endpoint-set", "hyperedges need at least one node per side")
        })?;
        Ok(self.graph.add_edge(edge))
    }

    /// Adds a node to an edge's source set.
    pub fn add_source(&mut self, edge: EdgeId, node: NodeId) -> Result<(), PolyError> {
        self.edit_sets(edge, |sets| {
            let endpoint = Endpoint::Node(node);
            if !sets.sources.contains(&endpoint) {
                sets.sources.push(endpoint);
            }
        })
    }

    /// Adds a node to an edge's target set.
    pub fn add_target(&mut self, edge: EdgeId, node: NodeId) -> Result<(), PolyError> {
        self.edit_sets(edge, |sets| {
            let endpoint = Endpoint::Node(node);
            if !sets.targets.contains(&endpoint) {
                sets.targets.push(endpoint);
            }
        })
    }

    /// Removes a node from an edge's source set. Fails when it is the last
    /// source. Removing the primary source promotes the next member.
    pub fn remove_source(&mut self, edge: EdgeId, node: NodeId) -> Result<(), PolyError> {
        let endpoint = Endpoint::Node(node);
        let record = self
            .graph
            .edge_mut(edge)
            .ok_or_else(|| hyper_error("unknown-edge", "edge does not exist"))?;
        let Some(sets) = record.endpoint_sets.as_mut() else {
            return Err(hyper_error("not-a-hyperedge", "edge has no endpoint sets"));
        };
        if !sets.sources.contains(&endpoint) {
            return Err(hyper_error("unknown-endpoint", "node is not a source"));
        }
        if sets.sources.len() == 1 {
            return Err(hyper_error(
                "empty-endpoint-set",
                "removing the last source would empty the set",
            ));
        }
        sets.sources.retain(|e| *e != endpoint);
        if record.source == endpoint {
            record.source = sets.sources[0];
        }
        Ok(())
    }

    /// Removes a node from an edge's target set, with the same promotion
    /// rule as [`Hypergraph::remove_source`].
    pub fn remove_target(&mut self, edge: EdgeId, node: NodeId) -> Result<(), PolyError> {
        let endpoint = Endpoint::Node(node);
        let record = self
            .graph
            .edge_mut(edge)
            .ok_or_else(|| hyper_error("unknown-edge", "edge does not exist"))?;
        let Some(sets) = record.endpoint_sets.as_mut() else {
            return Err(hyper_error("not-a-hyperedge", "edge has no endpoint sets"));
        };
        if !sets.targets.contains(&endpoint) {
            return Err(hyper_error("unknown-endpoint", "node is not a target"));
        }
        if sets.targets.len() == 1 {
            return Err(hyper_error(
                "empty-endpoint-set",
                "removing the last target would empty the set",
            ));
        }
        sets.targets.retain(|e| *e != endpoint);
        if record.target == endpoint {
            record.target = sets.targets[0];
        }
        Ok(())
    }

    fn edit_sets<F>(&mut self, edge: EdgeId, edit: F) -> Result<(), PolyError>
    where
        F: FnOnce(&mut poly_graph::EndpointSets),
    {
        let record = self
            .graph
            .edge_mut(edge)
            .ok_or_else(|| hyper_error("unknown-edge", "edge does not exist"))?;
        match record.endpoint_sets.as_mut() {
            Some(sets) => {
                edit(sets);
                Ok(())
            }
            None => Err(hyper_error("not-a-hyperedge", "edge has no endpoint sets")),
        }
    }

    /// Dual hypergraph: edges become nodes and nodes become edges. A node's
    /// dual edge lists the duals of edges that used it as a source on the
    /// source side, and of edges that used it as a target on the target
    /// side. Applying the dual twice restores the original incidences with
    /// source and target roles swapped.
    pub fn dual_graph(&self) -> Hypergraph {
        let mut dual = Hypergraph::new(format!("{}-dual", self.graph.name));
        let mut edge_to_node = std::collections::BTreeMap::new();
        for edge in self.graph.edges() {
            let label = format!("e{}", edge.id().as_raw());
            edge_to_node.insert(edge.id(), dual.add_node(Node::new(label)));
        }
        for node in self.graph.node_ids() {
            let endpoint = Endpoint::Node(node);
            let sources: Vec<NodeId> = self
                .graph
                .edges()
                .filter(|edge| edge.all_sources().contains(&endpoint))
                .filter_map(|edge| edge_to_node.get(&edge.id()).copied())
                .collect();
            let targets: Vec<NodeId> = self
                .graph
                .edges()
                .filter(|edge| edge.all_targets().contains(&endpoint))
                .filter_map(|edge| edge_to_node.get(&edge.id()).copied())
                .collect();
            if !sources.is_empty() && !targets.is_empty() {
                let _ = dual.add_hyperedge(&targets, &sources);
            }
        }
        dual
    }

    /// Line graph: one node per hyperedge, joined whenever two hyperedges
    /// share at least one endpoint.
    pub fn line_graph(&self) -> BaseGraph {
        let mut line = BaseGraph::new(format!("{}-line", self.graph.name));
        let mut representative = std::collections::BTreeMap::new();
        for edge in self.graph.edges() {
            let label = format!("e{}", edge.id().as_raw());
            representative.insert(edge.id(), line.add_node(Node::new(label)));
        }
        let ids = self.graph.edge_ids();
        for (i, a) in ids.iter().enumerate() {
            for b in &ids[i + 1..] {
                let (Some(left), Some(right)) = (self.graph.edge(*a), self.graph.edge(*b)) else {
                    continue;
                };
                if left.shares_endpoint_with(right) {
                    line.add_edge(Edge::undirected(representative[a], representative[b]));
                }
            }
        }
        line
    }

    /// Derivative graph: every source-target pair inside each hyperedge
    /// becomes an ordinary directed edge over the original nodes.
    pub fn derivative_graph(&self) -> BaseGraph {
        let mut derived = BaseGraph::new(format!("{}-derived", self.graph.name));
        let mut mapping = std::collections::BTreeMap::new();
        for node in self.graph.nodes() {
            mapping.insert(node.id(), derived.add_node(Node::new(node.label.clone())));
        }
        for edge in self.graph.edges() {
            for source in edge.source_nodes() {
                for target in edge.target_nodes() {
                    if source != target {
                        derived.add_edge(Edge::between(mapping[&source], mapping[&target]));
                    }
                }
            }
        }
        derived
    }

    /// Structural violations: base integrity plus the hyperedge block
    /// requirement.
    pub fn validate(&self) -> Vec<String> {
        let mut violations = Vec::new();
        for edge in self.graph.edges() {
            if !edge.is_hyperedge() {
                violations.push(format!(
                    "edge {} has no endpoint sets, hypergraph edges need them",
                    edge.id().as_raw()
                ));
            }
        }
        violations.extend(self.graph.validate());
        violations
    }
}
