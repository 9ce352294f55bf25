//! Nested graphs: an arena of graphs linked by node-owned subgraphs.

use std::collections::{BTreeMap, BTreeSet};

use poly_core::{ErrorInfo, GraphId, NodeId, PolyError};
use poly_graph::{BaseGraph, Edge, Node};

fn nested_error(code: &str, message: impl Into<String>) -> PolyError {
    PolyError::Graph(ErrorInfo::new(code, message))
}

/// A hierarchy of graphs. Member graphs live in an arena keyed by
/// [`GraphId`]; a node may own at most one child graph, and ownership links
/// form a tree rooted at the root graph. Cycle detection is an ordinary
/// visited-set walk over arena indices.
#[derive(Debug, Clone)]
pub struct NestedGraph {
    arena: BTreeMap<GraphId, BaseGraph>,
    /// Owner `(graph, node)` to owned child graph.
    containment: BTreeMap<(GraphId, NodeId), GraphId>,
    root: GraphId,
    next_graph_id: u64,
}

impl NestedGraph {
    /// Creates a hierarchy holding one empty root graph.
    pub fn new(name: impl Into<String>) -> Self {
        let root = GraphId::from_raw(0);
        let mut arena = BTreeMap::new();
        arena.insert(root, BaseGraph::new(name));
        Self {
            arena,
            containment: BTreeMap::new(),
            root,
            next_graph_id: 1,
        }
    }

    /// The root graph's identifier.
    pub fn root(&self) -> GraphId {
        self.root
    }

    /// Looks up a member graph.
    pub fn graph(&self, id: GraphId) -> Option<&BaseGraph> {
        self.arena.get(&id)
    }

    /// Looks up a member graph for mutation.
    pub fn graph_mut(&mut self, id: GraphId) -> Option<&mut BaseGraph> {
        self.arena.get_mut(&id)
    }

    /// All member graph identifiers in id order.
    pub fn graph_ids(&self) -> Vec<GraphId> {
        self.arena.keys().copied().collect()
    }

    /// Adds a node to a member graph.
    pub fn add_node(&mut self, graph: GraphId, node: Node) -> Result<NodeId, PolyError> {
        self.arena
            .get_mut(&graph)
            .map(|g| g.add_node(node))
            .ok_or_else(|| nested_error("unknown-graph", "graph is not in the arena"))
    }

    /// Adds an edge to a member graph.
    pub fn add_edge(&mut self, graph: GraphId, edge: Edge) -> Result<poly_core::EdgeId, PolyError> {
        self.arena
            .get_mut(&graph)
            .map(|g| g.add_edge(edge))
            .ok_or_else(|| nested_error("unknown-graph", "graph is not in the arena"))
    }

    /// Creates an empty child graph owned by the given node. A node owns at
    /// most one subgraph.
    pub fn attach_subgraph(&mut self, graph: GraphId, node: NodeId) -> Result<GraphId, PolyError> {
        let owner = self
            .arena
            .get(&graph)
            .ok_or_else(|| nested_error("unknown-graph", "graph is not in the arena"))?;
        let label = owner
            .node(node)
            .map(|n| n.label.clone())
            .ok_or_else(|| nested_error("unknown-node", "owner node does not exist"))?;
        if self.containment.contains_key(&(graph, node)) {
            return Err(nested_error(
                "subgraph-exists",
                "node already owns a subgraph",
            ));
        }
        let id = GraphId::from_raw(self.next_graph_id);
        self.next_graph_id += 1;
        self.arena.insert(id, BaseGraph::new(label));
        self.containment.insert((graph, node), id);
        Ok(id)
    }

    /// The child graph owned by a node, if any.
    pub fn subgraph_of(&self, graph: GraphId, node: NodeId) -> Option<GraphId> {
        self.containment.get(&(graph, node)).copied()
    }

    /// The `(graph, node)` owner of a child graph, if any.
    pub fn owner_of(&self, child: GraphId) -> Option<(GraphId, NodeId)> {
        self.containment
            .iter()
            .find(|(_, owned)| **owned == child)
            .map(|(owner, _)| *owner)
    }

    /// Detaches and drops the subgraph owned by a node, along with every
    /// graph nested below it.
    pub fn detach_subgraph(&mut self, graph: GraphId, node: NodeId) -> Result<(), PolyError> {
        let child = self
            .containment
            .remove(&(graph, node))
            .ok_or_else(|| nested_error("unknown-subgraph", "node owns no subgraph"))?;
        let mut doomed = vec![child];
        let mut cursor = 0;
        while cursor < doomed.len() {
            let current = doomed[cursor];
            cursor += 1;
            let nested: Vec<GraphId> = self
                .containment
                .iter()
                .filter(|((owner_graph, _), _)| *owner_graph == current)
                .map(|(_, owned)| *owned)
                .collect();
            doomed.extend(nested);
        }
        for dead in &doomed {
            self.arena.remove(dead);
            self.containment.retain(|(owner_graph, _), owned| {
                *owner_graph != *dead && !doomed.contains(owned)
            });
        }
        Ok(())
    }

    /// Graphs reachable from the root through containment, visited pre-order.
    fn reachable(&self) -> Vec<GraphId> {
        let mut seen = BTreeSet::from([self.root]);
        let mut order = vec![self.root];
        let mut stack = vec![self.root];
        while let Some(current) = stack.pop() {
            let children: Vec<GraphId> = self
                .containment
                .iter()
                .filter(|((owner_graph, _), _)| *owner_graph == current)
                .map(|(_, owned)| *owned)
                .collect();
            for child in children {
                if seen.insert(child) {
                    order.push(child);
                    stack.push(child);
                }
            }
        }
        order
    }

    /// Flattens the hierarchy into a single graph. Nested node labels are
    /// qualified with the owning nodes' labels joined by `" > "`; edges stay
    /// within their original graph's copy.
    pub fn flatten(&self) -> BaseGraph {
        let root_name = self
            .arena
            .get(&self.root)
            .map(|g| g.name.clone())
            .unwrap_or_default();
        let mut flat = BaseGraph::new(format!("{root_name}-flat"));
        let mut stack: Vec<(GraphId, String)> = vec![(self.root, String::new())];
        let mut visited = BTreeSet::new();
        while let Some((graph_id, prefix)) = stack.pop() {
            if !visited.insert(graph_id) {
                continue;
            }
            let Some(graph) = self.arena.get(&graph_id) else {
                continue;
            };
            let mut mapping = BTreeMap::new();
            for node in graph.nodes() {
                let qualified = if prefix.is_empty() {
                    node.label.clone()
                } else {
                    format!("{prefix} > {}", node.label)
                };
                mapping.insert(node.id(), flat.add_node(Node::new(qualified.clone())));
                if let Some(child) = self.subgraph_of(graph_id, node.id()) {
                    stack.push((child, qualified));
                }
            }
            for edge in graph.edges() {
                for source in edge.source_nodes() {
                    for target in edge.target_nodes() {
                        if let (Some(from), Some(to)) = (mapping.get(&source), mapping.get(&target))
                        {
                            let copy = if edge.directed {
                                Edge::between(*from, *to)
                            } else {
                                Edge::undirected(*from, *to)
                            };
                            flat.add_edge(copy);
                        }
                    }
                }
            }
        }
        flat
    }

    /// Pre-order traversal over the hierarchy: `visit(graph, node, level)`
    /// for every node, nodes in id order, children right after their owner.
    pub fn traverse<F>(&self, mut visit: F)
    where
        F: FnMut(GraphId, NodeId, usize),
    {
        self.walk(self.root, 0, &mut BTreeSet::new(), &mut visit);
    }

    fn walk<F>(&self, graph: GraphId, level: usize, seen: &mut BTreeSet<GraphId>, visit: &mut F)
    where
        F: FnMut(GraphId, NodeId, usize),
    {
        if !seen.insert(graph) {
            return;
        }
        let Some(member) = self.arena.get(&graph) else {
            return;
        };
        for node in member.node_ids() {
            visit(graph, node, level);
            if let Some(child) = self.subgraph_of(graph, node) {
                self.walk(child, level + 1, seen, visit);
            }
        }
    }

    /// Structural violations: arena integrity (every graph reachable from
    /// the root exactly once, no containment cycles, owners exist) plus each
    /// member graph's own violations, prefixed by its name.
    pub fn validate(&self) -> Vec<String> {
        let mut violations = Vec::new();
        let mut owned_seen: BTreeSet<GraphId> = BTreeSet::new();
        for ((owner_graph, owner_node), child) in &self.containment {
            if !owned_seen.insert(*child) {
                violations.push(format!(
                    "graph {} has more than one owner",
                    child.as_raw()
                ));
            }
            if *child == self.root {
                violations.push("root graph cannot be owned".into());
            }
            match self.arena.get(owner_graph) {
                None => violations.push(format!(
                    "containment references missing graph {}",
                    owner_graph.as_raw()
                )),
                Some(graph) if graph.node(*owner_node).is_none() => violations.push(format!(
                    "containment references missing node {} in graph {}",
                    owner_node.as_raw(),
                    owner_graph.as_raw()
                )),
                Some(_) => {}
            }
            if self.arena.get(child).is_none() {
                violations.push(format!(
                    "containment references missing child graph {}",
                    child.as_raw()
                ));
            }
        }
        let reachable: BTreeSet<GraphId> = self.reachable().into_iter().collect();
        for id in self.arena.keys() {
            if !reachable.contains(id) {
                violations.push(format!(
                    "graph {} is not reachable from the root, containment is cyclic or detached",
                    id.as_raw()
                ));
            }
        }
        for id in &reachable {
            if let Some(graph) = self.arena.get(id) {
                for violation in graph.validate() {
                    violations.push(format!("{}: {violation}", graph.name));
                }
            }
        }
        violations
    }
}
