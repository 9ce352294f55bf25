//! Directed-acyclic-graph specialization of the substrate.

use std::collections::{BTreeMap, BTreeSet};

use poly_core::{EdgeId, ErrorInfo, NodeId, PolyError};
use poly_graph::{BaseGraph, Edge, Node};

fn dag_error(code: &str, message: impl Into<String>) -> PolyError {
    PolyError::Graph(ErrorInfo::new(code, message))
}

fn cycle_error(start: NodeId) -> PolyError {
    PolyError::Algo(
        ErrorInfo::new("cycle-detected", "graph contains a directed cycle")
            .with_context("start-node", start.as_raw().to_string()),
    )
}

/// A directed acyclic graph. Acyclicity is validated on demand like every
/// other shape rule; [`DagGraph::add_edge_safe`] offers the speculative
/// insert that rolls back when a cycle would result.
#[derive(Debug, Clone)]
pub struct DagGraph {
    graph: BaseGraph,
}

impl DagGraph {
    /// Creates an empty DAG.
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

    /// Consumes the DAG, returning the underlying graph.
    pub fn into_graph(self) -> BaseGraph {
        self.graph
    }

    /// Adds a node.
    pub fn add_node(&mut self, node: Node) -> NodeId {
        self.graph.add_node(node)
    }

    /// Adds a directed edge without any cycle check.
    pub fn add_edge(&mut self, source: NodeId, target: NodeId) -> EdgeId {
        self.graph.add_edge(Edge::between(source, target))
    }

    /// Adds a directed edge, then checks for a cycle; on failure the edge is
    /// removed again and the error names the cycle's start node.
    pub fn add_edge_safe(&mut self, source: NodeId, target: NodeId) -> Result<EdgeId, PolyError> {
        if self.graph.node(source).is_none() || self.graph.node(target).is_none() {
            return Err(dag_error("node-missing", "both endpoints must exist"));
        }
        let id = self.graph.add_edge(Edge::between(source, target));
        if let Some(cycle) = self.detect_cycle() {
            let start = cycle.first().copied().unwrap_or(source);
            let _ = self.graph.remove_edge(id);
            return Err(cycle_error(start));
        }
        Ok(id)
    }

    fn adjacency(&self) -> BTreeMap<NodeId, BTreeSet<NodeId>> {
        poly_algo::adjacency::directed(&self.graph)
    }

    /// Nodes with no incoming edge.
    pub fn sources(&self) -> Vec<NodeId> {
        self.graph
            .node_ids()
            .into_iter()
            .filter(|node| self.graph.in_degree(*node) == 0)
            .collect()
    }

    /// Nodes with no outgoing edge.
    pub fn sinks(&self) -> Vec<NodeId> {
        self.graph
            .node_ids()
            .into_iter()
            .filter(|node| self.graph.out_degree(*node) == 0)
            .collect()
    }

    /// Every node from which `node` is reachable.
    pub fn ancestors(&self, node: NodeId) -> Vec<NodeId> {
        let adjacency = self.adjacency();
        let mut reverse: BTreeMap<NodeId, BTreeSet<NodeId>> = BTreeMap::new();
        for (from, outs) in &adjacency {
            for to in outs {
                reverse.entry(*to).or_default().insert(*from);
            }
        }
        Self::reach(&reverse, node)
    }

    /// Every node reachable from `node`.
    pub fn descendants(&self, node: NodeId) -> Vec<NodeId> {
        Self::reach(&self.adjacency(), node)
    }

    fn reach(adjacency: &BTreeMap<NodeId, BTreeSet<NodeId>>, start: NodeId) -> Vec<NodeId> {
        let mut seen = BTreeSet::from([start]);
        let mut stack = vec![start];
        while let Some(node) = stack.pop() {
            if let Some(outs) = adjacency.get(&node) {
                for next in outs {
                    if seen.insert(*next) {
                        stack.push(*next);
                    }
                }
            }
        }
        seen.remove(&start);
        seen.into_iter().collect()
    }

    /// Kahn's topological sort, smallest ready id first. Fails with a
    /// cycle-detected error naming a node on the cycle.
    pub fn topological_sort(&self) -> Result<Vec<NodeId>, PolyError> {
        let adjacency = self.adjacency();
        let mut indegree: BTreeMap<NodeId, usize> =
            self.graph.node_ids().into_iter().map(|n| (n, 0)).collect();
        for outs in adjacency.values() {
            for to in outs {
                if let Some(count) = indegree.get_mut(to) {
                    *count += 1;
                }
            }
        }
        let mut ready: BTreeSet<NodeId> = indegree
            .iter()
            .filter(|(_, count)| **count == 0)
            .map(|(node, _)| *node)
            .collect();
        let mut order = Vec::with_capacity(indegree.len());
        while let Some(node) = ready.iter().next().copied() {
            ready.remove(&node);
            order.push(node);
            if let Some(outs) = adjacency.get(&node) {
                for next in outs {
                    if let Some(count) = indegree.get_mut(next) {
                        *count -= 1;
                        if *count == 0 {
                            ready.insert(*next);
                        }
                    }
                }
            }
        }
        if order.len() != indegree.len() {
            let start = self
                .detect_cycle()
                .and_then(|cycle| cycle.first().copied())
                .or_else(|| {
                    indegree
                        .keys()
                        .find(|node| !order.contains(node))
                        .copied()
                });
            return Err(cycle_error(start.unwrap_or(NodeId::from_raw(0))));
        }
        Ok(order)
    }

    /// Depth-first topological sort (reverse post-order). Fails like
    /// [`DagGraph::topological_sort`] on a cycle.
    pub fn topological_sort_dfs(&self) -> Result<Vec<NodeId>, PolyError> {
        if let Some(cycle) = self.detect_cycle() {
            let start = cycle.first().copied().unwrap_or(NodeId::from_raw(0));
            return Err(cycle_error(start));
        }
        let adjacency = self.adjacency();
        let mut finished = Vec::new();
        let mut seen: BTreeSet<NodeId> = BTreeSet::new();
        for root in self.graph.node_ids() {
            if seen.contains(&root) {
                continue;
            }
            let mut stack: Vec<(NodeId, bool)> = vec![(root, false)];
            while let Some((node, expanded)) = stack.pop() {
                if expanded {
                    finished.push(node);
                    continue;
                }
                if !seen.insert(node) {
                    continue;
                }
                stack.push((node, true));
                if let Some(outs) = adjacency.get(&node) {
                    for next in outs.iter().rev() {
                        if !seen.contains(next) {
                            stack.push((*next, false));
                        }
                    }
                }
            }
        }
        finished.reverse();
        Ok(finished)
    }

    /// Whether the graph is acyclic.
    pub fn is_dag(&self) -> bool {
        self.detect_cycle().is_none()
    }

    /// Finds a directed cycle and returns its nodes in edge order, or `None`
    /// when the graph is acyclic.
    pub fn detect_cycle(&self) -> Option<Vec<NodeId>> {
        let adjacency = self.adjacency();
        let mut visited: BTreeSet<NodeId> = BTreeSet::new();
        for root in self.graph.node_ids() {
            if visited.contains(&root) {
                continue;
            }
            let mut path: Vec<NodeId> = vec![root];
            let mut on_path: BTreeSet<NodeId> = BTreeSet::from([root]);
            let mut cursors: Vec<Vec<NodeId>> = vec![adjacency
                .get(&root)
                .map(|n| n.iter().rev().copied().collect())
                .unwrap_or_default()];
            while !path.is_empty() {
                let depth = path.len() - 1;
                match cursors[depth].pop() {
                    Some(next) if on_path.contains(&next) => {
                        let start = path.iter().position(|n| *n == next).unwrap_or(0);
                        return Some(path[start..].to_vec());
                    }
                    Some(next) if !visited.contains(&next) => {
                        path.push(next);
                        on_path.insert(next);
                        cursors.push(
                            adjacency
                                .get(&next)
                                .map(|n| n.iter().rev().copied().collect())
                                .unwrap_or_default(),
                        );
                    }
                    Some(_) => {}
                    None => {
                        if let Some(done) = path.pop() {
                            on_path.remove(&done);
                            visited.insert(done);
                        }
                        cursors.pop();
                    }
                }
            }
        }
        None
    }

    /// Structural violations: base integrity plus directedness and
    /// acyclicity.
    pub fn validate(&self) -> Vec<String> {
        let mut violations = Vec::new();
        for edge in self.graph.edges() {
            if !edge.directed {
                violations.push(format!(
                    "edge {} is undirected, a DAG allows only directed edges",
                    edge.id().as_raw()
                ));
            }
        }
        if let Some(cycle) = self.detect_cycle() {
            let described: Vec<String> = cycle.iter().map(|n| n.as_raw().to_string()).collect();
            violations.push(format!(
                "graph contains a directed cycle through nodes [{}]",
                described.join(", ")
            ));
        }
        violations.extend(self.graph.validate());
        violations
    }
}
