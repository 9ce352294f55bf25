//! Adjacency and incidence matrix import and export.
//!
//! Cells use a three-valued encoding so mixed graphs survive the round trip:
//! `0` no edge, `1`/`-1` a directed edge leaving/entering the row node, `2`
//! an undirected edge.

use poly_core::NodeId;
use poly_graph::{BaseGraph, Edge, Node};

/// Adjacency matrix over ascending node ids. Parallel edges collapse to one
/// cell; a directed pair in both orientations reads as undirected.
pub fn adjacency_matrix(graph: &BaseGraph) -> (Vec<NodeId>, Vec<Vec<i8>>) {
    let nodes = graph.node_ids();
    let index = |id: NodeId| nodes.iter().position(|n| *n == id);
    let mut cells = vec![vec![0i8; nodes.len()]; nodes.len()];
    for edge in graph.edges() {
        for source in edge.source_nodes() {
            for target in edge.target_nodes() {
                let (Some(row), Some(column)) = (index(source), index(target)) else {
                    continue;
                };
                if row == column {
                    continue;
                }
                if edge.directed {
                    // A directed edge in each orientation makes the pair
                    // effectively undirected.
                    if cells[column][row] == 1 || cells[row][column] == -1 {
                        cells[row][column] = 2;
                        cells[column][row] = 2;
                    } else if cells[row][column] == 0 {
                        cells[row][column] = 1;
                        cells[column][row] = -1;
                    }
                } else {
                    cells[row][column] = 2;
                    cells[column][row] = 2;
                }
            }
        }
    }
    (nodes, cells)
}

/// Builds a graph from a three-valued adjacency matrix. Rows map to fresh
/// nodes labelled `n0`, `n1`, .. in order. Rejects ragged input.
pub fn from_adjacency_matrix(name: &str, cells: &[Vec<i8>]) -> Option<BaseGraph> {
    let size = cells.len();
    if cells.iter().any(|row| row.len() != size) {
        return None;
    }
    let mut graph = BaseGraph::new(name);
    let mut ids = Vec::with_capacity(size);
    for i in 0..size {
        ids.push(graph.add_node(Node::new(format!("n{i}"))));
    }
    for (row, line) in cells.iter().enumerate() {
        for (column, cell) in line.iter().enumerate() {
            match cell {
                1 => {
                    graph.add_edge(Edge::between(ids[row], ids[column]));
                }
                2 if row < column => {
                    graph.add_edge(Edge::undirected(ids[row], ids[column]));
                }
                _ => {}
            }
        }
    }
    Some(graph)
}

/// Incidence matrix: one row per node, one column per edge in ascending edge
/// id order. `1` marks a source, `-1` a target, `2` an undirected endpoint.
pub fn incidence_matrix(graph: &BaseGraph) -> (Vec<NodeId>, Vec<Vec<i8>>) {
    let nodes = graph.node_ids();
    let edges = graph.edge_ids();
    let index = |id: NodeId| nodes.iter().position(|n| *n == id);
    let mut cells = vec![vec![0i8; edges.len()]; nodes.len()];
    for (column, edge_id) in edges.iter().enumerate() {
        let Some(edge) = graph.edge(*edge_id) else {
            continue;
        };
        for source in edge.source_nodes() {
            if let Some(row) = index(source) {
                cells[row][column] = if edge.directed { 1 } else { 2 };
            }
        }
        for target in edge.target_nodes() {
            if let Some(row) = index(target) {
                if edge.directed {
                    cells[row][column] = -1;
                } else {
                    cells[row][column] = 2;
                }
            }
        }
    }
    (nodes, cells)
}
