//! Quad and oct trees: recursive spatial subdivision with re-insertion.

use std::collections::BTreeMap;

use poly_core::NodeId;
use poly_graph::{BaseGraph, Edge, Node};

/// Axis-aligned 2D box, `(x1, y1)` to `(x2, y2)` inclusive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    /// Lower x bound.
    pub x1: f64,
    /// Lower y bound.
    pub y1: f64,
    /// Upper x bound.
    pub x2: f64,
    /// Upper y bound.
    pub y2: f64,
}

impl Rect {
    /// Creates a box from its corners.
    pub fn new(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        Self { x1, y1, x2, y2 }
    }

    fn contains(&self, x: f64, y: f64) -> bool {
        self.x1 <= x && x <= self.x2 && self.y1 <= y && y <= self.y2
    }

    fn overlaps(&self, other: &Rect) -> bool {
        !(self.x2 < other.x1 || self.x1 > other.x2 || self.y2 < other.y1 || self.y1 > other.y2)
    }

    fn quadrants(&self) -> [Rect; 4] {
        let mx = (self.x1 + self.x2) / 2.0;
        let my = (self.y1 + self.y2) / 2.0;
        [
            Rect::new(self.x1, self.y1, mx, my),
            Rect::new(mx, self.y1, self.x2, my),
            Rect::new(self.x1, my, mx, self.y2),
            Rect::new(mx, my, self.x2, self.y2),
        ]
    }
}

#[derive(Debug, Clone)]
struct QuadCell {
    boundary: Rect,
    point: Option<(f64, f64, String)>,
    children: Vec<NodeId>,
}

/// Point quadtree: each cell holds at most one point; inserting a second
/// splits the cell into four quadrants and re-inserts the old point.
#[derive(Debug, Clone)]
pub struct QuadTree {
    graph: BaseGraph,
    root: NodeId,
    cells: BTreeMap<NodeId, QuadCell>,
}

impl QuadTree {
    /// Creates an empty tree covering `boundary`.
    pub fn new(name: impl Into<String>, boundary: Rect) -> Self {
        let mut graph = BaseGraph::new(name);
        let root = graph.add_node(Node::new("cell"));
        let mut cells = BTreeMap::new();
        cells.insert(
            root,
            QuadCell {
                boundary,
                point: None,
                children: Vec::new(),
            },
        );
        Self { graph, root, cells }
    }

    /// The substrate graph with one node per cell.
    pub fn graph(&self) -> &BaseGraph {
        &self.graph
    }

    /// The root cell.
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Inserts a labelled point. Points outside the boundary are rejected.
    pub fn insert(&mut self, x: f64, y: f64, value: impl Into<String>) -> bool {
        if !self.cells[&self.root].boundary.contains(x, y) {
            return false;
        }
        let mut pending = vec![(x, y, value.into())];
        while let Some((px, py, pv)) = pending.pop() {
            let mut node = self.root;
            // Descend to the leaf cell containing the point.
            loop {
                let cell = &self.cells[&node];
                if cell.children.is_empty() {
                    break;
                }
                let next = cell
                    .children
                    .iter()
                    .find(|child| self.cells[child].boundary.contains(px, py))
                    .copied();
                match next {
                    Some(child) => node = child,
                    None => break,
                }
            }
            let occupied = self.cells[&node].point.clone();
            match occupied {
                None => {
                    if let Some(cell) = self.cells.get_mut(&node) {
                        cell.point = Some((px, py, pv));
                    }
                }
                Some(existing) => {
                    // Coincident points replace rather than splitting forever.
                    if existing.0 == px && existing.1 == py {
                        if let Some(cell) = self.cells.get_mut(&node) {
                            cell.point = Some((px, py, pv));
                        }
                        continue;
                    }
                    self.split(node);
                    if let Some(cell) = self.cells.get_mut(&node) {
                        cell.point = None;
                    }
                    pending.push(existing);
                    pending.push((px, py, pv));
                }
            }
        }
        true
    }

    fn split(&mut self, node: NodeId) {
        let boundary = self.cells[&node].boundary;
        let mut children = Vec::with_capacity(4);
        for quadrant in boundary.quadrants() {
            let child = self.graph.add_node(Node::new("cell"));
            self.graph.add_edge(Edge::between(node, child));
            self.cells.insert(
                child,
                QuadCell {
                    boundary: quadrant,
                    point: None,
                    children: Vec::new(),
                },
            );
            children.push(child);
        }
        if let Some(cell) = self.cells.get_mut(&node) {
            cell.children = children;
        }
    }

    /// Points within the query box, in insertion-independent cell order.
    pub fn range(&self, query: Rect) -> Vec<(f64, f64, String)> {
        let mut found = Vec::new();
        let mut stack = vec![self.root];
        while let Some(node) = stack.pop() {
            let cell = &self.cells[&node];
            if !cell.boundary.overlaps(&query) {
                continue;
            }
            if let Some((x, y, value)) = &cell.point {
                if query.contains(*x, *y) {
                    found.push((*x, *y, value.clone()));
                }
            }
            stack.extend(cell.children.iter().rev());
        }
        found
    }

    /// Total number of stored points.
    pub fn len(&self) -> usize {
        self.cells.values().filter(|cell| cell.point.is_some()).count()
    }

    /// Whether no points are stored.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Axis-aligned 3D box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cuboid {
    /// Lower x bound.
    pub x1: f64,
    /// Lower y bound.
    pub y1: f64,
    /// Lower z bound.
    pub z1: f64,
    /// Upper x bound.
    pub x2: f64,
    /// Upper y bound.
    pub y2: f64,
    /// Upper z bound.
    pub z2: f64,
}

impl Cuboid {
    /// Creates a box from its corners.
    pub fn new(x1: f64, y1: f64, z1: f64, x2: f64, y2: f64, z2: f64) -> Self {
        Self {
            x1,
            y1,
            z1,
            x2,
            y2,
            z2,
        }
    }

    fn contains(&self, x: f64, y: f64, z: f64) -> bool {
        self.x1 <= x
            && x <= self.x2
            && self.y1 <= y
            && y <= self.y2
            && self.z1 <= z
            && z <= self.z2
    }

    fn overlaps(&self, other: &Cuboid) -> bool {
        !(self.x2 < other.x1
            || self.x1 > other.x2
            || self.y2 < other.y1
            || self.y1 > other.y2
            || self.z2 < other.z1
            || self.z1 > other.z2)
    }

    fn octants(&self) -> [Cuboid; 8] {
        let mx = (self.x1 + self.x2) / 2.0;
        let my = (self.y1 + self.y2) / 2.0;
        let mz = (self.z1 + self.z2) / 2.0;
        [
            Cuboid::new(self.x1, self.y1, self.z1, mx, my, mz),
            Cuboid::new(mx, self.y1, self.z1, self.x2, my, mz),
            Cuboid::new(self.x1, my, self.z1, mx, self.y2, mz),
            Cuboid::new(mx, my, self.z1, self.x2, self.y2, mz),
            Cuboid::new(self.x1, self.y1, mz, mx, my, self.z2),
            Cuboid::new(mx, self.y1, mz, self.x2, my, self.z2),
            Cuboid::new(self.x1, my, mz, mx, self.y2, self.z2),
            Cuboid::new(mx, my, mz, self.x2, self.y2, self.z2),
        ]
    }
}

#[derive(Debug, Clone)]
struct OctCell {
    boundary: Cuboid,
    point: Option<(f64, f64, f64, String)>,
    children: Vec<NodeId>,
}

/// Point octree, the 3D counterpart of [`QuadTree`] with eight-way splits.
#[derive(Debug, Clone)]
pub struct OctTree {
    graph: BaseGraph,
    root: NodeId,
    cells: BTreeMap<NodeId, OctCell>,
}

impl OctTree {
    /// Creates an empty tree covering `boundary`.
    pub fn new(name: impl Into<String>, boundary: Cuboid) -> Self {
        let mut graph = BaseGraph::new(name);
        let root = graph.add_node(Node::new("cell"));
        let mut cells = BTreeMap::new();
        cells.insert(
            root,
            OctCell {
                boundary,
                point: None,
                children: Vec::new(),
            },
        );
        Self { graph, root, cells }
    }

    /// The substrate graph with one node per cell.
    pub fn graph(&self) -> &BaseGraph {
        &self.graph
    }

    /// Inserts a labelled point. Points outside the boundary are rejected.
    pub fn insert(&mut self, x: f64, y: f64, z: f64, value: impl Into<String>) -> bool {
        if !self.cells[&self.root].boundary.contains(x, y, z) {
            return false;
        }
        let mut pending = vec![(x, y, z, value.into())];
        while let Some((px, py, pz, pv)) = pending.pop() {
            let mut node = self.root;
            loop {
                let cell = &self.cells[&node];
                if cell.children.is_empty() {
                    break;
                }
                let next = cell
                    .children
                    .iter()
                    .find(|child| self.cells[child].boundary.contains(px, py, pz))
                    .copied();
                match next {
                    Some(child) => node = child,
                    None => break,
                }
            }
            let occupied = self.cells[&node].point.clone();
            match occupied {
                None => {
                    if let Some(cell) = self.cells.get_mut(&node) {
                        cell.point = Some((px, py, pz, pv));
                    }
                }
                Some(existing) => {
                    if existing.0 == px && existing.1 == py && existing.2 == pz {
                        if let Some(cell) = self.cells.get_mut(&node) {
                            cell.point = Some((px, py, pz, pv));
                        }
                        continue;
                    }
                    self.split(node);
                    if let Some(cell) = self.cells.get_mut(&node) {
                        cell.point = None;
                    }
                    pending.push(existing);
                    pending.push((px, py, pz, pv));
                }
            }
        }
        true
    }

    fn split(&mut self, node: NodeId) {
        let boundary = self.cells[&node].boundary;
        let mut children = Vec::with_capacity(8);
        for octant in boundary.octants() {
            let child = self.graph.add_node(Node::new("cell"));
            self.graph.add_edge(Edge::between(node, child));
            self.cells.insert(
                child,
                OctCell {
                    boundary: octant,
                    point: None,
                    children: Vec::new(),
                },
            );
            children.push(child);
        }
        if let Some(cell) = self.cells.get_mut(&node) {
            cell.children = children;
        }
    }

    /// Points within the query box.
    pub fn range(&self, query: Cuboid) -> Vec<(f64, f64, f64, String)> {
        let mut found = Vec::new();
        let mut stack = vec![self.root];
        while let Some(node) = stack.pop() {
            let cell = &self.cells[&node];
            if !cell.boundary.overlaps(&query) {
                continue;
            }
            if let Some((x, y, z, value)) = &cell.point {
                if query.contains(*x, *y, *z) {
                    found.push((*x, *y, *z, value.clone()));
                }
            }
            stack.extend(cell.children.iter().rev());
        }
        found
    }

    /// Total number of stored points.
    pub fn len(&self) -> usize {
        self.cells.values().filter(|cell| cell.point.is_some()).count()
    }

    /// Whether no points are stored.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
