//! Segment tree over a fixed array.

use std::collections::BTreeMap;

use poly_core::NodeId;
use poly_graph::{BaseGraph, Edge, Node};

/// Aggregate computed over each segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Aggregate {
    /// Sum of the segment.
    Sum,
    /// Minimum of the segment.
    Min,
    /// Maximum of the segment.
    Max,
}

impl Aggregate {
    fn combine(&self, a: i64, b: i64) -> i64 {
        match self {
            Aggregate::Sum => a + b,
            Aggregate::Min => a.min(b),
            Aggregate::Max => a.max(b),
        }
    }
}

#[derive(Debug, Clone)]
struct Segment {
    start: usize,
    end: usize,
    value: i64,
    left: Option<NodeId>,
    right: Option<NodeId>,
}

/// Segment tree built once from an array; range queries and point updates
/// walk the segment hierarchy. Structure edges also live in the substrate
/// graph since the shape never changes after the build.
#[derive(Debug, Clone)]
pub struct SegmentTree {
    graph: BaseGraph,
    root: Option<NodeId>,
    segments: BTreeMap<NodeId, Segment>,
    aggregate: Aggregate,
}

impl SegmentTree {
    /// Builds a tree over the values with the chosen aggregate.
    pub fn build(name: impl Into<String>, values: &[i64], aggregate: Aggregate) -> Self {
        let mut tree = Self {
            graph: BaseGraph::new(name),
            root: None,
            segments: BTreeMap::new(),
            aggregate,
        };
        if !values.is_empty() {
            tree.root = Some(tree.build_range(values, 0, values.len() - 1));
        }
        tree
    }

    fn build_range(&mut self, values: &[i64], start: usize, end: usize) -> NodeId {
        let id = self.graph.add_node(Node::new(format!("[{start}, {end}]")));
        if start == end {
            self.segments.insert(
                id,
                Segment {
                    start,
                    end,
                    value: values[start],
                    left: None,
                    right: None,
                },
            );
            return id;
        }
        let mid = (start + end) / 2;
        let left = self.build_range(values, start, mid);
        let right = self.build_range(values, mid + 1, end);
        self.graph.add_edge(Edge::between(id, left));
        self.graph.add_edge(Edge::between(id, right));
        let value = self
            .aggregate
            .combine(self.segments[&left].value, self.segments[&right].value);
        self.segments.insert(
            id,
            Segment {
                start,
                end,
                value,
                left: Some(left),
                right: Some(right),
            },
        );
        id
    }

    /// The substrate graph with one node per segment.
    pub fn graph(&self) -> &BaseGraph {
        &self.graph
    }

    /// Number of elements covered.
    pub fn len(&self) -> usize {
        self.root
            .map(|root| self.segments[&root].end - self.segments[&root].start + 1)
            .unwrap_or(0)
    }

    /// Whether the tree covers no elements.
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// The aggregate over `[low, high]`, or `None` when the range misses
    /// the array.
    pub fn query(&self, low: usize, high: usize) -> Option<i64> {
        let root = self.root?;
        if low > high || high > self.segments[&root].end {
            return None;
        }
        let mut result: Option<i64> = None;
        let mut stack = vec![root];
        while let Some(node) = stack.pop() {
            let segment = &self.segments[&node];
            if segment.end < low || segment.start > high {
                continue;
            }
            if low <= segment.start && segment.end <= high {
                result = Some(match result {
                    Some(current) => self.aggregate.combine(current, segment.value),
                    None => segment.value,
                });
                continue;
            }
            if let Some(left) = segment.left {
                stack.push(left);
            }
            if let Some(right) = segment.right {
                stack.push(right);
            }
        }
        result
    }

    /// Replaces one element and refreshes the aggregates on its path.
    pub fn update(&mut self, index: usize, value: i64) -> bool {
        let Some(root) = self.root else {
            return false;
        };
        if index > self.segments[&root].end {
            return false;
        }
        // Descend to the leaf, remembering the path.
        let mut path = Vec::new();
        let mut current = root;
        loop {
            path.push(current);
            let segment = &self.segments[&current];
            if segment.start == segment.end {
                break;
            }
            let mid = (segment.start + segment.end) / 2;
            current = if index <= mid {
                segment.left
            } else {
                segment.right
            }
            .unwrap_or(current);
        }
        if let Some(leaf) = self.segments.get_mut(&current) {
            leaf.value = value;
        }
        for node in path.into_iter().rev().skip(1) {
            let (left, right) = {
                let segment = &self.segments[&node];
                (segment.left, segment.right)
            };
            if let (Some(left), Some(right)) = (left, right) {
                let combined = self
                    .aggregate
                    .combine(self.segments[&left].value, self.segments[&right].value);
                if let Some(segment) = self.segments.get_mut(&node) {
                    segment.value = combined;
                }
            }
        }
        true
    }
}
