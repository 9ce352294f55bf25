//! Prefix tree over characters.

use std::collections::{BTreeMap, BTreeSet};

use poly_core::NodeId;
use poly_graph::{BaseGraph, Edge, Node};

/// Trie with one substrate node per prefix position. Character edges live in
/// a side table and as labelled directed edges in the graph.
#[derive(Debug, Clone)]
pub struct Trie {
    graph: BaseGraph,
    root: NodeId,
    children: BTreeMap<NodeId, BTreeMap<char, NodeId>>,
    terminal: BTreeSet<NodeId>,
}

impl Trie {
    /// Creates an empty trie with a root position.
    pub fn new(name: impl Into<String>) -> Self {
        let mut graph = BaseGraph::new(name);
        let root = graph.add_node(Node::new(""));
        Self {
            graph,
            root,
            children: BTreeMap::new(),
            terminal: BTreeSet::new(),
        }
    }

    /// The substrate graph.
    pub fn graph(&self) -> &BaseGraph {
        &self.graph
    }

    /// The root position.
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Inserts a word, creating positions for missing characters.
    pub fn insert(&mut self, word: &str) {
        let mut current = self.root;
        for ch in word.chars() {
            let next = self
                .children
                .get(&current)
                .and_then(|map| map.get(&ch))
                .copied();
            current = match next {
                Some(node) => node,
                None => {
                    let node = self.graph.add_node(Node::new(ch.to_string()));
                    self.graph.add_edge(Edge::between(current, node));
                    self.children.entry(current).or_default().insert(ch, node);
                    node
                }
            };
        }
        self.terminal.insert(current);
    }

    fn walk(&self, text: &str) -> Option<NodeId> {
        let mut current = self.root;
        for ch in text.chars() {
            current = *self.children.get(&current)?.get(&ch)?;
        }
        Some(current)
    }

    /// Whether the exact word was inserted.
    pub fn contains(&self, word: &str) -> bool {
        self.walk(word)
            .is_some_and(|node| self.terminal.contains(&node))
    }

    /// Whether any inserted word starts with the prefix.
    pub fn starts_with(&self, prefix: &str) -> bool {
        self.walk(prefix).is_some()
    }

    /// Every inserted word below a prefix, in lexicographic order.
    pub fn words_with_prefix(&self, prefix: &str) -> Vec<String> {
        let Some(start) = self.walk(prefix) else {
            return Vec::new();
        };
        let mut words = Vec::new();
        let mut stack = vec![(start, prefix.to_string())];
        while let Some((node, word)) = stack.pop() {
            if self.terminal.contains(&node) {
                words.push(word.clone());
            }
            if let Some(map) = self.children.get(&node) {
                // Reverse so the stack yields characters in order.
                for (ch, child) in map.iter().rev() {
                    let mut extended = word.clone();
                    extended.push(*ch);
                    stack.push((*child, extended));
                }
            }
        }
        words
    }
}
