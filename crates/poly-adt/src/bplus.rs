//! B+ tree: keys live in linked leaves, internal pages only route.

use std::collections::BTreeMap;

use poly_core::NodeId;
use poly_graph::{BaseGraph, Node};

/// One B+ tree page. Leaves hold key-value pairs and a link to the next
/// leaf; internal pages hold router keys and children.
#[derive(Debug, Clone, Default)]
pub struct PlusPage {
    /// Sorted keys.
    pub keys: Vec<i64>,
    /// Values paired with the keys, leaves only.
    pub values: Vec<String>,
    /// Children, internal pages only.
    pub children: Vec<NodeId>,
    /// Next leaf in key order, leaves only.
    pub next_leaf: Option<NodeId>,
    /// Whether the page is a leaf.
    pub leaf: bool,
}

/// B+ tree of minimum degree `t`. Leaf splits copy the separator up and
/// thread the new leaf into the scan chain; internal splits move it up.
#[derive(Debug, Clone)]
pub struct BPlusTree {
    graph: BaseGraph,
    root: Option<NodeId>,
    pages: BTreeMap<NodeId, PlusPage>,
    degree: usize,
}

impl BPlusTree {
    /// Creates an empty tree. Degrees below 2 are clamped to 2.
    pub fn new(name: impl Into<String>, degree: usize) -> Self {
        Self {
            graph: BaseGraph::new(name),
            root: None,
            pages: BTreeMap::new(),
            degree: degree.max(2),
        }
    }

    /// The substrate graph holding one node per page.
    pub fn graph(&self) -> &BaseGraph {
        &self.graph
    }

    /// The root page, if any.
    pub fn root(&self) -> Option<NodeId> {
        self.root
    }

    /// A page's contents.
    pub fn page(&self, node: NodeId) -> Option<&PlusPage> {
        self.pages.get(&node)
    }

    fn max_keys(&self) -> usize {
        2 * self.degree - 1
    }

    /// Inserts a key-value pair.
    pub fn insert(&mut self, key: i64, value: impl Into<String>) {
        let value = value.into();
        let Some(root) = self.root else {
            let id = self.graph.add_node(Node::new("leaf"));
            self.pages.insert(
                id,
                PlusPage {
                    keys: vec![key],
                    values: vec![value],
                    children: Vec::new(),
                    next_leaf: None,
                    leaf: true,
                },
            );
            self.root = Some(id);
            return;
        };
        let root = if self.pages[&root].keys.len() == self.max_keys() {
            let new_root = self.graph.add_node(Node::new("page"));
            self.pages.insert(
                new_root,
                PlusPage {
                    keys: Vec::new(),
                    values: Vec::new(),
                    children: vec![root],
                    next_leaf: None,
                    leaf: false,
                },
            );
            self.split_child(new_root, 0);
            self.root = Some(new_root);
            new_root
        } else {
            root
        };
        self.insert_non_full(root, key, value);
    }

    fn insert_non_full(&mut self, mut node: NodeId, key: i64, value: String) {
        loop {
            if self.pages[&node].leaf {
                if let Some(page) = self.pages.get_mut(&node) {
                    let at = page.keys.partition_point(|stored| *stored <= key);
                    page.keys.insert(at, key);
                    page.values.insert(at, value);
                }
                return;
            }
            let mut index = self.pages[&node].keys.partition_point(|stored| *stored < key);
            let child = self.pages[&node].children[index];
            if self.pages[&child].keys.len() == self.max_keys() {
                self.split_child(node, index);
                if key >= self.pages[&node].keys[index] {
                    index += 1;
                }
            }
            node = self.pages[&node].children[index];
        }
    }

    fn split_child(&mut self, parent: NodeId, index: usize) {
        let child = self.pages[&parent].children[index];
        let leaf = self.pages[&child].leaf;
        let right_id = self.graph.add_node(Node::new(if leaf { "leaf" } else { "page" }));
        let separator;
        if leaf {
            // Leaves keep every key; the separator is copied up.
            let mid = self.degree;
            let right = {
                let page = &self.pages[&child];
                PlusPage {
                    keys: page.keys[mid..].to_vec(),
                    values: page.values[mid..].to_vec(),
                    children: Vec::new(),
                    next_leaf: page.next_leaf,
                    leaf: true,
                }
            };
            separator = right.keys[0];
            self.pages.insert(right_id, right);
            if let Some(page) = self.pages.get_mut(&child) {
                page.keys.truncate(mid);
                page.values.truncate(mid);
                page.next_leaf = Some(right_id);
            }
        } else {
            let mid = self.degree - 1;
            let right = {
                let page = &self.pages[&child];
                PlusPage {
                    keys: page.keys[mid + 1..].to_vec(),
                    values: Vec::new(),
                    children: page.children[mid + 1..].to_vec(),
                    next_leaf: None,
                    leaf: false,
                }
            };
            separator = self.pages[&child].keys[mid];
            self.pages.insert(right_id, right);
            if let Some(page) = self.pages.get_mut(&child) {
                page.keys.truncate(mid);
                page.children.truncate(mid + 1);
            }
        }
        if let Some(page) = self.pages.get_mut(&parent) {
            page.keys.insert(index, separator);
            page.children.insert(index + 1, right_id);
        }
    }

    fn leaf_for(&self, key: i64) -> Option<NodeId> {
        let mut current = self.root?;
        loop {
            let page = &self.pages[&current];
            if page.leaf {
                return Some(current);
            }
            let index = page.keys.partition_point(|stored| *stored <= key);
            current = page.children[index];
        }
    }

    /// Looks up the value stored for a key.
    pub fn get(&self, key: i64) -> Option<&str> {
        let leaf = self.leaf_for(key)?;
        let page = &self.pages[&leaf];
        page.keys
            .iter()
            .position(|stored| *stored == key)
            .map(|at| page.values[at].as_str())
    }

    /// Key-value pairs with keys in `[low, high]`, walked along the leaf
    /// chain.
    pub fn range(&self, low: i64, high: i64) -> Vec<(i64, String)> {
        let mut out = Vec::new();
        let mut cursor = self.leaf_for(low);
        while let Some(leaf) = cursor {
            let page = &self.pages[&leaf];
            for (key, value) in page.keys.iter().zip(&page.values) {
                if *key > high {
                    return out;
                }
                if *key >= low {
                    out.push((*key, value.clone()));
                }
            }
            cursor = page.next_leaf;
        }
        out
    }

    /// The first leaf in key order.
    pub fn first_leaf(&self) -> Option<NodeId> {
        let mut current = self.root?;
        loop {
            let page = &self.pages[&current];
            if page.leaf {
                return Some(current);
            }
            current = *page.children.first()?;
        }
    }
}
