//! B-tree with preemptive splitting on the way down.

use std::collections::BTreeMap;

use poly_core::NodeId;
use poly_graph::{BaseGraph, Node};

/// Keys and children of one B-tree page.
#[derive(Debug, Clone, Default)]
pub struct Page {
    /// Sorted keys, at most `2 * degree - 1` of them.
    pub keys: Vec<i64>,
    /// Children, one more than the keys on internal pages.
    pub children: Vec<NodeId>,
    /// Whether the page is a leaf.
    pub leaf: bool,
}

/// B-tree of minimum degree `t`: every page holds between `t - 1` and
/// `2t - 1` keys. Full pages are split before descent so insertion never
/// backtracks.
#[derive(Debug, Clone)]
pub struct BTree {
    graph: BaseGraph,
    root: Option<NodeId>,
    pages: BTreeMap<NodeId, Page>,
    degree: usize,
}

impl BTree {
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

    /// The minimum degree `t`.
    pub fn degree(&self) -> usize {
        self.degree
    }

    /// The root page, if any.
    pub fn root(&self) -> Option<NodeId> {
        self.root
    }

    /// A page's contents.
    pub fn page(&self, node: NodeId) -> Option<&Page> {
        self.pages.get(&node)
    }

    fn max_keys(&self) -> usize {
        2 * self.degree - 1
    }

    fn new_page(&mut self, leaf: bool) -> NodeId {
        let id = self.graph.add_node(Node::new("page"));
        self.pages.insert(
            id,
            Page {
                keys: Vec::new(),
                children: Vec::new(),
                leaf,
            },
        );
        id
    }

    /// Inserts a key.
    pub fn insert(&mut self, key: i64) {
        let Some(root) = self.root else {
            let id = self.new_page(true);
            if let Some(page) = self.pages.get_mut(&id) {
                page.keys.push(key);
            }
            self.root = Some(id);
            return;
        };
        let root = if self.pages[&root].keys.len() == self.max_keys() {
            let new_root = self.new_page(false);
            if let Some(page) = self.pages.get_mut(&new_root) {
                page.children.push(root);
            }
            self.split_child(new_root, 0);
            self.root = Some(new_root);
            new_root
        } else {
            root
        };
        self.insert_non_full(root, key);
    }

    fn insert_non_full(&mut self, mut node: NodeId, key: i64) {
        loop {
            if self.pages[&node].leaf {
                let page = self.pages.get_mut(&node);
                if let Some(page) = page {
                    let at = page.keys.partition_point(|stored| *stored <= key);
                    page.keys.insert(at, key);
                }
                return;
            }
            let mut index = self.pages[&node].keys.partition_point(|stored| *stored < key);
            let child = self.pages[&node].children[index];
            if self.pages[&child].keys.len() == self.max_keys() {
                self.split_child(node, index);
                if key > self.pages[&node].keys[index] {
                    index += 1;
                }
            }
            node = self.pages[&node].children[index];
        }
    }

    fn split_child(&mut self, parent: NodeId, index: usize) {
        let child = self.pages[&parent].children[index];
        let mid = self.degree - 1;
        let (middle_key, right_page) = {
            let page = &self.pages[&child];
            let middle_key = page.keys[mid];
            let right = Page {
                keys: page.keys[mid + 1..].to_vec(),
                children: if page.leaf {
                    Vec::new()
                } else {
                    page.children[mid + 1..].to_vec()
                },
                leaf: page.leaf,
            };
            (middle_key, right)
        };
        let right_id = self.graph.add_node(Node::new("page"));
        self.pages.insert(right_id, right_page);
        if let Some(page) = self.pages.get_mut(&child) {
            page.keys.truncate(mid);
            if !page.leaf {
                page.children.truncate(mid + 1);
            }
        }
        if let Some(page) = self.pages.get_mut(&parent) {
            page.keys.insert(index, middle_key);
            page.children.insert(index + 1, right_id);
        }
    }

    /// Whether the tree holds a key.
    pub fn contains(&self, key: i64) -> bool {
        let mut current = self.root;
        while let Some(node) = current {
            let page = &self.pages[&node];
            let index = page.keys.partition_point(|stored| *stored < key);
            if index < page.keys.len() && page.keys[index] == key {
                return true;
            }
            current = if page.leaf {
                None
            } else {
                Some(page.children[index])
            };
        }
        false
    }

    /// Every key in ascending order.
    pub fn in_order(&self) -> Vec<i64> {
        let mut out = Vec::new();
        let Some(root) = self.root else {
            return out;
        };
        // (node, next child/key index) cursor stack.
        let mut stack = vec![(root, 0usize)];
        while let Some((node, index)) = stack.pop() {
            let page = &self.pages[&node];
            if page.leaf {
                out.extend(&page.keys);
                continue;
            }
            if index < page.keys.len() {
                stack.push((node, index + 1));
                if index > 0 {
                    out.push(page.keys[index - 1]);
                }
                stack.push((page.children[index], 0));
            } else {
                if index > 0 {
                    out.push(page.keys[index - 1]);
                }
                stack.push((page.children[index], 0));
            }
        }
        out
    }
}
