//! Algorithms over list chains: searching, sorting, and folding.
//!
//! Sorts reorder the chain in place by relinking edges; node identities and
//! payloads are untouched.

use poly_core::NodeId;
use poly_graph::{Edge, Node};

use crate::list::ListGraph;

/// First node matching the predicate, walking from the head.
pub fn linear_search<P>(list: &ListGraph, mut predicate: P) -> Option<NodeId>
where
    P: FnMut(&Node) -> bool,
{
    list.to_vec()
        .into_iter()
        .find(|id| list.graph().node(*id).is_some_and(|node| predicate(node)))
}

/// Binary search over a chain already sorted by `key`. Returns the first
/// matching node, or `None` when absent or when any node is missing a key.
pub fn binary_search<K, F>(list: &ListGraph, key: F, target: &K) -> Option<NodeId>
where
    K: Ord,
    F: Fn(&Node) -> K,
{
    let order = list.to_vec();
    let mut low = 0usize;
    let mut high = order.len();
    while low < high {
        let mid = low + (high - low) / 2;
        let node = list.graph().node(order[mid])?;
        match key(node).cmp(target) {
            std::cmp::Ordering::Equal => return Some(order[mid]),
            std::cmp::Ordering::Less => low = mid + 1,
            std::cmp::Ordering::Greater => high = mid,
        }
    }
    None
}

/// Relinks the chain to follow `order`. The order must be a permutation of
/// the list's nodes; extra or missing ids leave the chain broken for
/// `validate` to report.
pub fn relink(list: &mut ListGraph, order: &[NodeId]) {
    let edges = list.graph().edge_ids();
    for edge in edges {
        let _ = list.graph_mut().remove_edge(edge);
    }
    for pair in order.windows(2) {
        list.graph_mut().add_edge(Edge::between(pair[0], pair[1]));
    }
}

fn sorted_key_order<K, F>(list: &ListGraph, key: &F) -> Vec<(K, NodeId)>
where
    K: Ord,
    F: Fn(&Node) -> K,
{
    list.to_vec()
        .into_iter()
        .filter_map(|id| list.graph().node(id).map(|node| (key(node), id)))
        .collect()
}

/// Sorts the chain by `key` using quicksort (median-free Lomuto partition).
pub fn quicksort<K, F>(list: &mut ListGraph, key: F)
where
    K: Ord,
    F: Fn(&Node) -> K,
{
    let mut items = sorted_key_order(list, &key);
    let mut spans = vec![(0usize, items.len())];
    while let Some((low, high)) = spans.pop() {
        if high - low < 2 {
            continue;
        }
        let pivot = high - 1;
        let mut store = low;
        for i in low..pivot {
            if items[i].0 <= items[pivot].0 {
                items.swap(i, store);
                store += 1;
            }
        }
        items.swap(store, pivot);
        spans.push((low, store));
        spans.push((store + 1, high));
    }
    let order: Vec<NodeId> = items.into_iter().map(|(_, id)| id).collect();
    relink(list, &order);
}

/// Sorts the chain by `key` using a bottom-up merge sort.
pub fn mergesort<K, F>(list: &mut ListGraph, key: F)
where
    K: Ord + Clone,
    F: Fn(&Node) -> K,
{
    let mut items = sorted_key_order(list, &key);
    let len = items.len();
    let mut width = 1usize;
    let mut buffer = Vec::with_capacity(len);
    while width < len {
        let mut start = 0;
        while start < len {
            let middle = (start + width).min(len);
            let end = (start + 2 * width).min(len);
            buffer.clear();
            let (mut left, mut right) = (start, middle);
            while left < middle && right < end {
                if items[left].0 <= items[right].0 {
                    buffer.push(items[left].clone());
                    left += 1;
                } else {
                    buffer.push(items[right].clone());
                    right += 1;
                }
            }
            buffer.extend_from_slice(&items[left..middle]);
            buffer.extend_from_slice(&items[right..end]);
            items[start..end].clone_from_slice(&buffer);
            start = end;
        }
        width *= 2;
    }
    let order: Vec<NodeId> = items.into_iter().map(|(_, id)| id).collect();
    relink(list, &order);
}

/// Sorts the chain by `key` using bubble sort with the early-exit pass check.
pub fn bubble_sort<K, F>(list: &mut ListGraph, key: F)
where
    K: Ord,
    F: Fn(&Node) -> K,
{
    let mut items = sorted_key_order(list, &key);
    loop {
        let mut swapped = false;
        for i in 1..items.len() {
            if items[i - 1].0 > items[i].0 {
                items.swap(i - 1, i);
                swapped = true;
            }
        }
        if !swapped {
            break;
        }
    }
    let order: Vec<NodeId> = items.into_iter().map(|(_, id)| id).collect();
    relink(list, &order);
}

/// Reverses the chain in place.
pub fn reverse(list: &mut ListGraph) {
    let mut order = list.to_vec();
    order.reverse();
    relink(list, &order);
}

/// Maps every node in chain order.
pub fn map<T, F>(list: &ListGraph, mut transform: F) -> Vec<T>
where
    F: FnMut(&Node) -> T,
{
    list.to_vec()
        .into_iter()
        .filter_map(|id| list.graph().node(id).map(&mut transform))
        .collect()
}

/// Nodes whose payload satisfies the predicate, in chain order.
pub fn filter<P>(list: &ListGraph, mut predicate: P) -> Vec<NodeId>
where
    P: FnMut(&Node) -> bool,
{
    list.to_vec()
        .into_iter()
        .filter(|id| list.graph().node(*id).is_some_and(|node| predicate(node)))
        .collect()
}

/// Folds the chain from the head.
pub fn fold<T, F>(list: &ListGraph, initial: T, mut combine: F) -> T
where
    F: FnMut(T, &Node) -> T,
{
    let mut accumulator = initial;
    for id in list.to_vec() {
        if let Some(node) = list.graph().node(id) {
            accumulator = combine(accumulator, node);
        }
    }
    accumulator
}
