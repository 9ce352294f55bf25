use poly_adt::{BinomialHeap, FibonacciHeap};
use proptest::prelude::*;

#[test]
fn binomial_pop_drains_in_sorted_order() {
    let mut heap = BinomialHeap::new("bin");
    for key in [7, 3, 9, 1, 5, 8, 2] {
        heap.insert(key);
    }
    assert_eq!(heap.peek(), Some(1));
    let mut drained = Vec::new();
    while let Some(key) = heap.pop_min() {
        drained.push(key);
    }
    assert_eq!(drained, vec![1, 2, 3, 5, 7, 8, 9]);
    assert!(heap.is_empty());
}

#[test]
fn binomial_root_list_has_one_tree_per_degree() {
    let mut heap = BinomialHeap::new("bin");
    for key in 0..13 {
        heap.insert(key);
    }
    // 13 keys decompose as 8 + 4 + 1.
    assert_eq!(heap.root_degrees(), vec![0, 2, 3]);
}

#[test]
fn binomial_merge_combines_heaps() {
    let mut left = BinomialHeap::new("left");
    let mut right = BinomialHeap::new("right");
    for key in [10, 4, 6] {
        left.insert(key);
    }
    for key in [3, 11, 5] {
        right.insert(key);
    }
    left.merge(right);
    assert_eq!(left.len(), 6);
    assert_eq!(left.peek(), Some(3));
    let mut drained = Vec::new();
    while let Some(key) = left.pop_min() {
        drained.push(key);
    }
    assert_eq!(drained, vec![3, 4, 5, 6, 10, 11]);
}

#[test]
fn fibonacci_pop_drains_in_sorted_order() {
    let mut heap = FibonacciHeap::new("fib");
    for key in [6, 2, 9, 1, 7, 4] {
        heap.insert(key);
    }
    assert_eq!(heap.peek(), Some(1));
    let mut drained = Vec::new();
    while let Some(key) = heap.pop_min() {
        drained.push(key);
    }
    assert_eq!(drained, vec![1, 2, 4, 6, 7, 9]);
    assert!(heap.is_empty());
}

#[test]
fn fibonacci_decrease_key_moves_the_minimum() {
    let mut heap = FibonacciHeap::new("fib");
    let _ = heap.insert(10);
    let node = heap.insert(20);
    heap.insert(15);
    assert_eq!(heap.peek(), Some(10));
    assert!(heap.decrease_key(node, 5));
    assert_eq!(heap.peek(), Some(5));
    assert!(!heap.decrease_key(node, 50));
    assert_eq!(heap.pop_min(), Some(5));
    assert_eq!(heap.pop_min(), Some(10));
}

#[test]
fn fibonacci_decrease_key_cuts_below_a_parent() {
    let mut heap = FibonacciHeap::new("fib");
    let mut nodes = Vec::new();
    for key in [8, 3, 12, 6, 10, 1] {
        nodes.push(heap.insert(key));
    }
    // Consolidation links trees, giving some nodes parents.
    assert_eq!(heap.pop_min(), Some(1));
    let target = nodes[2];
    assert!(heap.decrease_key(target, 0));
    assert_eq!(heap.peek(), Some(0));
    let mut drained = Vec::new();
    while let Some(key) = heap.pop_min() {
        drained.push(key);
    }
    assert_eq!(drained, vec![0, 3, 6, 8, 10]);
}

#[test]
fn fibonacci_merge_concatenates_root_lists() {
    let mut left = FibonacciHeap::new("left");
    let mut right = FibonacciHeap::new("right");
    for key in [9, 2] {
        left.insert(key);
    }
    for key in [4, 1, 7] {
        right.insert(key);
    }
    left.merge(right);
    assert_eq!(left.len(), 5);
    let mut drained = Vec::new();
    while let Some(key) = left.pop_min() {
        drained.push(key);
    }
    assert_eq!(drained, vec![1, 2, 4, 7, 9]);
}

proptest! {
    #[test]
    fn binomial_drains_any_input_sorted(keys in prop::collection::vec(-1000i64..1000, 1..50)) {
        let mut heap = BinomialHeap::new("bin");
        for key in &keys {
            heap.insert(*key);
        }
        let mut drained = Vec::new();
        while let Some(key) = heap.pop_min() {
            drained.push(key);
        }
        let mut expected = keys.clone();
        expected.sort_unstable();
        prop_assert_eq!(drained, expected);
    }

    #[test]
    fn fibonacci_drains_any_input_sorted(keys in prop::collection::vec(-1000i64..1000, 1..50)) {
        let mut heap = FibonacciHeap::new("fib");
        for key in &keys {
            heap.insert(*key);
        }
        let mut drained = Vec::new();
        while let Some(key) = heap.pop_min() {
            drained.push(key);
        }
        let mut expected = keys.clone();
        expected.sort_unstable();
        prop_assert_eq!(drained, expected);
    }
}
