use poly_adt::{AvlTree, RbTree, ScapegoatTree, SplayTree, Treap};
use poly_core::RngHandle;
use proptest::prelude::*;

#[test]
fn treap_keeps_order_and_heap_shape() {
    let mut treap = Treap::new("treap", RngHandle::from_seed(7));
    for key in [5, 3, 8, 1, 4, 9, 2] {
        treap.insert(key);
    }
    assert_eq!(treap.in_order(), vec![1, 2, 3, 4, 5, 8, 9]);
    assert!(treap.heap_violations().is_empty());
    assert!(treap.find(8).is_some());
    assert!(treap.find(6).is_none());
}

#[test]
fn treap_delete_rotates_to_leaf() {
    let mut treap = Treap::new("treap", RngHandle::from_seed(11));
    for key in [5, 3, 8, 1, 4] {
        treap.insert(key);
    }
    assert!(treap.delete(3));
    assert!(!treap.delete(3));
    assert_eq!(treap.in_order(), vec![1, 4, 5, 8]);
    assert!(treap.heap_violations().is_empty());
    assert_eq!(treap.graph().node_count(), 4);
}

#[test]
fn treap_split_and_merge_partition_the_keys() {
    let mut treap = Treap::new("treap", RngHandle::from_seed(3));
    for key in 1..=10 {
        treap.insert(key);
    }
    let upper = treap.split(6);
    assert_eq!(treap.in_order(), vec![1, 2, 3, 4, 5]);
    assert_eq!(upper.in_order(), vec![6, 7, 8, 9, 10]);
    assert!(upper.heap_violations().is_empty());
    treap.merge(upper);
    assert_eq!(treap.in_order(), (1..=10).collect::<Vec<_>>());
    assert!(treap.heap_violations().is_empty());
}

#[test]
fn avl_sequential_insert_stays_balanced() {
    let mut avl = AvlTree::new("avl");
    for key in 1..=15 {
        avl.insert(key);
    }
    assert_eq!(avl.in_order(), (1..=15).collect::<Vec<_>>());
    let root = avl.root().unwrap();
    assert_eq!(avl.height(Some(root)), 3);
    assert!(avl.balance_factor(root).abs() <= 1);
}

#[test]
fn avl_rotation_cases() {
    // Left-left, right-right, left-right, right-left.
    for keys in [[3, 2, 1], [1, 2, 3], [3, 1, 2], [1, 3, 2]] {
        let mut avl = AvlTree::new("avl");
        for key in keys {
            avl.insert(key);
        }
        let root = avl.root().unwrap();
        assert_eq!(avl.height(Some(root)), 1, "keys {keys:?}");
        let mut sorted = keys.to_vec();
        sorted.sort_unstable();
        assert_eq!(avl.in_order(), sorted);
    }
}

#[test]
fn redblack_insert_repairs_colours() {
    let mut tree = RbTree::new("rb");
    for key in 1..=20 {
        tree.insert(key);
    }
    assert_eq!(tree.in_order(), (1..=20).collect::<Vec<_>>());
    assert!(tree.colour_violations().is_empty());
    assert!(tree.find(13).is_some());
}

#[test]
fn splay_find_moves_the_key_to_the_root() {
    let mut tree = SplayTree::new("splay");
    for key in [10, 5, 15, 3, 8] {
        tree.insert(key);
    }
    let found = tree.find(3).unwrap();
    assert_eq!(tree.root(), Some(found));
    assert_eq!(tree.in_order(), vec![3, 5, 8, 10, 15]);
    assert!(tree.find(99).is_none());
}

#[test]
fn scapegoat_rebuilds_cap_the_height() {
    let mut tree = ScapegoatTree::new("sg");
    for key in 1..=100 {
        tree.insert(key);
    }
    assert_eq!(tree.in_order(), (1..=100).collect::<Vec<_>>());
    // Sequential inserts without rebuilds would reach height 99.
    assert!(tree.height() <= 20, "height {}", tree.height());
    assert!(tree.find(57).is_some());
}

proptest! {
    #[test]
    fn treap_orders_arbitrary_keys(keys in prop::collection::btree_set(-1000i64..1000, 1..40)) {
        let mut treap = Treap::new("treap", RngHandle::from_seed(1));
        for key in &keys {
            treap.insert(*key);
        }
        prop_assert_eq!(treap.in_order(), keys.iter().copied().collect::<Vec<_>>());
        prop_assert!(treap.heap_violations().is_empty());
    }

    #[test]
    fn avl_balance_factor_bounded(keys in prop::collection::btree_set(-1000i64..1000, 1..40)) {
        let mut avl = AvlTree::new("avl");
        for key in &keys {
            avl.insert(*key);
        }
        prop_assert_eq!(avl.in_order(), keys.iter().copied().collect::<Vec<_>>());
        if let Some(root) = avl.root() {
            prop_assert!(avl.balance_factor(root).abs() <= 1);
        }
    }

    #[test]
    fn redblack_invariants_hold(keys in prop::collection::btree_set(-1000i64..1000, 1..40)) {
        let mut tree = RbTree::new("rb");
        for key in &keys {
            tree.insert(*key);
        }
        prop_assert_eq!(tree.in_order(), keys.iter().copied().collect::<Vec<_>>());
        prop_assert!(tree.colour_violations().is_empty());
    }
}
