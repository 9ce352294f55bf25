use poly_graph::Node;
use poly_list::{ops, ListGraph};
use proptest::prelude::*;

fn from_labels(labels: &[&str]) -> ListGraph {
    let mut list = ListGraph::new("seq");
    for label in labels {
        list.append(Node::new(*label));
    }
    list
}

fn labels(list: &ListGraph) -> Vec<String> {
    ops::map(list, |node| node.label.clone())
}

#[test]
fn linear_search_finds_the_first_match() {
    let list = from_labels(&["ant", "bee", "cat"]);
    let hit = ops::linear_search(&list, |node| node.label.starts_with('b'));
    assert_eq!(hit, Some(list.to_vec()[1]));
    assert_eq!(ops::linear_search(&list, |node| node.label == "dog"), None);
}

#[test]
fn binary_search_on_a_sorted_chain() {
    let list = from_labels(&["ant", "bee", "cat", "dog"]);
    let hit = ops::binary_search(&list, |node| node.label.clone(), &"cat".to_string());
    assert_eq!(hit, Some(list.to_vec()[2]));
    let miss = ops::binary_search(&list, |node| node.label.clone(), &"cow".to_string());
    assert_eq!(miss, None);
}

#[test]
fn quicksort_orders_by_key() {
    let mut list = from_labels(&["cat", "ant", "dog", "bee"]);
    ops::quicksort(&mut list, |node| node.label.clone());
    assert_eq!(labels(&list), vec!["ant", "bee", "cat", "dog"]);
    assert!(list.validate().is_empty());
}

#[test]
fn mergesort_orders_by_key() {
    let mut list = from_labels(&["cat", "ant", "dog", "bee"]);
    ops::mergesort(&mut list, |node| node.label.clone());
    assert_eq!(labels(&list), vec!["ant", "bee", "cat", "dog"]);
}

#[test]
fn bubble_sort_orders_by_key() {
    let mut list = from_labels(&["bee", "ant"]);
    ops::bubble_sort(&mut list, |node| node.label.clone());
    assert_eq!(labels(&list), vec!["ant", "bee"]);
}

#[test]
fn reverse_flips_the_chain() {
    let mut list = from_labels(&["a", "b", "c"]);
    ops::reverse(&mut list);
    assert_eq!(labels(&list), vec!["c", "b", "a"]);
    assert!(list.validate().is_empty());
}

#[test]
fn filter_and_fold_walk_in_order() {
    let list = from_labels(&["a", "bb", "ccc"]);
    let long = ops::filter(&list, |node| node.label.len() > 1);
    assert_eq!(long.len(), 2);
    let total = ops::fold(&list, 0usize, |sum, node| sum + node.label.len());
    assert_eq!(total, 6);
}

proptest! {
    #[test]
    fn sorts_agree_with_the_standard_sort(labels in proptest::collection::vec("[a-z]{1,6}", 0..12)) {
        let refs: Vec<&str> = labels.iter().map(String::as_str).collect();
        let mut list = from_labels(&refs);
        ops::quicksort(&mut list, |node| node.label.clone());
        let mut expected = labels.clone();
        expected.sort();
        prop_assert_eq!(crate::labels(&list), expected);
        prop_assert!(list.validate().is_empty());
    }

    #[test]
    fn reverse_twice_is_identity(labels in proptest::collection::vec("[a-z]{1,6}", 0..12)) {
        let refs: Vec<&str> = labels.iter().map(String::as_str).collect();
        let mut list = from_labels(&refs);
        ops::reverse(&mut list);
        ops::reverse(&mut list);
        prop_assert_eq!(crate::labels(&list), labels);
    }
}
