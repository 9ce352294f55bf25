use std::collections::BTreeSet;

use poly_core::RngHandle;
use poly_graph::Node;
use poly_hyper::{analysis, Hypergraph};

fn labelled(hyper: &mut Hypergraph, labels: &[&str]) -> Vec<poly_core::NodeId> {
    labels
        .iter()
        .map(|label| hyper.add_node(Node::new(*label)))
        .collect()
}

#[test]
fn traversal_follows_shared_endpoints() {
    let mut hyper = Hypergraph::new("closure");
    let ids = labelled(&mut hyper, &["a", "b", "c", "d"]);
    hyper.add_hyperedge(&[ids[0]], &[ids[1]]).unwrap();
    hyper.add_hyperedge(&[ids[1]], &[ids[2]]).unwrap();
    let order = analysis::traverse(&hyper, ids[0]);
    assert_eq!(order, vec![ids[0], ids[1], ids[2]]);
    assert!(analysis::connected(&hyper, ids[0], ids[2]));
    assert!(!analysis::connected(&hyper, ids[0], ids[3]));
}

#[test]
fn components_partition_the_nodes() {
    let mut hyper = Hypergraph::new("parts");
    let ids = labelled(&mut hyper, &["a", "b", "c", "d"]);
    hyper.add_hyperedge(&[ids[0]], &[ids[1]]).unwrap();
    let parts = analysis::components(&hyper);
    assert_eq!(parts.len(), 3);
    assert_eq!(parts[0], vec![ids[0], ids[1]]);
}

#[test]
fn min_cut_separates_two_clusters() {
    // Two triangles joined by a single bridging hyperedge.
    let mut hyper = Hypergraph::new("clusters");
    let ids = labelled(&mut hyper, &["a", "b", "c", "x", "y", "z"]);
    hyper.add_hyperedge(&[ids[0], ids[1]], &[ids[2]]).unwrap();
    hyper.add_hyperedge(&[ids[1], ids[2]], &[ids[0]]).unwrap();
    hyper.add_hyperedge(&[ids[3], ids[4]], &[ids[5]]).unwrap();
    hyper.add_hyperedge(&[ids[4], ids[5]], &[ids[3]]).unwrap();
    hyper.add_hyperedge(&[ids[2]], &[ids[3]]).unwrap();
    let mut rng = RngHandle::from_seed(7);
    let (side_a, side_b, cut) = analysis::min_cut(&hyper, &mut rng);
    assert_eq!(side_a.len() + side_b.len(), 6);
    assert!(!side_a.is_empty() && !side_b.is_empty());
    assert!(cut <= 5, "cut can never exceed the edge count, got {cut}");
}

#[test]
fn min_cut_is_deterministic_for_a_seed() {
    let mut hyper = Hypergraph::new("det");
    let ids = labelled(&mut hyper, &["a", "b", "c", "d"]);
    hyper.add_hyperedge(&[ids[0]], &[ids[1]]).unwrap();
    hyper.add_hyperedge(&[ids[2]], &[ids[3]]).unwrap();
    let first = analysis::min_cut(&hyper, &mut RngHandle::from_seed(11));
    let second = analysis::min_cut(&hyper, &mut RngHandle::from_seed(11));
    assert_eq!(first, second);
}

#[test]
fn spectral_clustering_covers_every_node() {
    let mut hyper = Hypergraph::new("spectral");
    let ids = labelled(&mut hyper, &["a", "b", "c", "x", "y", "z"]);
    hyper.add_hyperedge(&[ids[0], ids[1]], &[ids[2]]).unwrap();
    hyper.add_hyperedge(&[ids[3], ids[4]], &[ids[5]]).unwrap();
    let mut rng = RngHandle::from_seed(3);
    let clusters = analysis::spectral_clustering(&hyper, 2, &mut rng);
    assert_eq!(clusters.len(), 6);
    assert!(clusters.values().all(|cluster| *cluster < 2));
}

#[test]
fn minimal_transversals_hit_every_edge() {
    let mut hyper = Hypergraph::new("hit");
    let ids = labelled(&mut hyper, &["a", "b", "c"]);
    hyper.add_hyperedge(&[ids[0]], &[ids[1]]).unwrap();
    hyper.add_hyperedge(&[ids[1]], &[ids[2]]).unwrap();
    let transversals = analysis::minimal_transversals(&hyper, 10);
    // {b} hits both edges and is the unique smallest transversal.
    assert!(transversals.contains(&BTreeSet::from([ids[1]])));
    for transversal in &transversals {
        assert!(!transversal.contains(&ids[1]) || transversal.len() == 1);
    }
}

#[test]
fn greedy_cover_prefers_the_big_edge() {
    let mut hyper = Hypergraph::new("cover");
    let ids = labelled(&mut hyper, &["a", "b", "c", "d"]);
    let big = hyper
        .add_hyperedge(&[ids[0], ids[1]], &[ids[2], ids[3]])
        .unwrap();
    hyper.add_hyperedge(&[ids[0]], &[ids[1]]).unwrap();
    let cover = analysis::greedy_set_cover(&hyper);
    assert_eq!(cover, vec![big]);
}
