use std::collections::BTreeMap;

use poly_core::Endpoint;
use poly_graph::{Node, TypeConstraints};
use poly_uber::{TypeSystem, TypedUbergraph};

fn registry() -> TypeSystem {
    let mut types = TypeSystem::new();
    types.register_node_type("animal", BTreeMap::new());
    types.register_node_type("dog", BTreeMap::new());
    types.register_node_type("rock", BTreeMap::new());
    types.register_edge_type("owns", BTreeMap::new());
    types.add_subtype("animal", "dog");
    types.constrain(
        "owns",
        ["person".to_string()],
        ["animal".to_string()],
    );
    types
}

#[test]
fn subtyping_is_reflexive_and_transitive() {
    let mut types = registry();
    types.add_subtype("dog", "puppy");
    assert!(types.is_subtype_of("dog", "dog"));
    assert!(types.is_subtype_of("dog", "animal"));
    assert!(types.is_subtype_of("puppy", "animal"));
    assert!(!types.is_subtype_of("animal", "dog"));
    assert!(!types.is_subtype_of("rock", "animal"));

    let subtypes = types.subtypes_of("animal");
    assert!(subtypes.contains("dog"));
    assert!(subtypes.contains("puppy"));
}

#[test]
fn registry_rules_admit_subtypes() {
    let types = registry();
    assert!(types.can_connect("person", "owns", "dog"));
    assert!(types.can_connect("person", "owns", "animal"));
    assert!(!types.can_connect("person", "owns", "rock"));
    assert!(!types.can_connect("rock", "owns", "dog"));
    // Unregistered edge types are unconstrained.
    assert!(types.can_connect("rock", "likes", "rock"));
}

#[test]
fn typed_edges_enforce_the_registry() {
    let mut graph = TypedUbergraph::new("pets");
    *graph.types_mut() = registry();
    let person = graph.add_typed_node(Node::new("ada"), "person");
    let dog = graph.add_typed_node(Node::new("rex"), "dog");
    let rock = graph.add_typed_node(Node::new("boulder"), "rock");

    let owns = graph
        .add_typed_edge(
            Endpoint::Node(person),
            Endpoint::Node(dog),
            TypeConstraints::new("owns"),
        )
        .unwrap();
    assert!(graph.validate().is_empty());
    assert!(graph.can_connect(Endpoint::Node(person), owns, Endpoint::Node(dog)));
    assert!(!graph.can_connect(Endpoint::Node(person), owns, Endpoint::Node(rock)));

    let err = graph
        .add_typed_edge(
            Endpoint::Node(person),
            Endpoint::Node(rock),
            TypeConstraints::new("owns"),
        )
        .unwrap_err();
    assert_eq!(err.info().code, "type-rule-violated");
}

#[test]
fn edge_allow_lists_narrow_the_registry() {
    let mut graph = TypedUbergraph::new("narrow");
    *graph.types_mut() = registry();
    let person = graph.add_typed_node(Node::new("ada"), "person");
    let dog = graph.add_typed_node(Node::new("rex"), "dog");

    let mut typing = TypeConstraints::new("owns");
    typing.allowed_targets.insert("rock".to_string());
    let err = graph
        .add_typed_edge(Endpoint::Node(person), Endpoint::Node(dog), typing)
        .unwrap_err();
    assert_eq!(err.info().code, "edge-allow-list-violated");
}

#[test]
fn compatible_endpoints_follow_the_allow_lists() {
    let mut graph = TypedUbergraph::new("compat");
    *graph.types_mut() = registry();
    let person = graph.add_typed_node(Node::new("ada"), "person");
    let dog = graph.add_typed_node(Node::new("rex"), "dog");
    let rock = graph.add_typed_node(Node::new("boulder"), "rock");

    let mut typing = TypeConstraints::new("owns");
    typing.allowed_sources.insert("person".to_string());
    typing.allowed_targets.insert("animal".to_string());
    let owns = graph
        .add_typed_edge(Endpoint::Node(person), Endpoint::Node(dog), typing)
        .unwrap();

    assert_eq!(graph.compatible_sources(owns), vec![Endpoint::Node(person)]);
    assert_eq!(graph.compatible_targets(owns), vec![Endpoint::Node(dog)]);
    let _ = rock;
}

#[test]
fn validation_flags_types_edited_after_the_fact() {
    let mut graph = TypedUbergraph::new("drift");
    *graph.types_mut() = registry();
    let person = graph.add_typed_node(Node::new("ada"), "person");
    let dog = graph.add_typed_node(Node::new("rex"), "dog");
    let mut typing = TypeConstraints::new("owns");
    typing.allowed_targets.insert("animal".to_string());
    graph
        .add_typed_edge(Endpoint::Node(person), Endpoint::Node(dog), typing)
        .unwrap();
    assert!(graph.validate().is_empty());

    // Retyping the target behind the wrapper's back shows up in validation.
    if let Some(node) = graph.uber_mut().graph_mut().node_mut(dog) {
        node.type_name = Some("rock".to_string());
    }
    assert_eq!(graph.validate().len(), 1);
}
