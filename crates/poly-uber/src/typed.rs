//! Type registry and the typed ubergraph variant.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use poly_core::{EdgeId, Endpoint, ErrorInfo, NodeId, PolyError};
use poly_graph::{Node, TypeConstraints};

use crate::ubergraph::Ubergraph;

/// Type name used for untyped entities.
pub const DEFAULT_TYPE: &str = "default";

/// Connection allow-lists registered for an edge type. Empty sides are
/// unconstrained.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PortRule {
    /// Types a source endpoint may carry.
    pub sources: BTreeSet<String>,
    /// Types a target endpoint may carry.
    pub targets: BTreeSet<String>,
}

/// Registry of node and edge types with a subtype hierarchy and per-edge-type
/// connection rules.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TypeSystem {
    node_types: BTreeMap<String, BTreeMap<String, String>>,
    edge_types: BTreeMap<String, BTreeMap<String, String>>,
    /// Parent type to direct subtypes.
    hierarchy: BTreeMap<String, BTreeSet<String>>,
    rules: BTreeMap<String, PortRule>,
}

impl TypeSystem {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a node type with optional properties.
    pub fn register_node_type(
        &mut self,
        name: impl Into<String>,
        properties: BTreeMap<String, String>,
    ) {
        self.node_types.insert(name.into(), properties);
    }

    /// Registers an edge type with optional properties.
    pub fn register_edge_type(
        &mut self,
        name: impl Into<String>,
        properties: BTreeMap<String, String>,
    ) {
        self.edge_types.insert(name.into(), properties);
    }

    /// Whether a node type is registered.
    pub fn has_node_type(&self, name: &str) -> bool {
        self.node_types.contains_key(name)
    }

    /// Whether an edge type is registered.
    pub fn has_edge_type(&self, name: &str) -> bool {
        self.edge_types.contains_key(name)
    }

    /// Declares `child` a direct subtype of `parent`.
    pub fn add_subtype(&mut self, parent: impl Into<String>, child: impl Into<String>) {
        self.hierarchy
            .entry(parent.into())
            .or_default()
            .insert(child.into());
    }

    /// Adds connection allow-lists for an edge type. Repeated calls extend
    /// the existing lists.
    pub fn constrain(
        &mut self,
        edge_type: impl Into<String>,
        sources: impl IntoIterator<Item = String>,
        targets: impl IntoIterator<Item = String>,
    ) {
        let rule = self.rules.entry(edge_type.into()).or_default();
        rule.sources.extend(sources);
        rule.targets.extend(targets);
    }

    /// Reflexive-transitive subtype check, walked iteratively over the
    /// hierarchy.
    pub fn is_subtype_of(&self, name: &str, ancestor: &str) -> bool {
        if name == ancestor {
            return true;
        }
        let mut frontier = vec![ancestor.to_string()];
        let mut seen = BTreeSet::new();
        while let Some(current) = frontier.pop() {
            if !seen.insert(current.clone()) {
                continue;
            }
            if let Some(children) = self.hierarchy.get(&current) {
                if children.contains(name) {
                    return true;
                }
                frontier.extend(children.iter().cloned());
            }
        }
        false
    }

    /// All direct and indirect subtypes of a type.
    pub fn subtypes_of(&self, name: &str) -> BTreeSet<String> {
        let mut found = BTreeSet::new();
        let mut frontier = vec![name.to_string()];
        while let Some(current) = frontier.pop() {
            if let Some(children) = self.hierarchy.get(&current) {
                for child in children {
                    if found.insert(child.clone()) {
                        frontier.push(child.clone());
                    }
                }
            }
        }
        found
    }

    /// Whether a source type may connect to a target type through an edge
    /// type. Missing rules and empty sides are permissive; listed types admit
    /// their subtypes.
    pub fn can_connect(&self, source_type: &str, edge_type: &str, target_type: &str) -> bool {
        let Some(rule) = self.rules.get(edge_type) else {
            return true;
        };
        let side_allows = |allowed: &BTreeSet<String>, name: &str| {
            allowed.is_empty() || allowed.iter().any(|parent| self.is_subtype_of(name, parent))
        };
        side_allows(&rule.sources, source_type) && side_allows(&rule.targets, target_type)
    }
}

/// An ubergraph whose nodes and edges carry registered types, with
/// connections checked against the registry and per-edge allow-lists.
#[derive(Debug, Clone, PartialEq)]
pub struct TypedUbergraph {
    uber: Ubergraph,
    types: TypeSystem,
}

impl TypedUbergraph {
    /// Creates an empty typed ubergraph with an empty registry.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            uber: Ubergraph::new(name),
            types: TypeSystem::new(),
        }
    }

    /// Read access to the untyped view.
    pub fn uber(&self) -> &Ubergraph {
        &self.uber
    }

    /// Write access to the untyped view.
    pub fn uber_mut(&mut self) -> &mut Ubergraph {
        &mut self.uber
    }

    /// Read access to the registry.
    pub fn types(&self) -> &TypeSystem {
        &self.types
    }

    /// Write access to the registry.
    pub fn types_mut(&mut self) -> &mut TypeSystem {
        &mut self.types
    }

    /// Adds a node carrying a type name.
    pub fn add_typed_node(&mut self, mut node: Node, type_name: impl Into<String>) -> NodeId {
        node.type_name = Some(type_name.into());
        self.uber.add_node(node)
    }

    /// Adds a typed edge between two endpoints after checking the registry
    /// allows the connection.
    pub fn add_typed_edge(
        &mut self,
        source: Endpoint,
        target: Endpoint,
        typing: TypeConstraints,
    ) -> Result<EdgeId, PolyError> {
        let source_type = self.endpoint_type(source);
        let target_type = self.endpoint_type(target);
        if !self
            .types
            .can_connect(&source_type, &typing.edge_type, &target_type)
        {
            return Err(PolyError::Constraint(
                ErrorInfo::new("type-rule-violated", "registry forbids this connection")
                    .with_context("edge-type", typing.edge_type.clone())
                    .with_context("source-type", source_type)
                    .with_context("target-type", target_type),
            ));
        }
        if !self.port_admits(&typing.allowed_sources, &source_type)
            || !self.port_admits(&typing.allowed_targets, &target_type)
        {
            return Err(PolyError::Constraint(
                ErrorInfo::new("edge-allow-list-violated", "edge allow-lists forbid this connection")
                    .with_context("edge-type", typing.edge_type.clone()),
            ));
        }
        let id = self.uber.link(source, target)?;
        if let Some(edge) = self.uber.graph_mut().edge_mut(id) {
            edge.typing = Some(typing);
        }
        Ok(id)
    }

    /// The type name carried by an endpoint, falling back to
    /// [`DEFAULT_TYPE`] when absent.
    pub fn endpoint_type(&self, endpoint: Endpoint) -> String {
        match endpoint {
            Endpoint::Node(node) => self
                .uber
                .graph()
                .node(node)
                .and_then(|record| record.type_name.clone()),
            Endpoint::Edge(edge) => self
                .uber
                .graph()
                .edge(edge)
                .and_then(|record| record.typing.as_ref())
                .map(|typing| typing.edge_type.clone()),
        }
        .filter(|name| !name.is_empty())
        .unwrap_or_else(|| DEFAULT_TYPE.to_string())
    }

    /// Whether the registry and an edge's allow-lists admit a connection
    /// from `source` through `edge` to `target`.
    pub fn can_connect(&self, source: Endpoint, edge: EdgeId, target: Endpoint) -> bool {
        let Some(record) = self.uber.graph().edge(edge) else {
            return false;
        };
        let edge_type = record
            .typing
            .as_ref()
            .map(|typing| typing.edge_type.clone())
            .unwrap_or_else(|| DEFAULT_TYPE.to_string());
        let source_type = self.endpoint_type(source);
        let target_type = self.endpoint_type(target);
        if !self.types.can_connect(&source_type, &edge_type, &target_type) {
            return false;
        }
        match record.typing.as_ref() {
            Some(typing) => {
                self.port_admits(&typing.allowed_sources, &source_type)
                    && self.port_admits(&typing.allowed_targets, &target_type)
            }
            None => true,
        }
    }

    /// Endpoints whose type an edge accepts as a source, nodes then
    /// node-capable edges, each in id order.
    pub fn compatible_sources(&self, edge: EdgeId) -> Vec<Endpoint> {
        self.compatible_endpoints(edge, true)
    }

    /// Endpoints whose type an edge accepts as a target.
    pub fn compatible_targets(&self, edge: EdgeId) -> Vec<Endpoint> {
        self.compatible_endpoints(edge, false)
    }

    fn compatible_endpoints(&self, edge: EdgeId, as_source: bool) -> Vec<Endpoint> {
        let Some(record) = self.uber.graph().edge(edge) else {
            return Vec::new();
        };
        let Some(typing) = record.typing.as_ref() else {
            return Vec::new();
        };
        let allowed = if as_source {
            &typing.allowed_sources
        } else {
            &typing.allowed_targets
        };
        let mut found = Vec::new();
        for node in self.uber.graph().node_ids() {
            if self.port_admits(allowed, &self.endpoint_type(Endpoint::Node(node))) {
                found.push(Endpoint::Node(node));
            }
        }
        for candidate in self.uber.edge_nodes() {
            if candidate != edge
                && self.port_admits(allowed, &self.endpoint_type(Endpoint::Edge(candidate)))
            {
                found.push(Endpoint::Edge(candidate));
            }
        }
        found
    }

    /// Untyped violations plus typed-edge endpoint checks.
    pub fn validate(&self) -> Vec<String> {
        let mut violations = self.uber.validate();
        for edge in self.uber.graph().edges() {
            let Some(typing) = edge.typing.as_ref() else {
                continue;
            };
            for endpoint in edge.all_sources() {
                let name = self.endpoint_type(endpoint);
                if !self.port_admits(&typing.allowed_sources, &name) {
                    violations.push(format!(
                        "edge {} rejects source {} of type {name}",
                        edge.id().as_raw(),
                        endpoint.describe()
                    ));
                }
            }
            for endpoint in edge.all_targets() {
                let name = self.endpoint_type(endpoint);
                if !self.port_admits(&typing.allowed_targets, &name) {
                    violations.push(format!(
                        "edge {} rejects target {} of type {name}",
                        edge.id().as_raw(),
                        endpoint.describe()
                    ));
                }
            }
        }
        violations
    }

    fn port_admits(&self, allowed: &BTreeSet<String>, name: &str) -> bool {
        allowed.is_empty() || allowed.iter().any(|parent| self.types.is_subtype_of(name, parent))
    }
}
