//! Node record for the polymorphic graph substrate.

use std::collections::BTreeMap;

use poly_core::NodeId;
use serde::{Deserialize, Serialize};

/// A node owned by a [`crate::BaseGraph`].
///
/// Positional and payload fields are plain data; mutation happens in place
/// through the owning graph. The `metadata` map is reserved for user payload
/// and never consulted by the engine itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub(crate) id: NodeId,
    /// Display label.
    pub label: String,
    /// Horizontal position.
    pub x: f64,
    /// Vertical position.
    pub y: f64,
    /// Depth position, used by 3D spatial structures.
    pub z: f64,
    /// Width of the node's bounding box.
    pub width: f64,
    /// Height of the node's bounding box.
    pub height: f64,
    /// Whether the node is currently visible.
    pub visible: bool,
    /// Whether the node is locked against interactive edits.
    pub locked: bool,
    /// Containment parent, used by container-style variants.
    pub parent: Option<NodeId>,
    /// Containment children, in insertion order.
    pub children: Vec<NodeId>,
    /// Registered type name, consulted by the typed ubergraph variant.
    pub type_name: Option<String>,
    /// Open user payload.
    pub metadata: BTreeMap<String, String>,
}

impl Node {
    /// Creates a node with the given label and default payload fields. The
    /// identifier is assigned when the node is added to a graph.
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            id: NodeId::from_raw(0),
            label: label.into(),
            x: 0.0,
            y: 0.0,
            z: 0.0,
            width: 120.0,
            height: 60.0,
            visible: true,
            locked: false,
            parent: None,
            children: Vec::new(),
            type_name: None,
            metadata: BTreeMap::new(),
        }
    }

    /// Returns the identifier assigned by the owning graph.
    pub fn id(&self) -> NodeId {
        self.id
    }

    /// Sets the position, builder style.
    pub fn at(mut self, x: f64, y: f64) -> Self {
        self.x = x;
        self.y = y;
        self
    }

    /// Sets the registered type name, builder style.
    pub fn typed(mut self, type_name: impl Into<String>) -> Self {
        self.type_name = Some(type_name.into());
        self
    }
}
