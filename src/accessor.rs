use std::collections::BTreeMap;
use std::fmt;

use egui::{Modifiers, Pos2};
use futures::future::LocalBoxFuture;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::events::PointerEvent;

/// Opaque identifier of a node in the externally owned graph state.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(String);

impl NodeId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for NodeId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for NodeId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EdgeId(String);

impl From<&str> for EdgeId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

/// Node as resolved by the accessor.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NodeObject {
    pub id: NodeId,
    pub base_type: String,
    pub label: String,
    /// Resource locator of the node itself
    pub href: Option<String>,
    /// Resource locator of the node neighborhood, absent for nodes that cannot be expanded
    pub explore: Option<String>,
    pub properties: BTreeMap<String, String>,
}

impl NodeObject {
    pub fn new(id: impl Into<String>, base_type: impl Into<String>) -> Self {
        Self {
            id: NodeId::new(id),
            base_type: base_type.into(),
            ..Self::default()
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    pub fn with_href(mut self, href: impl Into<String>) -> Self {
        self.href = Some(href.into());
        self
    }

    pub fn with_explore(mut self, explore: impl Into<String>) -> Self {
        self.explore = Some(explore.into());
        self
    }

    pub fn with_property(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.properties.insert(key.into(), value.into());
        self
    }
}

/// Read and mutate access to the graph state the canvas renders.
///
/// The controller never touches node data directly, every change goes through
/// this trait. Lookups of unknown ids return `None` or an empty value.
pub trait GraphAccessor {
    fn node(&self, id: &NodeId) -> Option<NodeObject>;

    /// Finds the node drawn at the given position in graph coordinates.
    fn node_at(&self, pos: Pos2) -> Option<NodeId>;

    fn node_properties(&self, id: &NodeId) -> BTreeMap<String, String>;

    fn node_type(&self, id: &NodeId) -> String;

    /// Nodes sharing an edge with `id`, in either direction.
    fn connected_nodes(&self, id: &NodeId) -> Vec<NodeId>;

    fn delete_node(&mut self, id: &NodeId);

    /// Starts or stops the rectangle selection gesture owned by the canvas.
    fn check_selection_rectangle(
        &mut self,
        node: Option<&NodeId>,
        modifiers: Modifiers,
        event: &PointerEvent,
    );

    fn unselect_all(&mut self);

    fn select_nodes(&mut self, ids: &[NodeId]);

    /// Removes the position lock from nodes so physics and dragging can move them.
    fn release_nodes(&mut self, ids: &[NodeId]);

    fn set_dragging_node(&mut self, dragging: bool);

    fn dragging_node(&self) -> bool;
}

/// Flags passed along a fetched response when merging it into the graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IngestOptions {
    /// Clear the graph before merging
    pub replace: bool,
    /// Run the layout on the merged nodes
    pub auto_layout: bool,
    /// Select the merged nodes
    pub auto_select: bool,
}

impl IngestOptions {
    /// Used when a node is fetched through its own locator.
    pub const EXPAND: IngestOptions = IngestOptions {
        replace: false,
        auto_layout: false,
        auto_select: false,
    };

    /// Used when a node neighborhood is explored.
    pub const EXPLORE: IngestOptions = IngestOptions {
        replace: false,
        auto_layout: true,
        auto_select: true,
    };
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IngestError {
    #[error("malformed graph response: {0}")]
    Malformed(String),
    #[error("failed to load attributes: {0}")]
    Attributes(String),
}

/// Merges remote responses into the graph. Lives outside the controller.
pub trait GraphIngest {
    /// Merges `response` into the graph and returns the instances it added.
    ///
    /// # Errors
    ///
    /// Returns [`IngestError::Malformed`] when the response cannot be read as a graph.
    fn on_graph_response(
        &self,
        response: serde_json::Value,
        options: IngestOptions,
        origin: &NodeId,
    ) -> Result<Vec<NodeId>, IngestError>;

    /// Loads attributes of `instances` starting from index `start`.
    fn load_instances_attributes(
        &self,
        start: usize,
        instances: Vec<NodeId>,
    ) -> LocalBoxFuture<'static, Result<(), IngestError>>;
}
