use std::collections::{BTreeMap, HashMap, HashSet};

use egui::{Modifiers, Pos2, Rect};
use petgraph::stable_graph::{EdgeIndex, NodeIndex, StableGraph};
use petgraph::visit::IntoNodeReferences;
use petgraph::Directed;
use serde::{Deserialize, Serialize};

use crate::accessor::{GraphAccessor, NodeId, NodeObject};
use crate::events::PointerEvent;

/// Hit radius of a node around its location, in graph coordinates.
pub const DEFAULT_NODE_RADIUS: f32 = 5.;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CanvasNode {
    object: NodeObject,
    location: Pos2,
    radius: f32,
    selected: bool,
    /// Pinned in place, ignored by physics and dragging
    locked: bool,
}

impl CanvasNode {
    pub fn new(object: NodeObject, location: Pos2) -> Self {
        Self {
            object,
            location,
            radius: DEFAULT_NODE_RADIUS,
            selected: false,
            locked: false,
        }
    }

    pub fn object(&self) -> &NodeObject {
        &self.object
    }

    pub fn location(&self) -> Pos2 {
        self.location
    }

    pub fn set_location(&mut self, location: Pos2) {
        self.location = location;
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    pub fn set_radius(&mut self, radius: f32) {
        self.radius = radius;
    }

    pub fn selected(&self) -> bool {
        self.selected
    }

    pub fn locked(&self) -> bool {
        self.locked
    }

    fn is_inside(&self, pos: Pos2) -> bool {
        (pos - self.location).length() <= self.radius
    }
}

/// Graph state backed by [`petgraph::stable_graph::StableGraph`], usable as the
/// [`GraphAccessor`] of an [`crate::InteractionController`].
///
/// Edges are directed as stored, but neighborhood queries ignore direction.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CanvasGraph {
    g: StableGraph<CanvasNode, (), Directed>,
    index: HashMap<NodeId, NodeIndex>,

    dragging_node: bool,
    /// Start corner of the rectangle selection being drawn
    selection_rect_start: Option<Pos2>,
}

impl CanvasGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds node or replaces the object of the node with the same id keeping its state.
    pub fn add_node(&mut self, object: NodeObject, location: Pos2) -> NodeIndex {
        if let Some(&idx) = self.index.get(&object.id) {
            if let Some(node) = self.g.node_weight_mut(idx) {
                node.object = object;
                return idx;
            }
        }

        let id = object.id.clone();
        let idx = self.g.add_node(CanvasNode::new(object, location));
        self.index.insert(id, idx);
        idx
    }

    /// Adds edge between two known nodes. Returns None if either is missing.
    pub fn add_edge(&mut self, start: &NodeId, end: &NodeId) -> Option<EdgeIndex> {
        let (a, b) = (self.idx(start)?, self.idx(end)?);
        Some(self.g.add_edge(a, b, ()))
    }

    pub fn node_state(&self, id: &NodeId) -> Option<&CanvasNode> {
        self.g.node_weight(self.idx(id)?)
    }

    pub fn node_state_mut(&mut self, id: &NodeId) -> Option<&mut CanvasNode> {
        let idx = self.idx(id)?;
        self.g.node_weight_mut(idx)
    }

    pub fn contains(&self, id: &NodeId) -> bool {
        self.index.contains_key(id)
    }

    pub fn node_count(&self) -> usize {
        self.g.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.g.edge_count()
    }

    /// Pins every node, as after the layout stabilized.
    pub fn lock_all(&mut self) {
        for n in self.g.node_weights_mut() {
            n.locked = true;
        }
    }

    pub fn selected_nodes(&self) -> Vec<NodeId> {
        self.ids_where(CanvasNode::selected)
    }

    pub fn released_nodes(&self) -> Vec<NodeId> {
        self.ids_where(|n| !n.locked())
    }

    pub fn selection_rect_start(&self) -> Option<Pos2> {
        self.selection_rect_start
    }

    fn ids_where(&self, f: impl Fn(&CanvasNode) -> bool) -> Vec<NodeId> {
        let mut ids: Vec<_> = self
            .g
            .node_references()
            .map(|(_, n)| n)
            .filter(|n| f(n))
            .map(|n| n.object.id.clone())
            .collect();
        ids.sort();
        ids
    }

    fn idx(&self, id: &NodeId) -> Option<NodeIndex> {
        self.index.get(id).copied()
    }

    fn select_in_rect(&mut self, rect: Rect) {
        for n in self.g.node_weights_mut() {
            n.selected = rect.contains(n.location);
        }
    }
}

impl GraphAccessor for CanvasGraph {
    fn node(&self, id: &NodeId) -> Option<NodeObject> {
        self.node_state(id).map(|n| n.object.clone())
    }

    /// Finds node by position. Can be optimized by using a spatial index like quad-tree if needed.
    fn node_at(&self, pos: Pos2) -> Option<NodeId> {
        self.g
            .node_references()
            .find(|(_, n)| n.is_inside(pos))
            .map(|(_, n)| n.object.id.clone())
    }

    fn node_properties(&self, id: &NodeId) -> BTreeMap<String, String> {
        self.node_state(id)
            .map(|n| n.object.properties.clone())
            .unwrap_or_default()
    }

    fn node_type(&self, id: &NodeId) -> String {
        self.node_state(id)
            .map(|n| n.object.base_type.clone())
            .unwrap_or_default()
    }

    fn connected_nodes(&self, id: &NodeId) -> Vec<NodeId> {
        let Some(idx) = self.idx(id) else {
            return Vec::new();
        };

        let mut seen = HashSet::new();
        self.g
            .neighbors_undirected(idx)
            .filter(|n| seen.insert(*n))
            .filter_map(|n| self.g.node_weight(n))
            .map(|n| n.object.id.clone())
            .collect()
    }

    fn delete_node(&mut self, id: &NodeId) {
        if let Some(idx) = self.index.remove(id) {
            // stable graph drops the incident edges as well
            self.g.remove_node(idx);
        }
    }

    fn check_selection_rectangle(
        &mut self,
        node: Option<&NodeId>,
        modifiers: Modifiers,
        event: &PointerEvent,
    ) {
        let pos = event.pointer.canvas;
        if let Some(start) = self.selection_rect_start.take() {
            self.select_in_rect(Rect::from_two_pos(start, pos));
            return;
        }

        if node.is_none() && modifiers.ctrl {
            self.selection_rect_start = Some(pos);
        }
    }

    fn unselect_all(&mut self) {
        for n in self.g.node_weights_mut() {
            n.selected = false;
        }
    }

    fn select_nodes(&mut self, ids: &[NodeId]) {
        let wanted: HashSet<_> = ids.iter().collect();
        for n in self.g.node_weights_mut() {
            n.selected = wanted.contains(&n.object.id);
        }
    }

    fn release_nodes(&mut self, ids: &[NodeId]) {
        for id in ids {
            if let Some(n) = self.node_state_mut(id) {
                n.locked = false;
            }
        }
    }

    fn set_dragging_node(&mut self, dragging: bool) {
        self.dragging_node = dragging;
    }

    fn dragging_node(&self) -> bool {
        self.dragging_node
    }
}
