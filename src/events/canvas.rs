use egui::{Modifiers, Pos2};
use serde::{Deserialize, Serialize};

use crate::accessor::{EdgeId, NodeId};

/// Event names the canvas raises and the controller subscribes to.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub enum CanvasEventKind {
    Click,
    DoubleClick,
    #[serde(rename = "oncontext")]
    Context,
    Hold,
    HoverNode,
    BlurNode,
    DragStart,
}

impl CanvasEventKind {
    pub const ALL: [CanvasEventKind; 7] = [
        CanvasEventKind::Click,
        CanvasEventKind::DoubleClick,
        CanvasEventKind::Context,
        CanvasEventKind::Hold,
        CanvasEventKind::HoverNode,
        CanvasEventKind::BlurNode,
        CanvasEventKind::DragStart,
    ];

    /// Name of the event as the canvas widget spells it.
    pub fn as_str(self) -> &'static str {
        match self {
            CanvasEventKind::Click => "click",
            CanvasEventKind::DoubleClick => "doubleClick",
            CanvasEventKind::Context => "oncontext",
            CanvasEventKind::Hold => "hold",
            CanvasEventKind::HoverNode => "hoverNode",
            CanvasEventKind::BlurNode => "blurNode",
            CanvasEventKind::DragStart => "dragStart",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.as_str() == name)
    }
}

/// Gesture that produced a `click` event. Only taps are real clicks, a long
/// press also raises `click` but is answered by `hold`.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ClickKind {
    #[default]
    Tap,
    Press,
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct Pointer {
    /// Position in widget coordinates
    pub dom: Pos2,
    /// Position in graph coordinates
    pub canvas: Pos2,
}

/// Payload of every pointer event raised by the canvas.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct PointerEvent {
    pub kind: ClickKind,
    pub pointer: Pointer,
    /// Nodes under the pointer or affected by the gesture, first one is the topmost.
    pub nodes: Vec<NodeId>,
    pub edges: Vec<EdgeId>,
    pub modifiers: Modifiers,
}

impl PointerEvent {
    pub fn tap(nodes: Vec<NodeId>) -> Self {
        Self {
            nodes,
            ..Self::default()
        }
    }

    pub fn at(mut self, canvas: Pos2) -> Self {
        self.pointer.canvas = canvas;
        self
    }

    pub fn with_kind(mut self, kind: ClickKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    pub fn node(&self) -> Option<&NodeId> {
        self.nodes.first()
    }

    pub fn shift(&self) -> bool {
        self.modifiers.shift
    }

    pub fn ctrl(&self) -> bool {
        self.modifiers.ctrl
    }
}
