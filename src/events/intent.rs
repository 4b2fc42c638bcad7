use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::canvas::PointerEvent;
use crate::accessor::{NodeId, NodeObject};

/// Signal published on the application bus. Variants serialize under their bus name.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "kebab-case")]
pub enum Intent {
    ShowLabelPanel {
        properties: BTreeMap<String, String>,
        node_type: String,
        id: NodeId,
    },
    ShowNodePanel(NodeObject),
    HoverNode(PointerEvent),
    BlurNode,
    CloseContext,
    CloseTooltip,
    ErrorMessage(String),
}

impl Intent {
    pub fn name(&self) -> &'static str {
        match self {
            Intent::ShowLabelPanel { .. } => "show-label-panel",
            Intent::ShowNodePanel(_) => "show-node-panel",
            Intent::HoverNode(_) => "hover-node",
            Intent::BlurNode => "blur-node",
            Intent::CloseContext => "close-context",
            Intent::CloseTooltip => "close-tooltip",
            Intent::ErrorMessage(_) => "error-message",
        }
    }
}
