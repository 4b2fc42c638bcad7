use serde::{Deserialize, Serialize};

/// Base type of relationships derived by reasoning rather than stored.
pub const INFERRED_RELATIONSHIP_TYPE: &str = "inferred-relationship";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SettingsController {
    /// Nodes of this base type are never explored, they have no identity in the remote store
    pub inferred_relationship_type: String,
}

impl Default for SettingsController {
    fn default() -> Self {
        Self {
            inferred_relationship_type: INFERRED_RELATIONSHIP_TYPE.to_string(),
        }
    }
}

impl SettingsController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_inferred_relationship_type(mut self, base_type: impl Into<String>) -> Self {
        self.inferred_relationship_type = base_type.into();
        self
    }
}
