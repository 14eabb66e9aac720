//! Declared node surface.
//!
//! The descriptor is the host-visible configuration schema for the node:
//! its identity, channel counts, and the parameters users fill in.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Host-visible description of a node: identity, channels, and parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeDescriptor {
    /// Name shown to users.
    pub display_name: String,
    /// Machine name of the node type.
    pub name: String,
    /// Short description of what the node does.
    pub description: String,
    /// Number of input channels.
    pub inputs: usize,
    /// Number of output channels.
    pub outputs: usize,
    /// User-facing configuration parameters.
    pub properties: Vec<NodeProperty>,
}

impl NodeDescriptor {
    /// Returns the property with the given machine name, if declared.
    pub fn property(&self, name: &str) -> Option<&NodeProperty> {
        self.properties.iter().find(|p| p.name == name)
    }
}

/// One user-facing configuration parameter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeProperty {
    /// Name shown to users.
    pub display_name: String,
    /// Machine name used for parameter lookup.
    pub name: String,
    /// Value type of the parameter.
    #[serde(rename = "type")]
    pub kind: PropertyKind,
    /// Masked in the host UI (credential material).
    #[serde(default)]
    pub masked: bool,
    /// Default value when the user leaves the parameter unset.
    pub default: Value,
    /// Input placeholder shown in the host UI.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
}

impl NodeProperty {
    /// Creates a string parameter with an empty default.
    pub fn string(name: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self {
            display_name: display_name.into(),
            name: name.into(),
            kind: PropertyKind::String,
            masked: false,
            default: Value::String(String::new()),
            placeholder: None,
        }
    }

    /// Marks the parameter as masked credential input.
    pub fn masked(mut self) -> Self {
        self.masked = true;
        self
    }

    /// Sets the default value.
    pub fn with_default(mut self, default: impl Into<Value>) -> Self {
        self.default = default.into();
        self
    }

    /// Sets the placeholder text.
    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = Some(placeholder.into());
        self
    }
}

/// Value types a parameter can declare.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PropertyKind {
    /// Free-form string input.
    String,
}
