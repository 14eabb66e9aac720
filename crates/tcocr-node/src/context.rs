//! Host execution context.
//!
//! The node runs inside a host platform that supplies input items, resolved
//! parameter values, and the fail-fast setting. [`NodeContext`] is the
//! narrow seam over that host: it exposes exactly the operations the node
//! needs, so an in-memory implementation can stand in for the real engine.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One unit of data flowing through a pipeline stage.
///
/// Items are read-only to the node; the host owns their lifetime.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InputItem {
    /// JSON payload of the item.
    pub json: Value,
}

impl InputItem {
    /// Creates an input item from a JSON payload.
    pub fn new(json: Value) -> Self {
        Self { json }
    }

    /// Returns the payload value at `field`, when the payload is an object
    /// carrying that key.
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.json.as_object().and_then(|object| object.get(field))
    }
}

/// One output item paired to the input item it was derived from.
///
/// The host uses the pairing index to reconstruct item lineage across
/// pipeline stages.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputItem {
    /// JSON payload of the item.
    pub json: Value,
    /// Index of the originating input item.
    #[serde(rename = "pairedItem")]
    pub paired_item: usize,
}

impl OutputItem {
    /// Creates an output item paired to an input index.
    pub fn new(json: Value, paired_item: usize) -> Self {
        Self { json, paired_item }
    }

    /// Creates an error output item carrying `{ "error": <message> }`.
    pub fn error(message: impl Into<String>, paired_item: usize) -> Self {
        Self {
            json: serde_json::json!({ "error": message.into() }),
            paired_item,
        }
    }
}

/// Narrow interface over the host execution context.
///
/// The two output-shaping helpers mirror the host's own: they are provided
/// as default methods because their behavior is part of the node contract,
/// not host-specific.
pub trait NodeContext {
    /// Resolves a node parameter, falling back to `default` when the host
    /// has no value for it.
    fn get_node_parameter(&self, name: &str, item_index: usize, default: Value) -> Value;

    /// Returns the ordered input items for this execution.
    fn input_data(&self) -> &[InputItem];

    /// Whether a local failure should be converted into an error item
    /// instead of aborting the execution.
    fn continue_on_fail(&self) -> bool;

    /// Node identity, used to annotate non-isolated failures.
    fn node_name(&self) -> &str;

    /// Spreads a JSON value into one payload per output item.
    ///
    /// An array becomes one payload per element; any other value becomes a
    /// single payload.
    fn return_json_array(&self, data: Value) -> Vec<Value> {
        match data {
            Value::Array(values) => values,
            other => vec![other],
        }
    }

    /// Tags payloads with the input item index they were derived from.
    fn construct_execution_metadata(
        &self,
        payloads: Vec<Value>,
        item_index: usize,
    ) -> Vec<OutputItem> {
        payloads
            .into_iter()
            .map(|json| OutputItem::new(json, item_index))
            .collect()
    }
}

/// In-memory [`NodeContext`] implementation.
///
/// Useful for embedding the node outside a host engine and as the test
/// harness for the execution loop.
#[derive(Debug, Clone, Default)]
pub struct MemoryContext {
    node_name: String,
    parameters: HashMap<String, Value>,
    items: Vec<InputItem>,
    continue_on_fail: bool,
}

impl MemoryContext {
    /// Creates an empty context for a named node.
    pub fn new(node_name: impl Into<String>) -> Self {
        Self {
            node_name: node_name.into(),
            ..Self::default()
        }
    }

    /// Sets a parameter value.
    pub fn with_parameter(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.parameters.insert(name.into(), value.into());
        self
    }

    /// Appends an input item.
    pub fn with_item(mut self, item: InputItem) -> Self {
        self.items.push(item);
        self
    }

    /// Replaces the input items.
    pub fn with_items(mut self, items: Vec<InputItem>) -> Self {
        self.items = items;
        self
    }

    /// Sets the fail-fast behavior; `true` isolates local failures.
    pub fn with_continue_on_fail(mut self, continue_on_fail: bool) -> Self {
        self.continue_on_fail = continue_on_fail;
        self
    }
}

impl NodeContext for MemoryContext {
    fn get_node_parameter(&self, name: &str, _item_index: usize, default: Value) -> Value {
        self.parameters.get(name).cloned().unwrap_or(default)
    }

    fn input_data(&self) -> &[InputItem] {
        &self.items
    }

    fn continue_on_fail(&self) -> bool {
        self.continue_on_fail
    }

    fn node_name(&self) -> &str {
        &self.node_name
    }
}
