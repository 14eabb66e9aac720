//! Node error types.

use thiserror::Error;

/// Result type for node operations.
pub type NodeResult<T, E = NodeError> = Result<T, E>;

/// Errors that can occur during node execution.
///
/// Two error channels exist with different isolation semantics: remote
/// recognition failures never surface here (they are converted into error
/// output items inside the per-item loop), while the variants below cover
/// local failures, which honor the host's fail-fast setting.
#[derive(Debug, Error)]
pub enum NodeError {
    /// Remote client construction or another client-level failure outside
    /// the per-item loop.
    #[error(transparent)]
    Client(#[from] tcocr_client::Error),

    /// An input item's payload cannot be indexed by the configured field
    /// name.
    #[error("item {item_index} payload is not a JSON object")]
    ItemPayload {
        /// Index of the offending item.
        item_index: usize,
    },

    /// Node execution failed at a specific item.
    #[error("node '{node}' failed at item {item_index}: {message}")]
    Operation {
        /// Name of the failing node.
        node: String,
        /// Index of the offending item.
        item_index: usize,
        /// Error message.
        message: String,
    },

    /// Host-classified API error carrying a nested cause.
    #[error("api error: {message}")]
    Api {
        /// Top-level error message.
        message: String,
        /// Nested cause reported by the host, preferred for display.
        cause: Option<String>,
    },
}

impl NodeError {
    /// Creates an item payload error.
    pub fn item_payload(item_index: usize) -> Self {
        Self::ItemPayload { item_index }
    }

    /// Creates an operation error scoped to a node and item.
    pub fn operation(
        node: impl Into<String>,
        item_index: usize,
        message: impl Into<String>,
    ) -> Self {
        Self::Operation {
            node: node.into(),
            item_index,
            message: message.into(),
        }
    }

    /// Creates a host-classified API error.
    pub fn api(message: impl Into<String>, cause: Option<String>) -> Self {
        Self::Api {
            message: message.into(),
            cause,
        }
    }

    /// The message recorded when this error is converted into an inline
    /// error output item.
    ///
    /// API errors prefer their nested cause over the top-level message.
    pub fn isolation_message(&self) -> String {
        match self {
            NodeError::Api {
                cause: Some(cause), ..
            } => cause.clone(),
            other => other.to_string(),
        }
    }

    /// The index of the item this error is attributed to, when known.
    pub fn item_index(&self) -> Option<usize> {
        match self {
            NodeError::ItemPayload { item_index } | NodeError::Operation { item_index, .. } => {
                Some(*item_index)
            }
            _ => None,
        }
    }

    /// Annotates this error for execution abort: errors that already carry
    /// an item index propagate unchanged, everything else is wrapped into
    /// an [`NodeError::Operation`] scoped to the node and item.
    pub fn into_abort(self, node: &str, item_index: usize) -> Self {
        if self.item_index().is_some() {
            return self;
        }
        let message = self.to_string();
        Self::operation(node, item_index, message)
    }
}
