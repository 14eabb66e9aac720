//! Prelude module for convenient imports.
//!
//! ```rust
//! use tcocr_node::prelude::*;
//! ```

pub use crate::context::{InputItem, MemoryContext, NodeContext, OutputItem};
pub use crate::descriptor::{NodeDescriptor, NodeProperty, PropertyKind};
pub use crate::error::{NodeError, NodeResult};
pub use crate::node::TencentOcrNode;
