#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

pub mod context;
pub mod descriptor;
mod error;
pub mod node;

#[doc(hidden)]
pub mod prelude;

pub use error::{NodeError, NodeResult};
pub use node::TencentOcrNode;

/// Tracing target for node execution.
pub const TRACING_TARGET: &str = "tcocr_node";
