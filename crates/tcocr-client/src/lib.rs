#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

/// Tracing target for OCR client operations.
///
/// Use this target for logging client initialization, request dispatch, and
/// client-level errors.
pub const TRACING_TARGET_CLIENT: &str = "tcocr_client::client";

mod client;
pub mod error;
#[doc(hidden)]
pub mod prelude;
pub mod recognize;

pub use crate::client::{OcrClient, OcrConfig, OcrConfigBuilder, OcrCredentials};
pub use crate::error::{Error, Result};
pub use crate::recognize::{InvoiceRecognizer, RecognitionRequest};
