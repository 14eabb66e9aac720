//! Prelude for the tcocr-client crate
//!
//! This module re-exports the most commonly used types and traits from the
//! crate to provide a convenient single import for users.

pub use crate::client::{OcrClient, OcrConfig, OcrCredentials};
pub use crate::error::{Error, Result};
pub use crate::recognize::{InvoiceRecognizer, RecognitionRequest};
