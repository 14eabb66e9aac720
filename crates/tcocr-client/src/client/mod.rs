//! OCR client module
//!
//! This module provides the client for the Tencent Cloud OCR API: credential
//! handling, client configuration, and the signed HTTP transport.

mod config;
mod credentials;
mod ocr_client;

pub use config::{OcrConfig, OcrConfigBuilder, OcrConfigBuilderError};
pub use credentials::OcrCredentials;
pub use ocr_client::OcrClient;
