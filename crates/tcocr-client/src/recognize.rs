//! General invoice recognition operation.
//!
//! This module defines the request payload for the one API action this crate
//! speaks, and the [`InvoiceRecognizer`] seam that lets consumers substitute
//! the remote dependency in tests.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::TRACING_TARGET_CLIENT;
use crate::client::OcrClient;
use crate::error::{Error, Result};

/// Name of the API action this crate is narrowed to.
pub const ACTION_RECOGNIZE_GENERAL_INVOICE: &str = "RecognizeGeneralInvoice";

/// Request payload for general invoice recognition.
///
/// The image value is forwarded verbatim from the caller; no shape or
/// encoding validation happens on this side. An absent value serializes to
/// an omitted member, leaving the resulting failure mode to the vendor's own
/// request validation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecognitionRequest {
    /// Base64-encoded image content.
    #[serde(
        rename = "ImageBase64",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub image_base64: Option<Value>,
}

impl RecognitionRequest {
    /// Creates a request from an optional image value.
    pub fn new(image_base64: Option<Value>) -> Self {
        Self { image_base64 }
    }
}

/// Single-operation seam over the remote recognition API.
///
/// [`OcrClient`] is the production implementation; tests drive the consumer
/// with a scripted implementation instead of a network dependency.
#[async_trait::async_trait]
pub trait InvoiceRecognizer: Send + Sync {
    /// Performs general invoice recognition for one request.
    ///
    /// On success the vendor's recognition result is returned as a plain
    /// JSON value. Failures cover transport errors as well as vendor-side
    /// rejections (authentication, validation).
    async fn recognize_general_invoice(&self, request: RecognitionRequest) -> Result<Value>;
}

#[async_trait::async_trait]
impl InvoiceRecognizer for OcrClient {
    async fn recognize_general_invoice(&self, request: RecognitionRequest) -> Result<Value> {
        let body = serde_json::to_string(&request).map_err(Error::Serialization)?;

        tracing::debug!(
            target: TRACING_TARGET_CLIENT,
            action = ACTION_RECOGNIZE_GENERAL_INVOICE,
            has_image = request.image_base64.is_some(),
            "Dispatching recognition request"
        );

        self.call(ACTION_RECOGNIZE_GENERAL_INVOICE, body).await
    }
}
