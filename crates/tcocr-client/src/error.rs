//! Error types for tcocr-client.

/// Result type for all OCR client operations in this crate.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Unified error type for OCR client operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// HTTP client/connection errors.
    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    /// Serialization errors when sending or receiving data.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Error response returned by the OCR API.
    #[error("OCR API error {code}: {message}")]
    Api {
        /// Vendor error code (e.g. `AuthFailure.SignatureFailure`).
        code: String,
        /// Vendor error message.
        message: String,
        /// Request identifier reported by the vendor, when present.
        request_id: Option<String>,
    },

    /// Response body did not carry the expected vendor envelope.
    #[error("malformed OCR response (HTTP {status}): {reason}")]
    MalformedResponse {
        /// HTTP status of the response.
        status: u16,
        /// What was wrong with the body.
        reason: String,
    },

    /// Invalid client configuration.
    #[error("invalid configuration: {reason}")]
    InvalidConfig {
        /// What was wrong with the configuration.
        reason: String,
    },
}

impl Error {
    /// Create an API error.
    pub fn api(
        code: impl Into<String>,
        message: impl Into<String>,
        request_id: Option<String>,
    ) -> Self {
        Self::Api {
            code: code.into(),
            message: message.into(),
            request_id,
        }
    }

    /// Create a malformed response error.
    pub fn malformed_response(status: u16, reason: impl Into<String>) -> Self {
        Self::MalformedResponse {
            status,
            reason: reason.into(),
        }
    }

    /// Create an invalid configuration error.
    pub fn invalid_config(reason: impl Into<String>) -> Self {
        Self::InvalidConfig {
            reason: reason.into(),
        }
    }

    /// The user-facing message for this error.
    ///
    /// For vendor API errors this is the vendor message without the error
    /// code prefix, matching what the remote service reported.
    pub fn message(&self) -> String {
        match self {
            Error::Api { message, .. } => message.clone(),
            other => other.to_string(),
        }
    }
}

// Import builder error type for From implementation
use crate::client::OcrConfigBuilderError;

impl From<OcrConfigBuilderError> for Error {
    fn from(err: OcrConfigBuilderError) -> Self {
        Error::InvalidConfig {
            reason: err.to_string(),
        }
    }
}
