//! OCR client configuration
//!
//! This module provides configuration structures and builders for the OCR
//! client.

use std::time::Duration;

use derive_builder::Builder;

/// Default API endpoint; the crate is narrowed to this single vendor host.
pub const DEFAULT_ENDPOINT: &str = "ocr.tencentcloudapi.com";

/// Default region; the invoice recognition operation is region-less.
pub const DEFAULT_REGION: &str = "";

/// Configuration for the OCR client
///
/// Contains all the settings needed to configure the OCR client behavior.
/// The endpoint and region default to the fixed values used by the invoice
/// recognition node and normally do not need to be overridden.
#[derive(Debug, Clone, Builder)]
#[builder(
    name = "OcrConfigBuilder",
    pattern = "owned",
    setter(into, prefix = "with"),
    build_fn(validate = "Self::validate_config")
)]
pub struct OcrConfig {
    /// Hostname of the OCR API endpoint.
    #[builder(default = "DEFAULT_ENDPOINT.to_owned()")]
    pub endpoint: String,
    /// API region; empty selects the vendor's region-less routing.
    #[builder(default = "DEFAULT_REGION.to_owned()")]
    pub region: String,
    /// Request timeout duration.
    #[builder(default = "Duration::from_secs(30)")]
    pub timeout: Duration,
    /// Connection timeout duration.
    #[builder(default = "Duration::from_secs(10)")]
    pub connect_timeout: Duration,
    /// User agent string for requests.
    #[builder(default = "OcrConfig::default_user_agent()")]
    pub user_agent: String,
}

impl Default for OcrConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_owned(),
            region: DEFAULT_REGION.to_owned(),
            timeout: Duration::from_secs(30),
            connect_timeout: Duration::from_secs(10),
            user_agent: Self::default_user_agent(),
        }
    }
}

impl OcrConfig {
    /// Create a new configuration builder
    pub fn builder() -> OcrConfigBuilder {
        OcrConfigBuilder::default()
    }

    fn default_user_agent() -> String {
        format!("tcocr-client/{}", env!("CARGO_PKG_VERSION"))
    }
}

impl OcrConfigBuilder {
    fn validate_config(&self) -> std::result::Result<(), String> {
        if let Some(endpoint) = &self.endpoint {
            if endpoint.is_empty() {
                return Err("Endpoint must not be empty".to_string());
            }
            if endpoint.contains("://") || endpoint.contains('/') {
                return Err("Endpoint must be a bare hostname".to_string());
            }
        }

        if let Some(timeout) = &self.timeout {
            if timeout.is_zero() {
                return Err("Timeout must be greater than 0".to_string());
            }
        }

        if let Some(connect_timeout) = &self.connect_timeout {
            if connect_timeout.is_zero() {
                return Err("Connect timeout must be greater than 0".to_string());
            }
        }

        Ok(())
    }
}
