//! OCR client implementation
//!
//! This module provides the signed HTTP transport for the Tencent Cloud OCR
//! API. Requests are authenticated with the vendor's TC3-HMAC-SHA256 scheme
//! and responses are unwrapped from the vendor envelope into plain JSON.

use hmac::{Hmac, Mac};
use jiff::Timestamp;
use reqwest::{Client as HttpClient, ClientBuilder};
use serde_json::Value;
use sha2::{Digest, Sha256};

use super::{OcrConfig, OcrCredentials};
use crate::TRACING_TARGET_CLIENT;
use crate::error::{Error, Result};

/// API version of the OCR service this client speaks.
pub(crate) const API_VERSION: &str = "2018-11-19";

/// Service identifier used in the TC3 credential scope.
const SERVICE: &str = "ocr";

/// Signing algorithm identifier.
const ALGORITHM: &str = "TC3-HMAC-SHA256";

/// Headers included in the canonical request, in signing order.
const SIGNED_HEADERS: &str = "content-type;host;x-tc-action";

/// Content type of all API requests.
const CONTENT_TYPE: &str = "application/json; charset=utf-8";

type HmacSha256 = Hmac<Sha256>;

/// Client for the Tencent Cloud OCR API.
///
/// One client is constructed per execution and reused across all requests;
/// the underlying HTTP connection pool is managed by `reqwest`.
///
/// # Examples
///
/// ```rust,ignore
/// use tcocr_client::{OcrClient, OcrConfig, OcrCredentials};
///
/// let credentials = OcrCredentials::new("secret-id", "secret-key");
/// let client = OcrClient::new(OcrConfig::default(), credentials)?;
/// ```
#[derive(Debug, Clone)]
pub struct OcrClient {
    http_client: HttpClient,
    config: OcrConfig,
    credentials: OcrCredentials,
}

impl OcrClient {
    /// Create a new OCR client with the given configuration and credentials.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be created.
    pub fn new(config: OcrConfig, credentials: OcrCredentials) -> Result<Self> {
        tracing::debug!(
            target: TRACING_TARGET_CLIENT,
            endpoint = %config.endpoint,
            secret_id = %credentials.secret_id(),
            "Creating OCR client"
        );

        let http_client = ClientBuilder::new()
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .user_agent(&config.user_agent)
            .build()
            .map_err(Error::Http)?;

        Ok(Self {
            http_client,
            config,
            credentials,
        })
    }

    /// Create a new OCR client with default configuration.
    pub fn with_defaults(credentials: OcrCredentials) -> Result<Self> {
        Self::new(OcrConfig::default(), credentials)
    }

    /// Get the client configuration.
    pub fn config(&self) -> &OcrConfig {
        &self.config
    }

    /// Invoke one API action with a JSON request body.
    ///
    /// Sends the signed request and unwraps the vendor envelope. The caller
    /// owns request serialization so the body signed is exactly the body
    /// sent.
    pub(crate) async fn call(&self, action: &str, body: String) -> Result<Value> {
        let now = Timestamp::now();
        let authorization = self.authorization_header(action, &body, now);

        let url = format!("https://{}/", self.config.endpoint);
        let mut request = self
            .http_client
            .post(&url)
            .header("Content-Type", CONTENT_TYPE)
            .header("Authorization", authorization)
            .header("X-TC-Action", action)
            .header("X-TC-Version", API_VERSION)
            .header("X-TC-Timestamp", now.as_second().to_string())
            .body(body);
        if !self.config.region.is_empty() {
            request = request.header("X-TC-Region", &self.config.region);
        }

        let response = request.send().await.map_err(Error::Http)?;
        let status = response.status().as_u16();
        let envelope: Value = response.json().await.map_err(Error::Http)?;

        decode_envelope(status, envelope)
    }

    /// Build the TC3-HMAC-SHA256 authorization header for one request.
    pub(crate) fn authorization_header(
        &self,
        action: &str,
        payload: &str,
        timestamp: Timestamp,
    ) -> String {
        // Credential scope uses the UTC calendar date of the request.
        let date = timestamp.to_zoned(jiff::tz::TimeZone::UTC).date().to_string();
        let scope = format!("{date}/{SERVICE}/tc3_request");

        let canonical_request = format!(
            "POST\n/\n\ncontent-type:{CONTENT_TYPE}\nhost:{host}\nx-tc-action:{action}\n\n{SIGNED_HEADERS}\n{hashed_payload}",
            host = self.config.endpoint,
            action = action.to_lowercase(),
            hashed_payload = sha256_hex(payload.as_bytes()),
        );

        let string_to_sign = format!(
            "{ALGORITHM}\n{seconds}\n{scope}\n{hashed_request}",
            seconds = timestamp.as_second(),
            hashed_request = sha256_hex(canonical_request.as_bytes()),
        );

        // Key derivation chain: secret key -> date -> service -> request.
        let secret = format!("TC3{}", self.credentials.secret_key());
        let date_key = hmac_sha256(secret.as_bytes(), date.as_bytes());
        let service_key = hmac_sha256(&date_key, SERVICE.as_bytes());
        let signing_key = hmac_sha256(&service_key, b"tc3_request");
        let signature = hex::encode(hmac_sha256(&signing_key, string_to_sign.as_bytes()));

        format!(
            "{ALGORITHM} Credential={secret_id}/{scope}, SignedHeaders={SIGNED_HEADERS}, Signature={signature}",
            secret_id = self.credentials.secret_id(),
        )
    }
}

/// Unwraps the vendor response envelope.
///
/// Every response carries a top-level `Response` member; an error response
/// nests `Error.Code` and `Error.Message` inside it alongside the
/// `RequestId`.
fn decode_envelope(status: u16, mut envelope: Value) -> Result<Value> {
    let Some(inner) = envelope.get_mut("Response") else {
        return Err(Error::malformed_response(
            status,
            "missing 'Response' member",
        ));
    };

    if let Some(error) = inner.get("Error") {
        let code = error
            .get("Code")
            .and_then(Value::as_str)
            .unwrap_or("UnknownError");
        let message = error
            .get("Message")
            .and_then(Value::as_str)
            .unwrap_or_default();
        let request_id = inner
            .get("RequestId")
            .and_then(Value::as_str)
            .map(str::to_owned);

        tracing::warn!(
            target: TRACING_TARGET_CLIENT,
            status,
            code,
            request_id = request_id.as_deref().unwrap_or(""),
            "OCR API returned an error"
        );

        return Err(Error::api(code, message, request_id));
    }

    Ok(inner.take())
}

fn sha256_hex(data: &[u8]) -> String {
    hex::encode(Sha256::digest(data))
}

fn hmac_sha256(key: &[u8], data: &[u8]) -> Vec<u8> {
    // HMAC-SHA256 accepts keys of any length.
    let mut mac = HmacSha256::new_from_slice(key).expect("HMAC accepts any key length");
    mac.update(data);
    mac.finalize().into_bytes().to_vec()
}
