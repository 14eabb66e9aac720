//! Authentication credentials
//!
//! This module provides the credential pair used to sign Tencent Cloud API
//! requests.

/// Credential pair for the Tencent Cloud OCR service.
///
/// Both values are issued by the vendor's console; the secret key is used as
/// signing key material and never sent over the wire.
#[derive(Clone)]
pub struct OcrCredentials {
    secret_id: String,
    secret_key: String,
}

impl OcrCredentials {
    /// Creates a credential pair.
    pub fn new(secret_id: impl Into<String>, secret_key: impl Into<String>) -> Self {
        Self {
            secret_id: secret_id.into(),
            secret_key: secret_key.into(),
        }
    }

    /// Returns the secret ID (sent in the `Credential` scope of the
    /// authorization header).
    pub fn secret_id(&self) -> &str {
        &self.secret_id
    }

    /// Returns the secret key (signing key material).
    pub(crate) fn secret_key(&self) -> &str {
        &self.secret_key
    }
}

impl std::fmt::Debug for OcrCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OcrCredentials")
            .field("secret_id", &self.secret_id)
            .field("secret_key", &"<redacted>")
            .finish()
    }
}
