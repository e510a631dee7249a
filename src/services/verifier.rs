//! Request verification seam.
//!
//! The webhook treats verification as an opaque pass/fail check that runs
//! before any turn processing.

use thiserror::Error;
use tracing::warn;

use crate::kernel::event::CekRequest;

pub const SIGNATURE_HEADER: &str = "signaturecek";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum VerifyError {
    #[error("missing SignatureCEK header")]
    MissingSignature,
    #[error("applicationId mismatch: expected '{expected}', got '{actual}'")]
    ApplicationMismatch { expected: String, actual: String },
}

pub trait RequestVerifier: Send + Sync {
    fn verify(
        &self,
        signature: Option<&str>,
        body: &[u8],
        request: &CekRequest,
    ) -> Result<(), VerifyError>;
}

/// Requires a signature header and, when configured, a matching `applicationId`.
/// The signature itself is not checked cryptographically, so this alone does not
/// authenticate the platform: anyone can send a non-empty header. Production
/// deployments need a `RequestVerifier` that checks the RSA signature over the
/// raw body against the platform's public key.
#[derive(Debug, Clone, Default)]
pub struct ExtensionIdVerifier {
    extension_id: Option<String>,
}

impl ExtensionIdVerifier {
    pub fn new(extension_id: Option<String>) -> Self {
        Self { extension_id }
    }
}

impl RequestVerifier for ExtensionIdVerifier {
    fn verify(
        &self,
        signature: Option<&str>,
        _body: &[u8],
        request: &CekRequest,
    ) -> Result<(), VerifyError> {
        if signature.map_or(true, |s| s.trim().is_empty()) {
            warn!("Rejected request without signature");
            return Err(VerifyError::MissingSignature);
        }

        if let Some(expected) = &self.extension_id {
            let actual = request.application_id().unwrap_or_default();
            if actual != expected.as_str() {
                warn!(expected = %expected, actual = %actual, "Rejected request for another extension");
                return Err(VerifyError::ApplicationMismatch {
                    expected: expected.clone(),
                    actual: actual.to_string(),
                });
            }
        }

        Ok(())
    }
}

/// Accepts everything. For local development and tests.
#[derive(Debug, Clone, Copy, Default)]
pub struct AllowAll;

impl RequestVerifier for AllowAll {
    fn verify(&self, _: Option<&str>, _: &[u8], _: &CekRequest) -> Result<(), VerifyError> {
        Ok(())
    }
}
