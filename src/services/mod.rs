pub mod verifier;

pub use verifier::{AllowAll, ExtensionIdVerifier, RequestVerifier, VerifyError};
