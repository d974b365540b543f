//! # Error Types — Foundation Error Hierarchy
//!
//! Errors shared by every crate in the workspace. Domain crates define
//! their own enums (`FheError`, `RegistryError`) and wrap these where a
//! lower layer can fail underneath them.

use thiserror::Error;

/// Top-level error type for foundation operations.
#[derive(Error, Debug)]
pub enum CcrError {
    /// Canonicalization failed.
    #[error("canonicalization error: {0}")]
    Canonicalization(#[from] CanonicalizationError),

    /// A value failed structural validation (bad hex, unknown enum tag,
    /// out-of-range timestamp).
    #[error("validation error: {0}")]
    Validation(String),

    /// Cryptographic failure.
    #[error("crypto error: {0}")]
    Crypto(#[from] CryptoError),

    /// IO error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Error during canonical serialization.
#[derive(Error, Debug)]
pub enum CanonicalizationError {
    /// Float values are not permitted in canonical representations.
    #[error("float values are not permitted in canonical representations: {0}")]
    FloatRejected(f64),

    /// JSON serialization failed.
    #[error("serialization failed: {0}")]
    SerializationFailed(#[from] serde_json::Error),
}

/// Error in cryptographic operations.
#[derive(Error, Debug)]
pub enum CryptoError {
    /// Signature verification failed.
    #[error("signature verification failed: {0}")]
    VerificationFailed(String),

    /// Key parsing failed.
    #[error("key error: {0}")]
    KeyError(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_error_display() {
        let err = CcrError::Validation("bad address".into());
        assert_eq!(err.to_string(), "validation error: bad address");
    }

    #[test]
    fn crypto_error_converts() {
        let err: CcrError = CryptoError::KeyError("short".into()).into();
        assert!(matches!(err, CcrError::Crypto(CryptoError::KeyError(_))));
        assert!(err.to_string().contains("short"));
    }
}
