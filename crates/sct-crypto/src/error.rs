//! Error types for sct-crypto

use thiserror::Error;

/// Errors that can occur in cryptographic operations
#[derive(Error, Debug)]
pub enum Error {
    /// Verification error
    #[error("Verification error: {0}")]
    Verification(String),

    /// Unsupported algorithm
    #[error("Unsupported algorithm: {0}")]
    UnsupportedAlgorithm(String),

    /// DER encoding/decoding error
    #[error("DER error: {0}")]
    Der(String),

    /// Certificate parsing error
    #[error("Certificate error: {0}")]
    InvalidCertificate(String),
}

/// Result type for cryptographic operations
pub type Result<T> = std::result::Result<T, Error>;
