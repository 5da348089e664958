//! Error types for sct-verify

use sct_types::LogId;
use thiserror::Error;

/// Errors that can occur while validating SCTs
#[derive(Error, Debug)]
pub enum Error {
    /// The SCT list or an SCT record is malformed
    #[error("{0}")]
    InvalidSctData(#[from] sct_types::Error),

    /// Crypto error
    #[error("Crypto error: {0}")]
    Crypto(#[from] sct_crypto::Error),

    /// No public key is known for the log that issued the SCT
    #[error("unknown CT log {0}")]
    UnknownLog(LogId),

    /// The log's signature does not cover the reconstructed payload
    #[error("SCT signature from log {0} does not verify")]
    SignatureMismatch(LogId),

    /// The certificate carries no SCT-list extension
    #[error("certificate is missing the SCT list extension")]
    MissingSctExtension,

    /// The SCT-list extension decodes to zero records
    #[error("certificate SCT list is empty")]
    EmptySctList,

    /// The key lookup collaborator failed
    #[error("log key lookup failed: {0}")]
    KeyLookup(String),

    /// The certificate source failed to extract bytes from the certificate
    #[error("certificate extraction failed: {0}")]
    Extraction(String),

    /// The signature verifier failed to run
    #[error("signature verifier failed: {0}")]
    Verifier(String),

    /// The signed payload could not be serialized
    #[error("failed to encode signed payload: {0}")]
    Encoding(String),
}

impl Error {
    /// Whether this error describes malformed SCT wire data
    pub fn is_invalid_sct_data(&self) -> bool {
        matches!(self, Error::InvalidSctData(e) if e.is_invalid_sct_data())
    }
}

/// Result type for SCT validation
pub type Result<T> = std::result::Result<T, Error>;
