//! Error types for sct-types

use thiserror::Error;

/// Errors that can occur while decoding or encoding SCT structures
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Malformed SCT data: a short read or a length prefix that does not fit
    #[error("Invalid SCT data at offset {offset} ({field}): {reason}")]
    InvalidSctData {
        /// Wire field being read when decoding failed
        field: &'static str,
        /// Absolute byte offset into the decoded buffer
        offset: usize,
        /// What went wrong
        reason: String,
    },

    /// The SCT version byte is not v1
    #[error("Invalid SCT data at offset {offset}: unsupported SCT version {version}")]
    UnsupportedVersion {
        /// Absolute byte offset of the version byte
        offset: usize,
        /// The version found on the wire
        version: u8,
    },

    /// Bytes left over after a length-delimited structure was fully decoded
    #[error("Invalid SCT data at offset {offset}: {remaining} trailing bytes")]
    TrailingData {
        /// Absolute byte offset of the first unconsumed byte
        offset: usize,
        /// Number of unconsumed bytes
        remaining: usize,
    },

    /// Hash or signature algorithm code outside the supported registry
    #[error("Unsupported algorithm: {0}")]
    UnsupportedAlgorithm(String),

    /// A value could not be serialized into its TLS length prefix
    #[error("Encoding error: {0}")]
    Encoding(String),

    /// Hex or base64 input could not be decoded
    #[error("Invalid encoding: {0}")]
    InvalidEncoding(String),
}

impl Error {
    /// Whether this error describes malformed SCT wire data
    pub fn is_invalid_sct_data(&self) -> bool {
        matches!(
            self,
            Error::InvalidSctData { .. } | Error::UnsupportedVersion { .. } | Error::TrailingData { .. }
        )
    }
}

impl From<tls_codec::Error> for Error {
    fn from(e: tls_codec::Error) -> Self {
        Error::Encoding(e.to_string())
    }
}

/// Result type for sct-types operations
pub type Result<T> = std::result::Result<T, Error>;
