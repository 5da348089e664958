//! Type-safe wrappers for SCT identifiers
//!
//! A CT log is identified by the SHA-256 hash of its DER-encoded public key.
//! [`LogId`] keeps that identifier at its fixed 32-byte size and provides the
//! hex and base64 renderings used by log lists and diagnostics.

use crate::error::{Error, Result};
use base64::Engine;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Size of a log ID in bytes
pub const LOG_ID_LEN: usize = 32;

/// A 32-byte Certificate Transparency log identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LogId([u8; LOG_ID_LEN]);

impl LogId {
    /// Create from raw bytes
    pub fn from_bytes(bytes: [u8; LOG_ID_LEN]) -> Self {
        LogId(bytes)
    }

    /// Try to create from a byte slice
    pub fn try_from_slice(bytes: &[u8]) -> Result<Self> {
        let arr: [u8; LOG_ID_LEN] = bytes.try_into().map_err(|_| {
            Error::InvalidEncoding(format!(
                "log ID must be {} bytes, got {}",
                LOG_ID_LEN,
                bytes.len()
            ))
        })?;
        Ok(LogId(arr))
    }

    /// Parse from hex-encoded string
    pub fn from_hex(s: &str) -> Result<Self> {
        let bytes =
            hex::decode(s).map_err(|e| Error::InvalidEncoding(format!("invalid hex: {}", e)))?;
        Self::try_from_slice(&bytes)
    }

    /// Parse from base64-encoded string
    pub fn from_base64(s: &str) -> Result<Self> {
        let bytes = base64::engine::general_purpose::STANDARD
            .decode(s)
            .map_err(|e| Error::InvalidEncoding(format!("invalid base64: {}", e)))?;
        Self::try_from_slice(&bytes)
    }

    /// Encode as hex string (lowercase)
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Encode as base64 string
    pub fn to_base64(&self) -> String {
        base64::engine::general_purpose::STANDARD.encode(self.0)
    }

    /// Get the underlying bytes
    pub fn as_bytes(&self) -> &[u8; LOG_ID_LEN] {
        &self.0
    }
}

impl From<[u8; LOG_ID_LEN]> for LogId {
    fn from(bytes: [u8; LOG_ID_LEN]) -> Self {
        LogId(bytes)
    }
}

impl AsRef<[u8]> for LogId {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl std::fmt::Display for LogId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl Serialize for LogId {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_base64())
    }
}

impl<'de> Deserialize<'de> for LogId {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        LogId::from_base64(&s).map_err(serde::de::Error::custom)
    }
}

/// Serde helper for base64 encoding/decoding of byte arrays
pub mod base64_bytes {
    use base64::{engine::general_purpose::STANDARD, Engine};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&STANDARD.encode(bytes))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Vec<u8>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        STANDARD.decode(s).map_err(serde::de::Error::custom)
    }
}
