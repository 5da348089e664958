//! SCT record types
//!
//! These mirror the RFC 6962 `SignedCertificateTimestamp` structure. Algorithm
//! codes are kept as the raw TLS `u8` values found on the wire; the typed
//! [`HashAlgorithm`] and [`SignatureAlgorithm`] views are resolved on demand
//! so that decoding never rejects an algorithm it merely does not know.

use crate::encoding::LogId;
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// SCT version v1, the only version defined by RFC 6962
pub const SCT_VERSION_V1: u8 = 0;

/// An ordered list of SCTs, in wire order
pub type SctList = Vec<SctRecord>;

/// A decoded Signed Certificate Timestamp
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SctRecord {
    /// SCT version (0 = v1)
    pub version: u8,
    /// ID of the log that issued this SCT
    pub log_id: LogId,
    /// Milliseconds since the Unix epoch
    pub timestamp: u64,
    /// Opaque CT extensions, preserved verbatim
    #[serde(with = "crate::base64_bytes")]
    pub extensions: Vec<u8>,
    /// The log's signature over the certificate entry
    pub signature: DigitallySigned,
}

impl SctRecord {
    /// Whether this is a v1 SCT
    pub fn is_v1(&self) -> bool {
        self.version == SCT_VERSION_V1
    }

    /// Timestamp as milliseconds since the Unix epoch
    pub fn timestamp_millis(&self) -> u64 {
        self.timestamp
    }
}

/// The TLS `DigitallySigned` envelope carried by an SCT
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DigitallySigned {
    /// TLS HashAlgorithm code (4 = SHA-256)
    pub hash_algorithm: u8,
    /// TLS SignatureAlgorithm code (3 = ECDSA)
    pub signature_algorithm: u8,
    /// Raw signature bytes
    #[serde(with = "crate::base64_bytes")]
    pub signature: Vec<u8>,
}

impl DigitallySigned {
    /// Resolve both algorithm codes to their typed registry values
    pub fn algorithms(&self) -> Result<(HashAlgorithm, SignatureAlgorithm)> {
        Ok((
            HashAlgorithm::try_from(self.hash_algorithm)?,
            SignatureAlgorithm::try_from(self.signature_algorithm)?,
        ))
    }
}

/// TLS HashAlgorithm registry (RFC 5246 section 7.4.1.4.1)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[repr(u8)]
pub enum HashAlgorithm {
    None = 0,
    Md5 = 1,
    Sha1 = 2,
    Sha224 = 3,
    Sha256 = 4,
    Sha384 = 5,
    Sha512 = 6,
}

impl TryFrom<u8> for HashAlgorithm {
    type Error = Error;

    fn try_from(code: u8) -> Result<Self> {
        match code {
            0 => Ok(HashAlgorithm::None),
            1 => Ok(HashAlgorithm::Md5),
            2 => Ok(HashAlgorithm::Sha1),
            3 => Ok(HashAlgorithm::Sha224),
            4 => Ok(HashAlgorithm::Sha256),
            5 => Ok(HashAlgorithm::Sha384),
            6 => Ok(HashAlgorithm::Sha512),
            other => Err(Error::UnsupportedAlgorithm(format!(
                "unknown hash algorithm code {}",
                other
            ))),
        }
    }
}

impl std::fmt::Display for HashAlgorithm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HashAlgorithm::None => write!(f, "none"),
            HashAlgorithm::Md5 => write!(f, "md5"),
            HashAlgorithm::Sha1 => write!(f, "sha1"),
            HashAlgorithm::Sha224 => write!(f, "sha224"),
            HashAlgorithm::Sha256 => write!(f, "sha256"),
            HashAlgorithm::Sha384 => write!(f, "sha384"),
            HashAlgorithm::Sha512 => write!(f, "sha512"),
        }
    }
}

/// TLS SignatureAlgorithm registry (RFC 5246 section 7.4.1.4.1, RFC 8422)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[repr(u8)]
pub enum SignatureAlgorithm {
    Anonymous = 0,
    Rsa = 1,
    Dsa = 2,
    Ecdsa = 3,
    Ed25519 = 7,
}

impl TryFrom<u8> for SignatureAlgorithm {
    type Error = Error;

    fn try_from(code: u8) -> Result<Self> {
        match code {
            0 => Ok(SignatureAlgorithm::Anonymous),
            1 => Ok(SignatureAlgorithm::Rsa),
            2 => Ok(SignatureAlgorithm::Dsa),
            3 => Ok(SignatureAlgorithm::Ecdsa),
            7 => Ok(SignatureAlgorithm::Ed25519),
            other => Err(Error::UnsupportedAlgorithm(format!(
                "unknown signature algorithm code {}",
                other
            ))),
        }
    }
}

impl std::fmt::Display for SignatureAlgorithm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SignatureAlgorithm::Anonymous => write!(f, "anonymous"),
            SignatureAlgorithm::Rsa => write!(f, "rsa"),
            SignatureAlgorithm::Dsa => write!(f, "dsa"),
            SignatureAlgorithm::Ecdsa => write!(f, "ecdsa"),
            SignatureAlgorithm::Ed25519 => write!(f, "ed25519"),
        }
    }
}
