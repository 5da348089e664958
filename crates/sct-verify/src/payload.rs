//! Reconstruction of the data a CT log signs for an SCT
//!
//! RFC 6962 §3.2 defines the signed structure as:
//!
//! ```text
//! digitally-signed struct {
//!     Version sct_version;
//!     SignatureType signature_type = certificate_timestamp;
//!     uint64 timestamp;
//!     LogEntryType entry_type;
//!     select(entry_type) {
//!         case x509_entry: ASN.1Cert;
//!         case precert_entry: PreCert;
//!     } signed_entry;
//!     CtExtensions extensions;
//! };
//! ```
//!
//! The byte layout is produced by tls_codec derives so every length prefix
//! matches the wire format the log used.

use crate::error::{Error, Result};
use sct_types::SctRecord;
use tls_codec::{SerializeBytes, TlsByteVecU16, TlsByteVecU24, TlsSerializeBytes, TlsSize};

/// SignatureType as defined in RFC 6962
#[derive(PartialEq, Debug, TlsSerializeBytes, TlsSize)]
#[repr(u8)]
enum SignatureType {
    CertificateTimestamp = 0,
    #[allow(unused)]
    TreeHash = 1,
}

/// LogEntryType as defined in RFC 6962
#[derive(PartialEq, Debug)]
#[repr(u16)]
enum LogEntryType {
    X509Entry = 0,
    PrecertEntry = 1,
}

/// PreCert structure for precertificate entries
#[derive(PartialEq, Debug, TlsSerializeBytes, TlsSize)]
struct PreCert {
    issuer_key_hash: [u8; 32],
    tbs_certificate: TlsByteVecU24,
}

#[derive(PartialEq, Debug, TlsSerializeBytes, TlsSize)]
#[repr(u16)]
enum SignedEntry {
    #[tls_codec(discriminant = "LogEntryType::X509Entry")]
    X509Entry(TlsByteVecU24),
    #[tls_codec(discriminant = "LogEntryType::PrecertEntry")]
    PrecertEntry(PreCert),
}

#[derive(PartialEq, Debug, TlsSerializeBytes, TlsSize)]
struct SignedPayload {
    version: u8,
    signature_type: SignatureType,
    timestamp: u64,
    signed_entry: SignedEntry,
    extensions: TlsByteVecU16,
}

/// The log entry an SCT was issued for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogEntry<'a> {
    /// A final certificate submitted directly to the log
    X509 {
        /// DER-encoded certificate
        certificate: &'a [u8],
    },
    /// A precertificate, identified by its issuer and TBSCertificate
    Precert {
        /// SHA-256 of the issuer's DER SubjectPublicKeyInfo
        issuer_key_hash: [u8; 32],
        /// DER TBSCertificate without the SCT-list and poison extensions
        tbs_certificate: &'a [u8],
    },
}

impl LogEntry<'_> {
    /// Whether this is a precertificate entry
    pub fn is_precert(&self) -> bool {
        matches!(self, LogEntry::Precert { .. })
    }

    fn signed_entry(&self) -> SignedEntry {
        match *self {
            LogEntry::X509 { certificate } => SignedEntry::X509Entry(certificate.into()),
            LogEntry::Precert {
                issuer_key_hash,
                tbs_certificate,
            } => SignedEntry::PrecertEntry(PreCert {
                issuer_key_hash,
                tbs_certificate: tbs_certificate.into(),
            }),
        }
    }
}

const U24_MAX: usize = (1 << 24) - 1;

fn check_len(len: usize, max: usize, what: &str) -> Result<()> {
    if len > max {
        return Err(Error::Encoding(format!(
            "{} too large: {} bytes (max {})",
            what, len, max
        )));
    }
    Ok(())
}

/// Serialize the bytes a log signed when issuing `record` for `entry`
pub fn signed_payload(record: &SctRecord, entry: &LogEntry<'_>) -> Result<Vec<u8>> {
    check_len(record.extensions.len(), u16::MAX as usize, "extensions")?;
    let entry_len = match entry {
        LogEntry::X509 { certificate } => certificate.len(),
        LogEntry::Precert {
            tbs_certificate, ..
        } => tbs_certificate.len(),
    };
    check_len(entry_len, U24_MAX, "signed entry")?;

    let payload = SignedPayload {
        version: record.version,
        signature_type: SignatureType::CertificateTimestamp,
        timestamp: record.timestamp,
        signed_entry: entry.signed_entry(),
        extensions: record.extensions.as_slice().into(),
    };

    payload
        .tls_serialize()
        .map_err(|e| Error::Encoding(format!("failed to serialize SCT data: {}", e)))
}
