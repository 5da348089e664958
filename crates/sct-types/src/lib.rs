//! Core types for Signed Certificate Timestamps
//!
//! This crate provides the SCT data model defined by RFC 6962 and the strict
//! binary codec for `SignedCertificateTimestampList` structures. It performs
//! no I/O and no cryptography.

pub mod codec;
pub mod encoding;
pub mod error;
pub mod record;

pub(crate) use encoding::base64_bytes;

pub use codec::{decode_sct, decode_sct_list, encode_sct, encode_sct_list};
pub use encoding::{LogId, LOG_ID_LEN};
pub use error::{Error, Result};
pub use record::{
    DigitallySigned, HashAlgorithm, SctList, SctRecord, SignatureAlgorithm, SCT_VERSION_V1,
};
