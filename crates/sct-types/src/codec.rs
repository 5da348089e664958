//! SCT list wire codec (RFC 6962 section 3.3)
//!
//! ```text
//! SignedCertificateTimestampList ::= u16 total_length, SerializedSCT*
//! SerializedSCT                  ::= u16 length, SignedCertificateTimestamp
//!
//! SignedCertificateTimestamp ::=
//!     u8        version
//!     byte[32]  log_id
//!     u64       timestamp
//!     u16       ext_length, byte[ext_length] extensions
//!     u8        hash_algorithm
//!     u8        signature_algorithm
//!     u16       sig_length, byte[sig_length] signature
//! ```
//!
//! Decoding is strict: every length prefix must be consumed exactly, the
//! outer length must match the buffer, and only v1 SCTs are accepted. Errors
//! carry the wire field and the absolute offset at which decoding stopped.

use crate::encoding::{LogId, LOG_ID_LEN};
use crate::error::{Error, Result};
use crate::record::{DigitallySigned, SctList, SctRecord, SCT_VERSION_V1};
use tls_codec::{DeserializeBytes, SerializeBytes, TlsByteVecU16, TlsSerializeBytes, TlsSize};

/// Cursor over a length-delimited region of the input buffer
struct Reader<'a> {
    bytes: &'a [u8],
    offset: usize,
}

impl<'a> Reader<'a> {
    fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, offset: 0 }
    }

    fn remaining(&self) -> usize {
        self.bytes.len()
    }

    fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    fn short(&self, field: &'static str, needed: usize) -> Error {
        Error::InvalidSctData {
            field,
            offset: self.offset,
            reason: format!(
                "need {} bytes, only {} remain",
                needed,
                self.remaining()
            ),
        }
    }

    fn read_int<T: DeserializeBytes>(&mut self, field: &'static str) -> Result<T> {
        let (value, rest) =
            T::tls_deserialize_bytes(self.bytes).map_err(|_| self.short(field, std::mem::size_of::<T>()))?;
        self.offset += self.bytes.len() - rest.len();
        self.bytes = rest;
        Ok(value)
    }

    fn read_u8(&mut self, field: &'static str) -> Result<u8> {
        self.read_int::<u8>(field)
    }

    fn read_u16(&mut self, field: &'static str) -> Result<u16> {
        self.read_int::<u16>(field)
    }

    fn read_u64(&mut self, field: &'static str) -> Result<u64> {
        self.read_int::<u64>(field)
    }

    /// Split off exactly `len` bytes as a sub-reader that keeps absolute offsets
    fn take(&mut self, len: usize, field: &'static str) -> Result<Reader<'a>> {
        if len > self.remaining() {
            return Err(self.short(field, len));
        }
        let (head, tail) = self.bytes.split_at(len);
        let sub = Reader {
            bytes: head,
            offset: self.offset,
        };
        self.offset += len;
        self.bytes = tail;
        Ok(sub)
    }

    fn read_fixed<const N: usize>(&mut self, field: &'static str) -> Result<[u8; N]> {
        let region = self.take(N, field)?;
        region
            .bytes
            .try_into()
            .map_err(|_| self.short(field, N))
    }

    /// Read a `u16`-length-prefixed opaque vector
    fn read_opaque_u16(&mut self, field: &'static str) -> Result<Vec<u8>> {
        let len = self.read_u16(field)? as usize;
        Ok(self.take(len, field)?.bytes.to_vec())
    }

    /// Fail unless the region has been consumed exactly
    fn finish(self) -> Result<()> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(Error::TrailingData {
                offset: self.offset,
                remaining: self.remaining(),
            })
        }
    }
}

/// Decode a `SignedCertificateTimestampList` into its SCTs, in wire order
///
/// `bytes` are the raw TLS octets of the list, i.e. the content of the
/// OCTET STRING carried by the SCT-list certificate extension.
pub fn decode_sct_list(bytes: &[u8]) -> Result<SctList> {
    let mut input = Reader::new(bytes);
    let total = input.read_u16("list length")? as usize;

    if input.remaining() > total {
        return Err(Error::TrailingData {
            offset: input.offset + total,
            remaining: input.remaining() - total,
        });
    }
    let mut list = input.take(total, "list")?;

    let mut scts = Vec::new();
    while !list.is_empty() {
        let len = list.read_u16("sct length")? as usize;
        let mut entry = list.take(len, "sct")?;
        scts.push(read_sct(&mut entry)?);
        entry.finish()?;
    }

    Ok(scts)
}

/// Decode a single serialized SCT (no list or entry length prefix)
pub fn decode_sct(bytes: &[u8]) -> Result<SctRecord> {
    let mut input = Reader::new(bytes);
    let sct = read_sct(&mut input)?;
    input.finish()?;
    Ok(sct)
}

fn read_sct(input: &mut Reader<'_>) -> Result<SctRecord> {
    let version_offset = input.offset;
    let version = input.read_u8("version")?;
    if version != SCT_VERSION_V1 {
        return Err(Error::UnsupportedVersion {
            offset: version_offset,
            version,
        });
    }

    let log_id = LogId::from_bytes(input.read_fixed::<LOG_ID_LEN>("log id")?);
    let timestamp = input.read_u64("timestamp")?;
    let extensions = input.read_opaque_u16("extensions")?;
    let hash_algorithm = input.read_u8("hash algorithm")?;
    let signature_algorithm = input.read_u8("signature algorithm")?;
    let signature = input.read_opaque_u16("signature")?;

    Ok(SctRecord {
        version,
        log_id,
        timestamp,
        extensions,
        signature: DigitallySigned {
            hash_algorithm,
            signature_algorithm,
            signature,
        },
    })
}

/// TLS layout of a single SCT, used for encoding
#[derive(Debug, TlsSerializeBytes, TlsSize)]
struct SctWire {
    version: u8,
    log_id: [u8; LOG_ID_LEN],
    timestamp: u64,
    extensions: TlsByteVecU16,
    hash_algorithm: u8,
    signature_algorithm: u8,
    signature: TlsByteVecU16,
}

fn check_u16_len(len: usize, what: &str) -> Result<()> {
    if len > u16::MAX as usize {
        return Err(Error::Encoding(format!(
            "{} too large: {} bytes (max {})",
            what,
            len,
            u16::MAX
        )));
    }
    Ok(())
}

/// Serialize a single SCT (without an entry length prefix)
pub fn encode_sct(sct: &SctRecord) -> Result<Vec<u8>> {
    check_u16_len(sct.extensions.len(), "extensions")?;
    check_u16_len(sct.signature.signature.len(), "signature")?;

    let wire = SctWire {
        version: sct.version,
        log_id: *sct.log_id.as_bytes(),
        timestamp: sct.timestamp,
        extensions: sct.extensions.as_slice().into(),
        hash_algorithm: sct.signature.hash_algorithm,
        signature_algorithm: sct.signature.signature_algorithm,
        signature: sct.signature.signature.as_slice().into(),
    };
    Ok(wire.tls_serialize()?)
}

/// Serialize SCTs into a `SignedCertificateTimestampList`
pub fn encode_sct_list(scts: &[SctRecord]) -> Result<Vec<u8>> {
    let mut body = Vec::new();
    for sct in scts {
        let serialized = encode_sct(sct)?;
        check_u16_len(serialized.len(), "serialized SCT")?;
        let entry: TlsByteVecU16 = serialized.as_slice().into();
        body.extend(entry.tls_serialize()?);
    }

    check_u16_len(body.len(), "SCT list")?;
    let list: TlsByteVecU16 = body.as_slice().into();
    Ok(list.tls_serialize()?)
}
