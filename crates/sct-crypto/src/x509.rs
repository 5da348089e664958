//! X.509 certificate utilities for SCT verification
//!
//! Embedded SCTs are signed over the precertificate: the TBSCertificate as
//! submitted to the log, before the SCT-list extension was added and with the
//! CT poison extension removed. These helpers recover that byte sequence and
//! the SCT-list octets from a final certificate.

use crate::error::{Error, Result};
use crate::hash::sha256;
use const_oid::db::rfc6962::{CT_PRECERT_POISON, CT_PRECERT_SCTS};
use der::asn1::OctetString;
use x509_cert::der::{Decode, Encode};
use x509_cert::Certificate;

/// Parse a DER-encoded certificate
pub fn parse_certificate(cert_der: &[u8]) -> Result<Certificate> {
    Certificate::from_der(cert_der)
        .map_err(|e| Error::InvalidCertificate(format!("failed to parse certificate: {}", e)))
}

/// Decode a PEM block carrying the given tag to DER
pub fn der_from_pem(pem_str: &str, tag: &str) -> Result<Vec<u8>> {
    let parsed =
        pem::parse(pem_str).map_err(|e| Error::Der(format!("failed to parse PEM: {}", e)))?;

    if parsed.tag() != tag {
        return Err(Error::Der(format!(
            "expected {} PEM block, got {}",
            tag,
            parsed.tag()
        )));
    }

    Ok(parsed.contents().to_vec())
}

/// Extract the raw `SignedCertificateTimestampList` octets from a certificate
///
/// The extension value is an OCTET STRING wrapping a second OCTET STRING
/// whose contents are the TLS-encoded list. Returns `Ok(None)` when the
/// certificate carries no SCT-list extension.
pub fn sct_list_octets(cert: &Certificate) -> Result<Option<Vec<u8>>> {
    let Some(extensions) = &cert.tbs_certificate.extensions else {
        return Ok(None);
    };

    let Some(ext) = extensions.iter().find(|ext| ext.extn_id == CT_PRECERT_SCTS) else {
        return Ok(None);
    };

    let inner = OctetString::from_der(ext.extn_value.as_bytes()).map_err(|e| {
        Error::InvalidCertificate(format!("SCT list extension is not an OCTET STRING: {}", e))
    })?;
    Ok(Some(inner.into_bytes()))
}

/// Extract the SCT-list octets from a DER-encoded certificate
pub fn sct_list_from_certificate(cert_der: &[u8]) -> Result<Option<Vec<u8>>> {
    sct_list_octets(&parse_certificate(cert_der)?)
}

/// Re-encode the TBSCertificate as it was submitted to the log
///
/// Removes the SCT-list and poison extensions. An extension list left empty
/// is dropped entirely.
pub fn precert_tbs(cert: &Certificate) -> Result<Vec<u8>> {
    let mut tbs_precert = cert.tbs_certificate.clone();
    tbs_precert.extensions = tbs_precert.extensions.and_then(|exts| {
        let kept: Vec<_> = exts
            .into_iter()
            .filter(|ext| ext.extn_id != CT_PRECERT_SCTS && ext.extn_id != CT_PRECERT_POISON)
            .collect();
        (!kept.is_empty()).then_some(kept)
    });

    let mut tbs_precert_der = Vec::new();
    tbs_precert
        .encode_to_vec(&mut tbs_precert_der)
        .map_err(|e| Error::Der(format!("failed to encode precert TBS: {}", e)))?;
    Ok(tbs_precert_der)
}

/// Re-encode the precertificate TBSCertificate of a DER-encoded certificate
pub fn precert_tbs_from_certificate(cert_der: &[u8]) -> Result<Vec<u8>> {
    precert_tbs(&parse_certificate(cert_der)?)
}

/// DER-encoded SubjectPublicKeyInfo of a certificate
pub fn spki_from_certificate(cert_der: &[u8]) -> Result<Vec<u8>> {
    let cert = parse_certificate(cert_der)?;
    cert.tbs_certificate
        .subject_public_key_info
        .to_der()
        .map_err(|e| Error::InvalidCertificate(format!("failed to encode SPKI: {}", e)))
}

/// SHA-256 of the issuer's DER SubjectPublicKeyInfo, as used in precert entries
pub fn issuer_key_hash(issuer_spki_der: &[u8]) -> [u8; 32] {
    sha256(issuer_spki_der)
}
