//! Certificate source backed by x509-cert

use crate::collaborators::CertificateSource;
use crate::error::Result;
use sct_crypto::{
    issuer_key_hash, precert_tbs_from_certificate, sct_list_from_certificate,
    spki_from_certificate,
};

/// Extracts SCT lists and precertificate TBS bytes from DER certificates
///
/// Without an issuer, SCTs are checked as X.509 entries. Configure the
/// issuer to check embedded SCTs, which logs always issue for the
/// precertificate.
#[derive(Debug, Clone, Default)]
pub struct X509CertificateSource {
    issuer_key_hash: Option<[u8; 32]>,
}

impl X509CertificateSource {
    /// Create a source with no issuer
    pub fn new() -> Self {
        Self::default()
    }

    /// Use the issuer's DER SubjectPublicKeyInfo
    pub fn with_issuer_spki(issuer_spki_der: &[u8]) -> Self {
        Self {
            issuer_key_hash: Some(issuer_key_hash(issuer_spki_der)),
        }
    }

    /// Use the issuer's DER certificate
    pub fn with_issuer_certificate(issuer_der: &[u8]) -> Result<Self> {
        let spki = spki_from_certificate(issuer_der)?;
        Ok(Self::with_issuer_spki(&spki))
    }
}

impl CertificateSource for X509CertificateSource {
    fn sct_list(&self, certificate_der: &[u8]) -> Result<Option<Vec<u8>>> {
        Ok(sct_list_from_certificate(certificate_der)?)
    }

    fn tbs_certificate(&self, certificate_der: &[u8]) -> Result<Vec<u8>> {
        Ok(precert_tbs_from_certificate(certificate_der)?)
    }

    fn issuer_key_hash(&self, _certificate_der: &[u8]) -> Result<Option<[u8; 32]>> {
        Ok(self.issuer_key_hash)
    }
}
