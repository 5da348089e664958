//! Capabilities the validator consumes
//!
//! The validator never fetches keys, runs cryptography or parses X.509 on
//! its own. It is written against the three traits below, each of which has
//! a default implementation in this workspace and a blanket implementation
//! for closures so tests and callers can substitute their own.
//!
//! Implementations must be safe to share across threads.

use crate::error::Result;
use sct_crypto::{verify_signature, Keyring, SigningScheme};
use sct_types::LogId;

/// Resolves a CT log ID to the log's public key
pub trait LogKeyLookup: Send + Sync {
    /// Return the DER SubjectPublicKeyInfo of the log, or `None` if unknown
    fn log_public_key(&self, log_id: &LogId) -> Result<Option<Vec<u8>>>;
}

impl LogKeyLookup for Keyring {
    fn log_public_key(&self, log_id: &LogId) -> Result<Option<Vec<u8>>> {
        Ok(self.get_key(log_id).map(<[u8]>::to_vec))
    }
}

impl<F> LogKeyLookup for F
where
    F: Fn(&LogId) -> Result<Option<Vec<u8>>> + Send + Sync,
{
    fn log_public_key(&self, log_id: &LogId) -> Result<Option<Vec<u8>>> {
        self(log_id)
    }
}

/// Verifies a log signature over a reconstructed payload
pub trait SignatureVerifier: Send + Sync {
    /// Check `signature` over `signed_data` with `public_key`
    ///
    /// The algorithms are the raw TLS codes carried in the SCT. Returns
    /// `Ok(false)` for a signature that does not verify; `Err` is reserved
    /// for failures to run the check at all.
    fn verify_signature(
        &self,
        signed_data: &[u8],
        signature: &[u8],
        public_key: &[u8],
        hash_algorithm: u8,
        signature_algorithm: u8,
    ) -> Result<bool>;
}

impl<F> SignatureVerifier for F
where
    F: Fn(&[u8], &[u8], &[u8], u8, u8) -> Result<bool> + Send + Sync,
{
    fn verify_signature(
        &self,
        signed_data: &[u8],
        signature: &[u8],
        public_key: &[u8],
        hash_algorithm: u8,
        signature_algorithm: u8,
    ) -> Result<bool> {
        self(
            signed_data,
            signature,
            public_key,
            hash_algorithm,
            signature_algorithm,
        )
    }
}

/// Signature verifier backed by aws-lc-rs
#[derive(Debug, Clone, Copy, Default)]
pub struct AwsLcVerifier;

impl SignatureVerifier for AwsLcVerifier {
    fn verify_signature(
        &self,
        signed_data: &[u8],
        signature: &[u8],
        public_key: &[u8],
        hash_algorithm: u8,
        signature_algorithm: u8,
    ) -> Result<bool> {
        let scheme = SigningScheme::from_tls_codes(hash_algorithm, signature_algorithm)?;
        Ok(verify_signature(public_key, signed_data, signature, scheme).is_ok())
    }
}

/// Extracts the byte sequences the validator needs from a certificate
pub trait CertificateSource: Send + Sync {
    /// The raw `SignedCertificateTimestampList` octets, or `None` if the
    /// certificate has no SCT-list extension
    fn sct_list(&self, certificate_der: &[u8]) -> Result<Option<Vec<u8>>>;

    /// The TBSCertificate as submitted to the log, without the SCT-list and
    /// poison extensions
    fn tbs_certificate(&self, certificate_der: &[u8]) -> Result<Vec<u8>>;

    /// SHA-256 of the issuer's SubjectPublicKeyInfo
    ///
    /// When known, SCTs are checked as precertificate entries. When `None`,
    /// they are checked as X.509 entries over the whole certificate.
    fn issuer_key_hash(&self, _certificate_der: &[u8]) -> Result<Option<[u8; 32]>> {
        Ok(None)
    }
}
