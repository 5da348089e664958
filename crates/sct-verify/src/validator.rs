//! SCT validation
//!
//! For each SCT the validator rebuilds the payload the log signed, resolves
//! the log key by log ID and hands both to the signature verifier. Any
//! failure along the way means the SCT is not valid: `validate_sct` never
//! errors, and `validate_certificate` only errors when the certificate's SCT
//! list itself is malformed.

use crate::collaborators::{AwsLcVerifier, CertificateSource, LogKeyLookup, SignatureVerifier};
use crate::error::{Error, Result};
use crate::payload::{signed_payload, LogEntry};
use crate::policy::ValidationPolicy;
use crate::report::{CertificateReport, SctOutcome, SctReport};
use crate::x509::X509CertificateSource;
use sct_crypto::Keyring;
use sct_types::{decode_sct_list, SctRecord};

/// Validates SCTs against a set of known CT logs
#[derive(Debug, Clone)]
pub struct SctValidator<K, V, C> {
    keys: K,
    verifier: V,
    certificates: C,
    policy: ValidationPolicy,
}

impl SctValidator<Keyring, AwsLcVerifier, X509CertificateSource> {
    /// Validator over a keyring of log keys, using aws-lc-rs and x509-cert
    pub fn from_keyring(keyring: Keyring, certificates: X509CertificateSource) -> Self {
        Self::new(keyring, AwsLcVerifier, certificates)
    }
}

impl<K, V, C> SctValidator<K, V, C>
where
    K: LogKeyLookup,
    V: SignatureVerifier,
    C: CertificateSource,
{
    /// Create a validator with the default all-or-nothing policy
    pub fn new(keys: K, verifier: V, certificates: C) -> Self {
        Self {
            keys,
            verifier,
            certificates,
            policy: ValidationPolicy::default(),
        }
    }

    /// Set the policy applied by [`Self::validate_certificate`]
    pub fn with_policy(mut self, policy: ValidationPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// The policy applied to certificates
    pub fn policy(&self) -> &ValidationPolicy {
        &self.policy
    }

    /// Validate one SCT issued for a certificate
    ///
    /// When the certificate source knows the issuer key hash the SCT is
    /// checked as a precertificate entry over `tbs_certificate`, otherwise as
    /// an X.509 entry over `certificate_der`. Returns the verifier's verdict;
    /// a missing log key or a collaborator error yields `false`.
    ///
    /// `tbs_certificate` is ignored for X.509 entries.
    pub fn validate_sct(
        &self,
        record: &SctRecord,
        certificate_der: &[u8],
        tbs_certificate: &[u8],
    ) -> bool {
        let result = self
            .log_entry(certificate_der, tbs_certificate)
            .and_then(|entry| self.verify_sct(record, &entry));

        match result {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!("SCT from log {} failed validation: {}", record.log_id, e);
                false
            }
        }
    }

    /// Verify one SCT against an explicit log entry, reporting why it failed
    pub fn verify_sct(&self, record: &SctRecord, entry: &LogEntry<'_>) -> Result<()> {
        let payload = signed_payload(record, entry)?;

        let public_key = self
            .keys
            .log_public_key(&record.log_id)
            .map_err(|e| Error::KeyLookup(e.to_string()))?
            .ok_or(Error::UnknownLog(record.log_id))?;

        let signature = &record.signature;
        let verified = self
            .verifier
            .verify_signature(
                &payload,
                &signature.signature,
                &public_key,
                signature.hash_algorithm,
                signature.signature_algorithm,
            )
            .map_err(|e| Error::Verifier(e.to_string()))?;

        if !verified {
            return Err(Error::SignatureMismatch(record.log_id));
        }

        tracing::debug!(
            "SCT from log {} at {} verified ({} entry)",
            record.log_id,
            record.timestamp,
            if entry.is_precert() { "precert" } else { "x509" }
        );
        Ok(())
    }

    /// Validate the SCTs embedded in a certificate
    ///
    /// Returns `Ok(false)` when the certificate has no SCT list, when the
    /// certificate source fails, when the list is empty, or when the SCT
    /// results do not satisfy the policy. A malformed SCT list is an error.
    pub fn validate_certificate(&self, certificate_der: &[u8]) -> Result<bool> {
        match self.validate_certificate_detailed(certificate_der) {
            Ok(report) => Ok(report.valid),
            Err(e @ Error::InvalidSctData(_)) => Err(e),
            Err(e) => {
                tracing::warn!("Certificate SCT validation failed: {}", e);
                Ok(false)
            }
        }
    }

    /// Validate the SCTs embedded in a certificate, with one result per SCT
    ///
    /// Fails with [`Error::MissingSctExtension`], [`Error::Extraction`],
    /// [`Error::InvalidSctData`] or [`Error::EmptySctList`] when no per-SCT
    /// results can be produced.
    pub fn validate_certificate_detailed(
        &self,
        certificate_der: &[u8],
    ) -> Result<CertificateReport> {
        let sct_list = self
            .certificates
            .sct_list(certificate_der)
            .map_err(|e| Error::Extraction(e.to_string()))?
            .ok_or(Error::MissingSctExtension)?;
        let tbs_certificate = self
            .certificates
            .tbs_certificate(certificate_der)
            .map_err(|e| Error::Extraction(e.to_string()))?;

        let records = decode_sct_list(&sct_list)?;
        if records.is_empty() {
            return Err(Error::EmptySctList);
        }

        let entry = self.log_entry(certificate_der, &tbs_certificate)?;
        let scts: Vec<SctReport> = records
            .iter()
            .map(|record| {
                let outcome = match self.verify_sct(record, &entry) {
                    Ok(()) => SctOutcome::Valid,
                    Err(e) => {
                        tracing::warn!("SCT from log {} failed validation: {}", record.log_id, e);
                        SctOutcome::Invalid {
                            reason: e.to_string(),
                        }
                    }
                };
                SctReport {
                    log_id: record.log_id,
                    timestamp: record.timestamp,
                    outcome,
                }
            })
            .collect();

        let valid_count = scts.iter().filter(|sct| sct.outcome.is_valid()).count();
        let valid = self.policy.is_satisfied(valid_count, scts.len());
        tracing::debug!(
            "{} of {} SCTs valid, policy satisfied: {}",
            valid_count,
            scts.len(),
            valid
        );

        Ok(CertificateReport {
            scts,
            valid_count,
            valid,
        })
    }

    fn log_entry<'a>(
        &self,
        certificate_der: &'a [u8],
        tbs_certificate: &'a [u8],
    ) -> Result<LogEntry<'a>> {
        let issuer_key_hash = self
            .certificates
            .issuer_key_hash(certificate_der)
            .map_err(|e| Error::Extraction(e.to_string()))?;

        Ok(match issuer_key_hash {
            Some(issuer_key_hash) => LogEntry::Precert {
                issuer_key_hash,
                tbs_certificate,
            },
            None => LogEntry::X509 {
                certificate: certificate_der,
            },
        })
    }
}
