//! SCT validation tests
//!
//! The first half drives the validator through substituted collaborators to
//! pin down how it builds payloads and folds failures. The second half
//! checks a real Fulcio certificate end to end with the default
//! implementations.

use aws_lc_rs::rand::SystemRandom;
use aws_lc_rs::signature::{EcdsaKeyPair, KeyPair, ECDSA_P256_SHA256_ASN1_SIGNING};
use base64::Engine;
use sct_verify::crypto::{precert_tbs_from_certificate, sct_list_from_certificate, Keyring};
use sct_verify::types::{encode_sct_list, DigitallySigned, LogId, SCT_VERSION_V1};
use sct_verify::{
    decode_sct_list, signed_payload, CertificateSource, Error, LogEntry, Result, SctOutcome,
    SctRecord, SctValidator, ValidationPolicy, X509CertificateSource,
};
use std::sync::Mutex;

const LEAF_CERT: &str = include_str!("../../../test_data/sct/fulcio_leaf.b64");
const INTERMEDIATE_CERT: &str = include_str!("../../../test_data/sct/fulcio_intermediate.b64");
const CTFE_2022_KEY: &str = include_str!("../../../test_data/sct/ctfe_2022_key.b64");

const CERTIFICATE: &[u8] = b"certificate bytes";
const TBS_CERTIFICATE: &[u8] = b"tbs certificate bytes";
const LOG_KEY: &[u8] = b"log public key";

fn decode(b64: &str) -> Vec<u8> {
    base64::engine::general_purpose::STANDARD
        .decode(b64.trim())
        .expect("failed to decode fixture")
}

/// v1 SCT with a repeated-byte log id, zero timestamp and a 64-byte signature
fn record(log_byte: u8) -> SctRecord {
    SctRecord {
        version: SCT_VERSION_V1,
        log_id: LogId::from_bytes([log_byte; 32]),
        timestamp: 0,
        extensions: Vec::new(),
        signature: DigitallySigned {
            hash_algorithm: 4,
            signature_algorithm: 3,
            signature: vec![b'B'; 64],
        },
    }
}

/// Certificate source returning fixed bytes for any certificate
#[derive(Default)]
struct FixedSource {
    sct_list: Option<Vec<u8>>,
    issuer_key_hash: Option<[u8; 32]>,
    broken: bool,
}

impl FixedSource {
    fn with_records(records: &[SctRecord]) -> Self {
        Self {
            sct_list: Some(encode_sct_list(records).unwrap()),
            ..Default::default()
        }
    }

    fn with_list(bytes: &[u8]) -> Self {
        Self {
            sct_list: Some(bytes.to_vec()),
            ..Default::default()
        }
    }
}

impl CertificateSource for FixedSource {
    fn sct_list(&self, _certificate_der: &[u8]) -> Result<Option<Vec<u8>>> {
        if self.broken {
            return Err(Error::Extraction("certificate parser crashed".to_string()));
        }
        Ok(self.sct_list.clone())
    }

    fn tbs_certificate(&self, _certificate_der: &[u8]) -> Result<Vec<u8>> {
        Ok(TBS_CERTIFICATE.to_vec())
    }

    fn issuer_key_hash(&self, _certificate_der: &[u8]) -> Result<Option<[u8; 32]>> {
        Ok(self.issuer_key_hash)
    }
}

fn any_key(_log_id: &LogId) -> Result<Option<Vec<u8>>> {
    Ok(Some(LOG_KEY.to_vec()))
}

fn no_key(_log_id: &LogId) -> Result<Option<Vec<u8>>> {
    Ok(None)
}

fn unreachable_keys(_log_id: &LogId) -> Result<Option<Vec<u8>>> {
    Err(Error::KeyLookup("key service unreachable".to_string()))
}

fn key_only_for_a(log_id: &LogId) -> Result<Option<Vec<u8>>> {
    Ok((log_id.as_bytes()[0] == b'A').then(|| LOG_KEY.to_vec()))
}

fn accept(_data: &[u8], _sig: &[u8], _key: &[u8], _hash: u8, _alg: u8) -> Result<bool> {
    Ok(true)
}

fn reject(_data: &[u8], _sig: &[u8], _key: &[u8], _hash: u8, _alg: u8) -> Result<bool> {
    Ok(false)
}

fn broken_verifier(_data: &[u8], _sig: &[u8], _key: &[u8], _hash: u8, _alg: u8) -> Result<bool> {
    Err(Error::Verifier("hardware token removed".to_string()))
}

// ==== validate_sct ====

#[test]
fn test_validate_sct_returns_verifier_verdict() {
    let sct = record(b'A');

    let validator = SctValidator::new(any_key, accept, FixedSource::default());
    assert!(validator.validate_sct(&sct, CERTIFICATE, TBS_CERTIFICATE));

    let validator = SctValidator::new(any_key, reject, FixedSource::default());
    assert!(!validator.validate_sct(&sct, CERTIFICATE, TBS_CERTIFICATE));
}

#[test]
fn test_validate_sct_passes_x509_entry_to_verifier() {
    let calls = Mutex::new(Vec::new());
    let verifier = |data: &[u8], sig: &[u8], key: &[u8], hash: u8, alg: u8| -> Result<bool> {
        calls
            .lock()
            .unwrap()
            .push((data.to_vec(), sig.to_vec(), key.to_vec(), hash, alg));
        Ok(true)
    };

    let sct = record(b'A');
    let validator = SctValidator::new(any_key, verifier, FixedSource::default());
    assert!(validator.validate_sct(&sct, CERTIFICATE, TBS_CERTIFICATE));

    let calls = calls.into_inner().unwrap();
    assert_eq!(calls.len(), 1);
    let (data, sig, key, hash, alg) = &calls[0];
    let expected = signed_payload(
        &sct,
        &LogEntry::X509 {
            certificate: CERTIFICATE,
        },
    )
    .unwrap();
    assert_eq!(data, &expected);
    assert_eq!(&data[10..12], &[0, 0]);
    assert_eq!(sig, &vec![b'B'; 64]);
    assert_eq!(key, LOG_KEY);
    assert_eq!((*hash, *alg), (4, 3));
}

#[test]
fn test_validate_sct_x509_entry_ignores_tbs_certificate() {
    let payloads = Mutex::new(Vec::new());
    let verifier = |data: &[u8], _sig: &[u8], _key: &[u8], _hash: u8, _alg: u8| -> Result<bool> {
        payloads.lock().unwrap().push(data.to_vec());
        Ok(true)
    };

    let sct = record(b'A');
    let validator = SctValidator::new(any_key, verifier, FixedSource::default());
    assert!(validator.validate_sct(&sct, CERTIFICATE, TBS_CERTIFICATE));
    assert!(validator.validate_sct(&sct, CERTIFICATE, b"some other tbs"));
    assert!(validator.validate_sct(&sct, CERTIFICATE, &[]));

    let payloads = payloads.into_inner().unwrap();
    assert_eq!(payloads.len(), 3);
    assert!(payloads.iter().all(|payload| payload == &payloads[0]));
}

#[test]
fn test_validate_sct_uses_precert_entry_when_issuer_known() {
    let calls = Mutex::new(Vec::new());
    let verifier = |data: &[u8], _sig: &[u8], _key: &[u8], _hash: u8, _alg: u8| -> Result<bool> {
        calls.lock().unwrap().push(data.to_vec());
        Ok(true)
    };

    let source = FixedSource {
        issuer_key_hash: Some([0x5a; 32]),
        ..Default::default()
    };
    let validator = SctValidator::new(any_key, verifier, source);
    assert!(validator.validate_sct(&record(b'A'), CERTIFICATE, TBS_CERTIFICATE));

    let calls = calls.into_inner().unwrap();
    let data = &calls[0];
    assert_eq!(&data[10..12], &[0, 1]);
    assert_eq!(&data[12..44], &[0x5a; 32]);
    assert_eq!(&data[44..47], &[0, 0, TBS_CERTIFICATE.len() as u8]);
    assert_eq!(&data[47..47 + TBS_CERTIFICATE.len()], TBS_CERTIFICATE);
}

#[test]
fn test_validate_sct_fails_closed() {
    let sct = record(b'A');

    let validator = SctValidator::new(no_key, accept, FixedSource::default());
    assert!(!validator.validate_sct(&sct, CERTIFICATE, TBS_CERTIFICATE));

    let validator = SctValidator::new(unreachable_keys, accept, FixedSource::default());
    assert!(!validator.validate_sct(&sct, CERTIFICATE, TBS_CERTIFICATE));

    let validator = SctValidator::new(any_key, broken_verifier, FixedSource::default());
    assert!(!validator.validate_sct(&sct, CERTIFICATE, TBS_CERTIFICATE));
}

#[test]
fn test_verify_sct_reports_failure_kind() {
    let sct = record(b'A');
    let entry = LogEntry::X509 {
        certificate: CERTIFICATE,
    };

    let err = SctValidator::new(no_key, accept, FixedSource::default())
        .verify_sct(&sct, &entry)
        .unwrap_err();
    assert!(matches!(err, Error::UnknownLog(id) if id == sct.log_id));

    let err = SctValidator::new(any_key, reject, FixedSource::default())
        .verify_sct(&sct, &entry)
        .unwrap_err();
    assert!(matches!(err, Error::SignatureMismatch(_)));

    let err = SctValidator::new(unreachable_keys, accept, FixedSource::default())
        .verify_sct(&sct, &entry)
        .unwrap_err();
    assert!(matches!(err, Error::KeyLookup(_)));

    let err = SctValidator::new(any_key, broken_verifier, FixedSource::default())
        .verify_sct(&sct, &entry)
        .unwrap_err();
    assert!(matches!(err, Error::Verifier(_)));
}

// ==== validate_certificate ====

#[test]
fn test_certificate_without_sct_extension_is_invalid() {
    let validator = SctValidator::new(any_key, accept, FixedSource::default());
    assert!(!validator.validate_certificate(CERTIFICATE).unwrap());
    assert!(matches!(
        validator.validate_certificate_detailed(CERTIFICATE),
        Err(Error::MissingSctExtension)
    ));
}

#[test]
fn test_extraction_failure_is_invalid() {
    let source = FixedSource {
        broken: true,
        ..Default::default()
    };
    let validator = SctValidator::new(any_key, accept, source);
    assert!(!validator.validate_certificate(CERTIFICATE).unwrap());
}

#[test]
fn test_empty_sct_list_is_invalid() {
    for policy in [ValidationPolicy::default(), ValidationPolicy::at_least(0)] {
        let validator = SctValidator::new(any_key, accept, FixedSource::with_list(&[0, 0]))
            .with_policy(policy);
        assert!(!validator.validate_certificate(CERTIFICATE).unwrap());
        assert!(matches!(
            validator.validate_certificate_detailed(CERTIFICATE),
            Err(Error::EmptySctList)
        ));
    }
}

#[test]
fn test_malformed_sct_list_is_an_error() {
    let validator = SctValidator::new(any_key, accept, FixedSource::with_list(&[0, 5, 0]));
    let err = validator.validate_certificate(CERTIFICATE).unwrap_err();
    assert!(err.is_invalid_sct_data(), "unexpected error {:?}", err);
}

#[test]
fn test_certificate_valid_when_every_sct_verifies() {
    let source = FixedSource::with_records(&[record(b'A'), record(b'B')]);
    let validator = SctValidator::new(any_key, accept, source);
    assert!(validator.validate_certificate(CERTIFICATE).unwrap());

    let source = FixedSource::with_records(&[record(b'A'), record(b'B')]);
    let validator = SctValidator::new(any_key, reject, source);
    assert!(!validator.validate_certificate(CERTIFICATE).unwrap());
}

#[test]
fn test_one_unknown_log_fails_default_policy() {
    let source = FixedSource::with_records(&[record(b'A'), record(b'B')]);
    let validator = SctValidator::new(key_only_for_a, accept, source);
    assert!(!validator.validate_certificate(CERTIFICATE).unwrap());

    let report = validator.validate_certificate_detailed(CERTIFICATE).unwrap();
    assert_eq!(report.total(), 2);
    assert_eq!(report.valid_count, 1);
    assert!(!report.valid);
    assert_eq!(report.scts[0].outcome, SctOutcome::Valid);

    let failures: Vec<_> = report.failures().collect();
    assert_eq!(failures.len(), 1);
    assert_eq!(failures[0].log_id, LogId::from_bytes([b'B'; 32]));
    match &failures[0].outcome {
        SctOutcome::Invalid { reason } => assert!(reason.contains("unknown CT log"), "{}", reason),
        SctOutcome::Valid => panic!("expected an invalid outcome"),
    }
}

#[test]
fn test_at_least_policy_tolerates_invalid_sct() {
    let source = FixedSource::with_records(&[record(b'A'), record(b'B')]);
    let validator = SctValidator::new(key_only_for_a, accept, source)
        .with_policy(ValidationPolicy::at_least(1));
    assert!(validator.validate_certificate(CERTIFICATE).unwrap());

    let source = FixedSource::with_records(&[record(b'A'), record(b'B')]);
    let validator = SctValidator::new(key_only_for_a, accept, source)
        .with_policy(ValidationPolicy::at_least(2));
    assert!(!validator.validate_certificate(CERTIFICATE).unwrap());
}

#[test]
fn test_report_serializes_to_json() {
    let source = FixedSource::with_records(&[record(b'A'), record(b'B')]);
    let validator = SctValidator::new(key_only_for_a, accept, source);
    let report = validator.validate_certificate_detailed(CERTIFICATE).unwrap();

    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["validCount"], 1);
    assert_eq!(json["valid"], false);
    assert_eq!(json["scts"][0]["outcome"]["status"], "valid");
    assert_eq!(json["scts"][1]["outcome"]["status"], "invalid");
    assert_eq!(json["scts"][0]["timestamp"], 0);
}

#[test]
fn test_validator_is_send_and_sync() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<SctValidator<Keyring, sct_verify::AwsLcVerifier, X509CertificateSource>>();
}

// ==== Real certificates ====

fn fulcio_validator() -> SctValidator<Keyring, sct_verify::AwsLcVerifier, X509CertificateSource> {
    let mut keyring = Keyring::new();
    keyring.add_spki(&decode(CTFE_2022_KEY));
    let source = X509CertificateSource::with_issuer_certificate(&decode(INTERMEDIATE_CERT)).unwrap();
    SctValidator::from_keyring(keyring, source)
}

#[test]
fn test_fulcio_certificate_validates() {
    let validator = fulcio_validator();
    let leaf = decode(LEAF_CERT);
    assert!(validator.validate_certificate(&leaf).unwrap());

    let report = validator.validate_certificate_detailed(&leaf).unwrap();
    assert_eq!(report.valid_count, 1);
    assert_eq!(report.scts[0].timestamp, 1_689_177_395_979);
    assert_eq!(
        report.scts[0].log_id,
        LogId::from_base64("3T0wasbHETJjGR4cmWc3AqJKXrjePK3/h4pygC8p7o4=").unwrap()
    );
}

#[test]
fn test_fulcio_sct_validates_directly() {
    let validator = fulcio_validator();
    let leaf = decode(LEAF_CERT);
    let scts = decode_sct_list(&sct_list_from_certificate(&leaf).unwrap().unwrap()).unwrap();
    let tbs = precert_tbs_from_certificate(&leaf).unwrap();

    assert!(validator.validate_sct(&scts[0], &leaf, &tbs));
}

#[test]
fn test_fulcio_sct_with_flipped_signature_byte_fails() {
    let validator = fulcio_validator();
    let leaf = decode(LEAF_CERT);
    let mut scts = decode_sct_list(&sct_list_from_certificate(&leaf).unwrap().unwrap()).unwrap();
    let tbs = precert_tbs_from_certificate(&leaf).unwrap();

    let last = scts[0].signature.signature.len() - 1;
    scts[0].signature.signature[last] ^= 0x01;
    assert!(!validator.validate_sct(&scts[0], &leaf, &tbs));
}

#[test]
fn test_fulcio_sct_with_altered_timestamp_fails() {
    let validator = fulcio_validator();
    let leaf = decode(LEAF_CERT);
    let mut scts = decode_sct_list(&sct_list_from_certificate(&leaf).unwrap().unwrap()).unwrap();
    let tbs = precert_tbs_from_certificate(&leaf).unwrap();

    scts[0].timestamp += 1;
    assert!(!validator.validate_sct(&scts[0], &leaf, &tbs));
}

#[test]
fn test_fulcio_certificate_needs_the_right_issuer() {
    let leaf = decode(LEAF_CERT);

    let mut keyring = Keyring::new();
    keyring.add_spki(&decode(CTFE_2022_KEY));
    let validator = SctValidator::from_keyring(keyring.clone(), X509CertificateSource::new());
    assert!(!validator.validate_certificate(&leaf).unwrap());

    let wrong_issuer = X509CertificateSource::with_issuer_certificate(&leaf).unwrap();
    let validator = SctValidator::from_keyring(keyring, wrong_issuer);
    assert!(!validator.validate_certificate(&leaf).unwrap());
}

#[test]
fn test_fulcio_certificate_with_unknown_log_fails() {
    let source = X509CertificateSource::with_issuer_certificate(&decode(INTERMEDIATE_CERT)).unwrap();
    let validator = SctValidator::from_keyring(Keyring::new(), source);
    let leaf = decode(LEAF_CERT);

    assert!(!validator.validate_certificate(&leaf).unwrap());
    let report = validator.validate_certificate_detailed(&leaf).unwrap();
    assert!(!report.scts[0].outcome.is_valid());
}

#[test]
fn test_issuer_certificate_has_no_scts() {
    let validator = fulcio_validator();
    assert!(!validator
        .validate_certificate(&decode(INTERMEDIATE_CERT))
        .unwrap());
}

#[test]
fn test_garbage_certificate_is_invalid_not_an_error() {
    let validator = fulcio_validator();
    assert!(!validator.validate_certificate(b"not a certificate").unwrap());
}

// ==== Freshly signed SCTs ====

#[test]
fn test_generated_log_key_signs_x509_entry() {
    let rng = SystemRandom::new();
    let pkcs8 = EcdsaKeyPair::generate_pkcs8(&ECDSA_P256_SHA256_ASN1_SIGNING, &rng).unwrap();
    let key_pair =
        EcdsaKeyPair::from_pkcs8(&ECDSA_P256_SHA256_ASN1_SIGNING, pkcs8.as_ref()).unwrap();

    let mut keyring = Keyring::new();
    let log_id = keyring.add_spki(key_pair.public_key().as_ref());

    let mut sct = SctRecord {
        log_id,
        timestamp: 1_700_000_000_000,
        extensions: b"log extension".to_vec(),
        ..record(0)
    };
    let payload = signed_payload(
        &sct,
        &LogEntry::X509 {
            certificate: CERTIFICATE,
        },
    )
    .unwrap();
    sct.signature.signature = key_pair.sign(&rng, &payload).unwrap().as_ref().to_vec();

    let validator = SctValidator::from_keyring(keyring, X509CertificateSource::new());
    assert!(validator.validate_sct(&sct, CERTIFICATE, TBS_CERTIFICATE));

    // Different certificate bytes, same SCT
    assert!(!validator.validate_sct(&sct, b"another certificate", TBS_CERTIFICATE));

    // Extensions are covered by the signature
    sct.extensions.clear();
    assert!(!validator.validate_sct(&sct, CERTIFICATE, TBS_CERTIFICATE));
}
