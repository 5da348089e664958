//! Signed Certificate Timestamp validation
//!
//! This is the main entry point for checking the SCTs a certificate carries.
//! It decodes the SCT-list extension, rebuilds the data each log signed and
//! verifies the log signatures through pluggable key lookup, signature
//! verification and certificate parsing.
//!
//! # Example
//!
//! ```no_run
//! use sct_verify::crypto::Keyring;
//! use sct_verify::{SctValidator, X509CertificateSource};
//!
//! # fn example(leaf_der: &[u8], issuer_der: &[u8], log_key_der: &[u8]) -> sct_verify::Result<()> {
//! let mut keyring = Keyring::new();
//! keyring.add_spki(log_key_der);
//!
//! let source = X509CertificateSource::with_issuer_certificate(issuer_der)?;
//! let validator = SctValidator::from_keyring(keyring, source);
//! assert!(validator.validate_certificate(leaf_der)?);
//! # Ok(())
//! # }
//! ```

pub mod collaborators;
pub mod error;
pub mod payload;
pub mod policy;
pub mod report;
pub mod validator;
pub mod x509;

// Re-export core crates
pub use sct_crypto as crypto;
pub use sct_types as types;

pub use collaborators::{AwsLcVerifier, CertificateSource, LogKeyLookup, SignatureVerifier};
pub use error::{Error, Result};
pub use payload::{signed_payload, LogEntry};
pub use policy::ValidationPolicy;
pub use report::{CertificateReport, SctOutcome, SctReport};
pub use sct_types::{decode_sct_list, SctList, SctRecord};
pub use validator::SctValidator;
pub use x509::X509CertificateSource;
