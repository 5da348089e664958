//! Cryptographic primitives for SCT verification
//!
//! This crate provides hashing, signature verification, a keyring of CT log
//! keys, and the X.509 helpers needed to rebuild precertificate entries,
//! using aws-lc-rs and x509-cert as backends.

pub mod error;
pub mod hash;
pub mod keyring;
pub mod verification;
pub mod x509;

pub use error::{Error, Result};
pub use hash::sha256;
pub use keyring::{log_id_for_key, Keyring};
pub use verification::{verify_signature, SigningScheme, VerificationKey};
pub use x509::{
    der_from_pem, issuer_key_hash, parse_certificate, precert_tbs, precert_tbs_from_certificate,
    sct_list_from_certificate, sct_list_octets, spki_from_certificate,
};
