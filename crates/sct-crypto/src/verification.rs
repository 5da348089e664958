//! Signature verification using aws-lc-rs
//!
//! CT logs sign SCTs with a TLS `DigitallySigned` structure, which names the
//! hash and signature algorithms by their TLS registry codes. The mapping from
//! those code pairs to an aws-lc-rs verification algorithm lives here.

use crate::error::{Error, Result};
use aws_lc_rs::signature::{
    UnparsedPublicKey, VerificationAlgorithm, ECDSA_P256_SHA256_ASN1, ECDSA_P384_SHA384_ASN1,
    ED25519, RSA_PKCS1_2048_8192_SHA256, RSA_PKCS1_2048_8192_SHA384, RSA_PKCS1_2048_8192_SHA512,
};
use sct_types::{HashAlgorithm, SignatureAlgorithm};

/// Signature schemes a CT log may use for SCTs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SigningScheme {
    /// ECDSA P-256 with SHA-256
    EcdsaP256Sha256,
    /// ECDSA P-384 with SHA-384
    EcdsaP384Sha384,
    /// Ed25519
    Ed25519,
    /// RSA PKCS#1 v1.5 with SHA-256
    RsaPkcs1Sha256,
    /// RSA PKCS#1 v1.5 with SHA-384
    RsaPkcs1Sha384,
    /// RSA PKCS#1 v1.5 with SHA-512
    RsaPkcs1Sha512,
}

impl SigningScheme {
    /// Map a TLS `SignatureAndHashAlgorithm` pair to a scheme
    pub fn from_algorithms(hash: HashAlgorithm, signature: SignatureAlgorithm) -> Result<Self> {
        match (hash, signature) {
            (HashAlgorithm::Sha256, SignatureAlgorithm::Ecdsa) => Ok(SigningScheme::EcdsaP256Sha256),
            (HashAlgorithm::Sha384, SignatureAlgorithm::Ecdsa) => Ok(SigningScheme::EcdsaP384Sha384),
            (HashAlgorithm::Sha256, SignatureAlgorithm::Rsa) => Ok(SigningScheme::RsaPkcs1Sha256),
            (HashAlgorithm::Sha384, SignatureAlgorithm::Rsa) => Ok(SigningScheme::RsaPkcs1Sha384),
            (HashAlgorithm::Sha512, SignatureAlgorithm::Rsa) => Ok(SigningScheme::RsaPkcs1Sha512),
            // RFC 8422: Ed25519 is signalled with the "none" hash (intrinsic)
            (HashAlgorithm::None, SignatureAlgorithm::Ed25519) => Ok(SigningScheme::Ed25519),
            (hash, signature) => Err(Error::UnsupportedAlgorithm(format!(
                "unsupported SCT signature algorithm: {}/{}",
                hash, signature
            ))),
        }
    }

    /// Map raw TLS codes (as carried in an SCT) to a scheme
    pub fn from_tls_codes(hash: u8, signature: u8) -> Result<Self> {
        let hash = HashAlgorithm::try_from(hash)
            .map_err(|e| Error::UnsupportedAlgorithm(e.to_string()))?;
        let signature = SignatureAlgorithm::try_from(signature)
            .map_err(|e| Error::UnsupportedAlgorithm(e.to_string()))?;
        Self::from_algorithms(hash, signature)
    }

    /// Get the name of this scheme
    pub fn name(&self) -> &'static str {
        match self {
            SigningScheme::EcdsaP256Sha256 => "ECDSA_P256_SHA256",
            SigningScheme::EcdsaP384Sha384 => "ECDSA_P384_SHA384",
            SigningScheme::Ed25519 => "ED25519",
            SigningScheme::RsaPkcs1Sha256 => "RSA_PKCS1_SHA256",
            SigningScheme::RsaPkcs1Sha384 => "RSA_PKCS1_SHA384",
            SigningScheme::RsaPkcs1Sha512 => "RSA_PKCS1_SHA512",
        }
    }

    fn algorithm(&self) -> &'static dyn VerificationAlgorithm {
        match self {
            SigningScheme::EcdsaP256Sha256 => &ECDSA_P256_SHA256_ASN1,
            SigningScheme::EcdsaP384Sha384 => &ECDSA_P384_SHA384_ASN1,
            SigningScheme::Ed25519 => &ED25519,
            SigningScheme::RsaPkcs1Sha256 => &RSA_PKCS1_2048_8192_SHA256,
            SigningScheme::RsaPkcs1Sha384 => &RSA_PKCS1_2048_8192_SHA384,
            SigningScheme::RsaPkcs1Sha512 => &RSA_PKCS1_2048_8192_SHA512,
        }
    }
}

impl std::fmt::Display for SigningScheme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// A public key for verification
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerificationKey {
    /// Public key bytes (DER SubjectPublicKeyInfo or raw key)
    pub bytes: Vec<u8>,
    /// The scheme to use for verification
    pub scheme: SigningScheme,
}

impl VerificationKey {
    /// Create a new verification key
    pub fn new(bytes: Vec<u8>, scheme: SigningScheme) -> Self {
        Self { bytes, scheme }
    }

    /// Verify a signature over data
    pub fn verify(&self, data: &[u8], signature: &[u8]) -> Result<()> {
        let key = UnparsedPublicKey::new(self.scheme.algorithm(), &self.bytes);
        key.verify(data, signature)
            .map_err(|_| Error::Verification(format!("{} signature invalid", self.scheme)))
    }
}

/// Verify a signature using the specified scheme
pub fn verify_signature(
    public_key: &[u8],
    data: &[u8],
    signature: &[u8],
    scheme: SigningScheme,
) -> Result<()> {
    VerificationKey::new(public_key.to_vec(), scheme).verify(data, signature)
}
