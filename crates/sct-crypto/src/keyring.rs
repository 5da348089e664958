//! Keyring of CT log public keys
//!
//! Holds the public keys of trusted CT logs indexed by their [`LogId`], the
//! SHA-256 hash of the DER-encoded SubjectPublicKeyInfo.

use crate::hash::sha256;
use sct_types::LogId;
use std::collections::HashMap;

/// An in-memory set of CT log keys
#[derive(Debug, Clone, Default)]
pub struct Keyring {
    /// DER public keys indexed by log ID
    keys: HashMap<LogId, Vec<u8>>,
}

impl Keyring {
    /// Create a new empty keyring
    pub fn new() -> Self {
        Self {
            keys: HashMap::new(),
        }
    }

    /// Add a key under an explicit log ID
    pub fn add_key(&mut self, log_id: LogId, public_key: Vec<u8>) {
        self.keys.insert(log_id, public_key);
    }

    /// Add a DER SubjectPublicKeyInfo, deriving its log ID
    pub fn add_spki(&mut self, spki_der: &[u8]) -> LogId {
        let log_id = log_id_for_key(spki_der);
        self.keys.insert(log_id, spki_der.to_vec());
        log_id
    }

    /// Get a key by log ID
    pub fn get_key(&self, log_id: &LogId) -> Option<&[u8]> {
        self.keys.get(log_id).map(Vec::as_slice)
    }

    /// Get the number of keys in the keyring
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// Check if the keyring is empty
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

/// Compute the RFC 6962 log ID of a DER-encoded public key
pub fn log_id_for_key(spki_der: &[u8]) -> LogId {
    LogId::from_bytes(sha256(spki_der))
}
