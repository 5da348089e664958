//! Per-SCT validation results

use sct_types::LogId;
use serde::{Deserialize, Serialize};

/// Outcome of checking a single SCT
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum SctOutcome {
    /// The log's signature verified
    Valid,
    /// The SCT did not validate
    Invalid {
        /// Why validation failed
        reason: String,
    },
}

impl SctOutcome {
    /// Whether the SCT validated
    pub fn is_valid(&self) -> bool {
        matches!(self, SctOutcome::Valid)
    }
}

/// Result for one SCT of a certificate
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SctReport {
    /// Log that issued the SCT
    pub log_id: LogId,
    /// SCT timestamp, milliseconds since the Unix epoch
    pub timestamp: u64,
    /// Whether it validated
    pub outcome: SctOutcome,
}

/// Result of validating all SCTs of a certificate
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CertificateReport {
    /// One entry per SCT, in list order
    pub scts: Vec<SctReport>,
    /// Number of SCTs that validated
    pub valid_count: usize,
    /// Whether the validation policy was satisfied
    pub valid: bool,
}

impl CertificateReport {
    /// Number of SCTs checked
    pub fn total(&self) -> usize {
        self.scts.len()
    }

    /// SCTs that failed, with their reasons
    pub fn failures(&self) -> impl Iterator<Item = &SctReport> {
        self.scts.iter().filter(|sct| !sct.outcome.is_valid())
    }
}
