//! How many SCTs must validate for a certificate to pass

use serde::{Deserialize, Serialize};

/// Policy applied to the per-SCT results of a certificate
///
/// The default is all-or-nothing: every SCT in the certificate must
/// validate. A certificate with no SCTs never passes, whatever the policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationPolicy {
    /// Every decoded SCT must validate
    pub require_all: bool,
    /// At least this many SCTs must validate (values below one act as one)
    pub min_valid_scts: usize,
}

impl Default for ValidationPolicy {
    fn default() -> Self {
        Self {
            require_all: true,
            min_valid_scts: 1,
        }
    }
}

impl ValidationPolicy {
    /// Require every SCT to validate
    pub fn require_all() -> Self {
        Self::default()
    }

    /// Require at least `n` valid SCTs, tolerating invalid ones
    pub fn at_least(n: usize) -> Self {
        Self {
            require_all: false,
            min_valid_scts: n,
        }
    }

    /// Set the minimum number of valid SCTs
    pub fn with_min_valid_scts(mut self, n: usize) -> Self {
        self.min_valid_scts = n;
        self
    }

    /// Whether `valid` passing SCTs out of `total` satisfy this policy
    pub fn is_satisfied(&self, valid: usize, total: usize) -> bool {
        if total == 0 {
            return false;
        }
        if self.require_all && valid != total {
            return false;
        }
        valid >= self.min_valid_scts.max(1)
    }
}
