//! Tunable thresholds for key strength validation.

use serde::{Deserialize, Serialize};

/// Length bands and entropy cutoffs used by the validator.
///
/// The defaults are heuristics, not a cryptographic certification.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationPolicy {
    /// Keys shorter than this many bytes are rejected.
    pub min_key_bytes: usize,

    /// Keys at or above this length may rate `medium` (below it: `weak`).
    pub medium_key_bytes: usize,

    /// Target key length. Entropy is only analysed at or above it.
    pub recommended_key_bytes: usize,

    /// Normalized entropy strictly above this rates `strong`.
    pub strong_entropy: f64,

    /// Normalized entropy at or below this is rejected.
    pub min_entropy: f64,
}

impl Default for ValidationPolicy {
    fn default() -> Self {
        Self {
            min_key_bytes: 16,
            medium_key_bytes: 24,
            recommended_key_bytes: 32,
            strong_entropy: 0.9,
            min_entropy: 0.7,
        }
    }
}
