//! Strength validation for externally supplied hex keys.
//!
//! Validation never fails: every finding is reported in the returned
//! [`KeyValidationResult`] so diagnostic tooling can inspect a candidate key
//! without adopting it. The stages run in a fixed order and all of them run
//! (except on empty input) so the caller sees every problem at once:
//!
//! 1. emptiness
//! 2. hex alphabet
//! 3. parity (whole bytes)
//! 4. length bands
//! 5. entropy, for keys of the recommended length or longer
//! 6. weak patterns, which can only downgrade a rating

use crate::entropy::normalized_hex_entropy;
use crate::patterns::{PatternKind, detect_weak_patterns};
use crate::policy::ValidationPolicy;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

/// Qualitative strength rating. Ordered `Weak < Medium < Strong`.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum KeyStrength {
    #[default]
    Weak,
    Medium,
    Strong,
}

impl fmt::Display for KeyStrength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            KeyStrength::Weak => "weak",
            KeyStrength::Medium => "medium",
            KeyStrength::Strong => "strong",
        })
    }
}

/// A finding that disqualifies the key.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, thiserror::Error)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ValidationError {
    #[error("key is empty")]
    Empty,

    #[error("key contains {count} non-hex character(s), first at position {position}")]
    InvalidCharacters { position: usize, count: usize },

    #[error("hex length {length} is odd; a key must encode whole bytes")]
    OddLength { length: usize },

    #[error("key is {actual} bytes; the minimum is {minimum} bytes")]
    TooShort { actual: usize, minimum: usize },

    #[error("entropy too low ({score:.2}), regeneration required")]
    LowEntropy { score: f64 },
}

/// A finding that leaves the key usable but worth attention.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ValidationWarning {
    ShortKey { bits: usize, recommended_bits: usize },
    LongerThanNecessary { actual: usize, recommended: usize },
    ModerateEntropy { score: f64 },
    WeakPattern { pattern: PatternKind },
}

impl fmt::Display for ValidationWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationWarning::ShortKey {
                bits,
                recommended_bits,
            } => write!(f, "{bits}-bit key, recommend {recommended_bits}-bit"),
            ValidationWarning::LongerThanNecessary {
                actual,
                recommended,
            } => write!(
                f,
                "key is {actual} bytes, longer than necessary ({recommended} bytes)"
            ),
            ValidationWarning::ModerateEntropy { score } => write!(
                f,
                "moderate entropy ({score:.2}), regenerating the key is recommended"
            ),
            ValidationWarning::WeakPattern { pattern } => {
                write!(f, "weak pattern detected: {pattern}")
            }
        }
    }
}

/// Verdict for one candidate key. Produced fresh per call.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct KeyValidationResult {
    /// True iff `errors` is empty.
    pub is_valid: bool,
    pub errors: Vec<ValidationError>,
    pub warnings: Vec<ValidationWarning>,
    /// Byte length implied by the input.
    pub key_length: usize,
    pub key_strength: KeyStrength,
    /// Normalized entropy, when the key was long enough to analyse.
    pub entropy: Option<f64>,
}

impl KeyValidationResult {
    /// Error messages joined with `"; "`.
    pub fn error_summary(&self) -> String {
        join(&self.errors)
    }

    /// Warning messages joined with `"; "`.
    pub fn warning_summary(&self) -> String {
        join(&self.warnings)
    }

    /// True if any warning came from pattern detection.
    pub fn has_pattern_warning(&self) -> bool {
        self.warnings
            .iter()
            .any(|w| matches!(w, ValidationWarning::WeakPattern { .. }))
    }
}

fn join<T: fmt::Display>(items: &[T]) -> String {
    items
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Validates candidate hex keys against a [`ValidationPolicy`].
#[derive(Clone, Debug, Default)]
pub struct KeyValidator {
    policy: ValidationPolicy,
}

impl KeyValidator {
    pub fn new(policy: ValidationPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> &ValidationPolicy {
        &self.policy
    }

    /// Runs the full validation pipeline over `hex`.
    pub fn validate_hex_key(&self, hex: &str) -> KeyValidationResult {
        if hex.is_empty() {
            return KeyValidationResult {
                is_valid: false,
                errors: vec![ValidationError::Empty],
                warnings: Vec::new(),
                key_length: 0,
                key_strength: KeyStrength::Weak,
                entropy: None,
            };
        }

        let policy = &self.policy;
        let mut errors = well_formedness_errors(hex);
        let mut warnings = Vec::new();

        let key_length = hex.chars().count() / 2;
        let mut strength = if key_length < policy.medium_key_bytes {
            KeyStrength::Weak
        } else {
            KeyStrength::Medium
        };

        if key_length < policy.min_key_bytes {
            errors.push(ValidationError::TooShort {
                actual: key_length,
                minimum: policy.min_key_bytes,
            });
        } else if key_length < policy.medium_key_bytes {
            warnings.push(ValidationWarning::ShortKey {
                bits: policy.min_key_bytes * 8,
                recommended_bits: policy.recommended_key_bytes * 8,
            });
        } else if key_length < policy.recommended_key_bytes {
            warnings.push(ValidationWarning::ShortKey {
                bits: policy.medium_key_bytes * 8,
                recommended_bits: policy.recommended_key_bytes * 8,
            });
        } else if key_length > policy.recommended_key_bytes {
            warnings.push(ValidationWarning::LongerThanNecessary {
                actual: key_length,
                recommended: policy.recommended_key_bytes,
            });
        }

        let mut entropy = None;
        if key_length >= policy.recommended_key_bytes {
            let score = normalized_hex_entropy(hex);
            entropy = Some(score);
            if score > policy.strong_entropy {
                strength = KeyStrength::Strong;
            } else if score > policy.min_entropy {
                strength = KeyStrength::Medium;
                warnings.push(ValidationWarning::ModerateEntropy { score });
            } else {
                strength = KeyStrength::Weak;
                errors.push(ValidationError::LowEntropy { score });
            }
        }

        let patterns = detect_weak_patterns(hex);
        if !patterns.is_empty() && strength == KeyStrength::Strong {
            strength = KeyStrength::Medium;
        }
        warnings.extend(
            patterns
                .into_iter()
                .map(|pattern| ValidationWarning::WeakPattern { pattern }),
        );

        debug!(
            "validated candidate key: {key_length} bytes, strength {strength}, {} error(s), {} warning(s)",
            errors.len(),
            warnings.len()
        );

        KeyValidationResult {
            is_valid: errors.is_empty(),
            errors,
            warnings,
            key_length,
            key_strength: strength,
            entropy,
        }
    }
}

/// Validates `hex` with the default policy.
pub fn validate_hex_key(hex: &str) -> KeyValidationResult {
    KeyValidator::default().validate_hex_key(hex)
}

/// Alphabet and parity findings only; the checks a hex decoder depends on.
pub(crate) fn well_formedness_errors(hex: &str) -> Vec<ValidationError> {
    if hex.is_empty() {
        return vec![ValidationError::Empty];
    }

    let mut errors = Vec::new();
    let mut invalid = hex
        .chars()
        .enumerate()
        .filter(|(_, c)| !c.is_ascii_hexdigit());
    if let Some((position, _)) = invalid.next() {
        errors.push(ValidationError::InvalidCharacters {
            position,
            count: 1 + invalid.count(),
        });
    }

    let length = hex.chars().count();
    if length % 2 != 0 {
        errors.push(ValidationError::OddLength { length });
    }
    errors
}
