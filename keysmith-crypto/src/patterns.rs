//! Weak-pattern detection for hex key strings.

use serde::{Deserialize, Serialize};
use std::fmt;

const ASCENDING: &str = "0123456789abcdef";
const DESCENDING: &str = "fedcba9876543210";
const UNIFORM_RUN: usize = 8;

/// A recognizable structure that makes key material guessable.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PatternKind {
    /// A 2-character group repeated 4+ times back to back.
    RepeatedPair,
    /// A 4-character group repeated 3+ times back to back.
    RepeatedQuad,
    /// 8+ consecutive `0` or `f` characters.
    UniformRun,
    /// The literal `0123456789abcdef`.
    AscendingSequence,
    /// The literal `fedcba9876543210`.
    DescendingSequence,
}

impl fmt::Display for PatternKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            PatternKind::RepeatedPair => "repeated 2-character group",
            PatternKind::RepeatedQuad => "repeated 4-character group",
            PatternKind::UniformRun => "run of identical 0 or f characters",
            PatternKind::AscendingSequence => "ascending hex sequence",
            PatternKind::DescendingSequence => "descending hex sequence",
        };
        f.write_str(text)
    }
}

/// Returns every pattern kind found in `input`, in declaration order.
pub fn detect_weak_patterns(input: &str) -> Vec<PatternKind> {
    let lowered: Vec<char> = input.chars().map(|c| c.to_ascii_lowercase()).collect();
    let text: String = lowered.iter().collect();

    let mut found = Vec::new();
    if has_repeated_group(&lowered, 2, 4) {
        found.push(PatternKind::RepeatedPair);
    }
    if has_repeated_group(&lowered, 4, 3) {
        found.push(PatternKind::RepeatedQuad);
    }
    if has_uniform_run(&lowered, '0', UNIFORM_RUN) || has_uniform_run(&lowered, 'f', UNIFORM_RUN) {
        found.push(PatternKind::UniformRun);
    }
    if text.contains(ASCENDING) {
        found.push(PatternKind::AscendingSequence);
    }
    if text.contains(DESCENDING) {
        found.push(PatternKind::DescendingSequence);
    }
    found
}

/// True if some `width`-char group occurs `min_repeats` or more times contiguously.
fn has_repeated_group(chars: &[char], width: usize, min_repeats: usize) -> bool {
    let span = width * min_repeats;
    if chars.len() < span {
        return false;
    }
    (0..=chars.len() - span).any(|start| {
        let group = &chars[start..start + width];
        (1..min_repeats).all(|k| {
            let offset = start + k * width;
            &chars[offset..offset + width] == group
        })
    })
}

fn has_uniform_run(chars: &[char], target: char, min_len: usize) -> bool {
    let mut run = 0usize;
    for &c in chars {
        if c == target {
            run += 1;
            if run >= min_len {
                return true;
            }
        } else {
            run = 0;
        }
    }
    false
}
