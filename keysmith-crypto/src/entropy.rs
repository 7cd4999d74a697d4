//! Shannon entropy of hex key strings.

use std::collections::HashMap;

/// Maximum entropy of a 16-symbol alphabet, in bits per symbol.
pub const MAX_HEX_ENTROPY: f64 = 4.0;

/// Shannon entropy of the character distribution, in bits per character.
///
/// Characters are compared case-insensitively.
pub fn shannon_entropy(input: &str) -> f64 {
    let mut counts: HashMap<char, usize> = HashMap::new();
    let mut total = 0usize;
    for c in input.chars() {
        *counts.entry(c.to_ascii_lowercase()).or_insert(0) += 1;
        total += 1;
    }
    if total == 0 {
        return 0.0;
    }

    let total = total as f64;
    counts
        .values()
        .map(|&count| {
            let p = count as f64 / total;
            -p * p.log2()
        })
        .sum()
}

/// Entropy normalized by `log2(16)` into `[0, 1]`.
///
/// Input containing non-hex symbols can exceed the hex maximum, so the
/// score is clamped.
pub fn normalized_hex_entropy(input: &str) -> f64 {
    (shannon_entropy(input) / MAX_HEX_ENTROPY).clamp(0.0, 1.0)
}
