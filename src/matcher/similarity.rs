// Similarity primitives for the matcher.
//
// Two measures, both in [0.0, 1.0]:
//
//   token_recall    — what fraction of the reference description's tokens
//                     appear in the input. Asymmetric on purpose: a short
//                     description fully covered by a long input scores 1.0.
//   sequence_ratio  — character-level longest-matching-blocks ratio
//                     (2 * matched_chars / total_chars), symmetric, 1.0 for
//                     identical strings. Recovers partial credit where
//                     tokenization loses signal (plurals, verb forms,
//                     shifted word boundaries) without stemming.

use std::collections::HashSet;

/// Fraction of `description_tokens` covered by `activity_tokens`.
///
/// Returns 0.0 when the description has no tokens — callers are expected to
/// skip such entries entirely, but the guard keeps this total.
pub fn token_recall(
    activity_tokens: &HashSet<String>,
    description_tokens: &HashSet<String>,
) -> f64 {
    if description_tokens.is_empty() {
        return 0.0;
    }
    let shared = description_tokens
        .iter()
        .filter(|t| activity_tokens.contains(*t))
        .count();
    shared as f64 / description_tokens.len() as f64
}

/// Character-level similarity ratio between two strings.
///
/// Finds the longest common substring, recurses on the pieces to its left
/// and right, and sums the matched lengths: `2 * M / (len_a + len_b)`.
/// Symmetric; 1.0 for identical strings (including two empty strings),
/// 0.0 for strings sharing no characters. Callers lower-case beforehand.
pub fn sequence_ratio(a: &str, b: &str) -> f64 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    if a.is_empty() && b.is_empty() {
        return 1.0;
    }
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }
    let matched = matched_len(&a, &b);
    2.0 * matched as f64 / (a.len() + b.len()) as f64
}

/// Total characters covered by non-overlapping matching blocks.
fn matched_len(a: &[char], b: &[char]) -> usize {
    let (a_start, b_start, len) = longest_common_block(a, b);
    if len == 0 {
        return 0;
    }
    len + matched_len(&a[..a_start], &b[..b_start])
        + matched_len(&a[a_start + len..], &b[b_start + len..])
}

/// Longest common contiguous block between `a` and `b`.
///
/// Returns (start in a, start in b, length); only a strictly longer block
/// displaces the current best, so ties resolve deterministically.
fn longest_common_block(a: &[char], b: &[char]) -> (usize, usize, usize) {
    let mut best = (0, 0, 0);
    // lengths[j] = length of the common suffix ending at a[i], b[j]
    let mut lengths = vec![0usize; b.len() + 1];
    for (i, &ca) in a.iter().enumerate() {
        // Iterate j descending so lengths[j - 1] still holds the value
        // for the previous row.
        for j in (0..b.len()).rev() {
            if ca == b[j] {
                let run = lengths[j] + 1;
                lengths[j + 1] = run;
                if run > best.2 {
                    best = (i + 1 - run, j + 1 - run, run);
                }
            } else {
                lengths[j + 1] = 0;
            }
        }
    }
    best
}
