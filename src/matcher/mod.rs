// The matcher — scores an activity description against every reference
// entry and returns the best (code, score) pair.
//
// One matcher, two scoring strategies. The selection loop is identical for
// both: iterate in reference-list order, skip entries whose description has
// no tokens, keep the strictly greatest score seen so far. Strict `>` means
// the first maximal entry wins ties, and an entry scoring 0.0 never
// displaces the "no match" default.

pub mod similarity;
pub mod tokenize;

use crate::reference::ReferenceList;
use similarity::{sequence_ratio, token_recall};
use tokenize::tokenize;

/// How to score one (activity, description) pair.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Strategy {
    /// Token-overlap recall only: |activity ∩ description| / |description|.
    TokenOverlap,
    /// Weighted blend of the character-level sequence ratio and token
    /// recall: `char_weight * ratio + (1 - char_weight) * recall`.
    Blended {
        /// Weight on the character ratio, clamped to [0, 1] at use. 0.5
        /// mirrors the plain arithmetic mean; there is no known rationale
        /// for any other value, so it stays tunable.
        char_weight: f64,
    },
}

impl Strategy {
    /// Blended strategy with the weight clamped into [0, 1].
    pub fn blended(char_weight: f64) -> Self {
        Strategy::Blended {
            char_weight: char_weight.clamp(0.0, 1.0),
        }
    }
}

impl Default for Strategy {
    fn default() -> Self {
        Strategy::TokenOverlap
    }
}

/// Outcome of classifying one activity description.
///
/// `code` is `None` when no reference entry scored above 0.0 — including
/// the empty-list and all-token-free-descriptions cases.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassificationResult {
    pub code: Option<String>,
    pub score: f64,
}

impl ClassificationResult {
    fn no_match() -> Self {
        Self {
            code: None,
            score: 0.0,
        }
    }
}

/// Scores activities against a borrowed, read-only reference list.
///
/// Cheap to construct; holds no state beyond the borrow and the strategy,
/// so one matcher can serve any number of classification calls.
pub struct Matcher<'a> {
    references: &'a ReferenceList,
    strategy: Strategy,
}

impl<'a> Matcher<'a> {
    pub fn new(references: &'a ReferenceList, strategy: Strategy) -> Self {
        Self {
            references,
            strategy,
        }
    }

    pub fn strategy(&self) -> Strategy {
        self.strategy
    }

    /// Return the best-scoring reference code for the activity text.
    ///
    /// Never fails: token-free input simply scores 0.0 against everything
    /// and yields the no-match sentinel.
    pub fn classify(&self, activity: &str) -> ClassificationResult {
        let activity_tokens = tokenize(activity);
        let activity_lower = activity.to_lowercase();

        let mut best = ClassificationResult::no_match();
        for entry in self.references.entries() {
            let description_tokens = tokenize(&entry.description);
            if description_tokens.is_empty() {
                continue;
            }
            let recall = token_recall(&activity_tokens, &description_tokens);
            let score = match self.strategy {
                Strategy::TokenOverlap => recall,
                Strategy::Blended { char_weight } => {
                    // The field is public, so clamp here as well as in the
                    // constructor — scores must stay inside [0, 1].
                    let weight = char_weight.clamp(0.0, 1.0);
                    let ratio =
                        sequence_ratio(&activity_lower, &entry.description.to_lowercase());
                    weight * ratio + (1.0 - weight) * recall
                }
            };
            if score > best.score {
                best.score = score;
                best.code = Some(entry.code.clone());
            }
        }
        best
    }
}
