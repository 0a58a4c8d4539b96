// Word tokenization — the unit of lexical comparison.
//
// A token is a maximal run of word characters (letters, digits, underscore)
// in the lower-cased text. Duplicates within one string collapse into a set;
// order is irrelevant to the overlap score.

use std::collections::HashSet;
use std::sync::OnceLock;

use regex_lite::Regex;

fn word_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\w+").expect("static pattern compiles"))
}

/// Extract the set of unique word tokens from lower-cased text.
pub fn tokenize(text: &str) -> HashSet<String> {
    let lower = text.to_lowercase();
    word_pattern()
        .find_iter(&lower)
        .map(|m| m.as_str().to_string())
        .collect()
}
