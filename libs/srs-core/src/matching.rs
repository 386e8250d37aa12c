//! Correctness policy for free-text answers.

use crate::types::{ConfidenceRating, MatchingMode};
use serde::{Deserialize, Serialize};

/// Verdict on a typed answer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    pub is_correct: bool,
    /// 0.0 to 1.0; exact and case-insensitive modes only produce 0.0 or 1.0.
    pub similarity: f64,
    pub matching_mode: MatchingMode,
    pub typed_normalized: String,
    pub correct_normalized: String,
}

impl MatchResult {
    /// Rating to record for this verdict.
    pub fn rating(&self) -> ConfidenceRating {
        ConfidenceRating::from_correct(self.is_correct)
    }
}

/// Judge a typed answer against the item's back.
pub fn compare_answers(
    typed: &str,
    correct: &str,
    mode: MatchingMode,
    fuzzy_threshold: f64,
) -> MatchResult {
    let typed_normalized = collapse_whitespace(typed);
    let correct_normalized = collapse_whitespace(correct);

    let similarity = match mode {
        MatchingMode::Exact => all_or_nothing(typed_normalized == correct_normalized),
        MatchingMode::CaseInsensitive => all_or_nothing(
            typed_normalized.to_lowercase() == correct_normalized.to_lowercase(),
        ),
        MatchingMode::Fuzzy => normalized_similarity(
            &typed_normalized.to_lowercase(),
            &correct_normalized.to_lowercase(),
        ),
    };
    let is_correct = match mode {
        MatchingMode::Fuzzy => similarity >= fuzzy_threshold,
        _ => similarity == 1.0,
    };

    MatchResult {
        is_correct,
        similarity,
        matching_mode: mode,
        typed_normalized,
        correct_normalized,
    }
}

fn all_or_nothing(equal: bool) -> f64 {
    if equal { 1.0 } else { 0.0 }
}

/// Trim and collapse runs of whitespace to a single space.
fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Edit distance in characters.
pub fn levenshtein_distance(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();

    if a.is_empty() || b.is_empty() {
        return a.len().max(b.len());
    }

    // Two rolling rows of the DP table
    let mut above: Vec<usize> = (0..=b.len()).collect();
    let mut row = vec![0; b.len() + 1];

    for (i, ca) in a.iter().enumerate() {
        row[0] = i + 1;
        for (j, cb) in b.iter().enumerate() {
            let substitution = above[j] + usize::from(ca != cb);
            row[j + 1] = substitution.min(above[j + 1] + 1).min(row[j] + 1);
        }
        std::mem::swap(&mut above, &mut row);
    }

    above[b.len()]
}

/// Similarity in [0.0, 1.0] derived from edit distance over the longer length.
pub fn normalized_similarity(a: &str, b: &str) -> f64 {
    let longest = a.chars().count().max(b.chars().count());
    if longest == 0 {
        return 1.0;
    }
    1.0 - levenshtein_distance(a, b) as f64 / longest as f64
}
