//! Bag-of-words scorer: fallback classification stage
//!
//! Runs only when no phrase matched. Rewrites a small fixed set of negation
//! bigrams into synthetic tokens, tokenizes into lowercase letter runs, and
//! counts hits against the positive and negative word sets. Majority wins,
//! ties and empty signal fall back to Neutral.

use crate::classifier::lexicon::Lexicon;
use crate::types::Sentiment;
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;

/// Synthetic token standing in for a negated-positive bigram
const NEG_TOKEN: &str = "negnotgood";
/// Synthetic token standing in for a negated-negative bigram
const POS_TOKEN: &str = "posnotbad";

/// Negation bigrams and their replacement tokens, applied in this order.
/// "not good" runs before "no good" so the longer bigram is consumed first.
const NEGATION_REWRITES: [(&str, &str); 4] = [
    ("not good", NEG_TOKEN),
    ("not great", NEG_TOKEN),
    ("not bad", POS_TOKEN),
    ("no good", NEG_TOKEN),
];

/// Maximal runs of lowercase letters and apostrophes; everything else
/// separates tokens. The synthetic tokens are letter runs on purpose so
/// they survive tokenization.
static WORD_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[a-z']+").expect("word pattern is valid"));

/// Word-level polarity counter
#[derive(Debug, Clone)]
pub struct WordScorer {
    positive: HashSet<String>,
    negative: HashSet<String>,
}

impl WordScorer {
    /// Build a scorer from a lexicon's word sets
    pub fn new(lexicon: &Lexicon) -> Self {
        Self {
            positive: lexicon.positive_words.clone(),
            negative: lexicon.negative_words.clone(),
        }
    }

    /// Classify already-lowercased text by counting lexicon words
    ///
    /// Always produces a label; inputs with no recognized words are Neutral.
    pub fn classify(&self, lowered: &str) -> Sentiment {
        let rewritten = rewrite_negations(lowered);

        let mut pos_count = 0usize;
        let mut neg_count = 0usize;

        for token in WORD_PATTERN.find_iter(&rewritten) {
            let word = token.as_str();
            if word == POS_TOKEN {
                pos_count += 1;
            } else if word == NEG_TOKEN {
                neg_count += 1;
            } else if self.positive.contains(word) {
                pos_count += 1;
            } else if self.negative.contains(word) {
                neg_count += 1;
            }
        }

        if pos_count == 0 && neg_count == 0 {
            return Sentiment::Neutral;
        }
        if pos_count > neg_count {
            Sentiment::Positive
        } else if neg_count > pos_count {
            Sentiment::Negative
        } else {
            Sentiment::Neutral
        }
    }
}

/// Apply the fixed negation rewrites in order
///
/// Each pass replaces every non-overlapping occurrence; later passes see the
/// output of earlier ones but the synthetic tokens never contain a bigram,
/// so substituted spans are not re-matched.
fn rewrite_negations(text: &str) -> String {
    let mut rewritten = text.to_string();
    for (bigram, token) in NEGATION_REWRITES {
        rewritten = rewritten.replace(bigram, token);
    }
    rewritten
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scorer() -> WordScorer {
        WordScorer::new(Lexicon::builtin())
    }

    #[test]
    fn test_positive_majority() {
        assert_eq!(scorer().classify("nice and cool overall"), Sentiment::Positive);
    }

    #[test]
    fn test_negative_majority() {
        assert_eq!(scorer().classify("slow and buggy and sad"), Sentiment::Negative);
    }

    #[test]
    fn test_tie_is_neutral() {
        assert_eq!(scorer().classify("it was good but also bad"), Sentiment::Neutral);
    }

    #[test]
    fn test_no_signal_is_neutral() {
        assert_eq!(scorer().classify(""), Sentiment::Neutral);
        assert_eq!(scorer().classify("xyz123"), Sentiment::Neutral);
    }

    #[test]
    fn test_not_bad_counts_positive() {
        assert_eq!(scorer().classify("not bad at all"), Sentiment::Positive);
    }

    #[test]
    fn test_not_good_counts_negative() {
        // "good" is consumed by the rewrite, so only the negative synthetic
        // token is counted
        assert_eq!(scorer().classify("this is not good"), Sentiment::Negative);
    }

    #[test]
    fn test_no_good_counts_negative() {
        assert_eq!(scorer().classify("no good whatsoever"), Sentiment::Negative);
    }

    #[test]
    fn test_rewrite_applies_inside_longer_spans() {
        // Given behavior: "not good" inside "not good enough" is rewritten too
        assert_eq!(rewrite_negations("not good enough"), "negnotgood enough");
    }

    #[test]
    fn test_rewrite_order_is_fixed() {
        assert_eq!(
            rewrite_negations("not good, not great, not bad, no good"),
            "negnotgood, negnotgood, posnotbad, negnotgood"
        );
    }

    #[test]
    fn test_apostrophes_stay_inside_tokens() {
        // "doesn't" tokenizes as one word and matches nothing
        assert_eq!(scorer().classify("it doesn't matter"), Sentiment::Neutral);
    }

    #[test]
    fn test_punctuation_separates_tokens() {
        assert_eq!(scorer().classify("good,good...bad!"), Sentiment::Positive);
    }
}
