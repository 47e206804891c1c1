//! Phrase matcher: first classification stage
//!
//! Scans three ordered phrase lists for substring membership in the
//! lowercased input. Substring, not token, matching: a phrase can hit
//! inside a larger word. First hit wins; a total miss hands control to
//! the word scorer.

use crate::classifier::lexicon::Lexicon;
use crate::types::Sentiment;

/// Substring-based phrase matcher
///
/// Priority is fixed: neutral phrases are checked before positive ones,
/// positive before negative. Neutral checks first so that hedged inputs
/// ("works fine", "okay i guess") are not claimed by a polarity phrase.
#[derive(Debug, Clone)]
pub struct PhraseMatcher {
    neutral: Vec<String>,
    positive: Vec<String>,
    negative: Vec<String>,
}

impl PhraseMatcher {
    /// Build a matcher from a lexicon's phrase lists
    pub fn new(lexicon: &Lexicon) -> Self {
        Self {
            neutral: lexicon.neutral_phrases.clone(),
            positive: lexicon.positive_phrases.clone(),
            negative: lexicon.negative_phrases.clone(),
        }
    }

    /// Classify already-lowercased text by phrase lookup
    ///
    /// Returns `None` when no phrase from any list occurs in the input;
    /// that is a normal outcome, not an error.
    pub fn classify(&self, lowered: &str) -> Option<Sentiment> {
        if self.neutral.iter().any(|p| lowered.contains(p.as_str())) {
            return Some(Sentiment::Neutral);
        }
        if self.positive.iter().any(|p| lowered.contains(p.as_str())) {
            return Some(Sentiment::Positive);
        }
        if self.negative.iter().any(|p| lowered.contains(p.as_str())) {
            return Some(Sentiment::Negative);
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matcher() -> PhraseMatcher {
        PhraseMatcher::new(Lexicon::builtin())
    }

    #[test]
    fn test_positive_phrase_hit() {
        assert_eq!(
            matcher().classify("i absolutely love this"),
            Some(Sentiment::Positive)
        );
    }

    #[test]
    fn test_negative_phrase_hit() {
        assert_eq!(
            matcher().classify("this is terrible and i regret downloading it"),
            Some(Sentiment::Negative)
        );
    }

    #[test]
    fn test_neutral_beats_polarity_phrases() {
        // Contains both a neutral phrase and a strong positive phrase;
        // neutral list is scanned first.
        assert_eq!(
            matcher().classify("works fine, amazing even"),
            Some(Sentiment::Neutral)
        );
    }

    #[test]
    fn test_substring_matches_inside_larger_word() {
        // "meh" occurs inside "mehndi"; substring semantics are intentional
        assert_eq!(matcher().classify("mehndi designs"), Some(Sentiment::Neutral));
    }

    #[test]
    fn test_total_miss_returns_none() {
        assert_eq!(matcher().classify("the sky is blue"), None);
        assert_eq!(matcher().classify(""), None);
    }
}
