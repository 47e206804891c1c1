//! Two-stage rule-based sentiment classifier
//!
//! Stage one is a substring phrase matcher over three ordered phrase lists;
//! stage two, reached only on a total phrase miss, is a bag-of-words polarity
//! counter with a small negation-rewrite pass. Classification is a pure
//! function of the input text and the static lexicon: no I/O, no shared
//! mutable state, never fails.

pub mod lexicon;
pub mod phrase;
pub mod words;

pub use lexicon::Lexicon;
pub use phrase::PhraseMatcher;
pub use words::WordScorer;

use crate::types::Sentiment;

/// Rule-based sentiment classifier
///
/// Cheap to clone conceptually but intended to be built once at startup and
/// shared behind an `Arc` across request handlers.
#[derive(Debug, Clone)]
pub struct SentimentClassifier {
    phrases: PhraseMatcher,
    words: WordScorer,
}

impl SentimentClassifier {
    /// Build a classifier from a lexicon
    pub fn new(lexicon: &Lexicon) -> Self {
        Self {
            phrases: PhraseMatcher::new(lexicon),
            words: WordScorer::new(lexicon),
        }
    }

    /// Build a classifier from the built-in lexicon
    pub fn builtin() -> Self {
        Self::new(Lexicon::builtin())
    }

    /// Classify a piece of text
    ///
    /// Lowercases once, tries the phrase matcher, and falls back to the
    /// word scorer on a miss. Single pass, no retries; empty or
    /// unrecognized input comes back Neutral.
    pub fn classify(&self, text: &str) -> Sentiment {
        let lowered = text.to_lowercase();
        match self.phrases.classify(&lowered) {
            Some(sentiment) => sentiment,
            None => self.words.classify(&lowered),
        }
    }
}

impl Default for SentimentClassifier {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classifier() -> SentimentClassifier {
        SentimentClassifier::builtin()
    }

    #[test]
    fn test_phrase_stage_runs_first() {
        // "regret downloading" is a negative phrase; the word scorer never runs
        assert_eq!(
            classifier().classify("this is terrible and I regret downloading it"),
            Sentiment::Negative
        );
    }

    #[test]
    fn test_case_insensitive() {
        assert_eq!(
            classifier().classify("I ABSOLUTELY LOVE this"),
            Sentiment::Positive
        );
    }

    #[test]
    fn test_word_stage_on_phrase_miss() {
        assert_eq!(classifier().classify("not bad at all"), Sentiment::Positive);
    }

    #[test]
    fn test_neutral_phrase_dominates_polarity_words() {
        // Neutral phrase present alongside positive and negative words
        assert_eq!(
            classifier().classify("nothing special, good parts, bad parts, more bad"),
            Sentiment::Neutral
        );
    }

    #[test]
    fn test_empty_and_garbage_are_neutral() {
        assert_eq!(classifier().classify(""), Sentiment::Neutral);
        assert_eq!(classifier().classify("xyz123"), Sentiment::Neutral);
    }

    #[test]
    fn test_idempotent() {
        let c = classifier();
        let input = "it was good but also bad";
        assert_eq!(c.classify(input), c.classify(input));
        assert_eq!(c.classify(input), Sentiment::Neutral);
    }
}
