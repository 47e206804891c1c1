//! Static sentiment lexicon
//!
//! The lexicon is plain data: three ordered phrase lists for the substring
//! matcher and two word sets for the bag-of-words scorer. It is loaded once
//! at startup, either from the built-in TOML embedded at compile time or
//! from an operator-supplied file, and never mutated afterwards.

use crate::error::{MoodlogError, Result};
use once_cell::sync::Lazy;
use serde::Deserialize;
use std::collections::HashSet;
use std::path::Path;

/// Built-in lexicon data, embedded at compile time
const DEFAULT_LEXICON_TOML: &str = include_str!("../../lexicons/default.toml");

static DEFAULT_LEXICON: Lazy<Lexicon> = Lazy::new(|| {
    Lexicon::from_toml(DEFAULT_LEXICON_TOML)
        .unwrap_or_else(|e| panic!("built-in lexicon is invalid: {}", e))
});

/// Sentiment lexicon: phrase lists and word sets
///
/// Phrase lists keep their file order because the matcher scans them in
/// order and the first hit wins. Word membership is order-independent, so
/// those live in hash sets.
#[derive(Debug, Clone, Deserialize)]
pub struct Lexicon {
    /// Phrases that force a Neutral label (checked first)
    pub neutral_phrases: Vec<String>,

    /// Strong positive phrases (checked second)
    pub positive_phrases: Vec<String>,

    /// Strong negative phrases (checked last)
    pub negative_phrases: Vec<String>,

    /// Single words counted toward the positive bucket
    pub positive_words: HashSet<String>,

    /// Single words counted toward the negative bucket
    pub negative_words: HashSet<String>,
}

impl Lexicon {
    /// Parse a lexicon from TOML text
    pub fn from_toml(text: &str) -> Result<Self> {
        let lexicon: Lexicon =
            toml::from_str(text).map_err(|e| MoodlogError::Lexicon(e.to_string()))?;
        lexicon.validate()?;
        Ok(lexicon)
    }

    /// Load a lexicon from a TOML file
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| {
            MoodlogError::Lexicon(format!("failed to read {}: {}", path.display(), e))
        })?;
        Self::from_toml(&text)
    }

    /// Get the built-in lexicon (parsed once, shared)
    pub fn builtin() -> &'static Lexicon {
        &DEFAULT_LEXICON
    }

    /// Reject entries the matcher could never hit
    ///
    /// Input is lowercased before matching, so an uppercase lexicon entry
    /// is dead data and almost certainly an authoring mistake.
    fn validate(&self) -> Result<()> {
        let phrase_lists = [
            &self.neutral_phrases,
            &self.positive_phrases,
            &self.negative_phrases,
        ];
        for phrase in phrase_lists.iter().flat_map(|l| l.iter()) {
            if phrase.is_empty() {
                return Err(MoodlogError::Lexicon("empty phrase entry".to_string()));
            }
            if phrase.chars().any(|c| c.is_uppercase()) {
                return Err(MoodlogError::Lexicon(format!(
                    "phrase {:?} contains uppercase and can never match",
                    phrase
                )));
            }
        }
        for word in self.positive_words.iter().chain(&self.negative_words) {
            if word.is_empty() || !word.chars().all(|c| c.is_ascii_lowercase() || c == '\'') {
                return Err(MoodlogError::Lexicon(format!(
                    "word {:?} is not a lowercase letter/apostrophe run",
                    word
                )));
            }
        }
        Ok(())
    }
}

impl Default for Lexicon {
    fn default() -> Self {
        Self::builtin().clone()
    }
}
