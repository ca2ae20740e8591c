//! Abstract normalization.
//!
//! The pipeline: split into sentences, drop dosage sentences (a digit
//! plus "body weight"), tokenize with apostrophes as separators, drop
//! any sentence containing a negation cue, remove stopwords, stem.
//! Two output shapes: a single space-joined string for the substring
//! matcher, and per-sentence token lists for the plausibility scorer.

pub mod stemmer;
pub mod stopwords;

use std::sync::LazyLock;

use aopminer_core::traits::Stem;
use regex::Regex;

pub use stemmer::SnowballStemmer;

use self::stopwords::{NEGATION_SET, STOPWORD_SET};

static HAS_DIGIT: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\d").unwrap());

/// Text normalizer with a pluggable stemmer.
pub struct Normalizer {
    stemmer: Box<dyn Stem>,
}

impl Normalizer {
    /// Normalizer with the Snowball English stemmer. The same instance
    /// must be used for dictionaries and abstracts alike.
    pub fn english() -> Self {
        Self::with_stemmer(Box::new(SnowballStemmer::english()))
    }

    pub fn with_stemmer(stemmer: Box<dyn Stem>) -> Self {
        Self { stemmer }
    }

    /// Normalize into per-sentence token lists. Sentences that end up
    /// empty are dropped; empty input yields an empty list.
    pub fn sentences(&self, text: &str) -> Vec<Vec<String>> {
        split_sentences(text)
            .into_iter()
            .filter(|sent| !is_dosage_sentence(sent))
            .filter_map(|sent| {
                let tokens = tokenize(&sent);
                if tokens.iter().any(|t| NEGATION_SET.contains(t.as_str())) {
                    return None;
                }
                let stemmed: Vec<String> = tokens
                    .into_iter()
                    .filter(|t| !STOPWORD_SET.contains(t.as_str()))
                    .map(|t| self.stemmer.stem(&t))
                    .collect();
                if stemmed.is_empty() {
                    None
                } else {
                    Some(stemmed)
                }
            })
            .collect()
    }

    /// Normalize into a single space-joined string.
    pub fn joined(&self, text: &str) -> String {
        let sents = self.sentences(text);
        let mut out = String::new();
        for sent in &sents {
            for token in sent {
                if !out.is_empty() {
                    out.push(' ');
                }
                out.push_str(token);
            }
        }
        out
    }

    /// Stem a whitespace-separated field without sentence or stopword
    /// handling. Used for the target/effect matching path, where the
    /// text is a short structured phrase rather than prose.
    pub fn stem_tokens(&self, text: &str) -> Vec<String> {
        text.split_whitespace()
            .map(|w| self.stemmer.stem(&w.to_lowercase()))
            .collect()
    }

    /// Stem one already-lowercased word.
    pub fn stem_word(&self, word: &str) -> String {
        self.stemmer.stem(word)
    }
}

/// Split on sentence-final punctuation.
fn split_sentences(text: &str) -> Vec<String> {
    let mut sentences = Vec::new();
    let mut current = String::new();
    for c in text.chars() {
        if matches!(c, '.' | '!' | '?') {
            if !current.trim().is_empty() {
                sentences.push(current.trim().to_string());
            }
            current.clear();
        } else {
            current.push(c);
        }
    }
    if !current.trim().is_empty() {
        sentences.push(current.trim().to_string());
    }
    sentences
}

/// A dosage sentence mixes a number with "body weight" and reports
/// administered dose rather than an observed effect.
fn is_dosage_sentence(sentence: &str) -> bool {
    let lower = sentence.to_lowercase();
    lower.contains("body weight") && HAS_DIGIT.is_match(&lower)
}

/// Lowercase and split on every non-alphanumeric character, so
/// apostrophes separate ("didn't" yields "didn" and "t", letting the
/// negation filter see contraction stems).
fn tokenize(sentence: &str) -> Vec<String> {
    sentence
        .to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}
