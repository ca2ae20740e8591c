//! Closed word lists used by the normalizer.
//!
//! The stopword list is the standard English list from the NLTK corpus,
//! minus contraction forms that cannot survive apostrophe-splitting
//! tokenization (both halves of "you're" are covered by "you" and "re").

/// English stopwords, removed token-by-token after negation filtering.
pub const STOPWORDS: &[&str] = &[
    "i", "me", "my", "myself", "we", "our", "ours", "ourselves", "you",
    "your", "yours", "yourself", "yourselves", "he", "him", "his",
    "himself", "she", "her", "hers", "herself", "it", "its", "itself",
    "they", "them", "their", "theirs", "themselves", "what", "which",
    "who", "whom", "this", "that", "these", "those", "am", "is", "are",
    "was", "were", "be", "been", "being", "have", "has", "had", "having",
    "do", "does", "did", "doing", "a", "an", "the", "and", "but", "if",
    "or", "because", "as", "until", "while", "of", "at", "by", "for",
    "with", "about", "against", "between", "into", "through", "during",
    "before", "after", "above", "below", "to", "from", "up", "down",
    "in", "out", "on", "off", "over", "under", "again", "further",
    "then", "once", "here", "there", "when", "where", "why", "how",
    "all", "any", "both", "each", "few", "more", "most", "other",
    "some", "such", "no", "nor", "not", "only", "own", "same", "so",
    "than", "too", "very", "s", "t", "can", "will", "just", "don",
    "should", "now", "d", "ll", "m", "o", "re", "ve", "y", "ain",
    "aren", "couldn", "didn", "doesn", "hadn", "hasn", "haven", "isn",
    "ma", "mightn", "mustn", "needn", "shan", "shouldn", "wasn",
    "weren", "won", "wouldn",
];

/// Negation cues. A sentence containing any of these as a token is
/// dropped entirely: a negated finding must never count as a match.
pub const NEGATION_CUES: &[&str] = &[
    "never", "neither", "no", "none", "nor", "not", "ain", "aren",
    "couldn", "didn", "doesn", "hadn", "hasn", "haven", "isn", "mightn",
    "mustn", "needn", "shan", "shouldn", "wasn", "weren", "won",
    "wouldn",
];

use std::sync::LazyLock;

use aopminer_core::types::collections::FxHashSet;

pub(crate) static STOPWORD_SET: LazyLock<FxHashSet<&'static str>> =
    LazyLock::new(|| STOPWORDS.iter().copied().collect());

pub(crate) static NEGATION_SET: LazyLock<FxHashSet<&'static str>> =
    LazyLock::new(|| NEGATION_CUES.iter().copied().collect());
