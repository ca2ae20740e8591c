//! Snowball English stemmer behind the `Stem` seam.

use aopminer_core::traits::Stem;
use rust_stemmers::{Algorithm, Stemmer};

/// Snowball (Porter2) English stemmer.
pub struct SnowballStemmer {
    inner: Stemmer,
}

impl SnowballStemmer {
    pub fn english() -> Self {
        Self {
            inner: Stemmer::create(Algorithm::English),
        }
    }
}

impl Default for SnowballStemmer {
    fn default() -> Self {
        Self::english()
    }
}

impl Stem for SnowballStemmer {
    fn stem(&self, word: &str) -> String {
        self.inner.stem(word).into_owned()
    }
}
