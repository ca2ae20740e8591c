//! Pluggable stemmer contract.
//!
//! Matching depends on identical stemming on both sides: the same
//! implementation must be used for dictionary construction and abstract
//! normalization. Any deterministic English stemmer satisfies the
//! contract; the analysis crate ships a Snowball implementation.

/// Deterministic word stemmer.
pub trait Stem: Send + Sync {
    /// Stem a single lower-cased word.
    fn stem(&self, word: &str) -> String;
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Identity;

    impl Stem for Identity {
        fn stem(&self, word: &str) -> String {
            word.to_string()
        }
    }

    #[test]
    fn test_trait_object_usable() {
        let stemmer: Box<dyn Stem> = Box::new(Identity);
        assert_eq!(stemmer.stem("fibrosis"), "fibrosis");
    }
}
