//! Adverse-outcome / disease dictionary.
//!
//! Each reference line produces up to two keys: the stem of the full
//! phrase, and, when the segment before the first comma has more than
//! one word, the stem of that head segment. Both map to a display name
//! used for storage and reporting. Iteration preserves registration
//! order, which downstream suroccurrence correction depends on.

use std::path::Path;

use aopminer_core::errors::DictionaryError;
use aopminer_core::types::collections::FxHashMap;
use tracing::debug;

use crate::normalize::Normalizer;

use super::strip_connectors;

/// Which reference-file format a line set uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AodSource {
    /// Free-text phrase list, one phrase per line.
    AdverseOutcome,
    /// Tab-separated disease export: first column is the phrase,
    /// `#` lines are comments.
    Disease,
}

/// One dictionary entry: stemmed key and display name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AodEntry {
    pub key: String,
    pub display: String,
}

/// Insertion-ordered dictionary of stemmed keys to display names.
#[derive(Debug, Default)]
pub struct AodIndex {
    entries: Vec<AodEntry>,
    by_key: FxHashMap<String, usize>,
}

impl AodIndex {
    /// Load a dictionary from a reference file.
    pub fn load(
        path: &Path,
        source: AodSource,
        normalizer: &Normalizer,
    ) -> Result<Self, DictionaryError> {
        if !path.exists() {
            return Err(DictionaryError::FileNotFound {
                path: path.display().to_string(),
            });
        }
        let content =
            std::fs::read_to_string(path).map_err(|e| DictionaryError::ReadFailed {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;
        let index = Self::parse(&content, source, normalizer);
        if index.is_empty() {
            return Err(DictionaryError::Empty {
                path: path.display().to_string(),
            });
        }
        debug!(
            path = %path.display(),
            entries = index.len(),
            "loaded AOD dictionary"
        );
        Ok(index)
    }

    /// Parse reference-file content into an index.
    pub fn parse(content: &str, source: AodSource, normalizer: &Normalizer) -> Self {
        let mut index = Self::default();
        for raw in content.lines() {
            let raw = match source {
                AodSource::Disease => {
                    if raw.starts_with('#') {
                        continue;
                    }
                    raw.split('\t').next().unwrap_or("")
                }
                AodSource::AdverseOutcome => raw,
            };
            let cleaned = strip_connectors(&raw.trim().to_lowercase());
            let cleaned = cleaned.trim();
            if cleaned.is_empty() {
                continue;
            }

            // Full-phrase key: stems of every word, comma segments flattened.
            let full_key = cleaned
                .split(',')
                .flat_map(str::split_whitespace)
                .map(|w| normalizer.stem_word(w))
                .collect::<Vec<_>>()
                .join(" ");
            index.register(full_key, cleaned.to_string());

            // Head key: the segment before the first comma, only when it
            // is itself a phrase ("severe acute, hepatotoxicity" also
            // registers "severe acute").
            let head_raw = cleaned.split(',').next().unwrap_or("").trim();
            let head_key = head_raw
                .split_whitespace()
                .map(|w| normalizer.stem_word(w))
                .collect::<Vec<_>>()
                .join(" ");
            if head_key.split(' ').count() > 1 {
                index.register(head_key, head_raw.to_string());
            }
        }
        index
    }

    /// Register a key if absent. The first registration wins.
    fn register(&mut self, key: String, display: String) {
        if key.is_empty() || self.by_key.contains_key(&key) {
            return;
        }
        self.by_key.insert(key.clone(), self.entries.len());
        self.entries.push(AodEntry { key, display });
    }

    /// Merge another index into this one. On key collision the other
    /// index's display name replaces this one's, in place; new keys are
    /// appended. Used to let the disease list refine the adverse-outcome
    /// list.
    pub fn merge(&mut self, other: AodIndex) {
        for entry in other.entries {
            match self.by_key.get(&entry.key) {
                Some(&idx) => self.entries[idx].display = entry.display,
                None => self.register(entry.key, entry.display),
            }
        }
    }

    /// Entries in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &AodEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Display name for a key, if registered.
    pub fn display_for(&self, key: &str) -> Option<&str> {
        self.by_key
            .get(key)
            .map(|&idx| self.entries[idx].display.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn normalizer() -> Normalizer {
        Normalizer::english()
    }

    #[test]
    fn test_full_and_head_keys() {
        let n = normalizer();
        let index = AodIndex::parse("Severe Acute, Hepatotoxicity\n", AodSource::AdverseOutcome, &n);
        assert_eq!(index.len(), 2);
        assert_eq!(
            index.display_for("sever acut hepatotox"),
            Some("severe acute, hepatotoxicity")
        );
        assert_eq!(index.display_for("sever acut"), Some("severe acute"));
    }

    #[test]
    fn test_single_word_head_not_registered() {
        let n = normalizer();
        let index = AodIndex::parse("fibrosis, hepatic\n", AodSource::AdverseOutcome, &n);
        // Only the full key: the head "fibrosis" is a single word.
        assert_eq!(index.len(), 1);
        assert_eq!(
            index.display_for("fibrosi hepat"),
            Some("fibrosis, hepatic")
        );
    }

    #[test]
    fn test_connectors_replaced() {
        let n = normalizer();
        let index = AodIndex::parse("cancer of the liver\n", AodSource::AdverseOutcome, &n);
        assert_eq!(index.display_for("cancer liver"), Some("cancer liver"));
    }

    #[test]
    fn test_disease_format_skips_comments_and_extra_columns() {
        let n = normalizer();
        let content = "# Disease export\nLiver Fibrosis\tMESH:D008103\tignored\n";
        let index = AodIndex::parse(content, AodSource::Disease, &n);
        assert_eq!(index.len(), 1);
        assert_eq!(index.display_for("liver fibrosi"), Some("liver fibrosis"));
    }

    #[test]
    fn test_first_registration_wins_within_file() {
        let n = normalizer();
        let content = "liver fibrosis\nLiver Fibrosis\n";
        let index = AodIndex::parse(content, AodSource::AdverseOutcome, &n);
        assert_eq!(index.len(), 1);
    }

    #[test]
    fn test_merge_overwrites_display_in_place() {
        let n = normalizer();
        let mut ao = AodIndex::parse("liver fibrosis\n", AodSource::AdverseOutcome, &n);
        let d = AodIndex::parse(
            "Liver Fibrosis\tMESH:D008103\nsteatosis\tMESH:D005234\n",
            AodSource::Disease,
            &n,
        );
        ao.merge(d);
        assert_eq!(ao.len(), 2);
        // Disease display replaced the AO one, position preserved.
        let names: Vec<&str> = ao.iter().map(|e| e.display.as_str()).collect();
        assert_eq!(names, vec!["liver fibrosis", "steatosis"]);
    }

    #[test]
    fn test_missing_file_is_fatal() {
        let n = normalizer();
        let err = AodIndex::load(
            Path::new("/nonexistent/aod.txt"),
            AodSource::AdverseOutcome,
            &n,
        )
        .unwrap_err();
        assert!(matches!(err, DictionaryError::FileNotFound { .. }));
    }

    #[test]
    fn test_empty_file_is_fatal() {
        let n = normalizer();
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("empty.txt");
        std::fs::write(&path, "\n\n").unwrap();
        let err = AodIndex::load(&path, AodSource::AdverseOutcome, &n).unwrap_err();
        assert!(matches!(err, DictionaryError::Empty { .. }));
    }
}
