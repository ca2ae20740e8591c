//! Abstract records as supplied by the parsing collaborators.

use serde::{Deserialize, Serialize};
use xxhash_rust::xxh3::xxh3_64;

/// One literature record: identifier plus the optional text fields
/// extracted from a heterogeneous export format.
///
/// Exactly one field drives matching, in priority order: abstract text,
/// else target phrase, else the effect list. Records with none of the
/// three are stored but never matched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AbstractRecord {
    /// Stable identifier (PubMed ids arrive as strings).
    pub id: String,
    /// Raw abstract text, if the source carried one.
    pub abstract_text: Option<String>,
    /// Raw target phrase (e.g. a studied substance or endpoint).
    pub target: Option<String>,
    /// Ordered list of raw effect phrases.
    pub effects: Vec<String>,
}

/// Which field of a record drives matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrivingField<'a> {
    Abstract(&'a str),
    Target(&'a str),
    Effects(&'a [String]),
    None,
}

impl AbstractRecord {
    /// Create a record with only an identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            abstract_text: None,
            target: None,
            effects: Vec::new(),
        }
    }

    /// Select the field that drives matching for this record.
    /// Empty strings count as absent.
    pub fn driving_field(&self) -> DrivingField<'_> {
        if let Some(ref text) = self.abstract_text {
            if !text.is_empty() {
                return DrivingField::Abstract(text);
            }
        }
        if let Some(ref target) = self.target {
            if !target.is_empty() {
                return DrivingField::Target(target);
            }
        }
        if !self.effects.is_empty() {
            return DrivingField::Effects(&self.effects);
        }
        DrivingField::None
    }

    /// xxh3 hash of the record's matchable content, used by the store
    /// to detect whether a re-ingested record actually changed.
    pub fn content_hash(&self) -> u64 {
        let mut buf = Vec::new();
        if let Some(ref text) = self.abstract_text {
            buf.extend_from_slice(text.as_bytes());
        }
        buf.push(0x1f);
        if let Some(ref target) = self.target {
            buf.extend_from_slice(target.as_bytes());
        }
        for effect in &self.effects {
            buf.push(0x1f);
            buf.extend_from_slice(effect.as_bytes());
        }
        xxh3_64(&buf)
    }
}
