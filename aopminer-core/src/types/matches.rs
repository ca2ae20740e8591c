//! Match results produced by the AOD and KE matchers.

use serde::{Deserialize, Serialize};

/// One adverse-outcome/disease match within a single record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AodMatch {
    /// Canonical display name from the dictionary.
    pub name: String,
    /// Character offset of the rightmost occurrence of the matched
    /// boundary form (0 on the target/effect path, where no position
    /// information exists).
    pub last_index: usize,
    /// Length of the normalized abstract (0 on the target/effect path).
    pub abstract_len: usize,
}

impl AodMatch {
    /// Position weight of this match.
    ///
    /// `last_index / abstract_len` for interior positions; an index of 0
    /// is the full-confidence sentinel and yields exactly 1.0 (this also
    /// covers the target/effect path, where index and length are both 0).
    pub fn weight(&self) -> f64 {
        if self.last_index > 0 {
            self.last_index as f64 / self.abstract_len as f64
        } else {
            1.0
        }
    }
}

/// Which reference file a key event came from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeOrigin {
    #[default]
    KeyEvent,
    Relationship,
}

impl KeOrigin {
    pub fn as_str(&self) -> &'static str {
        match self {
            KeOrigin::KeyEvent => "key_event",
            KeOrigin::Relationship => "relationship",
        }
    }
}

/// One key-event plausibility match within a single record.
///
/// Positive scores mean every event token was found in one sentence
/// (confirmed); negative scores mean at least 75% were (plausible but
/// incomplete). A score of exactly 0 is never recorded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeMatch {
    /// Key-event identifier from the reference file.
    pub event_id: String,
    /// Key-event description (display name).
    pub name: String,
    /// Which reference file the event came from.
    pub origin: KeOrigin,
    /// Plausibility score.
    pub score: f64,
}

impl KeMatch {
    /// Best-of retention predicate: whether `candidate` should replace
    /// `current`. The score closest to +1.0 wins, ties keep the earlier
    /// one.
    pub fn improves(current: f64, candidate: f64) -> bool {
        (1.0 - candidate).abs() < (1.0 - current).abs()
    }

    /// Whether `candidate` should replace this match's score.
    pub fn is_improved_by(&self, candidate: f64) -> bool {
        Self::improves(self.score, candidate)
    }
}

/// All matches found for one abstract record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecordOutcome {
    pub record_id: String,
    pub aod_matches: Vec<AodMatch>,
    pub ke_matches: Vec<KeMatch>,
}

impl RecordOutcome {
    /// Create an empty outcome for a record.
    pub fn new(record_id: impl Into<String>) -> Self {
        Self {
            record_id: record_id.into(),
            aod_matches: Vec::new(),
            ke_matches: Vec::new(),
        }
    }

    /// Records whose matchers all found nothing contribute no result.
    pub fn is_empty(&self) -> bool {
        self.aod_matches.is_empty() && self.ke_matches.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_weight_interior_position() {
        let m = AodMatch {
            name: "liver damage".to_string(),
            last_index: 25,
            abstract_len: 100,
        };
        assert!((m.weight() - 0.25).abs() < f64::EPSILON);
    }

    #[test]
    fn test_weight_index_zero_sentinel() {
        let m = AodMatch {
            name: "liver damage".to_string(),
            last_index: 0,
            abstract_len: 0,
        };
        assert_eq!(m.weight(), 1.0);
    }

    #[test]
    fn test_best_of_retention_favors_closest_to_one() {
        let kept = KeMatch {
            event_id: "55".to_string(),
            name: "oxidative stress".to_string(),
            origin: KeOrigin::KeyEvent,
            score: 0.4,
        };
        // -0.9 is further from +1.0 than 0.4, so it must not replace.
        assert!(!kept.is_improved_by(-0.9));
        assert!(kept.is_improved_by(0.5));
        // Equal distance keeps the earlier score.
        assert!(!kept.is_improved_by(0.4));
        // The shared predicate agrees with the method form.
        assert!(KeMatch::improves(-0.9, 0.4));
        assert!(!KeMatch::improves(0.4, -0.9));
    }
}
