//! Property tests for the matcher invariants: weight bounds, the KE
//! score sign law, and best-of retention.

use aopminer_analysis::matchers::key_event::{raw_sentence_score, score_sentences};
use aopminer_core::types::AodMatch;
use proptest::prelude::*;

proptest! {
    #[test]
    fn prop_weight_bounds(last_index in 1usize..10_000, extra in 0usize..10_000) {
        let abstract_len = last_index + extra + 1;
        let m = AodMatch {
            name: "term".to_string(),
            last_index,
            abstract_len,
        };
        let w = m.weight();
        prop_assert!(w > 0.0 && w <= 1.0);
    }

    #[test]
    fn prop_index_zero_is_sentinel(abstract_len in 0usize..10_000) {
        let m = AodMatch {
            name: "term".to_string(),
            last_index: 0,
            abstract_len,
        };
        prop_assert_eq!(m.weight(), 1.0);
    }

    // Sign law: score > 0 iff every token was found, score < 0 iff at
    // least 75% but not all were, no score below the threshold.
    #[test]
    fn prop_sign_law(total in 1usize..8, found_seed in 0usize..8, gap in 1usize..5) {
        let found = (found_seed % total) + 1; // 1..=total
        let tokens: Vec<String> = (0..total).map(|i| format!("tok{i}")).collect();

        // Place the first `found` tokens in a sentence separated by
        // filler words.
        let mut words = Vec::new();
        for token in tokens.iter().take(found) {
            words.push(token.clone());
            for f in 0..(gap - 1) {
                words.push(format!("filler{f}"));
            }
        }

        let raw = raw_sentence_score(&tokens, &words);
        let proportion = found as f64 / total as f64;

        if proportion == 1.0 {
            prop_assert!(raw > 0.0);
        } else if proportion >= 0.75 {
            prop_assert!(raw < 0.0);
        } else {
            prop_assert_eq!(raw, 0.0);
        }
    }

    // Retention: whatever sentence wins, its score is the one closest
    // to +1.0 among all per-sentence scores.
    #[test]
    fn prop_best_of_retention(gaps in proptest::collection::vec(1usize..12, 1..6)) {
        let tokens = vec!["alpha".to_string(), "beta".to_string()];
        let sentences: Vec<Vec<String>> = gaps
            .iter()
            .map(|&gap| {
                let mut words = vec!["alpha".to_string()];
                for f in 0..(gap - 1) {
                    words.push(format!("filler{f}"));
                }
                words.push("beta".to_string());
                words
            })
            .collect();

        let best = score_sentences(&tokens, &sentences);
        prop_assert!(best.is_some());
        let best = best.unwrap_or_default();

        for sentence in &sentences {
            let raw = raw_sentence_score(&tokens, sentence);
            let score = raw / tokens.len() as f64;
            prop_assert!((1.0 - best).abs() <= (1.0 - score).abs());
        }
    }
}

#[test]
fn test_documented_retention_example() {
    // Candidates 0.4 and -0.9 for one pair: 0.4 is retained.
    use aopminer_core::types::{KeMatch, KeOrigin};
    let kept = KeMatch {
        event_id: "1".to_string(),
        name: "event".to_string(),
        origin: KeOrigin::KeyEvent,
        score: 0.4,
    };
    assert!(!kept.is_improved_by(-0.9));
}
