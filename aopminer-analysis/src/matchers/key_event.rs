//! Key-event plausibility scorer.
//!
//! A key event's tokens are located in one sentence; when at least 75%
//! of them occur, the token positions form a layered graph (one layer
//! per token, layers ordered by their rightmost position, consecutive
//! layers fully connected with distance weights) and the cheapest
//! start-to-end path measures how tightly the event's words cluster.
//! The raw score is 1 plus that minimum path weight, negated when any
//! token is missing, then divided by the token count.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use aopminer_core::types::collections::{FxHashMap, FxHashSet};
use aopminer_core::types::KeMatch;
use smallvec::SmallVec;

use crate::normalize::Normalizer;

type Positions = SmallVec<[u64; 8]>;

/// Minimum fraction of event tokens that must occur in a sentence.
const TOKEN_PROPORTION_THRESHOLD: f64 = 0.75;

/// Distinct stemmed tokens of a key-event description, first occurrence
/// order. Computed once per scan, never per record.
pub fn event_tokens(normalizer: &Normalizer, description: &str) -> Vec<String> {
    let mut seen = FxHashSet::default();
    let mut tokens = Vec::new();
    for token in normalizer.joined(description).split_whitespace() {
        if seen.insert(token.to_string()) {
            tokens.push(token.to_string());
        }
    }
    tokens
}

/// Raw plausibility of one sentence for one key event, or 0.0 when the
/// sentence does not qualify. Callers divide by the token count.
pub fn raw_sentence_score(tokens: &[String], words: &[String]) -> f64 {
    if tokens.is_empty() {
        return 0.0;
    }

    // 1-based positions of each found token.
    let mut layers: Vec<Positions> = Vec::new();
    for token in tokens {
        let positions: Positions = words
            .iter()
            .enumerate()
            .filter(|(_, w)| *w == token)
            .map(|(pos, _)| pos as u64 + 1)
            .collect();
        if !positions.is_empty() {
            layers.push(positions);
        }
    }

    let proportion = layers.len() as f64 / tokens.len() as f64;
    let mut best = 0.0;

    if proportion >= TOKEN_PROPORTION_THRESHOLD && tokens.len() > 1 {
        // Order layers by rightmost position; positions within a layer
        // are already ascending by construction.
        layers.sort_by_key(|layer| layer[layer.len() - 1]);
        best = 1.0 + min_path_weight(&layers) as f64;
    } else if proportion == 1.0 && tokens.len() == 1 {
        best = 1.0;
    }

    if proportion < 1.0 {
        best = -best;
    }
    best
}

/// Best score across all sentences, already divided by token count.
/// Retention favors the score closest to +1.0; ties keep the earlier
/// sentence. None when no sentence qualifies.
pub fn score_sentences(tokens: &[String], sentences: &[Vec<String>]) -> Option<f64> {
    let mut best: Option<f64> = None;
    for words in sentences {
        let raw = raw_sentence_score(tokens, words);
        if raw == 0.0 {
            continue;
        }
        let score = raw / tokens.len() as f64;
        best = match best {
            None => Some(score),
            Some(current) if KeMatch::improves(current, score) => Some(score),
            Some(current) => Some(current),
        };
    }
    best
}

/// Dijkstra over the layered position graph: cheapest total distance
/// from any first-layer position to any last-layer position.
fn min_path_weight(layers: &[Positions]) -> u64 {
    debug_assert!(layers.len() >= 2);

    // Adjacency: consecutive layers, all pairs, weight = |distance|.
    let mut adjacency: FxHashMap<u64, Vec<(u64, u64)>> = FxHashMap::default();
    for window in layers.windows(2) {
        for &a in &window[0] {
            for &b in &window[1] {
                let weight = a.abs_diff(b);
                adjacency.entry(a).or_default().push((b, weight));
                adjacency.entry(b).or_default().push((a, weight));
            }
        }
    }

    let ends: &Positions = &layers[layers.len() - 1];
    let mut overall = u64::MAX;

    for &start in &layers[0] {
        let mut dist: FxHashMap<u64, u64> = FxHashMap::default();
        let mut heap = BinaryHeap::new();
        dist.insert(start, 0);
        heap.push(PathState {
            cost: 0,
            node: start,
        });

        while let Some(PathState { cost, node }) = heap.pop() {
            if dist.get(&node).is_some_and(|&d| cost > d) {
                continue;
            }
            let Some(neighbors) = adjacency.get(&node) else {
                continue;
            };
            for &(next, weight) in neighbors {
                let next_cost = cost + weight;
                if dist.get(&next).map_or(true, |&d| next_cost < d) {
                    dist.insert(next, next_cost);
                    heap.push(PathState {
                        cost: next_cost,
                        node: next,
                    });
                }
            }
        }

        for end in ends {
            if let Some(&d) = dist.get(end) {
                overall = overall.min(d);
            }
        }
    }

    overall
}

/// Min-heap state: reversed ordering on cost.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct PathState {
    cost: u64,
    node: u64,
}

impl Ord for PathState {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .cost
            .cmp(&self.cost)
            .then_with(|| other.node.cmp(&self.node))
    }
}

impl PartialOrd for PathState {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words(s: &str) -> Vec<String> {
        s.split_whitespace().map(str::to_string).collect()
    }

    #[test]
    fn test_adjacent_pair_scores_one() {
        let tokens = words("oxid stress");
        let sentence = words("compound induc oxid stress liver");
        // Positions 3 and 4: best = 1 + 1 = 2, score = 2/2 = 1.0.
        assert_eq!(raw_sentence_score(&tokens, &sentence), 2.0);
        assert_eq!(score_sentences(&tokens, &[sentence]), Some(1.0));
    }

    #[test]
    fn test_scattered_tokens_score_above_one() {
        let tokens = words("oxid stress");
        let sentence = words("oxid a b c stress");
        // Positions 1 and 5: best = 1 + 4 = 5, score = 2.5.
        assert_eq!(score_sentences(&tokens, &[sentence]), Some(2.5));
    }

    #[test]
    fn test_repeated_token_uses_nearest_occurrence() {
        let tokens = words("oxid stress");
        let sentence = words("oxid a b c d oxid stress");
        // The rightmost "oxid" at 6 is adjacent to "stress" at 7.
        assert_eq!(score_sentences(&tokens, &[sentence]), Some(1.0));
    }

    #[test]
    fn test_partial_match_negated() {
        // Three of four tokens present: proportion 0.75, sign flips.
        let tokens = words("a b c d");
        let sentence = words("a b c");
        let raw = raw_sentence_score(&tokens, &sentence);
        // Layers [1] [2] [3]: weight 1 + 1, best = 3, negated.
        assert_eq!(raw, -3.0);
        assert_eq!(score_sentences(&tokens, &[sentence]), Some(-0.75));
    }

    #[test]
    fn test_below_threshold_no_score() {
        let tokens = words("a b c");
        let sentence = words("a x y");
        // 1 of 3 tokens: below 0.75, no score at all.
        assert_eq!(raw_sentence_score(&tokens, &sentence), 0.0);
        assert_eq!(score_sentences(&tokens, &[sentence]), None);
    }

    #[test]
    fn test_single_token_event() {
        let tokens = words("apoptosi");
        assert_eq!(score_sentences(&tokens, &[words("apoptosi observ")]), Some(1.0));
        assert_eq!(score_sentences(&tokens, &[words("necrosi observ")]), None);
    }

    #[test]
    fn test_best_sentence_retained_closest_to_one() {
        let tokens = words("oxid stress");
        let loose = words("oxid a b c stress"); // 2.5
        let tight = words("x oxid stress y"); // 1.0
        assert_eq!(
            score_sentences(&tokens, &[loose.clone(), tight.clone()]),
            Some(1.0)
        );
        // Order independent.
        assert_eq!(score_sentences(&tokens, &[tight, loose]), Some(1.0));
    }

    #[test]
    fn test_event_tokens_deduped_in_order() {
        let normalizer = Normalizer::english();
        let tokens = event_tokens(&normalizer, "oxidative stress causes oxidative damage");
        assert_eq!(tokens, vec!["oxid", "stress", "caus", "damag"]);
    }
}
