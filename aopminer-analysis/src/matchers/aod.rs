//! Adverse-outcome substring matcher.
//!
//! Keys match only at token boundaries of the normalized abstract:
//! as a prefix followed by a space, as a suffix preceded by a space,
//! or space-delimited in the interior. The recorded index is the
//! character offset of the rightmost occurrence of the matched boundary
//! form, plus one; later positions mean the finding appears in the
//! conclusions and weighs closer to 1.

use aopminer_core::types::collections::FxHashSet;
use aopminer_core::types::AodMatch;

use crate::dictionary::aod::AodIndex;

/// Match every dictionary entry against a normalized, space-joined
/// abstract. The first match per display name wins; entries are tried
/// in dictionary registration order.
pub fn match_abstract(index: &AodIndex, normalized: &str) -> Vec<AodMatch> {
    let abstract_len = normalized.chars().count();
    let mut seen: FxHashSet<&str> = FxHashSet::default();
    let mut matches = Vec::new();

    for entry in index.iter() {
        let Some(position) = boundary_position(normalized, &entry.key) else {
            continue;
        };
        if seen.insert(entry.display.as_str()) {
            matches.push(AodMatch {
                name: entry.display.clone(),
                last_index: position,
                abstract_len,
            });
        }
    }
    matches
}

/// Match dictionary entries against a stemmed token list (the
/// target/effect path). Only single-token keys can match here; position
/// information does not exist, so index and length are both zero.
pub fn match_tokens(index: &AodIndex, tokens: &[String]) -> Vec<AodMatch> {
    let mut seen: FxHashSet<&str> = FxHashSet::default();
    let mut matches = Vec::new();

    for entry in index.iter() {
        if !tokens.iter().any(|t| t == &entry.key) {
            continue;
        }
        if seen.insert(entry.display.as_str()) {
            matches.push(AodMatch {
                name: entry.display.clone(),
                last_index: 0,
                abstract_len: 0,
            });
        }
    }
    matches
}

/// 1-based character offset of the rightmost boundary occurrence of
/// `key` in `text`, or None when the key does not occur at a boundary.
fn boundary_position(text: &str, key: &str) -> Option<usize> {
    let prefix = format!("{key} ");
    if text.starts_with(&prefix) {
        return rightmost_char_offset(text, &prefix);
    }
    let suffix = format!(" {key}");
    if text.ends_with(&suffix) {
        return rightmost_char_offset(text, &suffix);
    }
    let interior = format!(" {key} ");
    if text.contains(&interior) {
        return rightmost_char_offset(text, &interior);
    }
    None
}

fn rightmost_char_offset(text: &str, pattern: &str) -> Option<usize> {
    let byte_pos = text.rfind(pattern)?;
    Some(text[..byte_pos].chars().count() + 1)
}
