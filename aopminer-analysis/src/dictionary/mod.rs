//! Term dictionaries built from the static reference files.

pub mod aod;
pub mod key_events;

/// Connector words and punctuation stripped from reference lines before
/// stemming. Word connectors carry their surrounding spaces so only
/// whole words are removed.
pub(crate) const CONNECTORS: &[&str] = &[
    " and ", " but ", " by ", " down ", " for ", " from ", " in ",
    " into ", " of ", " on ", " or ", " other ", " the ", " to ",
    " with ", " without ", "' ", "'s ", "/", "-",
];

/// Replace every connector with a single space.
pub(crate) fn strip_connectors(line: &str) -> String {
    let mut out = line.to_string();
    for connector in CONNECTORS {
        out = out.replace(connector, " ");
    }
    out
}
