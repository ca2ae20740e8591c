//! Key-event and KE-relationship reference lists.
//!
//! Both files share one tab-separated shape: a header row, then
//! `id<TAB>description` rows, terminated by the first blank line.
//! Relationship entries are appended after key events and tagged with
//! their origin so reports can distinguish them.

use std::path::Path;

use aopminer_core::errors::DictionaryError;
use aopminer_core::types::KeOrigin;
use tracing::{debug, warn};

use super::strip_connectors;

/// One key-event (or relationship) reference entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeEntry {
    /// Identifier from the reference file.
    pub id: String,
    /// Cleaned description, used both for scoring and as display name.
    pub description: String,
    /// Which reference file the entry came from.
    pub origin: KeOrigin,
}

/// Load one reference file, tagging every entry with `origin`.
pub fn load_entries(path: &Path, origin: KeOrigin) -> Result<Vec<KeEntry>, DictionaryError> {
    if !path.exists() {
        return Err(DictionaryError::FileNotFound {
            path: path.display().to_string(),
        });
    }
    let content = std::fs::read_to_string(path).map_err(|e| DictionaryError::ReadFailed {
        path: path.display().to_string(),
        message: e.to_string(),
    })?;
    let entries = parse_entries(&content, origin);
    if entries.is_empty() {
        return Err(DictionaryError::Empty {
            path: path.display().to_string(),
        });
    }
    debug!(
        path = %path.display(),
        entries = entries.len(),
        "loaded key-event reference file"
    );
    Ok(entries)
}

/// Parse reference-file content. Exposed for tests.
pub fn parse_entries(content: &str, origin: KeOrigin) -> Vec<KeEntry> {
    let mut entries = Vec::new();
    for line in content.lines().skip(1) {
        let line = line.trim();
        if line.is_empty() {
            break;
        }
        let cleaned = strip_connectors(&line.to_lowercase())
            .replace(", ", " ")
            .replace("n a ", "");
        let mut cols = cleaned.split('\t');
        let (id, description) = match (cols.next(), cols.next()) {
            (Some(id), Some(desc)) => (id.trim(), desc.trim()),
            _ => {
                warn!(line, "skipping malformed key-event row");
                continue;
            }
        };
        if id.is_empty() || description.is_empty() {
            continue;
        }
        entries.push(KeEntry {
            id: id.to_string(),
            description: description.to_string(),
            origin,
        });
    }
    entries
}

/// Load key events plus, when configured, KE relationships appended
/// after them.
pub fn load_key_event_data(
    key_event_path: &Path,
    relationship_path: Option<&Path>,
) -> Result<Vec<KeEntry>, DictionaryError> {
    let mut entries = load_entries(key_event_path, KeOrigin::KeyEvent)?;
    if let Some(path) = relationship_path {
        entries.extend(load_entries(path, KeOrigin::Relationship)?);
    }
    Ok(entries)
}

#[cfg(test)]
mod tests {
    use super::*;

    const KE_FILE: &str = "ID\tTitle\n55\tOxidative Stress\n142\tHepatocyte apoptosis, increased\n\n999\tafter the blank line\n";

    #[test]
    fn test_header_skipped_blank_line_stops() {
        let entries = parse_entries(KE_FILE, KeOrigin::KeyEvent);
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].id, "55");
        assert_eq!(entries[0].description, "oxidative stress");
        assert_eq!(entries[0].origin, KeOrigin::KeyEvent);
        // ", " collapsed to a space.
        assert_eq!(entries[1].description, "hepatocyte apoptosis increased");
    }

    #[test]
    fn test_not_applicable_marker_removed() {
        let entries = parse_entries("ID\tTitle\n7\tn a liver injury\n", KeOrigin::KeyEvent);
        assert_eq!(entries[0].description, "liver injury");
    }

    #[test]
    fn test_relationship_origin_tag() {
        let entries = parse_entries("ID\tTitle\n3\tA leads to B\n", KeOrigin::Relationship);
        assert_eq!(entries[0].origin, KeOrigin::Relationship);
    }

    #[test]
    fn test_combined_load_appends_relationships() {
        let dir = tempfile::TempDir::new().unwrap();
        let ke = dir.path().join("ke.txt");
        let ker = dir.path().join("ker.txt");
        std::fs::write(&ke, "ID\tTitle\n1\toxidative stress\n").unwrap();
        std::fs::write(&ker, "ID\tTitle\n9\tstress leads apoptosis\n").unwrap();

        let entries = load_key_event_data(&ke, Some(&ker)).unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].origin, KeOrigin::KeyEvent);
        assert_eq!(entries[1].origin, KeOrigin::Relationship);
    }
}
