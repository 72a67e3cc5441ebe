//! Compound label conventions and label-list loading.
//!
//! A compound label is an adjective and a noun joined by [`SEPARATOR`],
//! e.g. `old_buses`. Label lists are newline-delimited; only the first
//! tab-separated field of each line is the label.

use std::collections::BTreeSet;
use std::path::Path;

use crate::error::OntologyError;

/// Joins the adjective and noun of a compound label.
pub const SEPARATOR: char = '_';

/// Collapsed lookup form: lowercase with separators and whitespace removed.
///
/// `"Old_Buses"`, `"old buses"` and `"oldbuses"` all collapse to `"oldbuses"`.
pub fn collapse(label: &str) -> String {
    label
        .chars()
        .filter(|c| *c != SEPARATOR && !c.is_whitespace())
        .flat_map(char::to_lowercase)
        .collect()
}

/// Normalize a raw user tag: trimmed, lowercase, inner spaces become the separator.
pub fn normalize_tag(raw: &str) -> String {
    let separator = SEPARATOR.to_string();
    raw.split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join(separator.as_str())
}

/// Split a compound label at its first separator into `(adjective, noun)`.
pub fn split_label(label: &str) -> Option<(&str, &str)> {
    label
        .split_once(SEPARATOR)
        .filter(|(adjective, noun)| !adjective.is_empty() && !noun.is_empty())
}

/// Load a newline-delimited label list.
///
/// Blank lines and lines starting with `#` are skipped.
pub fn load_labels(path: &Path) -> Result<BTreeSet<String>, OntologyError> {
    let content = std::fs::read_to_string(path).map_err(|e| OntologyError::Read {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;
    let labels = parse_labels(&content);

    tracing::info!("Loaded {} labels from {:?}", labels.len(), path);

    Ok(labels)
}

/// Parse label list content (see [`load_labels`]).
pub fn parse_labels(content: &str) -> BTreeSet<String> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .filter_map(|line| line.split('\t').next())
        .map(|label| label.trim().to_string())
        .filter(|label| !label.is_empty())
        .collect()
}
