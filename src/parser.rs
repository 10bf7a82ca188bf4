//! Line extraction and scheme filtering for subscription payloads.
//!
//! Turns a decoded payload into candidate URI entries: drops blanks and
//! comments, splits lines that concatenate several URIs with no delimiter,
//! keeps only allowed schemes and lowercases the scheme prefix.

use crate::config::SchemeSet;

/// Extract normalized URI entries from a decoded payload, in input order.
///
/// May produce more entries than there are input lines, since one line can
/// carry several concatenated URIs.
pub fn extract_entries(text: &str, schemes: &SchemeSet) -> Vec<String> {
    let mut out = Vec::new();
    for line in text.lines() {
        let line = line.trim();
        if line.is_empty() || is_comment(line) {
            continue;
        }
        for segment in split_concatenated(line) {
            let segment = segment.trim();
            if segment.is_empty() || is_comment(segment) {
                continue;
            }
            if !schemes.matches(segment) {
                continue;
            }
            out.push(normalize_scheme(segment));
        }
    }
    out
}

/// Comment rule: optional leading whitespace then `#`, `//` or `;`.
fn is_comment(line: &str) -> bool {
    let line = line.trim_start();
    line.starts_with('#') || line.starts_with("//") || line.starts_with(';')
}

/// Split a line that concatenates several `scheme://...` URIs without a
/// delimiter.
///
/// With at most one `://` the line is a single segment. Otherwise every
/// `://` occurrence marks a URI: its scheme start is found by walking
/// backward over ASCII letters, and each segment runs from one scheme
/// start up to (but not including) the next.
pub fn split_concatenated(line: &str) -> Vec<&str> {
    let positions: Vec<usize> = line.match_indices("://").map(|(idx, _)| idx).collect();
    if positions.len() <= 1 {
        return vec![line];
    }

    let bytes = line.as_bytes();
    let starts: Vec<usize> = positions
        .iter()
        .map(|&pos| {
            let mut start = pos;
            while start > 0 && bytes[start - 1].is_ascii_alphabetic() {
                start -= 1;
            }
            start
        })
        .collect();

    starts
        .iter()
        .enumerate()
        .map(|(i, &start)| {
            let end = starts.get(i + 1).copied().unwrap_or(line.len());
            &line[start..end]
        })
        .collect()
}

/// Lowercase the scheme prefix, leaving the rest of the entry byte-for-byte
/// intact. Entries without `://` are returned unchanged.
pub fn normalize_scheme(entry: &str) -> String {
    match entry.find("://") {
        Some(idx) => {
            let (scheme, rest) = entry.split_at(idx);
            let mut normalized = scheme.to_ascii_lowercase();
            normalized.push_str(rest);
            normalized
        }
        None => entry.to_string(),
    }
}
