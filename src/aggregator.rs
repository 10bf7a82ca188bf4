//! Dedup and output projections for normalized URI lists.

use std::collections::HashSet;

/// Tail length used when the configured value is zero.
pub const DEFAULT_TAIL_SIZE: usize = 100;

/// Deduplicate entries, preserving first-seen order.
///
/// Entries are trimmed first; empties are dropped. Equality is exact
/// post-trim string equality: no URI-aware equivalence, so the same server
/// with reordered query parameters counts as two entries.
pub fn dedupe<I>(entries: I) -> Vec<String>
where
    I: IntoIterator<Item = String>,
{
    let mut seen: HashSet<String> = HashSet::new();
    let mut out = Vec::new();
    for entry in entries {
        let trimmed = entry.trim();
        if trimmed.is_empty() || seen.contains(trimmed) {
            continue;
        }
        seen.insert(trimmed.to_string());
        out.push(trimmed.to_string());
    }
    out
}

/// The full output projection: a copy sorted by lexicographic byte order.
pub fn sorted_full(normal: &[String]) -> Vec<String> {
    let mut sorted = normal.to_vec();
    sorted.sort_unstable();
    sorted
}

/// The lite output projection: the last `min(n, len)` entries in their
/// original (insertion) order. Never sorted. `n == 0` falls back to
/// [`DEFAULT_TAIL_SIZE`].
pub fn tail(normal: &[String], n: usize) -> Vec<String> {
    let n = if n == 0 { DEFAULT_TAIL_SIZE } else { n };
    let n = n.min(normal.len());
    normal[normal.len() - n..].to_vec()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn list(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_dedupe_preserves_first_seen_order() {
        let deduped = dedupe(list(&["ss://b", "ss://a", "ss://b", "ss://c", "ss://a"]));
        assert_eq!(deduped, list(&["ss://b", "ss://a", "ss://c"]));
    }

    #[test]
    fn test_dedupe_trims_before_comparing() {
        let deduped = dedupe(list(&["ss://a", "  ss://a  ", "\tss://a"]));
        assert_eq!(deduped, list(&["ss://a"]));
    }

    #[test]
    fn test_dedupe_drops_empties() {
        let deduped = dedupe(list(&["", "   ", "ss://a", "\t"]));
        assert_eq!(deduped, list(&["ss://a"]));
    }

    #[test]
    fn test_dedupe_is_exact_not_semantic() {
        // Reordered query parameters are different entries
        let deduped = dedupe(list(&["ss://h?a=1&b=2", "ss://h?b=2&a=1"]));
        assert_eq!(deduped.len(), 2);
    }

    #[test]
    fn test_dedupe_empty_input() {
        let deduped = dedupe(Vec::<String>::new());
        assert!(deduped.is_empty());
    }

    #[test]
    fn test_sorted_full_lexicographic() {
        let normal = list(&["ss://b", "ss://A", "ss://a", "vless://x"]);
        let sorted = sorted_full(&normal);
        // Byte order: uppercase before lowercase
        assert_eq!(sorted, list(&["ss://A", "ss://a", "ss://b", "vless://x"]));
        // Input untouched
        assert_eq!(normal[0], "ss://b");
    }

    #[test]
    fn test_tail_shorter_than_n() {
        let normal = list(&["a", "b", "c"]);
        assert_eq!(tail(&normal, 10), normal);
    }

    #[test]
    fn test_tail_takes_last_n_in_order() {
        let normal = list(&["e", "d", "c", "b", "a"]);
        assert_eq!(tail(&normal, 2), list(&["b", "a"]));
    }

    #[test]
    fn test_tail_zero_means_default() {
        let normal: Vec<String> = (0..250).map(|i| format!("ss://{i:04}")).collect();
        let t = tail(&normal, 0);
        assert_eq!(t.len(), DEFAULT_TAIL_SIZE);
        assert_eq!(t[0], "ss://0150");
        assert_eq!(t[99], "ss://0249");
    }

    #[test]
    fn test_tail_is_independent_copy() {
        let normal = list(&["a", "b"]);
        let mut t = tail(&normal, 2);
        t[0] = "mutated".to_string();
        assert_eq!(normal[0], "a");
    }

    #[test]
    fn test_tail_empty_input() {
        assert!(tail(&[], 5).is_empty());
        assert!(tail(&[], 0).is_empty());
    }
}
