//! Common utility functions used across modules.

/// Sanitize a subscription key into a filesystem-safe directory name.
///
/// Characters `<>:"/\|?*` and control characters (0x00-0x1F) become `_`;
/// the key is trimmed first and an empty result falls back to `default`.
///
/// # Examples
/// ```
/// use subrefine::utils::sanitize_key;
/// assert_eq!(sanitize_key("my list"), "my list");
/// assert_eq!(sanitize_key("a/b:c"), "a_b_c");
/// assert_eq!(sanitize_key("   "), "default");
/// ```
pub fn sanitize_key(key: &str) -> String {
    let cleaned: String = key
        .trim()
        .chars()
        .map(|c| {
            if matches!(c, '<' | '>' | ':' | '"' | '/' | '\\' | '|' | '?' | '*') || (c as u32) < 0x20
            {
                '_'
            } else {
                c
            }
        })
        .collect();
    if cleaned.is_empty() {
        "default".to_string()
    } else {
        cleaned
    }
}

/// Format a count with K/M suffix for compact display.
///
/// # Examples
/// ```
/// use subrefine::utils::format_count;
/// assert_eq!(format_count(500), "500");
/// assert_eq!(format_count(1500), "1.5K");
/// ```
pub fn format_count(count: usize) -> String {
    if count >= 1_000_000 {
        format!("{:.1}M", count as f64 / 1_000_000.0)
    } else if count >= 1_000 {
        format!("{:.1}K", count as f64 / 1_000.0)
    } else {
        count.to_string()
    }
}

/// Format bytes in human-readable form (KB, MB, GB).
///
/// # Examples
/// ```
/// use subrefine::utils::format_bytes;
/// assert_eq!(format_bytes(1024), "1.0 KB");
/// ```
pub fn format_bytes(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;

    if bytes >= GB {
        format!("{:.1} GB", bytes as f64 / GB as f64)
    } else if bytes >= MB {
        format!("{:.1} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.1} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} B", bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_key_passthrough() {
        assert_eq!(sanitize_key("plain-name_01"), "plain-name_01");
        assert_eq!(sanitize_key("with spaces"), "with spaces");
    }

    #[test]
    fn test_sanitize_key_replaces_invalid() {
        assert_eq!(sanitize_key("a/b\\c:d"), "a_b_c_d");
        assert_eq!(sanitize_key("<x>|y?z*"), "_x___y_z_");
        assert_eq!(sanitize_key("quo\"te"), "quo_te");
    }

    #[test]
    fn test_sanitize_key_replaces_control_chars() {
        assert_eq!(sanitize_key("a\x00b\x1fc"), "a_b_c");
        assert_eq!(sanitize_key("tab\there"), "tab_here");
    }

    #[test]
    fn test_sanitize_key_empty_becomes_default() {
        assert_eq!(sanitize_key(""), "default");
        assert_eq!(sanitize_key("   "), "default");
        assert_eq!(sanitize_key("\t\n"), "default");
    }

    #[test]
    fn test_sanitize_key_trims_first() {
        assert_eq!(sanitize_key("  name  "), "name");
    }

    #[test]
    fn test_sanitize_key_keeps_unicode() {
        assert_eq!(sanitize_key("节点列表"), "节点列表");
    }

    #[test]
    fn test_format_count() {
        assert_eq!(format_count(0), "0");
        assert_eq!(format_count(999), "999");
        assert_eq!(format_count(1000), "1.0K");
        assert_eq!(format_count(1500), "1.5K");
        assert_eq!(format_count(1_000_000), "1.0M");
    }

    #[test]
    fn test_format_bytes() {
        assert_eq!(format_bytes(0), "0 B");
        assert_eq!(format_bytes(500), "500 B");
        assert_eq!(format_bytes(1024), "1.0 KB");
        assert_eq!(format_bytes(1_500_000), "1.4 MB");
        assert_eq!(format_bytes(1_500_000_000), "1.4 GB");
    }
}
