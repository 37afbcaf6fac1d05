//! Small string helpers shared by the parser, renderers and logging.

/// Truncate a string for logging purposes.
///
/// Long strings are cut to `max` characters with an ellipsis and byte count
/// indicator appended. Cuts always land on a character boundary.
///
/// # Examples
///
/// ```
/// use digest_news::utils::truncate_for_log;
///
/// assert_eq!(truncate_for_log("short", 100), "short");
/// assert_eq!(truncate_for_log(&"a".repeat(500), 10), "aaaaaaaaaa…(+490 bytes)");
/// ```
pub fn truncate_for_log(s: &str, max: usize) -> String {
    match s.char_indices().nth(max) {
        None => s.to_string(),
        Some((cut, _)) => format!("{}…(+{} bytes)", &s[..cut], s.len() - cut),
    }
}

/// Shorten a summary for card-style display: at most `max` characters, with
/// `"..."` appended when anything was dropped.
pub fn truncate_summary(s: &str, max: usize) -> String {
    match s.char_indices().nth(max) {
        None => s.to_string(),
        Some((cut, _)) => format!("{}...", &s[..cut]),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_for_log_short_string() {
        let s = "Hello, world!";
        assert_eq!(truncate_for_log(s, 100), "Hello, world!");
    }

    #[test]
    fn test_truncate_for_log_long_string() {
        let s = "a".repeat(500);
        let result = truncate_for_log(&s, 100);
        assert!(result.starts_with(&"a".repeat(100)));
        assert!(result.contains("…(+400 bytes)"));
    }

    #[test]
    fn test_truncate_for_log_multibyte() {
        let s = "ééééé";
        assert_eq!(truncate_for_log(s, 2), "éé…(+6 bytes)");
    }

    #[test]
    fn test_truncate_summary() {
        assert_eq!(truncate_summary("short", 180), "short");
        let exact = "x".repeat(180);
        assert_eq!(truncate_summary(&exact, 180), exact);
        let long = "y".repeat(200);
        let cut = truncate_summary(&long, 180);
        assert_eq!(cut.len(), 183);
        assert!(cut.ends_with("..."));
    }
}
