//! Glob matching for cache keys. `*` matches any run of characters,
//! including an empty one; every other character matches itself.

/// Checks if `key` matches the glob `pattern`.
///
/// ```
/// use rotacal_core::cache::pattern_matches;
///
/// assert!(pattern_matches("feed:*", "feed:https://example.com/rss"));
/// assert!(pattern_matches("feed:*rss", "feed:https://example.com/rss"));
/// assert!(!pattern_matches("feed:*", "notes:2025-10-26"));
/// ```
pub fn pattern_matches(pattern: &str, key: &str) -> bool {
    let mut segments = pattern.split('*');
    let head = segments.next().unwrap_or_default();
    let rest: Vec<&str> = segments.collect();

    let Some((tail, middle)) = rest.split_last() else {
        return pattern == key;
    };
    let Some(mut remaining) = key.strip_prefix(head) else {
        return false;
    };

    // Leftmost match for each middle segment leaves the most room for the tail.
    for segment in middle {
        match remaining.find(segment) {
            Some(pos) => remaining = &remaining[pos + segment.len()..],
            None => return false,
        }
    }

    remaining.ends_with(tail)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_match() {
        assert!(pattern_matches("feed:a", "feed:a"));
        assert!(!pattern_matches("feed:a", "feed:ab"));
        assert!(pattern_matches("", ""));
        assert!(!pattern_matches("", "x"));
    }

    #[test]
    fn test_lone_wildcard_matches_everything() {
        assert!(pattern_matches("*", ""));
        assert!(pattern_matches("*", "feed:https://a/rss"));
    }

    #[test]
    fn test_trailing_wildcard() {
        assert!(pattern_matches("feed:*", "feed:"));
        assert!(pattern_matches("feed:*", "feed:https://a/rss"));
        assert!(!pattern_matches("feed:*", "fee"));
    }

    #[test]
    fn test_leading_wildcard() {
        assert!(pattern_matches("*.rss", "feed:https://a/news.rss"));
        assert!(!pattern_matches("*.rss", "feed:https://a/news.xml"));
    }

    #[test]
    fn test_middle_wildcards() {
        assert!(pattern_matches("feed:*vnexpress*rss", "feed:https://vnexpress.net/rss/a.rss"));
        assert!(pattern_matches("a**b", "ab"));
        assert!(!pattern_matches("feed:*vnexpress*", "feed:https://tuoitre.vn/rss"));
    }

    #[test]
    fn test_segments_cannot_overlap() {
        assert!(!pattern_matches("a*a", "a"));
        assert!(pattern_matches("a*a", "aa"));
        assert!(!pattern_matches("ab*ba", "aba"));
    }
}
