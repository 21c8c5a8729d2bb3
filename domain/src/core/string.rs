//! String utilities for the domain layer.

/// Truncate a string to a maximum length with ellipsis (UTF-8 safe)
///
/// Uses byte length for max_len but ensures truncation occurs at valid
/// UTF-8 character boundaries.
pub fn truncate(s: &str, max_len: usize) -> String {
    if s.len() <= max_len {
        s.to_string()
    } else {
        let target = max_len.saturating_sub(3);
        let mut end = target.min(s.len());
        while end > 0 && !s.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}...", &s[..end])
    }
}

/// Single-line preview of a contribution, for log lines and spinners.
pub fn preview(s: &str, max_len: usize) -> String {
    let flattened = s.split_whitespace().collect::<Vec<_>>().join(" ");
    truncate(&flattened, max_len)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_ascii() {
        assert_eq!(truncate("hello", 10), "hello");
        assert_eq!(truncate("hello world", 8), "hello...");
    }

    #[test]
    fn test_truncate_multibyte() {
        // Each of these characters is 3 bytes wide
        assert_eq!(truncate("会议讨论", 30), "会议讨论");
        // max_len=10 -> target=7 -> back to char boundary at 6
        assert_eq!(truncate("会议讨论开始", 10), "会议...");
    }

    #[test]
    fn test_preview_flattens_whitespace() {
        assert_eq!(preview("first line\n\n  second   line", 100), "first line second line");
        assert_eq!(preview("a b c d e f", 8), "a b c...");
    }
}
