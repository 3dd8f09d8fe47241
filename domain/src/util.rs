//! Shared utility functions.

/// First `max_chars` characters of `s`, for log lines.
///
/// Counts `char`s rather than bytes so multi-byte text is never split.
pub fn preview(s: &str, max_chars: usize) -> &str {
    match s.char_indices().nth(max_chars) {
        Some((end, _)) => &s[..end],
        None => s,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preview_ascii() {
        assert_eq!(preview("hello world", 5), "hello");
    }

    #[test]
    fn preview_short_input_unchanged() {
        assert_eq!(preview("hi", 10), "hi");
        assert_eq!(preview("", 3), "");
    }

    #[test]
    fn preview_counts_chars_not_bytes() {
        assert_eq!(preview("あのね", 2), "あの");
    }
}
