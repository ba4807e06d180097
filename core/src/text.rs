//! Line splitting shared by every derived view.

/// Split `text` into lines on `'\n'`.
///
/// Matches the UI's notion of lines exactly: an empty string is one empty
/// line, and a trailing newline produces a trailing empty line. `'\r'` is
/// ordinary content.
pub fn split_lines(text: &str) -> Vec<&str> {
    text.split('\n').collect()
}

/// Number of lines [`split_lines`] would produce, without allocating.
pub fn line_count(text: &str) -> usize {
    text.bytes().filter(|&b| b == b'\n').count() + 1
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_text_is_one_empty_line() {
        assert_eq!(split_lines(""), vec![""]);
        assert_eq!(line_count(""), 1);
    }

    #[test]
    fn trailing_newline_adds_empty_line() {
        assert_eq!(split_lines("a\nb\n"), vec!["a", "b", ""]);
        assert_eq!(line_count("a\nb\n"), 3);
    }

    #[test]
    fn carriage_return_stays_in_content() {
        assert_eq!(split_lines("a\r\nb"), vec!["a\r", "b"]);
    }
}
