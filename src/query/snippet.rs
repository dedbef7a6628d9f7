use crate::utils::find_in_original;
use serde::Serialize;

const ELLIPSIS: &str = "…";

/// Excerpt of a record's text, with the byte range of the highlighted match.
///
/// `match_start == match_end` means nothing is highlighted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Snippet {
    pub text: String,
    pub match_start: usize,
    pub match_end: usize,
}

impl Snippet {
    pub fn has_highlight(&self) -> bool {
        self.match_end > self.match_start
    }

    /// The highlighted part of the snippet
    pub fn highlighted(&self) -> &str {
        &self.text[self.match_start..self.match_end]
    }
}

/// Excerpt of about `width` chars around the first case-insensitive
/// occurrence of `needle_folded` in `text`.
pub fn make_snippet(text: &str, needle_folded: &str, width: usize) -> Option<Snippet> {
    let (start, end) = find_in_original(text, needle_folded)?;

    let lead = width / 3;
    let window_start = text[..start]
        .char_indices()
        .rev()
        .take(lead)
        .last()
        .map(|(i, _)| i)
        .unwrap_or(start);

    Some(build(text, window_start, start, end, width))
}

/// Excerpt of the first `width` chars of `text`, nothing highlighted
pub fn leading_snippet(text: &str, width: usize) -> Option<Snippet> {
    if text.is_empty() {
        return None;
    }
    Some(build(text, 0, 0, 0, width))
}

fn build(text: &str, window_start: usize, start: usize, end: usize, width: usize) -> Snippet {
    let window_end = text[window_start..]
        .char_indices()
        .nth(width)
        .map(|(i, _)| window_start + i)
        .unwrap_or(text.len())
        .max(end);

    let prefix = if window_start > 0 { ELLIPSIS } else { "" };
    let suffix = if window_end < text.len() { ELLIPSIS } else { "" };

    let mut snippet = String::with_capacity(window_end - window_start + 2 * ELLIPSIS.len());
    snippet.push_str(prefix);
    // Single-byte replacements keep match offsets valid
    snippet.extend(text[window_start..window_end].chars().map(|c| match c {
        '\n' | '\r' | '\t' => ' ',
        other => other,
    }));
    snippet.push_str(suffix);

    let shift = prefix.len();
    Snippet {
        text: snippet,
        match_start: shift + start.saturating_sub(window_start),
        match_end: shift + end.saturating_sub(window_start),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snippet_short_text() {
        let snippet = make_snippet("install CUDA", "cuda", 120).unwrap();
        assert_eq!(snippet.text, "install CUDA");
        assert_eq!(snippet.highlighted(), "CUDA");
    }

    #[test]
    fn test_snippet_trims_both_sides() {
        let text = format!("{}needle{}", "a".repeat(100), "b".repeat(100));
        let snippet = make_snippet(&text, "needle", 30).unwrap();

        assert!(snippet.text.starts_with(ELLIPSIS));
        assert!(snippet.text.ends_with(ELLIPSIS));
        assert_eq!(snippet.highlighted(), "needle");
        // 10 chars of lead, then the window runs 30 chars from its start
        assert_eq!(snippet.text.chars().count(), 30 + 2);
    }

    #[test]
    fn test_snippet_keeps_long_match_whole() {
        let text = "x".repeat(10) + &"y".repeat(50);
        let needle = "y".repeat(50);
        let snippet = make_snippet(&text, &needle, 12).unwrap();
        assert_eq!(snippet.highlighted(), needle);
        assert!(!snippet.text.ends_with(ELLIPSIS));
    }

    #[test]
    fn test_snippet_flattens_newlines() {
        let snippet = make_snippet("first line\nsecond GPU line", "gpu", 120).unwrap();
        assert_eq!(snippet.text, "first line second GPU line");
        assert_eq!(snippet.highlighted(), "GPU");
    }

    #[test]
    fn test_snippet_multibyte_text() {
        let text = "ééééééééé GPU ééééééééé";
        let snippet = make_snippet(text, "gpu", 6).unwrap();
        assert_eq!(snippet.highlighted(), "GPU");
    }

    #[test]
    fn test_snippet_no_match() {
        assert!(make_snippet("install CUDA", "opencl", 120).is_none());
    }

    #[test]
    fn test_leading_snippet() {
        let snippet = leading_snippet("abcdefghij", 4).unwrap();
        assert_eq!(snippet.text, "abcd…");
        assert!(!snippet.has_highlight());
        assert!(leading_snippet("", 4).is_none());
    }
}
