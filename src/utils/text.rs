use memchr::memmem;

/// Lowercase `text` one char at a time.
///
/// Final sigma `ς` folds to `σ`, so `ΟΔΟΣ`, `οδος` and `οδοσ` all fold alike.
pub fn fold_case(text: &str) -> String {
    let mut folded = String::with_capacity(text.len());
    for ch in text.chars() {
        folded.extend(fold_char(ch));
    }
    folded
}

/// Folded form of a single char. `ς` and `σ` are both two bytes in UTF-8.
#[inline]
fn fold_char(ch: char) -> impl Iterator<Item = char> {
    ch.to_lowercase().map(|lower| if lower == 'ς' { 'σ' } else { lower })
}

/// Fold `text` and record, for every byte of the folded string, the byte
/// offset of the original char it came from.
///
/// The returned offsets have one extra trailing entry equal to `text.len()`.
pub fn fold_case_with_offsets(text: &str) -> (String, Vec<usize>) {
    let mut folded = String::with_capacity(text.len());
    let mut offsets = Vec::with_capacity(text.len() + 1);

    for (idx, ch) in text.char_indices() {
        for lower in fold_char(ch) {
            folded.push(lower);
            offsets.extend(std::iter::repeat_n(idx, lower.len_utf8()));
        }
    }
    offsets.push(text.len());

    (folded, offsets)
}

/// Byte position of the first occurrence of `needle` in `haystack`
#[inline]
pub fn find_folded(haystack: &str, needle: &str) -> Option<usize> {
    memmem::find(haystack.as_bytes(), needle.as_bytes())
}

/// Locate the first case-insensitive occurrence of `needle_folded` in `text`,
/// returned as a byte range into the original `text`.
pub fn find_in_original(text: &str, needle_folded: &str) -> Option<(usize, usize)> {
    if needle_folded.is_empty() {
        return None;
    }

    let (folded, offsets) = fold_case_with_offsets(text);
    let pos = find_folded(&folded, needle_folded)?;

    let start = offsets[pos];
    // The last matched byte may sit inside a multi-char expansion; end after
    // the whole original char it belongs to.
    let last = offsets[pos + needle_folded.len() - 1];
    let end = text[last..]
        .chars()
        .next()
        .map(|c| last + c.len_utf8())
        .unwrap_or(text.len());

    Some((start, end))
}
