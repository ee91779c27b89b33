/// Lower-cases a single character without changing the character count.
///
/// Characters whose lower-case form spans several characters are kept as is, so
/// indices computed on folded text stay valid for the original text.
#[inline]
pub fn fold_char(ch: char) -> char {
    let mut lower = ch.to_lowercase();
    match (lower.next(), lower.next()) {
        (Some(folded), None) => folded,
        _ => ch,
    }
}

/// Appends the characters of `text` to `buf`, folding case unless `case_sensitive`
pub fn fill_chars(buf: &mut Vec<char>, text: &str, case_sensitive: bool) {
    buf.clear();
    if case_sensitive {
        buf.extend(text.chars());
    } else {
        buf.extend(text.chars().map(fold_char));
    }
}

/// Position of the first occurrence of `needle` in `haystack` at or after `from`
pub fn index_of(haystack: &[char], needle: &[char], from: usize) -> Option<usize> {
    if needle.len() > haystack.len() {
        return None;
    }
    let last_start = haystack.len() - needle.len();
    (from.min(haystack.len())..=last_start).find(|&i| haystack[i..i + needle.len()] == *needle)
}

/// Position of the last occurrence of `needle` in `haystack` starting at or before `from`
pub fn last_index_of(haystack: &[char], needle: &[char], from: usize) -> Option<usize> {
    if needle.len() > haystack.len() {
        return None;
    }
    let first_start = from.min(haystack.len() - needle.len());
    (0..=first_start)
        .rev()
        .find(|&i| haystack[i..i + needle.len()] == *needle)
}
