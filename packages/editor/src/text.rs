//! Code-point helpers.
//!
//! Every offset in the editor counts Unicode scalar values, never bytes.

/// Number of code points in `text`
pub fn char_len(text: &str) -> usize {
    text.chars().count()
}

/// Byte index of the code point at `offset`, clamped to the end of `text`
fn byte_index(text: &str, offset: usize) -> usize {
    text.char_indices()
        .nth(offset)
        .map(|(idx, _)| idx)
        .unwrap_or(text.len())
}

/// Split `text` at a code-point offset
pub fn split_at_char(text: &str, offset: usize) -> (&str, &str) {
    text.split_at(byte_index(text, offset))
}

/// Text before the code-point offset
pub fn prefix(text: &str, offset: usize) -> &str {
    split_at_char(text, offset).0
}

/// Text from the code-point offset onward
pub fn suffix(text: &str, offset: usize) -> &str {
    split_at_char(text, offset).1
}

/// Remove the code points in `start..end`
pub fn remove_range(text: &str, start: usize, end: usize) -> String {
    let (start, end) = if start <= end { (start, end) } else { (end, start) };
    let mut out = String::with_capacity(text.len());
    out.push_str(prefix(text, start));
    out.push_str(suffix(text, end));
    out
}

/// Insert `insert` at a code-point offset
pub fn splice(text: &str, offset: usize, insert: &str) -> String {
    let (before, after) = split_at_char(text, offset);
    let mut out = String::with_capacity(text.len() + insert.len());
    out.push_str(before);
    out.push_str(insert);
    out.push_str(after);
    out
}
