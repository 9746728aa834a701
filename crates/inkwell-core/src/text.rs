/// Split `text` on LF into owned lines.
///
/// `N` newlines always produce `N + 1` lines, so trailing empty segments are kept.
/// A CR directly before a LF is dropped so pasted CRLF text does not leak `'\r'`
/// into the line model.
pub(crate) fn split_lines(text: &str) -> Vec<String> {
    text.split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line).to_string())
        .collect()
}

/// Number of code points in `line`.
pub(crate) fn char_len(line: &str) -> usize {
    line.chars().count()
}

/// Byte offset of the code point at `col`, or `line.len()` when `col` is at or past the end.
pub(crate) fn byte_offset(line: &str, col: usize) -> usize {
    line.char_indices()
        .nth(col)
        .map(|(idx, _)| idx)
        .unwrap_or(line.len())
}
