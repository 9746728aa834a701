//! Terminal cell geometry for document lines.
//!
//! Document columns count `char`s; the terminal counts cells. Widths follow UAX #11 via
//! `unicode-width`, and `'\t'` advances to the next tab stop.

use unicode_width::UnicodeWidthChar;

/// Cell width of a non-tab character. Zero-width and control characters take one cell so the
/// cursor never overlaps them.
pub fn char_width(ch: char) -> usize {
    match UnicodeWidthChar::width(ch) {
        Some(0) | None => 1,
        Some(width) => width,
    }
}

/// Width of `ch` when it starts at cell `cell_offset` of its line.
pub fn cell_width_at(ch: char, cell_offset: usize, tab_width: usize) -> usize {
    if ch == '\t' {
        let tab_width = tab_width.max(1);
        tab_width - cell_offset % tab_width
    } else {
        char_width(ch)
    }
}

/// Cell offset of `column` within `line`.
pub fn visual_x_for_column(line: &str, column: usize, tab_width: usize) -> usize {
    let mut x = 0usize;
    for ch in line.chars().take(column) {
        x = x.saturating_add(cell_width_at(ch, x, tab_width));
    }
    x
}

/// Gutter width for `line_count` lines: at least three digits plus a separating space.
pub fn gutter_width(line_count: usize) -> usize {
    line_count.to_string().len().max(3) + 1
}
