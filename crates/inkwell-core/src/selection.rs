//! Anchor-based selection.
//!
//! A selection is entered with [`Document::toggle_selection`], which snapshots the cursor as
//! the anchor. The live range is always `(anchor, cursor)` reordered so the smaller position
//! comes first.

use crate::document::Document;
use crate::position::Position;
use crate::text::{byte_offset, char_len, split_lines};

/// Selection mode state: whether it is active and where it was anchored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Selection {
    anchor: Option<Position>,
}

impl Selection {
    /// Whether selection mode is on.
    pub fn is_active(&self) -> bool {
        self.anchor.is_some()
    }

    /// The anchor recorded when selection mode was entered.
    pub fn anchor(&self) -> Option<Position> {
        self.anchor
    }

    pub(crate) fn set_anchor(&mut self, anchor: Position) {
        self.anchor = Some(anchor);
    }

    pub(crate) fn clear(&mut self) {
        self.anchor = None;
    }
}

fn ordered(a: Position, b: Position) -> (Position, Position) {
    if a <= b { (a, b) } else { (b, a) }
}

impl Document {
    /// Selection mode state.
    pub fn selection(&self) -> Selection {
        self.selection
    }

    /// Enter selection mode anchored at the cursor, or leave it (text is never touched).
    pub fn toggle_selection(&mut self) {
        if self.selection.is_active() {
            self.selection.clear();
        } else {
            self.selection.set_anchor(self.cursor);
        }
    }

    /// Leave selection mode.
    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    /// `true` iff selection mode is on and the anchor differs from the cursor.
    pub fn has_selection(&self) -> bool {
        self.selection
            .anchor()
            .is_some_and(|anchor| anchor != self.cursor)
    }

    /// The normalized `(start, end)` of the live selection, if selection mode is on.
    ///
    /// Both ends are clamped into the document, so the range is always addressable.
    pub fn selection_range(&self) -> Option<(Position, Position)> {
        let anchor = self.selection.anchor()?;
        Some(ordered(
            self.clamp_position(anchor),
            self.clamp_position(self.cursor),
        ))
    }

    /// The selected text, or `""` when there is no non-empty selection.
    pub fn selected_text(&self) -> String {
        if !self.has_selection() {
            return String::new();
        }
        let Some((start, end)) = self.selection_range() else {
            return String::new();
        };

        let first = &self.lines[start.row];
        if start.row == end.row {
            return first[byte_offset(first, start.col)..byte_offset(first, end.col)].to_string();
        }

        let mut out = String::new();
        out.push_str(&first[byte_offset(first, start.col)..]);
        for line in &self.lines[start.row + 1..end.row] {
            out.push('\n');
            out.push_str(line);
        }
        let last = &self.lines[end.row];
        out.push('\n');
        out.push_str(&last[..byte_offset(last, end.col)]);
        out
    }

    /// Replace the selected range with `text` and leave selection mode.
    ///
    /// The prefix of the start line and the suffix of the end line are kept and stitched to
    /// the first and last lines of `text`; lines strictly between are dropped. A zero-width
    /// range (or no active selection, which uses the cursor as both ends) inserts at that
    /// point. The cursor ends after the inserted text.
    pub fn replace_selection(&mut self, text: &str) {
        let (start, end) = self
            .selection_range()
            .unwrap_or_else(|| {
                let at = self.clamp_position(self.cursor);
                (at, at)
            });

        let mut segments = split_lines(text);
        let segment_count = segments.len();
        let last_len = segments.last().map_or(0, |s| char_len(s));

        let start_line = &self.lines[start.row];
        let prefix = &start_line[..byte_offset(start_line, start.col)];
        let end_line = &self.lines[end.row];
        let suffix = &end_line[byte_offset(end_line, end.col)..];

        segments[0].insert_str(0, prefix);
        segments[segment_count - 1].push_str(suffix);

        self.lines.splice(start.row..=end.row, segments);

        self.cursor = if segment_count == 1 {
            Position::new(start.row, start.col + last_len)
        } else {
            Position::new(start.row + segment_count - 1, last_len)
        };
        self.selection.clear();
        self.modified = true;
    }
}
