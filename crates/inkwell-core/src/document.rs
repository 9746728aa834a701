//! Line-oriented document model.
//!
//! A [`Document`] is an ordered, never-empty sequence of lines plus a modification flag,
//! the cursor, and the selection anchor. All text mutation primitives live here; the
//! selection-aware ones are in [`crate::selection`] and cursor movement in [`crate::cursor`].
//!
//! Out-of-range cursor coordinates are normalized rather than rejected, so none of the
//! primitives can fail.
//!
//! # Example
//!
//! ```rust
//! use inkwell_core::{Document, Position};
//!
//! let mut doc = Document::new();
//! doc.insert_text("Hi\nBye");
//! assert_eq!(doc.lines(), ["Hi", "Bye"]);
//! assert_eq!(doc.cursor(), Position::new(1, 3));
//! assert!(doc.is_modified());
//! ```

use crate::position::Position;
use crate::selection::Selection;
use crate::text::{byte_offset, char_len, split_lines};

/// The in-memory document: lines, modification flag, cursor and selection.
#[derive(Debug, Clone)]
pub struct Document {
    pub(crate) lines: Vec<String>,
    pub(crate) modified: bool,
    pub(crate) cursor: Position,
    pub(crate) selection: Selection,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    /// Create an empty document (`[""]`).
    pub fn new() -> Self {
        Self::from_lines(Vec::new())
    }

    /// Create a document by splitting `text` on line-feed boundaries.
    pub fn from_text(text: &str) -> Self {
        Self::from_lines(split_lines(text))
    }

    /// Create a document from already-split lines. An empty vector becomes `[""]`.
    pub fn from_lines(mut lines: Vec<String>) -> Self {
        if lines.is_empty() {
            lines.push(String::new());
        }
        Self {
            lines,
            modified: false,
            cursor: Position::origin(),
            selection: Selection::default(),
        }
    }

    /// All lines in document order.
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// The line at `row`, if any.
    pub fn line(&self, row: usize) -> Option<&str> {
        self.lines.get(row).map(String::as_str)
    }

    /// Number of lines (always at least one).
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Length of the line at `row` in code points (0 for rows past the end).
    pub fn line_len(&self, row: usize) -> usize {
        self.lines.get(row).map_or(0, |line| char_len(line))
    }

    /// The line under the cursor.
    pub fn current_line(&self) -> &str {
        self.line(self.cursor.row).unwrap_or("")
    }

    /// Current cursor position.
    pub fn cursor(&self) -> Position {
        self.cursor
    }

    /// Whether the document changed since it was created, loaded or last saved.
    pub fn is_modified(&self) -> bool {
        self.modified
    }

    /// Clear the modification flag after a successful save.
    pub fn mark_saved(&mut self) {
        self.modified = false;
    }

    /// Lines joined with line-feed separators.
    pub fn all_text(&self) -> String {
        self.lines.join("\n")
    }

    /// Insert `ch` at the cursor and advance the cursor by one column.
    ///
    /// A `'\n'` is routed to [`Document::insert_newline`] so lines never contain a line feed.
    pub fn insert_rune(&mut self, ch: char) {
        if ch == '\n' {
            self.insert_newline();
            return;
        }
        self.prepare_insertion_point();
        let Position { row, col } = self.cursor;
        let line = &mut self.lines[row];
        let at = byte_offset(line, col);
        line.insert(at, ch);
        self.cursor.col += 1;
        self.modified = true;
    }

    /// Replace the code point under the cursor with `ch`, or append at end of line.
    pub fn overwrite_rune(&mut self, ch: char) {
        if ch == '\n' {
            self.insert_newline();
            return;
        }
        self.prepare_insertion_point();
        let Position { row, col } = self.cursor;
        let line = &mut self.lines[row];
        let at = byte_offset(line, col);
        match line[at..].chars().next() {
            Some(existing) => {
                let mut buf = [0u8; 4];
                line.replace_range(at..at + existing.len_utf8(), ch.encode_utf8(&mut buf));
            }
            None => line.push(ch),
        }
        self.cursor.col += 1;
        self.modified = true;
    }

    /// Split the current line at the cursor; the cursor moves to the start of the new line.
    ///
    /// A selection anchor at or after the split point moves with the text it was on.
    pub fn insert_newline(&mut self) {
        self.prepare_insertion_point();
        let Position { row, col } = self.cursor;
        let line = &mut self.lines[row];
        let at = byte_offset(line, col);
        let after = line.split_off(at);
        self.lines.insert(row + 1, after);
        self.cursor = Position::new(row + 1, 0);
        if let Some(anchor) = self.selection.anchor() {
            if anchor.row > row {
                self.selection.set_anchor(Position::new(anchor.row + 1, anchor.col));
            } else if anchor.row == row && anchor.col >= col {
                self.selection.set_anchor(Position::new(row + 1, anchor.col - col));
            }
        }
        self.modified = true;
    }

    /// Backspace: remove the code point before the cursor, or join with the previous line.
    ///
    /// Returns `false` (and changes nothing) at the document start.
    pub fn delete_backward(&mut self) -> bool {
        let row = self.cursor.row.min(self.lines.len() - 1);
        let col = self.cursor.col.min(self.line_len(row));

        if col > 0 {
            let line = &mut self.lines[row];
            let start = byte_offset(line, col - 1);
            let end = byte_offset(line, col);
            line.replace_range(start..end, "");
            self.cursor = Position::new(row, col - 1);
        } else if row > 0 {
            let current = self.lines.remove(row);
            let previous = &mut self.lines[row - 1];
            let join_col = char_len(previous);
            previous.push_str(&current);
            self.cursor = Position::new(row - 1, join_col);
        } else {
            self.cursor = Position::origin();
            return false;
        }

        self.modified = true;
        true
    }

    /// Remove the line under the cursor and return its content.
    ///
    /// The only line of a document is emptied instead of removed. The cursor moves to
    /// column 0 of the row that now occupies the position (clamped into range). A selection
    /// anchor below the removed row moves up with its line; one on the removed row moves to
    /// the cursor.
    pub fn delete_current_line(&mut self) -> String {
        let row = self.cursor.row.min(self.lines.len() - 1);
        let row_removed = self.lines.len() > 1;
        let removed = if row_removed {
            self.lines.remove(row)
        } else {
            std::mem::take(&mut self.lines[0])
        };
        self.cursor = Position::new(row.min(self.lines.len() - 1), 0);
        if let Some(anchor) = self.selection.anchor() {
            let anchor = if anchor.row == row {
                self.cursor
            } else if anchor.row > row && row_removed {
                Position::new(anchor.row - 1, anchor.col)
            } else {
                anchor
            };
            self.selection.set_anchor(self.clamp_position(anchor));
        }
        self.modified = true;
        removed
    }

    /// Insert `text` at the cursor as if it were typed.
    ///
    /// Every line feed behaves like [`Document::insert_newline`] and every other code point
    /// like [`Document::insert_rune`]; the cursor ends after the inserted block.
    pub fn insert_text(&mut self, text: &str) {
        for (idx, segment) in split_lines(text).iter().enumerate() {
            if idx > 0 {
                self.insert_newline();
            }
            self.insert_segment(segment);
        }
    }

    /// Replace the line under the cursor wholesale; the cursor moves to its end.
    pub fn replace_current_line(&mut self, text: &str) {
        let row = self.cursor.row.min(self.lines.len() - 1);
        self.lines[row] = text.to_string();
        self.cursor = Position::new(row, char_len(text));
        self.modified = true;
    }

    /// Replace the whole document with `text` split on line feeds.
    ///
    /// The cursor is reset to `(0, 0)` and selection mode is cleared.
    pub fn set_text(&mut self, text: &str) {
        self.lines = split_lines(text);
        self.cursor = Position::origin();
        self.selection.clear();
        self.modified = true;
    }

    /// Install a complete line sequence (undo restore, reformat) and clamp the cursor to it.
    pub fn set_lines(&mut self, lines: Vec<String>) {
        self.lines = lines;
        if self.lines.is_empty() {
            self.lines.push(String::new());
        }
        self.cursor = self.clamp_position(self.cursor);
        if let Some(anchor) = self.selection.anchor() {
            self.selection.set_anchor(self.clamp_position(anchor));
        }
        self.modified = true;
    }

    /// Clamp `pos` so that it addresses an existing row and a column within that row.
    pub fn clamp_position(&self, pos: Position) -> Position {
        let row = pos.row.min(self.lines.len() - 1);
        Position::new(row, pos.col.min(self.line_len(row)))
    }

    fn insert_segment(&mut self, segment: &str) {
        if segment.is_empty() {
            return;
        }
        self.prepare_insertion_point();
        let Position { row, col } = self.cursor;
        let line = &mut self.lines[row];
        let at = byte_offset(line, col);
        line.insert_str(at, segment);
        self.cursor.col += char_len(segment);
        self.modified = true;
    }

    /// Normalize the cursor before inserting: a row past the end appends a new empty line,
    /// and the column is clamped to the line length.
    fn prepare_insertion_point(&mut self) {
        if self.cursor.row >= self.lines.len() {
            self.lines.push(String::new());
            self.cursor.row = self.lines.len() - 1;
        }
        self.cursor.col = self.cursor.col.min(self.line_len(self.cursor.row));
    }
}
