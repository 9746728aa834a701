//! Cursor movement.
//!
//! Movement never touches text and always leaves the cursor addressable.

use crate::document::Document;
use crate::position::Position;

/// Rows moved by a page up/down.
pub const PAGE_ROWS: usize = 10;

impl Document {
    /// Move the cursor to `pos`, clamped into the document.
    pub fn move_to(&mut self, pos: Position) {
        self.cursor = self.clamp_position(pos);
    }

    /// One column left, wrapping to the end of the previous line.
    pub fn move_left(&mut self) {
        let Position { row, col } = self.clamp_position(self.cursor);
        self.cursor = if col > 0 {
            Position::new(row, col - 1)
        } else if row > 0 {
            Position::new(row - 1, self.line_len(row - 1))
        } else {
            Position::new(row, col)
        };
    }

    /// One column right, wrapping to the start of the next line.
    pub fn move_right(&mut self) {
        let Position { row, col } = self.clamp_position(self.cursor);
        self.cursor = if col < self.line_len(row) {
            Position::new(row, col + 1)
        } else if row + 1 < self.lines.len() {
            Position::new(row + 1, 0)
        } else {
            Position::new(row, col)
        };
    }

    /// One row up, keeping the column where the shorter line allows.
    pub fn move_up(&mut self) {
        self.move_rows(-1);
    }

    /// One row down, keeping the column where the shorter line allows.
    pub fn move_down(&mut self) {
        self.move_rows(1);
    }

    /// [`PAGE_ROWS`] rows up.
    pub fn page_up(&mut self) {
        self.move_rows(-(PAGE_ROWS as isize));
    }

    /// [`PAGE_ROWS`] rows down.
    pub fn page_down(&mut self) {
        self.move_rows(PAGE_ROWS as isize);
    }

    /// Start of the current line.
    pub fn move_line_start(&mut self) {
        self.cursor.col = 0;
    }

    /// End of the current line.
    pub fn move_line_end(&mut self) {
        self.cursor.col = self.line_len(self.cursor.row);
    }

    /// `(0, 0)`.
    pub fn move_top(&mut self) {
        self.cursor = Position::origin();
    }

    /// Column 0 of the last line.
    pub fn move_bottom(&mut self) {
        self.cursor = Position::new(self.lines.len() - 1, 0);
    }

    /// Jump to a 1-based line number (clamped), column 0. Returns the 1-based line reached.
    pub fn go_to_line(&mut self, line_number: usize) -> usize {
        let row = line_number.saturating_sub(1).min(self.lines.len() - 1);
        self.cursor = Position::new(row, 0);
        row + 1
    }

    fn move_rows(&mut self, delta: isize) {
        let max_row = self.lines.len() - 1;
        let row = self.cursor.row.saturating_add_signed(delta).min(max_row);
        self.cursor = self.clamp_position(Position::new(row, self.cursor.col));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc() -> Document {
        Document::from_text("hello\nhi\nworld")
    }

    #[test]
    fn test_left_right_wrap_across_lines() {
        let mut d = doc();
        d.move_to(Position::new(1, 0));
        d.move_left();
        assert_eq!(d.cursor(), Position::new(0, 5));
        d.move_right();
        assert_eq!(d.cursor(), Position::new(1, 0));
    }

    #[test]
    fn test_left_at_origin_and_right_at_end_stay() {
        let mut d = doc();
        d.move_left();
        assert_eq!(d.cursor(), Position::origin());
        d.move_to(Position::new(2, 5));
        d.move_right();
        assert_eq!(d.cursor(), Position::new(2, 5));
    }

    #[test]
    fn test_vertical_movement_clamps_column() {
        let mut d = doc();
        d.move_to(Position::new(0, 5));
        d.move_down();
        assert_eq!(d.cursor(), Position::new(1, 2));
        d.move_up();
        assert_eq!(d.cursor(), Position::new(0, 2));
        d.move_up();
        assert_eq!(d.cursor(), Position::new(0, 2));
    }

    #[test]
    fn test_paging_clamps_to_document() {
        let mut d = doc();
        d.page_down();
        assert_eq!(d.cursor().row, 2);
        d.page_up();
        assert_eq!(d.cursor().row, 0);
    }

    #[test]
    fn test_line_start_end_and_jumps() {
        let mut d = doc();
        d.move_to(Position::new(2, 2));
        d.move_line_end();
        assert_eq!(d.cursor(), Position::new(2, 5));
        d.move_line_start();
        assert_eq!(d.cursor(), Position::new(2, 0));
        d.move_top();
        assert_eq!(d.cursor(), Position::origin());
        d.move_bottom();
        assert_eq!(d.cursor(), Position::new(2, 0));
    }

    #[test]
    fn test_go_to_line_is_one_based_and_clamped() {
        let mut d = doc();
        assert_eq!(d.go_to_line(2), 2);
        assert_eq!(d.cursor(), Position::new(1, 0));
        assert_eq!(d.go_to_line(0), 1);
        assert_eq!(d.go_to_line(99), 3);
        assert_eq!(d.cursor(), Position::new(2, 0));
    }
}
