//! Cursor coordinates.

use std::cmp::Ordering;
use std::fmt;

/// A `(row, col)` location inside a [`crate::Document`].
///
/// `row` indexes the line sequence; `col` counts code points (`char`s) into that line,
/// where `col == line length` means "at end of line".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Position {
    /// Zero-based line index.
    pub row: usize,
    /// Zero-based column in code points.
    pub col: usize,
}

impl Position {
    /// Create a new position.
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// The document origin `(0, 0)`.
    pub fn origin() -> Self {
        Self::default()
    }
}

impl Ord for Position {
    fn cmp(&self, other: &Self) -> Ordering {
        self.row
            .cmp(&other.row)
            .then_with(|| self.col.cmp(&other.col))
    }
}

impl PartialOrd for Position {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.row + 1, self.col + 1)
    }
}
