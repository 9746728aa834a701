//! Bounded snapshot undo.
//!
//! Each entry is a full copy of the document lines taken immediately before a mutation.
//! The log keeps at most `max_undo` entries and drops the oldest first. There is no redo.
//!
//! Saving is a caller contract: whoever mutates a [`Document`] records a snapshot first.
//! [`crate::EditSession`] does this for every editing operation.

use std::collections::VecDeque;

use crate::document::Document;

/// Default number of snapshots kept.
pub const DEFAULT_UNDO_LIMIT: usize = 50;

/// Result of an [`UndoLog::undo`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UndoOutcome {
    /// The most recent snapshot was installed.
    Restored,
    /// The log was empty; nothing changed.
    NothingToUndo,
}

/// Bounded FIFO of whole-document snapshots.
#[derive(Debug, Clone)]
pub struct UndoLog {
    entries: VecDeque<Vec<String>>,
    max_undo: usize,
}

impl Default for UndoLog {
    fn default() -> Self {
        Self::new()
    }
}

impl UndoLog {
    /// Create a log holding up to [`DEFAULT_UNDO_LIMIT`] snapshots.
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_UNDO_LIMIT)
    }

    /// Create a log holding up to `max_undo` snapshots (at least one).
    pub fn with_capacity(max_undo: usize) -> Self {
        let max_undo = max_undo.max(1);
        Self {
            entries: VecDeque::with_capacity(max_undo),
            max_undo,
        }
    }

    /// Maximum number of snapshots kept.
    pub fn capacity(&self) -> usize {
        self.max_undo
    }

    /// Number of snapshots available to undo.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether there is nothing to undo.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drop all history (for example after loading a different file).
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Snapshot `document` lines. Evicts the oldest snapshot once the bound is exceeded.
    pub fn save(&mut self, document: &Document) {
        self.entries.push_back(document.lines().to_vec());
        if self.entries.len() > self.max_undo {
            self.entries.pop_front();
        }
    }

    /// Restore the most recent snapshot into `document` and discard it.
    ///
    /// The cursor (and selection anchor) are clamped to the restored lines rather than
    /// restored precisely.
    pub fn undo(&mut self, document: &mut Document) -> UndoOutcome {
        let Some(lines) = self.entries.pop_back() else {
            tracing::debug!("undo requested with empty history");
            return UndoOutcome::NothingToUndo;
        };
        document.set_lines(lines);
        tracing::debug!(remaining = self.entries.len(), "undo restored snapshot");
        UndoOutcome::Restored
    }
}
