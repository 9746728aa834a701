#![warn(missing_docs)]
//! Inkwell Core - text buffer engine for a keystroke-driven editor
//!
//! # Overview
//!
//! `inkwell-core` is a headless buffer engine: an in-memory, line-oriented document model,
//! cursor and selection geometry, bounded snapshot undo, and the protocol by which an
//! external text-generation service inserts, replaces or overwrites document content.
//! Rendering, input decoding and the generation transport live outside this crate.
//!
//! # Architecture Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │  EditSession (undo contract, generation)    │  ← Public API
//! ├─────────────────────────────────────────────┤
//! │  UndoLog          │  Storage / Format        │  ← History & I/O
//! ├─────────────────────────────────────────────┤
//! │  Cursor & Selection                         │  ← Geometry
//! ├─────────────────────────────────────────────┤
//! │  Document (lines + modified flag)           │  ← Text Storage
//! └─────────────────────────────────────────────┘
//! ```
//!
//! # Quick Start
//!
//! ```rust
//! use inkwell_core::{EditSession, Position, UndoOutcome};
//!
//! let mut session = EditSession::new();
//! for ch in "Hello".chars() {
//!     session.type_char(ch);
//! }
//! session.document_mut().move_to(Position::new(0, 2));
//! session.newline();
//! assert_eq!(session.document().lines(), ["He", "llo"]);
//!
//! assert_eq!(session.undo(), UndoOutcome::Restored);
//! assert_eq!(session.document().lines(), ["Hello"]);
//! ```
//!
//! # Module Description
//!
//! - [`document`] - line sequence and mutation primitives
//! - [`cursor`] - cursor movement
//! - [`selection`] - anchor-based selection, extraction and splice replacement
//! - [`undo`] - bounded snapshot history
//! - [`generate`] - generation capability, modes and prompt history
//! - [`session`] - editing session tying the above together
//! - [`storage`] - load/save collaborator
//! - [`format`] - JSON, YAML and HCL reformatting
//!
//! # Coordinates
//!
//! Columns count Unicode scalar values (`char`s), not bytes and not grapheme clusters.

pub mod cursor;
pub mod document;
pub mod error;
pub mod format;
pub mod generate;
pub mod line_ending;
pub mod position;
pub mod selection;
pub mod session;
pub mod storage;
mod text;
pub mod undo;

pub use cursor::PAGE_ROWS;
pub use document::Document;
pub use error::{FormatError, GenerateError, StorageError};
pub use format::FormatKind;
pub use generate::{
    ContextScope, GenerationMode, GenerationOutcome, GenerationRequest, PROMPT_HISTORY_LIMIT,
    PromptHistory, TextGenerator,
};
pub use line_ending::LineEnding;
pub use position::Position;
pub use selection::Selection;
pub use session::{EditSession, InputMode};
pub use storage::{FileStorage, LoadedText, Storage};
pub use undo::{DEFAULT_UNDO_LIMIT, UndoLog, UndoOutcome};
