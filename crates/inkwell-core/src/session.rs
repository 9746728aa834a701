//! Editing session.
//!
//! [`EditSession`] owns a [`Document`], its [`UndoLog`] and the rest of the per-session state
//! (input mode, internal clipboard, prompt history, line ending). Every mutating method
//! records an undo snapshot first, so callers driving a document through the session never
//! have to remember the undo contract themselves.
//!
//! # Example
//!
//! ```rust
//! use inkwell_core::{EditSession, GenerateError, GenerationMode, GenerationRequest, Position};
//!
//! let mut session = EditSession::new();
//! session.paste_text("draft");
//!
//! let generator = |_prompt: &str, _context: &str| Ok::<_, GenerateError>("a\nb".to_string());
//! session
//!     .generate(&generator, GenerationRequest::new("rewrite", GenerationMode::Replace))
//!     .unwrap();
//!
//! assert_eq!(session.document().lines(), ["a", "b"]);
//! assert_eq!(session.document().cursor(), Position::new(0, 0));
//!
//! session.undo();
//! assert_eq!(session.document().lines(), ["draft"]);
//! ```

use crate::document::Document;
use crate::error::{FormatError, GenerateError, StorageError};
use crate::format::FormatKind;
use crate::generate::{
    ContextScope, GenerationMode, GenerationOutcome, GenerationRequest, PromptHistory,
    TextGenerator,
};
use crate::line_ending::LineEnding;
use crate::storage::Storage;
use crate::undo::{UndoLog, UndoOutcome};

/// Whether typed characters are inserted or overwrite the character under the cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputMode {
    /// Typed characters are inserted.
    #[default]
    Insert,
    /// Typed characters replace the character under the cursor.
    Overwrite,
}

impl InputMode {
    /// Upper-case label for status lines.
    pub fn label(self) -> &'static str {
        match self {
            Self::Insert => "INSERT",
            Self::Overwrite => "OVERWRITE",
        }
    }
}

/// A single-user editing session around one document.
#[derive(Debug, Default)]
pub struct EditSession {
    document: Document,
    undo: UndoLog,
    input_mode: InputMode,
    clipboard: String,
    prompts: PromptHistory,
    line_ending: LineEnding,
}

impl EditSession {
    /// A session over an empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// A session over an existing document.
    pub fn with_document(document: Document) -> Self {
        Self {
            document,
            ..Self::default()
        }
    }

    /// Replace the undo log (for example to use a different bound).
    pub fn with_undo_log(mut self, undo: UndoLog) -> Self {
        self.undo = undo;
        self
    }

    /// Read access to the document.
    pub fn document(&self) -> &Document {
        &self.document
    }

    /// Mutable access for cursor movement and selection toggling.
    ///
    /// Text mutations made through this handle bypass the undo log.
    pub fn document_mut(&mut self) -> &mut Document {
        &mut self.document
    }

    /// The undo log.
    pub fn undo_log(&self) -> &UndoLog {
        &self.undo
    }

    /// Current input mode.
    pub fn input_mode(&self) -> InputMode {
        self.input_mode
    }

    /// Switch between insert and overwrite typing; returns the new mode.
    pub fn toggle_input_mode(&mut self) -> InputMode {
        self.input_mode = match self.input_mode {
            InputMode::Insert => InputMode::Overwrite,
            InputMode::Overwrite => InputMode::Insert,
        };
        self.input_mode
    }

    /// Internal clipboard contents.
    pub fn clipboard(&self) -> &str {
        &self.clipboard
    }

    /// Prompt history used by generative edits.
    pub fn prompts(&self) -> &PromptHistory {
        &self.prompts
    }

    /// Line ending used when saving.
    pub fn line_ending(&self) -> LineEnding {
        self.line_ending
    }

    /// Type one character according to the input mode.
    pub fn type_char(&mut self, ch: char) {
        self.undo.save(&self.document);
        match self.input_mode {
            InputMode::Insert => self.document.insert_rune(ch),
            InputMode::Overwrite => self.document.overwrite_rune(ch),
        }
    }

    /// Split the line at the cursor.
    pub fn newline(&mut self) {
        self.undo.save(&self.document);
        self.document.insert_newline();
    }

    /// Split the line and repeat the leading whitespace that precedes the cursor.
    pub fn newline_indented(&mut self) {
        let col = self.document.cursor().col;
        let indent: String = self
            .document
            .current_line()
            .chars()
            .take(col)
            .take_while(|ch| *ch == ' ' || *ch == '\t')
            .collect();
        self.undo.save(&self.document);
        self.document.insert_newline();
        for ch in indent.chars() {
            self.document.insert_rune(ch);
        }
    }

    /// Delete backward (Backspace).
    pub fn backspace(&mut self) {
        self.undo.save(&self.document);
        self.document.delete_backward();
    }

    /// Delete the current line into the clipboard and return it.
    pub fn delete_line(&mut self) -> &str {
        self.undo.save(&self.document);
        self.clipboard = self.document.delete_current_line();
        &self.clipboard
    }

    /// Same as [`EditSession::delete_line`]; named for the clipboard binding.
    pub fn cut_line(&mut self) -> &str {
        self.delete_line()
    }

    /// Copy the current line into the clipboard.
    pub fn copy_line(&mut self) -> &str {
        self.clipboard = self.document.current_line().to_string();
        &self.clipboard
    }

    /// Insert the clipboard at the cursor. Returns `false` when the clipboard is empty.
    pub fn paste(&mut self) -> bool {
        if self.clipboard.is_empty() {
            return false;
        }
        let text = self.clipboard.clone();
        self.paste_text(&text);
        true
    }

    /// Insert externally supplied text (system clipboard, bracketed paste) at the cursor.
    pub fn paste_text(&mut self, text: &str) {
        self.undo.save(&self.document);
        self.document.insert_text(text);
    }

    /// Replace the current line wholesale.
    pub fn replace_line(&mut self, text: &str) {
        self.undo.save(&self.document);
        self.document.replace_current_line(text);
    }

    /// Enter or leave selection mode; returns whether selection mode is now active.
    pub fn toggle_selection(&mut self) -> bool {
        self.document.toggle_selection();
        self.document.selection().is_active()
    }

    /// Step back one snapshot.
    pub fn undo(&mut self) -> UndoOutcome {
        self.undo.undo(&mut self.document)
    }

    /// Reformat the whole document for the given file extension.
    ///
    /// On failure the document and undo log are left untouched.
    pub fn format(&mut self, extension: &str) -> Result<FormatKind, FormatError> {
        let kind = FormatKind::from_extension(extension)?;
        let formatted = kind.format(&self.document.all_text())?;
        self.undo.save(&self.document);
        self.document.set_lines(crate::text::split_lines(&formatted));
        tracing::debug!(format = kind.label(), "formatted document");
        Ok(kind)
    }

    /// Which context a generative edit would send right now.
    pub fn context_scope(&self) -> ContextScope {
        if self.document.has_selection() {
            ContextScope::Selection
        } else {
            ContextScope::Document
        }
    }

    /// Run a generative edit.
    ///
    /// 1. An empty prompt reuses the last prompt; with no history it is a cancellation.
    /// 2. The context is the selected text when a selection exists, otherwise the document.
    /// 3. The generator is called synchronously. On failure nothing is mutated.
    /// 4. One undo snapshot covers the application:
    ///    - `Replace`: replace the selection, or the whole document (cursor to `(0, 0)`).
    ///    - `Overwrite`: replace the whole document regardless of selection.
    ///    - `Insert`: insert `"\n" + result` at the cursor.
    /// 5. Selection mode is cleared.
    pub fn generate<G>(
        &mut self,
        generator: &G,
        request: GenerationRequest,
    ) -> Result<GenerationOutcome, GenerateError>
    where
        G: TextGenerator + ?Sized,
    {
        let Some(prompt) = self.prompts.resolve(&request.prompt) else {
            tracing::debug!("generation cancelled: empty prompt and no history");
            return Ok(GenerationOutcome::Cancelled);
        };
        self.prompts.record(&prompt);

        let scope = self.context_scope();
        let context = match scope {
            ContextScope::Selection => self.document.selected_text(),
            ContextScope::Document => self.document.all_text(),
        };

        tracing::info!(
            mode = request.mode.as_str(),
            scope = scope.as_str(),
            context_chars = context.chars().count(),
            "requesting generation"
        );
        let result = generator.generate(&prompt, &context).inspect_err(|err| {
            tracing::warn!(error = %err, "generation failed");
        })?;

        self.undo.save(&self.document);
        match request.mode {
            GenerationMode::Replace if scope == ContextScope::Selection => {
                self.document.replace_selection(&result);
            }
            GenerationMode::Replace | GenerationMode::Overwrite => {
                self.document.set_text(&result);
            }
            GenerationMode::Insert => {
                self.document.insert_text(&format!("\n{result}"));
            }
        }
        self.document.clear_selection();

        Ok(GenerationOutcome::Applied {
            mode: request.mode,
            scope,
            prompt,
        })
    }

    /// Replace the session content with what `storage` holds.
    ///
    /// A missing target leaves an empty document. History and clipboard are kept; the undo
    /// log is cleared since its snapshots belong to the previous content.
    pub fn load(&mut self, storage: &dyn Storage) -> Result<bool, StorageError> {
        let found = match storage.load()? {
            Some(loaded) => {
                self.document = Document::from_lines(loaded.lines);
                self.line_ending = loaded.line_ending;
                true
            }
            None => {
                self.document = Document::new();
                self.line_ending = LineEnding::default();
                false
            }
        };
        self.undo.clear();
        Ok(found)
    }

    /// Persist the document; the modified flag is cleared only on success.
    pub fn save(&mut self, storage: &dyn Storage) -> Result<(), StorageError> {
        storage.save(self.document.lines(), self.line_ending)?;
        self.document.mark_saved();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{LoadedText, Position};
    use pretty_assertions::assert_eq;
    use std::cell::RefCell;

    struct Fixed(&'static str);

    impl TextGenerator for Fixed {
        fn generate(&self, _prompt: &str, _context: &str) -> Result<String, GenerateError> {
            Ok(self.0.to_string())
        }
    }

    #[derive(Default)]
    struct Recording {
        calls: RefCell<Vec<(String, String)>>,
    }

    impl TextGenerator for Recording {
        fn generate(&self, prompt: &str, context: &str) -> Result<String, GenerateError> {
            self.calls
                .borrow_mut()
                .push((prompt.to_string(), context.to_string()));
            Ok("R".to_string())
        }
    }

    struct Failing;

    impl TextGenerator for Failing {
        fn generate(&self, _prompt: &str, _context: &str) -> Result<String, GenerateError> {
            Err(GenerateError::new("connection refused"))
        }
    }

    fn session(text: &str) -> EditSession {
        EditSession::with_document(Document::from_text(text))
    }

    fn select(session: &mut EditSession, anchor: Position, cursor: Position) {
        session.document_mut().move_to(anchor);
        session.toggle_selection();
        session.document_mut().move_to(cursor);
    }

    #[test]
    fn test_typing_respects_input_mode() {
        let mut s = session("abc");
        s.type_char('x');
        assert_eq!(s.document().lines(), ["xabc"]);
        assert_eq!(s.toggle_input_mode(), InputMode::Overwrite);
        s.type_char('y');
        assert_eq!(s.document().lines(), ["xybc"]);
        assert_eq!(s.undo_log().len(), 2);
    }

    #[test]
    fn test_every_mutation_is_undoable() {
        let mut s = session("one\ntwo");
        s.document_mut().move_to(Position::new(1, 3));
        s.newline();
        s.type_char('!');
        s.backspace();
        s.replace_line("three");
        s.delete_line();
        s.paste_text("z");
        assert_eq!(s.undo_log().len(), 6);

        while s.undo() == UndoOutcome::Restored {}
        assert_eq!(s.document().lines(), ["one", "two"]);
    }

    #[test]
    fn test_newline_indented_copies_leading_whitespace() {
        let mut s = session("    if x {\n");
        s.document_mut().move_to(Position::new(0, 10));
        s.newline_indented();
        assert_eq!(s.document().lines(), ["    if x {", "    ", ""]);
        assert_eq!(s.document().cursor(), Position::new(1, 4));
        assert_eq!(s.undo_log().len(), 1);

        // Only whitespace left of the cursor is repeated.
        s.document_mut().move_to(Position::new(0, 2));
        s.newline_indented();
        assert_eq!(s.document().line(0), Some("  "));
        assert_eq!(s.document().line(1), Some("    if x {"));
        assert_eq!(s.document().cursor(), Position::new(1, 2));
    }

    #[test]
    fn test_clipboard_line_operations() {
        let mut s = session("alpha\nbeta");
        assert_eq!(s.copy_line(), "alpha");
        s.document_mut().move_down();
        assert_eq!(s.cut_line(), "beta");
        assert_eq!(s.document().lines(), ["alpha"]);
        s.document_mut().move_line_end();
        assert!(s.paste());
        assert_eq!(s.document().lines(), ["alphabeta"]);
    }

    #[test]
    fn test_paste_with_empty_clipboard_is_noop() {
        let mut s = session("x");
        assert!(!s.paste());
        assert!(s.undo_log().is_empty());
    }

    #[test]
    fn test_generate_replace_without_selection_replaces_document() {
        let mut s = session("old\ntext");
        s.document_mut().move_to(Position::new(1, 2));
        let outcome = s
            .generate(&Fixed("a\nb"), GenerationRequest::new("go", GenerationMode::Replace))
            .expect("generation succeeds");

        assert_eq!(s.document().lines(), ["a", "b"]);
        assert_eq!(s.document().cursor(), Position::new(0, 0));
        assert!(matches!(
            outcome,
            GenerationOutcome::Applied { scope: ContextScope::Document, .. }
        ));
    }

    #[test]
    fn test_generate_replace_with_selection_splices() {
        let mut s = session("abc\ndef\nghi");
        select(&mut s, Position::new(0, 1), Position::new(2, 2));
        s.generate(&Fixed("X\nY"), GenerationRequest::new("go", GenerationMode::Replace))
            .expect("generation succeeds");

        assert_eq!(s.document().lines(), ["aX", "Yi"]);
        assert_eq!(s.document().cursor(), Position::new(1, 1));
        assert!(!s.document().selection().is_active());
    }

    #[test]
    fn test_generate_overwrite_ignores_selection() {
        let mut s = session("abc\ndef");
        select(&mut s, Position::new(0, 0), Position::new(0, 2));
        s.generate(&Fixed("new"), GenerationRequest::new("go", GenerationMode::Overwrite))
            .expect("generation succeeds");
        assert_eq!(s.document().lines(), ["new"]);
        assert_eq!(s.document().cursor(), Position::origin());
    }

    #[test]
    fn test_generate_insert_adds_line_after_cursor() {
        let mut s = session("head\ntail");
        s.document_mut().move_to(Position::new(0, 4));
        s.generate(&Fixed("gen 1\ngen 2"), GenerationRequest::new("go", GenerationMode::Insert))
            .expect("generation succeeds");
        assert_eq!(s.document().lines(), ["head", "gen 1", "gen 2", "tail"]);
        assert_eq!(s.document().cursor(), Position::new(2, 5));
    }

    #[test]
    fn test_generate_is_single_undo_step() {
        let mut s = session("keep");
        s.generate(&Fixed("x\ny\nz"), GenerationRequest::new("go", GenerationMode::Insert))
            .expect("generation succeeds");
        assert_eq!(s.undo_log().len(), 1);
        assert_eq!(s.undo(), UndoOutcome::Restored);
        assert_eq!(s.document().lines(), ["keep"]);
    }

    #[test]
    fn test_generate_sends_selection_as_context() {
        let mut s = session("hello world");
        select(&mut s, Position::new(0, 6), Position::new(0, 11));
        let recorder = Recording::default();
        s.generate(&recorder, GenerationRequest::new("shout", GenerationMode::Replace))
            .expect("generation succeeds");

        assert_eq!(
            recorder.calls.borrow().as_slice(),
            [("shout".to_string(), "world".to_string())]
        );
        assert_eq!(s.document().lines(), ["hello R"]);
    }

    #[test]
    fn test_empty_prompt_reuses_last_or_cancels() {
        let mut s = session("doc");
        let recorder = Recording::default();

        let outcome = s
            .generate(&recorder, GenerationRequest::new("", GenerationMode::Insert))
            .expect("cancellation is not an error");
        assert_eq!(outcome, GenerationOutcome::Cancelled);
        assert!(recorder.calls.borrow().is_empty());
        assert!(s.undo_log().is_empty());

        s.generate(&recorder, GenerationRequest::new("first", GenerationMode::Insert))
            .expect("generation succeeds");
        s.generate(&recorder, GenerationRequest::new("", GenerationMode::Insert))
            .expect("generation succeeds");
        let calls = recorder.calls.borrow();
        assert_eq!(calls[1].0, "first");
        assert_eq!(s.prompts().len(), 2);
    }

    #[test]
    fn test_generation_failure_leaves_document_untouched() {
        let mut s = session("abc\ndef");
        select(&mut s, Position::new(0, 1), Position::new(1, 1));
        let err = s
            .generate(&Failing, GenerationRequest::new("go", GenerationMode::Overwrite))
            .expect_err("generator fails");

        assert_eq!(err.message(), "connection refused");
        assert_eq!(s.document().lines(), ["abc", "def"]);
        assert!(!s.document().is_modified());
        assert!(s.undo_log().is_empty());
        assert!(s.document().selection().is_active());
    }

    #[test]
    fn test_format_json_and_failure() {
        let mut s = session("{\"a\":1}");
        assert_eq!(s.format("json").expect("valid json"), FormatKind::Json);
        assert_eq!(s.document().lines(), ["{", "  \"a\": 1", "}"]);

        let mut broken = session("{");
        assert!(broken.format("json").is_err());
        assert_eq!(broken.document().lines(), ["{"]);
        assert!(broken.undo_log().is_empty());
        assert!(broken.format("toml").is_err());
    }

    #[test]
    fn test_format_terraform_file() {
        let mut s = session("variable \"region\" {\ndefault=\"eu-west-1\"\n}");
        assert_eq!(s.format("tf").expect("valid hcl"), FormatKind::Hcl);
        assert_eq!(
            s.document().lines(),
            ["variable \"region\" {", "  default = \"eu-west-1\"", "}"]
        );
        assert_eq!(s.undo_log().len(), 1);
    }

    struct MemoryStorage {
        stored: RefCell<Option<Vec<String>>>,
        fail: bool,
    }

    impl Storage for MemoryStorage {
        fn load(&self) -> Result<Option<LoadedText>, StorageError> {
            Ok(self.stored.borrow().clone().map(|lines| LoadedText {
                lines,
                line_ending: LineEnding::Lf,
            }))
        }

        fn save(&self, lines: &[String], _line_ending: LineEnding) -> Result<(), StorageError> {
            if self.fail {
                return Err(StorageError::Write {
                    path: "memory".into(),
                    source: std::io::Error::other("disk full"),
                });
            }
            *self.stored.borrow_mut() = Some(lines.to_vec());
            Ok(())
        }
    }

    #[test]
    fn test_save_clears_modified_only_on_success() {
        let mut s = EditSession::new();
        s.paste_text("Hi\nBye");
        assert!(s.document().is_modified());

        let failing = MemoryStorage {
            stored: RefCell::new(None),
            fail: true,
        };
        assert!(s.save(&failing).is_err());
        assert!(s.document().is_modified());

        let memory = MemoryStorage {
            stored: RefCell::new(None),
            fail: false,
        };
        s.save(&memory).expect("save succeeds");
        assert!(!s.document().is_modified());

        let mut reloaded = EditSession::new();
        assert!(reloaded.load(&memory).expect("load succeeds"));
        assert_eq!(reloaded.document().lines(), ["Hi", "Bye"]);
        assert!(!reloaded.document().is_modified());
    }

    #[test]
    fn test_load_missing_starts_empty() {
        let mut s = session("stale");
        s.type_char('x');
        let memory = MemoryStorage {
            stored: RefCell::new(None),
            fail: false,
        };
        assert!(!s.load(&memory).expect("load succeeds"));
        assert_eq!(s.document().lines(), [""]);
        assert!(s.undo_log().is_empty());
    }
}
