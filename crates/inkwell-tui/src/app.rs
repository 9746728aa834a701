//! Editor state and key handling.

use std::path::{Path, PathBuf};

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use inkwell_core::{
    ContextScope, EditSession, FileStorage, GenerationMode, GenerationOutcome, GenerationRequest,
    StorageError, TextGenerator, UndoOutcome,
};

use crate::config::Config;
use crate::highlight::Highlighter;
use crate::theme::Theme;

/// Single-line input shown in place of the help bar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Prompt {
    /// Generative edit prompt. `recall` indexes the prompt history (0 = most recent).
    Generate {
        input: String,
        mode: GenerationMode,
        recall: Option<usize>,
    },
    GoToLine {
        input: String,
    },
    SaveAs {
        input: String,
    },
}

impl Prompt {
    fn input_mut(&mut self) -> &mut String {
        match self {
            Prompt::Generate { input, .. }
            | Prompt::GoToLine { input }
            | Prompt::SaveAs { input } => input,
        }
    }

    pub fn input(&self) -> &str {
        match self {
            Prompt::Generate { input, .. }
            | Prompt::GoToLine { input }
            | Prompt::SaveAs { input } => input,
        }
    }
}

/// Editor state: the session plus everything the terminal front end tracks around it.
pub struct App {
    pub(crate) session: EditSession,
    pub(crate) file_path: Option<PathBuf>,
    pub(crate) config: Config,
    pub(crate) theme: Theme,
    /// Tokenizer picked from the file extension; `None` renders plain text.
    pub(crate) highlighter: Option<Highlighter>,
    generator: Box<dyn TextGenerator>,
    pub(crate) prompt: Option<Prompt>,
    pending_generation: Option<GenerationRequest>,
    pub(crate) status: String,
    quit_armed: bool,
    pub(crate) should_quit: bool,
    /// First visible document row.
    pub(crate) scroll_row: usize,
    /// First visible display column.
    pub(crate) scroll_col: usize,
}

impl App {
    pub fn new(
        session: EditSession,
        file_path: Option<PathBuf>,
        config: Config,
        generator: Box<dyn TextGenerator>,
    ) -> Self {
        let theme = Theme::by_name(&config.theme.current);
        let highlighter = file_path.as_deref().and_then(Highlighter::for_path);
        Self {
            session,
            file_path,
            config,
            theme,
            highlighter,
            generator,
            prompt: None,
            pending_generation: None,
            status: String::new(),
            quit_armed: false,
            should_quit: false,
            scroll_row: 0,
            scroll_col: 0,
        }
    }

    /// Open `file_path` (a missing file starts an empty buffer under that name).
    pub fn open(
        file_path: Option<PathBuf>,
        config: Config,
        generator: Box<dyn TextGenerator>,
    ) -> Result<Self, StorageError> {
        let mut session = EditSession::new();
        let mut status = String::new();
        if let Some(path) = &file_path {
            let found = session.load(&FileStorage::new(path))?;
            if !found {
                status = format!("New file: {}", path.display());
            }
        }
        let mut app = Self::new(session, file_path, config, generator);
        app.status = status;
        Ok(app)
    }

    pub fn session(&self) -> &EditSession {
        &self.session
    }

    pub fn status(&self) -> &str {
        &self.status
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn file_path(&self) -> Option<&Path> {
        self.file_path.as_deref()
    }

    /// Whether a generation request is waiting for the next frame to be drawn.
    pub fn has_pending_generation(&self) -> bool {
        self.pending_generation.is_some()
    }

    fn set_status(&mut self, message: impl Into<String>) {
        self.status = message.into();
    }

    pub fn handle_key_event(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }

        if self.prompt.is_some() {
            self.handle_prompt_key(key);
            return;
        }

        let is_quit = matches!(
            (key.modifiers, key.code),
            (KeyModifiers::CONTROL, KeyCode::Char('q'))
        );
        if !is_quit {
            self.quit_armed = false;
        }

        match (key.modifiers, key.code) {
            (KeyModifiers::CONTROL, KeyCode::Char('s')) => self.save(),
            (KeyModifiers::CONTROL, KeyCode::Char('q')) => self.quit(),
            (KeyModifiers::CONTROL, KeyCode::Char('c')) => {
                self.session.copy_line();
                self.set_status("Copied line");
            }
            (KeyModifiers::CONTROL, KeyCode::Char('v')) => {
                if self.session.paste() {
                    self.set_status("Pasted");
                } else {
                    self.set_status("Clipboard is empty");
                }
            }
            (KeyModifiers::CONTROL, KeyCode::Char('x')) => {
                self.session.cut_line();
                self.set_status("Cut line");
            }
            (KeyModifiers::CONTROL, KeyCode::Char('k' | 'd')) => {
                self.session.delete_line();
                self.set_status("Line deleted");
            }
            (KeyModifiers::CONTROL, KeyCode::Char('z')) => match self.session.undo() {
                UndoOutcome::Restored => self.set_status("Undo"),
                UndoOutcome::NothingToUndo => self.set_status("Nothing to undo"),
            },
            (KeyModifiers::CONTROL, KeyCode::Char('w')) => {
                if self.session.toggle_selection() {
                    self.set_status("Selection started");
                } else {
                    self.set_status("Selection cleared");
                }
            }
            (KeyModifiers::CONTROL, KeyCode::Char('a')) => self.start_generate_prompt(),
            (KeyModifiers::CONTROL, KeyCode::Char('f')) => self.format(),
            (KeyModifiers::CONTROL, KeyCode::Char('g')) => {
                self.prompt = Some(Prompt::GoToLine {
                    input: String::new(),
                });
            }
            (KeyModifiers::CONTROL, KeyCode::Char('t')) => {
                self.session.document_mut().move_top();
            }
            (KeyModifiers::CONTROL, KeyCode::Char('b')) => {
                self.session.document_mut().move_bottom();
            }
            (KeyModifiers::CONTROL, KeyCode::Char('n')) => {
                self.theme = self.theme.next();
                self.config.theme.current = self.theme.name.to_string();
                self.set_status(format!("Theme: {}", self.theme.name));
            }
            (_, KeyCode::Insert) => {
                let mode = self.session.toggle_input_mode();
                self.set_status(format!("{} mode", mode.label()));
            }
            (_, KeyCode::Up) => self.session.document_mut().move_up(),
            (_, KeyCode::Down) => self.session.document_mut().move_down(),
            (_, KeyCode::Left) => self.session.document_mut().move_left(),
            (_, KeyCode::Right) => self.session.document_mut().move_right(),
            (_, KeyCode::Home) => self.session.document_mut().move_line_start(),
            (_, KeyCode::End) => self.session.document_mut().move_line_end(),
            (_, KeyCode::PageUp) => self.session.document_mut().page_up(),
            (_, KeyCode::PageDown) => self.session.document_mut().page_down(),
            (_, KeyCode::Enter) => {
                if self.config.editor.auto_indent {
                    self.session.newline_indented();
                } else {
                    self.session.newline();
                }
            }
            (_, KeyCode::Backspace) => self.session.backspace(),
            (_, KeyCode::Tab) => {
                let spaces = " ".repeat(self.config.editor.tab_size.max(1));
                self.session.paste_text(&spaces);
            }
            (KeyModifiers::NONE | KeyModifiers::SHIFT, KeyCode::Char(c)) => {
                self.session.type_char(c);
            }
            _ => {}
        }
    }

    /// Bracketed paste: goes to the open prompt as a single line, otherwise into the document.
    pub fn handle_paste(&mut self, text: String) {
        if let Some(prompt) = self.prompt.as_mut() {
            let flattened = text.replace("\r\n", " ").replace(['\r', '\n'], " ");
            prompt.input_mut().push_str(&flattened);
            return;
        }
        self.quit_armed = false;
        self.session.paste_text(&text);
    }

    fn quit(&mut self) {
        if self.session.document().is_modified() && !self.quit_armed {
            self.quit_armed = true;
            self.set_status("File modified! Press Ctrl+Q again to force quit or Ctrl+S to save");
        } else {
            self.should_quit = true;
        }
    }

    fn save(&mut self) {
        let Some(path) = self.file_path.clone() else {
            self.prompt = Some(Prompt::SaveAs {
                input: String::new(),
            });
            return;
        };
        self.save_to(&path);
    }

    /// Write the buffer to `path` and report the result in the status line.
    fn save_to(&mut self, path: &Path) -> bool {
        match self.session.save(&FileStorage::new(path)) {
            Ok(()) => {
                self.set_status(format!("Saved to {}", path.display()));
                true
            }
            Err(err) => {
                tracing::warn!(error = %err, "save failed");
                self.set_status(format!("Error saving: {err}"));
                false
            }
        }
    }

    fn format(&mut self) {
        let extension = self
            .file_path
            .as_deref()
            .and_then(Path::extension)
            .and_then(|ext| ext.to_str())
            .unwrap_or_default()
            .to_string();
        match self.session.format(&extension) {
            Ok(kind) => self.set_status(format!("Formatted as {}", kind.label())),
            Err(err) => self.set_status(format!("Format error: {err}")),
        }
    }

    fn start_generate_prompt(&mut self) {
        if !self.config.ai.enabled {
            self.set_status("AI disabled. Edit ~/.inkwell.yaml to enable");
            return;
        }
        self.prompt = Some(Prompt::Generate {
            input: String::new(),
            mode: GenerationMode::Insert,
            recall: None,
        });
    }

    /// Label for the generate prompt: which context would be sent.
    pub fn context_label(&self) -> &'static str {
        self.session.context_scope().as_str()
    }

    fn handle_prompt_key(&mut self, key: KeyEvent) {
        let Some(mut prompt) = self.prompt.take() else {
            return;
        };

        match (key.modifiers, key.code) {
            (_, KeyCode::Esc) => {
                self.set_status(match prompt {
                    Prompt::Generate { .. } => "AI cancelled",
                    Prompt::GoToLine { .. } => "",
                    Prompt::SaveAs { .. } => "Save cancelled",
                });
                return;
            }
            (_, KeyCode::Enter) => {
                self.submit_prompt(prompt);
                return;
            }
            (_, KeyCode::Backspace) => {
                prompt.input_mut().pop();
            }
            (_, KeyCode::Tab) => set_generate_mode(&mut prompt, GenerationMode::Insert),
            (KeyModifiers::CONTROL, KeyCode::Char('r')) => {
                set_generate_mode(&mut prompt, GenerationMode::Replace)
            }
            (KeyModifiers::CONTROL, KeyCode::Char('o')) => {
                set_generate_mode(&mut prompt, GenerationMode::Overwrite)
            }
            (_, KeyCode::Up) => self.recall_prompt(&mut prompt, true),
            (_, KeyCode::Down) => self.recall_prompt(&mut prompt, false),
            (KeyModifiers::NONE | KeyModifiers::SHIFT, KeyCode::Char(c)) => {
                prompt.input_mut().push(c);
            }
            _ => {}
        }
        self.prompt = Some(prompt);
    }

    fn recall_prompt(&self, prompt: &mut Prompt, older: bool) {
        let Prompt::Generate { input, recall, .. } = prompt else {
            return;
        };
        let history = self.session.prompts();
        let next = match (*recall, older) {
            (None, true) => Some(0),
            (None, false) => None,
            (Some(back), true) => Some((back + 1).min(history.len().saturating_sub(1))),
            (Some(0), false) => None,
            (Some(back), false) => Some(back - 1),
        };
        match next.and_then(|back| history.recall(back).map(|text| (back, text))) {
            Some((back, text)) => {
                *recall = Some(back);
                *input = text.to_string();
            }
            None => {
                *recall = None;
                input.clear();
            }
        }
    }

    fn submit_prompt(&mut self, prompt: Prompt) {
        match prompt {
            Prompt::Generate { input, mode, .. } => {
                if self.session.prompts().resolve(&input).is_none() {
                    self.set_status("AI cancelled - no prompt");
                    return;
                }
                self.set_status(format!(
                    "Generating ({} from {})...",
                    mode,
                    self.context_label()
                ));
                self.pending_generation = Some(GenerationRequest::new(input, mode));
            }
            Prompt::GoToLine { input } => match input.trim().parse::<usize>() {
                Ok(line) => {
                    let reached = self.session.document_mut().go_to_line(line);
                    self.set_status(format!("Line {reached}"));
                }
                Err(_) => self.set_status(format!("Invalid line number: {input}")),
            },
            Prompt::SaveAs { input } => {
                let input = input.trim();
                if input.is_empty() {
                    self.set_status("Save cancelled");
                    return;
                }
                let path = PathBuf::from(input);
                if self.save_to(&path) {
                    self.highlighter = Highlighter::for_path(&path);
                    self.file_path = Some(path);
                }
            }
        }
    }

    /// Run a queued generative edit. Blocks until the generator answers.
    pub fn run_pending_generation(&mut self) {
        let Some(request) = self.pending_generation.take() else {
            return;
        };
        match self.session.generate(self.generator.as_ref(), request) {
            Ok(GenerationOutcome::Applied { mode, scope, .. }) => {
                self.set_status(match (mode, scope) {
                    (GenerationMode::Replace, ContextScope::Selection) => {
                        "Selection replaced with AI response"
                    }
                    (GenerationMode::Replace, ContextScope::Document) => {
                        "Document replaced with AI response"
                    }
                    (GenerationMode::Overwrite, _) => "Buffer overwritten with AI response",
                    (GenerationMode::Insert, _) => "AI response inserted",
                });
            }
            Ok(GenerationOutcome::Cancelled) => self.set_status("AI cancelled - no prompt"),
            Err(err) => self.set_status(format!("AI error: {err}")),
        }
    }
}

fn set_generate_mode(prompt: &mut Prompt, new_mode: GenerationMode) {
    if let Prompt::Generate { mode, .. } = prompt {
        *mode = new_mode;
    }
}
