//! Inkwell terminal editor
//!
//! A small keystroke-driven editor on top of `inkwell-core`, with generative edits served by
//! `inkwell-ai`.
//!
//! # Usage
//!
//! ```bash
//! inkwell [FILE] [--config PATH] [--log-file PATH]
//! INKWELL_LOG=debug inkwell notes.md
//! ```
//!
//! # Key bindings
//!
//! - Arrows / Home / End / PageUp / PageDown: move the cursor
//! - Ctrl+S: save (asks for a path when the buffer is unnamed)
//! - Ctrl+Q: quit (press twice when there are unsaved changes)
//! - Ctrl+C / Ctrl+X / Ctrl+V: copy line / cut line / paste
//! - Ctrl+K, Ctrl+D: delete line
//! - Ctrl+Z: undo
//! - Ctrl+W: toggle selection mode
//! - Ctrl+A: generative edit (Tab insert, Ctrl+R replace, Ctrl+O overwrite, Up/Down history)
//! - Ctrl+F: format JSON / YAML / HCL
//! - Ctrl+G: go to line
//! - Ctrl+T / Ctrl+B: top / bottom
//! - Insert: toggle insert / overwrite
//! - Ctrl+N: next theme
//!
//! Files with a known extension (Rust, Go, Python, JavaScript/TypeScript, shell, JSON, YAML,
//! HCL) are highlighted with the theme's syntax colors.

mod app;
mod config;
mod highlight;
mod layout;
mod theme;
mod ui;

use std::fs::OpenOptions;
use std::io::{self, stdout};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::Duration;

use clap::Parser;
use crossterm::{
    event::{self, DisableBracketedPaste, EnableBracketedPaste, Event},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use inkwell_ai::AiClient;
use inkwell_core::{GenerateError, TextGenerator};
use ratatui::{Terminal, backend::CrosstermBackend};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::LevelFilter;

use crate::app::App;
use crate::config::Config;

/// Environment variable holding the log filter directives.
const LOG_ENV: &str = "INKWELL_LOG";

#[derive(Debug, Parser)]
#[command(name = "inkwell", version, about = "Terminal text editor with generative edits")]
struct Cli {
    /// File to open; created on first save if it does not exist.
    file: Option<PathBuf>,

    /// Configuration file (default: ~/.inkwell.yaml).
    #[arg(long, env = "INKWELL_CONFIG")]
    config: Option<PathBuf>,

    /// Log file (default: inkwell.log in the temp directory).
    #[arg(long)]
    log_file: Option<PathBuf>,
}

#[derive(Debug, thiserror::Error)]
enum LogInitError {
    #[error("cannot open {}: {source}", path.display())]
    Open { path: PathBuf, source: io::Error },

    #[error("cannot install subscriber: {0}")]
    Install(String),
}

/// Send tracing output to `path`; stdout belongs to the terminal UI.
fn init_tracing(path: &Path) -> Result<(), LogInitError> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|source| LogInitError::Open {
            path: path.to_path_buf(),
            source,
        })?;
    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::WARN.into())
        .with_env_var(LOG_ENV)
        .from_env_lossy();
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(false)
        .compact()
        .try_init()
        .map_err(|err| LogInitError::Install(err.to_string()))
}

fn build_generator(config: &Config) -> Box<dyn TextGenerator> {
    match AiClient::new(config.ai.clone()) {
        Ok(client) => Box::new(client),
        Err(err) => {
            tracing::warn!(error = %err, "generation client unavailable");
            let message = err.to_string();
            Box::new(move |_: &str, _: &str| Err::<String, _>(GenerateError::new(message.clone())))
        }
    }
}

fn main() -> io::Result<()> {
    let cli = Cli::parse();

    let log_file = cli
        .log_file
        .clone()
        .unwrap_or_else(|| std::env::temp_dir().join("inkwell.log"));
    if let Err(err) = init_tracing(&log_file) {
        eprintln!("inkwell: logging disabled, {err}");
    }

    let config_path = cli.config.clone().unwrap_or_else(config::default_path);
    let config = Config::load_or_create(&config_path).map_err(io::Error::other)?;
    tracing::info!(
        config = %config_path.display(),
        file = ?cli.file,
        provider = %config.ai.provider,
        "starting inkwell"
    );

    let generator = build_generator(&config);
    let mut app = App::open(cli.file, config, generator).map_err(io::Error::other)?;

    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen, EnableBracketedPaste)?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        DisableBracketedPaste,
        LeaveAlternateScreen
    )?;
    terminal.show_cursor()?;

    if let Err(err) = result {
        tracing::warn!(error = %err, "editor loop failed");
        eprintln!("inkwell: {err}");
    }

    Ok(())
}

fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
) -> io::Result<()> {
    loop {
        terminal.draw(|f| app.render(f))?;

        if app.should_quit() {
            break;
        }

        // The "Generating..." status is on screen by now; the call blocks until it answers.
        if app.has_pending_generation() {
            app.run_pending_generation();
            continue;
        }

        if event::poll(Duration::from_millis(100))? {
            match event::read()? {
                Event::Key(key) => app.handle_key_event(key),
                Event::Paste(text) => app.handle_paste(text),
                Event::Resize(_, _) => {}
                _ => {}
            }
        }
    }

    Ok(())
}
