//! Persistence collaborator.
//!
//! The on-disk contract is "lines joined by a line feed": loading splits on LF exactly
//! (`N` newlines produce `N + 1` lines), so save followed by load reproduces the line
//! sequence. CRLF files are normalized on load and written back with CRLF.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::error::StorageError;
use crate::line_ending::LineEnding;
use crate::text::split_lines;

/// Lines read from storage along with the line ending they used.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedText {
    /// Document lines (never empty).
    pub lines: Vec<String>,
    /// Line ending detected in the source.
    pub line_ending: LineEnding,
}

impl LoadedText {
    /// Split raw file content into lines.
    pub fn parse(content: &str) -> Self {
        Self {
            lines: split_lines(content),
            line_ending: LineEnding::detect_in_text(content),
        }
    }
}

/// Where a document is loaded from and saved to.
pub trait Storage {
    /// Read the stored lines. `Ok(None)` means the target does not exist yet.
    fn load(&self) -> Result<Option<LoadedText>, StorageError>;

    /// Persist `lines` joined with `line_ending`.
    fn save(&self, lines: &[String], line_ending: LineEnding) -> Result<(), StorageError>;
}

/// File-backed [`Storage`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileStorage {
    path: PathBuf,
}

impl FileStorage {
    /// Storage for the file at `path` (which need not exist yet).
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The backing file path.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Storage for FileStorage {
    fn load(&self) -> Result<Option<LoadedText>, StorageError> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                tracing::debug!(path = %self.path.display(), "file not found, starting empty");
                return Ok(None);
            }
            Err(source) => {
                return Err(StorageError::Read {
                    path: self.path.clone(),
                    source,
                });
            }
        };

        let content = String::from_utf8(bytes).map_err(|_| StorageError::InvalidUtf8 {
            path: self.path.clone(),
        })?;
        let loaded = LoadedText::parse(&content);
        tracing::debug!(
            path = %self.path.display(),
            lines = loaded.lines.len(),
            "loaded file"
        );
        Ok(Some(loaded))
    }

    fn save(&self, lines: &[String], line_ending: LineEnding) -> Result<(), StorageError> {
        fs::write(&self.path, line_ending.join(lines)).map_err(|source| StorageError::Write {
            path: self.path.clone(),
            source,
        })?;
        tracing::info!(path = %self.path.display(), lines = lines.len(), "saved file");
        Ok(())
    }
}
