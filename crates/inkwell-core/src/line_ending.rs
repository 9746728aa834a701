//! Line ending helpers.
//!
//! Documents always hold LF-separated lines. A file that uses CRLF (`"\r\n"`) is normalized
//! on load, and its line ending is remembered so it can be written back the same way.

/// The newline sequence used when saving a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineEnding {
    /// Unix-style LF (`'\n'`).
    #[default]
    Lf,
    /// Windows-style CRLF (`"\r\n"`).
    Crlf,
}

impl LineEnding {
    /// Detect the dominant line ending from a source text.
    ///
    /// Policy: if the input contains any CRLF (`"\r\n"`), returns [`LineEnding::Crlf`],
    /// otherwise [`LineEnding::Lf`].
    pub fn detect_in_text(text: &str) -> Self {
        if text.contains("\r\n") {
            Self::Crlf
        } else {
            Self::Lf
        }
    }

    /// The separator inserted between lines on save.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Lf => "\n",
            Self::Crlf => "\r\n",
        }
    }

    /// Join document lines with this line ending.
    pub fn join(self, lines: &[String]) -> String {
        lines.join(self.as_str())
    }
}
