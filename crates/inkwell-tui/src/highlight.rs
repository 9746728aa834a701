//! Regex-based line highlighting keyed by file extension.
//!
//! Not a parser: every grammar is one alternation of comment, string, number and keyword
//! patterns, scanned leftmost-first, so a `#` inside a string stays part of the string and
//! a quote inside a comment stays part of the comment.

use std::path::Path;

use regex::Regex;

/// Token classes a theme has a color for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    Keyword,
    String,
    Comment,
    Number,
}

/// Lexical shape of one language family.
struct Grammar {
    line_comment: Option<&'static str>,
    single_quoted_strings: bool,
    keywords: &'static [&'static str],
}

const RUST: Grammar = Grammar {
    line_comment: Some(r"//.*"),
    single_quoted_strings: false,
    keywords: &[
        "as", "break", "const", "continue", "crate", "else", "enum", "false", "fn", "for", "if",
        "impl", "in", "let", "loop", "match", "mod", "move", "mut", "pub", "ref", "return",
        "self", "Self", "static", "struct", "super", "trait", "true", "type", "unsafe", "use",
        "where", "while",
    ],
};

const GO: Grammar = Grammar {
    line_comment: Some(r"//.*"),
    single_quoted_strings: false,
    keywords: &[
        "break", "case", "chan", "const", "continue", "default", "defer", "else", "false", "for",
        "func", "go", "if", "import", "interface", "map", "nil", "package", "range", "return",
        "select", "struct", "switch", "true", "type", "var",
    ],
};

const PYTHON: Grammar = Grammar {
    line_comment: Some(r"#.*"),
    single_quoted_strings: true,
    keywords: &[
        "and", "as", "class", "def", "elif", "else", "except", "False", "finally", "for", "from",
        "if", "import", "in", "is", "lambda", "None", "not", "or", "pass", "raise", "return",
        "True", "try", "while", "with", "yield",
    ],
};

const JAVASCRIPT: Grammar = Grammar {
    line_comment: Some(r"//.*"),
    single_quoted_strings: true,
    keywords: &[
        "async", "await", "break", "case", "class", "const", "else", "export", "false", "for",
        "function", "if", "import", "interface", "let", "new", "null", "return", "switch",
        "this", "true", "type", "undefined", "var", "while",
    ],
};

const SHELL: Grammar = Grammar {
    line_comment: Some(r"#.*"),
    single_quoted_strings: true,
    keywords: &[
        "case", "do", "done", "elif", "else", "esac", "export", "fi", "for", "function", "if",
        "in", "local", "return", "then", "while",
    ],
};

const JSON: Grammar = Grammar {
    line_comment: None,
    single_quoted_strings: false,
    keywords: &["true", "false", "null"],
};

const YAML: Grammar = Grammar {
    line_comment: Some(r"#.*"),
    single_quoted_strings: true,
    keywords: &["true", "false", "null", "yes", "no"],
};

const HCL: Grammar = Grammar {
    line_comment: Some(r"(?:#|//).*"),
    single_quoted_strings: false,
    keywords: &[
        "data", "false", "for", "in", "locals", "module", "null", "output", "provider",
        "resource", "terraform", "true", "variable",
    ],
};

fn grammar_for_extension(ext: &str) -> Option<&'static Grammar> {
    match ext {
        "rs" => Some(&RUST),
        "go" => Some(&GO),
        "py" => Some(&PYTHON),
        "js" | "jsx" | "ts" | "tsx" => Some(&JAVASCRIPT),
        "sh" | "bash" => Some(&SHELL),
        "json" => Some(&JSON),
        "yaml" | "yml" => Some(&YAML),
        "hcl" | "tf" => Some(&HCL),
        _ => None,
    }
}

/// Line tokenizer for one language.
#[derive(Debug, Clone)]
pub struct Highlighter {
    regex: Regex,
}

impl Highlighter {
    /// The highlighter for `path`'s extension, or `None` for plain text.
    pub fn for_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        let grammar = grammar_for_extension(&ext)?;
        match Self::from_grammar(grammar) {
            Ok(highlighter) => Some(highlighter),
            Err(err) => {
                tracing::warn!(error = %err, ext = %ext, "highlight grammar rejected");
                None
            }
        }
    }

    fn from_grammar(grammar: &Grammar) -> Result<Self, regex::Error> {
        let mut alternatives = Vec::new();
        if let Some(comment) = grammar.line_comment {
            alternatives.push(format!("(?P<comment>{comment})"));
        }
        let mut string = String::from(r#""(?:\\.|[^"\\])*""#);
        if grammar.single_quoted_strings {
            string.push_str(r"|'(?:\\.|[^'\\])*'");
        }
        alternatives.push(format!("(?P<string>{string})"));
        alternatives.push(
            r"(?P<number>\b(?:0[xX][0-9a-fA-F_]+|\d[\d_]*(?:\.\d+)?(?:[eE][+-]?\d+)?)\b)"
                .to_string(),
        );
        if !grammar.keywords.is_empty() {
            let words: Vec<String> = grammar.keywords.iter().map(|w| regex::escape(w)).collect();
            alternatives.push(format!(r"(?P<keyword>\b(?:{})\b)", words.join("|")));
        }
        Ok(Self {
            regex: Regex::new(&alternatives.join("|"))?,
        })
    }

    /// The token class of every code point of `line` (`None` for plain text).
    pub fn highlight_line(&self, line: &str) -> Vec<Option<TokenKind>> {
        let mut kinds = Vec::with_capacity(line.len());
        let mut byte = 0usize;
        for caps in self.regex.captures_iter(line) {
            let (kind, m) = if let Some(m) = caps.name("comment") {
                (TokenKind::Comment, m)
            } else if let Some(m) = caps.name("string") {
                (TokenKind::String, m)
            } else if let Some(m) = caps.name("number") {
                (TokenKind::Number, m)
            } else if let Some(m) = caps.name("keyword") {
                (TokenKind::Keyword, m)
            } else {
                continue;
            };
            kinds.extend(line[byte..m.start()].chars().map(|_| None));
            kinds.extend(m.as_str().chars().map(|_| Some(kind)));
            byte = m.end();
        }
        kinds.extend(line[byte..].chars().map(|_| None));
        kinds
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    /// Render kinds as one letter per code point for compact assertions.
    fn classes(highlighter: &Highlighter, line: &str) -> String {
        highlighter
            .highlight_line(line)
            .into_iter()
            .map(|kind| match kind {
                None => '.',
                Some(TokenKind::Keyword) => 'k',
                Some(TokenKind::String) => 's',
                Some(TokenKind::Comment) => 'c',
                Some(TokenKind::Number) => 'n',
            })
            .collect()
    }

    fn for_ext(ext: &str) -> Highlighter {
        Highlighter::for_path(Path::new(&format!("file.{ext}"))).expect("known extension")
    }

    #[test]
    fn test_rust_line() {
        let rust = for_ext("rs");
        assert_eq!(
            classes(&rust, r#"let x = "fn"; // 42"#),
            "kkk.....ssss..ccccc"
        );
    }

    #[test]
    fn test_comment_marker_inside_string_stays_string() {
        let python = for_ext("py");
        assert_eq!(classes(&python, r#"s = "a # b"  # note"#), "....sssssss..cccccc");
        assert_eq!(classes(&python, "# say 'hi'"), "cccccccccc");
    }

    #[test]
    fn test_keywords_need_word_boundaries() {
        let go = for_ext("go");
        assert_eq!(classes(&go, "format(go1)"), "...........");
        assert_eq!(classes(&go, "go run(7)"), "kk.....n.");
    }

    #[test]
    fn test_hcl_and_json() {
        let hcl = for_ext("TF");
        assert_eq!(classes(&hcl, r#"resource "a" {"#), "kkkkkkkk.sss..");
        let json = for_ext("json");
        assert_eq!(classes(&json, r#"{"n": 1.5, "ok": true}"#), ".sss..nnn..ssss..kkkk.");
    }

    #[test]
    fn test_columns_follow_code_points() {
        let rust = for_ext("rs");
        let kinds = rust.highlight_line("\"你好\" 1");
        assert_eq!(kinds.len(), 6);
        assert_eq!(kinds[1], Some(TokenKind::String));
        assert_eq!(kinds[5], Some(TokenKind::Number));
    }

    #[test]
    fn test_unknown_extension_is_plain_text() {
        assert!(Highlighter::for_path(Path::new("notes.txt")).is_none());
        assert!(Highlighter::for_path(Path::new("Makefile")).is_none());
    }
}
