//! Plain-text rendering of a line diagnostic.

use std::fmt;

use crate::config::DiagnosticConfig;


/// ANSI color codes.
mod colors {
    pub const ERROR: &str = "\x1b[1;31m"; // Bold red
    pub const BOLD: &str = "\x1b[1m";
    pub const RESET: &str = "\x1b[0m";
}

const TAB: &str = "    ";
const SEPARATOR: &str = " | ";
const CONTINUATION: &str = "\n        | ";
const ELLIPSIS: char = '…';

/// The token at the error position.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Found {
    Token(String),
    EndOfText,
}

impl fmt::Display for Found {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Found::Token(token) => f.write_str(token),
            Found::EndOfText => f.write_str("ε (END OF TEXT)"),
        }
    }
}

/// An error report for one element line.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SyntaxDiagnostic {
    message: String,
    line: String,
    /// Character column of the error in `line`.
    column: Option<usize>,
    found: Option<Found>,
    expected: Vec<String>,
}

impl SyntaxDiagnostic {
    pub fn new(message: impl Into<String>, line: impl Into<String>) -> Self {
        SyntaxDiagnostic {
            message: message.into(),
            line: line.into(),
            column: None,
            found: None,
            expected: Vec::new(),
        }
    }

    #[must_use]
    pub fn at_column(mut self, column: usize) -> Self {
        self.column = Some(column);
        self
    }

    #[must_use]
    pub fn with_found(mut self, found: Found) -> Self {
        self.found = Some(found);
        self
    }

    #[must_use]
    pub fn with_expected<I, S>(mut self, expected: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.expected = expected.into_iter().map(Into::into).collect();
        self
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn line(&self) -> &str {
        &self.line
    }

    pub fn column(&self) -> Option<usize> {
        self.column
    }

    pub fn found(&self) -> Option<&Found> {
        self.found.as_ref()
    }

    pub fn expected(&self) -> &[String] {
        &self.expected
    }

    pub fn render(&self, config: &DiagnosticConfig) -> String {
        let mut out = String::new();
        out.push_str(&self.message);
        out.push('\n');
        let (line, caret) = expand_tabs(&self.line, self.column);
        out.push_str(&line);
        if let Some(caret) = caret {
            out.push('\n');
            out.extend(std::iter::repeat(' ').take(caret));
            paint(&mut out, "^", colors::ERROR, config.colors);
        }
        if let Some(found) = &self.found {
            out.push_str("\nFound token ");
            paint(&mut out, &found.to_string(), colors::BOLD, config.colors);
        }
        if !self.expected.is_empty() {
            out.push_str("\n\nExpected: ");
            out.push_str(&self.expected_list(config));
        }
        out
    }

    /// `a | b | c`, wrapped after any symbol that takes the current
    /// line past the wrap width.
    fn expected_list(&self, config: &DiagnosticConfig) -> String {
        let mut list = String::new();
        let mut chunk = String::new();
        let mut separator = "";
        for symbol in &self.expected {
            chunk.push_str(separator);
            chunk.push_str(symbol);
            separator = SEPARATOR;
            if chunk.chars().count() > config.wrap_width {
                list.push_str(&chunk);
                chunk.clear();
                separator = CONTINUATION;
            }
        }
        list.push_str(&chunk);
        match config.max_width {
            Some(max) => truncate(&list, max),
            None => list,
        }
    }
}

impl fmt::Display for SyntaxDiagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render(&DiagnosticConfig::default()))
    }
}

fn paint(out: &mut String, text: &str, color: &str, colors: bool) {
    if colors {
        out.push_str(color);
        out.push_str(text);
        out.push_str(colors::RESET);
    } else {
        out.push_str(text);
    }
}

/// Expand tabs and move `column` along. A column past the end of the
/// line stays one past the expanded end.
fn expand_tabs(line: &str, column: Option<usize>) -> (String, Option<usize>) {
    let mut expanded = String::with_capacity(line.len());
    let mut width = 0;
    let mut caret = None;
    for (i, c) in line.chars().enumerate() {
        if column == Some(i) {
            caret = Some(width);
        }
        if c == '\t' {
            expanded.push_str(TAB);
            width += TAB.len();
        } else {
            expanded.push(c);
            width += 1;
        }
    }
    if caret.is_none() && column.is_some() {
        caret = Some(width);
    }
    (expanded, caret)
}

fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_owned();
    }
    let mut cut: String = text.chars().take(max.saturating_sub(1)).collect();
    cut.push(ELLIPSIS);
    cut
}
