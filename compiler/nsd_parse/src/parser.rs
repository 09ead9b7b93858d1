//! The line parser: normalization, grammar-driven parsing, tree building
//! and diagnostics.

use std::sync::Arc;

use nsd_diagnostic::{DiagnosticConfig, Found, SyntaxDiagnostic};
use nsd_grammar::line::Term;
use nsd_grammar::{parse_line, Lexeme, Node, ParseFailure};
use nsd_ir::{DeclRules, ExprKind, Expression};
use nsd_lexer::{tokenize, unify, Direction, ElementKind, KeywordConfig, Marker, Normalizer, TokenList};
use nsd_types::{SharedTypeRegistry, TypeRegistry};
use parking_lot::{Mutex, MutexGuard};
use tracing::{debug, instrument};

use crate::build::{build_expressions, expression_lexemes, Builder};
use crate::classify::classify;
use crate::declaration::{parse_declaration, parse_type_spec};
use crate::error::ParseError;
use crate::line::{Line, LineError, LineKind};
use crate::types::{resolve_spec, type_error};


/// Words that may introduce a routine header.
const ROUTINE_PREFIXES: [&str; 3] = ["function", "procedure", "sub"];

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParserOptions {
    /// Rewrite word operators and alternative spellings to symbols
    /// before parsing, and back to words in diagnostics.
    pub unify_operators: bool,
    pub diagnostics: DiagnosticConfig,
}

impl Default for ParserOptions {
    fn default() -> Self {
        ParserOptions {
            unify_operators: true,
            diagnostics: DiagnosticConfig::default(),
        }
    }
}

/// Parses element lines into [`Line`]s.
///
/// The parser keeps the last grammar failure for inspection, so it is
/// used through `&mut self`; see [`SharedLineParser`] for sharing.
#[derive(Debug)]
pub struct LineParser {
    normalizer: Normalizer,
    options: ParserOptions,
    last_failure: Option<ParseFailure>,
}

impl Default for LineParser {
    fn default() -> Self {
        Self::new()
    }
}

impl LineParser {
    /// A parser with the default keywords and options.
    pub fn new() -> Self {
        Self::with_keywords(KeywordConfig::default(), ParserOptions::default())
    }

    pub fn with_keywords(keywords: KeywordConfig, options: ParserOptions) -> Self {
        LineParser {
            normalizer: Normalizer::new(keywords),
            options,
            last_failure: None,
        }
    }

    pub fn options(&self) -> &ParserOptions {
        &self.options
    }

    pub fn options_mut(&mut self) -> &mut ParserOptions {
        &mut self.options
    }

    pub fn normalizer(&self) -> &Normalizer {
        &self.normalizer
    }

    /// The grammar failure behind the most recent syntax error.
    pub fn last_failure(&self) -> Option<&ParseFailure> {
        self.last_failure.as_ref()
    }

    /// Normalize line `line_index` of an element with the configured
    /// keywords.
    pub fn normalize(&self, text: &str, kind: ElementKind, line_index: usize) -> TokenList {
        self.normalizer
            .normalize(&tokenize(text), kind, line_index, self.options.unify_operators)
    }

    /// Parse an already normalized line, inferring the element kind from
    /// its leading marker.
    pub fn parse(&mut self, tokens: &TokenList, registry: &TypeRegistry) -> Result<Line, ParseError> {
        self.parse_element(tokens, element_kind_of(tokens), registry)
    }

    /// Parse an already normalized line of an element of `kind`. The kind
    /// only matters for restoring keywords in diagnostics.
    #[instrument(level = "debug", skip(self, tokens, registry), fields(line = %tokens))]
    pub fn parse_element(
        &mut self,
        tokens: &TokenList,
        kind: ElementKind,
        registry: &TypeRegistry,
    ) -> Result<Line, ParseError> {
        let lexemes = classify(tokens, 0, tokens.token_count());
        let tree = self.run(tokens, &lexemes, kind)?;
        let line = Builder::new(tokens, registry, 0).line(&tree)?;
        debug!(kind = %line.kind, "line parsed");
        Ok(line)
    }

    /// Tokenize, normalize, parse and build one line of an element.
    /// Errors are folded into a [`LineKind::Raw`] line.
    pub fn parse_text(&mut self, text: &str, kind: ElementKind, line_index: usize, registry: &TypeRegistry) -> Line {
        let normalized = self.normalize(text, kind, line_index);
        match self.parse_element(&normalized, kind, registry) {
            Ok(line) => line,
            Err(error) => {
                debug!(%error, "line rejected");
                let mut line_error = LineError::from_parse_error(&error);
                if line_error.column.is_none() {
                    line_error.column = Some(self.restored_column(&normalized, kind, error.position()));
                }
                Line::raw(line_error)
            }
        }
    }

    /// Parse a comma-separated list of expressions, such as the operand
    /// list of an output instruction.
    pub fn parse_expressions(&mut self, text: &str, registry: &TypeRegistry) -> Result<Vec<Expression>, ParseError> {
        let mut tokens = tokenize(text);
        if self.options.unify_operators {
            unify(&mut tokens, Direction::ToSymbols);
        }
        let lexemes = expression_lexemes(&tokens, 0, tokens.token_count());
        let tree = self.run(&tokens, &lexemes, ElementKind::Instruction)?;
        build_expressions(&tokens, registry, 0, &tree)
    }

    /// Parse a routine signature:
    ///
    /// ```text
    /// name(params): T      name(params) as T      T name(params)
    /// ```
    ///
    /// optionally introduced by `function`, `procedure` or `sub`. The
    /// line holds the name and the parameter declaration; its type is the
    /// result type, if any.
    pub fn parse_routine_header(&mut self, text: &str, registry: &TypeRegistry) -> Result<Line, ParseError> {
        let tokens = tokenize(text);
        let count = tokens.token_count();
        let word = |i: usize| tokens.get(i).unwrap_or_default();

        let start = usize::from(ROUTINE_PREFIXES.iter().any(|p| word(0).eq_ignore_ascii_case(p)));
        let malformed = |position: usize, message: &str| ParseError::Syntax {
            message: format!("Syntax error: {message}"),
            position,
            column: tokens.column_of(position),
        };
        let open = (start..count)
            .find(|&i| word(i) == "(")
            .ok_or_else(|| malformed(count, "`(` expected"))?;
        if open == start {
            return Err(malformed(open, "routine name expected"));
        }
        let close = matching_paren(&tokens, open).ok_or_else(|| malformed(count, "`)` expected"))?;
        let name_at = open - 1;

        let result = if name_at > start {
            Some(parse_type_spec(&tokens, start, name_at, registry)?)
        } else if close + 1 < count {
            let separator = word(close + 1);
            if separator != ":" && !separator.eq_ignore_ascii_case("as") {
                return Err(malformed(close + 1, "`:` or `as` expected"));
            }
            Some(parse_type_spec(&tokens, close + 2, count, registry)?)
        } else {
            None
        };
        if name_at > start && close + 1 < count {
            return Err(malformed(close + 1, "result type given twice"));
        }
        let result = result
            .map(|spec| resolve_spec(&spec, registry).map_err(|e| type_error(&e, name_at)))
            .transpose()?;

        let parameters = if close == open + 1 {
            Expression::new(
                ExprKind::Declaration {
                    rule: DeclRules::empty(),
                    items: Vec::new(),
                    is_constant: false,
                },
                close,
            )
        } else {
            parse_declaration(&tokens, open + 1, close, DeclRules::all(), registry)?
        };
        let name = Expression::identifier(word(name_at), name_at);
        Ok(Line::new(LineKind::Routine, vec![name, parameters]).with_type(result))
    }

    /// Run the grammar over `lexemes`, turning a rejection into a
    /// rendered syntax error.
    fn run(&mut self, tokens: &TokenList, lexemes: &[Lexeme], kind: ElementKind) -> Result<Node, ParseError> {
        match parse_line(lexemes) {
            Ok(tree) => {
                self.last_failure = None;
                Ok(tree)
            }
            Err(failure) => {
                let error = self.syntax_error(tokens, &failure, kind);
                self.last_failure = Some(failure);
                Err(error)
            }
        }
    }

    fn syntax_error(&self, tokens: &TokenList, failure: &ParseFailure, kind: ElementKind) -> ParseError {
        let position = failure.found.map_or(tokens.token_count(), |lexeme| lexeme.token);
        let mut restored = self.normalizer.restore(tokens, kind);
        if self.options.unify_operators {
            unify(&mut restored.tokens, Direction::ToText);
        }
        let restored_count = restored.tokens.token_count();
        let map = |i: usize| restored.index_map.get(i).copied().unwrap_or(restored_count);
        let start = map(position);
        let column = restored.tokens.column_of(start);

        let found = match failure.found {
            None => Found::EndOfText,
            Some(lexeme) => {
                let end = lexeme.token + lexeme.width;
                let text = restored.tokens.sub_sequence(start, map(end)).to_string();
                let text = match text.trim() {
                    "" => tokens.sub_sequence(lexeme.token, end).to_string().trim().to_owned(),
                    text => text.to_owned(),
                };
                Found::Token(text)
            }
        };
        let expected: Vec<String> = failure
            .expected
            .iter()
            .map(|&term| self.terminal_label(term, kind))
            .collect();

        let message = SyntaxDiagnostic::new("Syntax error", restored.tokens.to_string())
            .at_column(column)
            .with_found(found)
            .with_expected(expected)
            .render(&self.options.diagnostics);
        ParseError::Syntax {
            message,
            position,
            column,
        }
    }

    /// How a terminal is shown in the expected list: markers as the
    /// configured keyword phrase or their readable name, everything else
    /// by terminal name.
    fn terminal_label(&self, term: Term, kind: ElementKind) -> String {
        match Marker::from_token(term.name()) {
            Some(marker) => marker
                .keyword(kind)
                .map(|key| self.normalizer.keywords().phrase(key))
                .filter(|phrase| !phrase.is_empty())
                .unwrap_or(marker.label())
                .to_owned(),
            None => term.name().to_owned(),
        }
    }

    fn restored_column(&self, tokens: &TokenList, kind: ElementKind, position: usize) -> usize {
        let restored = self.normalizer.restore(tokens, kind);
        let index = restored
            .index_map
            .get(position)
            .copied()
            .unwrap_or(restored.tokens.token_count());
        restored.tokens.column_of(index)
    }
}

/// Index of the `)` closing the `(` at `open`.
fn matching_paren(tokens: &TokenList, open: usize) -> Option<usize> {
    let mut depth = 0usize;
    for (i, token) in tokens.iter().enumerate().skip(open) {
        match token {
            "(" => depth += 1,
            ")" => {
                depth -= 1;
                if depth == 0 {
                    return Some(i);
                }
            }
            _ => {}
        }
    }
    None
}

/// The element kind a normalized line most likely came from.
fn element_kind_of(tokens: &TokenList) -> ElementKind {
    match tokens.first().and_then(Marker::from_token) {
        Some(Marker::Cond) => ElementKind::Alternative,
        Some(Marker::For | Marker::To | Marker::Step) => ElementKind::For,
        Some(Marker::Foreach | Marker::In) => ElementKind::ForIn,
        Some(Marker::Case | Marker::Select | Marker::Default) => ElementKind::Case { lines: 2 },
        Some(Marker::Leave | Marker::Return | Marker::Exit | Marker::Throw) => ElementKind::Jump,
        Some(Marker::Call) => ElementKind::Call,
        Some(Marker::Catch) => ElementKind::Catch,
        Some(Marker::Input | Marker::Output) | None => ElementKind::Instruction,
    }
}

/// A [`LineParser`] shared between threads.
///
/// The lock is held for a whole parse, since diagnostics read engine
/// state after the grammar returns.
#[derive(Clone, Debug)]
pub struct SharedLineParser(Arc<Mutex<LineParser>>);

impl SharedLineParser {
    pub fn new(parser: LineParser) -> Self {
        SharedLineParser(Arc::new(Mutex::new(parser)))
    }

    pub fn lock(&self) -> MutexGuard<'_, LineParser> {
        self.0.lock()
    }

    /// [`LineParser::parse_text`] against the shared registry.
    pub fn parse_text(&self, text: &str, kind: ElementKind, line_index: usize, registry: &SharedTypeRegistry) -> Line {
        let registry = registry.read();
        self.0.lock().parse_text(text, kind, line_index, &registry)
    }
}
