//! Running the generated line parser over classified lexemes.

use lalrpop_util::ParseError;
use thiserror::Error;
use tracing::{instrument, trace};

use crate::line::{Prod, Term};
use crate::line_grammar::ElementLineParser;

#[cfg(test)]
mod tests;

/// One classified input token.
///
/// `token` is the index of the first source token the terminal stands
/// for; `width` is how many source tokens it covers.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Lexeme {
    pub term: Term,
    pub token: usize,
    pub width: usize,
}

impl Lexeme {
    pub fn new(term: Term, token: usize) -> Self {
        Lexeme { term, token, width: 1 }
    }

    #[must_use]
    pub fn with_width(mut self, width: usize) -> Self {
        self.width = width;
        self
    }
}

/// A node of the concrete parse tree.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Node {
    Terminal(Lexeme),
    Reduction { production: Prod, children: Vec<Node> },
}

impl Node {
    pub(crate) fn reduce(production: Prod, children: Vec<Node>) -> Self {
        Node::Reduction { production, children }
    }

    /// Index of the first source token covered, if any.
    pub fn first_token(&self) -> Option<usize> {
        match self {
            Node::Terminal(lexeme) => Some(lexeme.token),
            Node::Reduction { children, .. } => children.iter().find_map(Node::first_token),
        }
    }
}

/// Where and why the input was rejected.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("syntax error at lexeme {position}")]
pub struct ParseFailure {
    /// Index into the lexeme slice; equal to its length at end of input.
    pub position: usize,
    /// `None` at end of input.
    pub found: Option<Lexeme>,
    /// Terminals that would have been accepted, in terminal order.
    pub expected: Vec<Term>,
}

impl ParseFailure {
    fn new(position: usize, found: Option<Lexeme>, expected: &[String]) -> Self {
        let mut expected: Vec<Term> = expected
            .iter()
            .filter_map(|name| Term::from_name(name.trim_matches('"')))
            .collect();
        expected.sort_unstable();
        expected.dedup();
        ParseFailure {
            position,
            found,
            expected,
        }
    }
}

/// Parse a complete lexeme sequence into a tree rooted at an element
/// line.
///
/// Lexemes are located by their index in `input`, so a failure position
/// indexes `input` directly.
#[instrument(level = "trace", skip_all, fields(lexemes = input.len()))]
pub fn parse_line(input: &[Lexeme]) -> Result<Node, ParseFailure> {
    let triples = input.iter().enumerate().map(|(i, &lexeme)| (i, lexeme, i + 1));
    let failure = match ElementLineParser::new().parse(triples) {
        Ok(tree) => return Ok(tree),
        Err(error) => match error {
            ParseError::UnrecognizedToken {
                token: (start, lexeme, _),
                expected,
            } => ParseFailure::new(start, Some(lexeme), &expected),
            ParseError::UnrecognizedEof { expected, .. } => ParseFailure::new(input.len(), None, &expected),
            ParseError::ExtraToken {
                token: (start, lexeme, _),
            } => ParseFailure::new(start, Some(lexeme), &[]),
            ParseError::InvalidToken { location } => ParseFailure::new(location, input.get(location).copied(), &[]),
            ParseError::User { error } => {
                trace!(error, "lexeme stream rejected");
                ParseFailure::new(input.len(), None, &[])
            }
        },
    };
    trace!(position = failure.position, expected = failure.expected.len(), "parse failed");
    Err(failure)
}
