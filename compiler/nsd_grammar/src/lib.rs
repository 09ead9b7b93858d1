//! LALR(1) parsing for element lines.
//!
//! The grammar is declared in `line_grammar.lalrpop` and compiled by
//! LALRPOP at build time; a grammar with conflicts fails the build.
//! [`parse_line`] runs the generated parser over classified
//! [`Lexeme`]s and returns a concrete [`Node`] tree labelled with
//! [`line::Prod`]s, or a [`ParseFailure`] naming the rejected lexeme and
//! the terminals that would have been accepted there.

mod driver;
pub mod line;

lalrpop_util::lalrpop_mod!(
    #[allow(clippy::all, clippy::pedantic, clippy::unwrap_used, clippy::expect_used, unused)]
    line_grammar
);

pub use driver::{parse_line, Lexeme, Node, ParseFailure};
