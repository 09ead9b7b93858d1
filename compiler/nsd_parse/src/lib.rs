//! Element line parsing.
//!
//! A line of a diagram element is tokenized, normalized into the marker
//! vocabulary, classified into grammar terminals and parsed with the
//! LALR(1) line grammar. The parse tree is then built into a [`Line`]:
//! a kind, its top-level expressions and, for declarations, a type.
//!
//! ```text
//! "for k <- 1 to n"  ->  §FOR§ k <- 1 §TO§ n  ->  FORLOOP[k <- 1; n; 1]
//! ```
//!
//! Syntax errors carry a rendered diagnostic against the line as the user
//! wrote it; semantic errors (indexing a literal, unknown types) carry a
//! message and a token position. [`LineParser::parse_text`] folds both
//! into a [`LineKind::Raw`] line.

mod build;
mod classify;
mod declaration;
mod error;
mod line;
mod logging;
mod parser;
mod stack;
mod types;
mod variables;

pub use declaration::{parse_declaration, DeclarationError};
pub use error::ParseError;
pub use line::{Line, LineError, LineErrorKind, LineKind};
pub use logging::init_tracing;
pub use parser::{LineParser, ParserOptions, SharedLineParser};
pub use variables::VariableSets;

pub use nsd_lexer::ElementKind;
