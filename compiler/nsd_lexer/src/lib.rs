//! Keyword and operator normalization.
//!
//! Users write element lines with configurable natural-language keywords
//! (`for i <- 1 to 10 by 2`, `while x > 0`, `INPUT a`). Before parsing,
//! the [`Normalizer`] replaces those phrases with fixed internal markers
//! (`§FOR§`, `§TO§`, ...) so the grammar only ever sees one spelling, and
//! optionally unifies word operators (`and`, `mod`) to their symbols.
//!
//! Normalization is reversible for error display: [`Normalizer::restore`]
//! maps markers back to the configured phrases.

mod element;
mod keywords;
mod marker;
mod normalize;
mod unify;

pub use element::{ElementKind, UnknownElementKind};
pub use keywords::{KeywordConfig, KeywordKey};
pub use marker::Marker;
pub use normalize::{Normalizer, Restored};
pub use unify::{unify, Direction};

pub use nsd_lexer_core::{tokenize, TokenClass, TokenList};
