//! Whitespace-preserving tokenizer for the text lines of diagram elements.
//!
//! A line is split into [`TokenList`] tokens while remembering the exact
//! whitespace around every token, so the list can be edited (tokens
//! replaced, inserted, removed) and rendered back into text that still
//! looks like what the user typed.
//!
//! # Layout
//!
//! - `cursor`: character cursor with lookahead
//! - `scanner`: single-pass tokenizer producing a [`TokenList`]
//! - `class`: lexical classification of a finished token
//! - `token_list`: the token sequence with its padding and newline layout

mod class;
mod cursor;
mod scanner;
mod symbols;
mod token_list;

pub use class::TokenClass;
pub use scanner::{tokenize, tokenize_with, LexOptions};
pub use symbols::{is_identifier, is_internal_key, LEX_SYMBOLS};
pub use token_list::TokenList;
