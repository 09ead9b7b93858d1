//! Lexical classification of finished tokens.
//!
//! The scanner only splits text; consumers that need to know what kind of
//! literal a token is (the grammar adapter, literal type inference) ask
//! [`TokenClass::of`].

use crate::symbols::{is_identifier, is_internal_key, ESCAPE_CHARS};


/// What a single token is, lexically.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum TokenClass {
    Identifier,
    /// `§FOR§` and friends, inserted by keyword normalization.
    InternalKey,
    DecimalInt,
    OctalInt,
    HexInt,
    BinaryInt,
    Float,
    /// Double-quoted text, or single-quoted text longer than one character.
    String,
    /// Single-quoted text of exactly one character or one escape.
    Char,
    /// A backslash escape outside of quotes, e.g. `\n`.
    Escape,
    Symbol,
    /// An unterminated quoted literal.
    Invalid,
}

impl TokenClass {
    pub fn of(token: &str) -> TokenClass {
        let mut chars = token.chars();
        let Some(first) = chars.next() else {
            return TokenClass::Invalid;
        };
        let second = chars.next();
        let single_escape = chars.next().is_none();
        match first {
            '§' if is_internal_key(token) => TokenClass::InternalKey,
            '"' | '\'' => classify_quoted(token, first),
            '\\' if single_escape && second.is_some_and(|c| ESCAPE_CHARS.contains(&c)) => {
                TokenClass::Escape
            }
            '0'..='9' => classify_number(token),
            '.' if second.is_some_and(|c| c.is_ascii_digit() || matches!(c, 'e' | 'E')) => {
                TokenClass::Float
            }
            _ if is_identifier(token) => TokenClass::Identifier,
            _ => TokenClass::Symbol,
        }
    }

    /// Integer literal of any radix.
    pub fn is_integer(self) -> bool {
        matches!(
            self,
            TokenClass::DecimalInt | TokenClass::OctalInt | TokenClass::HexInt | TokenClass::BinaryInt
        )
    }

    pub fn is_literal(self) -> bool {
        self.is_integer()
            || matches!(self, TokenClass::Float | TokenClass::String | TokenClass::Char)
    }
}

fn classify_number(token: &str) -> TokenClass {
    let lower = token.to_ascii_lowercase();
    let body = lower.trim_end_matches('l');
    if body.starts_with("0x") {
        return TokenClass::HexInt;
    }
    if body.starts_with("0b") && body.len() > 2 && body[2..].chars().all(|c| matches!(c, '0' | '1'))
    {
        return TokenClass::BinaryInt;
    }
    if body.contains('.') || body.contains('e') || body.ends_with('f') {
        return TokenClass::Float;
    }
    if body.len() > 1 && body.starts_with('0') {
        return TokenClass::OctalInt;
    }
    TokenClass::DecimalInt
}

fn classify_quoted(token: &str, quote: char) -> TokenClass {
    let closed = token.chars().count() >= 2
        && token.ends_with(quote)
        && !ends_with_escaped_quote(token);
    if !closed {
        return TokenClass::Invalid;
    }
    if quote == '"' {
        return TokenClass::String;
    }
    let inner: Vec<char> = token.chars().skip(1).collect();
    let inner = &inner[..inner.len() - 1];
    match inner {
        [c] if *c != '\\' => TokenClass::Char,
        ['\\', _] => TokenClass::Char,
        _ => TokenClass::String,
    }
}

/// Whether the final quote of `token` is preceded by an odd run of
/// backslashes, i.e. is escaped and does not close the literal.
fn ends_with_escaped_quote(token: &str) -> bool {
    let backslashes = token
        .chars()
        .rev()
        .skip(1)
        .take_while(|&c| c == '\\')
        .count();
    // The opening quote itself is never an escape.
    backslashes % 2 == 1 && token.chars().count() > 2
}
