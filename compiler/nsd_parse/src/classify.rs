//! Mapping normalized tokens onto grammar terminals.
//!
//! Most tokens classify on their own. Declaration keywords are reserved
//! only where a declaration can use them, so `array`, `type` or `record`
//! remain usable as variable names elsewhere.

use nsd_grammar::line::Term;
use nsd_grammar::Lexeme;
use nsd_lexer_core::{TokenClass, TokenList};
use rustc_hash::FxHashSet;

#[cfg(test)]
mod tests;

/// Classify the tokens in `from..to`. Lexeme token indices are absolute.
pub(crate) fn classify(tokens: &TokenList, from: usize, to: usize) -> Vec<Lexeme> {
    let to = to.min(tokens.token_count());
    let text = |i: usize| tokens.get(i).unwrap_or_default();
    let of_keywords = array_of_keywords(tokens, from, to);

    let mut lexemes = Vec::with_capacity(to.saturating_sub(from));
    let mut i = from;
    while i < to {
        let token = text(i);
        if token == "[" && i + 1 < to && text(i + 1) == "]" {
            lexemes.push(Lexeme::new(Term::Brackets, i).with_width(2));
            i += 2;
            continue;
        }
        let term = match TokenClass::of(token) {
            TokenClass::Identifier => {
                let previous = (i > from).then(|| text(i - 1));
                let next = (i + 1 < to).then(|| text(i + 1));
                keyword(token, i == from, previous, next, &of_keywords, i)
            }
            TokenClass::InternalKey => marker(token),
            TokenClass::DecimalInt => Term::DecLiteral,
            TokenClass::OctalInt => Term::OctLiteral,
            TokenClass::HexInt => Term::HexLiteral,
            TokenClass::BinaryInt => Term::BinLiteral,
            TokenClass::Float => Term::FloatLiteral,
            TokenClass::String => Term::StringLiteral,
            TokenClass::Char => Term::CharLiteral,
            TokenClass::Symbol => symbol(token),
            TokenClass::Escape | TokenClass::Invalid => Term::Unknown,
        };
        lexemes.push(Lexeme::new(term, i));
        i += 1;
    }
    lexemes
}

/// Indices of `array` and `of` tokens that form `array of` or
/// `array [...] of`.
fn array_of_keywords(tokens: &TokenList, from: usize, to: usize) -> FxHashSet<usize> {
    let mut found = FxHashSet::default();
    let is = |i: usize, word: &str| tokens.get(i).is_some_and(|t| t.eq_ignore_ascii_case(word));
    for i in from..to {
        if !is(i, "array") {
            continue;
        }
        let mut of = i + 1;
        if tokens.get(of) == Some("[") {
            let mut depth = 0usize;
            while of < to {
                match tokens.get(of) {
                    Some("[") => depth += 1,
                    Some("]") => {
                        depth -= 1;
                        if depth == 0 {
                            break;
                        }
                    }
                    _ => {}
                }
                of += 1;
            }
            of += 1;
        }
        if of < to && is(of, "of") {
            found.insert(i);
            found.insert(of);
        }
    }
    found
}

fn keyword(
    token: &str,
    leading: bool,
    previous: Option<&str>,
    next: Option<&str>,
    array_of: &FxHashSet<usize>,
    index: usize,
) -> Term {
    let lower = token.to_ascii_lowercase();
    match lower.as_str() {
        "true" | "false" => Term::BooleanLiteral,
        "null" => Term::NullLiteral,
        "div" => Term::DivOpr,
        "mod" => Term::ModOpr,
        "shl" => Term::ShlOpr,
        "shr" => Term::ShrOpr,
        "and" => Term::AndOpr,
        "or" => Term::OrOpr,
        "not" => Term::NotOpr,
        "xor" => Term::XorOpr,
        "as" => Term::AsKey,
        "var" if leading => Term::VarKey,
        "dim" if leading => Term::DimKey,
        "const" if leading => Term::ConstKey,
        "type" if leading => Term::TypeKey,
        "record" | "struct" if previous == Some("=") && next == Some("{") => Term::RecordKey,
        "enum" if previous == Some("=") && next == Some("{") => Term::EnumKey,
        "array" if array_of.contains(&index) => Term::ArrayKey,
        "of" if array_of.contains(&index) => Term::OfKey,
        _ => Term::Identifier,
    }
}

fn marker(token: &str) -> Term {
    Term::ALL
        .iter()
        .copied()
        .find(|t| t.name() == token && token.starts_with('§'))
        .unwrap_or(Term::Unknown)
}

fn symbol(token: &str) -> Term {
    match token {
        "(" => Term::LParen,
        ")" => Term::RParen,
        "[" => Term::LBracket,
        "]" => Term::RBracket,
        "{" => Term::LBrace,
        "}" => Term::RBrace,
        "," => Term::Comma,
        "." => Term::Dot,
        ":" => Term::Colon,
        ";" => Term::Semicolon,
        "?" => Term::Question,
        ".." => Term::DotDot,
        "<-" => Term::LArrow,
        ":=" => Term::ColonEq,
        "=" => Term::Eq,
        "==" => Term::EqEq,
        "!=" => Term::NotEq,
        "<>" => Term::LtGt,
        "<" => Term::Lt,
        ">" => Term::Gt,
        "<=" => Term::LtEq,
        ">=" => Term::GtEq,
        "+" => Term::Plus,
        "-" => Term::Minus,
        "*" => Term::Star,
        "/" => Term::Slash,
        "%" => Term::Percent,
        "++" => Term::PlusPlus,
        "--" => Term::MinusMinus,
        "~" => Term::Tilde,
        "!" => Term::Bang,
        "&" => Term::Amp,
        "|" => Term::Pipe,
        "^" => Term::Caret,
        "&&" => Term::AmpAmp,
        "||" => Term::PipePipe,
        "<<" => Term::Shl,
        ">>" => Term::Shr,
        ">>>" => Term::UShr,
        _ => Term::Unknown,
    }
}
