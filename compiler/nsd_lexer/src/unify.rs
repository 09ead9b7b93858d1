//! Operator spelling unification.

use nsd_lexer_core::TokenList;
use tracing::trace;

#[cfg(test)]
mod tests;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Direction {
    /// Word operators and alternative spellings to their symbols.
    ToSymbols,
    /// Symbols back to word operators.
    ToText,
}

/// Alternative symbol spellings, rewritten case-sensitively.
const SPELLINGS: [(&str, &str); 3] = [(":=", "<-"), ("=", "=="), ("<>", "!=")];

/// Word operators and their symbols. Words match in any case.
///
/// `div` has no symbolic twin and is left alone.
const WORDS: [(&str, &str); 7] = [
    ("and", "&&"),
    ("or", "||"),
    ("not", "!"),
    ("xor", "^"),
    ("mod", "%"),
    ("shl", "<<"),
    ("shr", ">>"),
];

/// Rewrite operator spellings in place. Returns the number of tokens
/// replaced.
pub fn unify(tokens: &mut TokenList, direction: Direction) -> usize {
    let mut count = 0;
    match direction {
        Direction::ToSymbols => {
            for (spelling, symbol) in SPELLINGS {
                count += tokens.replace_all(spelling, symbol, true);
            }
            for (word, symbol) in WORDS {
                count += tokens.replace_all(word, symbol, false);
            }
        }
        Direction::ToText => {
            for (word, symbol) in WORDS {
                count += tokens.replace_all(symbol, word, true);
            }
            count += tokens.replace_all("!=", "<>", true);
            count += tokens.replace_all("==", "=", true);
        }
    }
    trace!(?direction, count, "operators unified");
    count
}
