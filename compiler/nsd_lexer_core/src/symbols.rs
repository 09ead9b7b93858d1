//! Operator table and character classes shared by the scanner and the
//! gap checks of [`TokenList`](crate::TokenList).

/// Multi-character operator symbols recognised as single tokens.
///
/// Matching is greedy: the longest entry that matches at the cursor wins.
/// Every three-character entry has its two-character prefix in the table.
pub const LEX_SYMBOLS: &[&str] = &[
    ":=", "<-", "<=", ">=", "<>", "==", "!=", "<<", ">>", ">>>", "&&", "||", "..", "...", "++",
    "--", "+=", "-=", "*=", "/=", "%=", "&=", "|=", "<<=", ">>=", "\\\\",
];

/// Escape letters that form a single token with a preceding backslash.
pub(crate) const ESCAPE_CHARS: &[char] = &['0', 'b', 'f', 't', 'n', 'r', '\'', '"'];

/// Length in characters of the longest symbol at the start of `rest`.
///
/// Returns 1 when no multi-character symbol matches, so a lone operator
/// character always forms a token of its own.
pub(crate) fn longest_symbol(rest: &[char]) -> usize {
    for n in [3, 2] {
        if rest.len() >= n {
            let candidate: String = rest[..n].iter().collect();
            if LEX_SYMBOLS.contains(&candidate.as_str()) {
                return n;
            }
        }
    }
    1
}

#[inline]
pub(crate) fn is_ident_start(c: char) -> bool {
    c.is_alphabetic() || c == '_'
}

#[inline]
pub(crate) fn is_ident_continue(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Whether `text` is a complete identifier token.
pub fn is_identifier(text: &str) -> bool {
    let mut chars = text.chars();
    chars.next().is_some_and(is_ident_start) && chars.all(is_ident_continue)
}

/// Whether `text` is an internal keyword marker such as `§FOR§`.
pub fn is_internal_key(text: &str) -> bool {
    let Some(inner) = text
        .strip_prefix('§')
        .and_then(|rest| rest.strip_suffix('§'))
    else {
        return false;
    };
    !inner.is_empty() && inner.chars().all(char::is_uppercase)
}
