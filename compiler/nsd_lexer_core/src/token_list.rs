//! A token sequence that remembers its whitespace.
//!
//! For `n` tokens a [`TokenList`] keeps `n + 1` paddings: the gap before
//! the first token, the gaps between neighbours, and the gap after the last
//! token. Gaps that contained a line feed are recorded by index so the
//! rendering reproduces the line break.
//!
//! # Invariants
//!
//! - `paddings.len() == tokens.len() + 1`
//! - every newline gap index is `<= tokens.len()` and its padding is `>= 1`
//! - `len()` equals the character count of the rendered text
//! - after every edit, two neighbouring tokens that would fuse into a
//!   different token sequence when written without a gap have padding `>= 1`

use std::fmt;

use smallvec::SmallVec;

use crate::scanner::tokenize;
use crate::symbols::is_ident_continue;

mod edit;
mod layout;
mod search;


#[derive(Clone, PartialEq, Eq, Hash)]
pub struct TokenList {
    tokens: Vec<String>,
    paddings: Vec<usize>,
    /// Sorted padding indices whose gap renders with a leading line feed.
    newlines: SmallVec<[usize; 2]>,
    /// Cached rendered width in characters.
    len: usize,
}

impl Default for TokenList {
    fn default() -> Self {
        TokenList::new()
    }
}

impl TokenList {
    /// An empty list: no tokens, no whitespace.
    pub fn new() -> Self {
        TokenList {
            tokens: Vec::new(),
            paddings: vec![0],
            newlines: SmallVec::new(),
            len: 0,
        }
    }

    /// A list consisting only of `width` spaces.
    pub fn blank(width: usize) -> Self {
        TokenList {
            tokens: Vec::new(),
            paddings: vec![width],
            newlines: SmallVec::new(),
            len: width,
        }
    }

    /// A list holding exactly `token`, which is taken as is.
    pub fn from_token(token: impl Into<String>) -> Self {
        let token = token.into();
        if token.is_empty() {
            return TokenList::new();
        }
        let len = token.chars().count();
        TokenList {
            tokens: vec![token],
            paddings: vec![0, 0],
            newlines: SmallVec::new(),
            len,
        }
    }

    /// Build a list from ready-made tokens, separated only where two
    /// neighbours would otherwise run together.
    pub fn from_tokens<I, S>(tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut list = TokenList::new();
        for token in tokens {
            list.push(token);
        }
        list
    }

    pub(crate) fn from_parts(
        tokens: Vec<String>,
        paddings: Vec<usize>,
        newlines: SmallVec<[usize; 2]>,
    ) -> Self {
        debug_assert_eq!(paddings.len(), tokens.len() + 1);
        let mut list = TokenList {
            tokens,
            paddings,
            newlines,
            len: 0,
        };
        list.recompute_len();
        list
    }

    /// Rendered width in characters, whitespace included.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// True when the rendered text is empty (no tokens and no whitespace).
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// True when there are no tokens, regardless of whitespace.
    #[inline]
    pub fn is_blank(&self) -> bool {
        self.tokens.is_empty()
    }

    #[inline]
    pub fn token_count(&self) -> usize {
        self.tokens.len()
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.tokens.get(index).map(String::as_str)
    }

    pub fn first(&self) -> Option<&str> {
        self.tokens.first().map(String::as_str)
    }

    pub fn last(&self) -> Option<&str> {
        self.tokens.last().map(String::as_str)
    }

    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.tokens.iter().map(String::as_str)
    }

    /// Paddings `(before, after)` of the token at `index`.
    pub fn padding_at(&self, index: usize) -> Option<(usize, usize)> {
        if index >= self.tokens.len() {
            return None;
        }
        Some((self.paddings[index], self.paddings[index + 1]))
    }

    /// Sum of all whitespace in the list.
    pub fn padding_total(&self) -> usize {
        self.paddings.iter().sum()
    }

    pub fn leading_padding(&self) -> usize {
        self.paddings[0]
    }

    pub fn trailing_padding(&self) -> usize {
        self.paddings[self.tokens.len()]
    }

    /// Padding indices that render as line breaks.
    pub fn newline_gaps(&self) -> &[usize] {
        &self.newlines
    }

    pub fn is_newline_gap(&self, gap: usize) -> bool {
        self.newlines.binary_search(&gap).is_ok()
    }

    /// Character offset of the token at `index` in the rendered text.
    pub fn column_of(&self, index: usize) -> usize {
        let index = index.min(self.tokens.len());
        let mut column = 0;
        for i in 0..index {
            column += self.paddings[i] + self.tokens[i].chars().count();
        }
        column + self.paddings[index]
    }

    pub(crate) fn recompute_len(&mut self) {
        self.len = self.paddings.iter().sum::<usize>()
            + self
                .tokens
                .iter()
                .map(|token| token.chars().count())
                .sum::<usize>();
    }

    /// Set the width of a gap, dropping its line break when it collapses.
    pub(crate) fn set_gap(&mut self, gap: usize, width: usize) {
        self.paddings[gap] = width;
        if width == 0 {
            if let Ok(pos) = self.newlines.binary_search(&gap) {
                self.newlines.remove(pos);
            }
        }
    }

    pub(crate) fn mark_newline(&mut self, gap: usize) {
        if let Err(pos) = self.newlines.binary_search(&gap) {
            self.newlines.insert(pos, gap);
        }
    }

    /// Widen the gap between tokens `left` and `left + 1` to one space if
    /// the two would otherwise fuse. Returns whether the gap was widened.
    pub(crate) fn ensure_gap(&mut self, left: usize) -> bool {
        let right = left + 1;
        if right >= self.tokens.len() || self.paddings[right] > 0 {
            return false;
        }
        if needs_gap(&self.tokens[left], &self.tokens[right]) {
            self.paddings[right] = 1;
            self.len += 1;
            return true;
        }
        false
    }

    fn write_gap(&self, gap: usize, out: &mut impl fmt::Write) -> fmt::Result {
        let mut width = self.paddings[gap];
        if self.is_newline_gap(gap) && width > 0 {
            out.write_char('\n')?;
            width -= 1;
        }
        for _ in 0..width {
            out.write_char(' ')?;
        }
        Ok(())
    }
}

/// Whether `left` followed directly by `right` would tokenize differently
/// from the pair itself.
pub(crate) fn needs_gap(left: &str, right: &str) -> bool {
    let (Some(last), Some(first)) = (left.chars().last(), right.chars().next()) else {
        return false;
    };
    if is_ident_continue(last) && is_ident_continue(first) {
        return true;
    }
    let joined = tokenize(&format!("{left}{right}"));
    joined.tokens.len() != 2 || joined.tokens[0] != left || joined.tokens[1] != right
}

/// Lossless rendering: tokens with their original whitespace.
impl fmt::Display for TokenList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, token) in self.tokens.iter().enumerate() {
            self.write_gap(i, f)?;
            f.write_str(token)?;
        }
        self.write_gap(self.tokens.len(), f)
    }
}

/// Structural view, e.g. `TokenList[0┤a├1┤<-├1┤b├0]`. A `‖` marks a
/// newline gap.
impl fmt::Debug for TokenList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("TokenList[")?;
        for (i, token) in self.tokens.iter().enumerate() {
            if self.is_newline_gap(i) {
                f.write_str("‖")?;
            }
            write!(f, "{}┤{token}├", self.paddings[i])?;
        }
        let last = self.tokens.len();
        if self.is_newline_gap(last) {
            f.write_str("‖")?;
        }
        write!(f, "{}]", self.paddings[last])
    }
}

impl From<&str> for TokenList {
    fn from(text: &str) -> Self {
        tokenize(text)
    }
}
