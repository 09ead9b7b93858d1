//! Character cursor over a decoded line.
//!
//! Lines are short and may contain arbitrary Unicode, so the cursor works
//! on a `Vec<char>` rather than on bytes. Widths throughout the tokenizer
//! are counted in characters.

#[cfg(test)]
mod tests;

pub(crate) struct Cursor {
    chars: Vec<char>,
    pos: usize,
}

impl Cursor {
    pub(crate) fn new(text: &str) -> Self {
        Cursor {
            chars: text.chars().collect(),
            pos: 0,
        }
    }

    /// The character under the cursor, `None` at end of text.
    #[inline]
    pub(crate) fn current(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    /// The character `n` places after the current one.
    #[inline]
    pub(crate) fn peek(&self, n: usize) -> Option<char> {
        self.chars.get(self.pos + n).copied()
    }

    #[inline]
    pub(crate) fn advance(&mut self) {
        if self.pos < self.chars.len() {
            self.pos += 1;
        }
    }

    #[inline]
    pub(crate) fn advance_by(&mut self, n: usize) {
        self.pos = (self.pos + n).min(self.chars.len());
    }

    #[inline]
    pub(crate) fn pos(&self) -> usize {
        self.pos
    }

    /// Advance while `pred` holds for the current character.
    pub(crate) fn eat_while(&mut self, pred: impl Fn(char) -> bool) {
        while let Some(c) = self.current() {
            if !pred(c) {
                break;
            }
            self.pos += 1;
        }
    }

    /// Everything from the cursor to the end of text.
    pub(crate) fn rest(&self) -> &[char] {
        &self.chars[self.pos..]
    }

    /// The text consumed since `start`.
    pub(crate) fn slice_from(&self, start: usize) -> String {
        self.chars[start..self.pos].iter().collect()
    }
}
