//! Single-pass tokenizer producing a [`TokenList`].
//!
//! The scanner dispatches on the first character of each token and hands
//! off to a focused method that consumes exactly one token. Whitespace runs
//! between tokens are not tokens; their widths become the paddings of the
//! resulting list, and a run containing a line feed marks its padding as a
//! newline gap.
//!
//! Nothing here fails: unterminated literals and unknown characters simply
//! become tokens of their own.

use smallvec::SmallVec;

use crate::cursor::Cursor;
use crate::symbols::{is_ident_continue, is_ident_start, longest_symbol, ESCAPE_CHARS};
use crate::token_list::TokenList;


/// Switches that change how the scanner treats certain characters.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct LexOptions {
    /// Keep quoted literals as single tokens. When off, quote characters
    /// are plain operator characters and the quoted text is tokenized.
    pub preserve_strings: bool,
}

impl Default for LexOptions {
    fn default() -> Self {
        LexOptions {
            preserve_strings: true,
        }
    }
}

/// Tokenize `text` with string literals preserved.
pub fn tokenize(text: &str) -> TokenList {
    tokenize_with(text, LexOptions::default())
}

/// Tokenize `text` with explicit options.
pub fn tokenize_with(text: &str, options: LexOptions) -> TokenList {
    Scanner::new(text, options).run()
}

struct Scanner {
    cursor: Cursor,
    options: LexOptions,
    tokens: Vec<String>,
    paddings: Vec<usize>,
    newlines: SmallVec<[usize; 2]>,
    pending: usize,
    pending_newline: bool,
}

impl Scanner {
    fn new(text: &str, options: LexOptions) -> Self {
        Scanner {
            cursor: Cursor::new(text),
            options,
            tokens: Vec::new(),
            paddings: Vec::new(),
            newlines: SmallVec::new(),
            pending: 0,
            pending_newline: false,
        }
    }

    fn run(mut self) -> TokenList {
        while let Some(c) = self.cursor.current() {
            if c.is_whitespace() {
                self.whitespace();
            } else {
                let token = self.next_token(c);
                self.push(token);
            }
        }
        self.close_gap();
        TokenList::from_parts(self.tokens, self.paddings, self.newlines)
    }

    fn next_token(&mut self, c: char) -> String {
        let start = self.cursor.pos();
        match c {
            c if is_ident_start(c) => self.identifier(start),
            '0'..='9' => self.number(start),
            '.' => self.dot(start),
            '"' | '\'' if self.options.preserve_strings => self.string(start, c),
            '≠' => self.replaced("<>"),
            '≤' => self.replaced("<="),
            '≥' => self.replaced(">="),
            '§' => self.internal_key(start),
            '\\' => self.backslash(start),
            _ => self.symbol(start),
        }
    }

    fn whitespace(&mut self) {
        while let Some(c) = self.cursor.current() {
            if !c.is_whitespace() {
                break;
            }
            if c == '\n' {
                self.pending_newline = true;
            }
            self.pending += 1;
            self.cursor.advance();
        }
    }

    /// Record the pending whitespace as the gap before the next token.
    fn close_gap(&mut self) {
        if self.pending_newline {
            self.newlines.push(self.tokens.len());
        }
        self.paddings.push(self.pending);
        self.pending = 0;
        self.pending_newline = false;
    }

    fn push(&mut self, token: String) {
        self.close_gap();
        self.tokens.push(token);
    }

    fn identifier(&mut self, start: usize) -> String {
        self.cursor.advance();
        self.cursor.eat_while(is_ident_continue);
        self.cursor.slice_from(start)
    }

    fn number(&mut self, start: usize) -> String {
        let first = self.cursor.current();
        self.cursor.advance();

        if first == Some('0') {
            match (self.cursor.current(), self.cursor.peek(1)) {
                (Some('b' | 'B'), Some('0' | '1')) => {
                    self.cursor.advance();
                    self.cursor.eat_while(|c| matches!(c, '0' | '1'));
                    return self.long_suffix(start);
                }
                (Some('x' | 'X'), Some(c)) if c.is_ascii_hexdigit() => {
                    self.cursor.advance();
                    self.cursor.eat_while(|c| c.is_ascii_hexdigit());
                    return self.long_suffix(start);
                }
                (Some('0'..='7'), _) => {
                    self.cursor.eat_while(|c| matches!(c, '0'..='7'));
                    return self.long_suffix(start);
                }
                // `08` is not octal: the zero stands alone.
                (Some('8' | '9'), _) => return self.cursor.slice_from(start),
                _ => {}
            }
        }

        self.cursor.eat_while(|c| c.is_ascii_digit());

        // A second dot means a range such as `1..5`.
        if self.cursor.current() == Some('.') && self.cursor.peek(1) != Some('.') {
            self.cursor.advance();
            return self.fraction(start);
        }
        if self.exponent_ahead(0) {
            return self.exponent(start);
        }
        if matches!(self.cursor.current(), Some('f' | 'F' | 'l' | 'L')) {
            self.cursor.advance();
        }
        self.cursor.slice_from(start)
    }

    fn long_suffix(&mut self, start: usize) -> String {
        if matches!(self.cursor.current(), Some('l' | 'L')) {
            self.cursor.advance();
        }
        self.cursor.slice_from(start)
    }

    /// Digits after the decimal point, then an optional exponent or suffix.
    fn fraction(&mut self, start: usize) -> String {
        self.cursor.eat_while(|c| c.is_ascii_digit());
        if self.exponent_ahead(0) {
            return self.exponent(start);
        }
        self.float_suffix(start)
    }

    fn exponent(&mut self, start: usize) -> String {
        self.cursor.advance();
        if matches!(self.cursor.current(), Some('+' | '-')) {
            self.cursor.advance();
        }
        self.cursor.eat_while(|c| c.is_ascii_digit());
        self.float_suffix(start)
    }

    fn float_suffix(&mut self, start: usize) -> String {
        if matches!(self.cursor.current(), Some('f' | 'F')) {
            self.cursor.advance();
        }
        self.cursor.slice_from(start)
    }

    /// Whether an exponent (`e5`, `E-3`) starts `offset` characters ahead.
    fn exponent_ahead(&self, offset: usize) -> bool {
        if !matches!(self.cursor.peek(offset), Some('e' | 'E')) {
            return false;
        }
        match self.cursor.peek(offset + 1) {
            Some(c) if c.is_ascii_digit() => true,
            Some('+' | '-') => self
                .cursor
                .peek(offset + 2)
                .is_some_and(|c| c.is_ascii_digit()),
            _ => false,
        }
    }

    fn dot(&mut self, start: usize) -> String {
        let digit_follows = self.cursor.peek(1).is_some_and(|c| c.is_ascii_digit());
        if digit_follows || self.exponent_ahead(1) {
            self.cursor.advance();
            return self.fraction(start);
        }
        self.symbol(start)
    }

    /// A quoted literal up to the matching unescaped quote, or to the end
    /// of the text when unterminated.
    fn string(&mut self, start: usize, quote: char) -> String {
        self.cursor.advance();
        let mut escaped = false;
        while let Some(c) = self.cursor.current() {
            self.cursor.advance();
            if c == '\\' {
                escaped = !escaped;
            } else if c == quote && !escaped {
                break;
            } else {
                escaped = false;
            }
        }
        self.cursor.slice_from(start)
    }

    fn replaced(&mut self, with: &str) -> String {
        self.cursor.advance();
        with.to_owned()
    }

    /// `§NAME§` markers. A `§` not followed by uppercase letters and a
    /// closing `§` is a token on its own.
    fn internal_key(&mut self, start: usize) -> String {
        let mut n = 1;
        while self.cursor.peek(n).is_some_and(char::is_uppercase) {
            n += 1;
        }
        if n > 1 && self.cursor.peek(n) == Some('§') {
            self.cursor.advance_by(n + 1);
        } else {
            self.cursor.advance();
        }
        self.cursor.slice_from(start)
    }

    fn backslash(&mut self, start: usize) -> String {
        if self.cursor.peek(1).is_some_and(|c| ESCAPE_CHARS.contains(&c)) {
            self.cursor.advance_by(2);
            return self.cursor.slice_from(start);
        }
        self.symbol(start)
    }

    fn symbol(&mut self, start: usize) -> String {
        let n = longest_symbol(self.cursor.rest());
        self.cursor.advance_by(n);
        let text = self.cursor.slice_from(start);
        // `<--` is a common spelling of the assignment arrow.
        if text == "<-" && self.cursor.current() == Some('-') {
            self.cursor.advance();
        }
        text
    }
}
