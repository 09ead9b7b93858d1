//! Line breaking and joining.

use super::TokenList;
use crate::scanner::tokenize;

impl TokenList {
    /// Split into parts no wider than `max` characters where possible.
    ///
    /// Every part except the last ends with a `\` continuation token,
    /// which is counted against `max`. Tokens are never split; a part
    /// always takes at least one token, so a single token wider than
    /// `max` yields an oversized part. A list without tokens becomes
    /// `max` spaces.
    pub fn break_at_length(&self, max: usize) -> Vec<TokenList> {
        if self.len <= max {
            return vec![self.clone()];
        }
        if self.tokens.is_empty() {
            return vec![TokenList::blank(max)];
        }
        let n = self.tokens.len();
        let mut parts = Vec::new();
        let mut part = TokenList::new();
        for (i, token) in self.tokens.iter().enumerate() {
            let pad = self.paddings[i];
            let width = pad + token.chars().count();
            let reserve = usize::from(i + 1 < n);
            if !part.is_blank() && part.len + width + reserve > max {
                part.append_raw(0, "\\");
                parts.push(std::mem::take(&mut part));
            }
            part.append_raw(pad, token);
            if self.is_newline_gap(i) {
                part.mark_newline(part.tokens.len() - 1);
            }
        }
        parts.push(part);
        parts
    }

    /// Join `lists` with `separator` between neighbours.
    ///
    /// A whitespace-only separator becomes padding (a line feed in it
    /// makes the gap a line break); anything else is tokenized and
    /// inserted between the lists.
    pub fn concatenate<'a, I>(lists: I, separator: Option<&str>) -> TokenList
    where
        I: IntoIterator<Item = &'a TokenList>,
    {
        let mut total = TokenList::new();
        for (i, list) in lists.into_iter().enumerate() {
            if i > 0 {
                if let Some(separator) = separator {
                    total.add_separator(separator);
                }
            }
            let end = total.tokens.len();
            total.add_all(end, list);
        }
        total
    }

    fn add_separator(&mut self, separator: &str) {
        if !separator.trim().is_empty() {
            self.add_all(self.tokens.len(), &tokenize(separator));
            return;
        }
        let end = self.tokens.len();
        let width = separator.chars().count();
        if width == 0 || self.is_blank() {
            return;
        }
        self.paddings[end] += width;
        if separator.contains('\n') {
            self.mark_newline(end);
        }
        self.recompute_len();
    }

    /// Append a token with a given padding and no gap checks.
    fn append_raw(&mut self, pad: usize, token: &str) {
        let end = self.tokens.len();
        self.paddings[end] += pad;
        self.len += pad + token.chars().count();
        self.tokens.push(token.to_owned());
        self.paddings.push(0);
    }
}
