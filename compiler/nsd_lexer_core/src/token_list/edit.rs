//! Editing operations. Each one keeps the padding invariants and the
//! cached width intact.

use std::cmp::Ordering;

use smallvec::SmallVec;

use super::{needs_gap, TokenList};
use crate::scanner::tokenize;

impl TokenList {
    /// Replace the token at `index` with `token` verbatim. An empty
    /// `token` removes the element. Returns the previous token.
    pub fn set(&mut self, index: usize, token: &str) -> Option<String> {
        if index >= self.tokens.len() {
            return None;
        }
        if token.is_empty() {
            return self.remove(index);
        }
        let old = std::mem::replace(&mut self.tokens[index], token.to_owned());
        if index > 0 {
            self.ensure_gap(index - 1);
        }
        self.ensure_gap(index);
        self.recompute_len();
        Some(old)
    }

    /// Set the paddings before (`left`) and after (`right`) the token at
    /// `index`. `None` leaves a side unchanged. A zero padding is widened
    /// again where the neighbours would fuse. Returns the change in width.
    #[allow(
        clippy::cast_possible_wrap,
        reason = "line widths are far below isize::MAX"
    )]
    pub fn set_padding(&mut self, index: usize, left: Option<usize>, right: Option<usize>) -> isize {
        if index >= self.tokens.len() {
            return 0;
        }
        let before = self.len as isize;
        if let Some(width) = left {
            self.set_gap(index, width);
        }
        if let Some(width) = right {
            self.set_gap(index + 1, width);
        }
        self.recompute_len();
        if index > 0 {
            self.ensure_gap(index - 1);
        }
        self.ensure_gap(index);
        self.len as isize - before
    }

    /// Append `token` verbatim, separated by one space only if needed.
    pub fn push(&mut self, token: impl Into<String>) {
        let token = token.into();
        if token.is_empty() {
            return;
        }
        let n = self.tokens.len();
        let gap = usize::from(n > 0 && self.paddings[n] == 0 && needs_gap(&self.tokens[n - 1], &token));
        self.paddings[n] += gap;
        self.len += gap + token.chars().count();
        self.tokens.push(token);
        self.paddings.push(0);
    }

    /// Remove and return the last token.
    pub fn pop(&mut self) -> Option<String> {
        let last = self.tokens.len().checked_sub(1)?;
        self.remove(last)
    }

    /// Tokenize `text` and append the result. Returns false if `text`
    /// was empty.
    pub fn add(&mut self, text: &str) -> bool {
        let other = tokenize(text);
        self.add_all(self.tokens.len(), &other)
    }

    /// Tokenize `text` and insert the result before token `index`.
    pub fn insert(&mut self, index: usize, text: &str) -> bool {
        let other = tokenize(text);
        self.add_all(index, &other)
    }

    /// Insert `other` before token `index`.
    ///
    /// When inserting between two tokens the existing gap is split: half
    /// goes before the inserted tokens, the rest after them. At either end
    /// of the list the existing outer padding stays outermost.
    pub fn add_all(&mut self, index: usize, other: &TokenList) -> bool {
        let n = self.tokens.len();
        if index > n || other.is_empty() {
            return false;
        }
        let m = other.tokens.len();
        let pad = self.paddings[index];
        if m == 0 {
            self.paddings[index] += other.paddings[0];
            if other.is_newline_gap(0) {
                self.mark_newline(index);
            }
            self.recompute_len();
            return true;
        }

        let at_edge = index == n || index == 0;
        let (left, right) = if at_edge {
            (pad + other.paddings[0], other.paddings[m])
        } else {
            (pad / 2 + other.paddings[0], pad - pad / 2 + other.paddings[m])
        };

        let mut newlines: SmallVec<[usize; 2]> = self
            .newlines
            .iter()
            .map(|&gap| match gap.cmp(&index) {
                Ordering::Less => gap,
                Ordering::Equal if left > 0 => index,
                Ordering::Equal => index + m,
                Ordering::Greater => gap + m,
            })
            .chain(other.newlines.iter().map(|&gap| index + gap))
            .collect();
        newlines.sort_unstable();
        newlines.dedup();

        let mut paddings = Vec::with_capacity(self.paddings.len() + m);
        paddings.extend_from_slice(&self.paddings[..index]);
        paddings.push(left);
        paddings.extend_from_slice(&other.paddings[1..m]);
        paddings.push(right);
        paddings.extend_from_slice(&self.paddings[index + 1..]);

        self.tokens.splice(index..index, other.tokens.iter().cloned());
        self.paddings = paddings;
        self.newlines = newlines;
        self.recompute_len();
        if index > 0 {
            self.ensure_gap(index - 1);
        }
        self.ensure_gap(index + m - 1);
        true
    }

    /// Remove the token at `index`, merging the gaps around it.
    ///
    /// Removing the first token drops the gap after it and removing the
    /// last drops the gap before it, so outer indentation survives. In
    /// the middle the two gaps merge into one of about half their sum.
    pub fn remove(&mut self, index: usize) -> Option<String> {
        let n = self.tokens.len();
        if index >= n {
            return None;
        }
        let (dropped, merge) = if index == 0 {
            (1, false)
        } else if index == n - 1 {
            (index, false)
        } else {
            let gap = self.paddings[index] + self.paddings[index + 1];
            self.paddings[index + 1] = gap / 2 + gap % 2;
            (index, true)
        };
        self.paddings.remove(dropped);

        let mut newlines: SmallVec<[usize; 2]> = self
            .newlines
            .iter()
            .filter_map(|&gap| match gap.cmp(&dropped) {
                Ordering::Less => Some(gap),
                Ordering::Equal => merge.then_some(dropped),
                Ordering::Greater => Some(gap - 1),
            })
            .collect();
        newlines.dedup();
        self.newlines = newlines;

        let removed = self.tokens.remove(index);
        if merge {
            self.ensure_gap(index - 1);
        }
        self.recompute_len();
        Some(removed)
    }

    /// Remove tokens `from..to` and return them as a list of their own.
    ///
    /// With `strip_paddings` the gaps around the range move into the
    /// returned list instead of being merged back into this one.
    pub fn remove_range(&mut self, from: usize, to: usize, strip_paddings: bool) -> TokenList {
        let to = to.min(self.tokens.len());
        if from >= to {
            return TokenList::new();
        }
        let mut removed = self.sub_sequence(from, to);
        if strip_paddings {
            let last = removed.paddings.len() - 1;
            removed.paddings[0] = self.paddings[from];
            removed.paddings[last] = self.paddings[to];
            removed.recompute_len();
            self.set_gap(from, 0);
            self.set_gap(to, 0);
        }
        for i in (from..to).rev() {
            self.remove(i);
        }
        if from > 0 {
            self.ensure_gap(from - 1);
        }
        self.recompute_len();
        removed
    }

    /// Replace tokens `from..to` with `replacement`. The gaps outside the
    /// range are kept and the outer paddings of `replacement` are added
    /// to them.
    pub fn splice(&mut self, from: usize, to: usize, replacement: &TokenList) -> bool {
        let n = self.tokens.len();
        let to = to.min(n);
        if from > to {
            return false;
        }
        let m = replacement.tokens.len();
        if m == 0 {
            self.remove_range(from, to, false);
            return true;
        }
        let removed = to - from;

        let mut paddings = Vec::with_capacity(n - removed + m + 1);
        paddings.extend_from_slice(&self.paddings[..from]);
        paddings.push(self.paddings[from] + replacement.paddings[0]);
        paddings.extend_from_slice(&replacement.paddings[1..m]);
        paddings.push(replacement.paddings[m] + self.paddings[to]);
        paddings.extend_from_slice(&self.paddings[to + 1..]);

        let mut newlines: SmallVec<[usize; 2]> = self
            .newlines
            .iter()
            .filter_map(|&gap| {
                if gap <= from {
                    Some(gap)
                } else if gap >= to {
                    Some(gap - removed + m)
                } else {
                    None
                }
            })
            .chain(replacement.newlines.iter().map(|&gap| from + gap))
            .collect();
        newlines.sort_unstable();
        newlines.dedup();

        self.tokens
            .splice(from..to, replacement.tokens.iter().cloned());
        self.paddings = paddings;
        self.newlines = newlines;
        self.recompute_len();
        if from > 0 {
            self.ensure_gap(from - 1);
        }
        self.ensure_gap(from + m - 1);
        true
    }

    /// Replace tokens `from..to` with the single token `token`, keeping
    /// the surrounding whitespace.
    pub fn replace_range(&mut self, from: usize, to: usize, token: &str) -> bool {
        self.splice(from, to, &TokenList::from_token(token))
    }

    /// Replace every token equal to `find` with the tokenized `subst`.
    /// Returns the number of replacements.
    pub fn replace_all(&mut self, find: &str, subst: &str, match_case: bool) -> usize {
        let replacement = tokenize(subst);
        let mut count = 0;
        let mut start = 0;
        while let Some(index) = self.index_of(find, start, match_case) {
            self.splice(index, index + 1, &replacement);
            start = index + replacement.token_count();
            count += 1;
        }
        count
    }

    /// Like [`replace_all`](Self::replace_all), restricted to tokens
    /// `from..to`. Works backwards so earlier indices stay valid.
    pub fn replace_all_between(
        &mut self,
        find: &str,
        subst: &str,
        match_case: bool,
        from: usize,
        to: usize,
    ) -> usize {
        let replacement = tokenize(subst);
        let mut count = 0;
        let mut index = to.min(self.tokens.len());
        while index > from {
            index -= 1;
            if super::search::token_eq(&self.tokens[index], find, match_case) {
                self.splice(index, index + 1, &replacement);
                count += 1;
            }
        }
        count
    }

    /// Replace every occurrence of the token sequence `find` with `subst`.
    pub fn replace_all_lists(&mut self, find: &TokenList, subst: &TokenList, match_case: bool) -> usize {
        if find.is_blank() {
            return 0;
        }
        let mut count = 0;
        let mut start = 0;
        while let Some(index) = self.index_of_list(find, start, match_case) {
            self.splice(index, index + find.token_count(), subst);
            start = index + subst.token_count();
            count += 1;
        }
        count
    }

    /// Remove the first token equal to `token`.
    pub fn remove_token(&mut self, token: &str, match_case: bool) -> bool {
        match self.index_of(token, 0, match_case) {
            Some(index) => self.remove(index).is_some(),
            None => false,
        }
    }

    /// Remove the last token equal to `token`.
    pub fn remove_last_token(&mut self, token: &str, match_case: bool) -> bool {
        match self.last_index_of(token, match_case) {
            Some(index) => self.remove(index).is_some(),
            None => false,
        }
    }

    /// Remove every token equal to `token`. Returns how many went.
    pub fn remove_all_tokens(&mut self, token: &str, match_case: bool) -> usize {
        let mut count = 0;
        let mut index = self.tokens.len();
        while index > 0 {
            index -= 1;
            if super::search::token_eq(&self.tokens[index], token, match_case) {
                self.remove(index);
                count += 1;
            }
        }
        count
    }

    /// Reduce all whitespace to the minimum that keeps the tokens apart.
    /// Outer paddings become zero, inner ones zero or one. Line breaks
    /// survive only where a gap remains. Returns the removed width.
    pub fn shrink(&mut self) -> usize {
        let before = self.len;
        let n = self.tokens.len();
        for gap in 0..=n {
            let width = if gap == 0 || gap == n {
                0
            } else {
                let needed = usize::from(needs_gap(&self.tokens[gap - 1], &self.tokens[gap]));
                self.paddings[gap].min(needed)
            };
            self.set_gap(gap, width);
        }
        self.recompute_len();
        before - self.len
    }

    /// [`shrink`](Self::shrink) and flatten all line breaks.
    pub fn remove_paddings(&mut self) -> usize {
        let removed = self.shrink();
        self.newlines.clear();
        removed
    }

    /// Shrink only the gaps strictly between tokens `from` and `to`
    /// (inclusive token indices).
    pub fn remove_paddings_between(&mut self, from: usize, to: usize) -> usize {
        let before = self.len;
        let last = to.min(self.tokens.len().saturating_sub(1));
        for gap in (from + 1)..=last {
            let needed = usize::from(needs_gap(&self.tokens[gap - 1], &self.tokens[gap]));
            let width = self.paddings[gap].min(needed);
            self.set_gap(gap, width);
            if let Ok(pos) = self.newlines.binary_search(&gap) {
                self.newlines.remove(pos);
            }
        }
        self.recompute_len();
        before - self.len
    }

    /// Drop leading and trailing whitespace. Returns the removed width.
    pub fn trim(&mut self) -> usize {
        self.trim_start() + self.trim_end()
    }

    pub fn trim_start(&mut self) -> usize {
        let removed = self.paddings[0];
        self.set_gap(0, 0);
        self.len -= removed;
        removed
    }

    pub fn trim_end(&mut self) -> usize {
        let last = self.tokens.len();
        let removed = self.paddings[last];
        self.set_gap(last, 0);
        self.len -= removed;
        removed
    }

    /// Tokens `from..to` as a new list without outer whitespace. Inner
    /// gaps and line breaks are preserved.
    pub fn sub_sequence(&self, from: usize, to: usize) -> TokenList {
        let to = to.min(self.tokens.len());
        if from >= to {
            return TokenList::new();
        }
        let tokens = self.tokens[from..to].to_vec();
        let mut paddings = Vec::with_capacity(to - from + 1);
        paddings.push(0);
        paddings.extend_from_slice(&self.paddings[from + 1..to]);
        paddings.push(0);
        let newlines = self
            .newlines
            .iter()
            .filter(|&&gap| gap > from && gap < to)
            .map(|&gap| gap - from)
            .collect();
        TokenList::from_parts(tokens, paddings, newlines)
    }

    /// Remove all tokens and whitespace.
    pub fn clear(&mut self) {
        self.tokens.clear();
        self.paddings.clear();
        self.paddings.push(0);
        self.newlines.clear();
        self.len = 0;
    }
}
