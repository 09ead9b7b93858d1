//! Queries and comparisons. Nothing here mutates.

use std::cmp::Ordering;

use super::TokenList;

pub(crate) fn token_eq(a: &str, b: &str, match_case: bool) -> bool {
    if match_case {
        a == b
    } else {
        a.chars()
            .flat_map(char::to_lowercase)
            .eq(b.chars().flat_map(char::to_lowercase))
    }
}

fn token_cmp(a: &str, b: &str, match_case: bool) -> Ordering {
    if match_case {
        a.cmp(b)
    } else {
        a.chars()
            .flat_map(char::to_lowercase)
            .cmp(b.chars().flat_map(char::to_lowercase))
    }
}

impl TokenList {
    pub fn contains(&self, token: &str, match_case: bool) -> bool {
        self.index_of(token, 0, match_case).is_some()
    }

    pub fn count(&self, token: &str, match_case: bool) -> usize {
        self.tokens
            .iter()
            .filter(|t| token_eq(t, token, match_case))
            .count()
    }

    /// Index of the first token equal to `token` at or after `from`.
    pub fn index_of(&self, token: &str, from: usize, match_case: bool) -> Option<usize> {
        self.tokens
            .iter()
            .enumerate()
            .skip(from)
            .find(|(_, t)| token_eq(t, token, match_case))
            .map(|(i, _)| i)
    }

    pub fn last_index_of(&self, token: &str, match_case: bool) -> Option<usize> {
        self.tokens
            .iter()
            .rposition(|t| token_eq(t, token, match_case))
    }

    /// Index of the first token equal to any of `candidates` at or after
    /// `from`.
    pub fn index_of_any(&self, candidates: &[&str], from: usize, match_case: bool) -> Option<usize> {
        self.tokens
            .iter()
            .enumerate()
            .skip(from)
            .find(|(_, t)| candidates.iter().any(|c| token_eq(t, c, match_case)))
            .map(|(i, _)| i)
    }

    /// Start index of the first occurrence of the token sequence `sub` at
    /// or after `from`. An empty `sub` never matches.
    pub fn index_of_list(&self, sub: &TokenList, from: usize, match_case: bool) -> Option<usize> {
        let m = sub.tokens.len();
        if m == 0 || m > self.tokens.len() {
            return None;
        }
        (from..=self.tokens.len() - m).find(|&start| self.matches_at(start, sub, match_case))
    }

    pub fn last_index_of_list(&self, sub: &TokenList, match_case: bool) -> Option<usize> {
        let m = sub.tokens.len();
        if m == 0 || m > self.tokens.len() {
            return None;
        }
        (0..=self.tokens.len() - m)
            .rev()
            .find(|&start| self.matches_at(start, sub, match_case))
    }

    pub fn contains_list(&self, sub: &TokenList, match_case: bool) -> bool {
        self.index_of_list(sub, 0, match_case).is_some()
    }

    fn matches_at(&self, start: usize, sub: &TokenList, match_case: bool) -> bool {
        self.tokens[start..]
            .iter()
            .zip(&sub.tokens)
            .all(|(a, b)| token_eq(a, b, match_case))
            && self.tokens.len() - start >= sub.tokens.len()
    }

    /// Token-wise equality, ignoring whitespace.
    pub fn tokens_eq(&self, other: &TokenList, match_case: bool) -> bool {
        self.tokens.len() == other.tokens.len()
            && self
                .tokens
                .iter()
                .zip(&other.tokens)
                .all(|(a, b)| token_eq(a, b, match_case))
    }

    /// Lexicographic token-wise comparison, ignoring whitespace.
    pub fn compare(&self, other: &TokenList, match_case: bool) -> Ordering {
        for (a, b) in self.tokens.iter().zip(&other.tokens) {
            match token_cmp(a, b, match_case) {
                Ordering::Equal => {}
                unequal => return unequal,
            }
        }
        self.tokens.len().cmp(&other.tokens.len())
    }

    /// Whether the rendered text starts with `prefix`.
    pub fn starts_with(&self, prefix: &str, match_case: bool) -> bool {
        let text = self.to_string();
        if match_case {
            text.starts_with(prefix)
        } else {
            text.to_lowercase().starts_with(&prefix.to_lowercase())
        }
    }

    /// Whether the rendered text ends with `suffix`.
    pub fn ends_with(&self, suffix: &str, match_case: bool) -> bool {
        let text = self.to_string();
        if match_case {
            text.ends_with(suffix)
        } else {
            text.to_lowercase().ends_with(&suffix.to_lowercase())
        }
    }

    pub fn starts_with_list(&self, prefix: &TokenList, match_case: bool) -> bool {
        !prefix.is_blank()
            && prefix.tokens.len() <= self.tokens.len()
            && self.matches_at(0, prefix, match_case)
    }

    pub fn ends_with_list(&self, suffix: &TokenList, match_case: bool) -> bool {
        let m = suffix.tokens.len();
        m > 0 && m <= self.tokens.len() && self.matches_at(self.tokens.len() - m, suffix, match_case)
    }

    /// Whether the last token is a line-continuation backslash. With
    /// `mind_trailing_ws` any whitespace after it disqualifies the line.
    pub fn ends_with_backslash(&self, mind_trailing_ws: bool) -> bool {
        self.last() == Some("\\") && (!mind_trailing_ws || self.trailing_padding() == 0)
    }
}
