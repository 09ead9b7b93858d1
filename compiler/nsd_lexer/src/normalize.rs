//! Keyword phrase to marker rewriting.

use nsd_lexer_core::{TokenClass, TokenList};
use tracing::{debug, instrument};

use crate::element::ElementKind;
use crate::keywords::{KeywordConfig, KeywordKey};
use crate::marker::Marker;
use crate::unify::{unify, Direction};

#[cfg(test)]
mod tests;

/// Text restored from a normalized line.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Restored {
    pub tokens: TokenList,
    /// `index_map[i]` is the restored index of normalized token `i`; for
    /// a marker that restored to nothing it is the index of whatever
    /// follows. The last entry is the restored token count.
    pub index_map: Vec<usize>,
}

/// Rewrites element lines into the fixed marker vocabulary and back.
#[derive(Clone, Debug, Default)]
pub struct Normalizer {
    keywords: KeywordConfig,
}

impl Normalizer {
    pub fn new(keywords: KeywordConfig) -> Self {
        Normalizer { keywords }
    }

    pub fn keywords(&self) -> &KeywordConfig {
        &self.keywords
    }

    pub fn keywords_mut(&mut self) -> &mut KeywordConfig {
        &mut self.keywords
    }

    fn match_case(&self) -> bool {
        !self.keywords.ignore_case()
    }

    /// Normalize line `line_index` of an element of `kind`.
    ///
    /// Type definition lines are never operator-unified since their `=`
    /// is not a comparison. Without `unify_operators` only `not` becomes
    /// `!`, which the grammar needs in front of an identifier.
    #[instrument(level = "trace", skip(self, tokens), fields(line = %tokens))]
    pub fn normalize(
        &self,
        tokens: &TokenList,
        kind: ElementKind,
        line_index: usize,
        unify_operators: bool,
    ) -> TokenList {
        let mut out = tokens.clone();
        let mut unify_operators = unify_operators;
        match kind {
            ElementKind::Instruction => {
                let io = self.substitute_prefix(&mut out, KeywordKey::Input, Marker::Input)
                    || self.substitute_prefix(&mut out, KeywordKey::Output, Marker::Output);
                if !io {
                    if is_type_definition(&out) {
                        unify_operators = false;
                    } else if is_routine_call(&out) {
                        prefix_marker(&mut out, Marker::Call);
                    }
                }
            }
            ElementKind::Alternative | ElementKind::While | ElementKind::Repeat => {
                if let Some((pre, post)) = kind.condition_keys() {
                    self.strip_suffix(&mut out, post);
                    if !self.substitute_prefix(&mut out, pre, Marker::Cond) {
                        prefix_marker(&mut out, Marker::Cond);
                    }
                }
            }
            ElementKind::For => {
                if self.substitute_prefix(&mut out, KeywordKey::PreFor, Marker::For) {
                    if let Some(to) = self.substitute_after(&mut out, KeywordKey::PostFor, Marker::To, 1) {
                        self.substitute_after(&mut out, KeywordKey::StepFor, Marker::Step, to + 1);
                    }
                }
            }
            ElementKind::ForIn => {
                if self.substitute_prefix(&mut out, KeywordKey::PreForIn, Marker::Foreach) {
                    self.substitute_after(&mut out, KeywordKey::PostForIn, Marker::In, 1);
                }
            }
            ElementKind::Call => prefix_marker(&mut out, Marker::Call),
            ElementKind::Catch => prefix_marker(&mut out, Marker::Catch),
            ElementKind::Jump => {
                if out.is_blank() {
                    prefix_marker(&mut out, Marker::Leave);
                } else {
                    let _ = self.substitute_prefix(&mut out, KeywordKey::PreReturn, Marker::Return)
                        || self.substitute_prefix(&mut out, KeywordKey::PreExit, Marker::Exit)
                        || self.substitute_prefix(&mut out, KeywordKey::PreLeave, Marker::Leave)
                        || self.substitute_prefix(&mut out, KeywordKey::PreThrow, Marker::Throw);
                }
            }
            ElementKind::Case { lines } => {
                if line_index == 0 {
                    self.strip_suffix(&mut out, KeywordKey::PostCase);
                    if !self.substitute_prefix(&mut out, KeywordKey::PreCase, Marker::Case) {
                        prefix_marker(&mut out, Marker::Case);
                    }
                } else if line_index + 1 == lines {
                    // The default label is free text.
                    out = TokenList::from_token(Marker::Default.token());
                } else {
                    prefix_marker(&mut out, Marker::Select);
                }
            }
        }
        if unify_operators {
            unify(&mut out, Direction::ToSymbols);
        } else {
            out.replace_all("not", "!", false);
        }
        debug!(%kind, normalized = %out, "line normalized");
        out
    }

    /// Replace the markers in `tokens` with the configured phrases.
    pub fn restore(&self, tokens: &TokenList, kind: ElementKind) -> Restored {
        let mut restored = tokens.clone();
        let mut index_map = Vec::with_capacity(tokens.token_count() + 1);
        let mut next = 0;
        let mut substitutions = Vec::new();
        for (i, token) in tokens.iter().enumerate() {
            index_map.push(next);
            match Marker::from_token(token) {
                Some(marker) => {
                    let phrase = self.restored_phrase(marker, kind);
                    next += phrase.token_count();
                    substitutions.push((i, phrase));
                }
                None => next += 1,
            }
        }
        index_map.push(next);
        // Back to front so earlier indices stay valid.
        for (i, phrase) in substitutions.into_iter().rev() {
            restored.splice(i, i + 1, &phrase);
        }
        let post = match kind {
            ElementKind::Case { .. } if tokens.first() == Some(Marker::Case.token()) => {
                Some(KeywordKey::PostCase)
            }
            _ => kind.condition_keys().map(|(_, post)| post),
        };
        if let Some(post) = post.and_then(|key| self.keywords.tokens(key)) {
            let mut suffix = post.clone();
            suffix.set_padding(0, Some(1), None);
            restored.add_all(restored.token_count(), &suffix);
        }
        Restored {
            tokens: restored,
            index_map,
        }
    }

    fn restored_phrase(&self, marker: Marker, kind: ElementKind) -> TokenList {
        if marker == Marker::Default {
            return TokenList::from_token("default");
        }
        marker
            .keyword(kind)
            .and_then(|key| self.keywords.tokens(key))
            .cloned()
            .unwrap_or_default()
    }

    /// Replace the phrase for `key` at the start of `tokens` with `marker`.
    fn substitute_prefix(&self, tokens: &mut TokenList, key: KeywordKey, marker: Marker) -> bool {
        let Some(phrase) = self.keywords.tokens(key) else {
            return false;
        };
        if !tokens.starts_with_list(phrase, self.match_case()) {
            return false;
        }
        tokens.replace_range(0, phrase.token_count(), marker.token())
    }

    /// Replace the first occurrence of the phrase for `key` at or after
    /// token `from`. Returns the marker's index.
    fn substitute_after(
        &self,
        tokens: &mut TokenList,
        key: KeywordKey,
        marker: Marker,
        from: usize,
    ) -> Option<usize> {
        let phrase = self.keywords.tokens(key)?;
        let at = tokens.index_of_list(phrase, from, self.match_case())?;
        tokens.replace_range(at, at + phrase.token_count(), marker.token());
        Some(at)
    }

    fn strip_suffix(&self, tokens: &mut TokenList, key: KeywordKey) {
        let Some(phrase) = self.keywords.tokens(key) else {
            return;
        };
        if tokens.ends_with_list(phrase, self.match_case()) {
            let n = tokens.token_count();
            tokens.remove_range(n - phrase.token_count(), n, false);
        }
    }
}

/// Insert `marker` in front, one space before the first token.
fn prefix_marker(tokens: &mut TokenList, marker: Marker) {
    let mut prefix = TokenList::from_token(marker.token());
    if !tokens.is_blank() {
        prefix.set_padding(0, None, Some(1));
    }
    tokens.add_all(0, &prefix);
}

fn is_type_definition(tokens: &TokenList) -> bool {
    tokens
        .first()
        .is_some_and(|first| first.eq_ignore_ascii_case("type"))
        && tokens.token_count() > 1
}

/// `name(...)` or `a.b.name(...)` spanning the whole line.
fn is_routine_call(tokens: &TokenList) -> bool {
    let parts = tokens.tokens();
    let mut i = 0;
    loop {
        match parts.get(i) {
            Some(name) if TokenClass::of(name) == TokenClass::Identifier => i += 1,
            _ => return false,
        }
        match parts.get(i).map(String::as_str) {
            Some(".") => i += 1,
            Some("(") => break,
            _ => return false,
        }
    }
    let mut depth = 0usize;
    for (offset, token) in parts[i..].iter().enumerate() {
        match token.as_str() {
            "(" => depth += 1,
            ")" => {
                depth -= 1;
                if depth == 0 {
                    return i + offset + 1 == parts.len();
                }
            }
            _ => {}
        }
    }
    false
}
