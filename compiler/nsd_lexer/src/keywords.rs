//! User-configurable keyword phrases.
//!
//! Each [`KeywordKey`] maps to a phrase of zero or more tokens. Phrases
//! are tokenized when set, so matching against a line is a token-list
//! comparison.
//!
//! Configurations persist as property text, one `Parser<Key>=<phrase>`
//! line per key:
//!
//! ```text
//! ParserPreFor=for
//! ParserPostFor=to
//! ParserIgnoreCase=true
//! ```

use std::fmt::Write as _;

use nsd_lexer_core::{tokenize, TokenList};
use rustc_hash::FxHashMap;
use tracing::{debug, trace};

#[cfg(test)]
mod tests;

const PROPERTY_PREFIX: &str = "Parser";
const IGNORE_CASE_PROPERTY: &str = "ParserIgnoreCase";

/// Names of the configurable phrases.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum KeywordKey {
    PreAlt,
    PostAlt,
    PreCase,
    PostCase,
    PreFor,
    PostFor,
    StepFor,
    PreForIn,
    PostForIn,
    PreWhile,
    PostWhile,
    PreRepeat,
    PostRepeat,
    PreLeave,
    PreReturn,
    PreExit,
    PreThrow,
    Input,
    Output,
}

impl KeywordKey {
    pub const ALL: [KeywordKey; 19] = [
        KeywordKey::PreAlt,
        KeywordKey::PostAlt,
        KeywordKey::PreCase,
        KeywordKey::PostCase,
        KeywordKey::PreFor,
        KeywordKey::PostFor,
        KeywordKey::StepFor,
        KeywordKey::PreForIn,
        KeywordKey::PostForIn,
        KeywordKey::PreWhile,
        KeywordKey::PostWhile,
        KeywordKey::PreRepeat,
        KeywordKey::PostRepeat,
        KeywordKey::PreLeave,
        KeywordKey::PreReturn,
        KeywordKey::PreExit,
        KeywordKey::PreThrow,
        KeywordKey::Input,
        KeywordKey::Output,
    ];

    pub const fn name(self) -> &'static str {
        match self {
            KeywordKey::PreAlt => "preAlt",
            KeywordKey::PostAlt => "postAlt",
            KeywordKey::PreCase => "preCase",
            KeywordKey::PostCase => "postCase",
            KeywordKey::PreFor => "preFor",
            KeywordKey::PostFor => "postFor",
            KeywordKey::StepFor => "stepFor",
            KeywordKey::PreForIn => "preForIn",
            KeywordKey::PostForIn => "postForIn",
            KeywordKey::PreWhile => "preWhile",
            KeywordKey::PostWhile => "postWhile",
            KeywordKey::PreRepeat => "preRepeat",
            KeywordKey::PostRepeat => "postRepeat",
            KeywordKey::PreLeave => "preLeave",
            KeywordKey::PreReturn => "preReturn",
            KeywordKey::PreExit => "preExit",
            KeywordKey::PreThrow => "preThrow",
            KeywordKey::Input => "input",
            KeywordKey::Output => "output",
        }
    }

    pub fn from_name(name: &str) -> Option<KeywordKey> {
        KeywordKey::ALL.into_iter().find(|key| key.name() == name)
    }

    /// Property name, e.g. `ParserPreFor`.
    pub fn property_name(self) -> String {
        let name = self.name();
        let mut chars = name.chars();
        let mut property = String::with_capacity(PROPERTY_PREFIX.len() + name.len());
        property.push_str(PROPERTY_PREFIX);
        if let Some(first) = chars.next() {
            property.push(first.to_ascii_uppercase());
        }
        property.extend(chars);
        property
    }

    fn from_property(property: &str) -> Option<KeywordKey> {
        KeywordKey::ALL
            .into_iter()
            .find(|key| key.property_name() == property)
    }

    pub const fn default_phrase(self) -> &'static str {
        match self {
            KeywordKey::PreFor => "for",
            KeywordKey::PostFor => "to",
            KeywordKey::StepFor => "by",
            KeywordKey::PreForIn => "foreach",
            KeywordKey::PostForIn => "in",
            KeywordKey::PreWhile => "while",
            KeywordKey::PreRepeat => "until",
            KeywordKey::PreLeave => "leave",
            KeywordKey::PreReturn => "return",
            KeywordKey::PreExit => "exit",
            KeywordKey::PreThrow => "throw",
            KeywordKey::Input => "INPUT",
            KeywordKey::Output => "OUTPUT",
            KeywordKey::PreAlt
            | KeywordKey::PostAlt
            | KeywordKey::PreCase
            | KeywordKey::PostCase
            | KeywordKey::PostWhile
            | KeywordKey::PostRepeat => "",
        }
    }
}

/// The keyword phrases in use, plus case sensitivity of matching.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct KeywordConfig {
    phrases: FxHashMap<KeywordKey, String>,
    split: FxHashMap<KeywordKey, TokenList>,
    ignore_case: bool,
}

impl Default for KeywordConfig {
    fn default() -> Self {
        let mut config = KeywordConfig {
            phrases: FxHashMap::default(),
            split: FxHashMap::default(),
            ignore_case: true,
        };
        for key in KeywordKey::ALL {
            config.set(key, key.default_phrase());
        }
        config
    }
}

impl KeywordConfig {
    /// Defaults overridden by the given property text.
    pub fn from_properties(text: &str) -> Self {
        let mut config = KeywordConfig::default();
        config.load_properties(text);
        config
    }

    /// The phrase as configured. May be empty.
    pub fn phrase(&self, key: KeywordKey) -> &str {
        self.phrases.get(&key).map_or("", String::as_str)
    }

    /// The tokenized phrase used for matching.
    ///
    /// An empty `preForIn` means collection loops share the counting
    /// loop's keyword.
    pub fn tokens(&self, key: KeywordKey) -> Option<&TokenList> {
        let tokens = self.split.get(&key).filter(|t| !t.is_blank());
        match (key, tokens) {
            (KeywordKey::PreForIn, None) => self.tokens(KeywordKey::PreFor),
            (_, tokens) => tokens,
        }
    }

    pub fn set(&mut self, key: KeywordKey, phrase: &str) {
        let mut tokens = tokenize(phrase);
        tokens.trim();
        self.split.insert(key, tokens);
        self.phrases.insert(key, phrase.to_owned());
    }

    pub fn ignore_case(&self) -> bool {
        self.ignore_case
    }

    pub fn set_ignore_case(&mut self, ignore_case: bool) {
        self.ignore_case = ignore_case;
    }

    /// Apply `Parser<Key>=<phrase>` lines. Comments (`#`, `!`), blank
    /// lines and unknown keys are skipped. Returns the number of settings
    /// applied.
    pub fn load_properties(&mut self, text: &str) -> usize {
        let mut applied = 0;
        for line in text.lines() {
            let line = line.trim_start();
            if line.is_empty() || line.starts_with(['#', '!']) {
                continue;
            }
            let Some((property, value)) = line.split_once('=') else {
                continue;
            };
            let property = property.trim_end();
            let value = value.trim_start();
            if property == IGNORE_CASE_PROPERTY {
                self.ignore_case = value.trim().eq_ignore_ascii_case("true");
                applied += 1;
            } else if let Some(key) = KeywordKey::from_property(property) {
                self.set(key, value);
                applied += 1;
            } else {
                trace!(property, "ignoring unknown keyword property");
            }
        }
        debug!(applied, "keyword properties loaded");
        applied
    }

    /// Render all settings as property text that
    /// [`load_properties`](Self::load_properties) reads back.
    pub fn to_properties(&self) -> String {
        let mut text = String::new();
        for key in KeywordKey::ALL {
            let _ = writeln!(text, "{}={}", key.property_name(), self.phrase(key));
        }
        let _ = writeln!(text, "{IGNORE_CASE_PROPERTY}={}", self.ignore_case);
        text
    }
}
