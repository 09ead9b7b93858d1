//! What kind of diagram element a line belongs to.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::keywords::KeywordKey;

/// The element kind, as reported by the element that owns the line.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ElementKind {
    /// Plain instruction: assignments, declarations, input and output.
    Instruction,
    /// Condition of an alternative.
    Alternative,
    While,
    Repeat,
    /// Counting loop header.
    For,
    /// Collection loop header.
    ForIn,
    Call,
    Jump,
    Catch,
    /// Case element with `lines` lines: the discriminator, the selector
    /// lines and the default label last.
    Case { lines: usize },
}

impl ElementKind {
    /// Pre- and post-phrase keys of conditional elements.
    pub fn condition_keys(self) -> Option<(KeywordKey, KeywordKey)> {
        match self {
            ElementKind::Alternative => Some((KeywordKey::PreAlt, KeywordKey::PostAlt)),
            ElementKind::While => Some((KeywordKey::PreWhile, KeywordKey::PostWhile)),
            ElementKind::Repeat => Some((KeywordKey::PreRepeat, KeywordKey::PostRepeat)),
            _ => None,
        }
    }

    pub fn is_conditional(self) -> bool {
        self.condition_keys().is_some()
    }
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ElementKind::Instruction => f.write_str("instruction"),
            ElementKind::Alternative => f.write_str("alternative"),
            ElementKind::While => f.write_str("while"),
            ElementKind::Repeat => f.write_str("repeat"),
            ElementKind::For => f.write_str("for"),
            ElementKind::ForIn => f.write_str("foreach"),
            ElementKind::Call => f.write_str("call"),
            ElementKind::Jump => f.write_str("jump"),
            ElementKind::Catch => f.write_str("catch"),
            ElementKind::Case { lines } => write!(f, "case:{lines}"),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("unknown element kind `{0}`")]
pub struct UnknownElementKind(pub String);

impl FromStr for ElementKind {
    type Err = UnknownElementKind;

    /// Parses the [`Display`](fmt::Display) form. `if` and `forin` are
    /// accepted as aliases, and a bare `case` has two lines.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let kind = match s.to_ascii_lowercase().as_str() {
            "instruction" => ElementKind::Instruction,
            "alternative" | "if" => ElementKind::Alternative,
            "while" => ElementKind::While,
            "repeat" => ElementKind::Repeat,
            "for" => ElementKind::For,
            "foreach" | "forin" => ElementKind::ForIn,
            "call" => ElementKind::Call,
            "jump" => ElementKind::Jump,
            "catch" => ElementKind::Catch,
            "case" => ElementKind::Case { lines: 2 },
            other => {
                let lines = other
                    .strip_prefix("case:")
                    .and_then(|n| n.parse().ok())
                    .ok_or_else(|| UnknownElementKind(s.to_owned()))?;
                ElementKind::Case { lines }
            }
        };
        Ok(kind)
    }
}
