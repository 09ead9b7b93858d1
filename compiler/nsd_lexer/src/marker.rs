//! Internal marker tokens.

use crate::element::ElementKind;
use crate::keywords::KeywordKey;

/// A fixed token standing for a configurable keyword phrase.
///
/// Markers have the form `§NAME§`, which no user keyword can collide with.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Marker {
    For,
    To,
    Step,
    Foreach,
    In,
    Cond,
    Input,
    Output,
    Leave,
    Return,
    Exit,
    Throw,
    Call,
    Catch,
    Case,
    Select,
    Default,
}

impl Marker {
    pub const ALL: [Marker; 17] = [
        Marker::For,
        Marker::To,
        Marker::Step,
        Marker::Foreach,
        Marker::In,
        Marker::Cond,
        Marker::Input,
        Marker::Output,
        Marker::Leave,
        Marker::Return,
        Marker::Exit,
        Marker::Throw,
        Marker::Call,
        Marker::Catch,
        Marker::Case,
        Marker::Select,
        Marker::Default,
    ];

    pub const fn token(self) -> &'static str {
        match self {
            Marker::For => "§FOR§",
            Marker::To => "§TO§",
            Marker::Step => "§STEP§",
            Marker::Foreach => "§FOREACH§",
            Marker::In => "§IN§",
            Marker::Cond => "§COND§",
            Marker::Input => "§INPUT§",
            Marker::Output => "§OUTPUT§",
            Marker::Leave => "§LEAVE§",
            Marker::Return => "§RETURN§",
            Marker::Exit => "§EXIT§",
            Marker::Throw => "§THROW§",
            Marker::Call => "§CALL§",
            Marker::Catch => "§CATCH§",
            Marker::Case => "§CASE§",
            Marker::Select => "§SELECT§",
            Marker::Default => "§DEFAULT§",
        }
    }

    /// A readable name for diagnostics when no keyword phrase is
    /// configured.
    pub const fn label(self) -> &'static str {
        match self {
            Marker::For => "for",
            Marker::To => "to",
            Marker::Step => "step",
            Marker::Foreach => "foreach",
            Marker::In => "in",
            Marker::Cond => "condition",
            Marker::Input => "input",
            Marker::Output => "output",
            Marker::Leave => "leave",
            Marker::Return => "return",
            Marker::Exit => "exit",
            Marker::Throw => "throw",
            Marker::Call => "call",
            Marker::Catch => "catch",
            Marker::Case => "case",
            Marker::Select => "selector",
            Marker::Default => "default",
        }
    }

    pub fn from_token(token: &str) -> Option<Marker> {
        Marker::ALL.into_iter().find(|m| m.token() == token)
    }

    /// The phrase this marker replaced in a line of `kind`. `None` for
    /// markers that were inserted rather than substituted.
    pub fn keyword(self, kind: ElementKind) -> Option<KeywordKey> {
        match self {
            Marker::For => Some(KeywordKey::PreFor),
            Marker::To => Some(KeywordKey::PostFor),
            Marker::Step => Some(KeywordKey::StepFor),
            Marker::Foreach => Some(KeywordKey::PreForIn),
            Marker::In => Some(KeywordKey::PostForIn),
            Marker::Cond => kind.condition_keys().map(|(pre, _)| pre),
            Marker::Input => Some(KeywordKey::Input),
            Marker::Output => Some(KeywordKey::Output),
            Marker::Leave => Some(KeywordKey::PreLeave),
            Marker::Return => Some(KeywordKey::PreReturn),
            Marker::Exit => Some(KeywordKey::PreExit),
            Marker::Throw => Some(KeywordKey::PreThrow),
            Marker::Case => Some(KeywordKey::PreCase),
            Marker::Call | Marker::Catch | Marker::Select | Marker::Default => None,
        }
    }
}
