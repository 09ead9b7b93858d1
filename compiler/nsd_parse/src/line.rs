//! Parsed element lines.

use std::fmt;

use nsd_ir::Expression;
use nsd_types::Type;

use crate::error::ParseError;


/// Statement shape of a parsed line.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum LineKind {
    Assignment,
    VarInit,
    VarDecl,
    ConstDef,
    TypeDef,
    Input,
    Output,
    Condition,
    ForLoop,
    ForeachLoop,
    Return,
    Exit,
    Throw,
    Leave,
    RoutineCall,
    Catch,
    Case,
    Selector,
    Default,
    Routine,
    /// The line could not be parsed.
    Raw,
}

impl LineKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            LineKind::Assignment => "ASSIGNMENT",
            LineKind::VarInit => "VARINIT",
            LineKind::VarDecl => "VARDECL",
            LineKind::ConstDef => "CONSTDEF",
            LineKind::TypeDef => "TYPEDEF",
            LineKind::Input => "INPUT",
            LineKind::Output => "OUTPUT",
            LineKind::Condition => "CONDITION",
            LineKind::ForLoop => "FORLOOP",
            LineKind::ForeachLoop => "FOREACHLOOP",
            LineKind::Return => "RETURN",
            LineKind::Exit => "EXIT",
            LineKind::Throw => "THROW",
            LineKind::Leave => "LEAVE",
            LineKind::RoutineCall => "ROUTINECALL",
            LineKind::Catch => "CATCH",
            LineKind::Case => "CASE",
            LineKind::Selector => "SELECTOR",
            LineKind::Default => "DEFAULT",
            LineKind::Routine => "ROUTINE",
            LineKind::Raw => "RAW",
        }
    }
}

impl fmt::Display for LineKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum LineErrorKind {
    Syntax,
    Semantic,
}

/// An error folded into a [`Line`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LineError {
    pub kind: LineErrorKind,
    pub message: String,
    /// Token index in the normalized line.
    pub position: usize,
    /// Column in the restored line, when known.
    pub column: Option<usize>,
}

impl LineError {
    pub fn from_parse_error(error: &ParseError) -> Self {
        match error {
            ParseError::Syntax {
                message,
                position,
                column,
            } => LineError {
                kind: LineErrorKind::Syntax,
                message: message.clone(),
                position: *position,
                column: Some(*column),
            },
            ParseError::Semantic { message, position } => LineError {
                kind: LineErrorKind::Semantic,
                message: message.clone(),
                position: *position,
                column: None,
            },
        }
    }
}

/// One parsed element line.
///
/// `expressions` holds the line's top-level expressions in the order
/// listed for each [`LineKind`]. Only the prompt slot of an input line is
/// ever `None`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Line {
    pub kind: LineKind,
    pub expressions: Vec<Option<Expression>>,
    pub data_type: Option<Type>,
    pub error: Option<LineError>,
}

impl Line {
    pub fn new(kind: LineKind, expressions: Vec<Expression>) -> Self {
        Line {
            kind,
            expressions: expressions.into_iter().map(Some).collect(),
            data_type: None,
            error: None,
        }
    }

    /// A line that failed to parse.
    pub fn raw(error: LineError) -> Self {
        Line {
            kind: LineKind::Raw,
            expressions: Vec::new(),
            data_type: None,
            error: Some(error),
        }
    }

    #[must_use]
    pub fn with_type(mut self, data_type: Option<Type>) -> Self {
        self.data_type = data_type;
        self
    }

    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }

    /// The expression in slot `index`, if present.
    pub fn expression(&self, index: usize) -> Option<&Expression> {
        self.expressions.get(index).and_then(Option::as_ref)
    }

    pub fn expression_count(&self) -> usize {
        self.expressions.len()
    }
}

/// `KIND(type)[e1; e2](error)`, omitting the type and error parts when
/// absent.
impl fmt::Display for Line {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.kind.as_str())?;
        if let Some(ty) = &self.data_type {
            write!(f, "({})", ty.describe(false))?;
        }
        f.write_str("[")?;
        for (i, expression) in self.expressions.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            if let Some(expression) = expression {
                write!(f, "{expression}")?;
            }
        }
        f.write_str("]")?;
        if let Some(error) = &self.error {
            write!(f, "({})", error.message)?;
        }
        Ok(())
    }
}
