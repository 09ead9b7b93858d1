//! Parse errors.

use thiserror::Error;

use crate::declaration::DeclarationError;

/// Why a line could not be turned into a [`Line`](crate::Line).
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ParseError {
    /// The grammar rejected the line. `message` is the full rendered
    /// diagnostic; `position` is the index of the offending token in the
    /// normalized stream (the token count at end of input) and `column`
    /// its column in the restored line.
    #[error("{message}")]
    Syntax {
        message: String,
        position: usize,
        column: usize,
    },

    /// The line is well-formed but meaningless, e.g. indexing a literal.
    #[error("{message}")]
    Semantic { message: String, position: usize },
}

impl ParseError {
    pub fn semantic(message: impl Into<String>, position: usize) -> Self {
        ParseError::Semantic {
            message: message.into(),
            position,
        }
    }

    /// Token index the error refers to.
    pub fn position(&self) -> usize {
        match self {
            ParseError::Syntax { position, .. } | ParseError::Semantic { position, .. } => *position,
        }
    }
}

impl From<DeclarationError> for ParseError {
    fn from(error: DeclarationError) -> Self {
        ParseError::Semantic {
            position: error.position(),
            message: error.to_string(),
        }
    }
}
