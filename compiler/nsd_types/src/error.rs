//! Type construction and registration errors.

use thiserror::Error;

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum TypeError {
    #[error("type name must be an identifier: `{0}`")]
    InvalidName(String),

    #[error("the type reference must not be recursive: `{name}` refers back to itself via `{target}`")]
    Cyclic { name: String, target: String },

    #[error("unknown type `{0}`")]
    Unresolved(String),

    #[error("invalid index range {low}..{high}")]
    InvalidRange { low: i64, high: i64 },

    #[error("duplicate component `{component}` in record `{record}`")]
    DuplicateComponent { record: String, component: String },

    #[error("standard type `{0}` cannot be redefined")]
    StandardType(String),
}
