//! Syntax tree types shared by the parser, the type system and tools.
//!
//! An [`Expression`] is an owned tree: every node owns its children and
//! records the index of a token in the normalized token stream it was
//! built from. Trees are immutable once the builder hands them out.
//!
//! Declarations keep their types in syntactic form ([`TypeSpec`]); turning
//! a spec into a semantic type is the type system's business.

mod decl;
mod expr;
mod operators;

pub use decl::{DeclRules, Declarator, Extent, TypeSpec};
pub use expr::{ExprKind, Expression, LiteralKind};
pub use operators::{Fixity, Operator};
