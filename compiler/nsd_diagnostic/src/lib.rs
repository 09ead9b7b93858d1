//! Human-readable error reports for element lines.
//!
//! A report shows the engine's message, the offending line with a caret
//! under the error column, the token found there and the terminals the
//! grammar would have accepted:
//!
//! ```text
//! Syntax error: unexpected token
//! a <- (23 + * 6
//!            ^
//! Found token *
//!
//! Expected: ( | + | - | ++ | -- | ! | ~ | Identifier
//! ```

mod config;
mod render;

pub use config::{ColorMode, DiagnosticConfig};
pub use render::{Found, SyntaxDiagnostic};
