//! Command-line flags shared by all commands.

use std::path::PathBuf;

use nsd_diagnostic::ColorMode;
use nsd_lexer::{ElementKind, UnknownElementKind};
use thiserror::Error;

#[cfg(test)]
mod tests;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CliOptions {
    pub kind: ElementKind,
    /// Keyword property file replacing the default phrases.
    pub keywords: Option<PathBuf>,
    pub unify: bool,
    pub max_width: Option<usize>,
    pub color: ColorMode,
    /// Print assigned, declared and used variables after parsing.
    pub show_variables: bool,
}

impl Default for CliOptions {
    fn default() -> Self {
        CliOptions {
            kind: ElementKind::Instruction,
            keywords: None,
            unify: true,
            max_width: None,
            color: ColorMode::Auto,
            show_variables: false,
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum OptionError {
    #[error(transparent)]
    Kind(#[from] UnknownElementKind),
    #[error("invalid width `{0}`")]
    Width(String),
    #[error("invalid color mode `{0}` (expected auto, always or never)")]
    Color(String),
    #[error("unknown option `{0}`")]
    Unknown(String),
}

/// Split `args` into options and positional lines. A lone `--` ends
/// option parsing.
pub fn parse_options(args: &[String]) -> Result<(CliOptions, Vec<String>), OptionError> {
    let mut options = CliOptions::default();
    let mut lines = Vec::new();
    let mut rest = args.iter();
    while let Some(arg) = rest.next() {
        if arg == "--" {
            lines.extend(rest.cloned());
            break;
        }
        if let Some(kind) = arg.strip_prefix("--kind=") {
            options.kind = kind.parse()?;
        } else if let Some(path) = arg.strip_prefix("--keywords=") {
            options.keywords = Some(PathBuf::from(path));
        } else if let Some(width) = arg.strip_prefix("--max-width=") {
            let width = width.parse().map_err(|_| OptionError::Width(width.to_owned()))?;
            options.max_width = Some(width);
        } else if let Some(mode) = arg.strip_prefix("--color=") {
            options.color = match mode {
                "auto" => ColorMode::Auto,
                "always" => ColorMode::Always,
                "never" => ColorMode::Never,
                other => return Err(OptionError::Color(other.to_owned())),
            };
        } else if arg == "--no-unify" {
            options.unify = false;
        } else if arg == "--vars" {
            options.show_variables = true;
        } else if arg.starts_with("--") {
            return Err(OptionError::Unknown(arg.clone()));
        } else {
            lines.push(arg.clone());
        }
    }
    Ok((options, lines))
}
