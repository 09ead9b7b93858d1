//! Command handlers for the nsdc CLI.
//!
//! Each submodule implements one command. Shared setup (reading input
//! lines, building a configured parser) lives here in the module root.

use std::io::{BufRead, IsTerminal};

use nsd_diagnostic::DiagnosticConfig;
use nsd_lexer::KeywordConfig;
use nsd_parse::{LineParser, ParserOptions};

use crate::options::CliOptions;

mod debug;
mod parse;

pub use debug::{lex_lines, normalize_lines};
pub use parse::{parse_headers, parse_lines};

/// The lines given on the command line, or stdin when there are none.
fn input_lines(lines: Vec<String>) -> Vec<String> {
    if !lines.is_empty() {
        return lines;
    }
    std::io::stdin().lock().lines().map_while(Result::ok).collect()
}

fn load_keywords(options: &CliOptions) -> Result<KeywordConfig, String> {
    let Some(path) = &options.keywords else {
        return Ok(KeywordConfig::default());
    };
    let text = std::fs::read_to_string(path).map_err(|e| format!("cannot read '{}': {e}", path.display()))?;
    let mut keywords = KeywordConfig::default();
    let applied = keywords.load_properties(&text);
    tracing::debug!(path = %path.display(), applied, "keywords loaded");
    Ok(keywords)
}

fn build_parser(options: &CliOptions) -> Result<LineParser, String> {
    let mut diagnostics = DiagnosticConfig::default().with_color_mode(options.color, std::io::stderr().is_terminal());
    diagnostics.max_width = options.max_width;
    let parser_options = ParserOptions {
        unify_operators: options.unify,
        diagnostics,
    };
    Ok(LineParser::with_keywords(load_keywords(options)?, parser_options))
}

/// Print `message` as an error and exit with status 1.
fn fail(message: &str) -> ! {
    eprintln!("error: {message}");
    std::process::exit(1);
}
