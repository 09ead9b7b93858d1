//! Debug commands: `lex` and `normalize` for inspecting the front half of
//! the pipeline.

use nsd_lexer::{tokenize, Normalizer, TokenClass};

use super::{fail, input_lines, load_keywords};
use crate::options::CliOptions;

/// Tokenize each line and display its tokens with class and column.
pub fn lex_lines(lines: Vec<String>) {
    for line in input_lines(lines) {
        let tokens = tokenize(&line);
        println!("Tokens for '{line}' ({} tokens):", tokens.token_count());
        for (i, token) in tokens.iter().enumerate() {
            println!("  {i:>3} {token:<12} {:?} @ {}", TokenClass::of(token), tokens.column_of(i));
        }
    }
}

/// Normalize each line as line `i` of one element of the configured kind.
pub fn normalize_lines(options: &CliOptions, lines: Vec<String>) {
    let keywords = load_keywords(options).unwrap_or_else(|e| fail(&e));
    let normalizer = Normalizer::new(keywords);
    for (i, line) in input_lines(lines).iter().enumerate() {
        let normalized = normalizer.normalize(&tokenize(line), options.kind, i, options.unify);
        println!("{normalized}");
    }
}
