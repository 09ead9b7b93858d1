//! `parse` and `header`: run lines through the whole parser.

use nsd_parse::{Line, LineKind, VariableSets};
use nsd_types::TypeRegistry;

use super::{build_parser, fail, input_lines};
use crate::options::CliOptions;

/// Parse each line as line `i` of one element and print the result.
///
/// Type definitions are registered as they are met, so later lines can
/// use them. Exits with status 1 if any line fails.
pub fn parse_lines(options: &CliOptions, lines: Vec<String>) {
    let mut parser = build_parser(options).unwrap_or_else(|e| fail(&e));
    let mut registry = TypeRegistry::new();
    let mut variables = VariableSets::new();
    let mut errors = 0;

    for (i, text) in input_lines(lines).iter().enumerate() {
        let line = parser.parse_text(text, options.kind, i, &registry);
        errors += usize::from(report(&line));
        if line.kind == LineKind::TypeDef {
            if let Some(ty) = line.data_type.clone() {
                match registry.put_type(ty, false) {
                    Ok(true) => {}
                    Ok(false) => eprintln!("warning: type on line {} already defined", i + 1),
                    Err(e) => {
                        eprintln!("error: {e}");
                        errors += 1;
                    }
                }
            }
        }
        line.gather_variables(&mut variables);
    }

    if options.show_variables {
        print_variables(&variables);
    }
    if errors > 0 {
        std::process::exit(1);
    }
}

/// Parse each argument as a routine signature.
pub fn parse_headers(options: &CliOptions, lines: Vec<String>) {
    let mut parser = build_parser(options).unwrap_or_else(|e| fail(&e));
    let registry = TypeRegistry::new();
    let mut variables = VariableSets::new();
    let mut errors = 0;

    for text in input_lines(lines) {
        match parser.parse_routine_header(&text, &registry) {
            Ok(line) => {
                println!("{line}");
                line.gather_variables(&mut variables);
            }
            Err(e) => {
                eprintln!("{e}");
                errors += 1;
            }
        }
    }

    if options.show_variables {
        print_variables(&variables);
    }
    if errors > 0 {
        std::process::exit(1);
    }
}

/// Print a parsed line, or its diagnostic. Returns whether it failed.
fn report(line: &Line) -> bool {
    match &line.error {
        None => {
            println!("{line}");
            false
        }
        Some(error) => {
            eprintln!("{}", error.message);
            true
        }
    }
}

fn print_variables(variables: &VariableSets) {
    println!();
    println!("assigned: {}", VariableSets::sorted(&variables.assigned).join(", "));
    println!("declared: {}", VariableSets::sorted(&variables.declared).join(", "));
    println!("used:     {}", VariableSets::sorted(&variables.used).join(", "));
    for problem in &variables.problems {
        println!("problem:  {problem}");
    }
}
