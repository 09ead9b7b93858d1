//! nsdc: inspect how element lines are tokenized, normalized and parsed.

mod commands;
mod options;

use commands::{lex_lines, normalize_lines, parse_headers, parse_lines};
use options::parse_options;

fn main() {
    nsd_parse::init_tracing();

    let args: Vec<String> = std::env::args().collect();
    if args.len() < 2 {
        print_usage();
        return;
    }

    let command = args[1].as_str();
    if matches!(command, "help" | "--help" | "-h") {
        print_usage();
        return;
    }
    if matches!(command, "version" | "--version" | "-V") {
        println!("nsdc {}", env!("CARGO_PKG_VERSION"));
        return;
    }

    let (options, lines) = match parse_options(&args[2..]) {
        Ok(parsed) => parsed,
        Err(e) => {
            eprintln!("error: {e}");
            eprintln!();
            print_usage();
            std::process::exit(1);
        }
    };

    match command {
        "parse" => parse_lines(&options, lines),
        "header" => parse_headers(&options, lines),
        "lex" => lex_lines(lines),
        "normalize" => normalize_lines(&options, lines),
        _ => {
            eprintln!("Unknown command: {command}");
            eprintln!();
            print_usage();
            std::process::exit(1);
        }
    }
}

fn print_usage() {
    println!("nsdc: element line parser");
    println!();
    println!("Usage: nsdc <command> [options] [lines...]");
    println!();
    println!("Lines are read from stdin when none are given.");
    println!();
    println!("Commands:");
    println!("  parse <line>...      Parse lines of one element and print them");
    println!("  header <line>...     Parse routine signatures");
    println!("  lex <line>...        Tokenize and display tokens");
    println!("  normalize <line>...  Show lines with keywords replaced by markers");
    println!("  help                 Show this help message");
    println!("  version              Show version information");
    println!();
    println!("Options:");
    println!("  --kind=<kind>        Element kind: instruction, alternative, while, repeat,");
    println!("                       for, foreach, call, jump, catch, case[:<lines>]");
    println!("  --keywords=<file>    Keyword property file (Parser<Key>=<phrase>)");
    println!("  --no-unify           Keep operator spellings as written");
    println!("  --max-width=<n>      Truncate the expected-symbol list to n characters");
    println!("  --color=<mode>       Diagnostic colors: auto, always, never");
    println!("  --vars               Print assigned, declared and used variables");
    println!();
    println!("Examples:");
    println!("  nsdc parse 'x <- 7 * (15 - sin(1.3))'");
    println!("  nsdc parse --kind=for 'for i <- 1 to 10 by 2'");
    println!("  nsdc parse --kind=case:3 choice '1, 2' default");
    println!("  nsdc parse --vars 'type P = record{{x, y: int}}' 'var p: P' 'p.x <- 1'");
    println!("  nsdc header 'function max(a, b: int): int'");
    println!("  nsdc normalize --kind=while 'while x > 0 and not done'");
}
