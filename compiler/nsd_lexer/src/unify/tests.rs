use super::*;
use nsd_lexer_core::tokenize;
use pretty_assertions::assert_eq;

#[test]
fn words_to_symbols() {
    let mut line = tokenize("a = 1 AND not b or c mod 2 <> d");
    let count = unify(&mut line, Direction::ToSymbols);
    assert_eq!(count, 6);
    assert_eq!(line.to_string(), "a == 1 && ! b || c % 2 != d");
}

#[test]
fn pascal_assignment() {
    let mut line = tokenize("x := y shl 2");
    unify(&mut line, Direction::ToSymbols);
    assert_eq!(line.tokens(), ["x", "<-", "y", "<<", "2"]);
}

#[test]
fn div_is_kept() {
    let mut line = tokenize("a div b");
    assert_eq!(unify(&mut line, Direction::ToSymbols), 0);
    assert_eq!(line.to_string(), "a div b");
}

#[test]
fn words_inside_identifiers_untouched() {
    let mut line = tokenize("order <- android");
    assert_eq!(unify(&mut line, Direction::ToSymbols), 0);
}

#[test]
fn symbols_to_text_keeps_words_apart() {
    let mut line = tokenize("!done&&a!=b");
    unify(&mut line, Direction::ToText);
    assert_eq!(line.tokens(), ["not", "done", "and", "a", "<>", "b"]);
    assert_eq!(line.to_string(), "not done and a<>b");
}
