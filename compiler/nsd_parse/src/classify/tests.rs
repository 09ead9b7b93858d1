use super::*;
use nsd_lexer_core::tokenize;
use pretty_assertions::assert_eq;

fn terms(text: &str) -> Vec<Term> {
    let tokens = tokenize(text);
    classify(&tokens, 0, tokens.token_count())
        .into_iter()
        .map(|lexeme| lexeme.term)
        .collect()
}

#[test]
fn empty_brackets_merge() {
    let tokens = tokenize("a <- b[] + 0x1F");
    let lexemes = classify(&tokens, 0, tokens.token_count());
    let terms: Vec<Term> = lexemes.iter().map(|l| l.term).collect();
    assert_eq!(
        terms,
        vec![
            Term::Identifier,
            Term::LArrow,
            Term::Identifier,
            Term::Brackets,
            Term::Plus,
            Term::HexLiteral
        ]
    );
    assert_eq!(lexemes[3].width, 2);
    assert_eq!(lexemes[4].token, 5);
}

#[test]
fn literal_words() {
    assert_eq!(
        terms("x <- TRUE and not Null"),
        vec![
            Term::Identifier,
            Term::LArrow,
            Term::BooleanLiteral,
            Term::AndOpr,
            Term::NotOpr,
            Term::NullLiteral
        ]
    );
}

#[test]
fn array_of_is_reserved_only_in_type_position() {
    assert_eq!(
        terms("var x: array[1..3] of int"),
        vec![
            Term::VarKey,
            Term::Identifier,
            Term::Colon,
            Term::ArrayKey,
            Term::LBracket,
            Term::DecLiteral,
            Term::DotDot,
            Term::DecLiteral,
            Term::RBracket,
            Term::OfKey,
            Term::Identifier
        ]
    );
    assert_eq!(
        terms("array <- of"),
        vec![Term::Identifier, Term::LArrow, Term::Identifier]
    );
}

#[test]
fn declaration_keywords_only_lead() {
    assert_eq!(
        terms("type <- var"),
        vec![Term::TypeKey, Term::LArrow, Term::Identifier]
    );
    assert_eq!(
        terms("type T = record{a: int}"),
        vec![
            Term::TypeKey,
            Term::Identifier,
            Term::Eq,
            Term::RecordKey,
            Term::LBrace,
            Term::Identifier,
            Term::Colon,
            Term::Identifier,
            Term::RBrace
        ]
    );
    assert_eq!(terms("record <- 1")[0], Term::Identifier);
}

#[test]
fn markers_and_literals() {
    assert_eq!(
        terms("§INPUT§ \"x\", 'c', 1.5, 017"),
        vec![
            Term::InputKey,
            Term::StringLiteral,
            Term::Comma,
            Term::CharLiteral,
            Term::Comma,
            Term::FloatLiteral,
            Term::Comma,
            Term::OctLiteral
        ]
    );
    assert_eq!(terms("§NOSUCH§"), vec![Term::Unknown]);
}

#[test]
fn sub_ranges_keep_absolute_positions() {
    let tokens = tokenize("f(a, b)");
    let lexemes = classify(&tokens, 2, 5);
    let positions: Vec<usize> = lexemes.iter().map(|l| l.token).collect();
    assert_eq!(positions, vec![2, 3, 4]);
}
