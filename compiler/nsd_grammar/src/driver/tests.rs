use super::*;
use pretty_assertions::assert_eq;

use Term::*;

fn lexemes(terms: &[Term]) -> Vec<Lexeme> {
    terms.iter().enumerate().map(|(i, &t)| Lexeme::new(t, i * 2)).collect()
}

/// Render a tree as nested productions and token indices.
fn shape(node: &Node) -> String {
    match node {
        Node::Terminal(lexeme) => lexeme.token.to_string(),
        Node::Reduction { production, children } => {
            let inner: Vec<String> = children.iter().map(shape).collect();
            format!("{production:?}({})", inner.join(" "))
        }
    }
}

/// Strip the single-child chains between a line and its interesting
/// reductions.
fn collapse(node: &Node) -> String {
    match node {
        Node::Terminal(lexeme) => lexeme.token.to_string(),
        Node::Reduction { children, .. } if children.len() == 1 => collapse(&children[0]),
        Node::Reduction { production, children } => {
            let inner: Vec<String> = children.iter().map(collapse).collect();
            format!("{production:?}({})", inner.join(" "))
        }
    }
}

#[test]
fn multiplication_binds_tighter() {
    let tree = parse_line(&lexemes(&[Identifier, LArrow, Identifier, Plus, Identifier, Star, Identifier])).unwrap();
    assert_eq!(collapse(&tree), "Assignment(0 2 AddPlus(4 6 MulTimes(8 10 12)))");
    assert_eq!(tree.first_token(), Some(0));
}

#[test]
fn reductions_keep_every_terminal() {
    let tree = parse_line(&lexemes(&[ReturnKey])).unwrap();
    assert_eq!(shape(&tree), "LineJump(ReturnBare(0))");
}

#[test]
fn reports_unexpected_token() {
    let failure = parse_line(&lexemes(&[Identifier, LArrow, Identifier, Plus, RParen])).unwrap_err();
    assert_eq!(failure.position, 4);
    assert_eq!(failure.found, Some(Lexeme::new(RParen, 8)));
    assert!(failure.expected.contains(&Identifier));
    assert!(failure.expected.contains(&LParen));
    assert!(!failure.expected.contains(&RParen));
}

#[test]
fn reports_premature_end() {
    let failure = parse_line(&lexemes(&[Identifier, LArrow, LParen, Identifier])).unwrap_err();
    assert_eq!(failure.position, 4);
    assert_eq!(failure.found, None);
    assert!(failure.expected.contains(&RParen));
}

#[test]
fn expected_terminals_are_sorted_and_unique() {
    let failure = parse_line(&lexemes(&[Identifier, LArrow])).unwrap_err();
    let mut sorted = failure.expected.clone();
    sorted.sort();
    sorted.dedup();
    assert_eq!(failure.expected, sorted);
    assert!(!failure.expected.is_empty());
}

#[test]
fn empty_input_is_rejected() {
    let failure = parse_line(&[]).unwrap_err();
    assert_eq!(failure.position, 0);
    assert_eq!(failure.found, None);
    for term in [Identifier, InputKey, OutputKey, CondKey, DefaultKey] {
        assert!(failure.expected.contains(&term), "missing {}", term.name());
    }
}

fn widths(node: &Node, out: &mut Vec<usize>) {
    match node {
        Node::Terminal(lexeme) => out.push(lexeme.width),
        Node::Reduction { children, .. } => children.iter().for_each(|c| widths(c, out)),
    }
}

#[test]
fn wide_lexemes_keep_their_width() {
    let input = vec![
        Lexeme::new(VarKey, 0),
        Lexeme::new(Identifier, 1),
        Lexeme::new(Colon, 2),
        Lexeme::new(Identifier, 3),
        Lexeme::new(Brackets, 4).with_width(2),
    ];
    let tree = parse_line(&input).unwrap();
    let mut found = Vec::new();
    widths(&tree, &mut found);
    assert_eq!(found, vec![1, 1, 1, 1, 2]);
}
