#![allow(clippy::unwrap_used, clippy::expect_used)]
//! Whole-line fixtures through the public parser API.
//!
//! Lines written with markers (`§FOR§` etc.) are already normalized and go
//! straight to [`LineParser::parse`]; plain lines go through
//! [`LineParser::parse_text`] with the element kind they would come from.

use nsd_ir::{DeclRules, ExprKind, Operator};
use nsd_lexer_core::tokenize;
use nsd_parse::{parse_declaration, ElementKind, Line, LineKind, LineParser, ParseError, VariableSets};
use nsd_types::{Primitive, Type, TypeRegistry};
use pretty_assertions::assert_eq;

fn parse_normalized(text: &str) -> Result<Line, ParseError> {
    LineParser::new().parse(&tokenize(text), &TypeRegistry::new())
}

#[test]
fn leave_without_levels() {
    let line = parse_normalized("§LEAVE§").unwrap();
    assert_eq!(line.kind, LineKind::Leave);
    assert_eq!(line.expression_count(), 0);
}

#[test]
fn assignment_with_nested_call() {
    let line = parse_normalized("a <- 7 * (15 - sin(1.3))").unwrap();
    assert_eq!(line.kind, LineKind::Assignment);
    let (_, sides) = line.expression(0).unwrap().as_operator().unwrap();
    let (op, factors) = sides[1].as_operator().unwrap();
    assert_eq!(op, Operator::Mul);
    assert_eq!(factors[0].to_string(), "7");
    assert_eq!(factors[1].as_operator().unwrap().0, Operator::Sub);
    assert_eq!(line.to_string(), "ASSIGNMENT[a <- 7 * (15 - sin(1.3))]");
}

#[test]
fn counting_loop_has_three_expressions() {
    let line = parse_normalized("§FOR§ k <- 23/4 §TO§ pow(2, 6) §STEP§ 2").unwrap();
    assert_eq!(line.kind, LineKind::ForLoop);
    assert_eq!(line.expression_count(), 3);
}

#[test]
fn input_with_empty_prompt() {
    let line = parse_normalized("§INPUT§ a, b[3]").unwrap();
    assert_eq!(line.kind, LineKind::Input);
    assert_eq!(line.expression_count(), 3);
    assert!(line.expression(0).is_none());
    assert_eq!(line.expression(1).and_then(|e| e.as_identifier()), Some("a"));
    assert_eq!(line.expression(2).unwrap().as_operator().unwrap().0, Operator::Index);
}

#[test]
fn typed_initialisation() {
    let line = parse_normalized("var z: int <- 15").unwrap();
    assert_eq!(line.kind, LineKind::VarInit);
    assert_eq!(line.data_type, Some(Type::Primitive(Primitive::Int)));
    assert_eq!(line.expression_count(), 1);
    assert_eq!(line.to_string(), "VARINIT(int)[z <- 15]");
}

#[test]
fn indexing_a_literal_is_semantic() {
    let error = LineParser::new()
        .parse_expressions("6[-6 * -a] + 34", &TypeRegistry::new())
        .unwrap_err();
    assert!(matches!(error, ParseError::Semantic { .. }), "{error:?}");
}

#[test]
fn definitions_register_in_order() {
    let mut parser = LineParser::new();
    let mut registry = TypeRegistry::new();
    let program = [
        "type Point = record{x, y: int}",
        "type Path = array of Point",
        "var route: Path",
        "route[0].x <- 3",
    ];
    let mut rendered = Vec::new();
    for text in program {
        let line = parser.parse_text(text, ElementKind::Instruction, 0, &registry);
        assert!(!line.is_error(), "{text}: {line}");
        if line.kind == LineKind::TypeDef {
            registry.put_type(line.data_type.clone().unwrap(), false).unwrap();
        }
        rendered.push(line.to_string());
    }
    assert_eq!(
        rendered,
        vec![
            "TYPEDEF($Point(x:int;y:int))[Point; x: int, y: int]",
            "TYPEDEF(@Path(Point,0,0))[Path]",
            "VARDECL(@Path(Point,0,0))[route]",
            "ASSIGNMENT[route[0].x <- 3]",
        ]
    );
    assert!(registry.contains("Path"));
}

#[test]
fn redefinition_needs_force() {
    let mut parser = LineParser::new();
    let mut registry = TypeRegistry::new();
    let first = parser.parse_text("type Size = int", ElementKind::Instruction, 0, &registry);
    assert!(registry.put_type(first.data_type.unwrap(), false).unwrap());
    let again = parser.parse_text("type Size = long", ElementKind::Instruction, 0, &registry);
    let again = again.data_type.unwrap();
    assert!(!registry.put_type(again.clone(), false).unwrap());
    assert_eq!(registry.get("Size").map(|ty| ty.describe(true)), Some("=Size(int)".to_owned()));
    assert!(registry.put_type(again, true).unwrap());
    assert_eq!(registry.get("Size").map(|ty| ty.describe(true)), Some("=Size(long)".to_owned()));
}

#[test]
fn declaration_dialects_side_by_side() {
    let registry = TypeRegistry::new();
    let cases = [
        ("var a: int", "a: int"),
        ("dim a, b as double", "a as double, b as double"),
        ("int a, b[3]", "int a, array[3] of int b"),
        ("a, b", "a, b"),
        ("const x: int = 4", "const x: int = 4"),
        ("a: int; b: string", "a: int; b: string"),
    ];
    for (text, expected) in cases {
        let tokens = tokenize(text);
        let declaration = parse_declaration(&tokens, 0, tokens.token_count(), DeclRules::all(), &registry)
            .unwrap_or_else(|e| panic!("`{text}`: {e}"));
        assert!(matches!(declaration.kind, ExprKind::Declaration { .. }));
        assert_eq!(declaration.to_string(), expected, "{text}");
    }
}

#[test]
fn variables_across_a_routine() {
    let mut parser = LineParser::new();
    let registry = TypeRegistry::new();
    let mut sets = VariableSets::new();

    let header = parser.parse_routine_header("sum(values: int[]): int", &registry).unwrap();
    assert!(header.gather_variables(&mut sets));

    let body = [
        ("total <- 0", ElementKind::Instruction),
        ("foreach v in values", ElementKind::ForIn),
        ("total <- total + v", ElementKind::Instruction),
        ("return total", ElementKind::Jump),
    ];
    for (text, kind) in body {
        let line = parser.parse_text(text, kind, 0, &registry);
        assert!(line.gather_variables(&mut sets), "{text}");
    }
    assert_eq!(VariableSets::sorted(&sets.declared), vec!["values"]);
    assert_eq!(VariableSets::sorted(&sets.assigned), vec!["total", "v"]);
    assert_eq!(VariableSets::sorted(&sets.used), vec!["total", "v", "values"]);
    assert!(sets.problems.is_empty());
}
