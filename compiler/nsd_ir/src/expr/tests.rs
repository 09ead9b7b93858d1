use super::*;
use crate::{Extent, TypeSpec};
use pretty_assertions::assert_eq;

fn int(text: &str, pos: usize) -> Expression {
    Expression::literal(LiteralKind::Integer, text, pos)
}

fn id(name: &str, pos: usize) -> Expression {
    Expression::identifier(name, pos)
}

#[test]
fn display_omits_redundant_parentheses() {
    // 7 * (15 - sin(1.3))
    let call = Expression::new(
        ExprKind::Function {
            name: "sin".into(),
            args: vec![Expression::literal(LiteralKind::Float, "1.3", 7)],
        },
        5,
    );
    let diff = Expression::binary(Operator::Sub, int("15", 3), call, 4);
    let product = Expression::binary(Operator::Mul, int("7", 0), diff, 1);
    assert_eq!(product.to_string(), "7 * (15 - sin(1.3))");

    let sum = Expression::binary(Operator::Add, id("a", 0), id("b", 2), 1);
    let scaled = Expression::binary(Operator::Mul, id("c", 4), id("d", 6), 5);
    let total = Expression::binary(Operator::Add, sum, scaled, 3);
    assert_eq!(total.to_string(), "a + b + c * d");
}

#[test]
fn display_keeps_right_nested_same_level_groups() {
    let inner = Expression::binary(Operator::Sub, id("b", 2), id("c", 4), 3);
    let outer = Expression::binary(Operator::Sub, id("a", 0), inner, 1);
    assert_eq!(outer.to_string(), "a - (b - c)");
}

#[test]
fn display_of_access_and_prefix_operators() {
    let index = Expression::operator(Operator::Index, vec![id("b", 0), int("3", 2)], 1);
    assert_eq!(index.to_string(), "b[3]");

    let field = Expression::binary(Operator::Field, index.clone(), id("x", 5), 4);
    assert_eq!(field.to_string(), "b[3].x");

    let neg = Expression::unary(Operator::Neg, Expression::unary(Operator::Neg, id("a", 2), 1), 0);
    assert_eq!(neg.to_string(), "- -a");

    let not = Expression::unary(
        Operator::Not,
        Expression::binary(Operator::And, id("p", 2), id("q", 4), 3),
        0,
    );
    assert_eq!(not.to_string(), "!(p && q)");

    let inc = Expression::unary(Operator::PostInc, id("i", 0), 1);
    assert_eq!(inc.to_string(), "i++");
}

#[test]
fn display_of_initializers_and_ternary() {
    let array = Expression::new(ExprKind::ArrayInitializer(vec![int("1", 1), int("2", 3)]), 0);
    assert_eq!(array.to_string(), "{1, 2}");

    let record = Expression::new(
        ExprKind::RecordInitializer {
            type_name: "Date".into(),
            components: vec![Expression::new(
                ExprKind::Component {
                    name: "day".into(),
                    value: Box::new(int("24", 4)),
                },
                2,
            )],
        },
        0,
    );
    assert_eq!(record.to_string(), "Date{day: 24}");

    let ternary = Expression::new(
        ExprKind::Ternary {
            cond: Box::new(Expression::binary(Operator::Gt, id("a", 0), int("0", 2), 1)),
            then: Box::new(id("a", 4)),
            otherwise: Box::new(Expression::unary(Operator::Neg, id("a", 7), 6)),
        },
        3,
    );
    assert_eq!(ternary.to_string(), "a > 0 ? a : -a");
}

#[test]
fn display_of_declarations_follows_dialect() {
    let items = vec![
        Declarator::new("a", 0).with_type(TypeSpec::named("int")),
        Declarator::new("b", 2)
            .with_type(TypeSpec::named("double").array_of(vec![Extent::Size(int("5", 6))]))
            .with_default(Expression::new(ExprKind::ArrayInitializer(vec![]), 9)),
    ];
    let pascal = Expression::new(
        ExprKind::Declaration {
            rule: DeclRules::PASCAL_TYPED | DeclRules::LISTS | DeclRules::DEFAULTS,
            items: items.clone(),
            is_constant: false,
        },
        0,
    );
    assert_eq!(pascal.to_string(), "a: int, b: array[5] of double = {}");

    let c_style = Expression::new(
        ExprKind::Declaration {
            rule: DeclRules::C_STYLE | DeclRules::GROUPS,
            items,
            is_constant: true,
        },
        0,
    );
    assert_eq!(c_style.to_string(), "const int a; array[5] of double b = {}");
}

#[test]
fn lvalues_and_base_variables() {
    let index = Expression::operator(Operator::Index, vec![id("a", 0), id("i", 2)], 1);
    let field = Expression::binary(Operator::Field, index, id("b", 5), 4);
    assert!(field.is_lvalue());
    assert_eq!(field.base_variable(), Some("a"));
    assert!(!int("1", 0).is_lvalue());
    assert_eq!(int("1", 0).base_variable(), None);
}

#[test]
fn walk_visits_in_pre_order() {
    let tree = Expression::binary(
        Operator::Add,
        id("a", 0),
        Expression::new(
            ExprKind::Method {
                receiver: Box::new(id("s", 2)),
                name: "len".into(),
                args: vec![],
            },
            2,
        ),
        1,
    );
    let mut seen = Vec::new();
    tree.walk(&mut |node| seen.push(node.pos));
    assert_eq!(seen, [1, 0, 2, 2]);
}
