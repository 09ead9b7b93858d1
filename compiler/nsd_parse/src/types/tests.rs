use super::*;
use nsd_ir::Expression;
use pretty_assertions::assert_eq;

fn int(text: &str) -> Expression {
    Expression::literal(LiteralKind::Integer, text, 0)
}

#[test]
fn integer_literals_in_every_base() {
    assert_eq!(integer_value(&int("42")), Some(42));
    assert_eq!(integer_value(&int("0x1F")), Some(31));
    assert_eq!(integer_value(&int("0b101")), Some(5));
    assert_eq!(integer_value(&int("017")), Some(15));
    assert_eq!(integer_value(&int("12L")), Some(12));
    assert_eq!(integer_value(&int("0")), Some(0));
    let negative = Expression::unary(Operator::Neg, int("3"), 0);
    assert_eq!(integer_value(&negative), Some(-3));
    assert_eq!(integer_value(&Expression::identifier("n", 0)), None);
}

#[test]
fn resolves_named_and_bracketed_types() {
    let registry = TypeRegistry::new();
    let spec = TypeSpec::Named {
        name: "int".to_owned(),
        dims: 2,
    };
    let ty = resolve_spec(&spec, &registry).unwrap();
    assert_eq!(ty.describe(true), "@(@(int,0,0),0,0)");
    assert_eq!(
        resolve_spec(&TypeSpec::named("Person"), &registry),
        Err(TypeError::Unresolved("Person".to_owned()))
    );
}

#[test]
fn array_of_extents_nest_outermost_first() {
    let registry = TypeRegistry::new();
    let spec = TypeSpec::named("double").array_of(vec![
        Extent::Range(int("1"), int("10")),
        Extent::Size(int("3")),
    ]);
    let ty = resolve_spec(&spec, &registry).unwrap();
    assert_eq!(ty.describe(true), "@(@(double,0,3),1,10)");
    let array = ty.as_array().unwrap();
    assert_eq!(array.index_range(0), Some((1, 10)));
    assert_eq!(array.size(1), Some(3));
}

#[test]
fn non_literal_extents_stay_unevaluated() {
    let registry = TypeRegistry::new();
    let spec = TypeSpec::named("int").array_of(vec![Extent::Size(Expression::identifier("n", 3))]);
    let ty = resolve_spec(&spec, &registry).unwrap();
    let array = ty.as_array().unwrap();
    assert_eq!(array.size(0), None);
    assert_eq!(
        array.bound_expressions(0).map(|(size, _)| size.to_string()),
        Some("n".to_owned())
    );
}

#[test]
fn inverted_ranges_are_rejected() {
    let registry = TypeRegistry::new();
    let spec = TypeSpec::named("int").array_of(vec![Extent::Range(int("5"), int("2"))]);
    assert_eq!(
        resolve_spec(&spec, &registry),
        Err(TypeError::InvalidRange { low: 5, high: 2 })
    );
}

#[test]
fn c_style_dimensions_and_naming() {
    let ty = with_dimensions(Type::Primitive(nsd_types::Primitive::Char), &[int("2"), int("80")]).unwrap();
    let ty = named("Page", ty).unwrap();
    assert_eq!(ty.describe(true), "@Page(@(char,0,80),0,2)");
}

#[test]
fn literal_types_look_through_signs() {
    let negative = Expression::unary(Operator::Neg, Expression::literal(LiteralKind::Float, "2.5", 1), 0);
    assert_eq!(literal_type(&negative).map(|t| t.describe(false)), Some("double".to_owned()));
    assert_eq!(literal_type(&Expression::identifier("x", 0)), None);
}
