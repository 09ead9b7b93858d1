use super::*;
use crate::primitive::Primitive;
use nsd_ir::LiteralKind;
use pretty_assertions::assert_eq;

fn char_type() -> Type {
    Type::Primitive(Primitive::Char)
}

#[test]
fn range_bounds() {
    let bounds = ArrayBounds::range(1, 10).unwrap();
    assert_eq!(bounds.size(), Some(10));
    assert_eq!(bounds.index_range(), Some((1, 10)));
    let negative = ArrayBounds::range(-3, 3).unwrap();
    assert_eq!(negative.size(), Some(7));
}

#[test]
fn inverted_range_rejected() {
    assert_eq!(
        ArrayBounds::range(5, 2).unwrap_err(),
        TypeError::InvalidRange { low: 5, high: 2 }
    );
}

#[test]
fn size_bounds_index_from_zero() {
    assert_eq!(ArrayBounds::Size(4).index_range(), Some((0, 3)));
    assert_eq!(ArrayBounds::Size(0).index_range(), None);
    assert_eq!(ArrayBounds::Flexible.size(), None);
}

#[test]
fn dynamic_bounds_keep_expressions() {
    let n = Expression::identifier("n", 2);
    let bounds = ArrayBounds::Dynamic(n.clone());
    assert_eq!(bounds.size(), None);
    assert_eq!(bounds.expressions(), Some((&n, None)));

    let low = Expression::literal(LiteralKind::Integer, "1", 2);
    let ranged = ArrayBounds::DynamicRange(low.clone(), n.clone());
    assert_eq!(ranged.expressions(), Some((&low, Some(&n))));
}

#[test]
fn named_array_description() {
    let text = ArrayType::named("Text", char_type(), ArrayBounds::range(1, 80).unwrap()).unwrap();
    assert_eq!(Type::Array(text).describe(false), "@Text(char,1,80)");
}

#[test]
fn unknown_bounds_show_zero() {
    let open = ArrayType::new(char_type(), ArrayBounds::Flexible);
    assert_eq!(Type::Array(open).describe(false), "@(char,0,0)");
}

#[test]
fn invalid_array_name() {
    assert_eq!(
        ArrayType::named("9x", char_type(), ArrayBounds::Flexible).unwrap_err(),
        TypeError::InvalidName("9x".to_owned())
    );
}

#[test]
fn dimensions_walk_nested_arrays() {
    let inner = ArrayType::new(char_type(), ArrayBounds::Size(3));
    let outer = ArrayType::new(Type::Array(inner), ArrayBounds::range(1, 2).unwrap());
    assert_eq!(outer.dimensions(), 2);
    assert_eq!(outer.size(0), Some(2));
    assert_eq!(outer.size(1), Some(3));
    assert_eq!(outer.size(2), None);
    assert_eq!(outer.index_range(1), Some((0, 2)));
    assert_eq!(outer.base_element(), &char_type());
    assert!(outer.dimension(2).is_none());
}
