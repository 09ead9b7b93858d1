use super::*;
use crate::array::{ArrayBounds, ArrayType};
use crate::redirect::RedirType;
use crate::ty::RecordType;
use pretty_assertions::assert_eq;

fn prim(p: Primitive) -> Type {
    Type::Primitive(p)
}

fn record(name: &str, components: &[(&str, Type)]) -> Type {
    let components = components
        .iter()
        .map(|(n, t)| ((*n).to_owned(), t.clone()))
        .collect();
    Type::Record(RecordType::new(Some(name), components).unwrap())
}

#[test]
fn standard_types_preregistered() {
    let registry = TypeRegistry::new();
    for p in Primitive::ALL {
        assert_eq!(registry.get(p.name()), Some(&prim(p)));
    }
    assert!(TypeRegistry::is_standard("double"));
    assert!(!TypeRegistry::is_standard("Double"));
}

#[test]
fn standard_types_cannot_be_redefined() {
    let mut registry = TypeRegistry::new();
    let fake = record("int", &[("v", prim(Primitive::Long))]);
    assert_eq!(
        registry.put_type(fake, true),
        Err(TypeError::StandardType("int".to_owned()))
    );
    assert_eq!(registry.put_type(prim(Primitive::Int), true), Ok(false));
    assert_eq!(registry.remove_type("int"), None);
}

#[test]
fn put_type_respects_force() {
    let mut registry = TypeRegistry::new();
    let v1 = record("Pair", &[("a", prim(Primitive::Int))]);
    let v2 = record("Pair", &[("b", prim(Primitive::Char))]);
    assert_eq!(registry.put_type(v1.clone(), false), Ok(true));
    assert_eq!(registry.put_type(v2.clone(), false), Ok(false));
    assert_eq!(registry.get("Pair"), Some(&v1));
    assert_eq!(registry.put_type(v2.clone(), true), Ok(true));
    assert_eq!(registry.get("Pair"), Some(&v2));
}

#[test]
fn anonymous_types_not_registered() {
    let mut registry = TypeRegistry::new();
    let anon = Type::Array(ArrayType::new(prim(Primitive::Int), ArrayBounds::Flexible));
    assert_eq!(registry.put_type(anon, true), Ok(false));
    assert_eq!(registry.type_names().count(), Primitive::ALL.len());
}

#[test]
fn variable_types() {
    let mut registry = TypeRegistry::new();
    let pair = record("Pair", &[("a", prim(Primitive::Int))]);
    assert!(registry.put_type_for("p", pair.clone(), false));
    // Registering the variable registers its type.
    assert_eq!(registry.get("Pair"), Some(&pair));
    assert_eq!(registry.type_for("p"), Some(&pair));

    assert!(!registry.put_type_for("p", prim(Primitive::Int), false));
    assert!(registry.put_type_for("p", prim(Primitive::Int), true));
    assert_eq!(registry.type_for("p"), Some(&prim(Primitive::Int)));
    assert_eq!(registry.type_for("q"), None);
}

#[test]
fn conflicting_variable_type_refused() {
    let mut registry = TypeRegistry::new();
    registry
        .put_type(record("Pair", &[("a", prim(Primitive::Int))]), false)
        .unwrap();
    let other = record("Pair", &[("z", prim(Primitive::Boolean))]);
    assert!(!registry.put_type_for("q", other, false));
    assert_eq!(registry.type_for("q"), None);
}

#[test]
fn refresh_propagates_redefinition() {
    let mut registry = TypeRegistry::new();
    let inner = record("Inner", &[("v", prim(Primitive::Int))]);
    registry.put_type(inner.clone(), false).unwrap();
    registry
        .put_type(record("Outer", &[("inner", inner)]), false)
        .unwrap();
    let alias = RedirType::new("In", "Inner", &registry).unwrap();
    registry.put_type(Type::Redirect(alias), false).unwrap();
    let outer = registry.get("Outer").unwrap().clone();
    assert!(registry.put_type_for("o", outer, false));

    registry
        .put_type(record("Inner", &[("w", prim(Primitive::Double))]), true)
        .unwrap();
    registry.refresh().unwrap();

    assert_eq!(
        registry.get("Outer").unwrap().describe(true),
        "$Outer(inner:$Inner(w:double))"
    );
    assert_eq!(
        registry.get("In").unwrap().describe(true),
        "=In($Inner(w:double))"
    );
    assert_eq!(
        registry.type_for("o").unwrap().describe(true),
        "$Outer(inner:$Inner(w:double))"
    );
}

#[test]
fn refresh_reports_broken_alias() {
    let mut registry = TypeRegistry::new();
    registry
        .put_type(record("Base", &[("v", prim(Primitive::Int))]), false)
        .unwrap();
    let alias = RedirType::new("Alias", "Base", &registry).unwrap();
    registry.put_type(Type::Redirect(alias), false).unwrap();
    registry.remove_type("Base");
    assert_eq!(
        registry.refresh(),
        Err(TypeError::Unresolved("Base".to_owned()))
    );
    // The failed entry keeps its last good terminal.
    assert!(registry.get("Alias").unwrap().is_structured());
}

#[test]
fn literal_types() {
    let cases = [
        ("true", Primitive::Boolean),
        ("FALSE", Primitive::Boolean),
        ("'a'", Primitive::Char),
        ("'\\n'", Primitive::Char),
        ("'ab'", Primitive::String),
        ("\"hello\"", Primitive::String),
        ("42", Primitive::Int),
        ("2147483648", Primitive::Long),
        ("42L", Primitive::Long),
        ("99999999999999999999", Primitive::Double),
        ("0x1F", Primitive::Int),
        ("0b101", Primitive::Int),
        ("017", Primitive::Int),
        ("3.14", Primitive::Double),
        ("1e10", Primitive::Double),
        ("2.5f", Primitive::Double),
    ];
    for (literal, expected) in cases {
        assert_eq!(standard_type_for(literal), prim(expected), "literal {literal}");
    }
}

#[test]
fn non_literals_are_dummy() {
    assert_eq!(standard_type_for("count"), Type::Dummy);
    assert_eq!(standard_type_for("+"), Type::Dummy);
    assert_eq!(standard_type_for("\"open"), Type::Dummy);
}

#[test]
fn shared_registry_sees_writes() {
    let shared = SharedTypeRegistry::default();
    let other = shared.clone();
    shared
        .write()
        .put_type(record("Pt", &[("x", prim(Primitive::Int))]), false)
        .unwrap();
    assert!(other.read().contains("Pt"));
}
