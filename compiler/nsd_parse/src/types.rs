//! Turning written type descriptions into registry types.

use nsd_ir::{ExprKind, Expression, Extent, LiteralKind, Operator, TypeSpec};
use nsd_types::{standard_type_for, ArrayBounds, ArrayType, Type, TypeError, TypeRegistry};

use crate::error::ParseError;

#[cfg(test)]
mod tests;

pub(crate) fn type_error(error: &TypeError, position: usize) -> ParseError {
    ParseError::semantic(error.to_string(), position)
}

/// Resolve `spec` against `registry`. Named types must be registered;
/// array levels are built anonymously, outermost dimension first.
pub(crate) fn resolve_spec(spec: &TypeSpec, registry: &TypeRegistry) -> Result<Type, TypeError> {
    match spec {
        TypeSpec::Named { name, dims } => {
            let mut ty = registry.resolve(name)?.clone();
            for _ in 0..*dims {
                ty = Type::Array(ArrayType::new(ty, ArrayBounds::Flexible));
            }
            Ok(ty)
        }
        TypeSpec::ArrayOf { extents, element } => {
            let element = resolve_spec(element, registry)?;
            if extents.is_empty() {
                return Ok(Type::Array(ArrayType::new(element, ArrayBounds::Flexible)));
            }
            extents.iter().rev().try_fold(element, |inner, extent| {
                Ok(Type::Array(ArrayType::new(inner, bounds_of(extent)?)))
            })
        }
    }
}

/// Wrap `element` in one array level per C-style dimension `[n]`.
pub(crate) fn with_dimensions(element: Type, dimensions: &[Expression]) -> Result<Type, TypeError> {
    dimensions.iter().rev().try_fold(element, |inner, size| {
        Ok(Type::Array(ArrayType::new(inner, bounds_of(&Extent::Size(size.clone()))?)))
    })
}

fn bounds_of(extent: &Extent) -> Result<ArrayBounds, TypeError> {
    match extent {
        Extent::Size(size) => Ok(match integer_value(size).and_then(|n| u64::try_from(n).ok()) {
            Some(n) => ArrayBounds::Size(n),
            None => ArrayBounds::Dynamic(size.clone()),
        }),
        Extent::Range(low, high) => match (integer_value(low), integer_value(high)) {
            (Some(low), Some(high)) => ArrayBounds::range(low, high),
            _ => Ok(ArrayBounds::DynamicRange(low.clone(), high.clone())),
        },
    }
}

/// Give an anonymous constructed type the name it is defined under.
pub(crate) fn named(name: &str, ty: Type) -> Result<Type, TypeError> {
    match ty {
        Type::Array(array) if array.name().is_none() => Ok(Type::Array(ArrayType::named(
            name,
            array.element().clone(),
            array.bounds().clone(),
        )?)),
        other => Ok(other),
    }
}

/// Type of a literal, looking through a leading sign.
pub(crate) fn literal_type(value: &Expression) -> Option<Type> {
    match &value.kind {
        ExprKind::Literal { text, .. } => Some(standard_type_for(text)),
        ExprKind::Operator {
            op: Operator::Neg | Operator::Plus,
            operands,
        } => match operands.as_slice() {
            [operand] if operand.is_literal() => literal_type(operand),
            _ => None,
        },
        _ => None,
    }
}

/// Value of an integer literal, optionally signed.
pub(crate) fn integer_value(expression: &Expression) -> Option<i64> {
    match &expression.kind {
        ExprKind::Literal {
            kind: LiteralKind::Integer,
            text,
        } => parse_integer(text),
        ExprKind::Operator { op, operands } => match (op, operands.as_slice()) {
            (Operator::Neg, [operand]) => integer_value(operand)?.checked_neg(),
            (Operator::Plus, [operand]) => integer_value(operand),
            _ => None,
        },
        _ => None,
    }
}

fn parse_integer(text: &str) -> Option<i64> {
    let digits = text.trim_end_matches(['L', 'l']);
    let lower = digits.to_ascii_lowercase();
    if let Some(hex) = lower.strip_prefix("0x") {
        i64::from_str_radix(hex, 16).ok()
    } else if let Some(bin) = lower.strip_prefix("0b") {
        i64::from_str_radix(bin, 2).ok()
    } else if lower.len() > 1 && lower.starts_with('0') {
        i64::from_str_radix(&lower[1..], 8).ok()
    } else {
        lower.parse().ok()
    }
}
