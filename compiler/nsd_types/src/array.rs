//! Array types and their index bounds.

use nsd_ir::Expression;

use crate::error::TypeError;
use crate::ty::{check_name, Type};

#[cfg(test)]
mod tests;

/// The index space of one array dimension.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ArrayBounds {
    /// Size unknown or open (`int[]`, `array of T`).
    Flexible,
    /// `n` elements indexed from zero.
    Size(u64),
    /// Inclusive index range; `offset` may be negative.
    Range { offset: i64, upper: i64 },
    /// Element count given by an expression that is not a literal.
    Dynamic(Expression),
    /// Index range whose bounds are not both literals.
    DynamicRange(Expression, Expression),
}

impl ArrayBounds {
    /// Inclusive range `low..=high` of literal bounds.
    pub fn range(low: i64, high: i64) -> Result<Self, TypeError> {
        if high < low {
            return Err(TypeError::InvalidRange { low, high });
        }
        Ok(ArrayBounds::Range {
            offset: low,
            upper: high,
        })
    }

    /// Element count, if known.
    pub fn size(&self) -> Option<u64> {
        match self {
            ArrayBounds::Size(n) => Some(*n),
            ArrayBounds::Range { offset, upper } => Some(upper.abs_diff(*offset) + 1),
            _ => None,
        }
    }

    /// Inclusive `(first, last)` index pair, if both are literal.
    pub fn index_range(&self) -> Option<(i64, i64)> {
        match self {
            ArrayBounds::Size(0) => None,
            ArrayBounds::Size(n) => i64::try_from(*n).ok().map(|n| (0, n - 1)),
            ArrayBounds::Range { offset, upper } => Some((*offset, *upper)),
            _ => None,
        }
    }

    /// The unevaluated bound expressions: the size expression, or the
    /// lower and upper bound.
    pub fn expressions(&self) -> Option<(&Expression, Option<&Expression>)> {
        match self {
            ArrayBounds::Dynamic(size) => Some((size, None)),
            ArrayBounds::DynamicRange(low, high) => Some((low, Some(high))),
            _ => None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ArrayType {
    name: Option<String>,
    element: Box<Type>,
    bounds: ArrayBounds,
}

impl ArrayType {
    /// An anonymous array of `element`.
    pub fn new(element: Type, bounds: ArrayBounds) -> Self {
        ArrayType {
            name: None,
            element: Box::new(element),
            bounds,
        }
    }

    pub fn named(name: &str, element: Type, bounds: ArrayBounds) -> Result<Self, TypeError> {
        check_name(Some(name))?;
        Ok(ArrayType {
            name: Some(name.to_owned()),
            element: Box::new(element),
            bounds,
        })
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn element(&self) -> &Type {
        &self.element
    }

    pub(crate) fn element_mut(&mut self) -> &mut Type {
        &mut self.element
    }

    pub fn bounds(&self) -> &ArrayBounds {
        &self.bounds
    }

    /// Number of nested array levels, counting this one.
    pub fn dimensions(&self) -> usize {
        1 + self.element.as_array().map_or(0, ArrayType::dimensions)
    }

    /// The array at nesting depth `depth`; depth 0 is `self`.
    pub fn dimension(&self, depth: usize) -> Option<&ArrayType> {
        if depth == 0 {
            return Some(self);
        }
        self.element.as_array()?.dimension(depth - 1)
    }

    /// Innermost non-array element type.
    pub fn base_element(&self) -> &Type {
        match self.element.as_array() {
            Some(inner) => inner.base_element(),
            None => &self.element,
        }
    }

    pub fn size(&self, depth: usize) -> Option<u64> {
        self.dimension(depth)?.bounds.size()
    }

    pub fn index_range(&self, depth: usize) -> Option<(i64, i64)> {
        self.dimension(depth)?.bounds.index_range()
    }

    pub fn bound_expressions(&self, depth: usize) -> Option<(&Expression, Option<&Expression>)> {
        self.dimension(depth)?.bounds.expressions()
    }

    /// `(offset, size)` as shown in descriptions; unknown parts are 0.
    pub(crate) fn offset_and_size(&self) -> (i64, u64) {
        let offset = match self.bounds {
            ArrayBounds::Range { offset, .. } => offset,
            _ => 0,
        };
        (offset, self.bounds.size().unwrap_or(0))
    }
}
