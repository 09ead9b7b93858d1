//! Declarations in syntactic form.

use std::fmt;

use bitflags::bitflags;

use crate::expr::Expression;


bitflags! {
    /// Surface dialects a declaration may be written in.
    ///
    /// The declaration parser starts from every dialect the context allows
    /// and narrows the set as it meets structural landmarks; what remains
    /// describes how the declaration was written.
    #[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
    pub struct DeclRules: u16 {
        /// `name: Type`
        const PASCAL_TYPED = 1 << 0;
        /// `name as Type`
        const BASIC_TYPED = 1 << 1;
        /// `Type name`, array brackets on either side.
        const C_STYLE = 1 << 2;
        /// `name` alone, no type.
        const IMPLICIT = 1 << 3;
        /// Groups separated by `;`.
        const GROUPS = 1 << 4;
        /// Several names or items separated by `,`.
        const LISTS = 1 << 5;
        /// `= default` values.
        const DEFAULTS = 1 << 6;

        const TYPE_DIALECTS = Self::PASCAL_TYPED.bits()
            | Self::BASIC_TYPED.bits()
            | Self::C_STYLE.bits()
            | Self::IMPLICIT.bits();
    }
}

/// One dimension of an `array[...] of` description.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub enum Extent {
    /// `[n]`: element count.
    Size(Expression),
    /// `[lo..hi]`: inclusive index range.
    Range(Expression, Expression),
}

/// A type as written in a declaration.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub enum TypeSpec {
    /// `int`, `Person`, or `int[][]` with `dims` pairs of empty brackets.
    Named { name: String, dims: usize },
    /// `array of T` (no extents) or `array[1..10, 5] of T`.
    ArrayOf {
        extents: Vec<Extent>,
        element: Box<TypeSpec>,
    },
}

impl TypeSpec {
    pub fn named(name: impl Into<String>) -> Self {
        TypeSpec::Named {
            name: name.into(),
            dims: 0,
        }
    }

    /// Wrap `self` as the element of an array with the given extents.
    pub fn array_of(self, extents: Vec<Extent>) -> Self {
        TypeSpec::ArrayOf {
            extents,
            element: Box::new(self),
        }
    }

    /// Name of the innermost element type.
    pub fn base_name(&self) -> &str {
        match self {
            TypeSpec::Named { name, .. } => name,
            TypeSpec::ArrayOf { element, .. } => element.base_name(),
        }
    }

    pub fn is_array(&self) -> bool {
        match self {
            TypeSpec::Named { dims, .. } => *dims > 0,
            TypeSpec::ArrayOf { .. } => true,
        }
    }
}

impl fmt::Display for Extent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Extent::Size(size) => write!(f, "{size}"),
            Extent::Range(low, high) => write!(f, "{low}..{high}"),
        }
    }
}

impl fmt::Display for TypeSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeSpec::Named { name, dims } => {
                f.write_str(name)?;
                for _ in 0..*dims {
                    f.write_str("[]")?;
                }
                Ok(())
            }
            TypeSpec::ArrayOf { extents, element } => {
                f.write_str("array")?;
                if !extents.is_empty() {
                    f.write_str("[")?;
                    for (i, extent) in extents.iter().enumerate() {
                        if i > 0 {
                            f.write_str(", ")?;
                        }
                        write!(f, "{extent}")?;
                    }
                    f.write_str("]")?;
                }
                write!(f, " of {element}")
            }
        }
    }
}

/// A single declared name.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub struct Declarator {
    pub name: String,
    /// Token index of the name.
    pub pos: usize,
    pub type_spec: Option<TypeSpec>,
    pub default: Option<Expression>,
}

impl Declarator {
    pub fn new(name: impl Into<String>, pos: usize) -> Self {
        Declarator {
            name: name.into(),
            pos,
            type_spec: None,
            default: None,
        }
    }

    #[must_use]
    pub fn with_type(mut self, type_spec: TypeSpec) -> Self {
        self.type_spec = Some(type_spec);
        self
    }

    #[must_use]
    pub fn with_default(mut self, default: Expression) -> Self {
        self.default = Some(default);
        self
    }

    /// Render in the dialect described by `rule`.
    pub(crate) fn fmt_with(&self, f: &mut fmt::Formatter<'_>, rule: DeclRules) -> fmt::Result {
        match &self.type_spec {
            Some(spec) if rule.contains(DeclRules::C_STYLE) => write!(f, "{spec} {}", self.name)?,
            Some(spec) if rule.contains(DeclRules::BASIC_TYPED) => {
                write!(f, "{} as {spec}", self.name)?;
            }
            Some(spec) => write!(f, "{}: {spec}", self.name)?,
            None => f.write_str(&self.name)?,
        }
        if let Some(default) = &self.default {
            write!(f, " = {default}")?;
        }
        Ok(())
    }
}
