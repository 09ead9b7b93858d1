//! The [`Type`] enum and the smaller structured types.

use nsd_ir::Expression;
use nsd_lexer_core::is_identifier;
use rustc_hash::FxHashSet;

use crate::array::ArrayType;
use crate::error::TypeError;
use crate::primitive::Primitive;
use crate::redirect::RedirType;
use crate::registry::TypeRegistry;


const DUMMY_NAME: &str = "???";

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Type {
    Primitive(Primitive),
    Array(ArrayType),
    Redirect(RedirType),
    Record(RecordType),
    Enum(EnumType),
    Pointer(PointerType),
    /// Placeholder for a type that could not be determined.
    Dummy,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RecordType {
    name: Option<String>,
    components: Vec<(String, Type)>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EnumItem {
    pub name: String,
    /// Explicit value, kept unevaluated.
    pub value: Option<Expression>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EnumType {
    name: Option<String>,
    items: Vec<EnumItem>,
}

/// A reference to another type, held by name so self-referential
/// structures stay finite.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PointerType {
    name: Option<String>,
    target: String,
}

pub(crate) fn check_name(name: Option<&str>) -> Result<(), TypeError> {
    match name {
        Some(name) if !is_identifier(name) => Err(TypeError::InvalidName(name.to_owned())),
        _ => Ok(()),
    }
}

impl RecordType {
    pub fn new(name: Option<&str>, components: Vec<(String, Type)>) -> Result<Self, TypeError> {
        check_name(name)?;
        let mut seen = FxHashSet::default();
        for (component, _) in &components {
            if !seen.insert(component.as_str()) {
                return Err(TypeError::DuplicateComponent {
                    record: name.unwrap_or_default().to_owned(),
                    component: component.clone(),
                });
            }
        }
        Ok(RecordType {
            name: name.map(str::to_owned),
            components,
        })
    }

    pub fn component(&self, name: &str) -> Option<&Type> {
        self.components
            .iter()
            .find(|(component, _)| component == name)
            .map(|(_, ty)| ty)
    }

    pub fn component_names(&self) -> impl Iterator<Item = &str> {
        self.components.iter().map(|(name, _)| name.as_str())
    }

    pub fn components(&self) -> &[(String, Type)] {
        &self.components
    }
}

impl EnumType {
    pub fn new(name: Option<&str>, items: Vec<EnumItem>) -> Result<Self, TypeError> {
        check_name(name)?;
        Ok(EnumType {
            name: name.map(str::to_owned),
            items,
        })
    }

    pub fn items(&self) -> &[EnumItem] {
        &self.items
    }

    pub fn contains(&self, item: &str) -> bool {
        self.items.iter().any(|i| i.name == item)
    }
}

impl PointerType {
    pub fn new(name: Option<&str>, target: impl Into<String>) -> Result<Self, TypeError> {
        check_name(name)?;
        Ok(PointerType {
            name: name.map(str::to_owned),
            target: target.into(),
        })
    }

    pub fn target(&self) -> &str {
        &self.target
    }
}

impl Type {
    /// The type's own name; `None` for anonymous types.
    pub fn name(&self) -> Option<&str> {
        match self {
            Type::Primitive(p) => Some(p.name()),
            Type::Array(a) => a.name(),
            Type::Redirect(r) => Some(r.name()),
            Type::Record(r) => r.name.as_deref(),
            Type::Enum(e) => e.name.as_deref(),
            Type::Pointer(p) => p.name.as_deref(),
            Type::Dummy => None,
        }
    }

    /// How the type is referred to from an enclosing type: its name, or
    /// its shallow description when it has none.
    pub fn display_name(&self) -> String {
        match self.name() {
            Some(name) => name.to_owned(),
            None => self.describe(false),
        }
    }

    pub fn is_anonymous(&self) -> bool {
        self.name().is_none()
    }

    /// Follows alias chains to the type that carries the structure.
    pub fn resolved(&self) -> &Type {
        match self {
            Type::Redirect(r) => r.terminal(),
            other => other,
        }
    }

    pub fn is_dummy(&self) -> bool {
        matches!(self.resolved(), Type::Dummy)
    }

    pub fn is_primitive(&self) -> bool {
        matches!(self.resolved(), Type::Primitive(_))
    }

    pub fn is_numeric(&self) -> bool {
        matches!(self.resolved(), Type::Primitive(p) if p.is_numeric())
    }

    pub fn is_structured(&self) -> bool {
        matches!(self.resolved(), Type::Array(_) | Type::Record(_))
    }

    pub fn as_array(&self) -> Option<&ArrayType> {
        match self.resolved() {
            Type::Array(a) => Some(a),
            _ => None,
        }
    }

    pub fn as_record(&self) -> Option<&RecordType> {
        match self.resolved() {
            Type::Record(r) => Some(r),
            _ => None,
        }
    }

    /// Render the type structure.
    ///
    /// Shallow mode names nested types; deep mode expands them:
    /// arrays `@name(elem,offset,size)`, records `$Name(a:int;b:double)`,
    /// enums `#Name(A,B=3)`, pointers `^name(T)`, aliases `=Name(T)`.
    pub fn describe(&self, deep: bool) -> String {
        self.describe_as(self.name(), deep)
    }

    pub(crate) fn describe_as(&self, name: Option<&str>, deep: bool) -> String {
        let label = name.unwrap_or_default();
        let nested = |ty: &Type| if deep { ty.describe(true) } else { ty.display_name() };
        match self {
            Type::Primitive(p) => p.name().to_owned(),
            Type::Dummy => DUMMY_NAME.to_owned(),
            Type::Array(a) => {
                let (offset, size) = a.offset_and_size();
                format!("@{label}({},{offset},{size})", nested(a.element()))
            }
            Type::Record(r) => {
                let parts: Vec<String> = r
                    .components
                    .iter()
                    .map(|(component, ty)| format!("{component}:{}", nested(ty)))
                    .collect();
                format!("${label}({})", parts.join(";"))
            }
            Type::Enum(e) => {
                if !deep && name.is_some() {
                    return label.to_owned();
                }
                let items: Vec<String> = e
                    .items
                    .iter()
                    .map(|item| match &item.value {
                        Some(value) => format!("{}={value}", item.name),
                        None => item.name.clone(),
                    })
                    .collect();
                format!("#{label}({})", items.join(","))
            }
            Type::Pointer(p) => format!("^{label}({})", p.target),
            Type::Redirect(r) => {
                if deep {
                    format!("={label}({})", r.terminal().describe(true))
                } else {
                    label.to_owned()
                }
            }
        }
    }

    /// Structural equality by deep description. An anonymous side takes
    /// the other side's name for the comparison.
    pub fn equivalent(&self, other: &Type) -> bool {
        let (mine, theirs) = match (self.name(), other.name()) {
            (None, name) => (self.describe_as(name, true), other.describe(true)),
            (name, None) => (self.describe(true), other.describe_as(name, true)),
            _ => (self.describe(true), other.describe(true)),
        };
        mine == theirs
    }

    /// Re-resolve nested named types against `registry`.
    ///
    /// Idempotent. A type reached again while it is being refreshed is
    /// left as is, so recursive structures terminate.
    pub fn update_references(&mut self, registry: &TypeRegistry) -> Result<(), TypeError> {
        let mut visiting = FxHashSet::default();
        if let Some(name) = self.name() {
            visiting.insert(name.to_owned());
        }
        self.update_references_in(registry, &mut visiting)
    }

    pub(crate) fn update_references_in(
        &mut self,
        registry: &TypeRegistry,
        visiting: &mut FxHashSet<String>,
    ) -> Result<(), TypeError> {
        match self {
            Type::Primitive(_) | Type::Dummy | Type::Pointer(_) | Type::Enum(_) => Ok(()),
            Type::Array(a) => refresh_nested(a.element_mut(), registry, visiting),
            Type::Record(r) => {
                for (_, component) in &mut r.components {
                    refresh_nested(component, registry, visiting)?;
                }
                Ok(())
            }
            Type::Redirect(r) => r.update_references(registry),
        }
    }
}

/// Replace a nested named type with the registry's current version and
/// recurse into it.
fn refresh_nested(
    nested: &mut Type,
    registry: &TypeRegistry,
    visiting: &mut FxHashSet<String>,
) -> Result<(), TypeError> {
    let Some(name) = nested.name().map(str::to_owned) else {
        return nested.update_references_in(registry, visiting);
    };
    if visiting.contains(&name) {
        return Ok(());
    }
    if let Some(current) = registry.get(&name) {
        *nested = current.clone();
    }
    visiting.insert(name.clone());
    let result = nested.update_references_in(registry, visiting);
    visiting.remove(&name);
    result
}
