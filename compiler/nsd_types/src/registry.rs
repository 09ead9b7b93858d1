//! Name-addressed type registry.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use nsd_lexer_core::TokenClass;
use rustc_hash::FxHashMap;
use tracing::{debug, trace};

use crate::error::TypeError;
use crate::primitive::Primitive;
use crate::ty::Type;

#[cfg(test)]
mod tests;

/// Maps type names to types and variable names to their types.
///
/// The standard primitives are always present and cannot be replaced.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TypeRegistry {
    types: BTreeMap<String, Type>,
    variables: FxHashMap<String, Type>,
}

impl Default for TypeRegistry {
    fn default() -> Self {
        TypeRegistry::new()
    }
}

impl TypeRegistry {
    pub fn new() -> Self {
        let types = Primitive::ALL
            .into_iter()
            .map(|p| (p.name().to_owned(), Type::Primitive(p)))
            .collect();
        TypeRegistry {
            types,
            variables: FxHashMap::default(),
        }
    }

    pub fn get(&self, name: &str) -> Option<&Type> {
        self.types.get(name)
    }

    pub fn resolve(&self, name: &str) -> Result<&Type, TypeError> {
        self.get(name)
            .ok_or_else(|| TypeError::Unresolved(name.to_owned()))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.types.contains_key(name)
    }

    pub fn is_standard(name: &str) -> bool {
        Primitive::from_name(name).is_some()
    }

    /// Register a named type. Returns `Ok(false)` without changes if the
    /// type is anonymous, or already registered and `force` is off.
    pub fn put_type(&mut self, ty: Type, force: bool) -> Result<bool, TypeError> {
        let Some(name) = ty.name().map(str::to_owned) else {
            return Ok(false);
        };
        if let Some(primitive) = Primitive::from_name(&name) {
            if ty == Type::Primitive(primitive) {
                return Ok(false);
            }
            return Err(TypeError::StandardType(name));
        }
        if !force && self.types.contains_key(&name) {
            return Ok(false);
        }
        debug!(%name, description = %ty.describe(false), "registering type");
        self.types.insert(name, ty);
        Ok(true)
    }

    /// Associate variable `var` with `ty`, registering `ty` too if it is
    /// named and new. Without `force`, an existing association is kept, as
    /// is the variable when `ty` conflicts with a registered type of the
    /// same name.
    pub fn put_type_for(&mut self, var: &str, ty: Type, force: bool) -> bool {
        if !force {
            if self.variables.contains_key(var) {
                return false;
            }
            if let Some(registered) = ty.name().and_then(|name| self.types.get(name)) {
                if *registered != ty {
                    return false;
                }
            }
        }
        // A standard or unnamed type is simply not registered.
        let _ = self.put_type(ty.clone(), false);
        self.variables.insert(var.to_owned(), ty);
        true
    }

    pub fn type_for(&self, var: &str) -> Option<&Type> {
        self.variables.get(var)
    }

    /// Remove a user type. Standard types stay.
    pub fn remove_type(&mut self, name: &str) -> Option<Type> {
        if Self::is_standard(name) {
            return None;
        }
        self.types.remove(name)
    }

    pub fn type_names(&self) -> impl Iterator<Item = &str> {
        self.types.keys().map(String::as_str)
    }

    /// Re-resolve all nested references by name, re-checking alias chains.
    ///
    /// Every entry is attempted; entries that fail keep their previous
    /// state and the first failure is returned.
    pub fn refresh(&mut self) -> Result<(), TypeError> {
        let mut first_error = None;
        let names: Vec<String> = self
            .types
            .iter()
            .filter(|(_, ty)| !matches!(ty, Type::Primitive(_)))
            .map(|(name, _)| name.clone())
            .collect();
        for name in names {
            let Some(mut ty) = self.types.get(&name).cloned() else {
                continue;
            };
            match ty.update_references(self) {
                Ok(()) => {
                    self.types.insert(name, ty);
                }
                Err(error) => {
                    debug!(%name, %error, "type refresh failed");
                    first_error.get_or_insert(error);
                }
            }
        }
        let vars: Vec<(String, String)> = self
            .variables
            .iter()
            .filter_map(|(var, ty)| ty.name().map(|name| (var.clone(), name.to_owned())))
            .collect();
        for (var, type_name) in vars {
            if let Some(current) = self.types.get(&type_name).cloned() {
                self.variables.insert(var, current);
            }
        }
        trace!(types = self.types.len(), "registry refreshed");
        first_error.map_or(Ok(()), Err)
    }
}

/// The primitive type a literal denotes, or [`Type::Dummy`].
pub fn standard_type_for(literal: &str) -> Type {
    if literal.eq_ignore_ascii_case("true") || literal.eq_ignore_ascii_case("false") {
        return Type::Primitive(Primitive::Boolean);
    }
    let long_suffix = literal.ends_with(['l', 'L']);
    let primitive = match TokenClass::of(literal) {
        TokenClass::Char => Primitive::Char,
        TokenClass::String => Primitive::String,
        TokenClass::BinaryInt | TokenClass::OctalInt | TokenClass::HexInt if long_suffix => {
            Primitive::Long
        }
        TokenClass::BinaryInt | TokenClass::OctalInt | TokenClass::HexInt => Primitive::Int,
        TokenClass::DecimalInt if long_suffix => Primitive::Long,
        TokenClass::DecimalInt if literal.parse::<i32>().is_ok() => Primitive::Int,
        TokenClass::DecimalInt if literal.parse::<i64>().is_ok() => Primitive::Long,
        TokenClass::DecimalInt | TokenClass::Float => Primitive::Double,
        _ => return Type::Dummy,
    };
    Type::Primitive(primitive)
}

/// Registry shared between parser instances.
///
/// Reads (lookups during parsing) take the read lock; registration and
/// [`TypeRegistry::refresh`] take the write lock.
pub struct SharedTypeRegistry(Arc<parking_lot::RwLock<TypeRegistry>>);

impl SharedTypeRegistry {
    pub fn new(registry: TypeRegistry) -> Self {
        SharedTypeRegistry(Arc::new(parking_lot::RwLock::new(registry)))
    }

    pub fn read(&self) -> parking_lot::RwLockReadGuard<'_, TypeRegistry> {
        self.0.read()
    }

    pub fn write(&self) -> parking_lot::RwLockWriteGuard<'_, TypeRegistry> {
        self.0.write()
    }
}

impl Default for SharedTypeRegistry {
    fn default() -> Self {
        SharedTypeRegistry::new(TypeRegistry::new())
    }
}

impl Clone for SharedTypeRegistry {
    fn clone(&self) -> Self {
        SharedTypeRegistry(Arc::clone(&self.0))
    }
}

impl fmt::Debug for SharedTypeRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SharedTypeRegistry({:?})", &*self.0.read())
    }
}
