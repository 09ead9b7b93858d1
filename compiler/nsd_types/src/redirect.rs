//! Type aliases.

use rustc_hash::FxHashSet;
use tracing::debug;

use crate::error::TypeError;
use crate::registry::TypeRegistry;
use crate::ty::{check_name, Type};


/// An alias for another type, addressed by name.
///
/// Alias chains must end in a type that is not an alias. The terminal type
/// is kept as a snapshot and re-resolved on every registry refresh.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RedirType {
    name: String,
    target: String,
    terminal: Box<Type>,
}

impl RedirType {
    /// Alias `name` for the registered type `target`.
    ///
    /// Fails if `name` appears anywhere on the chain starting at `target`.
    pub fn new(name: &str, target: &str, registry: &TypeRegistry) -> Result<Self, TypeError> {
        check_name(Some(name))?;
        let terminal = resolve_chain(name, target, registry)?;
        Ok(RedirType {
            name: name.to_owned(),
            target: target.to_owned(),
            terminal: Box::new(terminal),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Name of the type directly referred to.
    pub fn target(&self) -> &str {
        &self.target
    }

    /// End of the alias chain.
    pub fn terminal(&self) -> &Type {
        &self.terminal
    }

    /// Re-walk the chain and refresh the terminal snapshot. On failure
    /// the previous snapshot is kept.
    pub fn update_references(&mut self, registry: &TypeRegistry) -> Result<(), TypeError> {
        let mut terminal = resolve_chain(&self.name, &self.target, registry)?;
        terminal.update_references(registry)?;
        *self.terminal = terminal;
        Ok(())
    }
}

fn resolve_chain(name: &str, target: &str, registry: &TypeRegistry) -> Result<Type, TypeError> {
    let mut visited = FxHashSet::default();
    visited.insert(name.to_owned());
    let mut current = target.to_owned();
    loop {
        if !visited.insert(current.clone()) {
            debug!(name, target, via = %current, "cyclic type alias");
            return Err(TypeError::Cyclic {
                name: name.to_owned(),
                target: target.to_owned(),
            });
        }
        match registry.get(&current) {
            Some(Type::Redirect(next)) => current = next.target.clone(),
            Some(terminal) => return Ok(terminal.clone()),
            None => return Err(TypeError::Unresolved(current)),
        }
    }
}
