//! Type descriptors for declarations in element lines.
//!
//! Types are addressed by name through a [`TypeRegistry`]. Nested types
//! (array elements, record components, alias targets) are held as owned
//! snapshots that [`TypeRegistry::refresh`] re-resolves by name after the
//! registry changes, so redefining a type propagates to its users.
//!
//! Alias chains ([`RedirType`]) are checked for cycles when they are
//! built and again on every refresh.

mod array;
mod error;
mod primitive;
mod redirect;
mod registry;
mod ty;

pub use array::{ArrayBounds, ArrayType};
pub use error::TypeError;
pub use primitive::Primitive;
pub use redirect::RedirType;
pub use registry::{standard_type_for, SharedTypeRegistry, TypeRegistry};
pub use ty::{EnumItem, EnumType, PointerType, RecordType, Type};
