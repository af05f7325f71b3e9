//! Registry entry types.
//!
//! - [`TypeEntry`] - Unified enum wrapping all type entries
//! - [`ClassEntry`] - Class types
//! - [`InterfaceEntry`] - Interface types, generic definitions and instances
//! - [`EnumEntry`] - Enumerations over an integral primitive
//! - [`PointerEntry`] - Unmanaged pointer types
//! - [`PrimitiveEntry`] - Built-in primitive types
//!
//! Supporting types: [`FieldEntry`], [`MethodSignature`], [`TypeSource`].

mod class;
mod enum_entry;
mod interface;
mod member;
mod pointer;
mod primitive;
mod type_entry;

pub use class::ClassEntry;
pub use enum_entry::EnumEntry;
pub use interface::InterfaceEntry;
pub use member::{FieldEntry, MethodSignature};
pub use pointer::PointerEntry;
pub use primitive::PrimitiveEntry;
pub use type_entry::{TypeEntry, TypeSource};
