//! TypeEntry enum for unified type storage.

use crate::TypeHash;

use super::{ClassEntry, EnumEntry, InterfaceEntry, PointerEntry, PrimitiveEntry};

/// Where a type came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TypeSource {
    /// Provided by the host platform.
    #[default]
    Host,
    /// Built by the compiler during this compilation.
    Synthesized,
}

/// Unified type entry for registry storage.
#[derive(Debug, Clone, PartialEq)]
pub enum TypeEntry {
    /// Primitive value type.
    Primitive(PrimitiveEntry),
    /// Class type.
    Class(ClassEntry),
    /// Interface type (including generic definitions and instances).
    Interface(InterfaceEntry),
    /// Enum type.
    Enum(EnumEntry),
    /// Unmanaged pointer type.
    Pointer(PointerEntry),
}

impl TypeEntry {
    /// Get the type hash for this entry.
    pub fn type_hash(&self) -> TypeHash {
        match self {
            TypeEntry::Primitive(e) => e.type_hash,
            TypeEntry::Class(e) => e.type_hash,
            TypeEntry::Interface(e) => e.type_hash,
            TypeEntry::Enum(e) => e.type_hash,
            TypeEntry::Pointer(e) => e.type_hash,
        }
    }

    /// Get the fully qualified name.
    pub fn name(&self) -> &str {
        match self {
            TypeEntry::Primitive(e) => e.name(),
            TypeEntry::Class(e) => &e.name,
            TypeEntry::Interface(e) => &e.name,
            TypeEntry::Enum(e) => &e.name,
            TypeEntry::Pointer(e) => &e.name,
        }
    }

    /// Get the source. Primitives, enums and pointers always come from the host.
    pub fn source(&self) -> TypeSource {
        match self {
            TypeEntry::Class(e) => e.source,
            TypeEntry::Interface(e) => e.source,
            _ => TypeSource::Host,
        }
    }

    // === Type Checks ===

    /// Check if this is a primitive type.
    pub fn is_primitive(&self) -> bool {
        matches!(self, TypeEntry::Primitive(_))
    }

    /// Check if this is a class type.
    pub fn is_class(&self) -> bool {
        matches!(self, TypeEntry::Class(_))
    }

    /// Check if this is an interface type.
    pub fn is_interface(&self) -> bool {
        matches!(self, TypeEntry::Interface(_))
    }

    /// Check if this is an enum type.
    pub fn is_enum(&self) -> bool {
        matches!(self, TypeEntry::Enum(_))
    }

    /// Check if this is a pointer type.
    pub fn is_pointer(&self) -> bool {
        matches!(self, TypeEntry::Pointer(_))
    }

    /// Check if values of this type are object references.
    pub fn is_reference_type(&self) -> bool {
        matches!(self, TypeEntry::Class(_) | TypeEntry::Interface(_))
    }

    // === Downcasts ===

    /// Get as a class entry.
    pub fn as_class(&self) -> Option<&ClassEntry> {
        match self {
            TypeEntry::Class(e) => Some(e),
            _ => None,
        }
    }

    /// Get as an interface entry.
    pub fn as_interface(&self) -> Option<&InterfaceEntry> {
        match self {
            TypeEntry::Interface(e) => Some(e),
            _ => None,
        }
    }

    /// Get as an enum entry.
    pub fn as_enum(&self) -> Option<&EnumEntry> {
        match self {
            TypeEntry::Enum(e) => Some(e),
            _ => None,
        }
    }

    /// Get as a primitive entry.
    pub fn as_primitive(&self) -> Option<&PrimitiveEntry> {
        match self {
            TypeEntry::Primitive(e) => Some(e),
            _ => None,
        }
    }
}

impl From<PrimitiveEntry> for TypeEntry {
    fn from(entry: PrimitiveEntry) -> Self {
        TypeEntry::Primitive(entry)
    }
}

impl From<ClassEntry> for TypeEntry {
    fn from(entry: ClassEntry) -> Self {
        TypeEntry::Class(entry)
    }
}

impl From<InterfaceEntry> for TypeEntry {
    fn from(entry: InterfaceEntry) -> Self {
        TypeEntry::Interface(entry)
    }
}

impl From<EnumEntry> for TypeEntry {
    fn from(entry: EnumEntry) -> Self {
        TypeEntry::Enum(entry)
    }
}

impl From<PointerEntry> for TypeEntry {
    fn from(entry: PointerEntry) -> Self {
        TypeEntry::Pointer(entry)
    }
}
