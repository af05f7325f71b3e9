//! Primitive type kinds for the host platform's built-in value types.

use std::fmt;

use crate::TypeHash;

/// Primitive type kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrimitiveKind {
    Void,
    Bool,
    Byte,
    SByte,
    Int16,
    UInt16,
    Int32,
    UInt32,
    Int64,
    UInt64,
    Char,
    Float,
    Double,
    IntPtr,
    UIntPtr,
}

impl PrimitiveKind {
    /// Every primitive kind, in declaration order.
    pub const ALL: [PrimitiveKind; 15] = [
        PrimitiveKind::Void,
        PrimitiveKind::Bool,
        PrimitiveKind::Byte,
        PrimitiveKind::SByte,
        PrimitiveKind::Int16,
        PrimitiveKind::UInt16,
        PrimitiveKind::Int32,
        PrimitiveKind::UInt32,
        PrimitiveKind::Int64,
        PrimitiveKind::UInt64,
        PrimitiveKind::Char,
        PrimitiveKind::Float,
        PrimitiveKind::Double,
        PrimitiveKind::IntPtr,
        PrimitiveKind::UIntPtr,
    ];

    /// Get the TypeHash for this primitive type.
    pub const fn type_hash(self) -> TypeHash {
        use crate::primitives;
        match self {
            PrimitiveKind::Void => primitives::VOID,
            PrimitiveKind::Bool => primitives::BOOL,
            PrimitiveKind::Byte => primitives::BYTE,
            PrimitiveKind::SByte => primitives::SBYTE,
            PrimitiveKind::Int16 => primitives::INT16,
            PrimitiveKind::UInt16 => primitives::UINT16,
            PrimitiveKind::Int32 => primitives::INT32,
            PrimitiveKind::UInt32 => primitives::UINT32,
            PrimitiveKind::Int64 => primitives::INT64,
            PrimitiveKind::UInt64 => primitives::UINT64,
            PrimitiveKind::Char => primitives::CHAR,
            PrimitiveKind::Float => primitives::FLOAT,
            PrimitiveKind::Double => primitives::DOUBLE,
            PrimitiveKind::IntPtr => primitives::INTPTR,
            PrimitiveKind::UIntPtr => primitives::UINTPTR,
        }
    }

    /// Get the name of this primitive type.
    pub const fn name(self) -> &'static str {
        match self {
            PrimitiveKind::Void => "void",
            PrimitiveKind::Bool => "bool",
            PrimitiveKind::Byte => "byte",
            PrimitiveKind::SByte => "sbyte",
            PrimitiveKind::Int16 => "short",
            PrimitiveKind::UInt16 => "ushort",
            PrimitiveKind::Int32 => "int",
            PrimitiveKind::UInt32 => "uint",
            PrimitiveKind::Int64 => "long",
            PrimitiveKind::UInt64 => "ulong",
            PrimitiveKind::Char => "char",
            PrimitiveKind::Float => "float",
            PrimitiveKind::Double => "double",
            PrimitiveKind::IntPtr => "nint",
            PrimitiveKind::UIntPtr => "nuint",
        }
    }

    /// Whether this is an integral type an enum may be declared over.
    pub const fn is_integer(self) -> bool {
        matches!(
            self,
            PrimitiveKind::Byte
                | PrimitiveKind::SByte
                | PrimitiveKind::Int16
                | PrimitiveKind::UInt16
                | PrimitiveKind::Int32
                | PrimitiveKind::UInt32
                | PrimitiveKind::Int64
                | PrimitiveKind::UInt64
        )
    }

    /// Whether this is a floating point type.
    pub const fn is_float(self) -> bool {
        matches!(self, PrimitiveKind::Float | PrimitiveKind::Double)
    }

    /// Whether reads and writes of this type are atomic on every target,
    /// which is what permits a `volatile` field of it.
    pub const fn is_volatile_safe(self) -> bool {
        matches!(
            self,
            PrimitiveKind::Bool
                | PrimitiveKind::Byte
                | PrimitiveKind::SByte
                | PrimitiveKind::Int16
                | PrimitiveKind::UInt16
                | PrimitiveKind::Int32
                | PrimitiveKind::UInt32
                | PrimitiveKind::Char
                | PrimitiveKind::Float
                | PrimitiveKind::IntPtr
                | PrimitiveKind::UIntPtr
        )
    }

    /// Look a primitive up by its type hash.
    pub fn from_hash(hash: TypeHash) -> Option<PrimitiveKind> {
        Self::ALL.into_iter().find(|k| k.type_hash() == hash)
    }
}

impl fmt::Display for PrimitiveKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::primitives;

    #[test]
    fn hash_and_name_round_trip_through_lookup() {
        for kind in PrimitiveKind::ALL {
            assert_eq!(PrimitiveKind::from_hash(kind.type_hash()), Some(kind));
            assert_eq!(TypeHash::from_name(kind.name()), kind.type_hash());
        }
    }

    #[test]
    fn object_is_not_primitive() {
        assert_eq!(PrimitiveKind::from_hash(primitives::OBJECT), None);
    }

    #[test]
    fn wide_types_are_not_volatile_safe() {
        assert!(!PrimitiveKind::Int64.is_volatile_safe());
        assert!(!PrimitiveKind::UInt64.is_volatile_safe());
        assert!(!PrimitiveKind::Double.is_volatile_safe());
        assert!(!PrimitiveKind::Void.is_volatile_safe());
        assert!(PrimitiveKind::Int32.is_volatile_safe());
        assert!(PrimitiveKind::IntPtr.is_volatile_safe());
    }

    #[test]
    fn integer_classification() {
        assert!(PrimitiveKind::Int64.is_integer());
        assert!(!PrimitiveKind::Char.is_integer());
        assert!(!PrimitiveKind::Bool.is_integer());
        assert!(PrimitiveKind::Double.is_float());
    }
}
